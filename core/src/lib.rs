#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Parkline world editor.
//!
//! This crate defines the data surface that connects the authoritative world
//! to the pure placement systems. Systems receive a world handle through the
//! [`WorldQueries`] and [`WorldMutations`] traits, inspect tile element
//! stacks and object registries through it, and report their decision as a
//! `Result` built from the stable rejection taxonomy in
//! [`PlacementRejection`]. Identical requests against identical world state
//! must produce identical values on every machine, so the replay-critical
//! types derive `serde` traits.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of a single map tile measured in world units.
pub const TILE_SIZE: i32 = 32;

/// Height of one tile-element step measured in world units.
///
/// Element base and clearance heights are stored in steps of this size.
pub const COORDS_Z_STEP: i32 = 8;

/// Height of one terrain step measured in world units.
///
/// Surfaces rise and fall in increments of this size; an elevated wall edge
/// raises the wall base by exactly one terrain step.
pub const LAND_HEIGHT_STEP: i32 = 16;

/// Location of a single map tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapCoords {
    x: i32,
    y: i32,
}

impl MapCoords {
    /// Creates a new tile coordinate pair.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the tile.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the tile.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Manhattan distance to another tile measured in whole tiles.
    #[must_use]
    pub fn manhattan_distance(self, other: MapCoords) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// A tile coordinate pair extended with a vertical world-unit coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapLocation {
    x: i32,
    y: i32,
    z: i32,
}

impl MapLocation {
    /// Creates a new located coordinate triple.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Zero-based column of the tile.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the tile.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Vertical coordinate in world units. Zero requests terrain detection.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Drops the vertical coordinate, yielding the tile coordinates.
    #[must_use]
    pub const fn coords(&self) -> MapCoords {
        MapCoords::new(self.x, self.y)
    }

    /// Returns the same location with a replaced vertical coordinate.
    #[must_use]
    pub const fn at_height(&self, z: i32) -> MapLocation {
        MapLocation::new(self.x, self.y, z)
    }
}

/// One of the four tile-boundary directions where a wall may stand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edge {
    /// The boundary toward decreasing row indices.
    North,
    /// The boundary toward increasing column indices.
    East,
    /// The boundary toward increasing row indices.
    South,
    /// The boundary toward decreasing column indices.
    West,
}

impl Edge {
    /// Decodes an edge from its wire index, rejecting values above three.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Edge> {
        match index {
            0 => Some(Edge::North),
            1 => Some(Edge::East),
            2 => Some(Edge::South),
            3 => Some(Edge::West),
            _ => None,
        }
    }

    /// Wire index of the edge in the range `0..=3`.
    #[must_use]
    pub const fn index(&self) -> u8 {
        match self {
            Edge::North => 0,
            Edge::East => 1,
            Edge::South => 2,
            Edge::West => 3,
        }
    }

    /// Rotates the edge by the given number of quarter turns.
    ///
    /// Positive turns rotate clockwise; negative turns are accepted.
    #[must_use]
    pub fn rotated(self, quarter_turns: i32) -> Edge {
        let index = (i32::from(self.index()) + quarter_turns).rem_euclid(4);
        match Edge::from_index(index as u8) {
            Some(edge) => edge,
            None => unreachable!(),
        }
    }

    /// The edge on the opposite side of the tile.
    #[must_use]
    pub fn opposite(self) -> Edge {
        self.rotated(2)
    }
}

/// Identifier of a wall type inside the object registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallTypeId(u16);

impl WallTypeId {
    /// Creates a new wall type identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Identifier of a banner slot inside the banner pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BannerId(u16);

impl BannerId {
    /// Creates a new banner identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Identifier of a ride inside the ride registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RideId(u16);

impl RideId {
    /// Creates a new ride identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Identifier of a ride type descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RideTypeId(u16);

impl RideTypeId {
    /// Creates a new ride type identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Identifier of a track piece type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackTypeId(u16);

impl TrackTypeId {
    /// Creates a new track type identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Identifier of a scenery entry inside the object registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SceneryEntryId(u16);

impl SceneryEntryId {
    /// Creates a new scenery entry identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }
}

/// Amount of in-game currency, measured in the smallest denomination.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Money(i32);

impl Money {
    /// Creates a new amount with the provided numeric value.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the amount.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }
}

/// Palette index naming a paint colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour(u8);

impl Colour {
    /// Palette index applied to freshly created banners.
    pub const WHITE: Colour = Colour(2);

    /// Creates a new colour from a palette index.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the palette index of the colour.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// The three paint colours carried by a wall element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallColours {
    /// Primary paint colour.
    pub primary: Colour,
    /// Secondary paint colour.
    pub secondary: Colour,
    /// Tertiary paint colour, honoured only by wall types that support it.
    pub tertiary: Colour,
}

/// Text scrolling behaviour selector for walls that can carry a banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScrollingMode(u8);

impl ScrollingMode {
    /// Creates a new scrolling mode selector.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the selector.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

bitflags! {
    /// The four tile quadrants an element may occupy.
    ///
    /// An element with an empty mask has no footprint and never blocks walls.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct QuadrantMask: u8 {
        /// North quadrant.
        const NORTH = 1 << 0;
        /// East quadrant.
        const EAST = 1 << 1;
        /// South quadrant.
        const SOUTH = 1 << 2;
        /// West quadrant.
        const WEST = 1 << 3;
    }
}

bitflags! {
    /// A set of tile edges.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EdgeMask: u8 {
        /// The north edge.
        const NORTH = 1 << 0;
        /// The east edge.
        const EAST = 1 << 1;
        /// The south edge.
        const SOUTH = 1 << 2;
        /// The west edge.
        const WEST = 1 << 3;
    }
}

impl EdgeMask {
    /// Builds a mask containing exactly the provided edge.
    #[must_use]
    pub fn from_edge(edge: Edge) -> EdgeMask {
        EdgeMask::from_bits_retain(1 << edge.index())
    }

    /// Reports whether the mask contains the provided edge.
    #[must_use]
    pub fn contains_edge(&self, edge: Edge) -> bool {
        self.contains(EdgeMask::from_edge(edge))
    }
}

bitflags! {
    /// Raised-corner description of a surface tile.
    ///
    /// Corner bit `n` marks the corner shared by edges `n - 1` and `n`
    /// (modulo four) as raised one terrain step. `DOUBLE_HEIGHT` marks a
    /// steep slope whose peak corner sits two terrain steps up.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SurfaceSlope: u8 {
        /// Corner 0 raised.
        const CORNER_0 = 1 << 0;
        /// Corner 1 raised.
        const CORNER_1 = 1 << 1;
        /// Corner 2 raised.
        const CORNER_2 = 1 << 2;
        /// Corner 3 raised.
        const CORNER_3 = 1 << 3;
        /// The diagonal peak corner rises a second terrain step.
        const DOUBLE_HEIGHT = 1 << 4;
    }
}

impl SurfaceSlope {
    /// Reports whether the corner with the provided index is raised.
    #[must_use]
    pub fn corner_raised(&self, corner: u8) -> bool {
        self.bits() & (1 << (corner & 3)) != 0
    }

    /// Number of raised corners on the tile.
    #[must_use]
    pub fn raised_corner_count(&self) -> u32 {
        (self.bits() & 0x0F).count_ones()
    }
}

bitflags! {
    /// Slope description of a wall along one tile edge.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EdgeSlope: u8 {
        /// The wall rises from its anticlockwise end to its clockwise end.
        const UPWARDS = 1 << 0;
        /// The wall falls from its anticlockwise end to its clockwise end.
        const DOWNWARDS = 1 << 1;
        /// The wall base sits one terrain step above the surface base.
        const ELEVATED = 1 << 2;
    }
}

impl EdgeSlope {
    /// Reports whether the wall is inclined in either direction.
    #[must_use]
    pub fn is_inclined(&self) -> bool {
        self.intersects(EdgeSlope::UPWARDS | EdgeSlope::DOWNWARDS)
    }
}

bitflags! {
    /// Behaviour flags of a wall type definition.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WallTypeFlags: u8 {
        /// The wall may not be built on an inclined edge.
        const CANT_BUILD_ON_SLOPE = 1 << 0;
        /// The wall honours the request's tertiary colour.
        const HAS_TERTIARY_COLOUR = 1 << 1;
        /// The wall is a door and may cross track under alignment rules.
        const IS_DOOR = 1 << 2;
    }
}

bitflags! {
    /// Behaviour flags of a small scenery definition.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SmallSceneryFlags: u8 {
        /// Walls may not share a tile with this scenery.
        const NO_WALLS = 1 << 0;
    }
}

bitflags! {
    /// Flags accompanying a placement request.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PlacementFlags: u8 {
        /// Insert a preview element that obstruction scans ignore.
        const GHOST = 1 << 0;
        /// The wall is placed as path scenery and skips ownership and
        /// obstruction checks.
        const PATH_SCENERY = 1 << 1;
        /// The wall is drawn for a track design preview and skips the
        /// editor-context bounds rejection.
        const TRACK_PREVIEW = 1 << 2;
    }
}

bitflags! {
    /// Land rights held on a tile.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct OwnershipFlags: u8 {
        /// Construction rights on the tile belong to the park.
        const OWNED = 1 << 0;
        /// The tile lies inside the park boundary.
        const IN_PARK = 1 << 1;
    }
}

bitflags! {
    /// State flags of a banner.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct BannerFlags: u8 {
        /// The banner belongs to a wall element.
        const IS_WALL = 1 << 0;
        /// The banner displays the name of a linked ride.
        const LINKED_TO_RIDE = 1 << 1;
    }
}

bitflags! {
    /// Behaviour flags of a ride type descriptor.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RideTypeFlags: u8 {
        /// Walls may never stand beside this ride's track.
        const TRACK_NO_WALLS = 1 << 0;
        /// Door walls may cross this ride's track at aligned endpoints.
        const ALLOW_DOORS_ON_TRACK = 1 << 1;
    }
}

bitflags! {
    /// Per-sequence behaviour flags of a track piece.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TrackSequenceFlags: u8 {
        /// Doors may not cross the track at this sequence.
        const DISALLOW_DOORS = 1 << 0;
    }
}

/// Registry entry describing a wall type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallTypeDefinition {
    /// Construction cost charged on placement.
    pub price: Money,
    /// Vertical extent of the wall in element height steps.
    pub height: u8,
    /// Behaviour flags of the wall type.
    pub flags: WallTypeFlags,
    /// Text scrolling behaviour; `Some` walls carry a banner.
    pub scrolling: Option<ScrollingMode>,
}

impl WallTypeDefinition {
    /// Reports whether placing this wall allocates a banner.
    #[must_use]
    pub fn carries_banner(&self) -> bool {
        self.scrolling.is_some()
    }
}

/// Read-only view of a surface tile used to derive wall heights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    /// Base height of the surface in element height steps.
    pub base_height: u8,
    /// Raised-corner description of the tile.
    pub slope: SurfaceSlope,
    /// Water level in world units; zero means the tile is dry.
    pub water_height: i32,
}

impl SurfaceSnapshot {
    /// Base height of the surface in world units.
    #[must_use]
    pub fn base_z(&self) -> i32 {
        i32::from(self.base_height) * COORDS_Z_STEP
    }
}

/// Fields shared by every tile element regardless of kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementHeader {
    /// Lowest occupied height in element height steps.
    pub base_height: u8,
    /// Height up to which the element blocks other placements, in steps.
    pub clearance_height: u8,
    /// Facing direction of the element.
    pub direction: Edge,
    /// Tile quadrants occupied by the element.
    pub quadrants: QuadrantMask,
    /// Marks a preview element that obstruction scans skip.
    pub ghost: bool,
}

impl ElementHeader {
    /// Base height of the element in world units.
    #[must_use]
    pub fn base_z(&self) -> i32 {
        i32::from(self.base_height) * COORDS_Z_STEP
    }
}

/// Kind-specific payload of a surface element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceData {
    /// Raised-corner description of the tile.
    pub slope: SurfaceSlope,
    /// Water level in world units; zero means the tile is dry.
    pub water_height: i32,
}

/// Kind-specific payload of a wall element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallData {
    /// Wall type registry entry the element was built from.
    pub entry: WallTypeId,
    /// Slope the wall follows along its edge.
    pub slope: EdgeSlope,
    /// Paint colours applied to the wall.
    pub colours: WallColours,
    /// Banner attached to the wall, if the wall type scrolls text.
    pub banner: Option<BannerId>,
    /// Marks a door permitted to span a track element.
    pub across_track: bool,
}

/// Kind-specific payload of a footpath element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathData {
    /// Edges on which the path connects to neighbouring tiles.
    pub edges: EdgeMask,
}

/// Kind-specific payload of a track element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackData {
    /// Track piece type of the element.
    pub track_type: TrackTypeId,
    /// Sequence index of this tile within the multi-tile track piece.
    pub sequence: u8,
    /// Ride the track belongs to.
    pub ride: RideId,
}

/// Kind-specific payload of a small scenery element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmallSceneryData {
    /// Scenery registry entry the element was built from.
    pub entry: SceneryEntryId,
}

/// Kind-specific payload of a large scenery element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LargeSceneryData {
    /// Scenery registry entry the element was built from.
    pub entry: SceneryEntryId,
    /// Tile index of this element within the multi-tile scenery piece.
    pub sequence: u8,
}

/// Kind-specific payload of a tile element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementPayload {
    /// Terrain surface of the tile.
    Surface(SurfaceData),
    /// Wall standing on one edge of the tile.
    Wall(WallData),
    /// Footpath crossing the tile.
    Path(PathData),
    /// Ride track crossing the tile.
    Track(TrackData),
    /// Single-tile scenery item.
    SmallScenery(SmallSceneryData),
    /// One tile of a multi-tile scenery piece.
    LargeScenery(LargeSceneryData),
    /// Park or ride entrance.
    Entrance,
}

/// A single element within a tile's element stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileElement {
    /// Fields shared by every element kind.
    pub header: ElementHeader,
    /// Kind-specific payload.
    pub payload: ElementPayload,
}

impl TileElement {
    /// Creates a new tile element from a header and payload.
    #[must_use]
    pub const fn new(header: ElementHeader, payload: ElementPayload) -> Self {
        Self { header, payload }
    }
}

/// A text-carrying decoration attached to a scrolling-capable wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    /// Tile the banner stands on.
    pub position: MapCoords,
    /// Background colour of the banner.
    pub colour: Colour,
    /// Colour of the scrolled text.
    pub text_colour: Colour,
    /// Custom text; empty banners display the linked ride name instead.
    pub text: String,
    /// State flags of the banner.
    pub flags: BannerFlags,
    /// Ride whose name the banner displays, when linked.
    pub ride: Option<RideId>,
}

/// Registry record of a ride.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RideRecord {
    /// Ride type of the ride.
    pub ride_type: RideTypeId,
}

/// Behaviour descriptor shared by all rides of one type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RideTypeDescriptor {
    /// Behaviour flags of the ride type.
    pub flags: RideTypeFlags,
}

/// Geometry and wall-permission descriptor of a track piece type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackEdgeDescriptor {
    /// Per-sequence masks of edges where walls may stand beside the track.
    pub allowed_wall_edges: Vec<EdgeMask>,
    /// Per-sequence behaviour flags.
    pub sequence_flags: Vec<TrackSequenceFlags>,
    /// Bank angle at the start of the piece; zero means unbanked.
    pub bank_start: i8,
    /// Bank angle at the end of the piece; zero means unbanked.
    pub bank_end: i8,
    /// Rotation at the start of the piece. Bit 2 marks a vertical component.
    pub rotation_begin: u8,
    /// Rotation at the end of the piece. Bit 2 marks a vertical component.
    pub rotation_end: u8,
    /// Height of the track at the start of the piece, in world units.
    pub z_begin: i32,
    /// Height of the track at the end of the piece, in world units.
    pub z_end: i32,
    /// Per-sequence height offsets of the piece's tiles, in world units.
    pub block_z: Vec<i32>,
}

impl TrackEdgeDescriptor {
    /// Reports whether a wall may stand on the given relative edge at the
    /// given sequence.
    #[must_use]
    pub fn allows_wall(&self, sequence: u8, relative_edge: Edge) -> bool {
        self.allowed_wall_edges
            .get(usize::from(sequence))
            .is_some_and(|mask| mask.contains_edge(relative_edge))
    }

    /// Behaviour flags of the given sequence.
    #[must_use]
    pub fn sequence_flags(&self, sequence: u8) -> TrackSequenceFlags {
        self.sequence_flags
            .get(usize::from(sequence))
            .copied()
            .unwrap_or_default()
    }

    /// Height offset of the given sequence's tile, in world units.
    #[must_use]
    pub fn block_offset(&self, sequence: u8) -> Option<i32> {
        self.block_z.get(usize::from(sequence)).copied()
    }

    /// Reports whether the given sequence is the final tile of the piece.
    #[must_use]
    pub fn is_last_sequence(&self, sequence: u8) -> bool {
        usize::from(sequence) + 1 == self.block_z.len()
    }
}

/// One tile of a large scenery definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LargeSceneryTile {
    /// Edges, relative to the scenery's facing, where walls are permitted.
    pub allowed_wall_edges: EdgeMask,
}

/// Global editing modes supplied by the environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameModes {
    /// Sandbox cheat: ownership checks are skipped.
    pub sandbox: bool,
    /// The scenario editor is active: ownership checks are skipped.
    pub scenario_editor: bool,
    /// Cheat flag disabling water, ground, and obstruction checks.
    pub clearance_checks_disabled: bool,
}

/// Parameters of a wall placement action.
///
/// The edge is carried as its raw wire index so out-of-range inputs remain
/// representable; validation rejects them with
/// [`PlacementRejection::InvalidEdge`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallPlacementRequest {
    /// Wall type to construct.
    pub wall_type: WallTypeId,
    /// Target tile and height. A height of zero requests terrain detection.
    pub location: MapLocation,
    /// Raw index of the edge to build on.
    pub edge: u8,
    /// Paint colours for the new wall.
    pub colours: WallColours,
}

/// Coarse outcome category of a placement decision.
///
/// This taxonomy is part of the replay contract: peers executing the same
/// request against the same world state must agree on it exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementStatus {
    /// The land is not owned by the park.
    NotOwned,
    /// The request is malformed or names unknown objects.
    InvalidParameters,
    /// A world rule forbids building here.
    Disallowed,
    /// Another element occupies the requested space.
    NoClearance,
    /// The tile element pool is exhausted.
    NoFreeElements,
}

/// The element kind responsible for an obstruction rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum ObstructedBy {
    /// Another wall occupies the edge.
    #[error("wall")]
    Wall,
    /// An entrance occupies the tile.
    #[error("entrance")]
    Entrance,
    /// A footpath opens onto the edge.
    #[error("footpath")]
    Path,
    /// A large scenery piece forbids walls on the edge.
    #[error("large scenery")]
    LargeScenery,
    /// A small scenery piece forbids sharing its tile with walls.
    #[error("small scenery")]
    SmallScenery,
    /// A track element crosses the edge.
    #[error("track")]
    Track,
}

/// Reason a wall placement was rejected.
///
/// Every reason maps onto a [`PlacementStatus`]; the display string is the
/// user-facing detail message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementRejection {
    /// The land is not owned by the park.
    #[error("land not owned by park")]
    NotOwned,
    /// The target tile touches the edge of the map.
    #[error("off edge of map")]
    OffMapEdge,
    /// The target tile lies outside the map entirely.
    #[error("invalid coordinates")]
    OutOfBounds,
    /// The requested edge index is outside `0..=3`.
    #[error("invalid edge")]
    InvalidEdge,
    /// The target tile has no surface element.
    #[error("surface element missing")]
    MissingSurface,
    /// The wall base would sit at or below the water line.
    #[error("can't build this underwater")]
    Underwater,
    /// The wall base would sit below the supporting terrain.
    #[error("can only build this above ground")]
    BelowGround,
    /// The requested wall type is not registered.
    #[error("unknown wall type")]
    UnknownWallType,
    /// The banner pool is at capacity.
    #[error("too many banners in game")]
    BannerLimitReached,
    /// The wall type may not be built on an inclined edge.
    #[error("unable to build this on slope")]
    SlopeNotAllowed,
    /// Another element blocks the placement.
    #[error("{0} in the way")]
    Obstructed(ObstructedBy),
    /// The tile element pool is exhausted.
    #[error("tile element limit reached")]
    TileElementLimit,
}

impl PlacementRejection {
    /// Coarse outcome category of the rejection.
    #[must_use]
    pub fn status(&self) -> PlacementStatus {
        match self {
            PlacementRejection::NotOwned => PlacementStatus::NotOwned,
            PlacementRejection::OffMapEdge
            | PlacementRejection::OutOfBounds
            | PlacementRejection::InvalidEdge
            | PlacementRejection::MissingSurface
            | PlacementRejection::UnknownWallType
            | PlacementRejection::BannerLimitReached => PlacementStatus::InvalidParameters,
            PlacementRejection::Underwater
            | PlacementRejection::BelowGround
            | PlacementRejection::SlopeNotAllowed => PlacementStatus::Disallowed,
            PlacementRejection::Obstructed(_) => PlacementStatus::NoClearance,
            PlacementRejection::TileElementLimit => PlacementStatus::NoFreeElements,
        }
    }
}

/// Successful outcome of a dry-run validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementQuote {
    /// Tile-centre position of the proposed wall, in world units.
    pub position: MapLocation,
    /// Cost that a commit would charge.
    pub cost: Money,
}

/// Successful outcome of a committed placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementReceipt {
    /// Tile-centre position of the placed wall, in world units.
    pub position: MapLocation,
    /// Cost charged for the placement.
    pub cost: Money,
    /// Base height of the placed wall, in world units.
    pub base_z: i32,
    /// Banner allocated for the wall, if the wall type scrolls text.
    pub banner: Option<BannerId>,
    /// Reports whether the wall was placed as a door across track.
    pub across_track: bool,
}

/// Read-only access to world state used while validating a placement.
///
/// Validation must be a pure function of the request and the state observed
/// through this trait; implementations must not mutate on any query.
pub trait WorldQueries {
    /// Reports whether the tile lies within the map bounds.
    fn is_within_bounds(&self, coords: MapCoords) -> bool;

    /// Reports whether the tile touches the outermost ring of the map.
    fn is_at_map_edge(&self, coords: MapCoords) -> bool;

    /// Reports whether construction rights on the tile belong to the park.
    fn is_location_owned(&self, coords: MapCoords) -> bool;

    /// Reports whether the tile lies inside the park boundary.
    fn is_location_in_park(&self, coords: MapCoords) -> bool;

    /// Surface view of the tile, if the tile has a surface element.
    fn surface_at(&self, coords: MapCoords) -> Option<SurfaceSnapshot>;

    /// The tile's element stack, ordered by base height. Out-of-bounds
    /// tiles yield an empty stack.
    fn elements_at(&self, coords: MapCoords) -> &[TileElement];

    /// Resolves a wall type definition from the object registry.
    fn wall_type(&self, id: WallTypeId) -> Option<&WallTypeDefinition>;

    /// Resolves a ride from the ride registry.
    fn ride(&self, id: RideId) -> Option<&RideRecord>;

    /// Resolves the behaviour descriptor of a ride type.
    fn ride_type(&self, id: RideTypeId) -> Option<&RideTypeDescriptor>;

    /// Resolves the geometry descriptor of a track piece type.
    fn track_descriptor(&self, id: TrackTypeId) -> Option<&TrackEdgeDescriptor>;

    /// Behaviour flags of a small scenery definition.
    fn small_scenery_flags(&self, id: SceneryEntryId) -> Option<SmallSceneryFlags>;

    /// One tile of a large scenery definition.
    fn large_scenery_tile(&self, id: SceneryEntryId, sequence: u8) -> Option<&LargeSceneryTile>;

    /// Reports whether the banner pool has no free slot left.
    fn banner_limit_reached(&self) -> bool;

    /// Reports whether the element pool can accept one more element on the
    /// tile, after any reorganisation the world is willing to perform.
    fn can_accommodate_element(&self, coords: MapCoords) -> bool;

    /// The ride closest to the location within banner-linking range.
    fn nearest_ride_within_range(&self, coords: MapCoords) -> Option<RideId>;

    /// Global editing modes currently in effect.
    fn modes(&self) -> GameModes;
}

/// Mutating access to world state used while committing a placement.
pub trait WorldMutations: WorldQueries {
    /// Allocates a banner initialised with wall defaults at the position.
    ///
    /// Returns `None` when the pool is at capacity.
    fn allocate_wall_banner(&mut self, position: MapCoords) -> Option<BannerId>;

    /// Links an allocated banner to a ride.
    fn link_banner_to_ride(&mut self, banner: BannerId, ride: RideId);

    /// Releases a banner slot. Used to roll back a failed commit.
    fn release_banner(&mut self, banner: BannerId);

    /// Inserts an element into the tile's stack, keeping base-height order.
    ///
    /// Returns `false` when the element pool is exhausted even after
    /// reorganisation; the stack is left untouched in that case.
    fn insert_element(&mut self, coords: MapCoords, element: TileElement) -> bool;

    /// Registers the recurring animation of a freshly placed wall.
    fn register_wall_animation(&mut self, location: MapLocation);

    /// Invalidates the vertical column of the tile for redraw.
    fn invalidate_tile_column(&mut self, location: MapLocation, height: i32);
}

#[cfg(test)]
mod tests {
    use super::{
        Edge, EdgeMask, EdgeSlope, MapLocation, ObstructedBy, PlacementRejection,
        PlacementStatus, SurfaceSlope, WallColours, WallPlacementRequest, WallTypeId,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn edge_decoding_rejects_out_of_range_indices() {
        assert_eq!(Edge::from_index(0), Some(Edge::North));
        assert_eq!(Edge::from_index(3), Some(Edge::West));
        assert_eq!(Edge::from_index(4), None);
        assert_eq!(Edge::from_index(5), None);
        assert_eq!(Edge::from_index(255), None);
    }

    #[test]
    fn edge_rotation_wraps_in_both_directions() {
        assert_eq!(Edge::North.rotated(1), Edge::East);
        assert_eq!(Edge::North.rotated(-1), Edge::West);
        assert_eq!(Edge::West.rotated(2), Edge::East);
        assert_eq!(Edge::South.opposite(), Edge::North);
    }

    #[test]
    fn edge_mask_matches_edge_indices() {
        let mask = EdgeMask::NORTH | EdgeMask::SOUTH;
        assert!(mask.contains_edge(Edge::North));
        assert!(mask.contains_edge(Edge::South));
        assert!(!mask.contains_edge(Edge::East));
    }

    #[test]
    fn surface_slope_reports_raised_corners() {
        let slope = SurfaceSlope::CORNER_1 | SurfaceSlope::CORNER_3;
        assert!(slope.corner_raised(1));
        assert!(slope.corner_raised(3));
        assert!(!slope.corner_raised(0));
        assert_eq!(slope.raised_corner_count(), 2);
    }

    #[test]
    fn edge_slope_inclination_ignores_elevation() {
        assert!(EdgeSlope::UPWARDS.is_inclined());
        assert!(EdgeSlope::DOWNWARDS.is_inclined());
        assert!(!EdgeSlope::ELEVATED.is_inclined());
    }

    #[test]
    fn rejection_statuses_follow_the_taxonomy() {
        assert_eq!(
            PlacementRejection::NotOwned.status(),
            PlacementStatus::NotOwned
        );
        assert_eq!(
            PlacementRejection::InvalidEdge.status(),
            PlacementStatus::InvalidParameters
        );
        assert_eq!(
            PlacementRejection::Underwater.status(),
            PlacementStatus::Disallowed
        );
        assert_eq!(
            PlacementRejection::Obstructed(ObstructedBy::Entrance).status(),
            PlacementStatus::NoClearance
        );
        assert_eq!(
            PlacementRejection::TileElementLimit.status(),
            PlacementStatus::NoFreeElements
        );
    }

    #[test]
    fn rejection_messages_are_stable() {
        assert_eq!(
            PlacementRejection::Underwater.to_string(),
            "can't build this underwater"
        );
        assert_eq!(
            PlacementRejection::Obstructed(ObstructedBy::Path).to_string(),
            "footpath in the way"
        );
    }

    #[test]
    fn request_round_trips_through_bincode() {
        let request = WallPlacementRequest {
            wall_type: WallTypeId::new(7),
            location: MapLocation::new(4, 9, 0),
            edge: 2,
            colours: WallColours::default(),
        };
        assert_round_trip(&request);
    }

    #[test]
    fn rejection_round_trips_through_bincode() {
        assert_round_trip(&PlacementRejection::Obstructed(ObstructedBy::Track));
        assert_round_trip(&PlacementStatus::NoClearance);
    }
}
