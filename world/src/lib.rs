#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the Parkline world editor.
//!
//! The world owns the tile element stacks, the fixed-capacity element and
//! banner pools, the object and ride registries, and the per-tile ownership
//! flags. It exposes that state to placement systems exclusively through the
//! [`WorldQueries`] and [`WorldMutations`] traits from `parkline-core`, so
//! systems stay pure and testable against mock handles. The game action
//! layer serialises mutations; nothing in here locks.

mod banners;
mod registry;

use parkline_core::{
    Banner, BannerFlags, BannerId, Colour, Edge, ElementHeader, ElementPayload, GameModes,
    LargeSceneryTile, MapCoords, MapLocation, OwnershipFlags, QuadrantMask, RideRecord,
    RideTypeDescriptor, RideTypeId, RideId, SceneryEntryId, SmallSceneryFlags, SurfaceData,
    SurfaceSlope, SurfaceSnapshot, TileElement, TrackEdgeDescriptor, TrackTypeId,
    WallTypeDefinition, WallTypeId, WorldMutations, WorldQueries,
};

use crate::banners::BannerPool;
use crate::registry::{ObjectRegistry, RideRegistry};

const DEFAULT_MAP_COLUMNS: i32 = 16;
const DEFAULT_MAP_ROWS: i32 = 16;
const DEFAULT_SURFACE_HEIGHT: u8 = 4;
const DEFAULT_ELEMENT_CAPACITY: usize = 4096;
const DEFAULT_BANNER_CAPACITY: usize = 250;

/// Manhattan distance, in tiles, within which a banner links to a ride.
const BANNER_RIDE_LINK_RANGE: i32 = 4;

/// Dimensions of the map measured in whole tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapSize {
    columns: i32,
    rows: i32,
}

impl MapSize {
    /// Creates a new map size descriptor.
    #[must_use]
    pub const fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows }
    }

    /// Number of tile columns on the map.
    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.columns
    }

    /// Number of tile rows on the map.
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }
}

/// A recorded redraw request for the vertical column of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileInvalidation {
    /// Tile and base height of the invalidated column, in world units.
    pub location: MapLocation,
    /// Vertical extent of the invalidated column, in world units.
    pub height: i32,
}

/// Represents the authoritative Parkline world state.
#[derive(Debug)]
pub struct World {
    size: MapSize,
    tiles: Vec<Vec<TileElement>>,
    ownership: Vec<OwnershipFlags>,
    element_capacity: usize,
    element_count: usize,
    banners: BannerPool,
    objects: ObjectRegistry,
    rides: RideRegistry,
    modes: GameModes,
    animations: Vec<MapLocation>,
    invalidations: Vec<TileInvalidation>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates a flat, unowned world with default dimensions and pools.
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(
            MapSize::new(DEFAULT_MAP_COLUMNS, DEFAULT_MAP_ROWS),
            DEFAULT_ELEMENT_CAPACITY,
            DEFAULT_BANNER_CAPACITY,
        )
    }

    /// Creates a flat, unowned world with explicit pool capacities.
    ///
    /// Every tile starts with one surface element, so an `element_capacity`
    /// at the tile count leaves no room for any further element.
    #[must_use]
    pub fn with_limits(size: MapSize, element_capacity: usize, banner_capacity: usize) -> Self {
        let tile_count = (size.columns() * size.rows()).max(0) as usize;
        let surface = TileElement::new(
            ElementHeader {
                base_height: DEFAULT_SURFACE_HEIGHT,
                clearance_height: DEFAULT_SURFACE_HEIGHT,
                direction: Edge::North,
                quadrants: QuadrantMask::all(),
                ghost: false,
            },
            ElementPayload::Surface(SurfaceData {
                slope: SurfaceSlope::empty(),
                water_height: 0,
            }),
        );
        Self {
            size,
            tiles: vec![vec![surface]; tile_count],
            ownership: vec![OwnershipFlags::empty(); tile_count],
            element_capacity,
            element_count: tile_count,
            banners: BannerPool::new(banner_capacity),
            objects: ObjectRegistry::default(),
            rides: RideRegistry::default(),
            modes: GameModes::default(),
            animations: Vec::new(),
            invalidations: Vec::new(),
        }
    }

    /// Replaces the global editing modes.
    pub fn set_modes(&mut self, modes: GameModes) {
        self.modes = modes;
    }

    /// Replaces the land rights held on a tile.
    pub fn set_ownership(&mut self, coords: MapCoords, flags: OwnershipFlags) {
        if let Some(index) = self.tile_index(coords) {
            self.ownership[index] = flags;
        }
    }

    /// Reshapes the surface element of a tile.
    pub fn set_surface(
        &mut self,
        coords: MapCoords,
        base_height: u8,
        slope: SurfaceSlope,
        water_height: i32,
    ) {
        let Some(index) = self.tile_index(coords) else {
            return;
        };
        for element in &mut self.tiles[index] {
            if let ElementPayload::Surface(data) = &mut element.payload {
                element.header.base_height = base_height;
                element.header.clearance_height = base_height;
                data.slope = slope;
                data.water_height = water_height;
                return;
            }
        }
    }

    /// Registers a wall type definition, yielding its identifier.
    pub fn register_wall_type(&mut self, definition: WallTypeDefinition) -> WallTypeId {
        self.objects.register_wall_type(definition)
    }

    /// Registers a small scenery definition, yielding its identifier.
    pub fn register_small_scenery(&mut self, flags: SmallSceneryFlags) -> SceneryEntryId {
        self.objects.register_small_scenery(flags)
    }

    /// Registers a large scenery definition, yielding its identifier.
    pub fn register_large_scenery(&mut self, tiles: Vec<LargeSceneryTile>) -> SceneryEntryId {
        self.objects.register_large_scenery(tiles)
    }

    /// Registers a ride type descriptor, yielding its identifier.
    pub fn register_ride_type(&mut self, descriptor: RideTypeDescriptor) -> RideTypeId {
        self.rides.register_ride_type(descriptor)
    }

    /// Registers a track piece descriptor, yielding its identifier.
    pub fn register_track_type(&mut self, descriptor: TrackEdgeDescriptor) -> TrackTypeId {
        self.rides.register_track_type(descriptor)
    }

    /// Opens a ride anchored at the provided tile, yielding its identifier.
    pub fn add_ride(&mut self, ride_type: RideTypeId, location: MapCoords) -> RideId {
        self.rides.add_ride(ride_type, location)
    }

    fn tile_index(&self, coords: MapCoords) -> Option<usize> {
        if !self.is_within_bounds(coords) {
            return None;
        }
        let column = coords.x() as usize;
        let row = coords.y() as usize;
        Some(row * self.size.columns() as usize + column)
    }

    /// Compaction hook run before giving up on a full element pool.
    ///
    /// Nothing is reclaimable yet; reports whether a free slot exists.
    fn reorganise(&mut self) -> bool {
        self.element_count < self.element_capacity
    }
}

impl WorldQueries for World {
    fn is_within_bounds(&self, coords: MapCoords) -> bool {
        coords.x() >= 0
            && coords.y() >= 0
            && coords.x() < self.size.columns()
            && coords.y() < self.size.rows()
    }

    fn is_at_map_edge(&self, coords: MapCoords) -> bool {
        coords.x() <= 0
            || coords.y() <= 0
            || coords.x() >= self.size.columns() - 1
            || coords.y() >= self.size.rows() - 1
    }

    fn is_location_owned(&self, coords: MapCoords) -> bool {
        self.tile_index(coords).map_or(false, |index| {
            self.ownership[index].contains(OwnershipFlags::OWNED)
        })
    }

    fn is_location_in_park(&self, coords: MapCoords) -> bool {
        self.tile_index(coords).map_or(false, |index| {
            self.ownership[index].contains(OwnershipFlags::IN_PARK)
        })
    }

    fn surface_at(&self, coords: MapCoords) -> Option<SurfaceSnapshot> {
        self.elements_at(coords).iter().find_map(|element| {
            if let ElementPayload::Surface(data) = &element.payload {
                Some(SurfaceSnapshot {
                    base_height: element.header.base_height,
                    slope: data.slope,
                    water_height: data.water_height,
                })
            } else {
                None
            }
        })
    }

    fn elements_at(&self, coords: MapCoords) -> &[TileElement] {
        const EMPTY: &[TileElement] = &[];
        self.tile_index(coords)
            .map_or(EMPTY, |index| &self.tiles[index])
    }

    fn wall_type(&self, id: WallTypeId) -> Option<&WallTypeDefinition> {
        self.objects.wall_type(id)
    }

    fn ride(&self, id: RideId) -> Option<&RideRecord> {
        self.rides.ride(id)
    }

    fn ride_type(&self, id: RideTypeId) -> Option<&RideTypeDescriptor> {
        self.rides.ride_type(id)
    }

    fn track_descriptor(&self, id: TrackTypeId) -> Option<&TrackEdgeDescriptor> {
        self.rides.track_descriptor(id)
    }

    fn small_scenery_flags(&self, id: SceneryEntryId) -> Option<SmallSceneryFlags> {
        self.objects.small_scenery_flags(id)
    }

    fn large_scenery_tile(&self, id: SceneryEntryId, sequence: u8) -> Option<&LargeSceneryTile> {
        self.objects.large_scenery_tile(id, sequence)
    }

    fn banner_limit_reached(&self) -> bool {
        self.banners.is_full()
    }

    fn can_accommodate_element(&self, coords: MapCoords) -> bool {
        self.is_within_bounds(coords) && self.element_count < self.element_capacity
    }

    fn nearest_ride_within_range(&self, coords: MapCoords) -> Option<RideId> {
        self.rides.nearest_within(coords, BANNER_RIDE_LINK_RANGE)
    }

    fn modes(&self) -> GameModes {
        self.modes
    }
}

impl WorldMutations for World {
    fn allocate_wall_banner(&mut self, position: MapCoords) -> Option<BannerId> {
        self.banners.allocate(Banner {
            position,
            colour: Colour::WHITE,
            text_colour: Colour::WHITE,
            text: String::new(),
            flags: BannerFlags::IS_WALL,
            ride: None,
        })
    }

    fn link_banner_to_ride(&mut self, banner: BannerId, ride: RideId) {
        if let Some(banner) = self.banners.get_mut(banner) {
            banner.ride = Some(ride);
            banner.flags |= BannerFlags::LINKED_TO_RIDE;
        }
    }

    fn release_banner(&mut self, banner: BannerId) {
        self.banners.release(banner);
    }

    fn insert_element(&mut self, coords: MapCoords, element: TileElement) -> bool {
        let Some(index) = self.tile_index(coords) else {
            return false;
        };
        if self.element_count >= self.element_capacity && !self.reorganise() {
            return false;
        }
        let stack = &mut self.tiles[index];
        let position =
            stack.partition_point(|other| other.header.base_height <= element.header.base_height);
        stack.insert(position, element);
        self.element_count += 1;
        true
    }

    fn register_wall_animation(&mut self, location: MapLocation) {
        self.animations.push(location);
    }

    fn invalidate_tile_column(&mut self, location: MapLocation, height: i32) {
        self.invalidations.push(TileInvalidation { location, height });
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{TileInvalidation, World};
    use parkline_core::{
        Banner, BannerId, Edge, ElementPayload, MapCoords, MapLocation, TileElement,
        WorldQueries,
    };

    /// Total number of elements currently stored across all tiles.
    #[must_use]
    pub fn element_count(world: &World) -> usize {
        world.element_count
    }

    /// The wall element standing on the given edge of a tile, if any.
    #[must_use]
    pub fn wall_at(world: &World, coords: MapCoords, edge: Edge) -> Option<&TileElement> {
        world.elements_at(coords).iter().find(|element| {
            matches!(element.payload, ElementPayload::Wall(_)) && element.header.direction == edge
        })
    }

    /// Borrows the banner named by the identifier, if allocated.
    #[must_use]
    pub fn banner(world: &World, id: BannerId) -> Option<&Banner> {
        world.banners.get(id)
    }

    /// Number of banners currently allocated in the pool.
    #[must_use]
    pub fn banner_count(world: &World) -> usize {
        world.banners.allocated()
    }

    /// Animations registered since the world was created.
    #[must_use]
    pub fn pending_animations(world: &World) -> &[MapLocation] {
        &world.animations
    }

    /// Redraw invalidations recorded since the world was created.
    #[must_use]
    pub fn pending_invalidations(world: &World) -> &[TileInvalidation] {
        &world.invalidations
    }
}
