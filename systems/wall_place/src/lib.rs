#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Two-phase wall placement.
//!
//! [`validate`] is the dry run: it inspects world state through
//! [`WorldQueries`], never mutates, and quotes the cost a commit would
//! charge. [`execute`] re-derives every decision from current state through
//! [`WorldMutations`] and applies the placement, rolling back its banner
//! allocation if the element pool runs out mid-commit. Both phases reject
//! with the same [`PlacementRejection`] taxonomy, so peers replaying the
//! same request against the same world agree on the outcome exactly.

mod height;
mod obstruction;

use log::error;
use parkline_core::{
    Colour, Edge, EdgeSlope, ElementHeader, ElementPayload, GameModes, MapLocation,
    PlacementFlags, PlacementQuote, PlacementReceipt, PlacementRejection, QuadrantMask,
    TileElement, WallData, WallPlacementRequest, WallTypeDefinition, WallTypeFlags, WallTypeId,
    WorldMutations, WorldQueries, TILE_SIZE,
};

/// Vertical extent, in world units, of the redraw column above a placed wall.
const WALL_REDRAW_COLUMN_HEIGHT: i32 = 72;

/// Geometry derived from the request and the target tile's surface.
struct DerivedGeometry {
    edge: Edge,
    target_z: i32,
    slope: EdgeSlope,
}

/// Dry-run phase: decides whether the wall could be placed right now.
///
/// Pure with respect to the world; calling it any number of times leaves
/// the world unchanged and yields the same answer.
pub fn validate<W: WorldQueries>(
    world: &W,
    request: &WallPlacementRequest,
    flags: PlacementFlags,
) -> Result<PlacementQuote, PlacementRejection> {
    let coords = request.location.coords();
    check_ownership(world, request, flags)?;
    let derived = derive_geometry(world, request)?;
    let wall = lookup_wall_type(world, request.wall_type)?;
    if wall.carries_banner() && world.banner_limit_reached() {
        return Err(PlacementRejection::BannerLimitReached);
    }
    let (base, clearance) = height::clearance_range(derived.target_z, derived.slope, wall)?;
    if obstruction_checked(flags, world.modes()) {
        let _across = obstruction::check_obstruction(world, coords, derived.edge, wall, base, clearance)?;
    }
    if !world.can_accommodate_element(coords) {
        return Err(PlacementRejection::TileElementLimit);
    }
    Ok(PlacementQuote {
        position: placement_position(request, derived.target_z),
        cost: wall.price,
    })
}

/// Commit phase: re-derives the decision from current state and applies it.
///
/// Ownership is not rechecked; the committed request already passed it when
/// it was validated, and land rights may legitimately have changed since.
/// Everything else is recomputed so a stale quote cannot corrupt the world.
pub fn execute<W: WorldMutations>(
    world: &mut W,
    request: &WallPlacementRequest,
    flags: PlacementFlags,
) -> Result<PlacementReceipt, PlacementRejection> {
    let coords = request.location.coords();
    let derived = derive_geometry(world, request)?;
    let wall = lookup_wall_type(world, request.wall_type)?.clone();
    let (base, clearance) = height::clearance_range(derived.target_z, derived.slope, &wall)?;
    let mut across_track = false;
    if obstruction_checked(flags, world.modes()) {
        across_track =
            obstruction::check_obstruction(world, coords, derived.edge, &wall, base, clearance)?;
    }

    let banner = if wall.carries_banner() {
        let Some(id) = world.allocate_wall_banner(coords) else {
            error!("no free banners available");
            return Err(PlacementRejection::BannerLimitReached);
        };
        if let Some(ride) = world.nearest_ride_within_range(coords) {
            world.link_banner_to_ride(id, ride);
        }
        Some(id)
    } else {
        None
    };

    let mut colours = request.colours;
    if !wall.flags.contains(WallTypeFlags::HAS_TERTIARY_COLOUR) {
        colours.tertiary = Colour::default();
    }
    let element = TileElement::new(
        ElementHeader {
            base_height: base,
            clearance_height: clearance,
            direction: derived.edge,
            quadrants: QuadrantMask::empty(),
            ghost: flags.contains(PlacementFlags::GHOST),
        },
        ElementPayload::Wall(WallData {
            entry: request.wall_type,
            slope: derived.slope,
            colours,
            banner,
            across_track,
        }),
    );
    if !world.insert_element(coords, element) {
        // The banner must not outlive a failed insert.
        if let Some(id) = banner {
            world.release_banner(id);
        }
        return Err(PlacementRejection::TileElementLimit);
    }

    let placed = request.location.at_height(derived.target_z);
    world.register_wall_animation(placed);
    world.invalidate_tile_column(placed, WALL_REDRAW_COLUMN_HEIGHT);

    Ok(PlacementReceipt {
        position: placement_position(request, derived.target_z),
        cost: wall.price,
        base_z: derived.target_z,
        banner,
        across_track,
    })
}

/// Applies the land-rights rules of the dry-run phase.
///
/// The scenario editor, the sandbox cheat, and path-scenery placement are
/// exempt from land rights but still reject tiles outside the map, unless
/// the request belongs to a track design preview.
fn check_ownership<W: WorldQueries + ?Sized>(
    world: &W,
    request: &WallPlacementRequest,
    flags: PlacementFlags,
) -> Result<(), PlacementRejection> {
    let modes = world.modes();
    let coords = request.location.coords();
    let exempt =
        modes.scenario_editor || modes.sandbox || flags.contains(PlacementFlags::PATH_SCENERY);
    if exempt {
        if !flags.contains(PlacementFlags::TRACK_PREVIEW) && !world.is_within_bounds(coords) {
            error!("invalid coordinates x = {}, y = {}", coords.x(), coords.y());
            return Err(PlacementRejection::OutOfBounds);
        }
        return Ok(());
    }
    if !world.is_within_bounds(coords) {
        return Err(PlacementRejection::NotOwned);
    }
    // Detected-height requests only need the tile inside the park; explicit
    // heights demand construction rights.
    let permitted = if request.location.z() == 0 {
        world.is_location_in_park(coords)
    } else {
        world.is_location_owned(coords)
    };
    if !permitted {
        return Err(PlacementRejection::NotOwned);
    }
    Ok(())
}

/// Resolves edge, base height, and slope, enforcing the terrain rules.
fn derive_geometry<W: WorldQueries + ?Sized>(
    world: &W,
    request: &WallPlacementRequest,
) -> Result<DerivedGeometry, PlacementRejection> {
    let coords = request.location.coords();
    let edge = Edge::from_index(request.edge).ok_or(PlacementRejection::InvalidEdge)?;
    let Some(surface) = world.surface_at(coords) else {
        error!("surface element not found at x = {}, y = {}", coords.x(), coords.y());
        return Err(PlacementRejection::MissingSurface);
    };
    let (target_z, slope) = height::resolve_target(&surface, request.location.z(), edge);
    height::check_surface_constraints(&surface, target_z, world.modes())?;
    if !slope.is_inclined() {
        height::check_corner_support(&surface, edge, target_z)?;
    }
    Ok(DerivedGeometry {
        edge,
        target_z,
        slope,
    })
}

fn lookup_wall_type<W: WorldQueries + ?Sized>(
    world: &W,
    id: WallTypeId,
) -> Result<&WallTypeDefinition, PlacementRejection> {
    match world.wall_type(id) {
        Some(wall) => Ok(wall),
        None => {
            error!("wall type not found: {}", id.get());
            Err(PlacementRejection::UnknownWallType)
        }
    }
}

fn obstruction_checked(flags: PlacementFlags, modes: GameModes) -> bool {
    !flags.contains(PlacementFlags::PATH_SCENERY) && !modes.clearance_checks_disabled
}

/// Tile-centre position reported in quotes and receipts, in world units.
fn placement_position(request: &WallPlacementRequest, target_z: i32) -> MapLocation {
    MapLocation::new(
        request.location.x() * TILE_SIZE + TILE_SIZE / 2,
        request.location.y() * TILE_SIZE + TILE_SIZE / 2,
        target_z,
    )
}
