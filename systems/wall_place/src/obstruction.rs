//! Obstruction scan over a tile's element stack.

use parkline_core::{
    Edge, ElementHeader, ObstructedBy, PlacementRejection, RideTypeFlags, TrackData,
    TrackSequenceFlags, WallTypeDefinition, WallTypeFlags, WorldQueries, COORDS_Z_STEP,
    ElementPayload, MapCoords, SmallSceneryFlags,
};

/// Scans the tile stack for elements blocking a wall on the given edge.
///
/// `base` and `clearance` bound the wall's vertical extent in element steps.
/// Yields whether the wall crosses a track as a door; every other permitted
/// overlap yields `false`.
pub(crate) fn check_obstruction<W: WorldQueries + ?Sized>(
    world: &W,
    coords: MapCoords,
    edge: Edge,
    wall: &WallTypeDefinition,
    base: u8,
    clearance: u8,
) -> Result<bool, PlacementRejection> {
    if world.is_at_map_edge(coords) {
        return Err(PlacementRejection::OffMapEdge);
    }

    let mut across_track = false;
    for element in world.elements_at(coords) {
        let header = &element.header;
        if header.ghost {
            continue;
        }
        if base >= header.clearance_height || clearance <= header.base_height {
            continue;
        }
        let blocking = match &element.payload {
            ElementPayload::Surface(_) => None,
            ElementPayload::Wall(_) => {
                (header.direction == edge).then_some(ObstructedBy::Wall)
            }
            // Elements without a footprint never block walls.
            _ if header.quadrants.is_empty() => None,
            ElementPayload::Entrance => Some(ObstructedBy::Entrance),
            ElementPayload::Path(path) => {
                path.edges.contains_edge(edge).then_some(ObstructedBy::Path)
            }
            ElementPayload::LargeScenery(scenery) => {
                match world.large_scenery_tile(scenery.entry, scenery.sequence) {
                    None => None,
                    Some(tile) => {
                        let relative = edge.rotated(-i32::from(header.direction.index()));
                        (!tile.allowed_wall_edges.contains_edge(relative))
                            .then_some(ObstructedBy::LargeScenery)
                    }
                }
            }
            ElementPayload::SmallScenery(scenery) => world
                .small_scenery_flags(scenery.entry)
                .is_some_and(|flags| flags.contains(SmallSceneryFlags::NO_WALLS))
                .then_some(ObstructedBy::SmallScenery),
            ElementPayload::Track(track) => {
                (!track_permits_wall(world, edge, wall, base, header, track, &mut across_track))
                    .then_some(ObstructedBy::Track)
            }
        };
        if let Some(kind) = blocking {
            return Err(PlacementRejection::Obstructed(kind));
        }
    }
    Ok(across_track)
}

/// Decides whether a wall may coexist with an overlapping track element.
///
/// Ordinary walls consult the track piece's per-sequence edge permissions.
/// Doors may additionally cross the track itself when they stand at a piece
/// boundary: an unbanked, non-vertical entry or exit whose height and facing
/// line up exactly with the door.
fn track_permits_wall<W: WorldQueries + ?Sized>(
    world: &W,
    edge: Edge,
    wall: &WallTypeDefinition,
    base: u8,
    header: &ElementHeader,
    track: &TrackData,
    across_track: &mut bool,
) -> bool {
    let Some(descriptor) = world.track_descriptor(track.track_type) else {
        return false;
    };
    let Some(ride) = world.ride(track.ride) else {
        return false;
    };
    let Some(ride_type) = world.ride_type(ride.ride_type) else {
        return false;
    };

    let relative = edge.rotated(-i32::from(header.direction.index()));
    if !ride_type.flags.contains(RideTypeFlags::TRACK_NO_WALLS)
        && descriptor.allows_wall(track.sequence, relative)
    {
        return true;
    }

    if !wall.flags.contains(WallTypeFlags::IS_DOOR) {
        return false;
    }
    if !ride_type.flags.contains(RideTypeFlags::ALLOW_DOORS_ON_TRACK) {
        return false;
    }

    *across_track = true;
    // Track endpoints only ever sit at even element steps.
    if base % 2 == 1 {
        return false;
    }
    let target_z = i32::from(base) * COORDS_Z_STEP;

    if track.sequence == 0
        && !descriptor
            .sequence_flags(0)
            .contains(TrackSequenceFlags::DISALLOW_DOORS)
        && descriptor.bank_start == 0
        && descriptor.rotation_begin & 4 == 0
        && header.direction.opposite() == edge
    {
        if let Some(offset) = descriptor.block_offset(0) {
            if header.base_z() + (descriptor.z_begin - offset) == target_z {
                return true;
            }
        }
    }

    if !descriptor.is_last_sequence(track.sequence) {
        return false;
    }
    if descriptor.bank_end != 0 || descriptor.rotation_end & 4 != 0 {
        return false;
    }
    if header.direction.rotated(i32::from(descriptor.rotation_end)) != edge {
        return false;
    }
    match descriptor.block_offset(track.sequence) {
        Some(offset) => header.base_z() + (descriptor.z_end - offset) == target_z,
        None => false,
    }
}
