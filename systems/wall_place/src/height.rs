//! Height and slope derivation for walls standing on terrain.

use parkline_core::{
    Edge, EdgeSlope, GameModes, PlacementRejection, SurfaceSlope, SurfaceSnapshot,
    WallTypeDefinition, WallTypeFlags, COORDS_Z_STEP, LAND_HEIGHT_STEP,
};

/// Slope a wall must follow when standing on the given edge of a surface.
///
/// An edge runs between the corner sharing its index and the next corner
/// clockwise. One raised corner inclines the wall toward that corner; both
/// raised elevates the whole wall a terrain step. On a steep three-corner
/// tile the edges touching the peak corner are elevated and inclined again.
pub(crate) fn wall_slope_for(slope: SurfaceSlope, edge: Edge) -> EdgeSlope {
    let anticlockwise = slope.corner_raised(edge.index());
    let clockwise = slope.corner_raised(edge.rotated(1).index());
    match (anticlockwise, clockwise) {
        (false, false) => EdgeSlope::empty(),
        (true, false) => EdgeSlope::UPWARDS,
        (false, true) => EdgeSlope::DOWNWARDS,
        (true, true) => {
            if slope.contains(SurfaceSlope::DOUBLE_HEIGHT) && slope.raised_corner_count() == 3 {
                // The peak corner of a steep tile is diagonal to the one
                // corner left unraised.
                if !slope.corner_raised(edge.rotated(2).index()) {
                    EdgeSlope::ELEVATED | EdgeSlope::UPWARDS
                } else {
                    EdgeSlope::ELEVATED | EdgeSlope::DOWNWARDS
                }
            } else {
                EdgeSlope::ELEVATED
            }
        }
    }
}

/// Resolves the wall's base height and slope from the request height.
///
/// A requested height of zero asks for terrain detection: the wall sits on
/// the surface and follows its slope, with an elevated edge trading its
/// elevation flag for one terrain step of extra height. Any other request
/// height places a flat wall exactly there.
pub(crate) fn resolve_target(
    surface: &SurfaceSnapshot,
    requested_z: i32,
    edge: Edge,
) -> (i32, EdgeSlope) {
    if requested_z != 0 {
        return (requested_z, EdgeSlope::empty());
    }
    let mut slope = wall_slope_for(surface.slope, edge);
    let mut target_z = surface.base_z();
    if slope.contains(EdgeSlope::ELEVATED) {
        target_z += LAND_HEIGHT_STEP;
        slope.remove(EdgeSlope::ELEVATED);
    }
    (target_z, slope)
}

/// Rejects walls that would start at or below water, or below the terrain.
pub(crate) fn check_surface_constraints(
    surface: &SurfaceSnapshot,
    target_z: i32,
    modes: GameModes,
) -> Result<(), PlacementRejection> {
    if modes.clearance_checks_disabled {
        return Ok(());
    }
    if surface.water_height > 0 && target_z <= surface.water_height {
        return Err(PlacementRejection::Underwater);
    }
    if target_z < surface.base_z() {
        return Err(PlacementRejection::BelowGround);
    }
    Ok(())
}

/// Rejects flat walls that lack terrain support at a raised far corner.
///
/// A flat wall built against a slope must clear the corners on the far side
/// of its edge: each raised far corner demands one terrain step above the
/// surface base, and the peak corner of a steep tile demands two.
pub(crate) fn check_corner_support(
    surface: &SurfaceSnapshot,
    edge: Edge,
    target_z: i32,
) -> Result<(), PlacementRejection> {
    let target_steps = target_z / COORDS_Z_STEP;
    let slope = surface.slope;
    let mut required = i32::from(surface.base_height) + 2;

    let far = edge.rotated(2);
    if slope.corner_raised(far.index()) {
        if target_steps < required {
            return Err(PlacementRejection::BelowGround);
        }
        if slope.contains(SurfaceSlope::DOUBLE_HEIGHT) {
            let neighbour = far.rotated(-1);
            if slope.corner_raised(neighbour.index())
                && slope.corner_raised(neighbour.opposite().index())
                && target_steps < required + 2
            {
                return Err(PlacementRejection::BelowGround);
            }
        }
    }

    let far = edge.rotated(3);
    if slope.corner_raised(far.index()) {
        if target_steps < required {
            return Err(PlacementRejection::BelowGround);
        }
        if slope.contains(SurfaceSlope::DOUBLE_HEIGHT) {
            let neighbour = far.rotated(-1);
            if slope.corner_raised(neighbour.index())
                && slope.corner_raised(neighbour.opposite().index())
            {
                required += 2;
                if target_steps < required {
                    return Err(PlacementRejection::BelowGround);
                }
            }
        }
    }
    Ok(())
}

/// Derives the element base and clearance heights, in element steps.
///
/// Inclined walls claim two extra steps of clearance; wall types that may
/// not stand on a slope reject here instead.
pub(crate) fn clearance_range(
    target_z: i32,
    slope: EdgeSlope,
    wall: &WallTypeDefinition,
) -> Result<(u8, u8), PlacementRejection> {
    let base_steps = target_z / COORDS_Z_STEP;
    let mut clearance_steps = base_steps;
    if slope.is_inclined() {
        if wall.flags.contains(WallTypeFlags::CANT_BUILD_ON_SLOPE) {
            return Err(PlacementRejection::SlopeNotAllowed);
        }
        clearance_steps += 2;
    }
    clearance_steps += i32::from(wall.height);
    let base = base_steps.clamp(0, i32::from(u8::MAX)) as u8;
    let clearance = clearance_steps.clamp(0, i32::from(u8::MAX)) as u8;
    Ok((base, clearance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkline_core::Money;

    fn flat_surface(base_height: u8) -> SurfaceSnapshot {
        SurfaceSnapshot {
            base_height,
            slope: SurfaceSlope::empty(),
            water_height: 0,
        }
    }

    fn plain_wall() -> WallTypeDefinition {
        WallTypeDefinition {
            price: Money::new(15),
            height: 4,
            flags: WallTypeFlags::empty(),
            scrolling: None,
        }
    }

    #[test]
    fn flat_surface_yields_flat_walls_on_every_edge() {
        for index in 0..4 {
            let edge = Edge::from_index(index).expect("edge");
            assert_eq!(wall_slope_for(SurfaceSlope::empty(), edge), EdgeSlope::empty());
        }
    }

    #[test]
    fn single_raised_corner_inclines_the_adjacent_edges() {
        let slope = SurfaceSlope::CORNER_1;
        assert_eq!(wall_slope_for(slope, Edge::East), EdgeSlope::UPWARDS);
        assert_eq!(wall_slope_for(slope, Edge::North), EdgeSlope::DOWNWARDS);
        assert_eq!(wall_slope_for(slope, Edge::South), EdgeSlope::empty());
        assert_eq!(wall_slope_for(slope, Edge::West), EdgeSlope::empty());
    }

    #[test]
    fn two_raised_corners_elevate_the_edge_between_them() {
        let slope = SurfaceSlope::CORNER_2 | SurfaceSlope::CORNER_3;
        assert_eq!(wall_slope_for(slope, Edge::South), EdgeSlope::ELEVATED);
        assert_eq!(wall_slope_for(slope, Edge::East), EdgeSlope::DOWNWARDS);
        assert_eq!(wall_slope_for(slope, Edge::West), EdgeSlope::UPWARDS);
        assert_eq!(wall_slope_for(slope, Edge::North), EdgeSlope::empty());
    }

    #[test]
    fn steep_slope_inclines_the_edges_touching_the_peak() {
        // Corners 0, 1, and 2 raised with corner 1 as the two-step peak.
        let slope = SurfaceSlope::CORNER_0
            | SurfaceSlope::CORNER_1
            | SurfaceSlope::CORNER_2
            | SurfaceSlope::DOUBLE_HEIGHT;
        assert_eq!(
            wall_slope_for(slope, Edge::East),
            EdgeSlope::ELEVATED | EdgeSlope::UPWARDS
        );
        assert_eq!(
            wall_slope_for(slope, Edge::North),
            EdgeSlope::ELEVATED | EdgeSlope::DOWNWARDS
        );
        assert_eq!(wall_slope_for(slope, Edge::South), EdgeSlope::UPWARDS);
        assert_eq!(wall_slope_for(slope, Edge::West), EdgeSlope::DOWNWARDS);
    }

    #[test]
    fn terrain_detection_trades_elevation_for_height() {
        let surface = SurfaceSnapshot {
            base_height: 4,
            slope: SurfaceSlope::CORNER_2 | SurfaceSlope::CORNER_3,
            water_height: 0,
        };
        let (target_z, slope) = resolve_target(&surface, 0, Edge::South);
        assert_eq!(target_z, surface.base_z() + LAND_HEIGHT_STEP);
        assert_eq!(slope, EdgeSlope::empty());
    }

    #[test]
    fn explicit_heights_ignore_the_surface_slope() {
        let surface = SurfaceSnapshot {
            base_height: 4,
            slope: SurfaceSlope::CORNER_0,
            water_height: 0,
        };
        let (target_z, slope) = resolve_target(&surface, 80, Edge::North);
        assert_eq!(target_z, 80);
        assert_eq!(slope, EdgeSlope::empty());
    }

    #[test]
    fn wall_at_the_water_line_is_rejected() {
        let surface = SurfaceSnapshot {
            water_height: 48,
            ..flat_surface(4)
        };
        assert_eq!(
            check_surface_constraints(&surface, 48, GameModes::default()),
            Err(PlacementRejection::Underwater)
        );
        assert_eq!(check_surface_constraints(&surface, 56, GameModes::default()), Ok(()));
    }

    #[test]
    fn disabled_clearance_checks_allow_underwater_building() {
        let surface = SurfaceSnapshot {
            water_height: 48,
            ..flat_surface(4)
        };
        let modes = GameModes {
            clearance_checks_disabled: true,
            ..GameModes::default()
        };
        assert_eq!(check_surface_constraints(&surface, 32, modes), Ok(()));
    }

    #[test]
    fn wall_below_the_terrain_is_rejected() {
        let surface = flat_surface(6);
        assert_eq!(
            check_surface_constraints(&surface, 40, GameModes::default()),
            Err(PlacementRejection::BelowGround)
        );
        assert_eq!(check_surface_constraints(&surface, 48, GameModes::default()), Ok(()));
    }

    #[test]
    fn raised_far_corner_demands_a_terrain_step_of_support() {
        let surface = SurfaceSnapshot {
            base_height: 4,
            slope: SurfaceSlope::CORNER_2,
            water_height: 0,
        };
        // Corner 2 sits on the far side of the north edge.
        assert_eq!(
            check_corner_support(&surface, Edge::North, surface.base_z()),
            Err(PlacementRejection::BelowGround)
        );
        assert_eq!(
            check_corner_support(&surface, Edge::North, surface.base_z() + LAND_HEIGHT_STEP),
            Ok(())
        );
    }

    #[test]
    fn steep_peak_behind_the_edge_demands_two_terrain_steps() {
        // Corners 1, 2, and 3 raised; corner 2 is the peak, behind north.
        let surface = SurfaceSnapshot {
            base_height: 4,
            slope: SurfaceSlope::CORNER_1
                | SurfaceSlope::CORNER_2
                | SurfaceSlope::CORNER_3
                | SurfaceSlope::DOUBLE_HEIGHT,
            water_height: 0,
        };
        assert_eq!(
            check_corner_support(&surface, Edge::North, surface.base_z() + LAND_HEIGHT_STEP),
            Err(PlacementRejection::BelowGround)
        );
        assert_eq!(
            check_corner_support(
                &surface,
                Edge::North,
                surface.base_z() + 2 * LAND_HEIGHT_STEP
            ),
            Ok(())
        );
    }

    #[test]
    fn corners_beside_the_edge_do_not_demand_support() {
        let surface = SurfaceSnapshot {
            base_height: 4,
            slope: SurfaceSlope::CORNER_0 | SurfaceSlope::CORNER_1,
            water_height: 0,
        };
        // Corners 0 and 1 touch the north edge itself, not its far side.
        assert_eq!(check_corner_support(&surface, Edge::North, surface.base_z()), Ok(()));
    }

    #[test]
    fn inclined_walls_claim_two_extra_clearance_steps() {
        let wall = plain_wall();
        assert_eq!(clearance_range(32, EdgeSlope::empty(), &wall), Ok((4, 8)));
        assert_eq!(clearance_range(32, EdgeSlope::UPWARDS, &wall), Ok((4, 10)));
    }

    #[test]
    fn slope_intolerant_walls_reject_inclined_edges() {
        let wall = WallTypeDefinition {
            flags: WallTypeFlags::CANT_BUILD_ON_SLOPE,
            ..plain_wall()
        };
        assert_eq!(
            clearance_range(32, EdgeSlope::DOWNWARDS, &wall),
            Err(PlacementRejection::SlopeNotAllowed)
        );
        assert_eq!(clearance_range(32, EdgeSlope::empty(), &wall), Ok((4, 8)));
    }
}
