//! Obstacle scanner: horizontal sweeps that find a vaultable wall.

use glam::Vec3;

use crate::collision::{ContentFlags, SceneQuery, TraceQuery, TraceResult};

use super::config::VaultConfig;

/// Scan for a blocking obstacle in front of the character.
///
/// Issues `scan_count` horizontal sphere sweeps from the character's center
/// point, stacked upward by `scan_height_step`, each reaching
/// `scan_distance` along `forward`. Sweeps run in increasing height order
/// and short-circuit on the first hit. Pure detection - no state is touched.
///
/// Obstacles entirely below the center origin (step-over height) or above
/// the top sweep are not vault candidates and report no hit.
pub fn scan_for_obstacle<S: SceneQuery>(
    scene: &S,
    origin: Vec3,
    forward: Vec3,
    exclude: &[u32],
    config: &VaultConfig,
) -> Option<TraceResult> {
    for index in 0..config.scan_count {
        let start = origin + Vec3::new(0.0, index as f32 * config.scan_height_step, 0.0);
        let end = start + forward * config.scan_distance;

        let query = TraceQuery::sphere(start, end, config.probe_radius, ContentFlags::MASK_VAULT)
            .excluding(exclude);
        let result = scene.trace(&query);

        if result.hit_something() {
            log::trace!(
                "obstacle sweep {} hit at {:?} (fraction {:.3})",
                index,
                result.impact_or_end(),
                result.fraction
            );
            return Some(result);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionWorld;

    /// Character center height: capsule half height 96 over feet at y=0.
    const CENTER: Vec3 = Vec3::new(0.0, 96.0, 0.0);

    /// Floor plus a wall whose near face is `distance` ahead, 50 deep.
    fn world_with_wall(distance: f32, height: f32) -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(
            Vec3::new(0.0, -10.0, 0.0),
            Vec3::new(2000.0, 10.0, 2000.0),
            ContentFlags::SOLID,
        );
        world.add_box(
            Vec3::new(distance + 25.0, height / 2.0, 0.0),
            Vec3::new(25.0, height / 2.0, 200.0),
            ContentFlags::SOLID,
        );
        world
    }

    #[test]
    fn test_finds_wall_in_range() {
        let world = world_with_wall(100.0, 120.0);
        let config = VaultConfig::default();

        let hit = scan_for_obstacle(&world, CENTER, Vec3::X, &[], &config);

        let hit = hit.expect("chest-high wall at 100 units should be detected");
        assert!((hit.impact_or_end().x - 100.0).abs() < 2.0);
    }

    #[test]
    fn test_out_of_range_wall_not_found() {
        // Beyond the 180-unit sweep reach
        let world = world_with_wall(200.0, 120.0);
        let config = VaultConfig::default();

        let hit = scan_for_obstacle(&world, CENTER, Vec3::X, &[], &config);
        assert!(hit.is_none());
    }

    #[test]
    fn test_step_over_obstacle_below_sweeps_not_found() {
        // A knee-high block stays under the lowest (center-height) sweep
        let world = world_with_wall(100.0, 40.0);
        let config = VaultConfig::default();

        let hit = scan_for_obstacle(&world, CENTER, Vec3::X, &[], &config);
        assert!(hit.is_none());
    }

    #[test]
    fn test_overhang_above_sweeps_not_found() {
        let mut world = CollisionWorld::new();
        // Underside at y=200: above even the top sweep (96 + 60 + radius)
        world.add_box(
            Vec3::new(125.0, 250.0, 0.0),
            Vec3::new(25.0, 50.0, 200.0),
            ContentFlags::SOLID,
        );
        let config = VaultConfig::default();

        let hit = scan_for_obstacle(&world, CENTER, Vec3::X, &[], &config);
        assert!(hit.is_none());
    }

    #[test]
    fn test_high_ledge_hit_by_top_sweep_only() {
        let mut world = CollisionWorld::new();
        // Slab spanning y 150..250: below the 156-unit top sweep reach but
        // above the two lower sweeps
        world.add_box(
            Vec3::new(125.0, 200.0, 0.0),
            Vec3::new(25.0, 50.0, 200.0),
            ContentFlags::SOLID,
        );
        let config = VaultConfig::default();

        let hit = scan_for_obstacle(&world, CENTER, Vec3::X, &[], &config);
        let hit = hit.expect("top sweep should reach the high ledge");
        // Hit came from the top sweep's height
        assert!(hit.impact_or_end().y > 150.0 - config.probe_radius - 1.0);
    }

    #[test]
    fn test_own_body_excluded() {
        let mut world = CollisionWorld::new();
        let body = world.add_capsule(
            Vec3::new(0.0, 0.0, 0.0),
            42.0,
            54.0,
            ContentFlags::PLAYER_BODY,
        );
        let config = VaultConfig::default();

        // Without exclusion the scan starts inside our own capsule
        let hit = scan_for_obstacle(&world, CENTER, Vec3::X, &[], &config);
        assert!(hit.is_some());

        let hit = scan_for_obstacle(&world, CENTER, Vec3::X, &[body], &config);
        assert!(hit.is_none());
    }
}
