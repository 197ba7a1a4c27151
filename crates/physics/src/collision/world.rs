//! Collision world containing all static geometry.
//!
//! The collision world stores brushes and answers sphere-sweep and ray
//! queries through them. It is the production implementation of
//! [`SceneQuery`]; tests may substitute their own scenes.

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{contact, Ray};
use parry3d::shape::SharedShape;

use super::flags::ContentFlags;
use super::trace::{SceneQuery, TraceQuery, TraceResult, TraceShape};

/// A piece of collision geometry in the world.
#[derive(Debug, Clone)]
pub struct CollisionBrush {
    /// Unique identifier for this brush. Referenced by query exclusion sets.
    pub id: u32,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position and orientation in world space.
    pub transform: Isometry<Real>,
    /// Content flags (solid, player body, trigger, etc.).
    pub contents: ContentFlags,
}

/// The collision world containing all geometry.
///
/// # Thread Safety
///
/// Immutable while being queried; the traversal engine only ever reads it.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    /// World brushes (floors, walls, obstacles, character bodies).
    brushes: Vec<CollisionBrush>,
    /// Next brush id to assign.
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the world. Returns the brush id.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    /// * `contents` - Content flags for collision filtering
    pub fn add_box(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        contents: ContentFlags,
    ) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        let transform = Isometry::translation(center.x, center.y, center.z);

        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
            contents,
        });

        id
    }

    /// Add an upright capsule (a character body) to the world.
    ///
    /// `base` is the bottom of the capsule; `half_height` covers the
    /// cylindrical section, `radius` the caps.
    pub fn add_capsule(
        &mut self,
        base: Vec3,
        radius: f32,
        half_height: f32,
        contents: ContentFlags,
    ) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        let shape = SharedShape::capsule_y(half_height, radius);
        let center_y = base.y + half_height + radius;
        let transform = Isometry::translation(base.x, center_y, base.z);

        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
            contents,
        });

        id
    }

    /// Remove a brush by id. Returns true if a brush was removed.
    pub fn remove_brush(&mut self, id: u32) -> bool {
        let before = self.brushes.len();
        self.brushes.retain(|b| b.id != id);
        self.brushes.len() != before
    }

    /// Move an existing brush to a new center position.
    pub fn move_brush(&mut self, id: u32, center: Vec3) {
        if let Some(brush) = self.brushes.iter_mut().find(|b| b.id == id) {
            brush.transform = Isometry::translation(center.x, center.y, center.z);
        }
    }

    /// Get the number of collision brushes.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Check if a probe shape at a position overlaps solid geometry.
    pub fn point_in_solid(&self, position: Vec3, query: &TraceQuery) -> bool {
        let test_shape = Self::parry_shape(query.shape);
        let test_transform = Isometry::translation(position.x, position.y, position.z);

        for brush in &self.brushes {
            if !query.mask.intersects(brush.contents) || query.excludes(brush.id) {
                continue;
            }

            if let Ok(Some(_)) = contact(
                &test_transform,
                test_shape.as_ref(),
                &brush.transform,
                brush.shape.as_ref(),
                0.0,
            ) {
                return true;
            }
        }

        false
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    /// Straight-line ray trace against all matching brushes.
    fn cast_ray(&self, query: &TraceQuery) -> TraceResult {
        let delta = query.end - query.start;
        let max_distance = delta.length();
        if max_distance < 0.0001 {
            return TraceResult::no_hit(query.start);
        }
        let dir = delta / max_distance;

        let ray = Ray::new(
            Point::new(query.start.x, query.start.y, query.start.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let mut closest: Option<(f32, Vec3, ContentFlags)> = None;

        for brush in &self.brushes {
            if !query.mask.intersects(brush.contents) || query.excludes(brush.id) {
                continue;
            }

            if let Some(hit) = brush.shape.cast_ray_and_get_normal(
                &brush.transform,
                &ray,
                max_distance,
                true,
            ) {
                let is_closer = closest
                    .as_ref()
                    .map_or(true, |(dist, _, _)| hit.time_of_impact < *dist);

                if is_closer {
                    let normal = Vec3::new(hit.normal.x, hit.normal.y, hit.normal.z);
                    closest = Some((hit.time_of_impact, normal, brush.contents));
                }
            }
        }

        if let Some((distance, normal, contents)) = closest {
            let impact = query.start + dir * distance;
            TraceResult {
                fraction: distance / max_distance,
                end_position: impact,
                impact_point: Some(impact),
                hit_normal: Some(normal),
                hit_contents: contents,
                started_in_solid: false,
            }
        } else {
            TraceResult::no_hit(query.end)
        }
    }

    /// Sphere sweep using binary search over overlap tests.
    fn sweep_sphere(&self, query: &TraceQuery) -> TraceResult {
        let radius = query.shape.radius();

        // A sweep that begins penetrating reports an immediate hit, the way
        // engine sweep queries do.
        if self.point_in_solid(query.start, query) {
            let (hit_normal, hit_contents) = self
                .penetration_contact(query.start, query)
                .unwrap_or((Vec3::Y, ContentFlags::SOLID));
            return TraceResult {
                fraction: 0.0,
                end_position: query.start,
                impact_point: Some(query.start),
                hit_normal: Some(hit_normal),
                hit_contents,
                started_in_solid: true,
            };
        }

        let delta = query.end - query.start;
        let distance = delta.length();
        if distance < 0.0001 {
            return TraceResult::no_hit(query.start);
        }

        // March at sphere-radius granularity to find the first penetrating
        // sample. Features thinner than the probe radius can be stepped
        // over, which is fine for the geometry these probes are aimed at.
        let step = radius.max(0.25);
        let samples = (distance / step).ceil() as u32;

        let mut clear = 0.0_f32;
        let mut entry = None;
        for i in 1..=samples {
            let t = (i as f32 / samples as f32).min(1.0);
            if self.point_in_solid(query.start + delta * t, query) {
                entry = Some(t);
                break;
            }
            clear = t;
        }

        let Some(entry) = entry else {
            return TraceResult::no_hit(query.end);
        };

        // Binary search between the last clear sample and the penetrating one.
        let mut lo = clear;
        let mut hi = entry;

        for _ in 0..12 {
            // 12 iterations gives ~0.025% path precision
            let mid = (lo + hi) * 0.5;
            let test_pos = query.start + (query.end - query.start) * mid;

            if self.point_in_solid(test_pos, query) {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let fraction = lo;
        let end_position = query.start + (query.end - query.start) * fraction;

        // Derive the contact normal and contents from the penetration at `hi`.
        let penetrated = query.start + (query.end - query.start) * hi;
        let (hit_normal, hit_contents) = self
            .penetration_contact(penetrated, query)
            .unwrap_or_else(|| {
                let delta = query.end - query.start;
                (-delta.normalize_or_zero(), ContentFlags::SOLID)
            });

        let impact_point = end_position - hit_normal * radius;

        TraceResult {
            fraction,
            end_position,
            impact_point: Some(impact_point),
            hit_normal: Some(hit_normal),
            hit_contents,
            started_in_solid: false,
        }
    }

    /// Outward normal and contents of the deepest contact at a penetrating
    /// position.
    fn penetration_contact(
        &self,
        position: Vec3,
        query: &TraceQuery,
    ) -> Option<(Vec3, ContentFlags)> {
        let test_shape = Self::parry_shape(query.shape);
        let test_transform = Isometry::translation(position.x, position.y, position.z);

        let mut deepest: Option<(f32, Vec3, ContentFlags)> = None;

        for brush in &self.brushes {
            if !query.mask.intersects(brush.contents) || query.excludes(brush.id) {
                continue;
            }

            if let Ok(Some(c)) = contact(
                &test_transform,
                test_shape.as_ref(),
                &brush.transform,
                brush.shape.as_ref(),
                0.0,
            ) {
                let depth = -c.dist;
                if depth > deepest.as_ref().map_or(0.0, |(d, _, _)| *d) {
                    // normal1 points from the probe toward the brush
                    let normal = Vec3::new(c.normal1.x, c.normal1.y, c.normal1.z);
                    deepest = Some((depth, -normal, brush.contents));
                }
            }
        }

        deepest.map(|(_, normal, contents)| (normal, contents))
    }

    /// Create a parry shape for a probe.
    fn parry_shape(shape: TraceShape) -> SharedShape {
        match shape {
            TraceShape::Sphere { radius } => SharedShape::ball(radius),
            // Tiny ball stands in for a true point in overlap tests.
            TraceShape::Point => SharedShape::ball(0.001),
        }
    }
}

impl SceneQuery for CollisionWorld {
    fn trace(&self, query: &TraceQuery) -> TraceResult {
        match query.shape {
            TraceShape::Point => self.cast_ray(query),
            TraceShape::Sphere { .. } => self.sweep_sphere(query),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();

        // Floor at y=0
        world.add_box(
            Vec3::new(0.0, -10.0, 0.0),
            Vec3::new(1000.0, 10.0, 1000.0),
            ContentFlags::SOLID,
        );

        // Wall at x=100
        world.add_box(
            Vec3::new(100.0, 100.0, 0.0),
            Vec3::new(10.0, 100.0, 200.0),
            ContentFlags::SOLID,
        );

        world
    }

    #[test]
    fn test_ray_hit() {
        let world = create_test_world();

        let query = TraceQuery::ray(
            Vec3::new(0.0, 50.0, 0.0),
            Vec3::new(200.0, 50.0, 0.0),
            ContentFlags::SOLID,
        );
        let result = world.trace(&query);

        assert!(result.hit_something());
        // Wall face is at x=90
        assert!((result.impact_or_end().x - 90.0).abs() < 0.1);
    }

    #[test]
    fn test_ray_miss() {
        let world = create_test_world();

        let query = TraceQuery::ray(
            Vec3::new(0.0, 50.0, 0.0),
            Vec3::new(-200.0, 50.0, 0.0),
            ContentFlags::SOLID,
        );
        let result = world.trace(&query);

        assert!(!result.hit_something());
        assert_eq!(result.fraction, 1.0);
    }

    #[test]
    fn test_sphere_sweep_stops_at_wall() {
        let world = create_test_world();

        let query = TraceQuery::sphere(
            Vec3::new(0.0, 50.0, 0.0),
            Vec3::new(200.0, 50.0, 0.0),
            5.0,
            ContentFlags::SOLID,
        );
        let result = world.trace(&query);

        assert!(result.hit_something());
        // Probe center stops a radius short of the face at x=90
        assert!(result.end_position.x < 90.0);
        assert!(result.end_position.x > 80.0);
        // Impact point is on the wall surface, past the probe center
        let impact = result.impact_or_end();
        assert!(impact.x > result.end_position.x - 0.1);
    }

    #[test]
    fn test_downward_ray_finds_floor() {
        let world = create_test_world();

        let query = TraceQuery::ray(
            Vec3::new(0.0, 100.0, 0.0),
            Vec3::new(0.0, -400.0, 0.0),
            ContentFlags::SOLID,
        );
        let result = world.trace(&query);

        assert!(result.hit_something());
        assert!(result.impact_or_end().y.abs() < 0.1);
        assert!(result.hit_normal.unwrap().y > 0.9);
    }

    #[test]
    fn test_exclusion_skips_brush() {
        let mut world = CollisionWorld::new();
        let near = world.add_box(
            Vec3::new(50.0, 0.0, 0.0),
            Vec3::new(10.0, 50.0, 50.0),
            ContentFlags::SOLID,
        );
        world.add_box(
            Vec3::new(150.0, 0.0, 0.0),
            Vec3::new(10.0, 50.0, 50.0),
            ContentFlags::SOLID,
        );

        let query = TraceQuery::ray(
            Vec3::ZERO,
            Vec3::new(300.0, 0.0, 0.0),
            ContentFlags::SOLID,
        )
        .excluding(&[near]);
        let result = world.trace(&query);

        assert!(result.hit_something());
        // Skipped the near box at x=40, hit the far one at x=140
        assert!((result.impact_or_end().x - 140.0).abs() < 0.1);
    }

    #[test]
    fn test_mask_filtering() {
        let mut world = CollisionWorld::new();
        world.add_box(
            Vec3::new(50.0, 0.0, 0.0),
            Vec3::new(10.0, 50.0, 50.0),
            ContentFlags::TRIGGER,
        );

        let query = TraceQuery::ray(
            Vec3::ZERO,
            Vec3::new(300.0, 0.0, 0.0),
            ContentFlags::SOLID,
        );
        let result = world.trace(&query);

        // Triggers are invisible to solid traces
        assert!(!result.hit_something());
    }

    #[test]
    fn test_sweep_reports_hit_brush_contents() {
        let mut world = CollisionWorld::new();
        world.add_capsule(
            Vec3::new(100.0, 0.0, 0.0),
            42.0,
            54.0,
            ContentFlags::PLAYER_BODY,
        );

        let query = TraceQuery::sphere(
            Vec3::new(0.0, 96.0, 0.0),
            Vec3::new(200.0, 96.0, 0.0),
            5.0,
            ContentFlags::MASK_VAULT,
        );
        let result = world.trace(&query);
        assert!(result.hit_something());
        assert_eq!(result.hit_contents, ContentFlags::PLAYER_BODY);

        // A sweep starting inside the body reports the same contents
        let inside = TraceQuery::sphere(
            Vec3::new(100.0, 96.0, 0.0),
            Vec3::new(300.0, 96.0, 0.0),
            5.0,
            ContentFlags::MASK_VAULT,
        );
        let result = world.trace(&inside);
        assert!(result.started_in_solid);
        assert_eq!(result.hit_contents, ContentFlags::PLAYER_BODY);
    }

    #[test]
    fn test_capsule_body_blocks_and_moves() {
        let mut world = CollisionWorld::new();
        let body = world.add_capsule(
            Vec3::new(100.0, 0.0, 0.0),
            42.0,
            54.0,
            ContentFlags::PLAYER_BODY,
        );

        let query = TraceQuery::ray(
            Vec3::new(0.0, 50.0, 0.0),
            Vec3::new(300.0, 50.0, 0.0),
            ContentFlags::MASK_VAULT,
        );
        assert!(world.trace(&query).hit_something());

        world.move_brush(body, Vec3::new(100.0, 500.0, 0.0));
        assert!(!world.trace(&query).hit_something());

        assert!(world.remove_brush(body));
        assert_eq!(world.brush_count(), 0);
    }
}
