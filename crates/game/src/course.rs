//! Traversal courses: collision geometry plus a spawn point.

use glam::Vec3;
use parapet_physics::{CollisionWorld, ContentFlags};
use serde::{Deserialize, Serialize};

/// Where a character enters the course.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Feet position in world space.
    pub position: Vec3,

    /// Initial facing yaw in radians.
    pub facing: f32,
}

/// A course the character runs through.
#[derive(Debug)]
pub struct Course {
    /// Course identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world for traversal queries.
    pub collision: CollisionWorld,

    /// Character spawn point.
    pub spawn: SpawnPoint,
}

impl Course {
    /// Create an empty course spawning at the origin.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn: SpawnPoint {
                position: Vec3::ZERO,
                facing: 0.0,
            },
        }
    }

    /// A small practice course: one vaultable wall, one wall too deep to
    /// vault, and one too tall to reach. The spawn faces the vaultable
    /// wall down +X.
    pub fn training_yard() -> Self {
        let mut course = Self::new("training_yard", "Training Yard");

        // Ground plane
        course.collision.add_box(
            Vec3::new(0.0, -10.0, 0.0),
            Vec3::new(4000.0, 10.0, 4000.0),
            ContentFlags::SOLID,
        );

        // Vaultable wall: near face at x=400, 50 deep, chest high
        course.collision.add_box(
            Vec3::new(425.0, 60.0, 0.0),
            Vec3::new(25.0, 60.0, 300.0),
            ContentFlags::SOLID,
        );

        // Planter too deep for the clearance probes, off to the side
        course.collision.add_box(
            Vec3::new(425.0, 60.0, 800.0),
            Vec3::new(200.0, 60.0, 150.0),
            ContentFlags::SOLID,
        );

        // Sheer wall above sweep reach, off to the other side
        course.collision.add_box(
            Vec3::new(425.0, 150.0, -800.0),
            Vec3::new(25.0, 150.0, 150.0),
            ContentFlags::SOLID,
        );

        course
    }
}
