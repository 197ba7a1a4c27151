//! The third-person character.
//!
//! Holds the character's transform, stance, and movement mode, and exposes
//! the rig surface the vault executor mutates during a warp. Movement here
//! is intentionally simple planar locomotion; the interesting traversal
//! logic lives in the physics crate and drives this character through the
//! [`CharacterRig`] trait.

use glam::Vec3;
use parapet_physics::vault::{CharacterRig, LocomotionMode};
use parapet_physics::{CollisionWorld, ContentFlags};
use serde::{Deserialize, Serialize};

use crate::camera::CameraBoom;

/// A player-controlled character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Feet position in world space.
    pub position: Vec3,

    /// Facing yaw in radians (0 = +X).
    pub yaw: f32,

    /// Look pitch in radians, clamped.
    pub pitch: f32,

    /// Whether the character is crouched.
    pub crouching: bool,

    /// Movement mode; `Flying` while a warp repositions the root.
    pub locomotion: LocomotionMode,

    /// Whether the character's body collides with the world.
    pub collision_enabled: bool,

    /// Third-person camera boom.
    pub camera: CameraBoom,

    /// Collision brush ids belonging to this character's body.
    body_brushes: Vec<u32>,
}

impl Character {
    /// Capsule radius.
    pub const CAPSULE_RADIUS: f32 = 42.0;

    /// Capsule half height, feet to center.
    pub const CAPSULE_HALF_HEIGHT: f32 = 96.0;

    /// Ground speed while standing.
    pub const WALK_SPEED: f32 = 500.0;

    /// Ground speed while crouched.
    pub const CROUCH_SPEED: f32 = 350.0;

    const PITCH_LIMIT: f32 = 1.4;

    /// Create a character standing at `position`, facing `yaw`.
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: 0.0,
            crouching: false,
            locomotion: LocomotionMode::Grounded,
            collision_enabled: true,
            camera: CameraBoom::new(),
            body_brushes: Vec::new(),
        }
    }

    /// Register the character's body capsule in the collision world.
    ///
    /// The brush id is remembered so the character's own traces skip it.
    pub fn spawn_body(&mut self, world: &mut CollisionWorld) {
        let cylinder_half = Self::CAPSULE_HALF_HEIGHT - Self::CAPSULE_RADIUS;
        let id = world.add_capsule(
            self.position,
            Self::CAPSULE_RADIUS,
            cylinder_half,
            ContentFlags::PLAYER_BODY,
        );
        self.body_brushes.push(id);
    }

    /// Push the character's current position into its body brush.
    pub fn sync_body(&self, world: &mut CollisionWorld) {
        let center = self.position + Vec3::new(0.0, Self::CAPSULE_HALF_HEIGHT, 0.0);
        for &id in &self.body_brushes {
            world.move_brush(id, center);
        }
    }

    /// Current ground speed for the stance.
    pub fn move_speed(&self) -> f32 {
        if self.crouching {
            Self::CROUCH_SPEED
        } else {
            Self::WALK_SPEED
        }
    }

    /// Apply planar movement from input axes.
    ///
    /// Ignored while the warp owns the root: player input must not fight
    /// the warp motion.
    pub fn apply_move(&mut self, forward_axis: f32, right_axis: f32, dt: f32) {
        if self.locomotion != LocomotionMode::Grounded {
            return;
        }

        let forward = self.facing();
        let right = Vec3::new(-forward.z, 0.0, forward.x);
        let direction = forward * forward_axis + right * right_axis;

        if direction.length_squared() > 0.0 {
            self.position += direction.normalize() * self.move_speed() * dt;
        }
    }

    /// Apply a look delta in radians.
    pub fn apply_look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Toggle crouch, retargeting the camera boom.
    pub fn toggle_crouch(&mut self) {
        self.set_crouched(!self.crouching);
    }

    /// Jumping always stands the character up first.
    pub fn begin_jump(&mut self) {
        if self.crouching {
            self.set_crouched(false);
        }
    }

    fn set_crouched(&mut self, crouched: bool) {
        self.crouching = crouched;
        self.camera.set_crouched(crouched);
    }
}

impl CharacterRig for Character {
    fn trace_origin(&self) -> Vec3 {
        self.position + Vec3::new(0.0, Self::CAPSULE_HALF_HEIGHT, 0.0)
    }

    fn facing(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    fn facing_yaw(&self) -> f32 {
        self.yaw
    }

    fn render_height(&self) -> f32 {
        self.position.y
    }

    fn body_brushes(&self) -> &[u32] {
        &self.body_brushes
    }

    fn set_locomotion_mode(&mut self, mode: LocomotionMode) {
        self.locomotion = mode;
    }

    fn set_collision_enabled(&mut self, enabled: bool) {
        self.collision_enabled = enabled;
    }

    fn set_camera_collision(&mut self, enabled: bool) {
        self.camera.collision_test = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_origin_is_capsule_center() {
        let character = Character::new(Vec3::new(10.0, 0.0, 5.0), 0.0);
        assert_eq!(character.trace_origin(), Vec3::new(10.0, 96.0, 5.0));
        assert_eq!(character.render_height(), 0.0);
    }

    #[test]
    fn test_move_follows_facing() {
        let mut character = Character::new(Vec3::ZERO, 0.0);
        character.apply_move(1.0, 0.0, 0.1);

        // Yaw 0 faces +X at walk speed
        assert!((character.position.x - 50.0).abs() < 0.001);
        assert_eq!(character.position.z, 0.0);
    }

    #[test]
    fn test_crouch_slows_movement_and_extends_camera() {
        let mut character = Character::new(Vec3::ZERO, 0.0);
        assert_eq!(character.move_speed(), Character::WALK_SPEED);

        character.toggle_crouch();
        assert!(character.crouching);
        assert_eq!(character.move_speed(), Character::CROUCH_SPEED);
        assert_eq!(
            character.camera.target_arm_length,
            CameraBoom::ARM_CROUCHED
        );

        character.toggle_crouch();
        assert!(!character.crouching);
        assert_eq!(
            character.camera.target_arm_length,
            CameraBoom::ARM_STANDING
        );
    }

    #[test]
    fn test_jump_cancels_crouch() {
        let mut character = Character::new(Vec3::ZERO, 0.0);
        character.toggle_crouch();

        character.begin_jump();
        assert!(!character.crouching);
        assert_eq!(
            character.camera.target_arm_length,
            CameraBoom::ARM_STANDING
        );
    }

    #[test]
    fn test_flying_ignores_move_input() {
        let mut character = Character::new(Vec3::ZERO, 0.0);
        character.set_locomotion_mode(LocomotionMode::Flying);

        character.apply_move(1.0, 0.0, 0.1);
        assert_eq!(character.position, Vec3::ZERO);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut character = Character::new(Vec3::ZERO, 0.0);
        character.apply_look(0.0, 10.0);
        assert!(character.pitch <= 1.4);
        character.apply_look(0.0, -20.0);
        assert!(character.pitch >= -1.4);
    }

    #[test]
    fn test_body_registration_and_sync() {
        let mut world = CollisionWorld::new();
        let mut character = Character::new(Vec3::ZERO, 0.0);
        character.spawn_body(&mut world);

        assert_eq!(character.body_brushes().len(), 1);
        assert_eq!(world.brush_count(), 1);

        character.position = Vec3::new(100.0, 0.0, 0.0);
        character.sync_body(&mut world);

        // Center of the capsule sits above the new feet position
        let query = parapet_physics::TraceQuery::ray(
            Vec3::new(100.0, 96.0, -500.0),
            Vec3::new(100.0, 96.0, 500.0),
            ContentFlags::PLAYER_BODY,
        );
        use parapet_physics::SceneQuery;
        assert!(world.trace(&query).hit_something());
    }
}
