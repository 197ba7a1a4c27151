//! Collaborator seams for the warp executor.
//!
//! The executor drives a character it does not own: it toggles locomotion
//! and collision, registers warp targets, and plays an animation clip. Each
//! of those collaborators sits behind a small trait so the engine can run
//! against a real character or a recording test double.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Locomotion mode of the character's movement component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LocomotionMode {
    /// Normal ground movement with collision.
    #[default]
    Grounded,
    /// Unobstructed flight used while a warp repositions the root.
    Flying,
}

/// Reference to an animation clip by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipId(pub String);

impl ClipId {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identity of one playback instance of a clip.
///
/// Two playbacks of the same clip get distinct handles, so a completion
/// notification can always be matched to the playback that expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaybackHandle(pub u64);

/// The character-side state the executor mutates during a warp.
pub trait CharacterRig {
    /// Center point of the character where traversal scans originate.
    fn trace_origin(&self) -> Vec3;

    /// Horizontal facing direction (unit vector).
    fn facing(&self) -> Vec3;

    /// Facing yaw in radians, stamped onto warp targets.
    fn facing_yaw(&self) -> f32;

    /// Current vertical position of the render mesh (feet height).
    fn render_height(&self) -> f32;

    /// Brush ids belonging to this character, excluded from its own traces.
    fn body_brushes(&self) -> &[u32];

    /// Switch the movement component's locomotion mode.
    fn set_locomotion_mode(&mut self, mode: LocomotionMode);

    /// Enable or disable the character's collision.
    fn set_collision_enabled(&mut self, enabled: bool);

    /// Enable or disable the camera boom's collision test.
    fn set_camera_collision(&mut self, enabled: bool);
}

/// A named location+rotation anchor consumed by the procedural warp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WarpTarget {
    pub location: Vec3,
    /// Facing yaw in radians.
    pub yaw: f32,
}

/// Registry of named warp targets.
///
/// The executor is the single writer of the three vault target names; it
/// writes them on warp entry and removes exactly those names on exit.
pub trait WarpTargetRegistry {
    /// Add or update a named target.
    fn set_target(&mut self, name: &str, location: Vec3, yaw: f32);

    /// Remove a named target. Removing an absent name is a no-op.
    fn remove_target(&mut self, name: &str);
}

/// Animation playback service.
pub trait AnimationPlayer {
    /// Start playing a clip at the given rate, returning the playback's
    /// identity for completion matching.
    fn play(&mut self, clip: &ClipId, rate: f32) -> PlaybackHandle;
}

/// Default map-backed warp target registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarpTargetMap {
    targets: HashMap<String, WarpTarget>,
}

impl WarpTargetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a target by name.
    pub fn get(&self, name: &str) -> Option<&WarpTarget> {
        self.targets.get(name)
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl WarpTargetRegistry for WarpTargetMap {
    fn set_target(&mut self, name: &str, location: Vec3, yaw: f32) {
        self.targets
            .insert(name.to_string(), WarpTarget { location, yaw });
    }

    fn remove_target(&mut self, name: &str) {
        self.targets.remove(name);
    }
}
