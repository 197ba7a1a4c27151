//! Third-person camera boom.
//!
//! A spring arm behind the character: the arm length eases between a
//! standing and a crouched target, and the collision test that keeps the
//! camera out of walls can be switched off while a warp teleports the
//! character through geometry.

use serde::{Deserialize, Serialize};

/// Camera boom state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraBoom {
    /// Current arm length.
    pub arm_length: f32,

    /// Arm length the boom is easing toward.
    pub target_arm_length: f32,

    /// Whether the boom sweeps against geometry to avoid clipping.
    pub collision_test: bool,
}

impl CameraBoom {
    /// Arm length while standing.
    pub const ARM_STANDING: f32 = 400.0;

    /// Arm length while crouched: pulled back for a wider view.
    pub const ARM_CROUCHED: f32 = 550.0;

    /// Easing rate toward the target length, per second.
    const BLEND_RATE: f32 = 6.0;

    pub fn new() -> Self {
        Self {
            arm_length: Self::ARM_STANDING,
            target_arm_length: Self::ARM_STANDING,
            collision_test: true,
        }
    }

    /// Retarget the arm for the current stance.
    pub fn set_crouched(&mut self, crouched: bool) {
        self.target_arm_length = if crouched {
            Self::ARM_CROUCHED
        } else {
            Self::ARM_STANDING
        };
    }

    /// Ease the arm toward its target length.
    pub fn update(&mut self, dt: f32) {
        let fraction = (Self::BLEND_RATE * dt).clamp(0.0, 1.0);
        self.arm_length += (self.target_arm_length - self.arm_length) * fraction;

        // Snap when close enough that easing is invisible
        if (self.target_arm_length - self.arm_length).abs() < 0.1 {
            self.arm_length = self.target_arm_length;
        }
    }
}

impl Default for CameraBoom {
    fn default() -> Self {
        Self::new()
    }
}
