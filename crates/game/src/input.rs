//! Player input handling.
//!
//! Converts raw input (keyboard, mouse, gamepad) into the per-frame data
//! the character and the traversal system consume. Action buttons report
//! held state; the simulation derives press edges so fire-once actions like
//! vault and crouch-toggle trigger exactly once per press.

use serde::{Deserialize, Serialize};

/// Raw player input for a single frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Movement keys pressed.
    pub movement: MovementInput,

    /// Mouse delta this frame (pixels).
    pub mouse_delta: (f32, f32),

    /// Action buttons held.
    pub actions: ActionInput,

    /// Frame number this input was generated.
    pub frame: u32,
}

/// Movement key states.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Action button states (held, not edges).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActionInput {
    pub vault: bool,
    pub crouch: bool,
    pub jump: bool,
}

/// Press edges derived from two consecutive frames of action state.
///
/// An edge fires on the frame a button goes from released to held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionEdges {
    pub vault: bool,
    pub crouch: bool,
    pub jump: bool,
}

impl ActionEdges {
    /// Detect presses between the previous and current frame.
    pub fn detect(previous: &ActionInput, current: &ActionInput) -> Self {
        Self {
            vault: current.vault && !previous.vault,
            crouch: current.crouch && !previous.crouch,
            jump: current.jump && !previous.jump,
        }
    }
}

impl PlayerInput {
    /// Signed move axes: (forward, right), normalized for diagonals.
    pub fn move_axes(&self) -> (f32, f32) {
        let mut forward = 0.0f32;
        let mut right = 0.0f32;

        if self.movement.forward {
            forward += 1.0;
        }
        if self.movement.backward {
            forward -= 1.0;
        }
        if self.movement.right {
            right += 1.0;
        }
        if self.movement.left {
            right -= 1.0;
        }

        // Normalize diagonal movement
        let magnitude = (forward * forward + right * right).sqrt();
        if magnitude > 1.0 {
            forward /= magnitude;
            right /= magnitude;
        }

        (forward, right)
    }

    /// Check if any movement input is active.
    pub fn has_movement(&self) -> bool {
        self.movement.forward
            || self.movement.backward
            || self.movement.left
            || self.movement.right
    }
}
