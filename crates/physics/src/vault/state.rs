//! Vault anchors and executor phase.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The three anchor points of a vault plus the warp gate flag.
///
/// Owned by the warp executor; mutated only between a successful clearance
/// analysis and the end of the warp motion. `reset` must run whenever the
/// motion ends or an attempt aborts, so no stale anchor can gate a later
/// attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultState {
    /// Top-of-obstacle point at the first clearance probe.
    pub start_pos: Vec3,

    /// Last-seen top-of-obstacle point before clearance was found.
    pub middle_pos: Vec3,

    /// Landing surface point beyond the obstacle.
    pub land_pos: Vec3,

    /// True only while a validated set of anchors is waiting to be warped.
    pub can_warp: bool,
}

impl VaultState {
    /// Parking position for `land_pos`, far below any real terrain, so a
    /// stale landing-height check can never pass.
    pub const LAND_SENTINEL: Vec3 = Vec3::new(0.0, -20000.0, 0.0);

    /// Clear the warp gate and park all anchors.
    pub fn reset(&mut self) {
        self.start_pos = Vec3::ZERO;
        self.middle_pos = Vec3::ZERO;
        self.land_pos = Self::LAND_SENTINEL;
        self.can_warp = false;
    }
}

impl Default for VaultState {
    fn default() -> Self {
        Self {
            start_pos: Vec3::ZERO,
            middle_pos: Vec3::ZERO,
            land_pos: Self::LAND_SENTINEL,
            can_warp: false,
        }
    }
}

/// Phase of the warp executor's state machine.
///
/// `Scanning` and `Analyzing` exist only within a single trigger invocation;
/// between frames the executor is always `Idle`, `Armed`, or `Warping`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VaultPhase {
    /// Nothing in flight; triggers are accepted.
    #[default]
    Idle,
    /// Running the obstacle scan.
    Scanning,
    /// Running the clearance and landing analysis.
    Analyzing,
    /// Anchors validated, warp not yet started.
    Armed,
    /// Warp motion playing; waiting for the clip to end.
    Warping,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_parked() {
        let state = VaultState::default();
        assert!(!state.can_warp);
        assert_eq!(state.land_pos, VaultState::LAND_SENTINEL);
    }

    #[test]
    fn test_reset_parks_landing() {
        let mut state = VaultState {
            start_pos: Vec3::new(1.0, 2.0, 3.0),
            middle_pos: Vec3::new(4.0, 5.0, 6.0),
            land_pos: Vec3::new(7.0, 8.0, 9.0),
            can_warp: true,
        };

        state.reset();

        assert!(!state.can_warp);
        assert_eq!(state.land_pos, VaultState::LAND_SENTINEL);
        // A sentinel landing can never sit within tolerance of a real character
        assert!(state.land_pos.y < -10000.0);
    }
}
