//! Traversal tuning constants.
//!
//! All sweep distances are in world units (the character capsule is
//! 42 units wide and 192 tall for scale).

use serde::{Deserialize, Serialize};

/// Configuration for the obstacle-vault traversal engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    // ========================================================================
    // Obstacle scan
    // ========================================================================
    /// Forward reach of each horizontal obstacle sweep.
    pub scan_distance: f32,

    /// Vertical spacing between successive scan heights.
    pub scan_height_step: f32,

    /// Number of horizontal sweeps, stacked upward from the origin.
    pub scan_count: u32,

    /// Radius of the sphere swept by every probe.
    pub probe_radius: f32,

    // ========================================================================
    // Clearance & landing
    // ========================================================================
    /// Forward distance between clearance probes over the obstacle.
    pub step_forward: f32,

    /// Maximum number of forward clearance probes.
    pub clearance_steps: u32,

    /// Height above the obstacle impact point where clearance probes begin.
    pub probe_rise: f32,

    /// Downward reach of each clearance probe.
    pub probe_drop: f32,

    /// Downward reach of the landing ray once clearance is found.
    pub landing_drop: f32,

    // ========================================================================
    // Warp
    // ========================================================================
    /// Allowed vertical distance between the character's render height and
    /// the landing anchor at warp time.
    pub land_height_tolerance: f32,

    /// Playback rate for the vault clip.
    pub playback_rate: f32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            // Obstacle scan: three sweeps at 0/30/60 above the center
            scan_distance: 180.0,
            scan_height_step: 30.0,
            scan_count: 3,
            probe_radius: 5.0,

            // Clearance: up to 6 steps of 30 across the obstacle top
            step_forward: 30.0,
            clearance_steps: 6,
            probe_rise: 100.0,
            probe_drop: 150.0,
            landing_drop: 500.0,

            // Warp
            land_height_tolerance: 50.0,
            playback_rate: 1.5,
        }
    }
}

impl VaultConfig {
    /// Widest obstacle the clearance loop can cross.
    pub fn max_obstacle_depth(&self) -> f32 {
        self.step_forward * self.clearance_steps.saturating_sub(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VaultConfig::default();
        assert!(config.scan_distance > 0.0);
        assert!(config.probe_radius > 0.0);
        assert_eq!(config.scan_count, 3);
        assert_eq!(config.clearance_steps, 6);
    }

    #[test]
    fn test_max_obstacle_depth() {
        let config = VaultConfig::default();
        // 6 probes at 30-unit spacing cover 150 units of obstacle top
        assert_eq!(config.max_obstacle_depth(), 150.0);
    }
}
