//! Clearance and landing analysis over a detected obstacle.
//!
//! Walks forward across the obstacle top with downward probes until the
//! obstacle ends, then drops a ray to find ground to land on.

use glam::Vec3;

use crate::collision::{ContentFlags, SceneQuery, TraceQuery, TraceResult};

use super::config::VaultConfig;

/// The three anchor points produced by a successful analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VaultAnchors {
    /// Top-of-obstacle point at the first probe.
    pub start_pos: Vec3,
    /// Last top-of-obstacle point seen before clearance.
    pub middle_pos: Vec3,
    /// Ground point beyond the obstacle.
    pub land_pos: Vec3,
}

/// Result of a clearance analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearanceOutcome {
    /// Clearance and a landing surface were both found.
    Landing(VaultAnchors),
    /// Every forward probe still reported obstacle surface - the obstacle is
    /// deeper than the probe budget.
    Blocked,
    /// Clearance was found but no ground within reach below it.
    NoLanding,
}

impl ClearanceOutcome {
    /// Get the anchors if the analysis succeeded.
    pub fn anchors(&self) -> Option<VaultAnchors> {
        match self {
            Self::Landing(anchors) => Some(*anchors),
            _ => None,
        }
    }
}

/// Analyze clearance over an obstacle and search for a landing point.
///
/// Starting from the obstacle impact point, steps forward along `forward`
/// up to `clearance_steps` times. Each step drops a sphere probe from
/// `probe_rise` above the stepped point, reaching `probe_drop` down:
///
/// - probe hits: the obstacle top is still there. The first hit becomes the
///   start anchor; every hit (including the first) overwrites the middle
///   anchor, so the middle ends up as the last top surface seen.
/// - probe misses: clearance. A single ray drops `landing_drop` from the
///   same origin; a hit is the landing anchor (success), a miss fails the
///   attempt. Either way the loop ends at this step - clearance and landing
///   are decided together at one forward offset.
///
/// Anchors are seeded from the obstacle impact point so an analysis whose
/// very first probe already finds clearance still reports defined start and
/// middle positions.
pub fn analyze_clearance<S: SceneQuery>(
    scene: &S,
    obstacle_hit: &TraceResult,
    forward: Vec3,
    exclude: &[u32],
    config: &VaultConfig,
) -> ClearanceOutcome {
    let base = obstacle_hit.impact_or_end();

    let mut start_pos = base;
    let mut middle_pos = base;

    for index in 0..config.clearance_steps {
        let stepped = base + forward * (index as f32 * config.step_forward);
        let probe_start = stepped + Vec3::new(0.0, config.probe_rise, 0.0);
        let probe_end = probe_start - Vec3::new(0.0, config.probe_drop, 0.0);

        let probe = TraceQuery::sphere(
            probe_start,
            probe_end,
            config.probe_radius,
            ContentFlags::MASK_VAULT,
        )
        .excluding(exclude);
        let vertical = scene.trace(&probe);

        if vertical.hit_something() {
            let impact = vertical.impact_or_end();
            if index == 0 {
                start_pos = impact;
            }
            // Middle tracks the latest top surface, first iteration included
            middle_pos = impact;
            continue;
        }

        // No obstacle surface above this step: check for ground to land on
        let ground_end = probe_start - Vec3::new(0.0, config.landing_drop, 0.0);
        let ground_ray = TraceQuery::ray(probe_start, ground_end, ContentFlags::MASK_VAULT)
            .excluding(exclude);
        let ground = scene.trace(&ground_ray);

        if ground.hit_something() {
            log::trace!(
                "clearance at step {} with landing at {:?}",
                index,
                ground.impact_or_end()
            );
            return ClearanceOutcome::Landing(VaultAnchors {
                start_pos,
                middle_pos,
                land_pos: ground.impact_or_end(),
            });
        }

        log::trace!("clearance at step {} but no ground within reach", index);
        return ClearanceOutcome::NoLanding;
    }

    ClearanceOutcome::Blocked
}

/// Probe for a landing surface directly ahead of the character.
///
/// A single ray from 200 units above the point 80 units ahead, reaching
/// 1000 units down. Used as a drop assist when stepping off ledges.
pub fn find_forward_landing<S: SceneQuery>(
    scene: &S,
    position: Vec3,
    forward: Vec3,
    exclude: &[u32],
) -> Option<Vec3> {
    const FORWARD_DISTANCE: f32 = 80.0;
    const TRACE_UP: f32 = 200.0;
    const TRACE_DOWN: f32 = 1000.0;

    let base = position + forward * FORWARD_DISTANCE;
    let start = base + Vec3::new(0.0, TRACE_UP, 0.0);
    let end = base - Vec3::new(0.0, TRACE_DOWN, 0.0);

    let query = TraceQuery::ray(start, end, ContentFlags::MASK_VAULT).excluding(exclude);
    let result = scene.trace(&query);

    result.hit_something().then(|| result.impact_or_end())
}
