//! Warp executor: the traversal state machine.
//!
//! Runs the scan -> analyze -> arm pipeline synchronously inside one vault
//! trigger, then spans the warp motion across frames until the animation
//! clip reports completion.

use crate::collision::SceneQuery;

use super::clearance::{analyze_clearance, ClearanceOutcome};
use super::config::VaultConfig;
use super::rig::{
    AnimationPlayer, CharacterRig, ClipId, LocomotionMode, PlaybackHandle, WarpTargetRegistry,
};
use super::scanner::scan_for_obstacle;
use super::state::{VaultPhase, VaultState};

/// Warp target name for the start anchor.
pub const TARGET_VAULT_START: &str = "VaultStart";
/// Warp target name for the middle anchor.
pub const TARGET_VAULT_MIDDLE: &str = "VaultMiddle";
/// Warp target name for the landing anchor.
pub const TARGET_VAULT_LAND: &str = "VaultLand";

/// The three target names the executor owns in the registry.
pub const VAULT_TARGET_NAMES: [&str; 3] =
    [TARGET_VAULT_START, TARGET_VAULT_MIDDLE, TARGET_VAULT_LAND];

/// Result of a vault trigger.
///
/// Every failure is a silent abort - callers may log it, but nothing is
/// surfaced to the player beyond "the vault does not happen".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultOutcome {
    /// The warp motion started.
    Warping,
    /// A vault was already in flight; the trigger was ignored.
    Busy,
    /// No obstacle within scan reach at any sweep height.
    NoObstacle,
    /// Obstacle deeper than the clearance probe budget.
    Blocked,
    /// Clearance found, but no ground to land on.
    NoLanding,
    /// No animation clip is configured.
    MissingClip,
    /// The landing height is outside the character's vertical tolerance.
    OutOfRange,
}

impl VaultOutcome {
    /// Whether the trigger started a warp.
    pub fn started(&self) -> bool {
        matches!(self, Self::Warping)
    }
}

/// State machine driving obstacle vaults.
///
/// Phases: `Idle -> Scanning -> Analyzing -> Armed -> Warping -> Idle`.
/// Scanning through Armed happen synchronously inside [`try_vault`];
/// `Warping` persists until [`handle_clip_ended`] runs cleanup. A trigger
/// in any phase but `Idle` is ignored, so in-flight anchors can never be
/// partially overwritten.
///
/// [`try_vault`]: VaultExecutor::try_vault
/// [`handle_clip_ended`]: VaultExecutor::handle_clip_ended
#[derive(Debug, Clone)]
pub struct VaultExecutor {
    /// Sweep and warp tuning.
    pub config: VaultConfig,

    /// The vault animation clip. A vault cannot start without one.
    clip: Option<ClipId>,

    phase: VaultPhase,
    state: VaultState,

    /// Identity of the playback we are waiting on while `Warping`.
    active_playback: Option<PlaybackHandle>,
}

impl VaultExecutor {
    /// Create an executor with no clip configured.
    pub fn new(config: VaultConfig) -> Self {
        Self {
            config,
            clip: None,
            phase: VaultPhase::Idle,
            state: VaultState::default(),
            active_playback: None,
        }
    }

    /// Create an executor with the given vault clip.
    pub fn with_clip(config: VaultConfig, clip: ClipId) -> Self {
        let mut executor = Self::new(config);
        executor.clip = Some(clip);
        executor
    }

    /// Set or replace the vault clip.
    pub fn set_clip(&mut self, clip: Option<ClipId>) {
        self.clip = clip;
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> VaultPhase {
        self.phase
    }

    /// Current vault state (anchors + warp gate).
    pub fn state(&self) -> &VaultState {
        &self.state
    }

    /// Whether a warp motion is currently playing.
    pub fn is_warping(&self) -> bool {
        self.phase == VaultPhase::Warping
    }

    /// Handle a vault trigger: scan, analyze, and if everything lines up,
    /// start the warp motion.
    ///
    /// Runs synchronously; on any failure the executor is back in `Idle`
    /// with the vault state parked and no side effects applied to the rig.
    pub fn try_vault<S, R, W, A>(
        &mut self,
        scene: &S,
        rig: &mut R,
        targets: &mut W,
        anim: &mut A,
    ) -> VaultOutcome
    where
        S: SceneQuery,
        R: CharacterRig,
        W: WarpTargetRegistry,
        A: AnimationPlayer,
    {
        if self.phase != VaultPhase::Idle {
            log::debug!("vault trigger ignored: executor is {:?}", self.phase);
            return VaultOutcome::Busy;
        }

        let origin = rig.trace_origin();
        let forward = rig.facing();
        let exclude: Vec<u32> = rig.body_brushes().to_vec();

        self.phase = VaultPhase::Scanning;
        let obstacle = match scan_for_obstacle(scene, origin, forward, &exclude, &self.config) {
            Some(hit) => hit,
            None => {
                self.phase = VaultPhase::Idle;
                return VaultOutcome::NoObstacle;
            }
        };

        self.phase = VaultPhase::Analyzing;
        let anchors = match analyze_clearance(scene, &obstacle, forward, &exclude, &self.config) {
            ClearanceOutcome::Landing(anchors) => anchors,
            ClearanceOutcome::Blocked => {
                self.abort();
                return VaultOutcome::Blocked;
            }
            ClearanceOutcome::NoLanding => {
                self.abort();
                return VaultOutcome::NoLanding;
            }
        };

        self.phase = VaultPhase::Armed;
        self.state.start_pos = anchors.start_pos;
        self.state.middle_pos = anchors.middle_pos;
        self.state.land_pos = anchors.land_pos;
        self.state.can_warp = true;

        self.start_warp(rig, targets, anim)
    }

    /// Enter `Warping` from `Armed`, checking every precondition first.
    ///
    /// Aborts to `Idle` without touching the rig when a precondition fails.
    fn start_warp<R, W, A>(&mut self, rig: &mut R, targets: &mut W, anim: &mut A) -> VaultOutcome
    where
        R: CharacterRig,
        W: WarpTargetRegistry,
        A: AnimationPlayer,
    {
        let clip = match &self.clip {
            Some(clip) => clip.clone(),
            None => {
                log::debug!("vault aborted: no clip configured");
                self.abort();
                return VaultOutcome::MissingClip;
            }
        };

        // Guard against stale or invalid landing data: the render mesh must
        // already sit within tolerance of the landing height.
        let height_delta = (rig.render_height() - self.state.land_pos.y).abs();
        if !self.state.can_warp || height_delta > self.config.land_height_tolerance {
            log::debug!(
                "vault aborted: landing height off by {:.1} (tolerance {:.1})",
                height_delta,
                self.config.land_height_tolerance
            );
            self.abort();
            return VaultOutcome::OutOfRange;
        }

        // Commit: the character stops colliding and flies along the warp.
        rig.set_locomotion_mode(LocomotionMode::Flying);
        rig.set_collision_enabled(false);
        rig.set_camera_collision(false);

        let yaw = rig.facing_yaw();
        targets.set_target(TARGET_VAULT_START, self.state.start_pos, yaw);
        targets.set_target(TARGET_VAULT_MIDDLE, self.state.middle_pos, yaw);
        targets.set_target(TARGET_VAULT_LAND, self.state.land_pos, yaw);

        let handle = anim.play(&clip, self.config.playback_rate);
        self.active_playback = Some(handle);
        self.phase = VaultPhase::Warping;

        log::debug!(
            "vault warp started: start {:?} middle {:?} land {:?}",
            self.state.start_pos,
            self.state.middle_pos,
            self.state.land_pos
        );

        VaultOutcome::Warping
    }

    /// Completion callback for the vault clip.
    ///
    /// Runs full cleanup whether the clip finished naturally or was
    /// interrupted. Idempotent: notifications for a playback other than the
    /// one started by this executor are ignored, as are repeats after
    /// cleanup already ran. Returns true if cleanup ran.
    pub fn handle_clip_ended<R, W>(
        &mut self,
        handle: PlaybackHandle,
        interrupted: bool,
        rig: &mut R,
        targets: &mut W,
    ) -> bool
    where
        R: CharacterRig,
        W: WarpTargetRegistry,
    {
        if self.phase != VaultPhase::Warping || self.active_playback != Some(handle) {
            log::debug!("ignoring clip-ended for unrelated playback {:?}", handle);
            return false;
        }

        rig.set_locomotion_mode(LocomotionMode::Grounded);
        rig.set_collision_enabled(true);
        rig.set_camera_collision(true);

        for name in VAULT_TARGET_NAMES {
            targets.remove_target(name);
        }

        self.state.reset();
        self.active_playback = None;
        self.phase = VaultPhase::Idle;

        log::debug!(
            "vault warp finished ({})",
            if interrupted { "interrupted" } else { "completed" }
        );

        true
    }

    /// Abort back to `Idle`, parking the vault state.
    fn abort(&mut self) {
        self.state.reset();
        self.phase = VaultPhase::Idle;
    }
}

// ============================================================================
// Tests
// ============================================================================
