//! Obstacle vault traversal.
//!
//! Turns "the player pressed vault" into a validated, anchored warp over a
//! chest-high obstacle, in three stages:
//!
//! - **Scanner**: horizontal sphere sweeps find a blocking wall ahead
//! - **Clearance**: forward-stepping downward probes measure the obstacle
//!   top and find ground to land on beyond it
//! - **Executor**: a state machine that arms the three warp anchors
//!   (start, middle, land), flips the character into warp mode, plays the
//!   vault clip, and restores everything when the clip ends
//!
//! The executor talks to the character through the seams in [`rig`], so the
//! whole pipeline runs identically against the game character or a test
//! double.

pub mod clearance;
pub mod config;
pub mod executor;
pub mod rig;
pub mod scanner;
pub mod state;

pub use clearance::{analyze_clearance, find_forward_landing, ClearanceOutcome, VaultAnchors};
pub use config::VaultConfig;
pub use executor::{
    VaultExecutor, VaultOutcome, TARGET_VAULT_LAND, TARGET_VAULT_MIDDLE, TARGET_VAULT_START,
    VAULT_TARGET_NAMES,
};
pub use rig::{
    AnimationPlayer, CharacterRig, ClipId, LocomotionMode, PlaybackHandle, WarpTarget,
    WarpTargetMap, WarpTargetRegistry,
};
pub use scanner::scan_for_obstacle;
pub use state::{VaultPhase, VaultState};
