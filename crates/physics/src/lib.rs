//! Parapet Traversal Engine
//!
//! Collision queries and obstacle-vault traversal for a third-person
//! character. The engine is headless and deterministic: it knows nothing
//! about rendering or animation blending, only geometry and state.
//!
//! # Architecture
//!
//! The engine is split into two systems:
//!
//! - **Collision**: Sweeps spheres and casts rays through a brush world,
//!   returns hit information
//! - **Vault**: Uses collision traces to detect vaultable obstacles, plan
//!   warp anchors over them, and drive the warp state machine
//!
//! The vault executor reaches back into the character through small traits
//! ([`CharacterRig`], [`WarpTargetRegistry`], [`AnimationPlayer`]) so game
//! code and tests wire it up the same way.

pub mod collision;
pub mod vault;

// Re-export commonly used types
pub use collision::{
    CollisionWorld, ContentFlags, SceneQuery, TraceQuery, TraceResult, TraceShape,
};
pub use vault::{
    AnimationPlayer, CharacterRig, ClipId, LocomotionMode, PlaybackHandle, VaultConfig,
    VaultExecutor, VaultOutcome, VaultPhase, VaultState, WarpTarget, WarpTargetMap,
    WarpTargetRegistry,
};
