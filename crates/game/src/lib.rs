//! Parapet Game Logic
//!
//! This crate contains the character-side game simulation:
//!
//! - Player input handling with press-edge detection
//! - The third-person character and its camera boom
//! - Animation playback for the full-body slot
//! - Courses (collision geometry plus spawn points)
//! - The fixed-timestep simulation loop wiring it all together
//!
//! # Architecture
//!
//! The simulation drives the vault traversal engine from the physics
//! crate. The character implements the engine's rig traits, so the
//! executor mutates it the same way in the game and in tests:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Simulation                            │
//! │  ┌────────┐   ┌───────────┐   ┌──────────────────────────┐   │
//! │  │ Input  │──►│ Character │◄──│ Vault Executor           │   │
//! │  │ (edges)│   │ + Camera  │   │ (scan, clearance, warp)  │   │
//! │  └────────┘   └───────────┘   └──────────────────────────┘   │
//! │                      ▲               │          │            │
//! │                      │          warp targets  clip plays     │
//! │               anchors glide          ▼          ▼            │
//! │                      └────── WarpTargetMap   AnimationMixer  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod animation;
pub mod camera;
pub mod character;
pub mod course;
pub mod input;
pub mod simulation;

// Re-export main types
pub use animation::AnimationMixer;
pub use camera::CameraBoom;
pub use character::Character;
pub use course::Course;
pub use input::PlayerInput;
pub use simulation::{Simulation, SimulationConfig};

// Re-export physics types for convenience
pub use parapet_physics::{
    CollisionWorld, ContentFlags, VaultConfig, VaultExecutor, VaultOutcome, VaultPhase,
    VaultState, WarpTargetMap,
};
