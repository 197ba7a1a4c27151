//! Game simulation - the main game loop.
//!
//! Wires input, the character, the vault executor, the warp target
//! registry, and the animation mixer into one fixed-timestep loop. The
//! simulation is headless and deterministic: given the same inputs it
//! always produces the same character trajectory.

use glam::Vec3;
use parapet_physics::vault::{
    ClipId, VaultConfig, VaultExecutor, VaultOutcome, WarpTargetMap, TARGET_VAULT_LAND,
    TARGET_VAULT_MIDDLE, TARGET_VAULT_START,
};
use serde::{Deserialize, Serialize};

use crate::animation::AnimationMixer;
use crate::character::Character;
use crate::course::Course;
use crate::input::{ActionEdges, ActionInput, PlayerInput};

/// Game simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Mouse sensitivity.
    pub mouse_sensitivity: f32,

    /// Vault traversal tuning.
    pub vault: VaultConfig,

    /// Name of the vault animation clip.
    pub vault_clip: String,

    /// Duration of the vault clip in seconds, at rate 1.0.
    pub vault_clip_duration: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            mouse_sensitivity: 2.0,
            vault: VaultConfig::default(),
            vault_clip: "vault_over".to_string(),
            vault_clip_duration: 1.2,
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// The main game simulation.
#[derive(Debug)]
pub struct Simulation {
    /// Current frame/tick number.
    pub frame: u64,

    /// Simulation configuration.
    pub config: SimulationConfig,

    /// Current course.
    pub course: Course,

    /// The player character.
    pub character: Character,

    /// Vault traversal state machine.
    pub vault: VaultExecutor,

    /// Named warp targets consumed by the warp motion.
    pub warp_targets: WarpTargetMap,

    /// Full-body animation slot.
    pub animation: AnimationMixer,

    /// Action state from the previous tick, for edge detection.
    previous_actions: ActionInput,
}

impl Simulation {
    /// Create a simulation on the given course.
    pub fn new(config: SimulationConfig, course: Course) -> Self {
        let mut course = course;

        let mut character = Character::new(course.spawn.position, course.spawn.facing);
        character.spawn_body(&mut course.collision);

        let vault = VaultExecutor::with_clip(
            config.vault.clone(),
            ClipId::new(&config.vault_clip),
        );

        let mut animation = AnimationMixer::new();
        animation.register_clip(&config.vault_clip, config.vault_clip_duration);

        Self {
            frame: 0,
            config,
            course,
            character,
            vault,
            warp_targets: WarpTargetMap::new(),
            animation,
            previous_actions: ActionInput::default(),
        }
    }

    /// Create a simulation with default configuration on the training yard.
    pub fn training() -> Self {
        Self::new(SimulationConfig::default(), Course::training_yard())
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self, input: &PlayerInput) -> Option<VaultOutcome> {
        let dt = self.config.delta_time();
        let edges = ActionEdges::detect(&self.previous_actions, &input.actions);

        // Look
        let sensitivity = self.config.mouse_sensitivity * 0.001;
        self.character.apply_look(
            input.mouse_delta.0 * sensitivity,
            -input.mouse_delta.1 * sensitivity,
        );

        // Stance
        if edges.jump {
            self.character.begin_jump();
        }
        if edges.crouch {
            self.character.toggle_crouch();
        }

        // Planar movement (ignored internally while the warp owns the root)
        let (forward, right) = input.move_axes();
        self.character.apply_move(forward, right, dt);
        self.character.sync_body(&mut self.course.collision);

        // Vault trigger, on the press edge only
        let mut outcome = None;
        if edges.vault {
            let result = self.vault.try_vault(
                &self.course.collision,
                &mut self.character,
                &mut self.warp_targets,
                &mut self.animation,
            );
            log::debug!("vault trigger at frame {}: {:?}", self.frame, result);
            outcome = Some(result);
        }

        // Warp motion: slave the root to the anchors while the clip plays
        if self.vault.is_warping() {
            if let Some(progress) = self.animation.current_progress() {
                if let Some(position) = self.warp_position(progress) {
                    self.character.position = position;
                }
            }
        }

        // Clip completions, natural or interrupted
        let events = self.animation.advance(dt);
        for event in events {
            let land = self
                .warp_targets
                .get(TARGET_VAULT_LAND)
                .map(|target| target.location);
            let cleaned = self.vault.handle_clip_ended(
                event.handle,
                event.interrupted,
                &mut self.character,
                &mut self.warp_targets,
            );
            if cleaned {
                // A finished warp ends exactly on the landing anchor
                if let (false, Some(land)) = (event.interrupted, land) {
                    self.character.position = land;
                }
                self.character.sync_body(&mut self.course.collision);
            }
        }

        self.character.camera.update(dt);

        self.previous_actions = input.actions;
        self.frame += 1;
        outcome
    }

    /// Cut the current vault short, as a hit reaction or death would.
    ///
    /// Cleanup runs through the same completion path as a natural finish.
    pub fn interrupt_vault(&mut self) {
        if !self.vault.is_warping() {
            return;
        }

        self.animation.interrupt();
        let events = self.animation.advance(0.0);
        for event in events {
            self.vault.handle_clip_ended(
                event.handle,
                event.interrupted,
                &mut self.character,
                &mut self.warp_targets,
            );
        }
        self.character.sync_body(&mut self.course.collision);
    }

    /// Root position along the warp at normalized clip progress.
    ///
    /// First half of the clip travels start to middle, second half middle
    /// to land.
    fn warp_position(&self, progress: f32) -> Option<Vec3> {
        let start = self.warp_targets.get(TARGET_VAULT_START)?.location;
        let middle = self.warp_targets.get(TARGET_VAULT_MIDDLE)?.location;
        let land = self.warp_targets.get(TARGET_VAULT_LAND)?.location;

        let position = if progress < 0.5 {
            start.lerp(middle, progress * 2.0)
        } else {
            middle.lerp(land, (progress - 0.5) * 2.0)
        };
        Some(position)
    }

    /// Get the delta time for this simulation.
    pub fn delta_time(&self) -> f32 {
        self.config.delta_time()
    }
}

// ============================================================================
// Tests
// ============================================================================
