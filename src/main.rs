//! Parapet - Main Entry Point
//!
//! Headless demo run: a character sprints across the training yard,
//! vaults the practice wall, and keeps going. Turn on `RUST_LOG=debug`
//! to watch the traversal pipeline make its decisions.

use parapet_physics::vault::{find_forward_landing, CharacterRig};

use parapet_game::{PlayerInput, Simulation, VaultOutcome, VaultPhase};

fn main() {
    env_logger::init();

    let mut simulation = Simulation::training();

    log::info!(
        "course '{}' loaded, spawn at {:?}",
        simulation.course.name,
        simulation.course.spawn.position
    );

    let mut forward = PlayerInput::default();
    forward.movement.forward = true;

    let mut vault = forward.clone();
    vault.actions.vault = true;

    // Sprint toward the wall, pressing vault every half second the way a
    // player hammering the key would
    let mut vault_started = false;
    for frame in 0..600u32 {
        let input = if frame % 30 == 29 { &vault } else { &forward };

        if let Some(outcome) = simulation.tick(input) {
            log::info!(
                "frame {}: vault attempt from x={:.0} -> {:?}",
                frame,
                simulation.character.position.x,
                outcome
            );
            if outcome == VaultOutcome::Warping {
                vault_started = true;
            }
        }

        if vault_started && simulation.vault.phase() == VaultPhase::Idle {
            log::info!(
                "frame {}: vault complete, landed at {:?}",
                frame,
                simulation.character.position
            );

            // Drop assist: report the ground directly ahead of the landing
            let ahead = find_forward_landing(
                &simulation.course.collision,
                simulation.character.trace_origin(),
                simulation.character.facing(),
                simulation.character.body_brushes(),
            );
            match ahead {
                Some(point) => log::info!("ground ahead at {:?}", point),
                None => log::warn!("no ground ahead, stopping here"),
            }
            break;
        }
    }

    if !vault_started {
        log::warn!("never found a vaultable obstacle");
    }

    println!(
        "final position {:?} after {} frames",
        simulation.character.position, simulation.frame
    );
}
