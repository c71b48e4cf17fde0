//! Fixed timestep simulation tick
//!
//! Core loop that advances the simulation by one frame:
//! rotate the enclosure, pull the ball toward the center, integrate, then
//! bounce it off the walls (twice when the first bounce leaves it stuck
//! against a corner).

use rand::Rng;

use super::collision::{Resolution, centripetal_force, resolve};
use super::geometry::{point_in_polygon, within_distance_of_edges};
use super::state::{ResetReason, SimState};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The ball hit a wall (either pass)
    pub collided: bool,
    /// The ball was still against a wall after the first bounce
    pub second_pass: bool,
    /// The ball was reset to its start position
    pub reset: Option<ResetReason>,
}

/// Advance the simulation by one fixed timestep
pub fn tick<R: Rng>(state: &mut SimState<R>) -> TickReport {
    state.time_ticks += 1;
    let mut report = TickReport::default();

    state
        .enclosure
        .advance(&state.settings.enclosure, &mut state.rng);

    let physics = &state.settings.physics;
    let center = state.enclosure.center;

    // Rotating-frame pull uses the just-advanced speed
    let pull = centripetal_force(
        state.body.position,
        center,
        state.enclosure.rotation_speed(),
        physics.centripetal_scale,
    );
    // The integrated position is the one-step look-ahead the walls are checked against
    state
        .body
        .integrate(pull, physics.gravity, physics.friction, physics.max_speed);

    report.reset = state.body.check(center, physics.bounds).err();

    if report.reset.is_none() {
        let first = resolve(
            state.body.position,
            state.body.velocity,
            &state.enclosure,
            physics,
        );
        let mut outcome = first;

        if first.reset.is_none() {
            let vertices = state.enclosure.vertices();
            let stuck = !point_in_polygon(first.position, &vertices)
                || within_distance_of_edges(first.position, &vertices, physics.collision_buffer);
            if stuck {
                let second = resolve(first.position, first.velocity, &state.enclosure, physics);
                report.second_pass = true;
                outcome = Resolution {
                    collided: first.collided || second.collided,
                    ..second
                };
            }
        }

        state.body.position = outcome.position;
        state.body.velocity = outcome.velocity;
        report.collided = outcome.collided;
        report.reset = outcome
            .reset
            .or_else(|| state.body.check(center, physics.bounds).err());
    }

    if let Some(reason) = report.reset {
        state.reset_body(reason);
        state.stats.consecutive_resets += 1;
    } else {
        state.stats.consecutive_resets = 0;
    }

    if report.collided {
        state.stats.collisions += 1;
        log::trace!(
            "Tick {}: collision, ball at {:?} vel {:?}",
            state.time_ticks,
            state.body.position,
            state.body.velocity
        );
    }

    report
}
