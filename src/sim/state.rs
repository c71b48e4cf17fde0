//! Simulation state and ball kinematics
//!
//! [`SimState`] exclusively owns the enclosure, the ball and the random
//! source; they are only mutated inside [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enclosure::Enclosure;
use crate::consts::HEX_SIDES;
use crate::error::ConfigError;
use crate::settings::Settings;

/// Why the ball was put back at its start position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetReason {
    /// NaN or infinity in position or velocity
    NonFinite,
    /// Position left the bounded window around the enclosure center
    OutOfBounds,
    /// Contact point sat on the rotation center, so no wall tangent exists
    DegenerateContact,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Body {
    /// A ball at rest at `position`
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            radius,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Apply one tick of forces, drag and motion
    ///
    /// Friction is multiplicative. Speed is capped before the position moves.
    pub fn integrate(
        &mut self,
        external_force: Vec2,
        gravity: Vec2,
        friction: f32,
        max_speed: f32,
    ) {
        self.velocity += gravity + external_force;
        self.velocity *= friction;
        self.velocity = limit_speed(self.velocity, max_speed);
        self.position += self.velocity;
    }

    /// Hard reset: back to `start`, at rest
    pub fn reset_to(&mut self, start: Vec2) {
        self.position = start;
        self.velocity = Vec2::ZERO;
    }

    /// Finite state, inside the `bounds` half extents around `center`
    pub fn check(&self, center: Vec2, bounds: Vec2) -> Result<(), ResetReason> {
        if !self.position.is_finite() || !self.velocity.is_finite() {
            return Err(ResetReason::NonFinite);
        }
        let offset = (self.position - center).abs();
        if offset.x > bounds.x || offset.y > bounds.y {
            return Err(ResetReason::OutOfBounds);
        }
        Ok(())
    }
}

/// Rescale `velocity` down to `max_speed` if it is faster
///
/// The result's `length()` never exceeds `max_speed`, even by an ulp.
pub fn limit_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed = velocity.length();
    if speed > max_speed {
        let mut limited = velocity * (max_speed / speed);
        // Rescaling can round a couple of ulps over the cap
        while limited.length() > max_speed {
            limited *= 1.0 - f32::EPSILON;
        }
        limited
    } else {
        velocity
    }
}

/// Running counters for the shell's diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    /// Ticks that reported a collision
    pub collisions: u64,
    /// Total hard resets
    pub resets: u64,
    /// Resets in the ticks immediately preceding now (0 after a clean tick)
    pub consecutive_resets: u32,
}

/// Read-only drawing view of one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub vertices: [Vec2; HEX_SIDES],
    pub center: Vec2,
    pub circumradius: f32,
    pub rotation_speed: f32,
    pub ball_position: Vec2,
    pub ball_velocity: Vec2,
    pub ball_radius: f32,
}

/// Complete simulation state
///
/// Generic over the random source so tests can inject their own; the
/// default is a seeded PCG for reproducible runs.
#[derive(Debug, Clone)]
pub struct SimState<R = Pcg32> {
    pub(crate) settings: Settings,
    pub(crate) enclosure: Enclosure,
    pub(crate) body: Body,
    pub(crate) rng: R,
    /// Run seed, when the RNG was seeded by us
    seed: Option<u64>,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    pub(crate) stats: SimStats,
}

impl SimState<Pcg32> {
    /// Create a new simulation with a seeded RNG
    ///
    /// `settings` should already be validated; see [`SimState::try_new`].
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut state = Self::with_rng(settings, Pcg32::seed_from_u64(seed));
        state.seed = Some(seed);
        state
    }

    /// Validate `settings`, then create a seeded simulation
    pub fn try_new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self::new(settings, seed))
    }
}

impl<R: rand::Rng> SimState<R> {
    /// Create a new simulation driven by a caller-supplied random source
    pub fn with_rng(settings: Settings, rng: R) -> Self {
        debug_assert!(
            settings.validate().is_ok(),
            "invalid settings: {:?}",
            settings.validate()
        );
        let enclosure = Enclosure::new(&settings.enclosure);
        let body = Body::new(settings.spawn_point(), settings.physics.ball_radius);
        log::info!(
            "Simulation created: center={:?} radius={} initial speed={}",
            enclosure.center,
            enclosure.circumradius,
            enclosure.rotation_speed()
        );
        Self {
            settings,
            enclosure,
            body,
            rng,
            seed: None,
            time_ticks: 0,
            stats: SimStats::default(),
        }
    }

    /// Advance one tick; true if the ball hit a wall
    pub fn step(&mut self) -> bool {
        super::tick(self).collided
    }

    /// Advance `ticks` ticks; true if any of them had a collision
    pub fn step_n(&mut self, ticks: u32) -> bool {
        let mut collided = false;
        for _ in 0..ticks {
            collided |= self.step();
        }
        collided
    }

    /// Put the ball back at its start position, at rest
    pub fn reset_body(&mut self, reason: ResetReason) {
        log::warn!(
            "Ball reset ({:?}) at tick {}: pos={:?} vel={:?}",
            reason,
            self.time_ticks,
            self.body.position,
            self.body.velocity
        );
        self.body.reset_to(self.settings.spawn_point());
        self.stats.resets += 1;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn enclosure(&self) -> &Enclosure {
        &self.enclosure
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Direct access to the ball, for shells that place or kick it
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Snapshot of everything the shell needs to draw
    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.time_ticks,
            vertices: self.enclosure.vertices(),
            center: self.enclosure.center,
            circumradius: self.enclosure.circumradius,
            rotation_speed: self.enclosure.rotation_speed(),
            ball_position: self.body.position,
            ball_velocity: self.body.velocity,
            ball_radius: self.body.radius,
        }
    }
}
