//! Hex Bounce - a ball bouncing inside a rotating hexagon
//!
//! Core modules:
//! - `sim`: Deterministic simulation (enclosure rotation, ball kinematics, collisions)
//! - `settings`: Explicit simulation configuration
//! - `error`: Configuration errors
//!
//! Rendering, windowing and color effects live outside this crate. The shell
//! reads [`sim::Frame`] for drawing and reacts to the collision flag returned
//! by [`sim::SimState::step`].

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{EnclosureSettings, PhysicsSettings, Settings};
pub use sim::{SimState, tick};

use glam::Vec2;

/// Default simulation constants
pub mod consts {
    /// Reference window; the enclosure sits at its center
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Enclosure
    pub const HEX_RADIUS: f32 = 200.0;
    pub const HEX_SIDES: usize = 6;
    /// Degrees between adjacent vertices
    pub const HEX_VERTEX_STEP: f32 = 360.0 / HEX_SIDES as f32;
    pub const HEX_BORDER_WIDTH: f32 = 4.0;

    /// Rotation schedule (degrees per tick)
    pub const MIN_ROTATION_SPEED: f32 = 0.5;
    pub const MAX_ROTATION_SPEED: f32 = 5.0;
    pub const INITIAL_ROTATION_SPEED: f32 = 2.0;
    /// Smoothing coefficient toward the target speed
    pub const ROTATION_ACCELERATION: f32 = 0.1;
    /// Ticks between target speed draws
    pub const RETARGET_INTERVAL: u32 = 60;

    /// Ball
    pub const BALL_RADIUS: f32 = 10.0;
    /// Maximum ball speed (pixels per tick)
    pub const MAX_BALL_SPEED: f32 = 20.0;
    /// Minimum distance kept between the ball center and a wall
    pub const COLLISION_BUFFER: f32 = 14.0;
    /// Start position relative to the enclosure center
    pub const SPAWN_OFFSET_Y: f32 = -50.0;

    /// Physics (per tick)
    pub const GRAVITY_Y: f32 = 0.5;
    pub const ELASTICITY: f32 = 0.8;
    pub const FRICTION: f32 = 0.99;
    /// Visual scaling of the rotating-frame pull
    pub const CENTRIPETAL_SCALE: f32 = 0.1;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Convert polar (r, theta in degrees) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta_deg: f32) -> Vec2 {
    let theta = theta_deg.to_radians();
    Vec2::new(r * theta.cos(), r * theta.sin())
}
