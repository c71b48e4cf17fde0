//! Simulation settings
//!
//! Passed into [`crate::SimState`] at construction; there is no global
//! configuration. Loadable from JSON, every field optional.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Ball physics tuning (all rates are per tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Constant acceleration added to the ball velocity each tick
    pub gravity: Vec2,
    /// Fraction of the wall-relative speed kept after a bounce (0-1)
    pub elasticity: f32,
    /// Per-tick velocity multiplier (0-1, typically just under 1)
    pub friction: f32,
    /// Hard cap on ball speed
    pub max_speed: f32,
    /// Minimum distance between ball center and a wall before a corrective push
    pub collision_buffer: f32,
    /// Scale of the rotating-frame pull toward the center
    pub centripetal_scale: f32,
    /// Ball radius (for drawing)
    pub ball_radius: f32,
    /// Reset position relative to the enclosure center
    pub spawn_offset: Vec2,
    /// Half extents of the window the ball must stay in, around the center
    pub bounds: Vec2,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, GRAVITY_Y),
            elasticity: ELASTICITY,
            friction: FRICTION,
            max_speed: MAX_BALL_SPEED,
            collision_buffer: COLLISION_BUFFER,
            centripetal_scale: CENTRIPETAL_SCALE,
            ball_radius: BALL_RADIUS,
            spawn_offset: Vec2::new(0.0, SPAWN_OFFSET_Y),
            bounds: Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0),
        }
    }
}

/// Enclosure geometry and rotation schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnclosureSettings {
    pub center: Vec2,
    /// Distance from center to each vertex
    pub circumradius: f32,
    /// Slowest allowed rotation (degrees/tick)
    pub min_speed: f32,
    /// Fastest allowed rotation (degrees/tick)
    pub max_speed: f32,
    /// Signed starting rotation speed
    pub initial_speed: f32,
    /// Smoothing coefficient toward the target speed, in (0, 1)
    pub acceleration: f32,
    /// Ticks between target speed draws
    pub retarget_interval: u32,
}

impl Default for EnclosureSettings {
    fn default() -> Self {
        Self {
            center: Vec2::new(WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0),
            circumradius: HEX_RADIUS,
            min_speed: MIN_ROTATION_SPEED,
            max_speed: MAX_ROTATION_SPEED,
            initial_speed: INITIAL_ROTATION_SPEED,
            acceleration: ROTATION_ACCELERATION,
            retarget_interval: RETARGET_INTERVAL,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: PhysicsSettings,
    pub enclosure: EnclosureSettings,
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::debug!("Parsed settings: {:?}", settings);
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.physics;
        let e = &self.enclosure;

        finite_vec("physics.gravity", p.gravity)?;
        finite_vec("physics.spawn_offset", p.spawn_offset)?;
        finite_vec("enclosure.center", e.center)?;
        unit_interval("physics.elasticity", p.elasticity)?;
        unit_interval("physics.friction", p.friction)?;
        positive("physics.max_speed", p.max_speed)?;
        positive("physics.collision_buffer", p.collision_buffer)?;
        positive("physics.ball_radius", p.ball_radius)?;
        positive("enclosure.circumradius", e.circumradius)?;
        positive("enclosure.min_speed", e.min_speed)?;

        if !p.centripetal_scale.is_finite() || p.centripetal_scale < 0.0 {
            return Err(ConfigError::invalid(
                "physics.centripetal_scale",
                "must be a non-negative number",
            ));
        }
        if !(p.bounds.x > 0.0 && p.bounds.y > 0.0) || !p.bounds.is_finite() {
            return Err(ConfigError::invalid(
                "physics.bounds",
                "half extents must be positive",
            ));
        }
        if !e.max_speed.is_finite() || e.max_speed < e.min_speed {
            return Err(ConfigError::invalid(
                "enclosure.max_speed",
                format!("must be at least min_speed ({})", e.min_speed),
            ));
        }
        let initial = e.initial_speed.abs();
        if !(e.min_speed..=e.max_speed).contains(&initial) {
            return Err(ConfigError::invalid(
                "enclosure.initial_speed",
                format!(
                    "magnitude must be within [{}, {}], got {}",
                    e.min_speed, e.max_speed, e.initial_speed
                ),
            ));
        }
        if !(e.acceleration > 0.0 && e.acceleration < 1.0) {
            return Err(ConfigError::invalid(
                "enclosure.acceleration",
                "must be within (0, 1)",
            ));
        }
        if e.retarget_interval == 0 {
            return Err(ConfigError::invalid(
                "enclosure.retarget_interval",
                "must be at least one tick",
            ));
        }
        Ok(())
    }

    /// Canonical ball start position
    pub fn spawn_point(&self) -> Vec2 {
        self.enclosure.center + self.physics.spawn_offset
    }
}

fn finite_vec(field: &'static str, v: Vec2) -> Result<(), ConfigError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be finite"))
    }
}

fn unit_interval(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be within [0, 1]"))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, "must be positive"))
    }
}
