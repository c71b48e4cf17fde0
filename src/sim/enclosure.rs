//! Rotating hexagonal enclosure
//!
//! The enclosure spins about a fixed center. Its speed is smoothed toward a
//! target that is redrawn every `retarget_interval` ticks. Vertices are
//! derived from the current angle on demand and never stored.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry;
use crate::consts::{HEX_SIDES, HEX_VERTEX_STEP};
use crate::settings::EnclosureSettings;
use crate::{polar_to_cartesian, wrap_degrees};

/// The rotating hexagon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    /// Fixed rotation center
    pub center: Vec2,
    /// Distance from center to each vertex
    pub circumradius: f32,
    /// Current rotation offset (degrees, [0, 360))
    angle: f32,
    /// Current angular rate (degrees/tick, signed)
    rotation_speed: f32,
    /// Rate `rotation_speed` is being smoothed toward
    target_rotation_speed: f32,
    ticks_since_retarget: u32,
}

impl Enclosure {
    /// Create an enclosure at angle zero, spinning at the initial speed
    pub fn new(settings: &EnclosureSettings) -> Self {
        Self {
            center: settings.center,
            circumradius: settings.circumradius,
            angle: 0.0,
            rotation_speed: settings.initial_speed,
            target_rotation_speed: settings.initial_speed,
            ticks_since_retarget: 0,
        }
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    #[inline]
    pub fn target_rotation_speed(&self) -> f32 {
        self.target_rotation_speed
    }

    /// Signed angular velocity in radians per tick
    #[inline]
    pub fn angular_velocity(&self) -> f32 {
        self.rotation_speed.to_radians()
    }

    /// Advance one tick: maybe retarget, smooth the speed, rotate
    pub fn advance<R: Rng>(&mut self, settings: &EnclosureSettings, rng: &mut R) {
        self.ticks_since_retarget += 1;
        if self.ticks_since_retarget >= settings.retarget_interval {
            self.ticks_since_retarget = 0;
            self.target_rotation_speed = draw_target_speed(settings, rng);
            log::debug!(
                "Enclosure retarget: {:.3} -> {:.3} deg/tick",
                self.rotation_speed,
                self.target_rotation_speed
            );
        }

        self.rotation_speed = smooth_speed(
            self.rotation_speed,
            self.target_rotation_speed,
            settings.acceleration,
            settings.min_speed,
            settings.max_speed,
        );
        self.angle = wrap_degrees(self.angle + self.rotation_speed);
    }

    /// Current vertex positions, ordered by increasing angle
    pub fn vertices(&self) -> [Vec2; HEX_SIDES] {
        std::array::from_fn(|i| {
            self.center
                + polar_to_cartesian(self.circumradius, self.angle + i as f32 * HEX_VERTEX_STEP)
        })
    }

    /// Velocity of the rigidly rotating wall at `point`
    ///
    /// Tangential, with magnitude `ω·|r|` and the rotation's direction.
    /// `None` at the center, where the tangent is undefined.
    pub fn wall_velocity_at(&self, point: Vec2) -> Option<Vec2> {
        let radius_vec = point - self.center;
        let r = radius_vec.length();
        if r == 0.0 {
            return None;
        }
        let tangent = geometry::perp(radius_vec) / r;
        Some(tangent * self.angular_velocity() * r)
    }
}

/// Draw a new signed target speed: uniform magnitude, uniform direction
fn draw_target_speed<R: Rng>(settings: &EnclosureSettings, rng: &mut R) -> f32 {
    let magnitude = rng.random_range(settings.min_speed..=settings.max_speed);
    let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    magnitude * direction
}

/// Exponential smoothing that never lands in the (-min, min) dead band
///
/// Crossing zero toward a target of the opposite sign jumps straight to
/// `min` with the target's sign.
fn smooth_speed(current: f32, target: f32, acceleration: f32, min: f32, max: f32) -> f32 {
    let next = current + (target - current) * acceleration;
    let next = if next.abs() < min {
        min.copysign(target)
    } else {
        next
    };
    next.clamp(-max, max)
}
