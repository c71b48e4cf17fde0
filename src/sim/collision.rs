//! Collision detection and response against the rotating walls
//!
//! The tricky part of the simulation: the walls move. A wall point at
//! radius-vector `r` travels tangentially at `ω·|r|`, so the ball is bounced
//! in the wall's frame of reference and then carried back out of it.

use glam::Vec2;

use super::enclosure::Enclosure;
use super::geometry::{nearest_edge, point_in_polygon, reflect};
use super::state::{ResetReason, limit_speed};
use crate::settings::PhysicsSettings;

/// Outcome of resolving one tentative ball state against the walls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Whether the ball was outside the walls and got bounced
    pub collided: bool,
    /// Set when the state could not be resolved and was reset instead
    pub reset: Option<ResetReason>,
}

impl Resolution {
    /// No contact: the inputs pass through untouched
    pub fn free(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            collided: false,
            reset: None,
        }
    }

    /// Canonical start state, at rest
    pub fn reset(start: Vec2, reason: ResetReason) -> Self {
        Self {
            position: start,
            velocity: Vec2::ZERO,
            collided: false,
            reset: Some(reason),
        }
    }
}

/// Fictitious inward pull from the rotating frame
///
/// Magnitude `ω²·r·scale` with `ω = radians(|rotation_speed|)`, pointing
/// from `position` toward `center`. Zero at the center itself.
pub fn centripetal_force(position: Vec2, center: Vec2, rotation_speed: f32, scale: f32) -> Vec2 {
    let r = position - center;
    let r_length = r.length();
    if r_length == 0.0 {
        return Vec2::ZERO;
    }

    let angular_velocity = rotation_speed.abs().to_radians();
    let centripetal_acc = angular_velocity * angular_velocity * r_length;
    -(r / r_length) * centripetal_acc * scale
}

/// Bounce a tentative ball state off the enclosure walls
///
/// Points strictly inside the hexagon pass through unchanged. Otherwise the
/// nearest edge is the contact: the velocity is reflected relative to the
/// moving wall (only when heading into it), scaled by elasticity, re-capped,
/// and the position is pushed back inside to `collision_buffer` from the wall.
pub fn resolve(
    position: Vec2,
    velocity: Vec2,
    enclosure: &Enclosure,
    physics: &PhysicsSettings,
) -> Resolution {
    let start = enclosure.center + physics.spawn_offset;

    if !position.is_finite() || !velocity.is_finite() {
        return Resolution::reset(start, ResetReason::NonFinite);
    }

    let vertices = enclosure.vertices();
    if point_in_polygon(position, &vertices) {
        return Resolution::free(position, velocity);
    }

    let Some(contact) = nearest_edge(position, &vertices) else {
        return Resolution::free(position, velocity);
    };

    let Some(wall_velocity) = enclosure.wall_velocity_at(contact.point) else {
        return Resolution::reset(start, ResetReason::DegenerateContact);
    };

    // Bounce in the wall's frame. A ball already moving away keeps its velocity.
    let rel_velocity = velocity - wall_velocity;
    let new_velocity = if rel_velocity.dot(contact.normal) < 0.0 {
        wall_velocity + reflect(rel_velocity, contact.normal) * physics.elasticity
    } else {
        velocity
    };
    let new_velocity = limit_speed(new_velocity, physics.max_speed);

    // Signed: negative when the ball is past the wall
    let separation = (position - contact.point).dot(contact.normal);
    let push = physics.collision_buffer - separation;
    let new_position = if push > 0.0 {
        position + contact.normal * push
    } else {
        position
    };

    log::debug!(
        "Wall hit on edge {}: depth={:.2} vel {:?} -> {:?}",
        contact.edge,
        -separation,
        velocity,
        new_velocity
    );

    Resolution {
        position: new_position,
        velocity: new_velocity,
        collided: true,
        reset: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{EnclosureSettings, Settings};

    fn setup() -> (Enclosure, PhysicsSettings) {
        let settings = Settings::default();
        (Enclosure::new(&settings.enclosure), settings.physics)
    }

    #[test]
    fn test_centripetal_points_to_center() {
        let center = Vec2::new(400.0, 300.0);
        let force = centripetal_force(Vec2::new(500.0, 300.0), center, 2.0, 0.1);

        let omega = 2.0_f32.to_radians();
        let expected = omega * omega * 100.0 * 0.1;
        assert!((force.length() - expected).abs() < 1e-6);
        assert!(force.x < 0.0);
        assert_eq!(force.y, 0.0);
    }

    #[test]
    fn test_centripetal_ignores_direction_of_rotation() {
        let center = Vec2::new(400.0, 300.0);
        let p = Vec2::new(430.0, 260.0);
        assert_eq!(
            centripetal_force(p, center, 3.0, 0.1),
            centripetal_force(p, center, -3.0, 0.1)
        );
    }

    #[test]
    fn test_centripetal_zero_at_center() {
        let center = Vec2::new(400.0, 300.0);
        assert_eq!(centripetal_force(center, center, 4.0, 0.1), Vec2::ZERO);
    }

    #[test]
    fn test_inside_is_untouched() {
        let (hex, physics) = setup();
        let pos = Vec2::new(420.0, 310.0);
        let vel = Vec2::new(3.0, -2.0);

        let res = resolve(pos, vel, &hex, &physics);
        assert_eq!(res, Resolution::free(pos, vel));
    }

    #[test]
    fn test_nan_resets_to_start() {
        let (hex, physics) = setup();

        let res = resolve(Vec2::new(f32::NAN, 300.0), Vec2::new(1.0, 1.0), &hex, &physics);
        assert_eq!(res.position, Vec2::new(400.0, 250.0));
        assert_eq!(res.velocity, Vec2::ZERO);
        assert!(!res.collided);
        assert_eq!(res.reset, Some(ResetReason::NonFinite));

        let res = resolve(Vec2::new(400.0, 300.0), Vec2::new(0.0, f32::NAN), &hex, &physics);
        assert_eq!(res.position, Vec2::new(400.0, 250.0));
        assert_eq!(res.velocity, Vec2::ZERO);
        assert!(!res.collided);
    }

    #[test]
    fn test_bounce_off_bottom_edge() {
        let (hex, physics) = setup();
        // Bottom edge at y ≈ 473.2; ball just past it, falling
        let pos = Vec2::new(400.0, 475.0);
        let vel = Vec2::new(0.0, 10.0);

        let res = resolve(pos, vel, &hex, &physics);
        assert!(res.collided);
        assert!(res.velocity.y < 0.0, "ball should bounce up: {:?}", res.velocity);
        // Wall at the contact moves sideways (ω·r ≈ 6.05), so the bounce picks
        // up horizontal speed, and vertical speed is damped by elasticity
        assert!((res.velocity.y + 8.0).abs() < 0.05);
        assert!(res.velocity.x.abs() > 1.0);
        // Pushed back inside, collision_buffer above the wall
        assert!((res.position.y - (473.205 - 14.0)).abs() < 0.01);
        assert!(res.velocity.length() <= physics.max_speed);
    }

    #[test]
    fn test_wall_motion_drags_ball_along() {
        let settings = Settings::default();
        let mut ccw = settings.enclosure.clone();
        ccw.initial_speed = 4.0;
        let mut cw = settings.enclosure.clone();
        cw.initial_speed = -4.0;

        let pos = Vec2::new(400.0, 475.0);
        let vel = Vec2::new(0.0, 6.0);
        let a = resolve(pos, vel, &Enclosure::new(&ccw), &settings.physics);
        let b = resolve(pos, vel, &Enclosure::new(&cw), &settings.physics);

        assert!(a.collided && b.collided);
        // Opposite spin, opposite tangential kick
        assert!(a.velocity.x * b.velocity.x < 0.0);
        assert!((a.velocity.x + b.velocity.x).abs() < 1e-3);
    }

    #[test]
    fn test_separating_ball_is_not_reflected() {
        let (hex, physics) = setup();
        // Outside the bottom edge but already moving up fast
        let pos = Vec2::new(400.0, 476.0);
        let vel = Vec2::new(0.0, -15.0);

        let res = resolve(pos, vel, &hex, &physics);
        assert!(res.collided);
        assert_eq!(res.velocity, vel);
        assert!(res.position.y < 473.0);
    }

    #[test]
    fn test_deep_escape_is_pulled_back_inside() {
        let (hex, physics) = setup();
        let pos = Vec2::new(400.0, 520.0);
        let vel = Vec2::new(0.0, 12.0);

        let res = resolve(pos, vel, &hex, &physics);
        assert!(res.collided);
        assert!(point_in_polygon(res.position, &hex.vertices()));
    }

    #[test]
    fn test_elasticity_zero_sticks_to_wall_frame() {
        let settings = Settings::default();
        let mut physics = settings.physics.clone();
        physics.elasticity = 0.0;
        let hex = Enclosure::new(&EnclosureSettings::default());

        let pos = Vec2::new(400.0, 475.0);
        let res = resolve(pos, Vec2::new(0.0, 10.0), &hex, &physics);
        let contact = nearest_edge(pos, &hex.vertices()).unwrap();
        let wall = hex.wall_velocity_at(contact.point).unwrap();
        assert!((res.velocity - wall).length() < 1e-4);
    }

    #[test]
    fn test_collapsed_enclosure_resets() {
        let settings = Settings::default();
        let mut collapsed = settings.enclosure.clone();
        collapsed.circumradius = 0.0;
        let hex = Enclosure::new(&collapsed);

        // Every edge is the center point, so the contact has no wall tangent
        let res = resolve(Vec2::new(410.0, 300.0), Vec2::new(1.0, 2.0), &hex, &settings.physics);
        assert_eq!(res.reset, Some(ResetReason::DegenerateContact));
        assert_eq!(res.position, Vec2::new(400.0, 250.0));
        assert_eq!(res.velocity, Vec2::ZERO);
        assert!(!res.collided);
    }

    #[test]
    fn test_reflection_is_speed_capped() {
        let (hex, mut physics) = setup();
        physics.max_speed = 5.0;
        let res = resolve(Vec2::new(400.0, 475.0), Vec2::new(0.0, 30.0), &hex, &physics);
        assert!(res.velocity.length() <= 5.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn interior_points_pass_through(
                r in 0.0f32..150.0,
                theta in 0.0f32..360.0,
                vx in -20.0f32..20.0,
                vy in -20.0f32..20.0,
                speed in 0.5f32..5.0,
            ) {
                let settings = Settings::default();
                let mut enclosure = settings.enclosure.clone();
                enclosure.initial_speed = speed;
                let hex = Enclosure::new(&enclosure);

                // Inradius is 200·cos(30°) ≈ 173, so r < 150 is strictly inside
                let pos = hex.center + crate::polar_to_cartesian(r, theta);
                let vel = Vec2::new(vx, vy);
                let res = resolve(pos, vel, &hex, &settings.physics);
                prop_assert_eq!(res, Resolution::free(pos, vel));
            }

            #[test]
            fn outside_points_come_back_capped(
                r in 205.0f32..260.0,
                theta in 0.0f32..360.0,
                vx in -20.0f32..20.0,
                vy in -20.0f32..20.0,
            ) {
                let settings = Settings::default();
                let hex = Enclosure::new(&settings.enclosure);
                let pos = hex.center + crate::polar_to_cartesian(r, theta);

                let res = resolve(pos, Vec2::new(vx, vy), &hex, &settings.physics);
                prop_assert!(res.collided);
                prop_assert!(res.velocity.length() <= settings.physics.max_speed);
                // One pass pushes off a single edge; near a vertex the second
                // pass in the tick finishes the job
                prop_assert!((res.position - hex.center).length() < r);
            }
        }
    }
}
