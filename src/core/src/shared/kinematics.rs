use crate::{PlaybookError, PlaybookResult};
use std::f32::consts::FRAC_PI_4;

/// Initial velocity from `FV² = IV² + 2·a·d`, i.e. `IV = sqrt(FV² - 2·a·d)`.
pub fn get_initial_velocity(
    final_velocity: f32,
    acceleration: f32,
    distance: f32,
) -> PlaybookResult<f32> {
    let discriminant = final_velocity.powi(2) - 2.0 * acceleration * distance;
    if discriminant < 0.0 {
        return Err(PlaybookError::NegativeDiscriminant {
            discriminant,
            final_velocity,
            acceleration,
            distance,
        });
    }

    Ok(discriminant.sqrt())
}

/// `FV = IV + a·t`
#[inline]
pub fn get_final_velocity(initial_velocity: f32, acceleration: f32, time: f32) -> f32 {
    initial_velocity + acceleration * time
}

/// Furthest flat-ground distance reachable at `speed`, `v²/g`.
#[inline]
pub fn calc_range(speed: f32, gravity: f32) -> f32 {
    speed.powi(2) / gravity
}

/// Lowest launch angle that lands a projectile `distance` away, from
/// `sin(2θ) = d·g / v²`. Out-of-range targets get the 45° maximum-range angle.
pub fn calc_min_launch_angle(distance: f32, speed: f32, gravity: f32) -> f32 {
    if speed <= 0.0 || distance > calc_range(speed, gravity) {
        return FRAC_PI_4;
    }

    let ratio = (distance * gravity / speed.powi(2)).clamp(0.0, 1.0);

    0.5 * ratio.asin()
}

/// `h(t) = h0 + v_y·t - ½·g·t²`
#[inline]
pub fn calc_height(initial_height: f32, vertical_velocity: f32, time: f32, gravity: f32) -> f32 {
    initial_height + vertical_velocity * time - 0.5 * gravity * time.powi(2)
}

/// Positive root of `calc_height(..) = 0`.
pub fn calc_landing_time(initial_height: f32, vertical_velocity: f32, gravity: f32) -> f32 {
    let discriminant = vertical_velocity.powi(2) + 2.0 * gravity * initial_height;

    (vertical_velocity + discriminant.max(0.0).sqrt()) / gravity
}
