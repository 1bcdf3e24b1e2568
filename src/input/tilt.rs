//! Tilt-to-rotation physics.
//!
//! Converts the latest device tilt (or mouse-equivalent) sample into a
//! continuously evolving yaw angle through a friction-damped velocity
//! integrator. The controller runs once per rendered frame regardless of
//! how fast input samples arrive; only the most recent sample matters.

use crate::config::SceneConfig;

/// Damped-spring rotation accumulator
#[derive(Debug, Clone)]
pub struct TiltController {
    /// Accumulated yaw in radians, unbounded
    angle: f32,
    /// Radians per frame, clamped to `max_velocity`
    velocity: f32,
    friction: f32,
    accel_factor: f32,
    max_velocity: f32,
}

impl TiltController {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            angle: 0.0,
            velocity: 0.0,
            friction: config.friction,
            accel_factor: config.accel_factor,
            max_velocity: config.max_velocity,
        }
    }

    /// Advance one frame with the current tilt sample (degrees, already
    /// clamped by the caller) and return the new angle.
    ///
    /// Friction strictly below 1 keeps the velocity bounded and decaying
    /// smoothly to rest once input stops; the clamp makes the bound hard.
    pub fn update(&mut self, tilt: f32) -> f32 {
        let accel = tilt * self.accel_factor;
        self.velocity = (self.velocity * self.friction + accel)
            .clamp(-self.max_velocity, self.max_velocity);
        self.angle += self.velocity;
        self.angle
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }
}
