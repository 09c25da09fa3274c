//! Per-ball integration under gravity

use super::state::Ball;
use crate::config::PhysicsConfig;
use crate::normalize_angle;

/// Advance one ball by `dt` seconds: gravity into velocity, then velocity into
/// position, then spin into angle. Non-positive `dt` has no effect.
pub fn integrate(ball: &mut Ball, physics: &PhysicsConfig, dt: f32) {
    if !(dt > 0.0) {
        return;
    }
    ball.vel.y += physics.gravity * dt;
    ball.pos += ball.vel * dt;
    ball.angle = normalize_angle(ball.angle + ball.angular_vel * dt);
}
