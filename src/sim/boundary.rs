//! Wall and floor contact
//!
//! The playfield is an open-topped box: two vertical walls and a floor. There
//! is no ceiling; rising too high is handled by the overflow rule instead.

use super::state::Ball;
use crate::config::{PhysicsConfig, PlayfieldConfig};

/// Which boundaries a ball touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryContact {
    pub left_wall: bool,
    pub right_wall: bool,
    pub floor: bool,
}

impl BoundaryContact {
    pub fn any(&self) -> bool {
        self.left_wall || self.right_wall || self.floor
    }
}

/// Clamp an integrated ball back inside the playfield and apply the contact
/// response (restitution, floor friction, settling).
pub fn resolve_boundaries(
    ball: &mut Ball,
    playfield: &PlayfieldConfig,
    physics: &PhysicsConfig,
) -> BoundaryContact {
    let mut contact = BoundaryContact::default();
    let radius = ball.radius();
    let left = playfield.left_wall();
    let right = playfield.right_wall();
    let floor = playfield.floor();

    if ball.pos.x - radius <= left {
        ball.pos.x = left + radius;
        ball.vel.x = -ball.vel.x * physics.wall_restitution;
        ball.angular_vel = -ball.vel.x / radius;
        contact.left_wall = true;
    } else if ball.pos.x + radius >= right {
        ball.pos.x = right - radius;
        ball.vel.x = -ball.vel.x * physics.wall_restitution;
        ball.angular_vel = -ball.vel.x / radius;
        contact.right_wall = true;
    }

    if ball.pos.y + radius >= floor {
        ball.pos.y = floor - radius;
        ball.vel.y = -ball.vel.y * physics.floor_restitution;
        ball.vel.x *= physics.floor_friction;
        if ball.vel.y.abs() < physics.rest_vy_epsilon {
            ball.vel.y = 0.0;
        }
        if ball.vel.x.abs() < physics.rest_vx_epsilon {
            ball.vel.x = 0.0;
            ball.angular_vel = 0.0;
        }
        contact.floor = true;
    }

    contact
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn resolve(ball: &mut Ball) -> BoundaryContact {
        resolve_boundaries(ball, &PlayfieldConfig::default(), &PhysicsConfig::default())
    }

    #[test]
    fn test_free_ball_untouched() {
        let mut ball = Ball::new(1, 2, Vec2::new(450.0, 300.0));
        ball.vel = Vec2::new(10.0, 20.0);
        let before = ball.clone();
        assert!(!resolve(&mut ball).any());
        assert_eq!(ball, before);
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut ball = Ball::new(1, 2, Vec2::new(210.0, 300.0));
        ball.vel = Vec2::new(-100.0, 0.0);
        let contact = resolve(&mut ball);
        assert!(contact.left_wall);
        assert_eq!(ball.pos.x, 215.0);
        assert!((ball.vel.x - 80.0).abs() < 1e-4);
        assert!((ball.angular_vel + 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut ball = Ball::new(1, 1, Vec2::new(700.0, 300.0));
        ball.vel = Vec2::new(50.0, 0.0);
        let contact = resolve(&mut ball);
        assert!(contact.right_wall);
        assert_eq!(ball.pos.x, 695.0);
        assert!((ball.vel.x + 40.0).abs() < 1e-4);
        assert!((ball.angular_vel - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_floor_bounce_with_friction() {
        let mut ball = Ball::new(1, 1, Vec2::new(450.0, 545.0));
        ball.vel = Vec2::new(100.0, 500.0);
        let contact = resolve(&mut ball);
        assert!(contact.floor);
        assert_eq!(ball.pos.y, 540.0);
        assert!((ball.vel.y + 400.0).abs() < 1e-3);
        assert!((ball.vel.x - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_floor_settles_slow_ball() {
        let mut ball = Ball::new(1, 1, Vec2::new(450.0, 541.0));
        ball.vel = Vec2::new(4.0, 8.0);
        ball.angular_vel = 2.0;
        resolve(&mut ball);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.angular_vel, 0.0);
    }

    #[test]
    fn test_corner_hits_wall_and_floor() {
        let mut ball = Ball::new(1, 1, Vec2::new(190.0, 560.0));
        ball.vel = Vec2::new(-30.0, 300.0);
        let contact = resolve(&mut ball);
        assert!(contact.left_wall && contact.floor);
        assert_eq!(ball.pos, Vec2::new(205.0, 540.0));
    }
}
