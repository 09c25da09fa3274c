//! Ball-ball collision detection and response
//!
//! Every unordered pair is tested once per tick, in registry order. Touching
//! balls of different sizes are pushed apart and exchange normal velocity;
//! touching balls of the same size are queued for merging instead.

use glam::Vec2;

use super::registry::BallRegistry;
use super::state::Ball;
use crate::config::PhysicsConfig;

/// Result of a pair overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the circles overlap
    pub hit: bool,
    /// Unit vector from `b` toward `a` (zero when centers coincide)
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Two same-size balls found touching, by id, in detection order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeCandidate {
    pub a: u32,
    pub b: u32,
}

/// Check whether two balls overlap (strictly closer than the sum of radii)
pub fn ball_ball_collision(a: &Ball, b: &Ball) -> CollisionResult {
    let delta = a.pos - b.pos;
    let distance = delta.length();
    let reach = a.radius() + b.radius();

    if distance >= reach {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        normal: if distance > 0.0 { delta / distance } else { Vec2::ZERO },
        penetration: reach - distance,
    }
}

/// Separate two overlapping balls and apply the equal-mass impulse.
///
/// Coincident centers have no usable normal and are left alone this tick.
/// Positions are always corrected 50/50; velocities only change when the balls
/// are approaching along the normal.
pub fn resolve_pair(
    a: &mut Ball,
    b: &mut Ball,
    contact: &CollisionResult,
    physics: &PhysicsConfig,
) {
    if !contact.hit || contact.normal == Vec2::ZERO {
        return;
    }
    let n = contact.normal;

    let push = n * contact.penetration * 0.5;
    a.pos += push;
    b.pos -= push;

    let dvn = (a.vel - b.vel).dot(n);
    if dvn > 0.0 {
        return;
    }

    // Equal unit masses: 2 * dvn / (1 + 1) swaps the normal components.
    let mut impulse = dvn;
    if physics.apply_ball_restitution {
        impulse *= (1.0 + physics.ball_restitution) * 0.5;
    }
    a.vel -= n * impulse;
    b.vel += n * impulse;
}

/// Test every pair once, resolving mixed-size contacts in place and returning
/// same-size contacts as merge candidates in detection order. Any contact
/// marks both balls as in play.
pub fn resolve_collisions(
    balls: &mut BallRegistry,
    physics: &PhysicsConfig,
) -> Vec<MergeCandidate> {
    let mut candidates = Vec::new();
    let count = balls.len();

    for i in 0..count {
        for j in (i + 1)..count {
            let (a, b) = balls.pair_mut(i, j);
            let contact = ball_ball_collision(a, b);
            if !contact.hit {
                continue;
            }
            a.in_play = true;
            b.in_play = true;

            if a.size_label == b.size_label {
                candidates.push(MergeCandidate { a: a.id, b: b.id });
            } else {
                resolve_pair(a, b, &contact, physics);
            }
        }
    }

    candidates
}
