//! Fixed timestep simulation tick
//!
//! One call advances the session by one frame: integrate, bound, collide,
//! merge, then re-check the game-over rules.

use glam::Vec2;

use super::boundary::resolve_boundaries;
use super::collision::resolve_collisions;
use super::kinematics::integrate;
use super::merge::apply_merges;
use super::state::{GameEvent, GameOverReason, GamePhase, GameState};
use crate::error::SpawnRejection;
use crate::radius_for_label;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Drop the next ball at this point (click/tap)
    pub spawn: Option<Vec2>,
    /// Start a new run
    pub reset: bool,
}

/// Try to drop the next ball at `pos`.
///
/// Accepted only while playing, inside the spawn strip, and clear of every
/// existing ball. On success the next label is re-rolled. On rejection the
/// state is untouched.
pub fn attempt_spawn(state: &mut GameState, pos: Vec2) -> Result<u32, SpawnRejection> {
    if state.phase == GamePhase::GameOver {
        return Err(SpawnRejection::GameOver);
    }

    let rules = &state.config.rules;
    let in_strip = pos.y >= rules.spawn_strip_top
        && pos.y < rules.spawn_strip_bottom
        && pos.x >= 0.0
        && pos.x <= state.config.playfield.width;
    if !in_strip {
        log::trace!("Drop at {:?} rejected: outside spawn strip", pos);
        return Err(SpawnRejection::OutsideSpawnStrip);
    }

    let size_label = state.next_size_label;
    if let Some(ball) = state.balls.find_overlapping(pos, radius_for_label(size_label)) {
        log::trace!("Drop at {:?} rejected: overlaps ball {}", pos, ball.id);
        return Err(SpawnRejection::Overlapping { ball_id: ball.id });
    }

    let id = state.balls.insert(size_label, pos);
    state.roll_next_size_label();
    state.events.push(GameEvent::Spawned { id, size_label, pos });
    log::debug!(
        "Dropped ball {} (label {}) at {:?}, next label {}",
        id,
        size_label,
        pos,
        state.next_size_label
    );
    Ok(id)
}

/// Advance the game state by one timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.reset {
        state.reset();
    }

    // Nothing moves once the run has ended
    if state.phase == GamePhase::GameOver {
        if let Some(pos) = input.spawn {
            state.events.push(GameEvent::SpawnRejected {
                pos,
                reason: SpawnRejection::GameOver,
            });
        }
        return;
    }

    if !(dt > 0.0) || !dt.is_finite() {
        log::warn!("Ignoring tick with invalid dt {}", dt);
        return;
    }

    if let Some(pos) = input.spawn
        && let Err(reason) = attempt_spawn(state, pos)
    {
        state.events.push(GameEvent::SpawnRejected { pos, reason });
    }

    state.time_ticks += 1;
    state.elapsed_time += dt;

    let config = state.config;
    for ball in state.balls.iter_mut() {
        integrate(ball, &config.physics, dt);
        let contact = resolve_boundaries(ball, &config.playfield, &config.physics);
        if contact.floor {
            ball.in_play = true;
        }
    }

    let candidates = resolve_collisions(&mut state.balls, &config.physics);
    apply_merges(state, &candidates);

    check_game_over(state);
}

/// Evaluate the overflow and time-limit rules
fn check_game_over(state: &mut GameState) {
    let line = state.config.rules.overflow_line;

    let mut overflowed = None;
    for ball in state.balls.iter_mut() {
        let above_line = ball.top() < line;
        if !ball.in_play {
            // A fresh drop starts inside the strip; it only counts once it
            // lands on something or falls fully below the line.
            ball.in_play = !above_line;
        } else if above_line && overflowed.is_none() {
            overflowed = Some(ball.id);
        }
    }

    if let Some(ball_id) = overflowed {
        state.end_game(GameOverReason::Overflow { ball_id });
        return;
    }

    if let Some(limit) = state.config.rules.time_limit
        && state.elapsed_time >= limit
    {
        state.end_game(GameOverReason::TimeUp);
    }
}
