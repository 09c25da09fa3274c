//! Read-only view handed to the presentation layer each frame
//!
//! Everything a renderer needs to draw a frame. Sprite, color and sound
//! choices are derived from `size_label` on the presentation side.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::Serialize;

use super::state::{Ball, GameEvent, GameOverReason, GamePhase, GameState};
use crate::radius_for_label;

/// Drawable state of one ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BallView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub size_label: u8,
    pub angle: f32,
}

impl From<&Ball> for BallView {
    fn from(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            pos: ball.pos,
            radius: ball.radius(),
            size_label: ball.size_label,
            angle: ball.angle,
        }
    }
}

/// Per-instance GPU data for one ball (center, radius, angle, label)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub angle: f32,
    pub size_label: u32,
    pub _pad: [u32; 3],
}

impl From<&BallView> for BallInstance {
    fn from(view: &BallView) -> Self {
        Self {
            center: view.pos.to_array(),
            radius: view.radius,
            angle: view.angle,
            size_label: u32::from(view.size_label),
            _pad: [0; 3],
        }
    }
}

/// Complete frame snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub balls: Vec<BallView>,
    pub score: u64,
    pub next_size_label: u8,
    /// Radius the next drop will have (for the preview circle)
    pub next_radius: f32,
    pub elapsed_time: f32,
    pub time_remaining: Option<f32>,
    pub phase: GamePhase,
    pub game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            balls: state.balls.iter().map(BallView::from).collect(),
            score: state.score,
            next_size_label: state.next_size_label,
            next_radius: radius_for_label(state.next_size_label),
            elapsed_time: state.elapsed_time,
            time_remaining: state.time_remaining(),
            phase: state.phase,
            game_over: state.is_game_over(),
            game_over_reason: state.game_over_reason,
            events: state.events.clone(),
        }
    }

    /// Instance buffer contents, ready for upload
    pub fn instances(&self) -> Vec<BallInstance> {
        self.balls.iter().map(BallInstance::from).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl GameState {
    /// Capture a read-only snapshot for drawing
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
