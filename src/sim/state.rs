//! Game state and core simulation types
//!
//! All session state lives in one `GameState` owned by the caller and passed
//! by reference into every simulation step.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::registry::BallRegistry;
use crate::config::GameConfig;
use crate::error::{ConfigError, SpawnRejection};
use crate::radius_for_label;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; only a reset leaves this phase
    GameOver,
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Elapsed time reached the configured limit
    TimeUp,
    /// A ball's top edge rose above the overflow line
    Overflow { ball_id: u32 },
}

/// Something the presentation layer may want to react to (sounds, effects)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A user drop was accepted
    Spawned { id: u32, size_label: u8, pos: Vec2 },
    /// Two balls merged into a larger one
    Merged { consumed: (u32, u32), id: u32, size_label: u8, pos: Vec2 },
    /// Two max-size balls merged away
    Cleared { consumed: (u32, u32), pos: Vec2 },
    /// A drop request from `TickInput` was refused
    SpawnRejected { pos: Vec2, reason: SpawnRejection },
    GameOver { reason: GameOverReason },
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Size rank in 1..=MAX_SIZE_LABEL; radius is derived from it
    pub size_label: u8,
    /// Cosmetic rotation (radians)
    pub angle: f32,
    pub angular_vel: f32,
    /// Counts for the overflow check: has touched the floor or another ball,
    /// or has dropped below the overflow line
    pub in_play: bool,
}

impl Ball {
    /// New ball at rest
    pub fn new(id: u32, size_label: u8, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size_label,
            angle: 0.0,
            angular_vel: 0.0,
            in_play: false,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        radius_for_label(self.size_label)
    }

    /// y coordinate of the ball's top edge
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius()
    }

    /// Whether the ball's circle overlaps a circle at `pos` with `radius`
    #[inline]
    pub fn overlaps_circle(&self, pos: Vec2, radius: f32) -> bool {
        self.pos.distance(pos) < self.radius() + radius
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Engine tuning, validated and fixed for the session
    pub(crate) config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// All live balls
    pub balls: BallRegistry,
    /// Score (never decreases within a run)
    pub score: u64,
    /// Label of the next user drop
    pub next_size_label: u8,
    /// Seconds of play since the last reset
    pub elapsed_time: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub game_over_reason: Option<GameOverReason>,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given config and seed.
    /// Fails if the config does not pass `GameConfig::validate`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config, seed))
    }

    /// Default config with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_valid_config(GameConfig::default(), seed)
    }

    fn from_valid_config(config: GameConfig, seed: u64) -> Self {
        Self {
            next_size_label: config.rules.initial_drop_label,
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            balls: BallRegistry::new(),
            score: 0,
            elapsed_time: 0.0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            game_over_reason: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Seconds left before the time limit (None when unbounded)
    pub fn time_remaining(&self) -> Option<f32> {
        self.config
            .rules
            .time_limit
            .map(|limit| (limit - self.elapsed_time).max(0.0))
    }

    /// Start a fresh run: empty playfield, zero score, back to `Playing`.
    /// The RNG keeps its stream so consecutive runs differ.
    pub fn reset(&mut self) {
        self.balls.clear();
        self.score = 0;
        self.next_size_label = self.config.rules.initial_drop_label;
        self.elapsed_time = 0.0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.game_over_reason = None;
        self.events.clear();
        log::info!("Game reset");
    }

    /// Draw the next drop label uniformly from 1..=max_drop_label
    pub(crate) fn roll_next_size_label(&mut self) -> u8 {
        self.next_size_label = self.rng.random_range(1..=self.config.rules.max_drop_label);
        self.next_size_label
    }

    /// One-way transition into `GameOver`
    pub(crate) fn end_game(&mut self, reason: GameOverReason) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
        self.events.push(GameEvent::GameOver { reason });
        log::info!(
            "Game over ({:?}) after {:.1}s with score {}",
            reason,
            self.elapsed_time,
            self.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_radius_follows_label() {
        let ball = Ball::new(1, 3, Vec2::new(400.0, 300.0));
        assert_eq!(ball.radius(), 30.0);
        assert_eq!(ball.top(), 270.0);
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_overlap_is_strict() {
        let ball = Ball::new(1, 1, Vec2::new(400.0, 300.0));
        assert!(ball.overlaps_circle(Vec2::new(419.0, 300.0), 10.0));
        assert!(!ball.overlaps_circle(Vec2::new(420.0, 300.0), 10.0));
    }

    #[test]
    fn test_new_state() {
        let state = GameState::with_seed(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.next_size_label, 1);
        assert!(state.balls.is_empty());
        assert_eq!(state.time_remaining(), Some(1000.0));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.rules.max_drop_label = 0;
        assert!(matches!(GameState::new(config, 1), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.rules.initial_drop_label = 0;
        assert!(GameState::new(config, 1).is_err());

        let state = GameState::new(GameConfig::default(), 1).unwrap();
        assert_eq!(state.config(), &GameConfig::default());
    }

    #[test]
    fn test_roll_stays_in_range() {
        let mut state = GameState::with_seed(42);
        for _ in 0..200 {
            let label = state.roll_next_size_label();
            assert!((1..=5).contains(&label));
        }
    }

    #[test]
    fn test_end_game_is_one_way() {
        let mut state = GameState::with_seed(1);
        state.end_game(GameOverReason::TimeUp);
        state.end_game(GameOverReason::Overflow { ball_id: 3 });
        assert_eq!(state.game_over_reason, Some(GameOverReason::TimeUp));
        assert_eq!(state.events.len(), 1);
    }

    #[test]
    fn test_reset_clears_session() {
        let mut state = GameState::with_seed(1);
        state.balls.insert(2, Vec2::new(400.0, 300.0));
        state.score = 12;
        state.elapsed_time = 5.0;
        state.next_size_label = 4;
        state.end_game(GameOverReason::TimeUp);

        state.reset();
        assert!(state.balls.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed_time, 0.0);
        assert_eq!(state.next_size_label, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.game_over_reason, None);
    }
}
