//! Guard errors
//!
//! The simulation has no fallible I/O. These types only describe requests the
//! engine refused, so callers can react without any state having changed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a drop request was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SpawnRejection {
    #[error("game is over; reset before dropping")]
    GameOver,
    #[error("drop point is outside the spawn strip")]
    OutsideSpawnStrip,
    #[error("drop point overlaps ball {ball_id}")]
    Overlapping { ball_id: u32 },
}

/// Problems loading or validating a `GameConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
