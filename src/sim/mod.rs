//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by ball ID)
//! - No rendering or platform dependencies
//!
//! Per tick: integrate → walls/floor → ball pairs → merges → game-over check.

pub mod boundary;
pub mod collision;
pub mod kinematics;
pub mod merge;
pub mod registry;
pub mod snapshot;
pub mod state;
pub mod stepper;
pub mod tick;

pub use boundary::{BoundaryContact, resolve_boundaries};
pub use collision::{
    CollisionResult, MergeCandidate, ball_ball_collision, resolve_collisions, resolve_pair,
};
pub use kinematics::integrate;
pub use merge::{MergeOutcome, apply_merges, merge_pair};
pub use registry::BallRegistry;
pub use snapshot::{BallInstance, BallView, Snapshot};
pub use state::{Ball, GameEvent, GameOverReason, GamePhase, GameState};
pub use stepper::FixedStepper;
pub use tick::{TickInput, attempt_spawn, tick};
