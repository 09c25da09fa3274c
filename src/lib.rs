//! Drop Merge - physics and merge engine for a falling-ball merging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, collisions, merges, game state)
//! - `config`: Tunable playfield, physics and rule constants
//! - `error`: Guard errors for refused requests
//!
//! Rendering, audio and input polling live in the presentation layer, which
//! calls [`sim::tick`] once per frame and draws from [`sim::Snapshot`].

pub mod config;
pub mod error;
pub mod sim;

pub use config::{GameConfig, PhysicsConfig, PlayfieldConfig, RulesConfig, RulesetPreset};
pub use error::{ConfigError, SpawnRejection};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest frame gap fed into the stepper (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Radius gained per size label (radius == label * RADIUS_PER_LABEL)
    pub const RADIUS_PER_LABEL: f32 = 10.0;
    /// Smallest size label
    pub const MIN_SIZE_LABEL: u8 = 1;
    /// Largest size label; two of these vanish when they merge
    pub const MAX_SIZE_LABEL: u8 = 10;
}

/// Radius of a ball carrying `label`
#[inline]
pub fn radius_for_label(label: u8) -> f32 {
    label as f32 * consts::RADIUS_PER_LABEL
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    if !angle.is_finite() {
        return 0.0;
    }
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_for_label() {
        assert_eq!(radius_for_label(1), 10.0);
        assert_eq!(radius_for_label(10), 100.0);
    }

    #[test]
    fn test_normalize_angle() {
        use std::f32::consts::PI;
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-4);
        assert!((normalize_angle(-0.5) + 0.5).abs() < 1e-6);
        assert_eq!(normalize_angle(f32::NAN), 0.0);
    }
}
