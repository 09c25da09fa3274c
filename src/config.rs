//! Game configuration
//!
//! Every tunable constant of the playfield, physics and rules. Loaded from JSON
//! by the presentation layer; missing fields fall back to the classic values.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_SIZE_LABEL;
use crate::error::ConfigError;

/// Rule presets matching the two shipped game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RulesetPreset {
    /// 120 px spawn strip, 1000 second time limit
    #[default]
    Classic,
    /// 75 px spawn strip, no time limit
    Endless,
}

impl RulesetPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            RulesetPreset::Classic => "Classic",
            RulesetPreset::Endless => "Endless",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(RulesetPreset::Classic),
            "endless" => Some(RulesetPreset::Endless),
            _ => None,
        }
    }

    /// Bottom edge of the spawn strip for this preset
    pub fn spawn_strip_bottom(&self) -> f32 {
        match self {
            RulesetPreset::Classic => 120.0,
            RulesetPreset::Endless => 75.0,
        }
    }

    /// Time limit in seconds (None = unbounded)
    pub fn time_limit(&self) -> Option<f32> {
        match self {
            RulesetPreset::Classic => Some(1000.0),
            RulesetPreset::Endless => None,
        }
    }
}

/// Playfield geometry (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
    /// Distance from each side of the screen to its wall
    pub wall_margin: f32,
    /// Distance from the bottom of the screen to the floor
    pub floor_margin: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            wall_margin: 195.0,
            floor_margin: 50.0,
        }
    }
}

impl PlayfieldConfig {
    #[inline]
    pub fn left_wall(&self) -> f32 {
        self.wall_margin
    }

    #[inline]
    pub fn right_wall(&self) -> f32 {
        self.width - self.wall_margin
    }

    #[inline]
    pub fn floor(&self) -> f32 {
        self.height - self.floor_margin
    }
}

/// Integration and contact coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    pub wall_restitution: f32,
    pub floor_restitution: f32,
    /// Multiplier applied to vx on every floor contact
    pub floor_friction: f32,
    /// |vy| below this snaps to zero on the floor
    pub rest_vy_epsilon: f32,
    /// |vx| below this snaps vx and spin to zero on the floor
    pub rest_vx_epsilon: f32,
    /// Ball-ball restitution, only used when `apply_ball_restitution` is set
    pub ball_restitution: f32,
    /// Scale pair impulses by `(1 + e) / 2` instead of the plain velocity swap
    pub apply_ball_restitution: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1600.0,
            wall_restitution: 0.8,
            floor_restitution: 0.8,
            floor_friction: 0.9,
            rest_vy_epsilon: 10.0,
            rest_vx_epsilon: 5.0,
            ball_restitution: 0.8,
            apply_ball_restitution: false,
        }
    }
}

/// Spawn, scoring and game-over rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Top of the spawn strip (inclusive)
    pub spawn_strip_top: f32,
    /// Bottom of the spawn strip (exclusive)
    pub spawn_strip_bottom: f32,
    /// A settled ball whose top edge rises above this line ends the game
    pub overflow_line: f32,
    /// Seconds of play before the game ends (None = unbounded)
    pub time_limit: Option<f32>,
    /// Largest label a drop can carry (drops are uniform in 1..=this)
    pub max_drop_label: u8,
    /// Label of the first drop after a reset
    pub initial_drop_label: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::from_preset(RulesetPreset::Classic)
    }
}

impl RulesConfig {
    pub fn from_preset(preset: RulesetPreset) -> Self {
        Self {
            spawn_strip_top: 0.0,
            spawn_strip_bottom: preset.spawn_strip_bottom(),
            overflow_line: 97.0,
            time_limit: preset.time_limit(),
            max_drop_label: 5,
            initial_drop_label: 1,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: PlayfieldConfig,
    pub physics: PhysicsConfig,
    pub rules: RulesConfig,
}

impl GameConfig {
    /// Create a config from a rules preset (playfield and physics stay default)
    pub fn from_preset(preset: RulesetPreset) -> Self {
        Self {
            rules: RulesConfig::from_preset(preset),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!("Loaded game config");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configs the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.playfield;
        if !(p.width > 0.0 && p.height > 0.0) {
            return Err(ConfigError::Invalid("playfield must have positive size".into()));
        }
        if p.wall_margin < 0.0 || p.left_wall() >= p.right_wall() {
            return Err(ConfigError::Invalid("walls leave no room between them".into()));
        }
        if p.floor_margin < 0.0 || p.floor() <= 0.0 {
            return Err(ConfigError::Invalid("floor is outside the playfield".into()));
        }

        let ph = &self.physics;
        for (name, value) in [
            ("wall_restitution", ph.wall_restitution),
            ("floor_restitution", ph.floor_restitution),
            ("floor_friction", ph.floor_friction),
            ("ball_restitution", ph.ball_restitution),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{name} must be in [0, 1]")));
            }
        }
        if !ph.gravity.is_finite() || ph.rest_vy_epsilon < 0.0 || ph.rest_vx_epsilon < 0.0 {
            return Err(ConfigError::Invalid(
                "gravity and epsilons must be finite and non-negative".into(),
            ));
        }

        let r = &self.rules;
        if r.spawn_strip_top >= r.spawn_strip_bottom {
            return Err(ConfigError::Invalid("spawn strip is empty".into()));
        }
        if let Some(limit) = r.time_limit
            && (!limit.is_finite() || limit <= 0.0)
        {
            return Err(ConfigError::Invalid("time limit must be finite and positive".into()));
        }
        if r.max_drop_label == 0 || r.max_drop_label > MAX_SIZE_LABEL {
            return Err(ConfigError::Invalid(format!(
                "max_drop_label must be in 1..={MAX_SIZE_LABEL}"
            )));
        }
        if r.initial_drop_label == 0 || r.initial_drop_label > r.max_drop_label {
            return Err(ConfigError::Invalid(
                "initial_drop_label must be in 1..=max_drop_label".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.playfield.left_wall(), 195.0);
        assert_eq!(config.playfield.right_wall(), 705.0);
        assert_eq!(config.playfield.floor(), 550.0);
        assert_eq!(config.rules.time_limit, Some(1000.0));
    }

    #[test]
    fn test_presets() {
        let endless = GameConfig::from_preset(RulesetPreset::Endless);
        assert_eq!(endless.rules.spawn_strip_bottom, 75.0);
        assert_eq!(endless.rules.time_limit, None);
        assert_eq!(RulesetPreset::from_str("ENDLESS"), Some(RulesetPreset::Endless));
        assert_eq!(RulesetPreset::from_str("nope"), None);
        assert_eq!(RulesetPreset::Classic.as_str(), "Classic");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "physics": { "gravity": 1000.0 } }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.physics.gravity, 1000.0);
        assert_eq!(config.physics.floor_friction, 0.9);
        assert_eq!(config.playfield, PlayfieldConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::from_preset(RulesetPreset::Endless);
        let json = config.to_json_string().unwrap();
        assert_eq!(GameConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(matches!(
            GameConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));

        let mut config = GameConfig::default();
        config.playfield.wall_margin = 500.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = GameConfig::default();
        config.rules.max_drop_label = 11;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.physics.floor_restitution = 1.5;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.rules.time_limit = Some(0.0);
        assert!(config.validate().is_err());

        for limit in [f32::NAN, f32::INFINITY, -1.0] {
            let mut config = GameConfig::default();
            config.rules.time_limit = Some(limit);
            assert!(config.validate().is_err(), "time limit {limit} accepted");
        }
    }
}
