//! # League rules configuration
//!
//! Every numeric rule the engine enforces lives here so a league can tune
//! squad shape, transfer economics and chip allowances without code changes.
//!
//! ```rust
//! use fantasy_core::config::RulesConfig;
//!
//! let rules = RulesConfig::default();
//! assert_eq!(rules.squad_size, 17);
//! assert_eq!(rules.chips.wildcard, 2);
//! ```

use crate::models::ChipKind;
use crate::rules::formation::FormationLimits;
use crate::scoring::PointsTable;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{env, fs};
use thiserror::Error;

/// Points a file path at a rules file that replaces the built-in defaults.
pub const RULES_PATH_ENV: &str = "FANTASY_RULES_PATH";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read rules file: {0}")]
    Io(String),

    #[error("Failed to parse rules: {0}")]
    Parse(String),

    #[error("Invalid rules: {0}")]
    Validation(String),
}

/// Season allowance per chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipAllowances {
    #[serde(default = "one")]
    pub bench_boost: u32,
    #[serde(default = "one")]
    pub triple_captain: u32,
    /// The league rules text grants two wildcards per season.
    #[serde(default = "two")]
    pub wildcard: u32,
    #[serde(default = "one")]
    pub free_hit: u32,
}

fn one() -> u32 {
    1
}

fn two() -> u32 {
    2
}

impl Default for ChipAllowances {
    fn default() -> Self {
        Self { bench_boost: 1, triple_captain: 1, wildcard: 2, free_hit: 1 }
    }
}

impl ChipAllowances {
    pub fn for_kind(&self, kind: ChipKind) -> u32 {
        match kind {
            ChipKind::BenchBoost => self.bench_boost,
            ChipKind::TripleCaptain => self.triple_captain,
            ChipKind::Wildcard => self.wildcard,
            ChipKind::FreeHit => self.free_hit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub squad_size: usize,
    pub starting_size: usize,
    pub squad_goalkeepers: usize,
    pub squad_lady_forwards: usize,
    pub starting_lady_forwards: usize,
    pub max_per_team: usize,
    pub formation: FormationLimits,

    pub captain_multiplier: i32,
    pub triple_captain_multiplier: i32,

    /// Points deducted per transfer beyond the free allowance.
    pub transfer_cost: i32,
    pub base_free_transfers: u32,
    /// Unused free transfers that may roll into the next gameweek.
    pub max_banked_transfers: u32,
    pub max_free_transfers: u32,

    pub chips: ChipAllowances,

    /// Points per recorded match action.
    pub points: PointsTable,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            squad_size: 17,
            starting_size: 10,
            squad_goalkeepers: 2,
            squad_lady_forwards: 2,
            starting_lady_forwards: 1,
            max_per_team: 3,
            formation: FormationLimits::default(),
            captain_multiplier: 2,
            triple_captain_multiplier: 3,
            transfer_cost: 4,
            base_free_transfers: 1,
            max_banked_transfers: 1,
            max_free_transfers: 2,
            chips: ChipAllowances::default(),
            points: PointsTable::default(),
        }
    }
}

impl RulesConfig {
    /// Standard league rules.
    pub fn league() -> Self {
        Self::default()
    }

    /// League rules with a single wildcard per season, matching leagues that
    /// treat every chip as one-shot.
    pub fn strict_wildcard() -> Self {
        let mut cfg = Self::default();
        cfg.chips.wildcard = 1;
        cfg
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Rules from `FANTASY_RULES_PATH` when set, defaults otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(RULES_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }

        let config = Self::load(path)
            .map_err(|e| ConfigError::Validation(format!("{RULES_PATH_ENV}='{path}': {e}")))?;
        log::info!("Loaded league rules from {}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_size == 0 || self.starting_size > self.squad_size {
            return Err(ConfigError::Validation(format!(
                "starting_size must be 1..={}, got {}",
                self.squad_size, self.starting_size
            )));
        }

        let formation = &self.formation;
        for position in crate::models::Position::ALL {
            let range = formation.range(position);
            if range.min > range.max {
                return Err(ConfigError::Validation(format!(
                    "{} range is empty ({}..={})",
                    position, range.min, range.max
                )));
            }
        }

        if formation.minimum_size() > self.starting_size
            || formation.maximum_size() < self.starting_size
        {
            return Err(ConfigError::Validation(format!(
                "formation ranges cannot produce a lineup of {}",
                self.starting_size
            )));
        }

        if self.squad_goalkeepers + self.squad_lady_forwards > self.squad_size {
            return Err(ConfigError::Validation(
                "goalkeeper and lady forward quotas exceed squad size".to_string(),
            ));
        }

        if self.max_per_team == 0 {
            return Err(ConfigError::Validation("max_per_team must be positive".to_string()));
        }

        if self.captain_multiplier < 1 || self.triple_captain_multiplier < 1 {
            return Err(ConfigError::Validation("captain multipliers must be >= 1".to_string()));
        }

        if self.transfer_cost < 0 {
            return Err(ConfigError::Validation(format!(
                "transfer_cost must be >= 0, got {}",
                self.transfer_cost
            )));
        }

        if self.base_free_transfers > self.max_free_transfers {
            return Err(ConfigError::Validation(format!(
                "base_free_transfers ({}) exceeds max_free_transfers ({})",
                self.base_free_transfers, self.max_free_transfers
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_rules_are_valid() {
        let cfg = RulesConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.starting_size, 10);
        assert_eq!(cfg.max_free_transfers, 2);
        assert_eq!(cfg.chips.for_kind(ChipKind::Wildcard), 2);
        assert_eq!(cfg.chips.for_kind(ChipKind::TripleCaptain), 1);
    }

    #[test]
    fn test_strict_wildcard_preset() {
        let cfg = RulesConfig::strict_wildcard();
        assert_eq!(cfg.chips.wildcard, 1);
        assert_eq!(cfg.chips.bench_boost, 1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = RulesConfig::from_json(r#"{"transfer_cost": 6, "chips": {"wildcard": 1}}"#).unwrap();
        assert_eq!(cfg.transfer_cost, 6);
        assert_eq!(cfg.chips.wildcard, 1);
        assert_eq!(cfg.chips.free_hit, 1);
        assert_eq!(cfg.squad_size, 17);
        assert_eq!(cfg.points, PointsTable::default());
    }

    #[test]
    fn test_points_table_override() {
        let cfg = RulesConfig::from_json(
            r#"{"points": [{"action": "goal", "points": 7}, {"action": "assist", "points": 2}]}"#,
        )
        .unwrap();
        assert_eq!(cfg.points.points_for("goal", crate::models::Position::Defender), 7);
        assert_eq!(cfg.points.points_for("appearance", crate::models::Position::Defender), 0);
    }

    #[test]
    fn test_yaml_rules() {
        let yaml = "max_per_team: 4\nformation:\n  goalkeepers: {min: 1, max: 1}\n  defenders: {min: 3, max: 4}\n  midfielders: {min: 2, max: 4}\n  forwards: {min: 1, max: 3}\n";
        let cfg = RulesConfig::from_yaml(yaml).unwrap();
        assert_eq!(cfg.max_per_team, 4);
        assert_eq!(cfg.formation.defenders.max, 4);
    }

    #[test]
    fn test_invalid_rules_rejected() {
        assert!(matches!(
            RulesConfig::from_json(r#"{"transfer_cost": -1}"#),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            RulesConfig::from_json(r#"{"starting_size": 20}"#),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(RulesConfig::from_json("{not json"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = TempDir::new().unwrap();
        let yaml_path = dir.path().join("rules.yaml");
        fs::write(&yaml_path, "transfer_cost: 5\n").unwrap();
        assert_eq!(RulesConfig::load(&yaml_path).unwrap().transfer_cost, 5);

        let json_path = dir.path().join("rules.json");
        fs::write(&json_path, r#"{"max_free_transfers": 3}"#).unwrap();
        assert_eq!(RulesConfig::load(&json_path).unwrap().max_free_transfers, 3);

        assert!(matches!(
            RulesConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
