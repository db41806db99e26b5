use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::strategy::percentile_regime::RegimeThresholds;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub volatility: VolatilityConfig,
    pub rotation: RotationConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolatilityConfig {
    /// Series whose percentile position drives the regime (e.g. a volatility index).
    pub observation_symbol: String,
    pub short_leg: String,
    pub long_leg: String,
    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,
    #[serde(default = "default_short_bias_pct")]
    pub short_bias_pct: f64,
    #[serde(default = "default_long_bias_pct")]
    pub long_bias_pct: f64,
    #[serde(default = "default_exit_long_pct")]
    pub exit_long_pct: f64,
    #[serde(default = "default_seed_days")]
    pub seed_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RotationConfig {
    pub universe: Vec<String>,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
    #[serde(default = "default_participation_threshold")]
    pub participation_threshold: f64,
    #[serde(default = "default_target_allocation_fraction")]
    pub target_allocation_fraction: f64,
    #[serde(default = "default_every_n_ticks")]
    pub every_n_ticks: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayConfig {
    pub initial_cash: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            initial_cash: 100_000.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn default_window_capacity() -> usize {
    52
}
fn default_short_bias_pct() -> f64 {
    90.0
}
fn default_long_bias_pct() -> f64 {
    80.0
}
fn default_exit_long_pct() -> f64 {
    10.0
}
fn default_seed_days() -> i64 {
    7
}
fn default_lookback_days() -> i64 {
    28
}
fn default_participation_threshold() -> f64 {
    0.85
}
fn default_target_allocation_fraction() -> f64 {
    0.99
}
fn default_every_n_ticks() -> u64 {
    4
}

impl VolatilityConfig {
    pub fn thresholds(&self) -> RegimeThresholds {
        RegimeThresholds {
            short_bias_pct: self.short_bias_pct,
            long_bias_pct: self.long_bias_pct,
            exit_long_pct: self.exit_long_pct,
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.window_capacity == 0 {
            return Err(EngineError::Config(
                "volatility.window_capacity must be > 0".to_string(),
            ));
        }
        if self.seed_days < 0 {
            return Err(EngineError::Config(format!(
                "volatility.seed_days must be >= 0, got {}",
                self.seed_days
            )));
        }
        for (key, sym) in [
            ("observation_symbol", &self.observation_symbol),
            ("short_leg", &self.short_leg),
            ("long_leg", &self.long_leg),
        ] {
            if sym.trim().is_empty() {
                return Err(EngineError::Config(format!("volatility.{key} is empty")));
            }
        }
        self.thresholds().validate()
    }
}

impl RotationConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.universe.is_empty() {
            return Err(EngineError::Config(
                "rotation.universe must list at least one instrument".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for sym in &self.universe {
            if sym.trim().is_empty() {
                return Err(EngineError::Config(
                    "rotation.universe contains an empty symbol".to_string(),
                ));
            }
            if !seen.insert(sym.as_str()) {
                return Err(EngineError::Config(format!(
                    "rotation.universe lists '{}' twice",
                    sym
                )));
            }
        }
        if self.lookback_days <= 0 {
            return Err(EngineError::Config(format!(
                "rotation.lookback_days must be > 0, got {}",
                self.lookback_days
            )));
        }
        if self.every_n_ticks == 0 {
            return Err(EngineError::Config(
                "rotation.every_n_ticks must be > 0".to_string(),
            ));
        }
        if !self.participation_threshold.is_finite() || self.participation_threshold <= 0.0 {
            return Err(EngineError::Config(format!(
                "rotation.participation_threshold must be finite and > 0, got {}",
                self.participation_threshold
            )));
        }
        if !(self.target_allocation_fraction > 0.0 && self.target_allocation_fraction <= 1.0) {
            return Err(EngineError::Config(format!(
                "rotation.target_allocation_fraction must be in (0, 1], got {}",
                self.target_allocation_fraction
            )));
        }
        Ok(())
    }
}

fn config_path() -> PathBuf {
    std::env::var("RR_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config/default.toml"))
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from_path(&config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("invalid config in {}", path.display()))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("failed to parse config toml")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.volatility.validate()?;
        self.rotation.validate()?;
        if !self.replay.initial_cash.is_finite() || self.replay.initial_cash <= 0.0 {
            return Err(EngineError::Config(format!(
                "replay.initial_cash must be > 0, got {}",
                self.replay.initial_cash
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_omitted_fields() {
        let toml_str = r#"
[volatility]
observation_symbol = "VIX"
short_leg = "SPXU"
long_leg = "UPRO"

[rotation]
universe = ["UPRO", "TQQQ", "URTY", "UDOW"]
"#;
        let config = Config::from_toml_str(toml_str).unwrap();
        assert_eq!(config.volatility.window_capacity, 52);
        assert_eq!(config.volatility.seed_days, 7);
        assert_eq!(config.rotation.lookback_days, 28);
        assert_eq!(config.rotation.every_n_ticks, 4);
        assert!((config.rotation.participation_threshold - 0.85).abs() < f64::EPSILON);
        assert!((config.replay.initial_cash - 100_000.0).abs() < f64::EPSILON);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn negative_seed_days_rejected() {
        let cfg = VolatilityConfig {
            observation_symbol: "VIX".to_string(),
            short_leg: "SPXU".to_string(),
            long_leg: "UPRO".to_string(),
            window_capacity: 52,
            short_bias_pct: 90.0,
            long_bias_pct: 80.0,
            exit_long_pct: 10.0,
            seed_days: -1,
        };
        assert!(matches!(cfg.validate(), Err(EngineError::Config(_))));
    }
}
