/*!
 * Simulator Configuration
 *
 * Session defaults loaded from an optional JSON file and environment overrides.
 *
 * Environment variables:
 * - SCHEDSIM_CONFIG: path to a JSON config file
 * - SCHEDSIM_CLOCK: `logical` (default) or `wall`
 * - SCHEDSIM_SEED: seed for the shell's random process parameters
 */

use crate::core::clock::{Clock, LogicalClock, WallClock};
use crate::core::errors::ConfigError;
use crate::core::limits::{
    DEFAULT_CPU_DEMAND, DEFAULT_MEMORY, DEFAULT_PRIORITY, RANDOM_DEMAND, RANDOM_MEMORY,
    RANDOM_PRIORITY,
};
use crate::core::types::{CpuUnits, MemorySize, Priority};
use log::info;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

pub const ENV_CONFIG_PATH: &str = "SCHEDSIM_CONFIG";
pub const ENV_CLOCK: &str = "SCHEDSIM_CLOCK";
pub const ENV_SEED: &str = "SCHEDSIM_SEED";

/// Time source selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockKind {
    /// One tick per executed cycle (deterministic)
    #[default]
    Logical,
    /// Milliseconds since the session started
    Wall,
}

impl ClockKind {
    /// Instantiate the clock
    pub fn build(&self) -> Arc<dyn Clock> {
        match self {
            ClockKind::Logical => Arc::new(LogicalClock::new()),
            ClockKind::Wall => Arc::new(WallClock::new()),
        }
    }
}

impl FromStr for ClockKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "logical" | "cycles" => Ok(ClockKind::Logical),
            "wall" | "system" => Ok(ClockKind::Wall),
            other => Err(ConfigError::UnknownClock(other.to_string())),
        }
    }
}

/// Inclusive bounds for a randomly drawn parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + PartialOrd + Into<i64>> Bounds<T> {
    #[inline]
    pub fn range(&self) -> RangeInclusive<T> {
        self.min..=self.max
    }

    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                name: name.to_string(),
                min: self.min.into(),
                max: self.max.into(),
            });
        }
        Ok(())
    }
}

impl<T: Copy> From<RangeInclusive<T>> for Bounds<T> {
    fn from(r: RangeInclusive<T>) -> Self {
        Self {
            min: *r.start(),
            max: *r.end(),
        }
    }
}

/// Ranges the shell draws from when a creation request omits parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RandomConfig {
    pub demand: Bounds<CpuUnits>,
    pub memory: Bounds<MemorySize>,
    pub priority: Bounds<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            demand: RANDOM_DEMAND.into(),
            memory: RANDOM_MEMORY.into(),
            priority: RANDOM_PRIORITY.into(),
            seed: None,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SimConfig {
    pub default_demand: CpuUnits,
    pub default_memory: MemorySize,
    pub default_priority: Priority,
    pub clock: ClockKind,
    pub random: RandomConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            default_demand: DEFAULT_CPU_DEMAND,
            default_memory: DEFAULT_MEMORY,
            default_priority: DEFAULT_PRIORITY,
            clock: ClockKind::default(),
            random: RandomConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG_PATH) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(kind) = lookup(ENV_CLOCK) {
            config.clock = kind.parse()?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            let seed = seed
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSeed(seed.clone()))?;
            config.random.seed = Some(seed);
        }

        config.validate()?;
        info!(
            "Configuration loaded: clock={:?}, seed={:?}",
            config.clock, config.random.seed
        );
        Ok(config)
    }

    /// Read a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate a JSON document
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: SimConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.random.demand.validate("demand")?;
        self.random.memory.validate("memory")?;
        self.random.priority.validate("priority")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SimConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.default_demand, 5);
        assert_eq!(config.default_memory, 100);
        assert_eq!(config.default_priority, 3);
        assert_eq!(config.clock, ClockKind::Logical);
        assert_eq!(config.random.demand.range(), 3..=8);
    }

    #[test]
    fn test_env_overrides() {
        let config =
            SimConfig::from_lookup(lookup(&[(ENV_CLOCK, "wall"), (ENV_SEED, "42")])).unwrap();
        assert_eq!(config.clock, ClockKind::Wall);
        assert_eq!(config.random.seed, Some(42));
    }

    #[test]
    fn test_bad_overrides() {
        assert_eq!(
            SimConfig::from_lookup(lookup(&[(ENV_CLOCK, "sundial")])),
            Err(ConfigError::UnknownClock("sundial".to_string()))
        );
        assert!(matches!(
            SimConfig::from_lookup(lookup(&[(ENV_SEED, "abc")])),
            Err(ConfigError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SimConfig::from_json(r#"{"default_priority": 1}"#).unwrap();
        assert_eq!(config.default_priority, 1);
        assert_eq!(config.default_demand, DEFAULT_CPU_DEMAND);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = SimConfig::from_json(r#"{"random": {"demand": {"min": 9, "max": 2}}}"#)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidRange {
                name: "demand".to_string(),
                min: 9,
                max: 2,
            }
        );
    }

    #[test]
    fn test_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"clock": "wall", "random": {{"seed": 7}}}}"#).unwrap();

        let path = file.path().display().to_string();
        let config = SimConfig::from_lookup(lookup(&[(ENV_CONFIG_PATH, path.as_str())])).unwrap();
        assert_eq!(config.clock, ClockKind::Wall);
        assert_eq!(config.random.seed, Some(7));
        assert_eq!(config.random.memory.range(), 50..=200);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            SimConfig::from_file("/nonexistent/schedsim.json"),
            Err(ConfigError::ReadFailed { .. })
        ));
    }
}
