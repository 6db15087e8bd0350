use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Errors raised while loading a [`SchedulerConfig`].
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid scheduler config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pool capacity must be at least 1")]
    ZeroCapacity,

    /// Handles are exposed to scripts as non-negative `i32`.
    #[error("pool capacity {capacity} exceeds the script handle range (max {max})")]
    CapacityTooLarge { capacity: usize, max: usize },

    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,
}

/// Configuration for the scheduler, fixed at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Maximum number of concurrent animations (default: 2048).
    pub capacity: usize,
    /// Expected number of owners. Only sizes the per-tick dirty batch (default: 512).
    pub owner_hint: usize,
    /// Tick interval in milliseconds (default: 33, about 30 Hz).
    pub tick_interval_ms: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            capacity: 2048,
            owner_hint: 512,
            tick_interval_ms: 33,
        }
    }
}

impl SchedulerConfig {
    /// Largest pool whose handles all fit a non-negative `i32` script cell.
    pub const MAX_CAPACITY: usize = i32::MAX as usize;

    /// Parse and validate a config from a JSON string. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SchedulerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = Self::MAX_CAPACITY;
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.capacity > max {
            return Err(ConfigError::CapacityTooLarge { capacity: self.capacity, max });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_sizing() {
        let config = SchedulerConfig::default();
        assert_eq!(config.capacity, 2048);
        assert_eq!(config.owner_hint, 512);
        assert_eq!(config.tick_interval(), Duration::from_millis(33));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_config() {
        let config = SchedulerConfig::from_json(r#"{ "capacity": 64 }"#).unwrap();
        assert_eq!(config.capacity, 64);
        assert_eq!(config.owner_hint, 512);
        assert_eq!(config.tick_interval_ms, 33);
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = SchedulerConfig::from_json(r#"{ "capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroCapacity));
    }

    #[test]
    fn rejects_zero_interval() {
        let err = SchedulerConfig::from_json(r#"{ "tick_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTickInterval));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SchedulerConfig::from_json("{ capacity: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
