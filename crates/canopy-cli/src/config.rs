//! Run configuration, loaded from `canopy.yaml`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use canopy::ControllerConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "canopy.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Milliseconds between ticks
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Give up after this many ticks
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Sleep between ticks instead of running as fast as possible
    pub realtime: bool,

    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub position: [f32; 2],

    /// Units per second
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_interval_ms() -> u64 {
    100
}

fn default_max_ticks() -> u64 {
    1000
}

fn default_speed() -> f32 {
    1.0
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_ticks: default_max_ticks(),
            realtime: false,
            agent: AgentConfig::default(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            speed: default_speed(),
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path if given, otherwise `canopy.yaml` in `dir` when it exists, otherwise defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.interval_ms > 0, "interval_ms must be positive");
        anyhow::ensure!(
            self.agent.speed.is_finite() && self.agent.speed >= 0.0,
            "agent.speed must be a non-negative number"
        );
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn controller(&self) -> ControllerConfig {
        ControllerConfig {
            interval: self.interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: RunConfig = serde_yaml::from_str("realtime: true\n").unwrap();
        assert!(config.realtime);
        assert_eq!(config.interval_ms, 100);
        assert_eq!(config.max_ticks, 1000);
        assert_eq!(config.agent.speed, 1.0);
        assert_eq!(config.controller().interval, Duration::from_millis(100));
    }

    #[test]
    fn agent_section_parses() {
        let yaml = "interval_ms: 50\nagent:\n  position: [1.0, 2.0]\n  speed: 3.5\n";
        let config: RunConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.interval(), Duration::from_millis(50));
        assert_eq!(config.agent.position, [1.0, 2.0]);
        assert_eq!(config.agent.speed, 3.5);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = RunConfig {
            interval_ms: 0,
            ..RunConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
