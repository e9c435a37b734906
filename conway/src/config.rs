// config.rs - Runner configuration loaded from TOML

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, LifeResult};
use crate::grid::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    pub grid_size: usize,
    pub generations: u64,
    /// Number of recent grid fingerprints kept for cycle detection.
    pub history_len: usize,
    pub stop_on_cycle: bool,
    pub random_density: f64,
    pub seed: Option<u64>,
    pub pattern: Option<String>,
    /// Step with one task per row instead of a plain loop.
    pub concurrent: bool,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            generations: 100,
            history_len: 10,
            stop_on_cycle: true,
            random_density: 0.33,
            seed: None,
            pattern: None,
            concurrent: false,
        }
    }
}

impl LifeConfig {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> LifeResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> LifeResult<Self> {
        let config: LifeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LifeResult<()> {
        if !(1..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(LifeError::InvalidConfig(format!(
                "grid_size must be within 1..={MAX_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        if self.history_len == 0 {
            return Err(LifeError::InvalidConfig("history_len must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.random_density) {
            return Err(LifeError::InvalidConfig(format!(
                "random_density must be within [0, 1], got {}",
                self.random_density
            )));
        }
        Ok(())
    }
}
