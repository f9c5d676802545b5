use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::activation::Activation;
use crate::error::{Error, Result};

/// Topology, training and polling parameters of the controller.
///
/// Every field may be left out of the TOML file, in which case the default is used.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of boolean input lines.
    pub input_width: usize,
    pub hidden_nodes: usize,
    pub hidden_activation: Activation,
    pub output_activation: Activation,
    /// Sweeps of the fixed-epoch trainer.
    pub epoch_count: usize,
    pub learning_rate: f64,
    pub poll_interval_ms: u64,
    /// How long an input line has to stay at a level before it is reported.
    pub debounce_ms: u64,
    /// Seed for weight initialization. Taken from the clock when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_width: 3,
            hidden_nodes: 3,
            hidden_activation: Activation::Relu,
            output_activation: Activation::Relu,
            epoch_count: 10000,
            learning_rate: 0.1,
            poll_interval_ms: 10,
            debounce_ms: 5,
            seed: None,
        }
    }
}

impl Config {
    /// Load and validate a TOML configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        content.parse()
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_width == 0 || self.input_width > 16 {
            return Err(Error::InvalidConfig(format!(
                "input_width must be within 1..=16, got {}",
                self.input_width
            )));
        }
        if self.hidden_nodes == 0 {
            return Err(Error::InvalidConfig("hidden_nodes must be positive".into()));
        }
        if self.epoch_count == 0 {
            return Err(Error::InvalidConfig("epoch_count must be positive".into()));
        }
        if !(self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl std::str::FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
