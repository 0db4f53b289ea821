//! Configuration loading from fillbench.toml
//!
//! Defaults reproduce the reference configuration exactly; a
//! `fillbench.toml` discovered by walking up from the current directory can
//! override them, and CLI flags override the file.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// fillbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FillConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Timed trials per strategy
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Buffer length in elements
    #[serde(default = "default_buffer_len")]
    pub buffer_len: usize,
    /// Pin the driver thread to this CPU before running
    #[serde(default)]
    pub pin_cpu: Option<usize>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            buffer_len: default_buffer_len(),
            pin_cpu: None,
        }
    }
}

fn default_iterations() -> u32 {
    fillbench_core::DEFAULT_ITERATIONS
}
fn default_buffer_len() -> usize {
    fillbench_core::DEFAULT_BUFFER_LEN
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl FillConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Discover configuration by walking up from the current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("fillbench.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }
}
