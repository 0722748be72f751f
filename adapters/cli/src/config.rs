//! Optional `tots.toml` configuration file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tots_world::DEFAULT_QUEUE_CAPACITY;

const DEFAULT_LEVELS_DIR: &str = "levelFiles";
const DEFAULT_MAX_TICKS: u64 = 10_000;

/// Settings read from the configuration file; absent keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Capacity of the player's movement queue.
    pub(crate) queue_capacity: usize,
    /// Directory scanned for `*.json` level files.
    pub(crate) levels_dir: PathBuf,
    /// Upper bound on ticks simulated for one run.
    pub(crate) max_ticks: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            levels_dir: PathBuf::from(DEFAULT_LEVELS_DIR),
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl Config {
    /// Reads and validates the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config file at {}", path.display()))
    }

    /// Parses and validates configuration contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to parse config toml")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the simulation cannot honour.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            bail!("queue_capacity must be at least 1");
        }
        Ok(())
    }
}
