//! Level directory loader.

use std::{
    cmp::Ordering,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tots_core::LevelData;
use tracing::debug;

const LEVEL_EXTENSION: &str = "json";

/// Level files discovered in a directory, keyed by file stem.
#[derive(Clone, Debug, Default)]
pub(crate) struct LevelCatalog {
    entries: Vec<(String, PathBuf)>,
}

impl LevelCatalog {
    /// Collects every `*.json` file directly inside `dir`.
    pub(crate) fn scan(dir: &Path) -> Result<Self> {
        let listing = fs::read_dir(dir)
            .with_context(|| format!("failed to read level directory {}", dir.display()))?;

        let mut entries = Vec::new();
        for entry in listing {
            let path = entry
                .with_context(|| format!("failed to list level directory {}", dir.display()))?
                .path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEVEL_EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            entries.push((name.to_owned(), path));
        }

        entries.sort_by(|(left, _), (right, _)| level_order(left, right));
        debug!(count = entries.len(), dir = %dir.display(), "level directory scanned");
        Ok(Self { entries })
    }

    /// Level names in presentation order: numbered levels first.
    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Reads and deserializes the level called `name`.
    pub(crate) fn load(&self, name: &str) -> Result<LevelData> {
        let path = self
            .entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, path)| path)
            .with_context(|| {
                let available = self.names().collect::<Vec<_>>().join(", ");
                format!("unknown level `{name}` (available: {available})")
            })?;

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read level file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse level file {}", path.display()))
    }
}

fn level_order(left: &str, right: &str) -> Ordering {
    match (left.parse::<u64>(), right.parse::<u64>()) {
        (Ok(left), Ok(right)) => left.cmp(&right),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => left.cmp(right),
    }
}
