//! Server configuration, read from a JSON file.
//!
//! Every field has a default, so a missing file or a file that only sets a
//! few keys are both valid.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use worldedit_engine::world::entities::EntityLimits;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder holding clipboards, schematics and undo history.
    pub folder: PathBuf,
    /// Undo snapshots kept per operator before the oldest is dropped.
    pub max_undo_levels: usize,
    pub world_width: i32,
    pub world_height: i32,
    pub max_signs: usize,
    pub max_chests: usize,
    pub max_item_frames: usize,
    /// Commands that may wait in the edit queue before submitters block.
    pub queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        let limits = EntityLimits::default();
        Self {
            folder: PathBuf::from("worldedit"),
            max_undo_levels: 10,
            world_width: 4200,
            world_height: 1200,
            max_signs: limits.signs,
            max_chests: limits.chests,
            max_item_frames: limits.item_frames,
            queue_capacity: 64,
        }
    }
}

impl Config {
    /// Load the configuration at `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config =
            serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn entity_limits(&self) -> EntityLimits {
        EntityLimits {
            signs: self.max_signs,
            chests: self.max_chests,
            item_frames: self.max_item_frames,
        }
    }
}
