//! File locations for clipboards, schematics and undo history.
//!
//! Everything lives in one folder:
//!
//! ```text
//! clipboard-{operator}.dat     one per operator, overwritten on every copy
//! schematic-{name}.dat         named templates
//! undo-{operator}-{n}.dat      undo snapshots
//! redo-{operator}-{n}.dat      redo snapshots
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use worldedit_engine::codec::{load_region_file, save_region_file};
use worldedit_engine::host::FrameTable;
use worldedit_engine::region::Region;
use worldedit_engine::undo::OperatorId;

const SCHEMATIC_PREFIX: &str = "schematic-";
const EXTENSION: &str = ".dat";

/// Which history a snapshot file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    Undo,
    Redo,
}

impl HistoryKind {
    const fn prefix(self) -> &'static str {
        match self {
            HistoryKind::Undo => "undo",
            HistoryKind::Redo => "redo",
        }
    }
}

pub struct Storage {
    folder: PathBuf,
    frames: FrameTable,
}

impl Storage {
    /// Open (creating if needed) the storage folder. `frames` must be the
    /// frame table of the world the stored regions come from.
    pub fn open(folder: impl Into<PathBuf>, frames: FrameTable) -> Result<Self> {
        let folder = folder.into();
        fs::create_dir_all(&folder).with_context(|| format!("failed to create {}", folder.display()))?;
        Ok(Self { folder, frames })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn frames(&self) -> &FrameTable {
        &self.frames
    }

    // ── Paths ────────────────────────────────────────────────────────────

    pub fn clipboard_path(&self, operator: OperatorId) -> PathBuf {
        self.folder.join(format!("clipboard-{}{}", operator, EXTENSION))
    }

    pub fn schematic_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.folder.join(format!("{}{}{}", SCHEMATIC_PREFIX, name, EXTENSION)))
    }

    pub fn history_path(&self, kind: HistoryKind, operator: OperatorId, n: u64) -> PathBuf {
        self.folder
            .join(format!("{}-{}-{}{}", kind.prefix(), operator, n, EXTENSION))
    }

    // ── Regions ──────────────────────────────────────────────────────────

    pub fn save_region(&self, path: &Path, region: &Region) -> Result<()> {
        save_region_file(path, region, &self.frames)?;
        Ok(())
    }

    pub fn load_region(&self, path: &Path) -> Result<Region> {
        Ok(load_region_file(path, &self.frames)?)
    }

    // ── Clipboard ────────────────────────────────────────────────────────

    pub fn has_clipboard(&self, operator: OperatorId) -> bool {
        self.clipboard_path(operator).exists()
    }

    pub fn write_clipboard(&self, operator: OperatorId, region: &Region) -> Result<()> {
        self.save_region(&self.clipboard_path(operator), region)
    }

    pub fn read_clipboard(&self, operator: OperatorId) -> Result<Region> {
        let path = self.clipboard_path(operator);
        if !path.exists() {
            bail!("no clipboard at {}; copy something first", path.display());
        }
        self.load_region(&path)
    }

    // ── Schematics ───────────────────────────────────────────────────────

    /// Copy schematic `name` into the operator's clipboard.
    pub fn load_schematic(&self, operator: OperatorId, name: &str) -> Result<()> {
        let path = self.schematic_path(name)?;
        if !path.exists() {
            bail!("invalid schematic '{}': {} not found", name, path.display());
        }
        copy_file(&path, &self.clipboard_path(operator))?;
        tracing::info!("Loaded schematic '{}' into clipboard of {}", name, operator);
        Ok(())
    }

    /// Store the operator's clipboard as schematic `name`, replacing any
    /// schematic of the same name.
    pub fn save_schematic(&self, operator: OperatorId, name: &str) -> Result<()> {
        let path = self.schematic_path(name)?;
        let clipboard = self.clipboard_path(operator);
        if !clipboard.exists() {
            bail!("no clipboard at {}; copy something first", clipboard.display());
        }
        copy_file(&clipboard, &path)?;
        tracing::info!("Saved clipboard of {} as schematic '{}'", operator, name);
        Ok(())
    }

    /// Names of all stored schematics, sorted.
    pub fn list_schematics(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.folder).with_context(|| format!("failed to list {}", self.folder.display()))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("failed to list {}", self.folder.display()))?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name
                .strip_prefix(SCHEMATIC_PREFIX)
                .and_then(|rest| rest.strip_suffix(EXTENSION))
            {
                names.push(name.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn delete_schematic(&self, name: &str) -> Result<()> {
        let path = self.schematic_path(name)?;
        if !path.exists() {
            bail!("invalid schematic '{}': {} not found", name, path.display());
        }
        fs::remove_file(&path).with_context(|| format!("failed to delete {}", path.display()))?;
        tracing::info!("Deleted schematic '{}'", name);
        Ok(())
    }

    // ── Undo history files ───────────────────────────────────────────────

    /// Remove every undo and redo snapshot left in the folder.
    pub fn clear_history(&self) -> Result<usize> {
        let entries = fs::read_dir(&self.folder).with_context(|| format!("failed to list {}", self.folder.display()))?;
        let mut removed = 0;
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            let is_history = [HistoryKind::Undo, HistoryKind::Redo]
                .iter()
                .any(|kind| file_name.starts_with(&format!("{}-", kind.prefix())));
            if is_history && file_name.ends_with(EXTENSION) {
                let path = entry.path();
                fs::remove_file(&path).with_context(|| format!("failed to delete {}", path.display()))?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Schematic names become part of a file name; keep them from leaving the folder.
fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        bail!("invalid schematic name '{}'", name);
    }
    Ok(())
}

/// Copy through a temporary sibling so `to` is never left half-written.
fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let mut tmp_name = to.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = to.with_file_name(tmp_name);

    let result = fs::copy(from, &tmp).and_then(|_| fs::rename(&tmp, to));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("failed to copy {} to {}", from.display(), to.display()));
    }
    Ok(())
}
