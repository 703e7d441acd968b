//! File-backed undo and redo history.
//!
//! Each operator has two stacks of snapshot files. An edit pushes the
//! pre-edit contents of its rectangle onto the undo stack and discards the
//! redo stack. Undoing a step saves the current contents of the snapshot's
//! rectangle to the redo stack, then restores the snapshot; redoing is the
//! mirror image.

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use worldedit_engine::error::UndoError;
use worldedit_engine::host::Host;
use worldedit_engine::region::{Region, load_section};
use worldedit_engine::undo::{OperatorId, UndoLog};
use worldedit_engine::world::position::Rect;
use worldedit_engine::codec::{load_region_file, save_region_file};

use crate::storage::{HistoryKind, Storage};

#[derive(Default)]
struct History {
    undo: VecDeque<PathBuf>,
    redo: VecDeque<PathBuf>,
    /// Sequence number for the next snapshot file.
    next: u64,
}

impl History {
    fn stack(&mut self, kind: HistoryKind) -> &mut VecDeque<PathBuf> {
        match kind {
            HistoryKind::Undo => &mut self.undo,
            HistoryKind::Redo => &mut self.redo,
        }
    }
}

pub struct FileUndoLog {
    storage: Arc<Storage>,
    max_levels: usize,
    histories: HashMap<OperatorId, History>,
}

impl FileUndoLog {
    /// Start with an empty history, deleting snapshot files a previous run
    /// left behind.
    pub fn new(storage: Arc<Storage>, max_levels: usize) -> anyhow::Result<Self> {
        let stale = storage.clear_history()?;
        if stale > 0 {
            tracing::info!("Removed {} stale undo/redo snapshots", stale);
        }
        Ok(Self {
            storage,
            max_levels: max_levels.max(1),
            histories: HashMap::new(),
        })
    }

    pub fn undo_levels(&self, operator: OperatorId) -> usize {
        self.histories.get(&operator).map_or(0, |h| h.undo.len())
    }

    pub fn redo_levels(&self, operator: OperatorId) -> usize {
        self.histories.get(&operator).map_or(0, |h| h.redo.len())
    }

    /// Revert up to `steps` edits. Returns how many were reverted.
    pub fn undo<H: Host + ?Sized>(&mut self, host: &H, operator: OperatorId, steps: usize) -> Result<usize, UndoError> {
        self.replay(host, operator, steps, HistoryKind::Undo)
    }

    /// Reapply up to `steps` undone edits. Returns how many were reapplied.
    pub fn redo<H: Host + ?Sized>(&mut self, host: &H, operator: OperatorId, steps: usize) -> Result<usize, UndoError> {
        self.replay(host, operator, steps, HistoryKind::Redo)
    }

    fn replay<H: Host + ?Sized>(
        &mut self,
        host: &H,
        operator: OperatorId,
        steps: usize,
        from: HistoryKind,
    ) -> Result<usize, UndoError> {
        let to = match from {
            HistoryKind::Undo => HistoryKind::Redo,
            HistoryKind::Redo => HistoryKind::Undo,
        };
        let mut done = 0;
        while done < steps {
            let Some(path) = self.histories.get_mut(&operator).and_then(|h| h.stack(from).back().cloned()) else {
                break;
            };
            let snapshot = load_region_file(&path, self.storage.frames())?;
            self.record(host, snapshot.rect(), operator, to)?;
            let report = load_section(host, &snapshot);
            tracing::debug!("{:?} step for operator {}: {}", from, operator, report);

            if let Some(history) = self.histories.get_mut(&operator) {
                history.stack(from).pop_back();
            }
            remove_snapshot(&path);
            done += 1;
        }
        if done > 0 {
            tracing::info!("{:?} x{} for operator {}", from, done, operator);
        }
        Ok(done)
    }

    /// Save the current contents of `area` onto one of the operator's stacks,
    /// dropping the oldest snapshot beyond the configured depth.
    fn record(&mut self, host: &(impl Host + ?Sized), area: Rect, operator: OperatorId, kind: HistoryKind) -> Result<(), UndoError> {
        let history = self.histories.entry(operator).or_default();
        let path = self.storage.history_path(kind, operator, history.next);
        history.next += 1;

        let snapshot = Region::capture(host, area);
        save_region_file(&path, &snapshot, self.storage.frames())?;

        let stack = history.stack(kind);
        stack.push_back(path);
        while stack.len() > self.max_levels {
            if let Some(oldest) = stack.pop_front() {
                remove_snapshot(&oldest);
            }
        }
        Ok(())
    }
}

impl UndoLog for FileUndoLog {
    fn prepare_undo(&mut self, host: &dyn Host, area: Rect, operator: OperatorId) -> Result<(), UndoError> {
        self.record(host, area, operator, HistoryKind::Undo)?;
        if let Some(history) = self.histories.get_mut(&operator) {
            for path in history.redo.drain(..) {
                remove_snapshot(&path);
            }
        }
        Ok(())
    }
}

fn remove_snapshot(path: &std::path::Path) {
    if let Err(e) = fs::remove_file(path) {
        tracing::warn!("Failed to delete snapshot {}: {}", path.display(), e);
    }
}
