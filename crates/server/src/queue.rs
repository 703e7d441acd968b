//! Serialized edit execution.
//!
//! Batch edits read and write the world without locking, so overlapping
//! edits must never run at the same time. [`EditQueue`] owns a single worker
//! on a blocking thread that executes commands one at a time in submission
//! order. Clipboard and undo file I/O happen on that thread too, so the
//! async runtime never waits on the disk.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use worldedit_engine::edit::{Editor, Operator, TileFilter};
use worldedit_engine::region::Alignment;
use worldedit_engine::selection::Selection;
use worldedit_engine::tile_state::TargetCode;
use worldedit_engine::undo::OperatorId;
use worldedit_engine::world::World;
use worldedit_engine::world::position::TilePos;
use worldedit_engine::world::tile::Tile;

use crate::storage::Storage;
use crate::undo::FileUndoLog;

/// A tile predicate that can travel to the worker thread.
pub type SharedFilter = Arc<dyn Fn(&Tile) -> bool + Send + Sync>;

pub enum EditCommand {
    Copy {
        operator: Operator,
    },
    /// Copy to the clipboard, then clear the selection.
    Cut {
        operator: Operator,
    },
    Paste {
        operator: Operator,
        anchor: TilePos,
        alignment: Alignment,
        filter: Option<SharedFilter>,
    },
    SetTile {
        operator: Operator,
        target: TargetCode,
        selection: Selection,
        filter: Option<SharedFilter>,
    },
    SetWall {
        operator: Operator,
        wall: u8,
        selection: Selection,
        filter: Option<SharedFilter>,
    },
    PaintTile {
        operator: Operator,
        color: u8,
        selection: Selection,
        filter: Option<SharedFilter>,
    },
    PaintWall {
        operator: Operator,
        color: u8,
        selection: Selection,
        filter: Option<SharedFilter>,
    },
    SetSlope {
        operator: Operator,
        slope: u8,
        selection: Selection,
        filter: Option<SharedFilter>,
    },
    Undo {
        operator: OperatorId,
        steps: usize,
    },
    Redo {
        operator: OperatorId,
        steps: usize,
    },
    LoadSchematic {
        operator: OperatorId,
        name: String,
    },
    SaveSchematic {
        operator: OperatorId,
        name: String,
    },
}

impl EditCommand {
    pub fn name(&self) -> &'static str {
        match self {
            EditCommand::Copy { .. } => "copy",
            EditCommand::Cut { .. } => "cut",
            EditCommand::Paste { .. } => "paste",
            EditCommand::SetTile { .. } => "set",
            EditCommand::SetWall { .. } => "wall",
            EditCommand::PaintTile { .. } => "paint",
            EditCommand::PaintWall { .. } => "paintwall",
            EditCommand::SetSlope { .. } => "slope",
            EditCommand::Undo { .. } => "undo",
            EditCommand::Redo { .. } => "redo",
            EditCommand::LoadSchematic { .. } => "schematic load",
            EditCommand::SaveSchematic { .. } => "schematic save",
        }
    }
}

struct Job {
    command: EditCommand,
    reply: oneshot::Sender<Result<String>>,
}

/// Handle for submitting commands to the edit worker. Dropping every handle
/// stops the worker once the queued commands have run.
pub struct EditQueue {
    tx: mpsc::Sender<Job>,
    worker: JoinHandle<()>,
}

impl EditQueue {
    /// Spawn the worker. Must be called from within a tokio runtime.
    pub fn start(world: Arc<World>, storage: Arc<Storage>, undo: FileUndoLog, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Job>(capacity.max(1));
        let worker = tokio::task::spawn_blocking(move || {
            let mut worker = Worker { world, storage, undo };
            tracing::info!("Edit queue started");
            while let Some(job) = rx.blocking_recv() {
                let name = job.command.name();
                let start = Instant::now();
                let result = worker.execute(job.command);
                match &result {
                    Ok(message) => tracing::debug!("{}: {} ({:.2?})", name, message, start.elapsed()),
                    Err(e) => tracing::warn!("{} failed: {:#}", name, e),
                }
                // The submitter may have stopped waiting.
                let _ = job.reply.send(result);
            }
            tracing::info!("Edit queue stopped");
        });
        Self { tx, worker }
    }

    /// Queue a command and wait for its report.
    pub async fn submit(&self, command: EditCommand) -> Result<String> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Job { command, reply })
            .await
            .map_err(|_| anyhow!("edit queue has stopped"))?;
        rx.await.context("edit worker dropped the command")?
    }

    /// Run every queued command, then stop the worker.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.tx);
        self.worker.await.context("edit worker panicked")
    }
}

struct Worker {
    world: Arc<World>,
    storage: Arc<Storage>,
    undo: FileUndoLog,
}

fn as_filter(filter: &Option<SharedFilter>) -> Option<TileFilter<'_>> {
    filter.as_deref().map(|f| f as TileFilter<'_>)
}

impl Worker {
    fn execute(&mut self, command: EditCommand) -> Result<String> {
        let world = &*self.world;
        match command {
            EditCommand::Copy { operator } => {
                let region = Editor::new(world, &mut self.undo).copy(operator.selection)?;
                self.storage.write_clipboard(operator.id, &region)?;
                Ok(format!("Copied selection to clipboard ({}x{})", region.width(), region.height()))
            }
            EditCommand::Cut { operator } => {
                let mut editor = Editor::new(world, &mut self.undo);
                let region = editor.copy(operator.selection)?;
                self.storage.write_clipboard(operator.id, &region)?;
                Ok(editor.cut(&operator)?.to_string())
            }
            EditCommand::Paste {
                operator,
                anchor,
                alignment,
                filter,
            } => {
                let region = self.storage.read_clipboard(operator.id)?;
                let report = Editor::new(world, &mut self.undo).paste(&operator, anchor, alignment, &region, as_filter(&filter))?;
                Ok(report.to_string())
            }
            EditCommand::SetTile {
                operator,
                target,
                selection,
                filter,
            } => {
                let report = Editor::new(world, &mut self.undo).set_tile(&operator, target, selection, as_filter(&filter))?;
                Ok(report.to_string())
            }
            EditCommand::SetWall {
                operator,
                wall,
                selection,
                filter,
            } => {
                let report = Editor::new(world, &mut self.undo).set_wall(&operator, wall, selection, as_filter(&filter))?;
                Ok(report.to_string())
            }
            EditCommand::PaintTile {
                operator,
                color,
                selection,
                filter,
            } => {
                let report = Editor::new(world, &mut self.undo).paint_tile(&operator, color, selection, as_filter(&filter))?;
                Ok(report.to_string())
            }
            EditCommand::PaintWall {
                operator,
                color,
                selection,
                filter,
            } => {
                let report = Editor::new(world, &mut self.undo).paint_wall(&operator, color, selection, as_filter(&filter))?;
                Ok(report.to_string())
            }
            EditCommand::SetSlope {
                operator,
                slope,
                selection,
                filter,
            } => {
                let report = Editor::new(world, &mut self.undo).set_slope(&operator, slope, selection, as_filter(&filter))?;
                Ok(report.to_string())
            }
            EditCommand::Undo { operator, steps } => {
                let done = self.undo.undo(world, operator, steps)?;
                Ok(format!("Undid {} of your actions", done))
            }
            EditCommand::Redo { operator, steps } => {
                let done = self.undo.redo(world, operator, steps)?;
                Ok(format!("Redid {} of your actions", done))
            }
            EditCommand::LoadSchematic { operator, name } => {
                self.storage.load_schematic(operator, &name)?;
                Ok(format!("Loaded schematic '{}' to clipboard", name))
            }
            EditCommand::SaveSchematic { operator, name } => {
                self.storage.save_schematic(operator, &name)?;
                Ok(format!("Saved clipboard to schematic '{}'", name))
            }
        }
    }
}
