//! Game-agnostic tile-region editing.
//!
//! The engine knows nothing about a particular game server. It edits a
//! grid through the [`host`] traits, serializes rectangles of it with
//! [`codec`], and records undo snapshots through [`undo::UndoLog`].

pub mod codec;
pub mod edit;
pub mod error;
pub mod host;
pub mod region;
pub mod selection;
pub mod tile_state;
pub mod undo;
pub mod world;

pub use edit::{EditAction, EditReport, Editor, Operator, TileFilter};
pub use error::{CodecError, EditError, EntityError, UndoError};
pub use host::{DirtyNotifier, EntityHost, FrameTable, Host, TileGrid};
pub use region::{Alignment, ChestData, ItemFrameData, Region, SignData, load_section};
pub use selection::Selection;
pub use tile_state::TargetCode;
pub use undo::{NoUndo, OperatorId, UndoLog};
