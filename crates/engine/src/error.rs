use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::world::tile::AnchorKind;

/// Failure to encode or decode a region stream.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The stream ended inside a mandatory record.
    #[error("region stream truncated inside {what}")]
    Truncated { what: &'static str },

    #[error("invalid region dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("invalid {what} count {count}")]
    InvalidCount { what: &'static str, count: i64 },

    #[error("sign text is not valid UTF-8")]
    InvalidString,

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<CodecError>,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CodecError {
    /// Attach the file a codec failure happened in.
    pub fn at(self, path: impl Into<PathBuf>) -> Self {
        CodecError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Whether the error is a clean end of stream rather than corruption.
    pub fn is_truncation(&self) -> bool {
        match self {
            CodecError::Truncated { .. } => true,
            CodecError::File { source, .. } => source.is_truncation(),
            _ => false,
        }
    }
}

/// A host entity subsystem refused to create or anchor an entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("no free {0:?} slot")]
    NoSlot(AnchorKind),

    #[error("({x}, {y}) is outside the world")]
    OutOfBounds { x: i32, y: i32 },
}

/// Failure to record or replay an undo snapshot.
#[derive(Debug, Error)]
pub enum UndoError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("undo history at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reasons a batch edit is refused before any tile is touched.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("invalid selection '{0}'")]
    InvalidSelection(String),

    #[error("invalid target code {0}")]
    InvalidTarget(i32),

    #[error("rectangle {0:?} does not overlap the world")]
    EmptyArea(crate::world::position::Rect),

    #[error("could not prepare undo: {0}")]
    Undo(#[from] UndoError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}
