use crate::error::UndoError;
use crate::host::Host;
use crate::world::position::Rect;

/// Identity of whoever issued an edit (an account id on the host).
pub type OperatorId = i32;

/// Records enough of a rectangle to reverse the edit about to run in it.
///
/// `prepare_undo` is called, and must return, before the first tile of the
/// rectangle is written. An error aborts the edit.
pub trait UndoLog {
    fn prepare_undo(&mut self, host: &dyn Host, area: Rect, operator: OperatorId) -> Result<(), UndoError>;
}

/// Edits that do not need to be reversible.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoUndo;

impl UndoLog for NoUndo {
    fn prepare_undo(&mut self, _host: &dyn Host, _area: Rect, _operator: OperatorId) -> Result<(), UndoError> {
        Ok(())
    }
}
