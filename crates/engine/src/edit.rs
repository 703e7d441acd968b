//! Batch edits over a rectangle.
//!
//! Every mutating operation runs the same sequence: normalize the
//! rectangle, snapshot it through the [`UndoLog`], scan the cells that lie
//! inside the grid, mark the rectangle dirty, and report how many cells
//! actually changed. A scan never stops early; cells outside the grid are
//! skipped one by one.
//!
//! Batches read and write the host without any locking of their own.
//! Callers must not run two batches over overlapping rectangles at once.

use std::fmt;

use crate::error::EditError;
use crate::host::Host;
use crate::region::{Alignment, Region, apply_region, destroy_anchored};
use crate::selection::Selection;
use crate::tile_state::TargetCode;
use crate::undo::{OperatorId, UndoLog};
use crate::world::position::{Rect, TilePos};
use crate::world::tile::Tile;

/// Opaque per-tile predicate gating which cells an edit may touch.
pub type TileFilter<'a> = &'a dyn Fn(&Tile) -> bool;

/// Largest paint color id.
pub const MAX_COLOR: u8 = 31;
/// Largest slope selector.
pub const MAX_SLOPE: u8 = 7;

/// Who is editing and the rectangle they currently have selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    pub id: OperatorId,
    pub selection: Rect,
}

impl Operator {
    pub const fn new(id: OperatorId, selection: Rect) -> Self {
        Self { id, selection }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    SetTile,
    SetWall,
    PaintTile,
    PaintWall,
    SetSlope,
    Cut,
    Paste,
    LoadSection,
}

impl EditAction {
    pub const fn label(self) -> &'static str {
        match self {
            EditAction::SetTile => "Set tiles",
            EditAction::SetWall => "Set walls",
            EditAction::PaintTile => "Painted tiles",
            EditAction::PaintWall => "Painted walls",
            EditAction::SetSlope => "Sloped tiles",
            EditAction::Cut => "Cut",
            EditAction::Paste => "Pasted",
            EditAction::LoadSection => "Loaded section",
        }
    }
}

/// Outcome of one batch edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditReport {
    pub action: EditAction,
    /// Cells actually modified, not cells scanned.
    pub changed: usize,
    pub area: Rect,
}

impl fmt::Display for EditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} modified)", self.action.label(), self.changed)
    }
}

/// Runs batch edits against a host, recording undo snapshots first.
pub struct Editor<'a, H: Host> {
    host: &'a H,
    undo: &'a mut dyn UndoLog,
}

impl<'a, H: Host> Editor<'a, H> {
    pub fn new(host: &'a H, undo: &'a mut dyn UndoLog) -> Self {
        Self { host, undo }
    }

    pub fn host(&self) -> &'a H {
        self.host
    }

    // ── Tile-state edits ─────────────────────────────────────────────────

    pub fn set_tile(
        &mut self,
        operator: &Operator,
        target: TargetCode,
        selection: Selection,
        filter: Option<TileFilter<'_>>,
    ) -> Result<EditReport, EditError> {
        self.scan(
            EditAction::SetTile,
            operator,
            selection,
            filter,
            |tile| target.needs_change(tile),
            |host, x, y, tile| target.apply(host, x, y, tile),
        )
    }

    pub fn set_wall(
        &mut self,
        operator: &Operator,
        wall: u8,
        selection: Selection,
        filter: Option<TileFilter<'_>>,
    ) -> Result<EditReport, EditError> {
        self.scan(
            EditAction::SetWall,
            operator,
            selection,
            filter,
            |tile| tile.wall != wall,
            |host, x, y, mut tile| {
                tile.wall = wall;
                host.set_tile(x, y, tile);
                true
            },
        )
    }

    pub fn paint_tile(
        &mut self,
        operator: &Operator,
        color: u8,
        selection: Selection,
        filter: Option<TileFilter<'_>>,
    ) -> Result<EditReport, EditError> {
        if color > MAX_COLOR {
            return Err(EditError::InvalidTarget(color as i32));
        }
        self.scan(
            EditAction::PaintTile,
            operator,
            selection,
            filter,
            |tile| tile.active() && tile.color() != color,
            |host, x, y, mut tile| {
                tile.set_color(color);
                host.set_tile(x, y, tile);
                true
            },
        )
    }

    pub fn paint_wall(
        &mut self,
        operator: &Operator,
        color: u8,
        selection: Selection,
        filter: Option<TileFilter<'_>>,
    ) -> Result<EditReport, EditError> {
        if color > MAX_COLOR {
            return Err(EditError::InvalidTarget(color as i32));
        }
        self.scan(
            EditAction::PaintWall,
            operator,
            selection,
            filter,
            |tile| tile.wall_color() != color,
            |host, x, y, mut tile| {
                tile.set_wall_color(color);
                host.set_tile(x, y, tile);
                true
            },
        )
    }

    pub fn set_slope(
        &mut self,
        operator: &Operator,
        slope: u8,
        selection: Selection,
        filter: Option<TileFilter<'_>>,
    ) -> Result<EditReport, EditError> {
        if slope > MAX_SLOPE {
            return Err(EditError::InvalidTarget(slope as i32));
        }
        self.scan(
            EditAction::SetSlope,
            operator,
            selection,
            filter,
            |tile| tile.active() && (tile.slope() != slope || tile.half_brick()),
            |host, x, y, mut tile| {
                tile.set_slope(slope);
                tile.set_half_brick(false);
                host.set_tile(x, y, tile);
                true
            },
        )
    }

    // ── Region edits ─────────────────────────────────────────────────────

    /// Clear the operator's selection, destroying the entity of every
    /// sign, container or item frame whose anchor cell lies inside it.
    /// Cells that are already empty are not counted.
    pub fn cut(&mut self, operator: &Operator) -> Result<EditReport, EditError> {
        let area = self.begin(operator, operator.selection)?;
        let mut changed = 0;
        if let Some(scan) = area.intersect(&self.host.extent()) {
            for pos in scan.cells() {
                if self.host.tile(pos.x, pos.y) == Tile::default() {
                    continue;
                }
                destroy_anchored(self.host, pos);
                self.host.set_tile(pos.x, pos.y, Tile::default());
                changed += 1;
            }
        }
        Ok(self.finish(EditAction::Cut, area, changed))
    }

    /// Capture the part of `area` that lies inside the grid.
    pub fn copy(&self, area: Rect) -> Result<Region, EditError> {
        let area = area.normalized();
        let inside = area
            .intersect(&self.host.extent())
            .ok_or(EditError::EmptyArea(area))?;
        Ok(Region::capture(self.host, inside))
    }

    /// Overwrite the destination rectangle with `region`, anchored at one of
    /// its corners. Source tiles rejected by `filter` are not written.
    ///
    /// A destination that does not fit in `i32` coordinates is
    /// [`EditError::EmptyArea`].
    pub fn paste(
        &mut self,
        operator: &Operator,
        anchor: TilePos,
        alignment: Alignment,
        region: &Region,
        filter: Option<TileFilter<'_>>,
    ) -> Result<EditReport, EditError> {
        let dest = alignment
            .destination(anchor, region.width(), region.height())
            .ok_or(EditError::EmptyArea(Rect::new(anchor.x, anchor.y, anchor.x, anchor.y)))?;
        let dest = self.begin(operator, dest)?;
        let changed = apply_region(self.host, region, dest.origin(), filter);
        Ok(self.finish(EditAction::Paste, dest, changed))
    }

    // ── Batch plumbing ───────────────────────────────────────────────────

    /// Normalize `area` and snapshot its in-grid part for undo.
    fn begin(&mut self, operator: &Operator, area: Rect) -> Result<Rect, EditError> {
        let area = area.normalized();
        match area.intersect(&self.host.extent()) {
            Some(inside) => self.undo.prepare_undo(self.host, inside, operator.id)?,
            None => tracing::debug!("Edit rectangle {:?} lies outside the world", area),
        }
        Ok(area)
    }

    fn finish(&self, action: EditAction, area: Rect, changed: usize) -> EditReport {
        self.host.mark_dirty(area);
        let report = EditReport {
            action,
            changed,
            area,
        };
        tracing::info!(
            "{} in ({}, {})..({}, {}): {} cells modified",
            action.label(),
            area.x,
            area.y,
            area.x2,
            area.y2,
            changed
        );
        report
    }

    /// The shared per-cell loop: a cell is edited when it needs the change,
    /// is selected, and passes the filter, in that order.
    fn scan(
        &mut self,
        action: EditAction,
        operator: &Operator,
        selection: Selection,
        filter: Option<TileFilter<'_>>,
        needs_change: impl Fn(&Tile) -> bool,
        apply: impl Fn(&H, i32, i32, Tile) -> bool,
    ) -> Result<EditReport, EditError> {
        let area = self.begin(operator, operator.selection)?;
        let host = self.host;
        let mut changed = 0;

        if let Some(scan) = area.intersect(&host.extent()) {
            tracing::debug!(
                "{}: scanning {} cells with selection '{}'",
                action.label(),
                scan.area(),
                selection
            );
            for i in scan.x..=scan.x2 {
                for j in scan.y..=scan.y2 {
                    let tile = host.tile(i, j);
                    if !needs_change(&tile)
                        || !selection.contains(i, j, &operator.selection, host)
                        || filter.is_some_and(|f| !f(&tile))
                    {
                        continue;
                    }
                    if apply(host, i, j, tile) {
                        changed += 1;
                    }
                }
            }
        }

        Ok(self.finish(action, area, changed))
    }
}
