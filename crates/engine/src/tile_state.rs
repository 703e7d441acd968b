//! What "set this cell to X" means.
//!
//! Targets are either a real tile type or one of four pseudo-types encoded
//! as negative codes: -1 air, -2 lava, -3 honey, -4 water.

use std::fmt;

use crate::error::EditError;
use crate::host::TileGrid;
use crate::world::tile::{FULL_LIQUID, LiquidKind, NO_FRAME, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetCode {
    Air,
    Lava,
    Honey,
    Water,
    Tile(u16),
}

impl TargetCode {
    pub fn from_code(code: i32) -> Result<Self, EditError> {
        match code {
            -1 => Ok(TargetCode::Air),
            -2 => Ok(TargetCode::Lava),
            -3 => Ok(TargetCode::Honey),
            -4 => Ok(TargetCode::Water),
            _ => u16::try_from(code)
                .map(TargetCode::Tile)
                .map_err(|_| EditError::InvalidTarget(code)),
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            TargetCode::Air => -1,
            TargetCode::Lava => -2,
            TargetCode::Honey => -3,
            TargetCode::Water => -4,
            TargetCode::Tile(kind) => kind as i32,
        }
    }

    const fn liquid(self) -> Option<LiquidKind> {
        match self {
            TargetCode::Lava => Some(LiquidKind::Lava),
            TargetCode::Honey => Some(LiquidKind::Honey),
            TargetCode::Water => Some(LiquidKind::Water),
            _ => None,
        }
    }

    /// False when `tile` already is what this target would make it.
    pub fn needs_change(self, tile: &Tile) -> bool {
        match self {
            TargetCode::Air => tile.active(),
            TargetCode::Tile(kind) => !tile.active() || tile.kind != kind,
            liquid => {
                let kind = liquid.liquid().unwrap_or_default();
                tile.liquid == 0 || tile.liquid_kind() != kind
            }
        }
    }

    /// Apply this target to the cell at `(x, y)` whose current contents are
    /// `tile`. Returns false if the host refused a multi-cell placement.
    pub fn apply<G: TileGrid + ?Sized>(self, grid: &G, x: i32, y: i32, mut tile: Tile) -> bool {
        match self {
            TargetCode::Air => {
                tile.set_active(false);
                tile.frame_x = NO_FRAME;
                tile.frame_y = NO_FRAME;
                tile.clear_liquid();
                tile.kind = 0;
            }
            TargetCode::Tile(kind) if grid.is_frame_important(kind) => {
                return grid.place_object(x, y, kind);
            }
            TargetCode::Tile(kind) => {
                tile.set_active(true);
                tile.frame_x = NO_FRAME;
                tile.frame_y = NO_FRAME;
                tile.clear_liquid();
                tile.set_slope(0);
                tile.set_half_brick(false);
                tile.kind = kind;
            }
            liquid => {
                tile.set_active(false);
                tile.liquid = FULL_LIQUID;
                tile.set_liquid_kind(liquid.liquid().unwrap_or_default());
                tile.kind = 0;
            }
        }
        grid.set_tile(x, y, tile);
        true
    }
}

impl fmt::Display for TargetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetCode::Air => f.write_str("air"),
            TargetCode::Lava => f.write_str("lava"),
            TargetCode::Honey => f.write_str("honey"),
            TargetCode::Water => f.write_str("water"),
            TargetCode::Tile(kind) => write!(f, "tile {}", kind),
        }
    }
}
