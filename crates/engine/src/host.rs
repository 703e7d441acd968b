//! Capabilities the engine needs from whatever owns the tile grid.
//!
//! The engine never touches a global grid: every batch edit, capture and
//! apply receives a host implementing these traits. [`crate::world::World`]
//! is the in-memory implementation used by tests and the bundled server.

use crate::error::EntityError;
use crate::world::entities::ItemStack;
use crate::world::position::{Rect, TilePos};
use crate::world::tile::Tile;

/// Lookup of which tile types carry frame coordinates.
///
/// Both the codec and the tile-state grammar consult it; the record layout
/// depends on it, so a region must be decoded with the table it was encoded with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameTable {
    important: Box<[bool]>,
}

impl FrameTable {
    pub fn new(types: impl IntoIterator<Item = u16>) -> Self {
        let types: Vec<u16> = types.into_iter().collect();
        let len = types.iter().map(|t| *t as usize + 1).max().unwrap_or(0);
        let mut important = vec![false; len];
        for t in types {
            important[t as usize] = true;
        }
        Self {
            important: important.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn is_important(&self, kind: u16) -> bool {
        self.important.get(kind as usize).copied().unwrap_or(false)
    }
}

/// Read/write access to single tiles plus the grid's extent.
pub trait TileGrid {
    /// The tile at `(x, y)`. Callers check [`TileGrid::in_bounds`] first.
    fn tile(&self, x: i32, y: i32) -> Tile;

    fn set_tile(&self, x: i32, y: i32, tile: Tile);

    /// Exclusive upper bounds `(max_x, max_y)`; the grid starts at `(0, 0)`.
    fn bounds(&self) -> (i32, i32);

    fn frame_table(&self) -> &FrameTable;

    /// Place a multi-cell object whose anchor is `(x, y)`. Returns false when
    /// the host refuses the placement.
    fn place_object(&self, x: i32, y: i32, kind: u16) -> bool;

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        let (max_x, max_y) = self.bounds();
        x >= 0 && y >= 0 && x < max_x && y < max_y
    }

    fn is_frame_important(&self, kind: u16) -> bool {
        self.frame_table().is_important(kind)
    }

    /// The whole grid as an inclusive rectangle.
    fn extent(&self) -> Rect {
        let (max_x, max_y) = self.bounds();
        Rect::new(0, 0, max_x - 1, max_y - 1)
    }
}

/// Signs, containers and item frames, addressed by anchor tile.
pub trait EntityHost {
    fn sign_text(&self, pos: TilePos) -> Option<String>;
    fn place_sign(&self, pos: TilePos, text: &str) -> Result<(), EntityError>;
    fn kill_sign(&self, pos: TilePos) -> bool;

    fn chest_items(&self, pos: TilePos) -> Option<Vec<ItemStack>>;
    fn place_chest(&self, pos: TilePos, items: &[ItemStack]) -> Result<(), EntityError>;
    fn kill_chest(&self, pos: TilePos) -> bool;

    fn item_frame_item(&self, pos: TilePos) -> Option<ItemStack>;
    fn place_item_frame(&self, pos: TilePos, item: ItemStack) -> Result<(), EntityError>;
    fn kill_item_frame(&self, pos: TilePos) -> bool;
}

/// Marks the network sections overlapping a rectangle for resync.
pub trait DirtyNotifier {
    fn mark_dirty(&self, area: Rect);
}

/// Everything a batch edit needs from its host.
pub trait Host: TileGrid + EntityHost + DirtyNotifier {}

impl<T: TileGrid + EntityHost + DirtyNotifier + ?Sized> Host for T {}
