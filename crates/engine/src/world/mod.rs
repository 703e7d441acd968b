pub mod entities;
pub mod position;
pub mod section;
pub mod tile;

use std::sync::RwLock;

use dashmap::{DashMap, DashSet};

use crate::error::EntityError;
use crate::host::{DirtyNotifier, EntityHost, FrameTable, TileGrid};
use entities::{EntityLimits, EntityStore, ItemStack};
use position::{Rect, SectionPos, TilePos};
use section::TileSection;
use tile::Tile;

/// An in-memory tile world. Thread-safe, lock-sharded by section.
///
/// Sections are allocated on first write and dropped again once they hold
/// nothing but empty tiles. Reads outside the grid return an empty tile.
pub struct World {
    width: i32,
    height: i32,
    sections: DashMap<SectionPos, TileSection>,
    /// Sections that must be resent to clients.
    dirty: DashSet<SectionPos>,
    frames: FrameTable,
    entities: RwLock<EntityStore>,
}

impl World {
    pub fn new(width: i32, height: i32, frames: FrameTable) -> Self {
        Self::with_limits(width, height, frames, EntityLimits::default())
    }

    pub fn with_limits(width: i32, height: i32, frames: FrameTable, limits: EntityLimits) -> Self {
        Self {
            width,
            height,
            sections: DashMap::new(),
            dirty: DashSet::new(),
            frames,
            entities: RwLock::new(EntityStore::new(limits)),
        }
    }

    pub fn get_tile(&self, pos: TilePos) -> Tile {
        if !self.contains(pos) {
            return Tile::default();
        }
        match self.sections.get(&pos.section()) {
            Some(section) => section.get(pos.local()),
            None => Tile::default(),
        }
    }

    /// Write a tile. Writes outside the grid are ignored.
    ///
    /// Takes `&self` because `DashMap` provides interior mutability via
    /// per-shard locking.
    pub fn put_tile(&self, pos: TilePos, tile: Tile) {
        if !self.contains(pos) {
            return;
        }
        let section_pos = pos.section();

        if tile == Tile::default() {
            if let Some(mut section) = self.sections.get_mut(&section_pos) {
                section.set(pos.local(), tile);
                if section.is_empty() {
                    drop(section);
                    self.sections.remove(&section_pos);
                }
            }
        } else {
            self.sections
                .entry(section_pos)
                .or_insert_with(TileSection::new_empty)
                .set(pos.local(), tile);
        }
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Drain and return all sections marked dirty since the last call.
    pub fn take_dirty_sections(&self) -> Vec<SectionPos> {
        let mut dirty: Vec<SectionPos> = self.dirty.iter().map(|e| *e).collect();
        // A section dirtied between collect and remove is resent next time.
        for pos in &dirty {
            self.dirty.remove(pos);
        }
        dirty.sort();
        dirty
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.len()
    }

    /// Counts of live signs, containers and item frames.
    pub fn entity_counts(&self) -> (usize, usize, usize) {
        let store = self.entities.read().expect("entity store poisoned");
        (store.sign_count(), store.chest_count(), store.item_frame_count())
    }
}

impl TileGrid for World {
    fn tile(&self, x: i32, y: i32) -> Tile {
        self.get_tile(TilePos::new(x, y))
    }

    fn set_tile(&self, x: i32, y: i32, tile: Tile) {
        self.put_tile(TilePos::new(x, y), tile);
    }

    fn bounds(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn frame_table(&self) -> &FrameTable {
        &self.frames
    }

    /// Single-cell stand-in for a host's object placer: the anchor cell
    /// becomes the object's top-left frame.
    fn place_object(&self, x: i32, y: i32, kind: u16) -> bool {
        let pos = TilePos::new(x, y);
        if !self.contains(pos) {
            return false;
        }
        let mut tile = self.get_tile(pos);
        tile.set_active(true);
        tile.kind = kind;
        tile.frame_x = 0;
        tile.frame_y = 0;
        tile.set_slope(0);
        tile.set_half_brick(false);
        tile.clear_liquid();
        self.put_tile(pos, tile);
        true
    }
}

impl EntityHost for World {
    fn sign_text(&self, pos: TilePos) -> Option<String> {
        let store = self.entities.read().expect("entity store poisoned");
        store.sign_text(pos).map(str::to_owned)
    }

    fn place_sign(&self, pos: TilePos, text: &str) -> Result<(), EntityError> {
        if !self.contains(pos) {
            return Err(EntityError::OutOfBounds { x: pos.x, y: pos.y });
        }
        self.entities
            .write()
            .expect("entity store poisoned")
            .place_sign(pos, text)
    }

    fn kill_sign(&self, pos: TilePos) -> bool {
        self.entities
            .write()
            .expect("entity store poisoned")
            .kill_sign(pos)
    }

    fn chest_items(&self, pos: TilePos) -> Option<Vec<ItemStack>> {
        let store = self.entities.read().expect("entity store poisoned");
        store.chest_items(pos).map(<[ItemStack]>::to_vec)
    }

    fn place_chest(&self, pos: TilePos, items: &[ItemStack]) -> Result<(), EntityError> {
        if !self.contains(pos) {
            return Err(EntityError::OutOfBounds { x: pos.x, y: pos.y });
        }
        self.entities
            .write()
            .expect("entity store poisoned")
            .place_chest(pos, items)
    }

    fn kill_chest(&self, pos: TilePos) -> bool {
        self.entities
            .write()
            .expect("entity store poisoned")
            .kill_chest(pos)
    }

    fn item_frame_item(&self, pos: TilePos) -> Option<ItemStack> {
        let store = self.entities.read().expect("entity store poisoned");
        store.item_frame_item(pos)
    }

    fn place_item_frame(&self, pos: TilePos, item: ItemStack) -> Result<(), EntityError> {
        if !self.contains(pos) {
            return Err(EntityError::OutOfBounds { x: pos.x, y: pos.y });
        }
        self.entities
            .write()
            .expect("entity store poisoned")
            .place_item_frame(pos, item)
    }

    fn kill_item_frame(&self, pos: TilePos) -> bool {
        self.entities
            .write()
            .expect("entity store poisoned")
            .kill_item_frame(pos)
    }
}

impl DirtyNotifier for World {
    fn mark_dirty(&self, area: Rect) {
        let Some(area) = area.normalized().intersect(&self.extent()) else {
            return;
        };
        for section in area.sections() {
            self.dirty.insert(section);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile::NO_FRAME;

    fn world() -> World {
        World::new(1000, 600, FrameTable::new([tile::kinds::CONTAINERS]))
    }

    #[test]
    fn empty_sections_are_released() {
        let w = world();
        let pos = TilePos::new(250, 10);
        w.put_tile(pos, Tile::solid(1));
        assert_eq!(w.section_count(), 1);
        assert_eq!(w.get_tile(pos), Tile::solid(1));
        w.put_tile(pos, Tile::default());
        assert_eq!(w.section_count(), 0);
    }

    #[test]
    fn clearing_a_full_section_releases_it() {
        let w = world();
        let area = Rect::new(0, 0, 199, 149);
        for pos in area.cells() {
            w.put_tile(pos, Tile::solid(1));
        }
        assert_eq!(w.section_count(), 1);
        for pos in area.cells() {
            w.put_tile(pos, Tile::default());
        }
        assert_eq!(w.section_count(), 0);
    }

    #[test]
    fn out_of_bounds_reads_and_writes() {
        let w = world();
        w.put_tile(TilePos::new(-1, 0), Tile::solid(1));
        w.put_tile(TilePos::new(1000, 0), Tile::solid(1));
        assert_eq!(w.section_count(), 0);
        assert_eq!(w.get_tile(TilePos::new(5000, 5000)), Tile::default());
        assert!(w.place_sign(TilePos::new(-4, 0), "x").is_err());
    }

    #[test]
    fn mark_dirty_covers_overlapped_sections() {
        let w = world();
        w.mark_dirty(Rect::new(399, 149, 190, 0));
        let dirty = w.take_dirty_sections();
        assert_eq!(
            dirty,
            vec![
                SectionPos::new(0, 0),
                SectionPos::new(1, 0),
            ]
        );
        assert_eq!(w.dirty_count(), 0);

        w.mark_dirty(Rect::new(-50, -50, -1, -1));
        assert_eq!(w.dirty_count(), 0);
    }

    #[test]
    fn place_object_frames_anchor() {
        let w = world();
        assert!(w.place_object(3, 3, tile::kinds::CONTAINERS));
        let t = w.tile(3, 3);
        assert!(t.active());
        assert_eq!((t.frame_x, t.frame_y), (0, 0));
        assert_ne!(t.frame_x, NO_FRAME);
        assert!(!w.place_object(-1, 3, tile::kinds::CONTAINERS));
    }
}
