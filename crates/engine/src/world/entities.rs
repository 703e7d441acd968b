//! In-memory store for the entities that ride on top of tiles: sign text,
//! container inventories and item-frame contents.
//!
//! Each family has a fixed slot budget, like the hosts this engine targets.
//! Entities are addressed by the anchor tile of the object that owns them.

use std::collections::HashMap;

use slotmap::{SlotMap, new_key_type};

use super::position::TilePos;
use super::tile::AnchorKind;
use crate::error::EntityError;

new_key_type! {
    pub struct SignKey;
    pub struct ChestKey;
    pub struct FrameKey;
}

/// Number of item slots in a container.
pub const CHEST_SLOTS: usize = 40;

/// An item stack as stored in containers and item frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ItemStack {
    pub net_id: i32,
    pub stack: i32,
    pub prefix: u8,
}

impl ItemStack {
    pub const fn new(net_id: i32, stack: i32, prefix: u8) -> Self {
        Self { net_id, stack, prefix }
    }

    pub const fn is_empty(&self) -> bool {
        self.net_id == 0 || self.stack <= 0
    }
}

/// Maximum number of live entities per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityLimits {
    pub signs: usize,
    pub chests: usize,
    pub item_frames: usize,
}

impl Default for EntityLimits {
    fn default() -> Self {
        Self {
            signs: 1000,
            chests: 8000,
            item_frames: 1000,
        }
    }
}

struct Sign {
    text: String,
}

struct Chest {
    items: Vec<ItemStack>,
}

struct ItemFrame {
    item: ItemStack,
}

/// Slot-allocated entity tables with an index by anchor position.
pub struct EntityStore {
    limits: EntityLimits,
    signs: SlotMap<SignKey, Sign>,
    sign_at: HashMap<TilePos, SignKey>,
    chests: SlotMap<ChestKey, Chest>,
    chest_at: HashMap<TilePos, ChestKey>,
    frames: SlotMap<FrameKey, ItemFrame>,
    frame_at: HashMap<TilePos, FrameKey>,
}

impl EntityStore {
    pub fn new(limits: EntityLimits) -> Self {
        Self {
            limits,
            signs: SlotMap::with_key(),
            sign_at: HashMap::new(),
            chests: SlotMap::with_key(),
            chest_at: HashMap::new(),
            frames: SlotMap::with_key(),
            frame_at: HashMap::new(),
        }
    }

    // ── Signs ────────────────────────────────────────────────────────────

    pub fn sign_text(&self, pos: TilePos) -> Option<&str> {
        let key = self.sign_at.get(&pos)?;
        self.signs.get(*key).map(|s| s.text.as_str())
    }

    /// Find or create the sign at `pos` and set its text.
    pub fn place_sign(&mut self, pos: TilePos, text: &str) -> Result<(), EntityError> {
        if let Some(sign) = self.sign_at.get(&pos).and_then(|k| self.signs.get_mut(*k)) {
            sign.text = text.to_owned();
            return Ok(());
        }
        if self.signs.len() >= self.limits.signs {
            return Err(EntityError::NoSlot(AnchorKind::Sign));
        }
        let key = self.signs.insert(Sign {
            text: text.to_owned(),
        });
        self.sign_at.insert(pos, key);
        Ok(())
    }

    pub fn kill_sign(&mut self, pos: TilePos) -> bool {
        match self.sign_at.remove(&pos) {
            Some(key) => self.signs.remove(key).is_some(),
            None => false,
        }
    }

    // ── Containers ───────────────────────────────────────────────────────

    pub fn chest_items(&self, pos: TilePos) -> Option<&[ItemStack]> {
        let key = self.chest_at.get(&pos)?;
        self.chests.get(*key).map(|c| c.items.as_slice())
    }

    /// Find or create the container at `pos` and fill its slots in order.
    /// Slots past `items.len()` are emptied; items past the last slot are dropped.
    pub fn place_chest(&mut self, pos: TilePos, items: &[ItemStack]) -> Result<(), EntityError> {
        let key = match self.chest_at.get(&pos) {
            Some(key) => *key,
            None => {
                if self.chests.len() >= self.limits.chests {
                    return Err(EntityError::NoSlot(AnchorKind::Container));
                }
                let key = self.chests.insert(Chest {
                    items: vec![ItemStack::default(); CHEST_SLOTS],
                });
                self.chest_at.insert(pos, key);
                key
            }
        };
        if items.len() > CHEST_SLOTS {
            tracing::warn!(
                "Container at ({}, {}) given {} items, keeping the first {}",
                pos.x,
                pos.y,
                items.len(),
                CHEST_SLOTS
            );
        }
        if let Some(chest) = self.chests.get_mut(key) {
            for (slot, item) in chest.items.iter_mut().enumerate() {
                *item = items.get(slot).copied().unwrap_or_default();
            }
        }
        Ok(())
    }

    pub fn kill_chest(&mut self, pos: TilePos) -> bool {
        match self.chest_at.remove(&pos) {
            Some(key) => self.chests.remove(key).is_some(),
            None => false,
        }
    }

    // ── Item frames ──────────────────────────────────────────────────────

    pub fn item_frame_item(&self, pos: TilePos) -> Option<ItemStack> {
        let key = self.frame_at.get(&pos)?;
        self.frames.get(*key).map(|f| f.item)
    }

    pub fn place_item_frame(&mut self, pos: TilePos, item: ItemStack) -> Result<(), EntityError> {
        if let Some(frame) = self.frame_at.get(&pos).and_then(|k| self.frames.get_mut(*k)) {
            frame.item = item;
            return Ok(());
        }
        if self.frames.len() >= self.limits.item_frames {
            return Err(EntityError::NoSlot(AnchorKind::ItemFrame));
        }
        let key = self.frames.insert(ItemFrame { item });
        self.frame_at.insert(pos, key);
        Ok(())
    }

    pub fn kill_item_frame(&mut self, pos: TilePos) -> bool {
        match self.frame_at.remove(&pos) {
            Some(key) => self.frames.remove(key).is_some(),
            None => false,
        }
    }

    pub fn sign_count(&self) -> usize {
        self.signs.len()
    }

    pub fn chest_count(&self) -> usize {
        self.chests.len()
    }

    pub fn item_frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new(EntityLimits::default())
    }
}
