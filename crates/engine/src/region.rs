//! Region snapshots: a rectangle of tiles plus the signs, containers and
//! item frames anchored inside it.
//!
//! Tiles are stored column-major (`index = i * height + j`), the same order
//! capture scans and the codec writes. Entity offsets are local to the
//! region origin and always lie inside the region.

use crate::edit::{EditAction, EditReport, TileFilter};
use crate::error::CodecError;
use crate::host::{EntityHost, Host, TileGrid};
use crate::world::entities::ItemStack;
use crate::world::position::{Rect, TilePos};
use crate::world::tile::{AnchorKind, Tile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignData {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

/// A container's contents; `items[n]` is slot `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChestData {
    pub x: i32,
    pub y: i32,
    pub items: Vec<ItemStack>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFrameData {
    pub x: i32,
    pub y: i32,
    pub item: ItemStack,
}

/// A captured rectangle of the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    signs: Vec<SignData>,
    chests: Vec<ChestData>,
    item_frames: Vec<ItemFrameData>,
}

impl Region {
    /// Build a region from column-major tiles.
    pub fn new(x: i32, y: i32, width: i32, height: i32, tiles: Vec<Tile>) -> Result<Self, CodecError> {
        let cells = cell_count(x, y, width, height)?;
        if tiles.len() != cells {
            return Err(CodecError::InvalidCount {
                what: "tile",
                count: tiles.len() as i64,
            });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
            tiles,
            signs: Vec::new(),
            chests: Vec::new(),
            item_frames: Vec::new(),
        })
    }

    /// A region where every cell holds `tile`.
    pub fn filled(x: i32, y: i32, width: i32, height: i32, tile: Tile) -> Result<Self, CodecError> {
        let cells = cell_count(x, y, width, height)?;
        Self::new(x, y, width, height, vec![tile; cells])
    }

    /// Snapshot `area` (normalized) from the host, scanning column by column.
    ///
    /// Tiles are stored in canonical form. Entities are collected at the
    /// anchor cells found during the same scan.
    pub fn capture<H: TileGrid + EntityHost + ?Sized>(host: &H, area: Rect) -> Self {
        let width = area.width();
        let height = area.height();
        let mut region = Self {
            x: area.x,
            y: area.y,
            width,
            height,
            tiles: Vec::with_capacity(area.area()),
            signs: Vec::new(),
            chests: Vec::new(),
            item_frames: Vec::new(),
        };

        for pos in area.cells() {
            let tile = host.tile(pos.x, pos.y);
            let tile = tile.canonical(host.is_frame_important(tile.kind));
            region.tiles.push(tile);

            let (lx, ly) = (pos.x - area.x, pos.y - area.y);
            match tile.anchor() {
                Some(AnchorKind::Sign) => {
                    if let Some(text) = host.sign_text(pos) {
                        region.signs.push(SignData { x: lx, y: ly, text });
                    }
                }
                Some(AnchorKind::Container) => {
                    if let Some(items) = host.chest_items(pos) {
                        region.chests.push(ChestData { x: lx, y: ly, items });
                    }
                }
                Some(AnchorKind::ItemFrame) => {
                    if let Some(item) = host.item_frame_item(pos) {
                        region.item_frames.push(ItemFrameData { x: lx, y: ly, item });
                    }
                }
                None => {}
            }
        }

        tracing::debug!(
            "Captured {}x{} region at ({}, {}): {} signs, {} chests, {} item frames",
            width,
            height,
            area.x,
            area.y,
            region.signs.len(),
            region.chests.len(),
            region.item_frames.len(),
        );
        region
    }

    pub fn origin(&self) -> TilePos {
        TilePos::new(self.x, self.y)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The rectangle this region was captured from.
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.x, self.y, self.width, self.height)
    }

    /// Tile at local offset `(i, j)`.
    pub fn tile(&self, i: i32, j: i32) -> Option<Tile> {
        if !self.contains_local(i, j) {
            return None;
        }
        self.tiles.get((i * self.height + j) as usize).copied()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn signs(&self) -> &[SignData] {
        &self.signs
    }

    pub fn chests(&self) -> &[ChestData] {
        &self.chests
    }

    pub fn item_frames(&self) -> &[ItemFrameData] {
        &self.item_frames
    }

    pub fn contains_local(&self, i: i32, j: i32) -> bool {
        i >= 0 && j >= 0 && i < self.width && j < self.height
    }

    /// Add a sign; rejected when its offset lies outside the region.
    pub fn push_sign(&mut self, sign: SignData) -> bool {
        let ok = self.contains_local(sign.x, sign.y);
        if ok {
            self.signs.push(sign);
        }
        ok
    }

    pub fn push_chest(&mut self, chest: ChestData) -> bool {
        let ok = self.contains_local(chest.x, chest.y);
        if ok {
            self.chests.push(chest);
        }
        ok
    }

    pub fn push_item_frame(&mut self, frame: ItemFrameData) -> bool {
        let ok = self.contains_local(frame.x, frame.y);
        if ok {
            self.item_frames.push(frame);
        }
        ok
    }

    /// Replace all three entity lists at once, dropping out-of-region entries.
    pub(crate) fn set_entities(
        &mut self,
        signs: Vec<SignData>,
        chests: Vec<ChestData>,
        item_frames: Vec<ItemFrameData>,
    ) {
        let before = signs.len() + chests.len() + item_frames.len();
        self.signs = signs.into_iter().filter(|s| self.contains_local(s.x, s.y)).collect();
        self.chests = chests.into_iter().filter(|c| self.contains_local(c.x, c.y)).collect();
        self.item_frames = item_frames
            .into_iter()
            .filter(|f| self.contains_local(f.x, f.y))
            .collect();
        let kept = self.signs.len() + self.chests.len() + self.item_frames.len();
        if kept < before {
            tracing::warn!("Dropped {} entities anchored outside the region", before - kept);
        }
    }
}

/// Number of cells in a region, rejecting sizes that are empty, too large,
/// or whose far corner does not fit in `i32`.
pub(crate) fn cell_count(x: i32, y: i32, width: i32, height: i32) -> Result<usize, CodecError> {
    let invalid = CodecError::InvalidDimensions { width, height };
    if width <= 0 || height <= 0 {
        return Err(invalid);
    }
    if x.checked_add(width - 1).is_none() || y.checked_add(height - 1).is_none() {
        return Err(invalid);
    }
    (width as usize).checked_mul(height as usize).ok_or(invalid)
}

// ── Placement ────────────────────────────────────────────────────────────

/// Which corner of the destination rectangle a paste anchor is.
///
/// Bit 0 set: the region grows left from the anchor. Bit 1 set: it grows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Alignment {
    pub grow_left: bool,
    pub grow_up: bool,
}

impl Alignment {
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            grow_left: bits & 1 != 0,
            grow_up: bits & 2 != 0,
        }
    }

    /// Destination rectangle of a `width` x `height` paste at `anchor`, or
    /// `None` when a corner would fall outside the `i32` range.
    pub fn destination(self, anchor: TilePos, width: i32, height: i32) -> Option<Rect> {
        let (x, x2) = span(anchor.x, width, self.grow_left)?;
        let (y, y2) = span(anchor.y, height, self.grow_up)?;
        Some(Rect::new(x, y, x2, y2))
    }
}

fn span(anchor: i32, len: i32, backwards: bool) -> Option<(i32, i32)> {
    let reach = len.checked_sub(1)?;
    if backwards {
        Some((anchor.checked_sub(reach)?, anchor))
    } else {
        Some((anchor, anchor.checked_add(reach)?))
    }
}

/// Write every region cell at `origin + (i, j)`, skipping cells outside the
/// grid or rejected by `filter` (which sees the source tile), then recreate
/// the region's entities. An entity anchored at an overwritten cell is
/// destroyed first. Returns the number of cells written.
pub(crate) fn apply_region<H: Host + ?Sized>(
    host: &H,
    region: &Region,
    origin: TilePos,
    filter: Option<TileFilter<'_>>,
) -> usize {
    let mut applied = 0;
    for i in 0..region.width {
        for j in 0..region.height {
            let (Some(x), Some(y)) = (origin.x.checked_add(i), origin.y.checked_add(j)) else {
                continue;
            };
            if !host.in_bounds(x, y) {
                continue;
            }
            let tile = region.tiles[(i * region.height + j) as usize];
            if filter.is_some_and(|f| !f(&tile)) {
                continue;
            }
            destroy_anchored(host, TilePos::new(x, y));
            host.set_tile(x, y, tile);
            applied += 1;
        }
    }
    place_entities(host, region, origin);
    applied
}

/// Destroy the sign, container or item frame anchored at `pos`, if any.
pub(crate) fn destroy_anchored<H: Host + ?Sized>(host: &H, pos: TilePos) {
    match host.tile(pos.x, pos.y).anchor() {
        Some(AnchorKind::Sign) => {
            host.kill_sign(pos);
        }
        Some(AnchorKind::Container) => {
            host.kill_chest(pos);
        }
        Some(AnchorKind::ItemFrame) => {
            host.kill_item_frame(pos);
        }
        None => {}
    }
}

fn place_entities<H: Host + ?Sized>(host: &H, region: &Region, origin: TilePos) {
    let at = |x: i32, y: i32| {
        let pos = TilePos::new(origin.x.checked_add(x)?, origin.y.checked_add(y)?);
        host.in_bounds(pos.x, pos.y).then_some(pos)
    };

    for sign in &region.signs {
        let Some(pos) = at(sign.x, sign.y) else {
            continue;
        };
        if let Err(e) = host.place_sign(pos, &sign.text) {
            tracing::warn!("Skipping sign at ({}, {}): {}", pos.x, pos.y, e);
        }
    }

    for frame in &region.item_frames {
        let Some(pos) = at(frame.x, frame.y) else {
            continue;
        };
        if let Err(e) = host.place_item_frame(pos, frame.item) {
            tracing::warn!("Skipping item frame at ({}, {}): {}", pos.x, pos.y, e);
        }
    }

    for chest in &region.chests {
        let Some(pos) = at(chest.x, chest.y) else {
            continue;
        };
        if let Err(e) = host.place_chest(pos, &chest.items) {
            tracing::warn!("Skipping chest at ({}, {}): {}", pos.x, pos.y, e);
        }
    }
}

/// Restore a region exactly where it was captured, with no filter and no
/// undo snapshot. Used for schematic restore and undo/redo replay.
pub fn load_section<H: Host + ?Sized>(host: &H, region: &Region) -> EditReport {
    let area = region.rect();
    let changed = apply_region(host, region, region.origin(), None);
    host.mark_dirty(area);
    tracing::debug!(
        "Loaded {}x{} section at ({}, {}): {} cells",
        region.width,
        region.height,
        region.x,
        region.y,
        changed
    );
    EditReport {
        action: EditAction::LoadSection,
        changed,
        area,
    }
}
