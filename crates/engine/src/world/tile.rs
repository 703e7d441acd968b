/// The three header flag words carried by every tile.
///
/// Codecs copy these verbatim. The bit assignments below are the host's;
/// the engine only reads the few it needs through [`Tile`] accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileHeader {
    pub flags: i16,
    pub flags2: u8,
    pub flags3: u8,
}

const COLOR_MASK: i16 = 0x001F;
const ACTIVE: i16 = 0x0020;
const HALF_BRICK: i16 = 0x0400;
const SLOPE_MASK: i16 = 0x7000;
const SLOPE_SHIFT: u32 = 12;

const WALL_COLOR_MASK: u8 = 0x1F;
const LIQUID_MASK: u8 = 0x60;
const LIQUID_SHIFT: u32 = 5;

/// Liquid amount of a full cell.
pub const FULL_LIQUID: u8 = 255;

/// Frame coordinate meaning "not framed".
pub const NO_FRAME: i16 = -1;

/// Which liquid a cell holds (meaningful only when the liquid amount is non-zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LiquidKind {
    #[default]
    Water,
    Lava,
    Honey,
}

impl LiquidKind {
    pub const fn selector(self) -> u8 {
        match self {
            LiquidKind::Water => 0,
            LiquidKind::Lava => 1,
            LiquidKind::Honey => 2,
        }
    }

    pub const fn from_selector(bits: u8) -> Self {
        match bits {
            1 => LiquidKind::Lava,
            2 => LiquidKind::Honey,
            _ => LiquidKind::Water,
        }
    }
}

/// Tile type ids the engine treats specially: anchors of objects that own
/// an out-of-band entity.
pub mod kinds {
    pub const CONTAINERS: u16 = 21;
    pub const SIGNS: u16 = 55;
    pub const TOMBSTONES: u16 = 85;
    pub const DRESSERS: u16 = 88;
    pub const ITEM_FRAME: u16 = 395;
    pub const ANNOUNCEMENT_BOX: u16 = 425;
    pub const CONTAINERS2: u16 = 467;
}

/// The entity family anchored at a multi-cell object's top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    Sign,
    Container,
    ItemFrame,
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub header: TileHeader,
    /// Tile type; meaningful only while active.
    pub kind: u16,
    pub frame_x: i16,
    pub frame_y: i16,
    pub wall: u8,
    pub liquid: u8,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            header: TileHeader::default(),
            kind: 0,
            frame_x: NO_FRAME,
            frame_y: NO_FRAME,
            wall: 0,
            liquid: 0,
        }
    }
}

impl Tile {
    /// An active, unframed tile of the given type.
    pub fn solid(kind: u16) -> Self {
        let mut tile = Self::default();
        tile.set_active(true);
        tile.kind = kind;
        tile
    }

    /// An inactive cell filled with liquid.
    pub fn liquid(kind: LiquidKind, amount: u8) -> Self {
        let mut tile = Self::default();
        tile.liquid = amount;
        tile.set_liquid_kind(kind);
        tile
    }

    pub fn active(&self) -> bool {
        self.header.flags & ACTIVE != 0
    }

    pub fn set_active(&mut self, active: bool) {
        if active {
            self.header.flags |= ACTIVE;
        } else {
            self.header.flags &= !ACTIVE;
        }
    }

    pub fn color(&self) -> u8 {
        (self.header.flags & COLOR_MASK) as u8
    }

    pub fn set_color(&mut self, color: u8) {
        self.header.flags = (self.header.flags & !COLOR_MASK) | (color as i16 & COLOR_MASK);
    }

    pub fn wall_color(&self) -> u8 {
        self.header.flags2 & WALL_COLOR_MASK
    }

    pub fn set_wall_color(&mut self, color: u8) {
        self.header.flags2 = (self.header.flags2 & !WALL_COLOR_MASK) | (color & WALL_COLOR_MASK);
    }

    pub fn slope(&self) -> u8 {
        ((self.header.flags & SLOPE_MASK) >> SLOPE_SHIFT) as u8
    }

    pub fn set_slope(&mut self, slope: u8) {
        self.header.flags =
            (self.header.flags & !SLOPE_MASK) | (((slope as i16) << SLOPE_SHIFT) & SLOPE_MASK);
    }

    pub fn half_brick(&self) -> bool {
        self.header.flags & HALF_BRICK != 0
    }

    pub fn set_half_brick(&mut self, half: bool) {
        if half {
            self.header.flags |= HALF_BRICK;
        } else {
            self.header.flags &= !HALF_BRICK;
        }
    }

    pub fn liquid_kind(&self) -> LiquidKind {
        LiquidKind::from_selector((self.header.flags2 & LIQUID_MASK) >> LIQUID_SHIFT)
    }

    pub fn set_liquid_kind(&mut self, kind: LiquidKind) {
        self.header.flags2 =
            (self.header.flags2 & !LIQUID_MASK) | ((kind.selector() << LIQUID_SHIFT) & LIQUID_MASK);
    }

    /// Remove any liquid from the cell.
    pub fn clear_liquid(&mut self) {
        self.liquid = 0;
        self.set_liquid_kind(LiquidKind::Water);
    }

    /// Drop the fields the tile record does not carry, so that a captured
    /// tile compares equal to its decoded copy.
    pub fn canonical(mut self, frame_important: bool) -> Self {
        if !self.active() {
            self.kind = 0;
        }
        if !(self.active() && frame_important) {
            self.frame_x = NO_FRAME;
            self.frame_y = NO_FRAME;
        }
        self
    }

    /// If this cell is the top-left anchor of a sign, container or item
    /// frame, the kind of entity it owns.
    pub fn anchor(&self) -> Option<AnchorKind> {
        if !self.active() || self.frame_x % 36 != 0 || self.frame_y != 0 {
            return None;
        }
        match self.kind {
            kinds::SIGNS | kinds::TOMBSTONES | kinds::ANNOUNCEMENT_BOX => Some(AnchorKind::Sign),
            kinds::CONTAINERS | kinds::DRESSERS | kinds::CONTAINERS2 => Some(AnchorKind::Container),
            kinds::ITEM_FRAME => Some(AnchorKind::ItemFrame),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_accessors_do_not_overlap() {
        let mut t = Tile::default();
        t.set_active(true);
        t.set_color(26);
        t.set_slope(3);
        t.set_wall_color(7);
        t.set_liquid_kind(LiquidKind::Honey);
        assert!(t.active());
        assert_eq!(t.color(), 26);
        assert_eq!(t.slope(), 3);
        assert_eq!(t.wall_color(), 7);
        assert_eq!(t.liquid_kind(), LiquidKind::Honey);

        t.set_active(false);
        assert_eq!(t.color(), 26);
        assert_eq!(t.slope(), 3);
    }

    #[test]
    fn liquid_selectors_are_distinct() {
        let kinds = [LiquidKind::Water, LiquidKind::Lava, LiquidKind::Honey];
        for a in kinds {
            assert_eq!(LiquidKind::from_selector(a.selector()), a);
        }
        assert_ne!(LiquidKind::Honey.selector(), LiquidKind::Water.selector());
    }

    #[test]
    fn anchor_requires_top_left_frame() {
        let mut chest = Tile::solid(kinds::CONTAINERS);
        chest.frame_x = 36;
        chest.frame_y = 0;
        assert_eq!(chest.anchor(), Some(AnchorKind::Container));

        chest.frame_x = 18;
        assert_eq!(chest.anchor(), None);

        chest.frame_x = 0;
        chest.frame_y = 18;
        assert_eq!(chest.anchor(), None);
    }

    #[test]
    fn canonical_clears_unencoded_fields() {
        let mut t = Tile::default();
        t.kind = 5;
        t.frame_x = 18;
        let c = t.canonical(true);
        assert_eq!(c.kind, 0);
        assert_eq!((c.frame_x, c.frame_y), (NO_FRAME, NO_FRAME));

        let mut framed = Tile::solid(kinds::SIGNS);
        framed.frame_x = 18;
        framed.frame_y = 0;
        assert_eq!(framed.canonical(true).frame_x, 18);
        assert_eq!(framed.canonical(false).frame_x, NO_FRAME);
    }
}
