use super::section::{SECTION_HEIGHT, SECTION_WIDTH};

/// Absolute tile position in the world grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The network section this tile belongs to.
    pub const fn section(&self) -> SectionPos {
        SectionPos {
            x: self.x.div_euclid(SECTION_WIDTH as i32),
            y: self.y.div_euclid(SECTION_HEIGHT as i32),
        }
    }

    /// Position within the section.
    pub const fn local(&self) -> LocalTilePos {
        LocalTilePos {
            x: self.x.rem_euclid(SECTION_WIDTH as i32) as u16,
            y: self.y.rem_euclid(SECTION_HEIGHT as i32) as u16,
        }
    }

    /// The eight surrounding positions.
    pub const fn neighbors(&self) -> [TilePos; 8] {
        [
            Self::new(self.x - 1, self.y),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y - 1),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y - 1),
            Self::new(self.x + 1, self.y + 1),
            Self::new(self.x - 1, self.y + 1),
            Self::new(self.x + 1, self.y - 1),
        ]
    }
}

/// Section position (each section is `SECTION_WIDTH` x `SECTION_HEIGHT` tiles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionPos {
    pub x: i32,
    pub y: i32,
}

impl SectionPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn tile_origin(&self) -> TilePos {
        TilePos::new(self.x * SECTION_WIDTH as i32, self.y * SECTION_HEIGHT as i32)
    }
}

/// Tile position local to a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTilePos {
    pub x: u16,
    pub y: u16,
}

/// An edit rectangle with inclusive bounds.
///
/// Rectangles coming from an operator may have their corners in any order;
/// call [`Rect::normalized`] before iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, x2: i32, y2: i32) -> Self {
        Self { x, y, x2, y2 }
    }

    /// Rectangle anchored at `(x, y)` spanning `width` x `height` tiles.
    pub const fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width - 1, y + height - 1)
    }

    /// Same rectangle with `x <= x2` and `y <= y2`.
    pub fn normalized(&self) -> Self {
        Self {
            x: self.x.min(self.x2),
            y: self.y.min(self.y2),
            x2: self.x.max(self.x2),
            y2: self.y.max(self.y2),
        }
    }

    pub const fn width(&self) -> i32 {
        self.x2 - self.x + 1
    }

    pub const fn height(&self) -> i32 {
        self.y2 - self.y + 1
    }

    pub const fn origin(&self) -> TilePos {
        TilePos::new(self.x, self.y)
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.x2 && y >= self.y && y <= self.y2
    }

    /// Overlap of two normalized rectangles, if any.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let r = Rect {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        };
        (r.x <= r.x2 && r.y <= r.y2).then_some(r)
    }

    /// Number of cells covered, zero for an inverted rectangle.
    pub fn area(&self) -> usize {
        if self.x > self.x2 || self.y > self.y2 {
            return 0;
        }
        self.width() as usize * self.height() as usize
    }

    /// Every cell, column by column (outer = x, inner = y).
    pub fn cells(&self) -> impl Iterator<Item = TilePos> + use<> {
        let Rect { x, y, x2, y2 } = *self;
        (x..=x2).flat_map(move |i| (y..=y2).map(move |j| TilePos::new(i, j)))
    }

    /// Every section this rectangle overlaps.
    pub fn sections(&self) -> impl Iterator<Item = SectionPos> + use<> {
        let low = TilePos::new(self.x, self.y).section();
        let high = TilePos::new(self.x2, self.y2).section();
        (low.x..=high.x).flat_map(move |sx| (low.y..=high.y).map(move |sy| SectionPos::new(sx, sy)))
    }
}
