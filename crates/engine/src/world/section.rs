use super::position::LocalTilePos;
use super::tile::Tile;

/// Tiles along the x axis of one section.
pub const SECTION_WIDTH: usize = 200;
/// Tiles along the y axis of one section.
pub const SECTION_HEIGHT: usize = 150;
const SECTION_AREA: usize = SECTION_WIDTH * SECTION_HEIGHT;

/// A 200x150 block of tiles, the unit clients resync.
///
/// Stored as a flat column-major array so vertical scans (the inner loop
/// of every batch edit) stay contiguous. A section holding only empty
/// tiles is never kept allocated (see `World`).
#[derive(Clone)]
pub struct TileSection {
    tiles: Box<[Tile]>,
    /// Cells holding anything other than an empty tile.
    occupied: usize,
}

impl TileSection {
    pub fn new_empty() -> Self {
        Self {
            tiles: vec![Tile::default(); SECTION_AREA].into_boxed_slice(),
            occupied: 0,
        }
    }

    #[inline]
    const fn index(pos: LocalTilePos) -> usize {
        (pos.x as usize) * SECTION_HEIGHT + pos.y as usize
    }

    #[inline]
    pub fn get(&self, pos: LocalTilePos) -> Tile {
        self.tiles[Self::index(pos)]
    }

    #[inline]
    pub fn set(&mut self, pos: LocalTilePos, tile: Tile) {
        let slot = &mut self.tiles[Self::index(pos)];
        let empty = Tile::default();
        match (*slot == empty, tile == empty) {
            (true, false) => self.occupied += 1,
            (false, true) => self.occupied -= 1,
            _ => {}
        }
        *slot = tile;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_corners() {
        let mut s = TileSection::new_empty();
        assert!(s.is_empty());
        let far = LocalTilePos {
            x: (SECTION_WIDTH - 1) as u16,
            y: (SECTION_HEIGHT - 1) as u16,
        };
        s.set(far, Tile::solid(1));
        assert_eq!(s.get(far), Tile::solid(1));
        assert_eq!(s.get(LocalTilePos { x: 0, y: 0 }), Tile::default());
        assert!(!s.is_empty());
    }

    #[test]
    fn emptiness_follows_every_write() {
        let mut s = TileSection::new_empty();
        let a = LocalTilePos { x: 3, y: 4 };
        let b = LocalTilePos { x: 199, y: 0 };

        // Clearing an empty cell must not underflow the count.
        s.set(a, Tile::default());
        assert!(s.is_empty());

        s.set(a, Tile::solid(1));
        s.set(a, Tile::solid(2));
        s.set(b, Tile::solid(1));
        s.set(a, Tile::default());
        assert!(!s.is_empty());
        s.set(b, Tile::default());
        assert!(s.is_empty());

        let mut wall_only = Tile::default();
        wall_only.wall = 4;
        s.set(b, wall_only);
        assert!(!s.is_empty());
    }
}
