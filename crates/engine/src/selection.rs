//! Selection shapes: which cells inside an edit rectangle are eligible.
//!
//! A selection is evaluated per cell against the operator's current
//! selection rectangle. It is always combined (AND) with rectangle
//! membership and the optional content filter.

use std::fmt;
use std::str::FromStr;

use crate::error::EditError;
use crate::host::TileGrid;
use crate::world::position::{Rect, TilePos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    Normal,
    /// Cells where `i + j` is odd.
    Checkers,
    /// Cells where `i + j` is even.
    AltCheckers,
    /// The perimeter of the selection rectangle.
    Border,
    /// Active cells with at least one inactive neighbour (8-connected).
    Outline,
    /// Diagonal from the top-left corner.
    Diagonal45,
    /// Anti-diagonal from the top-right corner.
    Diagonal225,
}

impl Selection {
    pub const ALL: [Selection; 7] = [
        Selection::Normal,
        Selection::Checkers,
        Selection::AltCheckers,
        Selection::Border,
        Selection::Outline,
        Selection::Diagonal45,
        Selection::Diagonal225,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Selection::Normal => "normal",
            Selection::Checkers => "checkers",
            Selection::AltCheckers => "altcheckers",
            Selection::Border => "border",
            Selection::Outline => "outline",
            Selection::Diagonal45 => "45",
            Selection::Diagonal225 => "225",
        }
    }

    /// Whether cell `(i, j)` is selected. `area` is the operator's selection
    /// rectangle; its corners may be in any order.
    pub fn contains<G: TileGrid + ?Sized>(self, i: i32, j: i32, area: &Rect, grid: &G) -> bool {
        match self {
            Selection::Normal => true,
            Selection::Checkers => (i + j) & 1 == 1,
            Selection::AltCheckers => (i + j) & 1 == 0,
            Selection::Border => i == area.x || i == area.x2 || j == area.y || j == area.y2,
            Selection::Outline => is_outline(i, j, grid),
            Selection::Diagonal45 => {
                let x = area.x.min(area.x2);
                let y = area.y.min(area.y2);
                i - x == j - y
            }
            Selection::Diagonal225 => {
                let x2 = area.x.max(area.x2);
                let y = area.y.min(area.y2);
                x2 - i == j - y
            }
        }
    }
}

/// Edge detection over the whole grid; reads tiles outside the selection.
fn is_outline<G: TileGrid + ?Sized>(i: i32, j: i32, grid: &G) -> bool {
    let (max_x, max_y) = grid.bounds();
    if i <= 0 || j <= 0 || i >= max_x - 1 || j >= max_y - 1 {
        return false;
    }
    if !grid.tile(i, j).active() {
        return false;
    }
    TilePos::new(i, j)
        .neighbors()
        .iter()
        .any(|n| !grid.tile(n.x, n.y).active())
}

impl FromStr for Selection {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Selection::ALL
            .into_iter()
            .find(|sel| sel.name() == lower)
            .ok_or_else(|| EditError::InvalidSelection(s.to_owned()))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FrameTable;
    use crate::world::World;
    use crate::world::tile::Tile;

    fn grid() -> World {
        World::new(20, 20, FrameTable::default())
    }

    #[test]
    fn names_round_trip() {
        for sel in Selection::ALL {
            assert_eq!(sel.name().parse::<Selection>().unwrap(), sel);
        }
        assert_eq!("Border".parse::<Selection>().unwrap(), Selection::Border);
        assert!(matches!(
            "zigzag".parse::<Selection>(),
            Err(EditError::InvalidSelection(name)) if name == "zigzag"
        ));
    }

    #[test]
    fn border_of_unnormalized_selection() {
        let g = grid();
        let area = Rect::new(5, 5, 2, 2);
        assert!(Selection::Border.contains(2, 3, &area, &g));
        assert!(Selection::Border.contains(4, 5, &area, &g));
        assert!(!Selection::Border.contains(3, 3, &area, &g));
    }

    #[test]
    fn diagonals() {
        let g = grid();
        let area = Rect::new(6, 2, 2, 6);
        assert!(Selection::Diagonal45.contains(2, 2, &area, &g));
        assert!(Selection::Diagonal45.contains(5, 5, &area, &g));
        assert!(!Selection::Diagonal45.contains(5, 4, &area, &g));
        assert!(Selection::Diagonal225.contains(6, 2, &area, &g));
        assert!(Selection::Diagonal225.contains(2, 6, &area, &g));
        assert!(!Selection::Diagonal225.contains(2, 2, &area, &g));
    }

    #[test]
    fn outline_of_solid_block() {
        let g = grid();
        for x in 5..=9 {
            for y in 5..=9 {
                g.put_tile(TilePos::new(x, y), Tile::solid(1));
            }
        }
        let area = Rect::new(0, 0, 19, 19);
        assert!(Selection::Outline.contains(5, 5, &area, &g));
        assert!(Selection::Outline.contains(7, 9, &area, &g));
        assert!(!Selection::Outline.contains(7, 7, &area, &g));
        assert!(!Selection::Outline.contains(3, 3, &area, &g));
    }

    #[test]
    fn outline_ignores_grid_edge() {
        let g = grid();
        g.put_tile(TilePos::new(0, 4), Tile::solid(1));
        let area = Rect::new(0, 0, 19, 19);
        assert!(!Selection::Outline.contains(0, 4, &area, &g));
    }
}
