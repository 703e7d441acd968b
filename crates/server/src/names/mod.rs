//! Resolve user-supplied tile, wall, paint and slope names to host ids.
//!
//! Every resolver accepts either a numeric id or an exact (case-insensitive)
//! name from [`tables`].

pub mod tables;

use anyhow::{Result, bail};
use worldedit_engine::host::FrameTable;
use worldedit_engine::tile_state::TargetCode;

use tables::{COLORS, FRAME_IMPORTANT, PSEUDO_TILES, SLOPES, TILES, WALLS};

/// The frame-important table of the host's tile types.
pub fn default_frame_table() -> FrameTable {
    FrameTable::new(FRAME_IMPORTANT.iter().copied())
}

fn lookup<T: Copy>(table: &[(T, &str)], name: &str) -> Option<T> {
    table.iter().find(|(_, n)| *n == name).map(|(id, _)| *id)
}

fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

pub fn resolve_tile(input: &str) -> Result<TargetCode> {
    let name = normalize(input);
    if let Ok(code) = name.parse::<i32>() {
        let known = TILES.iter().any(|(id, _)| *id as i32 == code) || PSEUDO_TILES.iter().any(|(id, _)| *id == code);
        if !known {
            bail!("invalid tile '{}'", input);
        }
        return Ok(TargetCode::from_code(code)?);
    }
    let code = lookup(PSEUDO_TILES, &name).or_else(|| lookup(TILES, &name).map(i32::from));
    match code {
        Some(code) => Ok(TargetCode::from_code(code)?),
        None => bail!("invalid tile '{}'", input),
    }
}

pub fn resolve_wall(input: &str) -> Result<u8> {
    let name = normalize(input);
    let wall = match name.parse::<u8>() {
        Ok(id) => WALLS.iter().any(|(w, _)| *w == id).then_some(id),
        Err(_) => lookup(WALLS, &name),
    };
    match wall {
        Some(wall) => Ok(wall),
        None => bail!("invalid wall '{}'", input),
    }
}

pub fn resolve_color(input: &str) -> Result<u8> {
    let name = normalize(input);
    let color = match name.parse::<u8>() {
        Ok(id) => COLORS.iter().any(|(c, _)| *c == id).then_some(id),
        Err(_) => lookup(COLORS, &name),
    };
    match color {
        Some(color) => Ok(color),
        None => bail!("invalid color '{}'", input),
    }
}

pub fn resolve_slope(input: &str) -> Result<u8> {
    let name = normalize(input);
    let slope = match name.parse::<u8>() {
        Ok(id) => SLOPES.iter().any(|(s, _)| *s == id).then_some(id),
        Err(_) => lookup(SLOPES, &name),
    };
    match slope {
        Some(slope) => Ok(slope),
        None => bail!("invalid slope '{}'", input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_by_name_and_number() {
        assert_eq!(resolve_tile("Stone").unwrap(), TargetCode::Tile(1));
        assert_eq!(resolve_tile("gray brick").unwrap(), TargetCode::Tile(38));
        assert_eq!(resolve_tile("53").unwrap(), TargetCode::Tile(53));
        assert_eq!(resolve_tile("lava").unwrap(), TargetCode::Lava);
        assert_eq!(resolve_tile("-4").unwrap(), TargetCode::Water);
    }

    #[test]
    fn unknown_names_are_reported() {
        let err = resolve_tile("unobtanium").unwrap_err();
        assert!(err.to_string().contains("unobtanium"));
        assert!(resolve_tile("-9").is_err());
        assert!(resolve_wall("velvet").is_err());
        assert!(resolve_color("99").is_err());
        assert!(resolve_slope("sideways").is_err());
    }

    #[test]
    fn walls_colors_slopes() {
        assert_eq!(resolve_wall("air").unwrap(), 0);
        assert_eq!(resolve_wall("Planked").unwrap(), 27);
        assert_eq!(resolve_color("blank").unwrap(), 0);
        assert_eq!(resolve_color("deep sky blue").unwrap(), 20);
        assert_eq!(resolve_slope("ur").unwrap(), resolve_slope("tr").unwrap());
        assert_eq!(resolve_slope("dl").unwrap(), 5);
    }

    #[test]
    fn names_are_unique_per_table() {
        fn unique<T>(table: &[(T, &str)]) -> bool {
            let mut names: Vec<&str> = table.iter().map(|(_, n)| *n).collect();
            names.sort_unstable();
            names.windows(2).all(|w| w[0] != w[1])
        }
        assert!(unique(TILES));
        assert!(unique(WALLS));
        assert!(unique(COLORS));
        assert!(unique(SLOPES));
        assert!(unique(PSEUDO_TILES));
    }

    #[test]
    fn frame_table_covers_entity_anchors() {
        let frames = default_frame_table();
        for kind in [21, 55, 85, 88, 395, 425, 467] {
            assert!(frames.is_important(kind), "{} should be frame-important", kind);
        }
        assert!(!frames.is_important(1));
    }
}
