//! Tile record layout:
//!
//! ```text
//! [i16 flags][u8 flags2][u8 flags3]
//! [u16 type]                 if active
//! [i16 frameX][i16 frameY]   if active and the type is frame-important
//! [u8 wall][u8 liquid]
//! ```

use std::io::{Read, Write};

use super::{read_i16, read_u8, read_u16, truncated, write_i16, write_u8, write_u16};
use crate::error::CodecError;
use crate::host::FrameTable;
use crate::world::tile::{Tile, TileHeader};

const WHAT: &str = "tile record";

pub fn encode_tile<W: Write>(w: &mut W, tile: &Tile, frames: &FrameTable) -> Result<(), CodecError> {
    write_i16(w, tile.header.flags)?;
    write_u8(w, tile.header.flags2)?;
    write_u8(w, tile.header.flags3)?;

    if tile.active() {
        write_u16(w, tile.kind)?;
        if frames.is_important(tile.kind) {
            write_i16(w, tile.frame_x)?;
            write_i16(w, tile.frame_y)?;
        }
    }
    write_u8(w, tile.wall)?;
    write_u8(w, tile.liquid)?;
    Ok(())
}

pub fn decode_tile<R: Read>(r: &mut R, frames: &FrameTable) -> Result<Tile, CodecError> {
    let err = truncated(WHAT);
    let mut tile = Tile {
        header: TileHeader {
            flags: read_i16(r).map_err(&err)?,
            flags2: read_u8(r).map_err(&err)?,
            flags3: read_u8(r).map_err(&err)?,
        },
        ..Tile::default()
    };

    if tile.active() {
        tile.kind = read_u16(r).map_err(&err)?;
        if frames.is_important(tile.kind) {
            tile.frame_x = read_i16(r).map_err(&err)?;
            tile.frame_y = read_i16(r).map_err(&err)?;
        }
    }
    tile.wall = read_u8(r).map_err(&err)?;
    tile.liquid = read_u8(r).map_err(&err)?;
    Ok(tile)
}
