//! Region stream:
//!
//! ```text
//! [i32 originX][i32 originY][i32 width][i32 height]
//! width*height tile records, column by column
//! [i32 signCount]  sign records
//! [i32 chestCount] chest records
//! [i32 frameCount] item frame records
//! ```
//!
//! Files written before entities were captured stop after the tiles. Any
//! of the three trailing sections may therefore be missing; a stream that
//! ends there decodes to a region with the lists read so far.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use super::entity::{decode_chest, decode_item_frame, decode_sign, encode_chest, encode_item_frame, encode_sign};
use super::tile::{decode_tile, encode_tile};
use super::{read_count, read_i32, truncated, write_count, write_i32};
use crate::error::CodecError;
use crate::host::FrameTable;
use crate::region::{Region, cell_count};

/// Buffer size for region file I/O (1 MiB).
pub const BUFFER_SIZE: usize = 1 << 20;

/// Largest number of elements preallocated from an untrusted count.
const PREALLOC_LIMIT: usize = 1 << 16;

// ── Raw stream ───────────────────────────────────────────────────────────

pub fn encode_region<W: Write>(region: &Region, w: &mut W, frames: &FrameTable) -> Result<(), CodecError> {
    let origin = region.origin();
    write_i32(w, origin.x)?;
    write_i32(w, origin.y)?;
    write_i32(w, region.width())?;
    write_i32(w, region.height())?;

    for tile in region.tiles() {
        encode_tile(w, tile, frames)?;
    }

    write_count(w, region.signs().len(), "sign")?;
    for sign in region.signs() {
        encode_sign(w, sign)?;
    }
    write_count(w, region.chests().len(), "chest")?;
    for chest in region.chests() {
        encode_chest(w, chest)?;
    }
    write_count(w, region.item_frames().len(), "item frame")?;
    for frame in region.item_frames() {
        encode_item_frame(w, frame)?;
    }
    Ok(())
}

pub fn decode_region<R: Read>(r: &mut R, frames: &FrameTable) -> Result<Region, CodecError> {
    let err = truncated("region header");
    let x = read_i32(r).map_err(&err)?;
    let y = read_i32(r).map_err(&err)?;
    let width = read_i32(r).map_err(&err)?;
    let height = read_i32(r).map_err(&err)?;
    let cells = cell_count(x, y, width, height)?;

    let mut tiles = Vec::with_capacity(cells.min(PREALLOC_LIMIT));
    for _ in 0..cells {
        tiles.push(decode_tile(r, frames)?);
    }
    let mut region = Region::new(x, y, width, height, tiles)?;

    let mut signs = Vec::new();
    let mut chests = Vec::new();
    let mut item_frames = Vec::new();
    match decode_entities(r, &mut signs, &mut chests, &mut item_frames) {
        Ok(()) => {}
        Err(e) if e.is_truncation() => {
            tracing::debug!(
                "Region stream ends before entity data ({}); keeping {} signs, {} chests, {} item frames",
                e,
                signs.len(),
                chests.len(),
                item_frames.len(),
            );
        }
        Err(e) => return Err(e),
    }
    region.set_entities(signs, chests, item_frames);
    Ok(region)
}

/// Read the three entity sections. Each list is only handed back once it
/// has been read completely.
fn decode_entities<R: Read>(
    r: &mut R,
    signs: &mut Vec<crate::region::SignData>,
    chests: &mut Vec<crate::region::ChestData>,
    item_frames: &mut Vec<crate::region::ItemFrameData>,
) -> Result<(), CodecError> {
    let count = read_count(r, "sign count")?;
    let mut list = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        list.push(decode_sign(r)?);
    }
    *signs = list;

    let count = read_count(r, "chest count")?;
    let mut list = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        list.push(decode_chest(r)?);
    }
    *chests = list;

    let count = read_count(r, "item frame count")?;
    let mut list = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        list.push(decode_item_frame(r)?);
    }
    *item_frames = list;
    Ok(())
}

// ── Compressed stream ────────────────────────────────────────────────────

/// Gzip-compress the region stream into `sink`, returning the sink once the
/// compressed stream is complete.
pub fn write_region<W: Write>(region: &Region, sink: W, frames: &FrameTable) -> Result<W, CodecError> {
    let mut writer = BufWriter::with_capacity(BUFFER_SIZE, GzEncoder::new(sink, Compression::default()));
    encode_region(region, &mut writer, frames)?;
    let encoder = writer.into_inner().map_err(|e| CodecError::Io(e.into_error()))?;
    Ok(encoder.finish()?)
}

pub fn read_region<R: Read>(source: R, frames: &FrameTable) -> Result<Region, CodecError> {
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, GzDecoder::new(source));
    decode_region(&mut reader, frames)
}

// ── Files ────────────────────────────────────────────────────────────────

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Save a region to `path`.
///
/// The stream is written to a sibling temporary file and renamed into place
/// only after the compressed stream has been finished and synced, so a
/// failed save never leaves a partial file at `path`.
pub fn save_region_file(path: &Path, region: &Region, frames: &FrameTable) -> Result<(), CodecError> {
    let start = Instant::now();
    let tmp = temp_path(path);

    let result = File::create(&tmp)
        .map_err(CodecError::from)
        .and_then(|file| write_region(region, file, frames))
        .and_then(|file| file.sync_all().map_err(CodecError::from))
        .and_then(|()| fs::rename(&tmp, path).map_err(CodecError::from));

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e.at(path));
    }

    tracing::info!(
        "Saved {}x{} region to {} ({:.2?})",
        region.width(),
        region.height(),
        path.display(),
        start.elapsed(),
    );
    Ok(())
}

pub fn load_region_file(path: &Path, frames: &FrameTable) -> Result<Region, CodecError> {
    let start = Instant::now();
    let file = File::open(path).map_err(|e| CodecError::from(e).at(path))?;
    let region = read_region(file, frames).map_err(|e| e.at(path))?;
    tracing::info!(
        "Loaded {}x{} region from {} ({:.2?})",
        region.width(),
        region.height(),
        path.display(),
        start.elapsed(),
    );
    Ok(region)
}
