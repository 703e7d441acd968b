//! Region codec tests: full round trips through the gzip stream and files,
//! plus decoding of streams that end early.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use worldedit_engine::codec::{decode_region, encode_region, load_region_file, read_region, save_region_file, write_region};
use worldedit_engine::host::{EntityHost, FrameTable, TileGrid};
use worldedit_engine::region::{ChestData, ItemFrameData, Region, SignData};
use worldedit_engine::world::World;
use worldedit_engine::world::entities::ItemStack;
use worldedit_engine::world::position::{Rect, TilePos};
use worldedit_engine::world::tile::{LiquidKind, Tile, kinds};
use worldedit_engine::CodecError;

fn frames() -> FrameTable {
    FrameTable::new([kinds::CONTAINERS, kinds::SIGNS, kinds::ITEM_FRAME])
}

/// A 6x4 region with a bit of everything in it.
fn sample_region() -> Region {
    let mut tiles = Vec::new();
    for i in 0..6 {
        for j in 0..4 {
            let mut tile = match (i + j) % 3 {
                0 => Tile::solid(1 + i as u16),
                1 => Tile::liquid(LiquidKind::Honey, 80),
                _ => Tile::default(),
            };
            tile.wall = j as u8;
            tile.set_wall_color(3);
            tiles.push(tile);
        }
    }
    let mut sign = Tile::solid(kinds::SIGNS);
    sign.frame_x = 0;
    sign.frame_y = 0;
    tiles[1 * 4 + 1] = sign;

    let mut region = Region::new(100, 50, 6, 4, tiles).unwrap();
    assert!(region.push_sign(SignData {
        x: 1,
        y: 1,
        text: "héllo\nworld".into(),
    }));
    assert!(region.push_chest(ChestData {
        x: 3,
        y: 0,
        items: vec![ItemStack::new(74, 99, 0), ItemStack::default(), ItemStack::new(3507, 1, 81)],
    }));
    assert!(region.push_item_frame(ItemFrameData {
        x: 5,
        y: 3,
        item: ItemStack::new(29, 1, 0),
    }));
    region
}

fn raw_stream(region: &Region) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_region(region, &mut buf, &frames()).unwrap();
    buf
}

fn gzip(raw: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).unwrap();
    encoder.finish().unwrap()
}

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("worldedit-engine-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn compressed_round_trip() {
    let region = sample_region();
    let bytes = write_region(&region, Vec::new(), &frames()).unwrap();
    let decoded = read_region(bytes.as_slice(), &frames()).unwrap();
    assert_eq!(decoded, region);
}

#[test]
fn captured_world_round_trip() {
    let world = World::new(60, 40, frames());
    for x in 10..20 {
        world.set_tile(x, 30, Tile::solid(2));
    }
    world.set_tile(12, 29, Tile::liquid(LiquidKind::Lava, 255));
    world.place_object(15, 20, kinds::CONTAINERS);
    world.place_chest(TilePos::new(15, 20), &[ItemStack::new(8, 20, 0)]).unwrap();

    let region = Region::capture(&world, Rect::new(10, 18, 20, 31));
    assert_eq!(region.chests().len(), 1);
    assert_eq!((region.chests()[0].x, region.chests()[0].y), (5, 2));

    let bytes = write_region(&region, Vec::new(), world.frame_table()).unwrap();
    let decoded = read_region(bytes.as_slice(), world.frame_table()).unwrap();
    assert_eq!(decoded, region);
}

#[test]
fn file_round_trip_leaves_no_temp_file() {
    let dir = temp_dir("file");
    let path = dir.join("schematic-house.dat");
    let region = sample_region();

    save_region_file(&path, &region, &frames()).unwrap();
    assert!(path.exists());
    assert!(!dir.join("schematic-house.dat.tmp").exists());

    let loaded = load_region_file(&path, &frames()).unwrap();
    assert_eq!(loaded, region);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_names_the_path() {
    let dir = temp_dir("missing");
    let path = dir.join("clipboard-7.dat");
    let err = load_region_file(&path, &frames()).unwrap_err();
    assert!(matches!(err, CodecError::File { .. }));
    assert!(err.to_string().contains("clipboard-7.dat"));
    let _ = std::fs::remove_dir_all(&dir);
}

// ---------------------------------------------------------------------------
// Early end of stream
// ---------------------------------------------------------------------------

#[test]
fn legacy_stream_without_entity_sections() {
    let region = Region::new(100, 50, 6, 4, sample_region().tiles().to_vec()).unwrap();

    let mut raw = raw_stream(&region);
    // Three zero counts.
    raw.truncate(raw.len() - 12);

    let decoded = read_region(gzip(&raw).as_slice(), &frames()).unwrap();
    assert_eq!(decoded, region);
    assert!(decoded.signs().is_empty());
    assert!(decoded.chests().is_empty());
    assert!(decoded.item_frames().is_empty());
}

#[test]
fn stream_ending_inside_chests_keeps_signs() {
    let region = sample_region();
    let raw = raw_stream(&region);
    // Item frame section is 4 + (8 + 9) bytes; drop it plus the tail of the
    // last chest item.
    let cut = raw.len() - (4 + 8 + 9) - 5;
    let decoded = decode_region(&mut &raw[..cut], &frames()).unwrap();

    assert_eq!(decoded.tiles(), region.tiles());
    assert_eq!(decoded.signs(), region.signs());
    assert!(decoded.chests().is_empty());
    assert!(decoded.item_frames().is_empty());
}

#[test]
fn stream_ending_inside_tiles_is_an_error() {
    let raw = raw_stream(&sample_region());
    let err = decode_region(&mut &raw[..40], &frames()).unwrap_err();
    assert!(err.is_truncation());
    assert!(matches!(err, CodecError::Truncated { .. }));
}

#[test]
fn non_positive_dimensions_are_rejected() {
    let mut raw = Vec::new();
    for v in [0i32, 0, 0, 5] {
        raw.extend_from_slice(&v.to_le_bytes());
    }
    let err = decode_region(&mut raw.as_slice(), &frames()).unwrap_err();
    assert!(matches!(err, CodecError::InvalidDimensions { width: 0, height: 5 }));
}

#[test]
fn origin_overflowing_far_corner_is_rejected() {
    let mut raw = Vec::new();
    for v in [i32::MAX - 1, 0, 4, 1] {
        raw.extend_from_slice(&v.to_le_bytes());
    }
    let err = decode_region(&mut raw.as_slice(), &frames()).unwrap_err();
    assert!(matches!(err, CodecError::InvalidDimensions { width: 4, height: 1 }));
}

#[test]
fn negative_entity_count_is_corruption() {
    let region = Region::filled(0, 0, 2, 2, Tile::default()).unwrap();
    let mut raw = raw_stream(&region);
    let signs_at = raw.len() - 12;
    raw[signs_at..signs_at + 4].copy_from_slice(&(-3i32).to_le_bytes());
    let err = decode_region(&mut raw.as_slice(), &frames()).unwrap_err();
    assert!(matches!(err, CodecError::InvalidCount { count: -3, .. }));
}
