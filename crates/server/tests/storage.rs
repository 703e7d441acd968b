//! Clipboard and schematic storage against a real folder.

use std::fs;
use std::path::PathBuf;

use worldedit_engine::region::Region;
use worldedit_engine::world::tile::Tile;
use worldedit_server::names::default_frame_table;
use worldedit_server::storage::Storage;

fn temp_storage(name: &str) -> (PathBuf, Storage) {
    let dir = std::env::temp_dir().join(format!("worldedit-storage-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let storage = Storage::open(&dir, default_frame_table()).unwrap();
    (dir, storage)
}

#[test]
fn clipboard_round_trip() {
    let (dir, storage) = temp_storage("clipboard");
    let region = Region::filled(3, 4, 5, 6, Tile::solid(30)).unwrap();

    assert!(!storage.has_clipboard(9));
    storage.write_clipboard(9, &region).unwrap();
    assert!(storage.has_clipboard(9));
    assert!(dir.join("clipboard-9.dat").exists());
    assert_eq!(storage.read_clipboard(9).unwrap(), region);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_clipboard_names_the_path() {
    let (dir, storage) = temp_storage("no-clipboard");
    let err = storage.read_clipboard(4).unwrap_err();
    assert!(err.to_string().contains("clipboard-4.dat"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn schematic_lifecycle() {
    let (dir, storage) = temp_storage("schematics");
    let region = Region::filled(0, 0, 2, 2, Tile::solid(1)).unwrap();
    storage.write_clipboard(1, &region).unwrap();

    storage.save_schematic(1, "tower").unwrap();
    storage.save_schematic(1, "arch").unwrap();
    assert_eq!(storage.list_schematics().unwrap(), vec!["arch".to_owned(), "tower".to_owned()]);

    storage.load_schematic(2, "tower").unwrap();
    assert_eq!(storage.read_clipboard(2).unwrap(), region);

    storage.delete_schematic("arch").unwrap();
    assert_eq!(storage.list_schematics().unwrap(), vec!["tower".to_owned()]);
    assert!(!dir.join("schematic-tower.dat.tmp").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_schematic_is_reported() {
    let (dir, storage) = temp_storage("missing-schematic");
    let err = storage.load_schematic(1, "castle").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("castle"));
    assert!(message.contains("schematic-castle.dat"));
    assert!(!storage.has_clipboard(1));

    assert!(storage.load_schematic(1, "../../etc/passwd").is_err());
    assert!(storage.save_schematic(1, "tower").is_err());
    let _ = fs::remove_dir_all(&dir);
}
