//! The edit queue end to end: commands in, reports out, world and files
//! changed.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use worldedit_engine::edit::Operator;
use worldedit_engine::host::{EntityHost, TileGrid};
use worldedit_engine::region::Alignment;
use worldedit_engine::selection::Selection;
use worldedit_engine::tile_state::TargetCode;
use worldedit_engine::world::World;
use worldedit_engine::world::position::{Rect, TilePos};
use worldedit_engine::world::tile::{Tile, kinds};
use worldedit_server::names::default_frame_table;
use worldedit_server::queue::{EditCommand, EditQueue, SharedFilter};
use worldedit_server::storage::Storage;
use worldedit_server::undo::FileUndoLog;

struct Fixture {
    dir: PathBuf,
    world: Arc<World>,
    storage: Arc<Storage>,
    queue: EditQueue,
}

fn fixture(name: &str) -> Fixture {
    let dir = std::env::temp_dir().join(format!("worldedit-queue-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let world = Arc::new(World::new(300, 200, default_frame_table()));
    let storage = Arc::new(Storage::open(&dir, default_frame_table()).unwrap());
    let undo = FileUndoLog::new(Arc::clone(&storage), 5).unwrap();
    let queue = EditQueue::start(Arc::clone(&world), Arc::clone(&storage), undo, 8);
    Fixture {
        dir,
        world,
        storage,
        queue,
    }
}

fn set(operator: Operator, target: TargetCode) -> EditCommand {
    EditCommand::SetTile {
        operator,
        target,
        selection: Selection::Normal,
        filter: None,
    }
}

fn active_count(world: &World, area: Rect) -> usize {
    area.cells().filter(|p| world.tile(p.x, p.y).active()).count()
}

#[tokio::test]
async fn set_undo_redo() {
    let f = fixture("undo");
    let op = Operator::new(1, Rect::new(10, 10, 19, 14));

    let reply = f.queue.submit(set(op, TargetCode::Tile(1))).await.unwrap();
    assert!(reply.contains("50 modified"), "{}", reply);
    assert_eq!(active_count(&f.world, op.selection), 50);

    let reply = f.queue.submit(EditCommand::Undo { operator: 1, steps: 1 }).await.unwrap();
    assert!(reply.contains('1'), "{}", reply);
    assert_eq!(active_count(&f.world, op.selection), 0);

    f.queue.submit(EditCommand::Redo { operator: 1, steps: 1 }).await.unwrap();
    assert_eq!(active_count(&f.world, op.selection), 50);

    f.queue.shutdown().await.unwrap();
    let _ = fs::remove_dir_all(&f.dir);
}

#[tokio::test]
async fn copy_paste_through_clipboard() {
    let f = fixture("clipboard");
    let source = Rect::new(20, 20, 24, 22);
    for pos in source.cells() {
        f.world.set_tile(pos.x, pos.y, Tile::solid(38));
    }
    f.world.place_object(20, 20, kinds::SIGNS);
    f.world.place_sign(TilePos::new(20, 20), "hello").unwrap();

    let op = Operator::new(3, source);
    f.queue.submit(EditCommand::Copy { operator: op }).await.unwrap();
    assert!(f.storage.has_clipboard(3));

    let skip_air: SharedFilter = Arc::new(|t: &Tile| t.active());
    let reply = f
        .queue
        .submit(EditCommand::Paste {
            operator: op,
            anchor: TilePos::new(104, 50),
            alignment: Alignment::from_bits(1),
            filter: Some(skip_air),
        })
        .await
        .unwrap();
    assert!(reply.contains("15 modified"), "{}", reply);
    assert!(f.world.tile(100, 50).active());
    assert_eq!(f.world.sign_text(TilePos::new(100, 50)).as_deref(), Some("hello"));

    f.queue.shutdown().await.unwrap();
    let _ = fs::remove_dir_all(&f.dir);
}

#[tokio::test]
async fn cut_fills_clipboard_and_clears() {
    let f = fixture("cut");
    let area = Rect::new(5, 5, 9, 9);
    for pos in area.cells() {
        f.world.set_tile(pos.x, pos.y, Tile::solid(1));
    }
    f.queue
        .submit(EditCommand::Cut {
            operator: Operator::new(1, area),
        })
        .await
        .unwrap();
    assert_eq!(active_count(&f.world, area), 0);
    assert_eq!(active_count_region(&f.storage, 1), 25);

    f.queue.shutdown().await.unwrap();
    let _ = fs::remove_dir_all(&f.dir);
}

fn active_count_region(storage: &Storage, operator: i32) -> usize {
    let region = storage.read_clipboard(operator).unwrap();
    region.tiles().iter().filter(|t| t.active()).count()
}

#[tokio::test]
async fn failures_are_replies_not_crashes() {
    let f = fixture("failures");
    let op = Operator::new(1, Rect::new(0, 0, 5, 5));

    let err = f
        .queue
        .submit(EditCommand::Paste {
            operator: op,
            anchor: TilePos::new(0, 0),
            alignment: Alignment::default(),
            filter: None,
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("clipboard-1.dat"));

    let err = f
        .queue
        .submit(EditCommand::LoadSchematic {
            operator: 1,
            name: "nope".into(),
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("nope"));

    let err = f
        .queue
        .submit(EditCommand::PaintWall {
            operator: op,
            color: 200,
            selection: Selection::Normal,
            filter: None,
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("200"));

    // The worker is still alive.
    let reply = f.queue.submit(set(op, TargetCode::Water)).await.unwrap();
    assert!(reply.contains("36 modified"), "{}", reply);

    f.queue.shutdown().await.unwrap();
    let _ = fs::remove_dir_all(&f.dir);
}

#[tokio::test]
async fn commands_run_in_submission_order() {
    let f = fixture("order");
    let op = Operator::new(1, Rect::new(0, 0, 0, 0));
    let queue = Arc::new(f.queue);

    let first = {
        let queue = Arc::clone(&queue);
        tokio::spawn(async move { queue.submit(set(op, TargetCode::Tile(1))).await })
    };
    let first = first.await.unwrap().unwrap();
    let second = queue.submit(set(op, TargetCode::Tile(2))).await.unwrap();
    assert!(first.contains("1 modified"));
    assert!(second.contains("1 modified"));
    assert_eq!(f.world.tile(0, 0).kind, 2);

    drop(queue);
    let _ = fs::remove_dir_all(&f.dir);
}
