use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use worldedit_engine::edit::Operator;
use worldedit_engine::host::{EntityHost, TileGrid};
use worldedit_engine::region::Alignment;
use worldedit_engine::selection::Selection;
use worldedit_engine::world::World;
use worldedit_engine::world::entities::ItemStack;
use worldedit_engine::world::position::{Rect, TilePos};
use worldedit_engine::world::tile::{Tile, kinds};
use worldedit_server::config::Config;
use worldedit_server::names::{self, resolve_color, resolve_slope, resolve_tile, resolve_wall};
use worldedit_server::queue::{EditCommand, EditQueue, SharedFilter};
use worldedit_server::storage::Storage;
use worldedit_server::undo::FileUndoLog;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path: PathBuf = std::env::args()
        .skip_while(|a| a != "--config")
        .nth(1)
        .unwrap_or_else(|| "worldedit.json".into())
        .into();
    let folder_override = std::env::args().skip_while(|a| a != "--folder").nth(1);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = Config::load(&config_path)?;
    if let Some(folder) = folder_override {
        config.folder = folder.into();
    }

    tracing::info!("WorldEdit -- region editing engine");

    // ── Generate world ──────────────────────────────────────────────────
    let start = Instant::now();
    let world = Arc::new(World::with_limits(
        config.world_width,
        config.world_height,
        names::default_frame_table(),
        config.entity_limits(),
    ));
    let surface = config.world_height / 3;
    generate_terrain(&world, surface);
    tracing::info!(
        "World ready: {}x{} tiles, {} sections ({:.2?})",
        world.width(),
        world.height(),
        world.section_count(),
        start.elapsed()
    );

    let storage = Arc::new(Storage::open(&config.folder, names::default_frame_table())?);
    let undo = FileUndoLog::new(Arc::clone(&storage), config.max_undo_levels)?;
    let queue = EditQueue::start(Arc::clone(&world), Arc::clone(&storage), undo, config.queue_capacity);

    run_session(&world, &queue, surface).await;

    for name in storage.list_schematics()? {
        tracing::info!("Schematic on disk: {}", name);
    }
    let dirty = world.take_dirty_sections();
    for section in &dirty {
        tracing::debug!("Resync section at {:?}", section.tile_origin());
    }
    tracing::info!("{} sections need resync", dirty.len());

    queue.shutdown().await
}

/// A dirt surface layer over stone.
fn generate_terrain(world: &World, surface: i32) {
    for x in 0..world.width() {
        for y in surface..(surface + 24).min(world.height()) {
            let kind = if y < surface + 4 { 0 } else { 1 };
            world.set_tile(x, y, Tile::solid(kind));
        }
    }
}

/// Drive a short editing session through the queue, logging each reply.
async fn run_session(world: &World, queue: &EditQueue, surface: i32) {
    let builder = Operator::new(1, Rect::new(100, surface - 10, 119, surface + 3));
    let visitor = Operator::new(2, Rect::new(0, 0, 0, 0));

    // Furnish the build site with a chest and a sign so copies carry entities.
    let chest = TilePos::new(104, surface - 2);
    world.place_object(chest.x, chest.y, kinds::CONTAINERS);
    if let Err(e) = world.place_chest(chest, &[ItemStack::new(73, 50, 0)]) {
        tracing::warn!("Could not place demo chest: {}", e);
    }
    let sign = TilePos::new(110, surface - 3);
    world.place_object(sign.x, sign.y, kinds::SIGNS);
    if let Err(e) = world.place_sign(sign, "Built with region edits") {
        tracing::warn!("Could not place demo sign: {}", e);
    }

    let skip_air: SharedFilter = Arc::new(|tile: &Tile| tile.active());

    let script: Vec<Result<EditCommand>> = vec![
        resolve_tile("gray brick").map(|target| EditCommand::SetTile {
            operator: builder,
            target,
            selection: Selection::Border,
            filter: None,
        }),
        resolve_wall("wood").map(|wall| EditCommand::SetWall {
            operator: builder,
            wall,
            selection: Selection::Normal,
            filter: None,
        }),
        resolve_color("deep red").map(|color| EditCommand::PaintTile {
            operator: builder,
            color,
            selection: Selection::Checkers,
            filter: None,
        }),
        Ok(EditCommand::Copy { operator: builder }),
        Ok(EditCommand::Paste {
            operator: builder,
            anchor: TilePos::new(200, surface - 10),
            alignment: Alignment::default(),
            filter: None,
        }),
        Ok(EditCommand::Paste {
            operator: builder,
            anchor: TilePos::new(319, surface - 10),
            alignment: Alignment::from_bits(1),
            filter: Some(Arc::clone(&skip_air)),
        }),
        Ok(EditCommand::SaveSchematic {
            operator: builder.id,
            name: "hut".into(),
        }),
        Ok(EditCommand::Undo {
            operator: builder.id,
            steps: 2,
        }),
        Ok(EditCommand::Redo {
            operator: builder.id,
            steps: 1,
        }),
        resolve_slope("tr").map(|slope| EditCommand::SetSlope {
            operator: builder,
            slope,
            selection: Selection::Diagonal45,
            filter: None,
        }),
        resolve_tile("water").map(|target| EditCommand::SetTile {
            operator: Operator::new(1, Rect::new(140, surface - 6, 150, surface - 1)),
            target,
            selection: Selection::Normal,
            filter: None,
        }),
        Ok(EditCommand::LoadSchematic {
            operator: visitor.id,
            name: "hut".into(),
        }),
        Ok(EditCommand::Paste {
            operator: visitor,
            anchor: TilePos::new(400, surface - 1),
            alignment: Alignment::from_bits(2),
            filter: None,
        }),
        Ok(EditCommand::Cut {
            operator: Operator::new(2, Rect::new(400, surface - 14, 419, surface - 1)),
        }),
        Ok(EditCommand::LoadSchematic {
            operator: visitor.id,
            name: "castle".into(),
        }),
    ];

    for step in script {
        let command = match step {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!("Skipping step: {:#}", e);
                continue;
            }
        };
        let name = command.name();
        match queue.submit(command).await {
            Ok(reply) => tracing::info!("//{} -> {}", name, reply),
            Err(e) => tracing::warn!("//{} -> {:#}", name, e),
        }
    }

    let (signs, chests, frames) = world.entity_counts();
    tracing::info!("Session done: {} signs, {} chests, {} item frames", signs, chests, frames);
}
