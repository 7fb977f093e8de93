//! # dungeon_ed headless entry point
//!
//! dungeon_ed is the graph-editing core of a dungeon room-node editor:
//! typed room nodes, parent/child links, and rule-based connection
//! validation. This binary runs the core without a window: it loads the
//! editor config and room-type catalog, authors a minimal layout through
//! the same operations a UI would call, and dumps the resulting snapshot
//! as JSON.
//!
//! ## License
//! Licensed under the MIT License.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};

use dungeon_ed::config::EditorConfig;
use dungeon_ed::editor::Editor;
use dungeon_ed::registry::RoomTypeRegistry;
use dungeon_ed::utils::geometry::Point2D;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();
    info!("dungeon_ed starting...");

    let config = EditorConfig::load_or_default(Path::new("dungeon_ed.json"));
    let catalog_path = Path::new("room_types.json");
    let registry = if catalog_path.exists() {
        match RoomTypeRegistry::from_json_file(catalog_path) {
            Ok(registry) => Arc::new(registry),
            Err(e) => {
                warn!("using built-in room type catalog: {}", e);
                Arc::new(RoomTypeRegistry::builtin())
            }
        }
    } else {
        Arc::new(RoomTypeRegistry::builtin())
    };

    let mut editor = Editor::new(Arc::clone(&registry), config);

    // Author a minimal layout: entrance -> corridor -> small room.
    let corridor = editor
        .create_room_node(Point2D::new(420.0, 200.0))
        .ok_or("room type catalog cannot create nodes")?;
    let room = editor
        .create_room_node(Point2D::new(640.0, 200.0))
        .ok_or("room type catalog cannot create nodes")?;

    if let (Some(corridor_ty), Some(room_ty)) = (
        registry.find(|ty| ty.is_corridor && !ty.is_corridor_ns && !ty.is_corridor_ew),
        registry.find_by_name("Small Room"),
    ) {
        editor.retype_node(corridor, corridor_ty);
        editor.retype_node(room, room_ty);
    }

    let graph = editor.graph();
    let entrance = graph.read().nodes_in_order().next().map(|node| node.id());
    if let Some(entrance) = entrance {
        editor.begin_connection(entrance, Point2D::new(200.0, 200.0));
        if !editor.complete_connection(corridor) {
            warn!("entrance -> corridor connection was rejected");
        }
        editor.begin_connection(corridor, Point2D::new(420.0, 200.0));
        if !editor.complete_connection(room) {
            warn!("corridor -> room connection was rejected");
        }
    }

    let snapshot = graph.read().snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    info!("dungeon_ed exiting.");
    Ok(())
}
