// src/editor/core.rs

use std::sync::Arc;

use log::{info, warn};
use parking_lot::RwLock;

use crate::config::EditorConfig;
use crate::editor::session::InteractionSession;
use crate::graph::{NodeId, RoomGraph};
use crate::registry::{RoomTypeId, RoomTypeRegistry};
use crate::utils::geometry::{Point2D, Vector2D};

/// The editing-session shell the UI talks to: one graph, one interaction
/// session, and the status/error strings surfaced in the window chrome.
pub struct Editor {
    graph: Arc<RwLock<RoomGraph>>,
    registry: Arc<RoomTypeRegistry>,
    session: InteractionSession,
    config: EditorConfig,

    /// Messages or status for UI.
    pub status_message: String,
    pub error_message: Option<String>,
}

impl Editor {
    pub fn new(registry: Arc<RoomTypeRegistry>, config: EditorConfig) -> Self {
        let graph = RoomGraph::new(Arc::clone(&registry), config.max_child_corridors);
        Self {
            graph: Arc::new(RwLock::new(graph)),
            registry,
            session: InteractionSession::new(),
            config,
            status_message: String::new(),
            error_message: None,
        }
    }

    /// Returns the graph handle for rendering and persistence collaborators.
    pub fn graph(&self) -> Arc<RwLock<RoomGraph>> {
        Arc::clone(&self.graph)
    }

    /// Replaces the graph, discarding the old one (e.g. after a load).
    pub fn set_graph(&mut self, graph: RoomGraph) {
        self.graph = Arc::new(RwLock::new(graph));
        self.session = InteractionSession::new();
        self.error_message = None;
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ----------------- Node operations -----------------

    /// Adds an untyped node at the given position. The very first node of
    /// an empty graph is preceded by an auto-created entrance, so every
    /// layout starts from its root.
    pub fn create_room_node(&mut self, position: Point2D) -> Option<NodeId> {
        let mut graph = self.graph.write();
        if graph.is_empty() {
            match self.registry.entrance() {
                Some(entrance) => {
                    graph.create_node(self.config.entrance_spawn, entrance);
                }
                None => warn!("room type catalog has no entrance type; graph has no root"),
            }
        }
        match self.registry.placeholder() {
            Some(placeholder) => {
                let id = graph.create_node(position, placeholder);
                self.status_message = format!("Created room node {}", id);
                Some(id)
            }
            None => {
                self.error_message =
                    Some("Room type catalog has no placeholder type; cannot create nodes.".into());
                None
            }
        }
    }

    /// Retypes a node through the selector, honoring the selector's own
    /// availability rule (parentless, non-entrance nodes only).
    pub fn retype_node(&mut self, id: NodeId, new_type: RoomTypeId) -> bool {
        let mut graph = self.graph.write();
        if !graph.can_retype(id) {
            return false;
        }
        graph.retype(id, new_type)
    }

    pub fn move_node(&mut self, id: NodeId, delta: Vector2D) -> bool {
        self.graph.write().move_node(id, delta)
    }

    // ----------------- Connection dragging -----------------

    /// A right-press on a node starts dragging a connection line from it.
    pub fn begin_connection(&mut self, source: NodeId, cursor: Point2D) {
        if self.graph.read().find_node(source).is_some() {
            self.session.begin_link(source, cursor);
        }
    }

    pub fn drag_connection(&mut self, delta: Vector2D) {
        self.session.drag_link(delta);
    }

    /// Releasing over a node tries to connect; a rejected gesture is simply
    /// dropped, with no further feedback.
    pub fn complete_connection(&mut self, target: NodeId) -> bool {
        let mut graph = self.graph.write();
        let connected = self.session.complete_link(&mut graph, target);
        drop(graph);
        if connected {
            self.status_message = format!("Connected to node {}", target);
        }
        connected
    }

    /// Releasing over empty space abandons the drag.
    pub fn cancel_connection(&mut self) {
        self.session.cancel_link();
    }

    // ----------------- Selection & batch operations -----------------

    pub fn select_all(&mut self) {
        self.graph.write().select_all();
    }

    pub fn clear_selection(&mut self) {
        self.graph.write().clear_selection();
    }

    /// Severs every link whose both endpoints are selected, then drops the
    /// selection.
    pub fn delete_selected_links(&mut self) {
        let mut graph = self.graph.write();
        let selected = graph.selected_ids();
        graph.disconnect_selected_links(&selected);
        graph.clear_selection();
        drop(graph);
        self.status_message = "Deleted selected room node links.".to_string();
    }

    /// Deletes every selected node except the entrance.
    pub fn delete_selected_nodes(&mut self) {
        let mut graph = self.graph.write();
        let selected = graph.selected_ids();
        let before = graph.len();
        graph.delete_selected_nodes(&selected);
        let removed = before - graph.len();
        drop(graph);
        info!("deleted {} selected node(s)", removed);
        self.status_message = format!("Deleted {} room node(s).", removed);
    }
}
