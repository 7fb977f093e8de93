// src/editor/session.rs

use crate::graph::{NodeId, RoomGraph};
use crate::utils::geometry::{Point2D, Vector2D};

/// The link the user is interactively dragging, if any. Lives outside the
/// graph: it belongs to the editing session, not to the persisted layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingConnection {
    Idle,
    Dragging { source: NodeId, cursor: Point2D },
}

/// Interactive state threaded through a single editing session.
#[derive(Debug, Default)]
pub struct InteractionSession {
    pending: PendingConnection,
}

impl Default for PendingConnection {
    fn default() -> Self {
        PendingConnection::Idle
    }
}

impl InteractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &PendingConnection {
        &self.pending
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.pending, PendingConnection::Dragging { .. })
    }

    /// Starts dragging a connection line out of `source`.
    pub fn begin_link(&mut self, source: NodeId, cursor: Point2D) {
        self.pending = PendingConnection::Dragging { source, cursor };
    }

    /// Follows the cursor during the drag. No-op while idle.
    pub fn drag_link(&mut self, delta: Vector2D) {
        if let PendingConnection::Dragging { cursor, .. } = &mut self.pending {
            *cursor = cursor.translated(&delta);
        }
    }

    /// Resolves the drag onto a target node. The connection is attempted
    /// through the graph's rules; whatever the outcome, the drag state is
    /// cleared so a release never leaves a line dangling.
    pub fn complete_link(&mut self, graph: &mut RoomGraph, target: NodeId) -> bool {
        let connected = match self.pending {
            PendingConnection::Dragging { source, .. } => graph.connect(source, target),
            PendingConnection::Idle => false,
        };
        self.pending = PendingConnection::Idle;
        connected
    }

    /// Releasing over empty space (or pressing escape) abandons the drag.
    pub fn cancel_link(&mut self) {
        self.pending = PendingConnection::Idle;
    }
}
