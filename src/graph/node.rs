// src/graph/node.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::RoomTypeId;
use crate::utils::geometry::{Rect, Vector2D};

/// Opaque room node identity. Assigned by the owning graph at creation,
/// stable for the node's lifetime, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One room (or corridor segment) in the graph.
///
/// Adjacency lists are private: every link mutation goes through the owning
/// [`RoomGraph`](crate::graph::RoomGraph), which is what keeps the lists
/// duplicate-free and free of dangling ids. The rect/selection/drag fields
/// are transient editor state with no bearing on graph correctness.
#[derive(Debug, Clone)]
pub struct RoomNode {
    id: NodeId,
    type_id: RoomTypeId,
    parent_ids: Vec<NodeId>,
    child_ids: Vec<NodeId>,
    pub rect: Rect,
    pub is_selected: bool,
    pub is_dragging: bool,
}

impl RoomNode {
    pub(crate) fn new(id: NodeId, type_id: RoomTypeId, rect: Rect) -> Self {
        Self {
            id,
            type_id,
            parent_ids: Vec::new(),
            child_ids: Vec::new(),
            rect,
            is_selected: false,
            is_dragging: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn type_id(&self) -> RoomTypeId {
        self.type_id
    }

    /// Parents in insertion order.
    pub fn parent_ids(&self) -> &[NodeId] {
        &self.parent_ids
    }

    /// Children in insertion order.
    pub fn child_ids(&self) -> &[NodeId] {
        &self.child_ids
    }

    pub fn has_parent(&self, id: NodeId) -> bool {
        self.parent_ids.contains(&id)
    }

    pub fn has_child(&self, id: NodeId) -> bool {
        self.child_ids.contains(&id)
    }

    /// Moves the node's rectangle by a canvas delta.
    pub fn drag_by(&mut self, delta: &Vector2D) {
        self.rect.translate(delta);
    }

    pub(crate) fn set_type(&mut self, type_id: RoomTypeId) {
        self.type_id = type_id;
    }

    /// Bookkeeping half of a connection; callers must have validated first.
    pub(crate) fn add_child(&mut self, child: NodeId) {
        self.child_ids.push(child);
    }

    pub(crate) fn add_parent(&mut self, parent: NodeId) {
        self.parent_ids.push(parent);
    }

    pub(crate) fn remove_child(&mut self, child: NodeId) -> bool {
        match self.child_ids.iter().position(|&id| id == child) {
            Some(index) => {
                self.child_ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_parent(&mut self, parent: NodeId) -> bool {
        match self.parent_ids.iter().position(|&id| id == parent) {
            Some(index) => {
                self.parent_ids.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::geometry::Point2D;

    fn node(id: u64) -> RoomNode {
        RoomNode::new(
            NodeId(id),
            RoomTypeId(0),
            Rect::new(Point2D::new(0.0, 0.0), 160.0, 75.0),
        )
    }

    #[test]
    fn test_new_node_is_unlinked() {
        let n = node(7);
        assert_eq!(n.id(), NodeId(7));
        assert!(n.parent_ids().is_empty());
        assert!(n.child_ids().is_empty());
        assert!(!n.is_selected);
        assert!(!n.is_dragging);
    }

    #[test]
    fn test_remove_reports_absence() {
        let mut n = node(1);
        n.add_child(NodeId(2));
        assert!(n.remove_child(NodeId(2)));
        assert!(!n.remove_child(NodeId(2)));
        assert!(!n.remove_parent(NodeId(2)));
    }

    #[test]
    fn test_lists_keep_insertion_order() {
        let mut n = node(1);
        n.add_child(NodeId(5));
        n.add_child(NodeId(3));
        n.add_child(NodeId(9));
        assert_eq!(n.child_ids(), &[NodeId(5), NodeId(3), NodeId(9)]);
        n.remove_child(NodeId(3));
        assert_eq!(n.child_ids(), &[NodeId(5), NodeId(9)]);
    }

    #[test]
    fn test_drag_by() {
        let mut n = node(1);
        n.drag_by(&Vector2D::new(30.0, -10.0));
        assert_eq!(n.rect.position(), Point2D::new(30.0, -10.0));
    }
}
