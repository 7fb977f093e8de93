// src/graph/room_graph.rs

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::config::{NODE_HEIGHT, NODE_WIDTH};
use crate::graph::node::{NodeId, RoomNode};
use crate::registry::{RoomTypeDescriptor, RoomTypeId, RoomTypeRegistry};
use crate::utils::geometry::{Point2D, Rect, Vector2D};

/// The aggregate owning every room node of one dungeon layout.
///
/// All adjacency mutation goes through the methods here; links are severed
/// eagerly whenever a node is removed, so no parent/child list ever holds
/// an id that is absent from the node map.
pub struct RoomGraph {
    pub(crate) nodes: HashMap<NodeId, RoomNode>,
    /// Creation order, used for deterministic iteration and layout.
    pub(crate) node_order: Vec<NodeId>,
    pub(crate) registry: Arc<RoomTypeRegistry>,
    pub(crate) max_child_corridors: usize,
    next_id: u64,
}

impl RoomGraph {
    pub fn new(registry: Arc<RoomTypeRegistry>, max_child_corridors: usize) -> Self {
        Self {
            nodes: HashMap::new(),
            node_order: Vec::new(),
            registry,
            max_child_corridors,
            next_id: 0,
        }
    }

    pub fn registry(&self) -> &Arc<RoomTypeRegistry> {
        &self.registry
    }

    pub fn max_child_corridors(&self) -> usize {
        self.max_child_corridors
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find_node(&self, id: NodeId) -> Option<&RoomNode> {
        self.nodes.get(&id)
    }

    /// Mutable access for transient editor state (rect, selection, drag).
    /// Adjacency stays out of reach; those lists are private to this module.
    pub fn find_node_mut(&mut self, id: NodeId) -> Option<&mut RoomNode> {
        self.nodes.get_mut(&id)
    }

    /// Nodes in creation order.
    pub fn nodes_in_order(&self) -> impl Iterator<Item = &RoomNode> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub(crate) fn type_of(&self, node: &RoomNode) -> Option<&RoomTypeDescriptor> {
        self.registry.get(node.type_id())
    }

    fn is_entrance(&self, id: NodeId) -> bool {
        self.nodes
            .get(&id)
            .and_then(|node| self.type_of(node))
            .map_or(false, |ty| ty.is_entrance)
    }

    // --- Node lifecycle ---

    /// Adds a node at the given canvas position. Always succeeds; the id is
    /// fresh and never reused, even after deletions.
    pub fn create_node(&mut self, position: Point2D, type_id: RoomTypeId) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let rect = Rect::new(position, NODE_WIDTH, NODE_HEIGHT);
        self.nodes.insert(id, RoomNode::new(id, type_id, rect));
        self.node_order.push(id);
        debug!("created node {}", id);
        id
    }

    /// Re-inserts a node under a recorded id during snapshot restore,
    /// keeping the id counter ahead of it. Duplicate ids are skipped.
    pub(crate) fn insert_restored_node(
        &mut self,
        id: NodeId,
        type_id: RoomTypeId,
        position: Point2D,
    ) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        let rect = Rect::new(position, NODE_WIDTH, NODE_HEIGHT);
        self.nodes.insert(id, RoomNode::new(id, type_id, rect));
        self.node_order.push(id);
        self.next_id = self.next_id.max(id.0 + 1);
        true
    }

    /// Removes one node, severing all of its links first. Returns false if
    /// the id names no node.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(&id) {
            return false;
        }
        self.purge_node(id);
        true
    }

    fn purge_node(&mut self, id: NodeId) {
        let (parents, children) = match self.nodes.get(&id) {
            Some(node) => (node.parent_ids().to_vec(), node.child_ids().to_vec()),
            None => return,
        };
        for child in children {
            if let Some(node) = self.nodes.get_mut(&child) {
                node.remove_parent(id);
            }
        }
        for parent in parents {
            if let Some(node) = self.nodes.get_mut(&parent) {
                node.remove_child(id);
            }
        }
        self.nodes.remove(&id);
        self.node_order.retain(|&other| other != id);
        debug!("deleted node {}", id);
    }

    // --- Links ---

    /// Creates the parent→child link if every connection rule allows it.
    /// On rejection nothing is mutated.
    pub fn connect(&mut self, parent_id: NodeId, child_id: NodeId) -> bool {
        if !self.is_child_valid(parent_id, child_id) {
            return false;
        }
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.add_child(child_id);
        }
        if let Some(child) = self.nodes.get_mut(&child_id) {
            child.add_parent(parent_id);
        }
        debug!("connected {} -> {}", parent_id, child_id);
        true
    }

    /// Severs one parent→child link on both sides. Returns true when at
    /// least one side held the edge, so a half-recorded link (possible only
    /// through a hand-edited snapshot) is cleaned up and still reported.
    pub fn disconnect(&mut self, parent_id: NodeId, child_id: NodeId) -> bool {
        let from_parent = self
            .nodes
            .get_mut(&parent_id)
            .map_or(false, |parent| parent.remove_child(child_id));
        let from_child = self
            .nodes
            .get_mut(&child_id)
            .map_or(false, |child| child.remove_parent(parent_id));
        from_parent || from_child
    }

    // --- Retyping ---

    /// Replaces a node's type. When the change crosses the corridor
    /// boundary, or turns the node into a boss room, every outgoing link is
    /// severed: the rules that admitted those links depended on the old
    /// category. Returns false for unknown node or type ids.
    pub fn retype(&mut self, id: NodeId, new_type: RoomTypeId) -> bool {
        let new_ty = match self.registry.get(new_type) {
            Some(ty) => ty,
            None => return false,
        };
        let node = match self.nodes.get(&id) {
            Some(node) => node,
            None => return false,
        };
        let severs = match self.type_of(node) {
            Some(old_ty) => {
                old_ty.is_corridor != new_ty.is_corridor
                    || (!old_ty.is_boss_room && new_ty.is_boss_room)
            }
            None => true,
        };
        if severs {
            for child in node.child_ids().to_vec() {
                self.disconnect(id, child);
            }
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_type(new_type);
        }
        true
    }

    /// Whether the retype selector applies to this node: only parentless,
    /// non-entrance nodes may be retyped interactively.
    pub fn can_retype(&self, id: NodeId) -> bool {
        match self.nodes.get(&id) {
            Some(node) => node.parent_ids().is_empty() && !self.is_entrance(id),
            None => false,
        }
    }

    // --- Layout & selection ---

    /// Moves a node's rectangle; no validation involved.
    pub fn move_node(&mut self, id: NodeId, delta: Vector2D) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.drag_by(&delta);
                true
            }
            None => false,
        }
    }

    pub fn set_selected(&mut self, id: NodeId, selected: bool) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.is_selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn select_all(&mut self) {
        for node in self.nodes.values_mut() {
            node.is_selected = true;
        }
    }

    pub fn clear_selection(&mut self) {
        for node in self.nodes.values_mut() {
            node.is_selected = false;
        }
    }

    /// Ids of currently selected nodes, in creation order.
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.nodes_in_order()
            .filter(|node| node.is_selected)
            .map(|node| node.id())
            .collect()
    }

    // --- Batch operations ---

    /// Severs every parent→child edge whose BOTH endpoints appear in the
    /// given selection. Selecting only one end of an edge leaves it alone,
    /// so deleting a node's links cannot take out unrelated edges that
    /// merely touch it. A selection with no qualifying edges is a no-op.
    pub fn disconnect_selected_links(&mut self, selected: &[NodeId]) {
        for &parent_id in selected {
            let children: Vec<NodeId> = match self.nodes.get(&parent_id) {
                Some(parent) => parent
                    .child_ids()
                    .iter()
                    .copied()
                    .filter(|child_id| selected.contains(child_id))
                    .collect(),
                None => continue,
            };
            for child_id in children {
                self.disconnect(parent_id, child_id);
            }
        }
    }

    /// Deletes every selected node except entrances, severing all of their
    /// links. Victims are collected first and purged second, so the node
    /// collection is never mutated while it is being walked.
    pub fn delete_selected_nodes(&mut self, selected: &[NodeId]) {
        let victims: Vec<NodeId> = self
            .node_order
            .iter()
            .copied()
            .filter(|id| selected.contains(id) && !self.is_entrance(*id))
            .collect();
        for id in victims {
            self.purge_node(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        graph: RoomGraph,
        entrance: RoomTypeId,
        room: RoomTypeId,
        corridor: RoomTypeId,
        boss: RoomTypeId,
        none: RoomTypeId,
    }

    fn fixture() -> Fixture {
        let registry = Arc::new(RoomTypeRegistry::builtin());
        let entrance = registry.entrance().unwrap();
        let room = registry.find_by_name("Small Room").unwrap();
        let corridor = registry
            .find(|ty| ty.is_corridor && !ty.is_corridor_ns && !ty.is_corridor_ew)
            .unwrap();
        let boss = registry.find(|ty| ty.is_boss_room).unwrap();
        let none = registry.placeholder().unwrap();
        Fixture {
            graph: RoomGraph::new(registry, 3),
            entrance,
            room,
            corridor,
            boss,
            none,
        }
    }

    fn add(graph: &mut RoomGraph, ty: RoomTypeId) -> NodeId {
        graph.create_node(Point2D::new(0.0, 0.0), ty)
    }

    /// No duplicates in any adjacency list, and every referenced id names
    /// a live node.
    fn assert_graph_consistent(graph: &RoomGraph) {
        for node in graph.nodes_in_order() {
            for ids in [node.parent_ids(), node.child_ids()] {
                for (i, id) in ids.iter().enumerate() {
                    assert!(
                        graph.find_node(*id).is_some(),
                        "node {} references missing {}",
                        node.id(),
                        id
                    );
                    assert!(
                        !ids[i + 1..].contains(id),
                        "node {} lists {} twice",
                        node.id(),
                        id
                    );
                }
            }
        }
    }

    #[test]
    fn test_entrance_to_corridor_scenario() {
        let mut f = fixture();
        let entrance = add(&mut f.graph, f.entrance);
        let corridor = add(&mut f.graph, f.corridor);

        assert!(f.graph.connect(entrance, corridor));

        let corridor_node = f.graph.find_node(corridor).unwrap();
        assert_eq!(corridor_node.parent_ids(), &[entrance]);
        let entrance_node = f.graph.find_node(entrance).unwrap();
        assert_eq!(entrance_node.child_ids(), &[corridor]);
        assert_graph_consistent(&f.graph);
    }

    #[test]
    fn test_rejected_connect_mutates_nothing() {
        let mut f = fixture();
        let a = add(&mut f.graph, f.room);
        let b = add(&mut f.graph, f.room);

        assert!(!f.graph.connect(a, b));
        assert!(f.graph.find_node(a).unwrap().child_ids().is_empty());
        assert!(f.graph.find_node(b).unwrap().parent_ids().is_empty());
    }

    #[test]
    fn test_connect_unknown_ids() {
        let mut f = fixture();
        let a = add(&mut f.graph, f.room);
        assert!(!f.graph.connect(a, NodeId(999)));
        assert!(!f.graph.connect(NodeId(999), a));
    }

    #[test]
    fn test_corridor_fanout_limit() {
        let mut f = fixture();
        let room = add(&mut f.graph, f.room);
        for _ in 0..3 {
            let corridor = add(&mut f.graph, f.corridor);
            assert!(f.graph.connect(room, corridor));
        }

        let fourth = add(&mut f.graph, f.corridor);
        assert!(!f.graph.connect(room, fourth));
        assert_eq!(f.graph.find_node(room).unwrap().child_ids().len(), 3);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut f = fixture();
        let a = add(&mut f.graph, f.room);
        let b = add(&mut f.graph, f.room);
        assert_ne!(a, b);

        assert!(f.graph.delete_node(b));
        let c = add(&mut f.graph, f.room);
        assert_ne!(c, b);
        assert!(c > b);
    }

    #[test]
    fn test_delete_node_severs_links() {
        let mut f = fixture();
        let room = add(&mut f.graph, f.room);
        let corridor = add(&mut f.graph, f.corridor);
        let inner = add(&mut f.graph, f.room);
        assert!(f.graph.connect(room, corridor));
        assert!(f.graph.connect(corridor, inner));

        assert!(f.graph.delete_node(corridor));
        assert!(f.graph.find_node(corridor).is_none());
        assert!(f.graph.find_node(room).unwrap().child_ids().is_empty());
        assert!(f.graph.find_node(inner).unwrap().parent_ids().is_empty());
        assert_graph_consistent(&f.graph);
    }

    #[test]
    fn test_delete_selected_skips_entrance() {
        let mut f = fixture();
        let entrance = add(&mut f.graph, f.entrance);
        let corridor = add(&mut f.graph, f.corridor);
        assert!(f.graph.connect(entrance, corridor));
        f.graph.select_all();

        let selected = f.graph.selected_ids();
        f.graph.delete_selected_nodes(&selected);

        assert!(f.graph.find_node(entrance).is_some());
        assert!(f.graph.find_node(corridor).is_none());
        assert!(f.graph.find_node(entrance).unwrap().child_ids().is_empty());
        assert_graph_consistent(&f.graph);
    }

    #[test]
    fn test_delete_selected_interlinked_victims() {
        let mut f = fixture();
        let room = add(&mut f.graph, f.room);
        let c1 = add(&mut f.graph, f.corridor);
        let c2 = add(&mut f.graph, f.corridor);
        assert!(f.graph.connect(room, c1));
        assert!(f.graph.connect(room, c2));
        f.graph.set_selected(room, true);
        f.graph.set_selected(c1, true);
        f.graph.set_selected(c2, true);

        let selected = f.graph.selected_ids();
        f.graph.delete_selected_nodes(&selected);

        assert!(f.graph.is_empty());
    }

    #[test]
    fn test_disconnect_requires_both_ends_selected() {
        let mut f = fixture();
        let room = add(&mut f.graph, f.room);
        let c1 = add(&mut f.graph, f.corridor);
        let c2 = add(&mut f.graph, f.corridor);
        assert!(f.graph.connect(room, c1));
        assert!(f.graph.connect(room, c2));

        f.graph.set_selected(room, true);
        f.graph.set_selected(c1, true);
        let selected = f.graph.selected_ids();
        f.graph.disconnect_selected_links(&selected);

        // Only the room->c1 edge had both ends selected.
        assert_eq!(f.graph.find_node(room).unwrap().child_ids(), &[c2]);
        assert!(f.graph.find_node(c1).unwrap().parent_ids().is_empty());
        assert_eq!(f.graph.find_node(c2).unwrap().parent_ids(), &[room]);
        assert_graph_consistent(&f.graph);
    }

    #[test]
    fn test_disconnect_without_qualifying_edges_is_noop() {
        let mut f = fixture();
        let room = add(&mut f.graph, f.room);
        let corridor = add(&mut f.graph, f.corridor);
        assert!(f.graph.connect(room, corridor));
        f.graph.set_selected(corridor, true);

        let before = f.graph.snapshot();
        let selected = f.graph.selected_ids();
        f.graph.disconnect_selected_links(&selected);
        assert_eq!(f.graph.snapshot(), before);
    }

    #[test]
    fn test_disconnect_cleans_up_one_sided_edge() {
        let mut f = fixture();
        let room = add(&mut f.graph, f.room);
        let corridor = add(&mut f.graph, f.corridor);
        // Parent-side entry only, as a hand-edited snapshot could record it.
        f.graph.nodes.get_mut(&room).unwrap().add_child(corridor);

        assert!(f.graph.disconnect(room, corridor));
        assert!(f.graph.find_node(room).unwrap().child_ids().is_empty());
        assert!(!f.graph.disconnect(room, corridor));
    }

    #[test]
    fn test_retype_across_corridor_boundary_severs_children() {
        let mut f = fixture();
        let room = add(&mut f.graph, f.room);
        let c1 = add(&mut f.graph, f.corridor);
        let c2 = add(&mut f.graph, f.corridor);
        assert!(f.graph.connect(room, c1));
        assert!(f.graph.connect(room, c2));

        assert!(f.graph.retype(room, f.corridor));

        let node = f.graph.find_node(room).unwrap();
        assert_eq!(node.type_id(), f.corridor);
        assert!(node.child_ids().is_empty());
        assert!(f.graph.find_node(c1).unwrap().parent_ids().is_empty());
        assert!(f.graph.find_node(c2).unwrap().parent_ids().is_empty());
        assert_graph_consistent(&f.graph);
    }

    #[test]
    fn test_retype_into_boss_room_severs_children() {
        let mut f = fixture();
        let room = add(&mut f.graph, f.room);
        let corridor = add(&mut f.graph, f.corridor);
        assert!(f.graph.connect(room, corridor));

        assert!(f.graph.retype(room, f.boss));

        assert!(f.graph.find_node(room).unwrap().child_ids().is_empty());
        assert!(f.graph.find_node(corridor).unwrap().parent_ids().is_empty());
    }

    #[test]
    fn test_retype_within_category_keeps_children() {
        let mut f = fixture();
        let room = add(&mut f.graph, f.none);
        let corridor = add(&mut f.graph, f.corridor);
        // A placeholder node can still be a parent; only child ends are
        // barred from being placeholders.
        assert!(f.graph.connect(room, corridor));

        let other_room = f.graph.registry().find_by_name("Large Room").unwrap();
        assert!(f.graph.retype(room, other_room));

        assert_eq!(f.graph.find_node(room).unwrap().child_ids(), &[corridor]);
        assert_eq!(f.graph.find_node(corridor).unwrap().parent_ids(), &[room]);
    }

    #[test]
    fn test_retype_rejects_unknown_ids() {
        let mut f = fixture();
        let room = add(&mut f.graph, f.room);
        assert!(!f.graph.retype(NodeId(999), f.room));
        assert!(!f.graph.retype(room, RoomTypeId(999)));
    }

    #[test]
    fn test_can_retype() {
        let mut f = fixture();
        let entrance = add(&mut f.graph, f.entrance);
        let fresh = add(&mut f.graph, f.none);
        let corridor = add(&mut f.graph, f.corridor);
        assert!(f.graph.connect(entrance, corridor));

        assert!(f.graph.can_retype(fresh));
        assert!(!f.graph.can_retype(entrance));
        assert!(!f.graph.can_retype(corridor)); // has a parent
        assert!(!f.graph.can_retype(NodeId(999)));
    }

    #[test]
    fn test_move_node() {
        let mut f = fixture();
        let room = f.graph.create_node(Point2D::new(10.0, 10.0), f.room);
        assert!(f.graph.move_node(room, Vector2D::new(5.0, -5.0)));
        let rect = f.graph.find_node(room).unwrap().rect;
        assert_eq!(rect.position(), Point2D::new(15.0, 5.0));
        assert!(!f.graph.move_node(NodeId(999), Vector2D::new(1.0, 1.0)));
    }

    #[test]
    fn test_selection_helpers() {
        let mut f = fixture();
        let a = add(&mut f.graph, f.room);
        let b = add(&mut f.graph, f.room);
        f.graph.select_all();
        assert_eq!(f.graph.selected_ids(), vec![a, b]);
        f.graph.clear_selection();
        assert!(f.graph.selected_ids().is_empty());
        f.graph.set_selected(b, true);
        assert_eq!(f.graph.selected_ids(), vec![b]);
    }

    #[test]
    fn test_nodes_in_order_follows_creation() {
        let mut f = fixture();
        let a = add(&mut f.graph, f.room);
        let b = add(&mut f.graph, f.corridor);
        let c = add(&mut f.graph, f.room);
        f.graph.delete_node(b);
        let order: Vec<NodeId> = f.graph.nodes_in_order().map(|n| n.id()).collect();
        assert_eq!(order, vec![a, c]);
    }

    #[test]
    fn test_mixed_operations_preserve_consistency() {
        let mut f = fixture();
        let entrance = add(&mut f.graph, f.entrance);
        let c1 = add(&mut f.graph, f.corridor);
        let c2 = add(&mut f.graph, f.corridor);
        let r1 = add(&mut f.graph, f.room);
        let r2 = add(&mut f.graph, f.room);
        let boss = add(&mut f.graph, f.boss);

        assert!(f.graph.connect(entrance, c1));
        assert!(f.graph.connect(c1, r1));
        assert!(f.graph.connect(r1, c2));
        assert!(f.graph.connect(c2, boss));
        assert!(!f.graph.connect(c1, r1)); // duplicate
        assert!(!f.graph.connect(entrance, r2)); // room to room

        f.graph.set_selected(r1, true);
        f.graph.set_selected(c2, true);
        let selected = f.graph.selected_ids();
        f.graph.disconnect_selected_links(&selected);
        f.graph.delete_selected_nodes(&selected);

        assert!(f.graph.find_node(r1).is_none());
        assert!(f.graph.find_node(c2).is_none());
        assert!(f.graph.find_node(boss).unwrap().parent_ids().is_empty());
        assert_graph_consistent(&f.graph);
    }
}
