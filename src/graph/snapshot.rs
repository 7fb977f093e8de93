// src/graph/snapshot.rs
//
// The serializable face of a graph. Node types are recorded by catalog
// name rather than index so snapshots survive catalog reordering.

use std::collections::HashSet;
use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::graph::node::NodeId;
use crate::graph::room_graph::RoomGraph;
use crate::registry::{RoomTypeId, RoomTypeRegistry};
use crate::utils::geometry::Point2D;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub type_name: String,
    pub parent_ids: Vec<NodeId>,
    pub child_ids: Vec<NodeId>,
    pub position: Point2D,
}

/// Deterministic snapshot of one graph: nodes appear in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeSnapshot>,
}

impl RoomGraph {
    pub fn snapshot(&self) -> GraphSnapshot {
        let nodes = self
            .nodes_in_order()
            .map(|node| NodeSnapshot {
                id: node.id(),
                type_name: self
                    .type_of(node)
                    .map(|ty| ty.name.clone())
                    .unwrap_or_default(),
                parent_ids: node.parent_ids().to_vec(),
                child_ids: node.child_ids().to_vec(),
                position: node.rect.position(),
            })
            .collect();
        GraphSnapshot { nodes }
    }

    /// Rebuilds a graph from a snapshot. Adjacency is restored as recorded
    /// (the snapshot is trusted authored state and is not re-validated),
    /// except that entries naming absent nodes and repeated entries are
    /// dropped with a warning, so the restored graph cannot hold dangling
    /// or duplicate ids. Unknown type names fall back to the catalog's
    /// placeholder type. Fresh ids resume past the highest restored id.
    pub fn restore(
        snapshot: &GraphSnapshot,
        registry: Arc<RoomTypeRegistry>,
        max_child_corridors: usize,
    ) -> RoomGraph {
        let mut graph = RoomGraph::new(registry, max_child_corridors);
        let known: HashSet<NodeId> = snapshot.nodes.iter().map(|node| node.id).collect();
        let fallback = graph.registry.placeholder().unwrap_or(RoomTypeId(0));

        for entry in &snapshot.nodes {
            let type_id = match graph.registry.find_by_name(&entry.type_name) {
                Some(type_id) => type_id,
                None => {
                    warn!(
                        "snapshot node {} has unknown type {:?}; using placeholder",
                        entry.id, entry.type_name
                    );
                    fallback
                }
            };
            if !graph.insert_restored_node(entry.id, type_id, entry.position) {
                warn!("snapshot repeats node id {}; keeping the first entry", entry.id);
            }
        }

        let mut linked: HashSet<NodeId> = HashSet::new();
        for entry in &snapshot.nodes {
            if !linked.insert(entry.id) {
                continue;
            }
            let node = match graph.nodes.get_mut(&entry.id) {
                Some(node) => node,
                None => continue,
            };
            for &parent in &entry.parent_ids {
                if !known.contains(&parent) {
                    warn!("dropping dangling parent {} of node {}", parent, entry.id);
                } else if node.has_parent(parent) {
                    warn!("dropping repeated parent {} of node {}", parent, entry.id);
                } else {
                    node.add_parent(parent);
                }
            }
            for &child in &entry.child_ids {
                if !known.contains(&child) {
                    warn!("dropping dangling child {} of node {}", child, entry.id);
                } else if node.has_child(child) {
                    warn!("dropping repeated child {} of node {}", child, entry.id);
                } else {
                    node.add_child(child);
                }
            }
        }

        graph
    }
}
