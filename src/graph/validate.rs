// src/graph/validate.rs
//
// The connection rules. `connect` consults `is_child_valid` and mutates
// nothing unless every rule passes.

use crate::graph::node::{NodeId, RoomNode};
use crate::graph::room_graph::RoomGraph;

impl RoomGraph {
    /// Decides whether a parent→child link may be created.
    ///
    /// The rules form one big AND; the ordering below only affects which
    /// rule rejects first, never the outcome. Unknown node or type ids are
    /// a rejection, not an error.
    pub fn is_child_valid(&self, parent_id: NodeId, child_id: NodeId) -> bool {
        let (parent, child) = match (self.nodes.get(&parent_id), self.nodes.get(&child_id)) {
            (Some(parent), Some(child)) => (parent, child),
            _ => return false,
        };
        let (parent_ty, child_ty) = match (self.type_of(parent), self.type_of(child)) {
            (Some(parent_ty), Some(child_ty)) => (parent_ty, child_ty),
            _ => return false,
        };

        // Only one boss room may ever be attached, graph-wide.
        if child_ty.is_boss_room && self.has_connected_boss_room() {
            return false;
        }

        // Placeholder-typed nodes are never valid targets.
        if child_ty.is_none {
            return false;
        }

        // No duplicate edges.
        if parent.has_child(child_id) {
            return false;
        }

        // No self-loops.
        if parent_id == child_id {
            return false;
        }

        // No immediate back-edge (2-cycle).
        if parent.has_parent(child_id) {
            return false;
        }

        // Every node accepts at most one parent.
        if !child.parent_ids().is_empty() {
            return false;
        }

        // Corridors never chain directly into corridors...
        if parent_ty.is_corridor && child_ty.is_corridor {
            return false;
        }

        // ...and rooms never touch rooms: every edge crosses exactly one
        // corridor endpoint.
        if !parent_ty.is_corridor && !child_ty.is_corridor {
            return false;
        }

        // Bounded corridor fan-out.
        if child_ty.is_corridor && self.corridor_child_count(parent) >= self.max_child_corridors {
            return false;
        }

        // The entrance is always a root.
        if child_ty.is_entrance {
            return false;
        }

        // A non-corridor child claims its parent's only room slot.
        if !child_ty.is_corridor && !parent.child_ids().is_empty() {
            return false;
        }

        true
    }

    fn has_connected_boss_room(&self) -> bool {
        self.nodes.values().any(|node| {
            self.type_of(node).map_or(false, |ty| ty.is_boss_room)
                && !node.parent_ids().is_empty()
        })
    }

    fn corridor_child_count(&self, parent: &RoomNode) -> usize {
        parent
            .child_ids()
            .iter()
            .filter(|child_id| {
                self.nodes
                    .get(child_id)
                    .and_then(|child| self.type_of(child))
                    .map_or(false, |ty| ty.is_corridor)
            })
            .count()
    }
}
