// src/graph/mod.rs
pub mod node;
pub mod room_graph;
pub mod snapshot;
pub mod validate;

pub use node::{NodeId, RoomNode};
pub use room_graph::RoomGraph;
pub use snapshot::{GraphSnapshot, NodeSnapshot};
