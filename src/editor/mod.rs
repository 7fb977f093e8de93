// src/editor/mod.rs
pub mod core;
pub mod session;

pub use self::core::Editor;
pub use self::session::{InteractionSession, PendingConnection};
