// src/lib.rs

pub mod config;
pub mod editor;
pub mod graph;
pub mod registry;
pub mod utils;
