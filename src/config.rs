// src/config.rs

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::geometry::Point2D;

/// Default on-canvas size of a room node rectangle.
pub const NODE_WIDTH: f64 = 160.0;
pub const NODE_HEIGHT: f64 = 75.0;

/// Default cap on corridor children hanging off a single node.
pub const DEFAULT_MAX_CHILD_CORRIDORS: usize = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Tunable editor settings. Missing fields in the config file fall back to
/// the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of corridor children a single node may fan out into.
    pub max_child_corridors: usize,
    /// Where the entrance node is spawned when an empty graph gets its
    /// first node.
    pub entrance_spawn: Point2D,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_child_corridors: DEFAULT_MAX_CHILD_CORRIDORS,
            entrance_spawn: Point2D::new(200.0, 200.0),
        }
    }
}

impl EditorConfig {
    /// Loads settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Loads settings, logging and substituting defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("using default editor config: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.max_child_corridors, 3);
        assert_eq!(config.entrance_spawn, Point2D::new(200.0, 200.0));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{ "max_child_corridors": 5 }"#).unwrap();
        assert_eq!(config.max_child_corridors, 5);
        assert_eq!(config.entrance_spawn, Point2D::new(200.0, 200.0));
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = EditorConfig::load_or_default(Path::new("/nonexistent/dungeon_ed.json"));
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = std::env::temp_dir().join("dungeon_ed_bad_config.json");
        fs::write(&path, "not json").unwrap();
        let err = EditorConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        fs::remove_file(&path).ok();
    }
}
