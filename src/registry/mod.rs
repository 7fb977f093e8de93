// src/registry/mod.rs
//
// The room-type catalog. Loaded once at startup and treated as read-only
// afterwards; every node in a graph references an entry by `RoomTypeId`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Stable key for a room type: the entry's index in the owning registry.
/// Used instead of pointer identity so node types survive serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomTypeId(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomTypeDescriptor {
    pub name: String,
    /// Whether the retype selector offers this entry.
    pub display_in_editor: bool,
    pub is_corridor: bool,
    pub is_corridor_ns: bool,
    pub is_corridor_ew: bool,
    pub is_entrance: bool,
    pub is_boss_room: bool,
    /// Placeholder category assigned to freshly created, untyped nodes.
    pub is_none: bool,
}

impl Default for RoomTypeDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            display_in_editor: true,
            is_corridor: false,
            is_corridor_ns: false,
            is_corridor_ew: false,
            is_entrance: false,
            is_boss_room: false,
            is_none: false,
        }
    }
}

impl RoomTypeDescriptor {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Immutable catalog of room categories.
#[derive(Debug, Clone)]
pub struct RoomTypeRegistry {
    types: Vec<RoomTypeDescriptor>,
}

impl RoomTypeRegistry {
    /// Wraps a catalog, reporting (but tolerating) configuration problems.
    pub fn new(types: Vec<RoomTypeDescriptor>) -> Self {
        let registry = Self { types };
        registry.validate();
        registry
    }

    /// The stock catalog matching the validator's assumptions: one
    /// placeholder, one entrance, one boss room, plain rooms, and the
    /// corridor family (generic plus NS/EW orientations, which the layout
    /// stage picks between and are hidden from the retype selector).
    pub fn builtin() -> Self {
        Self::new(vec![
            RoomTypeDescriptor {
                is_none: true,
                ..RoomTypeDescriptor::named("None")
            },
            RoomTypeDescriptor {
                is_entrance: true,
                ..RoomTypeDescriptor::named("Entrance")
            },
            RoomTypeDescriptor {
                is_boss_room: true,
                ..RoomTypeDescriptor::named("Boss Room")
            },
            RoomTypeDescriptor::named("Small Room"),
            RoomTypeDescriptor::named("Medium Room"),
            RoomTypeDescriptor::named("Large Room"),
            RoomTypeDescriptor::named("Chest Room"),
            RoomTypeDescriptor {
                is_corridor: true,
                ..RoomTypeDescriptor::named("Corridor")
            },
            RoomTypeDescriptor {
                is_corridor: true,
                is_corridor_ns: true,
                display_in_editor: false,
                ..RoomTypeDescriptor::named("Corridor NS")
            },
            RoomTypeDescriptor {
                is_corridor: true,
                is_corridor_ew: true,
                display_in_editor: false,
                ..RoomTypeDescriptor::named("Corridor EW")
            },
        ])
    }

    /// Loads a catalog from a JSON array of descriptors.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let types: Vec<RoomTypeDescriptor> =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(Self::new(types))
    }

    /// Reports catalog problems without aborting. Returns the number of
    /// problems found so callers and tests can inspect the outcome.
    pub fn validate(&self) -> usize {
        let mut problems = 0;
        if self.types.is_empty() {
            error!("room type catalog is empty");
            problems += 1;
        }
        let mut seen = HashSet::new();
        for (i, ty) in self.types.iter().enumerate() {
            if ty.name.trim().is_empty() {
                warn!("room type at index {} has an empty name", i);
                problems += 1;
            } else if !seen.insert(ty.name.as_str()) {
                warn!("room type name {:?} appears more than once", ty.name);
                problems += 1;
            }
        }
        if !self.types.is_empty() && self.placeholder().is_none() {
            warn!("room type catalog has no placeholder (none) entry");
            problems += 1;
        }
        problems
    }

    pub fn get(&self, id: RoomTypeId) -> Option<&RoomTypeDescriptor> {
        self.types.get(id.0)
    }

    pub fn find<P>(&self, mut predicate: P) -> Option<RoomTypeId>
    where
        P: FnMut(&RoomTypeDescriptor) -> bool,
    {
        self.types.iter().position(|ty| predicate(ty)).map(RoomTypeId)
    }

    pub fn find_by_name(&self, name: &str) -> Option<RoomTypeId> {
        self.find(|ty| ty.name == name)
    }

    /// The entrance type, if the catalog declares one.
    pub fn entrance(&self) -> Option<RoomTypeId> {
        self.find(|ty| ty.is_entrance)
    }

    /// The placeholder type assigned to new untyped nodes.
    pub fn placeholder(&self) -> Option<RoomTypeId> {
        self.find(|ty| ty.is_none)
    }

    /// Entries offered by the retype selector.
    pub fn displayable(&self) -> impl Iterator<Item = (RoomTypeId, &RoomTypeDescriptor)> {
        self.types
            .iter()
            .enumerate()
            .filter(|(_, ty)| ty.display_in_editor)
            .map(|(i, ty)| (RoomTypeId(i), ty))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
