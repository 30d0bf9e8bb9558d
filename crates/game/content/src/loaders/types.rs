//! Type catalog loader.
//!
//! A catalog lists tile and entity types with their parents and properties:
//!
//! ```ron
//! (
//!     tiles: {
//!         "floor": (properties: { "glyph": Char('.') }),
//!         "wall": (properties: { "glyph": Char('#'), "walkable": Bool(false) }),
//!     },
//!     entities: {
//!         "creature": (properties: { "blocks-movement": Bool(true) }),
//!         "goblin": (parent: Some("creature"), properties: { "act": Behavior("wander") }),
//!     },
//! )
//! ```
//!
//! Behaviors are code, so a catalog can only reference them by key; the
//! implementations are registered on the [`RegistryBuilder`] before building.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{Category, RegistryBuilder, TypeRecord};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Deserialized catalog, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCatalog {
    #[serde(default)]
    pub tiles: BTreeMap<String, TypeRecord>,
    #[serde(default)]
    pub entities: BTreeMap<String, TypeRecord>,
}

impl TypeCatalog {
    /// Adds every record to `builder`. Later catalogs override earlier ones.
    pub fn register(self, builder: &mut RegistryBuilder) {
        for (name, record) in self.tiles {
            builder.insert(Category::Tile, name, record);
        }
        for (name, record) in self.entities {
            builder.insert(Category::Entity, name, record);
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len() + self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.entities.is_empty()
    }
}

/// Loader for type catalogs from RON files.
pub struct TypeLoader;

impl TypeLoader {
    pub fn parse(content: &str) -> LoadResult<TypeCatalog> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse type catalog RON: {}", e))
    }

    /// Load a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<TypeCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            tiles = catalog.tiles.len(),
            entities = catalog.entities.len(),
            "loaded type catalog"
        );
        Ok(catalog)
    }
}
