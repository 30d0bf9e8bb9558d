//! World layout loader.
//!
//! Layouts draw the tile grid with one glyph per cell and list entities
//! separately:
//!
//! ```ron
//! (
//!     legend: { '.': "floor", '#': "wall", '~': "water" },
//!     rows: [
//!         "#####",
//!         "#..~#",
//!         "#####",
//!     ],
//!     entities: [
//!         (kind: "hero", at: (1, 1)),
//!         (kind: "goblin", at: (2, 1), properties: { "hp": Int(3) }),
//!     ],
//! )
//! ```
//!
//! Entities are spawned in list order, which fixes their ids and their
//! scheduling tie-break order.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{Position, Properties, Tile, World};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One entity to spawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPlacement {
    pub kind: String,
    pub at: (i32, i32),
    #[serde(default)]
    pub properties: Properties,
}

/// Raw layout file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldLayout {
    pub legend: BTreeMap<char, String>,
    pub rows: Vec<String>,
    #[serde(default)]
    pub entities: Vec<EntityPlacement>,
}

impl WorldLayout {
    /// Builds the world: every row must have the same width and every glyph
    /// must appear in the legend.
    pub fn build(self) -> LoadResult<World> {
        let width = self.rows.first().map_or(0, |row| row.chars().count());
        let height = self.rows.len();

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in self.rows.iter().enumerate() {
            let row_width = row.chars().count();
            if row_width != width {
                anyhow::bail!("Row {} has width {}, expected {}", y, row_width, width);
            }
            for (x, glyph) in row.chars().enumerate() {
                let type_name = self.legend.get(&glyph).ok_or_else(|| {
                    anyhow::anyhow!("Unknown glyph '{}' at ({}, {})", glyph, x, y)
                })?;
                tiles.push(Tile::new(type_name.as_str()));
            }
        }

        let width = u32::try_from(width).map_err(|_| anyhow::anyhow!("Layout is too wide"))?;
        let height = u32::try_from(height).map_err(|_| anyhow::anyhow!("Layout is too tall"))?;
        let mut world = World::from_tiles(width, height, tiles)
            .map_err(|e| anyhow::anyhow!("Invalid layout: {}", e))?;

        for placement in self.entities {
            let position = Position::new(placement.at.0, placement.at.1);
            world
                .spawn(placement.kind.as_str(), position, placement.properties)
                .map_err(|e| anyhow::anyhow!("Cannot place '{}': {}", placement.kind, e))?;
        }

        Ok(world)
    }
}

/// Loader for world layouts from RON files.
pub struct WorldLoader;

impl WorldLoader {
    pub fn parse(content: &str) -> LoadResult<World> {
        let layout: WorldLayout = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world RON: {}", e))?;
        layout.build()
    }

    /// Load a world layout from a RON file.
    pub fn load(path: &Path) -> LoadResult<World> {
        let content = read_file(path)?;
        let world = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            width = world.width(),
            height = world.height(),
            entities = world.entities().len(),
            "loaded world"
        );
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{EntityId, PropertyKey, PropertyValue};

    const LAYOUT: &str = r#####"(
        legend: { '.': "floor", '#': "wall" },
        rows: [
            "####",
            "#..#",
            "####",
        ],
        entities: [
            (kind: "hero", at: (1, 1)),
            (kind: "goblin", at: (2, 1), properties: { "hp": Int(3) }),
        ],
    )"#####;

    #[test]
    fn builds_grid_and_spawns_in_order() {
        let world = WorldLoader::parse(LAYOUT).unwrap();
        assert_eq!((world.width(), world.height()), (4, 3));
        assert_eq!(world.tile(Position::new(0, 0)).unwrap().type_name, "wall");
        assert_eq!(world.tile(Position::new(2, 1)).unwrap().type_name, "floor");

        let kinds: Vec<_> = world.entities().iter().map(|e| e.type_name.as_str()).collect();
        assert_eq!(kinds, ["hero", "goblin"]);

        let goblin = world.entity(EntityId(1)).unwrap();
        assert_eq!(goblin.position, Position::new(2, 1));
        assert_eq!(
            goblin.properties.get(&PropertyKey::Hp),
            Some(&PropertyValue::Int(3))
        );
    }

    #[test]
    fn rejects_unknown_glyph() {
        let err = WorldLoader::parse(r#"(legend: { '.': "floor" }, rows: [".x"])"#).unwrap_err();
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err =
            WorldLoader::parse(r#"(legend: { '.': "floor" }, rows: ["..", "."])"#).unwrap_err();
        assert!(err.to_string().contains("Row 1"));
    }

    #[test]
    fn rejects_entity_outside_map() {
        let err = WorldLoader::parse(
            r#"(legend: { '.': "floor" }, rows: [".."], entities: [(kind: "rat", at: (5, 0))])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("rat"));
    }
}
