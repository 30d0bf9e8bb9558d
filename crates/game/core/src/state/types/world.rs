use std::collections::BTreeSet;

use crate::registry::Properties;
use crate::state::WorldError;

use super::{Entity, EntityId, Position, Rect, Tile};

/// Snapshot of the playing field: a fixed-size tile grid plus the entities on it.
///
/// A `World` is a value. Behaviors take it by value and hand back the next
/// world inside an [`ActionResult`](crate::ActionResult); nothing holds a
/// long-lived mutable reference into it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    width: u32,
    height: u32,
    /// Row-major, addressed by `y * width + x`.
    tiles: Vec<Tile>,
    entities: Vec<Entity>,
    /// Monotonic id allocator; ids are never reused.
    next_entity_id: u32,
}

impl World {
    /// Creates a `width` × `height` world filled with copies of `fill`.
    pub fn new(width: u32, height: u32, fill: Tile) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            tiles: vec![fill; len],
            entities: Vec::new(),
            next_entity_id: 0,
        }
    }

    /// Creates a world from a row-major tile vector.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TileCountMismatch`] if `tiles.len() != width * height`.
    pub fn from_tiles(width: u32, height: u32, tiles: Vec<Tile>) -> Result<Self, WorldError> {
        let expected = width as usize * height as usize;
        if tiles.len() != expected {
            return Err(WorldError::TileCountMismatch {
                expected,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
            entities: Vec::new(),
            next_entity_id: 0,
        })
    }

    /// Checks the invariants [`World::from_tiles`] and [`World::spawn`]
    /// maintain, for worlds that arrive by deserialization.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: tile count, entity bounds, id
    /// uniqueness, then the id allocator.
    pub fn validate(&self) -> Result<(), WorldError> {
        let expected = self.width as usize * self.height as usize;
        if self.tiles.len() != expected {
            return Err(WorldError::TileCountMismatch {
                expected,
                actual: self.tiles.len(),
            });
        }

        let mut ids = BTreeSet::new();
        for entity in &self.entities {
            if !self.contains(entity.position) {
                return Err(WorldError::OutOfBounds(entity.position));
            }
            if !ids.insert(entity.id) {
                return Err(WorldError::DuplicateEntity(entity.id));
            }
        }

        match ids.last() {
            Some(&existing) if existing.0 >= self.next_entity_id => {
                Err(WorldError::StaleIdAllocator {
                    next: self.next_entity_id,
                    existing,
                })
            }
            _ => Ok(()),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Inclusive rectangle covering every cell, or `None` for an empty map.
    pub fn bounds(&self) -> Option<Rect> {
        (self.width > 0 && self.height > 0).then(|| {
            Rect::new(
                Position::ORIGIN,
                Position::new(self.width as i32 - 1, self.height as i32 - 1),
            )
        })
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|index| &self.tiles[index])
    }

    /// Replaces the tile at `position`, returning the previous one.
    pub fn set_tile(&mut self, position: Position, tile: Tile) -> Option<Tile> {
        let index = self.index(position)?;
        Some(std::mem::replace(&mut self.tiles[index], tile))
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// All entities in stable iteration order (spawn order).
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    /// Entities standing on `position`, in iteration order.
    pub fn entities_at(&self, position: Position) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |entity| entity.position == position)
    }

    /// Places a new entity and returns its freshly allocated id.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `position` lies outside the map.
    pub fn spawn(
        &mut self,
        type_name: impl Into<String>,
        position: Position,
        properties: Properties,
    ) -> Result<EntityId, WorldError> {
        if !self.contains(position) {
            return Err(WorldError::OutOfBounds(position));
        }
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities
            .push(Entity::new(id, type_name, position).with_properties(properties));
        Ok(id)
    }

    /// Removes an entity, returning it if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|entity| entity.id == id)?;
        Some(self.entities.remove(index))
    }
}
