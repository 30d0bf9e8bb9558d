//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use game_core::World;

use super::{RepositoryError, Result, SaveRepository, validate_slot};

/// In-memory implementation of SaveRepository.
#[derive(Default)]
pub struct InMemorySaveRepository {
    saves: RwLock<BTreeMap<String, World>>,
}

impl InMemorySaveRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, world: &World) -> Result<()> {
        validate_slot(slot)?;
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(slot.to_owned(), world.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<World>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Tile;

    #[test]
    fn stores_independent_copies() {
        let repo = InMemorySaveRepository::new();
        let mut world = World::new(2, 2, Tile::new("floor"));
        repo.save("quick", &world).unwrap();

        world.set_tile(game_core::Position::ORIGIN, Tile::new("wall"));
        let saved = repo.load("quick").unwrap().unwrap();
        assert_eq!(saved.tiles()[0].type_name, "floor");
        assert_eq!(repo.list_slots().unwrap(), ["quick"]);

        repo.delete("quick").unwrap();
        assert!(!repo.exists("quick"));
    }
}
