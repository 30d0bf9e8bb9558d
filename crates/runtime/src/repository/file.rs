//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::World;
use serde::{Deserialize, Serialize};

use super::{RepositoryError, Result, SaveRepository, validate_slot};

/// Current save envelope version.
pub const SAVE_VERSION: u32 = 1;

/// Leading bytes of every save file.
///
/// Decoded on its own first so an incompatible file is rejected before any
/// world data is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct SaveHeader {
    version: u32,
}

fn encode(world: &World) -> Result<Vec<u8>> {
    let header = SaveHeader {
        version: SAVE_VERSION,
    };
    bincode::serialize(&(header, world)).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<World> {
    let header: SaveHeader =
        bincode::deserialize(bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    if header.version != SAVE_VERSION {
        return Err(RepositoryError::UnsupportedVersion {
            found: header.version,
            expected: SAVE_VERSION,
        });
    }

    let (_, world): (SaveHeader, World) =
        bincode::deserialize(bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    world.validate()?;
    Ok(world)
}

/// File-based implementation of SaveRepository.
///
/// Stores each slot as `{slot}.sav` in the base directory.
///
/// # File Format
///
/// A bincode-encoded `(SaveHeader, World)` pair. Writes go to a temporary
/// file that is renamed over the target, so a crash mid-save leaves the
/// previous save intact.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{}.sav", slot))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, world: &World) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("sav.tmp");

        let bytes = encode(world)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(slot, path = %path.display(), "saved world");
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<World>> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let world = decode(&bytes)?;

        tracing::debug!(slot, path = %path.display(), "loaded world");
        Ok(Some(world))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(slot, "deleted save");
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(slot) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_suffix(".sav"))
            {
                slots.push(slot.to_owned());
            }
        }
        slots.sort_unstable();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Position, Properties, PropertyKey, Tile};

    fn sample_world() -> World {
        let mut world = World::new(3, 2, Tile::new("floor"));
        world.set_tile(Position::new(2, 1), Tile::new("wall"));
        world
            .spawn(
                "hero",
                Position::new(1, 0),
                Properties::new().with(PropertyKey::NextAction, 20),
            )
            .unwrap();
        world
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        let world = sample_world();

        assert!(!repo.exists("slot-1"));
        repo.save("slot-1", &world).unwrap();
        assert!(repo.exists("slot-1"));
        assert_eq!(repo.load("slot-1").unwrap(), Some(world));
        assert!(!dir.path().join("slot-1.sav.tmp").exists());
    }

    #[test]
    fn rejects_unknown_version_before_decoding_world() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        let future = bincode::serialize(&(SaveHeader { version: 99 }, "not a world")).unwrap();
        fs::write(dir.path().join("old.sav"), future).unwrap();

        let err = repo.load("old").unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::UnsupportedVersion {
                found: 99,
                expected: SAVE_VERSION
            }
        ));
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        fs::write(dir.path().join("bad.sav"), [1u8, 0]).unwrap();
        assert!(matches!(
            repo.load("bad").unwrap_err(),
            RepositoryError::Serialization(_)
        ));
    }

    #[test]
    fn world_that_breaks_its_invariants_is_rejected() {
        #[derive(Serialize)]
        struct RawWorld {
            width: u32,
            height: u32,
            tiles: Vec<Tile>,
            entities: Vec<game_core::Entity>,
            next_entity_id: u32,
        }

        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        let raw = RawWorld {
            width: 4,
            height: 4,
            tiles: vec![Tile::new("floor")],
            entities: Vec::new(),
            next_entity_id: 0,
        };
        let bytes = bincode::serialize(&(SaveHeader { version: SAVE_VERSION }, raw)).unwrap();
        fs::write(dir.path().join("short.sav"), bytes).unwrap();

        assert!(matches!(
            repo.load("short").unwrap_err(),
            RepositoryError::CorruptWorld(game_core::WorldError::TileCountMismatch {
                expected: 16,
                actual: 1
            })
        ));
    }

    #[test]
    fn lists_and_deletes_slots() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        let world = sample_world();
        repo.save("b", &world).unwrap();
        repo.save("a", &world).unwrap();

        assert_eq!(repo.list_slots().unwrap(), ["a", "b"]);
        repo.delete("a").unwrap();
        repo.delete("a").unwrap();
        assert_eq!(repo.list_slots().unwrap(), ["b"]);
        assert_eq!(repo.load("a").unwrap(), None);
    }

    #[test]
    fn rejects_path_like_slot_names() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSaveRepository::new(dir.path()).unwrap();
        assert!(matches!(
            repo.save("../escape", &sample_world()).unwrap_err(),
            RepositoryError::InvalidSlot(_)
        ));
        assert!(!repo.exists(""));
    }
}
