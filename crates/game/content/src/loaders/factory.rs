//! Content factory for loading a game's data directory.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, KeyMap, RegistryBuilder, TypeRegistry, World};

use crate::loaders::{ConfigLoader, KeyMapLoader, LoadResult, TypeCatalog, TypeLoader, WorldLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── types.ron
/// ├── keymap.toml      (optional, standard bindings otherwise)
/// └── maps/
///     ├── town.ron
///     └── cellar.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the type catalog from `types.ron`.
    pub fn load_types(&self) -> LoadResult<TypeCatalog> {
        TypeLoader::load(&self.data_dir.join("types.ron"))
    }

    /// Returns a registry builder pre-populated with `types.ron`.
    ///
    /// Callers register behavior implementations on the returned builder and
    /// then build it.
    pub fn registry_builder(&self) -> LoadResult<RegistryBuilder> {
        let mut builder = TypeRegistry::builder();
        self.load_types()?.register(&mut builder);
        Ok(builder)
    }

    /// Load key bindings from `keymap.toml`, or [`KeyMap::standard`] when the
    /// file does not exist.
    pub fn load_keymap(&self) -> LoadResult<KeyMap> {
        let path = self.data_dir.join("keymap.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no key map file, using standard bindings");
            return Ok(KeyMap::standard());
        }
        KeyMapLoader::load(&path)
    }

    /// Load a world from `maps/{map_name}.ron`.
    pub fn load_world(&self, map_name: &str) -> LoadResult<World> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        WorldLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Category, Key, PlayerControlled};
    use std::fs;

    fn data_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "default_delay = 12\n").unwrap();
        fs::write(
            dir.path().join("types.ron"),
            r#"(
                tiles: { "floor": (properties: {}), "wall": (properties: { "walkable": Bool(false) }) },
                entities: { "hero": (properties: { "act": Behavior("player") }) },
            )"#,
        )
        .unwrap();
        fs::create_dir(dir.path().join("maps")).unwrap();
        fs::write(
            dir.path().join("maps").join("cell.ron"),
            r####"(
                legend: { '.': "floor", '#': "wall" },
                rows: ["###", "#.#", "###"],
                entities: [(kind: "hero", at: (1, 1))],
            )"####,
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_a_complete_data_directory() {
        let dir = data_dir();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap().default_delay, 12);

        let registry = factory
            .registry_builder()
            .unwrap()
            .behavior("player", PlayerControlled)
            .build()
            .unwrap();
        assert!(registry.contains(Category::Tile, "wall"));
        assert!(registry.has_behavior("hero"));

        let world = factory.load_world("cell").unwrap();
        assert_eq!(world.entities().len(), 1);
    }

    #[test]
    fn keymap_falls_back_to_standard_bindings() {
        let dir = data_dir();
        let factory = ContentFactory::new(dir.path());
        let keymap = factory.load_keymap().unwrap();
        assert!(keymap.resolve(&Key::Char('q')).is_some());

        fs::write(dir.path().join("keymap.toml"), "[bindings]\nx = \"quit\"\n").unwrap();
        let keymap = factory.load_keymap().unwrap();
        assert_eq!(keymap.len(), 1);
        assert!(keymap.resolve(&Key::Char('q')).is_none());
    }

    #[test]
    fn missing_map_is_an_error() {
        let dir = data_dir();
        assert!(ContentFactory::new(dir.path()).load_world("nowhere").is_err());
    }
}
