//! Key binding loader.
//!
//! ```toml
//! pass_through = ["save", "inventory"]
//!
//! [bindings]
//! h = "move-west"
//! up = "move-north"
//! S = "save"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{Key, KeyMap};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Raw key map file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMapSpec {
    /// Action names the game handles itself.
    #[serde(default)]
    pub pass_through: Vec<String>,
    /// Key name to action name.
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
}

impl KeyMapSpec {
    /// Validates the bindings and builds a [`KeyMap`].
    pub fn build(self) -> LoadResult<KeyMap> {
        let mut builder = self
            .pass_through
            .into_iter()
            .fold(KeyMap::builder(), |builder, name| builder.pass_through(name));

        for (name, action) in self.bindings {
            let key: Key = name
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid key '{}': {}", name, e))?;
            builder = builder.bind(key, action);
        }

        builder
            .build()
            .map_err(|e| anyhow::anyhow!("Invalid key map: {}", e))
    }
}

/// Loader for key maps from TOML files.
pub struct KeyMapLoader;

impl KeyMapLoader {
    pub fn parse(content: &str) -> LoadResult<KeyMap> {
        let spec: KeyMapSpec = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse key map TOML: {}", e))?;
        spec.build()
    }

    /// Load a key map from a TOML file.
    pub fn load(path: &Path) -> LoadResult<KeyMap> {
        let content = read_file(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Action, CoreAction, Direction};

    #[test]
    fn parses_bindings_and_pass_through() {
        let keymap = KeyMapLoader::parse(
            r#"
            pass_through = ["save"]

            [bindings]
            h = "move-west"
            up = "move-north"
            S = "save"
            "." = "wait"
            "#,
        )
        .unwrap();

        assert_eq!(keymap.len(), 4);
        assert_eq!(keymap.direction(&Key::Char('h')), Some(Direction::West));
        assert_eq!(keymap.direction(&Key::Up), Some(Direction::North));
        assert_eq!(
            keymap.resolve(&Key::Char('.')),
            Some(&Action::Core(CoreAction::Wait))
        );
        assert_eq!(
            keymap.resolve(&Key::Char('S')),
            Some(&Action::PassThrough("save".into()))
        );
        assert!(keymap.is_pass_through("save"));
    }

    #[test]
    fn rejects_unknown_action() {
        let err = KeyMapLoader::parse("[bindings]\nx = \"explode\"").unwrap_err();
        assert!(err.to_string().contains("explode"));
    }

    #[test]
    fn rejects_pass_through_that_shadows_core_action() {
        let err = KeyMapLoader::parse("pass_through = [\"quit\"]").unwrap_err();
        assert!(err.to_string().contains("quit"));
    }

    #[test]
    fn rejects_empty_key_name() {
        assert!(KeyMapLoader::parse("[bindings]\n\"\" = \"wait\"").is_err());
    }
}
