use std::collections::{BTreeSet, HashMap};

use crate::action::{Action, CoreAction, Direction};

use super::{Key, KeyMapError};

/// Validated mapping from keys to actions, plus the pass-through set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyMap {
    bindings: HashMap<Key, Action>,
    pass_through: BTreeSet<String>,
}

impl KeyMap {
    pub fn builder() -> KeyMapBuilder {
        KeyMapBuilder::default()
    }

    /// Arrow keys and vi-keys for movement, `.` to wait, `;` to look, `f` to
    /// target, `q` to quit, `S` for a `save` pass-through.
    pub fn standard() -> Self {
        let mut bindings = HashMap::new();
        let moves = [
            (Key::Up, Direction::North),
            (Key::Down, Direction::South),
            (Key::Left, Direction::West),
            (Key::Right, Direction::East),
            (Key::Char('k'), Direction::North),
            (Key::Char('j'), Direction::South),
            (Key::Char('h'), Direction::West),
            (Key::Char('l'), Direction::East),
            (Key::Char('y'), Direction::NorthWest),
            (Key::Char('u'), Direction::NorthEast),
            (Key::Char('b'), Direction::SouthWest),
            (Key::Char('n'), Direction::SouthEast),
        ];
        for (key, direction) in moves {
            bindings.insert(key, Action::Core(CoreAction::moving(direction)));
        }
        bindings.insert(Key::Char('.'), Action::Core(CoreAction::Wait));
        bindings.insert(Key::Char(';'), Action::Core(CoreAction::Look));
        bindings.insert(Key::Char('f'), Action::Core(CoreAction::Target));
        bindings.insert(Key::Char('q'), Action::Core(CoreAction::Quit));
        bindings.insert(Key::Char('S'), Action::PassThrough("save".to_owned()));

        Self {
            bindings,
            pass_through: BTreeSet::from(["save".to_owned()]),
        }
    }

    pub fn resolve(&self, key: &Key) -> Option<&Action> {
        self.bindings.get(key)
    }

    /// Direction bound to `key`, if it maps to a movement action.
    pub fn direction(&self, key: &Key) -> Option<Direction> {
        match self.resolve(key)? {
            Action::Core(action) => action.direction(),
            Action::PassThrough(_) => None,
        }
    }

    pub fn is_pass_through(&self, action: &str) -> bool {
        self.pass_through.contains(action)
    }

    pub fn pass_through_actions(&self) -> impl Iterator<Item = &str> {
        self.pass_through.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Collects bindings by action name and validates them in [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct KeyMapBuilder {
    bindings: Vec<(Key, String)>,
    pass_through: BTreeSet<String>,
}

impl KeyMapBuilder {
    /// Binds `key` to the action named `action`. Later bindings of the same key win.
    #[must_use]
    pub fn bind(mut self, key: impl Into<Key>, action: impl Into<String>) -> Self {
        self.bindings.push((key.into(), action.into()));
        self
    }

    /// Declares `action` as handled outside the core.
    #[must_use]
    pub fn pass_through(mut self, action: impl Into<String>) -> Self {
        self.pass_through.insert(action.into());
        self
    }

    /// # Errors
    ///
    /// - [`KeyMapError::ShadowedCoreAction`] if a pass-through name is a core action
    /// - [`KeyMapError::UnknownAction`] if a binding names neither
    pub fn build(self) -> Result<KeyMap, KeyMapError> {
        if let Some(name) = self
            .pass_through
            .iter()
            .find(|name| name.parse::<CoreAction>().is_ok())
        {
            return Err(KeyMapError::ShadowedCoreAction(name.clone()));
        }

        let mut bindings = HashMap::with_capacity(self.bindings.len());
        for (key, name) in self.bindings {
            let action = match name.parse::<CoreAction>() {
                Ok(core) => Action::Core(core),
                Err(_) if self.pass_through.contains(&name) => Action::PassThrough(name),
                Err(_) => return Err(KeyMapError::UnknownAction { key, action: name }),
            };
            bindings.insert(key, action);
        }

        tracing::debug!(
            bindings = bindings.len(),
            pass_through = self.pass_through.len(),
            "key map built"
        );

        Ok(KeyMap {
            bindings,
            pass_through: self.pass_through,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_core_and_pass_through_actions() {
        let keymap = KeyMap::builder()
            .bind('k', "move-north")
            .bind(Key::Enter, "wait")
            .bind('S', "save")
            .pass_through("save")
            .build()
            .unwrap();

        assert_eq!(
            keymap.resolve(&Key::Char('k')),
            Some(&Action::Core(CoreAction::MoveNorth))
        );
        assert_eq!(keymap.direction(&Key::Char('k')), Some(Direction::North));
        assert_eq!(keymap.direction(&Key::Enter), None);
        assert_eq!(
            keymap.resolve(&Key::Char('S')),
            Some(&Action::PassThrough("save".into()))
        );
        assert!(keymap.is_pass_through("save"));
        assert_eq!(keymap.resolve(&Key::Char('z')), None);
    }

    #[test]
    fn rejects_undeclared_actions() {
        let err = KeyMap::builder().bind('x', "explode").build().unwrap_err();
        assert_eq!(
            err,
            KeyMapError::UnknownAction {
                key: Key::Char('x'),
                action: "explode".into(),
            }
        );
    }

    #[test]
    fn rejects_pass_through_named_like_core_action() {
        let err = KeyMap::builder().pass_through("look").build().unwrap_err();
        assert_eq!(err, KeyMapError::ShadowedCoreAction("look".into()));
    }

    #[test]
    fn standard_map_covers_all_directions() {
        let keymap = KeyMap::standard();
        for direction in Direction::ALL {
            let bound = [
                'k', 'j', 'h', 'l', 'y', 'u', 'b', 'n',
            ]
            .into_iter()
            .any(|c| keymap.direction(&Key::Char(c)) == Some(direction));
            assert!(bound, "{direction} has no key");
        }
        assert_eq!(keymap.direction(&Key::Right), Some(Direction::East));
        assert!(keymap.is_pass_through("save"));
    }
}
