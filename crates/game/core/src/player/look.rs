//! Look-mode cursor and cell descriptions.

use crate::action::{Direction, LookInfo, LookSubject};
use crate::input::Key;
use crate::registry::{PropertyKey, TypeRegistry};
use crate::state::{Position, Rect, World};

/// Cursor state of an open look sub-loop.
///
/// The cursor never leaves `bounds`, which is the map intersected with the
/// context's look bounds. Moves past the edge are clamped, not rejected.
/// The session also decides which keys commit and cancel it: `Enter` and
/// `Escape` unless [`LookSession::with_keys`] says otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookSession {
    cursor: Position,
    bounds: Rect,
    commit: Key,
    cancel: Key,
}

impl LookSession {
    /// Opens a session at `origin`.
    ///
    /// Returns `None` when the map is empty or `look_bounds` lies entirely off
    /// the map, leaving nothing to inspect.
    pub fn start(origin: Position, world: &World, look_bounds: Option<Rect>) -> Option<Self> {
        let map = world.bounds()?;
        let bounds = match look_bounds {
            Some(look) => map.intersect(&look)?,
            None => map,
        };
        Some(Self {
            cursor: bounds.clamp(origin),
            bounds,
            commit: Key::Enter,
            cancel: Key::Escape,
        })
    }

    /// Replaces the commit and cancel keys.
    #[must_use]
    pub fn with_keys(mut self, commit: Key, cancel: Key) -> Self {
        self.commit = commit;
        self.cancel = cancel;
        self
    }

    pub fn is_commit(&self, key: &Key) -> bool {
        *key == self.commit
    }

    pub fn is_cancel(&self, key: &Key) -> bool {
        *key == self.cancel
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Moves the cursor one step, clamped to the bounds. Returns the new cursor.
    pub fn step(&mut self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        self.cursor = self.bounds.clamp(self.cursor.offset(dx, dy));
        self.cursor
    }
}

/// Describes what is at `position`: the topmost entity if any, else the tile.
///
/// The topmost entity is the last one in iteration order. The text is the
/// subject's `description`, falling back to its `name`, then its type name.
pub fn describe(registry: &TypeRegistry, world: &World, position: Position) -> Option<LookInfo> {
    if let Some(entity) = world.entities_at(position).last() {
        let description = registry
            .resolve_text(entity, &PropertyKey::Description)
            .or_else(|| registry.resolve_text(entity, &PropertyKey::Name))
            .unwrap_or(entity.type_name.as_str())
            .to_owned();
        return Some(LookInfo {
            position,
            subject: LookSubject::Entity(entity.clone()),
            description,
        });
    }

    let tile = world.tile(position)?;
    let description = registry
        .resolve_text(tile, &PropertyKey::Description)
        .or_else(|| registry.resolve_text(tile, &PropertyKey::Name))
        .unwrap_or(tile.type_name.as_str())
        .to_owned();
    Some(LookInfo {
        position,
        subject: LookSubject::Tile(tile.clone()),
        description,
    })
}
