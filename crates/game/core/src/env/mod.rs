//! Interfaces of the external collaborators the core consumes.
//!
//! Field-of-view and pathfinding are pure functions over a world snapshot. The
//! core ships no implementation; games plug theirs into the
//! [`Context`](crate::Context) and behaviors call them through it.

use std::collections::HashSet;

use crate::registry::{PropertyKey, TypeRegistry};
use crate::state::{Entity, Position, Tile, World};

/// Visible-cell computation, typically shadow casting.
pub trait FieldOfView: Send + Sync {
    /// Cells visible from `origin`. `radius = None` is bounded only by the map.
    fn compute(
        &self,
        registry: &TypeRegistry,
        world: &World,
        origin: Position,
        radius: Option<u32>,
    ) -> HashSet<Position>;
}

/// Route search, typically A*.
pub trait Pathfinder: Send + Sync {
    /// Ordered cells from `from` (exclusive) to `to` (inclusive), or `None` if
    /// no route exists within `max_distance` steps.
    fn find_path(
        &self,
        registry: &TypeRegistry,
        world: &World,
        mover: &Entity,
        from: Position,
        to: Position,
        max_distance: Option<u32>,
    ) -> Option<Vec<Position>>;
}

/// Returns true if light passes through `tile`. Absent means transparent.
pub fn is_transparent(registry: &TypeRegistry, tile: &Tile) -> bool {
    registry
        .resolve_bool(tile, &PropertyKey::Transparent)
        .unwrap_or(true)
}
