//! Movement and collision resolution.
//!
//! [`try_move`] is the only function in the crate that changes an entity's
//! position. Failed moves return the input world untouched with
//! `RETRY | NO_TIME`, plus a [`Blocker`] explaining why when the destination
//! was on the map.

use tracing::trace;

use crate::registry::{Category, PropertyKey, TypeRegistry};
use crate::state::{Entity, Position, Tile, World};

use super::{ActionResult, Blocker, CoreAction};

/// Returns true if `entity` may stand on `tile`.
///
/// The tile's `walkable` property (absent means walkable) is overridden by the
/// entity's `can-traverse` list, which names tile types matched through
/// inheritance.
pub fn is_walkable_by(registry: &TypeRegistry, tile: &Tile, entity: &Entity) -> bool {
    if registry
        .resolve_bool(tile, &PropertyKey::Walkable)
        .unwrap_or(true)
    {
        return true;
    }

    registry
        .resolve_instance_property(entity, &PropertyKey::CanTraverse)
        .and_then(|value| value.as_list())
        .is_some_and(|traversable| {
            traversable
                .iter()
                .any(|kind| registry.is_a(Category::Tile, &tile.type_name, kind))
        })
}

/// Returns true if `entity` stops others from entering its cell.
pub fn blocks_movement(registry: &TypeRegistry, entity: &Entity) -> bool {
    registry
        .resolve_bool(entity, &PropertyKey::BlocksMovement)
        .unwrap_or(false)
}

/// Attempts to move `entity` by `(dx, dy)`.
///
/// The entity is looked up in `world` by id so that the caller's copy may be
/// stale. Checks run in order: bounds, blocking entities, terrain.
pub fn try_move(
    registry: &TypeRegistry,
    mut world: World,
    entity: &Entity,
    dx: i32,
    dy: i32,
) -> ActionResult {
    let Some(mover) = world.entity(entity.id) else {
        return ActionResult::retry(world);
    };
    let Some((destination, tile)) = mover
        .position
        .checked_offset(dx, dy)
        .and_then(|destination| Some((destination, world.tile(destination)?)))
    else {
        trace!(target: "game_core::movement", entity = %entity.id, dx, dy, "out of bounds");
        return ActionResult::retry(world);
    };

    // A blocking entity is reported even on unwalkable terrain so that entity
    // bumps take priority over tile bumps.
    let blocker = world
        .entities_at(destination)
        .find(|other| other.id != entity.id && blocks_movement(registry, other))
        .cloned();
    if let Some(blocker) = blocker {
        trace!(
            target: "game_core::movement",
            entity = %entity.id,
            blocker = %blocker.id,
            %destination,
            "blocked by entity"
        );
        return ActionResult::retry(world).with_blocker(Blocker::Entity(blocker));
    }

    if !is_walkable_by(registry, tile, mover) {
        trace!(
            target: "game_core::movement",
            entity = %entity.id,
            %destination,
            tile = %tile.type_name,
            "blocked by terrain"
        );
        return ActionResult::retry(world).with_blocker(Blocker::Terrain(destination));
    }

    if let Some(mover) = world.entity_mut(entity.id) {
        mover.position = destination;
    }
    ActionResult::committed(world)
}

/// Executes a symbolic action by name.
///
/// Movement names delegate to [`try_move`]. Every other name, recognized or
/// not, returns the world unchanged with no flags.
pub fn execute_action(
    registry: &TypeRegistry,
    action: &str,
    entity: &Entity,
    world: World,
) -> ActionResult {
    match action.parse::<CoreAction>().ok().and_then(CoreAction::direction) {
        Some(direction) => {
            let (dx, dy) = direction.delta();
            try_move(registry, world, entity, dx, dy)
        }
        None => ActionResult::committed(world),
    }
}

/// Position reached by a committed move, if `entity` still exists.
pub fn position_of(world: &World, entity: &Entity) -> Option<Position> {
    world.entity(entity.id).map(|found| found.position)
}
