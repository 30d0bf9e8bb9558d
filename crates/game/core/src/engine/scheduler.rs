//! Energy-based turn scheduler.
//!
//! Each entity with a resolvable behavior carries a `next-action` tick
//! (absent means 0). The entity with the lowest tick acts; a timed action
//! pushes its tick forward by `time_cost`, or by its `delay` when no cost is
//! given. Lower delay means acting more often.

use tracing::{debug, trace};

use crate::action::{ActionAccumulator, ActionResult};
use crate::config::GameConfig;
use crate::registry::{PropertyKey, TypeRegistry};
use crate::state::{Entity, EntityId, Tick, World};

use super::Context;

/// Tick at which `entity` may act next.
pub fn next_action_of(registry: &TypeRegistry, entity: &Entity) -> Tick {
    registry
        .resolve_int(entity, &PropertyKey::NextAction)
        .map(|value| Tick(u64::try_from(value).unwrap_or(0)))
        .unwrap_or(Tick::ZERO)
}

/// Default cost of a timed action for `entity`.
pub fn delay_of(registry: &TypeRegistry, entity: &Entity, config: &GameConfig) -> u64 {
    registry
        .resolve_int(entity, &PropertyKey::Delay)
        .map(|value| u64::try_from(value).unwrap_or(0))
        .unwrap_or(config.default_delay)
}

/// Picks the entity that acts next: lowest `next-action` among entities whose
/// type has a behavior, ties broken by iteration order.
pub fn select_actor<'w>(registry: &TypeRegistry, world: &'w World) -> Option<&'w Entity> {
    world
        .entities()
        .iter()
        .filter(|entity| registry.has_behavior(&entity.type_name))
        .enumerate()
        .min_by_key(|(order, entity)| (next_action_of(registry, entity), *order))
        .map(|(_, entity)| entity)
}

/// Runs one turn for the next scheduled actor.
///
/// Returns the world unchanged with no flags when nothing can act.
pub fn step_one(world: World, ctx: &mut Context<'_>) -> ActionResult {
    let Some(actor) = select_actor(ctx.registry, &world).cloned() else {
        trace!(target: "game_core::scheduler", "no entity can act");
        return ActionResult::committed(world);
    };
    act(actor, world, ctx)
}

/// Runs one turn for every entity that has a behavior, in iteration order.
///
/// Each actor is re-fetched from the accumulating world before it acts, so an
/// entity removed by an earlier actor in the same pass is skipped.
pub fn step_all(world: World, ctx: &mut Context<'_>) -> ActionResult {
    let registry = ctx.registry;
    let actors: Vec<EntityId> = world
        .entities()
        .iter()
        .filter(|entity| registry.has_behavior(&entity.type_name))
        .map(|entity| entity.id)
        .collect();

    let mut accumulator = ActionAccumulator::new(world);
    for id in actors {
        let Some(actor) = accumulator.world().entity(id).cloned() else {
            trace!(target: "game_core::scheduler", entity = %id, "actor left the world mid-pass");
            continue;
        };
        let world = accumulator.world().clone();
        accumulator.merge(act(actor, world, ctx));
    }

    let result = accumulator.finish();
    debug!(
        target: "game_core::scheduler",
        quit = result.is_quit(),
        action = ?result.action,
        "pass complete"
    );
    result
}

fn act(actor: Entity, world: World, ctx: &mut Context<'_>) -> ActionResult {
    let registry = ctx.registry;
    let Some(behavior) = registry.behavior(&actor.type_name) else {
        return ActionResult::committed(world);
    };

    debug!(
        target: "game_core::scheduler",
        entity = %actor.id,
        kind = %actor.type_name,
        next_action = %next_action_of(registry, &actor),
        "acting"
    );

    let mut result = behavior.act(&actor, world, ctx);
    apply_timing(registry, &ctx.config, actor.id, &mut result);
    result
}

fn apply_timing(
    registry: &TypeRegistry,
    config: &GameConfig,
    id: EntityId,
    result: &mut ActionResult,
) {
    if result.is_no_time() {
        return;
    }
    // The actor may have died during its own action.
    let Some(entity) = result.world.entity_mut(id) else {
        return;
    };

    let cost = result
        .time_cost
        .map(|cost| cost.0)
        .unwrap_or_else(|| delay_of(registry, entity, config));
    let next = next_action_of(registry, entity) + cost;
    entity.properties.set(PropertyKey::NextAction, next.0);

    trace!(target: "game_core::scheduler", entity = %id, cost, next_action = %next, "timing applied");
}
