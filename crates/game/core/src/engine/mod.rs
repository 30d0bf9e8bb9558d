//! Behavior dispatch and the energy scheduler.
//!
//! The scheduler never knows what a behavior does. It resolves the acting
//! entity's behavior through the [`TypeRegistry`](crate::TypeRegistry), hands
//! it the entity, the world and a freshly built [`Context`], and applies the
//! timing consequence of the returned [`ActionResult`].

mod context;
mod hook;
mod scheduler;

pub use context::{Context, Hooks};
pub use hook::{BumpHook, LookHook, RangedTargetHook, TileBumpHook};
pub use scheduler::{delay_of, next_action_of, select_actor, step_all, step_one};

use crate::action::ActionResult;
use crate::state::{Entity, World};

/// Polymorphic decision procedure attached to entity types.
///
/// Implementations are registered once in the
/// [`RegistryBuilder`](crate::RegistryBuilder) and referenced from entity
/// types by [`BehaviorKey`](crate::BehaviorKey); entities never hold them.
///
/// `entity` is a snapshot taken before the call. Implementations return the
/// next world and must not move entities except through
/// [`try_move`](crate::try_move).
pub trait Behavior: Send + Sync {
    fn act(&self, entity: &Entity, world: World, ctx: &mut Context<'_>) -> ActionResult;
}
