//! Extension points consulted by the player state machine.
//!
//! Hooks receive the same [`Context`] the behavior was called with, so they can
//! resolve properties or even move entities themselves. A hook result carrying
//! `RETRY` sends the player back to awaiting input; anything else commits.

use crate::action::{ActionResult, LookInfo};
use crate::state::{Entity, Position, World};

use super::Context;

/// Called when a move is blocked by a movement-blocking entity.
///
/// Typical implementations resolve melee combat or open a trade dialog. The
/// returned result consumes the turn even on a logical miss.
pub trait BumpHook: Send + Sync {
    fn on_bump(
        &self,
        mover: &Entity,
        world: World,
        blocker: &Entity,
        ctx: &mut Context<'_>,
    ) -> ActionResult;
}

/// Called when a move is blocked by terrain inside the map.
pub trait TileBumpHook: Send + Sync {
    fn on_bump_tile(
        &self,
        mover: &Entity,
        world: World,
        position: Position,
        ctx: &mut Context<'_>,
    ) -> ActionResult;
}

/// Called when the player confirms a cell in targeting mode.
pub trait RangedTargetHook: Send + Sync {
    fn on_ranged_target(
        &self,
        actor: &Entity,
        world: World,
        target: Position,
        ctx: &mut Context<'_>,
    ) -> ActionResult;
}

/// Observer notified of every cursor position in look mode, the initial one
/// included.
pub trait LookHook: Send + Sync {
    fn on_look_move(&self, cursor: Position, info: Option<&LookInfo>);
}
