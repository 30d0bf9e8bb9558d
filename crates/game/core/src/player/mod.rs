//! Player interaction: turning raw keys into exactly one committed action.
//!
//! [`PlayerTurn`] is the state machine; [`act`] drives it from the context's
//! blocking [`InputSource`](crate::InputSource). Asynchronous runtimes drive
//! the same machine themselves, awaiting one key per
//! [`advance`](PlayerTurn::advance).

mod look;
mod turn;

pub use look::{LookSession, describe};
pub use turn::{LookPurpose, PlayerTurn};

use tracing::warn;

use crate::action::ActionResult;
use crate::engine::{Behavior, Context};
use crate::state::{Entity, World};

/// Runs one player turn, pulling keys until an action commits.
///
/// Retries never reach the caller. If the input source is missing or runs dry
/// the turn commits `QUIT`.
pub fn act(entity: &Entity, world: World, ctx: &mut Context<'_>) -> ActionResult {
    let mut turn = PlayerTurn::begin(entity.clone(), world);
    loop {
        turn = match turn.into_committed() {
            Ok(result) => return result,
            Err(pending) => {
                let Some(key) = ctx.input.as_deref_mut().and_then(|input| input.next_key())
                else {
                    warn!(target: "game_core::player", entity = %entity.id, "input exhausted; quitting");
                    return pending.abandon();
                };
                pending.advance(&key, ctx)
            }
        };
    }
}

/// Behavior for entities steered by the context's input source.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayerControlled;

impl Behavior for PlayerControlled {
    fn act(&self, entity: &Entity, world: World, ctx: &mut Context<'_>) -> ActionResult {
        act(entity, world, ctx)
    }
}
