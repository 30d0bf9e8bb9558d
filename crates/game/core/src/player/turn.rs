use tracing::{debug, trace};

use crate::action::{Action, ActionResult, Blocker, CoreAction, execute_action};
use crate::engine::Context;
use crate::input::Key;
use crate::state::{Entity, World};

use super::look::{LookSession, describe};

/// Why look mode was entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookPurpose {
    /// Inspect a cell; committing reports what is there.
    Look,
    /// Pick a cell for the ranged-target hook.
    Target,
}

/// One player turn as an explicit state machine.
///
/// Each [`advance`](Self::advance) consumes exactly one key. Unknown keys and
/// failed moves leave the machine awaiting input without costing time; the
/// turn ends once it reaches [`PlayerTurn::Committed`].
///
/// ```text
///                 ┌──── unknown key / blocked move ────┐
///                 ▼                                    │
///          AwaitingInput ──────────────────────────────┘
///            │   │   ▲
///  look/target   │   └──── escape / hook retry ──┐
///            ▼   │                               │
///          Looking ──────── arrows ─────► Looking
///            │   │
///      enter │   └ move / quit / pass-through / bump hook
///            ▼
///          Committed(ActionResult)
/// ```
#[derive(Clone, Debug)]
pub enum PlayerTurn {
    AwaitingInput {
        actor: Entity,
        world: World,
    },
    Looking {
        actor: Entity,
        world: World,
        session: LookSession,
        purpose: LookPurpose,
    },
    Committed(ActionResult),
}

impl PlayerTurn {
    pub fn begin(actor: Entity, world: World) -> Self {
        PlayerTurn::AwaitingInput { actor, world }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, PlayerTurn::Committed(_))
    }

    /// Returns the committed result, or the still-pending turn.
    pub fn into_committed(self) -> Result<ActionResult, Self> {
        match self {
            PlayerTurn::Committed(result) => Ok(result),
            pending => Err(pending),
        }
    }

    /// Ends the turn with `QUIT`, keeping the current world.
    ///
    /// Used when the input source is exhausted mid-turn.
    pub fn abandon(self) -> ActionResult {
        match self {
            PlayerTurn::AwaitingInput { world, .. } | PlayerTurn::Looking { world, .. } => {
                ActionResult::quit(world)
            }
            PlayerTurn::Committed(result) => result,
        }
    }

    /// Feeds one key to the state machine.
    pub fn advance(self, key: &Key, ctx: &mut Context<'_>) -> Self {
        match self {
            PlayerTurn::AwaitingInput { actor, world } => await_input(actor, world, key, ctx),
            PlayerTurn::Looking {
                actor,
                world,
                session,
                purpose,
            } => look(actor, world, session, purpose, key, ctx),
            committed @ PlayerTurn::Committed(_) => committed,
        }
    }
}

fn await_input(actor: Entity, world: World, key: &Key, ctx: &mut Context<'_>) -> PlayerTurn {
    let Some(action) = ctx.keymap.and_then(|keymap| keymap.resolve(key)).cloned() else {
        trace!(target: "game_core::player", %key, "unbound key");
        return PlayerTurn::AwaitingInput { actor, world };
    };

    match action {
        Action::PassThrough(name) => {
            debug!(target: "game_core::player", action = %name, "pass-through");
            PlayerTurn::Committed(ActionResult::pass_through(world, name))
        }
        Action::Core(CoreAction::Quit) => PlayerTurn::Committed(ActionResult::quit(world)),
        Action::Core(CoreAction::Look) => enter_look(actor, world, LookPurpose::Look, ctx),
        Action::Core(CoreAction::Target) => enter_look(actor, world, LookPurpose::Target, ctx),
        Action::Core(core) => world_action(actor, world, core, ctx),
    }
}

fn world_action(
    actor: Entity,
    world: World,
    action: CoreAction,
    ctx: &mut Context<'_>,
) -> PlayerTurn {
    let result = execute_action(ctx.registry, action.as_str(), &actor, world);
    if !result.is_retry() {
        return PlayerTurn::Committed(result);
    }

    let hooks = ctx.hooks;
    let ActionResult { world, blocked, .. } = result;
    match blocked {
        Some(Blocker::Entity(blocker)) => match hooks.on_bump {
            Some(hook) => {
                let result = hook.on_bump(&actor, world, &blocker, ctx);
                settle(actor, result)
            }
            None => PlayerTurn::AwaitingInput { actor, world },
        },
        Some(Blocker::Terrain(position)) => match hooks.on_bump_tile {
            Some(hook) => {
                let result = hook.on_bump_tile(&actor, world, position, ctx);
                settle(actor, result)
            }
            None => PlayerTurn::AwaitingInput { actor, world },
        },
        None => PlayerTurn::AwaitingInput { actor, world },
    }
}

fn enter_look(
    actor: Entity,
    world: World,
    purpose: LookPurpose,
    ctx: &mut Context<'_>,
) -> PlayerTurn {
    let Some(session) = LookSession::start(actor.position, &world, ctx.look_bounds) else {
        trace!(target: "game_core::player", "nothing to look at");
        return PlayerTurn::AwaitingInput { actor, world };
    };
    notify_look(&world, &session, ctx);
    PlayerTurn::Looking {
        actor,
        world,
        session,
        purpose,
    }
}

fn look(
    actor: Entity,
    world: World,
    mut session: LookSession,
    purpose: LookPurpose,
    key: &Key,
    ctx: &mut Context<'_>,
) -> PlayerTurn {
    if session.is_commit(key) {
        return commit_look(actor, world, session, purpose, ctx);
    }
    if session.is_cancel(key) {
        return PlayerTurn::AwaitingInput { actor, world };
    }

    if let Some(direction) = ctx.keymap.and_then(|keymap| keymap.direction(key)) {
        session.step(direction);
        notify_look(&world, &session, ctx);
    }
    PlayerTurn::Looking {
        actor,
        world,
        session,
        purpose,
    }
}

fn commit_look(
    actor: Entity,
    world: World,
    session: LookSession,
    purpose: LookPurpose,
    ctx: &mut Context<'_>,
) -> PlayerTurn {
    let target = session.cursor();
    let info = describe(ctx.registry, &world, target);

    let mut result = ActionResult::free(world);
    result.target_position = Some(target);
    if let Some(info) = info {
        result.message = Some(info.description.clone());
        result.look_info = Some(info);
    }
    debug!(target: "game_core::player", ?purpose, %target, "look committed");

    match (purpose, ctx.hooks.on_ranged_target) {
        (LookPurpose::Target, Some(hook)) => {
            let outcome = hook.on_ranged_target(&actor, result.world, target, ctx);
            settle(actor, outcome)
        }
        _ => PlayerTurn::Committed(result),
    }
}

fn notify_look(world: &World, session: &LookSession, ctx: &Context<'_>) {
    if let Some(hook) = ctx.hooks.on_look_move {
        let cursor = session.cursor();
        let info = describe(ctx.registry, world, cursor);
        hook.on_look_move(cursor, info.as_ref());
    }
}

/// Hook results commit unless they ask for a retry.
fn settle(actor: Entity, result: ActionResult) -> PlayerTurn {
    if result.is_retry() {
        PlayerTurn::AwaitingInput {
            actor,
            world: result.world,
        }
    } else {
        PlayerTurn::Committed(result)
    }
}
