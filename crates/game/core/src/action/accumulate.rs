use crate::state::World;

use super::{ActionResult, Effect, ResultFlags};

/// Fold of many actors' results within one scheduler pass.
///
/// Merge rules:
///
/// | field     | rule                         |
/// |-----------|------------------------------|
/// | `world`   | most recently produced world |
/// | `quit`    | OR across the pass           |
/// | `message` | first writer wins            |
/// | `effect`  | first writer wins            |
/// | `action`  | first writer wins            |
///
/// Per-actor timing fields (`time_cost`, `no_time`, `retry`) are consumed by
/// the scheduler and never surface in the accumulated result.
#[derive(Clone, Debug)]
pub struct ActionAccumulator {
    world: World,
    quit: bool,
    message: Option<String>,
    effect: Option<Effect>,
    action: Option<String>,
}

impl ActionAccumulator {
    pub fn new(world: World) -> Self {
        Self {
            world,
            quit: false,
            message: None,
            effect: None,
            action: None,
        }
    }

    /// World as seen by the next actor in the pass.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_quit(&self) -> bool {
        self.quit
    }

    pub fn merge(&mut self, result: ActionResult) {
        self.world = result.world;
        self.quit |= result.flags.contains(ResultFlags::QUIT);
        if self.message.is_none() {
            self.message = result.message;
        }
        if self.effect.is_none() {
            self.effect = result.effect;
        }
        if self.action.is_none() {
            self.action = result.action;
        }
    }

    pub fn finish(self) -> ActionResult {
        let mut result = ActionResult::committed(self.world);
        if self.quit {
            result.flags |= ResultFlags::QUIT;
        }
        result.message = self.message;
        result.effect = self.effect;
        result.action = self.action;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Position, Tile};

    fn world(width: u32) -> World {
        World::new(width, 1, Tile::new("floor"))
    }

    #[test]
    fn first_writer_wins_and_quit_is_sticky() {
        let mut acc = ActionAccumulator::new(world(1));
        acc.merge(
            ActionResult::committed(world(2))
                .with_message("first")
                .with_effect(Effect::new("flash", vec![Position::ORIGIN])),
        );
        acc.merge(ActionResult::quit(world(3)).with_message("second"));
        acc.merge(ActionResult::pass_through(world(4), "save"));
        acc.merge(ActionResult::pass_through(world(5), "menu"));

        assert!(acc.is_quit());
        let result = acc.finish();
        assert_eq!(result.world.width(), 5);
        assert!(result.is_quit());
        assert_eq!(result.message.as_deref(), Some("first"));
        assert_eq!(result.effect.map(|effect| effect.kind).as_deref(), Some("flash"));
        assert_eq!(result.action.as_deref(), Some("save"));
    }

    #[test]
    fn empty_pass_returns_input_world() {
        let result = ActionAccumulator::new(world(3)).finish();
        assert_eq!(result.world.width(), 3);
        assert!(result.flags.is_empty());
        assert!(result.message.is_none());
    }
}
