use bitflags::bitflags;

use crate::state::{Entity, Position, Tick, Tile, World};

bitflags! {
    /// Flow-control flags carried by an [`ActionResult`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ResultFlags: u8 {
        /// Zero ticks consumed regardless of delay or time cost.
        const NO_TIME = 1 << 0;
        /// The action had no effect; ask the same actor again.
        const RETRY   = 1 << 1;
        /// The session should end.
        const QUIT    = 1 << 2;
    }
}

/// Why a move did not happen. Set by the movement resolver only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Blocker {
    /// A movement-blocking entity occupies the destination.
    Entity(Entity),
    /// The destination terrain is not walkable by the mover.
    Terrain(Position),
}

/// Opaque visual payload for the rendering layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: String,
    pub cells: Vec<Position>,
}

impl Effect {
    pub fn new(kind: impl Into<String>, cells: Vec<Position>) -> Self {
        Self {
            kind: kind.into(),
            cells,
        }
    }
}

/// What occupies an inspected cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookSubject {
    Entity(Entity),
    Tile(Tile),
}

/// Result of inspecting a single cell in look mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookInfo {
    pub position: Position,
    pub subject: LookSubject,
    pub description: String,
}

/// The single return contract of every behavior and world-mutating primitive.
///
/// `world` is always present; everything else is optional. Callers merge it
/// into scheduling state ([`crate::engine::step_one`]) or fold many of them
/// together ([`super::ActionAccumulator`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct ActionResult {
    pub world: World,
    pub flags: ResultFlags,
    /// Overrides the actor's default delay when time is consumed.
    pub time_cost: Option<Tick>,
    pub message: Option<String>,
    pub effect: Option<Effect>,
    /// Pass-through action name for the surrounding game loop.
    pub action: Option<String>,
    pub blocked: Option<Blocker>,
    pub target_position: Option<Position>,
    pub look_info: Option<LookInfo>,
}

impl ActionResult {
    /// A committed action that consumes the actor's default delay.
    pub fn committed(world: World) -> Self {
        Self {
            world,
            flags: ResultFlags::empty(),
            time_cost: None,
            message: None,
            effect: None,
            action: None,
            blocked: None,
            target_position: None,
            look_info: None,
        }
    }

    /// Nothing happened; solicit another decision for free.
    pub fn retry(world: World) -> Self {
        Self::committed(world).with_flags(ResultFlags::RETRY | ResultFlags::NO_TIME)
    }

    /// A committed action that costs no time.
    pub fn free(world: World) -> Self {
        Self::committed(world).with_flags(ResultFlags::NO_TIME)
    }

    pub fn quit(world: World) -> Self {
        Self::committed(world).with_flags(ResultFlags::QUIT)
    }

    /// Defers `action` to the caller without touching the world.
    pub fn pass_through(world: World, action: impl Into<String>) -> Self {
        let mut result = Self::free(world);
        result.action = Some(action.into());
        result
    }

    pub fn with_flags(mut self, flags: ResultFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_time_cost(mut self, ticks: u64) -> Self {
        self.time_cost = Some(Tick(ticks));
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn with_blocker(mut self, blocker: Blocker) -> Self {
        self.blocked = Some(blocker);
        self
    }

    pub fn is_retry(&self) -> bool {
        self.flags.contains(ResultFlags::RETRY)
    }

    pub fn is_no_time(&self) -> bool {
        self.flags.contains(ResultFlags::NO_TIME)
    }

    pub fn is_quit(&self) -> bool {
        self.flags.contains(ResultFlags::QUIT)
    }

    pub fn blocked_entity(&self) -> Option<&Entity> {
        match &self.blocked {
            Some(Blocker::Entity(entity)) => Some(entity),
            _ => None,
        }
    }

    pub fn blocked_position(&self) -> Option<Position> {
        match &self.blocked {
            Some(Blocker::Terrain(position)) => Some(*position),
            _ => None,
        }
    }
}
