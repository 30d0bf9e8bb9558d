//! Rules core for turn-based grid games.
//!
//! `game-core` decides *when* an actor may act (the energy scheduler in
//! [`engine`]), *what* an action may do to the world (the action-result
//! protocol and movement resolver in [`action`]) and *how* raw input becomes a
//! committed action (the player state machine in [`player`]). Display data and
//! behavior are resolved through the inheritance-aware [`TypeRegistry`], so
//! entities stay plain data.
//!
//! Rendering, map generation, persistence, field-of-view and pathfinding are
//! collaborators; the core only defines the interfaces it consumes from them.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod input;
pub mod player;
pub mod registry;
pub mod state;

pub use action::{
    Action, ActionAccumulator, ActionResult, Blocker, CoreAction, Direction, Effect, LookInfo,
    LookSubject, ResultFlags, execute_action, try_move,
};
pub use config::GameConfig;
pub use engine::{
    Behavior, BumpHook, Context, Hooks, LookHook, RangedTargetHook, TileBumpHook, step_all,
    step_one,
};
pub use env::{FieldOfView, Pathfinder};
pub use error::{ErrorSeverity, GameError};
pub use input::{InputSource, Key, KeyMap, KeyMapBuilder, KeyMapError, ScriptedInput};
pub use player::{LookPurpose, LookSession, PlayerControlled, PlayerTurn};
pub use registry::{
    BehaviorKey, Category, Instance, Properties, PropertyKey, PropertyValue, RegistryBuilder,
    RegistryError, TypeRecord, TypeRegistry,
};
pub use state::{Entity, EntityId, Position, Rect, Tick, Tile, World, WorldError};
