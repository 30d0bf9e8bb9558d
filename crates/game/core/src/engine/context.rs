use std::fmt;

use crate::config::GameConfig;
use crate::env::{FieldOfView, Pathfinder};
use crate::input::{InputSource, KeyMap};
use crate::registry::TypeRegistry;
use crate::state::Rect;

use super::{BumpHook, LookHook, RangedTargetHook, TileBumpHook};

/// Optional callbacks threaded through a behavior call.
///
/// All fields are shared references, so the set is `Copy` and a hook can be
/// taken out of the context before the context itself is lent to it.
#[derive(Clone, Copy, Default)]
pub struct Hooks<'a> {
    pub on_bump: Option<&'a dyn BumpHook>,
    pub on_bump_tile: Option<&'a dyn TileBumpHook>,
    pub on_ranged_target: Option<&'a dyn RangedTargetHook>,
    pub on_look_move: Option<&'a dyn LookHook>,
}

impl fmt::Debug for Hooks<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_bump", &self.on_bump.is_some())
            .field("on_bump_tile", &self.on_bump_tile.is_some())
            .field("on_ranged_target", &self.on_ranged_target.is_some())
            .field("on_look_move", &self.on_look_move.is_some())
            .finish()
    }
}

/// Per-call bag of collaborators passed alongside `(entity, world)`.
///
/// A context is cheap to build and is rebuilt by the game loop for every
/// step. It holds no game state of its own: the only mutable borrow is the
/// input source, which the player state machine drains one key at a time.
pub struct Context<'a> {
    pub registry: &'a TypeRegistry,
    pub config: GameConfig,
    pub input: Option<&'a mut dyn InputSource>,
    pub keymap: Option<&'a KeyMap>,
    pub hooks: Hooks<'a>,
    /// Look-mode cursor bound, intersected with the map at use.
    pub look_bounds: Option<Rect>,
    pub fov: Option<&'a dyn FieldOfView>,
    pub pathfinder: Option<&'a dyn Pathfinder>,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry,
            config: GameConfig::default(),
            input: None,
            keymap: None,
            hooks: Hooks::default(),
            look_bounds: None,
            fov: None,
            pathfinder: None,
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_input(mut self, input: &'a mut dyn InputSource) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_keymap(mut self, keymap: &'a KeyMap) -> Self {
        self.keymap = Some(keymap);
        self
    }

    pub fn with_hooks(mut self, hooks: Hooks<'a>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn on_bump(mut self, hook: &'a dyn BumpHook) -> Self {
        self.hooks.on_bump = Some(hook);
        self
    }

    pub fn on_bump_tile(mut self, hook: &'a dyn TileBumpHook) -> Self {
        self.hooks.on_bump_tile = Some(hook);
        self
    }

    pub fn on_ranged_target(mut self, hook: &'a dyn RangedTargetHook) -> Self {
        self.hooks.on_ranged_target = Some(hook);
        self
    }

    pub fn on_look_move(mut self, hook: &'a dyn LookHook) -> Self {
        self.hooks.on_look_move = Some(hook);
        self
    }

    pub fn with_look_bounds(mut self, bounds: Rect) -> Self {
        self.look_bounds = Some(bounds);
        self
    }

    pub fn with_fov(mut self, fov: &'a dyn FieldOfView) -> Self {
        self.fov = Some(fov);
        self
    }

    pub fn with_pathfinder(mut self, pathfinder: &'a dyn Pathfinder) -> Self {
        self.pathfinder = Some(pathfinder);
        self
    }

    /// Returns true if `action` is declared as pass-through by the key map.
    pub fn is_pass_through(&self, action: &str) -> bool {
        self.keymap
            .is_some_and(|keymap| keymap.is_pass_through(action))
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("input", &self.input.is_some())
            .field("keymap", &self.keymap)
            .field("hooks", &self.hooks)
            .field("look_bounds", &self.look_bounds)
            .finish_non_exhaustive()
    }
}
