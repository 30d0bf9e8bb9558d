//! The game loop.
//!
//! A [`GameSession`] owns the world between steps. Each step runs
//! [`step_one`] on a blocking task with a freshly built [`Context`], so the
//! player state machine can block on [`ChannelInput`] without stalling the
//! async runtime. The session then folds the result back in: it stores the
//! new world, publishes [`GameEvent`]s and services the `save` pass-through.
//!
//! ```text
//!   frontend ── Key ──► mpsc ──► ChannelInput ─┐
//!                                               ▼
//!   GameSession::run ── spawn_blocking(step_one(world, ctx)) ── ActionResult
//!        │                                                          │
//!        ◄──────────── world, events, save, quit ◄─────────────────┘
//! ```

use std::fmt;
use std::sync::Arc;

use game_content::ContentFactory;
use game_core::engine::select_actor;
use game_core::{
    ActionResult, BumpHook, Context, EntityId, FieldOfView, GameConfig, Hooks, KeyMap, LookHook,
    Pathfinder, RangedTargetHook, Rect, RegistryBuilder, ResultFlags, TileBumpHook, TypeRegistry,
    World, step_one,
};
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_EVENT_CAPACITY, DEFAULT_SAVE_SLOT, SessionConfig};
use crate::error::{Result, RuntimeError};
use crate::events::{EventBus, GameEvent};
use crate::input::ChannelInput;
use crate::repository::{FileSaveRepository, SaveRepository};

/// Pass-through action name the session handles itself.
pub const SAVE_ACTION: &str = "save";

/// Owned hook implementations, lent to each step's [`Context`].
#[derive(Clone, Default)]
pub struct SessionHooks {
    pub on_bump: Option<Arc<dyn BumpHook>>,
    pub on_bump_tile: Option<Arc<dyn TileBumpHook>>,
    pub on_ranged_target: Option<Arc<dyn RangedTargetHook>>,
    pub on_look_move: Option<Arc<dyn LookHook>>,
}

impl SessionHooks {
    fn borrowed(&self) -> Hooks<'_> {
        Hooks {
            on_bump: self.on_bump.as_deref(),
            on_bump_tile: self.on_bump_tile.as_deref(),
            on_ranged_target: self.on_ranged_target.as_deref(),
            on_look_move: self.on_look_move.as_deref(),
        }
    }
}

impl fmt::Debug for SessionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.borrowed(), f)
    }
}

/// Everything a step needs besides the world and the input.
struct StepEnv {
    registry: Arc<TypeRegistry>,
    keymap: KeyMap,
    hooks: SessionHooks,
    config: GameConfig,
    look_bounds: Option<Rect>,
    fov: Option<Arc<dyn FieldOfView>>,
    pathfinder: Option<Arc<dyn Pathfinder>>,
}

impl StepEnv {
    fn step(&self, world: World, input: &mut ChannelInput) -> ActionResult {
        let mut ctx = Context::new(&self.registry)
            .with_config(self.config)
            .with_keymap(&self.keymap)
            .with_hooks(self.hooks.borrowed())
            .with_input(input);
        if let Some(bounds) = self.look_bounds {
            ctx = ctx.with_look_bounds(bounds);
        }
        if let Some(fov) = self.fov.as_deref() {
            ctx = ctx.with_fov(fov);
        }
        if let Some(pathfinder) = self.pathfinder.as_deref() {
            ctx = ctx.with_pathfinder(pathfinder);
        }
        step_one(world, &mut ctx)
    }
}

/// How a [`GameSession::run`] ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Steps executed over the session's lifetime.
    pub steps: u64,
    /// `false` when the run stopped at the step limit instead.
    pub quit: bool,
}

/// Drives a world turn by turn until an action quits.
pub struct GameSession {
    env: Arc<StepEnv>,
    world: World,
    events: EventBus,
    repository: Option<Arc<dyn SaveRepository>>,
    save_slot: String,
    max_steps: Option<u64>,
    steps: u64,
}

impl GameSession {
    pub fn builder(registry: Arc<TypeRegistry>, world: World) -> GameSessionBuilder {
        GameSessionBuilder::new(registry, world)
    }

    /// Loads content from `config.data_dir` and saves to `config.save_dir`.
    ///
    /// `register` adds behavior implementations to the registry builder
    /// populated from `types.ron`.
    pub fn from_config(
        config: &SessionConfig,
        register: impl FnOnce(RegistryBuilder) -> RegistryBuilder,
    ) -> Result<Self> {
        let factory = ContentFactory::new(&config.data_dir);
        let game_config = factory.load_config().map_err(RuntimeError::Content)?;
        let registry = register(factory.registry_builder().map_err(RuntimeError::Content)?).build()?;
        let keymap = factory.load_keymap().map_err(RuntimeError::Content)?;
        let world = factory
            .load_world(&config.map)
            .map_err(RuntimeError::Content)?;
        let repository = FileSaveRepository::new(&config.save_dir)?;

        Ok(Self::builder(Arc::new(registry), world)
            .config(game_config)
            .keymap(keymap)
            .repository(Arc::new(repository))
            .save_slot(config.save_slot.clone())
            .max_steps(config.max_steps)
            .event_capacity(config.event_capacity)
            .build())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Replaces the world with the one saved in the session's slot.
    ///
    /// Returns `false` when there is no repository or no save.
    pub fn restore(&mut self) -> Result<bool> {
        let Some(repository) = &self.repository else {
            return Ok(false);
        };
        match repository.load(&self.save_slot)? {
            Some(world) => {
                info!(slot = %self.save_slot, "restored world from save");
                self.world = world;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Runs steps until an action quits or the step limit is reached.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::NoActiveEntities`] if no entity can act, which would
    /// otherwise spin forever.
    pub async fn run(&mut self, mut input: ChannelInput) -> Result<SessionOutcome> {
        info!(
            entities = self.world.entities().len(),
            max_steps = ?self.max_steps,
            "session started"
        );

        loop {
            if self.max_steps.is_some_and(|limit| self.steps >= limit) {
                info!(steps = self.steps, "step limit reached");
                return Ok(self.outcome(false));
            }

            let actor = select_actor(&self.env.registry, &self.world)
                .map(|entity| entity.id)
                .ok_or(RuntimeError::NoActiveEntities)?;

            let env = Arc::clone(&self.env);
            let world = self.world.clone();
            let (result, returned) = tokio::task::spawn_blocking(move || {
                let result = env.step(world, &mut input);
                (result, input)
            })
            .await
            .map_err(RuntimeError::WorkerJoin)?;
            input = returned;

            self.steps += 1;
            if self.apply(actor, result) {
                info!(steps = self.steps, "session ended");
                self.events.publish(GameEvent::Quit { step: self.steps });
                return Ok(self.outcome(true));
            }
        }
    }

    fn outcome(&self, quit: bool) -> SessionOutcome {
        SessionOutcome {
            steps: self.steps,
            quit,
        }
    }

    /// Folds a step result into the session. Returns true on quit.
    fn apply(&mut self, actor: EntityId, result: ActionResult) -> bool {
        let ActionResult {
            world,
            flags,
            message,
            action,
            ..
        } = result;
        self.world = world;

        if let Some(message) = message {
            self.events.publish(GameEvent::Message(message));
        }
        if let Some(action) = action {
            self.pass_through(actor, action);
        }

        debug!(step = self.steps, actor = %actor, ?flags, "step applied");
        self.events.publish(GameEvent::TurnCompleted {
            step: self.steps,
            actor,
            position: self.world.entity(actor).map(|entity| entity.position),
            consumed_time: !flags.contains(ResultFlags::NO_TIME),
        });

        flags.contains(ResultFlags::QUIT)
    }

    fn pass_through(&self, actor: EntityId, action: String) {
        let repository = match &self.repository {
            Some(repository) if action == SAVE_ACTION => repository,
            _ => {
                self.events
                    .publish(GameEvent::PassThrough { actor, action });
                return;
            }
        };

        match repository.save(&self.save_slot, &self.world) {
            Ok(()) => {
                debug!(slot = %self.save_slot, "quick save written");
                self.events.publish(GameEvent::Saved {
                    slot: self.save_slot.clone(),
                });
            }
            Err(e) => {
                warn!(slot = %self.save_slot, error = %e, "quick save failed");
                self.events
                    .publish(GameEvent::Message(format!("Save failed: {}", e)));
            }
        }
    }
}

/// Builder for [`GameSession`].
pub struct GameSessionBuilder {
    registry: Arc<TypeRegistry>,
    world: World,
    keymap: KeyMap,
    hooks: SessionHooks,
    config: GameConfig,
    look_bounds: Option<Rect>,
    fov: Option<Arc<dyn FieldOfView>>,
    pathfinder: Option<Arc<dyn Pathfinder>>,
    repository: Option<Arc<dyn SaveRepository>>,
    save_slot: String,
    max_steps: Option<u64>,
    event_capacity: usize,
}

impl GameSessionBuilder {
    fn new(registry: Arc<TypeRegistry>, world: World) -> Self {
        Self {
            registry,
            world,
            keymap: KeyMap::standard(),
            hooks: SessionHooks::default(),
            config: GameConfig::default(),
            look_bounds: None,
            fov: None,
            pathfinder: None,
            repository: None,
            save_slot: DEFAULT_SAVE_SLOT.to_owned(),
            max_steps: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    pub fn keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn hooks(mut self, hooks: SessionHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn look_bounds(mut self, bounds: Rect) -> Self {
        self.look_bounds = Some(bounds);
        self
    }

    pub fn fov(mut self, fov: Arc<dyn FieldOfView>) -> Self {
        self.fov = Some(fov);
        self
    }

    pub fn pathfinder(mut self, pathfinder: Arc<dyn Pathfinder>) -> Self {
        self.pathfinder = Some(pathfinder);
        self
    }

    pub fn repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn save_slot(mut self, slot: impl Into<String>) -> Self {
        self.save_slot = slot.into();
        self
    }

    pub fn max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    pub fn build(self) -> GameSession {
        GameSession {
            env: Arc::new(StepEnv {
                registry: self.registry,
                keymap: self.keymap,
                hooks: self.hooks,
                config: self.config,
                look_bounds: self.look_bounds,
                fov: self.fov,
                pathfinder: self.pathfinder,
            }),
            world: self.world,
            events: EventBus::with_capacity(self.event_capacity),
            repository: self.repository,
            save_slot: self.save_slot,
            max_steps: self.max_steps,
            steps: 0,
        }
    }
}
