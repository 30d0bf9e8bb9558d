#![allow(dead_code)]

use std::sync::Mutex;

use game_core::{
    ActionResult, BehaviorKey, BumpHook, Context, Entity, LookHook, LookInfo, PlayerControlled,
    Position, Properties, PropertyKey, PropertyValue, RangedTargetHook, RegistryBuilder,
    TileBumpHook, Tile, TypeRegistry, World,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// Floor/wall/water tiles plus a player-controlled `hero` and a blocking `goblin`.
pub fn base_registry() -> RegistryBuilder {
    TypeRegistry::builder()
        .behavior("player", PlayerControlled)
        .tile("floor", None, Properties::new().with(PropertyKey::Name, "floor"))
        .tile(
            "wall",
            None,
            Properties::new()
                .with(PropertyKey::Walkable, false)
                .with(PropertyKey::Description, "a rough wall"),
        )
        .tile("water", None, Properties::new().with(PropertyKey::Walkable, false))
        .entity(
            "hero",
            None,
            Properties::new()
                .with(PropertyKey::Act, BehaviorKey::new("player"))
                .with(PropertyKey::Delay, 10)
                .with(PropertyKey::Name, "you"),
        )
        .entity(
            "goblin",
            None,
            Properties::new()
                .with(PropertyKey::BlocksMovement, true)
                .with(PropertyKey::Description, "a goblin"),
        )
        .entity(
            "swimmer",
            Some("hero"),
            Properties::new().with(PropertyKey::CanTraverse, PropertyValue::List(vec!["water".into()])),
        )
}

pub fn registry() -> TypeRegistry {
    base_registry().build().unwrap()
}

pub fn open_world(width: u32, height: u32) -> World {
    World::new(width, height, Tile::new("floor"))
}

/// Records every call it receives; returns `outcome` built from the world.
pub struct RecordingBump {
    pub calls: Mutex<Vec<Position>>,
    pub retry: bool,
}

impl RecordingBump {
    pub fn committing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            retry: false,
        }
    }

    pub fn retrying() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            retry: true,
        }
    }

    pub fn calls(&self) -> Vec<Position> {
        self.calls.lock().unwrap().clone()
    }

    fn outcome(&self, world: World, at: Position) -> ActionResult {
        self.calls.lock().unwrap().push(at);
        if self.retry {
            ActionResult::retry(world)
        } else {
            ActionResult::committed(world).with_message(format!("bumped {at}"))
        }
    }
}

impl BumpHook for RecordingBump {
    fn on_bump(&self, _: &Entity, world: World, blocker: &Entity, _: &mut Context<'_>) -> ActionResult {
        self.outcome(world, blocker.position)
    }
}

impl TileBumpHook for RecordingBump {
    fn on_bump_tile(
        &self,
        _: &Entity,
        world: World,
        position: Position,
        _: &mut Context<'_>,
    ) -> ActionResult {
        self.outcome(world, position)
    }
}

impl RangedTargetHook for RecordingBump {
    fn on_ranged_target(
        &self,
        _: &Entity,
        world: World,
        target: Position,
        _: &mut Context<'_>,
    ) -> ActionResult {
        self.outcome(world, target)
    }
}

#[derive(Default)]
pub struct CursorLog {
    pub seen: Mutex<Vec<(Position, Option<String>)>>,
}

impl CursorLog {
    pub fn positions(&self) -> Vec<Position> {
        self.seen.lock().unwrap().iter().map(|(pos, _)| *pos).collect()
    }
}

impl LookHook for CursorLog {
    fn on_look_move(&self, cursor: Position, info: Option<&LookInfo>) {
        self.seen
            .lock()
            .unwrap()
            .push((cursor, info.map(|info| info.description.clone())));
    }
}
