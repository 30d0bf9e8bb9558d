//! Input plumbing between a frontend and the player state machine.
//!
//! Frontends push [`Key`]s into a `tokio::sync::mpsc` channel. The game loop
//! consumes them either from a blocking task through [`ChannelInput`] or from
//! async code through [`act_async`].

use game_core::{ActionResult, Context, Entity, Key, PlayerTurn, World};
use tokio::sync::mpsc;
use tracing::warn;

/// Blocking [`InputSource`](game_core::InputSource) over an mpsc receiver.
///
/// Must only be polled from a blocking context (e.g. inside
/// `tokio::task::spawn_blocking`); `blocking_recv` panics on an async worker.
#[derive(Debug)]
pub struct ChannelInput {
    receiver: mpsc::Receiver<Key>,
}

impl ChannelInput {
    pub fn new(receiver: mpsc::Receiver<Key>) -> Self {
        Self { receiver }
    }

    /// Creates a connected sender and input source.
    pub fn channel(capacity: usize) -> (mpsc::Sender<Key>, Self) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (sender, Self::new(receiver))
    }

    pub fn into_inner(self) -> mpsc::Receiver<Key> {
        self.receiver
    }
}

impl game_core::InputSource for ChannelInput {
    fn next_key(&mut self) -> Option<Key> {
        self.receiver.blocking_recv()
    }
}

/// Async counterpart of [`game_core::player::act`].
///
/// Awaits exactly one key per state-machine step. When every sender is gone
/// the turn commits `QUIT`.
pub async fn act_async(
    entity: &Entity,
    world: World,
    ctx: &mut Context<'_>,
    keys: &mut mpsc::Receiver<Key>,
) -> ActionResult {
    let mut turn = PlayerTurn::begin(entity.clone(), world);
    loop {
        turn = match turn.into_committed() {
            Ok(result) => return result,
            Err(pending) => match keys.recv().await {
                Some(key) => pending.advance(&key, ctx),
                None => {
                    warn!(entity = %entity.id, "input channel closed; quitting");
                    return pending.abandon();
                }
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        EntityId, KeyMap, Position, Properties, PropertyKey, Tile, TypeRegistry,
    };

    fn registry() -> TypeRegistry {
        TypeRegistry::builder()
            .tile("floor", None, Properties::new())
            .tile("wall", None, Properties::new().with(PropertyKey::Walkable, false))
            .entity("hero", None, Properties::new())
            .build()
            .unwrap()
    }

    fn world() -> (World, Entity) {
        let mut world = World::new(3, 3, Tile::new("floor"));
        world.set_tile(Position::new(1, 0), Tile::new("wall"));
        let id = world
            .spawn("hero", Position::new(1, 1), Properties::new())
            .unwrap();
        let hero = world.entity(id).cloned().unwrap();
        (world, hero)
    }

    #[tokio::test]
    async fn retries_are_absorbed_until_a_move_commits() {
        let registry = registry();
        let keymap = KeyMap::standard();
        let mut ctx = Context::new(&registry).with_keymap(&keymap);
        let (world, hero) = world();

        let (tx, mut rx) = mpsc::channel(8);
        // wall to the north, then an unbound key, then west
        for key in [Key::Char('k'), Key::Char('Z'), Key::Char('h')] {
            tx.send(key).await.unwrap();
        }

        let result = act_async(&hero, world, &mut ctx, &mut rx).await;
        assert!(!result.is_retry());
        assert_eq!(
            result.world.entity(EntityId(0)).unwrap().position,
            Position::new(0, 1)
        );
    }

    #[tokio::test]
    async fn closed_channel_quits() {
        let registry = registry();
        let keymap = KeyMap::standard();
        let mut ctx = Context::new(&registry).with_keymap(&keymap);
        let (world, hero) = world();

        let (tx, mut rx) = mpsc::channel::<Key>(1);
        drop(tx);

        let result = act_async(&hero, world.clone(), &mut ctx, &mut rx).await;
        assert!(result.is_quit());
        assert_eq!(result.world, world);
    }

    #[tokio::test]
    async fn channel_input_reads_from_a_blocking_task() {
        let (tx, mut input) = ChannelInput::channel(2);
        tx.send(Key::Enter).await.unwrap();
        drop(tx);

        let keys = tokio::task::spawn_blocking(move || {
            use game_core::InputSource;
            [input.next_key(), input.next_key()]
        })
        .await
        .unwrap();
        assert_eq!(keys, [Some(Key::Enter), None]);
    }
}
