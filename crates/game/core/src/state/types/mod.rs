pub mod common;
pub mod entities;
pub mod world;

pub use common::{EntityId, Position, Rect, Tick};
pub use entities::{Entity, Tile};
pub use world::World;
