//! World state representation.
//!
//! This module owns the plain-data types that describe the map and the
//! entities on it. Behaviors receive a [`World`] by value and return the next
//! one; the only component that moves entities is the movement resolver in
//! [`crate::action`].
mod error;
pub mod types;

pub use error::WorldError;
pub use types::{Entity, EntityId, Position, Rect, Tick, Tile, World};
