//! Data-driven content definitions and loaders.
//!
//! This crate reads a game's static content from RON/TOML data files:
//! - Type catalogs (RON): tile and entity types with inheritance
//! - World layouts (RON): glyph grids plus entity placements
//! - Key bindings (TOML)
//! - Game configuration (TOML)
//!
//! All loaders produce game-core types directly; behavior implementations
//! are code and are registered by the caller on the returned registry builder.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EntityPlacement, KeyMapLoader, KeyMapSpec, LoadResult,
    TypeCatalog, TypeLoader, WorldLayout, WorldLoader,
};
