//! Content loaders for reading game data from files.
//!
//! Type catalogs and world layouts are RON; key maps and configuration are
//! TOML. Every loader has a `parse` entry point for in-memory text and a
//! `load` entry point for files.

pub mod config;
pub mod factory;
pub mod keymap;
pub mod types;
pub mod world;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use keymap::{KeyMapLoader, KeyMapSpec};
pub use types::{TypeCatalog, TypeLoader};
pub use world::{EntityPlacement, WorldLayout, WorldLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
