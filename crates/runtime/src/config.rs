//! Session configuration from environment variables.
use std::env;
use std::path::PathBuf;

use game_core::Key;
use tokio::sync::mpsc;

use crate::input::ChannelInput;

pub const DEFAULT_SAVE_SLOT: &str = "quicksave";
pub const DEFAULT_EVENT_CAPACITY: usize = 100;
pub const DEFAULT_INPUT_CAPACITY: usize = 32;

/// Settings for a [`GameSession`](crate::GameSession).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Directory holding `config.toml`, `types.ron`, `keymap.toml` and `maps/`.
    pub data_dir: PathBuf,
    /// Map loaded from `maps/{map}.ron` at startup.
    pub map: String,
    pub save_dir: PathBuf,
    /// Slot written by the `save` pass-through action.
    pub save_slot: String,
    /// Stop after this many scheduler steps. `None` runs until quit.
    pub max_steps: Option<u64>,
    pub event_capacity: usize,
    /// Buffer of the key channel made by [`SessionConfig::input_channel`].
    pub input_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            map: "start".to_owned(),
            save_dir: default_save_dir(),
            save_slot: DEFAULT_SAVE_SLOT.to_owned(),
            max_steps: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            input_capacity: DEFAULT_INPUT_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Construct session configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// Environment variables:
    /// - `GAME_DATA_DIR` - Content directory (default: `data`)
    /// - `GAME_MAP` - Starting map name (default: `start`)
    /// - `GAME_SAVE_DIR` - Save directory (default: platform data dir)
    /// - `GAME_SAVE_SLOT` - Quick-save slot name (default: `quicksave`)
    /// - `GAME_MAX_STEPS` - Step limit (default: unlimited)
    /// - `GAME_EVENT_CAPACITY` - Event bus buffer (default: 100)
    /// - `GAME_INPUT_CAPACITY` - Key channel buffer (default: 32)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("GAME_DATA_DIR") {
            config.data_dir = dir;
        }
        if let Some(map) = read_env::<String>("GAME_MAP") {
            config.map = map;
        }
        if let Some(dir) = read_env::<PathBuf>("GAME_SAVE_DIR") {
            config.save_dir = dir;
        }
        if let Some(slot) = read_env::<String>("GAME_SAVE_SLOT") {
            config.save_slot = slot;
        }
        config.max_steps = read_env::<u64>("GAME_MAX_STEPS");
        if let Some(capacity) = read_env::<usize>("GAME_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("GAME_INPUT_CAPACITY") {
            config.input_capacity = capacity.max(1);
        }

        config
    }

    /// Creates the key channel a frontend feeds and a session consumes.
    pub fn input_channel(&self) -> (mpsc::Sender<Key>, ChannelInput) {
        ChannelInput::channel(self.input_capacity)
    }
}

/// Platform data directory for saves.
///
/// - Linux: `~/.local/share/gridcore/saves`
/// - macOS: `~/Library/Application Support/gridcore/saves`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "gridcore")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
