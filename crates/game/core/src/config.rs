/// Game configuration constants and tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Ticks added to an actor's next-action after a timed action when neither
    /// the action nor the actor's type specify a cost.
    pub default_delay: u64,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DELAY: u64 = 10;

    pub const fn new() -> Self {
        Self {
            default_delay: Self::DEFAULT_DELAY,
        }
    }

    pub const fn with_default_delay(default_delay: u64) -> Self {
        Self { default_delay }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
