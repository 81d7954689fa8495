//! Application configuration from environment variables.
//!
//! - `MOTION_TETRIS_GRAVITY_MS`: time between automatic falls (default 500)
//! - `MOTION_TETRIS_FAST_DROP_MULTIPLIER`: gravity divisor while fast drop is held (default 3)
//! - `MOTION_TETRIS_COMMAND_MS`: minimum time between accepted commands (default 150)
//! - `MOTION_TETRIS_ROTATION_MS`: minimum time between accepted rotations (default 500)
//! - `MOTION_TETRIS_SPAWN`: `cycle` or `bag:<seed>` (default `cycle`)
//!
//! The gesture feed reads its own `MOTION_TETRIS_GESTURE_*` variables, see
//! [`ServerConfig::from_env`]. Values that do not parse keep the default.

use crate::core::{SessionConfig, SpawnPolicy};
use crate::gesture::ServerConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub session: SessionConfig,
    /// `None` when the gesture feed is disabled
    pub gesture: Option<ServerConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let gesture = if ServerConfig::is_disabled() {
            None
        } else {
            Some(ServerConfig::from_env())
        };
        Self {
            session: session_from_vars(|key| std::env::var(key).ok()),
            gesture,
        }
    }
}

/// Build a session config from a variable lookup.
pub fn session_from_vars(lookup: impl Fn(&str) -> Option<String>) -> SessionConfig {
    let defaults = SessionConfig::default();
    let number = |key: &str, default: u32| -> u32 {
        lookup(key)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(default)
    };

    SessionConfig {
        gravity_interval_ms: number("MOTION_TETRIS_GRAVITY_MS", defaults.gravity_interval_ms),
        fast_drop_multiplier: number(
            "MOTION_TETRIS_FAST_DROP_MULTIPLIER",
            defaults.fast_drop_multiplier,
        ),
        command_interval_ms: number("MOTION_TETRIS_COMMAND_MS", defaults.command_interval_ms),
        rotation_interval_ms: number("MOTION_TETRIS_ROTATION_MS", defaults.rotation_interval_ms),
        spawn: lookup("MOTION_TETRIS_SPAWN")
            .and_then(|v| SpawnPolicy::parse(&v))
            .unwrap_or(defaults.spawn),
    }
}
