//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into [`KeyInput`] and defines the
//! [`CommandSource`] seam shared by the keyboard and the gesture feed.

pub mod map;
pub mod source;

pub use motion_tetris_types as types;

pub use map::{handle_key_event, should_quit, KeyInput};
pub use source::{merge_signals, CommandSource, KeyboardQueue};
