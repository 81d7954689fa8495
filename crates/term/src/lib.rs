//! Terminal renderer for the game.
//!
//! Renders a [`GameSnapshot`](crate::core::GameSnapshot) into a plain
//! framebuffer and flushes it to the terminal with crossterm, without a
//! widget toolkit. Board cells are drawn 2 columns wide to compensate for the
//! glyph aspect ratio.
//!
//! The view is pure and unit-tested; only [`TerminalRenderer`] touches stdout.

pub mod fb;
pub mod fps;
pub mod game_view;
pub mod renderer;

pub use motion_tetris_core as core;
pub use motion_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use fps::FpsCounter;
pub use game_view::{AnchorY, GameView, GestureStatusView, HudView, Layout, Viewport};
pub use renderer::{damage_into, encode_spans_into, full_spans_into, Span, TerminalRenderer};
