//! Motion Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `motion_tetris::{types,core,input,gesture,term}`
//! and owns the application configuration used by the default binary.

pub mod config;

pub use motion_tetris_core as core;
pub use motion_tetris_gesture as gesture;
pub use motion_tetris_input as input;
pub use motion_tetris_term as term;
pub use motion_tetris_types as types;

pub use config::AppConfig;
