//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and the tick-driven session. It has
//! **no dependencies** on rendering, networking or clocks: the host passes the
//! current time into every tick, which keeps every rule reproducible in tests.
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven tetrominoes as 4x4 rotation matrices
//! - [`board`]: 10x20 grid with validity checks and row clearing
//! - [`piece`]: the active piece and its move/rotate/drop attempts
//! - [`scoring`]: fixed line clear table
//! - [`sequence`]: spawn order (round-robin or seeded 7-bag)
//! - [`timer`]: cooldown gates over the host clock
//! - [`session`]: the state machine the host drives
//! - [`snapshot`]: plain-data copies for renderers
//!
//! # Game Rules
//!
//! - **Rotation** cycles through the shape's states with no wall kicks: a
//!   rotation that collides is simply rejected
//! - **Spawn** order is I, J, L, O, S, T, Z, repeating
//! - **Scoring** is 100/300/500/800 for 1/2/3/4+ lines, no level multiplier
//! - **Game over** happens the moment a freshly spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use motion_tetris_core::{GameSession, SessionConfig};
//! use motion_tetris_types::Command;
//!
//! let mut game = GameSession::new(SessionConfig::default());
//!
//! game.tick(Command::Left, 0);
//! let outcome = game.tick(Command::HardDrop, 150);
//!
//! assert!(outcome.lock.is_some());
//! assert_eq!(game.pieces_locked(), 1);
//! ```

pub mod board;
pub mod piece;
pub mod scoring;
pub mod sequence;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod timer;

pub use motion_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use piece::{hard_drop_target, ActivePiece};
pub use scoring::score_for;
pub use sequence::{PieceSequence, SpawnPolicy};
pub use session::{GameSession, LockEvent, Phase, SessionConfig, TickOutcome};
pub use shapes::{shape, shapes, Matrix, Shape};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use timer::Cooldown;
