//! Gesture feed - hand-gesture commands from an external detector
//!
//! Hand landmark detection runs in a separate process that owns the camera.
//! It classifies each captured frame and streams the result to the game over
//! a TCP socket. This crate receives those readings and turns them into the
//! same [`Signal`](crate::types::Signal) the keyboard produces.
//!
//! # Protocol Overview
//!
//! **Line-delimited JSON** over TCP:
//!
//! 1. **Connection**: Detector connects (default: 127.0.0.1:7878)
//! 2. **Handshake**: Detector sends `hello`, server responds with `welcome`
//! 3. **Streaming**: Detector sends one `gesture` per classified frame; no reply
//! 4. **Errors**: `error` with a code, for bad input only
//!
//! Error codes: `handshake_required`, `protocol_mismatch`, `invalid_message`,
//! `out_of_order` (seq must strictly increase per connection).
//!
//! # Environment Variables
//!
//! - `MOTION_TETRIS_GESTURE_HOST`: Bind address (default: "127.0.0.1")
//! - `MOTION_TETRIS_GESTURE_PORT`: Port number (default: 7878)
//! - `MOTION_TETRIS_GESTURE_MAX_PENDING`: Readings queued for the game loop (default: 64)
//! - `MOTION_TETRIS_GESTURE_DISABLED`: Set to "1" or "true" to disable the feed
//!
//! # Example Protocol Flow
//!
//! ```text
//! Detector -> Game: {"type":"hello","seq":1,"ts":1700000000000,"client":{"name":"hands","version":"0.3.0"},"protocol_version":"1.0.0"}
//! Game -> Detector: {"type":"welcome","seq":1,"ts":1700000000001,"protocol_version":"1.0.0"}
//! Detector -> Game: {"type":"gesture","seq":2,"ts":1700000000033,"gesture":"left","hands":1}
//! Detector -> Game: {"type":"gesture","seq":3,"ts":1700000000066,"gesture":"hardDrop","hands":1}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"hello","seq":1,"ts":0,"client":{"name":"nc","version":"0"},"protocol_version":"1.0.0"}
//! {"type":"gesture","seq":2,"ts":0,"gesture":"rotate"}
//! ```

pub mod error;
pub mod protocol;
pub mod runtime;
pub mod server;
pub mod source;

pub use motion_tetris_input as input;
pub use motion_tetris_types as types;

pub use error::GestureError;
pub use runtime::GestureFeed;
pub use server::{run_server, InboundGesture, ServerConfig};
pub use source::{GestureFrame, GestureSource};
