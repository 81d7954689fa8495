//! Command sources feeding the shared session channel.
//!
//! Every producer of game input (keyboard queue, gesture feed) implements
//! [`CommandSource`]. The host polls each source once per tick and merges the
//! readings into a single [`Signal`]. Command priority is resolved here, by
//! [`Signal::merge`]; the session applies whatever command it is handed.

use arrayvec::ArrayVec;

use crate::types::{Command, Signal};

/// Keys buffered between two ticks before the oldest are dropped
const KEY_BUFFER: usize = 16;

/// Anything that can hand the session one signal per tick
pub trait CommandSource {
    fn poll(&mut self, now_ms: u64) -> Signal;
}

/// Keyboard commands collected between ticks
///
/// Terminals deliver key presses as discrete events, so several may arrive in
/// one frame. `poll` hands out the strongest of them and empties the buffer.
/// Fast drop is a latch flipped by the toggle key.
#[derive(Debug, Clone, Default)]
pub struct KeyboardQueue {
    pending: ArrayVec<Command, KEY_BUFFER>,
    fast_drop: bool,
}

impl KeyboardQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer a command; when full, the oldest entry is dropped
    pub fn push(&mut self, command: Command) {
        if command.is_none() {
            return;
        }
        if self.pending.is_full() {
            self.pending.remove(0);
        }
        self.pending.push(command);
    }

    pub fn toggle_fast_drop(&mut self) -> bool {
        self.fast_drop = !self.fast_drop;
        self.fast_drop
    }

    pub fn fast_drop(&self) -> bool {
        self.fast_drop
    }

    pub fn pending(&self) -> &[Command] {
        &self.pending
    }

    /// Drop buffered commands and release fast drop
    pub fn clear(&mut self) {
        self.pending.clear();
        self.fast_drop = false;
    }
}

impl CommandSource for KeyboardQueue {
    fn poll(&mut self, _now_ms: u64) -> Signal {
        let command = Command::strongest(self.pending.drain(..));
        Signal::new(command, self.fast_drop)
    }
}

/// Poll every source and fold the readings into one signal
pub fn merge_signals(sources: &mut [&mut dyn CommandSource], now_ms: u64) -> Signal {
    sources
        .iter_mut()
        .fold(Signal::default(), |acc, source| acc.merge(source.poll(now_ms)))
}
