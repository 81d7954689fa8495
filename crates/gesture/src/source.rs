//! Gesture source - turns the latest detector reading into a per-tick signal
//!
//! Pure state machine, no I/O: the host feeds it frames with
//! [`GestureSource::observe`] and polls it once per tick. Keeping the repeat
//! cooldown here, on an owned object, lets it be tested without a camera.
//!
//! Held gestures are continuous (the detector reports one per camera frame):
//!
//! - `left`, `right`, `rotate` (and `softDrop`) are discrete: emitted at most
//!   once per cooldown while held
//! - `hardDrop` (a closed fist) is sustained: it engages fast drop for as long
//!   as it is held and emits no discrete command
//! - a reading older than the staleness window counts as `none`

use motion_tetris_core::Cooldown;

use crate::input::CommandSource;
use crate::types::{Command, Signal, GESTURE_COOLDOWN_MS, GESTURE_STALE_MS};

/// A detector reading stamped with the game clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GestureFrame {
    pub command: Command,
    pub hands: u8,
    pub received_ms: u64,
}

impl GestureFrame {
    pub fn new(command: Command, received_ms: u64) -> Self {
        Self {
            command,
            hands: 1,
            received_ms,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GestureSource {
    cooldown: Cooldown,
    stale_after_ms: u32,
    latest: Option<GestureFrame>,
}

impl GestureSource {
    pub fn new(cooldown_ms: u32, stale_after_ms: u32) -> Self {
        Self {
            cooldown: Cooldown::new(cooldown_ms),
            stale_after_ms,
            latest: None,
        }
    }

    /// Replace the current reading; only the most recent frame is kept
    pub fn observe(&mut self, frame: GestureFrame) {
        self.latest = Some(frame);
    }

    /// Latest reading if it is still fresh at `now_ms`
    pub fn current(&self, now_ms: u64) -> Option<GestureFrame> {
        self.latest
            .filter(|f| now_ms.saturating_sub(f.received_ms) <= u64::from(self.stale_after_ms))
    }

    /// Whether any detector frame has arrived yet
    pub fn has_seen_frames(&self) -> bool {
        self.latest.is_some()
    }

    pub fn clear(&mut self) {
        self.latest = None;
        self.cooldown.clear();
    }

    fn read(&mut self, now_ms: u64) -> Signal {
        self.cooldown.resync_if_behind(now_ms);

        let Some(frame) = self.current(now_ms) else {
            return Signal::default();
        };

        match frame.command {
            Command::None => Signal::default(),
            Command::HardDrop => Signal::new(Command::None, true),
            command => {
                if self.cooldown.is_started() && !self.cooldown.ready(now_ms) {
                    return Signal::default();
                }
                self.cooldown.restart(now_ms);
                Signal::from(command)
            }
        }
    }
}

impl Default for GestureSource {
    fn default() -> Self {
        Self::new(GESTURE_COOLDOWN_MS, GESTURE_STALE_MS)
    }
}

impl CommandSource for GestureSource {
    fn poll(&mut self, now_ms: u64) -> Signal {
        self.read(now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_frames_is_none() {
        let mut source = GestureSource::default();
        assert_eq!(source.poll(0), Signal::default());
        assert!(!source.has_seen_frames());
    }

    #[test]
    fn test_held_left_repeats_after_cooldown() {
        let mut source = GestureSource::default();
        source.observe(GestureFrame::new(Command::Left, 0));
        assert_eq!(source.poll(0).command, Command::Left);

        source.observe(GestureFrame::new(Command::Left, 100));
        assert_eq!(source.poll(100).command, Command::None);

        source.observe(GestureFrame::new(Command::Left, 299));
        assert_eq!(source.poll(299).command, Command::None);

        source.observe(GestureFrame::new(Command::Left, 300));
        assert_eq!(source.poll(300).command, Command::Left);
    }

    #[test]
    fn test_cooldown_is_shared_across_gestures() {
        let mut source = GestureSource::default();
        source.observe(GestureFrame::new(Command::Rotate, 0));
        assert_eq!(source.poll(0).command, Command::Rotate);
        source.observe(GestureFrame::new(Command::Right, 50));
        assert_eq!(source.poll(50).command, Command::None);
        assert_eq!(source.poll(300).command, Command::Right);
    }

    #[test]
    fn test_fist_is_fast_drop_not_a_command() {
        let mut source = GestureSource::default();
        source.observe(GestureFrame::new(Command::HardDrop, 0));
        let signal = source.poll(0);
        assert_eq!(signal.command, Command::None);
        assert!(signal.fast_drop);
        // Held across ticks, no cooldown applies.
        assert!(source.poll(10).fast_drop);

        source.observe(GestureFrame::new(Command::None, 20));
        assert!(!source.poll(20).fast_drop);
    }

    #[test]
    fn test_stale_reading_degrades_to_none() {
        let mut source = GestureSource::new(300, 500);
        source.observe(GestureFrame::new(Command::HardDrop, 1_000));
        assert!(source.poll(1_500).fast_drop);
        assert!(!source.poll(1_501).fast_drop);
        assert!(source.current(1_501).is_none());
    }

    #[test]
    fn test_backwards_clock_does_not_lock_out() {
        let mut source = GestureSource::default();
        source.observe(GestureFrame::new(Command::Left, 10_000));
        assert_eq!(source.poll(10_000).command, Command::Left);

        source.observe(GestureFrame::new(Command::Left, 50));
        assert_eq!(source.poll(50).command, Command::None);
        assert_eq!(source.poll(350).command, Command::Left);
    }
}
