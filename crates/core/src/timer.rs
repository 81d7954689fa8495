//! Cooldown gates driven by a caller-supplied millisecond clock
//!
//! The session never reads a clock itself. Each gate remembers the timestamp
//! of its last restart (its epoch) and answers whether `interval_ms` has passed
//! since then. A gate with no epoch yet is not ready; the session seeds epochs
//! on the first tick.

/// A rate limiter over a monotonic millisecond clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cooldown {
    pub interval_ms: u32,
    last: Option<u64>,
}

impl Cooldown {
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    /// Epoch of the last restart, if any
    pub fn last(&self) -> Option<u64> {
        self.last
    }

    pub fn is_started(&self) -> bool {
        self.last.is_some()
    }

    /// Time since the epoch; 0 when unset or when `now` is behind the epoch
    pub fn elapsed(&self, now_ms: u64) -> u64 {
        match self.last {
            Some(last) => now_ms.saturating_sub(last),
            None => 0,
        }
    }

    /// At least `interval_ms` has passed since the epoch
    pub fn ready(&self, now_ms: u64) -> bool {
        self.is_started() && self.elapsed(now_ms) >= u64::from(self.interval_ms)
    }

    /// Same check against an interval other than the configured one
    pub fn ready_after(&self, now_ms: u64, interval_ms: u32) -> bool {
        self.is_started() && self.elapsed(now_ms) >= u64::from(interval_ms)
    }

    /// Start a new interval at `now_ms`
    pub fn restart(&mut self, now_ms: u64) {
        self.last = Some(now_ms);
    }

    /// Seed the epoch if unset; returns true when it did
    pub fn start_if_unset(&mut self, now_ms: u64) -> bool {
        if self.last.is_none() {
            self.last = Some(now_ms);
            true
        } else {
            false
        }
    }

    /// Move the epoch back to `now_ms` if the clock went backwards
    ///
    /// Returns true when a re-sync happened.
    pub fn resync_if_behind(&mut self, now_ms: u64) -> bool {
        match self.last {
            Some(last) if now_ms < last => {
                self.last = Some(now_ms);
                true
            }
            _ => false,
        }
    }

    /// Forget the epoch
    pub fn clear(&mut self) {
        self.last = None;
    }
}
