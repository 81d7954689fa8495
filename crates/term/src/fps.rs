/// Frames-per-second counter for the HUD.
///
/// Counts frames inside a one second window and publishes the count when the
/// window closes, so the value changes at most once per second.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_ms: u64,
    window_start_ms: Option<u64>,
    frames: u32,
    value: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::with_window(1_000)
    }

    pub fn with_window(window_ms: u64) -> Self {
        Self {
            window_ms: window_ms.max(1),
            window_start_ms: None,
            frames: 0,
            value: 0,
        }
    }

    /// Record one presented frame at `now_ms`.
    pub fn frame(&mut self, now_ms: u64) {
        let start = match self.window_start_ms {
            // A clock that went backwards starts a new window.
            Some(start) if now_ms >= start => start,
            _ => {
                self.window_start_ms = Some(now_ms);
                self.frames = 0;
                now_ms
            }
        };

        self.frames = self.frames.saturating_add(1);
        let elapsed = now_ms - start;
        if elapsed >= self.window_ms {
            let per_sec = u64::from(self.frames) * 1_000 / elapsed;
            self.value = u32::try_from(per_sec).unwrap_or(u32::MAX);
            self.window_start_ms = Some(now_ms);
            self.frames = 0;
        }
    }

    /// Frames per second over the last closed window.
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_until_first_window_closes() {
        let mut fps = FpsCounter::new();
        for t in 0..50 {
            fps.frame(t * 10);
        }
        assert_eq!(fps.value(), 0);
    }

    #[test]
    fn reports_rate_of_closed_window() {
        let mut fps = FpsCounter::new();
        // 101 frames from 0 to 1000ms inclusive.
        for t in 0..=100 {
            fps.frame(t * 10);
        }
        assert_eq!(fps.value(), 101);
    }

    #[test]
    fn backwards_clock_restarts_window() {
        let mut fps = FpsCounter::with_window(100);
        fps.frame(5_000);
        fps.frame(10);
        fps.frame(110);
        assert_eq!(fps.value(), 20);
    }
}
