use std::time::{Duration, Instant};

/// # Frame Clock
/// Paces the frame loop at a fixed frequency.
///
/// Each call to `wait` sleeps away whatever is left of the current frame period. A frame that
/// overran its period is late rather than skipped: no sleep happens and the next frame starts
/// immediately.
pub struct FrameClock {
    period: Duration,
    frame_start: Instant,
}

impl FrameClock {
    /// # Arguments
    /// * `hz` target frames per second, must be non-zero
    pub fn new(hz: u32) -> Self {
        FrameClock {
            period: Duration::from_secs(1) / hz.max(1),
            frame_start: Instant::now(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// How long to sleep after `elapsed` worth of work in a frame, if at all.
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.period.checked_sub(elapsed).filter(|d| !d.is_zero())
    }

    /// Sleeps for the rest of the current frame, then starts timing the next one.
    pub fn wait(&mut self) {
        if let Some(remaining) = self.remaining(self.frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
        self.frame_start = Instant::now();
    }

    /// Starts timing the next frame without sleeping.
    pub fn skip(&mut self) {
        self.frame_start = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_at_60hz() {
        let clock = FrameClock::new(60);
        assert_eq!(clock.period(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn test_remaining_is_period_minus_elapsed() {
        let clock = FrameClock::new(50);
        assert_eq!(
            clock.remaining(Duration::from_millis(5)),
            Some(Duration::from_millis(15))
        );
    }

    #[test]
    fn test_overrun_frame_does_not_sleep() {
        let clock = FrameClock::new(60);
        assert_eq!(clock.remaining(Duration::from_millis(17)), None);
        assert_eq!(clock.remaining(clock.period()), None);
    }

    #[test]
    fn test_wait_paces_frames() {
        let mut clock = FrameClock::new(200);
        let start = Instant::now();
        clock.wait();
        clock.wait();
        assert!(start.elapsed() >= Duration::from_millis(9));
    }
}
