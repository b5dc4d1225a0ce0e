//! Throttles stream-driven redraw requests so a burst of deltas doesn't
//! force one terminal frame per token (§5). The reducer still applies every
//! delta to the Model immediately; only the *draw* is throttled.

use std::time::Duration;
use std::time::Instant;

pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(180);

#[derive(Debug, Clone, Copy)]
pub struct RenderScheduler {
    pub min_interval: Duration,
    last_drawn_at: Option<Instant>,
    pending: bool,
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self { min_interval: DEFAULT_MIN_INTERVAL, last_drawn_at: None, pending: false }
    }
}

impl RenderScheduler {
    pub fn request_redraw(&mut self) {
        self.pending = true;
    }

    /// Returns whether a draw should happen now. Always true for the first
    /// call after a redraw request once `min_interval` has elapsed; if a
    /// request arrives mid-throttle it stays pending and fires on the next
    /// eligible tick rather than being dropped.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.pending {
            return false;
        }
        let elapsed_enough = self.last_drawn_at.is_none_or(|last| now.duration_since(last) >= self.min_interval);
        if elapsed_enough {
            self.pending = false;
            self.last_drawn_at = Some(now);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_request_within_the_throttle_window_stays_pending_until_eligible() {
        let mut scheduler = RenderScheduler { min_interval: Duration::from_millis(100), last_drawn_at: None, pending: false };
        let t0 = Instant::now();
        scheduler.request_redraw();
        assert!(scheduler.poll(t0));
        scheduler.request_redraw();
        assert!(!scheduler.poll(t0 + Duration::from_millis(10)));
        assert!(scheduler.poll(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn no_draw_without_a_pending_request() {
        let mut scheduler = RenderScheduler::default();
        assert!(!scheduler.poll(Instant::now()));
    }
}
