//! Auto-refresh scheduling for session/workspace lists (§4's background
//! polling). A plain interval tracker; the executor is responsible for
//! actually firing `Command::ListSessions` etc. on the returned cadence.

use std::time::Duration;

pub const AUTO_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
pub struct RefreshScheduler {
    pub interval: Duration,
    last_tick_at: Option<std::time::Instant>,
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self { interval: AUTO_REFRESH_INTERVAL, last_tick_at: None }
    }
}

impl RefreshScheduler {
    pub fn due(&mut self, now: std::time::Instant) -> bool {
        match self.last_tick_at {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last_tick_at = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn not_due_again_before_the_interval_elapses() {
        let mut scheduler = RefreshScheduler { interval: Duration::from_secs(5), last_tick_at: None };
        let t0 = Instant::now();
        assert!(scheduler.due(t0));
        assert!(!scheduler.due(t0 + Duration::from_secs(1)));
        assert!(scheduler.due(t0 + Duration::from_secs(6)));
    }
}
