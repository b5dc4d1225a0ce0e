//! App-state save debouncing (`appStateSaveSeq`, §3/§8 "save debounce"
//! scenario). The reducer never writes app state synchronously; every
//! mutating keypress schedules a debounced save and bumps a token so that
//! only the last-scheduled save is allowed to land.

use std::time::Duration;

pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, Default)]
pub struct SaveDebouncer {
    token: u64,
}

impl SaveDebouncer {
    /// Bumps the token and returns it; the caller schedules a `DebouncedSave`
    /// tick carrying this token after `SAVE_DEBOUNCE`.
    pub fn schedule(&mut self) -> u64 {
        self.token = self.token.wrapping_add(1);
        self.token
    }

    /// Whether a fired debounce tick for `token` is still the most recent
    /// one scheduled, i.e. nothing has mutated app state since.
    pub fn is_current(&self, token: u64) -> bool {
        self.token == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_later_schedule_invalidates_an_earlier_tokens_completion() {
        let mut debouncer = SaveDebouncer::default();
        let first = debouncer.schedule();
        let second = debouncer.schedule();
        assert!(!debouncer.is_current(first));
        assert!(debouncer.is_current(second));
    }
}
