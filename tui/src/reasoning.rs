//! Per-block collapse state for reasoning blocks. Newly streamed reasoning
//! auto-expands while its request is in flight; once the request settles it
//! collapses back unless the user toggled it explicitly, in which case the
//! explicit choice wins until the user toggles it again.

use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct ReasoningCollapseMap {
    explicit: HashMap<String, bool>,
}

impl ReasoningCollapseMap {
    /// Flip the user's explicit choice for `block_id`, seeding it from
    /// `current` (the value the block is showing right now) if this is the
    /// first toggle for that id.
    pub fn toggle(&mut self, block_id: &str, current: bool) {
        let next = !self.explicit.get(block_id).copied().unwrap_or(current);
        self.explicit.insert(block_id.to_string(), next);
    }

    /// Whether `block_id` should render collapsed. An explicit user choice
    /// always wins; otherwise it auto-expands while `request_in_flight`.
    pub fn resolve(&self, block_id: &str, request_in_flight: bool) -> bool {
        self.explicit.get(block_id).copied().unwrap_or(!request_in_flight)
    }

    pub fn forget(&mut self, block_id: &str) {
        self.explicit.remove(block_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_expands_while_in_flight_without_an_explicit_choice() {
        let map = ReasoningCollapseMap::default();
        assert!(!map.resolve("b1", true));
        assert!(map.resolve("b1", false));
    }

    #[test]
    fn an_explicit_toggle_survives_request_state_changes() {
        let mut map = ReasoningCollapseMap::default();
        map.toggle("b1", true);
        assert!(!map.resolve("b1", false));
        assert!(!map.resolve("b1", true));
        map.toggle("b1", false);
        assert!(map.resolve("b1", false));
        assert!(map.resolve("b1", true));
    }
}
