//! Static help text for the key bindings handled in `reducer::global_keys`
//! and `reducer::mode_keys`. Kept as hand-maintained data alongside (not
//! generated from) the match arms, so the two can drift and get caught in
//! review rather than silently staying in sync.

pub struct KeyHint {
    pub keys: &'static str,
    pub description: &'static str,
}

pub const NORMAL_MODE_HINTS: &[KeyHint] = &[
    KeyHint { keys: "↑/↓", description: "move selection" },
    KeyHint { keys: "Enter", description: "open session / toggle expand" },
    KeyHint { keys: "c", description: "compose message" },
    KeyHint { keys: "n", description: "add note" },
    KeyHint { keys: "w", description: "add workspace" },
    KeyHint { keys: "t", description: "add worktree" },
    KeyHint { keys: "/", description: "search" },
    KeyHint { keys: "r", description: "recents" },
    KeyHint { keys: "d", description: "dismiss session" },
    KeyHint { keys: "k", description: "kill session" },
    KeyHint { keys: "p", description: "start session" },
    KeyHint { keys: "R", description: "rename" },
    KeyHint { keys: "W", description: "rename workspace (picker)" },
    KeyHint { keys: "g", description: "workspace groups" },
    KeyHint { keys: "N", description: "notes" },
    KeyHint { keys: "y/x", description: "approve/decline" },
    KeyHint { keys: "Ctrl+B", description: "toggle sidebar" },
    KeyHint { keys: "Ctrl+C", description: "quit" },
];

pub const MODAL_HINTS: &[KeyHint] = &[
    KeyHint { keys: "Enter", description: "confirm" },
    KeyHint { keys: "Esc", description: "cancel" },
];
