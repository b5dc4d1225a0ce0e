//! Per-provider capability lookup (§5's stream-controller-variant
//! selection). A session's provider determines which of the three stream
//! controllers (`plain`, `codex`, `items`) the executor opens for it.

use fleet_protocol::Provider;
use fleet_protocol::ProviderCapabilities;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Plain,
    Codex,
    Items,
}

pub fn capabilities_for(provider: &Provider) -> ProviderCapabilities {
    match provider.as_str() {
        "codex" => ProviderCapabilities { uses_items_stream: false, supports_events: true, supports_approvals: true },
        "items" => ProviderCapabilities { uses_items_stream: true, supports_events: false, supports_approvals: false },
        _ => ProviderCapabilities { uses_items_stream: false, supports_events: false, supports_approvals: false },
    }
}

/// The providers offered by `Mode::PickProvider`. Not discovered from the
/// Backend — the catalog of agent CLIs a fleet can launch is fixed at build
/// time, same as the capability table above.
pub fn known_providers() -> Vec<Provider> {
    vec![Provider::from("codex"), Provider::from("claude"), Provider::from("items")]
}

pub fn stream_kind_for(provider: &Provider) -> StreamKind {
    let capabilities = capabilities_for(provider);
    if capabilities.uses_items_stream {
        StreamKind::Items
    } else if capabilities.supports_events {
        StreamKind::Codex
    } else {
        StreamKind::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codex_provider_uses_event_stream() {
        assert_eq!(stream_kind_for(&Provider::from("codex")), StreamKind::Codex);
    }

    #[test]
    fn unknown_provider_falls_back_to_plain() {
        assert_eq!(stream_kind_for(&Provider::from("some-other-cli")), StreamKind::Plain);
    }
}
