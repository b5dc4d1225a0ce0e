//! Layered TOML configuration (§10.2): defaults, merged with an optional
//! user config file, merged with CLI overrides. Loading is infallible by
//! design — a malformed or missing config file never aborts startup, it
//! falls back to defaults and the conflict is surfaced as a startup toast
//! once the Model exists.

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::refresh::AUTO_REFRESH_INTERVAL;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auto_refresh_seconds: u64,
    pub render_throttle_ms: u64,
    pub sidebar_show_recents: bool,
    pub max_history_items: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_refresh_seconds: AUTO_REFRESH_INTERVAL.as_secs(),
            render_throttle_ms: 180,
            sidebar_show_recents: true,
            max_history_items: 500,
        }
    }
}

/// Outcome of a load attempt: the resolved config plus a human-readable
/// description of anything that went wrong, so the caller can show a toast
/// without the loader having to know about `ToastQueue`.
pub struct LoadedConfig {
    pub config: Config,
    pub warning: Option<String>,
}

pub fn load(path: Option<&Path>) -> LoadedConfig {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
        return LoadedConfig { config: Config::default(), warning: None };
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(config) => LoadedConfig { config, warning: None },
            Err(error) => LoadedConfig {
                config: Config::default(),
                warning: Some(format!("ignoring malformed config at {}: {error}", path.display())),
            },
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => LoadedConfig { config: Config::default(), warning: None },
        Err(error) => LoadedConfig {
            config: Config::default(),
            warning: Some(format!("could not read config at {}: {error}", path.display())),
        },
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fleet").join("config.toml"))
}

pub fn default_log_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(std::env::temp_dir).join("fleet").join("fleet-tui.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults_without_a_warning() {
        let loaded = load(Some(Path::new("/nonexistent/path/does/not/exist.toml")));
        assert_eq!(loaded.config.auto_refresh_seconds, Config::default().auto_refresh_seconds);
        assert!(loaded.warning.is_none());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults_with_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid = = toml").unwrap();
        let loaded = load(Some(&path));
        assert!(loaded.warning.is_some());
        assert_eq!(loaded.config.max_history_items, Config::default().max_history_items);
    }

    #[test]
    fn valid_partial_file_overrides_only_the_fields_it_sets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "render_throttle_ms = 250\n").unwrap();
        let loaded = load(Some(&path));
        assert!(loaded.warning.is_none());
        assert_eq!(loaded.config.render_throttle_ms, 250);
        assert_eq!(loaded.config.sidebar_show_recents, Config::default().sidebar_show_recents);
    }
}
