//! Reducer core for operating a fleet of concurrent agent sessions from one
//! terminal: a pure `Model`/`Msg`/`Command` state machine (see `reducer`),
//! driven by an async `Executor` against an abstract `Backend`. The binary
//! entry point (`main.rs`) only wires terminal setup, logging, and config
//! loading around `App::run`.

pub mod app;
pub mod app_event_sender;
pub mod approvals;
pub mod capabilities;
pub mod cli;
pub mod cmd;
pub mod compose_history;
pub mod config;
pub mod confirm;
pub mod context_menu;
pub mod executor;
pub mod keybindings;
pub mod latency;
pub mod logging;
pub mod mode;
pub mod model;
pub mod mouse;
pub mod msg;
pub mod notes;
pub mod persistence;
pub mod reasoning;
pub mod recents;
pub mod reducer;
pub mod refresh;
pub mod render;
pub mod selection;
pub mod sidebar;
pub mod streams;
pub mod toast;
pub mod transcript;
pub mod tui_term;
pub mod view;

pub use app::App;
pub use model::Model;
