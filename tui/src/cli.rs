//! Command-line surface: which workspace/repo to attach to, which config
//! file and log file to use, and a flag to seed the in-process demo backend
//! for first-run exploration.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Operate a fleet of concurrent agent sessions from one terminal")]
pub struct Cli {
    /// Repository root to scope workspace discovery to. Defaults to the
    /// current working directory.
    #[arg(value_name = "DIR")]
    pub repo_path: Option<PathBuf>,

    /// Path to a TOML config file. Defaults to `~/.config/fleet/config.toml`.
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Override the log file path (defaults to a path under the config dir).
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Seed the built-in in-process backend with a demo workspace/session
    /// instead of starting empty. Has no effect once a transport-backed
    /// Backend ships.
    #[arg(long = "seed-demo", default_value_t = false)]
    pub seed_demo: bool,

    /// Increase log verbosity; repeatable (`-v`, `-vv`).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
