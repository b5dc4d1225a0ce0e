use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use fleet_backend::Backend;
use fleet_backend::MemoryBackend;
use fleet_tui::App;
use fleet_tui::cli::Cli;
use fleet_tui::config;
use fleet_tui::logging;
use fleet_tui::tui_term;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(config::default_log_path);
    let _log_guard = logging::init(&log_path)?;

    let loaded_config = config::load(cli.config_path.as_deref());
    if let Some(warning) = &loaded_config.warning {
        tracing::warn!("{warning}");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let backend: Arc<dyn Backend> = if cli.seed_demo {
        Arc::new(MemoryBackend::seeded().await)
    } else {
        Arc::new(MemoryBackend::new())
    };

    let mut terminal = tui_term::init()?;
    let mut app = App::new(backend, cli.seed_demo);
    let result = app.run(&mut terminal).await;
    tui_term::restore()?;
    result
}
