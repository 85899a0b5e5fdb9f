use clap::Parser;
use tracing_subscriber::EnvFilter;

use falcoria::cli::{self, Cli};
use falcoria::context::AppContext;
use falcoria::printer;
use falcoria::store::StateStore;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let store = StateStore::new(StateStore::resolve_root(cli.data_dir));
    let ctx = AppContext::new(store, cli.profile);

    if let Err(e) = cli::dispatch(&ctx, cli.command).await {
        tracing::debug!(error_type = e.classify().error_type, "Command failed");
        printer::error(&e);
        std::process::exit(1);
    }
}
