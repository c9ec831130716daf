//! WebMirror - incremental mirroring of remote HTML tool listings
//!
//! Mirrors a remote directory listing (an HTML index page) into a local
//! folder, downloading only files that are new or whose signature changed
//! since the last run. Failed downloads are retried on the next run.

mod display;

use anyhow::Result;
use clap::Parser;
use display::ConsoleObserver;
use std::path::PathBuf;
use tracing::info;
use webmirror_config::{Config, ConfigBuilder, ConfigLoader};
use webmirror_sync::{HttpSource, SyncEngine};

/// WebMirror - mirror a remote tool listing into a local directory
#[derive(Parser)]
#[command(
    name = "webmirror",
    version = env!("CARGO_PKG_VERSION"),
    about = "Incremental mirror for remote HTML tool listings",
    long_about = "WebMirror mirrors a remote directory listing (an HTML index page) into a\n\
                  local folder, downloading only files that are new or whose signature\n\
                  changed since the last run. Failed downloads are retried automatically\n\
                  on the next run."
)]
struct Cli {
    /// Target directory the listing is mirrored into (must exist)
    #[arg(short = 'd', long)]
    directory: Option<PathBuf>,

    /// Source listing URL
    #[arg(short = 'u', long)]
    url: Option<String>,

    /// Enable verbose diagnostic tracing
    #[arg(short = 't', long)]
    testmode: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    display::print_banner(cli.quiet);

    // configuration faults abort here, before any network activity
    let config = load_config(&cli)?;
    init_logging(cli.testmode, cli.quiet, &config)?;

    info!("webmirror v{} starting", env!("CARGO_PKG_VERSION"));

    let source = HttpSource::new(&config)?;
    let engine = SyncEngine::new(config, source);

    let observer = ConsoleObserver::new(cli.quiet);
    let report = engine.run(&observer).await?;
    observer.finish();

    display::print_report(&report, cli.quiet);
    Ok(())
}

/// Layer CLI flag overrides onto the loaded configuration and validate
fn load_config(cli: &Cli) -> Result<Config> {
    let loaded = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load_default()?,
    };

    let mut builder = ConfigBuilder::from_config(loaded);
    if let Some(directory) = &cli.directory {
        builder = builder.directory(directory.clone());
    }
    if let Some(url) = &cli.url {
        builder = builder.url(url.clone());
    }

    Ok(builder.build()?)
}

fn init_logging(testmode: bool, quiet: bool, config: &Config) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if testmode {
        "debug"
    } else if quiet {
        "error"
    } else {
        &config.logging.level
    };

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}"))?,
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(config.logging.colored_output)
        .init();

    Ok(())
}
