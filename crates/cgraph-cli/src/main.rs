//! Main entry point for contrib-graph.

use anyhow::{Context, Result};
use cgraph_cli::{Cli, ContribGraphApp};
use cgraph_common::init_logging;
use cgraph_config::ConfigLoader;
use clap::Parser;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load_unvalidated(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.apply_to(&mut config);

    // Held until exit so buffered file output is flushed.
    let _log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;
    info!(version = env!("CARGO_PKG_VERSION"), "Starting contrib-graph");

    config.validate().context("Invalid configuration")?;

    let app = ContribGraphApp::from_config(config)
        .context("Failed to set up contribution sources")?
        .dry_run(cli.dry_run);

    let outcome = match app.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Run failed: {}", e);
            return Err(e).context("Failed to build the contribution chart");
        }
    };

    for provider in &outcome.failed {
        warn!(%provider, "Chart built without this provider");
    }

    print!("{}", outcome.stats);
    if cli.dry_run {
        println!("{}", outcome.chart.to_json_pretty()?);
    }
    if let Some(path) = &outcome.output {
        println!("Chart written to {}", path.display());
    }

    Ok(())
}
