//! relnotesd - MCP stdio server
//!
//! Loads the release store, then answers JSON-RPC requests on stdin until
//! the client closes the stream. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::{info, Level};

use relnotes_core::{DirectorySource, EmbeddedCorpus, FeatureService, METRICS};
use relnotesd::{serve, McpHandler};

#[derive(Parser)]
#[command(name = "relnotesd")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server for version-scoped release notes", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// Directory of release JSON files (default: embedded corpus)
    #[arg(long, env = "RELNOTES_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    relnotes_core::init_tracing(cli.json, level);

    let service = match &cli.data_dir {
        Some(dir) => FeatureService::from_source(&DirectorySource::new(dir))
            .with_context(|| format!("Failed to load release data from {}", dir.display()))?,
        None => FeatureService::from_source(&EmbeddedCorpus)
            .context("Failed to load embedded release data")?,
    };
    let handler = McpHandler::new(service);

    info!("relnotesd ready on stdio");
    let outcome = serve(&handler, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("MCP transport failed");

    METRICS.flush();
    outcome.map(|_| ())
}
