//! relnotes - version-scoped release notes from the command line
//!
//! ## Commands
//!
//! - `features`: Every feature available up to a project version
//! - `versions`: List tracked releases, newest first
//! - `show`: Summary of a single release

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use relnotes_core::{DirectorySource, EmbeddedCorpus, FeatureService, METRICS};

#[derive(Parser)]
#[command(name = "relnotes")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Features available in your project's language version", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Directory of release JSON files (default: embedded corpus)
    #[arg(long, global = true, env = "RELNOTES_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every feature available up to a project version
    Features {
        /// Project version (e.g. 1.22)
        version: String,

        /// Only report changes to this library (e.g. net/http)
        #[arg(short, long)]
        library: Option<String>,

        /// Print the aggregation as JSON instead of the text report
        #[arg(long = "as-json")]
        as_json: bool,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List tracked releases, newest first
    Versions,

    /// Show one release's summary and change counts
    Show {
        /// Release version
        version: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    relnotes_core::init_tracing(cli.json, level);

    let service = load_service(cli.data_dir.as_deref())?;

    let outcome = match cli.command {
        Commands::Features {
            version,
            library,
            as_json,
            output,
        } => cmd_features(
            &service,
            &version,
            library.as_deref(),
            as_json,
            output.as_deref(),
        ),
        Commands::Versions => cmd_versions(&service),
        Commands::Show { version } => cmd_show(&service, &version),
    };

    METRICS.flush();
    outcome
}

/// Build the service from `--data-dir` or the embedded corpus.
fn load_service(data_dir: Option<&Path>) -> Result<FeatureService> {
    match data_dir {
        Some(dir) => FeatureService::from_source(&DirectorySource::new(dir))
            .with_context(|| format!("Failed to load release data from {}", dir.display())),
        None => FeatureService::from_source(&EmbeddedCorpus)
            .context("Failed to load embedded release data"),
    }
}

/// Render the report (or JSON view) for `version`.
fn features_output(
    service: &FeatureService,
    version: &str,
    library: Option<&str>,
    as_json: bool,
) -> Result<String> {
    let result = service
        .features_for_version(version, library)
        .with_context(|| format!("Failed to resolve features for {}", version))?;

    if as_json {
        Ok(serde_json::to_string_pretty(&result)?)
    } else {
        Ok(service.render(&result, version, library))
    }
}

fn cmd_features(
    service: &FeatureService,
    version: &str,
    library: Option<&str>,
    as_json: bool,
    output: Option<&Path>,
) -> Result<()> {
    let text = features_output(service, version, library, as_json)?;

    if let Some(path) = output {
        std::fs::write(path, &text).with_context(|| format!("Failed to write to {:?}", path))?;
        info!(path = %path.display(), bytes = text.len(), "report written");
        println!("Wrote report for {} to {:?}", version, path);
    } else {
        println!("{}", text);
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
struct VersionLine {
    version: String,
    release_date: String,
}

fn version_lines(service: &FeatureService) -> Vec<VersionLine> {
    service
        .store()
        .all()
        .iter()
        .map(|r| VersionLine {
            version: r.version.clone(),
            release_date: r.release_date.format("%Y-%m-%d").to_string(),
        })
        .collect()
}

fn cmd_versions(service: &FeatureService) -> Result<()> {
    for line in version_lines(service) {
        println!("{:<10} {}", line.version, line.release_date);
    }
    Ok(())
}

fn render_release_overview(service: &FeatureService, version: &str) -> Result<String> {
    let release = service
        .release(version)
        .with_context(|| format!("Unknown release {}", version))?;

    let mut out = String::new();
    out.push_str(&format!("Release {}\n", release.version));
    out.push_str(&format!(
        "Released:  {}\n",
        release.release_date.format("%Y-%m-%d")
    ));
    out.push_str(&format!("Summary:   {}\n", release.summary));
    out.push_str(&format!(
        "Changes:   {} general, {} library across {} libraries\n",
        release.general_changes.len(),
        release.library_change_count(),
        release.library_changes.len()
    ));
    for (library, changes) in &release.library_changes {
        out.push_str(&format!("  {:<24} {}\n", library, changes.len()));
    }
    Ok(out)
}

fn cmd_show(service: &FeatureService, version: &str) -> Result<()> {
    print!("{}", render_release_overview(service, version)?);
    Ok(())
}
