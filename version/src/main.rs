//! `update-version` entry point.
//!
//! Bumps the trailing digit of the version in `plugin.json` and prints the
//! new version on stdout. Diagnostics go to stderr, filtered by `RUST_LOG`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use html_report_version::DEFAULT_METADATA_FILE;
use html_report_version::VersionUpdater;

/// Increment the plugin version in a metadata file
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Metadata file to update
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_METADATA_FILE)]
    file: PathBuf,

    /// Print the current version without changing the file
    #[arg(long, conflicts_with_all = ["dry_run", "json"])]
    current: bool,

    /// Print the version an update would produce without writing it
    #[arg(long)]
    dry_run: bool,

    /// Print the previous and new version as JSON
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let updater = VersionUpdater::new(&cli.file);

    if cli.current {
        let version = updater
            .current_version()
            .with_context(|| format!("reading version from {}", cli.file.display()))?;
        println!("{version}");
        return Ok(());
    }

    let change = if cli.dry_run {
        updater.preview()
    } else {
        updater.update()
    }
    .with_context(|| format!("updating version in {}", cli.file.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string(&change)?);
    } else {
        println!("{}", change.next);
    }
    Ok(())
}
