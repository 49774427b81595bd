// SPDX-License-Identifier: GPL-3.0-or-later
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cratedigger_config::{load as load_config, DiscogsConfig};
use cratedigger_discogs::{DiscogsClient, DiscogsId, PageExtractor, PagedCursor};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "cratedigger", version, about = "Browse the public Discogs database")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search releases, printing one JSON line per match.
    Search {
        query: String,
        /// Stop after this many results.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print a single release.
    Release { id: u64 },
    /// List the releases and masters credited to an artist.
    ArtistReleases {
        id: u64,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Download an image with the configured identity.
    Image {
        url: String,
        #[arg(long, short)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.telemetry.log_level);

    let client = build_client(&config.discogs)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Search { query, limit } => {
            let printed = print_entries(&mut out, client.search_releases(&query), limit)?;
            info!(target: "cli", query = %query, printed, "search finished");
        }
        Command::Release { id } => {
            let release = client.release(DiscogsId(id))?;
            writeln!(out, "{}", serde_json::to_string(&release)?)?;
        }
        Command::ArtistReleases { id, limit } => {
            let printed = print_entries(&mut out, client.artist_releases(DiscogsId(id)), limit)?;
            info!(target: "cli", artist_id = id, printed, "artist releases finished");
        }
        Command::Image { url, output } => {
            let image = client.image(&url)?;
            fs::write(&output, &image.bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(
                target: "cli",
                path = %output.display(),
                bytes = image.bytes.len(),
                content_type = image.content_type().unwrap_or("unknown"),
                "image saved"
            );
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn build_client(config: &DiscogsConfig) -> Result<DiscogsClient> {
    DiscogsClient::builder()
        .user_agent(&config.user_agent)
        .base_url(&config.base_url)
        .timeout(Duration::from_secs(config.timeout_secs))
        .release_cache_capacity(config.release_cache_capacity)
        .build()
        .context("failed to build Discogs client")
}

/// Drain `cursor` into `out` as JSON lines; returns how many were written.
fn print_entries<E: PageExtractor>(
    out: &mut impl Write,
    cursor: PagedCursor<E>,
    limit: Option<usize>,
) -> Result<usize> {
    let mut printed = 0;
    for entry in cursor.take(limit.unwrap_or(usize::MAX)) {
        let (id, item) = entry?;
        writeln!(out, "{}", json!({ "id": id, "item": item }))?;
        printed += 1;
    }
    Ok(printed)
}
