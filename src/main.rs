//! # Flutter Docs Crawler
//!
//! Documentation tooling for a Flutter tutorial site. Two pipelines keep the
//! site's generated content fresh:
//!
//! - **News**: aggregates the Flutter blog feed, GitHub releases of
//!   flutter/flutter, and recent pub.dev package updates into a Markdown
//!   digest plus a JSON snapshot
//! - **Widgets**: crawls the Flutter API reference (api.flutter.dev) into
//!   per-widget Markdown pages with a category index
//!
//! Titles and widget descriptions are translated to Chinese through an
//! OpenAI-compatible chat API when a key is configured; without one, a
//! built-in substitution table keeps titles readable.
//!
//! ## Usage
//!
//! ```sh
//! flutter_docs_crawler news
//! flutter_docs_crawler widgets -o docs/widgets
//! flutter_docs_crawler widgets -w Container
//! ```
//!
//! ## Architecture
//!
//! Each pipeline follows the same shape:
//! 1. **Fetch**: pull raw data from the upstream sources
//! 2. **Translate**: localize titles and descriptions (API or fallback)
//! 3. **Render**: build Markdown and JSON documents
//! 4. **Write**: place outputs where the docs site expects them

use clap::Parser;
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod api;
mod cli;
mod config;
mod crawl;
mod models;
mod outputs;
mod scrapers;
mod text;
mod translate;
mod utils;

use cli::{Cli, Command};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("flutter_docs_crawler starting up");

    let cli = Cli::parse();
    debug!(?cli.config, "Parsed CLI arguments");

    let config = config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::News(args) => crawl::run_news(args, &config).await?,
        Command::Widgets(args) => crawl::run_widgets(args, &config).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
