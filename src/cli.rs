//! Command-line interface definitions for the Flutter docs crawler.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The binary exposes two subcommands, one per pipeline: `news` aggregates
//! recent Flutter news into a digest, `widgets` crawls the widget reference.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Flutter docs crawler.
///
/// # Examples
///
/// ```sh
/// # Aggregate the news digest into the default docs paths
/// flutter_docs_crawler news
///
/// # News digest without the pub.dev package poll
/// flutter_docs_crawler news --no-packages -o ./out/index.md -j ./out/data.json
///
/// # Full widget crawl
/// flutter_docs_crawler widgets -o ./docs/widgets
///
/// # Preview a single widget on stdout without writing files
/// flutter_docs_crawler widgets -w Container
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate Flutter news into a Markdown digest and JSON snapshot
    News(NewsArgs),
    /// Crawl the Flutter widget API reference into per-widget Markdown pages
    Widgets(WidgetArgs),
}

/// Arguments for the `news` subcommand.
#[derive(clap::Args, Debug)]
pub struct NewsArgs {
    /// Output path for the Markdown digest
    #[arg(short, long, default_value = "docs/news/index.md")]
    pub output: String,

    /// Output path for the JSON snapshot
    #[arg(short, long, default_value = "docs/news/data.json")]
    pub json: String,

    /// Skip the Flutter blog feed
    #[arg(long)]
    pub no_blog: bool,

    /// Skip the GitHub releases listing
    #[arg(long)]
    pub no_releases: bool,

    /// Skip the pub.dev package poll
    #[arg(long)]
    pub no_packages: bool,
}

/// Arguments for the `widgets` subcommand.
#[derive(clap::Args, Debug)]
pub struct WidgetArgs {
    /// Output directory for widget pages and indexes
    #[arg(short, long, default_value = "docs/widgets")]
    pub output: String,

    /// Restrict the run to one category (availability check, no writes)
    #[arg(short = 'c', long)]
    pub category: Option<String>,

    /// Fetch a single widget and print its page to stdout
    #[arg(short = 'w', long)]
    pub widget: Option<String>,
}
