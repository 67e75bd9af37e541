//! pub.dev package update scraper.
//!
//! Polls the metadata endpoint for a curated list of popular packages and
//! keeps only the ones whose latest release falls inside the freshness
//! window. Lookups are paced with a fixed delay and a failing package
//! never aborts the batch.

use crate::models::{NewsCategory, NewsItem, NewsSource};
use crate::utils::truncate_chars;
use chrono::{DateTime, TimeDelta, Utc};
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

/// Package pages for humans live here, independent of the metadata API.
const PACKAGE_PAGE_BASE: &str = "https://pub.dev/packages";

/// At most this many packages are polled per run.
const MAX_PACKAGES: usize = 10;

/// Package metadata as returned by `GET {api}/{package}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageResponse {
    #[serde(default)]
    pub latest: Option<LatestVersion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestVersion {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub pubspec: Pubspec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pubspec {
    #[serde(default)]
    pub description: String,
}

/// Poll the configured packages and build news items for fresh updates.
#[instrument(level = "info", skip_all)]
pub async fn fetch_package_news(
    http: &reqwest::Client,
    api_url: &str,
    packages: &[String],
    freshness: TimeDelta,
    delay: Duration,
) -> Vec<NewsItem> {
    info!(count = packages.len().min(MAX_PACKAGES), "Fetching package updates");
    let now = Utc::now();

    let items: Vec<NewsItem> = stream::iter(packages.iter().take(MAX_PACKAGES))
        .then(|name| async move {
            let result = fetch_package(http, api_url, name, now, freshness).await;
            sleep(delay).await;
            match result {
                Ok(Some(item)) => {
                    debug!(package = %name, "Found fresh package update");
                    Some(item)
                }
                Ok(None) => None,
                Err(e) => {
                    error!(error = %e, package = %name, "Package lookup failed");
                    None
                }
            }
        })
        .filter(|opt| std::future::ready(opt.is_some()))
        .map(|opt| opt.unwrap())
        .collect()
        .await;

    info!(count = items.len(), "Collected package updates");
    items
}

async fn fetch_package(
    http: &reqwest::Client,
    api_url: &str,
    name: &str,
    now: DateTime<Utc>,
    freshness: TimeDelta,
) -> Result<Option<NewsItem>, Box<dyn Error>> {
    let response = http
        .get(format!("{api_url}/{}", urlencoding::encode(name)))
        .timeout(Duration::from_secs(10))
        .send()
        .await?;

    if response.status() != reqwest::StatusCode::OK {
        debug!(
            package = name,
            status = response.status().as_u16(),
            "Package lookup skipped"
        );
        return Ok(None);
    }

    let record: PackageResponse = response.json().await?;
    Ok(build_item(name, record, now, freshness))
}

/// Build the news item when the latest release is fresh enough.
///
/// Packages with a missing or unparsable publish timestamp are dropped,
/// as are the ones published more than the freshness window before `now`.
/// A release exactly at the window boundary is kept.
fn build_item(
    name: &str,
    record: PackageResponse,
    now: DateTime<Utc>,
    freshness: TimeDelta,
) -> Option<NewsItem> {
    let latest = record.latest?;
    if latest.published.is_empty() {
        return None;
    }
    let published = DateTime::parse_from_rfc3339(&latest.published).ok()?;
    if now.signed_duration_since(published) > freshness {
        debug!(package = name, published = %latest.published, "Package update is stale");
        return None;
    }

    let description = latest.pubspec.description;
    let summary = if description.chars().count() > 150 {
        format!("{}...", truncate_chars(&description, 150))
    } else {
        description
    };

    Some(NewsItem {
        title: format!("{name} {} 发布", latest.version),
        url: format!("{PACKAGE_PAGE_BASE}/{name}"),
        date: published.format("%Y-%m-%d").to_string(),
        source: NewsSource::PubDev,
        summary,
        category: NewsCategory::Package,
    })
}
