//! flutter/flutter release scraper.
//!
//! Lists the most recent releases through the GitHub REST API. Release
//! titles are localized with a fixed month/channel substitution table and
//! never go through the remote translator; version strings don't need it.

use crate::models::{NewsCategory, NewsItem, NewsSource};
use crate::text::clean;
use crate::translate::apply_substitutions;
use crate::utils::{today, truncate_chars};
use chrono::DateTime;
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{error, info, instrument};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const GITHUB_USER_AGENT: &str = "Flutter-News-Crawler";
const RELEASES_PER_PAGE: u32 = 10;

/// Month and channel substitutions for release names.
///
/// No entry is a substring of another, so the calendar order is already
/// safe for sequential replacement.
pub const RELEASE_TITLE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("January", "1月"),
    ("February", "2月"),
    ("March", "3月"),
    ("April", "4月"),
    ("May", "5月"),
    ("June", "6月"),
    ("July", "7月"),
    ("August", "8月"),
    ("September", "9月"),
    ("October", "10月"),
    ("November", "11月"),
    ("December", "12月"),
    ("beta", "测试版"),
    ("stable", "稳定版"),
];

/// One release entry as returned by the GitHub listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseRecord {
    #[serde(default)]
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub prerelease: bool,
}

/// Fetch recent releases and build news items.
///
/// Any failure is logged and yields an empty vector so the other news
/// sources still run.
#[instrument(level = "info", skip_all)]
pub async fn fetch_release_news(http: &reqwest::Client, api_url: &str) -> Vec<NewsItem> {
    info!(source = api_url, "Fetching Flutter releases");
    match fetch_releases(http, api_url).await {
        Ok(records) => {
            info!(count = records.len(), "Listed releases");
            records.into_iter().map(build_item).collect()
        }
        Err(e) => {
            error!(error = %e, source = api_url, "Release fetch failed");
            Vec::new()
        }
    }
}

async fn fetch_releases(
    http: &reqwest::Client,
    api_url: &str,
) -> Result<Vec<ReleaseRecord>, Box<dyn Error>> {
    let records: Vec<ReleaseRecord> = http
        .get(api_url)
        .header(reqwest::header::ACCEPT, GITHUB_ACCEPT)
        .header(reqwest::header::USER_AGENT, GITHUB_USER_AGENT)
        .query(&[("per_page", RELEASES_PER_PAGE)])
        .timeout(Duration::from_secs(30))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(records)
}

/// Build one news item from a release record.
///
/// A missing or empty release name falls back to the tag. The summary is
/// the cleaned release body truncated to 200 characters, or a fixed
/// pointer to the release notes when the body is empty.
pub fn build_item(record: ReleaseRecord) -> NewsItem {
    let name = record
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(&record.tag_name);

    let title = if record.prerelease {
        format!("Flutter {name}（预发布版）")
    } else {
        format!("Flutter {name}")
    };
    let title = apply_substitutions(&title, RELEASE_TITLE_SUBSTITUTIONS);

    let date = if record.published_at.is_empty() {
        String::new()
    } else {
        DateTime::parse_from_rfc3339(&record.published_at)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| today())
    };

    let summary = if record.body.is_empty() {
        "查看发布说明了解详情".to_string()
    } else {
        format!("{}...", truncate_chars(&clean(&record.body), 200))
    };

    NewsItem {
        title,
        url: record.html_url,
        date,
        source: NewsSource::GitHubReleases,
        summary,
        category: NewsCategory::Release,
    }
}
