//! Data models for crawled news items and widget documentation.
//!
//! This module defines the core data structures used throughout the crawlers:
//! - [`NewsItem`]: one discovered news fact, already translated
//! - [`NewsSnapshot`]: the JSON aggregate written next to the Markdown digest
//! - [`WidgetInfo`]: one scraped widget documentation entry
//! - [`WidgetIndexCategory`] / [`WidgetIndexEntry`]: the `index.json` records
//!
//! The serde renames reproduce the exact strings the generated JSON has
//! always carried (`"Flutter Blog"`, `"blog"`, ...), so downstream pages
//! keep reading the snapshots unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a news item was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum NewsSource {
    /// The official Flutter blog on Medium, via RSS.
    #[serde(rename = "Flutter Blog")]
    FlutterBlog,
    /// The flutter/flutter releases listing on GitHub.
    #[serde(rename = "GitHub Releases")]
    GitHubReleases,
    /// Package metadata from pub.dev.
    #[serde(rename = "pub.dev")]
    PubDev,
}

impl fmt::Display for NewsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NewsSource::FlutterBlog => "Flutter Blog",
            NewsSource::GitHubReleases => "GitHub Releases",
            NewsSource::PubDev => "pub.dev",
        };
        f.write_str(s)
    }
}

/// The digest section a news item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Blog,
    Release,
    Package,
}

/// One discovered news fact.
///
/// Constructed once inside the corresponding fetch routine with the title
/// already translated; immutable thereafter. Items are only persisted as
/// part of a [`NewsSnapshot`] or the rendered digest, never individually.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewsItem {
    /// Post-translation headline.
    pub title: String,
    /// Source link, unique per item within a run.
    pub url: String,
    /// ISO calendar date (`YYYY-MM-DD`), best-effort parsed. Empty when the
    /// source carried no date at all.
    pub date: String,
    pub source: NewsSource,
    /// Truncated descriptive text, possibly empty.
    pub summary: String,
    pub category: NewsCategory,
}

/// The JSON aggregate for one news crawl run.
#[derive(Debug, Deserialize, Serialize)]
pub struct NewsSnapshot {
    /// Local naive ISO-8601 timestamp of the run.
    pub updated_at: String,
    /// All collected items, sorted descending by date.
    pub items: Vec<NewsItem>,
}

/// One documented UI component scraped from the Flutter API reference.
///
/// Created per successful fetch; the description is translated before
/// rendering and the record is never mutated afterwards. One Markdown file
/// is emitted per instance, keyed by lowercase name within its category
/// directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WidgetInfo {
    /// Class name, unique within its library.
    pub name: String,
    /// The documentation sub-path that answered the fetch (`widgets`,
    /// `material`, ...).
    pub library: String,
    /// Canonical documentation link (the URL that returned 200).
    pub url: String,
    /// Up to the first 3 description paragraphs, joined with blank lines.
    pub description: String,
    /// Class chain from root to widget, root-to-leaf order. May be empty.
    pub inheritance: Vec<String>,
    /// At most 5 constructor signature strings.
    pub constructors: Vec<String>,
    /// At most 10 property names.
    pub properties: Vec<String>,
}

/// One widget entry in the generated `index.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WidgetIndexEntry {
    pub name: String,
    /// Path relative to the widgets output directory,
    /// e.g. `basics/container.md`.
    pub file: String,
}

/// One category block in the generated `index.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WidgetIndexCategory {
    pub category_id: String,
    pub category_name: String,
    /// Successfully fetched widgets only; failed fetches leave no entry.
    pub widgets: Vec<WidgetIndexEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_item_serialization_strings() {
        let item = NewsItem {
            title: "新特性： Flutter 3.0".to_string(),
            url: "https://medium.com/flutter/example".to_string(),
            date: "2024-01-02".to_string(),
            source: NewsSource::FlutterBlog,
            summary: "Summary...".to_string(),
            category: NewsCategory::Blog,
        };

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""source":"Flutter Blog""#));
        assert!(json.contains(r#""category":"blog""#));
    }

    #[test]
    fn test_news_item_field_order() {
        let item = NewsItem {
            title: "t".to_string(),
            url: "u".to_string(),
            date: "d".to_string(),
            source: NewsSource::PubDev,
            summary: "s".to_string(),
            category: NewsCategory::Package,
        };

        let json = serde_json::to_string(&item).unwrap();
        let title_pos = json.find("\"title\"").unwrap();
        let url_pos = json.find("\"url\"").unwrap();
        let date_pos = json.find("\"date\"").unwrap();
        let source_pos = json.find("\"source\"").unwrap();
        let summary_pos = json.find("\"summary\"").unwrap();
        let category_pos = json.find("\"category\"").unwrap();
        assert!(title_pos < url_pos);
        assert!(url_pos < date_pos);
        assert!(date_pos < source_pos);
        assert!(source_pos < summary_pos);
        assert!(summary_pos < category_pos);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let snapshot = NewsSnapshot {
            updated_at: "2024-05-06T20:30:00.000000".to_string(),
            items: vec![NewsItem {
                title: "Flutter 3.22.0 稳定版".to_string(),
                url: "https://github.com/flutter/flutter/releases/tag/3.22.0".to_string(),
                date: "2024-05-14".to_string(),
                source: NewsSource::GitHubReleases,
                summary: "release notes...".to_string(),
                category: NewsCategory::Release,
            }],
        };

        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let parsed: NewsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].source, NewsSource::GitHubReleases);
        assert_eq!(parsed.items[0].category, NewsCategory::Release);
    }

    #[test]
    fn test_source_display_matches_serde_rename() {
        for source in [
            NewsSource::FlutterBlog,
            NewsSource::GitHubReleases,
            NewsSource::PubDev,
        ] {
            let display = source.to_string();
            let json = serde_json::to_string(&source).unwrap();
            assert_eq!(json, format!("\"{display}\""));
        }
    }

    #[test]
    fn test_widget_index_category_serialization() {
        let category = WidgetIndexCategory {
            category_id: "basics".to_string(),
            category_name: "基础组件".to_string(),
            widgets: vec![WidgetIndexEntry {
                name: "Container".to_string(),
                file: "basics/container.md".to_string(),
            }],
        };

        let json = serde_json::to_string(&category).unwrap();
        assert!(json.contains(r#""category_id":"basics""#));
        assert!(json.contains(r#""category_name":"基础组件""#));
        assert!(json.contains(r#""file":"basics/container.md""#));
    }

    #[test]
    fn test_widget_info_empty_sections() {
        let info = WidgetInfo {
            name: "Semantics".to_string(),
            library: "widgets".to_string(),
            url: "https://api.flutter.dev/flutter/widgets/Semantics-class.html".to_string(),
            description: String::new(),
            inheritance: vec![],
            constructors: vec![],
            properties: vec![],
        };

        let json = serde_json::to_string(&info).unwrap();
        let parsed: WidgetInfo = serde_json::from_str(&json).unwrap();
        assert!(parsed.inheritance.is_empty());
        assert!(parsed.constructors.is_empty());
        assert!(parsed.properties.is_empty());
    }
}
