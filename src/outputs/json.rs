//! JSON output generation for downstream consumers.
//!
//! Two JSON artifacts are produced:
//! - A news snapshot (`data.json`) holding every aggregated item plus the
//!   generation timestamp, for clients that render their own views
//! - A widget index (`index.json`) grouping crawled widget pages by category
//!
//! Both files are pretty-printed so diffs stay reviewable when the output is
//! committed alongside the documentation site.

use crate::models::{NewsItem, NewsSnapshot, WidgetIndexCategory};
use crate::utils::write_text_file;
use chrono::Local;
use std::error::Error;
use tracing::{info, instrument};

/// Write the aggregated news items to a JSON snapshot file.
///
/// The snapshot records the generation timestamp (`updated_at`, local time
/// with microsecond precision) and the full item list in the order the
/// caller provides, which is newest-first after digest rendering.
///
/// # Arguments
///
/// * `items` - The aggregated news items to serialize
/// * `output_path` - Destination file path, parent directories are created
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization or file writing fails.
#[instrument(level = "info", skip_all, fields(path = %output_path))]
pub async fn write_news_snapshot(
    items: &[NewsItem],
    output_path: &str,
) -> Result<(), Box<dyn Error>> {
    let snapshot = NewsSnapshot {
        updated_at: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        items: items.to_vec(),
    };
    let json = serde_json::to_string_pretty(&snapshot)?;

    info!(path = %output_path, "Writing news snapshot JSON");
    write_text_file(output_path, &json).await?;
    info!(path = %output_path, count = items.len(), "Wrote news snapshot");

    Ok(())
}

/// Write the widget category index to `{output_dir}/index.json`.
///
/// Categories appear in configuration order and keep their entry even when no
/// widget inside them was crawled successfully, so consumers can tell an
/// empty category apart from a missing one.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_widget_index(
    categories: &[WidgetIndexCategory],
    output_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/index.json", output_dir.trim_end_matches('/'));
    let json = serde_json::to_string_pretty(&categories)?;

    info!(path = %path, "Writing widget index JSON");
    write_text_file(&path, &json).await?;

    let total: usize = categories.iter().map(|c| c.widgets.len()).sum();
    info!(categories = categories.len(), widgets = total, "Wrote widget index");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewsCategory, NewsSource, WidgetIndexEntry};

    fn sample_item() -> NewsItem {
        NewsItem {
            title: "Flutter 3.29.0 稳定版".to_string(),
            url: "https://github.com/flutter/flutter/releases/tag/3.29.0".to_string(),
            date: "2025-02-12".to_string(),
            source: NewsSource::GitHubReleases,
            summary: "查看发布说明了解详情".to_string(),
            category: NewsCategory::Release,
        }
    }

    #[tokio::test]
    async fn test_write_news_snapshot_shape() {
        let dir = std::env::temp_dir().join("fdc_json_snapshot_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("data.json");
        let items = vec![sample_item()];

        write_news_snapshot(&items, path.to_str().unwrap())
            .await
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        let updated_at = value["updated_at"].as_str().unwrap();
        assert_eq!(updated_at.len(), 26);
        assert_eq!(updated_at.as_bytes()[10], b'T');
        assert_eq!(updated_at.as_bytes()[19], b'.');

        let parsed = value["items"].as_array().unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["source"], "GitHub Releases");
        assert_eq!(parsed[0]["category"], "release");

        // updated_at leads the document, items follow.
        assert!(raw.find("\"updated_at\"").unwrap() < raw.find("\"items\"").unwrap());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_write_widget_index_path_and_content() {
        let dir = std::env::temp_dir().join("fdc_json_index_test");
        let _ = std::fs::remove_dir_all(&dir);
        let categories = vec![
            WidgetIndexCategory {
                category_id: "basics".to_string(),
                category_name: "基础组件".to_string(),
                widgets: vec![WidgetIndexEntry {
                    name: "Container".to_string(),
                    file: "basics/container.md".to_string(),
                }],
            },
            WidgetIndexCategory {
                category_id: "layout".to_string(),
                category_name: "布局组件".to_string(),
                widgets: vec![],
            },
        ];

        write_widget_index(&categories, dir.to_str().unwrap())
            .await
            .unwrap();

        let raw = std::fs::read_to_string(dir.join("index.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["category_id"], "basics");
        assert_eq!(arr[0]["widgets"][0]["file"], "basics/container.md");
        // Empty categories survive serialization.
        assert_eq!(arr[1]["widgets"].as_array().unwrap().len(), 0);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
