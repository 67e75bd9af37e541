//! Pipeline orchestration for the two crawler subcommands.
//!
//! [`run_news`] aggregates the three news sources into a Markdown digest and
//! a JSON snapshot. [`run_widgets`] drives the widget reference crawl in one
//! of three modes: full crawl, single-category availability check, or a
//! single-widget preview printed to stdout.
//!
//! Both pipelines share one HTTP client per run so connection pools are
//! reused across sources.

use crate::cli::{NewsArgs, WidgetArgs};
use crate::config::CrawlerConfig;
use crate::models::{NewsItem, WidgetIndexCategory, WidgetIndexEntry};
use crate::outputs::{json, markdown, widget_pages};
use crate::scrapers::{blog, packages, releases, widget_docs};
use crate::translate::Translator;
use crate::utils::{ensure_writable_dir, write_text_file};
use chrono::{Local, TimeDelta};
use itertools::Itertools;
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Dartdoc library probed first for every widget page.
const DEFAULT_WIDGET_LIBRARY: &str = "widgets";

/// Run the news aggregation pipeline.
///
/// Sources run sequentially so each keeps its own request pacing. When every
/// source is skipped or comes back empty, the existing output files are left
/// untouched and the run still exits successfully; a stale digest beats an
/// empty one.
#[instrument(level = "info", skip_all)]
pub async fn run_news(args: &NewsArgs, config: &CrawlerConfig) -> Result<(), Box<dyn Error>> {
    let http = reqwest::Client::new();
    let translator = Translator::new(http.clone(), &config.translation);

    let mut collected: Vec<NewsItem> = Vec::new();

    if args.no_blog {
        info!("Skipping Flutter blog feed");
    } else {
        collected.extend(blog::fetch_blog_news(&http, &config.blog_feed_url, &translator).await);
    }

    if args.no_releases {
        info!("Skipping GitHub releases");
    } else {
        collected.extend(releases::fetch_release_news(&http, &config.releases_api_url).await);
    }

    if args.no_packages {
        info!("Skipping pub.dev packages");
    } else {
        collected.extend(
            packages::fetch_package_news(
                &http,
                &config.packages_api_url,
                &config.popular_packages,
                TimeDelta::days(config.package_freshness_days),
                Duration::from_millis(config.package_fetch_delay_ms),
            )
            .await,
        );
    }

    if collected.is_empty() {
        warn!("No news items collected; leaving existing output files untouched");
        return Ok(());
    }

    let before = collected.len();
    let mut items = dedupe_by_url(collected);
    if items.len() < before {
        debug!(removed = before - items.len(), "Dropped items with duplicate URLs");
    }

    let generated_at = Local::now().format("%Y-%m-%d %H:%M").to_string();
    let digest = markdown::render_digest(&mut items, &generated_at);

    info!(path = %args.output, "Writing news digest");
    write_text_file(&args.output, &digest).await?;
    info!(path = %args.output, "Wrote news digest");

    json::write_news_snapshot(&items, &args.json).await?;

    info!(count = items.len(), "News crawl complete");
    Ok(())
}

/// Drop items sharing a URL, keeping the first occurrence.
///
/// The same event can surface through more than one source (a release lands
/// on the blog and on GitHub); source order decides which copy survives.
fn dedupe_by_url(items: Vec<NewsItem>) -> Vec<NewsItem> {
    items
        .into_iter()
        .unique_by(|item| item.url.clone())
        .collect()
}

/// Run the widget crawl pipeline.
///
/// `--widget` fetches one page and prints it to stdout without writing
/// files. `--category` checks which widgets of one category resolve, again
/// without writing. The default mode crawls every configured category into
/// `args.output`.
#[instrument(level = "info", skip_all)]
pub async fn run_widgets(args: &WidgetArgs, config: &CrawlerConfig) -> Result<(), Box<dyn Error>> {
    let http = reqwest::Client::new();

    if let Some(name) = args.widget.as_deref() {
        return preview_widget(&http, config, name).await;
    }
    if let Some(id) = args.category.as_deref() {
        check_category(&http, config, id).await;
        return Ok(());
    }
    crawl_all(&http, config, &args.output).await
}

/// Fetch one widget and print its rendered page to stdout.
async fn preview_widget(
    http: &reqwest::Client,
    config: &CrawlerConfig,
    name: &str,
) -> Result<(), Box<dyn Error>> {
    let translator = Translator::new(http.clone(), &config.translation);
    match widget_docs::fetch_widget(
        http,
        &config.widget_docs_base_url,
        name,
        DEFAULT_WIDGET_LIBRARY,
        &config.widget_library_fallbacks,
    )
    .await
    {
        Some(info) => {
            let description = translator.translate_description(&info.description).await;
            let page = widget_pages::render_widget_page(&info, &description);
            println!("{page}");
        }
        None => warn!(widget = name, "Widget not found in any configured library"),
    }
    Ok(())
}

/// Probe every widget of one category and log which pages resolve.
async fn check_category(http: &reqwest::Client, config: &CrawlerConfig, id: &str) {
    match config.category(id) {
        Some(category) => {
            info!(category = %category.name, id = %id, "Checking category availability");
            for widget in &category.widgets {
                let found = widget_docs::fetch_widget(
                    http,
                    &config.widget_docs_base_url,
                    widget,
                    DEFAULT_WIDGET_LIBRARY,
                    &config.widget_library_fallbacks,
                )
                .await;
                if found.is_some() {
                    info!(widget = %widget, "Widget page available");
                }
            }
        }
        None => {
            let available = config
                .widget_categories
                .iter()
                .map(|c| c.id.as_str())
                .join(", ");
            warn!(category = id, available = %available, "Unknown category");
        }
    }
}

/// Crawl every configured category into per-widget pages plus the indexes.
///
/// Failed widgets are skipped; the request pause applies only after a page
/// was actually fetched. Every category lands in the index even when none of
/// its widgets resolved.
async fn crawl_all(
    http: &reqwest::Client,
    config: &CrawlerConfig,
    output_dir: &str,
) -> Result<(), Box<dyn Error>> {
    ensure_writable_dir(output_dir).await?;

    let translator = Translator::new(http.clone(), &config.translation);
    let delay = Duration::from_millis(config.widget_fetch_delay_ms);
    let base = output_dir.trim_end_matches('/');

    let mut index: Vec<WidgetIndexCategory> = Vec::new();

    for category in &config.widget_categories {
        info!(category = %category.name, id = %category.id, "Crawling category");
        tokio::fs::create_dir_all(format!("{}/{}", base, category.id)).await?;

        let mut entries: Vec<WidgetIndexEntry> = Vec::new();
        for widget in &category.widgets {
            let Some(info) = widget_docs::fetch_widget(
                http,
                &config.widget_docs_base_url,
                widget,
                DEFAULT_WIDGET_LIBRARY,
                &config.widget_library_fallbacks,
            )
            .await
            else {
                continue;
            };

            let description = translator.translate_description(&info.description).await;
            let page = widget_pages::render_widget_page(&info, &description);

            let file = format!("{}/{}.md", category.id, widget.to_lowercase());
            write_text_file(&format!("{}/{}", base, file), &page).await?;
            info!(widget = %widget, file = %file, "Wrote widget page");

            entries.push(WidgetIndexEntry {
                name: widget.clone(),
                file,
            });
            sleep(delay).await;
        }

        index.push(WidgetIndexCategory {
            category_id: category.id.clone(),
            category_name: category.name.clone(),
            widgets: entries,
        });
    }

    json::write_widget_index(&index, base).await?;

    let toc = widget_pages::render_widget_index(&index);
    let toc_path = format!("{}/index.md", base);
    write_text_file(&toc_path, &toc).await?;
    info!(path = %toc_path, "Wrote widget table of contents");

    let total: usize = index.iter().map(|c| c.widgets.len()).sum();
    info!(widgets = total, "Widget crawl complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslationConfig;
    use crate::models::{NewsCategory, NewsSource};

    fn package_item(title: &str, url: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            url: url.to_string(),
            date: "2024-05-10".to_string(),
            source: NewsSource::PubDev,
            summary: String::new(),
            category: NewsCategory::Package,
        }
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let items = vec![
            package_item("provider 6.1.0 发布", "https://pub.dev/packages/provider"),
            package_item("provider 6.1.1 发布", "https://pub.dev/packages/provider"),
            package_item("dio 5.4.0 发布", "https://pub.dev/packages/dio"),
        ];

        let deduped = dedupe_by_url(items);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "provider 6.1.0 发布");
        assert_eq!(deduped[1].title, "dio 5.4.0 发布");
    }

    #[tokio::test]
    async fn test_all_sources_skipped_leaves_outputs_untouched() {
        let dir = std::env::temp_dir().join("fdc_crawl_noop_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let out = dir.join("index.md");
        let json_path = dir.join("data.json");
        std::fs::write(&out, "previous digest").unwrap();

        let args = NewsArgs {
            output: out.to_str().unwrap().to_string(),
            json: json_path.to_str().unwrap().to_string(),
            no_blog: true,
            no_releases: true,
            no_packages: true,
        };
        run_news(&args, &CrawlerConfig::default()).await.unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "previous digest");
        assert!(!json_path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    // Feed-to-digest flow without any network: parse, build items with the
    // offline translator, render, write.
    #[tokio::test]
    async fn test_news_flow_from_feed_to_digest_file() {
        const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
<title>Flutter</title>
<item>
  <title><![CDATA[Flutter 3.29 Deep Dive]]></title>
  <link>https://medium.com/flutter/deep-dive</link>
  <pubDate>Tue, 02 Jan 2024 09:00:00 GMT</pubDate>
  <description><![CDATA[Everything that changed in the rendering layer.]]></description>
</item>
</channel></rss>"#;

        let entries = blog::parse_feed(FEED).unwrap();
        let translator = Translator::new(reqwest::Client::new(), &TranslationConfig::default());
        let mut items = blog::build_items(entries, &translator).await;
        assert_eq!(items.len(), 1);

        let digest = markdown::render_digest(&mut items, "2024-01-02 10:00");

        let dir = std::env::temp_dir().join("fdc_crawl_flow_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("index.md");
        write_text_file(path.to_str().unwrap(), &digest).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("> 📅 最后更新: 2024-01-02 10:00"));
        assert!(written.contains("### [Flutter 3.29 Deep Dive](https://medium.com/flutter/deep-dive)"));
        assert!(written.contains("<Badge type=\"info\" text=\"2024-01-02\" />"));
        // No releases or packages were aggregated.
        assert!(written.contains("*暂无最新版本信息*"));
        assert!(written.contains("| *暂无更新* | - | - |"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
