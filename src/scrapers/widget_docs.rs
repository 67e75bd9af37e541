//! Flutter API reference scraper.
//!
//! Fetches one dartdoc class page per widget from api.flutter.dev. Most
//! widgets live under the `widgets` library; the ones that don't are
//! probed through an ordered fallback list of alternate libraries when
//! the preferred page 404s, first 200 wins.
//!
//! # Page structure
//!
//! dartdoc class pages carry a `section.desc` description block, an
//! `Inheritance` definition list, a `section.summary` constructor block
//! and a `section#instance-properties` block. Missing sections parse to
//! empty collections.

use crate::models::WidgetInfo;
use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

const MAX_DESCRIPTION_PARAGRAPHS: usize = 3;
const MAX_CONSTRUCTORS: usize = 5;
const MAX_PROPERTIES: usize = 10;

/// Fetch and parse one widget's documentation page.
///
/// Returns `None` when no library serves the page or when anything fails
/// along the way; the caller skips the widget and moves on.
#[instrument(level = "info", skip_all, fields(widget = name))]
pub async fn fetch_widget(
    http: &reqwest::Client,
    base_url: &str,
    name: &str,
    preferred_library: &str,
    library_fallbacks: &[String],
) -> Option<WidgetInfo> {
    match try_fetch_widget(http, base_url, name, preferred_library, library_fallbacks).await {
        Ok(found) => found,
        Err(e) => {
            error!(error = %e, widget = name, "Widget fetch failed");
            None
        }
    }
}

/// The alternate libraries to probe for a widget, preferred one excluded,
/// in configuration order.
pub fn fallback_candidates(preferred_library: &str, library_fallbacks: &[String]) -> Vec<String> {
    library_fallbacks
        .iter()
        .filter(|lib| lib.as_str() != preferred_library)
        .cloned()
        .collect()
}

fn class_page_url(base_url: &str, library: &str, name: &str) -> String {
    format!("{base_url}/{library}/{name}-class.html")
}

async fn try_fetch_widget(
    http: &reqwest::Client,
    base_url: &str,
    name: &str,
    preferred_library: &str,
    library_fallbacks: &[String],
) -> Result<Option<WidgetInfo>, Box<dyn Error>> {
    let mut library = preferred_library.to_string();
    let mut url = class_page_url(base_url, &library, name);
    let mut response = http
        .get(&url)
        .timeout(Duration::from_secs(30))
        .send()
        .await?;

    // Only a missing page triggers the library probe; other error
    // statuses are treated as a plain miss below.
    if response.status() == StatusCode::NOT_FOUND {
        for candidate in fallback_candidates(preferred_library, library_fallbacks) {
            let alt_url = class_page_url(base_url, &candidate, name);
            let alt = http
                .get(&alt_url)
                .timeout(Duration::from_secs(30))
                .send()
                .await?;
            if alt.status() == StatusCode::OK {
                info!(widget = name, library = %candidate, "Found widget under fallback library");
                library = candidate;
                url = alt_url;
                response = alt;
                break;
            }
        }
    }

    if response.status() != StatusCode::OK {
        warn!(
            widget = name,
            status = response.status().as_u16(),
            "Widget page not found"
        );
        return Ok(None);
    }

    let html = response.text().await?;
    Ok(Some(parse_widget_page(name, &library, &url, &html)))
}

/// Extract the documented sections from a dartdoc class page.
pub fn parse_widget_page(name: &str, library: &str, url: &str, html: &str) -> WidgetInfo {
    let document = Html::parse_document(html);

    let desc_sel = Selector::parse("section.desc").unwrap();
    let p_sel = Selector::parse("p").unwrap();
    let dt_sel = Selector::parse("dt").unwrap();
    let a_sel = Selector::parse("a").unwrap();
    let summary_sel = Selector::parse("section.summary").unwrap();
    let ctor_list_sel = Selector::parse("dl.constructor-summary-list").unwrap();
    let props_sel = Selector::parse("section#instance-properties").unwrap();
    let name_sel = Selector::parse("span.name").unwrap();

    let description = document
        .select(&desc_sel)
        .next()
        .map(|section| {
            section
                .select(&p_sel)
                .take(MAX_DESCRIPTION_PARAGRAPHS)
                .map(text_stripped)
                .collect::<Vec<_>>()
                .join("\n\n")
        })
        .unwrap_or_default();

    // The chain lives in the <dd> sibling of the "Inheritance" label, one
    // link per ancestor, root first.
    let inheritance: Vec<String> = document
        .select(&dt_sel)
        .find(|dt| text_stripped(*dt) == "Inheritance")
        .and_then(|dt| {
            dt.next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "dd")
        })
        .map(|dd| dd.select(&a_sel).map(text_stripped).collect())
        .unwrap_or_default();

    let constructors: Vec<String> = document
        .select(&summary_sel)
        .next()
        .and_then(|section| section.select(&ctor_list_sel).next())
        .map(|list| {
            list.select(&dt_sel)
                .take(MAX_CONSTRUCTORS)
                .map(text_stripped)
                .collect()
        })
        .unwrap_or_default();

    let properties: Vec<String> = document
        .select(&props_sel)
        .next()
        .map(|section| {
            section
                .select(&dt_sel)
                .take(MAX_PROPERTIES)
                .filter_map(|dt| dt.select(&name_sel).next())
                .map(text_stripped)
                .collect()
        })
        .unwrap_or_default();

    WidgetInfo {
        name: name.to_string(),
        library: library.to_string(),
        url: url.to_string(),
        description,
        inheritance,
        constructors,
        properties,
    }
}

/// Concatenated element text, every fragment trimmed and empty fragments
/// dropped. Inline markup contributes no separator.
fn text_stripped(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("")
}
