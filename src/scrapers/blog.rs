//! Flutter blog scraper.
//!
//! Reads the official Flutter publication feed on Medium and turns the
//! most recent posts into news items, translating each headline on the
//! way. The feed wraps most fields in CDATA; plain text nodes may still
//! carry HTML entities, which are decoded during parsing.

use crate::models::{NewsCategory, NewsItem, NewsSource};
use crate::text::clean;
use crate::translate::Translator;
use crate::utils::{today, truncate_chars};
use chrono::NaiveDateTime;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::error::Error;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";

/// At most this many feed entries are considered per run.
const MAX_FEED_ENTRIES: usize = 10;

/// One `<item>` element as found in the feed, fields present-or-absent.
///
/// An element that exists but carries no text is `Some("")`, which matters
/// downstream: items are skipped only when title or link is truly absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum EntryField {
    Title,
    Link,
    PubDate,
    Description,
}

impl EntryField {
    fn from_name(name: &[u8]) -> Option<EntryField> {
        match name {
            b"title" => Some(EntryField::Title),
            b"link" => Some(EntryField::Link),
            b"pubDate" => Some(EntryField::PubDate),
            b"description" => Some(EntryField::Description),
            _ => None,
        }
    }
}

impl FeedEntry {
    fn slot_mut(&mut self, field: EntryField) -> &mut Option<String> {
        match field {
            EntryField::Title => &mut self.title,
            EntryField::Link => &mut self.link,
            EntryField::PubDate => &mut self.pub_date,
            EntryField::Description => &mut self.description,
        }
    }
}

/// Fetch the blog feed and build translated news items.
///
/// Any failure (network, HTTP status, malformed XML) is logged and yields
/// an empty vector so the other news sources still run.
#[instrument(level = "info", skip_all)]
pub async fn fetch_blog_news(
    http: &reqwest::Client,
    feed_url: &str,
    translator: &Translator,
) -> Vec<NewsItem> {
    info!(source = feed_url, "Fetching Flutter blog feed");
    match fetch_feed(http, feed_url).await {
        Ok(entries) => {
            info!(count = entries.len(), "Parsed feed entries");
            let items = build_items(entries, translator).await;
            info!(count = items.len(), "Collected blog news");
            items
        }
        Err(e) => {
            error!(error = %e, source = feed_url, "Blog fetch failed");
            Vec::new()
        }
    }
}

async fn fetch_feed(
    http: &reqwest::Client,
    feed_url: &str,
) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let body = http
        .get(feed_url)
        .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
        .timeout(Duration::from_secs(30))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    parse_feed(&body)
}

/// Extract the channel's item elements from RSS XML.
///
/// A feed without a channel element parses to an empty vector with a
/// warning, matching the skip-on-empty behavior of the callers.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, Box<dyn Error>> {
    let mut reader = Reader::from_str(xml);
    let mut entries = Vec::new();
    let mut found_channel = false;
    let mut in_channel = false;
    let mut current: Option<FeedEntry> = None;
    let mut field: Option<EntryField> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"channel" => {
                    found_channel = true;
                    in_channel = true;
                }
                b"item" if in_channel => current = Some(FeedEntry::default()),
                name => {
                    if let Some(entry) = current.as_mut() {
                        field = EntryField::from_name(name);
                        if let Some(f) = field {
                            entry.slot_mut(f).get_or_insert_with(String::new);
                        }
                    }
                }
            },
            // Self-closing elements count as present but empty.
            Event::Empty(e) => {
                if let Some(entry) = current.as_mut() {
                    if let Some(f) = EntryField::from_name(e.name().as_ref()) {
                        entry.slot_mut(f).get_or_insert_with(String::new);
                    }
                }
            }
            Event::Text(e) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let raw = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    let decoded = html_escape::decode_html_entities(&raw).into_owned();
                    if let Some(slot) = entry.slot_mut(f).as_mut() {
                        slot.push_str(&decoded);
                    }
                }
            }
            Event::CData(e) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    if let Some(slot) = entry.slot_mut(f).as_mut() {
                        slot.push_str(&text);
                    }
                }
            }
            // The reader splits text at `&name;`/`&#N;` and reports each
            // reference as its own event; an unknown name stays literal.
            Event::GeneralRef(e) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let raw = format!("&{};", String::from_utf8_lossy(&e.into_inner()));
                    let decoded = html_escape::decode_html_entities(&raw).into_owned();
                    if let Some(slot) = entry.slot_mut(f).as_mut() {
                        slot.push_str(&decoded);
                    }
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"channel" => in_channel = false,
                b"item" => {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                    field = None;
                }
                _ => field = None,
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !found_channel {
        warn!("Feed contains no channel element");
    }
    Ok(entries)
}

/// Turn feed entries into news items, translating titles sequentially.
///
/// Entries missing a title or link element are skipped. A present but
/// unparsable publish date falls back to the current date; an absent one
/// stays empty.
pub async fn build_items(entries: Vec<FeedEntry>, translator: &Translator) -> Vec<NewsItem> {
    let mut items = Vec::new();
    for entry in entries.into_iter().take(MAX_FEED_ENTRIES) {
        let (Some(raw_title), Some(link)) = (entry.title, entry.link) else {
            continue;
        };

        let title = translator.translate_title(&clean(&raw_title)).await;
        let date = match entry.pub_date.as_deref() {
            Some(raw) if !raw.is_empty() => parse_pub_date(raw).unwrap_or_else(today),
            _ => String::new(),
        };
        let summary = match entry.description.as_deref() {
            Some(raw) if !raw.is_empty() => format!("{}...", truncate_chars(&clean(raw), 200)),
            _ => String::new(),
        };

        items.push(NewsItem {
            title,
            url: link,
            date,
            source: NewsSource::FlutterBlog,
            summary,
            category: NewsCategory::Blog,
        });
    }
    items
}

/// Parse an RFC-822-style `pubDate` into `YYYY-MM-DD`.
///
/// Only the first 25 characters take part, which drops the trailing zone
/// designator the feed appends.
fn parse_pub_date(raw: &str) -> Option<String> {
    let head: String = raw.chars().take(25).collect();
    NaiveDateTime::parse_from_str(&head, "%a, %d %b %Y %H:%M:%S")
        .ok()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
}
