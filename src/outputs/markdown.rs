//! News digest rendering.
//!
//! Builds the VitePress news page from the collected items: front matter,
//! a release section, a blog section, a package table, and a static
//! resource footer. Pure string assembly, no I/O.

use crate::models::{NewsCategory, NewsItem};
use std::fmt::Write;

/// Releases shown in the digest, newest first.
const MAX_RELEASE_BLOCKS: usize = 5;
/// Blog posts shown in the digest, newest first.
const MAX_BLOG_BLOCKS: usize = 8;
/// Package summaries are cut to this many characters in the table.
const PACKAGE_SUMMARY_CHARS: usize = 50;

/// Render the digest page, sorting `items` newest-first in place.
///
/// The sort is shared intentionally: the JSON snapshot written afterwards
/// carries the same order as the page. Dates are ISO `YYYY-MM-DD`, so the
/// lexicographic comparison is chronological; items with an empty date
/// sink to the end.
pub fn render_digest(items: &mut [NewsItem], generated_at: &str) -> String {
    items.sort_by(|a, b| b.date.cmp(&a.date));

    let releases: Vec<&NewsItem> = items
        .iter()
        .filter(|item| item.category == NewsCategory::Release)
        .collect();
    let blogs: Vec<&NewsItem> = items
        .iter()
        .filter(|item| item.category == NewsCategory::Blog)
        .collect();
    let packages: Vec<&NewsItem> = items
        .iter()
        .filter(|item| item.category == NewsCategory::Package)
        .collect();

    let mut md = format!(
        r#"---
title: Flutter 最新动态
description: Flutter 官方博客、版本发布和热门包更新
---

# Flutter 最新动态

> 📅 最后更新: {generated_at}

本页面自动抓取 Flutter 官方博客、GitHub Releases 和 pub.dev 热门包更新，帮助您及时了解 Flutter 生态的最新动态。

## 🚀 版本发布

"#
    );

    if releases.is_empty() {
        md.push_str("*暂无最新版本信息*\n\n");
    } else {
        for item in releases.iter().take(MAX_RELEASE_BLOCKS) {
            let _ = write!(
                md,
                "### [{title}]({url})\n\n<Badge type=\"info\" text=\"{date}\" /> <Badge type=\"tip\" text=\"{source}\" />\n\n{summary}\n\n---\n\n",
                title = item.title,
                url = item.url,
                date = item.date,
                source = item.source,
                summary = item.summary,
            );
        }
    }

    md.push_str("## 📝 官方博客\n\n");

    if blogs.is_empty() {
        md.push_str("*暂无最新博客文章*\n\n");
    } else {
        for item in blogs.iter().take(MAX_BLOG_BLOCKS) {
            let _ = write!(
                md,
                "### [{title}]({url})\n\n<Badge type=\"info\" text=\"{date}\" />\n\n{summary}\n\n---\n\n",
                title = item.title,
                url = item.url,
                date = item.date,
                summary = item.summary,
            );
        }
    }

    md.push_str("## 📦 热门包更新\n\n最近7天内更新的热门 Flutter 包：\n\n");
    md.push_str("| 包名 | 说明 | 更新日期 |\n|------|------|----------|\n");

    if packages.is_empty() {
        md.push_str("| *暂无更新* | - | - |\n");
    } else {
        for item in &packages {
            let title = escape_pipes(&item.title);
            let summary: String = item.summary.chars().take(PACKAGE_SUMMARY_CHARS).collect();
            let summary = escape_pipes(&summary);
            let _ = writeln!(
                md,
                "| [{title}]({url}) | {summary}... | {date} |",
                url = item.url,
                date = item.date,
            );
        }
    }

    md.push_str(
        r#"

## 📚 更多资源

- [Flutter 官方文档](https://docs.flutter.dev/)
- [Flutter GitHub](https://github.com/flutter/flutter)
- [pub.dev](https://pub.dev/)
- [Flutter 社区](https://flutter.dev/community)

## 🔔 订阅更新

- 关注 [Flutter 官方 Twitter](https://twitter.com/flutterdev)
- 订阅 [Flutter YouTube 频道](https://www.youtube.com/flutterdev)
- 加入 [Flutter Discord](https://discord.gg/N7Yshp4)

---

<small>本页面内容自动生成，如有遗漏请访问官方渠道获取最新信息。</small>
"#,
    );

    md
}

/// Literal pipes would break a Markdown table cell.
fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}
