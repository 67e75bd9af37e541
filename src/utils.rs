//! Utility functions for string truncation, date formatting, and file system
//! checks.
//!
//! This module provides small helpers used throughout the crawlers:
//! - Character-based truncation for summaries built from multibyte text
//! - Current-date formatting for date fallbacks
//! - String truncation for logging
//! - File system validation for output directories

use chrono::Local;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string to at most `max` characters.
///
/// Summaries and table cells are truncated by character count, not bytes, so
/// that multibyte text (Chinese summaries, emoji in blog titles) is never cut
/// mid-character.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("hello", 3), "hel");
/// assert_eq!(truncate_chars("构建应用", 2), "构建");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Current local date as `YYYY-MM-DD`.
///
/// Used as the fallback whenever a source's publication date fails to parse.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings (typically upstream error bodies) are truncated to `max`
/// characters with an ellipsis and byte count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{}…(+{} bytes)", cut, s.len() - cut.len())
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Small sync probe write; std fs has the simpler error surface here.
    let probe_path = format!("{}/.__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

/// Write text content to a file, creating parent directories as needed.
///
/// Markdown pages and JSON snapshots both go through here; callers hand in
/// already-rendered content.
pub async fn write_text_file(path: &str, content: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, content).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_shorter_than_max() {
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn test_truncate_chars_ascii() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        // Truncation counts characters, never splits a multibyte sequence.
        assert_eq!(truncate_chars("构建应用的未来", 4), "构建应用");
        assert_eq!(truncate_chars("日本語テキスト", 0), "");
    }

    #[test]
    fn test_today_shape() {
        let d = today();
        assert_eq!(d.len(), 10);
        assert_eq!(d.as_bytes()[4], b'-');
        assert_eq!(d.as_bytes()[7], b'-');
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dirs() {
        let dir = std::env::temp_dir().join("fdc_utils_writable_test");
        let nested = dir.join("a/b");
        let _ = std::fs::remove_dir_all(&dir);
        ensure_writable_dir(nested.to_str().unwrap()).await.unwrap();
        assert!(nested.is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_write_text_file_creates_parent_dirs() {
        let dir = std::env::temp_dir().join("fdc_utils_write_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested/out.md");
        write_text_file(path.to_str().unwrap(), "# hello\n")
            .await
            .unwrap();
        let back = std::fs::read_to_string(&path).unwrap();
        assert_eq!(back, "# hello\n");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
