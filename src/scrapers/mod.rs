//! Fetch routines for the crawled Flutter sources.
//!
//! One submodule per external source. Each exposes a single async fetch
//! function returning typed records and each is fully isolated: a failing
//! source logs a diagnostic and yields an empty result so the remaining
//! sources still run.
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | Flutter blog | [`blog`] | RSS feed parsing |
//! | flutter/flutter releases | [`releases`] | GitHub REST API |
//! | pub.dev packages | [`packages`] | pub.dev metadata API |
//! | Widget API reference | [`widget_docs`] | HTML scraping |

pub mod blog;
pub mod packages;
pub mod releases;
pub mod widget_docs;
