//! Output generation modules for the Markdown pages and JSON snapshots.
//!
//! The renderers are pure string builders; the writers own the file
//! system side.
//!
//! # Submodules
//!
//! - [`markdown`]: Renders the aggregated news digest page
//! - [`widget_pages`]: Renders per-widget documentation pages and the
//!   category index page
//! - [`json`]: Writes the news snapshot and the widget `index.json`
//!
//! # Output Structure
//!
//! ```text
//! docs/news/
//! ├── index.md     # News digest
//! └── data.json    # Snapshot of the same items
//!
//! docs/widgets/
//! ├── index.md     # Category-grouped directory
//! ├── index.json   # Machine-readable directory
//! └── {category}/{widget}.md
//! ```

pub mod json;
pub mod markdown;
pub mod widget_pages;
