//! Crawler configuration.
//!
//! All endpoints, curated lists, and pacing delays have built-in defaults
//! matching the live Flutter ecosystem. A YAML file passed via `--config`
//! overrides any subset of them; the translation API key only ever comes
//! from the `DEEPSEEK_API_KEY` environment variable.

use serde::Deserialize;
use tracing::{info, warn};

/// Settings for the chat-completion translation backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Chat completions endpoint (OpenAI-compatible).
    pub api_url: String,
    pub model: String,
    /// Never read from YAML; [`load`] fills it from the environment.
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Pause after each successful title translation.
    pub request_delay_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        TranslationConfig {
            api_url: "https://yunwu.ai/v1/chat/completions".to_string(),
            model: "deepseek-chat".to_string(),
            api_key: None,
            request_delay_ms: 300,
        }
    }
}

/// One named group of widgets, crawled and indexed together.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetCategory {
    /// Directory name under the widgets output root, e.g. `basics`.
    pub id: String,
    /// Chinese display name, e.g. `基础组件`.
    pub name: String,
    pub widgets: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// RSS feed of the official Flutter blog.
    pub blog_feed_url: String,
    /// GitHub REST listing of flutter/flutter releases.
    pub releases_api_url: String,
    /// pub.dev package metadata API root (no trailing slash).
    pub packages_api_url: String,
    /// Flutter API reference root (no trailing slash).
    pub widget_docs_base_url: String,
    /// Libraries to probe, in order, when a widget page 404s under its
    /// preferred library.
    pub widget_library_fallbacks: Vec<String>,
    /// Curated pub.dev packages to poll for fresh releases.
    pub popular_packages: Vec<String>,
    /// Ordered category list driving the full widget crawl.
    pub widget_categories: Vec<WidgetCategory>,
    /// Package updates older than this many days are dropped.
    pub package_freshness_days: i64,
    /// Pause between consecutive pub.dev lookups.
    pub package_fetch_delay_ms: u64,
    /// Pause after each successfully fetched widget page.
    pub widget_fetch_delay_ms: u64,
    pub translation: TranslationConfig,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        CrawlerConfig {
            blog_feed_url: "https://medium.com/feed/flutter".to_string(),
            releases_api_url: "https://api.github.com/repos/flutter/flutter/releases".to_string(),
            packages_api_url: "https://pub.dev/api/packages".to_string(),
            widget_docs_base_url: "https://api.flutter.dev/flutter".to_string(),
            widget_library_fallbacks: vec![
                "material".to_string(),
                "cupertino".to_string(),
                "painting".to_string(),
                "rendering".to_string(),
            ],
            popular_packages: [
                "provider",
                "riverpod",
                "bloc",
                "get",
                "dio",
                "flutter_hooks",
                "go_router",
                "freezed",
                "json_serializable",
                "hive",
                "drift",
                "firebase_core",
                "firebase_auth",
                "flutter_localizations",
                "intl",
                "cached_network_image",
                "flutter_svg",
                "shimmer",
                "animations",
                "flutter_animate",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            widget_categories: default_widget_categories(),
            package_freshness_days: 7,
            package_fetch_delay_ms: 200,
            widget_fetch_delay_ms: 500,
            translation: TranslationConfig::default(),
        }
    }
}

impl CrawlerConfig {
    /// Looks up a category by its directory id.
    pub fn category(&self, id: &str) -> Option<&WidgetCategory> {
        self.widget_categories.iter().find(|c| c.id == id)
    }
}

/// Loads the configuration, applying YAML overrides when a path is given.
///
/// The translation API key is taken from `DEEPSEEK_API_KEY` afterwards;
/// a missing or blank variable leaves it unset and translation falls back
/// to the built-in substitution table.
pub fn load(path: Option<&str>) -> Result<CrawlerConfig, Box<dyn std::error::Error>> {
    let mut config = match path {
        Some(p) => {
            let raw = std::fs::read_to_string(p)?;
            let parsed: CrawlerConfig = serde_yaml::from_str(&raw)?;
            info!(path = p, "Loaded configuration overrides");
            parsed
        }
        None => CrawlerConfig::default(),
    };

    // Overrides come from hand-edited YAML; catch typos before any fetch runs.
    for endpoint in [
        &config.blog_feed_url,
        &config.releases_api_url,
        &config.packages_api_url,
        &config.widget_docs_base_url,
        &config.translation.api_url,
    ] {
        url::Url::parse(endpoint)?;
    }

    config.translation.api_key = std::env::var("DEEPSEEK_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    if config.translation.api_key.is_none() {
        warn!("DEEPSEEK_API_KEY not set; falling back to built-in translations");
    }

    Ok(config)
}

fn category(id: &str, name: &str, widgets: &[&str]) -> WidgetCategory {
    WidgetCategory {
        id: id.to_string(),
        name: name.to_string(),
        widgets: widgets.iter().map(|s| s.to_string()).collect(),
    }
}

fn default_widget_categories() -> Vec<WidgetCategory> {
    vec![
        category(
            "basics",
            "基础组件",
            &["Container", "Text", "Image", "Icon", "RichText", "SelectableText"],
        ),
        category(
            "layout",
            "布局组件",
            &[
                "Row",
                "Column",
                "Stack",
                "Wrap",
                "Flex",
                "Expanded",
                "Flexible",
                "Spacer",
                "Center",
                "Align",
                "Padding",
                "ConstrainedBox",
                "SizedBox",
                "AspectRatio",
                "FractionallySizedBox",
            ],
        ),
        category(
            "scrolling",
            "滚动组件",
            &[
                "ListView",
                "GridView",
                "SingleChildScrollView",
                "CustomScrollView",
                "PageView",
                "NestedScrollView",
                "Scrollbar",
            ],
        ),
        category(
            "buttons",
            "按钮组件",
            &[
                "ElevatedButton",
                "FilledButton",
                "TextButton",
                "OutlinedButton",
                "IconButton",
                "FloatingActionButton",
                "DropdownButton",
                "PopupMenuButton",
            ],
        ),
        category(
            "input",
            "输入组件",
            &[
                "TextField",
                "TextFormField",
                "Checkbox",
                "Radio",
                "Switch",
                "Slider",
                "DropdownButtonFormField",
                "DatePicker",
                "TimePicker",
            ],
        ),
        category(
            "dialogs",
            "对话框组件",
            &["AlertDialog", "SimpleDialog", "Dialog", "BottomSheet", "SnackBar", "Banner"],
        ),
        category(
            "navigation",
            "导航组件",
            &[
                "Navigator",
                "AppBar",
                "BottomNavigationBar",
                "NavigationBar",
                "NavigationRail",
                "TabBar",
                "Drawer",
                "BottomAppBar",
            ],
        ),
        category(
            "material",
            "Material 组件",
            &[
                "Scaffold",
                "Card",
                "Chip",
                "ListTile",
                "Divider",
                "ExpansionTile",
                "DataTable",
                "ProgressIndicator",
                "CircularProgressIndicator",
                "LinearProgressIndicator",
            ],
        ),
        category(
            "cupertino",
            "Cupertino 组件",
            &[
                "CupertinoApp",
                "CupertinoButton",
                "CupertinoTextField",
                "CupertinoSwitch",
                "CupertinoActivityIndicator",
                "CupertinoAlertDialog",
                "CupertinoNavigationBar",
            ],
        ),
        category(
            "animation",
            "动画组件",
            &[
                "AnimatedContainer",
                "AnimatedOpacity",
                "AnimatedBuilder",
                "AnimatedPositioned",
                "AnimatedSwitcher",
                "Hero",
                "FadeTransition",
                "SlideTransition",
                "ScaleTransition",
                "RotationTransition",
            ],
        ),
        category(
            "painting",
            "绘制组件",
            &[
                "CustomPaint",
                "ClipRect",
                "ClipRRect",
                "ClipOval",
                "ClipPath",
                "DecoratedBox",
                "BackdropFilter",
                "Transform",
            ],
        ),
        category("async", "异步组件", &["FutureBuilder", "StreamBuilder", "RefreshIndicator"]),
        category(
            "gesture",
            "手势组件",
            &[
                "GestureDetector",
                "InkWell",
                "InkResponse",
                "Draggable",
                "LongPressDraggable",
                "DragTarget",
                "Dismissible",
            ],
        ),
        category(
            "accessibility",
            "无障碍组件",
            &["Semantics", "MergeSemantics", "ExcludeSemantics"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = CrawlerConfig::default();
        assert_eq!(config.blog_feed_url, "https://medium.com/feed/flutter");
        assert_eq!(
            config.releases_api_url,
            "https://api.github.com/repos/flutter/flutter/releases"
        );
        assert_eq!(config.packages_api_url, "https://pub.dev/api/packages");
        assert_eq!(config.widget_docs_base_url, "https://api.flutter.dev/flutter");
        assert_eq!(config.package_freshness_days, 7);
        assert_eq!(config.translation.model, "deepseek-chat");
        assert!(config.translation.api_key.is_none());
    }

    #[test]
    fn test_default_curated_lists() {
        let config = CrawlerConfig::default();
        assert_eq!(config.popular_packages.len(), 20);
        assert_eq!(config.popular_packages[0], "provider");
        assert_eq!(
            config.widget_library_fallbacks,
            vec!["material", "cupertino", "painting", "rendering"]
        );

        assert_eq!(config.widget_categories.len(), 14);
        let basics = &config.widget_categories[0];
        assert_eq!(basics.id, "basics");
        assert_eq!(basics.name, "基础组件");
        assert_eq!(basics.widgets[0], "Container");
        let last = config.widget_categories.last().unwrap();
        assert_eq!(last.id, "accessibility");
        assert_eq!(last.widgets.len(), 3);
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = r#"
blog_feed_url: "http://localhost:8080/feed"
translation:
  model: "test-model"
  request_delay_ms: 0
"#;
        let config: CrawlerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.blog_feed_url, "http://localhost:8080/feed");
        assert_eq!(config.translation.model, "test-model");
        assert_eq!(config.translation.request_delay_ms, 0);
        // Untouched fields keep their defaults.
        assert_eq!(config.packages_api_url, "https://pub.dev/api/packages");
        assert_eq!(config.translation.api_url, "https://yunwu.ai/v1/chat/completions");
        assert_eq!(config.widget_categories.len(), 14);
    }

    #[test]
    fn test_api_key_never_read_from_yaml() {
        let yaml = r#"
translation:
  api_key: "leaked"
"#;
        // Unknown keys are ignored and the skip attribute keeps the field
        // out of deserialization entirely.
        let config: CrawlerConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.translation.api_key.is_none());
    }

    #[test]
    fn test_category_lookup() {
        let config = CrawlerConfig::default();
        assert!(config.category("gesture").is_some());
        assert!(config.category("unknown").is_none());
    }

    #[test]
    fn test_load_rejects_malformed_endpoint() {
        let dir = std::env::temp_dir().join("fdc_config_load_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("crawler.yaml");
        std::fs::write(&path, "blog_feed_url: \"not a url\"\n").unwrap();

        assert!(load(path.to_str()).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
