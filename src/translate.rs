//! Title and description translation.
//!
//! Remote translation goes through the chat-completion endpoint. Any
//! failure, and a missing API key, degrade to an ordered substring
//! substitution pass over a fixed phrase table; the fallback never fails
//! and at worst returns the input unchanged.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::api::{ChatClient, ChatMessage, ChatRequest};
use crate::config::TranslationConfig;
use crate::utils::truncate_for_log;

/// Phrase substitutions applied to headlines when the remote call is
/// unavailable.
///
/// Ordered longest-first. Substring replacement is order-sensitive: a
/// generic entry running early would corrupt the longer phrases that
/// contain it ("Building" inside "Building the future of apps").
pub const TITLE_FALLBACK_SUBSTITUTIONS: &[(&str, &str)] = &[
    (
        "Rich and dynamic user interfaces with Flutter and generative UI",
        "使用 Flutter 和生成式 UI 构建丰富的动态用户界面",
    ),
    (
        "A Flutter developer's thoughts about Antigravity",
        "一位 Flutter 开发者对 Antigravity 的思考",
    ),
    ("Prompt engineering as infrastructure", "作为基础设施的提示工程"),
    ("Flutter Extension for Gemini CLI", "Gemini CLI 的 Flutter 扩展"),
    ("Flutter developer's thoughts", "Flutter 开发者的思考"),
    ("The Top Ten Highlights from", "十大亮点："),
    ("Building the future of apps", "构建应用的未来"),
    ("Jaime's build context:", "Jaime 的构建日记："),
    ("What's new in", "新特性："),
    ("Introducing", "介绍："),
    ("Announcing", "发布公告："),
    ("Meet the", "认识"),
    ("Building", "构建"),
    (" with ", "与"),
    (" from ", "来自"),
    ("stable", "稳定版"),
    (" and ", "和"),
    (" the ", ""),
    (" for ", "的"),
    (" in ", "中的"),
    ("Tips", "技巧"),
    ("beta", "测试版"),
    ("(预发布)", "（预发布）"),
];

/// Applies `table` entries in order, each replacing every occurrence in
/// the accumulated text.
pub fn apply_substitutions(text: &str, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            acc.replace(pattern, replacement)
        })
}

/// Judges text already-Chinese when at least 30% of its characters fall
/// in the CJK Unified Ideographs block. Empty text is never Chinese.
pub fn is_mostly_cjk(text: &str) -> bool {
    let total = text.chars().count();
    if total == 0 {
        return false;
    }
    let cjk = text
        .chars()
        .filter(|c| ('\u{4e00}'..='\u{9fff}').contains(c))
        .count();
    cjk * 10 >= total * 3
}

/// Translates headlines and documentation text to Chinese.
///
/// Built without an API key the translator runs entirely offline on the
/// substitution table.
#[derive(Debug, Clone)]
pub struct Translator {
    chat: Option<ChatClient>,
    model: String,
    request_delay: Duration,
}

impl Translator {
    pub fn new(http: reqwest::Client, config: &TranslationConfig) -> Self {
        let chat = config
            .api_key
            .as_ref()
            .map(|key| ChatClient::new(http, config.api_url.clone(), key.clone()));
        Translator {
            chat,
            model: config.model.clone(),
            request_delay: Duration::from_millis(config.request_delay_ms),
        }
    }

    /// Translates a news headline.
    ///
    /// Blank and mostly-CJK input come back unchanged. A fixed pause
    /// follows every successful remote call; the fallback path never
    /// pauses.
    #[instrument(level = "info", skip_all)]
    pub async fn translate_title(&self, title: &str) -> String {
        if title.trim().is_empty() || is_mostly_cjk(title) {
            return title.to_string();
        }
        let Some(chat) = &self.chat else {
            debug!("No API key; applying substitution fallback");
            return apply_substitutions(title, TITLE_FALLBACK_SUBSTITUTIONS);
        };

        let prompt = format!(
            r#"请将以下 Flutter 技术新闻标题翻译为简洁的中文：

标题：{title}

要求：
1. 翻译要简洁明了、通顺自然
2. 保留版本号如 3.38、3.35 等
3. 保留专有名词如 Flutter、Dart、Gemini、CLI、Impeller、Firebase 等
4. 人名保留英文（如 Jaime）
5. 只返回翻译结果，不要其他内容

中文标题："#
        );
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system("你是一位专业的 Flutter/Dart 技术翻译。"),
                ChatMessage::user(prompt),
            ],
            temperature: 0.1,
            max_tokens: 100,
        };

        match chat.complete(&request, Duration::from_secs(30)).await {
            Ok(translated) => {
                let translated = translated.trim_matches(['"', '\'']).to_string();
                info!(
                    original = %truncate_for_log(title, 40),
                    translated = %translated,
                    "Translated title"
                );
                sleep(self.request_delay).await;
                translated
            }
            Err(e) => {
                warn!(error = %e, "Title translation failed; applying substitution fallback");
                apply_substitutions(title, TITLE_FALLBACK_SUBSTITUTIONS)
            }
        }
    }

    /// Translates a widget description.
    ///
    /// Empty and mostly-CJK input come back unchanged; remote failure
    /// keeps the original English text rather than substituting phrases,
    /// since partial substitution would garble prose.
    #[instrument(level = "info", skip_all)]
    pub async fn translate_description(&self, text: &str) -> String {
        if text.trim().is_empty() || is_mostly_cjk(text) {
            return text.to_string();
        }
        let Some(chat) = &self.chat else {
            debug!("No API key; keeping original description");
            return text.to_string();
        };

        let prompt = format!(
            r#"请将以下 Flutter 文档内容翻译为中文，保持专业术语的准确性：
    - 保留代码示例中的英文
    - 类名、方法名、属性名保持英文原样
    - 使用简洁专业的技术文档风格
    
原文：
{text}

中文翻译："#
        );
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system("你是一位专业的 Flutter/Dart 技术文档翻译专家。"),
                ChatMessage::user(prompt),
            ],
            temperature: 0.3,
            max_tokens: 2000,
        };

        match chat.complete(&request, Duration::from_secs(60)).await {
            Ok(translated) => {
                sleep(self.request_delay).await;
                translated
            }
            Err(e) => {
                warn!(error = %e, "Description translation failed; keeping original text");
                text.to_string()
            }
        }
    }
}
