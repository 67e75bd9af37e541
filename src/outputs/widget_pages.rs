//! Widget documentation rendering.
//!
//! One function renders a single widget page from its scraped record and
//! translated description; the other renders the category-grouped index
//! page. Both are pure string assembly.

use crate::models::{WidgetInfo, WidgetIndexCategory};
use std::fmt::Write;

/// Render one widget's documentation page.
///
/// The description is passed separately because translation happens
/// between scraping and rendering. An empty inheritance chain renders as
/// the literal root `Object`.
pub fn render_widget_page(info: &WidgetInfo, description: &str) -> String {
    let chain = if info.inheritance.is_empty() {
        "Object".to_string()
    } else {
        info.inheritance.join(" → ")
    };

    let mut md = format!(
        r#"# {name}

<Badge type="info" text="{library}" />

## 简介

{description}

## 继承关系

```
{chain}
```

## 构造函数

"#,
        name = info.name,
        library = info.library,
    );

    for constructor in &info.constructors {
        let _ = write!(md, "```dart\n{constructor}\n```\n\n");
    }

    if !info.properties.is_empty() {
        md.push_str("## 常用属性\n\n| 属性 | 说明 |\n|------|------|\n");
        for property in &info.properties {
            let _ = writeln!(md, "| `{property}` | - |");
        }
    }

    let _ = write!(
        md,
        r#"
## 官方文档

[Flutter API 文档]({url})

## 示例代码

```dart
// TODO: 添加示例代码
```
"#,
        url = info.url,
    );

    md
}

/// Render the category-grouped widget directory page.
///
/// Categories appear in configuration order; only widgets that produced a
/// page get a row, and a category that produced none still gets its
/// heading and an empty table.
pub fn render_widget_index(categories: &[WidgetIndexCategory]) -> String {
    let mut md = String::from(
        "# Flutter Widget 目录\n\nFlutter 提供了丰富的 Widget 组件库，以下是按功能分类的 Widget 列表。\n\n## Widget 分类\n\n",
    );

    for category in categories {
        let _ = write!(md, "### {}\n\n", category.category_name);
        md.push_str("| Widget | 说明 |\n|--------|------|\n");
        for widget in &category.widgets {
            let _ = writeln!(md, "| [{}](./{}) | - |", widget.name, widget.file);
        }
        md.push('\n');
    }

    md.push_str(
        r#"
## 如何使用

每个 Widget 文档包含：

- **简介**: Widget 的基本介绍和用途
- **继承关系**: Widget 的类继承链
- **构造函数**: 创建 Widget 的方式
- **常用属性**: 主要配置项说明
- **示例代码**: 实际使用示例

## 贡献

如果发现文档错误或想要补充内容，欢迎提交 PR。
"#,
    );

    md
}
