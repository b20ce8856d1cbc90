use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use super::date;

/// 文章 ID，由博客服务分配
pub type PostId = u64;

/// 文章分类
///
/// 已知分类以大写字符串传输，未知分类原样保留，不视为错误。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Finance,
    Tech,
    Lifestyle,
    Business,
    Other(String),
}

impl Category {
    /// 创作和筛选界面提供的分类
    pub const KNOWN: [Category; 4] = [
        Category::Finance,
        Category::Tech,
        Category::Lifestyle,
        Category::Business,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Finance => "FINANCE",
            Category::Tech => "TECH",
            Category::Lifestyle => "LIFESTYLE",
            Category::Business => "BUSINESS",
            Category::Other(s) => s,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.as_str() {
            "FINANCE" => Category::Finance,
            "TECH" => Category::Tech,
            "LIFESTYLE" => Category::Lifestyle,
            "BUSINESS" => Category::Business,
            _ => Category::Other(s),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::from(s.to_string())
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        match c {
            Category::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 博客文章
///
/// 字段名即服务端的 JSON 契约，缺少必填字段、标题为空或没有分类的响应会整体解析失败。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    #[serde(deserialize_with = "non_empty_title")]
    pub title: String,
    /// 展示顺序与服务端给出的一致，至少一个
    #[serde(rename = "category", deserialize_with = "non_empty_categories")]
    pub categories: Vec<Category>,
    pub description: String,
    #[serde(with = "date")]
    pub date: DateTime<Utc>,
    #[serde(rename = "coverImage")]
    pub cover_image_url: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_title: Option<String>,
    #[serde(
        rename = "authorAvatar",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub author_avatar_url: Option<String>,
}

impl Post {
    /// 是否与给定分类中的任意一个相同
    pub fn has_any_category(&self, categories: &[Category]) -> bool {
        self.categories.iter().any(|c| categories.contains(c))
    }

    /// 展示用发布日期
    pub fn display_date(&self) -> String {
        date::format_display(&self.date)
    }

    /// 截取前 `max_chars` 个字符作为摘要，超出部分以 `...` 结尾
    pub fn excerpt(&self, max_chars: usize) -> String {
        truncate_text(&self.description, max_chars)
    }
}

fn non_empty_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let title = String::deserialize(deserializer)?;
    if title.trim().is_empty() {
        return Err(de::Error::invalid_value(
            de::Unexpected::Str(&title),
            &"a non-empty title",
        ));
    }
    Ok(title)
}

fn non_empty_categories<'de, D>(deserializer: D) -> Result<Vec<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let categories = Vec::<Category>::deserialize(deserializer)?;
    if categories.is_empty() {
        return Err(de::Error::invalid_length(0, &"at least one category"));
    }
    Ok(categories)
}

/// 按字符截断文本，超出时追加 `...`
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
