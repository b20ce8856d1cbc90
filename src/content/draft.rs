use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, date};

/// 待提交的文章草稿
///
/// 与 [`Post`](super::Post) 字段相同，但没有 `id` 和 `date`，
/// 仅在编辑会话期间存在。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPost {
    pub title: String,
    #[serde(rename = "category", default)]
    pub categories: Vec<Category>,
    pub description: String,
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

impl DraftPost {
    /// 切换某个分类的选中状态
    pub fn toggle_category(&mut self, category: Category) {
        match self.categories.iter().position(|c| *c == category) {
            Some(idx) => {
                self.categories.remove(idx);
            }
            None => self.categories.push(category),
        }
    }
}

/// `POST /blogs` 的请求体：草稿字段加上发送时刻
#[derive(Debug, Serialize)]
pub struct CreateRequest<'a> {
    #[serde(flatten)]
    pub draft: &'a DraftPost,
    #[serde(with = "date")]
    pub date: DateTime<Utc>,
}

impl<'a> CreateRequest<'a> {
    pub fn now(draft: &'a DraftPost) -> Self {
        Self {
            draft,
            date: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_request_body() {
        let draft = DraftPost {
            title: "Future of Fintech".into(),
            categories: vec![Category::Finance, Category::Tech],
            description: "d".into(),
            cover_image_url: "https://x.test/a.png".into(),
            content: "c".into(),
            ..Default::default()
        };
        let req = CreateRequest {
            draft: &draft,
            date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&req).expect("serialize");
        assert_eq!(
            value,
            json!({
                "title": "Future of Fintech",
                "category": ["FINANCE", "TECH"],
                "description": "d",
                "coverImage": "https://x.test/a.png",
                "content": "c",
                "date": "2024-03-01T12:00:00.000Z"
            })
        );
    }

    #[test]
    fn test_toggle_category_keeps_selection_order() {
        let mut draft = DraftPost::default();
        draft.toggle_category(Category::Tech);
        draft.toggle_category(Category::Finance);
        assert_eq!(draft.categories, vec![Category::Tech, Category::Finance]);

        draft.toggle_category(Category::Tech);
        assert_eq!(draft.categories, vec![Category::Finance]);
    }
}
