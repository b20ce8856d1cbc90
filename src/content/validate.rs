use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::DraftPost;

const TITLE_MIN: usize = 5;
const TITLE_MAX: usize = 200;
const DESCRIPTION_MIN: usize = 20;
const DESCRIPTION_MAX: usize = 300;
const CONTENT_MIN: usize = 100;

/// 表单字段，序列化为线上字段名
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "content")]
    Content,
    #[serde(rename = "category")]
    Categories,
    #[serde(rename = "coverImage")]
    CoverImage,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Content => "content",
            Field::Categories => "category",
            Field::CoverImage => "coverImage",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 字段到错误信息的映射，为空表示草稿可以提交
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

/// 校验草稿的所有字段
///
/// 每条规则独立检查，不会在第一个错误处停止。长度按字符计算。
///
/// ```ignore
/// let errors = validate(&draft);
/// if errors.is_empty() {
///     cache.create(&draft).await?;
/// }
/// ```
pub fn validate(draft: &DraftPost) -> FieldErrors {
    let mut errors = FieldErrors::default();

    let title_len = draft.title.chars().count();
    if title_len < TITLE_MIN {
        errors.insert(Field::Title, "Title must be at least 5 characters");
    } else if title_len > TITLE_MAX {
        errors.insert(Field::Title, "Title must be less than 200 characters");
    }

    let description_len = draft.description.chars().count();
    if description_len < DESCRIPTION_MIN {
        errors.insert(
            Field::Description,
            "Description must be at least 20 characters",
        );
    } else if description_len > DESCRIPTION_MAX {
        errors.insert(
            Field::Description,
            "Description must be less than 300 characters",
        );
    }

    if draft.content.chars().count() < CONTENT_MIN {
        errors.insert(Field::Content, "Content must be at least 100 characters");
    }

    if draft.categories.is_empty() {
        errors.insert(Field::Categories, "Please select at least one category");
    }

    if draft.cover_image_url.is_empty() {
        errors.insert(Field::CoverImage, "Cover image URL is required");
    } else if url::Url::parse(&draft.cover_image_url).is_err() {
        errors.insert(Field::CoverImage, "Please enter a valid URL");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Category;

    fn valid_draft() -> DraftPost {
        DraftPost {
            title: "Future of Fintech".into(),
            categories: vec![Category::Finance, Category::Tech],
            description: "Exploring how AI and blockchain are reshaping finance".into(),
            cover_image_url: "https://x.test/a.png".into(),
            content: "x".repeat(CONTENT_MIN),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        assert!(validate(&valid_draft()).is_empty());
    }

    #[test]
    fn test_title_length_bounds() {
        let cases = [(4, true), (5, false), (200, false), (201, true)];
        for (len, has_error) in cases {
            let draft = DraftPost {
                title: "t".repeat(len),
                ..valid_draft()
            };
            assert_eq!(
                validate(&draft).get(Field::Title).is_some(),
                has_error,
                "title length {}",
                len
            );
        }
    }

    #[test]
    fn test_description_and_content_bounds() {
        let draft = DraftPost {
            description: "d".repeat(19),
            content: "c".repeat(99),
            ..valid_draft()
        };
        let errors = validate(&draft);
        assert_eq!(
            errors.get(Field::Description),
            Some("Description must be at least 20 characters")
        );
        assert_eq!(
            errors.get(Field::Content),
            Some("Content must be at least 100 characters")
        );

        let draft = DraftPost {
            description: "d".repeat(301),
            ..valid_draft()
        };
        assert_eq!(
            validate(&draft).get(Field::Description),
            Some("Description must be less than 300 characters")
        );
    }

    #[test]
    fn test_description_and_content_length_bounds() {
        let cases = [(19, true), (20, false), (300, false), (301, true)];
        for (len, has_error) in cases {
            let draft = DraftPost {
                description: "d".repeat(len),
                ..valid_draft()
            };
            assert_eq!(
                validate(&draft).get(Field::Description).is_some(),
                has_error,
                "description length {}",
                len
            );
        }

        for (len, has_error) in [(99, true), (100, false)] {
            let draft = DraftPost {
                content: "c".repeat(len),
                ..valid_draft()
            };
            assert_eq!(
                validate(&draft).get(Field::Content).is_some(),
                has_error,
                "content length {}",
                len
            );
        }
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let draft = DraftPost {
            title: "博客文章".into(),
            ..valid_draft()
        };
        assert!(validate(&draft).get(Field::Title).is_some());

        let draft = DraftPost {
            title: "博客文章标题".into(),
            ..valid_draft()
        };
        assert!(validate(&draft).get(Field::Title).is_none());
    }

    #[test]
    fn test_cover_image_url() {
        let draft = DraftPost {
            cover_image_url: "not-a-url".into(),
            ..valid_draft()
        };
        assert_eq!(
            validate(&draft).get(Field::CoverImage),
            Some("Please enter a valid URL")
        );

        let draft = DraftPost {
            cover_image_url: String::new(),
            ..valid_draft()
        };
        assert_eq!(
            validate(&draft).get(Field::CoverImage),
            Some("Cover image URL is required")
        );
    }

    #[test]
    fn test_all_fields_checked_together() {
        let errors = validate(&DraftPost::default());
        assert_eq!(errors.len(), 5);
        let fields: Vec<_> = errors.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(
            fields,
            vec!["title", "description", "content", "category", "coverImage"]
        );
    }
}
