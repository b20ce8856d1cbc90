use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::collate::locale_cmp;
use crate::content::{Category, Post};

/// 排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Title,
}

/// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// 文章列表的搜索、筛选和排序条件
///
/// 无状态的值对象，每次变化都重新调用 [`apply`] 得到新的视图。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterSpec {
    /// 大小写不敏感的子串匹配，空串表示不过滤
    pub search_text: String,
    /// 命中任意一个即保留，空表示不限制
    pub categories: Vec<Category>,
    /// 未指定时按日期倒序
    pub sort_field: Option<SortField>,
    pub sort_direction: SortDirection,
}

impl FilterSpec {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn category(mut self, category: impl Into<Category>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = Some(field);
        self.sort_direction = direction;
        self
    }

    fn matches(&self, post: &Post, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            let hit = [&post.title, &post.description, &post.content]
                .iter()
                .any(|field| field.to_lowercase().contains(needle));
            if !hit {
                return false;
            }
        }

        self.categories.is_empty() || post.has_any_category(&self.categories)
    }

    fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self.sort_field {
            Some(field) => {
                let ord = match field {
                    SortField::Date => a.date.cmp(&b.date),
                    SortField::Title => locale_cmp(&a.title, &b.title),
                };
                match self.sort_direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
            None => b.date.cmp(&a.date),
        }
    }
}

/// 对文章集合执行搜索、分类筛选和排序
///
/// 不修改输入，返回引用组成的新序列。排序是稳定的，
/// 排序键相同的文章保持输入中的相对顺序。
///
/// ```ignore
/// let spec = FilterSpec::default().search("finance").category(Category::Tech);
/// let view = apply(&posts, &spec);
/// ```
pub fn apply<'a>(collection: &'a [Post], spec: &FilterSpec) -> Vec<&'a Post> {
    let needle = Some(spec.search_text.to_lowercase()).filter(|s| !s.is_empty());

    let mut result: Vec<&Post> = collection
        .iter()
        .filter(|post| spec.matches(post, needle.as_deref()))
        .collect();

    result.sort_by(|a, b| spec.compare(a, b));
    result
}
