use super::{FilterSpec, apply};
use crate::content::Post;

/// 相关文章的最大数量
pub const RELATED_LIMIT: usize = 3;

/// 查找与 `post` 有共同分类的其他文章
///
/// 按默认顺序（日期倒序）取前 [`RELATED_LIMIT`] 篇，不包括文章本身。
pub fn related<'a>(collection: &'a [Post], post: &Post) -> Vec<&'a Post> {
    apply(collection, &FilterSpec::default())
        .into_iter()
        .filter(|other| other.id != post.id && other.has_any_category(&post.categories))
        .take(RELATED_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::content::Category;

    fn post(id: u64, month: u32, categories: &[Category]) -> Post {
        Post {
            id,
            title: format!("post {}", id),
            categories: categories.to_vec(),
            description: String::new(),
            date: Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0).unwrap(),
            cover_image_url: String::new(),
            content: String::new(),
            author: None,
            author_title: None,
            author_avatar_url: None,
        }
    }

    #[test]
    fn test_related_shares_category_newest_first() {
        use Category::*;
        let posts = vec![
            post(1, 1, &[Tech]),
            post(2, 2, &[Finance]),
            post(3, 3, &[Tech, Business]),
            post(4, 4, &[Lifestyle]),
            post(5, 5, &[Business]),
            post(6, 6, &[Tech]),
            post(7, 7, &[Finance, Tech]),
        ];
        let current = posts[2].clone();

        let ids: Vec<_> = related(&posts, &current).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 6, 5]);
    }

    #[test]
    fn test_related_excludes_self_and_unrelated() {
        let posts = vec![
            post(1, 1, &[Category::Tech]),
            post(2, 2, &[Category::Finance]),
        ];
        assert!(related(&posts, &posts[0]).is_empty());
    }
}
