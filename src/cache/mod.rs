mod entry;

pub use self::entry::CacheKey;

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use self::entry::{Entry, load};
use crate::{
    content::{DraftPost, Post, PostId},
    error::Result,
    query::{self, FilterSpec},
    repository::BlogRepository,
};

/// 文章详情及相关文章
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Arc<Post>,
    pub related: Vec<Post>,
}

/// 客户端查询缓存
///
/// 缓存文章列表和按 ID 查询的文章，合并同一键上的并发拉取，
/// 创建成功后让列表失效。每个会话显式创建一个实例并传给需要的地方；
/// 克隆得到的句柄共享同一份缓存。
pub struct QueryCache<R> {
    repo: Arc<R>,
    collection: Arc<Mutex<Entry<Vec<Post>>>>,
    posts: Arc<Mutex<HashMap<PostId, Arc<Mutex<Entry<Post>>>>>>,
}

impl<R> Clone for QueryCache<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            collection: Arc::clone(&self.collection),
            posts: Arc::clone(&self.posts),
        }
    }
}

impl<R: BlogRepository> QueryCache<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
            collection: Default::default(),
            posts: Default::default(),
        }
    }

    /// 获取底层仓储
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// 获取全部文章
    ///
    /// 缓存有效时直接返回；否则发起一次拉取，并发调用共享同一次拉取的结果。
    pub async fn collection(&self) -> Result<Arc<Vec<Post>>> {
        let repo = Arc::clone(&self.repo);
        load(&self.collection, CacheKey::Collection, move || async move {
            repo.fetch_all().await
        })
        .await
    }

    /// 按 ID 获取文章，与列表缓存相互独立
    ///
    /// 拉取失败（包括不存在的 ID）时移除该 ID 的条目，不留下空条目。
    pub async fn post(&self, id: PostId) -> Result<Arc<Post>> {
        let entry = {
            let mut posts = self.posts.lock().await;
            Arc::clone(posts.entry(id).or_default())
        };

        let repo = Arc::clone(&self.repo);
        let result = load(&entry, CacheKey::Post(id), move || async move {
            repo.fetch_one(id).await
        })
        .await;

        if result.is_err() {
            self.evict_post(id, &entry).await;
        }
        result
    }

    // 只移除仍是同一个且已回到空状态的条目，重试中的拉取不受影响
    async fn evict_post(&self, id: PostId, entry: &Arc<Mutex<Entry<Post>>>) {
        let mut posts = self.posts.lock().await;
        let evict = match posts.get(&id) {
            Some(current) => Arc::ptr_eq(current, entry) && current.lock().await.is_empty(),
            None => false,
        };
        if evict {
            posts.remove(&id);
        }
    }

    /// 创建文章
    ///
    /// 成功后列表缓存失效，新文章在下一次拉取列表后出现；
    /// 按 ID 缓存的条目不受影响。
    pub async fn create(&self, draft: &DraftPost) -> Result<Post> {
        let post = self.repo.create(draft).await?;
        tracing::info!(id = post.id, title = %post.title, "post created");
        self.invalidate_collection().await;
        Ok(post)
    }

    /// 让列表缓存失效，下次读取时重新拉取
    pub async fn invalidate_collection(&self) {
        self.collection.lock().await.invalidate();
        tracing::info!(key = %CacheKey::Collection, "cache invalidated");
    }

    /// 读取列表并应用筛选条件
    pub async fn browse(&self, spec: &FilterSpec) -> Result<Vec<Post>> {
        let posts = self.collection().await?;
        Ok(query::apply(&posts, spec).into_iter().cloned().collect())
    }

    /// 同时获取文章和列表，返回文章及其相关文章
    ///
    /// 只有文章本身的错误会返回；列表加载失败时相关文章为空。
    pub async fn detail(&self, id: PostId) -> Result<PostDetail> {
        let (post, posts) = tokio::join!(self.post(id), self.collection());
        let post = post?;
        let related = match posts {
            Ok(posts) => query::related(&posts, &post).into_iter().cloned().collect(),
            Err(e) => {
                tracing::warn!(id, error = %e, "related posts unavailable");
                Vec::new()
            }
        };
        Ok(PostDetail { post, related })
    }
}
