mod http;

pub use self::http::HttpRepository;

use crate::{
    content::{DraftPost, Post, PostId},
    error::Result,
};

/// 博客服务的读写接口
///
/// [`HttpRepository`] 通过 HTTP 访问真实服务，测试中可以替换为内存实现。
pub trait BlogRepository: Send + Sync + 'static {
    /// 拉取全部文章
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Post>>> + Send;

    /// 按 ID 拉取单篇文章
    ///
    /// 文章不存在时返回 [`Error::NotFound`](crate::Error::NotFound)。
    fn fetch_one(&self, id: PostId) -> impl Future<Output = Result<Post>> + Send;

    /// 创建文章，返回服务端分配了 ID 的 [`Post`]
    fn create(&self, draft: &DraftPost) -> impl Future<Output = Result<Post>> + Send;
}
