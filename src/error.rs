use std::sync::Arc;

use reqwest::StatusCode;

use crate::content::PostId;

pub type Result<T> = core::result::Result<T, Error>;

/// 底层传输错误。
///
/// 作为 [`Error`] 的 source 保留，便于排查请求究竟在哪一步失败。
/// 内部使用 [`Arc`] 包装，使同一次失败可以分发给所有等待者。
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// 请求未能完成（连接失败、超时等）
    #[error(transparent)]
    Http(Arc<reqwest::Error>),

    /// 服务返回了非 2xx 状态码
    #[error("unexpected status: {0}")]
    Status(StatusCode),

    /// 响应体不是合法的 Post JSON
    #[error("malformed response: {0}")]
    Decode(Arc<serde_json::Error>),

    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(Arc::new(e))
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(Arc::new(e))
    }
}

/// 客户端统一错误类型。
///
/// - [`Error::NotFound`]：请求的文章不存在
/// - [`Error::LoadCollection`]：文章列表加载失败
/// - [`Error::LoadPost`]：单篇文章加载失败
/// - [`Error::CreatePost`]：创建文章失败
/// - [`Error::Aborted`]：后台拉取任务异常终止
/// - [`Error::Config`]：客户端配置不合法
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("post {0} not found")]
    NotFound(PostId),

    #[error("could not load collection")]
    LoadCollection(#[source] TransportError),

    #[error("could not load post {id}")]
    LoadPost {
        id: PostId,
        #[source]
        source: TransportError,
    },

    #[error("could not create post")]
    CreatePost(#[source] TransportError),

    #[error("fetch task aborted")]
    Aborted,

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// 错误类别，供展示层区分“不存在”和一般的加载/创建失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    LoadFailed,
    CreateFailed,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not-found",
            ErrorKind::LoadFailed => "load-failed",
            ErrorKind::CreateFailed => "create-failed",
            ErrorKind::Config => "config",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::LoadCollection(_) | Error::LoadPost { .. } | Error::Aborted => {
                ErrorKind::LoadFailed
            }
            Error::CreatePost(_) => ErrorKind::CreateFailed,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}
