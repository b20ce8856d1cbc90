use reqwest::{
    StatusCode,
    header::{self, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use url::Url;

use super::BlogRepository;
use crate::{
    config::ClientConfig,
    content::{CreateRequest, DraftPost, Post, PostId},
    error::{Error, Result, TransportError},
};

type TransportResult<T> = core::result::Result<T, TransportError>;

const BLOGS_PATH: &str = "blogs";

/// 通过 HTTP 访问博客服务的 [`BlogRepository`] 实现
///
/// - `GET /blogs`：全部文章
/// - `GET /blogs/{id}`：单篇文章
/// - `POST /blogs`：创建文章
#[derive(Debug, Clone)]
pub struct HttpRepository {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpRepository {
    /// 根据 [`ClientConfig`] 创建客户端
    ///
    /// ```ignore
    /// let repo = HttpRepository::new(&ClientConfig::new("http://localhost:3001")?)?;
    /// ```
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .default_headers({
                let mut headers = HeaderMap::new();
                headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
                headers
            });

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url().clone(),
        })
    }

    fn url(&self, path: &str) -> TransportResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// 发送 GET 请求并解析 JSON，404 返回 `None`
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> TransportResult<Option<T>> {
        let url = self.url(path)?;
        tracing::debug!(%url, "GET");

        let resp = self.client.get(url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_json(resp).await.map(Some)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &CreateRequest<'_>,
    ) -> TransportResult<T> {
        let url = self.url(path)?;
        tracing::debug!(%url, "POST");

        let resp = self.client.post(url).json(body).send().await?;
        read_json(resp).await
    }
}

/// 非 2xx 状态码和无法解析的响应体都视为失败，不做部分接受
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> TransportResult<T> {
    let status = resp.status();
    if !status.is_success() {
        return Err(TransportError::Status(status));
    }

    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

impl BlogRepository for HttpRepository {
    async fn fetch_all(&self) -> Result<Vec<Post>> {
        match self.get_json(BLOGS_PATH).await {
            Ok(Some(posts)) => Ok(posts),
            Ok(None) => Err(Error::LoadCollection(TransportError::Status(
                StatusCode::NOT_FOUND,
            ))),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load collection");
                Err(Error::LoadCollection(e))
            }
        }
    }

    async fn fetch_one(&self, id: PostId) -> Result<Post> {
        match self.get_json(&format!("{BLOGS_PATH}/{id}")).await {
            Ok(Some(post)) => Ok(post),
            Ok(None) => Err(Error::NotFound(id)),
            Err(source) => {
                tracing::warn!(id, error = %source, "failed to load post");
                Err(Error::LoadPost { id, source })
            }
        }
    }

    async fn create(&self, draft: &DraftPost) -> Result<Post> {
        let body = CreateRequest::now(draft);
        self.post_json(BLOGS_PATH, &body).await.map_err(|e| {
            tracing::warn!(error = %e, "failed to create post");
            Error::CreatePost(e)
        })
    }
}
