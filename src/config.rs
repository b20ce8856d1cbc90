use std::{env, time::Duration};

use url::Url;

use crate::error::{Error, Result};

/// 默认的博客服务地址
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// 博客服务客户端配置
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// 使用服务地址创建配置
    ///
    /// 地址末尾总会补上 `/`，保证相对路径拼接在其之下。
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let mut raw = base_url.as_ref().trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }

        let base_url = Url::parse(&raw).map_err(|e| Error::Config(format!("{raw}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("{raw}: not a base url")));
        }

        Ok(Self {
            base_url,
            timeout: None,
        })
    }

    /// 从环境变量读取配置
    ///
    /// - `BLOGDECK_API_URL`：服务地址，默认 [`DEFAULT_API_URL`]
    /// - `BLOGDECK_TIMEOUT_SECS`：可选的请求超时秒数
    pub fn from_env() -> Result<Self> {
        let url = env::var("BLOGDECK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(url)?;

        if let Ok(secs) = env::var("BLOGDECK_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|e| Error::Config(format!("BLOGDECK_TIMEOUT_SECS: {e}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
