//! 获取矢量源内容

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 按 URL 获取文本内容
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// 网络错误或非成功状态码都返回 `Fetch`
    async fn fetch_text(&self, url: &str) -> AppResult<String>;
}

#[async_trait]
impl<T: SourceFetcher + ?Sized> SourceFetcher for Arc<T> {
    async fn fetch_text(&self, url: &str) -> AppResult<String> {
        self.as_ref().fetch_text(url).await
    }
}

/// 基于 reqwest 的 HTTP 获取
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(request_timeout_ms: u64) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(request_timeout_ms))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Config(format!("无法创建 HTTP 客户端: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> AppResult<String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::fetch(url, e))?;

        response.text().await.map_err(|e| AppError::fetch(url, e))
    }
}
