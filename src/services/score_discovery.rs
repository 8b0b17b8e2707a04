//! 乐谱发现服务 - 业务能力层
//!
//! 驱动浏览器会话，强制懒加载容器渲染全部页面，按 DOM 顺序收集页面图片地址
//!
//! 流程：
//! 1. 导航到目标页面
//! 2. 点击同意按钮（等待出现并可用）
//! 3. 定位滚动容器，枚举直接子元素
//! 4. 把每个子元素定位到容器原点，全部完成后滚动到底部
//! 5. 轮询等待图片稳定，读取并过滤 `src`

use std::time::Duration;

use futures::future::try_join_all;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::DiscoveryConfig;
use crate::error::{AppError, AppResult};
use crate::infrastructure::ViewerSession;
use crate::models::{filter_recognized, ScoreSources};
use crate::services::settle::{wait_for_stable_images, SettlePolicy};

/// 乐谱发现服务
pub struct ScoreDiscovery {
    consent_selector: String,
    container_selector: String,
    element_timeout: Duration,
    poll_interval: Duration,
    settle: SettlePolicy,
}

impl ScoreDiscovery {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            consent_selector: config.consent_selector.clone(),
            container_selector: config.container_selector.clone(),
            element_timeout: Duration::from_millis(config.element_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            settle: SettlePolicy::from(config),
        }
    }

    /// 在给定会话中发现乐谱页面
    ///
    /// 会话在返回前一定会被关闭，无论成功或失败
    pub async fn discover<S: ViewerSession>(&self, mut session: S, target_url: &str) -> AppResult<ScoreSources> {
        let outcome = self.drive(&mut session, target_url).await;

        if let Err(e) = session.close().await {
            warn!("关闭浏览器失败: {}", e);
        }

        outcome
    }

    async fn drive<S: ViewerSession>(&self, session: &mut S, target_url: &str) -> AppResult<ScoreSources> {
        info!("🌐 正在打开: {}", target_url);
        session.navigate(target_url).await?;

        self.accept_consent(session).await?;

        let session: &S = session;
        let container = self
            .wait_for_element(session, &self.container_selector, "乐谱容器")
            .await?;

        let children = session.children(&container).await?;
        info!("📄 容器内共有 {} 个页面元素", children.len());

        // 所有子元素的定位修改都完成后才能滚动
        try_join_all(children.iter().map(|child| session.pin_to_origin(child))).await?;
        debug!("已将 {} 个页面元素定位到容器原点", children.len());

        session.scroll_to_end(&container).await?;

        info!("⏳ 等待乐谱图片加载...");
        let raw_sources = wait_for_stable_images(session, &container, &self.settle).await?;
        let recognized = filter_recognized(&raw_sources);
        info!(
            "✓ 读取到 {} 张图片，其中 {} 张为乐谱页面",
            raw_sources.len(),
            recognized.len()
        );

        ScoreSources::new(recognized)
    }

    /// 等待同意按钮出现并可用，然后点击
    async fn accept_consent<S: ViewerSession>(&self, session: &S) -> AppResult<()> {
        let deadline = Instant::now() + self.element_timeout;
        let button = self
            .wait_for_element(session, &self.consent_selector, "同意按钮")
            .await?;

        while !session.is_enabled(&button).await? {
            if Instant::now() >= deadline {
                return Err(self.not_found("同意按钮（可用）", &self.consent_selector));
            }
            sleep(self.poll_interval).await;
        }

        session.click(&button).await?;
        debug!("已点击同意按钮");
        Ok(())
    }

    /// 轮询查找元素，超时返回 `ElementNotFound`
    async fn wait_for_element<S: ViewerSession>(
        &self,
        session: &S,
        selector: &str,
        label: &str,
    ) -> AppResult<S::Node> {
        let deadline = Instant::now() + self.element_timeout;
        loop {
            if let Some(node) = session.find(selector).await? {
                return Ok(node);
            }
            if Instant::now() >= deadline {
                return Err(self.not_found(label, selector));
            }
            sleep(self.poll_interval).await;
        }
    }

    fn not_found(&self, label: &str, selector: &str) -> AppError {
        AppError::element_not_found(
            format!("{} {}", label, selector),
            self.element_timeout.as_millis() as u64,
        )
    }
}
