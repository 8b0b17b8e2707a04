//! 等待懒加载图片稳定
//!
//! 按固定间隔读取容器内的图片地址，可识别的乐谱图片数量连续多次不变即视为加载完成

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::config::DiscoveryConfig;
use crate::error::{AppError, AppResult};
use crate::infrastructure::ViewerSession;
use crate::models::is_recognized;

/// 稳定判定参数
#[derive(Debug, Clone, Copy)]
pub struct SettlePolicy {
    pub poll_interval: Duration,
    /// 数量连续不变的次数
    pub stable_checks: usize,
    pub timeout: Duration,
}

impl From<&DiscoveryConfig> for SettlePolicy {
    fn from(config: &DiscoveryConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            stable_checks: config.settle_checks,
            timeout: Duration::from_millis(config.settle_timeout_ms),
        }
    }
}

/// 轮询直到图片稳定，返回最后一次读取到的全部 `src`（DOM 顺序）
///
/// 超时时：一张可识别图片都没有返回 `EmptyResult`，否则返回 `ElementNotFound`
pub async fn wait_for_stable_images<S: ViewerSession>(
    session: &S,
    container: &S::Node,
    policy: &SettlePolicy,
) -> AppResult<Vec<String>> {
    let deadline = Instant::now() + policy.timeout;
    let mut last_count: Option<usize> = None;
    let mut unchanged = 0;

    loop {
        let sources = session.image_sources(container).await?;
        let count = sources.iter().filter(|src| is_recognized(src)).count();

        if count > 0 && last_count == Some(count) {
            unchanged += 1;
        } else {
            unchanged = 0;
        }
        last_count = Some(count);
        debug!("乐谱图片: {} 张 (连续 {} 次不变)", count, unchanged);

        if unchanged >= policy.stable_checks {
            return Ok(sources);
        }

        if Instant::now() >= deadline {
            return Err(if count == 0 {
                AppError::EmptyResult
            } else {
                AppError::element_not_found("稳定的乐谱图片", policy.timeout.as_millis() as u64)
            });
        }

        sleep(policy.poll_interval).await;
    }
}
