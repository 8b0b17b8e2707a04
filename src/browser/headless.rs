use chromiumoxide::{Browser, BrowserConfig as ChromeConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::config::BrowserConfig;
use crate::error::{AppError, AppResult};

/// 启动浏览器，并在后台处理 CDP 事件
///
/// 返回的 `JoinHandle` 在浏览器关闭后结束
pub async fn launch_headless_browser(config: &BrowserConfig) -> AppResult<(Browser, JoinHandle<()>)> {
    info!(
        "🚀 启动浏览器 ({}, {}x{})...",
        if config.headless { "无头" } else { "有界面" },
        config.window_width,
        config.window_height
    );

    let mut builder = ChromeConfig::builder()
        .window_size(config.window_width, config.window_height)
        .args(vec![
            "--disable-gpu",           // 无头模式下禁用 GPU
            "--no-sandbox",            // 容器内没有沙盒权限
            "--disable-dev-shm-usage", // 防止共享内存不足
        ]);
    builder = if config.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if let Some(executable) = &config.executable {
        debug!("使用浏览器: {}", executable.display());
        builder = builder.chrome_executable(executable);
    }

    let chrome_config = builder.build().map_err(|e| {
        error!("配置浏览器失败: {}", e);
        AppError::browser(e)
    })?;

    let (browser, mut handler) = Browser::launch(chrome_config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        AppError::from(e)
    })?;
    debug!("浏览器启动成功");

    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    Ok((browser, handler_task))
}
