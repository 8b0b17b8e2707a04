//! 基于 chromiumoxide 的浏览器会话

use async_trait::async_trait;
use chromiumoxide::element::Element;
use chromiumoxide::Browser;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::browser::launch_headless_browser;
use crate::config::BrowserConfig;
use crate::error::{AppError, AppResult};
use crate::infrastructure::js_executor::JsExecutor;
use crate::infrastructure::viewer_session::ViewerSession;

const ENABLED_FN: &str = "function() { return !this.disabled; }";

const PIN_TO_ORIGIN_FN: &str = r#"function() {
    this.style.position = 'absolute';
    this.style.top = '0';
    this.style.left = '0';
}"#;

const SCROLL_TO_END_FN: &str = "function() { this.scrollTo(0, this.scrollHeight); }";

const IMAGE_SOURCES_FN: &str =
    "function() { return Array.from(this.querySelectorAll('img'), img => img.getAttribute('src') || ''); }";

/// 真实浏览器会话
///
/// 持有浏览器进程；`close` 显式关闭，意外退出时由 `Browser` 的 drop 结束子进程
pub struct ChromeSession {
    browser: Browser,
    handler: JoinHandle<()>,
    executor: JsExecutor,
}

impl ChromeSession {
    /// 启动浏览器并打开一个空白页面
    pub async fn launch(config: &BrowserConfig) -> AppResult<Self> {
        let (browser, handler) = launch_headless_browser(config).await?;

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(e.into());
            }
        };

        Ok(Self {
            browser,
            handler,
            executor: JsExecutor::new(page),
        })
    }
}

#[async_trait(?Send)]
impl ViewerSession for ChromeSession {
    type Node = Element;

    async fn navigate(&mut self, url: &str) -> AppResult<()> {
        self.executor.goto(url).await?;
        let title: String = self
            .executor
            .eval_as("document.title")
            .await
            .unwrap_or_default();
        debug!("页面已加载: {}", title);
        Ok(())
    }

    async fn find(&self, selector: &str) -> AppResult<Option<Element>> {
        self.executor.find(selector).await
    }

    async fn is_enabled(&self, node: &Element) -> AppResult<bool> {
        let value = self.executor.call_on(node, ENABLED_FN).await?;
        Ok(value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    async fn click(&self, node: &Element) -> AppResult<()> {
        node.click().await?;
        Ok(())
    }

    async fn children(&self, node: &Element) -> AppResult<Vec<Element>> {
        Ok(node.find_elements(":scope > *").await?)
    }

    async fn pin_to_origin(&self, node: &Element) -> AppResult<()> {
        self.executor.call_on(node, PIN_TO_ORIGIN_FN).await?;
        Ok(())
    }

    async fn scroll_to_end(&self, node: &Element) -> AppResult<()> {
        self.executor.call_on(node, SCROLL_TO_END_FN).await?;
        Ok(())
    }

    async fn image_sources(&self, node: &Element) -> AppResult<Vec<String>> {
        self.executor.call_on_as(node, IMAGE_SOURCES_FN).await
    }

    async fn close(mut self) -> AppResult<()> {
        debug!("正在关闭浏览器...");
        let closed = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            warn!("等待浏览器进程退出失败: {}", e);
        }
        self.handler.abort();
        closed.map(|_| ()).map_err(AppError::from)
    }
}
