//! 浏览器会话接口
//!
//! 发现流程只依赖这组浏览器命令，真实实现见 [`ChromeSession`](super::ChromeSession)

use async_trait::async_trait;

use crate::error::AppResult;

/// 一次浏览器会话能执行的命令
///
/// `Node` 是页面元素的句柄，只在会话存活期间有效
#[async_trait(?Send)]
pub trait ViewerSession {
    type Node;

    /// 加载目标页面，失败返回 `Navigation`
    async fn navigate(&mut self, url: &str) -> AppResult<()>;

    /// 查找第一个匹配的元素
    async fn find(&self, selector: &str) -> AppResult<Option<Self::Node>>;

    /// 元素当前是否可交互
    async fn is_enabled(&self, node: &Self::Node) -> AppResult<bool>;

    async fn click(&self, node: &Self::Node) -> AppResult<()>;

    /// 按 DOM 顺序返回直接子元素
    async fn children(&self, node: &Self::Node) -> AppResult<Vec<Self::Node>>;

    /// 把元素绝对定位到容器原点
    async fn pin_to_origin(&self, node: &Self::Node) -> AppResult<()>;

    /// 把容器滚动到底部
    async fn scroll_to_end(&self, node: &Self::Node) -> AppResult<()>;

    /// 按 DOM 顺序读取容器内所有 `<img>` 的 `src`
    async fn image_sources(&self, node: &Self::Node) -> AppResult<Vec<String>>;

    /// 结束会话并释放浏览器
    async fn close(self) -> AppResult<()>
    where
        Self: Sized;
}
