use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
///
/// 发现阶段与组装阶段的任何错误都会终止整个运行，不做重试
#[derive(Debug, Error)]
pub enum AppError {
    /// 导航到目标页面失败
    #[error("导航到 {url} 失败: {source}")]
    Navigation {
        url: String,
        #[source]
        source: BoxError,
    },

    /// 元素不存在，或在等待时限内未出现/未启用
    #[error("未找到元素: {what} (等待 {timeout_ms} ms)")]
    ElementNotFound { what: String, timeout_ms: u64 },

    /// 没有识别到任何乐谱页面
    #[error("没有找到可识别的乐谱页面")]
    EmptyResult,

    /// 获取矢量源内容失败
    #[error("获取 {url} 失败: {source}")]
    Fetch {
        url: String,
        #[source]
        source: BoxError,
    },

    /// 首页尺寸解析失败
    #[error("无法解析页面尺寸: {reason}")]
    GeometryParse { reason: String },

    /// SVG 转换为 PDF 失败
    #[error("第 {page} 页渲染失败: {reason}")]
    Render { page: usize, reason: String },

    /// 浏览器相关错误
    #[error("浏览器错误: {source}")]
    Browser {
        #[source]
        source: BoxError,
    },

    /// 输出文件写入失败
    #[error("写入 {} 失败: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser {
            source: Box::new(err),
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建导航错误
    pub fn navigation(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AppError::Navigation {
            url: url.into(),
            source: source.into(),
        }
    }

    /// 创建元素未找到错误
    pub fn element_not_found(what: impl Into<String>, timeout_ms: u64) -> Self {
        AppError::ElementNotFound {
            what: what.into(),
            timeout_ms,
        }
    }

    /// 创建获取失败错误
    pub fn fetch(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AppError::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }

    /// 创建尺寸解析错误
    pub fn geometry(reason: impl Into<String>) -> Self {
        AppError::GeometryParse {
            reason: reason.into(),
        }
    }

    /// 创建浏览器错误
    pub fn browser(source: impl Into<BoxError>) -> Self {
        AppError::Browser {
            source: source.into(),
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
