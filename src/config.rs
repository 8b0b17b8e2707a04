use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 乐谱页面 URL
    pub target_url: Option<String>,
    /// 输出 PDF 路径
    pub output_path: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    pub browser: BrowserConfig,
    pub discovery: DiscoveryConfig,
    pub assembly: AssemblyConfig,
}

/// 浏览器启动配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// 无头模式
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    /// 浏览器可执行文件路径，为空时自动查找
    pub executable: Option<PathBuf>,
}

/// 乐谱发现阶段配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// 等待元素出现/启用的时限
    pub element_timeout_ms: u64,
    /// 轮询间隔
    pub poll_interval_ms: u64,
    /// 图片数量连续多少次不变视为加载完成
    pub settle_checks: usize,
    /// 等待图片加载完成的总时限
    pub settle_timeout_ms: u64,
    /// 同意按钮选择器
    pub consent_selector: String,
    /// 乐谱滚动容器选择器
    pub container_selector: String,
}

/// 文档组装阶段配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// 首页尺寸到输出页面尺寸的缩放系数
    pub scale_factor: f64,
    /// 单次请求超时
    pub request_timeout_ms: u64,
    /// 是否加载系统字体（SVG 中含文字时需要）
    pub load_system_fonts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: None,
            output_path: PathBuf::from("score.pdf"),
            verbose_logging: false,
            browser: BrowserConfig::default(),
            discovery: DiscoveryConfig::default(),
            assembly: AssemblyConfig::default(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1600,
            window_height: 1200,
            executable: None,
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            element_timeout_ms: 10_000,
            poll_interval_ms: 250,
            settle_checks: 3,
            settle_timeout_ms: 15_000,
            consent_selector: ".css-47sehv".to_string(),
            container_selector: "#jmuse-scroller-component".to_string(),
        }
    }
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            scale_factor: 0.75,
            request_timeout_ms: 30_000,
            load_system_fonts: true,
        }
    }
}

impl Config {
    /// 从 TOML 文件加载配置，缺失字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("无法读取配置文件 {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| AppError::Config(format!("{} ({})", e, path.display())))
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| AppError::Config(format!("无法解析配置: {}", e)))
    }

    /// 默认配置叠加环境变量
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// 用环境变量覆盖当前配置
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var("SCORE_URL") {
            self.target_url = Some(url);
        }
        if let Ok(path) = std::env::var("SCORE_OUTPUT") {
            self.output_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("BROWSER_EXECUTABLE") {
            self.browser.executable = Some(PathBuf::from(path));
        }
        override_from_env("VERBOSE_LOGGING", &mut self.verbose_logging);
        override_from_env("BROWSER_HEADLESS", &mut self.browser.headless);
        override_from_env("BROWSER_WINDOW_WIDTH", &mut self.browser.window_width);
        override_from_env("BROWSER_WINDOW_HEIGHT", &mut self.browser.window_height);
        override_from_env("ELEMENT_TIMEOUT_MS", &mut self.discovery.element_timeout_ms);
        override_from_env("POLL_INTERVAL_MS", &mut self.discovery.poll_interval_ms);
        override_from_env("SETTLE_CHECKS", &mut self.discovery.settle_checks);
        override_from_env("SETTLE_TIMEOUT_MS", &mut self.discovery.settle_timeout_ms);
        override_from_env("REQUEST_TIMEOUT_MS", &mut self.assembly.request_timeout_ms);
        override_from_env("LOAD_SYSTEM_FONTS", &mut self.assembly.load_system_fonts);
        self
    }

    /// 检查配置是否可用于一次完整运行
    pub fn validate(&self) -> AppResult<()> {
        match self.target_url.as_deref() {
            Some(url) if !url.trim().is_empty() => {}
            _ => return Err(AppError::Config("没有提供乐谱 URL".to_string())),
        }
        if self.discovery.poll_interval_ms == 0 {
            return Err(AppError::Config("poll_interval_ms 必须大于 0".to_string()));
        }
        if self.discovery.settle_checks == 0 {
            return Err(AppError::Config("settle_checks 必须大于 0".to_string()));
        }
        if !(self.assembly.scale_factor.is_finite() && self.assembly.scale_factor > 0.0) {
            return Err(AppError::Config(format!(
                "scale_factor 必须为正数: {}",
                self.assembly.scale_factor
            )));
        }
        Ok(())
    }
}

fn override_from_env<T: FromStr>(var_name: &str, slot: &mut T) {
    if let Some(value) = std::env::var(var_name).ok().and_then(|v| v.parse().ok()) {
        *slot = value;
    }
}
