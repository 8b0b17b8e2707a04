//! 应用入口 - 编排层
//!
//! 负责校验配置、创建资源（浏览器会话、HTTP 客户端）并调度转换流程

use tracing::info;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{ChromeSession, HttpFetcher};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::{ConvertFlow, ConvertReport};

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// 发现并生成 PDF
    #[default]
    Convert,
    /// 只打印发现的页面地址
    ListOnly,
}

/// 应用主结构
pub struct App {
    config: Config,
    target_url: String,
    flow: ConvertFlow<HttpFetcher>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        let target_url = config
            .target_url
            .clone()
            .ok_or_else(|| AppError::Config("没有提供乐谱 URL".to_string()))?;

        let fetcher = HttpFetcher::new(config.assembly.request_timeout_ms)?;
        let flow = ConvertFlow::new(&config, fetcher);

        Ok(Self {
            config,
            target_url,
            flow,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self, mode: RunMode) -> AppResult<Option<ConvertReport>> {
        log_startup(&self.config);

        // 每次运行独占一个浏览器会话
        let session = ChromeSession::launch(&self.config.browser).await?;

        match mode {
            RunMode::Convert => {
                let report = self.flow.run(session, &self.target_url).await?;
                print_final_stats(&report);
                Ok(Some(report))
            }
            RunMode::ListOnly => {
                let sources = self.flow.discover(session, &self.target_url).await?;
                info!("共发现 {} 个页面", sources.len());
                for source in sources.iter() {
                    println!("{}", source);
                }
                Ok(None)
            }
        }
    }
}
