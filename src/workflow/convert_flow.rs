//! 乐谱转换流程 - 流程层
//!
//! 流程顺序：
//! 1. 发现：在浏览器会话中收集页面地址（会话在此阶段结束前释放）
//! 2. 组装：在内存中生成 PDF
//! 3. 写盘：临时文件重命名到输出路径

use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{SourceFetcher, ViewerSession};
use crate::models::{PageSize, ScoreSources};
use crate::services::{DocumentAssembler, OutputWriter, ScoreDiscovery};

/// 一次成功转换的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub page_count: usize,
    pub page_size: PageSize,
    pub output_path: PathBuf,
}

/// 乐谱转换流程
///
/// 不持有浏览器会话，会话由调用方按次传入
pub struct ConvertFlow<F> {
    discovery: ScoreDiscovery,
    assembler: DocumentAssembler<F>,
    writer: OutputWriter,
}

impl<F: SourceFetcher> ConvertFlow<F> {
    pub fn new(config: &Config, fetcher: F) -> Self {
        Self {
            discovery: ScoreDiscovery::new(&config.discovery),
            assembler: DocumentAssembler::new(fetcher, &config.assembly),
            writer: OutputWriter::new(config.output_path.clone()),
        }
    }

    /// 只执行发现阶段
    pub async fn discover<S: ViewerSession>(&self, session: S, target_url: &str) -> AppResult<ScoreSources> {
        self.discovery.discover(session, target_url).await
    }

    /// 完整执行：发现 → 组装 → 写盘
    pub async fn run<S: ViewerSession>(&self, session: S, target_url: &str) -> AppResult<ConvertReport> {
        let sources = self.discover(session, target_url).await?;

        let document = self.assembler.assemble(&sources).await?;
        let page_count = document.page_count;
        let page_size = document.page_size;

        info!("💾 正在保存到 {}", self.writer.output_path().display());
        self.writer.write(document.bytes).await?;

        Ok(ConvertReport {
            page_count,
            page_size,
            output_path: self.writer.output_path().to_path_buf(),
        })
    }
}
