//! 文档组装服务 - 业务能力层
//!
//! 按顺序获取每个页面的 SVG，由首页声明尺寸决定整份文档的页面大小

use tracing::{debug, info};

use crate::config::AssemblyConfig;
use crate::error::AppResult;
use crate::infrastructure::SourceFetcher;
use crate::models::{DeclaredSize, PageSize, ScoreSources, SvgMarkup};
use crate::services::score_document::ScoreDocument;

/// 组装完成、尚未写盘的文档
#[derive(Debug)]
pub struct AssembledDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub page_size: PageSize,
}

/// 文档组装服务
pub struct DocumentAssembler<F> {
    fetcher: F,
    scale_factor: f64,
    load_system_fonts: bool,
}

impl<F: SourceFetcher> DocumentAssembler<F> {
    pub fn new(fetcher: F, config: &AssemblyConfig) -> Self {
        Self {
            fetcher,
            scale_factor: config.scale_factor,
            load_system_fonts: config.load_system_fonts,
        }
    }

    /// 组装整份文档
    ///
    /// 任何一页获取或渲染失败都会中止，不会产出部分文档
    pub async fn assemble(&self, sources: &ScoreSources) -> AppResult<AssembledDocument> {
        let total = sources.len();
        info!("📝 正在生成 PDF ({} 页)...", total);

        let first = sources.first();
        let first_svg = self.fetcher.fetch_text(first.as_str()).await?;
        let geometry = SvgMarkup::new(&first_svg).declared_size()?;
        let page_size = geometry.page_size(self.scale_factor);
        debug!(
            "首页尺寸 {}x{}，输出页面 {}",
            geometry.width, geometry.height, page_size
        );

        let mut document = ScoreDocument::new(page_size, self.scale_factor, self.load_system_fonts);
        info!("添加第 1/{} 页: {}", total, first);
        document.add_page(&first_svg)?;

        for (offset, source) in sources.rest().iter().enumerate() {
            info!("添加第 {}/{} 页: {}", offset + 2, total, source);
            let svg = self.fetcher.fetch_text(source.as_str()).await?;
            document.add_page(&svg)?;
        }

        let page_count = document.page_count();
        Ok(AssembledDocument {
            bytes: document.finish(),
            page_count,
            page_size,
        })
    }
}
