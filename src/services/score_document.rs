//! 多页 PDF 文档
//!
//! 每个 SVG 通过 svg2pdf 转成一个 Form XObject，放到固定尺寸页面的左上角

use std::collections::HashMap;

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref};
use svg2pdf::usvg;
use svg2pdf::ConversionOptions;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::PageSize;

const SVG_XOBJECT: Name<'static> = Name(b"Score");

/// 正在组装的乐谱文档
///
/// 所有页面共享首页决定的页面尺寸
pub struct ScoreDocument {
    pdf: Pdf,
    alloc: Ref,
    catalog_id: Ref,
    page_tree_id: Ref,
    page_ids: Vec<Ref>,
    page_size: PageSize,
    scale_factor: f64,
    svg_options: usvg::Options<'static>,
}

impl ScoreDocument {
    /// `scale_factor` 把 SVG 用户单位换算为 PDF 点
    pub fn new(page_size: PageSize, scale_factor: f64, load_system_fonts: bool) -> Self {
        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let page_tree_id = alloc.bump();

        let mut svg_options = usvg::Options::default();
        if load_system_fonts {
            svg_options.fontdb_mut().load_system_fonts();
        }

        Self {
            pdf: Pdf::new(),
            alloc,
            catalog_id,
            page_tree_id,
            page_ids: Vec::new(),
            page_size,
            scale_factor,
            svg_options,
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// 追加一页，并在页面左上角按自身尺寸绘制 SVG
    pub fn add_page(&mut self, svg: &str) -> AppResult<()> {
        let page_number = self.page_ids.len() + 1;
        let render_error = |reason: String| AppError::Render {
            page: page_number,
            reason,
        };

        let tree = usvg::Tree::from_str(svg, &self.svg_options)
            .map_err(|e| render_error(e.to_string()))?;
        let (chunk, svg_id) = svg2pdf::to_chunk(&tree, ConversionOptions::default())
            .map_err(|e| render_error(e.to_string()))?;

        // svg2pdf 的对象编号从 1 开始，需要映射到本文档的编号空间
        let mut id_map = HashMap::new();
        let alloc = &mut self.alloc;
        let chunk = chunk.renumber(|old| *id_map.entry(old).or_insert_with(|| alloc.bump()));
        let svg_id = *id_map
            .get(&svg_id)
            .ok_or_else(|| render_error("转换结果中缺少 XObject".to_string()))?;

        let page_id = self.alloc.bump();
        let content_id = self.alloc.bump();

        let page_width = self.page_size.width as f32;
        let page_height = self.page_size.height as f32;
        let size = tree.size();
        let width = (f64::from(size.width()) * self.scale_factor) as f32;
        let height = (f64::from(size.height()) * self.scale_factor) as f32;

        let mut page = self.pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, page_width, page_height));
        page.parent(self.page_tree_id);
        page.contents(content_id);
        page.resources().x_objects().pair(SVG_XOBJECT, svg_id);
        page.finish();

        // PDF 原点在左下角，SVG 顶端对齐页面顶端
        let mut content = Content::new();
        content.save_state();
        content.transform([width, 0.0, 0.0, height, 0.0, page_height - height]);
        content.x_object(SVG_XOBJECT);
        content.restore_state();
        self.pdf.stream(content_id, &content.finish());

        self.pdf.extend(&chunk);
        self.page_ids.push(page_id);

        debug!("第 {} 页: SVG {}x{} → {}x{} pt", page_number, size.width(), size.height(), width, height);
        Ok(())
    }

    /// 写入目录与页面树，返回完整的 PDF 字节
    pub fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.page_tree_id);
        self.pdf
            .pages(self.page_tree_id)
            .kids(self.page_ids.iter().copied())
            .count(self.page_ids.len() as i32);
        self.pdf.finish()
    }
}
