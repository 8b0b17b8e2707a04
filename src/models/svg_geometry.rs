//! 从矢量内容中读取声明尺寸
//!
//! 解析 SVG 根元素的 `width` / `height` 属性，而不是在原始文本上做模式匹配

use crate::error::{AppError, AppResult};
use crate::models::score::PageGeometry;

/// 能够给出声明尺寸的内容
pub trait DeclaredSize {
    fn declared_size(&self) -> AppResult<PageGeometry>;
}

/// 未解析的 SVG 文本
#[derive(Debug, Clone, Copy)]
pub struct SvgMarkup<'a> {
    text: &'a str,
}

impl<'a> SvgMarkup<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl DeclaredSize for SvgMarkup<'_> {
    fn declared_size(&self) -> AppResult<PageGeometry> {
        // SVG 1.1 导出文件常带 DOCTYPE 声明
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let doc = roxmltree::Document::parse_with_options(self.text, options)
            .map_err(|e| AppError::geometry(format!("不是合法的 SVG 文档: {}", e)))?;

        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(AppError::geometry(format!(
                "根元素是 <{}> 而不是 <svg>",
                root.tag_name().name()
            )));
        }

        let width = parse_length(root.attribute("width"), "width")?;
        let height = parse_length(root.attribute("height"), "height")?;
        PageGeometry::new(width, height)
    }
}

/// 解析长度属性，只接受纯数字或 `px` 单位
fn parse_length(value: Option<&str>, name: &str) -> AppResult<f64> {
    let raw = value.ok_or_else(|| AppError::geometry(format!("缺少 {} 属性", name)))?;
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();

    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::geometry(format!("{} 属性不是数字: {:?}", name, raw)))
}
