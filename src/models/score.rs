//! 乐谱数据模型

use std::fmt;

use crate::error::{AppError, AppResult};

/// 单个乐谱页面的矢量图片地址
///
/// 在序列中的位置即为在最终文档中的页码
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageImageSource(String);

impl PageImageSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageImageSource {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

/// 有序且非空的页面地址序列
///
/// 由发现阶段按值交给组装阶段，之后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSources {
    pages: Vec<PageImageSource>,
}

// 构造时保证非空，不提供 is_empty
#[allow(clippy::len_without_is_empty)]
impl ScoreSources {
    /// 空序列返回 `EmptyResult`
    pub fn new(pages: Vec<PageImageSource>) -> AppResult<Self> {
        if pages.is_empty() {
            return Err(AppError::EmptyResult);
        }
        Ok(Self { pages })
    }

    pub fn first(&self) -> &PageImageSource {
        &self.pages[0]
    }

    /// 除首页外的其余页面，保持原顺序
    pub fn rest(&self) -> &[PageImageSource] {
        &self.pages[1..]
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageImageSource> {
        self.pages.iter()
    }
}

/// 首页声明的尺寸（SVG 用户单位）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
}

impl PageGeometry {
    /// 宽高必须为有限正数
    pub fn new(width: f64, height: f64) -> AppResult<Self> {
        for (name, value) in [("width", width), ("height", height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AppError::geometry(format!("{} 必须为正数: {}", name, value)));
            }
        }
        Ok(Self { width, height })
    }

    /// 输出页面尺寸，只在这里取整
    pub fn page_size(&self, scale_factor: f64) -> PageSize {
        PageSize {
            width: scaled_dimension(self.width, scale_factor),
            height: scaled_dimension(self.height, scale_factor),
        }
    }
}

fn scaled_dimension(value: f64, scale_factor: f64) -> u32 {
    // 极小的尺寸取整后为 0，PDF 页面至少保留 1 个单位
    ((value * scale_factor).round() as u32).max(1)
}

/// 输出文档的固定页面尺寸（PDF 点）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.width, self.height)
    }
}
