//! # Score PDF
//!
//! 把按需渲染的在线乐谱查看器转换为一份多页 PDF
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 启动 Chromium
//! - `infrastructure/` - 持有稀缺资源（浏览器会话、HTTP 客户端），只暴露能力
//! - `ViewerSession` / `ChromeSession` - 发现流程所需的浏览器命令
//! - `SourceFetcher` / `HttpFetcher` - 获取 SVG 文本
//!
//! ### ② 业务能力层（Services）
//! - `ScoreDiscovery` - 同意弹窗 → 强制渲染 → 收集页面地址
//! - `DocumentAssembler` - 由首页尺寸决定页面大小，逐页绘制 SVG
//! - `OutputWriter` - 成功后才原子替换输出文件
//!
//! ### ③ 流程层（Workflow）
//! - `ConvertFlow` - 发现 → 组装 → 写盘
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 校验配置、创建资源、调度流程

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ChromeSession, HttpFetcher, SourceFetcher, ViewerSession};
pub use models::{PageGeometry, PageImageSource, PageSize, ScoreSources};
pub use orchestrator::{App, RunMode};
pub use workflow::{ConvertFlow, ConvertReport};
