//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (持有配置与资源)
//!     ↓
//! workflow::ConvertFlow (发现 → 组装 → 写盘)
//!     ↓
//! services (能力层：discovery / assembler / writer)
//!     ↓
//! infrastructure (基础设施：ChromeSession / HttpFetcher)
//! ```
//!
//! 浏览器会话只在编排层创建，按值交给流程层，发现阶段结束时释放

pub mod app;

pub use app::{App, RunMode};
