//! 日志工具模块
//!
//! 提供运行横幅与统计输出的辅助函数

use tracing::info;

use crate::config::Config;
use crate::workflow::ConvertReport;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🎼 乐谱转 PDF");
    info!(
        "🔗 目标: {}",
        truncate_text(config.target_url.as_deref().unwrap_or("-"), 80)
    );
    info!("📁 输出: {}", config.output_path.display());
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(report: &ConvertReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 转换完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 页数: {}", report.page_count);
    info!("📐 页面尺寸: {} pt", report.page_size);
    info!("{}", "=".repeat(60));
    info!("\n已保存至: {}", report.output_path.display());
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
