use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use score_pdf::{logger, App, Config, RunMode};

/// 把在线乐谱转换为 PDF
#[derive(Debug, Parser)]
#[command(name = "score-pdf", version)]
struct Cli {
    /// 乐谱页面 URL
    #[arg(long)]
    url: Option<String>,

    /// 输出 PDF 路径
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// TOML 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 显示浏览器窗口
    #[arg(long)]
    headed: bool,

    /// 只打印发现的页面地址，不生成 PDF
    #[arg(long)]
    list_only: bool,

    /// 输出调试日志
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    /// 默认值 < 配置文件 < 环境变量 < 命令行
    fn into_config(self) -> Result<(Config, RunMode)> {
        let base = match &self.config {
            Some(path) => Config::from_toml_file(path)?,
            None => Config::default(),
        };
        let mut config = base.with_env();

        if let Some(url) = self.url {
            config.target_url = Some(url);
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if self.headed {
            config.browser.headless = false;
        }
        if self.verbose {
            config.verbose_logging = true;
        }

        let mode = if self.list_only {
            RunMode::ListOnly
        } else {
            RunMode::Convert
        };
        Ok((config, mode))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let (config, mode) = Cli::parse().into_config()?;

    // 初始化日志
    logger::init(config.verbose_logging);

    App::initialize(config)?.run(mode).await?;

    Ok(())
}
