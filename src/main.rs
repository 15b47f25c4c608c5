//! StatusForge Prober 主程序入口

use anyhow::{Context, Result};
use clap::Parser;
use statusforge_prober::cli::{command_for, Args, Commands};
use statusforge_prober::config::{Config, TomlConfigLoader};
use statusforge_prober::logging::{LogConfig, LoggingSystem};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).await?;

    let log_config = LogConfig::from_settings(&config.logging, args.log_level.map(Into::into));
    let _logging_system = LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?;

    info!("StatusForge Prober v{} 启动", statusforge_prober::VERSION);

    if let Err(e) = command_for(&args.command).execute(&args, &config).await {
        error!("命令执行失败: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// 加载配置
///
/// `init`/`validate`/`version` 不依赖运行配置，配置无效时也应能执行，因此使用默认配置。
async fn load_config(args: &Args) -> Result<Config> {
    match args.command {
        Commands::Init { .. } | Commands::Validate { .. } | Commands::Version { .. } => {
            Ok(Config::default())
        }
        Commands::Serve { .. } | Commands::Check { .. } => TomlConfigLoader::default()
            .load_or_default(args.config.as_deref())
            .await
            .context("加载配置失败"),
    }
}
