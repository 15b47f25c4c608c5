//! 命令处理逻辑
//!
//! 实现各种CLI命令的处理逻辑

use crate::cli::args::{Args, Commands, OutputFormat};
use crate::config::{validate_config, Config, ConfigLoader, TomlConfigLoader};
use crate::error::{ConfigError, ProberError, Result};
use crate::monitor::{CheckRequest, CheckResult};
use crate::probe::{MonitorChecker, Prober};
use crate::server::ProbeServer;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// 命令处理器trait
#[async_trait]
pub trait Command: Send + Sync {
    /// 执行命令
    ///
    /// # 参数
    /// * `args` - 命令行参数
    /// * `config` - 已加载的配置
    async fn execute(&self, args: &Args, config: &Config) -> Result<()>;
}

/// 根据子命令选择处理器
pub fn command_for(command: &Commands) -> Box<dyn Command> {
    match command {
        Commands::Serve { .. } => Box::new(ServeCommand),
        Commands::Check { .. } => Box::new(CheckCommand),
        Commands::Validate { .. } => Box::new(ValidateCommand),
        Commands::Init { .. } => Box::new(InitCommand),
        Commands::Version { .. } => Box::new(VersionCommand),
    }
}

/// 版本命令
pub struct VersionCommand;

#[async_trait]
impl Command for VersionCommand {
    async fn execute(&self, args: &Args, _config: &Config) -> Result<()> {
        if let Commands::Version { format } = &args.command {
            match format {
                OutputFormat::Json => {
                    let version_info = serde_json::json!({
                        "name": crate::APP_NAME,
                        "version": crate::VERSION,
                        "description": crate::APP_DESCRIPTION
                    });
                    println!("{}", serde_json::to_string_pretty(&version_info)?);
                }
                OutputFormat::Text => {
                    println!("{} v{}", crate::APP_NAME, crate::VERSION);
                    println!("{}", crate::APP_DESCRIPTION);
                }
            }
        }
        Ok(())
    }
}

/// 初始化命令
pub struct InitCommand;

#[async_trait]
impl Command for InitCommand {
    async fn execute(&self, args: &Args, _config: &Config) -> Result<()> {
        let Commands::Init { config_path, force } = &args.command else {
            return Ok(());
        };

        if config_path.exists() && !force {
            return Err(ProberError::Other(anyhow::anyhow!(
                "配置文件已存在: {}，使用 --force 覆盖",
                config_path.display()
            )));
        }

        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(&Config::default())
            .map_err(|e| ProberError::Other(anyhow::anyhow!("序列化默认配置失败: {}", e)))?;
        tokio::fs::write(config_path, content).await?;

        println!("配置文件已生成: {}", config_path.display());
        Ok(())
    }
}

/// 验证命令
pub struct ValidateCommand;

#[async_trait]
impl Command for ValidateCommand {
    async fn execute(&self, args: &Args, _config: &Config) -> Result<()> {
        let Commands::Validate { config_path } = &args.command else {
            return Ok(());
        };

        let path = config_path
            .clone()
            .or_else(|| args.config.clone())
            .unwrap_or_else(crate::config::get_default_config_path);

        let loader = TomlConfigLoader::default();
        match loader.load_from_file(&path).await {
            Ok(config) => {
                println!("✓ 配置文件有效: {}", path.display());
                println!(
                    "  监听地址: {}:{}",
                    config.server.bind_address, config.server.port
                );
                println!(
                    "  请求超时: {}s，降级阈值: {}ms",
                    config.probe.request_timeout_seconds, config.probe.degraded_latency_ms
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ 配置文件无效: {}", path.display());
                Err(e)
            }
        }
    }
}

/// 一次性检测命令
pub struct CheckCommand;

impl CheckCommand {
    /// 文本格式输出检测结果
    fn print_text(result: &CheckResult) {
        println!("区域: {}", result.region);
        println!("状态: {}", result.status);
        if let Some(response_time_ms) = result.response_time_ms {
            println!("响应时间: {}ms", response_time_ms);
        }
        if let Some(http_status) = result.http_status {
            println!("HTTP状态码: {}", http_status);
        }
        if let Some(ssl_valid) = result.ssl_valid {
            println!("证书有效: {}", ssl_valid);
        }
        if let Some(expires_at) = result.ssl_expires_at {
            println!("证书过期时间: {}", expires_at.to_rfc3339());
        }
        if let Some(error_message) = &result.error_message {
            println!("错误信息: {}", error_message);
        }
    }
}

#[async_trait]
impl Command for CheckCommand {
    async fn execute(&self, args: &Args, config: &Config) -> Result<()> {
        let Commands::Check {
            kind,
            url,
            keyword,
            region,
            monitor_id,
            project_id,
            name,
            format,
        } = &args.command
        else {
            return Ok(());
        };

        let request = CheckRequest {
            monitor_id: Some(monitor_id.clone()),
            project_id: project_id.clone(),
            name: name.clone(),
            kind: Some(kind.clone()),
            url: Some(url.clone()),
            keyword: keyword.clone(),
            region: Some(region.clone()),
        };

        let prober = Prober::new(config.probe.clone())?;
        let result = prober.check_request(request).await?;

        match format {
            OutputFormat::Json => println!("{}", result.to_json()?),
            OutputFormat::Text => Self::print_text(&result),
        }
        Ok(())
    }
}

/// 服务命令
pub struct ServeCommand;

#[async_trait]
impl Command for ServeCommand {
    async fn execute(&self, args: &Args, config: &Config) -> Result<()> {
        let Commands::Serve { bind, port } = &args.command else {
            return Ok(());
        };

        let mut server_config = config.server.clone();
        if let Some(bind) = bind {
            server_config.bind_address = bind.clone();
        }
        if let Some(port) = port {
            server_config.port = *port;
        }

        // 命令行覆盖后的配置同样要满足校验规则
        let merged = Config {
            server: server_config.clone(),
            ..config.clone()
        };
        validate_config(&merged).map_err(ConfigError::ValidationError)?;

        let prober = Prober::new(config.probe.clone())?;
        let server = ProbeServer::new(server_config, Arc::new(prober));

        server
            .run(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => info!("收到中断信号，正在停止服务..."),
                    Err(err) => error!("监听中断信号失败: {}", err),
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_init_writes_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let args = Args::parse_from([
            "statusforge-prober",
            "init",
            path.to_str().unwrap(),
        ]);

        InitCommand
            .execute(&args, &Config::default())
            .await
            .unwrap();

        let loader = TomlConfigLoader::new(false);
        let config = loader.load_from_file(&path).await.unwrap();
        assert_eq!(config, Config::default());

        // 不加 --force 时拒绝覆盖
        let err = InitCommand
            .execute(&args, &Config::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--force"));
    }

    #[tokio::test]
    async fn test_serve_rejects_invalid_port_override() {
        let args = Args::parse_from(["statusforge-prober", "serve", "--port", "0"]);

        let err = ServeCommand
            .execute(&args, &Config::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("监听端口不能为0"));
    }

    #[tokio::test]
    async fn test_serve_rejects_blank_bind_override() {
        let args = Args::parse_from(["statusforge-prober", "serve", "--bind", " "]);

        let err = ServeCommand
            .execute(&args, &Config::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("绑定地址不能为空"));
    }

    #[tokio::test]
    async fn test_check_command_rejects_invalid_kind() {
        let args = Args::parse_from([
            "statusforge-prober",
            "check",
            "--kind",
            "ping",
            "--url",
            "https://example.com",
        ]);

        let err = CheckCommand
            .execute(&args, &Config::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid monitor kind: ping"));
    }
}
