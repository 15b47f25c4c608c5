//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// StatusForge Prober - 合成监控探测器
#[derive(Parser, Debug, Clone)]
#[command(
    name = "statusforge-prober",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 配置文件路径
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径",
        env = "STATUSFORGE_CONFIG",
        global = true
    )]
    pub config: Option<PathBuf>,

    /// 日志级别（优先于配置文件）
    #[arg(
        short,
        long,
        value_enum,
        help = "日志级别",
        env = "STATUSFORGE_LOG_LEVEL",
        global = true
    )]
    pub log_level: Option<LogLevel>,

    /// 子命令
    #[command(subcommand)]
    pub command: Commands,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum LogLevel {
    /// 跟踪级别
    Trace,
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// 子命令定义
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// 启动HTTP调用入口
    Serve {
        /// 绑定地址（覆盖配置文件）
        #[arg(long, value_name = "ADDR", env = "STATUSFORGE_BIND", help = "绑定地址")]
        bind: Option<String>,

        /// 监听端口（覆盖配置文件）
        #[arg(short, long, value_name = "PORT", env = "STATUSFORGE_PORT", help = "监听端口")]
        port: Option<u16>,
    },

    /// 执行一次性检测
    Check {
        /// 监控类型：http、https、ssl、keyword
        #[arg(short, long, value_name = "KIND", help = "监控类型")]
        kind: String,

        /// 目标URL
        #[arg(short, long, value_name = "URL", help = "目标URL")]
        url: String,

        /// 关键字（keyword 类型必填）
        #[arg(long, value_name = "TEXT", help = "关键字")]
        keyword: Option<String>,

        /// 区域：EU、US、ASIA
        #[arg(short, long, value_name = "REGION", default_value = "EU", help = "区域")]
        region: String,

        /// 监控ID
        #[arg(long, value_name = "ID", default_value = "cli", help = "监控ID")]
        monitor_id: String,

        /// 项目ID
        #[arg(long, value_name = "ID", help = "项目ID")]
        project_id: Option<String>,

        /// 显示名称
        #[arg(long, value_name = "NAME", help = "显示名称")]
        name: Option<String>,

        /// 输出格式
        #[arg(short, long, value_enum, default_value = "text", help = "输出格式")]
        format: OutputFormat,
    },

    /// 验证配置文件
    Validate {
        /// 配置文件路径
        #[arg(value_name = "FILE", help = "配置文件路径")]
        config_path: Option<PathBuf>,
    },

    /// 生成默认配置文件
    Init {
        /// 配置文件路径
        #[arg(value_name = "FILE", default_value = "config.toml", help = "配置文件路径")]
        config_path: PathBuf,

        /// 是否覆盖现有文件
        #[arg(long, help = "覆盖现有文件")]
        force: bool,
    },

    /// 显示版本信息
    Version {
        /// 输出格式
        #[arg(short, long, value_enum, default_value = "text", help = "输出格式")]
        format: OutputFormat,
    },
}

/// 输出格式枚举
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    /// 文本格式
    Text,
    /// JSON格式
    Json,
}
