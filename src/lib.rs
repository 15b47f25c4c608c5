//! StatusForge Prober - 合成监控探测器
//!
//! 针对单个监控目标执行一次探测，并把原始信号归约为三值健康状态：
//! - HTTP/HTTPS 可达性探测
//! - SSL 证书探测（基于 SSL Labs 缓存评级）
//! - 关键字内容匹配探测
//! - HTTP 调用封装、TOML 配置与结构化日志

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod monitor;
pub mod probe;
pub mod server;

// 重新导出主要类型
pub use config::{Config, ProbeSettings, ServerConfig};
pub use error::{ProberError, ValidationError};
pub use monitor::{CheckRequest, CheckResult, CheckStatus, MonitorKind, MonitorSpec, Region};
pub use probe::{MonitorChecker, Prober};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
