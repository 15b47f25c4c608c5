//! 配置数据结构定义
//!
//! 定义应用程序的配置结构体和验证逻辑

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// 主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// HTTP 调用入口配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 探测参数
    #[serde(default)]
    pub probe: ProbeSettings,
    /// 日志配置
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// HTTP 调用入口配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// 绑定地址
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取监听地址
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, String> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| format!("无效的监听地址 {}:{}: {}", self.bind_address, self.port, e))
    }
}

/// 探测参数
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbeSettings {
    /// 可达性/关键字探测的请求超时（秒）
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    /// 超过该延迟（毫秒）判定为降级
    #[serde(default = "default_degraded_latency")]
    pub degraded_latency_ms: u64,
    /// 探测请求使用的 User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// SSL Labs API 基础地址
    #[serde(default = "default_ssl_labs_api_url")]
    pub ssl_labs_api_url: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_timeout(),
            degraded_latency_ms: default_degraded_latency(),
            user_agent: default_user_agent(),
            ssl_labs_api_url: default_ssl_labs_api_url(),
        }
    }
}

impl ProbeSettings {
    /// 请求超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// 降级延迟阈值
    pub fn degraded_latency(&self) -> Duration {
        Duration::from_millis(self.degraded_latency_ms)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
    /// 是否使用JSON格式
    #[serde(default)]
    pub json_format: bool,
    /// 日志文件路径（不设置则输出到控制台）
    #[serde(default)]
    pub file_path: Option<PathBuf>,
    /// 按模块覆盖日志级别，例如 `"statusforge_prober::probe" = "debug"`
    #[serde(default)]
    pub module_levels: HashMap<String, String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
            file_path: None,
            module_levels: HashMap::new(),
        }
    }
}

// 默认值函数
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_timeout() -> u64 {
    10
}
fn default_degraded_latency() -> u64 {
    5000
}
fn default_user_agent() -> String {
    "StatusForge-Monitor/1.0".to_string()
}
fn default_ssl_labs_api_url() -> String {
    "https://api.ssllabs.com/api/v3".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_config(config: &Config) -> Result<(), String> {
    if config.server.port == 0 {
        return Err("监听端口不能为0".to_string());
    }

    if config.server.bind_address.trim().is_empty() {
        return Err("绑定地址不能为空".to_string());
    }

    if config.probe.request_timeout_seconds == 0 {
        return Err("请求超时时间不能为0".to_string());
    }

    if config.probe.degraded_latency_ms == 0 {
        return Err("降级延迟阈值不能为0".to_string());
    }

    if config.probe.user_agent.trim().is_empty() {
        return Err("User-Agent不能为空".to_string());
    }

    let api_url = &config.probe.ssl_labs_api_url;
    if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
        return Err(format!("SSL Labs API 地址格式无效: {}", api_url));
    }

    let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_log_levels.contains(&config.logging.level.as_str()) {
        return Err(format!(
            "无效的日志级别: {}，支持的级别: {:?}",
            config.logging.level, valid_log_levels
        ));
    }

    for (module, level) in &config.logging.module_levels {
        if module.trim().is_empty() {
            return Err("模块日志级别的模块名不能为空".to_string());
        }
        if !valid_log_levels.contains(&level.as_str()) {
            return Err(format!("模块 {} 的日志级别无效: {}", module, level));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.probe.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.probe.degraded_latency(), Duration::from_millis(5000));
        assert_eq!(config.probe.user_agent, "StatusForge-Monitor/1.0");
        assert_eq!(
            config.probe.ssl_labs_api_url,
            "https://api.ssllabs.com/api/v3"
        );
        assert_eq!(config.logging.level, "info");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [probe]
            degraded_latency_ms = 2500
            "#,
        )
        .expect("解析失败");

        assert_eq!(config.probe.degraded_latency_ms, 2500);
        assert_eq!(config.probe.request_timeout_seconds, 10);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();

        let serialized = toml::to_string(&config).expect("序列化失败");
        assert!(serialized.contains("[probe]"));

        let deserialized: Config = toml::from_str(&serialized).expect("反序列化失败");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = Config::default();
        config.probe.request_timeout_seconds = 0;

        let result = validate_config(&config);
        assert!(result.unwrap_err().contains("请求超时"));
    }

    #[test]
    fn test_config_validation_invalid_api_url() {
        let mut config = Config::default();
        config.probe.ssl_labs_api_url = "api.ssllabs.com".to_string();

        let result = validate_config(&config);
        assert!(result.unwrap_err().contains("SSL Labs"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();

        let result = validate_config(&config);
        assert!(result.unwrap_err().contains("日志级别"));
    }

    #[test]
    fn test_module_levels_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [logging.module_levels]
            "statusforge_prober::probe" = "debug"
            hyper = "warn"
            "#,
        )
        .expect("解析失败");

        assert_eq!(
            config.logging.module_levels.get("statusforge_prober::probe"),
            Some(&"debug".to_string())
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_config_validation_invalid_module_level() {
        let mut config = Config::default();
        config
            .logging
            .module_levels
            .insert("hyper".to_string(), "loud".to_string());

        let result = validate_config(&config);
        assert!(result.unwrap_err().contains("hyper"));
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            port: 9000,
        };
        assert_eq!(config.socket_addr().unwrap().port(), 9000);

        let invalid = ServerConfig {
            bind_address: "not an address".to_string(),
            port: 9000,
        };
        assert!(invalid.socket_addr().is_err());
    }
}
