//! 错误处理模块
//!
//! 定义应用程序的统一错误类型。探测过程中的网络失败不属于错误，
//! 它们会被转换为 `down`/`degraded` 的检测结果。

use thiserror::Error;

/// Prober 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum ProberError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 调用参数校验错误
    #[error("请求校验失败: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP客户端构建错误
    #[error("HTTP客户端错误: {0}")]
    Client(#[from] reqwest::Error),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件解析错误
    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    /// 环境变量替换错误
    #[error("环境变量替换失败: {var}")]
    EnvVarError { var: String },
}

/// 调用方输入错误
///
/// 显示文本即返回给调用方的错误信息。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 缺少必填字段
    #[error("Missing required fields: monitor_id, url, kind, region")]
    MissingFields,

    /// 关键字监控缺少关键字
    #[error("Keyword is required for keyword monitoring")]
    MissingKeyword,

    /// 未知的监控类型
    #[error("Invalid monitor kind: {0}")]
    InvalidKind(String),

    /// 未知的区域
    #[error("Invalid region: {0}")]
    InvalidRegion(String),
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, ProberError>;
