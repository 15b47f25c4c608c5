//! 检测结果数据结构
//!
//! 定义检测结果类型和三值健康状态

use crate::monitor::spec::Region;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// 健康状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// 正常
    Up,
    /// 降级
    Degraded,
    /// 异常
    Down,
}

impl CheckStatus {
    /// 线上格式的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Up => "up",
            CheckStatus::Degraded => "degraded",
            CheckStatus::Down => "down",
        }
    }

    /// 判断状态是否为健康
    pub fn is_healthy(&self) -> bool {
        matches!(self, CheckStatus::Up)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单次探测的结果
///
/// 每种探测只填充与自身相关的字段，未填充的字段在 JSON 中省略。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// 区域（原样回显）
    pub region: Region,
    /// 健康状态
    pub status: CheckStatus,
    /// 响应时间（毫秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// HTTP状态码
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    /// 证书是否有效
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_valid: Option<bool>,
    /// 证书过期时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_expires_at: Option<DateTime<Utc>>,
    /// 错误信息
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl CheckResult {
    /// 创建新的检测结果
    pub fn new(region: Region, status: CheckStatus) -> Self {
        Self {
            region,
            status,
            response_time_ms: None,
            http_status: None,
            ssl_valid: None,
            ssl_expires_at: None,
            error_message: None,
        }
    }

    /// 网络/传输失败的结果：状态为 `down`，只带错误信息
    pub fn transport_failure(region: Region, error_message: String) -> Self {
        Self::new(region, CheckStatus::Down).with_error(error_message)
    }

    /// 设置响应时间
    pub fn with_response_time(mut self, response_time: Duration) -> Self {
        self.response_time_ms = Some(response_time.as_millis() as u64);
        self
    }

    /// 设置HTTP状态码
    pub fn with_http_status(mut self, http_status: u16) -> Self {
        self.http_status = Some(http_status);
        self
    }

    /// 设置证书有效性
    pub fn with_ssl_valid(mut self, ssl_valid: bool) -> Self {
        self.ssl_valid = Some(ssl_valid);
        self
    }

    /// 设置证书过期时间
    pub fn with_ssl_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.ssl_expires_at = Some(expires_at);
        self
    }

    /// 设置错误信息
    pub fn with_error(mut self, error_message: String) -> Self {
        self.error_message = Some(error_message);
        self
    }

    /// 转换为JSON字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从JSON字符串创建
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
