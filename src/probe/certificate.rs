//! SSL 证书探测
//!
//! 不直接检查证书链，而是查询 SSL Labs 对目标主机的缓存评级。

use crate::config::ProbeSettings;
use crate::monitor::{CheckResult, CheckStatus, Region};
use crate::probe::classify::grade_is_valid;
use crate::probe::request::describe_transport_error;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// SSL Labs 评估完成时的状态值
const READY_STATUS: &str = "READY";

/// 证书探测的目标主机
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateTarget {
    /// 主机名
    pub host: String,
    /// 端口（URL 未指定时 https 为 443，其余为 80）
    pub port: u16,
}

impl CertificateTarget {
    /// 从目标URL中解析主机名和端口
    pub fn from_url(url: &str) -> Result<Self, String> {
        let parsed = Url::parse(url).map_err(|e| format!("Invalid URL: {}", e))?;
        let host = parsed
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| format!("Invalid URL: {} has no host", url))?
            .to_string();
        let port = parsed
            .port()
            .unwrap_or(if parsed.scheme() == "https" { 443 } else { 80 });

        Ok(Self { host, port })
    }
}

/// `GET /analyze` 的响应
#[derive(Debug, Deserialize)]
pub struct AnalyzeReport {
    /// 评估状态
    pub status: Option<String>,
    /// 各端点评估结果
    pub endpoints: Option<Vec<EndpointReport>>,
}

/// 单个端点的评估结果
#[derive(Debug, Deserialize)]
pub struct EndpointReport {
    /// 评级
    pub grade: Option<String>,
    /// 详细信息
    pub details: Option<EndpointDetails>,
}

/// 端点详细信息
#[derive(Debug, Deserialize)]
pub struct EndpointDetails {
    /// 证书信息
    pub cert: Option<CertDetails>,
}

/// 证书信息
#[derive(Debug, Deserialize)]
pub struct CertDetails {
    /// 过期时间，SSL Labs 使用毫秒时间戳
    #[serde(rename = "notAfter")]
    pub not_after: Option<serde_json::Value>,
}

impl AnalyzeReport {
    /// 评估完成时的第一个端点
    fn ready_endpoint(&self) -> Option<&EndpointReport> {
        if self.status.as_deref() != Some(READY_STATUS) {
            return None;
        }
        self.endpoints.as_ref()?.first()
    }

    /// 把评估报告归约为检测结果
    pub fn into_result(self, region: Region) -> CheckResult {
        let Some(endpoint) = self.ready_endpoint() else {
            return CheckResult::new(region, CheckStatus::Degraded)
                .with_error("SSL Labs API did not return valid data".to_string());
        };

        let ssl_valid = grade_is_valid(endpoint.grade.as_deref());
        let status = if ssl_valid {
            CheckStatus::Up
        } else {
            CheckStatus::Down
        };

        let mut result = CheckResult::new(region, status).with_ssl_valid(ssl_valid);

        if let Some(expires_at) = endpoint.expires_at() {
            result = result.with_ssl_expires_at(expires_at);
        }
        if !ssl_valid {
            result = result.with_error("SSL certificate is invalid or expired".to_string());
        }

        result
    }
}

impl EndpointReport {
    /// 证书过期时间
    fn expires_at(&self) -> Option<DateTime<Utc>> {
        let not_after = self.details.as_ref()?.cert.as_ref()?.not_after.as_ref()?;
        parse_timestamp(not_after)
    }
}

/// 解析毫秒时间戳或 RFC 3339 字符串
fn parse_timestamp(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::Number(millis) => DateTime::from_timestamp_millis(millis.as_i64()?),
        serde_json::Value::String(text) => match text.parse::<i64>() {
            Ok(millis) => DateTime::from_timestamp_millis(millis),
            Err(_) => DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|time| time.with_timezone(&Utc)),
        },
        _ => None,
    }
}

/// 证书探测器
#[derive(Debug, Clone)]
pub struct CertificateProbe {
    /// HTTP客户端
    client: Client,
    /// 探测参数
    settings: Arc<ProbeSettings>,
}

impl CertificateProbe {
    /// 创建新的证书探测器
    pub fn new(client: Client, settings: Arc<ProbeSettings>) -> Self {
        Self { client, settings }
    }

    /// 执行探测
    ///
    /// 请求 SSL Labs 时不设置额外超时，依赖客户端本身的行为。
    pub async fn check(&self, url: &str, region: Region) -> CheckResult {
        match self.fetch_report(url).await {
            Ok(report) => {
                let result = report.into_result(region);
                debug!(url, status = %result.status, ssl_valid = ?result.ssl_valid, "证书探测完成");
                result
            }
            Err(error_message) => {
                debug!(url, error = %error_message, "证书探测失败");
                CheckResult::transport_failure(region, error_message)
            }
        }
    }

    /// 查询 SSL Labs 缓存的评估结果
    async fn fetch_report(&self, url: &str) -> Result<AnalyzeReport, String> {
        let target = CertificateTarget::from_url(url)?;
        // 端口只用于日志，SSL Labs 按主机名评估
        debug!(host = %target.host, port = target.port, "查询SSL Labs评估结果");

        let endpoint = format!(
            "{}/analyze",
            self.settings.ssl_labs_api_url.trim_end_matches('/')
        );

        let response = self
            .client
            .get(&endpoint)
            .query(&[
                ("host", target.host.as_str()),
                ("publish", "off"),
                ("fromCache", "on"),
                ("maxAge", "1"),
            ])
            .send()
            .await
            .map_err(|e| describe_transport_error(&e))?;

        response
            .json::<AnalyzeReport>()
            .await
            .map_err(|e| describe_transport_error(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn parse_report(json: &str) -> AnalyzeReport {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_target_from_url() {
        let target = CertificateTarget::from_url("https://example.com/path?q=1").unwrap();
        assert_eq!(target.host, "example.com");
        assert_eq!(target.port, 443);

        let target = CertificateTarget::from_url("http://example.com").unwrap();
        assert_eq!(target.port, 80);

        let target = CertificateTarget::from_url("https://example.com:8443").unwrap();
        assert_eq!(target.port, 8443);
    }

    #[test]
    fn test_target_from_invalid_url() {
        assert!(CertificateTarget::from_url("example.com").is_err());
        assert!(CertificateTarget::from_url("").is_err());
    }

    #[test]
    fn test_ready_with_passing_grade() {
        let report = parse_report(r#"{"status": "READY", "endpoints": [{"grade": "A"}]}"#);
        let result = report.into_result(Region::Eu);

        assert_eq!(result.status, CheckStatus::Up);
        assert_eq!(result.ssl_valid, Some(true));
        assert!(result.error_message.is_none());
        assert!(result.ssl_expires_at.is_none());
        assert_eq!(result.region, Region::Eu);
    }

    #[test]
    fn test_ready_with_failing_grade() {
        let report = parse_report(r#"{"status": "READY", "endpoints": [{"grade": "F"}]}"#);
        let result = report.into_result(Region::Us);

        assert_eq!(result.status, CheckStatus::Down);
        assert_eq!(result.ssl_valid, Some(false));
        assert_eq!(
            result.error_message.as_deref(),
            Some("SSL certificate is invalid or expired")
        );
    }

    #[test]
    fn test_ready_without_grade_is_invalid() {
        let report = parse_report(r#"{"status": "READY", "endpoints": [{}]}"#);
        let result = report.into_result(Region::Asia);

        assert_eq!(result.status, CheckStatus::Down);
        assert_eq!(result.ssl_valid, Some(false));
    }

    #[test]
    fn test_only_first_endpoint_counts() {
        let report = parse_report(
            r#"{"status": "READY", "endpoints": [{"grade": "B"}, {"grade": "F"}]}"#,
        );
        assert_eq!(report.into_result(Region::Eu).status, CheckStatus::Up);
    }

    #[test]
    fn test_expiry_from_millis() {
        let report = parse_report(
            r#"{
                "status": "READY",
                "endpoints": [{"grade": "A+", "details": {"cert": {"notAfter": 1798761600000}}}]
            }"#,
        );
        let result = report.into_result(Region::Eu);

        assert_eq!(
            result.ssl_expires_at,
            Some(Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_expiry_from_rfc3339_string() {
        let value = serde_json::json!("2027-01-01T00:00:00Z");
        assert_eq!(
            parse_timestamp(&value),
            Some(Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp(&serde_json::json!(true)), None);
    }

    #[test]
    fn test_not_ready_is_degraded() {
        for json in [
            r#"{"status": "IN_PROGRESS"}"#,
            r#"{"status": "READY", "endpoints": []}"#,
            r#"{"status": "READY", "endpoints": null}"#,
            r#"{"errors": [{"message": "Running at full capacity"}]}"#,
        ] {
            let result = parse_report(json).into_result(Region::Eu);
            assert_eq!(result.status, CheckStatus::Degraded, "{}", json);
            assert_eq!(
                result.error_message.as_deref(),
                Some("SSL Labs API did not return valid data")
            );
            assert!(result.ssl_valid.is_none());
        }
    }
}
