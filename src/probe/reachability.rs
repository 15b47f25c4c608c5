//! 可达性探测（http/https）

use crate::config::ProbeSettings;
use crate::monitor::{CheckResult, Region};
use crate::probe::classify::classify_response;
use crate::probe::request::timed_get;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

/// 可达性探测器
///
/// 发送一次 GET 请求，根据状态码和延迟判定状态，不做重试。
#[derive(Debug, Clone)]
pub struct ReachabilityProbe {
    /// HTTP客户端
    client: Client,
    /// 探测参数
    settings: Arc<ProbeSettings>,
}

impl ReachabilityProbe {
    /// 创建新的可达性探测器
    pub fn new(client: Client, settings: Arc<ProbeSettings>) -> Self {
        Self { client, settings }
    }

    /// 执行探测
    ///
    /// # 参数
    /// * `url` - 目标URL
    /// * `region` - 区域，原样回显到结果中
    pub async fn check(&self, url: &str, region: Region) -> CheckResult {
        match timed_get(&self.client, url, &self.settings, false).await {
            Ok(response) => {
                let status = classify_response(
                    response.status,
                    response.latency,
                    self.settings.degraded_latency(),
                );
                debug!(
                    url,
                    http_status = response.status,
                    latency_ms = response.latency.as_millis() as u64,
                    %status,
                    "可达性探测完成"
                );

                CheckResult::new(region, status)
                    .with_response_time(response.latency)
                    .with_http_status(response.status)
            }
            Err(error_message) => {
                debug!(url, error = %error_message, "可达性探测失败");
                CheckResult::transport_failure(region, error_message)
            }
        }
    }
}
