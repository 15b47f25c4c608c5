//! 关键字内容匹配探测

use crate::config::ProbeSettings;
use crate::monitor::{CheckResult, Region};
use crate::probe::classify::classify_content;
use crate::probe::request::timed_get;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

/// 关键字匹配探测器
///
/// 请求方式与可达性探测相同，额外读取完整响应体并检查关键字是否出现（字面子串匹配）。
#[derive(Debug, Clone)]
pub struct ContentMatchProbe {
    /// HTTP客户端
    client: Client,
    /// 探测参数
    settings: Arc<ProbeSettings>,
}

impl ContentMatchProbe {
    /// 创建新的关键字匹配探测器
    pub fn new(client: Client, settings: Arc<ProbeSettings>) -> Self {
        Self { client, settings }
    }

    /// 执行探测
    ///
    /// 关键字缺失时总会带上错误信息，与最终状态无关。
    pub async fn check(&self, url: &str, keyword: &str, region: Region) -> CheckResult {
        let response = match timed_get(&self.client, url, &self.settings, true).await {
            Ok(response) => response,
            Err(error_message) => {
                debug!(url, error = %error_message, "关键字探测失败");
                return CheckResult::transport_failure(region, error_message);
            }
        };

        let keyword_found = response
            .body
            .as_deref()
            .is_some_and(|body| body.contains(keyword));
        let status = classify_content(
            response.status,
            response.latency,
            self.settings.degraded_latency(),
            keyword_found,
        );
        debug!(
            url,
            keyword,
            keyword_found,
            http_status = response.status,
            %status,
            "关键字探测完成"
        );

        let result = CheckResult::new(region, status)
            .with_response_time(response.latency)
            .with_http_status(response.status);

        if keyword_found {
            result
        } else {
            result.with_error(format!("Keyword \"{}\" not found in response", keyword))
        }
    }
}
