//! 可达性与关键字探测共用的请求逻辑

use crate::config::ProbeSettings;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// 带计时的响应
#[derive(Debug)]
pub(crate) struct TimedResponse {
    /// HTTP状态码
    pub status: u16,
    /// 从发送到收到响应头的耗时
    pub latency: Duration,
    /// 响应体（仅在需要时读取）
    pub body: Option<String>,
}

/// 发送带超时的 GET 请求
///
/// 超时覆盖整个请求生命周期（包括读取响应体），超时后请求被取消。
/// 任何传输层失败都以描述文本的形式返回。
pub(crate) async fn timed_get(
    client: &Client,
    url: &str,
    settings: &ProbeSettings,
    read_body: bool,
) -> Result<TimedResponse, String> {
    let request = client.get(url).header(USER_AGENT, &settings.user_agent);
    let deadline = settings.request_timeout();

    let exchange = async move {
        let start_time = Instant::now();
        let response = request.send().await?;
        let latency = start_time.elapsed();
        let status = response.status().as_u16();

        let body = if read_body {
            Some(response.text().await?)
        } else {
            None
        };

        Ok::<_, reqwest::Error>(TimedResponse {
            status,
            latency,
            body,
        })
    };

    match timeout(deadline, exchange).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(e)) => Err(describe_transport_error(&e)),
        Err(_) => Err(format!(
            "Request timeout after {}s",
            deadline.as_secs_f64()
        )),
    }
}

/// 格式化请求错误信息，使其更加清晰易读
pub(crate) fn describe_transport_error(error: &reqwest::Error) -> String {
    let detail = error_chain(error);

    if error.is_timeout() {
        format!("Request timeout: {}", detail)
    } else if error.is_builder() {
        format!("Invalid request: {}", detail)
    } else if error.is_connect() {
        let lower = detail.to_lowercase();
        if lower.contains("dns") || lower.contains("resolve") || lower.contains("lookup") {
            format!("DNS resolution failed: {}", detail)
        } else if lower.contains("certificate") || lower.contains("tls") || lower.contains("ssl")
        {
            format!("SSL/TLS handshake failed: {}", detail)
        } else {
            format!("Connection failed: {}", detail)
        }
    } else if error.is_decode() || error.is_body() {
        format!("Response decode error: {}", detail)
    } else {
        format!("Request failed: {}", detail)
    }
}

/// 拼接错误及其全部来源
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("connect")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let message = error_chain(&Outer(io));
        assert_eq!(message, "connect: refused");
    }

    #[tokio::test]
    async fn test_invalid_url_is_described() {
        let client = Client::new();
        let settings = ProbeSettings::default();

        let error = timed_get(&client, "not a url", &settings, false)
            .await
            .unwrap_err();
        assert!(!error.is_empty());
    }
}
