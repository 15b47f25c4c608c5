//! 状态判定规则
//!
//! 纯函数，不做任何网络操作；探测器拿到原始信号后在这里归约为三值状态。

use crate::monitor::CheckStatus;
use std::time::Duration;

/// SSL Labs 的不合格评级
const FAILING_GRADE: &str = "F";

/// 根据HTTP状态码和延迟判定状态
///
/// 依次判断：5xx 为 `down`；4xx 或延迟超过阈值为 `degraded`；其余为 `up`。
/// 延迟按整毫秒比较，与结果中上报的 `response_time_ms` 一致。
pub fn classify_response(
    http_status: u16,
    latency: Duration,
    degraded_latency: Duration,
) -> CheckStatus {
    if http_status >= 500 {
        CheckStatus::Down
    } else if http_status >= 400 || latency.as_millis() > degraded_latency.as_millis() {
        CheckStatus::Degraded
    } else {
        CheckStatus::Up
    }
}

/// 关键字探测的状态判定
///
/// HTTP 层面的 `down`/`degraded` 优先于关键字结果；
/// 只有 HTTP 层面正常时，关键字缺失才会把状态变为 `down`。
pub fn classify_content(
    http_status: u16,
    latency: Duration,
    degraded_latency: Duration,
    keyword_found: bool,
) -> CheckStatus {
    match classify_response(http_status, latency, degraded_latency) {
        CheckStatus::Up if !keyword_found => CheckStatus::Down,
        status => status,
    }
}

/// 证书评级是否有效：评级存在、非空且不是 `F`
pub fn grade_is_valid(grade: Option<&str>) -> bool {
    matches!(grade, Some(grade) if !grade.is_empty() && grade != FAILING_GRADE)
}
