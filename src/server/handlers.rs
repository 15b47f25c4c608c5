//! 路由处理函数

use super::{ApiError, AppState};
use crate::monitor::{CheckRequest, CheckResult, MonitorSpec};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::warn;

/// 执行一次监控检测
///
/// 请求体按 JSON 解析，不检查 `Content-Type`。校验失败时不会发起任何探测。
pub async fn monitor_check(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CheckResult>, ApiError> {
    let request: CheckRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("请求体解析失败: {}", e);
        ApiError::new(StatusCode::BAD_REQUEST, "Invalid request body").with_message(e.to_string())
    })?;

    let spec = MonitorSpec::try_from(request).map_err(|e| {
        warn!("请求校验失败: {}", e);
        ApiError::from(e)
    })?;

    let result = state.checker.check(&spec).await?;
    Ok(Json(result))
}

/// 不支持的请求方法
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// 存活检查
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "name": crate::APP_NAME,
        "version": crate::VERSION,
    }))
}
