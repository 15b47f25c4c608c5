//! HTTP 调用入口
//!
//! 接收 JSON 格式的监控定义，校验后执行一次探测并返回检测结果。
//! 输入错误返回 4xx；探测结果无论 `up`/`degraded`/`down` 都以 200 返回。

pub mod handlers;

use crate::config::ServerConfig;
use crate::error::{ConfigError, Result, ValidationError};
use crate::probe::MonitorChecker;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    /// 检测执行者
    pub checker: Arc<dyn MonitorChecker>,
}

impl AppState {
    /// 创建新的路由状态
    pub fn new(checker: Arc<dyn MonitorChecker>) -> Self {
        Self { checker }
    }
}

/// 错误响应体
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// API错误
#[derive(Debug)]
pub struct ApiError {
    /// HTTP状态码
    pub status: StatusCode,
    /// 错误信息
    pub error: String,
    /// 详细信息
    pub message: Option<String>,
}

impl ApiError {
    /// 创建新的API错误
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: None,
        }
    }

    /// 附加详细信息
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// 不支持的请求方法
    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").with_message(message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// 处理器 panic 时返回结构化的 500 响应
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("请求处理发生panic: {}", message);
    ApiError::internal(message).into_response()
}

/// 创建路由
pub fn create_router(state: AppState) -> Router {
    let check_route = post(handlers::monitor_check).fallback(handlers::method_not_allowed);

    Router::new()
        .route("/", check_route.clone())
        .route("/monitor-check", check_route)
        .route("/health", get(handlers::health))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// 探测服务器
pub struct ProbeServer {
    /// 配置
    config: ServerConfig,
    /// 路由状态
    state: AppState,
}

impl ProbeServer {
    /// 创建新的探测服务器
    pub fn new(config: ServerConfig, checker: Arc<dyn MonitorChecker>) -> Self {
        Self {
            config,
            state: AppState::new(checker),
        }
    }

    /// 启动服务器，直到 `shutdown` 完成
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self
            .config
            .socket_addr()
            .map_err(ConfigError::ValidationError)?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("探测服务已启动: http://{}", addr);

        axum::serve(listener, create_router(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("探测服务已关闭");
        Ok(())
    }
}
