//! 探测分派
//!
//! 按监控类型选择探测策略。每次调用最多发出一次外部请求，不重试。

use crate::config::ProbeSettings;
use crate::error::{Result, ValidationError};
use crate::monitor::{CheckRequest, CheckResult, MonitorKind, MonitorSpec};
use crate::probe::{CertificateProbe, ContentMatchProbe, ReachabilityProbe};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// 监控检测接口
#[async_trait]
pub trait MonitorChecker: Send + Sync {
    /// 对已校验的监控定义执行一次检测
    ///
    /// 只有输入不合法时才返回错误；探测失败总是以 `CheckResult` 返回。
    async fn check(&self, spec: &MonitorSpec) -> std::result::Result<CheckResult, ValidationError>;

    /// 校验原始调用请求并执行检测
    async fn check_request(
        &self,
        request: CheckRequest,
    ) -> std::result::Result<CheckResult, ValidationError> {
        let spec = MonitorSpec::try_from(request)?;
        self.check(&spec).await
    }
}

/// 探测器
#[derive(Debug, Clone)]
pub struct Prober {
    reachability: ReachabilityProbe,
    certificate: CertificateProbe,
    content: ContentMatchProbe,
}

impl Prober {
    /// 创建新的探测器
    ///
    /// 客户端在进程内共享；超时由各探测自行控制，因此客户端本身不设超时。
    pub fn new(settings: ProbeSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()?;

        Ok(Self::with_client(client, settings))
    }

    /// 使用已有的HTTP客户端创建探测器
    pub fn with_client(client: Client, settings: ProbeSettings) -> Self {
        let settings = Arc::new(settings);
        Self {
            reachability: ReachabilityProbe::new(client.clone(), Arc::clone(&settings)),
            certificate: CertificateProbe::new(client.clone(), Arc::clone(&settings)),
            content: ContentMatchProbe::new(client, settings),
        }
    }
}

#[async_trait]
impl MonitorChecker for Prober {
    async fn check(&self, spec: &MonitorSpec) -> std::result::Result<CheckResult, ValidationError> {
        spec.validate()?;

        let start_time = Instant::now();
        let result = match spec.kind {
            MonitorKind::Http | MonitorKind::Https => {
                self.reachability.check(&spec.url, spec.region).await
            }
            MonitorKind::Ssl => self.certificate.check(&spec.url, spec.region).await,
            MonitorKind::Keyword => {
                self.content
                    .check(&spec.url, spec.keyword()?, spec.region)
                    .await
            }
        };

        info!(
            monitor_id = %spec.monitor_id,
            project_id = %spec.project_id,
            kind = %spec.kind,
            region = %spec.region,
            status = %result.status,
            response_time_ms = ?result.response_time_ms,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "监控检测完成"
        );

        Ok(result)
    }
}
