//! 监控定义模块
//!
//! 提供调用请求、已校验的监控定义以及检测结果类型

pub mod result;
pub mod spec;

// 重新导出主要类型
pub use result::{CheckResult, CheckStatus};
pub use spec::{CheckRequest, MonitorKind, MonitorSpec, Region};
