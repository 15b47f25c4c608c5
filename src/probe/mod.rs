//! 探测模块
//!
//! 三种相互独立的探测策略（可达性、证书、关键字匹配），
//! 以及按监控类型分派探测的 `Prober`。

pub mod certificate;
pub mod classify;
pub mod content;
pub mod prober;
pub mod reachability;
mod request;

// 重新导出主要类型
pub use certificate::{CertificateProbe, CertificateTarget};
pub use classify::{classify_content, classify_response, grade_is_valid};
pub use content::ContentMatchProbe;
pub use prober::{MonitorChecker, Prober};
pub use reachability::ReachabilityProbe;
