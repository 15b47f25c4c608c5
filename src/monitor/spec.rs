//! 监控定义与调用参数校验
//!
//! `CheckRequest` 是调用方传入的原始数据，所有字段都可能缺失；
//! `MonitorSpec` 是校验通过后的监控定义，探测器只接受后者。

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 监控类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorKind {
    /// HTTP 可达性
    Http,
    /// HTTPS 可达性
    Https,
    /// SSL 证书
    Ssl,
    /// 关键字匹配
    Keyword,
}

impl MonitorKind {
    /// 线上格式的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitorKind::Http => "http",
            MonitorKind::Https => "https",
            MonitorKind::Ssl => "ssl",
            MonitorKind::Keyword => "keyword",
        }
    }
}

impl fmt::Display for MonitorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonitorKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(MonitorKind::Http),
            "https" => Ok(MonitorKind::Https),
            "ssl" => Ok(MonitorKind::Ssl),
            "keyword" => Ok(MonitorKind::Keyword),
            other => Err(ValidationError::InvalidKind(other.to_string())),
        }
    }
}

/// 探测发起区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    /// 欧洲
    Eu,
    /// 美国
    Us,
    /// 亚洲
    Asia,
}

impl Region {
    /// 线上格式的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Eu => "EU",
            Region::Us => "US",
            Region::Asia => "ASIA",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EU" => Ok(Region::Eu),
            "US" => Ok(Region::Us),
            "ASIA" => Ok(Region::Asia),
            other => Err(ValidationError::InvalidRegion(other.to_string())),
        }
    }
}

/// 调用请求（未校验）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// 监控ID
    pub monitor_id: Option<String>,
    /// 所属项目ID
    pub project_id: Option<String>,
    /// 显示名称
    pub name: Option<String>,
    /// 监控类型
    pub kind: Option<String>,
    /// 目标URL
    pub url: Option<String>,
    /// 关键字（仅关键字监控）
    pub keyword: Option<String>,
    /// 区域
    pub region: Option<String>,
}

/// 已校验的监控定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSpec {
    /// 监控ID
    pub monitor_id: String,
    /// 所属项目ID
    #[serde(default)]
    pub project_id: String,
    /// 显示名称
    #[serde(default)]
    pub name: String,
    /// 监控类型
    pub kind: MonitorKind,
    /// 目标URL
    pub url: String,
    /// 关键字
    #[serde(default)]
    pub keyword: Option<String>,
    /// 区域
    pub region: Region,
}

impl MonitorSpec {
    /// 校验监控定义
    ///
    /// 直接构造的 `MonitorSpec` 在探测前也要经过同样的检查。
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.monitor_id.is_empty() || self.url.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if self.kind == MonitorKind::Keyword {
            self.keyword()?;
        }
        Ok(())
    }

    /// 获取关键字监控的关键字
    pub fn keyword(&self) -> Result<&str, ValidationError> {
        self.keyword
            .as_deref()
            .filter(|keyword| !keyword.is_empty())
            .ok_or(ValidationError::MissingKeyword)
    }
}

/// 空字符串视为缺失
fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

impl TryFrom<CheckRequest> for MonitorSpec {
    type Error = ValidationError;

    fn try_from(request: CheckRequest) -> Result<Self, Self::Error> {
        let (Some(monitor_id), Some(url), Some(kind), Some(region)) = (
            present(request.monitor_id),
            present(request.url),
            present(request.kind),
            present(request.region),
        ) else {
            return Err(ValidationError::MissingFields);
        };

        let kind: MonitorKind = kind.parse()?;
        let region: Region = region.parse()?;

        let spec = MonitorSpec {
            monitor_id,
            project_id: request.project_id.unwrap_or_default(),
            name: request.name.unwrap_or_default(),
            kind,
            url,
            keyword: present(request.keyword),
            region,
        };
        spec.validate()?;

        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_request(kind: &str) -> CheckRequest {
        CheckRequest {
            monitor_id: Some("mon_1".to_string()),
            project_id: Some("proj_1".to_string()),
            name: Some("Homepage".to_string()),
            kind: Some(kind.to_string()),
            url: Some("https://example.com".to_string()),
            keyword: None,
            region: Some("EU".to_string()),
        }
    }

    #[test]
    fn test_valid_http_request() {
        let spec = MonitorSpec::try_from(create_test_request("http")).unwrap();
        assert_eq!(spec.kind, MonitorKind::Http);
        assert_eq!(spec.region, Region::Eu);
        assert_eq!(spec.project_id, "proj_1");
        assert!(spec.keyword.is_none());
    }

    #[test]
    fn test_missing_url_rejected() {
        let mut request = create_test_request("http");
        request.url = None;
        assert_eq!(
            MonitorSpec::try_from(request),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_empty_required_field_rejected() {
        let mut request = create_test_request("https");
        request.monitor_id = Some(String::new());
        assert_eq!(
            MonitorSpec::try_from(request),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_missing_optional_fields_accepted() {
        let mut request = create_test_request("ssl");
        request.project_id = None;
        request.name = None;
        let spec = MonitorSpec::try_from(request).unwrap();
        assert_eq!(spec.project_id, "");
        assert_eq!(spec.name, "");
    }

    #[test]
    fn test_keyword_required_for_keyword_kind() {
        let request = create_test_request("keyword");
        assert_eq!(
            MonitorSpec::try_from(request),
            Err(ValidationError::MissingKeyword)
        );

        let mut request = create_test_request("keyword");
        request.keyword = Some(String::new());
        assert_eq!(
            MonitorSpec::try_from(request),
            Err(ValidationError::MissingKeyword)
        );

        let mut request = create_test_request("keyword");
        request.keyword = Some("OK".to_string());
        let spec = MonitorSpec::try_from(request).unwrap();
        assert_eq!(spec.keyword(), Ok("OK"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let request = create_test_request("ping");
        assert_eq!(
            MonitorSpec::try_from(request),
            Err(ValidationError::InvalidKind("ping".to_string()))
        );
    }

    #[test]
    fn test_kind_is_case_sensitive() {
        assert!("HTTP".parse::<MonitorKind>().is_err());
        assert_eq!("https".parse::<MonitorKind>(), Ok(MonitorKind::Https));
    }

    #[test]
    fn test_unknown_region_rejected() {
        let mut request = create_test_request("http");
        request.region = Some("AFRICA".to_string());
        assert_eq!(
            MonitorSpec::try_from(request),
            Err(ValidationError::InvalidRegion("AFRICA".to_string()))
        );
    }

    #[test]
    fn test_region_wire_format() {
        for region in [Region::Eu, Region::Us, Region::Asia] {
            let json = serde_json::to_string(&region).unwrap();
            assert_eq!(json, format!("\"{}\"", region));
            assert_eq!(region.as_str().parse::<Region>(), Ok(region));
        }
    }

    #[test]
    fn test_request_deserialization_with_missing_fields() {
        let request: CheckRequest =
            serde_json::from_str(r#"{"monitor_id": "m", "kind": "http", "keyword": null}"#)
                .unwrap();
        assert_eq!(request.monitor_id.as_deref(), Some("m"));
        assert!(request.url.is_none());
        assert!(request.keyword.is_none());
    }

    #[test]
    fn test_directly_built_spec_validation() {
        let spec = MonitorSpec {
            monitor_id: "mon_1".to_string(),
            project_id: String::new(),
            name: String::new(),
            kind: MonitorKind::Keyword,
            url: "https://example.com".to_string(),
            keyword: None,
            region: Region::Us,
        };
        assert_eq!(spec.validate(), Err(ValidationError::MissingKeyword));
    }
}
