//! ARN decomposition
//!
//! `arn:<partition>:<service>:<region>:<account>:[<type>(:|/)]<id>`. Secrets
//! Manager appends a random `-XXXXXX` suffix to secret ids; for
//! `resource_type == "secret"` it is split off into `resource_version`.

use crate::error::{AwsError, Result};
use regex::Regex;

const ARN_PATTERN: &str = r"^arn:(?P<partition>[^:]+):(?P<service>[^:]+):(?P<region>[^:]*):(?P<account_id>[^:]*):((?P<resource_type>[^:]*)[:/])?(?P<resource_id>.+)$";
const SECRET_ID_PATTERN: &str = r"^(?P<name>.*)-(?P<version>[^-]+)$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource_type: Option<String>,
    pub resource_id: String,
    pub resource_version: Option<String>,
}

pub fn parse_arn(arn: &str) -> Result<ParsedArn> {
    let arn_re = Regex::new(ARN_PATTERN)
        .map_err(|e| AwsError::InvalidArn(format!("pattern compile error: {e}")))?;

    let caps = arn_re
        .captures(arn)
        .ok_or_else(|| AwsError::InvalidArn(arn.to_string()))?;
    let group = |name: &str| {
        caps.name(name)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };

    let mut parsed = ParsedArn {
        partition: group("partition"),
        service: group("service"),
        region: group("region"),
        account_id: group("account_id"),
        resource_type: caps
            .name("resource_type")
            .map(|m| m.as_str())
            .filter(|t| !t.is_empty())
            .map(str::to_string),
        resource_id: group("resource_id"),
        resource_version: None,
    };

    if parsed.resource_type.as_deref() == Some("secret") {
        let secret_re = Regex::new(SECRET_ID_PATTERN)
            .map_err(|e| AwsError::InvalidArn(format!("pattern compile error: {e}")))?;
        let secret = secret_re
            .captures(&parsed.resource_id)
            .ok_or_else(|| AwsError::InvalidArn(format!("invalid secret id in {arn}")))?;

        let name = secret.name("name").map(|m| m.as_str().to_string());
        let version = secret.name("version").map(|m| m.as_str().to_string());
        if let Some(name) = name {
            parsed.resource_id = name;
        }
        parsed.resource_version = version;
    }

    Ok(parsed)
}
