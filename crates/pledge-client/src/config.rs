//! Submission endpoint configuration.
//!
//! The endpoint is the only operator setting the submitter needs. Leaving it
//! unset is a valid configuration: every submission then fails fast.

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

/// Environment variable holding the endpoint URL.
pub const ENDPOINT_ENV: &str = "PLEDGE_ENDPOINT_URL";

/// Where submissions are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// `None` means submissions are not configured.
    ///
    /// Deserialized through [`parse_endpoint`], so a blank value is unset and
    /// only http(s) is accepted from every source.
    #[serde(default, deserialize_with = "deserialize_endpoint")]
    pub endpoint: Option<Url>,
}

impl SubmitConfig {
    /// A configuration posting to `endpoint`.
    pub fn with_endpoint(endpoint: Url) -> Self {
        Self {
            endpoint: Some(endpoint),
        }
    }

    /// A configuration with no endpoint.
    pub fn unconfigured() -> Self {
        Self { endpoint: None }
    }

    /// Build from a raw setting. Blank strings mean "not configured".
    pub fn from_setting(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: parse_endpoint(raw)?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }
}

/// Parse an endpoint setting. Blank is `Ok(None)`; only http(s) is accepted.
pub fn parse_endpoint(raw: &str) -> Result<Option<Url>, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let url = Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidUrl(trimmed.to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(Some(url)),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

fn deserialize_endpoint<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Url>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(raw) => parse_endpoint(&raw).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid endpoint URL {0:?}: {1}")]
    InvalidUrl(String, String),
    #[error("endpoint must use http or https, got {0:?}")]
    UnsupportedScheme(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_setting_is_unconfigured() {
        assert!(!SubmitConfig::from_setting("").unwrap().is_configured());
        assert!(!SubmitConfig::from_setting("   ").unwrap().is_configured());
    }

    #[test]
    fn https_setting_is_configured() {
        let cfg = SubmitConfig::from_setting(" https://script.example.com/exec ").unwrap();
        assert_eq!(
            cfg.endpoint.unwrap().as_str(),
            "https://script.example.com/exec"
        );
    }

    #[test]
    fn rejects_garbage_and_other_schemes() {
        assert!(matches!(
            parse_endpoint("not a url"),
            Err(ConfigError::InvalidUrl(..))
        ));
        assert!(matches!(
            parse_endpoint("ftp://example.com/drop"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn deserializes_missing_endpoint_as_none() {
        let cfg: SubmitConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, SubmitConfig::unconfigured());
    }

    #[test]
    fn deserialized_endpoint_follows_setting_rules() {
        let blank: SubmitConfig = serde_json::from_str(r#"{"endpoint":"  "}"#).unwrap();
        assert!(!blank.is_configured());
        let null: SubmitConfig = serde_json::from_str(r#"{"endpoint":null}"#).unwrap();
        assert!(!null.is_configured());
        let err = serde_json::from_str::<SubmitConfig>(r#"{"endpoint":"ftp://example.com/drop"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }
}
