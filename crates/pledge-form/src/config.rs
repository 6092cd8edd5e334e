//! Form controller configuration.
//!
//! One explicit struct handed to [`FormController::new`]. The endpoint is
//! `Option<Url>`: absent is a valid setting that makes every submission fail
//! fast.
//!
//! Sources, lowest precedence first: defaults, a YAML file, the environment.
//! The CLI applies its own flags on top.
//!
//! ```yaml
//! endpoint: https://script.google.com/macros/s/XXXX/exec
//! reference_prefix: ACK
//! store_dir: ./.pledge
//! trigger_label: Submit Acknowledgement
//! ```
//!
//! [`FormController::new`]: crate::FormController::new

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use pledge_client::config::{parse_endpoint, ConfigError, ENDPOINT_ENV};
use pledge_client::SubmitConfig;
use pledge_core::DEFAULT_REFERENCE_PREFIX;
use pledge_state::DEFAULT_TRIGGER_LABEL;

/// Environment variable overriding the reference id prefix.
pub const PREFIX_ENV: &str = "PLEDGE_REFERENCE_PREFIX";
/// Environment variable overriding the draft store directory.
pub const STORE_DIR_ENV: &str = "PLEDGE_STORE_DIR";

/// Everything the controller needs from the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    #[serde(flatten)]
    pub submit: SubmitConfig,
    /// Prefix of minted reference ids.
    pub reference_prefix: String,
    /// Directory of the file-backed draft store, when one is used.
    pub store_dir: Option<PathBuf>,
    /// Idle label of the submit trigger.
    pub trigger_label: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit: SubmitConfig::unconfigured(),
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
            store_dir: None,
            trigger_label: DEFAULT_TRIGGER_LABEL.to_string(),
        }
    }
}

impl FormConfig {
    /// Defaults with `endpoint` configured.
    pub fn with_endpoint(endpoint: Url) -> Self {
        Self {
            submit: SubmitConfig::with_endpoint(endpoint),
            ..Self::default()
        }
    }

    /// The configured endpoint, if any.
    pub fn endpoint(&self) -> Option<&Url> {
        self.submit.endpoint.as_ref()
    }

    /// Load a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, FormConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FormConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&raw)?;
        config.validated()
    }

    /// Defaults overlaid with the environment.
    pub fn from_env() -> Result<Self, FormConfigError> {
        Self::default().overlay_env()
    }

    /// Apply `PLEDGE_*` environment variables on top of `self`.
    ///
    /// A blank `PLEDGE_ENDPOINT_URL` explicitly clears the endpoint.
    pub fn overlay_env(mut self) -> Result<Self, FormConfigError> {
        if let Ok(raw) = std::env::var(ENDPOINT_ENV) {
            self.submit.endpoint = parse_endpoint(&raw)?;
        }
        if let Ok(prefix) = std::env::var(PREFIX_ENV) {
            self.reference_prefix = prefix;
        }
        if let Ok(dir) = std::env::var(STORE_DIR_ENV) {
            self.store_dir = (!dir.trim().is_empty()).then(|| PathBuf::from(dir));
        }
        self.validated()
    }

    fn validated(self) -> Result<Self, FormConfigError> {
        validate_prefix(&self.reference_prefix)?;
        Ok(self)
    }
}

/// Reference id prefixes are upper-case letters, digits, or `-`.
pub fn validate_prefix(prefix: &str) -> Result<(), FormConfigError> {
    let ok = !prefix.is_empty()
        && prefix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-');
    if !ok {
        return Err(FormConfigError::InvalidPrefix(prefix.to_string()));
    }
    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum FormConfigError {
    #[error(transparent)]
    Endpoint(#[from] ConfigError),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("reference prefix must be upper-case letters, digits, or '-': {0:?}")]
    InvalidPrefix(String),
}
