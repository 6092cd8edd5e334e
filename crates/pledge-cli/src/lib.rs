//! # pledge-cli: Operator CLI for the Acknowledgement Form
//!
//! Drives the form controller headless, with a JSON file standing in for the
//! page.
//!
//! ## Subcommands
//!
//! - `pledge describe`: Classify a user-agent string.
//! - `pledge reference-id`: Mint a reference id.
//! - `pledge submit`: Validate and submit a filled-in form.
//! - `pledge draft`: Show, save, or clear the stored draft.
//! - `pledge receipt`: Render the printable receipt to a file.
//!
//! ```bash
//! PLEDGE_ENDPOINT_URL=https://script.example.com/exec \
//!     pledge submit --answers answers.json --receipt receipt.html
//! ```

pub mod describe;
pub mod draft;
pub mod receipt;
pub mod submit;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pledge_core::{FormSnapshot, MemoryForm};
use pledge_form::FormConfig;
use pledge_store::FileStore;

/// Draft directory used when neither the config nor the environment names one.
pub const DEFAULT_STORE_DIR: &str = ".pledge";

/// Resolve configuration: defaults, then `config_file`, then the environment.
pub fn load_config(config_file: Option<&Path>) -> Result<FormConfig> {
    let config = match config_file {
        Some(path) => FormConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?
            .overlay_env(),
        None => FormConfig::from_env(),
    };
    config.context("invalid PLEDGE_* environment configuration")
}

/// Open the file-backed draft store named by `config`.
pub fn open_store(config: &FormConfig) -> Result<FileStore> {
    let dir = config
        .store_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR));
    FileStore::open(&dir).with_context(|| format!("failed to open draft store: {}", dir.display()))
}

/// Read a form snapshot from a JSON answers file.
pub fn read_answers(path: &Path) -> Result<MemoryForm> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers: {}", path.display()))?;
    let snapshot: FormSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers: {}", path.display()))?;
    Ok(MemoryForm::from_snapshot(&snapshot))
}

/// A single-threaded runtime for the one async call a subcommand makes.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pledge_core::{FieldName, FormSurface};

    #[test]
    fn reads_answers_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(
            &path,
            r#"{"fields":{"studentName":"Ada Reyes","bogus":"x"},"finalAgreement":true}"#,
        )
        .unwrap();
        let form = read_answers(&path).unwrap();
        assert_eq!(form.get(FieldName::StudentName).as_deref(), Some("Ada Reyes"));
        assert_eq!(form.agreement(), Some(true));
    }

    #[test]
    fn malformed_answers_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, "not json").unwrap();
        let err = read_answers(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse answers"));
    }

    #[test]
    fn config_file_feeds_store_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store_dir = dir.path().join("drafts");
        let path = dir.path().join("pledge.yaml");
        std::fs::write(&path, format!("store_dir: {}\n", store_dir.display())).unwrap();
        let config = FormConfig::from_yaml_file(&path).unwrap();
        let store = open_store(&config).unwrap();
        assert_eq!(store.root(), store_dir.as_path());
        assert!(store_dir.is_dir());
    }
}
