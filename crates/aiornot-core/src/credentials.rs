//! API key resolution and storage.
//!
//! The key lives in `~/.aiornot/config.json` as `{"api_key": "..."}`;
//! the `AIORNOT_API_KEY` environment variable (or the legacy
//! `AIORNOT_API_TOKEN`) takes precedence. This module only reads and
//! writes the file — prompting and overwrite policy belong to callers.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AiornotError, Result};
use crate::settings::{API_KEY_ENV, API_TOKEN_ENV};

/// On-disk credential file schema. `api_token` is the legacy key name.
#[derive(Debug, Serialize, Deserialize)]
struct CredentialFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_token: Option<String>,
}

/// Default credential file location: `~/.aiornot/config.json`.
pub fn default_path() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home)
        })
        .join(".aiornot")
        .join("config.json")
}

/// Resolve the API key: environment first, then the config file.
pub fn resolve_api_key() -> Option<String> {
    env_api_key().or_else(|| load_from(&default_path()).ok().flatten())
}

/// The key from the environment, if set and non-empty.
pub fn env_api_key() -> Option<String> {
    for var in [API_KEY_ENV, API_TOKEN_ENV] {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

/// Read the key from a credential file. `Ok(None)` when the file does
/// not exist or holds no key.
pub fn load_from(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path).map_err(|e| AiornotError::File {
        path: path.to_path_buf(),
        message: format!("Failed to read {}: {e}", path.display()),
    })?;
    let file: CredentialFile =
        serde_json::from_str(&contents).map_err(|e| AiornotError::File {
            path: path.to_path_buf(),
            message: format!("Invalid credential file {}: {e}", path.display()),
        })?;
    Ok(file.api_key.or(file.api_token).filter(|key| !key.is_empty()))
}

/// Write the key to the default credential file, creating `~/.aiornot`.
pub fn save(api_key: &str) -> Result<PathBuf> {
    let path = default_path();
    save_to(&path, api_key)?;
    Ok(path)
}

/// Write the key to a specific credential file.
pub fn save_to(path: &Path, api_key: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AiornotError::File {
            path: parent.to_path_buf(),
            message: format!("Failed to create {}: {e}", parent.display()),
        })?;
    }
    let file = CredentialFile {
        api_key: Some(api_key.to_string()),
        api_token: None,
    };
    let contents = serde_json::to_string(&file).map_err(|e| AiornotError::Decode(e.to_string()))?;
    std::fs::write(path, contents).map_err(|e| AiornotError::File {
        path: path.to_path_buf(),
        message: format!("Failed to write {}: {e}", path.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".aiornot").join("config.json");
        save_to(&path, "sk-test-123").unwrap();
        assert_eq!(load_from(&path).unwrap().as_deref(), Some("sk-test-123"));
    }

    #[test]
    fn test_load_missing_file_is_none() {
        assert!(load_from(Path::new("/no/such/config.json"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_load_accepts_legacy_key_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_token": "legacy-key"}"#).unwrap();
        assert_eq!(load_from(&path).unwrap().as_deref(), Some("legacy-key"));
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(load_from(&path).is_err());
    }

    #[test]
    fn test_default_path_shape() {
        let path = default_path();
        assert!(path.ends_with(".aiornot/config.json"));
    }
}
