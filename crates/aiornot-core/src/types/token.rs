//! API token management response types.

use serde::{Deserialize, Serialize};

/// Result of checking the current token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenStatus {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl TokenStatus {
    /// Status for a token the service rejected outright.
    pub(crate) fn invalid() -> Self {
        Self {
            is_valid: false,
            expires_at: None,
        }
    }
}

/// A freshly rotated token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRefresh {
    pub token: String,
}

/// Acknowledgement of token revocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRevocation {
    pub is_revoked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_status_parses_expiry() {
        let status: TokenStatus =
            serde_json::from_str(r#"{"is_valid": true, "expires_at": "2025-01-01T00:00:00Z"}"#)
                .unwrap();
        assert!(status.is_valid);
        assert!(status.expires_at.is_some());
    }

    #[test]
    fn test_invalid_token_status() {
        let status = TokenStatus::invalid();
        assert!(!status.is_valid);
        assert!(status.expires_at.is_none());
    }
}
