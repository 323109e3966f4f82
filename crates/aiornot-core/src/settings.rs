//! Service constants: base URL, environment variables, timeouts, and
//! per-kind batch concurrency defaults.

use std::time::Duration;

/// Production API base URL. Endpoints carry their own version prefix.
pub const DEFAULT_BASE_URL: &str = "https://api.aiornot.com";

/// Primary environment variable for the API key.
pub const API_KEY_ENV: &str = "AIORNOT_API_KEY";

/// Legacy environment variable, still honored.
pub const API_TOKEN_ENV: &str = "AIORNOT_API_TOKEN";

/// Overrides the base URL (staging/testing).
pub const BASE_URL_ENV: &str = "AIORNOT_BASE_URL";

/// Default timeout for content-analysis requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(180);

/// Timeout for the liveness probe.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout for token check/refresh/revoke.
pub const TOKEN_TIMEOUT: Duration = Duration::from_secs(10);

/// Default upload filename for audio submissions without one.
pub const DEFAULT_AUDIO_FILENAME: &str = "audio.mp3";

// Per-kind batch concurrency defaults. Video analysis is the most
// expensive backend operation, text the cheapest.
pub const IMAGE_BATCH_CONCURRENCY: usize = 5;
pub const VIDEO_BATCH_CONCURRENCY: usize = 2;
pub const VOICE_BATCH_CONCURRENCY: usize = 3;
pub const MUSIC_BATCH_CONCURRENCY: usize = 3;
pub const TEXT_BATCH_CONCURRENCY: usize = 10;

/// Resolve the base URL from the environment, falling back to production.
pub fn base_url_from_env() -> String {
    std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_has_no_version_suffix() {
        assert!(!DEFAULT_BASE_URL.ends_with("/v1"));
        assert!(!DEFAULT_BASE_URL.ends_with('/'));
    }
}
