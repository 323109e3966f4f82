//! Voice and music report response types (v1 endpoints).
//!
//! Both audio endpoints share one report shape; the response types stay
//! distinct so the batch and CLI layers can tell the kinds apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::Verdict;

/// Audio analysis report, shared by the voice and music endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioReport {
    pub verdict: Verdict,
    pub confidence: f64,
    /// Duration in seconds
    pub duration: u64,
    pub total_bytes: u64,
    pub md5: String,
}

/// Full response from the voice analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceReportResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub report: AudioReport,
}

impl VoiceReportResponse {
    pub fn verdict(&self) -> Verdict {
        self.report.verdict
    }

    pub fn confidence(&self) -> f64 {
        self.report.confidence
    }

    pub fn is_ai(&self) -> bool {
        self.report.verdict.is_ai()
    }
}

/// Full response from the music analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicReportResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub report: AudioReport,
}

impl MusicReportResponse {
    pub fn verdict(&self) -> Verdict {
        self.report.verdict
    }

    pub fn confidence(&self) -> f64 {
        self.report.confidence
    }

    pub fn is_ai(&self) -> bool {
        self.report.verdict.is_ai()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_music_response() {
        let resp: MusicReportResponse = serde_json::from_str(
            r#"{
                "id": "mus_01",
                "created_at": "2024-06-01T00:00:00Z",
                "report": {
                    "verdict": "ai",
                    "confidence": 0.91,
                    "duration": 180,
                    "total_bytes": 4096000,
                    "md5": "cafebabe"
                }
            }"#,
        )
        .unwrap();
        assert!(resp.is_ai());
        assert_eq!(resp.confidence(), 0.91);
        assert_eq!(resp.report.duration, 180);
    }

    #[test]
    fn test_parse_voice_response_human() {
        let resp: VoiceReportResponse = serde_json::from_str(
            r#"{
                "id": "voc_01",
                "report": {
                    "verdict": "human",
                    "confidence": 0.77,
                    "duration": 12,
                    "total_bytes": 96000,
                    "md5": "0123abcd"
                }
            }"#,
        )
        .unwrap();
        assert!(!resp.is_ai());
        assert_eq!(resp.verdict(), Verdict::Human);
    }
}
