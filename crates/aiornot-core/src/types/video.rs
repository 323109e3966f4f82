//! Video report response types (v2 endpoint).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{DeepfakeVideoReport, Prediction};

/// Metadata about the analyzed video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Duration in seconds
    pub duration: u64,
    pub total_bytes: u64,
    pub md5: String,
    /// Audio codec name
    pub audio: String,
    /// Video codec name
    pub video: String,
}

/// Video analysis report. Voice/music/deepfake tracks are optional:
/// absent when filtered out or when the video has no audio track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoReport {
    pub ai_video: Prediction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_voice: Option<Prediction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_music: Option<Prediction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deepfake_video: Option<DeepfakeVideoReport>,
    pub meta: VideoMetadata,
}

/// Full response from the video analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoReportResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub report: VideoReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl VideoReportResponse {
    pub fn ai_video_detected(&self) -> bool {
        self.report.ai_video.is_detected
    }

    pub fn ai_video_confidence(&self) -> f64 {
        self.report.ai_video.confidence
    }

    pub fn ai_voice_detected(&self) -> Option<bool> {
        self.report.ai_voice.as_ref().map(|p| p.is_detected)
    }

    pub fn ai_music_detected(&self) -> Option<bool> {
        self.report.ai_music.as_ref().map(|p| p.is_detected)
    }

    pub fn deepfake_detected(&self) -> Option<bool> {
        self.report.deepfake_video.as_ref().map(|r| r.is_detected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "vid_01",
        "report": {
            "ai_video": {"is_detected": true, "confidence": 0.87},
            "ai_voice": {"is_detected": false, "confidence": 0.10},
            "deepfake_video": {"is_detected": false, "confidence": 0.05, "no_faces_found": true},
            "meta": {
                "duration": 42,
                "total_bytes": 1048576,
                "md5": "deadbeef",
                "audio": "aac",
                "video": "h264"
            }
        }
    }"#;

    #[test]
    fn test_parse_video_response() {
        let resp: VideoReportResponse = serde_json::from_str(SAMPLE).unwrap();
        assert!(resp.ai_video_detected());
        assert_eq!(resp.ai_video_confidence(), 0.87);
        assert_eq!(resp.ai_voice_detected(), Some(false));
        assert_eq!(resp.ai_music_detected(), None);
        assert_eq!(resp.deepfake_detected(), Some(false));
        assert!(resp.report.deepfake_video.unwrap().no_faces_found);
        assert_eq!(resp.report.meta.duration, 42);
    }
}
