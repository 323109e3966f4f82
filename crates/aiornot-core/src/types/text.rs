//! Text report response types (v2 endpoint).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about the analyzed text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextMetadata {
    pub word_count: u64,
    pub character_count: u64,
    pub token_count: u64,
    pub md5: String,
}

/// AI text detection report. Annotations are `(block, confidence)` pairs,
/// present only when requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiTextReport {
    pub is_detected: bool,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<(String, f64)>>,
}

/// Text analysis report wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextReport {
    pub ai_text: AiTextReport,
}

/// Full response from the text analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextReportResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub report: TextReport,
    pub metadata: TextMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl TextReportResponse {
    pub fn is_detected(&self) -> bool {
        self.report.ai_text.is_detected
    }

    pub fn confidence(&self) -> f64 {
        self.report.ai_text.confidence
    }

    pub fn is_ai(&self) -> bool {
        self.is_detected()
    }

    pub fn annotations(&self) -> Option<&[(String, f64)]> {
        self.report.ai_text.annotations.as_deref()
    }
}
