//! Image report response types (v2 endpoint).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{
    AiGeneratedReport, DeepfakeReport, NsfwReport, QualityReport, ReverseSearchReport,
};
use super::enums::{ReportStatus, Verdict};

/// Metadata about the analyzed image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(default)]
    pub processing_status: HashMap<String, ReportStatus>,
}

/// Image analysis report: one optional sub-report per facet.
///
/// Facets excluded via `only`/`excluding` filters come back as `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_generated: Option<AiGeneratedReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deepfake: Option<DeepfakeReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<NsfwReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_search: Option<ReverseSearchReport>,
    #[serde(default)]
    pub meta: ImageMetadata,
}

/// Full response from the image analysis endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageReportResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub report: ImageReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl ImageReportResponse {
    /// AI-detection verdict, when the ai_generated facet ran.
    pub fn verdict(&self) -> Option<Verdict> {
        self.report.ai_generated.as_ref().map(|r| r.verdict)
    }

    /// AI-detection confidence, when the ai_generated facet ran.
    pub fn confidence(&self) -> Option<f64> {
        self.report.ai_generated.as_ref().map(|r| r.ai.confidence)
    }

    pub fn is_ai(&self) -> bool {
        self.verdict() == Some(Verdict::Ai)
    }

    pub fn is_deepfake(&self) -> bool {
        self.report
            .deepfake
            .as_ref()
            .map(|r| r.is_detected)
            .unwrap_or(false)
    }

    pub fn is_nsfw(&self) -> bool {
        self.report
            .nsfw
            .as_ref()
            .map(|r| r.is_detected)
            .unwrap_or(false)
    }
}
