//! Report building blocks shared across content kinds.

use serde::{Deserialize, Serialize};

use super::enums::Verdict;

/// A detection flag with its confidence score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub is_detected: bool,
    pub confidence: f64,
}

/// Per-generator attribution scores for images detected as AI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorScheme {
    pub midjourney: Prediction,
    pub dall_e: Prediction,
    pub stable_diffusion: Prediction,
    pub this_person_does_not_exist: Prediction,
    pub adobe_firefly: Prediction,
    pub flux: Prediction,
    pub four_o: Prediction,
}

impl GeneratorScheme {
    /// The generator with the highest confidence, by display name.
    pub fn top_generator(&self) -> (&'static str, &Prediction) {
        let rest: [(&'static str, &Prediction); 6] = [
            ("DALL-E", &self.dall_e),
            ("Stable Diffusion", &self.stable_diffusion),
            ("This Person Does Not Exist", &self.this_person_does_not_exist),
            ("Adobe Firefly", &self.adobe_firefly),
            ("Flux", &self.flux),
            ("4o", &self.four_o),
        ];
        rest.into_iter()
            .fold(("Midjourney", &self.midjourney), |best, candidate| {
                if candidate.1.confidence > best.1.confidence {
                    candidate
                } else {
                    best
                }
            })
    }
}

/// Primary AI-generation report: verdict plus the two class scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiGeneratedReport {
    pub verdict: Verdict,
    pub ai: Prediction,
    pub human: Prediction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorScheme>,
}

/// Bounding box in pixel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BBox {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

/// A detected region of interest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiReport {
    pub is_detected: bool,
    pub confidence: f64,
    pub bbox: BBox,
}

/// Deepfake facet for still images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepfakeReport {
    pub is_detected: bool,
    pub confidence: f64,
    #[serde(default)]
    pub rois: Vec<RoiReport>,
}

/// Deepfake facet for videos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepfakeVideoReport {
    pub is_detected: bool,
    pub confidence: f64,
    #[serde(default)]
    pub no_faces_found: bool,
}

/// NSFW facet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NsfwReport {
    pub is_detected: bool,
    #[serde(default = "default_nsfw_version")]
    pub version: String,
}

fn default_nsfw_version() -> String {
    "1.0.0".to_string()
}

/// Image quality facet. `is_detected` means the image passed the bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub is_detected: bool,
}

/// A match found by reverse image search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseSearchMatch {
    pub domain: String,
    pub image_url: String,
    pub width: i64,
    pub height: i64,
    pub earliest_crawl_date: String,
    pub earliest_backlink: String,
}

/// Reverse image search facet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseSearchReport {
    pub was_found: bool,
    #[serde(default)]
    pub matches: Vec<ReverseSearchMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(confidence: f64) -> Prediction {
        Prediction {
            is_detected: confidence > 0.5,
            confidence,
        }
    }

    #[test]
    fn test_top_generator() {
        let scheme = GeneratorScheme {
            midjourney: prediction(0.1),
            dall_e: prediction(0.2),
            stable_diffusion: prediction(0.92),
            this_person_does_not_exist: prediction(0.0),
            adobe_firefly: prediction(0.3),
            flux: prediction(0.4),
            four_o: prediction(0.5),
        };
        let (name, pred) = scheme.top_generator();
        assert_eq!(name, "Stable Diffusion");
        assert!(pred.is_detected);
    }

    #[test]
    fn test_deepfake_report_defaults_rois() {
        let report: DeepfakeReport =
            serde_json::from_str(r#"{"is_detected": false, "confidence": 0.02}"#).unwrap();
        assert!(report.rois.is_empty());
    }

    #[test]
    fn test_nsfw_version_default() {
        let report: NsfwReport = serde_json::from_str(r#"{"is_detected": true}"#).unwrap();
        assert_eq!(report.version, "1.0.0");
    }
}
