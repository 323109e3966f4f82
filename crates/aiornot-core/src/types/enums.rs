//! Enum types shared across report responses.

use serde::{Deserialize, Serialize};

/// Analysis types available for image reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageAnalysisType {
    AiGenerated,
    Deepfake,
    Nsfw,
    Quality,
    ReverseSearch,
}

impl ImageAnalysisType {
    /// Wire name used in `only`/`excluding` query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageAnalysisType::AiGenerated => "ai_generated",
            ImageAnalysisType::Deepfake => "deepfake",
            ImageAnalysisType::Nsfw => "nsfw",
            ImageAnalysisType::Quality => "quality",
            ImageAnalysisType::ReverseSearch => "reverse_search",
        }
    }

    pub const ALL: [ImageAnalysisType; 5] = [
        ImageAnalysisType::AiGenerated,
        ImageAnalysisType::Deepfake,
        ImageAnalysisType::Nsfw,
        ImageAnalysisType::Quality,
        ImageAnalysisType::ReverseSearch,
    ];
}

impl std::fmt::Display for ImageAnalysisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ImageAnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai_generated" => Ok(ImageAnalysisType::AiGenerated),
            "deepfake" => Ok(ImageAnalysisType::Deepfake),
            "nsfw" => Ok(ImageAnalysisType::Nsfw),
            "quality" => Ok(ImageAnalysisType::Quality),
            "reverse_search" => Ok(ImageAnalysisType::ReverseSearch),
            other => Err(format!("unknown image analysis type: {other}")),
        }
    }
}

/// Analysis types available for video reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoAnalysisType {
    AiVideo,
    AiMusic,
    AiVoice,
    DeepfakeVideo,
}

impl VideoAnalysisType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoAnalysisType::AiVideo => "ai_video",
            VideoAnalysisType::AiMusic => "ai_music",
            VideoAnalysisType::AiVoice => "ai_voice",
            VideoAnalysisType::DeepfakeVideo => "deepfake_video",
        }
    }

    pub const ALL: [VideoAnalysisType; 4] = [
        VideoAnalysisType::AiVideo,
        VideoAnalysisType::AiMusic,
        VideoAnalysisType::AiVoice,
        VideoAnalysisType::DeepfakeVideo,
    ];
}

impl std::fmt::Display for VideoAnalysisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VideoAnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ai_video" => Ok(VideoAnalysisType::AiVideo),
            "ai_music" => Ok(VideoAnalysisType::AiMusic),
            "ai_voice" => Ok(VideoAnalysisType::AiVoice),
            "deepfake_video" => Ok(VideoAnalysisType::DeepfakeVideo),
            other => Err(format!("unknown video analysis type: {other}")),
        }
    }
}

/// AI-detection verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Ai,
    Human,
    Unknown,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Ai => "ai",
            Verdict::Human => "human",
            Verdict::Unknown => "unknown",
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self, Verdict::Ai)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-facet processing status reported in image metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Processed,
    Rejected,
    Errored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_analysis_type_round_trip() {
        for ty in ImageAnalysisType::ALL {
            assert_eq!(ty.as_str().parse::<ImageAnalysisType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_video_analysis_type_round_trip() {
        for ty in VideoAnalysisType::ALL {
            assert_eq!(ty.as_str().parse::<VideoAnalysisType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_verdict_wire_names() {
        assert_eq!(serde_json::to_string(&Verdict::Ai).unwrap(), "\"ai\"");
        assert_eq!(
            serde_json::from_str::<Verdict>("\"unknown\"").unwrap(),
            Verdict::Unknown
        );
        assert!(Verdict::Ai.is_ai());
        assert!(!Verdict::Human.is_ai());
    }
}
