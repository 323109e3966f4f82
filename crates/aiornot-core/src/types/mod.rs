//! Typed records for AIorNot API responses and batch outcomes.

pub mod audio;
pub mod batch;
pub mod common;
pub mod enums;
pub mod image;
pub mod text;
pub mod token;
pub mod video;

pub use audio::{AudioReport, MusicReportResponse, VoiceReportResponse};
pub use batch::{BatchOutcome, BatchResult, BatchSummary};
pub use common::{
    AiGeneratedReport, BBox, DeepfakeReport, DeepfakeVideoReport, GeneratorScheme, NsfwReport,
    Prediction, QualityReport, ReverseSearchMatch, ReverseSearchReport, RoiReport,
};
pub use enums::{ImageAnalysisType, ReportStatus, Verdict, VideoAnalysisType};
pub use image::{ImageMetadata, ImageReport, ImageReportResponse};
pub use text::{AiTextReport, TextMetadata, TextReport, TextReportResponse};
pub use token::{TokenRefresh, TokenRevocation, TokenStatus};
pub use video::{VideoMetadata, VideoReport, VideoReportResponse};
