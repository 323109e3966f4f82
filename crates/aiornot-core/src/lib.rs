//! AIorNot Core - client library for the AIorNot AI-content-detection API.
//!
//! Submit images, videos, voice, music, or text and get back typed
//! verdicts (AI vs. human, confidence, deepfake/NSFW/quality facets).
//! Batches fan out concurrently with bounded in-flight requests, isolate
//! per-item failures, and aggregate into a JSONL-serializable summary.
//!
//! # Usage
//!
//! ```rust,ignore
//! use aiornot_core::{AsyncClient, ImageOptions};
//!
//! #[tokio::main]
//! async fn main() -> aiornot_core::Result<()> {
//!     let client = AsyncClient::from_env()?;
//!     let report = client
//!         .image_report_from_file("./photo.jpg", &ImageOptions::default())
//!         .await?;
//!     println!("verdict: {:?}", report.verdict());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod batch;
pub mod client;
pub mod credentials;
pub mod discovery;
pub(crate) mod endpoints;
pub mod error;
pub mod options;
pub(crate) mod response;
pub mod settings;
pub mod transport;
pub mod types;

// Re-exports for convenient access
pub use batch::run_batch;
pub use client::{AsyncClient, Client};
pub use error::{AiornotError, Result};
pub use options::{
    BatchOptions, ImageOptions, MediaInput, ProgressCallback, TextOptions, VideoOptions,
};
pub use transport::{ApiRequest, HttpTransport, RawResponse, RequestBody, Transport};
pub use types::{
    BatchOutcome, BatchResult, BatchSummary, ImageAnalysisType, ImageReportResponse,
    MusicReportResponse, TextReportResponse, TokenRefresh, TokenRevocation, TokenStatus, Verdict,
    VideoAnalysisType, VideoReportResponse, VoiceReportResponse,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
