//! Blocking client facade.
//!
//! Owns a current-thread tokio runtime and drives the async client to
//! completion once per call. Batch runs still multiplex their network
//! waits inside that single runtime; only the caller blocks.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::error::{AiornotError, Result};
use crate::options::{BatchOptions, ImageOptions, MediaInput, TextOptions, VideoOptions};
use crate::transport::Transport;
use crate::types::{
    BatchSummary, ImageReportResponse, MusicReportResponse, TextReportResponse, TokenRefresh,
    TokenRevocation, TokenStatus, VideoReportResponse, VoiceReportResponse,
};

use super::async_client::AsyncClient;

/// Blocking client for the AIorNot API.
pub struct Client {
    inner: AsyncClient,
    runtime: Runtime,
}

impl Client {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_async(AsyncClient::new(api_key))
    }

    /// Create a client from the environment or `~/.aiornot/config.json`.
    pub fn from_env() -> Result<Self> {
        Self::from_async(AsyncClient::from_env()?)
    }

    /// Wrap an already-configured async client.
    pub fn from_async(inner: AsyncClient) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AiornotError::Runtime(e.to_string()))?;
        Ok(Self { inner, runtime })
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.inner = self.inner.with_base_url(base_url);
        self
    }

    /// Override the content-analysis timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.with_timeout(timeout);
        self
    }

    /// Swap the transport. Intended for tests and instrumentation.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.inner = self.inner.with_transport(transport);
        self
    }

    /// The async client this facade drives.
    pub fn as_async(&self) -> &AsyncClient {
        &self.inner
    }

    // --- Health & token operations ---

    pub fn is_live(&self) -> bool {
        self.runtime.block_on(self.inner.is_live())
    }

    pub fn check_token(&self) -> Result<TokenStatus> {
        self.runtime.block_on(self.inner.check_token())
    }

    pub fn refresh_token(&self) -> Result<TokenRefresh> {
        self.runtime.block_on(self.inner.refresh_token())
    }

    pub fn revoke_token(&self) -> Result<TokenRevocation> {
        self.runtime.block_on(self.inner.revoke_token())
    }

    // --- Image ---

    pub fn image_report(
        &self,
        data: Vec<u8>,
        options: &ImageOptions,
    ) -> Result<ImageReportResponse> {
        self.runtime.block_on(self.inner.image_report(data, options))
    }

    pub fn image_report_from_url(
        &self,
        url: &str,
        options: &ImageOptions,
    ) -> Result<ImageReportResponse> {
        self.runtime
            .block_on(self.inner.image_report_from_url(url, options))
    }

    pub fn image_report_from_file(
        &self,
        path: impl AsRef<Path>,
        options: &ImageOptions,
    ) -> Result<ImageReportResponse> {
        self.runtime
            .block_on(self.inner.image_report_from_file(path, options))
    }

    pub fn image_report_batch(
        &self,
        items: Vec<MediaInput>,
        options: &ImageOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<ImageReportResponse>> {
        self.runtime
            .block_on(self.inner.image_report_batch(items, options, batch))
    }

    pub fn image_report_directory(
        &self,
        dir: impl AsRef<Path>,
        recursive: bool,
        options: &ImageOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<ImageReportResponse>> {
        self.runtime.block_on(
            self.inner
                .image_report_directory(dir, recursive, options, batch),
        )
    }

    pub fn image_report_from_csv(
        &self,
        csv_path: impl AsRef<Path>,
        column: &str,
        base_dir: Option<&Path>,
        options: &ImageOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<ImageReportResponse>> {
        self.runtime.block_on(
            self.inner
                .image_report_from_csv(csv_path, column, base_dir, options, batch),
        )
    }

    // --- Video ---

    pub fn video_report(
        &self,
        data: Vec<u8>,
        options: &VideoOptions,
    ) -> Result<VideoReportResponse> {
        self.runtime.block_on(self.inner.video_report(data, options))
    }

    pub fn video_report_from_url(
        &self,
        url: &str,
        options: &VideoOptions,
    ) -> Result<VideoReportResponse> {
        self.runtime
            .block_on(self.inner.video_report_from_url(url, options))
    }

    pub fn video_report_from_file(
        &self,
        path: impl AsRef<Path>,
        options: &VideoOptions,
    ) -> Result<VideoReportResponse> {
        self.runtime
            .block_on(self.inner.video_report_from_file(path, options))
    }

    pub fn video_report_batch(
        &self,
        items: Vec<MediaInput>,
        options: &VideoOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<VideoReportResponse>> {
        self.runtime
            .block_on(self.inner.video_report_batch(items, options, batch))
    }

    pub fn video_report_directory(
        &self,
        dir: impl AsRef<Path>,
        recursive: bool,
        options: &VideoOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<VideoReportResponse>> {
        self.runtime.block_on(
            self.inner
                .video_report_directory(dir, recursive, options, batch),
        )
    }

    pub fn video_report_from_csv(
        &self,
        csv_path: impl AsRef<Path>,
        column: &str,
        base_dir: Option<&Path>,
        options: &VideoOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<VideoReportResponse>> {
        self.runtime.block_on(
            self.inner
                .video_report_from_csv(csv_path, column, base_dir, options, batch),
        )
    }

    // --- Voice ---

    pub fn voice_report(&self, data: Vec<u8>) -> Result<VoiceReportResponse> {
        self.runtime.block_on(self.inner.voice_report(data))
    }

    pub fn voice_report_named(
        &self,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<VoiceReportResponse> {
        self.runtime
            .block_on(self.inner.voice_report_named(data, filename))
    }

    pub fn voice_report_from_url(&self, url: &str) -> Result<VoiceReportResponse> {
        self.runtime.block_on(self.inner.voice_report_from_url(url))
    }

    pub fn voice_report_from_file(&self, path: impl AsRef<Path>) -> Result<VoiceReportResponse> {
        self.runtime
            .block_on(self.inner.voice_report_from_file(path))
    }

    pub fn voice_report_batch(
        &self,
        items: Vec<MediaInput>,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<VoiceReportResponse>> {
        self.runtime
            .block_on(self.inner.voice_report_batch(items, batch))
    }

    pub fn voice_report_directory(
        &self,
        dir: impl AsRef<Path>,
        recursive: bool,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<VoiceReportResponse>> {
        self.runtime
            .block_on(self.inner.voice_report_directory(dir, recursive, batch))
    }

    pub fn voice_report_from_csv(
        &self,
        csv_path: impl AsRef<Path>,
        column: &str,
        base_dir: Option<&Path>,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<VoiceReportResponse>> {
        self.runtime.block_on(
            self.inner
                .voice_report_from_csv(csv_path, column, base_dir, batch),
        )
    }

    // --- Music ---

    pub fn music_report(&self, data: Vec<u8>) -> Result<MusicReportResponse> {
        self.runtime.block_on(self.inner.music_report(data))
    }

    pub fn music_report_named(
        &self,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<MusicReportResponse> {
        self.runtime
            .block_on(self.inner.music_report_named(data, filename))
    }

    pub fn music_report_from_url(&self, url: &str) -> Result<MusicReportResponse> {
        self.runtime.block_on(self.inner.music_report_from_url(url))
    }

    pub fn music_report_from_file(&self, path: impl AsRef<Path>) -> Result<MusicReportResponse> {
        self.runtime
            .block_on(self.inner.music_report_from_file(path))
    }

    pub fn music_report_batch(
        &self,
        items: Vec<MediaInput>,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<MusicReportResponse>> {
        self.runtime
            .block_on(self.inner.music_report_batch(items, batch))
    }

    pub fn music_report_directory(
        &self,
        dir: impl AsRef<Path>,
        recursive: bool,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<MusicReportResponse>> {
        self.runtime
            .block_on(self.inner.music_report_directory(dir, recursive, batch))
    }

    pub fn music_report_from_csv(
        &self,
        csv_path: impl AsRef<Path>,
        column: &str,
        base_dir: Option<&Path>,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<MusicReportResponse>> {
        self.runtime.block_on(
            self.inner
                .music_report_from_csv(csv_path, column, base_dir, batch),
        )
    }

    // --- Text ---

    pub fn text_report(&self, text: &str, options: &TextOptions) -> Result<TextReportResponse> {
        self.runtime.block_on(self.inner.text_report(text, options))
    }

    pub fn text_report_batch(
        &self,
        texts: Vec<String>,
        options: &TextOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<TextReportResponse>> {
        self.runtime
            .block_on(self.inner.text_report_batch(texts, options, batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ApiRequest, RawResponse};
    use async_trait::async_trait;

    struct StaticTransport {
        status: u16,
        body: String,
    }

    #[async_trait]
    impl Transport for StaticTransport {
        async fn send(&self, _request: ApiRequest) -> crate::error::Result<RawResponse> {
            Ok(RawResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    fn blocking_client(status: u16, body: &str) -> Client {
        Client::new("key")
            .unwrap()
            .with_base_url("https://api.test")
            .with_transport(Arc::new(StaticTransport {
                status,
                body: body.to_string(),
            }))
    }

    #[test]
    fn test_blocking_text_report() {
        let client = blocking_client(
            200,
            r#"{
                "id": "txt",
                "report": {"ai_text": {"is_detected": true, "confidence": 0.9}},
                "metadata": {"word_count": 2, "character_count": 9, "token_count": 2, "md5": "ab"}
            }"#,
        );
        let resp = client
            .text_report("two words", &TextOptions::default())
            .unwrap();
        assert!(resp.is_ai());
    }

    #[test]
    fn test_blocking_batch_drives_async_engine() {
        let client = blocking_client(
            200,
            r#"{
                "id": "txt",
                "report": {"ai_text": {"is_detected": false, "confidence": 0.2}},
                "metadata": {"word_count": 1, "character_count": 1, "token_count": 1, "md5": "cd"}
            }"#,
        );
        let summary = client
            .text_report_batch(
                vec!["a".to_string(), "b".to_string(), "c".to_string()],
                &TextOptions::default(),
                &BatchOptions::default().max_concurrency(2),
            )
            .unwrap();
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.succeeded(), 3);
    }

    #[test]
    fn test_blocking_is_live_on_error_status() {
        let client = blocking_client(503, "");
        assert!(!client.is_live());
    }
}
