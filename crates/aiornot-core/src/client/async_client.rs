//! Async client for the AIorNot API.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::batch::run_batch;
use crate::credentials;
use crate::discovery;
use crate::endpoints;
use crate::error::{AiornotError, Result};
use crate::options::{BatchOptions, ImageOptions, MediaInput, TextOptions, VideoOptions};
use crate::response;
use crate::settings;
use crate::transport::{HttpTransport, RequestBody, Transport};
use crate::types::{
    BatchSummary, ImageReportResponse, MusicReportResponse, TextReportResponse, TokenRefresh,
    TokenRevocation, TokenStatus, VideoReportResponse, VoiceReportResponse,
};

/// Message shown when no API key can be resolved.
const API_KEY_ERR: &str =
    "API key required. Set AIORNOT_API_KEY or run `aiornot token config`";

/// Async client for the AIorNot API.
///
/// Holds one pooled HTTP transport for its whole lifetime; clones share
/// that transport, so handing clones to concurrent tasks is cheap.
#[derive(Clone)]
pub struct AsyncClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for AsyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncClient")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl AsyncClient {
    /// Create a client with an explicit API key. The base URL honors
    /// `AIORNOT_BASE_URL` and defaults to production.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: settings::base_url_from_env(),
            timeout: settings::DEFAULT_TIMEOUT,
            transport: Arc::new(HttpTransport::new()),
        }
    }

    /// Create a client from the environment or `~/.aiornot/config.json`.
    pub fn from_env() -> Result<Self> {
        let api_key = credentials::resolve_api_key()
            .ok_or_else(|| AiornotError::Config(API_KEY_ERR.to_string()))?;
        Ok(Self::new(api_key))
    }

    /// Override the base URL (staging, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the content-analysis timeout (default 180 s). Health and
    /// token endpoints keep their own shorter deadlines.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Swap the transport. Intended for tests and instrumentation.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- Health & token operations ---

    /// Liveness probe. Timeouts and transport failures read as "not
    /// live"; this method never errors.
    pub async fn is_live(&self) -> bool {
        match self
            .transport
            .send(endpoints::health_check(&self.base_url))
            .await
        {
            Ok(resp) => response::parse_health(resp),
            Err(_) => false,
        }
    }

    /// Check the current token. A 401 yields `is_valid: false` rather
    /// than an error.
    pub async fn check_token(&self) -> Result<TokenStatus> {
        let resp = self
            .transport
            .send(endpoints::token_check(&self.base_url, &self.api_key))
            .await?;
        response::parse_token_status(resp)
    }

    /// Rotate the token. The returned token replaces the current one on
    /// the service side; the client keeps using its configured key.
    pub async fn refresh_token(&self) -> Result<TokenRefresh> {
        let resp = self
            .transport
            .send(endpoints::token_refresh(&self.base_url, &self.api_key))
            .await?;
        response::parse_report(resp)
    }

    /// Revoke the current token.
    pub async fn revoke_token(&self) -> Result<TokenRevocation> {
        let resp = self
            .transport
            .send(endpoints::token_revoke(&self.base_url, &self.api_key))
            .await?;
        response::parse_report(resp)
    }

    // --- Image ---

    /// Analyze an image from bytes.
    pub async fn image_report(
        &self,
        data: Vec<u8>,
        options: &ImageOptions,
    ) -> Result<ImageReportResponse> {
        self.submit_image(endpoints::image_upload(data), options)
            .await
    }

    /// Analyze an image hosted at a URL.
    pub async fn image_report_from_url(
        &self,
        url: &str,
        options: &ImageOptions,
    ) -> Result<ImageReportResponse> {
        self.submit_image(endpoints::url_submission(url), options)
            .await
    }

    /// Analyze an image read from a local file.
    pub async fn image_report_from_file(
        &self,
        path: impl AsRef<Path>,
        options: &ImageOptions,
    ) -> Result<ImageReportResponse> {
        let data = read_file(path.as_ref()).await?;
        self.image_report(data, options).await
    }

    async fn submit_image(
        &self,
        body: RequestBody,
        options: &ImageOptions,
    ) -> Result<ImageReportResponse> {
        let req = endpoints::image_report(&self.base_url, &self.api_key, body, options, self.timeout);
        let resp = self
            .transport
            .send(req)
            .await
            .map_err(|e| label_timeout(e, "Image analysis"))?;
        response::parse_report(resp)
    }

    /// Analyze many images concurrently. See [`run_batch`] for the
    /// isolation, ordering, and fail-fast contract.
    pub async fn image_report_batch(
        &self,
        items: Vec<MediaInput>,
        options: &ImageOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<ImageReportResponse>> {
        let client = self.clone();
        let base_options = options.clone();
        let prefix = batch.external_id_prefix.clone();
        run_batch(
            items,
            batch
                .max_concurrency
                .unwrap_or(settings::IMAGE_BATCH_CONCURRENCY),
            batch.on_progress.clone(),
            batch.fail_fast,
            move |item, index| {
                let client = client.clone();
                let options = with_indexed_id(&base_options, &prefix, index, |o, id| {
                    o.external_id = Some(id)
                });
                async move {
                    match item {
                        MediaInput::Bytes(data) => client.image_report(data, &options).await,
                        MediaInput::Path(path) => {
                            client.image_report_from_file(&path, &options).await
                        }
                        MediaInput::Url(url) => client.image_report_from_url(&url, &options).await,
                    }
                }
            },
        )
        .await
    }

    /// Analyze every matching image file in a directory.
    pub async fn image_report_directory(
        &self,
        dir: impl AsRef<Path>,
        recursive: bool,
        options: &ImageOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<ImageReportResponse>> {
        let files =
            discovery::collect_dir_files(dir.as_ref(), discovery::IMAGE_EXTENSIONS, recursive)?;
        self.image_report_batch(into_media(files), options, batch)
            .await
    }

    /// Analyze image files listed in a CSV column.
    pub async fn image_report_from_csv(
        &self,
        csv_path: impl AsRef<Path>,
        column: &str,
        base_dir: Option<&Path>,
        options: &ImageOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<ImageReportResponse>> {
        let files = discovery::collect_csv_paths(csv_path.as_ref(), column, base_dir)?;
        self.image_report_batch(into_media(files), options, batch)
            .await
    }

    // --- Video ---

    /// Analyze a video from bytes.
    pub async fn video_report(
        &self,
        data: Vec<u8>,
        options: &VideoOptions,
    ) -> Result<VideoReportResponse> {
        self.submit_video(endpoints::video_upload(data), options)
            .await
    }

    /// Analyze a video hosted at a URL.
    pub async fn video_report_from_url(
        &self,
        url: &str,
        options: &VideoOptions,
    ) -> Result<VideoReportResponse> {
        self.submit_video(endpoints::url_submission(url), options)
            .await
    }

    /// Analyze a video read from a local file.
    pub async fn video_report_from_file(
        &self,
        path: impl AsRef<Path>,
        options: &VideoOptions,
    ) -> Result<VideoReportResponse> {
        let data = read_file(path.as_ref()).await?;
        self.video_report(data, options).await
    }

    async fn submit_video(
        &self,
        body: RequestBody,
        options: &VideoOptions,
    ) -> Result<VideoReportResponse> {
        let req = endpoints::video_report(&self.base_url, &self.api_key, body, options, self.timeout);
        let resp = self
            .transport
            .send(req)
            .await
            .map_err(|e| label_timeout(e, "Video analysis"))?;
        response::parse_report(resp)
    }

    /// Analyze many videos concurrently.
    pub async fn video_report_batch(
        &self,
        items: Vec<MediaInput>,
        options: &VideoOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<VideoReportResponse>> {
        let client = self.clone();
        let base_options = options.clone();
        let prefix = batch.external_id_prefix.clone();
        run_batch(
            items,
            batch
                .max_concurrency
                .unwrap_or(settings::VIDEO_BATCH_CONCURRENCY),
            batch.on_progress.clone(),
            batch.fail_fast,
            move |item, index| {
                let client = client.clone();
                let options = with_indexed_id(&base_options, &prefix, index, |o, id| {
                    o.external_id = Some(id)
                });
                async move {
                    match item {
                        MediaInput::Bytes(data) => client.video_report(data, &options).await,
                        MediaInput::Path(path) => {
                            client.video_report_from_file(&path, &options).await
                        }
                        MediaInput::Url(url) => client.video_report_from_url(&url, &options).await,
                    }
                }
            },
        )
        .await
    }

    /// Analyze every matching video file in a directory.
    pub async fn video_report_directory(
        &self,
        dir: impl AsRef<Path>,
        recursive: bool,
        options: &VideoOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<VideoReportResponse>> {
        let files =
            discovery::collect_dir_files(dir.as_ref(), discovery::VIDEO_EXTENSIONS, recursive)?;
        self.video_report_batch(into_media(files), options, batch)
            .await
    }

    /// Analyze video files listed in a CSV column.
    pub async fn video_report_from_csv(
        &self,
        csv_path: impl AsRef<Path>,
        column: &str,
        base_dir: Option<&Path>,
        options: &VideoOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<VideoReportResponse>> {
        let files = discovery::collect_csv_paths(csv_path.as_ref(), column, base_dir)?;
        self.video_report_batch(into_media(files), options, batch)
            .await
    }

    // --- Voice ---

    /// Analyze voice/speech audio from bytes.
    pub async fn voice_report(&self, data: Vec<u8>) -> Result<VoiceReportResponse> {
        self.voice_report_named(data, settings::DEFAULT_AUDIO_FILENAME)
            .await
    }

    /// Analyze voice/speech audio from bytes with an explicit upload
    /// filename (the service uses the extension as a format hint).
    pub async fn voice_report_named(
        &self,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<VoiceReportResponse> {
        let body = endpoints::audio_upload(data, filename);
        let req = endpoints::voice_report(&self.base_url, &self.api_key, body, self.timeout);
        let resp = self
            .transport
            .send(req)
            .await
            .map_err(|e| label_timeout(e, "Voice analysis"))?;
        response::parse_report(resp)
    }

    /// Analyze voice/speech audio hosted at a URL.
    pub async fn voice_report_from_url(&self, url: &str) -> Result<VoiceReportResponse> {
        let req = endpoints::voice_report(
            &self.base_url,
            &self.api_key,
            endpoints::url_submission(url),
            self.timeout,
        );
        let resp = self
            .transport
            .send(req)
            .await
            .map_err(|e| label_timeout(e, "Voice analysis"))?;
        response::parse_report(resp)
    }

    /// Analyze voice/speech audio read from a local file.
    pub async fn voice_report_from_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<VoiceReportResponse> {
        let path = path.as_ref();
        let data = read_file(path).await?;
        self.voice_report_named(data, &upload_filename(path)).await
    }

    /// Analyze many voice recordings concurrently.
    pub async fn voice_report_batch(
        &self,
        items: Vec<MediaInput>,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<VoiceReportResponse>> {
        let client = self.clone();
        run_batch(
            items,
            batch
                .max_concurrency
                .unwrap_or(settings::VOICE_BATCH_CONCURRENCY),
            batch.on_progress.clone(),
            batch.fail_fast,
            move |item, _index| {
                let client = client.clone();
                async move {
                    match item {
                        MediaInput::Bytes(data) => client.voice_report(data).await,
                        MediaInput::Path(path) => client.voice_report_from_file(&path).await,
                        MediaInput::Url(url) => client.voice_report_from_url(&url).await,
                    }
                }
            },
        )
        .await
    }

    /// Analyze every matching audio file in a directory as voice.
    pub async fn voice_report_directory(
        &self,
        dir: impl AsRef<Path>,
        recursive: bool,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<VoiceReportResponse>> {
        let files =
            discovery::collect_dir_files(dir.as_ref(), discovery::AUDIO_EXTENSIONS, recursive)?;
        self.voice_report_batch(into_media(files), batch).await
    }

    /// Analyze voice files listed in a CSV column.
    pub async fn voice_report_from_csv(
        &self,
        csv_path: impl AsRef<Path>,
        column: &str,
        base_dir: Option<&Path>,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<VoiceReportResponse>> {
        let files = discovery::collect_csv_paths(csv_path.as_ref(), column, base_dir)?;
        self.voice_report_batch(into_media(files), batch).await
    }

    // --- Music ---

    /// Analyze music audio from bytes.
    pub async fn music_report(&self, data: Vec<u8>) -> Result<MusicReportResponse> {
        self.music_report_named(data, settings::DEFAULT_AUDIO_FILENAME)
            .await
    }

    /// Analyze music audio from bytes with an explicit upload filename.
    pub async fn music_report_named(
        &self,
        data: Vec<u8>,
        filename: &str,
    ) -> Result<MusicReportResponse> {
        let body = endpoints::audio_upload(data, filename);
        let req = endpoints::music_report(&self.base_url, &self.api_key, body, self.timeout);
        let resp = self
            .transport
            .send(req)
            .await
            .map_err(|e| label_timeout(e, "Music analysis"))?;
        response::parse_report(resp)
    }

    /// Analyze music audio hosted at a URL.
    pub async fn music_report_from_url(&self, url: &str) -> Result<MusicReportResponse> {
        let req = endpoints::music_report(
            &self.base_url,
            &self.api_key,
            endpoints::url_submission(url),
            self.timeout,
        );
        let resp = self
            .transport
            .send(req)
            .await
            .map_err(|e| label_timeout(e, "Music analysis"))?;
        response::parse_report(resp)
    }

    /// Analyze music audio read from a local file.
    pub async fn music_report_from_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<MusicReportResponse> {
        let path = path.as_ref();
        let data = read_file(path).await?;
        self.music_report_named(data, &upload_filename(path)).await
    }

    /// Analyze many music files concurrently.
    pub async fn music_report_batch(
        &self,
        items: Vec<MediaInput>,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<MusicReportResponse>> {
        let client = self.clone();
        run_batch(
            items,
            batch
                .max_concurrency
                .unwrap_or(settings::MUSIC_BATCH_CONCURRENCY),
            batch.on_progress.clone(),
            batch.fail_fast,
            move |item, _index| {
                let client = client.clone();
                async move {
                    match item {
                        MediaInput::Bytes(data) => client.music_report(data).await,
                        MediaInput::Path(path) => client.music_report_from_file(&path).await,
                        MediaInput::Url(url) => client.music_report_from_url(&url).await,
                    }
                }
            },
        )
        .await
    }

    /// Analyze every matching audio file in a directory as music.
    pub async fn music_report_directory(
        &self,
        dir: impl AsRef<Path>,
        recursive: bool,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<MusicReportResponse>> {
        let files =
            discovery::collect_dir_files(dir.as_ref(), discovery::AUDIO_EXTENSIONS, recursive)?;
        self.music_report_batch(into_media(files), batch).await
    }

    /// Analyze music files listed in a CSV column.
    pub async fn music_report_from_csv(
        &self,
        csv_path: impl AsRef<Path>,
        column: &str,
        base_dir: Option<&Path>,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<MusicReportResponse>> {
        let files = discovery::collect_csv_paths(csv_path.as_ref(), column, base_dir)?;
        self.music_report_batch(into_media(files), batch).await
    }

    // --- Text ---

    /// Analyze text content.
    pub async fn text_report(
        &self,
        text: &str,
        options: &TextOptions,
    ) -> Result<TextReportResponse> {
        let req =
            endpoints::text_report(&self.base_url, &self.api_key, text, options, self.timeout);
        let resp = self
            .transport
            .send(req)
            .await
            .map_err(|e| label_timeout(e, "Text analysis"))?;
        response::parse_report(resp)
    }

    /// Analyze many texts concurrently. Each outcome's `input` label is
    /// the text itself; callers showing file origins relabel afterwards.
    pub async fn text_report_batch(
        &self,
        texts: Vec<String>,
        options: &TextOptions,
        batch: &BatchOptions,
    ) -> Result<BatchSummary<TextReportResponse>> {
        let client = self.clone();
        let base_options = options.clone();
        let prefix = batch.external_id_prefix.clone();
        run_batch(
            texts,
            batch
                .max_concurrency
                .unwrap_or(settings::TEXT_BATCH_CONCURRENCY),
            batch.on_progress.clone(),
            batch.fail_fast,
            move |text, index| {
                let client = client.clone();
                let options = with_indexed_id(&base_options, &prefix, index, |o, id| {
                    o.external_id = Some(id)
                });
                async move { client.text_report(&text, &options).await }
            },
        )
        .await
    }
}

/// Read a file fully into memory, mapping absence to the file-error kind.
async fn read_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(AiornotError::file_not_found(path));
    }
    tokio::fs::read(path).await.map_err(|e| AiornotError::File {
        path: path.to_path_buf(),
        message: format!("Failed to read {}: {e}", path.display()),
    })
}

fn upload_filename(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(settings::DEFAULT_AUDIO_FILENAME)
        .to_string()
}

fn into_media(files: Vec<std::path::PathBuf>) -> Vec<MediaInput> {
    files.into_iter().map(MediaInput::Path).collect()
}

/// Clone `base` options and, when a prefix is set, stamp `"{prefix}_{index}"`
/// through `set_id`.
fn with_indexed_id<O: Clone>(
    base: &O,
    prefix: &Option<String>,
    index: usize,
    set_id: impl Fn(&mut O, String),
) -> O {
    let mut options = base.clone();
    if let Some(prefix) = prefix {
        set_id(&mut options, format!("{prefix}_{index}"));
    }
    options
}

fn label_timeout(err: AiornotError, operation: &str) -> AiornotError {
    match err {
        AiornotError::Timeout(msg) => AiornotError::Timeout(format!("{operation} timed out: {msg}")),
        other => other,
    }
}
