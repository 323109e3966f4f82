//! Request options and batch inputs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::types::enums::{ImageAnalysisType, VideoAnalysisType};

/// One unit of analyzable media: raw bytes, a local file, or a remote URL.
#[derive(Debug, Clone)]
pub enum MediaInput {
    Bytes(Vec<u8>),
    Path(PathBuf),
    Url(String),
}

impl MediaInput {
    pub fn url(url: impl Into<String>) -> Self {
        MediaInput::Url(url.into())
    }
}

impl From<Vec<u8>> for MediaInput {
    fn from(data: Vec<u8>) -> Self {
        MediaInput::Bytes(data)
    }
}

impl From<PathBuf> for MediaInput {
    fn from(path: PathBuf) -> Self {
        MediaInput::Path(path)
    }
}

impl From<&Path> for MediaInput {
    fn from(path: &Path) -> Self {
        MediaInput::Path(path.to_path_buf())
    }
}

impl std::fmt::Display for MediaInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaInput::Bytes(data) => write!(f, "<{} bytes>", data.len()),
            MediaInput::Path(path) => write!(f, "{}", path.display()),
            MediaInput::Url(url) => f.write_str(url),
        }
    }
}

/// Options for image analysis requests.
///
/// `only` and `excluding` are both forwarded when supplied together; the
/// service decides how they combine.
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    pub only: Vec<ImageAnalysisType>,
    pub excluding: Vec<ImageAnalysisType>,
    pub external_id: Option<String>,
}

impl ImageOptions {
    pub fn only(mut self, types: impl IntoIterator<Item = ImageAnalysisType>) -> Self {
        self.only = types.into_iter().collect();
        self
    }

    pub fn excluding(mut self, types: impl IntoIterator<Item = ImageAnalysisType>) -> Self {
        self.excluding = types.into_iter().collect();
        self
    }

    pub fn external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }
}

/// Options for video analysis requests.
#[derive(Debug, Clone, Default)]
pub struct VideoOptions {
    pub only: Vec<VideoAnalysisType>,
    pub excluding: Vec<VideoAnalysisType>,
    pub external_id: Option<String>,
}

impl VideoOptions {
    pub fn only(mut self, types: impl IntoIterator<Item = VideoAnalysisType>) -> Self {
        self.only = types.into_iter().collect();
        self
    }

    pub fn excluding(mut self, types: impl IntoIterator<Item = VideoAnalysisType>) -> Self {
        self.excluding = types.into_iter().collect();
        self
    }

    pub fn external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }
}

/// Options for text analysis requests.
#[derive(Debug, Clone, Default)]
pub struct TextOptions {
    pub include_annotations: bool,
    pub external_id: Option<String>,
}

impl TextOptions {
    pub fn include_annotations(mut self, include: bool) -> Self {
        self.include_annotations = include;
        self
    }

    pub fn external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }
}

/// Progress callback: `(completed_so_far, total)`. Invocations are
/// serialized by the batch engine, so `completed` never goes backwards.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Options for batch operations.
#[derive(Clone, Default)]
pub struct BatchOptions {
    /// Concurrency cap; `None` uses the per-kind default.
    pub max_concurrency: Option<usize>,
    /// Abort on the first item failure instead of recording it.
    pub fail_fast: bool,
    /// When set, item `i` is submitted with external id `"{prefix}_{i}"`.
    pub external_id_prefix: Option<String>,
    pub on_progress: Option<ProgressCallback>,
}

impl BatchOptions {
    pub fn max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn external_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.external_id_prefix = Some(prefix.into());
        self
    }

    pub fn on_progress(mut self, callback: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(callback));
        self
    }
}

impl std::fmt::Debug for BatchOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchOptions")
            .field("max_concurrency", &self.max_concurrency)
            .field("fail_fast", &self.fail_fast)
            .field("external_id_prefix", &self.external_id_prefix)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}
