// components/media_downloader/src/types.rs
use crate::metadata::VideoMetadata;
use crate::stream::{Resolution, StreamSelection};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Required dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Path '{}' does not exist", .0.display())]
    UrlsFileMissing(PathBuf),

    #[error("File '{}' is in wrong format (must be .txt)", .0.display())]
    UrlsFileFormat(PathBuf),

    #[error("No suitable streams: {0}")]
    NoStreams(String),

    #[error(
        "Resolution {requested} not available (available: {})",
        crate::stream::format_resolutions(.available)
    )]
    ResolutionUnavailable {
        requested: Resolution,
        available: Vec<Resolution>,
    },

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Could not read metadata: {0}")]
    MetadataParse(#[from] serde_json::Error),

    #[error("Audio extraction failed: {0}")]
    TranscodeFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where and how downloaded videos are stored
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub output_dir: PathBuf,

    /// Exact resolution to fetch; `None` picks the highest available
    pub resolution: Option<Resolution>,

    /// Extract an mp3 next to the video
    pub extract_audio: bool,

    /// Keep the mp4 once the mp3 has been extracted
    pub keep_video: bool,
}

impl DownloadOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            resolution: None,
            extract_audio: false,
            keep_video: false,
        }
    }
}

#[async_trait::async_trait]
pub trait Extractor {
    /// Check if the extractor is available and has all required dependencies
    async fn check_available(&self) -> Result<(), DownloadError>;

    /// Fetch metadata, including the stream list, without downloading
    async fn fetch_metadata(&self, url: &Url, temp_dir: &Path)
        -> Result<VideoMetadata, DownloadError>;

    /// Download the selected stream(s) into a single mp4 at `output`
    async fn download(
        &self,
        url: &Url,
        selection: &StreamSelection,
        output: &Path,
        temp_dir: &Path,
    ) -> Result<(), DownloadError>;
}

#[async_trait::async_trait]
pub trait Transcoder {
    async fn check_available(&self) -> Result<(), DownloadError>;

    /// Write the audio track of `input` to `output` as mp3
    async fn extract_audio(&self, input: &Path, output: &Path) -> Result<(), DownloadError>;
}
