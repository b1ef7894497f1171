// components/media_downloader/src/metadata.rs
use crate::stream::{Resolution, Stream};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,

    /// Uploader or channel name, when the site reports one
    pub author: Option<String>,

    /// Duration in seconds
    pub duration: Option<f64>,

    /// Canonical page URL of the video
    pub source_url: String,

    pub streams: Vec<Stream>,
}

impl VideoMetadata {
    pub fn author_or_unknown(&self) -> &str {
        self.author.as_deref().unwrap_or("unknown author")
    }
}

/// Outcome of a single successful download
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadReport {
    pub metadata: VideoMetadata,

    pub resolution: Option<Resolution>,

    /// `None` when the video was removed after audio extraction
    pub video_path: Option<PathBuf>,

    pub audio_path: Option<PathBuf>,

    pub downloaded_at: DateTime<Utc>,
}

impl fmt::Display for DownloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Video {} by {} downloaded",
            self.metadata.title,
            self.metadata.author_or_unknown()
        )
    }
}
