// components/media_downloader/src/stream.rs
//! Stream model and resolution-based selection
//!
//! Only mp4 video is considered. A progressive stream (video and audio in
//! one file) is preferred; when none exists at the target height the best
//! video-only stream is paired with the best audio-only stream and merged
//! by the extractor.

use crate::types::DownloadError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const VIDEO_EXTENSION: &str = "mp4";
const AUDIO_EXTENSIONS: [&str; 2] = ["m4a", "mp4"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("resolution cannot be empty")]
    Empty,
    #[error("'{0}' is not a resolution (expected e.g. 720p)")]
    Invalid(String),
    #[error("resolution must be greater than zero")]
    Zero,
}

/// Vertical pixel count of a video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Resolution(u32);

impl Resolution {
    pub fn new(height: u32) -> Result<Self, ResolutionError> {
        if height == 0 {
            return Err(ResolutionError::Zero);
        }
        Ok(Self(height))
    }

    pub fn height(&self) -> u32 {
        self.0
    }
}

impl FromStr for Resolution {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ResolutionError::Empty);
        }

        let digits = trimmed
            .strip_suffix('p')
            .or_else(|| trimmed.strip_suffix('P'))
            .unwrap_or(trimmed);

        let height = digits
            .parse::<u32>()
            .map_err(|_| ResolutionError::Invalid(s.to_string()))?;

        Self::new(height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.0)
    }
}

pub(crate) fn format_resolutions(resolutions: &[Resolution]) -> String {
    if resolutions.is_empty() {
        return "none".to_string();
    }
    resolutions
        .iter()
        .map(Resolution::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One downloadable format as reported by the extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    pub format_id: String,
    pub ext: String,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    /// Average bitrate in kbit/s
    pub tbr: Option<f64>,
    pub filesize: Option<u64>,
}

impl Stream {
    pub fn has_video(&self) -> bool {
        self.height.is_some() && self.vcodec.as_deref() != Some("none")
    }

    pub fn has_audio(&self) -> bool {
        matches!(self.acodec.as_deref(), Some(codec) if codec != "none")
    }

    pub fn is_progressive(&self) -> bool {
        self.has_video() && self.has_audio()
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.height.and_then(|h| Resolution::new(h).ok())
    }

    fn quality_cmp(&self, other: &Self) -> Ordering {
        let fps = self.fps.unwrap_or(0.0).total_cmp(&other.fps.unwrap_or(0.0));
        let tbr = self.tbr.unwrap_or(0.0).total_cmp(&other.tbr.unwrap_or(0.0));
        let size = self.filesize.unwrap_or(0).cmp(&other.filesize.unwrap_or(0));
        fps.then(tbr).then(size)
    }
}

/// The stream(s) chosen for a download
#[derive(Debug, Clone, PartialEq)]
pub enum StreamSelection {
    Progressive(Stream),
    Merged { video: Stream, audio: Stream },
}

impl StreamSelection {
    /// Format selector understood by yt-dlp's `-f`
    pub fn format_selector(&self) -> String {
        match self {
            StreamSelection::Progressive(stream) => stream.format_id.clone(),
            StreamSelection::Merged { video, audio } => {
                format!("{}+{}", video.format_id, audio.format_id)
            }
        }
    }

    pub fn resolution(&self) -> Option<Resolution> {
        match self {
            StreamSelection::Progressive(stream) => stream.resolution(),
            StreamSelection::Merged { video, .. } => video.resolution(),
        }
    }

    pub fn needs_merge(&self) -> bool {
        matches!(self, StreamSelection::Merged { .. })
    }
}

impl fmt::Display for StreamSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolution = self
            .resolution()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        match self {
            StreamSelection::Progressive(stream) => {
                write!(f, "{} ({})", resolution, stream.format_id)
            }
            StreamSelection::Merged { video, audio } => {
                write!(f, "{} ({}+{})", resolution, video.format_id, audio.format_id)
            }
        }
    }
}

/// Distinct mp4 video resolutions, highest first
pub fn available_resolutions(streams: &[Stream]) -> Vec<Resolution> {
    let mut resolutions: Vec<Resolution> = streams
        .iter()
        .filter(|s| s.ext == VIDEO_EXTENSION && s.has_video())
        .filter_map(Stream::resolution)
        .collect();
    resolutions.sort_unstable_by(|a, b| b.cmp(a));
    resolutions.dedup();
    resolutions
}

/// Pick the stream(s) to download for the requested resolution
///
/// With no resolution the highest available one is used.
pub fn select_stream(
    streams: &[Stream],
    requested: Option<Resolution>,
) -> Result<StreamSelection, DownloadError> {
    let available = available_resolutions(streams);

    let target = match requested {
        Some(resolution) if available.contains(&resolution) => resolution,
        Some(resolution) => {
            return Err(DownloadError::ResolutionUnavailable {
                requested: resolution,
                available,
            })
        }
        None => *available
            .first()
            .ok_or_else(|| DownloadError::NoStreams("no mp4 video streams".to_string()))?,
    };

    let at_target = || {
        streams.iter().filter(move |s| {
            s.ext == VIDEO_EXTENSION && s.has_video() && s.resolution() == Some(target)
        })
    };

    if let Some(progressive) = at_target()
        .filter(|s| s.is_progressive())
        .max_by(|a, b| a.quality_cmp(b))
    {
        return Ok(StreamSelection::Progressive(progressive.clone()));
    }

    let video = at_target()
        .max_by(|a, b| a.quality_cmp(b))
        .ok_or_else(|| DownloadError::NoStreams(format!("no video stream at {}", target)))?;

    let audio = streams
        .iter()
        .filter(|s| !s.has_video() && s.has_audio())
        .filter(|s| AUDIO_EXTENSIONS.contains(&s.ext.as_str()))
        .max_by(|a, b| a.quality_cmp(b))
        .ok_or_else(|| {
            DownloadError::NoStreams(format!("no audio stream to merge with {}", target))
        })?;

    Ok(StreamSelection::Merged {
        video: video.clone(),
        audio: audio.clone(),
    })
}
