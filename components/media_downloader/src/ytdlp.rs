// components/media_downloader/src/ytdlp.rs
use crate::metadata::VideoMetadata;
use crate::stream::{Stream, StreamSelection, VIDEO_EXTENSION};
use crate::types::{DownloadError, Extractor};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use url::Url;

pub struct YtDlp {
    program: PathBuf,
    ffmpeg_location: Option<PathBuf>,
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ffmpeg_location: None,
        }
    }

    /// ffmpeg binary yt-dlp should use when merging streams
    pub fn with_ffmpeg_location(mut self, ffmpeg: impl Into<PathBuf>) -> Self {
        self.ffmpeg_location = Some(ffmpeg.into());
        self
    }

    fn download_args(&self, selection: &StreamSelection, output: &Path, url: &Url) -> Vec<String> {
        let mut args = vec![
            "--no-playlist".to_string(),
            "--no-progress".to_string(),
            "--format".to_string(),
            selection.format_selector(),
        ];

        if selection.needs_merge() {
            args.push("--merge-output-format".to_string());
            args.push(VIDEO_EXTENSION.to_string());
            if let Some(ffmpeg) = &self.ffmpeg_location {
                args.push("--ffmpeg-location".to_string());
                args.push(ffmpeg.to_string_lossy().into_owned());
            }
        }

        args.push("-o".to_string());
        args.push(output.to_string_lossy().into_owned());
        args.push(url.as_str().to_string());
        args
    }
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

#[async_trait]
impl Extractor for YtDlp {
    async fn check_available(&self) -> Result<(), DownloadError> {
        which::which(&self.program)
            .map(|_| ())
            .map_err(|_| DownloadError::DependencyNotFound(self.program.display().to_string()))
    }

    async fn fetch_metadata(&self, url: &Url, temp_dir: &Path) -> Result<VideoMetadata, DownloadError> {
        let abs_temp_dir = dunce::canonicalize(temp_dir)?;
        tracing::debug!("Fetching metadata for {} in {}", url, abs_temp_dir.display());

        let output = Command::new(&self.program)
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-playlist")
            .arg(url.as_str())
            .current_dir(&abs_temp_dir)
            .output()
            .await?;

        if !output.status.success() {
            return Err(DownloadError::DownloadFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let metadata = parse_metadata(&output.stdout)?;
        tracing::debug!(
            "{} reports {} formats for '{}'",
            self.program.display(),
            metadata.streams.len(),
            metadata.title
        );
        Ok(metadata)
    }

    async fn download(
        &self,
        url: &Url,
        selection: &StreamSelection,
        output: &Path,
        temp_dir: &Path,
    ) -> Result<(), DownloadError> {
        let abs_temp_dir = dunce::canonicalize(temp_dir)?;
        let abs_output = if output.is_absolute() {
            output.to_path_buf()
        } else {
            abs_temp_dir.join(output)
        };

        let args = self.download_args(selection, &abs_output, url);
        tracing::debug!("Running {} {}", self.program.display(), args.join(" "));

        let result = Command::new(&self.program)
            .args(&args)
            .current_dir(&abs_temp_dir)
            .output()
            .await?;

        if !result.status.success() {
            return Err(DownloadError::DownloadFailed(format!(
                "{} exited with {}: {}",
                self.program.display(),
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        if !abs_output.exists() {
            return Err(DownloadError::DownloadFailed(format!(
                "{} reported success but {} is missing",
                self.program.display(),
                abs_output.display()
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct YtDlpMetadata {
    title: String,
    uploader: Option<String>,
    channel: Option<String>,
    duration: Option<f64>,
    webpage_url: String,
    #[serde(default)]
    formats: Vec<YtDlpFormat>,
}

#[derive(Debug, Deserialize)]
struct YtDlpFormat {
    format_id: String,
    ext: String,
    height: Option<u32>,
    fps: Option<f64>,
    vcodec: Option<String>,
    acodec: Option<String>,
    tbr: Option<f64>,
    filesize: Option<u64>,
    filesize_approx: Option<u64>,
}

impl From<YtDlpFormat> for Stream {
    fn from(format: YtDlpFormat) -> Self {
        Stream {
            format_id: format.format_id,
            ext: format.ext,
            height: format.height,
            fps: format.fps,
            vcodec: format.vcodec,
            acodec: format.acodec,
            tbr: format.tbr,
            filesize: format.filesize.or(format.filesize_approx),
        }
    }
}

fn parse_metadata(json: &[u8]) -> Result<VideoMetadata, DownloadError> {
    let yt_meta: YtDlpMetadata = serde_json::from_slice(json)?;

    Ok(VideoMetadata {
        title: yt_meta.title,
        author: yt_meta.uploader.or(yt_meta.channel),
        duration: yt_meta.duration,
        source_url: yt_meta.webpage_url,
        streams: yt_meta.formats.into_iter().map(Stream::from).collect(),
    })
}
