// components/media_downloader/src/lib.rs
mod ffmpeg;
mod metadata;
mod stream;
mod types;
mod urls;
mod utils;
mod ytdlp;

use futures::stream::StreamExt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use url::Url;

pub use ffmpeg::{Ffmpeg, AUDIO_EXTENSION};
pub use metadata::{DownloadReport, VideoMetadata};
pub use stream::{
    available_resolutions, select_stream, Resolution, ResolutionError, Stream, StreamSelection,
    VIDEO_EXTENSION,
};
pub use types::{DownloadError, DownloadOptions, Extractor, Transcoder};
pub use urls::{check_arguments, clean_url, load_url_list};
pub use utils::output_file_name;
pub use ytdlp::YtDlp;

/// Result of one URL in a batch, paired with the URL it came from
pub type BatchResult = (String, Result<DownloadReport, DownloadError>);

pub struct MediaDownloader {
    options: DownloadOptions,
    temp_path: PathBuf,
    extractor: Arc<dyn Extractor + Send + Sync>,
    transcoder: Arc<dyn Transcoder + Send + Sync>,
}

impl MediaDownloader {
    /// Create a MediaDownloader backed by yt-dlp and ffmpeg from `PATH`
    pub async fn new(options: DownloadOptions) -> Result<Self, DownloadError> {
        Self::new_with(options, Arc::new(YtDlp::default()), Arc::new(Ffmpeg::default())).await
    }

    /// Create a MediaDownloader with specific extractor and transcoder implementations
    pub async fn new_with(
        mut options: DownloadOptions,
        extractor: Arc<dyn Extractor + Send + Sync>,
        transcoder: Arc<dyn Transcoder + Send + Sync>,
    ) -> Result<Self, DownloadError> {
        extractor.check_available().await?;
        if options.extract_audio {
            transcoder.check_available().await?;
        }

        // Create directories if they don't exist
        tokio::fs::create_dir_all(&options.output_dir).await?;
        options.output_dir = dunce::canonicalize(&options.output_dir)?;

        let temp_path = options.output_dir.join("temp");
        tokio::fs::create_dir_all(&temp_path).await?;

        Ok(Self {
            options,
            temp_path,
            extractor,
            transcoder,
        })
    }

    /// Canonical output directory
    pub fn output_dir(&self) -> &Path {
        &self.options.output_dir
    }

    /// Download one video, optionally extracting its audio
    pub async fn download(&self, url: &str) -> Result<DownloadReport, DownloadError> {
        let url = Url::parse(url).map_err(|e| DownloadError::InvalidUrl(format!("{}: {}", url, e)))?;

        // Scratch space for this download only; removed on drop
        let temp_dir = TempDir::new_in(&self.temp_path)?;

        let metadata = self.extractor.fetch_metadata(&url, temp_dir.path()).await?;
        let selection = select_stream(&metadata.streams, self.options.resolution)?;
        tracing::info!("Downloading '{}' at {}", metadata.title, selection);

        let video_name = output_file_name(&metadata.title, VIDEO_EXTENSION);
        let temp_video = temp_dir.path().join(&video_name);
        self.extractor
            .download(&url, &selection, &temp_video, temp_dir.path())
            .await?;

        // Only finished files are moved out of the scratch dir
        let audio_path = if self.options.extract_audio {
            let audio_name = output_file_name(&metadata.title, AUDIO_EXTENSION);
            let temp_audio = temp_dir.path().join(&audio_name);
            self.transcoder.extract_audio(&temp_video, &temp_audio).await?;

            let audio_path = self.options.output_dir.join(&audio_name);
            tokio::fs::rename(&temp_audio, &audio_path).await?;
            Some(audio_path)
        } else {
            None
        };

        let video_path = if audio_path.is_none() || self.options.keep_video {
            let video_path = self.options.output_dir.join(&video_name);
            tokio::fs::rename(&temp_video, &video_path).await?;
            Some(video_path)
        } else {
            None
        };

        Ok(DownloadReport {
            metadata,
            resolution: selection.resolution(),
            video_path,
            audio_path,
            downloaded_at: chrono::Utc::now(),
        })
    }

    /// Download every URL with at most `jobs` downloads in flight
    ///
    /// Results come back in input order. A failed URL does not stop the
    /// others; callers decide how to surface failures.
    pub async fn download_all(&self, urls: Vec<String>, jobs: NonZeroUsize) -> Vec<BatchResult> {
        tracing::info!("Downloading {} videos with {} workers", urls.len(), jobs);

        futures::stream::iter(urls)
            .map(|url| async move {
                let result = self.download(&url).await;
                if let Err(error) = &result {
                    tracing::warn!("Download of {} failed: {}", url, error);
                }
                (url, result)
            })
            .buffered(jobs.get())
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::ffmpeg::stub::TranscoderStub;
    use std::fs;
    use tempfile::TempDir;
    use crate::ytdlp::stub::ExtractorStub;

    fn streams() -> Vec<Stream> {
        vec![
            Stream {
                format_id: "18".to_string(),
                ext: "mp4".to_string(),
                height: Some(360),
                fps: Some(30.0),
                vcodec: Some("avc1".to_string()),
                acodec: Some("mp4a".to_string()),
                tbr: Some(500.0),
                filesize: None,
            },
            Stream {
                format_id: "137".to_string(),
                ext: "mp4".to_string(),
                height: Some(1080),
                fps: Some(30.0),
                vcodec: Some("avc1".to_string()),
                acodec: Some("none".to_string()),
                tbr: Some(4400.0),
                filesize: None,
            },
            Stream {
                format_id: "140".to_string(),
                ext: "m4a".to_string(),
                height: None,
                fps: None,
                vcodec: Some("none".to_string()),
                acodec: Some("mp4a".to_string()),
                tbr: Some(128.0),
                filesize: None,
            },
        ]
    }

    async fn downloader(
        options: DownloadOptions,
        extractor: ExtractorStub,
    ) -> (MediaDownloader, Arc<ExtractorStub>, Arc<TranscoderStub>) {
        let extractor = Arc::new(extractor);
        let transcoder = Arc::new(TranscoderStub::default());
        let downloader = MediaDownloader::new_with(options, extractor.clone(), transcoder.clone())
            .await
            .unwrap();
        (downloader, extractor, transcoder)
    }

    #[tokio::test]
    async fn test_downloader_creation() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("videos");
        let downloader = MediaDownloader::new_with(
            DownloadOptions::new(&output),
            Arc::new(ExtractorStub::new(streams())),
            Arc::new(TranscoderStub::default()),
        )
        .await;

        assert!(
            downloader.is_ok(),
            "Downloader creation failed with error: {:?}",
            downloader.err()
        );

        let temp_path = output.join("temp");
        match fs::metadata(&temp_path) {
            Ok(_) => (),
            Err(e) => panic!(
                "Temp directory '{}' was not created: {}",
                temp_path.display(),
                e
            ),
        }
    }

    #[tokio::test]
    async fn test_download_highest_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let (downloader, extractor, transcoder) =
            downloader(DownloadOptions::new(temp_dir.path()), ExtractorStub::new(streams())).await;

        let report = downloader
            .download("https://example.com/v/Lecture1.Intro")
            .await
            .unwrap();

        assert_eq!(report.metadata.author.as_deref(), Some("Test Author"));
        assert_eq!(report.resolution, Resolution::new(1080).ok());
        assert_eq!(
            report.video_path,
            Some(downloader.output_dir().join("Lecture1.Intro.mp4"))
        );
        assert!(report.audio_path.is_none());
        assert!(temp_dir.path().join("Lecture1.Intro.mp4").is_file());

        assert_eq!(extractor.downloads.lock()[0].1, "137+140");
        assert!(transcoder.extracted.lock().is_empty());
    }

    #[tokio::test]
    async fn test_download_requested_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let mut options = DownloadOptions::new(temp_dir.path());
        options.resolution = Resolution::new(360).ok();
        let (downloader, extractor, _) = downloader(options, ExtractorStub::new(streams())).await;

        let report = downloader.download("https://example.com/clip").await.unwrap();

        assert_eq!(report.resolution, Resolution::new(360).ok());
        assert_eq!(extractor.downloads.lock()[0].1, "18");
    }

    #[tokio::test]
    async fn test_unavailable_resolution_fails_before_download() {
        let temp_dir = TempDir::new().unwrap();
        let mut options = DownloadOptions::new(temp_dir.path());
        options.resolution = Resolution::new(720).ok();
        let (downloader, extractor, _) = downloader(options, ExtractorStub::new(streams())).await;

        let result = downloader.download("https://example.com/clip").await;

        assert_matches!(result, Err(DownloadError::ResolutionUnavailable { .. }));
        assert!(extractor.downloads.lock().is_empty());
    }

    #[tokio::test]
    async fn test_mp3_extraction_removes_video() {
        let temp_dir = TempDir::new().unwrap();
        let mut options = DownloadOptions::new(temp_dir.path());
        options.extract_audio = true;
        let (downloader, _, transcoder) = downloader(options, ExtractorStub::new(streams())).await;

        let report = downloader.download("https://example.com/podcast").await.unwrap();

        let mp3 = downloader.output_dir().join("podcast.mp3");
        assert_eq!(report.audio_path.as_deref(), Some(mp3.as_path()));
        assert!(report.video_path.is_none());
        assert!(mp3.is_file());
        assert!(!temp_dir.path().join("podcast.mp4").exists());
        assert_eq!(transcoder.extracted.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_mp3_extraction_can_keep_video() {
        let temp_dir = TempDir::new().unwrap();
        let mut options = DownloadOptions::new(temp_dir.path());
        options.extract_audio = true;
        options.keep_video = true;
        let (downloader, _, _) = downloader(options, ExtractorStub::new(streams())).await;

        let report = downloader.download("https://example.com/podcast").await.unwrap();

        assert!(report.audio_path.is_some());
        assert_eq!(report.video_path, Some(downloader.output_dir().join("podcast.mp4")));
        assert!(temp_dir.path().join("podcast.mp4").is_file());
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let temp_dir = TempDir::new().unwrap();
        let (downloader, _, _) =
            downloader(DownloadOptions::new(temp_dir.path()), ExtractorStub::new(streams())).await;

        assert_matches!(
            downloader.download("not a url").await,
            Err(DownloadError::InvalidUrl(_))
        );
    }

    #[tokio::test]
    async fn test_temp_dirs_are_cleaned_up() {
        let temp_dir = TempDir::new().unwrap();
        let (downloader, _, _) =
            downloader(DownloadOptions::new(temp_dir.path()), ExtractorStub::new(streams())).await;

        downloader.download("https://example.com/clip").await.unwrap();

        let leftovers = fs::read_dir(temp_dir.path().join("temp")).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_download_all_keeps_order_and_isolates_failures() {
        let temp_dir = TempDir::new().unwrap();
        let extractor = ExtractorStub::new(streams()).failing_on("broken");
        let (downloader, extractor, _) =
            downloader(DownloadOptions::new(temp_dir.path()), extractor).await;

        let urls: Vec<String> = ["one", "broken", "three", "four"]
            .iter()
            .map(|name| format!("https://example.com/{}", name))
            .collect();

        let results = downloader
            .download_all(urls.clone(), NonZeroUsize::new(2).unwrap())
            .await;

        let returned: Vec<&String> = results.iter().map(|(url, _)| url).collect();
        assert_eq!(returned, urls.iter().collect::<Vec<_>>());

        assert!(results[0].1.is_ok());
        assert_matches!(results[1].1, Err(DownloadError::DownloadFailed(_)));
        assert!(results[2].1.is_ok());
        assert!(results[3].1.is_ok());

        assert_eq!(extractor.downloads.lock().len(), 3);
        for name in ["one", "three", "four"] {
            let path = temp_dir.path().join(format!("{}.mp4", name));
            assert!(path.is_file(), "{} should exist", path.display());
        }
    }

    #[tokio::test]
    async fn test_duplicate_urls_with_mp3_both_succeed() {
        let temp_dir = TempDir::new().unwrap();
        let mut options = DownloadOptions::new(temp_dir.path());
        options.extract_audio = true;
        let transcoder = Arc::new(TranscoderStub {
            delay: Some(std::time::Duration::from_millis(100)),
            ..Default::default()
        });
        let downloader = MediaDownloader::new_with(
            options,
            Arc::new(ExtractorStub::new(streams())),
            transcoder.clone(),
        )
        .await
        .unwrap();

        let urls = vec!["https://example.com/same".to_string(); 2];
        let results = downloader
            .download_all(urls, NonZeroUsize::new(2).unwrap())
            .await;

        for (url, result) in &results {
            assert!(result.is_ok(), "{} failed: {:?}", url, result);
        }
        assert_eq!(transcoder.extracted.lock().len(), 2);
        assert!(downloader.output_dir().join("same.mp3").is_file());
        assert!(!downloader.output_dir().join("same.mp4").exists());
    }
}
