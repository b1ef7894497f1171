// bases/download_cli/src/config.rs
use crate::args::Args;
use media_downloader::DownloadOptions;
use std::num::NonZeroUsize;
use std::path::PathBuf;

const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Download configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub url: Option<String>,
    pub urls_file: Option<PathBuf>,
    pub options: DownloadOptions,

    /// Maximum number of downloads in flight
    pub jobs: NonZeroUsize,

    pub yt_dlp: PathBuf,
    pub ffmpeg: PathBuf,

    /// Set when ffmpeg was chosen explicitly and yt-dlp should be told about it
    pub ffmpeg_overridden: bool,

    pub verbose: bool,
}

impl Config {
    /// Create configuration from CLI arguments
    pub fn from_args(args: Args) -> Self {
        let jobs = args.jobs.unwrap_or_else(default_jobs);

        let options = DownloadOptions {
            output_dir: args.output_dir,
            resolution: args.resolution,
            extract_audio: args.mp3,
            keep_video: args.keep_video,
        };

        Self {
            url: args.url,
            urls_file: args.urls_file,
            options,
            jobs,
            yt_dlp: args.yt_dlp,
            ffmpeg_overridden: args.ffmpeg.is_some(),
            ffmpeg: args.ffmpeg.unwrap_or_else(|| PathBuf::from(DEFAULT_FFMPEG)),
            verbose: args.verbose,
        }
    }

    /// Default tracing filter for this binary and the downloader component
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "download_cli=debug,media_downloader=debug"
        } else {
            "download_cli=info,media_downloader=info"
        }
    }
}

fn default_jobs() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}
