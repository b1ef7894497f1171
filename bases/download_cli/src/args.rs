// bases/download_cli/src/args.rs
use clap::{ArgGroup, Parser};
use media_downloader::Resolution;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Download videos from a URL or from every URL in a file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .multiple(true)
        .args(["url", "urls_file"])
))]
pub struct Args {
    /// URL of a single video to download
    #[arg(short, long)]
    pub url: Option<String>,

    /// Text file with one URL per line (.txt)
    #[arg(short = 'f', long, alias = "urls_file")]
    pub urls_file: Option<PathBuf>,

    /// Directory the videos are downloaded to
    #[arg(short, long, alias = "output_dir", default_value = ".")]
    pub output_dir: PathBuf,

    /// Resolution to download, e.g. 720p (default: highest available)
    #[arg(short, long)]
    pub resolution: Option<Resolution>,

    /// Extract the audio track as mp3
    #[arg(long)]
    pub mp3: bool,

    /// Keep the mp4 after extracting mp3
    #[arg(long, requires = "mp3")]
    pub keep_video: bool,

    /// Number of parallel downloads (default: number of CPUs)
    #[arg(short, long)]
    pub jobs: Option<NonZeroUsize>,

    /// yt-dlp executable
    #[arg(long = "yt-dlp", env = "YT_DLP_PATH", default_value = "yt-dlp")]
    pub yt_dlp: PathBuf,

    /// ffmpeg executable, also passed to yt-dlp for merging
    #[arg(long, env = "FFMPEG_PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
