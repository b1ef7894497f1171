// components/media_downloader/src/ffmpeg.rs
use crate::types::{DownloadError, Transcoder};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub const AUDIO_EXTENSION: &str = "mp3";

pub struct Ffmpeg {
    program: PathBuf,
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn extract_args(input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-y", "-hide_banner", "-loglevel", "error", "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(input.as_os_str().to_owned());
        args.extend(
            ["-vn", "-codec:a", "libmp3lame", "-q:a", "2"]
                .into_iter()
                .map(OsString::from),
        );
        args.push(output.as_os_str().to_owned());
        args
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl Transcoder for Ffmpeg {
    async fn check_available(&self) -> Result<(), DownloadError> {
        which::which(&self.program)
            .map(|_| ())
            .map_err(|_| DownloadError::DependencyNotFound(self.program.display().to_string()))
    }

    async fn extract_audio(&self, input: &Path, output: &Path) -> Result<(), DownloadError> {
        tracing::debug!("Extracting audio {} -> {}", input.display(), output.display());

        let result = Command::new(&self.program)
            .args(Self::extract_args(input, output))
            .output()
            .await?;

        if !result.status.success() {
            return Err(DownloadError::TranscodeFailed(format!(
                "{} exited with {}: {}",
                self.program.display(),
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            )));
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_args_drop_video_and_encode_mp3() {
        let args = Ffmpeg::extract_args(Path::new("in/Talk.mp4"), Path::new("out/Talk.mp3"));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "-y", "-hide_banner", "-loglevel", "error", "-i", "in/Talk.mp4", "-vn",
                "-codec:a", "libmp3lame", "-q:a", "2", "out/Talk.mp3",
            ]
        );
    }

    #[tokio::test]
    async fn missing_program_is_reported() {
        let ffmpeg = Ffmpeg::new("definitely-not-an-installed-ffmpeg");
        let result = ffmpeg.check_available().await;

        assert!(matches!(
            result,
            Err(DownloadError::DependencyNotFound(name)) if name == "definitely-not-an-installed-ffmpeg"
        ));
    }
}
