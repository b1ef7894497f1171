// bases/download_cli/src/output.rs
use media_downloader::{DownloadError, DownloadReport};

pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_nothing_to_do(&self) {
        println!("No URLs to download");
    }

    pub fn print_batch_start(&self, count: usize, jobs: usize) {
        if self.verbose {
            println!("Downloading {} video(s) with {} parallel job(s)", count, jobs);
        }
    }

    pub fn print_download_complete(&self, report: &DownloadReport) {
        println!("{}", report);

        if self.verbose {
            if let Some(resolution) = report.resolution {
                println!("  Resolution: {}", resolution);
            }
            if let Some(path) = &report.video_path {
                println!("  Video: {}", path.display());
            }
            if let Some(path) = &report.audio_path {
                println!("  Audio: {}", path.display());
            }
            if let Some(duration) = report.metadata.duration {
                println!("  Duration: {:.1} seconds", duration);
            }
            println!("  Source: {}", report.metadata.source_url);
            println!("  Download time: {}", report.downloaded_at);
        }
    }

    pub fn print_download_failed(&self, url: &str, error: &DownloadError) {
        eprintln!("{}", failure_line(url, error));
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        eprintln!("Error: {}", error);

        if self.verbose {
            eprintln!("\nError details:");
            error.chain().skip(1).for_each(|cause| {
                eprintln!("  caused by: {}", cause);
            });
        }
    }
}

fn failure_line(url: &str, error: &DownloadError) -> String {
    format!("Failed {}: {}", url, error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_line_names_url_and_error() {
        let error = DownloadError::DownloadFailed("Video unavailable".to_string());
        assert_eq!(
            failure_line("https://example.com/gone", &error),
            format!("Failed https://example.com/gone: {}", error)
        );
    }
}
