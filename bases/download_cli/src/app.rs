// bases/download_cli/src/app.rs
use crate::config::Config;
use crate::output::OutputHandler;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use media_downloader::{
    check_arguments, clean_url, load_url_list, BatchResult, Ffmpeg, MediaDownloader, YtDlp,
};
use std::sync::Arc;

pub struct App {
    config: Config,
    output: OutputHandler,
}

impl App {
    pub fn new(config: Config) -> Self {
        let output = OutputHandler::new(config.verbose);
        Self { config, output }
    }

    /// The single `--url` first, then the file's URLs in file order
    async fn collect_urls(&self) -> Result<Vec<String>> {
        let mut urls = Vec::new();
        if let Some(url) = &self.config.url {
            let url = clean_url(url);
            if !url.is_empty() {
                urls.push(url);
            }
        }
        if let Some(path) = &self.config.urls_file {
            urls.extend(load_url_list(path).await?);
        }
        Ok(urls)
    }

    fn downloader_tools(&self) -> (YtDlp, Ffmpeg) {
        let mut extractor = YtDlp::new(&self.config.yt_dlp);
        if self.config.ffmpeg_overridden {
            extractor = extractor.with_ffmpeg_location(&self.config.ffmpeg);
        }
        (extractor, Ffmpeg::new(&self.config.ffmpeg))
    }

    pub async fn run(&self) -> Result<()> {
        check_arguments(
            self.config.urls_file.as_deref(),
            &self.config.options.output_dir,
        )
        .await?;

        let urls = self.collect_urls().await?;
        tracing::debug!("Collected {} URL(s)", urls.len());
        if urls.is_empty() {
            self.output.print_nothing_to_do();
            return Ok(());
        }

        let (extractor, transcoder) = self.downloader_tools();
        let downloader = MediaDownloader::new_with(
            self.config.options.clone(),
            Arc::new(extractor),
            Arc::new(transcoder),
        )
        .await?;

        self.output.print_batch_start(urls.len(), self.config.jobs.get());

        let results = downloader.download_all(urls, self.config.jobs).await;
        self.report_results(&results)
    }

    /// Print every result and fail if any download failed
    fn report_results(&self, results: &[BatchResult]) -> Result<()> {
        let mut failed = 0;
        for (url, result) in results {
            match result {
                Ok(report) => self.output.print_download_complete(report),
                Err(error) => {
                    failed += 1;
                    self.output.print_download_failed(url, error);
                }
            }
        }

        if failed > 0 {
            return Err(eyre!("{} of {} downloads failed", failed, results.len()));
        }
        Ok(())
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }
}
