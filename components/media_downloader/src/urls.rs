// components/media_downloader/src/urls.rs
use crate::types::DownloadError;
use std::path::Path;

const URLS_FILE_EXTENSION: &str = "txt";

/// Remove every whitespace character a copy-pasted URL tends to pick up
///
/// Unlike `trim`, this also removes characters in the middle of the line.
pub fn clean_url(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '\n' | '\t' | '\r'))
        .collect()
}

fn check_urls_file(path: &Path) -> Result<(), DownloadError> {
    if !path.exists() {
        return Err(DownloadError::UrlsFileMissing(path.to_path_buf()));
    }
    if path.extension().and_then(|e| e.to_str()) != Some(URLS_FILE_EXTENSION) {
        return Err(DownloadError::UrlsFileFormat(path.to_path_buf()));
    }
    Ok(())
}

/// Validate the URL list (if any) and make sure the output directory exists
pub async fn check_arguments(
    urls_file: Option<&Path>,
    output_dir: &Path,
) -> Result<(), DownloadError> {
    if let Some(path) = urls_file {
        check_urls_file(path)?;
    }

    if !output_dir.exists() {
        tracing::info!("Creating output directory {}", output_dir.display());
        tokio::fs::create_dir_all(output_dir).await?;
    }

    Ok(())
}

/// Read one URL per line, cleaned, skipping lines that end up empty
pub async fn load_url_list(path: &Path) -> Result<Vec<String>, DownloadError> {
    check_urls_file(path)?;

    let content = tokio::fs::read_to_string(path).await?;
    let urls: Vec<String> = content
        .lines()
        .map(clean_url)
        .filter(|url| !url.is_empty())
        .collect();

    tracing::debug!("Loaded {} urls from {}", urls.len(), path.display());
    Ok(urls)
}
