// components/media_downloader/src/utils.rs
use std::path::PathBuf;

const FALLBACK_STEM: &str = "video";

/// Longest file name, in bytes, accepted by common filesystems
const MAX_FILE_NAME_BYTES: usize = 255;

/// File name for a downloaded title with the given extension
///
/// The extension is appended rather than substituted so titles containing
/// dots ("Ep. 1") keep their full text.
pub fn output_file_name(title: &str, ext: &str) -> PathBuf {
    let stem = sanitize_filename::sanitize(title.trim());
    let stem = stem.trim();
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };
    let stem = truncate_on_char_boundary(stem, MAX_FILE_NAME_BYTES - ext.len() - 1).trim_end();

    PathBuf::from(format!("{}.{}", stem, ext))
}

fn truncate_on_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        let filename = output_file_name("Test Video", "mp4");
        assert_eq!(filename, PathBuf::from("Test Video.mp4"));
    }

    #[test]
    fn test_dots_in_title_are_kept() {
        let filename = output_file_name("Lecture 3. Backprop v2.1", "mp3");
        assert_eq!(filename, PathBuf::from("Lecture 3. Backprop v2.1.mp3"));
    }

    #[test]
    fn test_invalid_characters_are_removed() {
        let filename = output_file_name(r#"a test/file:with*invalid?chars"#, "mp4");
        let filename_str = filename.to_string_lossy();

        for forbidden in ['/', ':', '*', '?'] {
            assert!(
                !filename_str.contains(forbidden),
                "filename '{}' should not contain '{}'",
                filename_str,
                forbidden
            );
        }
        assert!(filename_str.ends_with(".mp4"));
    }

    #[test]
    fn test_empty_title_falls_back() {
        assert_eq!(output_file_name("  ", "mp4"), PathBuf::from("video.mp4"));
        assert_eq!(output_file_name("///", "mp4"), PathBuf::from("video.mp4"));
    }

    #[test]
    fn test_long_multibyte_title_fits_file_name_limit() {
        let filename = output_file_name(&"日".repeat(100), "mp4");
        let name = filename.to_str().unwrap();

        assert!(name.len() <= MAX_FILE_NAME_BYTES, "{} bytes", name.len());
        assert!(name.ends_with(".mp4"));
        assert!(name.starts_with("日日日"));

        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(&filename), b"video").unwrap();
    }

    #[test]
    fn test_short_title_is_not_truncated() {
        let title = "a".repeat(MAX_FILE_NAME_BYTES - 4);
        let filename = output_file_name(&title, "mp4");
        assert_eq!(filename.to_str().unwrap().len(), MAX_FILE_NAME_BYTES);
    }
}
