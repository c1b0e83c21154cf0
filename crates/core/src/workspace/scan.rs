//! Input directory scanning.

use std::path::{Path, PathBuf};
use tokio::fs;

use super::error::WorkspaceError;

/// File extensions accepted as conversion input.
pub const CONVERTIBLE_EXTENSIONS: &[&str] = &["webm", "mkv", "avi", "mov", "flv"];

/// Whether a path carries one of the convertible extensions.
///
/// The comparison is case-insensitive, so `MOVIE.MKV` is picked up too.
pub fn is_convertible(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            CONVERTIBLE_EXTENSIONS
                .iter()
                .any(|known| e.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Lists the convertible files directly inside `dir`.
///
/// Subdirectories are not descended into, and a directory entry is skipped
/// even when its name carries a convertible extension. The result is sorted
/// so runs over the same directory process files in the same order.
pub async fn list_convertible_inputs(dir: &Path) -> Result<Vec<PathBuf>, WorkspaceError> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| WorkspaceError::ReadFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;

    let mut inputs = Vec::new();

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| WorkspaceError::ReadFailed {
            path: dir.to_path_buf(),
            source: e,
        })?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| WorkspaceError::ReadFailed {
                path: entry.path(),
                source: e,
            })?;

        if !file_type.is_file() {
            continue;
        }

        let path = entry.path();
        if is_convertible(&path) {
            inputs.push(path);
        }
    }

    inputs.sort();

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn touch(path: &Path) {
        fs::write(path, b"").await.unwrap();
    }

    #[test]
    fn test_is_convertible() {
        assert!(is_convertible(Path::new("clip.webm")));
        assert!(is_convertible(Path::new("movie.mkv")));
        assert!(is_convertible(Path::new("old.avi")));
        assert!(is_convertible(Path::new("trailer.mov")));
        assert!(is_convertible(Path::new("stream.flv")));

        assert!(!is_convertible(Path::new("video.mp4")));
        assert!(!is_convertible(Path::new("notes.txt")));
        assert!(!is_convertible(Path::new("no_extension")));
    }

    #[test]
    fn test_is_convertible_ignores_case() {
        assert!(is_convertible(Path::new("MOVIE.MKV")));
        assert!(is_convertible(Path::new("Clip.WebM")));
    }

    #[tokio::test]
    async fn test_lists_only_convertible_files() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("clip.webm")).await;
        touch(&temp.path().join("movie.mkv")).await;
        touch(&temp.path().join("notes.txt")).await;
        touch(&temp.path().join("poster.jpg")).await;

        let inputs = list_convertible_inputs(temp.path()).await.unwrap();

        assert_eq!(inputs.len(), 2);
        assert!(inputs.iter().all(|p| is_convertible(p)));
    }

    #[tokio::test]
    async fn test_skips_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("season1.mkv")).await.unwrap();
        touch(&temp.path().join("episode.mkv")).await;

        let inputs = list_convertible_inputs(temp.path()).await.unwrap();

        assert_eq!(inputs, vec![temp.path().join("episode.mkv")]);
    }

    #[tokio::test]
    async fn test_does_not_descend_into_subdirectories() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("nested");
        fs::create_dir(&nested).await.unwrap();
        touch(&nested.join("hidden.webm")).await;
        touch(&temp.path().join("visible.webm")).await;

        let inputs = list_convertible_inputs(temp.path()).await.unwrap();

        assert_eq!(inputs, vec![temp.path().join("visible.webm")]);
    }

    #[tokio::test]
    async fn test_result_is_sorted() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("c.mov")).await;
        touch(&temp.path().join("a.webm")).await;
        touch(&temp.path().join("b.avi")).await;

        let inputs = list_convertible_inputs(temp.path()).await.unwrap();

        assert_eq!(
            inputs,
            vec![
                temp.path().join("a.webm"),
                temp.path().join("b.avi"),
                temp.path().join("c.mov"),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let temp = TempDir::new().unwrap();
        let inputs = list_convertible_inputs(temp.path()).await.unwrap();
        assert!(inputs.is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("does-not-exist");

        let result = list_convertible_inputs(&missing).await;
        assert!(matches!(result, Err(WorkspaceError::ReadFailed { .. })));
    }
}
