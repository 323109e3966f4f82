//! Input discovery: directory globbing by extension and CSV path columns.
//!
//! These produce the input sequences fed to the batch engine; they add no
//! concurrency or failure semantics beyond missing-file pre-checks.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{AiornotError, Result};

/// Extensions accepted for image batches.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "heic", "heif", "tiff", "gif", "bmp",
];

/// Extensions accepted for video batches.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v"];

/// Extensions accepted for voice and music batches.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "m4a", "ogg", "aac", "wma"];

/// Collect files under `dir` whose extension matches (case-insensitive),
/// sorted by path for deterministic batch ordering.
pub fn collect_dir_files(dir: &Path, extensions: &[&str], recursive: bool) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AiornotError::dir_not_found(dir));
    }

    let walker = if recursive {
        WalkDir::new(dir)
    } else {
        WalkDir::new(dir).max_depth(1)
    };

    let mut files: Vec<PathBuf> = walker
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file() && has_extension(entry.path(), extensions))
        .map(|entry| entry.path().to_path_buf())
        .collect();

    files.sort();
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            extensions.iter().any(|candidate| *candidate == ext)
        })
        .unwrap_or(false)
}

/// Read file paths from a named CSV column, optionally joined onto a
/// base directory. The column must exist in the header row.
pub fn collect_csv_paths(
    csv_path: &Path,
    column: &str,
    base_dir: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut reader = csv::Reader::from_path(csv_path).map_err(|e| AiornotError::File {
        path: csv_path.to_path_buf(),
        message: format!("Failed to read CSV {}: {e}", csv_path.display()),
    })?;

    let headers = reader
        .headers()
        .map_err(|e| csv_error(csv_path, e))?
        .clone();
    let column_index = headers.iter().position(|h| h == column).ok_or_else(|| {
        AiornotError::File {
            path: csv_path.to_path_buf(),
            message: format!(
                "CSV column '{column}' not found. Available: {}",
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        }
    })?;

    let mut paths = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(csv_path, e))?;
        if let Some(value) = record.get(column_index) {
            let path = PathBuf::from(value);
            paths.push(match base_dir {
                Some(base) => base.join(path),
                None => path,
            });
        }
    }
    Ok(paths)
}

fn csv_error(path: &Path, err: csv::Error) -> AiornotError {
    AiornotError::File {
        path: path.to_path_buf(),
        message: format!("Failed to parse CSV {}: {err}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_dir_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.jpg"), b"x").unwrap();
        fs::write(dir.path().join("a.PNG"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.webp"), b"x").unwrap();

        let flat = collect_dir_files(dir.path(), IMAGE_EXTENSIONS, false).unwrap();
        let names: Vec<_> = flat
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.jpg"]);

        let recursive = collect_dir_files(dir.path(), IMAGE_EXTENSIONS, true).unwrap();
        assert_eq!(recursive.len(), 3);
    }

    #[test]
    fn test_collect_dir_files_missing_dir() {
        let err = collect_dir_files(Path::new("/definitely/not/here"), IMAGE_EXTENSIONS, false)
            .unwrap_err();
        assert_eq!(err.kind(), "file");
        assert!(err.to_string().contains("Directory not found"));
    }

    #[test]
    fn test_collect_csv_paths_with_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("inputs.csv");
        fs::write(&csv_path, "file_path,label\na.jpg,cat\nsub/b.jpg,dog\n").unwrap();

        let paths = collect_csv_paths(&csv_path, "file_path", Some(Path::new("/data"))).unwrap();
        assert_eq!(
            paths,
            vec![PathBuf::from("/data/a.jpg"), PathBuf::from("/data/sub/b.jpg")]
        );
    }

    #[test]
    fn test_collect_csv_paths_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("inputs.csv");
        fs::write(&csv_path, "path,label\na.jpg,cat\n").unwrap();

        let err = collect_csv_paths(&csv_path, "file_path", None).unwrap_err();
        assert!(err.to_string().contains("'file_path' not found"));
        assert!(err.to_string().contains("path, label"));
    }

    #[test]
    fn test_collect_csv_paths_missing_file() {
        let err = collect_csv_paths(Path::new("/no/such.csv"), "file_path", None).unwrap_err();
        assert_eq!(err.kind(), "file");
    }
}
