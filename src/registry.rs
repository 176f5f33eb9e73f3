//! Clip discovery: flat directory listing filtered by input extension.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{JoinError, JoinResult};
use crate::format::MediaFormat;

/// One discovered input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    /// Filename without extension.
    pub name: String,
    /// Path as enumerated; never mutated after discovery.
    pub path: PathBuf,
    /// Input container format.
    pub format: MediaFormat,
}

/// List `*.<format>` files directly under `source`, in filesystem enumeration
/// order. No re-sorting: grouping relies on the order being the listing
/// order, and enumeration is assumed chronological for correctly named clips.
pub fn discover_clips(source: &Path, format: MediaFormat) -> JoinResult<Vec<Clip>> {
    if !source.is_dir() {
        return Err(JoinError::SourceDirNotFound {
            path: source.to_path_buf(),
        });
    }

    let mut clips = Vec::new();
    for entry in WalkDir::new(source).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            JoinError::Io(e.into_io_error().unwrap_or_else(|| {
                io::Error::new(io::ErrorKind::Other, "directory walk failed")
            }))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(format.extension()))
            .unwrap_or(false);
        if !matches {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        clips.push(Clip {
            name,
            path: path.to_path_buf(),
            format,
        });
    }

    debug!(count = clips.len(), "discovered input clips");
    Ok(clips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn missing_directory_is_fatal() {
        let result = discover_clips(Path::new("/no/such/folder"), MediaFormat::Mov);
        assert!(matches!(result, Err(JoinError::SourceDirNotFound { .. })));
    }

    #[test]
    fn lists_only_matching_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["20240101_090000.mov", "20240101_090100.mov", "notes.txt", "cover.mp4"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let clips = discover_clips(dir.path(), MediaFormat::Mov).unwrap();
        let mut names: Vec<_> = clips.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, ["20240101_090000", "20240101_090100"]);
        assert!(clips.iter().all(|c| c.format == MediaFormat::Mov));
    }

    #[test]
    fn ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested.mov")).unwrap();
        File::create(dir.path().join("20240101_090000.mov")).unwrap();

        let clips = discover_clips(dir.path(), MediaFormat::Mov).unwrap();
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].name, "20240101_090000");
    }

    #[test]
    fn empty_directory_yields_no_clips() {
        let dir = tempfile::tempdir().unwrap();
        let clips = discover_clips(dir.path(), MediaFormat::Mov).unwrap();
        assert!(clips.is_empty());
    }
}
