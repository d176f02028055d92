//! Source discovery.
//!
//! Lists the markdown files directly inside the source directory and separates
//! the settings document from the posts.

use std::path::{Path, PathBuf};

use inkpress_core::{SETTINGS_FILENAME, settings::is_settings_document};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Extension of source documents.
pub const SOURCE_EXTENSION: &str = "md";

/// Source discovery errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The source directory could not be listed.
    #[error("cannot list source directory {}: {source}", dir.display())]
    Walk {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The settings document is missing.
    #[error("settings document {} not found", .0.display())]
    MissingSettings(PathBuf),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// The source documents of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    /// Path of the settings document.
    pub settings: PathBuf,

    /// Post documents in file-name order.
    pub posts: Vec<PathBuf>,
}

impl SourceSet {
    /// Discover the settings document and posts in `source_dir`.
    pub fn discover(source_dir: &Path) -> Result<Self> {
        let settings = source_dir.join(SETTINGS_FILENAME);
        if !settings.is_file() {
            return Err(CollectorError::MissingSettings(settings));
        }

        let posts: Vec<_> = list_source_files(source_dir)?
            .into_iter()
            .filter(|path| !is_settings_document(path))
            .collect();

        debug!(dir = %source_dir.display(), count = posts.len(), "discovered posts");
        Ok(Self { settings, posts })
    }

    /// The settings document followed by every post.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.settings.as_path()).chain(self.posts.iter().map(PathBuf::as_path))
    }
}

/// List `*.md` files directly inside `dir`, sorted by file name.
pub fn list_source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| CollectorError::Walk {
            dir: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) && path.is_file() {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn source_dir(files: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in files {
            fs::write(dir.path().join(name), "").unwrap();
        }
        dir
    }

    #[test]
    fn test_discover_excludes_settings() {
        let dir = source_dir(&["_index.md", "b.md", "a.md", "notes.txt"]);
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let sources = SourceSet::discover(dir.path()).unwrap();

        assert_eq!(sources.settings, dir.path().join("_index.md"));
        assert_eq!(
            sources.posts,
            vec![dir.path().join("a.md"), dir.path().join("b.md")]
        );
    }

    #[test]
    fn test_files_lists_settings_first() {
        let dir = source_dir(&["_index.md", "post.md"]);
        let sources = SourceSet::discover(dir.path()).unwrap();

        let files: Vec<PathBuf> = sources.files().map(Path::to_path_buf).collect();
        assert_eq!(
            files,
            vec![dir.path().join("_index.md"), dir.path().join("post.md")]
        );
    }

    #[test]
    fn test_missing_settings() {
        let dir = source_dir(&["post.md"]);
        let err = SourceSet::discover(dir.path()).unwrap_err();
        assert!(matches!(err, CollectorError::MissingSettings(_)));
    }

    #[test]
    fn test_list_ignores_subdirectories() {
        let dir = source_dir(&["top.md"]);
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts/deep.md"), "").unwrap();

        let files = list_source_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("top.md")]);
    }

    #[test]
    fn test_list_missing_directory() {
        let err = list_source_files(Path::new("/nonexistent/source")).unwrap_err();
        assert!(matches!(err, CollectorError::Walk { .. }));
    }
}
