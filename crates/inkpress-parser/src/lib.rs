//! inkpress Parser Library
//!
//! Turns markdown source documents into [`Post`] values.

pub mod markdown;

use std::{fs, path::Path};

use inkpress_core::{
    CoreError, Post, PostFrontmatter, Result, SiteSettings, frontmatter::parse_document,
    post::slug_from_path,
};
pub use markdown::MarkdownRenderer;
use tracing::debug;

/// Builds posts from source documents.
#[derive(Debug, Clone, Default)]
pub struct PostParser {
    renderer: MarkdownRenderer,
}

impl PostParser {
    /// Create a new post parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a post from disk.
    pub fn read(&self, path: &Path, site: &SiteSettings) -> Result<Post> {
        let content = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        self.parse(&content, path, site)
    }

    /// Parse a post from document content. `path` supplies the slug and error context.
    pub fn parse(&self, content: &str, path: &Path, site: &SiteSettings) -> Result<Post> {
        let slug = slug_from_path(path)
            .ok_or_else(|| CoreError::malformed(path, "cannot derive a slug from the file name"))?;

        let doc = parse_document(content, path)?;
        let frontmatter = PostFrontmatter::from_mapping(&doc.header, path)?;
        let html = self.renderer.render(doc.body);

        debug!(path = %path.display(), slug = %slug, "parsed post");
        Ok(Post::new(slug, frontmatter, doc.body, html, site))
    }
}
