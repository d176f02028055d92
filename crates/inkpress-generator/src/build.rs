//! Build orchestration.
//!
//! One call to [`Builder::build`] is one full, synchronous build: templates,
//! settings and every post are read from scratch and every output file is
//! regenerated.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use chrono::Utc;
use inkpress_core::{CoreError, Post, SiteIndex, SiteSettings, post::POST_DIR};
use inkpress_parser::PostParser;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    collector::{CollectorError, SourceSet},
    template::{TemplateError, TemplateSet},
};

/// Output file name of the index page.
pub const INDEX_OUTPUT: &str = "index.html";

/// Output file name of the feed.
pub const FEED_OUTPUT: &str = "index.xml";

/// Build errors. Any of them aborts the whole build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Source document error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Template loading or rendering error.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Source discovery error.
    #[error(transparent)]
    Collector(#[from] CollectorError),

    /// Output write or removal error.
    #[error("failed to update {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build options.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Leave drafts out of the output, the index and the feed.
    pub skip_drafts: bool,
}

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of post pages generated.
    pub posts: usize,

    /// Number of drafts seen (generated or skipped).
    pub drafts: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug, Clone)]
pub struct Builder {
    templates_dir: PathBuf,
    source_dir: PathBuf,
    output_dir: PathBuf,
    options: BuildOptions,
    parser: PostParser,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(
        templates_dir: impl Into<PathBuf>,
        source_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            options: BuildOptions::default(),
            parser: PostParser::new(),
        }
    }

    /// Set build options.
    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Execute one full build.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            source = %self.source_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        // 1. Templates; any failure here is fatal
        let templates = TemplateSet::load(&self.templates_dir)?;

        // 2. Settings first, then the post set
        let sources = SourceSet::discover(&self.source_dir)?;
        let settings = SiteSettings::load(&sources.settings)?;
        let mut index = SiteIndex::new(&settings, Utc::now());

        // 3. Parse every post, stopping at the first failure
        let posts = sources
            .posts
            .par_iter()
            .map(|path| self.parser.read(path, &settings))
            .collect::<inkpress_core::Result<Vec<Post>>>()?;

        self.create_dir(&self.output_dir.join(POST_DIR))?;

        for (path, post) in sources.posts.iter().zip(posts) {
            if post.draft {
                stats.drafts += 1;
                if self.options.skip_drafts {
                    self.remove(&post.output_path)?;
                    info!(post = %path.display(), "draft skipped");
                    continue;
                }
            }

            let html = templates.render_post(&post, &settings)?;
            let output = self.write(&post.output_path, &html)?;
            info!(post = %path.display(), output = %output.display(), "post generated");
            index.push(post);
        }

        // 4. Index page and feed, newest first
        index.sort_posts();
        stats.posts = index.len();

        let output = self.write(INDEX_OUTPUT, &templates.render_index(&index)?)?;
        info!(output = %output.display(), "page generated");

        let output = self.write(FEED_OUTPUT, &templates.render_feed(&index)?)?;
        info!(output = %output.display(), "feed generated");

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            posts = stats.posts,
            drafts = stats.drafts,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    fn create_dir(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|source| BuildError::Io {
            path: dir.to_path_buf(),
            source,
        })
    }

    /// Remove `relative` under the output directory if a previous build left it.
    fn remove(&self, relative: &str) -> Result<()> {
        let path = self.output_dir.join(relative);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed stale file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(BuildError::Io { path, source }),
        }
    }

    /// Write `contents` to `relative` under the output directory.
    fn write(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        let path = self.output_dir.join(relative);
        fs::write(&path, contents).map_err(|source| BuildError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = contents.len(), "wrote file");
        Ok(path)
    }
}
