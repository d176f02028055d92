//! Command implementations.

pub mod build;
pub mod watch;

use std::path::PathBuf;

use inkpress_generator::{BuildOptions, Builder};

/// Paths and switches shared by the build and watch commands.
#[derive(Debug, Clone)]
pub struct Options {
    /// Directory holding `_index.md` and the post sources.
    pub source: PathBuf,

    /// Output directory.
    pub output: PathBuf,

    /// Directory holding the three templates.
    pub templates: PathBuf,

    /// Optional static assets directory served under `/assets/`.
    pub assets: Option<PathBuf>,

    /// Build options passed to every build.
    pub build: BuildOptions,
}

impl Options {
    /// Create options with no assets directory and default build options.
    pub fn new(
        source: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        templates: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
            templates: templates.into(),
            assets: None,
            build: BuildOptions::default(),
        }
    }

    /// Builder for one full build with these options.
    pub fn builder(&self) -> Builder {
        Builder::new(&self.templates, &self.source, &self.output).with_options(self.build)
    }
}
