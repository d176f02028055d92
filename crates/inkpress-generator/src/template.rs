//! Template set for page and feed generation.
//!
//! Three templates with fixed file names are loaded from the templates
//! directory and rendered with Tera. Auto-escaping is off: post bodies are
//! already HTML and the feed uses the pre-escaped `xml_*` fields.

use std::path::{Path, PathBuf};

use inkpress_core::{Post, SiteIndex, SiteSettings};
use tera::{Context, Tera};
use thiserror::Error;

/// Template rendered once per post.
pub const POST_TEMPLATE: &str = "post.tmpl.html";

/// Template for the index page.
pub const INDEX_TEMPLATE: &str = "index.tmpl.html";

/// Template for the feed.
pub const FEED_TEMPLATE: &str = "index.tmpl.xml";

/// All template names, in load order.
pub const TEMPLATE_NAMES: [&str; 3] = [POST_TEMPLATE, INDEX_TEMPLATE, FEED_TEMPLATE];

/// Template loading and rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file not found.
    #[error("template not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A template failed to parse.
    #[error("failed to parse templates in {}: {source}", dir.display())]
    Parse {
        dir: PathBuf,
        #[source]
        source: tera::Error,
    },

    /// A template failed to execute.
    #[error("failed to render template {name}: {source}")]
    Render {
        name: &'static str,
        #[source]
        source: tera::Error,
    },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Paths of the three templates inside `dir`.
pub fn template_paths(dir: &Path) -> Vec<PathBuf> {
    TEMPLATE_NAMES.iter().map(|name| dir.join(name)).collect()
}

/// The parsed post, index and feed templates.
#[derive(Debug)]
pub struct TemplateSet {
    tera: Tera,
}

impl TemplateSet {
    /// Load and parse all three templates from `dir`.
    ///
    /// Fails if any template is missing or does not parse.
    pub fn load(dir: &Path) -> Result<Self> {
        let paths = template_paths(dir);
        if let Some(missing) = paths.iter().find(|path| !path.is_file()) {
            return Err(TemplateError::NotFound(missing.clone()));
        }

        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        tera.add_template_files(
            paths
                .iter()
                .zip(TEMPLATE_NAMES)
                .map(|(path, name)| (path, Some(name)))
                .collect::<Vec<_>>(),
        )
        .map_err(|source| TemplateError::Parse {
            dir: dir.to_path_buf(),
            source,
        })?;

        Ok(Self { tera })
    }

    /// Render a post page. The post's fields are top-level variables and the
    /// site settings are available as `site`.
    pub fn render_post(&self, post: &Post, site: &SiteSettings) -> Result<String> {
        let mut context = context_from(POST_TEMPLATE, post)?;
        context.insert("site", site);
        self.render(POST_TEMPLATE, &context)
    }

    /// Render the index page.
    pub fn render_index(&self, index: &SiteIndex) -> Result<String> {
        let context = context_from(INDEX_TEMPLATE, index)?;
        self.render(INDEX_TEMPLATE, &context)
    }

    /// Render the feed.
    pub fn render_feed(&self, index: &SiteIndex) -> Result<String> {
        let context = context_from(FEED_TEMPLATE, index)?;
        self.render(FEED_TEMPLATE, &context)
    }

    fn render(&self, name: &'static str, context: &Context) -> Result<String> {
        self.tera
            .render(name, context)
            .map_err(|source| TemplateError::Render { name, source })
    }
}

fn context_from(name: &'static str, value: &impl serde::Serialize) -> Result<Context> {
    Context::from_serialize(value).map_err(|source| TemplateError::Render { name, source })
}
