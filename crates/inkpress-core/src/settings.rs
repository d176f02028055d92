//! Site settings read from the settings document.
//!
//! The `_index.md` frontmatter forms the base layer; `INKPRESS_*` environment
//! variables override individual keys (`INKPRESS_TITLE`, `INKPRESS_URL`,
//! `INKPRESS_XMLURL`).

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    frontmatter::{SettingsFrontmatter, parse_document},
};

/// File name of the settings document inside the source directory.
pub const SETTINGS_FILENAME: &str = "_index.md";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "INKPRESS";

/// Site-wide settings shared read-only by every post of a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSettings {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Absolute URL of the feed.
    pub feed_url: String,
}

/// Keys as they appear in the settings document.
#[derive(Debug, Deserialize)]
struct SettingsLayer {
    title: String,
    url: String,
    xmlurl: String,
}

impl SiteSettings {
    /// Load settings from a settings document, applying environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        Self::parse(&content, path)
    }

    /// Parse settings from settings document content, applying environment overrides.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        Self::parse_with_env(content, path, None)
    }

    /// Parse settings with an explicit environment source instead of the process environment.
    pub fn parse_with_env(
        content: &str,
        path: &Path,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let doc = parse_document(content, path)?;
        let frontmatter = SettingsFrontmatter::from_mapping(&doc.header, path)?;
        Self::layered(frontmatter, env)
    }

    fn layered(
        frontmatter: SettingsFrontmatter,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let layer: SettingsLayer = config::Config::builder()
            .set_default("title", frontmatter.title)?
            .set_default("url", frontmatter.url)?
            .set_default("xmlurl", frontmatter.xmlurl)?
            .add_source(config::Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?
            .try_deserialize()?;

        if layer.url.ends_with('/') {
            tracing::warn!(url = %layer.url, "site url should not have a trailing slash");
        }

        Ok(Self {
            title: layer.title,
            base_url: layer.url,
            feed_url: layer.xmlurl,
        })
    }

    /// Get the full URL for a site-relative path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

/// Whether a path names the settings document.
pub fn is_settings_document(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name == SETTINGS_FILENAME)
}
