//! Site index: settings plus the ordered post collection.

use chrono::{DateTime, Utc};
use quick_xml::escape::escape;
use serde::Serialize;

use crate::{post::Post, settings::SiteSettings};

/// Site-wide aggregate used to render the index page and the feed.
///
/// One instance per build; never carried over to the next build.
#[derive(Debug, Clone, Serialize)]
pub struct SiteIndex {
    /// Site title.
    pub title: String,

    /// XML-escaped site title.
    pub xml_title: String,

    /// Base URL for the site.
    pub base_url: String,

    /// Absolute URL of the feed.
    pub feed_url: String,

    /// Time of the current build.
    pub updated_at: DateTime<Utc>,

    /// Build time formatted for feeds (RFC 2822).
    pub build_date: String,

    /// Posts, newest first once [`SiteIndex::sort_posts`] has run.
    pub posts: Vec<Post>,
}

impl SiteIndex {
    /// Create an empty index for a build started at `updated_at`.
    pub fn new(settings: &SiteSettings, updated_at: DateTime<Utc>) -> Self {
        Self {
            title: settings.title.clone(),
            xml_title: escape(settings.title.as_str()).into_owned(),
            base_url: settings.base_url.clone(),
            feed_url: settings.feed_url.clone(),
            updated_at,
            build_date: updated_at.to_rfc2822(),
            posts: Vec::new(),
        }
    }

    /// Append a post.
    pub fn push(&mut self, post: Post) {
        self.posts.push(post);
    }

    /// Order posts by publication date, newest first.
    ///
    /// The sort is stable: equally dated posts keep their insertion order.
    /// Undated posts sort last.
    pub fn sort_posts(&mut self) {
        self.posts.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Number of posts in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether the index has no posts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
