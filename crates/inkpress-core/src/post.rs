//! Post model: one parsed source file.

use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use quick_xml::escape::escape;
use serde::Serialize;

use crate::{frontmatter::PostFrontmatter, settings::SiteSettings};

/// Directory (relative to the output root) holding post pages.
pub const POST_DIR: &str = "post";

/// Number of raw body bytes used for the feed excerpt.
pub const EXCERPT_BYTES: usize = 200;

/// A fully processed post ready for rendering.
///
/// Built fresh from its source file on every build and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Identifier derived from the file name.
    pub slug: String,

    /// Post title.
    pub title: String,

    /// Publication date.
    pub date: Option<NaiveDate>,

    /// Whether this is a draft.
    pub draft: bool,

    /// Rendered HTML body.
    pub body: String,

    /// Plain-text excerpt of the raw body.
    pub description: String,

    /// Output location relative to the output directory.
    pub output_path: String,

    /// Absolute URL of the post page.
    pub link: String,

    /// Site-relative URL of the post page.
    pub relative_link: String,

    /// Stable feed identifier.
    pub guid: String,

    /// RFC 2822 publication timestamp for feeds.
    pub pub_date: Option<String>,

    /// XML-escaped title.
    pub xml_title: String,

    /// XML-escaped excerpt.
    pub xml_description: String,
}

impl Post {
    /// Assemble a post from its parts.
    ///
    /// `raw_body` is the markdown before rendering and `html` the rendered body.
    pub fn new(
        slug: impl Into<String>,
        frontmatter: PostFrontmatter,
        raw_body: &str,
        html: String,
        site: &SiteSettings,
    ) -> Self {
        let slug = slug.into();
        let output_path = format!("{POST_DIR}/{slug}.html");
        let relative_link = format!("/{output_path}");
        let link = site.url_for(&relative_link);
        let description = excerpt(raw_body, EXCERPT_BYTES).to_string();

        Self {
            xml_title: escape(frontmatter.title.as_str()).into_owned(),
            xml_description: escape(description.as_str()).into_owned(),
            pub_date: frontmatter
                .date
                .map(|date| date.and_time(NaiveTime::MIN).and_utc().to_rfc2822()),
            guid: link.clone(),
            slug,
            title: frontmatter.title,
            date: frontmatter.date,
            draft: frontmatter.draft,
            body: html,
            description,
            output_path,
            link,
            relative_link,
        }
    }
}

/// Derive a post slug from its source path: the file name without extension.
pub fn slug_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

/// Take at most `limit` bytes from the start of `raw`, trimmed.
///
/// The cut is moved back to the nearest character boundary so multi-byte
/// characters are never split.
pub fn excerpt(raw: &str, limit: usize) -> &str {
    let mut end = limit.min(raw.len());
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    raw[..end].trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteSettings {
        SiteSettings {
            title: "My Blog".to_string(),
            base_url: "http://example.com".to_string(),
            feed_url: "http://example.com/index.xml".to_string(),
        }
    }

    fn frontmatter(title: &str, date: Option<NaiveDate>) -> PostFrontmatter {
        PostFrontmatter {
            title: title.to_string(),
            date,
            draft: false,
        }
    }

    #[test]
    fn test_post_urls() {
        let post = Post::new(
            "hello",
            frontmatter("Hello", None),
            "# Hi\n",
            "<h1>Hi</h1>\n".to_string(),
            &site(),
        );

        assert_eq!(post.output_path, "post/hello.html");
        assert_eq!(post.relative_link, "/post/hello.html");
        assert_eq!(post.link, "http://example.com/post/hello.html");
        assert_eq!(post.guid, post.link);
    }

    #[test]
    fn test_xml_fields_are_escaped() {
        let post = Post::new(
            "amp",
            frontmatter("Fish & <Chips>", None),
            "\n  a < b && c  \n",
            String::new(),
            &site(),
        );

        assert_eq!(post.xml_title, "Fish &amp; &lt;Chips&gt;");
        assert_eq!(post.description, "a < b && c");
        assert_eq!(post.xml_description, "a &lt; b &amp;&amp; c");
    }

    #[test]
    fn test_pub_date() {
        let post = Post::new(
            "dated",
            frontmatter("Dated", NaiveDate::from_ymd_opt(2021, 5, 1)),
            "",
            String::new(),
            &site(),
        );

        assert_eq!(post.pub_date.as_deref(), Some("Sat, 1 May 2021 00:00:00 +0000"));
    }

    #[test]
    fn test_excerpt_short_body() {
        assert_eq!(excerpt("\n\nshort body\n", EXCERPT_BYTES), "short body");
        assert_eq!(excerpt("", EXCERPT_BYTES), "");
    }

    #[test]
    fn test_excerpt_clamps_to_limit() {
        let body = "x".repeat(500);
        assert_eq!(excerpt(&body, EXCERPT_BYTES).len(), 200);
    }

    #[test]
    fn test_excerpt_respects_char_boundary() {
        // 'é' is two bytes, so byte 200 falls inside the 100th character.
        let body = format!("a{}", "é".repeat(150));
        let cut = excerpt(&body, EXCERPT_BYTES);
        assert_eq!(cut.len(), 199);
        assert!(cut.ends_with('é'));
    }

    #[test]
    fn test_slug_from_path() {
        assert_eq!(
            slug_from_path(Path::new("src/hello.md")).as_deref(),
            Some("hello")
        );
        assert_eq!(
            slug_from_path(Path::new("src/v1.2-notes.md")).as_deref(),
            Some("v1.2-notes")
        );
    }
}
