//! inkpress Core Library
//!
//! Frontmatter parsing, the post and index models, site settings and error
//! handling for the inkpress static blog generator.

pub mod error;
pub mod frontmatter;
pub mod index;
pub mod post;
pub mod settings;

pub use error::{CoreError, Result};
pub use frontmatter::{Document, PostFrontmatter, SettingsFrontmatter, parse_document};
pub use index::SiteIndex;
pub use post::Post;
pub use settings::{SETTINGS_FILENAME, SiteSettings};
