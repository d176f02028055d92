//! inkpress Generator Library
//!
//! Build orchestration for inkpress:
//!
//! - [`collector`]: discovers the settings document and posts
//! - [`template`]: loads and renders the post, index and feed templates
//! - [`build`]: runs one full build into the output directory

pub mod build;
pub mod collector;
pub mod template;

pub use build::{BuildError, BuildOptions, BuildStats, Builder};
pub use collector::{CollectorError, SourceSet};
pub use template::{TemplateError, TemplateSet, template_paths};
