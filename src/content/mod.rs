//! Content module - validates submissions and renders them to Markdown

mod document;
mod frontmatter;
mod submission;

pub use document::{front_matter, render_markdown, Document};
pub use frontmatter::{frontmatter_value, FrontMatter};
pub use submission::{ContentKind, ContentSubmission, EventFields, DEFAULT_PUBLISH_DATE};
