//! Rendering a submission into the file that gets committed

use super::frontmatter::FrontMatter;
use super::submission::{ContentKind, ContentSubmission};

/// A rendered content file, ready to commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Repository path, e.g. `content/blogs/2024-01-02-hello-world.md`
    pub path: String,
    /// Markdown with front-matter
    pub content: String,
    /// Commit message
    pub message: String,
}

impl Document {
    pub fn from_submission(submission: &ContentSubmission) -> Self {
        Self {
            path: submission.path(),
            content: render_markdown(submission),
            message: submission.commit_message(),
        }
    }
}

/// Build the front-matter block for a submission
pub fn front_matter(submission: &ContentSubmission) -> FrontMatter {
    let mut fm = FrontMatter::new();
    fm.text("title", &submission.title)
        .text("date", &submission.date_prefix())
        .text("author", &submission.author);

    match &submission.kind {
        ContentKind::Blog => {
            fm.optional("image", submission.image.as_deref());
        }
        ContentKind::Event(event) => {
            fm.text("publishdate", &event.publishdate)
                .optional("location", event.location.as_deref())
                .optional("time", event.time.as_deref())
                .optional("organiser", event.organiser.as_deref())
                .optional("image", submission.image.as_deref());
            if let Some(show_signup) = event.show_signup {
                fm.flag("show_signup", show_signup);
            }
            fm.optional("signup_link", event.signup_link.as_deref());
        }
    }

    fm
}

/// Render the full Markdown file
pub fn render_markdown(submission: &ContentSubmission) -> String {
    front_matter(submission).render(&submission.body)
}
