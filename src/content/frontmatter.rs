//! Front-matter rendering

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

/// Delimiter line before and after the front-matter block
pub const DELIMITER: &str = "---";

lazy_static! {
    static ref BARE_VALUE: Regex = Regex::new(r"^[a-zA-Z0-9_./:@+\- ]+$").unwrap();
}

/// Format a value for a `key: value` line
///
/// Plain values are written bare. Anything with a colon or other
/// punctuation becomes a JSON string literal so the line stays unambiguous.
pub fn frontmatter_value(value: &str) -> Cow<'_, str> {
    if BARE_VALUE.is_match(value) && !value.contains(':') {
        Cow::Borrowed(value)
    } else {
        // Serializing a str cannot fail
        Cow::Owned(serde_json::to_string(value).unwrap_or_default())
    }
}

/// Ordered front-matter block
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    fields: IndexMap<&'static str, String>,
}

impl FrontMatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field, quoting as needed
    pub fn text(&mut self, key: &'static str, value: &str) -> &mut Self {
        self.fields.insert(key, frontmatter_value(value).into_owned());
        self
    }

    /// Add a text field only when it has a value
    pub fn optional(&mut self, key: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.text(key, value);
        }
        self
    }

    /// Add a boolean field as a bare `true`/`false`
    pub fn flag(&mut self, key: &'static str, value: bool) -> &mut Self {
        self.fields.insert(key, value.to_string());
        self
    }

    /// Keys in output order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// Render the block followed by the body and a single trailing newline
    pub fn render(&self, body: &str) -> String {
        let mut lines = Vec::with_capacity(self.fields.len() + 3);
        lines.push(DELIMITER.to_string());
        for (key, value) in &self.fields {
            lines.push(format!("{}: {}", key, value));
        }
        lines.push(DELIMITER.to_string());
        lines.push(body.to_string());

        format!("{}\n", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_values() {
        assert_eq!(frontmatter_value("Jane Doe"), "Jane Doe");
        assert_eq!(frontmatter_value("2024-01-02"), "2024-01-02");
        assert_eq!(frontmatter_value("/images/a_b+c@2x.png"), "/images/a_b+c@2x.png");
    }

    #[test]
    fn test_quoted_values() {
        assert_eq!(frontmatter_value("10:30"), r#""10:30""#);
        assert_eq!(
            frontmatter_value("https://example.com/signup"),
            r#""https://example.com/signup""#
        );
        assert_eq!(frontmatter_value("Café"), r#""Café""#);
        assert_eq!(frontmatter_value("Say \"hi\""), r#""Say \"hi\"""#);
        assert_eq!(frontmatter_value(""), r#""""#);
    }

    #[test]
    fn test_render_block() {
        let mut fm = FrontMatter::new();
        fm.text("title", "Hello World")
            .text("time", "10:30")
            .optional("image", None)
            .flag("show_signup", false);

        assert_eq!(
            fm.render("Line one\n\nLine two"),
            "---\ntitle: Hello World\ntime: \"10:30\"\nshow_signup: false\n---\nLine one\n\nLine two\n"
        );
        assert_eq!(fm.keys().collect::<Vec<_>>(), vec!["title", "time", "show_signup"]);
    }
}
