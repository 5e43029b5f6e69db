//! Submission payload validation

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::{SubmitError, SubmitResult};
use crate::helpers::{is_truthy, parse_submitted_date, slugify, truthy_text, value_text};

/// Publish date used for events that do not carry one
pub const DEFAULT_PUBLISH_DATE: &str = "2023-03-18";

/// Fields that must be present and truthy, in reporting order
const REQUIRED_FIELDS: [&str; 4] = ["title", "date", "author", "body"];

/// Event-only front-matter fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    pub publishdate: String,
    pub location: Option<String>,
    pub time: Option<String>,
    pub organiser: Option<String>,
    /// Only kept when the payload carried a real boolean
    pub show_signup: Option<bool>,
    pub signup_link: Option<String>,
}

/// What kind of content is being created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    Blog,
    Event(EventFields),
}

impl ContentKind {
    /// Type name as it appears in payloads and commit messages
    pub fn name(&self) -> &'static str {
        match self {
            ContentKind::Blog => "blog",
            ContentKind::Event(_) => "event",
        }
    }

    /// Repository folder the content lives in
    pub fn folder(&self) -> &'static str {
        match self {
            ContentKind::Blog => "content/blogs",
            ContentKind::Event(_) => "content/events",
        }
    }
}

/// A validated, normalized submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSubmission {
    pub kind: ContentKind,
    pub title: String,
    pub date: NaiveDate,
    pub author: String,
    pub body: String,
    pub slug: String,
    pub image: Option<String>,
}

/// Type tag before the kind-specific fields are read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeTag {
    Blog,
    Event,
}

impl ContentSubmission {
    /// Validate a raw request body
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// JSON syntax, type, required fields, date, slug.
    pub fn from_json(raw: &str) -> SubmitResult<Self> {
        let payload = parse_payload(raw)?;
        let tag = check_type(&payload)?;
        check_required(&payload)?;
        let date = check_date(&payload)?;
        let slug = derive_slug(&payload)?;

        let text = |key: &str| payload.get(key).map(value_text).unwrap_or_default();

        let kind = match tag {
            TypeTag::Blog => ContentKind::Blog,
            TypeTag::Event => ContentKind::Event(event_fields(&payload)),
        };

        Ok(Self {
            kind,
            title: text("title"),
            date,
            author: text("author"),
            body: text("body"),
            slug,
            image: truthy_text(payload.get("image")),
        })
    }

    /// Date formatted as `YYYY-MM-DD`
    pub fn date_prefix(&self) -> String {
        crate::helpers::format_ymd(&self.date)
    }

    /// Repository path: `<folder>/<date>-<slug>.md`
    pub fn path(&self) -> String {
        format!("{}/{}-{}.md", self.kind.folder(), self.date_prefix(), self.slug)
    }

    /// Commit message for the new file
    pub fn commit_message(&self) -> String {
        format!("Create {}: {}", self.kind.name(), self.title)
    }
}

fn parse_payload(raw: &str) -> SubmitResult<Map<String, Value>> {
    let raw = if raw.is_empty() { "{}" } else { raw };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) | Err(_) => Err(SubmitError::MalformedRequest),
    }
}

fn check_type(payload: &Map<String, Value>) -> SubmitResult<TypeTag> {
    match payload.get("type").and_then(Value::as_str) {
        Some("blog") => Ok(TypeTag::Blog),
        Some("event") => Ok(TypeTag::Event),
        _ => Err(SubmitError::InvalidType),
    }
}

fn check_required(payload: &Map<String, Value>) -> SubmitResult<()> {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !payload.get(*field).is_some_and(is_truthy))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SubmitError::MissingField(missing))
    }
}

fn check_date(payload: &Map<String, Value>) -> SubmitResult<NaiveDate> {
    payload
        .get("date")
        .and_then(parse_submitted_date)
        .ok_or(SubmitError::InvalidDate)
}

fn derive_slug(payload: &Map<String, Value>) -> SubmitResult<String> {
    let source = truthy_text(payload.get("slug"))
        .or_else(|| truthy_text(payload.get("title")))
        .unwrap_or_default();

    let slug = slugify(&source);
    if slug.is_empty() {
        Err(SubmitError::SlugDerivation)
    } else {
        Ok(slug)
    }
}

fn event_fields(payload: &Map<String, Value>) -> EventFields {
    EventFields {
        publishdate: truthy_text(payload.get("publishdate"))
            .unwrap_or_else(|| DEFAULT_PUBLISH_DATE.to_string()),
        location: truthy_text(payload.get("location")),
        time: truthy_text(payload.get("time")),
        organiser: truthy_text(payload.get("organiser")),
        show_signup: payload.get("show_signup").and_then(Value::as_bool),
        signup_link: truthy_text(payload.get("signup_link")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submit(value: Value) -> SubmitResult<ContentSubmission> {
        ContentSubmission::from_json(&value.to_string())
    }

    fn blog() -> Value {
        json!({
            "type": "blog",
            "title": "Hello World",
            "date": "2024-01-02",
            "author": "A",
            "body": "text"
        })
    }

    #[test]
    fn test_valid_blog() {
        let submission = submit(blog()).unwrap();
        assert_eq!(submission.kind, ContentKind::Blog);
        assert_eq!(submission.slug, "hello-world");
        assert_eq!(submission.path(), "content/blogs/2024-01-02-hello-world.md");
        assert_eq!(submission.commit_message(), "Create blog: Hello World");
        assert_eq!(submission.image, None);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ContentSubmission::from_json("{not json"),
            Err(SubmitError::MalformedRequest)
        ));
        assert!(matches!(
            ContentSubmission::from_json("[1, 2]"),
            Err(SubmitError::MalformedRequest)
        ));
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        assert!(matches!(
            ContentSubmission::from_json(""),
            Err(SubmitError::InvalidType)
        ));
    }

    #[test]
    fn test_invalid_type() {
        let mut payload = blog();
        payload["type"] = json!("page");
        assert!(matches!(submit(payload), Err(SubmitError::InvalidType)));

        let mut payload = blog();
        payload["type"] = json!("Blog");
        assert!(matches!(submit(payload), Err(SubmitError::InvalidType)));
    }

    #[test]
    fn test_type_checked_before_fields() {
        let result = submit(json!({ "type": "news" }));
        assert!(matches!(result, Err(SubmitError::InvalidType)));
    }

    #[test]
    fn test_missing_fields() {
        let mut payload = blog();
        payload["author"] = json!("");
        payload.as_object_mut().unwrap().remove("body");

        match submit(payload) {
            Err(SubmitError::MissingField(fields)) => assert_eq!(fields, vec!["author", "body"]),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_required_checked_before_date() {
        let result = submit(json!({ "type": "blog", "date": "not-a-date" }));
        assert!(matches!(result, Err(SubmitError::MissingField(_))));
    }

    #[test]
    fn test_invalid_date() {
        let mut payload = blog();
        payload["date"] = json!("not-a-date");
        assert!(matches!(submit(payload), Err(SubmitError::InvalidDate)));
    }

    #[test]
    fn test_date_normalized() {
        let mut payload = blog();
        payload["date"] = json!("2024-03-05T10:00:00Z");
        let submission = submit(payload).unwrap();
        assert_eq!(submission.date_prefix(), "2024-03-05");
    }

    #[test]
    fn test_slug_from_explicit_field() {
        let mut payload = blog();
        payload["slug"] = json!("Custom Slug!");
        assert_eq!(submit(payload).unwrap().slug, "custom-slug");

        let mut payload = blog();
        payload["slug"] = json!("");
        assert_eq!(submit(payload).unwrap().slug, "hello-world");
    }

    #[test]
    fn test_slug_derivation_failure() {
        let mut payload = blog();
        payload["title"] = json!("???");
        assert!(matches!(submit(payload), Err(SubmitError::SlugDerivation)));
    }

    #[test]
    fn test_date_checked_before_slug() {
        let mut payload = blog();
        payload["date"] = json!("not-a-date");
        payload["title"] = json!("???");
        assert!(matches!(submit(payload), Err(SubmitError::InvalidDate)));
    }

    #[test]
    fn test_object_title_coerced() {
        let mut payload = blog();
        payload["title"] = json!({ "en": "Hello" });
        let submission = submit(payload).unwrap();
        assert_eq!(submission.title, "[object Object]");
        assert_eq!(submission.slug, "object-object");
    }

    #[test]
    fn test_event_fields() {
        let submission = submit(json!({
            "type": "event",
            "title": "Spring Fair",
            "date": "2024-04-20",
            "author": "Jane Doe",
            "body": "Come along.",
            "location": "Town Hall",
            "show_signup": "yes",
            "organiser": 0
        }))
        .unwrap();

        match &submission.kind {
            ContentKind::Event(fields) => {
                assert_eq!(fields.publishdate, DEFAULT_PUBLISH_DATE);
                assert_eq!(fields.location.as_deref(), Some("Town Hall"));
                assert_eq!(fields.show_signup, None);
                assert_eq!(fields.organiser, None);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
        assert_eq!(
            submission.path(),
            "content/events/2024-04-20-spring-fair.md"
        );
    }

    #[test]
    fn test_blog_ignores_event_fields() {
        let mut payload = blog();
        payload["location"] = json!("Somewhere");
        payload["image"] = json!("/images/hello.jpg");
        let submission = submit(payload).unwrap();
        assert_eq!(submission.kind, ContentKind::Blog);
        assert_eq!(submission.image.as_deref(), Some("/images/hello.jpg"));
    }
}
