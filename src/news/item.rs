use serde::Serialize;
use std::fmt;

/// Author shown for results that carry no `tags` array.
pub const AUTHOR_NOT_AVAILABLE: &str = "Author NA";

/// One article from a news search result.
///
/// Fields are kept exactly as received; `published` is the ISO-8601 text from
/// `webPublicationDate` and is not parsed into a date type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsItem {
    title: String,
    link: String,
    published: String,
    section: String,
    author: String,
}

impl NewsItem {
    pub(crate) fn new(
        title: String,
        link: String,
        published: String,
        section: String,
        author: String,
    ) -> Self {
        Self {
            title,
            link,
            published,
            section,
            author,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Canonical web URL of the article.
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Publication timestamp as received (e.g. `2017-06-27T14:03:21Z`).
    pub fn published(&self) -> &str {
        &self.published
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    /// Author display name, or [`AUTHOR_NOT_AVAILABLE`].
    pub fn author(&self) -> &str {
        &self.author
    }
}

impl fmt::Display for NewsItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} | {} | {}\n    {}",
            self.section, self.title, self.author, self.published, self.link
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewsItem {
        NewsItem::new(
            "Rust 2.0 announced".into(),
            "https://www.theguardian.com/technology/rust".into(),
            "2017-06-27T14:03:21Z".into(),
            "Technology".into(),
            "Alex Hern".into(),
        )
    }

    #[test]
    fn test_accessors_return_fields() {
        let item = sample();
        assert_eq!(item.title(), "Rust 2.0 announced");
        assert_eq!(item.link(), "https://www.theguardian.com/technology/rust");
        assert_eq!(item.published(), "2017-06-27T14:03:21Z");
        assert_eq!(item.section(), "Technology");
        assert_eq!(item.author(), "Alex Hern");
    }

    #[test]
    fn test_display_contains_all_fields() {
        let line = sample().to_string();
        assert!(line.starts_with("[Technology] Rust 2.0 announced"));
        assert!(line.contains("Alex Hern"));
        assert!(line.contains("2017-06-27T14:03:21Z"));
        assert!(line.contains("https://www.theguardian.com/technology/rust"));
    }

    #[test]
    fn test_serializes_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["title"], "Rust 2.0 announced");
        assert_eq!(json["section"], "Technology");
        assert_eq!(json["author"], "Alex Hern");
    }
}
