use super::item::{NewsItem, AUTHOR_NOT_AVAILABLE};
use serde_json::{Map, Value};
use thiserror::Error;

/// Structural problems found while mapping a search response.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The body is not valid JSON
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A required key is absent
    #[error("Missing field `{field}` at {path}")]
    MissingField { path: String, field: &'static str },
    /// A key holds a value of the wrong JSON type
    #[error("Expected {expected} at {path}")]
    WrongType { path: String, expected: &'static str },
}

/// Records mapped from a response body.
///
/// `error` is set when extraction stopped at a malformed element; `items` then
/// holds every record parsed before it, in source order.
#[derive(Debug, Default)]
pub struct Extraction {
    pub items: Vec<NewsItem>,
    pub error: Option<ExtractError>,
}

impl Extraction {
    /// True when every element of `results` was mapped.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Maps a Guardian-style search response into [`NewsItem`]s.
///
/// Expects `{"response": {"results": [...]}}`. Each result needs `webTitle`,
/// `webUrl`, `webPublicationDate` and `sectionName`. The author is the
/// `webTitle` of the **last** entry in `tags`, or [`AUTHOR_NOT_AVAILABLE`]
/// when the element has no `tags` key.
///
/// # Returns
///
/// - `None` for empty text (nothing was fetched)
/// - `Some` with a complete [`Extraction`] when every element maps
/// - `Some` with the parsed prefix and the error when an element is malformed
///
/// Never panics on untrusted input.
pub fn extract_news(text: &str) -> Option<Extraction> {
    if text.is_empty() {
        return None;
    }

    let mut items = Vec::new();
    let error = parse_results(text, &mut items).err();

    match &error {
        Some(e) => tracing::warn!(
            error = %e,
            parsed = items.len(),
            "Problem parsing the news JSON results"
        ),
        None => tracing::debug!(count = items.len(), "Parsed news results"),
    }

    Some(Extraction { items, error })
}

fn parse_results(text: &str, items: &mut Vec<NewsItem>) -> Result<(), ExtractError> {
    let root: Value = serde_json::from_str(text)?;
    let root = as_object(&root, "$")?;
    let response = as_object(field(root, "$", "response")?, "$.response")?;
    let results = as_array(field(response, "$.response", "results")?, "$.response.results")?;

    for (i, entry) in results.iter().enumerate() {
        let path = format!("$.response.results[{i}]");
        items.push(parse_item(entry, &path)?);
    }

    Ok(())
}

fn parse_item(entry: &Value, path: &str) -> Result<NewsItem, ExtractError> {
    let obj = as_object(entry, path)?;

    let title = text_field(obj, path, "webTitle")?;
    let link = text_field(obj, path, "webUrl")?;
    let published = text_field(obj, path, "webPublicationDate")?;
    let section = text_field(obj, path, "sectionName")?;

    let author = match obj.get("tags") {
        Some(tags) => last_tag_title(tags, &format!("{path}.tags"))?,
        None => AUTHOR_NOT_AVAILABLE.to_string(),
    };

    Ok(NewsItem::new(title, link, published, section, author))
}

/// Every tag is validated; the last one's `webTitle` wins. An empty array
/// yields an empty author.
fn last_tag_title(tags: &Value, path: &str) -> Result<String, ExtractError> {
    let mut author = String::new();
    for (j, tag) in as_array(tags, path)?.iter().enumerate() {
        let tag_path = format!("{path}[{j}]");
        author = text_field(as_object(tag, &tag_path)?, &tag_path, "webTitle")?;
    }
    Ok(author)
}

fn field<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    key: &'static str,
) -> Result<&'a Value, ExtractError> {
    obj.get(key).ok_or_else(|| ExtractError::MissingField {
        path: path.to_string(),
        field: key,
    })
}

/// Strings pass through; any other present value (`null` included) is
/// rendered as its JSON text.
fn text_field(
    obj: &Map<String, Value>,
    path: &str,
    key: &'static str,
) -> Result<String, ExtractError> {
    Ok(match field(obj, path, key)? {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ExtractError> {
    value.as_object().ok_or_else(|| ExtractError::WrongType {
        path: path.to_string(),
        expected: "object",
    })
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, ExtractError> {
    value.as_array().ok_or_else(|| ExtractError::WrongType {
        path: path.to_string(),
        expected: "array",
    })
}
