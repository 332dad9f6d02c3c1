use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct Wonder {
    pub slug: String,
    /// Always the slug. See [`Wonder::front_matter_date`] for the front matter value.
    pub date: String,
    pub title: Option<String>,
    pub content_html: String,
    /// Front matter, verbatim. Never overrides the fields above.
    pub metadata: Map<String, Value>,
}

impl Wonder {
    pub fn front_matter_date(&self) -> Option<String> {
        self.metadata.get("date").and_then(scalar_to_string)
    }

    pub fn sort_key(&self, source: DateSource) -> String {
        match source {
            DateSource::Filename => self.date.clone(),
            DateSource::FrontMatter => self.front_matter_date().unwrap_or_else(|| self.date.clone()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub(crate) enum DateSource {
    /// The file name (slug).
    #[default]
    Filename,
    /// The front matter `date` key, falling back to the file name.
    FrontMatter,
}

impl FromStr for DateSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filename" => Ok(Self::Filename),
            "front-matter" => Ok(Self::FrontMatter),
            _ => Err(format!("unknown date source: {s}")),
        }
    }
}

/// Strings as-is, numbers and booleans formatted. Null, empty strings and
/// collections count as absent.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A front matter title, unless it is falsy (`false`, `0`, empty).
pub(crate) fn front_matter_title(value: &Value) -> Option<String> {
    match value {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        _ => scalar_to_string(value),
    }
}
