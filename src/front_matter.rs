use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use serde_yaml::{Mapping, Value as YamlValue};
use thiserror::Error;

static YAML_BLOCK: OnceLock<Regex> = OnceLock::new();

// `---` on the first line, YAML, then the next line that is just `---`.
fn yaml_block() -> &'static Regex {
    YAML_BLOCK.get_or_init(|| {
        RegexBuilder::new(r"\A---[ \t]*\r?\n(.*?)(?:\r?\n)?^---[ \t]*(?:\r?\n|\z)(.*)\z")
            .dot_matches_new_line(true)
            .multi_line(true)
            .build()
            .expect("failed to compile regex for YAML front matter")
    })
}

#[derive(Error, Debug)]
pub(crate) enum FrontMatterError {
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter is not a mapping")]
    NotAMapping,

    #[error("unsupported front matter key: {0}")]
    UnsupportedKey(String),

    #[error("front matter value not representable: {0}")]
    Value(#[from] serde_json::Error),
}

#[derive(Debug, PartialEq)]
pub(crate) struct FrontMatter<'a> {
    pub data: Map<String, Value>,
    pub body: &'a str,
}

/// Splits a document into its front matter mapping and the markdown body.
///
/// A document without a (closed) front matter block is all body.
pub(crate) fn parse_front_matter(content: &str) -> Result<FrontMatter<'_>, FrontMatterError> {
    let content = content.trim_start_matches('\u{feff}');
    let Some(caps) = yaml_block().captures(content) else {
        return Ok(FrontMatter {
            data: Map::new(),
            body: content,
        });
    };

    let raw = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    let data = if raw.trim().is_empty() {
        Map::new()
    } else {
        match serde_yaml::from_str::<YamlValue>(raw)? {
            YamlValue::Null => Map::new(),
            YamlValue::Mapping(mapping) => to_json_map(mapping)?,
            _ => return Err(FrontMatterError::NotAMapping),
        }
    };

    Ok(FrontMatter { data, body })
}

// Scalar keys such as `2024:` or `true:` become their string form.
fn to_json_map(mapping: Mapping) -> Result<Map<String, Value>, FrontMatterError> {
    mapping
        .into_iter()
        .map(|(key, value)| {
            let key = match key {
                YamlValue::String(s) => s,
                YamlValue::Number(n) => n.to_string(),
                YamlValue::Bool(b) => b.to_string(),
                YamlValue::Null => "null".to_string(),
                other => return Err(FrontMatterError::UnsupportedKey(format!("{other:?}"))),
            };
            Ok((key, serde_json::to_value(value)?))
        })
        .collect()
}
