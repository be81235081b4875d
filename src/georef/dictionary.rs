//! Loosely-typed tag values, as handed over by a tag source.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::ValueError;

/// A single value of a tag: either numeric or text.
///
/// TIFF readers flatten every numeric field type to `f64` and every ASCII
/// field to one `Text` per NUL-terminated string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Number(f64),
    Text(String),
}

impl TagValue {
    /// Convert to a finite number.
    ///
    /// Text converts when it holds a decimal number (surrounding whitespace
    /// is ignored).
    pub fn to_number(&self) -> Result<f64, ValueError> {
        let value = match self {
            TagValue::Number(n) => *n,
            TagValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ValueError::NotNumeric(s.clone()))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ValueError::NonFinite(value))
        }
    }

    /// Convert to text. Numbers use their shortest round-trip form.
    pub fn to_text(&self) -> String {
        match self {
            TagValue::Number(n) => n.to_string(),
            TagValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Number(n) => write!(f, "{}", n),
            TagValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        TagValue::Number(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Text(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Text(value)
    }
}

/// Mapping from tag id to its ordered values.
///
/// Ordered by tag id so iteration (and serialized output) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TagDictionary {
    fields: BTreeMap<u16, Vec<TagValue>>,
}

impl TagDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the values of a tag, replacing any previous values.
    pub fn insert(&mut self, tag: u16, values: Vec<TagValue>) {
        self.fields.insert(tag, values);
    }

    /// Builder-style insert.
    pub fn with(mut self, tag: u16, values: impl IntoIterator<Item = TagValue>) -> Self {
        self.insert(tag, values.into_iter().collect());
        self
    }

    /// Values of a tag, `None` if the tag is absent.
    pub fn get(&self, tag: u16) -> Option<&[TagValue]> {
        self.fields.get(&tag).map(Vec::as_slice)
    }

    pub fn contains(&self, tag: u16) -> bool {
        self.fields.contains_key(&tag)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &[TagValue])> {
        self.fields.iter().map(|(tag, values)| (*tag, values.as_slice()))
    }
}

impl FromIterator<(u16, Vec<TagValue>)> for TagDictionary {
    fn from_iter<I: IntoIterator<Item = (u16, Vec<TagValue>)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
