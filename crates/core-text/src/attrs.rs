//! Attribute values and attribute maps carried by text runs.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Boolean attribute marking a run as foldable.
pub const FOLD: &str = "fold";
/// Attribute holding an inline [`Attachment`].
pub const ATTACHMENT: &str = "attachment";

/// An inline object standing in for text (images, placeholders, ...).
#[derive(Debug, PartialEq, Eq)]
pub struct Attachment {
    pub name: &'static str,
}

impl Attachment {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Text(String),
    Attachment(Arc<Attachment>),
}

impl AttrValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_attachment(&self) -> Option<&Arc<Attachment>> {
        match self {
            AttrValue::Attachment(a) => Some(a),
            _ => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

/// Name -> value mapping for one attribute run. Ordered so equality and
/// debug output are deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// True only when `key` holds `Bool(true)`.
    pub fn is_true(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(AttrValue::Bool(true)))
    }

    pub fn attachment(&self) -> Option<&Arc<Attachment>> {
        self.0.get(ATTACHMENT).and_then(AttrValue::as_attachment)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Arc<Attachment>> for AttrValue {
    fn from(a: Arc<Attachment>) -> Self {
        AttrValue::Attachment(a)
    }
}
