//! Field values accumulated by the form.
//!
//! Values live in one flat mapping keyed by wire key. On the wire every value is either a JSON
//! string or, for multi-choice fields, an array of strings; the schema decides which variant a
//! JSON value turns into when a draft is loaded back.

use crate::schema::{FieldKind, FormSchema};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// One answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Numeric answer kept as entered; never coerced.
    Numeric(String),
    Choice(String),
    Selection(BTreeSet<String>),
}

impl FieldValue {
    /// Empty strings and empty selections count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Numeric(s) | FieldValue::Choice(s) => !s.is_empty(),
            FieldValue::Selection(set) => !set.is_empty(),
        }
    }

    /// The string content of a scalar answer, `None` for selections.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) | FieldValue::Numeric(s) | FieldValue::Choice(s) => Some(s),
            FieldValue::Selection(_) => None,
        }
    }

    pub fn as_selection(&self) -> Option<&BTreeSet<String>> {
        match self {
            FieldValue::Selection(set) => Some(set),
            _ => None,
        }
    }

    /// Build a value of the right variant for `kind` from raw text.
    ///
    /// Multi-choice text is split on commas, which is how the CLI accepts lists.
    pub fn from_text(kind: &FieldKind, raw: &str) -> Self {
        match kind {
            FieldKind::Text | FieldKind::LongText | FieldKind::Date => Self::Text(raw.to_owned()),
            FieldKind::Numeric => Self::Numeric(raw.to_owned()),
            FieldKind::SingleChoice(_) => Self::Choice(raw.to_owned()),
            FieldKind::MultiChoice(_) => Self::Selection(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect(),
            ),
        }
    }

    /// Interpret a JSON value for a field of `kind`.
    ///
    /// Returns `None` for shapes that cannot hold an answer (objects, or arrays on scalar
    /// fields). Numbers and booleans are kept as their textual form.
    pub fn from_json(kind: &FieldKind, value: &Value) -> Option<Self> {
        match (kind, value) {
            (FieldKind::MultiChoice(_), Value::Array(items)) => Some(Self::Selection(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect(),
            )),
            (FieldKind::MultiChoice(_), Value::String(s)) => Some(Self::from_text(kind, s)),
            (_, Value::String(s)) => Some(Self::from_text(kind, s)),
            (_, Value::Number(n)) => Some(Self::from_text(kind, &n.to_string())),
            (_, Value::Bool(b)) => Some(Self::from_text(kind, &b.to_string())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) | FieldValue::Numeric(s) | FieldValue::Choice(s) => {
                Value::String(s.clone())
            }
            FieldValue::Selection(set) => {
                Value::Array(set.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

/// Flat mapping from field key to answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a value.
    pub fn set(&mut self, key: impl Into<String>, value: FieldValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// True if `key` holds a present (non-empty) value.
    pub fn is_present(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(FieldValue::is_present)
    }

    /// Scalar answer for `key`, or `""` when unanswered.
    pub fn text(&self, key: &str) -> &str {
        self.0.get(key).and_then(FieldValue::as_str).unwrap_or("")
    }

    /// Selection for `key` as a list, empty when unanswered.
    pub fn selection(&self, key: &str) -> Vec<String> {
        self.0
            .get(key)
            .and_then(FieldValue::as_selection)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }

    /// Rebuild values from a JSON object using `schema` to pick each variant.
    ///
    /// Keys the schema does not know are kept as text; values of an unusable shape are dropped
    /// with a warning.
    pub fn from_json(schema: &FormSchema, map: &Map<String, Value>) -> Self {
        let mut values = Self::new();
        for (key, raw) in map {
            let kind = schema.field(key).map(|f| f.kind).unwrap_or(FieldKind::Text);
            match FieldValue::from_json(&kind, raw) {
                Some(value) => values.set(key.clone(), value),
                None => tracing::warn!("ignoring unusable value for field {}", key),
            }
        }
        values
    }
}
