//! Core value types shared by the graph backends and the search.
//!
//! Edge and vertex properties are stored as JSON in the SQLite store and as
//! typed maps in the in-memory graph. Both surface them as [`PropertyValue`]
//! so the weight extractor sees a single representation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// PropertyValue
// ---------------------------------------------------------------------------

/// A typed property value attached to a vertex or an edge.
///
/// Integers and floats are kept apart so callers can tell `1` from `1.0`,
/// which matters for the weight coercion rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
    Map(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Short name of the representation, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Convert back to JSON for storage.
    ///
    /// Non-finite floats have no JSON form and become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "boolean {b}"),
            Self::Int(i) => write!(f, "integer {i}"),
            Self::Float(x) => write!(f, "float {x}"),
            Self::String(s) => write!(f, "string {s:?}"),
            Self::List(items) => write!(f, "list of {} items", items.len()),
            Self::Map(map) => write!(f, "map of {} entries", map.len()),
        }
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    // u64 beyond i64::MAX and every fractional number.
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A property bag keyed by property name.
pub type Properties = BTreeMap<String, PropertyValue>;

/// Parse a JSON object string into a property bag. `None`, empty strings
/// and non-object JSON yield an empty bag.
pub fn properties_from_json(raw: Option<&str>) -> serde_json::Result<Properties> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(Properties::new());
    };
    match serde_json::from_str::<serde_json::Value>(raw)? {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .map(|(k, v)| (k, PropertyValue::from(v)))
            .collect()),
        _ => Ok(Properties::new()),
    }
}

/// Serialize a property bag as a JSON object string.
pub fn properties_to_json(props: &Properties) -> String {
    let object: serde_json::Map<String, serde_json::Value> =
        props.iter().map(|(k, v)| (k.clone(), v.to_json())).collect();
    serde_json::Value::Object(object).to_string()
}

// ---------------------------------------------------------------------------
// Stored graph rows
// ---------------------------------------------------------------------------

/// A vertex row from the SQLite store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredVertex {
    pub id: String,
    pub label: Option<String>,
    pub properties: Properties,
}

/// An edge row from the SQLite store.
///
/// `id` is the autoincrement row id, which also fixes the order in which a
/// vertex's outgoing edges are enumerated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredEdge {
    pub id: i64,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: Properties,
}

impl StoredEdge {
    /// `(source)-[TYPE #id]->(target)`, used in error messages and CLI output.
    pub fn describe(&self) -> String {
        format!(
            "({})-[{} #{}]->({})",
            self.source, self.kind, self.id, self.target
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
