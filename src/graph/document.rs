//! JSON graph documents.
//!
//! The import format is a flat list of vertices and edges:
//!
//! ```json
//! {
//!   "vertices": [{"id": 1, "label": "Entity"}],
//!   "edges": [{"source": 1, "target": 2, "type": "REL", "properties": {"weight": 0.5}}]
//! }
//! ```
//!
//! Ids may be JSON strings or integers; both are normalized to strings.
//! Edges implicitly create endpoints that are not listed under `vertices`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProductPathError, Result};
use crate::graph::memory::{MemoryGraph, DEFAULT_EDGE_TYPE};
use crate::types::{Properties, PropertyValue};

/// A vertex or edge endpoint id as written in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Int(i64),
    Text(String),
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexRecord {
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: DocumentId,
    pub target: DocumentId,
    #[serde(rename = "type", default = "default_edge_type")]
    pub kind: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

fn default_edge_type() -> String {
    DEFAULT_EDGE_TYPE.to_string()
}

/// A whole graph as read from or written to JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub vertices: Vec<VertexRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// Convert a JSON object into a typed property bag.
pub fn json_properties(map: &serde_json::Map<String, serde_json::Value>) -> Properties {
    map.iter()
        .map(|(k, v)| (k.clone(), PropertyValue::from(v.clone())))
        .collect()
}

impl GraphDocument {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(raw)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reject empty ids and edge types, which the store cannot key on.
    pub fn validate(&self) -> Result<()> {
        let empty = |id: &DocumentId| matches!(id, DocumentId::Text(s) if s.trim().is_empty());
        if let Some(pos) = self.vertices.iter().position(|v| empty(&v.id)) {
            return Err(ProductPathError::InvalidArgument(format!(
                "vertex #{pos} has an empty id"
            )));
        }
        for (pos, edge) in self.edges.iter().enumerate() {
            if empty(&edge.source) || empty(&edge.target) {
                return Err(ProductPathError::InvalidArgument(format!(
                    "edge #{pos} has an empty endpoint id"
                )));
            }
            if edge.kind.trim().is_empty() {
                return Err(ProductPathError::InvalidArgument(format!(
                    "edge #{pos} has an empty type"
                )));
            }
        }
        Ok(())
    }

    /// Build an in-memory graph keyed by the string form of each id.
    pub fn to_memory_graph(&self) -> MemoryGraph<String> {
        let mut graph = MemoryGraph::new();
        for vertex in &self.vertices {
            graph.add_vertex(vertex.id.to_string());
        }
        for edge in &self.edges {
            graph.add_edge(
                edge.source.to_string(),
                edge.target.to_string(),
                edge.kind.clone(),
                json_properties(&edge.properties),
            );
        }
        graph
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
