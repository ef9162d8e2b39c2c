//! In-memory directed graph.
//!
//! Edges live in an arena and are addressed by [`EdgeId`]; adjacency lists
//! keep insertion order so outgoing-edge enumeration is deterministic. Used
//! as the test fixture for the search and as the target of JSON documents
//! that are searched without a database.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;

use crate::error::Result;
use crate::graph::accessor::GraphAccessor;
use crate::types::{Properties, PropertyValue};

/// Default relationship type for edges added without one.
pub const DEFAULT_EDGE_TYPE: &str = "REL";

/// Index of an edge in a [`MemoryGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeId(pub usize);

/// A stored edge.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryEdge<V> {
    pub source: V,
    pub target: V,
    pub kind: String,
    pub properties: Properties,
}

/// Directed multigraph held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryGraph<V = i64> {
    vertices: Vec<V>,
    edges: Vec<MemoryEdge<V>>,
    adjacency: HashMap<V, Vec<EdgeId>>,
}

impl<V> Default for MemoryGraph<V> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            adjacency: HashMap::new(),
        }
    }
}

impl<V: Clone + Eq + Hash> MemoryGraph<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vertex. Adding an existing vertex is a no-op.
    pub fn add_vertex(&mut self, vertex: V) {
        if !self.adjacency.contains_key(&vertex) {
            self.adjacency.insert(vertex.clone(), Vec::new());
            self.vertices.push(vertex);
        }
    }

    /// Add a directed edge with an arbitrary property bag. Missing endpoints
    /// are registered.
    pub fn add_edge(
        &mut self,
        source: V,
        target: V,
        kind: impl Into<String>,
        properties: Properties,
    ) -> EdgeId {
        self.add_vertex(source.clone());
        self.add_vertex(target.clone());
        let id = EdgeId(self.edges.len());
        self.edges.push(MemoryEdge {
            source: source.clone(),
            target,
            kind: kind.into(),
            properties,
        });
        self.adjacency.entry(source).or_default().push(id);
        id
    }

    /// Add an edge carrying a single `weight` property.
    pub fn add_weighted_edge(&mut self, source: V, target: V, weight: impl Into<PropertyValue>) -> EdgeId {
        let mut properties = Properties::new();
        properties.insert("weight".to_string(), weight.into());
        self.add_edge(source, target, DEFAULT_EDGE_TYPE, properties)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&MemoryEdge<V>> {
        self.edges.get(id.0)
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Vertices in registration order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl<V: Clone + Eq + Hash + Debug> GraphAccessor for MemoryGraph<V> {
    type Vertex = V;
    type Edge = EdgeId;

    fn outgoing_edges(&self, vertex: &V) -> Result<Vec<EdgeId>> {
        Ok(self.adjacency.get(vertex).cloned().unwrap_or_default())
    }

    fn target(&self, edge: &EdgeId) -> V {
        self.edges[edge.0].target.clone()
    }

    fn edge_property(&self, edge: &EdgeId, key: &str) -> Option<PropertyValue> {
        self.edge(*edge)?.properties.get(key).cloned()
    }

    fn describe_edge(&self, edge: &EdgeId) -> String {
        match self.edge(*edge) {
            Some(e) => format!("({:?})-[{} #{}]->({:?})", e.source, e.kind, edge.0, e.target),
            None => format!("unknown edge #{}", edge.0),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
