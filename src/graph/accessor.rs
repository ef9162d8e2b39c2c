//! The narrow graph capability the path search consumes.
//!
//! Anything that can list a vertex's outgoing edges and read a named
//! property off an edge can be searched: the SQLite [`GraphStore`], the
//! in-memory [`MemoryGraph`] fixture, or a caller's own adapter.
//!
//! [`GraphStore`]: crate::graph::store::GraphStore
//! [`MemoryGraph`]: crate::graph::memory::MemoryGraph

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::Result;
use crate::types::PropertyValue;

/// Read-only access to a directed, property-carrying graph.
///
/// Implementations must return outgoing edges in a stable order for a
/// given snapshot; the search's tie-breaking depends on it.
pub trait GraphAccessor {
    /// Opaque vertex identity. Only compared, hashed and cloned.
    type Vertex: Clone + Eq + Hash + Debug;
    /// Edge handle. Cloned into every path that traverses it.
    type Edge: Clone + Debug;

    /// Outgoing edges of `vertex`. An unknown vertex has none.
    fn outgoing_edges(&self, vertex: &Self::Vertex) -> Result<Vec<Self::Edge>>;

    /// The vertex `edge` points to.
    fn target(&self, edge: &Self::Edge) -> Self::Vertex;

    /// The value stored under `key` on `edge`, if any.
    fn edge_property(&self, edge: &Self::Edge, key: &str) -> Option<PropertyValue>;

    /// Human-readable identification of `edge` for error messages.
    fn describe_edge(&self, edge: &Self::Edge) -> String {
        format!("{edge:?}")
    }
}

impl<G: GraphAccessor + ?Sized> GraphAccessor for &G {
    type Vertex = G::Vertex;
    type Edge = G::Edge;

    fn outgoing_edges(&self, vertex: &Self::Vertex) -> Result<Vec<Self::Edge>> {
        (**self).outgoing_edges(vertex)
    }

    fn target(&self, edge: &Self::Edge) -> Self::Vertex {
        (**self).target(edge)
    }

    fn edge_property(&self, edge: &Self::Edge, key: &str) -> Option<PropertyValue> {
        (**self).edge_property(edge, key)
    }

    fn describe_edge(&self, edge: &Self::Edge) -> String {
        (**self).describe_edge(edge)
    }
}
