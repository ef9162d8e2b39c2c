//! The host-facing procedure `traversals.maxWeightedProductPaths`.
//!
//! Takes the loosely typed arguments a query layer hands over (a signed
//! depth, an unchecked float threshold), normalizes them for the
//! [`SearchEngine`], and materializes the result into owned records that
//! outlive the search's shared path structure.

use serde::Serialize;

use crate::error::{ProductPathError, Result};
use crate::graph::accessor::GraphAccessor;
use crate::search::{SearchEngine, SearchStats, WeightExtractor};

/// Name under which the procedure is registered.
pub const PROCEDURE_NAME: &str = "traversals.maxWeightedProductPaths";

/// One yielded row: the best weight reaching a vertex and a path achieving it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightAndPath<V, E> {
    /// Product of the weights along `path`.
    pub max: f64,
    /// The reached vertex.
    pub end: V,
    /// Vertices from the start to the reached vertex.
    pub vertices: Vec<V>,
    /// Edges in traversal order.
    pub path: Vec<E>,
}

impl<V, E> WeightAndPath<V, E> {
    /// Number of edges.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Records plus the counters of the search that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct ProcedureOutput<V, E> {
    pub records: Vec<WeightAndPath<V, E>>,
    pub stats: SearchStats,
}

/// Run the procedure reading the default `weight` property.
pub fn max_weighted_product_paths<G: GraphAccessor + ?Sized>(
    graph: &G,
    start: G::Vertex,
    max_depth: i64,
    threshold: f64,
) -> Result<Vec<WeightAndPath<G::Vertex, G::Edge>>> {
    Ok(run(graph, start, max_depth, threshold, &WeightExtractor::default())?.records)
}

/// Run the procedure with an explicit weight extractor.
///
/// A negative `max_depth` yields no records and no error. A NaN
/// `threshold` is rejected since no weight compares against it; any other
/// value is accepted as-is.
pub fn run<G: GraphAccessor + ?Sized>(
    graph: &G,
    start: G::Vertex,
    max_depth: i64,
    threshold: f64,
    weights: &WeightExtractor,
) -> Result<ProcedureOutput<G::Vertex, G::Edge>> {
    if threshold.is_nan() {
        return Err(ProductPathError::InvalidArgument(
            "threshold must be a number, got NaN".to_string(),
        ));
    }
    let Ok(max_depth) = usize::try_from(max_depth) else {
        tracing::debug!(max_depth, "negative max depth, nothing to search");
        return Ok(ProcedureOutput {
            records: Vec::new(),
            stats: SearchStats::default(),
        });
    };

    let result = SearchEngine::with_weights(graph, weights.clone()).search(start, max_depth, threshold)?;
    let stats = *result.stats();
    let records = result
        .into_entries()
        .into_iter()
        .map(|entry| WeightAndPath {
            max: entry.weight,
            vertices: entry.path.vertices(),
            path: entry.path.edges(),
            end: entry.vertex,
        })
        .collect();
    Ok(ProcedureOutput { records, stats })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
