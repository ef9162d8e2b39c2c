//! Per-vertex best-result aggregation.
//!
//! The aggregator is owned by the engine for the duration of one search and
//! turned into a [`SearchResult`] by value when the frontier is empty, so
//! nothing can observe a half-built result.

use std::collections::HashMap;
use std::hash::Hash;

use crate::graph::path::Path;
use crate::search::engine::SearchStats;

/// The best weight found for one reached vertex and a path achieving it.
#[derive(Debug, Clone)]
pub struct ResultEntry<V, E> {
    pub vertex: V,
    pub weight: f64,
    pub path: Path<V, E>,
}

/// Keeps, per vertex, the highest weight offered so far.
///
/// Entries are kept in first-discovery order; replacing an entry's weight
/// and path does not move it.
#[derive(Debug)]
pub struct ResultAggregator<V, E> {
    index: HashMap<V, usize>,
    entries: Vec<ResultEntry<V, E>>,
}

impl<V, E> Default for ResultAggregator<V, E> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<V: Clone + Eq + Hash, E> ResultAggregator<V, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer `path` with cumulative `weight` for its end vertex.
    ///
    /// Stored when the vertex has no entry yet or the current entry's weight
    /// is strictly lower. Returns whether the entry changed.
    pub fn offer(&mut self, weight: f64, path: &Path<V, E>) -> bool {
        let vertex = path.end_vertex();
        match self.index.get(vertex) {
            Some(&slot) => {
                let entry = &mut self.entries[slot];
                if entry.weight < weight {
                    entry.weight = weight;
                    entry.path = path.clone();
                    true
                } else {
                    false
                }
            }
            None => {
                self.index.insert(vertex.clone(), self.entries.len());
                self.entries.push(ResultEntry {
                    vertex: vertex.clone(),
                    weight,
                    path: path.clone(),
                });
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze into the search's output.
    pub fn finish(self, stats: SearchStats) -> SearchResult<V, E> {
        SearchResult {
            index: self.index,
            entries: self.entries,
            stats,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchResult
// ---------------------------------------------------------------------------

/// The finished mapping from reached vertex to best (weight, path).
#[derive(Debug)]
pub struct SearchResult<V, E> {
    index: HashMap<V, usize>,
    entries: Vec<ResultEntry<V, E>>,
    stats: SearchStats,
}

impl<V: Eq + Hash, E> SearchResult<V, E> {
    pub fn get(&self, vertex: &V) -> Option<&ResultEntry<V, E>> {
        self.index.get(vertex).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    pub fn weight_of(&self, vertex: &V) -> Option<f64> {
        self.get(vertex).map(|e| e.weight)
    }
}

impl<V, E> SearchResult<V, E> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order their vertices were first reached.
    pub fn iter(&self) -> std::slice::Iter<'_, ResultEntry<V, E>> {
        self.entries.iter()
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn into_entries(self) -> Vec<ResultEntry<V, E>> {
        self.entries
    }
}

impl<'a, V, E> IntoIterator for &'a SearchResult<V, E> {
    type Item = &'a ResultEntry<V, E>;
    type IntoIter = std::slice::Iter<'a, ResultEntry<V, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
