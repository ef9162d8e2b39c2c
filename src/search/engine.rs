//! Breadth-first, threshold-pruned, depth-bounded product-weight search.
//!
//! The engine owns the frontier and the aggregator for one invocation.
//! Each frontier entry is a path plus the cumulative weight of that path;
//! children are created by extending the parent path with one outgoing
//! edge and multiplying the edge's weight in. There is no visited set:
//! a vertex may be reached again along any other path, cycles included,
//! until the weight decays below the threshold or the depth bound is hit.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::Result;
use crate::graph::accessor::GraphAccessor;
use crate::graph::path::Path;
use crate::search::aggregator::{ResultAggregator, SearchResult};
use crate::search::evaluator::PruningEvaluator;
use crate::search::weight::WeightExtractor;

// ---------------------------------------------------------------------------
// BranchState
// ---------------------------------------------------------------------------

/// Cumulative weight carried by one frontier entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchState {
    weight: f64,
}

impl BranchState {
    /// The state of the zero-length path at the start vertex.
    pub fn initial() -> Self {
        Self { weight: 1.0 }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The state of a child branch that traverses one more edge.
    pub fn extend(&self, edge_weight: f64) -> Self {
        Self {
            weight: self.weight * edge_weight,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchStats
// ---------------------------------------------------------------------------

/// Counters gathered during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Branches popped off the frontier.
    pub branches_evaluated: u64,
    /// Branches neither recorded nor expanded.
    pub branches_pruned: u64,
    /// Branches whose end vertex was offered to the aggregator.
    pub branches_recorded: u64,
    /// Offers that inserted or replaced an entry.
    pub results_updated: u64,
    /// Branches whose outgoing edges were enumerated.
    pub branches_expanded: u64,
    /// Edges read while expanding.
    pub edges_scanned: u64,
    /// Largest frontier length observed.
    pub peak_frontier: usize,
}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

struct Branch<V, E> {
    path: Path<V, E>,
    state: BranchState,
}

/// Runs product-weight searches against one graph.
pub struct SearchEngine<'g, G: GraphAccessor + ?Sized> {
    graph: &'g G,
    weights: WeightExtractor,
}

impl<'g, G: GraphAccessor + ?Sized> SearchEngine<'g, G> {
    /// An engine reading the default `weight` property.
    pub fn new(graph: &'g G) -> Self {
        Self::with_weights(graph, WeightExtractor::default())
    }

    pub fn with_weights(graph: &'g G, weights: WeightExtractor) -> Self {
        Self { graph, weights }
    }

    /// Every vertex reachable from `start` by a path of at most `max_depth`
    /// edges whose weight product is at least `threshold`, with the best
    /// such weight and a path achieving it.
    ///
    /// The start vertex is never reported, even when a cycle leads back to
    /// it. Any weight or graph-access error aborts the search and is the
    /// only outcome.
    pub fn search(
        &self,
        start: G::Vertex,
        max_depth: usize,
        threshold: f64,
    ) -> Result<SearchResult<G::Vertex, G::Edge>> {
        let span = tracing::debug_span!(
            "product_path_search",
            start = ?start,
            max_depth,
            threshold,
            property = self.weights.property()
        );
        let _guard = span.enter();

        let evaluator = PruningEvaluator::new(max_depth, threshold);
        let mut results = ResultAggregator::new();
        let mut stats = SearchStats::default();
        let mut frontier = VecDeque::new();
        frontier.push_back(Branch {
            path: Path::new(start),
            state: BranchState::initial(),
        });
        stats.peak_frontier = frontier.len();

        while let Some(branch) = frontier.pop_front() {
            stats.branches_evaluated += 1;
            let decision = evaluator.evaluate(branch.path.len(), branch.state.weight());

            if decision.records() {
                stats.branches_recorded += 1;
                let returned_to_start = branch.path.end_vertex() == branch.path.start_vertex();
                if !returned_to_start && results.offer(branch.state.weight(), &branch.path) {
                    stats.results_updated += 1;
                }
            }
            if !decision.expands() {
                if !decision.records() {
                    stats.branches_pruned += 1;
                }
                continue;
            }

            stats.branches_expanded += 1;
            for edge in self.graph.outgoing_edges(branch.path.end_vertex())? {
                stats.edges_scanned += 1;
                let edge_weight = self.weights.extract(self.graph, &edge)?;
                let target = self.graph.target(&edge);
                frontier.push_back(Branch {
                    path: branch.path.extend(edge, target),
                    state: branch.state.extend(edge_weight),
                });
            }
            stats.peak_frontier = stats.peak_frontier.max(frontier.len());
        }

        tracing::debug!(results = results.len(), ?stats, "search finished");
        Ok(results.finish(stats))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductPathError;
    use crate::graph::memory::MemoryGraph;
    use pretty_assertions::assert_eq;

    const EPS: f64 = 1e-12;

    fn chain(weights: &[f64]) -> MemoryGraph {
        let mut g = MemoryGraph::new();
        for (i, w) in weights.iter().enumerate() {
            g.add_weighted_edge(i as i64 + 1, i as i64 + 2, *w);
        }
        g
    }

    #[test]
    fn branch_state_multiplies() {
        let s = BranchState::initial().extend(0.5).extend(0.8);
        assert!((s.weight() - 0.4).abs() < EPS);
    }

    #[test]
    fn chain_weights_are_multiplied() {
        let g = chain(&[0.5, 0.8]);
        let result = SearchEngine::new(&g).search(1, 7, 0.3).unwrap();
        assert_eq!(result.len(), 2);
        assert!((result.weight_of(&2).unwrap() - 0.5).abs() < EPS);
        assert!((result.weight_of(&3).unwrap() - 0.4).abs() < EPS);
        assert!(!result.contains(&1));
    }

    #[test]
    fn depth_bound_stops_expansion() {
        let g = chain(&[0.9, 0.9, 0.9]);
        let result = SearchEngine::new(&g).search(1, 2, 0.3).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.get(&2).unwrap().path.len(), 1);
        assert_eq!(result.get(&3).unwrap().path.len(), 2);
        assert!(!result.contains(&4));
    }

    #[test]
    fn threshold_prunes_whole_branch() {
        // 1 -0.2-> 2 -1.0-> 3: 3 is only reachable through a pruned branch.
        let g = chain(&[0.2, 1.0]);
        let result = SearchEngine::new(&g).search(1, 5, 0.3).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.stats().branches_pruned, 1);
    }

    #[test]
    fn better_longer_path_replaces_shorter() {
        let mut g = MemoryGraph::new();
        g.add_weighted_edge(1, 3, 0.4);
        g.add_weighted_edge(1, 2, 0.9);
        g.add_weighted_edge(2, 3, 0.9);
        let result = SearchEngine::new(&g).search(1, 3, 0.1).unwrap();
        let entry = result.get(&3).unwrap();
        assert!((entry.weight - 0.81).abs() < EPS);
        assert_eq!(entry.path.vertices(), vec![1, 2, 3]);
    }

    #[test]
    fn equal_weight_keeps_breadth_first_path() {
        let mut g = MemoryGraph::new();
        g.add_weighted_edge(1, 2, 1.0);
        g.add_weighted_edge(2, 3, 0.5);
        g.add_weighted_edge(1, 3, 0.5);
        let result = SearchEngine::new(&g).search(1, 3, 0.1).unwrap();
        assert_eq!(result.get(&3).unwrap().path.len(), 1);
    }

    #[test]
    fn cycle_back_to_start_is_not_reported() {
        let mut g = MemoryGraph::new();
        g.add_weighted_edge(1, 2, 0.9);
        g.add_weighted_edge(2, 1, 0.9);
        g.add_weighted_edge(1, 1, 0.9);
        let result = SearchEngine::new(&g).search(1, 6, 0.1).unwrap();
        assert_eq!(result.len(), 1);
        assert!(!result.contains(&1));
    }

    #[test]
    fn cycles_are_revisited_until_weight_decays() {
        let mut g = MemoryGraph::new();
        g.add_weighted_edge(1, 2, 0.5);
        g.add_weighted_edge(2, 2, 0.5);
        // 0.5, 0.25, 0.125 qualify; 0.0625 does not.
        let result = SearchEngine::new(&g).search(1, 100, 0.1).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.stats().branches_recorded, 3);
        assert_eq!(result.stats().results_updated, 1);
        assert_eq!(result.stats().branches_pruned, 1);
    }

    #[test]
    fn zero_depth_is_empty() {
        let g = chain(&[0.9]);
        let result = SearchEngine::new(&g).search(1, 0, 0.0).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.stats().edges_scanned, 0);
    }

    #[test]
    fn unknown_start_is_empty() {
        let g = chain(&[0.9]);
        let result = SearchEngine::new(&g).search(99, 5, 0.1).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn invalid_weight_aborts_search() {
        let mut g = chain(&[0.9, 0.9]);
        g.add_weighted_edge(3, 4, "oops");
        let err = SearchEngine::new(&g).search(1, 5, 0.1).unwrap_err();
        assert!(matches!(err, ProductPathError::InvalidWeightType { .. }));
    }

    #[test]
    fn invalid_weight_beyond_explored_branches_is_never_read() {
        let mut g = chain(&[0.9]);
        g.add_weighted_edge(2, 3, 0.01);
        g.add_weighted_edge(3, 4, "oops");
        let result = SearchEngine::new(&g).search(1, 5, 0.5).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn deep_chain_result_drops_cleanly() {
        let n: i64 = 100_000;
        let mut g = MemoryGraph::new();
        for i in 0..n {
            g.add_weighted_edge(i, i + 1, 1.0);
        }
        let result = SearchEngine::new(&g).search(0, n as usize, 0.5).unwrap();
        assert_eq!(result.len(), n as usize);
        assert_eq!(result.get(&n).unwrap().path.len(), n as usize);
        drop(result);
    }

    #[test]
    fn stats_track_frontier() {
        let mut g = MemoryGraph::new();
        g.add_weighted_edge(1, 2, 0.9);
        g.add_weighted_edge(1, 3, 0.9);
        g.add_weighted_edge(1, 4, 0.9);
        let result = SearchEngine::new(&g).search(1, 1, 0.5).unwrap();
        let stats = result.stats();
        assert_eq!(stats.branches_evaluated, 4);
        assert_eq!(stats.branches_expanded, 1);
        assert_eq!(stats.edges_scanned, 3);
        assert_eq!(stats.peak_frontier, 3);
    }
}
