//! The per-branch continuation decision.
//!
//! Evaluated once for every branch popped off the frontier, before any of
//! its edges are enumerated. The decision depends only on the branch's
//! length and cumulative weight plus the two search bounds, so it is a pure
//! function and holds no reference to the graph or the results.

/// What to do with one branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Do not record; enumerate outgoing edges. Only the start branch.
    Expand,
    /// Record the end vertex and enumerate outgoing edges.
    RecordAndExpand,
    /// Record the end vertex; the depth bound stops this branch here.
    Record,
    /// Neither record nor expand.
    Prune,
}

impl Decision {
    pub fn records(self) -> bool {
        matches!(self, Self::Record | Self::RecordAndExpand)
    }

    pub fn expands(self) -> bool {
        matches!(self, Self::Expand | Self::RecordAndExpand)
    }
}

/// The bounds a search is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PruningEvaluator {
    max_depth: usize,
    threshold: f64,
}

impl PruningEvaluator {
    pub fn new(max_depth: usize, threshold: f64) -> Self {
        Self {
            max_depth,
            threshold,
        }
    }

    /// Decide for a branch of `length` edges whose cumulative weight,
    /// including its last edge, is `weight`.
    ///
    /// The start branch is never recorded and ignores the threshold. The
    /// depth bound applies to every branch, so with `max_depth == 0`
    /// nothing is expanded at all.
    pub fn evaluate(&self, length: usize, weight: f64) -> Decision {
        let can_expand = length < self.max_depth;
        if length == 0 {
            return if can_expand {
                Decision::Expand
            } else {
                Decision::Prune
            };
        }
        if weight < self.threshold {
            return Decision::Prune;
        }
        if can_expand {
            Decision::RecordAndExpand
        } else {
            Decision::Record
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
