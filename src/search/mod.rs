//! Maximum product-weight path search.
//!
//! - [`weight`] reads and normalizes edge weights
//! - [`evaluator`] decides, per branch, whether to record and/or expand
//! - [`aggregator`] keeps the best weight per reached vertex
//! - [`engine`] drives the breadth-first expansion

pub mod aggregator;
pub mod engine;
pub mod evaluator;
pub mod weight;

pub use aggregator::{ResultAggregator, ResultEntry, SearchResult};
pub use engine::{BranchState, SearchEngine, SearchStats};
pub use evaluator::{Decision, PruningEvaluator};
pub use weight::{WeightExtractor, DEFAULT_WEIGHT_PROPERTY};
