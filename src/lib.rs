//! productpath: maximum product-weight paths over directed graphs.
//!
//! From a start vertex, a breadth-first search multiplies edge weights along
//! every branch, prunes branches whose product falls below a threshold or
//! whose length exceeds a depth bound, and keeps, per reachable vertex, the
//! best product seen together with a path achieving it.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod graph;
pub mod observability;
pub mod procedure;
pub mod search;
pub mod types;

pub use error::{ProductPathError, Result};
pub use procedure::{max_weighted_product_paths, WeightAndPath, PROCEDURE_NAME};
pub use search::{SearchEngine, SearchResult, WeightExtractor};
