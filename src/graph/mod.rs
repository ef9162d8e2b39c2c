//! Graph layer: the accessor seam the search runs against, the shared path
//! representation, and two hosts (in-memory and SQLite-backed).

pub mod accessor;
pub mod document;
pub mod memory;
pub mod path;
pub mod store;

pub use accessor::GraphAccessor;
pub use document::GraphDocument;
pub use memory::{EdgeId, MemoryGraph};
pub use path::Path;
pub use store::GraphStore;
