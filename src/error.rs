//! Error types for productpath.
//!
//! A single crate-wide error enum keeps the `?` chain flat from the store
//! layer up through the search engine and the CLI.

use thiserror::Error;

/// Every failure the library can surface.
#[derive(Debug, Error)]
pub enum ProductPathError {
    /// An edge's weight property is absent, not numeric, or not finite.
    /// Aborts the whole search.
    #[error("invalid weight property '{property}' on {edge}: {found}")]
    InvalidWeightType {
        edge: String,
        property: String,
        found: String,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProductPathError {
    /// True for the weight-coercion failure that aborts a search.
    pub fn is_invalid_weight(&self) -> bool {
        matches!(self, Self::InvalidWeightType { .. })
    }
}

pub type Result<T> = std::result::Result<T, ProductPathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_weight_message_names_edge_and_property() {
        let err = ProductPathError::InvalidWeightType {
            edge: "(a)-[REL #3]->(b)".into(),
            property: "weight".into(),
            found: "string \"heavy\"".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("(a)-[REL #3]->(b)"));
        assert!(msg.contains("'weight'"));
        assert!(err.is_invalid_weight());
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ProductPathError = io.into();
        assert!(matches!(err, ProductPathError::Io(_)));
        assert!(!err.is_invalid_weight());
    }
}
