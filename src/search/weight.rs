//! Edge weight extraction.
//!
//! A weight is stored either as a float or as an integer property. Integers
//! are widened to `f64`; anything else, a missing property, or a non-finite
//! float is an [`InvalidWeightType`] error naming the edge.
//!
//! [`InvalidWeightType`]: crate::error::ProductPathError::InvalidWeightType

use crate::error::{ProductPathError, Result};
use crate::graph::accessor::GraphAccessor;
use crate::types::PropertyValue;

/// Property read when no other name is configured.
pub const DEFAULT_WEIGHT_PROPERTY: &str = "weight";

/// Reads one named numeric property off edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightExtractor {
    property: String,
}

impl Default for WeightExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_PROPERTY)
    }
}

impl WeightExtractor {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    /// The weight of `edge` as `f64`.
    pub fn extract<G: GraphAccessor + ?Sized>(&self, graph: &G, edge: &G::Edge) -> Result<f64> {
        let value = graph.edge_property(edge, &self.property);
        coerce_weight(value.as_ref()).map_err(|found| ProductPathError::InvalidWeightType {
            edge: graph.describe_edge(edge),
            property: self.property.clone(),
            found,
        })
    }
}

/// Normalize a raw property to a finite `f64`, or describe what was found.
pub fn coerce_weight(value: Option<&PropertyValue>) -> std::result::Result<f64, String> {
    match value {
        Some(PropertyValue::Float(f)) if f.is_finite() => Ok(*f),
        Some(PropertyValue::Float(f)) => Err(format!("non-finite float {f}")),
        Some(PropertyValue::Int(i)) => Ok(*i as f64),
        Some(other) => Err(other.to_string()),
        None => Err("missing property".to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
