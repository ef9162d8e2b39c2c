//! Configuration data structures for productpath.
//!
//! Defines the YAML config format: search defaults, store location and
//! output format. Every section and field has a default so partial files
//! merge cleanly in the loader.

use serde::{Deserialize, Serialize};

use crate::error::{ProductPathError, Result};
use crate::search::DEFAULT_WEIGHT_PROPERTY;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration.
///
/// Loaded from YAML files and environment variables, then overridden by
/// CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPathConfig {
    /// Config format version (currently "1.0").
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl ProductPathConfig {
    /// Reject values no search can run with, whichever layer set them.
    pub fn validate(&self) -> Result<()> {
        if self.search.weight_property.trim().is_empty() {
            return Err(ProductPathError::Config(
                "search.weight_property must not be empty".to_string(),
            ));
        }
        if self.search.threshold.is_nan() {
            return Err(ProductPathError::Config(
                "search.threshold must be a number".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ProductPathConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            search: SearchConfig::default(),
            store: StoreConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// SearchConfig
// ---------------------------------------------------------------------------

/// Defaults for searches that do not pass explicit parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Edge property holding the weight.
    #[serde(default = "default_weight_property")]
    pub weight_property: String,

    /// Maximum path length in edges. Negative values yield no results.
    #[serde(default = "default_max_depth")]
    pub max_depth: i64,

    /// Minimum cumulative weight a path must keep.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            weight_property: default_weight_property(),
            max_depth: default_max_depth(),
            threshold: default_threshold(),
        }
    }
}

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file.
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How the CLI prints search records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text columns.
    #[default]
    Table,
    /// Records and search stats as JSON.
    Json,
}

impl OutputFormat {
    /// Parse from a loose string (case-insensitive, surrounding blanks ignored).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_version() -> String {
    "1.0".to_string()
}

fn default_weight_property() -> String {
    DEFAULT_WEIGHT_PROPERTY.to_string()
}

fn default_max_depth() -> i64 {
    7
}

fn default_threshold() -> f64 {
    0.3
}

fn default_store_path() -> String {
    "productpath.db".to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq as pa_eq;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn test_default_config() {
        let config = ProductPathConfig::default();
        pa_eq!(config.version, "1.0");
        pa_eq!(config.search.weight_property, "weight");
        pa_eq!(config.search.max_depth, 7);
        pa_eq!(config.search.threshold, 0.3);
        pa_eq!(config.store.path, "productpath.db");
        pa_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config: ProductPathConfig = serde_yaml::from_str("{}").unwrap();
        pa_eq!(config, ProductPathConfig::default());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ProductPathConfig::default().validate().is_ok());
    }

    #[test_case("search:\n  weight_property: \"\"\n" ; "empty weight property")]
    #[test_case("search:\n  weight_property: \"  \"\n" ; "blank weight property")]
    #[test_case("search:\n  threshold: .nan\n" ; "nan threshold")]
    fn test_validate_rejects(yaml: &str) {
        let config: ProductPathConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(config.validate(), Err(ProductPathError::Config(_))));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let yaml = "search:\n  threshold: 0.1\n";
        let config: ProductPathConfig = serde_yaml::from_str(yaml).unwrap();
        pa_eq!(config.search.threshold, 0.1);
        pa_eq!(config.search.max_depth, 7);
        pa_eq!(config.search.weight_property, "weight");
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
version: "1.0"
search:
  weight_property: confidence
  max_depth: 3
  threshold: 0.5
store:
  path: /tmp/graph.db
output:
  format: json
"#;
        let config: ProductPathConfig = serde_yaml::from_str(yaml).unwrap();
        pa_eq!(config.search.weight_property, "confidence");
        pa_eq!(config.search.max_depth, 3);
        pa_eq!(config.store.path, "/tmp/graph.db");
        pa_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_format_rejected() {
        let yaml = "output:\n  format: xml\n";
        let result: std::result::Result<ProductPathConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test_case("table", Some(OutputFormat::Table) ; "table lowercase")]
    #[test_case("TABLE", Some(OutputFormat::Table) ; "table uppercase")]
    #[test_case("text", Some(OutputFormat::Table) ; "text alias")]
    #[test_case(" json ", Some(OutputFormat::Json) ; "json padded")]
    #[test_case("Json", Some(OutputFormat::Json) ; "json mixed")]
    #[test_case("", None ; "empty string")]
    #[test_case("xml", None ; "unknown")]
    fn format_from_str_loose(input: &str, expected: Option<OutputFormat>) {
        pa_eq!(OutputFormat::from_str_loose(input), expected);
    }

    #[test]
    fn format_display_matches_as_str() {
        for format in [OutputFormat::Table, OutputFormat::Json] {
            pa_eq!(format.to_string(), format.as_str());
            pa_eq!(OutputFormat::from_str_loose(format.as_str()), Some(format));
        }
    }

    proptest! {
        #[test]
        fn yaml_roundtrip(
            property in "[a-z][a-z_]{0,15}",
            depth in -5i64..50,
            threshold in 0.0f64..1.0,
            json in any::<bool>(),
        ) {
            let config = ProductPathConfig {
                search: SearchConfig {
                    weight_property: property,
                    max_depth: depth,
                    threshold,
                },
                output: OutputConfig {
                    format: if json { OutputFormat::Json } else { OutputFormat::Table },
                },
                ..ProductPathConfig::default()
            };
            let yaml = serde_yaml::to_string(&config).unwrap();
            let back: ProductPathConfig = serde_yaml::from_str(&yaml).unwrap();
            prop_assert_eq!(back, config);
        }
    }
}
