//! Multi-source config loading.
//!
//! Priority, lowest first: built-in defaults, the user config file, the
//! project file (or an explicit `--config` path), then `PRODUCTPATH_*`
//! environment variables. YAML layers are deep-merged before
//! deserialization so a file that sets one field leaves the rest of the
//! section to lower layers.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::config::schema::{OutputFormat, ProductPathConfig};
use crate::error::{ProductPathError, Result};

/// File name looked up in the user config dir and the working directory.
pub const CONFIG_FILE_NAME: &str = "productpath.yaml";

pub const ENV_WEIGHT_PROPERTY: &str = "PRODUCTPATH_WEIGHT_PROPERTY";
pub const ENV_MAX_DEPTH: &str = "PRODUCTPATH_MAX_DEPTH";
pub const ENV_THRESHOLD: &str = "PRODUCTPATH_THRESHOLD";
pub const ENV_DB: &str = "PRODUCTPATH_DB";
pub const ENV_FORMAT: &str = "PRODUCTPATH_FORMAT";

/// One YAML layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub path: PathBuf,
    /// A required file that is missing is an error; an optional one is skipped.
    pub required: bool,
}

impl ConfigFile {
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }

    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }
}

/// `<config dir>/productpath.yaml` for the current user, if the platform
/// has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "productpath")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Load the effective configuration from every source.
pub fn load_config(explicit: Option<&Path>) -> Result<ProductPathConfig> {
    let mut files = Vec::new();
    match user_config_path() {
        Some(path) => files.push(ConfigFile::optional(path)),
        None => tracing::warn!("no user config directory on this platform, skipping user config"),
    }
    files.push(match explicit {
        Some(path) => ConfigFile::required(path),
        None => ConfigFile::optional(CONFIG_FILE_NAME),
    });

    let mut config = load_layers(&files)?;
    apply_env(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Merge YAML files in order and deserialize the result.
pub fn load_layers(files: &[ConfigFile]) -> Result<ProductPathConfig> {
    let mut merged = Value::Mapping(Default::default());
    for file in files {
        if !file.path.exists() {
            if file.required {
                return Err(ProductPathError::Config(format!(
                    "config file not found: {}",
                    file.path.display()
                )));
            }
            tracing::debug!(path = %file.path.display(), "config file absent, skipping");
            continue;
        }
        let raw = std::fs::read_to_string(&file.path)?;
        let layer: Value = serde_yaml::from_str(&raw)?;
        tracing::debug!(path = %file.path.display(), "loaded config layer");
        merge_yaml(&mut merged, layer);
    }
    let config: ProductPathConfig = serde_yaml::from_value(merged)?;
    config.validate()?;
    Ok(config)
}

/// Deep-merge `overlay` into `base`; mappings merge key by key, anything
/// else in `overlay` replaces what is in `base`. A null overlay (an empty
/// file) changes nothing.
pub fn merge_yaml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Apply `PRODUCTPATH_*` overrides read through `lookup`.
pub fn apply_env<F>(config: &mut ProductPathConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(property) = lookup(ENV_WEIGHT_PROPERTY) {
        config.search.weight_property = property.trim().to_string();
    }
    if let Some(raw) = lookup(ENV_MAX_DEPTH) {
        config.search.max_depth = raw.trim().parse().map_err(|_| {
            ProductPathError::Config(format!("{ENV_MAX_DEPTH} is not an integer: {raw:?}"))
        })?;
    }
    if let Some(raw) = lookup(ENV_THRESHOLD) {
        config.search.threshold = raw.trim().parse().map_err(|_| {
            ProductPathError::Config(format!("{ENV_THRESHOLD} is not a number: {raw:?}"))
        })?;
    }
    if let Some(path) = lookup(ENV_DB) {
        config.store.path = path;
    }
    if let Some(raw) = lookup(ENV_FORMAT) {
        config.output.format = OutputFormat::from_str_loose(&raw).ok_or_else(|| {
            ProductPathError::Config(format!("{ENV_FORMAT} must be table or json: {raw:?}"))
        })?;
    }
    config.validate()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn later_layers_override_field_by_field() {
        let dir = TempDir::new().unwrap();
        let user = write(&dir, "user.yaml", "search:\n  max_depth: 3\n  threshold: 0.2\n");
        let project = write(&dir, "project.yaml", "search:\n  threshold: 0.6\n");
        let config = load_layers(&[ConfigFile::optional(user), ConfigFile::optional(project)]).unwrap();
        assert_eq!(config.search.max_depth, 3);
        assert_eq!(config.search.threshold, 0.6);
        assert_eq!(config.search.weight_property, "weight");
    }

    #[test]
    fn missing_optional_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let config = load_layers(&[ConfigFile::optional(dir.path().join("nope.yaml"))]).unwrap();
        assert_eq!(config, ProductPathConfig::default());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_layers(&[ConfigFile::required(dir.path().join("nope.yaml"))]).unwrap_err();
        assert!(matches!(err, ProductPathError::Config(_)));
    }

    #[test]
    fn empty_file_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let base = write(&dir, "base.yaml", "store:\n  path: graph.db\n");
        let empty = write(&dir, "empty.yaml", "");
        let config = load_layers(&[ConfigFile::optional(base), ConfigFile::optional(empty)]).unwrap();
        assert_eq!(config.store.path, "graph.db");
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let bad = write(&dir, "bad.yaml", "search: [unclosed\n");
        let err = load_layers(&[ConfigFile::optional(bad)]).unwrap_err();
        assert!(matches!(err, ProductPathError::Yaml(_)));
    }

    #[test]
    fn empty_weight_property_is_rejected_from_file_and_env_alike() {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "blank.yaml", "search:\n  weight_property: \"\"\n");
        let from_file = load_layers(&[ConfigFile::optional(file)]).unwrap_err();

        let mut config = ProductPathConfig::default();
        let from_env = apply_env(&mut config, env(&[(ENV_WEIGHT_PROPERTY, "")])).unwrap_err();

        assert_eq!(from_file.to_string(), from_env.to_string());
        assert!(matches!(from_file, ProductPathError::Config(_)));
    }

    #[test]
    fn env_overrides_everything() {
        let mut config = ProductPathConfig::default();
        apply_env(
            &mut config,
            env(&[
                (ENV_WEIGHT_PROPERTY, "confidence"),
                (ENV_MAX_DEPTH, "-1"),
                (ENV_THRESHOLD, "0.05"),
                (ENV_DB, "/data/g.db"),
                (ENV_FORMAT, "JSON"),
            ]),
        )
        .unwrap();
        assert_eq!(config.search.weight_property, "confidence");
        assert_eq!(config.search.max_depth, -1);
        assert_eq!(config.search.threshold, 0.05);
        assert_eq!(config.store.path, "/data/g.db");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn malformed_env_values_are_errors() {
        for (key, value) in [
            (ENV_MAX_DEPTH, "deep"),
            (ENV_THRESHOLD, "high"),
            (ENV_FORMAT, "xml"),
            (ENV_WEIGHT_PROPERTY, " "),
        ] {
            let mut config = ProductPathConfig::default();
            let err = apply_env(&mut config, env(&[(key, value)])).unwrap_err();
            assert!(matches!(err, ProductPathError::Config(_)), "{key}={value}");
        }
    }

    #[test]
    fn merge_replaces_scalars_and_merges_maps() {
        let mut base: Value = serde_yaml::from_str("a: 1\nb:\n  c: 2\n  d: 3\n").unwrap();
        let overlay: Value = serde_yaml::from_str("b:\n  d: 4\ne: 5\n").unwrap();
        merge_yaml(&mut base, overlay);
        let expected: Value = serde_yaml::from_str("a: 1\nb:\n  c: 2\n  d: 4\ne: 5\n").unwrap();
        assert_eq!(base, expected);
    }
}
