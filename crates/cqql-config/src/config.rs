//! Configuration types and loading.
//!
//! The main entry point is [`CqqlConfig`], which represents the contents of
//! `.cqql/config.yaml`. Values are layered with `figment`: built-in defaults,
//! then the YAML file, then `CQQL_*` environment variables (`CQQL_MAX_DEPTH`,
//! `CQQL_SEPARATOR`, ...).

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use cqql_core::{AttrType, AttributeSchema, Separator};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the configuration inside `.cqql/`.
pub const CONFIG_FILE: &str = "config.yaml";

/// Prefix of environment variables that override config keys.
pub const ENV_PREFIX: &str = "CQQL_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration could not be (de)serialized as YAML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// The layered configuration did not match the expected shape.
    #[error("invalid configuration: {0}")]
    ExtractError(#[from] Box<figment::Error>),

    /// The `.cqql/` directory was not found.
    #[error("no .cqql directory found (run 'cq config init' first)")]
    ConfigDirNotFound,

    /// A configuration value was invalid.
    #[error("invalid configuration value for key '{key}': {reason}")]
    InvalidValue {
        /// The configuration key that had an invalid value.
        key: String,
        /// A description of why the value is invalid.
        reason: String,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The CQQL configuration, corresponding to `.cqql/config.yaml`.
///
/// All fields use `serde` defaults so that a partially-specified YAML file
/// deserializes with sensible values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CqqlConfig {
    /// Separator between attribute and bucket in atom names.
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Bound on the normalizer's split recursion.
    #[serde(default = "default_max_depth", rename = "max-depth")]
    pub max_depth: usize,

    /// Ordinal attributes whose overlapping buckets are case-split.
    #[serde(default)]
    pub ordinal: Vec<String>,

    /// Attribute types; unlisted attributes are `prox`.
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrType>,

    /// Default dataset (JSON Lines), relative to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,
}

impl Default for CqqlConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            max_depth: default_max_depth(),
            ordinal: Vec::new(),
            attributes: BTreeMap::new(),
            data: None,
        }
    }
}

fn default_separator() -> String {
    cqql_core::attribute::DEFAULT_SEPARATOR.to_string()
}

fn default_max_depth() -> usize {
    50
}

impl CqqlConfig {
    /// The attribute naming this config describes.
    pub fn naming(&self) -> Separator {
        Separator::new(self.separator.clone())
    }

    /// The attribute type table.
    pub fn schema(&self) -> AttributeSchema {
        self.attributes
            .iter()
            .map(|(attr, ty)| (attr.clone(), *ty))
            .collect()
    }

    /// Ordinal attributes as a set, trimmed and without empty entries.
    pub fn ordinal_attrs(&self) -> BTreeSet<String> {
        self.ordinal
            .iter()
            .map(|attr| attr.trim().to_string())
            .filter(|attr| !attr.is_empty())
            .collect()
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero `max-depth` or an
    /// empty `separator`.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max-depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.separator.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "separator".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load configuration from `config.yaml` inside the given `.cqql/` directory.
///
/// A missing or empty file yields the defaults (still subject to
/// environment overrides).
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
/// [`ConfigError::ExtractError`] if it does not have the expected shape, or
/// [`ConfigError::InvalidValue`] if validation fails.
pub fn load_config(config_dir: &Path) -> Result<CqqlConfig> {
    let path = config_dir.join(CONFIG_FILE);
    let file = path.exists().then_some(path.as_path());
    load_with_defaults(CqqlConfig::default(), file)
}

/// Layer `defaults`, the YAML file at `path` (if any) and the environment.
///
/// Unlike [`load_config`], an explicitly given `path` must exist.
///
/// # Errors
///
/// See [`load_config`].
pub fn load_with_defaults(defaults: CqqlConfig, path: Option<&Path>) -> Result<CqqlConfig> {
    let mut figment = Figment::from(Serialized::defaults(defaults));

    if let Some(path) = path {
        let content = std::fs::read_to_string(path)?;
        // An empty file is valid and leaves the defaults untouched.
        if !content.trim().is_empty() {
            figment = figment.merge(Yaml::string(&content));
        }
    }

    let env = Env::prefixed(ENV_PREFIX)
        .ignore(&["dir", "config"])
        .map(|key| key.as_str().replace('_', "-").into());

    let config: CqqlConfig = figment.merge(env).extract().map_err(Box::new)?;
    config.validate()?;
    Ok(config)
}

/// Save configuration to `config.yaml` inside the given `.cqql/` directory.
///
/// The directory is created if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] on I/O failure or
/// [`ConfigError::ParseError`] if serialization fails.
pub fn save_config(config_dir: &Path, config: &CqqlConfig) -> Result<()> {
    std::fs::create_dir_all(config_dir)?;
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(config_dir.join(CONFIG_FILE), yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let cfg = CqqlConfig::default();
        assert_eq!(cfg.separator, "__");
        assert_eq!(cfg.max_depth, 50);
        assert!(cfg.ordinal.is_empty());
        assert!(cfg.schema().is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_load_missing_config_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg, CqqlConfig::default());
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "  \n").unwrap();
        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg, CqqlConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_with_defaults(CqqlConfig::default(), Some(&dir.path().join("nope.yaml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_roundtrip_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(".cqql");

        let mut cfg = CqqlConfig::default();
        cfg.max_depth = 12;
        cfg.ordinal = vec!["price".to_string(), "dist".to_string()];
        cfg.attributes.insert("balcony".to_string(), AttrType::Db);
        cfg.data = Some(PathBuf::from("apartments.jsonl"));
        save_config(&config_dir, &cfg).unwrap();

        let loaded = load_config(&config_dir).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "ordinal: [price, size]\nattributes:\n  quiet: text\n",
        )
        .unwrap();

        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(
            cfg.ordinal_attrs(),
            BTreeSet::from(["price".to_string(), "size".to_string()])
        );
        assert_eq!(cfg.schema().type_of("quiet"), AttrType::Text);
        // Everything else should be default
        assert_eq!(cfg.max_depth, 50);
        assert_eq!(cfg.separator, "__");
    }

    #[test]
    fn test_zero_max_depth_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "max-depth: 0\n").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        match err {
            ConfigError::InvalidValue { key, .. } => assert_eq!(key, "max-depth"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_separator_is_invalid() {
        let cfg = CqqlConfig {
            separator: String::new(),
            ..CqqlConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unknown_attribute_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "attributes:\n  quiet: fuzzy\n",
        )
        .unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ExtractError(_)));
    }

    #[test]
    fn test_ordinal_attrs_are_trimmed() {
        let cfg = CqqlConfig {
            ordinal: vec![" price ".to_string(), String::new(), "dist".to_string()],
            ..CqqlConfig::default()
        };
        assert_eq!(
            cfg.ordinal_attrs(),
            BTreeSet::from(["dist".to_string(), "price".to_string()])
        );
    }

    #[test]
    fn test_naming_uses_separator() {
        use cqql_core::AttributeNaming;

        let cfg = CqqlConfig {
            separator: ".".to_string(),
            ..CqqlConfig::default()
        };
        assert_eq!(cfg.naming().attribute("price.low"), "price");
    }
}
