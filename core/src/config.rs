//! Parser configuration files.
//!
//! A [`ParserConfig`] bundles the pass-through policy with the schema so a
//! whole parser can be described in one YAML or JSON file.
//!
//! # Example YAML
//!
//! ```yaml
//! policy: pass-double-dash
//! schema:
//!   name: runner
//!   options:
//!     - name: verbose
//!       short: v
//!     - name: mode
//!       short: m
//!       kind: scalar
//!       value_type: integer
//!     - name: args
//!       short: a
//!       long: args
//!       kind: list
//!       terminator: ";"
//!   positional:
//!     - name: rest
//!       multiple: true
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ParserSchema, PassThrough};

/// Errors raised while loading or saving a [`ParserConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The file was written against an incompatible schema contract.
    #[error("unsupported schema version {found} (supported: {supported})")]
    UnsupportedVersion { found: String, supported: String },
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Policy plus schema, as stored on disk.
///
/// # Examples
///
/// ```
/// use argscan_core::{ParserConfig, PassThrough};
///
/// let yaml = r#"
/// policy: pass-after-non-option
/// schema:
///   options:
///     - name: verbose
///       short: v
/// "#;
/// let config: ParserConfig = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(config.policy, PassThrough::PassAfterNonOption);
/// assert_eq!(config.schema.options.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Schema contract version the file was written against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Pass-through policy.
    #[serde(default)]
    pub policy: PassThrough,
    /// Option and positional declarations.
    #[serde(default)]
    pub schema: ParserSchema,
}

impl ParserConfig {
    pub fn new(policy: PassThrough, schema: ParserSchema) -> Self {
        Self {
            schema_version: Some(crate::SCHEMA_CONTRACT_VERSION.to_string()),
            policy,
            schema,
        }
    }

    /// Loads a config file. `.json` files are read as JSON, anything else as
    /// YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// a JSON/YAML error if parsing fails, or
    /// [`UnsupportedVersion`](ConfigError::UnsupportedVersion) if the file's
    /// `schema_version` has a different major version.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let config: Self = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        config.check_version()?;
        Ok(config)
    }

    /// Accepts configs without a version, or with the same major version as
    /// [`SCHEMA_CONTRACT_VERSION`](crate::SCHEMA_CONTRACT_VERSION).
    pub fn check_version(&self) -> Result<()> {
        let Some(found) = &self.schema_version else {
            return Ok(());
        };
        if major(found) != major(crate::SCHEMA_CONTRACT_VERSION) {
            return Err(ConfigError::UnsupportedVersion {
                found: found.clone(),
                supported: crate::SCHEMA_CONTRACT_VERSION.to_string(),
            });
        }
        Ok(())
    }

    /// Saves the config, choosing the format from the extension as
    /// [`load`](Self::load) does.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be
    /// written, or a JSON/YAML error if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(std::fs::File::create(path)?);
        if is_json(path) {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_yaml::to_writer(writer, self)?;
        }
        Ok(())
    }
}

fn major(version: &str) -> &str {
    version.trim().split('.').next().unwrap_or_default()
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use crate::{ArgSchema, OptionKind, OptionSchema, ValueType};

    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
policy: pass-double-dash
schema:
  name: runner
  options:
    - name: verbose
      short: v
    - name: mode
      short: m
      kind: scalar
      value_type: integer
    - name: args
      short: a
      long: args
      kind: list
      terminator: ";"
  positional:
    - name: rest
      value_type: integer
      required: true
      multiple: true
"#
    }

    #[test]
    fn test_parse_sample_yaml() {
        let config: ParserConfig = serde_yaml::from_str(sample_yaml()).unwrap();

        assert_eq!(config.policy, PassThrough::PassDoubleDash);
        assert_eq!(config.schema.name, "runner");
        assert_eq!(config.schema.options.len(), 3);
        assert_eq!(config.schema.options[0].kind, OptionKind::Bool);
        assert_eq!(config.schema.options[1].value_type, ValueType::Integer);
        assert_eq!(config.schema.options[2].terminator.as_deref(), Some(";"));
        assert!(config.schema.positional[0].multiple);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ParserConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.policy, PassThrough::Default);
        assert!(config.schema.options.is_empty());
    }

    #[test]
    fn test_save_and_load_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let config = ParserConfig::new(
            PassThrough::PassAfterNonOption,
            ParserSchema::new("tool")
                .with_option(OptionSchema::boolean("verbose", Some('v'), None))
                .with_arg(ArgSchema::required("file", ValueType::String)),
        );

        for file in ["config.yaml", "config.json"] {
            let path = dir.path().join(file);
            config.save(&path).unwrap();
            let loaded = ParserConfig::load(&path).unwrap();
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ParserConfig::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_load_checks_major_version() {
        let dir = tempfile::tempdir().unwrap();

        let minor = dir.path().join("minor.yaml");
        std::fs::write(&minor, "schema_version: \"1.4.0\"\npolicy: default\n").unwrap();
        assert!(ParserConfig::load(&minor).is_ok());

        let major = dir.path().join("major.yaml");
        std::fs::write(&major, "schema_version: \"2.0.0\"\npolicy: default\n").unwrap();
        let err = ParserConfig::load(&major).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedVersion { ref found, .. } if found == "2.0.0"
        ));
    }
}
