//! Configuration loading and management for Include Guardian
//!
//! Architecture: Anti-Corruption Layer - Configuration translates external YAML formats
//! - Raw YAML structures are converted to clean domain objects
//! - Default configuration is embedded in the domain, not infrastructure

use crate::domain::{MigrateError, MigrateResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration structure for Include Guardian
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigratorConfig {
    /// Configuration format version
    pub version: String,
    /// Guard-name derivation settings
    pub naming: NamingConfig,
    /// File selection settings
    pub files: FileConfig,
}

/// Settings controlling how guard names are derived from paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Directory segment anchoring the relative key (e.g. `mods`)
    pub anchor: String,
    /// Namespace prefix prepended to every guard name
    pub prefix: String,
}

/// Settings controlling which files the walker considers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Header extensions to migrate, without leading dots
    pub extensions: Vec<String>,
    /// Glob patterns for paths to exclude from traversal
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl MigratorConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> MigrateResult<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            MigrateError::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::load_from_str(&contents)
    }

    /// Load configuration from string content
    pub fn load_from_str(content: &str) -> MigrateResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| MigrateError::config(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration
    pub fn with_defaults() -> Self {
        Self {
            version: "1.0".to_string(),
            naming: NamingConfig { anchor: "mods".to_string(), prefix: "SERIKA_".to_string() },
            files: FileConfig {
                extensions: vec!["h".to_string(), "hpp".to_string()],
                exclude: vec!["**/build/**".to_string(), "**/.git/**".to_string()],
            },
        }
    }

    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> MigrateResult<()> {
        if !["1.0"].contains(&self.version.as_str()) {
            return Err(MigrateError::config(format!(
                "Unsupported configuration version: {}. Supported versions: 1.0",
                self.version
            )));
        }

        if self.naming.anchor.is_empty() || self.naming.anchor.contains('/') {
            return Err(MigrateError::config(format!(
                "Anchor must be a single directory segment, got '{}'",
                self.naming.anchor
            )));
        }

        // The prefix lands verbatim in a preprocessor identifier.
        if !self.naming.prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(MigrateError::config(format!(
                "Prefix must contain only [A-Za-z0-9_], got '{}'",
                self.naming.prefix
            )));
        }

        if self.files.extensions.is_empty() {
            return Err(MigrateError::config("At least one header extension is required"));
        }

        for ext in &self.files.extensions {
            if ext.starts_with('.') || ext.is_empty() {
                return Err(MigrateError::config(format!(
                    "Extensions are matched without a leading dot, got '{ext}'"
                )));
            }
        }

        for pattern in &self.files.exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                MigrateError::config(format!("Invalid exclude pattern '{pattern}': {e}"))
            })?;
        }

        Ok(())
    }

    /// Convert to JSON for serialization
    pub fn to_json(&self) -> MigrateResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MigrateError::config(format!("Failed to serialize config: {e}")))
    }

    /// Create a fingerprint of the configuration for report provenance
    pub fn fingerprint(&self) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        self.version.hash(&mut hasher);
        self.naming.anchor.hash(&mut hasher);
        self.naming.prefix.hash(&mut hasher);
        for ext in &self.files.extensions {
            ext.hash(&mut hasher);
        }
        for pattern in &self.files.exclude {
            pattern.hash(&mut hasher);
        }

        format!("{:x}", hasher.finish())
    }
}

impl Default for MigratorConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Configuration builder for programmatic construction
pub struct ConfigBuilder {
    config: MigratorConfig,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self { config: MigratorConfig::default() }
    }

    /// Create a builder seeded from an existing configuration
    pub fn from_config(config: MigratorConfig) -> Self {
        Self { config }
    }

    /// Set the anchor directory segment
    pub fn anchor(mut self, anchor: impl Into<String>) -> Self {
        self.config.naming.anchor = anchor.into();
        self
    }

    /// Set the guard-name prefix
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.naming.prefix = prefix.into();
        self
    }

    /// Replace the header extension filter
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.config.files.extensions = extensions;
        self
    }

    /// Add an exclude glob pattern
    pub fn add_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.config.files.exclude.push(pattern.into());
        self
    }

    /// Build the final configuration
    pub fn build(self) -> MigrateResult<MigratorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MigratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.naming.anchor, "mods");
        assert_eq!(config.naming.prefix, "SERIKA_");
        assert!(config.files.extensions.contains(&"hpp".to_string()));
    }

    #[test]
    fn test_load_from_yaml() {
        let yaml = r#"
version: "1.0"
naming:
  anchor: include
  prefix: ENGINE_
files:
  extensions: [h, hh, hpp]
  exclude:
    - "**/third_party/**"
"#;
        let config = MigratorConfig::load_from_str(yaml).unwrap();
        assert_eq!(config.naming.anchor, "include");
        assert_eq!(config.naming.prefix, "ENGINE_");
        assert_eq!(config.files.extensions.len(), 3);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let yaml = r#"
version: "2.0"
naming: { anchor: mods, prefix: X_ }
files: { extensions: [h] }
"#;
        assert!(MigratorConfig::load_from_str(yaml).is_err());
    }

    #[test]
    fn test_rejects_bad_prefix() {
        let config = ConfigBuilder::new().prefix("BAD PREFIX ").build();
        assert!(config.is_err());
    }

    #[test]
    fn test_rejects_dotted_extension() {
        let config = ConfigBuilder::new().extensions(vec![".h".to_string()]).build();
        assert!(config.is_err());
    }

    #[test]
    fn test_rejects_invalid_exclude_pattern() {
        let config = ConfigBuilder::new().add_exclude("[invalid").build();
        assert!(config.is_err());
    }

    #[test]
    fn test_fingerprint_stability() {
        let config = MigratorConfig::default();
        assert_eq!(config.fingerprint(), config.fingerprint());

        let other = ConfigBuilder::new().prefix("OTHER_").build().unwrap();
        assert_ne!(config.fingerprint(), other.fingerprint());
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = MigratorConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let rehydrated = MigratorConfig::load_from_str(&yaml).unwrap();
        assert_eq!(config.fingerprint(), rehydrated.fingerprint());
    }
}
