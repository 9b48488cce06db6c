// Project configuration loaded from project.toml
//
// [limits]    overrides CompilerLimits fields
// [protocol]  renames the construction macros used by the emitter

use serde::Deserialize;
use thiserror::Error;
use std::fs;
use std::path::Path;

use crate::codegen::Protocol;
use crate::limits::{CompilerLimits, LimitsConfig};

/// Everything the parser and emitter can be configured with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub limits: CompilerLimits,
    pub protocol: Protocol,
}

impl Config {
    /// Load configuration from project.toml, falling back to defaults
    ///
    /// Returns error only if TOML is malformed or the limits are invalid,
    /// not if the file is missing
    pub fn from_project_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("{} not found, using default configuration", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_toml_str(&content)
            .map_err(|e| ConfigError::new(format!("{}: {}", path.display(), e.message)))
    }

    /// Parse configuration from TOML text, merging it over the defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let project: ProjectConfig = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        let mut config = Self::default();

        if let Some(limits) = &project.limits {
            config.limits.merge(limits);
        }
        config.limits.validate()?;

        if let Some(protocol) = project.protocol {
            if let Some(node) = protocol.node {
                config.protocol.node = node;
            }
            if let Some(list) = protocol.list {
                config.protocol.list = list;
            }
            if let Some(string) = protocol.str {
                config.protocol.str = string;
            }
        }
        config.protocol.validate()?;

        Ok(config)
    }
}

/// Invalid or unreadable configuration, from either table
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Configuration error: {message}")]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(message: String) -> Self {
        Self { message }
    }
}

/// TOML configuration structures for deserialization
#[derive(Debug, Deserialize)]
struct ProjectConfig {
    limits: Option<LimitsConfig>,
    protocol: Option<ProtocolConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProtocolConfig {
    node: Option<String>,
    list: Option<String>,
    str: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_project_toml(dir.path().join("project.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.protocol.node, "NODE");
    }

    #[test]
    fn test_partial_override() {
        let file = write_temp(
            r#"
[limits]
max_expr_depth = 64

[protocol]
node = "nb_node"
"#,
        );

        let config = Config::from_project_toml(file.path()).unwrap();
        assert_eq!(config.limits.max_expr_depth, 64); // Overridden
        assert_eq!(config.limits.max_input_size, 1_000_000); // Default
        assert_eq!(config.protocol.node, "nb_node"); // Overridden
        assert_eq!(config.protocol.list, "LIST"); // Default
    }

    #[test]
    fn test_malformed_toml_returns_error() {
        let file = write_temp("this is not valid toml {{{");
        assert!(Config::from_project_toml(file.path()).is_err());
    }

    #[test]
    fn test_invalid_limit_is_rejected() {
        let err = Config::from_toml_str("[limits]\nmax_expr_depth = 0\n").unwrap_err();
        assert!(err.message.contains("max_expr_depth"));
    }

    #[test]
    fn test_unknown_limit_key_is_rejected() {
        assert!(Config::from_toml_str("[limits]\nmax_token_count = 5\n").is_err());
    }

    #[test]
    fn test_invalid_protocol_name_is_rejected() {
        let err = Config::from_toml_str("[protocol]\nlist = \"not an ident\"\n").unwrap_err();
        assert!(err.message.contains("'not an ident'"));
        assert!(err.message.contains("'list'"));
    }

    #[test]
    fn test_errors_are_reported_as_configuration_errors() {
        let protocol = Config::from_toml_str("[protocol]\nnode = \"NODE()\"\n").unwrap_err();
        assert!(protocol.to_string().starts_with("Configuration error: "), "{}", protocol);

        let limit = Config::from_toml_str("[limits]\nmax_ast_nodes = 0\n").unwrap_err();
        assert!(limit.to_string().starts_with("Configuration error: "), "{}", limit);
    }
}
