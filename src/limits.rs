// Parser safety limits
//
// Bounds applied while parsing callback source:
// - Input size, checked before scanning starts
// - Expression nesting depth, checked on every recursive rule
// - Number of AST nodes built for one callback
//
// Defaults are permissive; project.toml can override them (see config.rs)

use serde::Deserialize;

use crate::config::ConfigError;

/// Parser safety limits with permissive defaults
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerLimits {
    pub max_input_size: usize, // Maximum source size in bytes
    pub max_expr_depth: usize, // Maximum expression recursion depth
    pub max_ast_nodes: usize,  // Maximum AST nodes per callback
}

impl Default for CompilerLimits {
    fn default() -> Self {
        Self {
            max_input_size: 1_000_000, // 1 MB
            max_expr_depth: 256,
            max_ast_nodes: 100_000,
        }
    }
}

impl CompilerLimits {
    /// Overlay the values present in a `[limits]` table onto these limits
    pub(crate) fn merge(&mut self, overrides: &LimitsConfig) {
        if let Some(v) = overrides.max_input_size {
            self.max_input_size = v;
        }
        if let Some(v) = overrides.max_expr_depth {
            self.max_expr_depth = v;
        }
        if let Some(v) = overrides.max_ast_nodes {
            self.max_ast_nodes = v;
        }
    }

    /// Validate that all limits are reasonable (positive, not absurdly large)
    pub fn validate(&self) -> Result<(), ConfigError> {
        const MAX_REASONABLE: usize = 100_000_000; // 100 MB

        if self.max_input_size == 0 || self.max_input_size > MAX_REASONABLE {
            return Err(invalid("max_input_size", self.max_input_size));
        }

        if self.max_expr_depth == 0 || self.max_expr_depth > 10_000 {
            return Err(invalid("max_expr_depth", self.max_expr_depth));
        }

        if self.max_ast_nodes == 0 || self.max_ast_nodes > 10_000_000 {
            return Err(invalid("max_ast_nodes", self.max_ast_nodes));
        }

        Ok(())
    }
}

/// `[limits]` table of project.toml
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LimitsConfig {
    pub max_input_size: Option<usize>,
    pub max_expr_depth: Option<usize>,
    pub max_ast_nodes: Option<usize>,
}

fn invalid(name: &str, value: usize) -> ConfigError {
    ConfigError::new(format!(
        "Invalid limit '{}': {} (must be positive and reasonable)",
        name, value
    ))
}
