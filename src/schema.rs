use std::collections::HashMap;

use thiserror::Error;

/// Arity check consulted before a node is emitted
pub trait SchemaOracle {
    /// Fail unless `variant` is declared with exactly `live_arity` fields
    fn validate(&self, variant: &str, live_arity: usize) -> Result<(), SchemaError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Schema mismatch for {variant}: declared {expected} field(s), node has {actual}")]
    Mismatch {
        variant: String,
        expected: usize,
        actual: usize,
    },

    #[error("No schema registered for {variant}")]
    Unregistered { variant: String },
}

/// Declared field lists keyed by node variant name
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    klasses: HashMap<String, Vec<String>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry declaring every node variant the parser can produce
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("Callback", ["stmts"]);
        registry.register("VarDecl", ["var_name"]);
        registry.register("Assign", ["var_name", "expr"]);
        registry.register("GlobalAssign", ["var_name", "expr"]);
        registry.register("Call", ["func_name", "argv"]);
        registry.register("SplatEntry", ["expr"]);
        registry.register("Lit", ["lit"]);
        registry.register("CreateNode", ["ty", "elems"]);
        registry.register("CreateList", ["elems"]);
        registry.register("Capture", ["var_name"]);
        registry.register("VarRef", ["var_name"]);
        registry.register("GlobalVarRef", ["var_name"]);
        registry
    }

    /// Declare (or redeclare) the ordered field names of `variant`
    pub fn register<I, S>(&mut self, variant: &str, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields.into_iter().map(Into::into).collect();
        self.klasses.insert(variant.to_string(), fields);
        self
    }

    pub fn fields(&self, variant: &str) -> Option<&[String]> {
        self.klasses.get(variant).map(Vec::as_slice)
    }
}

impl SchemaOracle for SchemaRegistry {
    fn validate(&self, variant: &str, live_arity: usize) -> Result<(), SchemaError> {
        let fields = self.fields(variant).ok_or_else(|| SchemaError::Unregistered {
            variant: variant.to_string(),
        })?;

        if fields.len() != live_arity {
            return Err(SchemaError::Mismatch {
                variant: variant.to_string(),
                expected: fields.len(),
                actual: live_arity,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeType;

    #[test]
    fn test_builtin_covers_every_node_type() {
        let registry = SchemaRegistry::builtin();
        for node_type in NodeType::ALL {
            assert!(registry.fields(node_type.name()).is_some(), "{}", node_type);
        }
    }

    #[test]
    fn test_validate_matching_arity() {
        let registry = SchemaRegistry::builtin();
        assert!(registry.validate("Call", 2).is_ok());
        assert!(registry.validate("VarRef", 1).is_ok());
    }

    #[test]
    fn test_validate_mismatch() {
        let mut registry = SchemaRegistry::new();
        registry.register("Call", ["func_name"]);

        assert_eq!(
            registry.validate("Call", 2),
            Err(SchemaError::Mismatch {
                variant: "Call".to_string(),
                expected: 1,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_validate_unregistered() {
        let registry = SchemaRegistry::new();
        let err = registry.validate("Capture", 1).unwrap_err();
        assert_eq!(err.to_string(), "No schema registered for Capture");
    }

    #[test]
    fn test_register_replaces_declaration() {
        let mut registry = SchemaRegistry::new();
        registry.register("VarRef", ["a", "b"]);
        registry.register("VarRef", ["var_name"]);
        assert_eq!(registry.fields("VarRef"), Some(&["var_name".to_string()][..]));
    }
}
