use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Node;
use crate::config::ConfigError;
use crate::schema::{SchemaError, SchemaOracle};
use crate::token::Token;

static MACRO_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A[A-Za-z_][0-9A-Za-z_]*\z").unwrap());

/// Names of the construction macros the emitted text calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol {
    pub node: String, // NODE(Variant, arity, fields...)
    pub list: String, // LIST(n, elems...)
    pub str: String,  // STR("text")
}

impl Default for Protocol {
    fn default() -> Self {
        Self {
            node: "NODE".to_string(),
            list: "LIST".to_string(),
            str: "STR".to_string(),
        }
    }
}

impl Protocol {
    /// Macro names end up in generated source, so they must be identifiers
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, name) in [("node", &self.node), ("list", &self.list), ("str", &self.str)] {
            if !MACRO_NAME.is_match(name) {
                return Err(ConfigError::new(format!(
                    "Invalid protocol name '{}' for '{}' (must be an identifier)",
                    name, key
                )));
            }
        }
        Ok(())
    }
}

// One field of a node, in declaration order
enum Field<'n> {
    Token(&'n Token),
    Node(&'n Node),
    List(&'n [Node]),
}

/// Renders a callback AST as construction-protocol text
pub struct Emitter<'a> {
    schema: &'a dyn SchemaOracle,
    protocol: &'a Protocol,
}

impl<'a> Emitter<'a> {
    pub fn new(schema: &'a dyn SchemaOracle, protocol: &'a Protocol) -> Self {
        Self { schema, protocol }
    }

    pub fn emit(&self, node: &Node) -> Result<String, SchemaError> {
        let fields = match node {
            // Rendered by the parser, never validated
            Node::Lit { lit } => return Ok(lit.clone()),
            Node::Callback { stmts } => vec![Field::List(stmts)],
            Node::VarDecl { var_name }
            | Node::Capture { var_name }
            | Node::VarRef { var_name }
            | Node::GlobalVarRef { var_name } => vec![Field::Token(var_name)],
            Node::Assign { var_name, expr } | Node::GlobalAssign { var_name, expr } => {
                vec![Field::Token(var_name), Field::Node(expr)]
            }
            Node::Call { func_name, argv } => vec![Field::Token(func_name), Field::List(argv)],
            Node::SplatEntry { expr } => vec![Field::Node(expr)],
            Node::CreateNode { ty, elems } => vec![Field::Token(ty), Field::List(elems)],
            Node::CreateList { elems } => vec![Field::List(elems)],
        };

        let variant = node.node_type().name();
        let arity = node.field_count();
        debug_assert_eq!(fields.len(), arity);
        self.schema.validate(variant, arity)?;

        let rendered = fields
            .into_iter()
            .map(|field| match field {
                Field::Token(token) => Ok(self.emit_token(token)),
                Field::Node(child) => self.emit(child),
                Field::List(nodes) => self.emit_list(nodes),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(format!(
            "{}({}, {}, {})",
            self.protocol.node,
            variant,
            arity,
            rendered.join(", ")
        ))
    }

    fn emit_list(&self, nodes: &[Node]) -> Result<String, SchemaError> {
        let items = nodes
            .iter()
            .map(|node| self.emit(node))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(build_list(&self.protocol.list, &items))
    }

    fn emit_token(&self, token: &Token) -> String {
        format!("{}(\"{}\")", self.protocol.str, token.text())
    }
}

/// `LIST(n, a, b, ...)`, or `LIST(0)` for an empty sequence
pub fn build_list(list_macro: &str, items: &[String]) -> String {
    if items.is_empty() {
        format!("{}(0)", list_macro)
    } else {
        format!("{}({}, {})", list_macro, items.len(), items.join(", "))
    }
}
