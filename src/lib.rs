//! Parser and code generator for the callback DSL.
//!
//! A callback describes how a grammar rule turns matched tokens into an AST
//! node, e.g. `:token true $1` or `Binary[$2, $1, $3]`. [`parse`] builds the
//! syntax tree; [`codegen::Emitter`] renders it as nested `NODE(...)`
//! construction calls for splicing into generated source.

pub mod ast;
pub mod call_sites;
pub mod codegen;
pub mod config;
pub mod error;
pub mod limits;
pub mod parser;
pub mod schema;
pub mod scanner;
pub mod token;

pub use ast::{Node, NodeType};
pub use call_sites::{CallSite, CallSites};
pub use codegen::{Emitter, Protocol};
pub use config::{Config, ConfigError};
pub use error::{Error, Result};
pub use limits::CompilerLimits;
pub use parser::{ParseError, ParseErrorKind, ParseOutput, parse, parse_lines};
pub use schema::{SchemaError, SchemaOracle, SchemaRegistry};
pub use token::{Token, TokenKind};

/// Emitted code for one callback plus the calls it makes
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    pub code: String,
    pub call_sites: CallSites,
}

/// Parse `source` and emit it; the first error aborts with nothing emitted
pub fn compile(source: &str, config: &Config, schema: &dyn SchemaOracle) -> Result<Compiled> {
    let ParseOutput { root, call_sites } = parse(source, &config.limits)?;
    let code = Emitter::new(schema, &config.protocol).emit(&root)?;
    tracing::debug!(bytes = code.len(), "emitted callback");
    Ok(Compiled { code, call_sites })
}
