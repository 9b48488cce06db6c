// Parser module - splits parser into logical components
mod error;
mod expressions;
mod helpers;
mod list;
mod statements;

// Public exports
pub use error::{ParseError, ParseErrorKind};

use crate::ast::Node;
use crate::call_sites::CallSites;
use crate::limits::CompilerLimits;
use crate::scanner::Scanner;

/// A parsed callback together with the call sites seen while parsing it
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    pub root: Node, // Always Node::Callback
    pub call_sites: CallSites,
}

// Parser structure
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    limits: CompilerLimits,
    call_sites: CallSites,
    node_count: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, limits: &CompilerLimits) -> Result<Self, ParseError> {
        if source.len() > limits.max_input_size {
            return Err(ParseError::at_cursor(
                ParseErrorKind::InputTooLarge,
                format!(
                    "Input too large: {} bytes (max: {} bytes)",
                    source.len(),
                    limits.max_input_size
                ),
                &Scanner::new(source),
            ));
        }

        Ok(Self {
            scanner: Scanner::new(source.trim()),
            limits: limits.clone(),
            call_sites: CallSites::new(),
            node_count: 0,
        })
    }

    // Main parsing entry point
    pub fn parse(mut self) -> Result<ParseOutput, ParseError> {
        let stmts = self.parse_stmts(0)?;
        self.expect_eos()?;

        let root = self.new_node(Node::Callback { stmts })?;
        tracing::debug!(
            stmts = root.stmts().len(),
            nodes = self.node_count,
            call_sites = self.call_sites.len(),
            "parsed callback"
        );

        Ok(ParseOutput {
            root,
            call_sites: self.call_sites,
        })
    }

    /// Alternate entry point: expressions separated by newline or comma,
    /// without `var` declarations
    pub fn parse_lines(mut self) -> Result<(Vec<Node>, CallSites), ParseError> {
        let lines = self.parse_line_exprs(0)?;
        self.expect_eos()?;
        tracing::debug!(lines = lines.len(), "parsed lines");
        Ok((lines, self.call_sites))
    }
}

// Public API functions
pub fn parse(source: &str, limits: &CompilerLimits) -> Result<ParseOutput, ParseError> {
    Parser::new(source, limits)?.parse()
}

pub fn parse_lines(
    source: &str,
    limits: &CompilerLimits,
) -> Result<(Vec<Node>, CallSites), ParseError> {
    Parser::new(source, limits)?.parse_lines()
}
