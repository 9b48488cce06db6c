use once_cell::sync::Lazy;
use regex::Regex;

use super::helpers::Step;
use super::{ParseError, Parser};
use crate::ast::Node;
use crate::scanner::{EOL, SPACES, anchored};
use crate::token::{Token, TokenKind};

static TYPE_NAME: Lazy<Regex> = Lazy::new(|| anchored(r"[A-Z][0-9A-Za-z_]*"));
static LIST_BEGIN: Lazy<Regex> = Lazy::new(|| anchored(r"\[ *"));
static LIST_END: Lazy<Regex> = Lazy::new(|| anchored(r" *\]"));
static SPLAT: Lazy<Regex> = Lazy::new(|| anchored(r"\*"));

impl<'a> Parser<'a> {
    /// CreateNode: Type '[' Entries ']'
    pub(super) fn parse_create_node(&mut self, depth: usize) -> Result<Option<Node>, ParseError> {
        let Some(ty) = self.scanner.scan(&TYPE_NAME) else {
            return Ok(None);
        };

        if !self.scanner.skip(&LIST_BEGIN) {
            return Err(self.syntax_error(format!("expected '[' after node type {}", ty)));
        }
        let elems = self.parse_entries(depth)?;
        if !self.scanner.skip(&LIST_END) {
            return Err(self.syntax_error(format!("expected ']' to close {}[", ty)));
        }

        self.new_node(Node::CreateNode {
            ty: Token::new(TokenKind::TypeName, ty),
            elems,
        })
        .map(Some)
    }

    /// CreateList: '[' Entries ']'
    pub(super) fn parse_create_list(&mut self, depth: usize) -> Result<Option<Node>, ParseError> {
        if !self.scanner.skip(&LIST_BEGIN) {
            return Ok(None);
        }

        let elems = self.parse_entries(depth)?;
        if !self.scanner.skip(&LIST_END) {
            return Err(self.syntax_error("expected ']' to close list"));
        }

        self.new_node(Node::CreateList { elems }).map(Some)
    }

    /// Entries: (Expr | '*' Expr | EOL)*
    /// Newlines and commas only separate entries
    pub(super) fn parse_entries(&mut self, depth: usize) -> Result<Vec<Node>, ParseError> {
        self.fixed_point("entry", |p| {
            if let Some(expr) = p.parse_expr(depth + 1)? {
                Ok(Step::Item(expr))
            } else if p.scanner.skip(&SPLAT) {
                p.scanner.skip(&SPACES);
                let expr = p.expect_expr(depth + 1)?;
                let splat = p.new_node(Node::SplatEntry {
                    expr: Box::new(expr),
                })?;
                Ok(Step::Item(splat))
            } else if p.scanner.skip(&EOL) {
                Ok(Step::Skip)
            } else {
                Ok(Step::Stop)
            }
        })
    }
}
