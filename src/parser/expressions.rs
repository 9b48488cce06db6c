use once_cell::sync::Lazy;
use regex::Regex;

use super::helpers::Step;
use super::statements::VAR_NAME;
use super::{ParseError, Parser};
use crate::ast::Node;
use crate::scanner::{SPACES, anchored};
use crate::token::{Token, TokenKind};

// Zero-width dispatch for the assignment forms
static ASSIGN_AHEAD: Lazy<Regex> = Lazy::new(|| anchored(r"[0-9A-Za-z_]+ *="));
static GLOBAL_ASSIGN_AHEAD: Lazy<Regex> = Lazy::new(|| anchored(r"\$[a-z][0-9A-Za-z_]* *="));
static ASSIGN_OP: Lazy<Regex> = Lazy::new(|| anchored(r" *= *"));

static LPAREN: Lazy<Regex> = Lazy::new(|| anchored(r"\("));
static RPAREN: Lazy<Regex> = Lazy::new(|| anchored(r"\)"));

static LIT_INT: Lazy<Regex> = Lazy::new(|| anchored(r"-?[0-9]+"));
static LIT_TRUE: Lazy<Regex> = Lazy::new(|| anchored(r"true\b"));
static LIT_FALSE: Lazy<Regex> = Lazy::new(|| anchored(r"false\b"));
static LIT_NIL: Lazy<Regex> = Lazy::new(|| anchored(r"nil\b"));
static LIT_STR: Lazy<Regex> = Lazy::new(|| anchored(r#""[^"]*""#));

static CAPTURE: Lazy<Regex> = Lazy::new(|| anchored(r"\$-?[0-9]+"));
static GLOBAL_VAR_NAME: Lazy<Regex> = Lazy::new(|| anchored(r"\$[a-z][0-9A-Za-z_]*"));

static FUNC_NAME: Lazy<Regex> = Lazy::new(|| anchored(r":[0-9A-Za-z_+\-*/^&|<>=!%@]+"));
// Call arguments end before any of these, which are left unconsumed
static ARGS_END: Lazy<Regex> = Lazy::new(|| anchored(r"\)|\]|\n|,|\z"));

// Expression parsing methods
impl<'a> Parser<'a> {
    /// Parse an expression by ordered choice; None when nothing matches here
    ///
    /// The assignment lookahead runs first: a bare name is also a valid
    /// VarRef and would shadow the assignment otherwise.
    pub(super) fn parse_expr(&mut self, depth: usize) -> Result<Option<Node>, ParseError> {
        self.check_depth(depth)?;

        if self.scanner.check(&ASSIGN_AHEAD) {
            return self.parse_assign(depth).map(Some);
        }
        if self.scanner.check(&GLOBAL_ASSIGN_AHEAD) {
            return self.parse_global_assign(depth).map(Some);
        }

        if let Some(expr) = self.parse_paren(depth)? {
            return Ok(Some(expr));
        }
        if let Some(lit) = self.parse_lit()? {
            return Ok(Some(lit));
        }
        if let Some(capture) = self.parse_capture()? {
            return Ok(Some(capture));
        }
        if let Some(var_ref) = self.parse_var_ref()? {
            return Ok(Some(var_ref));
        }
        if let Some(global_var_ref) = self.parse_global_var_ref()? {
            return Ok(Some(global_var_ref));
        }
        if let Some(create_node) = self.parse_create_node(depth)? {
            return Ok(Some(create_node));
        }
        if let Some(create_list) = self.parse_create_list(depth)? {
            return Ok(Some(create_list));
        }
        self.parse_call(depth)
    }

    /// Paren: '(' Expr ')'
    fn parse_paren(&mut self, depth: usize) -> Result<Option<Node>, ParseError> {
        if !self.scanner.skip(&LPAREN) {
            return Ok(None);
        }

        self.scanner.skip(&SPACES);
        let expr = self.expect_expr(depth + 1)?;
        self.scanner.skip(&SPACES);

        if !self.scanner.skip(&RPAREN) {
            return Err(self.syntax_error("missing right paren"));
        }
        Ok(Some(expr))
    }

    /// Lit: int / true / false / nil / string, rendered once here
    fn parse_lit(&mut self) -> Result<Option<Node>, ParseError> {
        let lit = if let Some(int) = self.scanner.scan(&LIT_INT) {
            format!("VAL_FROM_INT({})", int)
        } else if self.scanner.skip(&LIT_TRUE) {
            "VAL_TRUE".to_string()
        } else if self.scanner.skip(&LIT_FALSE) {
            "VAL_FALSE".to_string()
        } else if self.scanner.skip(&LIT_NIL) {
            "VAL_NIL".to_string()
        } else if let Some(string) = self.scanner.scan(&LIT_STR) {
            format!("STR({})", string)
        } else {
            return Ok(None);
        };

        self.new_node(Node::Lit { lit }).map(Some)
    }

    /// Assign: name '=' Expr. Only reached after the lookahead matched,
    /// so a missing lowercase name is an error rather than a fallback
    fn parse_assign(&mut self, depth: usize) -> Result<Node, ParseError> {
        let Some(var_name) = self.scanner.scan(&VAR_NAME) else {
            return Err(self.syntax_error("expected lowercase variable name before '='"));
        };
        self.scanner.skip(&ASSIGN_OP);
        let expr = self.expect_expr(depth + 1)?;

        self.new_node(Node::Assign {
            var_name: Token::new(TokenKind::VarName, var_name),
            expr: Box::new(expr),
        })
    }

    /// GlobalAssign: $name '=' Expr
    fn parse_global_assign(&mut self, depth: usize) -> Result<Node, ParseError> {
        let Some(var_name) = self.scanner.scan(&GLOBAL_VAR_NAME) else {
            return Err(self.syntax_error("expected global variable name before '='"));
        };
        self.scanner.skip(&ASSIGN_OP);
        let expr = self.expect_expr(depth + 1)?;

        self.new_node(Node::GlobalAssign {
            var_name: Token::new(TokenKind::GlobalVarName, var_name),
            expr: Box::new(expr),
        })
    }

    fn parse_capture(&mut self) -> Result<Option<Node>, ParseError> {
        let Some(capture) = self.scanner.scan(&CAPTURE) else {
            return Ok(None);
        };
        self.new_node(Node::Capture {
            var_name: Token::new(TokenKind::Capture, capture),
        })
        .map(Some)
    }

    fn parse_var_ref(&mut self) -> Result<Option<Node>, ParseError> {
        let Some(var_name) = self.scanner.scan(&VAR_NAME) else {
            return Ok(None);
        };
        self.new_node(Node::VarRef {
            var_name: Token::new(TokenKind::VarName, var_name),
        })
        .map(Some)
    }

    fn parse_global_var_ref(&mut self) -> Result<Option<Node>, ParseError> {
        let Some(var_name) = self.scanner.scan(&GLOBAL_VAR_NAME) else {
            return Ok(None);
        };
        self.new_node(Node::GlobalVarRef {
            var_name: Token::new(TokenKind::GlobalVarName, var_name),
        })
        .map(Some)
    }

    /// Call: :func Expr*
    ///
    /// There is no closing token; arguments run until a lookahead on
    /// `)`, `]`, newline, comma or end of input.
    fn parse_call(&mut self, depth: usize) -> Result<Option<Node>, ParseError> {
        let Some(func_name) = self.scanner.scan(&FUNC_NAME) else {
            return Ok(None);
        };

        let argv = self.fixed_point("call argument", |p| {
            if let Some(arg) = p.parse_expr(depth + 1)? {
                Ok(Step::Item(arg))
            } else if p.scanner.check(&ARGS_END) {
                Ok(Step::Stop)
            } else {
                Err(p.syntax_error(format!("failed to recognize arguments of {}", func_name)))
            }
        })?;

        self.call_sites.record(func_name, argv.len());

        self.new_node(Node::Call {
            func_name: Token::new(TokenKind::FuncName, func_name),
            argv,
        })
        .map(Some)
    }
}
