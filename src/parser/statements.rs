use once_cell::sync::Lazy;
use regex::Regex;

use super::helpers::Step;
use super::{ParseError, Parser};
use crate::ast::Node;
use crate::scanner::{EOL, SPACES, anchored};
use crate::token::{Token, TokenKind};

static KW_VAR: Lazy<Regex> = Lazy::new(|| anchored(r"var\b"));
pub(super) static VAR_NAME: Lazy<Regex> = Lazy::new(|| anchored(r"[a-z][0-9A-Za-z_]*"));

// Statement-level parsing methods
impl<'a> Parser<'a> {
    /// Parse statements until none matches; separators produce no node
    pub(super) fn parse_stmts(&mut self, depth: usize) -> Result<Vec<Node>, ParseError> {
        self.fixed_point("statement", |p| match p.parse_stmt(depth + 1)? {
            Some(Stmt::Eol) => Ok(Step::Skip),
            Some(Stmt::Node(node)) => Ok(Step::Item(node)),
            None => Ok(Step::Stop),
        })
    }

    /// Parse a single statement: EOL / 'var' name / Expr
    pub(super) fn parse_stmt(&mut self, depth: usize) -> Result<Option<Stmt>, ParseError> {
        self.check_depth(depth)?;
        self.scanner.skip(&SPACES);

        if self.scanner.skip(&EOL) {
            return Ok(Some(Stmt::Eol));
        }

        if self.scanner.skip(&KW_VAR) {
            self.scanner.skip(&SPACES);
            let Some(var_name) = self.scanner.scan(&VAR_NAME) else {
                return Err(self.syntax_error("expected variable name after 'var'"));
            };
            let decl = self.new_node(Node::VarDecl {
                var_name: Token::new(TokenKind::VarName, var_name),
            })?;
            return Ok(Some(Stmt::Node(decl)));
        }

        Ok(self.parse_expr(depth)?.map(Stmt::Node))
    }

    /// Parse expressions separated by EOL (no 'var' declarations)
    pub(super) fn parse_line_exprs(&mut self, depth: usize) -> Result<Vec<Node>, ParseError> {
        self.lines_of(depth, Self::parse_expr)
    }

    // EOL-separated repetition of `line`; shares the statement loop's guard
    fn lines_of<F>(&mut self, depth: usize, mut line: F) -> Result<Vec<Node>, ParseError>
    where
        F: FnMut(&mut Self, usize) -> Result<Option<Node>, ParseError>,
    {
        self.fixed_point("line", |p| {
            if let Some(expr) = line(p, depth + 1)? {
                Ok(Step::Item(expr))
            } else if p.scanner.skip(&EOL) {
                Ok(Step::Skip)
            } else {
                Ok(Step::Stop)
            }
        })
    }
}

/// A recognized statement; separators are dropped by `parse_stmts`
#[derive(Debug)]
pub(super) enum Stmt {
    Eol,
    Node(Node),
}

#[cfg(test)]
mod tests {
    use super::super::*;
    use rstest::rstest;

    fn to_ast(source: &str) -> Result<ParseOutput, ParseError> {
        parse(source, &CompilerLimits::default())
    }

    fn to_ast_string(source: &str) -> Result<String, ParseError> {
        Ok(to_ast(source)?.root.to_string())
    }

    #[rstest]
    #[case("a\n b", 2)]
    #[case("a ,b", 2)]
    #[case(":return, :token \"end.lex\"", 2)]
    #[case(":style (:concat 1 z) $1", 1)]
    #[case("a,,\n\n,b", 2)]
    #[case(",\n,", 0)]
    #[case("var x, x = 1\n:push x", 3)]
    fn test_statement_count(#[case] source: &str, #[case] expected: usize) {
        let output = to_ast(source).unwrap();
        assert_eq!(output.root.stmts().len(), expected, "source: {:?}", source);
    }

    #[test]
    fn test_var_decl() {
        let ast = to_ast_string("var x").unwrap();
        let expected = "\
Callback
  VarDecl 'x'
";
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_var_requires_lowercase_name() {
        let err = to_ast("var X").unwrap_err();
        assert!(err.is_syntax());
        assert!(err.message.contains("variable name"));
    }

    #[test]
    fn test_var_prefix_is_not_keyword() {
        let ast = to_ast_string("variable").unwrap();
        let expected = "\
Callback
  VarRef 'variable'
";
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_multiline_block() {
        let source = "
            :style (:concat 1 z) $1
            :String
            :return, :token true $1
        ";
        let ast = to_ast_string(source).unwrap();
        let expected = "\
Callback
  Call ':style'
    Call ':concat'
      Lit 'VAL_FROM_INT(1)'
      VarRef 'z'
    Capture '$1'
  Call ':String'
  Call ':return'
  Call ':token'
    Lit 'VAL_TRUE'
    Capture '$1'
";
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let err = to_ast(":token $1 )").unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_line_loop_rejects_non_advancing_expression() {
        let mut p = Parser::new("x", &CompilerLimits::default()).unwrap();
        let err = p
            .lines_of(0, |_, _| Ok(Some(Node::Lit { lit: "VAL_NIL".into() })))
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::GrammarInvariant);
        assert_eq!(err.message, "line matched without advancing");
        assert_eq!(err.pos, 0);
    }

    #[test]
    fn test_line_exprs_skip_separators() {
        let mut p = Parser::new("1,\n 2 ,, $1", &CompilerLimits::default()).unwrap();
        let lines = p.parse_line_exprs(0).unwrap();
        assert_eq!(lines.len(), 3);
        assert!(p.scanner.is_eos());
    }

    #[test]
    fn test_unrecognized_statement_start() {
        let err = to_ast("a\n}").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!((err.line, err.column), (2, 1));
    }
}
