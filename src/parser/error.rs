use std::fmt;

use thiserror::Error;

use crate::scanner::Scanner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    Syntax,           // Input does not match the grammar here
    GrammarInvariant, // A loop step matched without consuming input
    TooDeep,          // max_expr_depth exceeded
    TooManyNodes,     // max_ast_nodes exceeded
    InputTooLarge,    // max_input_size exceeded
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            ParseErrorKind::Syntax => "Syntax error",
            ParseErrorKind::GrammarInvariant => "Grammar invariant violated",
            ParseErrorKind::TooDeep => "Nesting too deep",
            ParseErrorKind::TooManyNodes => "Too many nodes",
            ParseErrorKind::InputTooLarge => "Input too large",
        };
        f.write_str(text)
    }
}

// Parse error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {line}:{column}: {message} (near {near})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub pos: usize,    // Byte offset into the trimmed source
    pub line: usize,   // 1-indexed
    pub column: usize, // 1-indexed
    pub near: String,  // Source excerpt around pos
}

impl ParseError {
    pub(super) fn at_cursor(kind: ParseErrorKind, message: String, scanner: &Scanner) -> Self {
        let (line, column) = scanner.line_column();
        Self {
            kind,
            message,
            pos: scanner.pos(),
            line,
            column,
            near: scanner.near(),
        }
    }

    pub fn is_syntax(&self) -> bool {
        self.kind == ParseErrorKind::Syntax
    }
}
