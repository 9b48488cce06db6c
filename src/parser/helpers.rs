use super::error::{ParseError, ParseErrorKind};
use crate::ast::Node;
use crate::scanner::SPACES;

/// Outcome of one iteration of a repetition rule
pub(super) enum Step<T> {
    Item(T), // Produced a value, must have consumed input
    Skip,    // Consumed a separator, produced nothing
    Stop,    // Nothing here; the repetition ends
}

// Parser helper methods
impl<'a> super::Parser<'a> {
    pub(super) fn error(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::at_cursor(kind, message.into(), &self.scanner)
    }

    pub(super) fn syntax_error(&self, message: impl Into<String>) -> ParseError {
        self.error(ParseErrorKind::Syntax, message)
    }

    // Helper: Check recursion depth limit
    pub(super) fn check_depth(&self, depth: usize) -> Result<(), ParseError> {
        if depth >= self.limits.max_expr_depth {
            return Err(self.error(
                ParseErrorKind::TooDeep,
                format!(
                    "Parsing nesting too deep: {} levels (max {}). Consider simplifying.",
                    depth, self.limits.max_expr_depth
                ),
            ));
        }
        Ok(())
    }

    /// Helper: Count a freshly built node against the node limit
    pub(super) fn new_node(&mut self, node: Node) -> Result<Node, ParseError> {
        if self.node_count >= self.limits.max_ast_nodes {
            return Err(self.error(
                ParseErrorKind::TooManyNodes,
                format!(
                    "AST node limit exceeded: {} nodes (max: {})",
                    self.node_count, self.limits.max_ast_nodes
                ),
            ));
        }
        self.node_count += 1;
        Ok(node)
    }

    /// Helper: Parse a mandatory expression
    pub(super) fn expect_expr(&mut self, depth: usize) -> Result<Node, ParseError> {
        match self.parse_expr(depth)? {
            Some(expr) => Ok(expr),
            None => Err(self.syntax_error("expected expression")),
        }
    }

    /// Helper: Fail unless all input has been consumed
    pub(super) fn expect_eos(&self) -> Result<(), ParseError> {
        if !self.scanner.is_eos() {
            return Err(self.syntax_error("unexpected input, expected end of callback"));
        }
        Ok(())
    }

    /// Helper: Run `step` until it stops, collecting produced items
    ///
    /// Spaces are skipped before every iteration. Any iteration that does not
    /// stop must advance the cursor; a step that matches the empty string
    /// would otherwise loop forever.
    pub(super) fn fixed_point<T, F>(
        &mut self,
        rule: &'static str,
        mut step: F,
    ) -> Result<Vec<T>, ParseError>
    where
        F: FnMut(&mut Self) -> Result<Step<T>, ParseError>,
    {
        let mut items = Vec::new();
        loop {
            self.scanner.skip(&SPACES);
            let start = self.scanner.pos();

            let produced = match step(self)? {
                Step::Stop => {
                    self.scanner.set_pos(start);
                    break;
                }
                produced => produced,
            };

            if self.scanner.pos() == start {
                return Err(self.error(
                    ParseErrorKind::GrammarInvariant,
                    format!("{} matched without advancing", rule),
                ));
            }

            if let Step::Item(item) = produced {
                items.push(item);
            }
        }
        Ok(items)
    }
}
