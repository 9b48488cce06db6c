use std::fmt;

use crate::token::Token;

// Callback AST. Every node owns its children; the tree is built once by the
// parser and only read afterwards.

/// Node variants, used as schema names when emitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Callback,     // Root: ordered statements
    VarDecl,      // var x
    Assign,       // x = expr
    GlobalAssign, // $x = expr
    Call,         // :func arg*
    SplatEntry,   // *expr inside an entry list
    Lit,          // Pre-rendered immediate value (terminal)
    CreateNode,   // Type[entries]
    CreateList,   // [entries]
    Capture,      // $1 (terminal)
    VarRef,       // x (terminal)
    GlobalVarRef, // $x (terminal)
}

impl NodeType {
    pub const ALL: [NodeType; 12] = [
        NodeType::Callback,
        NodeType::VarDecl,
        NodeType::Assign,
        NodeType::GlobalAssign,
        NodeType::Call,
        NodeType::SplatEntry,
        NodeType::Lit,
        NodeType::CreateNode,
        NodeType::CreateList,
        NodeType::Capture,
        NodeType::VarRef,
        NodeType::GlobalVarRef,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NodeType::Callback => "Callback",
            NodeType::VarDecl => "VarDecl",
            NodeType::Assign => "Assign",
            NodeType::GlobalAssign => "GlobalAssign",
            NodeType::Call => "Call",
            NodeType::SplatEntry => "SplatEntry",
            NodeType::Lit => "Lit",
            NodeType::CreateNode => "CreateNode",
            NodeType::CreateList => "CreateList",
            NodeType::Capture => "Capture",
            NodeType::VarRef => "VarRef",
            NodeType::GlobalVarRef => "GlobalVarRef",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Callback { stmts: Vec<Node> },
    VarDecl { var_name: Token },
    Assign { var_name: Token, expr: Box<Node> },
    GlobalAssign { var_name: Token, expr: Box<Node> },
    Call { func_name: Token, argv: Vec<Node> },
    SplatEntry { expr: Box<Node> },
    Lit { lit: String },
    CreateNode { ty: Token, elems: Vec<Node> },
    CreateList { elems: Vec<Node> },
    Capture { var_name: Token },
    VarRef { var_name: Token },
    GlobalVarRef { var_name: Token },
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Callback { .. } => NodeType::Callback,
            Node::VarDecl { .. } => NodeType::VarDecl,
            Node::Assign { .. } => NodeType::Assign,
            Node::GlobalAssign { .. } => NodeType::GlobalAssign,
            Node::Call { .. } => NodeType::Call,
            Node::SplatEntry { .. } => NodeType::SplatEntry,
            Node::Lit { .. } => NodeType::Lit,
            Node::CreateNode { .. } => NodeType::CreateNode,
            Node::CreateList { .. } => NodeType::CreateList,
            Node::Capture { .. } => NodeType::Capture,
            Node::VarRef { .. } => NodeType::VarRef,
            Node::GlobalVarRef { .. } => NodeType::GlobalVarRef,
        }
    }

    /// Number of fields this node carries; sequences count as one field
    pub fn field_count(&self) -> usize {
        match self {
            Node::Assign { .. }
            | Node::GlobalAssign { .. }
            | Node::Call { .. }
            | Node::CreateNode { .. } => 2,
            _ => 1,
        }
    }

    /// Statements of a Callback root, empty for every other node
    pub fn stmts(&self) -> &[Node] {
        match self {
            Node::Callback { stmts } => stmts.as_slice(),
            _ => &[],
        }
    }

    // Leaf text shown next to the node name in the tree dump
    fn label(&self) -> Option<&str> {
        match self {
            Node::VarDecl { var_name }
            | Node::Assign { var_name, .. }
            | Node::GlobalAssign { var_name, .. }
            | Node::Capture { var_name }
            | Node::VarRef { var_name }
            | Node::GlobalVarRef { var_name } => Some(var_name.text()),
            Node::Call { func_name, .. } => Some(func_name.text()),
            Node::CreateNode { ty, .. } => Some(ty.text()),
            Node::Lit { lit } => Some(lit.as_str()),
            Node::Callback { .. } | Node::SplatEntry { .. } | Node::CreateList { .. } => None,
        }
    }

    fn children(&self) -> &[Node] {
        match self {
            Node::Callback { stmts } => stmts.as_slice(),
            Node::Call { argv, .. } => argv.as_slice(),
            Node::CreateNode { elems, .. } | Node::CreateList { elems } => elems.as_slice(),
            Node::Assign { expr, .. }
            | Node::GlobalAssign { expr, .. }
            | Node::SplatEntry { expr } => std::slice::from_ref(expr.as_ref()),
            _ => &[],
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.node_type(), indent = depth * 2)?;
        if let Some(label) = self.label() {
            write!(f, " '{}'", label)?;
        }
        writeln!(f)?;
        for child in self.children() {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Indented tree dump, one node per line
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_field_counts_follow_variant_shape() {
        let call = Node::Call {
            func_name: Token::new(TokenKind::FuncName, ":f"),
            argv: vec![],
        };
        assert_eq!(call.field_count(), 2);

        let list = Node::CreateList {
            elems: vec![Node::Lit { lit: "VAL_NIL".into() }; 3],
        };
        assert_eq!(list.field_count(), 1);
    }

    #[test]
    fn test_node_type_names_are_unique() {
        let mut names: Vec<_> = NodeType::ALL.iter().map(|t| t.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), NodeType::ALL.len());
    }

    #[test]
    fn test_tree_dump() {
        let root = Node::Callback {
            stmts: vec![Node::Assign {
                var_name: Token::new(TokenKind::VarName, "x"),
                expr: Box::new(Node::CreateList {
                    elems: vec![Node::SplatEntry {
                        expr: Box::new(Node::Capture {
                            var_name: Token::new(TokenKind::Capture, "$2"),
                        }),
                    }],
                }),
            }],
        };
        let expected = "\
Callback
  Assign 'x'
    CreateList
      SplatEntry
        Capture '$2'
";
        assert_eq!(root.to_string(), expected);
    }
}
