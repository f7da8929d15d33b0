//! Syntax fragments: the unit a single translation step produces.
//!
//! A fragment's category is part of its identity. Categories nest the way
//! the target grammar does: a return statement and a block are both
//! statements, so a fragment of either category is accepted wherever a
//! plain statement is required.

use std::fmt;

use serde::Serialize;

use crate::node::{BlockSyntax, ExprSyntax, MethodDeclaration, StmtSyntax};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SyntaxCategory {
    Expression,
    Statement,
    ReturnStatement,
    Block,
    Declaration,
}

impl fmt::Display for SyntaxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyntaxCategory::Expression => "expression",
            SyntaxCategory::Statement => "statement",
            SyntaxCategory::ReturnStatement => "return statement",
            SyntaxCategory::Block => "block",
            SyntaxCategory::Declaration => "declaration",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SyntaxFragment {
    Expression(ExprSyntax),
    Statement(StmtSyntax),
    Block(BlockSyntax),
    Declaration(MethodDeclaration),
}

impl SyntaxFragment {
    /// The most specific category of this fragment.
    pub fn category(&self) -> SyntaxCategory {
        match self {
            SyntaxFragment::Expression(_) => SyntaxCategory::Expression,
            SyntaxFragment::Statement(StmtSyntax::Return(_)) => SyntaxCategory::ReturnStatement,
            SyntaxFragment::Statement(StmtSyntax::Block(_)) | SyntaxFragment::Block(_) => {
                SyntaxCategory::Block
            }
            SyntaxFragment::Statement(_) => SyntaxCategory::Statement,
            SyntaxFragment::Declaration(_) => SyntaxCategory::Declaration,
        }
    }

    /// Whether the fragment can stand where `target` is required as is.
    pub fn is(&self, target: SyntaxCategory) -> bool {
        let own = self.category();
        own == target
            || (target == SyntaxCategory::Statement
                && matches!(own, SyntaxCategory::ReturnStatement | SyntaxCategory::Block))
    }

    pub fn into_expression(self) -> Option<ExprSyntax> {
        match self {
            SyntaxFragment::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    /// The fragment as a statement; blocks become block statements.
    pub fn into_statement(self) -> Option<StmtSyntax> {
        match self {
            SyntaxFragment::Statement(stmt) => Some(stmt),
            SyntaxFragment::Block(block) => Some(StmtSyntax::Block(block)),
            _ => None,
        }
    }

    pub fn into_block(self) -> Option<BlockSyntax> {
        match self {
            SyntaxFragment::Block(block) | SyntaxFragment::Statement(StmtSyntax::Block(block)) => {
                Some(block)
            }
            _ => None,
        }
    }

    pub fn into_declaration(self) -> Option<MethodDeclaration> {
        match self {
            SyntaxFragment::Declaration(method) => Some(method),
            _ => None,
        }
    }
}

impl From<ExprSyntax> for SyntaxFragment {
    fn from(expr: ExprSyntax) -> Self {
        SyntaxFragment::Expression(expr)
    }
}

impl From<StmtSyntax> for SyntaxFragment {
    fn from(stmt: StmtSyntax) -> Self {
        match stmt {
            StmtSyntax::Block(block) => SyntaxFragment::Block(block),
            other => SyntaxFragment::Statement(other),
        }
    }
}

impl From<BlockSyntax> for SyntaxFragment {
    fn from(block: BlockSyntax) -> Self {
        SyntaxFragment::Block(block)
    }
}

impl From<MethodDeclaration> for SyntaxFragment {
    fn from(method: MethodDeclaration) -> Self {
        SyntaxFragment::Declaration(method)
    }
}
