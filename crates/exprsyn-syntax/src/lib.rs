//! Target-language syntax trees.
//!
//! The translator in `exprsyn-codegen` produces the types in this crate; the
//! [`render`] module turns them into canonical source text. Nothing here
//! depends on the input expression model.

pub mod fragment;
pub mod kind;
pub mod node;
pub mod render;
pub mod unit;

pub use fragment::{SyntaxCategory, SyntaxFragment};
pub use kind::{
    AssignmentOperator, BinaryOperator, Fixity, Modifier, PredefinedType, UnaryOperator,
};
pub use node::{
    BlockSyntax, ExprSyntax, ForStatement, LambdaBody, LiteralSyntax, LocalDeclaration,
    MethodDeclaration, NameSyntax, ParameterSyntax, StmtSyntax, TypeSyntax,
};
pub use render::{render_class, render_fragment, render_unit, RenderConfig};
pub use unit::{ClassDeclaration, CompilationUnit, UsingDirective};
