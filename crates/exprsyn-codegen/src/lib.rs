//! Expression tree to syntax tree translation.
//!
//! The entry point is [`SyntaxVisitor`]: configure it with an optional target
//! class, a [`TypeMapper`] and an [`ExtensionRegistry`], then call
//! [`SyntaxVisitor::translate`] for each tree. [`translate`] and
//! [`translate_into_class`] cover the common one-shot cases.

pub mod closure;
pub mod error;
pub mod extension;
pub mod imports;
pub mod operators;
pub mod peel;
pub mod type_mapper;
pub mod visitor;

pub use closure::{captured_by, free_variables, Captures, ClosureAnalyzer};
pub use error::{TranslateError, TranslateResult};
pub use extension::{ExtensionHandler, ExtensionRegistry};
pub use imports::ImportSet;
pub use peel::coerce;
pub use type_mapper::{DefaultTypeMapper, TypeMapper};
pub use visitor::SyntaxVisitor;

use serde::Serialize;

use exprsyn_syntax::{ClassDeclaration, CompilationUnit, NameSyntax, SyntaxFragment};
use exprsyn_tree::Expr;

/// The result of translating one tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    pub fragment: SyntaxFragment,
    pub imports: ImportSet,
}

/// Translate `expr` with the default mapper and no target class.
pub fn translate(expr: &Expr) -> TranslateResult<Translation> {
    let mut visitor = SyntaxVisitor::new();
    let fragment = visitor.translate(expr)?;
    Ok(Translation {
        fragment,
        imports: visitor.into_imports(),
    })
}

/// Translate `expr`, lifting eligible named lambdas into `class`.
///
/// On error `class` is left as it was before the call.
pub fn translate_into_class(expr: &Expr, class: &mut ClassDeclaration) -> TranslateResult<Translation> {
    let mut visitor = SyntaxVisitor::new().with_class(class);
    let fragment = visitor.translate(expr)?;
    Ok(Translation {
        fragment,
        imports: visitor.into_imports(),
    })
}

/// Assemble the unit a backend compiles: the imports as `using` directives,
/// an optional namespace and the class holding the extracted functions.
pub fn compilation_unit(
    imports: &ImportSet,
    namespace: Option<&str>,
    class: ClassDeclaration,
) -> CompilationUnit {
    CompilationUnit::new(imports.usings(), namespace.map(NameSyntax::new), class)
}
