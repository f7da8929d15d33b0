//! Context coercion between syntax categories.
//!
//! A visited node comes back in whatever category is most natural for it
//! (usually an expression). The surrounding construct then "peels" it into
//! the category it needs. The rule table is closed:
//!
//! | from        | to          | result                                   |
//! |-------------|-------------|------------------------------------------|
//! | any         | same        | unchanged                                |
//! | return/block| statement   | unchanged                                |
//! | expression  | statement   | `expr;`                                  |
//! | expression  | return      | `return expr;`                           |
//! | expression  | block       | `{ return expr; }` or `{ expr; }`        |
//! | statement   | block       | `{ stmt }`                               |
//!
//! Anything else is a [`TranslateError::InvalidCoercion`].

use exprsyn_syntax::{BlockSyntax, ExprSyntax, StmtSyntax, SyntaxCategory, SyntaxFragment};

use crate::error::{TranslateError, TranslateResult};

/// Convert `fragment` to `target`. `tail_value` selects the return form when
/// an expression is wrapped into a block.
pub fn coerce(
    fragment: SyntaxFragment,
    target: SyntaxCategory,
    tail_value: bool,
) -> TranslateResult<SyntaxFragment> {
    if fragment.is(target) {
        return Ok(fragment);
    }
    let from = fragment.category();
    let coerced = match (fragment, target) {
        (SyntaxFragment::Expression(expr), SyntaxCategory::Statement) => {
            SyntaxFragment::Statement(StmtSyntax::Expression(expr))
        }
        (SyntaxFragment::Expression(expr), SyntaxCategory::ReturnStatement) => {
            SyntaxFragment::Statement(StmtSyntax::Return(Some(expr)))
        }
        (SyntaxFragment::Expression(expr), SyntaxCategory::Block) => {
            let stmt = if tail_value {
                StmtSyntax::Return(Some(expr))
            } else {
                StmtSyntax::Expression(expr)
            };
            SyntaxFragment::Block(BlockSyntax::new(vec![stmt]))
        }
        (SyntaxFragment::Statement(stmt), SyntaxCategory::Block) => {
            SyntaxFragment::Block(BlockSyntax::new(vec![stmt]))
        }
        _ => return Err(TranslateError::InvalidCoercion { from, to: target }),
    };
    Ok(coerced)
}

fn mismatch(from: SyntaxCategory, to: SyntaxCategory) -> TranslateError {
    TranslateError::InvalidCoercion { from, to }
}

pub fn peel_expression(fragment: SyntaxFragment) -> TranslateResult<ExprSyntax> {
    let from = fragment.category();
    coerce(fragment, SyntaxCategory::Expression, false)?
        .into_expression()
        .ok_or_else(|| mismatch(from, SyntaxCategory::Expression))
}

pub fn peel_statement(fragment: SyntaxFragment) -> TranslateResult<StmtSyntax> {
    let from = fragment.category();
    coerce(fragment, SyntaxCategory::Statement, false)?
        .into_statement()
        .ok_or_else(|| mismatch(from, SyntaxCategory::Statement))
}

pub fn peel_return(fragment: SyntaxFragment) -> TranslateResult<StmtSyntax> {
    let from = fragment.category();
    coerce(fragment, SyntaxCategory::ReturnStatement, true)?
        .into_statement()
        .ok_or_else(|| mismatch(from, SyntaxCategory::ReturnStatement))
}

pub fn peel_block(fragment: SyntaxFragment, tail_value: bool) -> TranslateResult<BlockSyntax> {
    let from = fragment.category();
    coerce(fragment, SyntaxCategory::Block, tail_value)?
        .into_block()
        .ok_or_else(|| mismatch(from, SyntaxCategory::Block))
}
