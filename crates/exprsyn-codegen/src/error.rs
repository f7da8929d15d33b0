//! Translation errors.
//!
//! Every error aborts the translation that raised it; none are recoverable
//! inside the translator. They describe violations of the input contract,
//! so they carry enough of the offending input to locate it.

use serde::Serialize;
use thiserror::Error;

use exprsyn_syntax::SyntaxCategory;
use exprsyn_tree::{NodeType, TypeDescriptor, VarId};

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum TranslateError {
    /// A node kind with no translation rule, including extension nodes that
    /// no handler accepts and that declare no reduction.
    #[error("unsupported node kind: {kind}")]
    UnsupportedNode { kind: String },

    #[error("unsupported operator: {op}")]
    UnsupportedOperator { op: NodeType },

    #[error("unsupported constant kind: {kind}")]
    UnsupportedConstant { kind: String },

    /// An enumeration constant whose value names no declared member.
    #[error("no member of enum {ty} has value {value}")]
    UnknownEnumMember { ty: String, value: i128 },

    #[error("cannot coerce {from} to {to}")]
    InvalidCoercion {
        from: SyntaxCategory,
        to: SyntaxCategory,
    },

    /// A block local without a name. `index` is the local's position in the
    /// block's variable list.
    #[error("local #{index} of block of type {block_type} has no name")]
    UnnamedLocal {
        block_type: TypeDescriptor,
        index: usize,
    },

    #[error("parameter {id} has no name")]
    UnnamedParameter { id: VarId },

    #[error("cannot resolve type {ty}")]
    UnresolvableType { ty: TypeDescriptor },

    /// A named function would shadow an existing member of the container.
    #[error("class {class} already declares a member named {name}")]
    DuplicateFunction { class: String, name: String },
}

pub type TranslateResult<T> = Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TranslateError::UnsupportedOperator {
            op: NodeType::Power,
        };
        assert_eq!(err.to_string(), "unsupported operator: Power");

        let err = TranslateError::InvalidCoercion {
            from: SyntaxCategory::Declaration,
            to: SyntaxCategory::Expression,
        };
        assert_eq!(err.to_string(), "cannot coerce declaration to expression");

        let err = TranslateError::UnnamedLocal {
            block_type: TypeDescriptor::int(),
            index: 1,
        };
        assert_eq!(
            err.to_string(),
            "local #1 of block of type System.Int32 has no name"
        );
    }

    #[test]
    fn error_serializes_with_variant_tag() {
        let err = TranslateError::UnknownEnumMember {
            ty: "Color".into(),
            value: 7,
        };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({ "UnknownEnumMember": { "ty": "Color", "value": 7 } })
        );
    }
}
