//! Operator tags carried by unary and binary expression nodes.
//!
//! The tag set mirrors the host runtime's expression-kind enumeration. Not
//! every tag has a target-language operator; the translator's classification
//! tables decide which ones are supported.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeType {
    // ── Arithmetic ──────────────────────────────────────────────────
    Add,
    AddChecked,
    Subtract,
    SubtractChecked,
    Multiply,
    MultiplyChecked,
    Divide,
    Modulo,
    Power,

    // ── Bitwise / logical ───────────────────────────────────────────
    And,
    Or,
    ExclusiveOr,
    AndAlso,
    OrElse,
    LeftShift,
    RightShift,
    Coalesce,

    // ── Comparison ──────────────────────────────────────────────────
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,

    // ── Assignment ──────────────────────────────────────────────────
    Assign,
    AddAssign,
    AddAssignChecked,
    SubtractAssign,
    SubtractAssignChecked,
    MultiplyAssign,
    MultiplyAssignChecked,
    DivideAssign,
    ModuloAssign,
    PowerAssign,
    AndAssign,
    OrAssign,
    ExclusiveOrAssign,
    LeftShiftAssign,
    RightShiftAssign,
    PreIncrementAssign,
    PreDecrementAssign,
    PostIncrementAssign,
    PostDecrementAssign,

    // ── Unary ───────────────────────────────────────────────────────
    Negate,
    NegateChecked,
    UnaryPlus,
    Not,
    OnesComplement,
    Increment,
    Decrement,

    // ── Other ───────────────────────────────────────────────────────
    ArrayIndex,
    Convert,
    TypeAs,
}

impl NodeType {
    /// Whether a binary node with this tag produces a boolean.
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            NodeType::Equal
                | NodeType::NotEqual
                | NodeType::LessThan
                | NodeType::LessThanOrEqual
                | NodeType::GreaterThan
                | NodeType::GreaterThanOrEqual
                | NodeType::AndAlso
                | NodeType::OrElse
        )
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
