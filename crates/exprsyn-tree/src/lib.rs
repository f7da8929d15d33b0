//! Typed expression trees for the exprsyn translator.
//!
//! This crate defines the immutable input representation that the
//! `exprsyn-codegen` crate translates into target-language syntax:
//!
//! - [`ty`]: type descriptors (primitives, nullable/pointer wrappers,
//!   generic and nominal types, enumerations)
//! - [`node_type`]: operator tags carried by unary and binary nodes
//! - [`expr`]: the expression node union, variable identities and constants
//! - [`extension`]: the capability trait for caller-defined node kinds
//!
//! Trees are built once by the caller and never mutated afterwards. Every
//! node carries enough type information for the type mapper to resolve it.

pub mod expr;
pub mod extension;
pub mod node_type;
pub mod ty;

pub use expr::{
    BinaryExpr, BlockExpr, ConstantExpr, ConstantValue, Decimal, Expr, LambdaExpr, MethodCallExpr,
    MethodRef, NewExpr, UnaryExpr, VarId, Variable,
};
pub use extension::{ExtensionExpr, ExtensionNode};
pub use node_type::NodeType;
pub use ty::{EnumMember, EnumType, PrimitiveType, TypeDescriptor};
