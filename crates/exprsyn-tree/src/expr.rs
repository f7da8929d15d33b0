//! Expression nodes.
//!
//! `Expr` is the tagged union the translator dispatches on. Nodes own their
//! children and are never mutated once built. Variables are compared by
//! identity ([`VarId`]), not by name: two distinct variables may share a name,
//! exactly as two parameter objects can in the host runtime.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;

use crate::extension::{ExtensionExpr, ExtensionNode};
use crate::node_type::NodeType;
use crate::ty::{EnumType, PrimitiveType, TypeDescriptor};

// ── Variables ────────────────────────────────────────────────────────

static NEXT_VAR_ID: AtomicU32 = AtomicU32::new(0);

/// Identity of a parameter or block-local variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VarId(pub u32);

impl VarId {
    /// Allocate an identity no other variable in this process shares.
    pub fn fresh() -> Self {
        VarId(NEXT_VAR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// A parameter or local variable. Equality and hashing use `id` only.
#[derive(Debug, Clone)]
pub struct Variable {
    pub id: VarId,
    pub name: Option<String>,
    pub ty: TypeDescriptor,
}

impl Variable {
    pub fn new(name: &str, ty: TypeDescriptor) -> Self {
        Variable {
            id: VarId::fresh(),
            name: Some(name.to_string()),
            ty,
        }
    }

    pub fn unnamed(ty: TypeDescriptor) -> Self {
        Variable {
            id: VarId::fresh(),
            name: None,
            ty,
        }
    }

    /// The declared name, treating an empty string as absent.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl std::hash::Hash for Variable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ── Constants ────────────────────────────────────────────────────────

/// A decimal number stored as `mantissa * 10^-scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decimal {
    pub mantissa: i128,
    pub scale: u32,
}

impl Decimal {
    pub fn new(mantissa: i128, scale: u32) -> Self {
        Decimal { mantissa, scale }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        let padded = if digits.len() <= scale {
            format!("{}{digits}", "0".repeat(scale - digits.len() + 1))
        } else {
            digits
        };
        let (whole, frac) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{whole}.{frac}")
    }
}

/// The runtime value held by a constant node.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Null,
    Boolean(bool),
    Char(char),
    SByte(i8),
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Single(f32),
    Double(f64),
    Decimal(Decimal),
    String(String),
    /// An arbitrary runtime object with no literal form.
    Opaque(TypeDescriptor),
}

impl ConstantValue {
    /// Short name of the value's runtime kind, used in diagnostics.
    pub fn kind(&self) -> String {
        let kind = match self {
            ConstantValue::Null => "null",
            ConstantValue::Boolean(_) => "bool",
            ConstantValue::Char(_) => "char",
            ConstantValue::SByte(_) => "sbyte",
            ConstantValue::Byte(_) => "byte",
            ConstantValue::Int16(_) => "short",
            ConstantValue::UInt16(_) => "ushort",
            ConstantValue::Int32(_) => "int",
            ConstantValue::UInt32(_) => "uint",
            ConstantValue::Int64(_) => "long",
            ConstantValue::UInt64(_) => "ulong",
            ConstantValue::Single(_) => "float",
            ConstantValue::Double(_) => "double",
            ConstantValue::Decimal(_) => "decimal",
            ConstantValue::String(_) => "string",
            ConstantValue::Opaque(ty) => return ty.to_string(),
        };
        kind.to_string()
    }

    /// The value of an integral constant, widened without loss.
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            ConstantValue::SByte(v) => Some(v.into()),
            ConstantValue::Byte(v) => Some(v.into()),
            ConstantValue::Int16(v) => Some(v.into()),
            ConstantValue::UInt16(v) => Some(v.into()),
            ConstantValue::Int32(v) => Some(v.into()),
            ConstantValue::UInt32(v) => Some(v.into()),
            ConstantValue::Int64(v) => Some(v.into()),
            ConstantValue::UInt64(v) => Some(v.into()),
            _ => None,
        }
    }

    /// The type a constant of this value has when none is given explicitly.
    pub fn natural_type(&self) -> TypeDescriptor {
        let prim = match self {
            ConstantValue::Null => PrimitiveType::Object,
            ConstantValue::Boolean(_) => PrimitiveType::Boolean,
            ConstantValue::Char(_) => PrimitiveType::Char,
            ConstantValue::SByte(_) => PrimitiveType::SByte,
            ConstantValue::Byte(_) => PrimitiveType::Byte,
            ConstantValue::Int16(_) => PrimitiveType::Int16,
            ConstantValue::UInt16(_) => PrimitiveType::UInt16,
            ConstantValue::Int32(_) => PrimitiveType::Int32,
            ConstantValue::UInt32(_) => PrimitiveType::UInt32,
            ConstantValue::Int64(_) => PrimitiveType::Int64,
            ConstantValue::UInt64(_) => PrimitiveType::UInt64,
            ConstantValue::Single(_) => PrimitiveType::Single,
            ConstantValue::Double(_) => PrimitiveType::Double,
            ConstantValue::Decimal(_) => PrimitiveType::Decimal,
            ConstantValue::String(_) => PrimitiveType::String,
            ConstantValue::Opaque(ty) => return ty.clone(),
        };
        TypeDescriptor::Primitive(prim)
    }
}

impl From<i32> for ConstantValue {
    fn from(v: i32) -> Self {
        ConstantValue::Int32(v)
    }
}

impl From<i64> for ConstantValue {
    fn from(v: i64) -> Self {
        ConstantValue::Int64(v)
    }
}

impl From<bool> for ConstantValue {
    fn from(v: bool) -> Self {
        ConstantValue::Boolean(v)
    }
}

impl From<char> for ConstantValue {
    fn from(v: char) -> Self {
        ConstantValue::Char(v)
    }
}

impl From<f64> for ConstantValue {
    fn from(v: f64) -> Self {
        ConstantValue::Double(v)
    }
}

impl From<&str> for ConstantValue {
    fn from(v: &str) -> Self {
        ConstantValue::String(v.to_string())
    }
}

// ── Nodes ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub op: NodeType,
    pub operand: Box<Expr>,
    pub ty: TypeDescriptor,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub op: NodeType,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub ty: TypeDescriptor,
}

#[derive(Debug, Clone)]
pub struct ConstantExpr {
    pub ty: TypeDescriptor,
    pub value: ConstantValue,
}

/// The identity of an invoked method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRef {
    pub name: String,
    pub declaring_type: TypeDescriptor,
    pub return_type: TypeDescriptor,
}

impl MethodRef {
    pub fn new(declaring_type: TypeDescriptor, name: &str, return_type: TypeDescriptor) -> Self {
        MethodRef {
            name: name.to_string(),
            declaring_type,
            return_type,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MethodCallExpr {
    /// `None` for static calls.
    pub receiver: Option<Box<Expr>>,
    pub method: MethodRef,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct LambdaExpr {
    pub name: Option<String>,
    pub params: Vec<Variable>,
    pub body: Box<Expr>,
    /// The declared callable (delegate) type.
    pub ty: TypeDescriptor,
    /// Return type of the delegate's signature.
    pub return_type: TypeDescriptor,
}

#[derive(Debug, Clone)]
pub struct BlockExpr {
    pub ty: TypeDescriptor,
    pub variables: Vec<Variable>,
    pub expressions: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct NewExpr {
    pub ty: TypeDescriptor,
    pub args: Vec<Expr>,
}

/// A node of an expression tree.
#[derive(Debug, Clone)]
pub enum Expr {
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Constant(ConstantExpr),
    Default(TypeDescriptor),
    MethodCall(MethodCallExpr),
    Parameter(Variable),
    Lambda(LambdaExpr),
    Block(BlockExpr),
    New(NewExpr),
    Extension(ExtensionExpr),
}

impl Expr {
    /// Name of the node's variant, used in diagnostics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Unary(_) => "Unary",
            Expr::Binary(_) => "Binary",
            Expr::Constant(_) => "Constant",
            Expr::Default(_) => "Default",
            Expr::MethodCall(_) => "MethodCall",
            Expr::Parameter(_) => "Parameter",
            Expr::Lambda(_) => "Lambda",
            Expr::Block(_) => "Block",
            Expr::New(_) => "New",
            Expr::Extension(_) => "Extension",
        }
    }

    /// The static type of the value this node produces.
    pub fn ty(&self) -> TypeDescriptor {
        match self {
            Expr::Unary(u) => u.ty.clone(),
            Expr::Binary(b) => b.ty.clone(),
            Expr::Constant(c) => c.ty.clone(),
            Expr::Default(ty) => ty.clone(),
            Expr::MethodCall(call) => call.method.return_type.clone(),
            Expr::Parameter(var) => var.ty.clone(),
            Expr::Lambda(lambda) => lambda.ty.clone(),
            Expr::Block(block) => block.ty.clone(),
            Expr::New(new) => new.ty.clone(),
            Expr::Extension(ext) => ext.ty(),
        }
    }

    // ── Constructors ─────────────────────────────────────────────────

    /// A constant typed by its value's natural type.
    pub fn constant(value: impl Into<ConstantValue>) -> Self {
        let value = value.into();
        Expr::Constant(ConstantExpr {
            ty: value.natural_type(),
            value,
        })
    }

    pub fn constant_of(ty: TypeDescriptor, value: impl Into<ConstantValue>) -> Self {
        Expr::Constant(ConstantExpr {
            ty,
            value: value.into(),
        })
    }

    /// A constant of an enumeration type holding the member's underlying value.
    pub fn enum_constant(ty: EnumType, value: i64) -> Self {
        Expr::Constant(ConstantExpr {
            ty: TypeDescriptor::Enum(ty),
            value: ConstantValue::Int64(value),
        })
    }

    pub fn default_of(ty: TypeDescriptor) -> Self {
        Expr::Default(ty)
    }

    pub fn param(var: &Variable) -> Self {
        Expr::Parameter(var.clone())
    }

    /// A unary node typed like its operand.
    pub fn unary(op: NodeType, operand: Expr) -> Self {
        Expr::Unary(UnaryExpr {
            op,
            ty: operand.ty(),
            operand: Box::new(operand),
        })
    }

    /// A binary node. Comparisons and short-circuit logic produce `bool`;
    /// everything else is typed like the left operand.
    pub fn binary(op: NodeType, left: Expr, right: Expr) -> Self {
        let ty = if op.is_comparison() {
            TypeDescriptor::bool()
        } else {
            left.ty()
        };
        Expr::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty,
        })
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Self::binary(NodeType::Add, left, right)
    }

    pub fn assign(left: Expr, right: Expr) -> Self {
        Self::binary(NodeType::Assign, left, right)
    }

    pub fn less_than(left: Expr, right: Expr) -> Self {
        Self::binary(NodeType::LessThan, left, right)
    }

    pub fn increment(operand: Expr) -> Self {
        Self::unary(NodeType::Increment, operand)
    }

    pub fn call(receiver: Expr, method: MethodRef, args: Vec<Expr>) -> Self {
        Expr::MethodCall(MethodCallExpr {
            receiver: Some(Box::new(receiver)),
            method,
            args,
        })
    }

    pub fn call_static(method: MethodRef, args: Vec<Expr>) -> Self {
        Expr::MethodCall(MethodCallExpr {
            receiver: None,
            method,
            args,
        })
    }

    pub fn new_object(ty: TypeDescriptor, args: Vec<Expr>) -> Self {
        Expr::New(NewExpr { ty, args })
    }

    pub fn block(ty: TypeDescriptor, variables: Vec<Variable>, expressions: Vec<Expr>) -> Self {
        Expr::Block(BlockExpr {
            ty,
            variables,
            expressions,
        })
    }

    /// A lambda whose delegate type is inferred from its parameters and the
    /// body's type (`Func<..>` or `Action<..>`).
    pub fn lambda(name: Option<&str>, params: Vec<Variable>, body: Expr) -> Self {
        let return_type = body.ty();
        let ty = TypeDescriptor::delegate_for(
            params.iter().map(|p| p.ty.clone()).collect(),
            return_type.clone(),
        );
        Self::lambda_typed(name, params, body, ty, return_type)
    }

    pub fn lambda_typed(
        name: Option<&str>,
        params: Vec<Variable>,
        body: Expr,
        ty: TypeDescriptor,
        return_type: TypeDescriptor,
    ) -> Self {
        Expr::Lambda(LambdaExpr {
            name: name.map(str::to_string),
            params,
            body: Box::new(body),
            ty,
            return_type,
        })
    }

    pub fn extension(node: impl ExtensionNode + 'static) -> Self {
        Expr::Extension(ExtensionExpr::new(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_compare_by_identity() {
        let a = Variable::new("x", TypeDescriptor::int());
        let b = Variable::new("x", TypeDescriptor::int());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn empty_name_counts_as_unnamed() {
        let mut v = Variable::new("", TypeDescriptor::int());
        assert_eq!(v.name(), None);
        v.name = Some("k".into());
        assert_eq!(v.name(), Some("k"));
        assert_eq!(Variable::unnamed(TypeDescriptor::int()).name(), None);
    }

    #[test]
    fn decimal_display() {
        assert_eq!(Decimal::new(12345, 2).to_string(), "123.45");
        assert_eq!(Decimal::new(5, 2).to_string(), "0.05");
        assert_eq!(Decimal::new(-5, 1).to_string(), "-0.5");
        assert_eq!(Decimal::new(42, 0).to_string(), "42");
    }

    #[test]
    fn constant_infers_natural_type() {
        assert_eq!(Expr::constant(1).ty(), TypeDescriptor::int());
        assert_eq!(Expr::constant(42i64).ty(), TypeDescriptor::long());
        assert_eq!(Expr::constant("a").ty(), TypeDescriptor::string());
    }

    #[test]
    fn integral_values_widen_without_loss() {
        assert_eq!(ConstantValue::Byte(7).as_integer(), Some(7));
        assert_eq!(
            ConstantValue::UInt64(u64::MAX).as_integer(),
            Some(i128::from(u64::MAX))
        );
        assert_eq!(ConstantValue::Double(1.0).as_integer(), None);
    }

    #[test]
    fn comparison_is_boolean() {
        let i = Variable::new("i", TypeDescriptor::int());
        let test = Expr::less_than(Expr::param(&i), Expr::constant(10));
        assert_eq!(test.ty(), TypeDescriptor::bool());
        assert_eq!(Expr::add(Expr::param(&i), Expr::constant(1)).ty(), TypeDescriptor::int());
    }

    #[test]
    fn lambda_infers_delegate_type() {
        let i = Variable::new("i", TypeDescriptor::int());
        let lambda = Expr::lambda(None, vec![i.clone()], Expr::add(Expr::constant(1), Expr::param(&i)));
        match lambda {
            Expr::Lambda(l) => {
                assert_eq!(
                    l.ty,
                    TypeDescriptor::func(vec![TypeDescriptor::int()], TypeDescriptor::int())
                );
                assert_eq!(l.return_type, TypeDescriptor::int());
            }
            other => panic!("expected lambda, got {other:?}"),
        }
    }
}
