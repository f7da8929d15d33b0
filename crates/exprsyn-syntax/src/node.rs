//! Syntax tree nodes of the target language.
//!
//! These are plain owned trees: the translator builds them bottom-up and the
//! renderer in [`crate::render`] turns them into text. No node knows about
//! layout; whitespace is decided entirely by the renderer.

use serde::Serialize;

use crate::kind::{AssignmentOperator, BinaryOperator, Modifier, PredefinedType, UnaryOperator};

// ── Names and types ──────────────────────────────────────────────────

/// A dotted namespace name such as `System.Collections.Generic`.
///
/// Ordering is by the textual name, which is the order `using` directives
/// are emitted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NameSyntax(String);

impl NameSyntax {
    pub fn new(name: impl Into<String>) -> Self {
        NameSyntax(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeSyntax {
    Predefined(PredefinedType),
    Nullable(Box<TypeSyntax>),
    Pointer(Box<TypeSyntax>),
    Identifier(String),
    Generic { name: String, args: Vec<TypeSyntax> },
}

impl TypeSyntax {
    pub fn identifier(name: impl Into<String>) -> Self {
        TypeSyntax::Identifier(name.into())
    }

    pub fn nullable(inner: TypeSyntax) -> Self {
        TypeSyntax::Nullable(Box::new(inner))
    }

    pub fn pointer(inner: TypeSyntax) -> Self {
        TypeSyntax::Pointer(Box::new(inner))
    }
}

// ── Expressions ──────────────────────────────────────────────────────

/// A literal token. Numeric literals keep their rendered text, including
/// any type suffix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralSyntax {
    Null,
    Boolean(bool),
    Char(char),
    String(String),
    Numeric(String),
}

impl LiteralSyntax {
    pub fn int(v: i32) -> Self {
        LiteralSyntax::Numeric(v.to_string())
    }

    pub fn uint(v: u32) -> Self {
        LiteralSyntax::Numeric(format!("{v}U"))
    }

    pub fn long(v: i64) -> Self {
        LiteralSyntax::Numeric(format!("{v}L"))
    }

    pub fn ulong(v: u64) -> Self {
        LiteralSyntax::Numeric(format!("{v}UL"))
    }

    /// Integral kinds without a literal suffix (`sbyte`, `byte`, `short`,
    /// `ushort`); the value converts implicitly from `int`.
    pub fn small_integer(v: impl Into<i64>) -> Self {
        LiteralSyntax::Numeric(v.into().to_string())
    }

    pub fn float(v: f32) -> Self {
        if v.is_nan() {
            LiteralSyntax::Numeric("float.NaN".into())
        } else if v.is_infinite() {
            LiteralSyntax::Numeric(infinity("float", v.is_sign_positive()))
        } else {
            LiteralSyntax::Numeric(format!("{v:?}F"))
        }
    }

    pub fn double(v: f64) -> Self {
        if v.is_nan() {
            LiteralSyntax::Numeric("double.NaN".into())
        } else if v.is_infinite() {
            LiteralSyntax::Numeric(infinity("double", v.is_sign_positive()))
        } else {
            LiteralSyntax::Numeric(format!("{v:?}"))
        }
    }

    /// A decimal literal from its plain digits (`123.45`).
    pub fn decimal(digits: impl Into<String>) -> Self {
        LiteralSyntax::Numeric(format!("{}M", digits.into()))
    }
}

fn infinity(keyword: &str, positive: bool) -> String {
    if positive {
        format!("{keyword}.PositiveInfinity")
    } else {
        format!("{keyword}.NegativeInfinity")
    }
}

/// A typed parameter in a parameter list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSyntax {
    pub name: String,
    pub ty: TypeSyntax,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LambdaBody {
    Expression(Box<ExprSyntax>),
    Block(BlockSyntax),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprSyntax {
    Literal(LiteralSyntax),
    Identifier(String),
    /// A type in expression position, e.g. the receiver of a static call.
    Type(TypeSyntax),
    MemberAccess {
        target: Box<ExprSyntax>,
        member: String,
    },
    Invocation {
        callee: Box<ExprSyntax>,
        args: Vec<ExprSyntax>,
    },
    ObjectCreation {
        ty: TypeSyntax,
        args: Vec<ExprSyntax>,
    },
    Default(TypeSyntax),
    Binary {
        op: BinaryOperator,
        left: Box<ExprSyntax>,
        right: Box<ExprSyntax>,
    },
    Assignment {
        op: AssignmentOperator,
        left: Box<ExprSyntax>,
        right: Box<ExprSyntax>,
    },
    PrefixUnary {
        op: UnaryOperator,
        operand: Box<ExprSyntax>,
    },
    PostfixUnary {
        op: UnaryOperator,
        operand: Box<ExprSyntax>,
    },
    Lambda {
        params: Vec<ParameterSyntax>,
        body: LambdaBody,
    },
}

impl ExprSyntax {
    pub fn identifier(name: impl Into<String>) -> Self {
        ExprSyntax::Identifier(name.into())
    }

    pub fn literal(literal: LiteralSyntax) -> Self {
        ExprSyntax::Literal(literal)
    }

    pub fn member_access(target: ExprSyntax, member: impl Into<String>) -> Self {
        ExprSyntax::MemberAccess {
            target: Box::new(target),
            member: member.into(),
        }
    }

    pub fn invocation(callee: ExprSyntax, args: Vec<ExprSyntax>) -> Self {
        ExprSyntax::Invocation {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn binary(op: BinaryOperator, left: ExprSyntax, right: ExprSyntax) -> Self {
        ExprSyntax::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn assignment(op: AssignmentOperator, left: ExprSyntax, right: ExprSyntax) -> Self {
        ExprSyntax::Assignment {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

// ── Statements ───────────────────────────────────────────────────────

/// `T name;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalDeclaration {
    pub ty: TypeSyntax,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockSyntax {
    pub statements: Vec<StmtSyntax>,
}

impl BlockSyntax {
    pub fn new(statements: Vec<StmtSyntax>) -> Self {
        BlockSyntax { statements }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStatement {
    pub initializers: Vec<ExprSyntax>,
    pub condition: Option<ExprSyntax>,
    pub incrementors: Vec<ExprSyntax>,
    pub body: Box<StmtSyntax>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StmtSyntax {
    Expression(ExprSyntax),
    Return(Option<ExprSyntax>),
    LocalDeclaration(LocalDeclaration),
    Block(BlockSyntax),
    For(ForStatement),
}

// ── Declarations ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDeclaration {
    pub modifiers: Vec<Modifier>,
    pub return_type: TypeSyntax,
    pub name: String,
    pub params: Vec<ParameterSyntax>,
    pub body: BlockSyntax,
}
