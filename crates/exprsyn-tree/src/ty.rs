//! Type descriptors.
//!
//! A `TypeDescriptor` identifies a runtime/static type the way the host
//! runtime does: by a primitive tag, a wrapper around another descriptor,
//! or a (name, namespace, type arguments) triple. Equality is structural.

use std::fmt;

use serde::Serialize;

/// Built-in types that map to predefined keywords in the target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimitiveType {
    Boolean,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    String,
    Object,
    Void,
    /// Base type of all enumerations.
    Enum,
    /// Base type of all callable (delegate) types.
    Delegate,
}

impl PrimitiveType {
    /// Every primitive tag, in declaration order.
    pub const ALL: [PrimitiveType; 18] = [
        PrimitiveType::Boolean,
        PrimitiveType::Char,
        PrimitiveType::SByte,
        PrimitiveType::Byte,
        PrimitiveType::Int16,
        PrimitiveType::UInt16,
        PrimitiveType::Int32,
        PrimitiveType::UInt32,
        PrimitiveType::Int64,
        PrimitiveType::UInt64,
        PrimitiveType::Single,
        PrimitiveType::Double,
        PrimitiveType::Decimal,
        PrimitiveType::String,
        PrimitiveType::Object,
        PrimitiveType::Void,
        PrimitiveType::Enum,
        PrimitiveType::Delegate,
    ];

    /// Runtime name of the primitive inside the `System` namespace.
    pub fn runtime_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::Char => "Char",
            PrimitiveType::SByte => "SByte",
            PrimitiveType::Byte => "Byte",
            PrimitiveType::Int16 => "Int16",
            PrimitiveType::UInt16 => "UInt16",
            PrimitiveType::Int32 => "Int32",
            PrimitiveType::UInt32 => "UInt32",
            PrimitiveType::Int64 => "Int64",
            PrimitiveType::UInt64 => "UInt64",
            PrimitiveType::Single => "Single",
            PrimitiveType::Double => "Double",
            PrimitiveType::Decimal => "Decimal",
            PrimitiveType::String => "String",
            PrimitiveType::Object => "Object",
            PrimitiveType::Void => "Void",
            PrimitiveType::Enum => "Enum",
            PrimitiveType::Delegate => "Delegate",
        }
    }

    /// Look up a primitive by its runtime identity (`System.Int32` etc.).
    pub fn from_runtime_name(namespace: Option<&str>, name: &str) -> Option<PrimitiveType> {
        if namespace != Some("System") {
            return None;
        }
        Self::ALL.into_iter().find(|p| p.runtime_name() == name)
    }
}

/// A named member of an enumeration type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnumMember {
    pub name: String,
    /// Wide enough for every underlying integral type, `ulong` included.
    pub value: i128,
}

/// An enumeration type together with its declared members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EnumType {
    pub name: String,
    pub namespace: Option<String>,
    pub members: Vec<EnumMember>,
}

impl EnumType {
    pub fn new<S: Into<String>>(
        namespace: Option<&str>,
        name: &str,
        members: impl IntoIterator<Item = (S, i128)>,
    ) -> Self {
        EnumType {
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            members: members
                .into_iter()
                .map(|(name, value)| EnumMember {
                    name: name.into(),
                    value,
                })
                .collect(),
        }
    }

    /// Symbolic name of the first member declared with `value`.
    pub fn member_name(&self, value: i128) -> Option<&str> {
        self.members
            .iter()
            .find(|m| m.value == value)
            .map(|m| m.name.as_str())
    }
}

/// Identity of a type as seen by the expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeDescriptor {
    Primitive(PrimitiveType),
    /// `Nullable<T>` over a value type.
    Nullable(Box<TypeDescriptor>),
    /// Unmanaged pointer to `T`.
    Pointer(Box<TypeDescriptor>),
    /// A constructed generic type. `name` may carry the runtime arity suffix
    /// (`` KeyValuePair`2 ``).
    Generic {
        name: String,
        namespace: Option<String>,
        args: Vec<TypeDescriptor>,
    },
    /// Any other named type.
    Nominal {
        name: String,
        namespace: Option<String>,
    },
    Enum(EnumType),
}

impl TypeDescriptor {
    pub fn bool() -> Self {
        TypeDescriptor::Primitive(PrimitiveType::Boolean)
    }

    pub fn char() -> Self {
        TypeDescriptor::Primitive(PrimitiveType::Char)
    }

    pub fn int() -> Self {
        TypeDescriptor::Primitive(PrimitiveType::Int32)
    }

    pub fn long() -> Self {
        TypeDescriptor::Primitive(PrimitiveType::Int64)
    }

    pub fn double() -> Self {
        TypeDescriptor::Primitive(PrimitiveType::Double)
    }

    pub fn string() -> Self {
        TypeDescriptor::Primitive(PrimitiveType::String)
    }

    pub fn object() -> Self {
        TypeDescriptor::Primitive(PrimitiveType::Object)
    }

    pub fn void() -> Self {
        TypeDescriptor::Primitive(PrimitiveType::Void)
    }

    pub fn nullable(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Nullable(Box::new(inner))
    }

    pub fn pointer(inner: TypeDescriptor) -> Self {
        TypeDescriptor::Pointer(Box::new(inner))
    }

    pub fn nominal(namespace: &str, name: &str) -> Self {
        TypeDescriptor::Nominal {
            name: name.to_string(),
            namespace: namespace_of(namespace),
        }
    }

    pub fn generic(namespace: &str, name: &str, args: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Generic {
            name: name.to_string(),
            namespace: namespace_of(namespace),
            args,
        }
    }

    /// `System.Func<params..., ret>`.
    pub fn func(params: Vec<TypeDescriptor>, ret: TypeDescriptor) -> Self {
        let mut args = params;
        args.push(ret);
        Self::generic("System", "Func", args)
    }

    /// `System.Action` or `System.Action<params...>`.
    pub fn action(params: Vec<TypeDescriptor>) -> Self {
        if params.is_empty() {
            Self::nominal("System", "Action")
        } else {
            Self::generic("System", "Action", params)
        }
    }

    /// The delegate type a lambda with these parameter and return types gets
    /// when none is declared explicitly.
    pub fn delegate_for(params: Vec<TypeDescriptor>, ret: TypeDescriptor) -> Self {
        if ret.is_void() {
            Self::action(params)
        } else {
            Self::func(params, ret)
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeDescriptor::Primitive(PrimitiveType::Void))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, TypeDescriptor::Enum(_))
    }
}

/// An empty namespace string denotes the global namespace.
fn namespace_of(namespace: &str) -> Option<String> {
    if namespace.is_empty() {
        None
    } else {
        Some(namespace.to_string())
    }
}

fn write_qualified(f: &mut fmt::Formatter<'_>, namespace: &Option<String>, name: &str) -> fmt::Result {
    match namespace {
        Some(ns) => write!(f, "{ns}.{name}"),
        None => write!(f, "{name}"),
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(p) => write!(f, "System.{}", p.runtime_name()),
            TypeDescriptor::Nullable(inner) => write!(f, "{inner}?"),
            TypeDescriptor::Pointer(inner) => write!(f, "{inner}*"),
            TypeDescriptor::Generic {
                name,
                namespace,
                args,
            } => {
                write_qualified(f, namespace, name)?;
                write!(f, "[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, "]")
            }
            TypeDescriptor::Nominal { name, namespace } => write_qualified(f, namespace, name),
            TypeDescriptor::Enum(e) => write_qualified(f, &e.namespace, &e.name),
        }
    }
}
