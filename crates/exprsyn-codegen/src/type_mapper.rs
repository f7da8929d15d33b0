//! Type descriptor to type syntax mapping.
//!
//! A mapper turns a [`TypeDescriptor`] into the [`TypeSyntax`] that names it
//! in source, plus the namespaces that must be imported for that name to
//! resolve. The visitor only depends on the [`TypeMapper`] trait, so a host
//! can substitute its own naming policy (aliases, fully qualified names).

use exprsyn_syntax::{NameSyntax, PredefinedType, TypeSyntax};
use exprsyn_tree::{PrimitiveType, TypeDescriptor};

use crate::error::{TranslateError, TranslateResult};
use crate::imports::ImportSet;

pub trait TypeMapper {
    /// Map a single type.
    fn map_type(&self, ty: &TypeDescriptor) -> TranslateResult<(TypeSyntax, ImportSet)>;

    /// Map a sequence of types, merging their imports.
    fn map_types(&self, tys: &[TypeDescriptor]) -> TranslateResult<(Vec<TypeSyntax>, ImportSet)> {
        let mut syntax = Vec::with_capacity(tys.len());
        let mut imports = ImportSet::new();
        for ty in tys {
            let (mapped, needed) = self.map_type(ty)?;
            syntax.push(mapped);
            imports.extend(needed);
        }
        Ok((syntax, imports))
    }
}

/// Maps built-in types to their keywords and everything else to its bare
/// name, importing the declaring namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTypeMapper;

impl TypeMapper for DefaultTypeMapper {
    fn map_type(&self, ty: &TypeDescriptor) -> TranslateResult<(TypeSyntax, ImportSet)> {
        match ty {
            TypeDescriptor::Nullable(inner) => {
                let (inner, imports) = self.map_type(inner)?;
                Ok((TypeSyntax::nullable(inner), imports))
            }
            TypeDescriptor::Pointer(inner) => {
                let (inner, imports) = self.map_type(inner)?;
                Ok((TypeSyntax::pointer(inner), imports))
            }
            TypeDescriptor::Primitive(prim) => {
                Ok((TypeSyntax::Predefined(predefined(*prim)), ImportSet::new()))
            }
            TypeDescriptor::Nominal { name, namespace } => {
                if let Some(prim) = PrimitiveType::from_runtime_name(namespace.as_deref(), name) {
                    return Ok((TypeSyntax::Predefined(predefined(prim)), ImportSet::new()));
                }
                named(ty, name, namespace.as_deref())
            }
            TypeDescriptor::Enum(e) => named(ty, &e.name, e.namespace.as_deref()),
            TypeDescriptor::Generic {
                name,
                namespace,
                args,
            } => {
                if name.is_empty() || args.is_empty() {
                    return Err(TranslateError::UnresolvableType { ty: ty.clone() });
                }
                let (args, mut imports) = self.map_types(args)?;
                if let Some(ns) = namespace {
                    imports.insert(NameSyntax::new(ns.as_str()));
                }
                let syntax = TypeSyntax::Generic {
                    name: strip_arity(name).to_string(),
                    args,
                };
                Ok((syntax, imports))
            }
        }
    }
}

fn named(
    ty: &TypeDescriptor,
    name: &str,
    namespace: Option<&str>,
) -> TranslateResult<(TypeSyntax, ImportSet)> {
    if name.is_empty() {
        return Err(TranslateError::UnresolvableType { ty: ty.clone() });
    }
    let mut imports = ImportSet::new();
    if let Some(ns) = namespace {
        imports.insert(NameSyntax::new(ns));
    }
    Ok((TypeSyntax::identifier(name), imports))
}

/// `` KeyValuePair`2 `` -> `KeyValuePair`.
fn strip_arity(name: &str) -> &str {
    name.split_once('`').map_or(name, |(bare, _)| bare)
}

fn predefined(prim: PrimitiveType) -> PredefinedType {
    match prim {
        PrimitiveType::Boolean => PredefinedType::Bool,
        PrimitiveType::Char => PredefinedType::Char,
        PrimitiveType::SByte => PredefinedType::SByte,
        PrimitiveType::Byte => PredefinedType::Byte,
        PrimitiveType::Int16 => PredefinedType::Short,
        PrimitiveType::UInt16 => PredefinedType::UShort,
        PrimitiveType::Int32 => PredefinedType::Int,
        PrimitiveType::UInt32 => PredefinedType::UInt,
        PrimitiveType::Int64 => PredefinedType::Long,
        PrimitiveType::UInt64 => PredefinedType::ULong,
        PrimitiveType::Single => PredefinedType::Float,
        PrimitiveType::Double => PredefinedType::Double,
        PrimitiveType::Decimal => PredefinedType::Decimal,
        PrimitiveType::String => PredefinedType::String,
        PrimitiveType::Object => PredefinedType::Object,
        PrimitiveType::Void => PredefinedType::Void,
        PrimitiveType::Enum => PredefinedType::Enum,
        PrimitiveType::Delegate => PredefinedType::Delegate,
    }
}
