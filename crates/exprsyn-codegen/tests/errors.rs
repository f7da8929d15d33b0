//! Input-contract violations and how they are reported.

use exprsyn_codegen::{translate, translate_into_class, TranslateError};
use exprsyn_syntax::ClassDeclaration;
use exprsyn_tree::{ConstantValue, EnumType, Expr, NodeType, TypeDescriptor, Variable};

fn translate_err(expr: &Expr) -> TranslateError {
    translate(expr).unwrap_err()
}

// ── Blocks and parameters ──────────────────────────────────────────────

#[test]
fn test_unnamed_local() {
    let local = Variable::unnamed(TypeDescriptor::int());
    let block = Expr::block(
        TypeDescriptor::int(),
        vec![local.clone()],
        vec![Expr::assign(Expr::param(&local), Expr::constant(1))],
    );
    let err = translate_err(&block);
    assert_eq!(
        err,
        TranslateError::UnnamedLocal {
            block_type: TypeDescriptor::int(),
            index: 0,
        }
    );
    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        serde_json::json!({
            "UnnamedLocal": { "block_type": { "Primitive": "Int32" }, "index": 0 }
        })
    );
}

#[test]
fn test_unnamed_local_produces_no_member() {
    let local = Variable::new("", TypeDescriptor::int());
    let body = Expr::block(TypeDescriptor::int(), vec![local], vec![Expr::constant(1)]);
    let lambda = Expr::lambda(Some("Broken"), vec![], body);
    let mut class = ClassDeclaration::new("Broken");
    assert!(matches!(
        translate_into_class(&lambda, &mut class),
        Err(TranslateError::UnnamedLocal { index: 0, .. })
    ));
    assert!(class.members.is_empty());
}

#[test]
fn test_unnamed_parameter() {
    let p = Variable::unnamed(TypeDescriptor::int());
    let err = translate_err(&Expr::add(Expr::param(&p), Expr::constant(1)));
    assert_eq!(err, TranslateError::UnnamedParameter { id: p.id });
}

// ── Operators ──────────────────────────────────────────────────────────

#[test]
fn test_power_has_no_operator() {
    let x = Variable::new("x", TypeDescriptor::double());
    for op in [NodeType::Power, NodeType::PowerAssign] {
        let err = translate_err(&Expr::binary(op, Expr::param(&x), Expr::constant(2.0)));
        assert_eq!(err, TranslateError::UnsupportedOperator { op });
    }
}

#[test]
fn test_conversion_is_not_a_unary_operator() {
    let x = Variable::new("x", TypeDescriptor::int());
    let err = translate_err(&Expr::unary(NodeType::Convert, Expr::param(&x)));
    assert_eq!(err.to_string(), "unsupported operator: Convert");
}

// ── Constants ──────────────────────────────────────────────────────────

#[test]
fn test_opaque_constant() {
    let value = ConstantValue::Opaque(TypeDescriptor::nominal("System", "Uri"));
    let err = translate_err(&Expr::constant_of(TypeDescriptor::object(), value));
    assert_eq!(
        err,
        TranslateError::UnsupportedConstant {
            kind: "System.Uri".into()
        }
    );
}

#[test]
fn test_unknown_enum_member() {
    let color = EnumType::new(None, "Color", [("Red", 0)]);
    let err = translate_err(&Expr::enum_constant(color, 3));
    assert_eq!(
        err,
        TranslateError::UnknownEnumMember {
            ty: "Color".into(),
            value: 3
        }
    );
    assert_eq!(err.to_string(), "no member of enum Color has value 3");
}

#[test]
fn test_unsigned_enum_beyond_signed_range() {
    let top = i128::from(u64::MAX);
    let wide = EnumType::new(Some("Flags"), "Wide", [("None", 0), ("All", top)]);
    let ty = TypeDescriptor::Enum(wide);

    let all = Expr::constant_of(ty.clone(), ConstantValue::UInt64(u64::MAX));
    assert_eq!(translate(&all).unwrap().fragment.to_string(), "Wide.All");

    let missing = Expr::constant_of(ty, ConstantValue::UInt64(u64::MAX - 1));
    assert_eq!(
        translate_err(&missing),
        TranslateError::UnknownEnumMember {
            ty: "Wide".into(),
            value: top - 1
        }
    );
}

// ── Types ──────────────────────────────────────────────────────────────

#[test]
fn test_unresolvable_type() {
    let nameless = TypeDescriptor::nominal("System", "");
    let err = translate_err(&Expr::default_of(TypeDescriptor::nullable(nameless.clone())));
    assert_eq!(err, TranslateError::UnresolvableType { ty: nameless });
}
