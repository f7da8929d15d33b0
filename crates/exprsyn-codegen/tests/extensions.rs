//! Caller-defined node kinds: handler dispatch and reduction fallback.

use std::any::Any;

use exprsyn_codegen::{ExtensionRegistry, SyntaxVisitor, TranslateError, TranslateResult};
use exprsyn_syntax::{
    ClassDeclaration, ExprSyntax, ForStatement, LiteralSyntax, StmtSyntax, SyntaxFragment,
};
use exprsyn_tree::{Expr, ExtensionExpr, ExtensionNode, NodeType, TypeDescriptor, Variable};

// ── Test nodes ─────────────────────────────────────────────────────────

/// `for (initializer; test; step) body` with no base-node reduction.
#[derive(Debug)]
struct ForExpression {
    initializer: Expr,
    test: Expr,
    step: Expr,
    body: Expr,
}

impl ExtensionNode for ForExpression {
    fn tag(&self) -> &str {
        "For"
    }

    fn ty(&self) -> TypeDescriptor {
        TypeDescriptor::void()
    }

    fn reduce(&self) -> Option<Expr> {
        None
    }

    fn children(&self) -> Option<Vec<&Expr>> {
        Some(vec![&self.initializer, &self.test, &self.step, &self.body])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Irreducible node that keeps its operand private.
#[derive(Debug)]
struct Sealed(Expr);

impl ExtensionNode for Sealed {
    fn tag(&self) -> &str {
        "Sealed"
    }

    fn ty(&self) -> TypeDescriptor {
        TypeDescriptor::void()
    }

    fn reduce(&self) -> Option<Expr> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `x * x`, reducible.
#[derive(Debug)]
struct Square(Expr);

impl ExtensionNode for Square {
    fn tag(&self) -> &str {
        "Square"
    }

    fn ty(&self) -> TypeDescriptor {
        self.0.ty()
    }

    fn reduce(&self) -> Option<Expr> {
        Some(Expr::binary(NodeType::Multiply, self.0.clone(), self.0.clone()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn for_loop_over(i: &Variable, j: &Variable) -> Expr {
    Expr::extension(ForExpression {
        initializer: Expr::constant(0),
        test: Expr::less_than(Expr::param(i), Expr::constant(10)),
        step: Expr::increment(Expr::param(i)),
        body: Expr::increment(Expr::param(j)),
    })
}

fn for_loop() -> Expr {
    let i = Variable::new("i", TypeDescriptor::int());
    let j = Variable::new("j", TypeDescriptor::int());
    for_loop_over(&i, &j)
}

fn for_registry() -> ExtensionRegistry {
    let mut registry = ExtensionRegistry::new();
    registry.register("For", visit_for);
    registry
}

fn visit_for(
    ext: &ExtensionExpr,
    visitor: &mut SyntaxVisitor<'_>,
) -> TranslateResult<Option<SyntaxFragment>> {
    let Some(node) = ext.downcast_ref::<ForExpression>() else {
        return Ok(None);
    };
    let body = visitor.visit_as_block(&node.body, false)?;
    let stmt = StmtSyntax::For(ForStatement {
        initializers: vec![visitor.visit_expression(&node.initializer)?],
        condition: Some(visitor.visit_expression(&node.test)?),
        incrementors: vec![visitor.visit_expression(&node.step)?],
        body: Box::new(StmtSyntax::Block(body)),
    });
    Ok(Some(stmt.into()))
}

// ── Handlers ───────────────────────────────────────────────────────────

#[test]
fn test_for_loop_handler() {
    let registry = for_registry();
    let mut visitor = SyntaxVisitor::new().with_extensions(registry);
    let fragment = visitor.translate(&for_loop()).unwrap();

    insta::assert_snapshot!(fragment.to_string(), @r"
    for (0; i < 10; i++)
    {
        j++;
    }
    ");
}

#[test]
fn test_handler_output_is_coerced_by_parent() {
    // A for loop as the body of a void lambda is peeled into the block.
    let i = Variable::new("i", TypeDescriptor::int());
    let j = Variable::new("j", TypeDescriptor::int());
    let registry = for_registry();
    let mut class = ClassDeclaration::new("Loops");
    let lambda = Expr::lambda_typed(
        Some("Run"),
        vec![i.clone(), j.clone()],
        for_loop_over(&i, &j),
        TypeDescriptor::action(vec![TypeDescriptor::int(), TypeDescriptor::int()]),
        TypeDescriptor::void(),
    );
    let mut visitor = SyntaxVisitor::new()
        .with_class(&mut class)
        .with_extensions(registry);
    let fragment = visitor.translate(&lambda).unwrap();

    insta::assert_snapshot!(fragment.to_string(), @r"
    public static void Run(int i, int j)
    {
        for (0; i < 10; i++)
        {
            j++;
        }
    }
    ");
}

#[test]
fn test_loop_over_outer_variable_stays_a_closure() {
    // j is bound outside Run, so Run cannot become a standalone method.
    let i = Variable::new("i", TypeDescriptor::int());
    let j = Variable::new("j", TypeDescriptor::int());
    let registry = for_registry();
    let mut class = ClassDeclaration::new("Loops");
    let lambda = Expr::lambda_typed(
        Some("Run"),
        vec![i.clone()],
        for_loop_over(&i, &j),
        TypeDescriptor::action(vec![TypeDescriptor::int()]),
        TypeDescriptor::void(),
    );
    let mut visitor = SyntaxVisitor::new()
        .with_class(&mut class)
        .with_extensions(registry);
    let fragment = visitor.translate(&lambda).unwrap();

    assert!(fragment.to_string().starts_with("new Action<int>((int i) =>"));
    assert!(class.members.is_empty());
}

#[test]
fn test_sealed_extension_body_is_never_lifted() {
    let outer = Variable::new("outer", TypeDescriptor::int());
    let mut registry: ExtensionRegistry = ExtensionRegistry::new();
    registry.register("Sealed", |ext, visitor| {
        let Some(Sealed(operand)) = ext.downcast_ref::<Sealed>() else {
            return Ok(None);
        };
        Ok(Some(visitor.visit_statement(operand)?.into()))
    });
    let mut class = ClassDeclaration::new("Loops");
    let lambda = Expr::lambda_typed(
        Some("Run"),
        vec![],
        Expr::extension(Sealed(Expr::increment(Expr::param(&outer)))),
        TypeDescriptor::action(vec![]),
        TypeDescriptor::void(),
    );
    let mut visitor = SyntaxVisitor::new()
        .with_class(&mut class)
        .with_extensions(registry);
    let fragment = visitor.translate(&lambda).unwrap();

    insta::assert_snapshot!(fragment.to_string(), @r"
    new Action(() =>
    {
        outer++;
    })
    ");
    assert!(class.members.is_empty());
}

#[test]
fn test_declining_handler_falls_back_to_reduction() {
    let x = Variable::new("x", TypeDescriptor::double());
    let mut registry: ExtensionRegistry = ExtensionRegistry::new();
    registry.register("Square", |_, _| Ok(None));
    let mut visitor = SyntaxVisitor::new().with_extensions(registry);
    let fragment = visitor
        .translate(&Expr::extension(Square(Expr::param(&x))))
        .unwrap();
    assert_eq!(fragment.to_string(), "x * x");
}

#[test]
fn test_handler_overrides_reduction() {
    let x = Variable::new("x", TypeDescriptor::double());
    let mut registry: ExtensionRegistry = ExtensionRegistry::new();
    registry.register("Square", |ext, visitor| {
        let Some(Square(operand)) = ext.downcast_ref::<Square>() else {
            return Ok(None);
        };
        let math = visitor.map_type(&TypeDescriptor::nominal("System", "Math"))?;
        let callee = ExprSyntax::member_access(ExprSyntax::Type(math), "Pow");
        let args = vec![
            visitor.visit_expression(operand)?,
            ExprSyntax::literal(LiteralSyntax::double(2.0)),
        ];
        Ok(Some(ExprSyntax::invocation(callee, args).into()))
    });
    let mut visitor = SyntaxVisitor::new().with_extensions(registry);
    let fragment = visitor
        .translate(&Expr::extension(Square(Expr::param(&x))))
        .unwrap();
    assert_eq!(fragment.to_string(), "Math.Pow(x, 2.0)");
    assert!(visitor.imports().contains("System"));
}

#[test]
fn test_reduction_without_registry() {
    let x = Variable::new("x", TypeDescriptor::int());
    let translation = exprsyn_codegen::translate(&Expr::add(
        Expr::extension(Square(Expr::param(&x))),
        Expr::constant(1),
    ))
    .unwrap();
    assert_eq!(translation.fragment.to_string(), "x * x + 1");
}

// ── Errors ─────────────────────────────────────────────────────────────

#[test]
fn test_irreducible_extension_without_handler() {
    let err = exprsyn_codegen::translate(&for_loop()).unwrap_err();
    assert_eq!(
        err,
        TranslateError::UnsupportedNode {
            kind: "Extension(For)".into()
        }
    );
}

#[test]
fn test_handler_errors_propagate() {
    let i = Variable::new("i", TypeDescriptor::int());
    let bad = Expr::extension(ForExpression {
        initializer: Expr::constant(0),
        test: Expr::constant(true),
        step: Expr::binary(NodeType::Power, Expr::param(&i), Expr::constant(2)),
        body: Expr::increment(Expr::param(&i)),
    });
    let registry = for_registry();
    let mut visitor = SyntaxVisitor::new().with_extensions(registry);
    assert_eq!(
        visitor.translate(&bad),
        Err(TranslateError::UnsupportedOperator { op: NodeType::Power })
    );
}
