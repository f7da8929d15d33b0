//! The expression tree to syntax tree dispatcher.
//!
//! [`SyntaxVisitor`] walks an expression tree depth-first and builds the
//! equivalent syntax tree bottom-up. Each node is visited into the fragment
//! category most natural for it; parents then coerce children into the
//! category they need (see [`crate::peel`]).
//!
//! Named lambdas that capture nothing are lifted into public static methods
//! of the target class, when one is supplied. Every other lambda becomes an
//! inline delegate construction. Type references go through the visitor's
//! [`TypeMapper`] and the namespaces they need are collected as imports.

use std::sync::Arc;

use tracing::{debug, instrument, trace};

use exprsyn_syntax::{
    BlockSyntax, ClassDeclaration, ExprSyntax, Fixity, LambdaBody, LiteralSyntax,
    LocalDeclaration, MethodDeclaration, Modifier, ParameterSyntax, StmtSyntax, SyntaxCategory,
    SyntaxFragment, TypeSyntax, UsingDirective,
};
use exprsyn_tree::{
    BinaryExpr, BlockExpr, ConstantExpr, ConstantValue, EnumType, Expr, ExtensionExpr, LambdaExpr,
    MethodCallExpr, NewExpr, TypeDescriptor, UnaryExpr, Variable,
};

use crate::closure::captured_by;
use crate::error::{TranslateError, TranslateResult};
use crate::extension::ExtensionRegistry;
use crate::imports::ImportSet;
use crate::operators::{classify_binary, classify_unary, BinaryForm};
use crate::peel::{peel_block, peel_expression, peel_return, peel_statement};
use crate::type_mapper::{DefaultTypeMapper, TypeMapper};

pub struct SyntaxVisitor<'a, M = DefaultTypeMapper> {
    mapper: M,
    class: Option<&'a mut ClassDeclaration>,
    extensions: Option<Arc<ExtensionRegistry<M>>>,
    imports: ImportSet,
}

// ── Construction ─────────────────────────────────────────────────────

impl<'a> SyntaxVisitor<'a, DefaultTypeMapper> {
    /// A visitor with the default type mapper, no target class and no
    /// extension handlers.
    pub fn new() -> Self {
        Self::with_type_mapper(DefaultTypeMapper)
    }
}

impl<'a> Default for SyntaxVisitor<'a, DefaultTypeMapper> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, M: TypeMapper> SyntaxVisitor<'a, M> {
    /// A visitor resolving type references through `mapper`.
    pub fn with_type_mapper(mapper: M) -> Self {
        SyntaxVisitor {
            mapper,
            class: None,
            extensions: None,
            imports: ImportSet::new(),
        }
    }

    /// Lift eligible named lambdas into `class`.
    pub fn with_class(mut self, class: &'a mut ClassDeclaration) -> Self {
        self.class = Some(class);
        self
    }

    pub fn with_extensions(mut self, extensions: impl Into<Arc<ExtensionRegistry<M>>>) -> Self {
        self.extensions = Some(extensions.into());
        self
    }

    // ── State ────────────────────────────────────────────────────────

    pub fn class(&self) -> Option<&ClassDeclaration> {
        self.class.as_deref()
    }

    pub fn imports(&self) -> &ImportSet {
        &self.imports
    }

    pub fn usings(&self) -> Vec<UsingDirective> {
        self.imports.usings()
    }

    pub fn into_imports(self) -> ImportSet {
        self.imports
    }

    // ── Entry points ─────────────────────────────────────────────────

    /// Translate a whole tree. On error, members appended to the target class
    /// and imports collected during this call are discarded.
    #[instrument(level = "debug", skip_all, fields(kind = expr.kind()))]
    pub fn translate(&mut self, expr: &Expr) -> TranslateResult<SyntaxFragment> {
        let member_count = self.class.as_deref().map(|c| c.members.len());
        let imports = self.imports.clone();
        let result = self.visit(expr);
        if let Err(err) = &result {
            debug!(%err, "translation failed, rolling back");
            if let (Some(class), Some(len)) = (self.class.as_deref_mut(), member_count) {
                class.members.truncate(len);
            }
            self.imports = imports;
        }
        result
    }

    /// Translate one node into its natural fragment category.
    pub fn visit(&mut self, expr: &Expr) -> TranslateResult<SyntaxFragment> {
        trace!(kind = expr.kind(), "visit");
        match expr {
            Expr::Unary(unary) => self.visit_unary(unary),
            Expr::Binary(binary) => self.visit_binary(binary),
            Expr::Constant(constant) => self.visit_constant(constant),
            Expr::Default(ty) => Ok(ExprSyntax::Default(self.map_type(ty)?).into()),
            Expr::MethodCall(call) => self.visit_method_call(call),
            Expr::Parameter(var) => Ok(ExprSyntax::identifier(param_name(var)?).into()),
            Expr::Lambda(lambda) => self.visit_lambda(lambda),
            Expr::Block(block) => self.visit_block(block),
            Expr::New(new) => self.visit_new(new),
            Expr::Extension(ext) => self.visit_extension(ext),
        }
    }

    pub fn visit_expression(&mut self, expr: &Expr) -> TranslateResult<ExprSyntax> {
        peel_expression(self.visit(expr)?)
    }

    pub fn visit_expressions(&mut self, exprs: &[Expr]) -> TranslateResult<Vec<ExprSyntax>> {
        exprs.iter().map(|e| self.visit_expression(e)).collect()
    }

    pub fn visit_statement(&mut self, expr: &Expr) -> TranslateResult<StmtSyntax> {
        peel_statement(self.visit(expr)?)
    }

    pub fn visit_return(&mut self, expr: &Expr) -> TranslateResult<StmtSyntax> {
        peel_return(self.visit(expr)?)
    }

    /// Translate `expr` as a block; `tail_value` makes a bare expression the
    /// block's return value.
    pub fn visit_as_block(&mut self, expr: &Expr, tail_value: bool) -> TranslateResult<BlockSyntax> {
        peel_block(self.visit(expr)?, tail_value)
    }

    // ── Types ────────────────────────────────────────────────────────

    /// Map a type reference, recording the imports it needs.
    pub fn map_type(&mut self, ty: &TypeDescriptor) -> TranslateResult<TypeSyntax> {
        let (syntax, imports) = self.mapper.map_type(ty)?;
        self.imports.extend(imports);
        Ok(syntax)
    }

    pub fn map_types(&mut self, tys: &[TypeDescriptor]) -> TranslateResult<Vec<TypeSyntax>> {
        let (syntax, imports) = self.mapper.map_types(tys)?;
        self.imports.extend(imports);
        Ok(syntax)
    }

    // ── Operators ────────────────────────────────────────────────────

    fn visit_unary(&mut self, unary: &UnaryExpr) -> TranslateResult<SyntaxFragment> {
        let (op, fixity) = classify_unary(unary.op)?;
        let operand = Box::new(self.visit_expression(&unary.operand)?);
        let expr = match fixity {
            Fixity::Prefix => ExprSyntax::PrefixUnary { op, operand },
            Fixity::Postfix => ExprSyntax::PostfixUnary { op, operand },
        };
        Ok(expr.into())
    }

    fn visit_binary(&mut self, binary: &BinaryExpr) -> TranslateResult<SyntaxFragment> {
        let form = classify_binary(binary.op)?;
        let left = self.visit_expression(&binary.left)?;
        let right = self.visit_expression(&binary.right)?;
        let expr = match form {
            BinaryForm::Assignment(op) => ExprSyntax::assignment(op, left, right),
            BinaryForm::Operator(op) => ExprSyntax::binary(op, left, right),
        };
        Ok(expr.into())
    }

    // ── Constants ────────────────────────────────────────────────────

    fn visit_constant(&mut self, constant: &ConstantExpr) -> TranslateResult<SyntaxFragment> {
        if let TypeDescriptor::Enum(enum_type) = &constant.ty {
            return self.enum_member(&constant.ty, enum_type, &constant.value);
        }
        Ok(ExprSyntax::literal(literal(&constant.value)?).into())
    }

    /// `Color.Red` for an enumeration constant.
    fn enum_member(
        &mut self,
        ty: &TypeDescriptor,
        enum_type: &EnumType,
        value: &ConstantValue,
    ) -> TranslateResult<SyntaxFragment> {
        let raw = value
            .as_integer()
            .ok_or_else(|| TranslateError::UnsupportedConstant { kind: value.kind() })?;
        let member = enum_type
            .member_name(raw)
            .ok_or_else(|| TranslateError::UnknownEnumMember {
                ty: enum_type.name.clone(),
                value: raw,
            })?
            .to_string();
        let target = ExprSyntax::Type(self.map_type(ty)?);
        Ok(ExprSyntax::member_access(target, member).into())
    }

    // ── Calls and construction ───────────────────────────────────────

    fn visit_method_call(&mut self, call: &MethodCallExpr) -> TranslateResult<SyntaxFragment> {
        let receiver = match &call.receiver {
            Some(receiver) => self.visit_expression(receiver)?,
            None => ExprSyntax::Type(self.map_type(&call.method.declaring_type)?),
        };
        let args = self.visit_expressions(&call.args)?;
        let callee = ExprSyntax::member_access(receiver, call.method.name.as_str());
        Ok(ExprSyntax::invocation(callee, args).into())
    }

    fn visit_new(&mut self, new: &NewExpr) -> TranslateResult<SyntaxFragment> {
        let ty = self.map_type(&new.ty)?;
        let args = self.visit_expressions(&new.args)?;
        Ok(ExprSyntax::ObjectCreation { ty, args }.into())
    }

    // ── Blocks ───────────────────────────────────────────────────────

    fn visit_block(&mut self, block: &BlockExpr) -> TranslateResult<SyntaxFragment> {
        let mut statements = Vec::with_capacity(block.variables.len() + block.expressions.len());

        if !block.variables.is_empty() {
            // Locals are declared with the block's own type.
            let ty = self.map_type(&block.ty)?;
            for (index, var) in block.variables.iter().enumerate() {
                let name = var.name().ok_or_else(|| TranslateError::UnnamedLocal {
                    block_type: block.ty.clone(),
                    index,
                })?;
                statements.push(StmtSyntax::LocalDeclaration(LocalDeclaration {
                    ty: ty.clone(),
                    name: name.to_string(),
                }));
            }
        }

        let returns_value = !block.ty.is_void();
        let last = block.expressions.len().saturating_sub(1);
        for (i, expr) in block.expressions.iter().enumerate() {
            let stmt = if i == last && returns_value {
                self.visit_return(expr)?
            } else {
                self.visit_statement(expr)?
            };
            statements.push(stmt);
        }

        Ok(BlockSyntax::new(statements).into())
    }

    // ── Lambdas ──────────────────────────────────────────────────────

    fn visit_lambda(&mut self, lambda: &LambdaExpr) -> TranslateResult<SyntaxFragment> {
        let params = self.parameters(&lambda.params)?;

        if let (Some(name), true) = (lambda.name.as_deref(), self.class.is_some()) {
            let captured = captured_by(lambda);
            if captured.is_empty() {
                return self.extract_function(name, lambda, params);
            }
            debug!(
                function = name,
                captures = captured.len(),
                opaque = captured.opaque,
                "named lambda captures variables, keeping closure"
            );
        }

        let ty = self.map_type(&lambda.ty)?;
        let body = match self.visit(&lambda.body)? {
            SyntaxFragment::Expression(expr) => LambdaBody::Expression(Box::new(expr)),
            SyntaxFragment::Block(block) => LambdaBody::Block(block),
            stmt @ SyntaxFragment::Statement(_) => {
                LambdaBody::Block(peel_block(stmt, !lambda.return_type.is_void())?)
            }
            SyntaxFragment::Declaration(_) => {
                return Err(TranslateError::InvalidCoercion {
                    from: SyntaxCategory::Declaration,
                    to: SyntaxCategory::Expression,
                })
            }
        };
        let value = ExprSyntax::Lambda { params, body };
        Ok(ExprSyntax::ObjectCreation {
            ty,
            args: vec![value],
        }
        .into())
    }

    /// Lift a non-capturing named lambda into a method of the target class.
    fn extract_function(
        &mut self,
        name: &str,
        lambda: &LambdaExpr,
        params: Vec<ParameterSyntax>,
    ) -> TranslateResult<SyntaxFragment> {
        let return_type = self.map_type(&lambda.return_type)?;
        let body = self.visit_as_block(&lambda.body, !lambda.return_type.is_void())?;
        let method = MethodDeclaration {
            modifiers: vec![Modifier::Public, Modifier::Static],
            return_type,
            name: name.to_string(),
            params,
            body,
        };

        if let Some(class) = self.class.as_deref_mut() {
            if class.member(name).is_some() {
                return Err(TranslateError::DuplicateFunction {
                    class: class.name.clone(),
                    name: name.to_string(),
                });
            }
            class.add_member(method.clone());
            debug!(function = name, class = %class.name, "extracted named lambda");
        }
        Ok(method.into())
    }

    fn parameters(&mut self, params: &[Variable]) -> TranslateResult<Vec<ParameterSyntax>> {
        let mut out = Vec::with_capacity(params.len());
        for param in params {
            let name = param_name(param)?.to_string();
            let ty = self.map_type(&param.ty)?;
            out.push(ParameterSyntax { name, ty });
        }
        Ok(out)
    }

    // ── Extensions ───────────────────────────────────────────────────

    fn visit_extension(&mut self, ext: &ExtensionExpr) -> TranslateResult<SyntaxFragment> {
        if let Some(registry) = self.extensions.clone() {
            if let Some(handler) = registry.get(ext.tag()) {
                trace!(tag = ext.tag(), "offering extension to handler");
                if let Some(fragment) = handler(ext, &mut *self)? {
                    return Ok(fragment);
                }
                trace!(tag = ext.tag(), "handler declined extension");
            }
        }
        match ext.reduce() {
            Some(reduced) => {
                trace!(tag = ext.tag(), "visiting extension reduction");
                self.visit(&reduced)
            }
            None => Err(TranslateError::UnsupportedNode {
                kind: format!("Extension({})", ext.tag()),
            }),
        }
    }
}

fn param_name(var: &Variable) -> TranslateResult<&str> {
    var.name()
        .ok_or(TranslateError::UnnamedParameter { id: var.id })
}

fn literal(value: &ConstantValue) -> TranslateResult<LiteralSyntax> {
    let lit = match value {
        ConstantValue::Null => LiteralSyntax::Null,
        ConstantValue::Boolean(v) => LiteralSyntax::Boolean(*v),
        ConstantValue::Char(c) => LiteralSyntax::Char(*c),
        ConstantValue::SByte(v) => LiteralSyntax::small_integer(*v),
        ConstantValue::Byte(v) => LiteralSyntax::small_integer(*v),
        ConstantValue::Int16(v) => LiteralSyntax::small_integer(*v),
        ConstantValue::UInt16(v) => LiteralSyntax::small_integer(*v),
        ConstantValue::Int32(v) => LiteralSyntax::int(*v),
        ConstantValue::UInt32(v) => LiteralSyntax::uint(*v),
        ConstantValue::Int64(v) => LiteralSyntax::long(*v),
        ConstantValue::UInt64(v) => LiteralSyntax::ulong(*v),
        ConstantValue::Single(v) => LiteralSyntax::float(*v),
        ConstantValue::Double(v) => LiteralSyntax::double(*v),
        ConstantValue::Decimal(d) => LiteralSyntax::decimal(d.to_string()),
        ConstantValue::String(s) => LiteralSyntax::String(s.clone()),
        ConstantValue::Opaque(_) => {
            return Err(TranslateError::UnsupportedConstant { kind: value.kind() })
        }
    };
    Ok(lit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exprsyn_tree::{MethodRef, NodeType};

    fn int_var(name: &str) -> Variable {
        Variable::new(name, TypeDescriptor::int())
    }

    fn render(expr: &Expr) -> String {
        SyntaxVisitor::new().translate(expr).unwrap().to_string()
    }

    #[test]
    fn binary_and_assignment_forms() {
        let x = int_var("x");
        assert_eq!(render(&Expr::add(Expr::param(&x), Expr::constant(2))), "x + 2");
        assert_eq!(
            render(&Expr::binary(NodeType::SubtractAssignChecked, Expr::param(&x), Expr::constant(1))),
            "x -= 1"
        );
        assert_eq!(
            render(&Expr::binary(NodeType::OrElse, Expr::constant(true), Expr::constant(false))),
            "true || false"
        );
    }

    #[test]
    fn unary_fixity() {
        let x = int_var("x");
        assert_eq!(render(&Expr::increment(Expr::param(&x))), "x++");
        assert_eq!(render(&Expr::unary(NodeType::PreIncrementAssign, Expr::param(&x))), "++x");
        assert_eq!(render(&Expr::unary(NodeType::Negate, Expr::param(&x))), "-x");
    }

    #[test]
    fn literal_kinds() {
        assert_eq!(render(&Expr::constant(42i64)), "42L");
        assert_eq!(render(&Expr::constant('c')), "'c'");
        assert_eq!(render(&Expr::constant_of(TypeDescriptor::object(), ConstantValue::Null)), "null");
        assert_eq!(
            render(&Expr::constant_of(
                TypeDescriptor::Primitive(exprsyn_tree::PrimitiveType::Decimal),
                ConstantValue::Decimal(exprsyn_tree::Decimal::new(12345, 2)),
            )),
            "123.45M"
        );
        assert_eq!(
            render(&Expr::constant_of(
                TypeDescriptor::Primitive(exprsyn_tree::PrimitiveType::Byte),
                ConstantValue::Byte(255),
            )),
            "255"
        );
    }

    #[test]
    fn block_tail_position() {
        let a = int_var("a");
        let exprs = vec![
            Expr::increment(Expr::param(&a)),
            Expr::increment(Expr::param(&a)),
            Expr::param(&a),
        ];
        let valued = Expr::block(TypeDescriptor::int(), vec![], exprs.clone());
        insta::assert_snapshot!(render(&valued), @r"
        {
            a++;
            a++;
            return a;
        }
        ");
        let effect = Expr::block(TypeDescriptor::void(), vec![], exprs);
        insta::assert_snapshot!(render(&effect), @r"
        {
            a++;
            a++;
            a;
        }
        ");
    }

    #[test]
    fn static_call_uses_declaring_type() {
        let s = Variable::new("s", TypeDescriptor::string());
        let intern = MethodRef::new(TypeDescriptor::string(), "Intern", TypeDescriptor::string());
        assert_eq!(render(&Expr::call_static(intern, vec![Expr::param(&s)])), "string.Intern(s)");
    }

    #[test]
    fn named_lambda_without_class_stays_inline() {
        let i = int_var("i");
        let lambda = Expr::lambda(Some("Id"), vec![i.clone()], Expr::param(&i));
        assert_eq!(render(&lambda), "new Func<int, int>((int i) => i)");
    }

    #[test]
    fn imports_accumulate_across_calls() {
        let mut visitor = SyntaxVisitor::new();
        visitor
            .translate(&Expr::default_of(TypeDescriptor::nominal("System", "Guid")))
            .unwrap();
        visitor
            .translate(&Expr::default_of(TypeDescriptor::nominal("System.Text", "StringBuilder")))
            .unwrap();
        let usings: Vec<_> = visitor.usings().iter().map(ToString::to_string).collect();
        assert_eq!(usings, ["using System;", "using System.Text;"]);
    }

    #[test]
    fn failed_translation_keeps_earlier_imports() {
        let mut visitor = SyntaxVisitor::new();
        visitor
            .translate(&Expr::default_of(TypeDescriptor::nominal("System", "Guid")))
            .unwrap();
        // The left operand's import is recorded before the right one fails.
        let opaque = ConstantValue::Opaque(TypeDescriptor::nominal("System", "Uri"));
        let bad = Expr::add(
            Expr::default_of(TypeDescriptor::nominal("System.Numerics", "BigInteger")),
            Expr::constant_of(TypeDescriptor::object(), opaque),
        );
        assert!(visitor.translate(&bad).is_err());
        assert_eq!(visitor.imports().len(), 1);
        assert!(visitor.imports().contains("System"));
    }
}
