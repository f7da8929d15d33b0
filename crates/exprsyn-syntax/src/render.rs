//! Text renderer for syntax trees.
//!
//! Produces canonical, whitespace-normalized source text: one statement per
//! line, braces on their own lines, single spaces around binary operators.
//! Parentheses are inserted only where operator precedence requires them,
//! since syntax trees built from expression trees carry no explicit grouping.

use std::fmt;

use crate::fragment::SyntaxFragment;
use crate::kind::precedence::{ASSIGNMENT, PRIMARY, UNARY};
use crate::node::{
    BlockSyntax, ExprSyntax, LambdaBody, LiteralSyntax, MethodDeclaration, NameSyntax,
    ParameterSyntax, StmtSyntax, TypeSyntax,
};
use crate::unit::{ClassDeclaration, CompilationUnit, UsingDirective};

/// Configuration for rendered output.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Number of spaces per indentation level. Default: 4.
    pub indent_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { indent_size: 4 }
    }
}

pub fn render_fragment(fragment: &SyntaxFragment, config: &RenderConfig) -> String {
    let mut p = Printer::new(config);
    match fragment {
        SyntaxFragment::Expression(expr) => p.expr(expr, 0),
        SyntaxFragment::Statement(stmt) => p.stmt(stmt),
        SyntaxFragment::Block(block) => p.block(block),
        SyntaxFragment::Declaration(method) => p.method(method),
    }
    p.out
}

pub fn render_class(class: &ClassDeclaration, config: &RenderConfig) -> String {
    let mut p = Printer::new(config);
    p.class(class);
    p.out
}

pub fn render_unit(unit: &CompilationUnit, config: &RenderConfig) -> String {
    let mut p = Printer::new(config);
    p.unit(unit);
    p.out
}

// ── Printer ──────────────────────────────────────────────────────────

struct Printer<'c> {
    config: &'c RenderConfig,
    out: String,
    level: usize,
}

impl<'c> Printer<'c> {
    fn new(config: &'c RenderConfig) -> Self {
        Printer {
            config,
            out: String::new(),
            level: 0,
        }
    }

    fn text(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        let width = self.level * self.config.indent_size;
        self.out.extend(std::iter::repeat(' ').take(width));
    }

    fn ty(&mut self, ty: &TypeSyntax) {
        match ty {
            TypeSyntax::Predefined(p) => self.text(p.keyword()),
            TypeSyntax::Nullable(inner) => {
                self.ty(inner);
                self.text("?");
            }
            TypeSyntax::Pointer(inner) => {
                self.ty(inner);
                self.text("*");
            }
            TypeSyntax::Identifier(name) => self.text(name),
            TypeSyntax::Generic { name, args } => {
                self.text(name);
                self.text("<");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        self.text(", ");
                    }
                    self.ty(arg);
                }
                self.text(">");
            }
        }
    }

    // ── Expressions ──────────────────────────────────────────────────

    /// Render `expr`, parenthesized if it binds looser than `min`.
    fn expr(&mut self, expr: &ExprSyntax, min: u8) {
        let parens = expr_precedence(expr) < min;
        if parens {
            self.text("(");
        }
        self.expr_inner(expr);
        if parens {
            self.text(")");
        }
    }

    fn expr_inner(&mut self, expr: &ExprSyntax) {
        match expr {
            ExprSyntax::Literal(lit) => self.literal(lit),
            ExprSyntax::Identifier(name) => self.text(name),
            ExprSyntax::Type(ty) => self.ty(ty),
            ExprSyntax::MemberAccess { target, member } => {
                self.expr(target, PRIMARY);
                self.text(".");
                self.text(member);
            }
            ExprSyntax::Invocation { callee, args } => {
                self.expr(callee, PRIMARY);
                self.args(args);
            }
            ExprSyntax::ObjectCreation { ty, args } => {
                self.text("new ");
                self.ty(ty);
                self.args(args);
            }
            ExprSyntax::Default(ty) => {
                self.text("default(");
                self.ty(ty);
                self.text(")");
            }
            ExprSyntax::Binary { op, left, right } => {
                let prec = op.precedence();
                let (left_min, right_min) = if op.is_right_associative() {
                    (prec + 1, prec)
                } else {
                    (prec, prec + 1)
                };
                self.expr(left, left_min);
                self.text(" ");
                self.text(op.token());
                self.text(" ");
                self.expr(right, right_min);
            }
            ExprSyntax::Assignment { op, left, right } => {
                self.expr(left, UNARY);
                self.text(" ");
                self.text(op.token());
                self.text(" ");
                self.expr(right, ASSIGNMENT);
            }
            ExprSyntax::PrefixUnary { op, operand } => {
                self.text(op.token());
                // `- -x` must not collapse into `--x`.
                if expr_precedence(operand) == UNARY {
                    self.text("(");
                    self.expr_inner(operand);
                    self.text(")");
                } else {
                    self.expr(operand, UNARY);
                }
            }
            ExprSyntax::PostfixUnary { op, operand } => {
                self.expr(operand, PRIMARY);
                self.text(op.token());
            }
            ExprSyntax::Lambda { params, body } => {
                self.params(params);
                self.text(" =>");
                match body {
                    LambdaBody::Expression(expr) => {
                        self.text(" ");
                        self.expr(expr, ASSIGNMENT);
                    }
                    LambdaBody::Block(block) => {
                        self.newline();
                        self.block(block);
                    }
                }
            }
        }
    }

    fn args(&mut self, args: &[ExprSyntax]) {
        self.text("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.text(", ");
            }
            self.expr(arg, 0);
        }
        self.text(")");
    }

    fn params(&mut self, params: &[ParameterSyntax]) {
        self.text("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.text(", ");
            }
            self.ty(&param.ty);
            self.text(" ");
            self.text(&param.name);
        }
        self.text(")");
    }

    fn literal(&mut self, lit: &LiteralSyntax) {
        match lit {
            LiteralSyntax::Null => self.text("null"),
            LiteralSyntax::Boolean(true) => self.text("true"),
            LiteralSyntax::Boolean(false) => self.text("false"),
            LiteralSyntax::Char(c) => {
                self.out.push('\'');
                push_escaped(&mut self.out, *c, '\'');
                self.out.push('\'');
            }
            LiteralSyntax::String(s) => {
                self.out.push('"');
                for c in s.chars() {
                    push_escaped(&mut self.out, c, '"');
                }
                self.out.push('"');
            }
            LiteralSyntax::Numeric(text) => self.text(text),
        }
    }

    // ── Statements ───────────────────────────────────────────────────

    fn stmt(&mut self, stmt: &StmtSyntax) {
        match stmt {
            StmtSyntax::Expression(expr) => {
                self.expr(expr, 0);
                self.text(";");
            }
            StmtSyntax::Return(Some(expr)) => {
                self.text("return ");
                self.expr(expr, 0);
                self.text(";");
            }
            StmtSyntax::Return(None) => self.text("return;"),
            StmtSyntax::LocalDeclaration(decl) => {
                self.ty(&decl.ty);
                self.text(" ");
                self.text(&decl.name);
                self.text(";");
            }
            StmtSyntax::Block(block) => self.block(block),
            StmtSyntax::For(for_stmt) => {
                self.text("for (");
                for (i, init) in for_stmt.initializers.iter().enumerate() {
                    if i > 0 {
                        self.text(", ");
                    }
                    self.expr(init, 0);
                }
                self.text(";");
                if let Some(cond) = &for_stmt.condition {
                    self.text(" ");
                    self.expr(cond, 0);
                }
                self.text(";");
                for (i, inc) in for_stmt.incrementors.iter().enumerate() {
                    self.text(if i == 0 { " " } else { ", " });
                    self.expr(inc, 0);
                }
                self.text(")");
                self.embedded(&for_stmt.body);
            }
        }
    }

    /// The body of a control statement: blocks start on the next line at the
    /// same level, anything else is indented one level.
    fn embedded(&mut self, body: &StmtSyntax) {
        match body {
            StmtSyntax::Block(block) => {
                self.newline();
                self.block(block);
            }
            other => {
                self.level += 1;
                self.newline();
                self.stmt(other);
                self.level -= 1;
            }
        }
    }

    fn block(&mut self, block: &BlockSyntax) {
        self.text("{");
        self.level += 1;
        for stmt in &block.statements {
            self.newline();
            self.stmt(stmt);
        }
        self.level -= 1;
        self.newline();
        self.text("}");
    }

    // ── Declarations ─────────────────────────────────────────────────

    fn method(&mut self, method: &MethodDeclaration) {
        for modifier in &method.modifiers {
            self.text(modifier.keyword());
            self.text(" ");
        }
        self.ty(&method.return_type);
        self.text(" ");
        self.text(&method.name);
        self.params(&method.params);
        self.newline();
        self.block(&method.body);
    }

    fn class(&mut self, class: &ClassDeclaration) {
        for modifier in &class.modifiers {
            self.text(modifier.keyword());
            self.text(" ");
        }
        self.text("class ");
        self.text(&class.name);
        self.newline();
        self.text("{");
        self.level += 1;
        for (i, member) in class.members.iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.newline();
            self.method(member);
        }
        self.level -= 1;
        self.newline();
        self.text("}");
    }

    fn unit(&mut self, unit: &CompilationUnit) {
        for using in &unit.usings {
            self.text("using ");
            self.text(using.name.as_str());
            self.text(";\n");
        }
        if !unit.usings.is_empty() {
            self.out.push('\n');
        }
        match &unit.namespace {
            Some(ns) => {
                self.text("namespace ");
                self.text(ns.as_str());
                self.newline();
                self.text("{");
                self.level += 1;
                self.newline();
                self.class(&unit.class);
                self.level -= 1;
                self.newline();
                self.text("}");
            }
            None => self.class(&unit.class),
        }
    }
}

fn expr_precedence(expr: &ExprSyntax) -> u8 {
    match expr {
        ExprSyntax::Binary { op, .. } => op.precedence(),
        ExprSyntax::Assignment { .. } | ExprSyntax::Lambda { .. } => ASSIGNMENT,
        ExprSyntax::PrefixUnary { .. } => UNARY,
        ExprSyntax::Literal(LiteralSyntax::Numeric(text)) if text.starts_with('-') => UNARY,
        _ => PRIMARY,
    }
}

fn push_escaped(out: &mut String, c: char, quote: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\0' => out.push_str("\\0"),
        '\u{7}' => out.push_str("\\a"),
        '\u{8}' => out.push_str("\\b"),
        '\u{c}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{b}' => out.push_str("\\v"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
            out.push_str(&format!("\\u{:04X}", c as u32))
        }
        c => out.push(c),
    }
}

// ── Display ──────────────────────────────────────────────────────────

impl fmt::Display for SyntaxFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_fragment(self, &RenderConfig::default()))
    }
}

impl fmt::Display for ExprSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = RenderConfig::default();
        let mut p = Printer::new(&config);
        p.expr(self, 0);
        f.write_str(&p.out)
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = RenderConfig::default();
        let mut p = Printer::new(&config);
        p.ty(self);
        f.write_str(&p.out)
    }
}

impl fmt::Display for StmtSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = RenderConfig::default();
        let mut p = Printer::new(&config);
        p.stmt(self);
        f.write_str(&p.out)
    }
}

impl fmt::Display for MethodDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = RenderConfig::default();
        let mut p = Printer::new(&config);
        p.method(self);
        f.write_str(&p.out)
    }
}

impl fmt::Display for ClassDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_class(self, &RenderConfig::default()))
    }
}

impl fmt::Display for CompilationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_unit(self, &RenderConfig::default()))
    }
}

impl fmt::Display for NameSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UsingDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "using {};", self.name)
    }
}
