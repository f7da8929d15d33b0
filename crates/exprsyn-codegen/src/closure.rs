//! Free-variable analysis.
//!
//! Decides whether a lambda refers to variables bound outside itself. A
//! lambda with no free variables can be lifted into a standalone function;
//! one with captures must stay an inline closure value.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use exprsyn_tree::{Expr, ExtensionExpr, LambdaExpr, VarId, Variable};

/// Result of a free-variable walk.
///
/// `opaque` is set when the walk met an extension node it could not look
/// into (no reduction and no exposed children). Such a subtree may reference
/// anything, so it counts as capturing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    pub variables: IndexSet<Variable>,
    pub opaque: bool,
}

impl Captures {
    /// True when the subtree provably references nothing from outside.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && !self.opaque
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.variables.contains(var)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }
}

impl IntoIterator for Captures {
    type Item = Variable;
    type IntoIter = indexmap::set::IntoIter<Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.into_iter()
    }
}

/// Depth-first walker tracking the variables bound at the current point.
///
/// Every binder (lambda parameters, block locals) pushes one scope before
/// its children are visited and pops it afterwards. Analysis never fails, so
/// each push is matched by a pop on every path.
#[derive(Debug, Default)]
pub struct ClosureAnalyzer {
    scopes: Vec<FxHashSet<VarId>>,
    captures: Captures,
}

impl ClosureAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_scope<'v>(&mut self, vars: impl IntoIterator<Item = &'v Variable>) {
        self.scopes.push(vars.into_iter().map(|v| v.id).collect());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn is_bound(&self, id: VarId) -> bool {
        self.scopes.iter().rev().any(|scope| scope.contains(&id))
    }

    fn visit(&mut self, expr: &Expr) {
        match expr {
            Expr::Parameter(var) => {
                if !self.is_bound(var.id) {
                    self.captures.variables.insert(var.clone());
                }
            }
            Expr::Lambda(lambda) => {
                self.push_scope(&lambda.params);
                self.visit(&lambda.body);
                self.pop_scope();
            }
            Expr::Block(block) => {
                self.push_scope(&block.variables);
                for e in &block.expressions {
                    self.visit(e);
                }
                self.pop_scope();
            }
            Expr::Unary(u) => self.visit(&u.operand),
            Expr::Binary(b) => {
                self.visit(&b.left);
                self.visit(&b.right);
            }
            Expr::MethodCall(call) => {
                if let Some(receiver) = &call.receiver {
                    self.visit(receiver);
                }
                for arg in &call.args {
                    self.visit(arg);
                }
            }
            Expr::New(new) => {
                for arg in &new.args {
                    self.visit(arg);
                }
            }
            Expr::Extension(ext) => self.visit_extension(ext),
            Expr::Constant(_) | Expr::Default(_) => {}
        }
    }

    // The reduction carries the node's own binders, so it wins over the
    // flat child list.
    fn visit_extension(&mut self, ext: &ExtensionExpr) {
        if let Some(reduced) = ext.reduce() {
            self.visit(&reduced);
        } else if let Some(children) = ext.node().children() {
            for child in children {
                self.visit(child);
            }
        } else {
            self.captures.opaque = true;
        }
    }

    fn finish(self) -> Captures {
        self.captures
    }
}

/// Variables referenced under `root` but not bound inside it, in order of
/// first reference.
pub fn free_variables(root: &Expr) -> Captures {
    let mut analyzer = ClosureAnalyzer::new();
    analyzer.visit(root);
    analyzer.finish()
}

/// Variables `lambda` captures from its enclosing scopes.
pub fn captured_by(lambda: &LambdaExpr) -> Captures {
    let mut analyzer = ClosureAnalyzer::new();
    analyzer.push_scope(&lambda.params);
    analyzer.visit(&lambda.body);
    analyzer.pop_scope();
    analyzer.finish()
}
