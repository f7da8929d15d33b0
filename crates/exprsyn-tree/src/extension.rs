//! Caller-defined node kinds.
//!
//! An extension node carries a custom kind tag and, optionally, an
//! equivalent tree built only from the base node kinds. Translators offer the
//! node to a handler registered for its tag first and fall back to the
//! reduction otherwise.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::expr::Expr;
use crate::ty::TypeDescriptor;

/// Capability implemented by caller-defined nodes.
pub trait ExtensionNode: fmt::Debug + Send + Sync {
    /// Custom kind tag used to look up a handler.
    fn tag(&self) -> &str;

    /// Static type of the value the node produces.
    fn ty(&self) -> TypeDescriptor;

    /// Equivalent tree made of base node kinds, if the node has one.
    fn reduce(&self) -> Option<Expr>;

    /// Direct child expressions, for analyses that must see the whole tree
    /// of a node without a reduction. `None` means the node keeps them
    /// private.
    fn children(&self) -> Option<Vec<&Expr>> {
        None
    }

    /// Access to the concrete node for handlers that know its type.
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to an extension node inside an [`Expr`].
#[derive(Clone)]
pub struct ExtensionExpr {
    node: Arc<dyn ExtensionNode>,
}

impl ExtensionExpr {
    pub fn new(node: impl ExtensionNode + 'static) -> Self {
        ExtensionExpr {
            node: Arc::new(node),
        }
    }

    pub fn tag(&self) -> &str {
        self.node.tag()
    }

    pub fn ty(&self) -> TypeDescriptor {
        self.node.ty()
    }

    pub fn reduce(&self) -> Option<Expr> {
        self.node.reduce()
    }

    pub fn node(&self) -> &dyn ExtensionNode {
        self.node.as_ref()
    }

    /// The concrete node, if it is a `T`.
    pub fn downcast_ref<T: ExtensionNode + 'static>(&self) -> Option<&T> {
        self.node.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for ExtensionExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.node, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Variable;
    use crate::node_type::NodeType;

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

    #[test]
    fn extension_exposes_tag_type_and_reduction() {
        let x = Variable::new("x", TypeDescriptor::double());
        let expr = Expr::extension(Square(Expr::param(&x)));
        let Expr::Extension(ext) = &expr else {
            panic!("expected extension node");
        };
        assert_eq!(ext.tag(), "Square");
        assert_eq!(expr.ty(), TypeDescriptor::double());
        assert!(matches!(
            ext.reduce(),
            Some(Expr::Binary(ref b)) if b.op == NodeType::Multiply
        ));
        assert!(ext.downcast_ref::<Square>().is_some());
        assert!(ext.node().children().is_none());
    }
}
