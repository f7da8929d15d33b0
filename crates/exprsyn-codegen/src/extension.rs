//! Handlers for caller-defined node kinds.
//!
//! A registry maps an extension tag to a handler. The visitor offers every
//! extension node to the handler registered for its tag before falling back
//! to the node's reduction. A handler can translate the node itself (using
//! the visitor it is given for child nodes and type references) or decline
//! by returning `Ok(None)`.

use std::fmt;

use rustc_hash::FxHashMap;

use exprsyn_syntax::SyntaxFragment;
use exprsyn_tree::ExtensionExpr;

use crate::error::TranslateResult;
use crate::type_mapper::DefaultTypeMapper;
use crate::visitor::SyntaxVisitor;

pub type ExtensionHandler<M> = Box<
    dyn for<'v> Fn(&ExtensionExpr, &mut SyntaxVisitor<'v, M>) -> TranslateResult<Option<SyntaxFragment>>
        + Send
        + Sync,
>;

pub struct ExtensionRegistry<M = DefaultTypeMapper> {
    handlers: FxHashMap<String, ExtensionHandler<M>>,
}

impl<M> ExtensionRegistry<M> {
    pub fn new() -> Self {
        ExtensionRegistry {
            handlers: FxHashMap::default(),
        }
    }

    /// Register `handler` for `tag`, replacing any previous handler.
    pub fn register<F>(&mut self, tag: impl Into<String>, handler: F) -> &mut Self
    where
        F: for<'v> Fn(&ExtensionExpr, &mut SyntaxVisitor<'v, M>) -> TranslateResult<Option<SyntaxFragment>>
            + Send
            + Sync
            + 'static,
    {
        self.handlers.insert(tag.into(), Box::new(handler));
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<F>(mut self, tag: impl Into<String>, handler: F) -> Self
    where
        F: for<'v> Fn(&ExtensionExpr, &mut SyntaxVisitor<'v, M>) -> TranslateResult<Option<SyntaxFragment>>
            + Send
            + Sync
            + 'static,
    {
        self.register(tag, handler);
        self
    }

    pub fn get(&self, tag: &str) -> Option<&ExtensionHandler<M>> {
        self.handlers.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<M> Default for ExtensionRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for ExtensionRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.handlers.keys().collect();
        tags.sort();
        f.debug_struct("ExtensionRegistry")
            .field("tags", &tags)
            .finish()
    }
}
