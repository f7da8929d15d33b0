//! Containers: classes, `using` directives and whole compilation units.

use serde::Serialize;

use crate::kind::Modifier;
use crate::node::{MethodDeclaration, NameSyntax};

/// A class that collects extracted functions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDeclaration {
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub members: Vec<MethodDeclaration>,
}

impl ClassDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDeclaration {
            modifiers: Vec::new(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    pub fn add_member(&mut self, method: MethodDeclaration) {
        self.members.push(method);
    }

    pub fn member(&self, name: &str) -> Option<&MethodDeclaration> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// `using Name;`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UsingDirective {
    pub name: NameSyntax,
}

impl UsingDirective {
    pub fn new(name: NameSyntax) -> Self {
        UsingDirective { name }
    }
}

/// Everything a backend needs to build a loadable artifact: the imports, an
/// optional enclosing namespace and the class holding extracted functions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompilationUnit {
    pub usings: Vec<UsingDirective>,
    pub namespace: Option<NameSyntax>,
    pub class: ClassDeclaration,
}

impl CompilationUnit {
    pub fn new(
        usings: impl IntoIterator<Item = UsingDirective>,
        namespace: Option<NameSyntax>,
        class: ClassDeclaration,
    ) -> Self {
        CompilationUnit {
            usings: usings.into_iter().collect(),
            namespace,
            class,
        }
    }

    /// Fully qualified name of the unit's class, as a runtime loader would
    /// resolve it.
    pub fn qualified_class_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns.as_str(), self.class.name),
            None => self.class.name.clone(),
        }
    }
}
