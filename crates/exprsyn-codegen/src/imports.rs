//! The set of namespaces a translated tree needs in scope.

use std::collections::BTreeSet;

use serde::Serialize;

use exprsyn_syntax::{NameSyntax, UsingDirective};

/// Deduplicated namespace names, iterated in textual order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImportSet(BTreeSet<NameSyntax>);

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name`, returning whether it was new.
    pub fn insert(&mut self, name: NameSyntax) -> bool {
        self.0.insert(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n.as_str() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NameSyntax> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One `using` directive per namespace, sorted by name.
    pub fn usings(&self) -> Vec<UsingDirective> {
        self.0.iter().cloned().map(UsingDirective::new).collect()
    }
}

impl Extend<NameSyntax> for ImportSet {
    fn extend<I: IntoIterator<Item = NameSyntax>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<NameSyntax> for ImportSet {
    fn from_iter<I: IntoIterator<Item = NameSyntax>>(iter: I) -> Self {
        ImportSet(iter.into_iter().collect())
    }
}

impl IntoIterator for ImportSet {
    type Item = NameSyntax;
    type IntoIter = std::collections::btree_set::IntoIter<NameSyntax>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedups_and_sorts() {
        let mut set = ImportSet::new();
        assert!(set.insert(NameSyntax::new("System.Text")));
        assert!(set.insert(NameSyntax::new("System")));
        assert!(!set.insert(NameSyntax::new("System.Text")));
        assert_eq!(set.len(), 2);
        let names: Vec<_> = set.iter().map(NameSyntax::as_str).collect();
        assert_eq!(names, ["System", "System.Text"]);
        assert_eq!(set.usings()[1].to_string(), "using System.Text;");
    }

    #[test]
    fn serializes_as_sorted_list() {
        let set: ImportSet = ["b.c", "a"].into_iter().map(NameSyntax::new).collect();
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            serde_json::json!(["a", "b.c"])
        );
    }
}
