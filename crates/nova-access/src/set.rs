use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::class_set::ClassTransformSet;
use crate::inheritance::{ClassInfo, InheritanceProvider};
use crate::remap::{self, RenameService};

/// Access transforms for any number of classes, keyed by internal class name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AccessTransformSet {
    classes: BTreeMap<String, ClassTransformSet>,
}

impl AccessTransformSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn classes(&self) -> &BTreeMap<String, ClassTransformSet> {
        &self.classes
    }

    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassTransformSet> {
        self.classes.get(name)
    }

    pub fn class_mut(&mut self, name: &str) -> Option<&mut ClassTransformSet> {
        self.classes.get_mut(name)
    }

    pub fn get_or_create_class(&mut self, name: &str) -> &mut ClassTransformSet {
        match self.classes.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(ClassTransformSet::new(name)),
        }
    }

    pub fn remove_class(&mut self, name: &str) -> Option<ClassTransformSet> {
        self.classes.remove(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Merges every class of `other` into the matching class of `self`.
    pub fn merge(&mut self, other: &AccessTransformSet) {
        for (name, class) in &other.classes {
            self.get_or_create_class(name).merge_class(class);
        }
    }

    /// Returns a copy of this set with class and member names rewritten by `renames`.
    #[must_use]
    pub fn remap(&self, renames: &impl RenameService) -> AccessTransformSet {
        remap::remap(self, renames)
    }

    /// Propagates explicit method transforms from the parents of `info` to the
    /// methods of `info` that override them.
    ///
    /// Parents are completed first, depth-first, so transforms travel down the
    /// whole hierarchy. Each class is completed at most once; later calls are
    /// no-ops. Only explicit parent entries propagate, never wildcard defaults.
    pub fn complete<P>(&mut self, provider: &P, info: &P::Class)
    where
        P: InheritanceProvider,
    {
        let name = info.name();
        if self.class(name).is_some_and(ClassTransformSet::is_complete) {
            return;
        }

        let mut inherited = Vec::new();
        for parent in info.parents(provider) {
            self.complete(provider, &parent);

            let Some(parent_set) = self.class(parent.name()) else {
                continue;
            };
            inherited.extend(
                parent_set
                    .methods()
                    .iter()
                    .filter(|(signature, _)| info.overrides(signature, &parent))
                    .map(|(signature, transform)| (signature.clone(), *transform)),
            );
        }

        let class = self.get_or_create_class(name);
        for (signature, transform) in &inherited {
            class.merge_method(signature, *transform);
        }
        class.mark_complete();

        tracing::debug!(
            class = name,
            inherited = inherited.len(),
            "completed access transforms"
        );
    }

    /// Completes every class currently in the set that `provider` knows about.
    pub fn complete_all<P>(&mut self, provider: &P)
    where
        P: InheritanceProvider,
    {
        let names: Vec<String> = self.classes.keys().cloned().collect();
        for name in names {
            if let Some(info) = provider.provide(&name) {
                self.complete(provider, &info);
            }
        }
    }
}
