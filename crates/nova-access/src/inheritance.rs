//! Class hierarchy facts consumed by inheritance completion.
//!
//! The access-transform model never computes inheritance itself. It asks an
//! [`InheritanceProvider`] for a class's direct parents and whether a method
//! overrides one declared by a parent. [`ClassHierarchy`] is an in-memory
//! provider built from pre-parsed class headers.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::change::{ACC_PRIVATE, ACC_PROTECTED, ACC_PUBLIC};
use crate::signature::MethodSignature;

/// `ACC_STATIC` access flag.
const ACC_STATIC: u16 = 0x0008;

/// Looks up inheritance information by internal class name.
///
/// Providers must describe an acyclic class graph; completion recurses through
/// parents without a cycle guard.
pub trait InheritanceProvider {
    type Class: ClassInfo;

    fn provide(&self, class_name: &str) -> Option<Self::Class>;
}

pub trait ClassInfo: Sized {
    fn name(&self) -> &str;

    /// Direct superclass and interfaces. Parents unknown to `provider` are omitted.
    fn parents<P>(&self, provider: &P) -> Vec<Self>
    where
        P: InheritanceProvider<Class = Self>;

    /// Whether this class's method `signature` overrides the one declared by `parent`.
    fn overrides(&self, signature: &MethodSignature, parent: &Self) -> bool;
}

/// A class header: name, parents and declared method access flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    pub name: String,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub methods: BTreeMap<MethodSignature, u16>,
}

impl ClassNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_class: None,
            interfaces: Vec::new(),
            methods: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_super_class(mut self, super_class: impl Into<String>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    #[must_use]
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    #[must_use]
    pub fn with_method(mut self, signature: MethodSignature, access_flags: u16) -> Self {
        self.methods.insert(signature, access_flags);
        self
    }

    /// Package part of the internal name; empty for the default package.
    #[must_use]
    pub fn package(&self) -> &str {
        self.name.rsplit_once('/').map_or("", |(package, _)| package)
    }

    fn can_be_overridden_from(&self, signature: &MethodSignature, child: &ClassNode) -> bool {
        let Some(&flags) = self.methods.get(signature) else {
            return false;
        };
        if signature.is_initializer() || flags & (ACC_PRIVATE | ACC_STATIC) != 0 {
            return false;
        }
        if flags & (ACC_PUBLIC | ACC_PROTECTED) != 0 {
            return true;
        }
        self.package() == child.package()
    }
}

impl ClassInfo for Arc<ClassNode> {
    fn name(&self) -> &str {
        &self.name
    }

    fn parents<P>(&self, provider: &P) -> Vec<Self>
    where
        P: InheritanceProvider<Class = Self>,
    {
        self.super_class
            .iter()
            .chain(self.interfaces.iter())
            .filter_map(|name| provider.provide(name))
            .collect()
    }

    fn overrides(&self, signature: &MethodSignature, parent: &Self) -> bool {
        match self.methods.get(signature) {
            Some(&flags) if flags & (ACC_STATIC | ACC_PRIVATE) == 0 => {
                parent.can_be_overridden_from(signature, self)
            }
            _ => false,
        }
    }
}

/// An in-memory [`InheritanceProvider`] keyed by internal class name.
#[derive(Debug, Clone, Default)]
pub struct ClassHierarchy {
    classes: BTreeMap<String, Arc<ClassNode>>,
}

impl ClassHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a class.
    pub fn insert(&mut self, class: ClassNode) {
        self.classes.insert(class.name.clone(), Arc::new(class));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClassNode> {
        self.classes.get(name).map(|class| class.as_ref())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl FromIterator<ClassNode> for ClassHierarchy {
    fn from_iter<I: IntoIterator<Item = ClassNode>>(iter: I) -> Self {
        let mut hierarchy = ClassHierarchy::new();
        for class in iter {
            hierarchy.insert(class);
        }
        hierarchy
    }
}

impl InheritanceProvider for ClassHierarchy {
    type Class = Arc<ClassNode>;

    fn provide(&self, class_name: &str) -> Option<Self::Class> {
        self.classes.get(class_name).cloned()
    }
}
