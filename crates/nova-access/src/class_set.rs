use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::signature::MethodSignature;
use crate::transform::AccessTransform;

/// Access transforms for a single class.
///
/// Holds the class-level transform, the wildcard defaults for all fields and
/// all methods, and explicit per-member entries. Explicit maps never store
/// [`AccessTransform::EMPTY`]; member lookups fall back to the wildcard default
/// when no explicit entry exists.
///
/// Equality and hashing cover the class transform, both wildcards and both
/// member maps. The name and completion state are not part of the value.
#[derive(Debug, Clone)]
pub struct ClassTransformSet {
    name: String,
    class_transform: AccessTransform,
    all_fields: AccessTransform,
    all_methods: AccessTransform,
    fields: BTreeMap<String, AccessTransform>,
    methods: BTreeMap<MethodSignature, AccessTransform>,
    complete: bool,
}

impl ClassTransformSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_transform: AccessTransform::EMPTY,
            all_fields: AccessTransform::EMPTY,
            all_methods: AccessTransform::EMPTY,
            fields: BTreeMap::new(),
            methods: BTreeMap::new(),
            complete: false,
        }
    }

    /// Internal name of the class, e.g. `java/lang/Object`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn get(&self) -> AccessTransform {
        self.class_transform
    }

    pub fn merge(&mut self, transform: AccessTransform) -> AccessTransform {
        self.class_transform = self.class_transform.merge(transform);
        self.class_transform
    }

    pub fn replace(&mut self, transform: AccessTransform) -> AccessTransform {
        self.class_transform = transform;
        self.class_transform
    }

    #[must_use]
    pub fn all_fields(&self) -> AccessTransform {
        self.all_fields
    }

    pub fn merge_all_fields(&mut self, transform: AccessTransform) -> AccessTransform {
        self.all_fields = self.all_fields.merge(transform);
        self.all_fields
    }

    pub fn replace_all_fields(&mut self, transform: AccessTransform) -> AccessTransform {
        self.all_fields = transform;
        self.all_fields
    }

    #[must_use]
    pub fn all_methods(&self) -> AccessTransform {
        self.all_methods
    }

    pub fn merge_all_methods(&mut self, transform: AccessTransform) -> AccessTransform {
        self.all_methods = self.all_methods.merge(transform);
        self.all_methods
    }

    pub fn replace_all_methods(&mut self, transform: AccessTransform) -> AccessTransform {
        self.all_methods = transform;
        self.all_methods
    }

    /// Explicit field entries only; wildcard defaults are not included.
    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, AccessTransform> {
        &self.fields
    }

    /// The effective transform for `name`: its explicit entry, else [`Self::all_fields`].
    #[must_use]
    pub fn field(&self, name: &str) -> AccessTransform {
        self.fields.get(name).copied().unwrap_or(self.all_fields)
    }

    /// Joins `transform` into the explicit entry for `name` and returns the new value.
    ///
    /// An empty transform changes nothing and returns the stored entry, or
    /// `EMPTY` when there is none.
    pub fn merge_field(&mut self, name: &str, transform: AccessTransform) -> AccessTransform {
        merge_entry(&mut self.fields, name, transform)
    }

    /// Sets the explicit entry for `name`, returning the previous one.
    ///
    /// Replacing with an empty transform removes the entry.
    pub fn replace_field(
        &mut self,
        name: &str,
        transform: AccessTransform,
    ) -> Option<AccessTransform> {
        if transform.is_empty() {
            return self.fields.remove(name);
        }
        self.fields.insert(name.to_string(), transform)
    }

    /// Explicit method entries only; wildcard defaults are not included.
    #[must_use]
    pub fn methods(&self) -> &BTreeMap<MethodSignature, AccessTransform> {
        &self.methods
    }

    /// The effective transform for `signature`: its explicit entry, else [`Self::all_methods`].
    #[must_use]
    pub fn method(&self, signature: &MethodSignature) -> AccessTransform {
        self.methods
            .get(signature)
            .copied()
            .unwrap_or(self.all_methods)
    }

    /// Method counterpart of [`Self::merge_field`].
    pub fn merge_method(
        &mut self,
        signature: &MethodSignature,
        transform: AccessTransform,
    ) -> AccessTransform {
        merge_entry(&mut self.methods, signature, transform)
    }

    /// Method counterpart of [`Self::replace_field`].
    pub fn replace_method(
        &mut self,
        signature: &MethodSignature,
        transform: AccessTransform,
    ) -> Option<AccessTransform> {
        if transform.is_empty() {
            return self.methods.remove(signature);
        }
        self.methods.insert(signature.clone(), transform)
    }

    /// Absorbs every transform of `other` into `self` using join semantics.
    pub fn merge_class(&mut self, other: &ClassTransformSet) {
        self.merge(other.class_transform);
        self.merge_all_fields(other.all_fields);
        self.merge_all_methods(other.all_methods);

        for (name, transform) in &other.fields {
            self.merge_field(name, *transform);
        }
        for (signature, transform) in &other.methods {
            self.merge_method(signature, *transform);
        }
    }

    /// Whether inheritance completion has already run for this class.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub(crate) fn mark_complete(&mut self) {
        self.complete = true;
    }

    /// True when the class carries no transform at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_transform.is_empty()
            && self.all_fields.is_empty()
            && self.all_methods.is_empty()
            && self.fields.is_empty()
            && self.methods.is_empty()
    }
}

fn merge_entry<K, Q>(
    map: &mut BTreeMap<K, AccessTransform>,
    key: &Q,
    transform: AccessTransform,
) -> AccessTransform
where
    K: Ord + std::borrow::Borrow<Q>,
    Q: Ord + ToOwned<Owned = K> + ?Sized,
{
    if transform.is_empty() {
        return map.get(key).copied().unwrap_or(AccessTransform::EMPTY);
    }
    match map.get_mut(key) {
        Some(existing) => {
            *existing = existing.merge(transform);
            *existing
        }
        None => {
            map.insert(key.to_owned(), transform);
            transform
        }
    }
}

impl PartialEq for ClassTransformSet {
    fn eq(&self, other: &Self) -> bool {
        self.class_transform == other.class_transform
            && self.all_fields == other.all_fields
            && self.all_methods == other.all_methods
            && self.fields == other.fields
            && self.methods == other.methods
    }
}

impl Eq for ClassTransformSet {}

impl Hash for ClassTransformSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.class_transform.hash(state);
        self.all_fields.hash(state);
        self.all_methods.hash(state);
        self.fields.hash(state);
        self.methods.hash(state);
    }
}

impl fmt::Display for ClassTransformSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.class_transform.is_empty() {
            parts.push(self.class_transform.to_string());
        }
        if !self.all_fields.is_empty() {
            parts.push(format!("allFields={}", self.all_fields));
        }
        if !self.all_methods.is_empty() {
            parts.push(format!("allMethods={}", self.all_methods));
        }
        for (name, transform) in &self.fields {
            parts.push(format!("{name}={transform}"));
        }
        for (signature, transform) in &self.methods {
            parts.push(format!("{signature}={transform}"));
        }
        write!(f, "{}{{{}}}", self.name, parts.join(", "))
    }
}
