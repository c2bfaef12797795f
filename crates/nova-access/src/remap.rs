//! Rewriting access transform sets through a renaming of the underlying classes.

use std::collections::BTreeMap;

use crate::class_set::ClassTransformSet;
use crate::descriptor::parse_method_descriptor;
use crate::set::AccessTransformSet;
use crate::signature::MethodSignature;

/// Renamed identities for classes and their members.
///
/// Every lookup is keyed by the *original* names. `None` means no rename is
/// known and the original identity is kept.
pub trait RenameService {
    fn class_rename(&self, class_name: &str) -> Option<String>;

    fn field_rename(&self, class_name: &str, field_name: &str) -> Option<String>;

    /// The full renamed signature, including a rewritten descriptor.
    fn method_rename(&self, class_name: &str, signature: &MethodSignature)
        -> Option<MethodSignature>;

    /// Rewrites the class names referenced by a method descriptor.
    ///
    /// Descriptors that fail to parse are returned unchanged.
    fn deobfuscate_descriptor(&self, descriptor: &str) -> String {
        match parse_method_descriptor(descriptor) {
            Ok(parsed) => parsed
                .map_class_names(|name| self.class_rename(name))
                .to_string(),
            Err(_) => descriptor.to_string(),
        }
    }
}

/// A [`RenameService`] that knows no renames.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRenames;

impl RenameService for NoRenames {
    fn class_rename(&self, _class_name: &str) -> Option<String> {
        None
    }

    fn field_rename(&self, _class_name: &str, _field_name: &str) -> Option<String> {
        None
    }

    fn method_rename(
        &self,
        _class_name: &str,
        _signature: &MethodSignature,
    ) -> Option<MethodSignature> {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ClassMapping {
    renamed: Option<String>,
    fields: BTreeMap<String, String>,
    methods: BTreeMap<MethodSignature, String>,
}

/// An in-memory [`RenameService`] built from explicit class, field and method renames.
///
/// Inner classes without their own entry follow their outer class:
/// with `a -> pkg/Outer`, `a$1` resolves to `pkg/Outer$1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    classes: BTreeMap<String, ClassMapping>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, original: &str, renamed: impl Into<String>) -> &mut Self {
        self.entry(original).renamed = Some(renamed.into());
        self
    }

    pub fn add_field(
        &mut self,
        class_name: &str,
        original: &str,
        renamed: impl Into<String>,
    ) -> &mut Self {
        self.entry(class_name)
            .fields
            .insert(original.to_string(), renamed.into());
        self
    }

    /// Renames a method. Its descriptor is rewritten through the class renames.
    pub fn add_method(
        &mut self,
        class_name: &str,
        original: MethodSignature,
        renamed_name: impl Into<String>,
    ) -> &mut Self {
        self.entry(class_name)
            .methods
            .insert(original, renamed_name.into());
        self
    }

    fn entry(&mut self, class_name: &str) -> &mut ClassMapping {
        self.classes.entry(class_name.to_string()).or_default()
    }
}

impl RenameService for MappingTable {
    fn class_rename(&self, class_name: &str) -> Option<String> {
        if let Some(renamed) = self
            .classes
            .get(class_name)
            .and_then(|mapping| mapping.renamed.clone())
        {
            return Some(renamed);
        }

        let (outer, inner) = class_name.rsplit_once('$')?;
        let outer = self.class_rename(outer)?;
        Some(format!("{outer}${inner}"))
    }

    fn field_rename(&self, class_name: &str, field_name: &str) -> Option<String> {
        self.classes.get(class_name)?.fields.get(field_name).cloned()
    }

    fn method_rename(
        &self,
        class_name: &str,
        signature: &MethodSignature,
    ) -> Option<MethodSignature> {
        let name = self.classes.get(class_name)?.methods.get(signature)?;
        Some(MethodSignature::new(
            name.clone(),
            self.deobfuscate_descriptor(signature.descriptor()),
        ))
    }
}

/// Produces a renamed copy of `set`; `set` itself is left untouched.
///
/// Classes and fields without a known rename keep their names. Methods without
/// a known rename keep their name but still get their descriptor rewritten.
/// Entries that collide after renaming are merged, never overwritten.
pub fn remap(set: &AccessTransformSet, renames: &impl RenameService) -> AccessTransformSet {
    let mut remapped = AccessTransformSet::new();
    let mut renamed_classes = 0usize;

    for (class_name, class) in set.classes() {
        let target_name = match renames.class_rename(class_name) {
            Some(renamed) => {
                renamed_classes += 1;
                renamed
            }
            None => class_name.clone(),
        };
        remap_class(
            class_name,
            class,
            remapped.get_or_create_class(&target_name),
            renames,
        );
    }

    tracing::debug!(
        classes = set.len(),
        renamed_classes,
        "remapped access transforms"
    );
    remapped
}

fn remap_class(
    class_name: &str,
    class: &ClassTransformSet,
    remapped: &mut ClassTransformSet,
    renames: &impl RenameService,
) {
    remapped.merge(class.get());
    remapped.merge_all_fields(class.all_fields());
    remapped.merge_all_methods(class.all_methods());

    for (name, transform) in class.fields() {
        let target = renames
            .field_rename(class_name, name)
            .unwrap_or_else(|| name.clone());
        remapped.merge_field(&target, *transform);
    }

    for (signature, transform) in class.methods() {
        let target = renames
            .method_rename(class_name, signature)
            .unwrap_or_else(|| {
                MethodSignature::new(
                    signature.name(),
                    renames.deobfuscate_descriptor(signature.descriptor()),
                )
            });
        remapped.merge_method(&target, *transform);
    }
}
