//! Access transforms for compiled JVM classes.
//!
//! An [`AccessTransformSet`] records requested visibility and `final` edits for
//! classes, fields and methods, keyed by internal class name. Sets can be merged
//! from several sources, completed against an [`InheritanceProvider`] so that
//! overriding methods pick up the transforms of the methods they override, and
//! remapped through a [`RenameService`] when the underlying names change.
//!
//! Reading and writing the text format lives in `nova-access-format`.

#![forbid(unsafe_code)]

mod change;
mod class_set;
mod descriptor;
mod error;
mod inheritance;
mod remap;
mod set;
mod signature;
mod transform;

pub use crate::change::{
    AccessChange, ModifierChange, ACC_FINAL, ACC_PRIVATE, ACC_PROTECTED, ACC_PUBLIC,
    ACC_VISIBILITY_MASK,
};
pub use crate::class_set::ClassTransformSet;
pub use crate::descriptor::{
    parse_field_descriptor, parse_method_descriptor, MAX_ARRAY_DIMENSIONS,
};
pub use crate::descriptor::{BaseType, FieldType, MethodDescriptor, ReturnType};
pub use crate::error::{Error, Result};
pub use crate::inheritance::{ClassHierarchy, ClassInfo, ClassNode, InheritanceProvider};
pub use crate::remap::{remap, MappingTable, NoRenames, RenameService};
pub use crate::set::AccessTransformSet;
pub use crate::signature::MethodSignature;
pub use crate::transform::AccessTransform;
