use std::fmt;

use crate::change::{AccessChange, ModifierChange, ACC_FINAL};

/// A visibility edit paired with a `final` edit.
///
/// `AccessTransform` is a plain `Copy` value. Every constructor normalizes
/// `(None, None)` to [`AccessTransform::EMPTY`], so emptiness is a structural
/// check and there is exactly one empty value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AccessTransform {
    access: AccessChange,
    final_change: ModifierChange,
}

impl AccessTransform {
    pub const EMPTY: AccessTransform = AccessTransform {
        access: AccessChange::None,
        final_change: ModifierChange::None,
    };

    pub const PUBLIC: AccessTransform = AccessTransform {
        access: AccessChange::Public,
        final_change: ModifierChange::None,
    };

    #[must_use]
    pub const fn new(access: AccessChange, final_change: ModifierChange) -> Self {
        Self {
            access,
            final_change,
        }
    }

    #[must_use]
    pub const fn of_access(access: AccessChange) -> Self {
        Self::new(access, ModifierChange::None)
    }

    #[must_use]
    pub const fn of_final(final_change: ModifierChange) -> Self {
        Self::new(AccessChange::None, final_change)
    }

    #[must_use]
    pub fn access(&self) -> AccessChange {
        self.access
    }

    #[must_use]
    pub fn final_change(&self) -> ModifierChange {
        self.final_change
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.access.is_none() && self.final_change.is_none()
    }

    /// Joins two transforms component-wise. `EMPTY` is the identity.
    #[must_use]
    pub fn merge(self, other: AccessTransform) -> AccessTransform {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        AccessTransform::new(
            self.access.merge(other.access),
            self.final_change.merge(other.final_change),
        )
    }

    /// Applies this transform to a raw access-flags word.
    #[must_use]
    pub fn apply(&self, flags: u16) -> u16 {
        self.final_change.apply(self.access.apply(flags), ACC_FINAL)
    }
}

impl From<AccessChange> for AccessTransform {
    fn from(access: AccessChange) -> Self {
        AccessTransform::of_access(access)
    }
}

impl From<ModifierChange> for AccessTransform {
    fn from(final_change: ModifierChange) -> Self {
        AccessTransform::of_final(final_change)
    }
}

impl fmt::Display for AccessTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("AccessTransform.EMPTY");
        }

        f.write_str("AccessTransform{")?;
        let mut first = true;
        if !self.access.is_none() {
            write!(f, "access={}", self.access)?;
            first = false;
        }
        if !self.final_change.is_none() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "final={}", self.final_change)?;
        }
        f.write_str("}")
    }
}
