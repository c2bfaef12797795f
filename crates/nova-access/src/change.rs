use std::fmt;

/// `ACC_PUBLIC` access flag.
pub const ACC_PUBLIC: u16 = 0x0001;
/// `ACC_PRIVATE` access flag.
pub const ACC_PRIVATE: u16 = 0x0002;
/// `ACC_PROTECTED` access flag.
pub const ACC_PROTECTED: u16 = 0x0004;
/// `ACC_FINAL` access flag.
pub const ACC_FINAL: u16 = 0x0010;

/// All bits that encode visibility. Package-private is the absence of all of them.
pub const ACC_VISIBILITY_MASK: u16 = ACC_PUBLIC | ACC_PRIVATE | ACC_PROTECTED;

/// A requested visibility change.
///
/// Variants are declared in order of openness, so the derived `Ord` is the
/// lattice order: `None < Private < PackagePrivate < Protected < Public`.
/// `None` is not an access level; it means "leave visibility alone".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessChange {
    #[default]
    None,
    Private,
    PackagePrivate,
    Protected,
    Public,
}

impl AccessChange {
    pub const ALL: [AccessChange; 5] = [
        AccessChange::None,
        AccessChange::Private,
        AccessChange::PackagePrivate,
        AccessChange::Protected,
        AccessChange::Public,
    ];

    /// The access-flag bits for this level, or `None` for [`AccessChange::None`].
    #[must_use]
    pub fn modifier(self) -> Option<u16> {
        match self {
            AccessChange::None => None,
            AccessChange::Private => Some(ACC_PRIVATE),
            AccessChange::PackagePrivate => Some(0),
            AccessChange::Protected => Some(ACC_PROTECTED),
            AccessChange::Public => Some(ACC_PUBLIC),
        }
    }

    /// Joins two changes, keeping the more open one.
    #[must_use]
    pub fn merge(self, other: AccessChange) -> AccessChange {
        self.max(other)
    }

    /// Replaces the visibility bits of `flags`. `None` leaves them untouched.
    #[must_use]
    pub fn apply(self, flags: u16) -> u16 {
        match self.modifier() {
            Some(bits) => (flags & !ACC_VISIBILITY_MASK) | bits,
            None => flags,
        }
    }

    #[must_use]
    pub fn is_none(self) -> bool {
        self == AccessChange::None
    }
}

impl fmt::Display for AccessChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccessChange::None => "none",
            AccessChange::Private => "private",
            AccessChange::PackagePrivate => "package-private",
            AccessChange::Protected => "protected",
            AccessChange::Public => "public",
        })
    }
}

/// A requested change to the `final` attribute.
///
/// Merging is a join on `None < Add < Remove`: a conflict between adding and
/// removing `final` resolves to `Remove`, the more permissive outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModifierChange {
    #[default]
    None,
    Add,
    Remove,
}

impl ModifierChange {
    pub const ALL: [ModifierChange; 3] =
        [ModifierChange::None, ModifierChange::Add, ModifierChange::Remove];

    #[must_use]
    pub fn merge(self, other: ModifierChange) -> ModifierChange {
        self.max(other)
    }

    /// Adds or clears `bit` in `flags`.
    #[must_use]
    pub fn apply(self, flags: u16, bit: u16) -> u16 {
        match self {
            ModifierChange::None => flags,
            ModifierChange::Add => flags | bit,
            ModifierChange::Remove => flags & !bit,
        }
    }

    #[must_use]
    pub fn is_none(self) -> bool {
        self == ModifierChange::None
    }
}

impl fmt::Display for ModifierChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModifierChange::None => "none",
            ModifierChange::Add => "add",
            ModifierChange::Remove => "remove",
        })
    }
}
