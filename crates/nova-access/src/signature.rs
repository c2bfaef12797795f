use std::fmt;
use std::str::FromStr;

use crate::descriptor::{parse_method_descriptor, MethodDescriptor};
use crate::error::{Error, Result};

/// A method identity within a class: name plus erased descriptor.
///
/// Ordered by name, then descriptor, which keeps serialized output stable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodSignature {
    name: String,
    descriptor: String,
}

impl MethodSignature {
    /// Builds a signature without validating the descriptor.
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Parses `name(params)return`, e.g. `run()V` or `<init>(I)V`.
    pub fn parse(text: &str) -> Result<Self> {
        let Some(open) = text.find('(') else {
            return Err(Error::InvalidSignature(text.to_string()));
        };
        let (name, descriptor) = text.split_at(open);
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(Error::InvalidSignature(text.to_string()));
        }
        parse_method_descriptor(descriptor)?;
        Ok(Self::new(name, descriptor))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn parsed_descriptor(&self) -> Result<MethodDescriptor> {
        parse_method_descriptor(&self.descriptor)
    }

    /// Constructors and static initializers never take part in overriding.
    #[must_use]
    pub fn is_initializer(&self) -> bool {
        self.name == "<init>" || self.name == "<clinit>"
    }
}

impl FromStr for MethodSignature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MethodSignature::parse(s)
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.descriptor)
    }
}
