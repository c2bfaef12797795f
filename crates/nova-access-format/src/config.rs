use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// What the reader does with a line it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Abort the read with [`crate::FormatError::Malformed`].
    #[default]
    Error,
    /// Log a warning, record a [`crate::LineDiagnostic`] and continue.
    Skip,
}

/// Separator used for class names in written output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassNameStyle {
    /// `java/lang/Object`
    #[default]
    Internal,
    /// `java.lang.Object`
    Binary,
}

impl ClassNameStyle {
    pub(crate) fn render(self, internal_name: &str) -> String {
        match self {
            ClassNameStyle::Internal => internal_name.to_string(),
            ClassNameStyle::Binary => internal_name.replace('/', "."),
        }
    }
}

/// Reader and writer settings.
///
/// ```toml
/// malformed-lines = "skip"
/// class-names = "binary"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FormatConfig {
    pub malformed_lines: MalformedLinePolicy,
    pub class_names: ClassNameStyle,
}

impl FormatConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    #[must_use]
    pub fn lenient() -> Self {
        Self {
            malformed_lines: MalformedLinePolicy::Skip,
            ..Self::default()
        }
    }
}
