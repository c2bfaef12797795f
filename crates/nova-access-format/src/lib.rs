//! Line-oriented access transformer files.
//!
//! Each non-empty line holds one directive:
//!
//! ```text
//! # comment
//! public a/B                      # class
//! protected-f a/B field           # field
//! public a/B *                    # all fields
//! private a/B run(ILa/C;)V        # method
//! +f a/B *()                      # all methods
//! ```
//!
//! Access keywords are `public`, `protected`, `default` and `private`. A
//! finality change (`+f` adds `final`, `-f` removes it) may be attached to the
//! keyword or stand on its own. Class names may use `/` or `.` separators and
//! are stored in internal (`/`) form.

#![forbid(unsafe_code)]

mod config;
mod error;
mod reader;
mod writer;

pub use crate::config::{ClassNameStyle, FormatConfig, MalformedLinePolicy};
pub use crate::error::{FormatError, Result};
pub use crate::reader::{
    parse, parse_with, read, read_into, read_path, LineDiagnostic, ParsedTransforms,
};
pub use crate::writer::{to_string, to_string_with, write, write_path};
