use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nova_access::{
    AccessChange, AccessTransform, AccessTransformSet, MethodSignature, ModifierChange,
};

use crate::config::{FormatConfig, MalformedLinePolicy};
use crate::error::{FormatError, Result};

const WILDCARD: &str = "*";
const METHOD_WILDCARD: &str = "*()";

/// A line skipped under [`MalformedLinePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    /// 1-based line number.
    pub line: usize,
    pub message: String,
    pub text: String,
}

/// The outcome of a successful read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTransforms {
    pub set: AccessTransformSet,
    /// Lines that were skipped. Always empty under [`MalformedLinePolicy::Error`].
    pub diagnostics: Vec<LineDiagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Member {
    Class,
    AllFields,
    AllMethods,
    Field(String),
    Method(MethodSignature),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive {
    class_name: String,
    member: Member,
    transform: AccessTransform,
}

impl Directive {
    fn apply(self, set: &mut AccessTransformSet) {
        let class = set.get_or_create_class(&self.class_name);
        match self.member {
            Member::Class => {
                class.merge(self.transform);
            }
            Member::AllFields => {
                class.merge_all_fields(self.transform);
            }
            Member::AllMethods => {
                class.merge_all_methods(self.transform);
            }
            Member::Field(name) => {
                class.merge_field(&name, self.transform);
            }
            Member::Method(signature) => {
                class.merge_method(&signature, self.transform);
            }
        }
    }
}

/// Parses `text` with the default (strict) configuration.
pub fn parse(text: &str) -> Result<AccessTransformSet> {
    Ok(parse_with(text, &FormatConfig::default())?.set)
}

pub fn parse_with(text: &str, config: &FormatConfig) -> Result<ParsedTransforms> {
    read(text.as_bytes(), config)
}

/// Reads a whole source into a fresh set.
///
/// Under the strict policy the first malformed line aborts the read and no set
/// is returned.
pub fn read(reader: impl BufRead, config: &FormatConfig) -> Result<ParsedTransforms> {
    let mut parsed = ParsedTransforms::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        match parse_line(&line) {
            Ok(Some(directive)) => directive.apply(&mut parsed.set),
            Ok(None) => {}
            Err(message) => match config.malformed_lines {
                MalformedLinePolicy::Error => {
                    return Err(FormatError::Malformed {
                        line: number,
                        message,
                    })
                }
                MalformedLinePolicy::Skip => {
                    tracing::warn!(
                        line = number,
                        reason = %message,
                        "skipping malformed access transform line"
                    );
                    parsed.diagnostics.push(LineDiagnostic {
                        line: number,
                        message,
                        text: line,
                    });
                }
            },
        }
    }

    Ok(parsed)
}

pub fn read_path(path: impl AsRef<Path>, config: &FormatConfig) -> Result<ParsedTransforms> {
    let file = File::open(path)?;
    read(BufReader::new(file), config)
}

/// Reads `reader` and merges the result into `set`.
///
/// `set` is only touched once the whole source has been read, so a failed
/// read leaves it unchanged.
pub fn read_into(
    reader: impl BufRead,
    set: &mut AccessTransformSet,
    config: &FormatConfig,
) -> Result<Vec<LineDiagnostic>> {
    let parsed = read(reader, config)?;
    set.merge(&parsed.set);
    Ok(parsed.diagnostics)
}

fn parse_line(line: &str) -> std::result::Result<Option<Directive>, String> {
    let content = match line.find('#') {
        Some(comment) => &line[..comment],
        None => line,
    };
    let mut tokens = content.split_whitespace().peekable();
    let Some(first) = tokens.next() else {
        return Ok(None);
    };

    let Some((access, mut final_change)) = parse_modifiers(first) else {
        return Err(format!(
            "expected an access modifier or finality change, found `{first}`"
        ));
    };
    if final_change.is_none() {
        if let Some(change) = tokens.peek().and_then(|token| parse_finality(token)) {
            final_change = change;
            tokens.next();
        }
    }

    let transform = AccessTransform::new(access, final_change);
    let Some(class_name) = tokens.next() else {
        return Err("missing class name".to_string());
    };
    // The finality change always follows the access modifier.
    if parse_modifiers(class_name).is_some() {
        return Err(format!("unexpected modifier `{class_name}`"));
    }
    let class_name = class_name.replace('.', "/");

    let member = match tokens.next() {
        None => Member::Class,
        Some(WILDCARD) => Member::AllFields,
        Some(METHOD_WILDCARD) => Member::AllMethods,
        Some(token) if token.contains('(') => {
            Member::Method(MethodSignature::parse(token).map_err(|err| err.to_string())?)
        }
        Some(token) if token.contains(')') || parse_finality(token).is_some() => {
            return Err(format!("invalid member name `{token}`"));
        }
        Some(token) => Member::Field(token.to_string()),
    };

    if let Some(extra) = tokens.next() {
        return Err(format!("unexpected trailing token `{extra}`"));
    }

    Ok(Some(Directive {
        class_name,
        member,
        transform,
    }))
}

/// Parses the leading token: an access keyword with an optional attached
/// finality suffix, or a bare finality change.
fn parse_modifiers(token: &str) -> Option<(AccessChange, ModifierChange)> {
    if let Some(final_change) = parse_finality(token) {
        return Some((AccessChange::None, final_change));
    }

    let (keyword, final_change) = if let Some(keyword) = token.strip_suffix("+f") {
        (keyword, ModifierChange::Add)
    } else if let Some(keyword) = token.strip_suffix("-f") {
        (keyword, ModifierChange::Remove)
    } else {
        (token, ModifierChange::None)
    };

    let access = match keyword {
        "public" => AccessChange::Public,
        "protected" => AccessChange::Protected,
        "default" => AccessChange::PackagePrivate,
        "private" => AccessChange::Private,
        _ => return None,
    };
    Some((access, final_change))
}

fn parse_finality(token: &str) -> Option<ModifierChange> {
    match token {
        "+f" => Some(ModifierChange::Add),
        "-f" => Some(ModifierChange::Remove),
        _ => None,
    }
}
