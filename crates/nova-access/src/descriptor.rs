//! JVM field and method descriptors (JVMS §4.3).
//!
//! Only the structure needed to rewrite class references is kept: descriptors
//! are parsed, their object types mapped, and formatted back.

use std::fmt;

use crate::error::{Error, Result};

/// Maximum number of array dimensions a descriptor may carry (JVMS §4.3.2).
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
}

impl BaseType {
    fn code(self) -> char {
        match self {
            BaseType::Byte => 'B',
            BaseType::Char => 'C',
            BaseType::Double => 'D',
            BaseType::Float => 'F',
            BaseType::Int => 'I',
            BaseType::Long => 'J',
            BaseType::Short => 'S',
            BaseType::Boolean => 'Z',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Base(BaseType),
    /// Internal class name, e.g. `java/lang/String`.
    Object(String),
    Array(Box<FieldType>),
}

impl FieldType {
    /// Rewrites every class name referenced by this type.
    #[must_use]
    pub fn map_class_names(&self, f: &mut impl FnMut(&str) -> Option<String>) -> FieldType {
        let mut dimensions = 0;
        let mut ty = self;
        let element = loop {
            match ty {
                FieldType::Base(base) => break FieldType::Base(*base),
                FieldType::Object(name) => {
                    break FieldType::Object(f(name).unwrap_or_else(|| name.clone()))
                }
                FieldType::Array(component) => {
                    dimensions += 1;
                    ty = &**component;
                }
            }
        };
        wrap_in_arrays(element, dimensions)
    }
}

fn wrap_in_arrays(mut ty: FieldType, dimensions: usize) -> FieldType {
    for _ in 0..dimensions {
        ty = FieldType::Array(Box::new(ty));
    }
    ty
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ty = self;
        loop {
            match ty {
                FieldType::Base(base) => return write!(f, "{}", base.code()),
                FieldType::Object(name) => return write!(f, "L{name};"),
                FieldType::Array(component) => {
                    f.write_str("[")?;
                    ty = &**component;
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Void,
    Type(FieldType),
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Void => f.write_str("V"),
            ReturnType::Type(ty) => ty.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    pub params: Vec<FieldType>,
    pub return_type: ReturnType,
}

impl MethodDescriptor {
    /// Rewrites every class name referenced by the parameters and return type.
    ///
    /// `f` returns `None` for names that stay unchanged.
    #[must_use]
    pub fn map_class_names(&self, mut f: impl FnMut(&str) -> Option<String>) -> MethodDescriptor {
        let params = self
            .params
            .iter()
            .map(|param| param.map_class_names(&mut f))
            .collect();
        let return_type = match &self.return_type {
            ReturnType::Void => ReturnType::Void,
            ReturnType::Type(ty) => ReturnType::Type(ty.map_class_names(&mut f)),
        };
        MethodDescriptor {
            params,
            return_type,
        }
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for param in &self.params {
            param.fmt(f)?;
        }
        f.write_str(")")?;
        self.return_type.fmt(f)
    }
}

pub fn parse_field_descriptor(desc: &str) -> Result<FieldType> {
    let (ty, rest) = parse_field_type(desc)?;
    if !rest.is_empty() {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    }
    Ok(ty)
}

pub fn parse_method_descriptor(desc: &str) -> Result<MethodDescriptor> {
    let Some(mut rest) = desc.strip_prefix('(') else {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    };

    let mut params = Vec::new();
    loop {
        if let Some(after) = rest.strip_prefix(')') {
            rest = after;
            break;
        }
        if rest.is_empty() {
            return Err(Error::InvalidDescriptor(desc.to_string()));
        }
        let (param, after) =
            parse_field_type(rest).map_err(|_| Error::InvalidDescriptor(desc.to_string()))?;
        params.push(param);
        rest = after;
    }

    if rest.is_empty() {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    }

    let (return_type, rest) = if let Some(rest) = rest.strip_prefix('V') {
        (ReturnType::Void, rest)
    } else {
        let (ty, rest) =
            parse_field_type(rest).map_err(|_| Error::InvalidDescriptor(desc.to_string()))?;
        (ReturnType::Type(ty), rest)
    };

    if !rest.is_empty() {
        return Err(Error::InvalidDescriptor(desc.to_string()));
    }

    Ok(MethodDescriptor {
        params,
        return_type,
    })
}

fn parse_field_type(input: &str) -> Result<(FieldType, &str)> {
    let element = input.trim_start_matches('[');
    let dimensions = input.len() - element.len();
    if dimensions > MAX_ARRAY_DIMENSIONS {
        return Err(Error::InvalidDescriptor(input.to_string()));
    }
    let (ty, rest) =
        parse_element_type(element).map_err(|_| Error::InvalidDescriptor(input.to_string()))?;
    Ok((wrap_in_arrays(ty, dimensions), rest))
}

fn parse_element_type(input: &str) -> Result<(FieldType, &str)> {
    let Some(first) = input.chars().next() else {
        return Err(Error::InvalidDescriptor(input.to_string()));
    };
    let rest = &input[first.len_utf8()..];
    match first {
        'B' => Ok((FieldType::Base(BaseType::Byte), rest)),
        'C' => Ok((FieldType::Base(BaseType::Char), rest)),
        'D' => Ok((FieldType::Base(BaseType::Double), rest)),
        'F' => Ok((FieldType::Base(BaseType::Float), rest)),
        'I' => Ok((FieldType::Base(BaseType::Int), rest)),
        'J' => Ok((FieldType::Base(BaseType::Long), rest)),
        'S' => Ok((FieldType::Base(BaseType::Short), rest)),
        'Z' => Ok((FieldType::Base(BaseType::Boolean), rest)),
        'L' => match rest.find(';') {
            Some(end) if end > 0 => {
                Ok((FieldType::Object(rest[..end].to_string()), &rest[end + 1..]))
            }
            _ => Err(Error::InvalidDescriptor(input.to_string())),
        },
        _ => Err(Error::InvalidDescriptor(input.to_string())),
    }
}
