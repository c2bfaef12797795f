use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nova_access::{AccessChange, AccessTransform, AccessTransformSet, ModifierChange};

use crate::config::FormatConfig;
use crate::error::Result;

/// Writes `set` with the default configuration.
#[must_use]
pub fn to_string(set: &AccessTransformSet) -> String {
    to_string_with(set, &FormatConfig::default())
}

#[must_use]
pub fn to_string_with(set: &AccessTransformSet, config: &FormatConfig) -> String {
    let mut out = String::new();
    for line in lines(set, config) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Writes one line per non-empty transform, grouped by class.
///
/// Within a class the order is: class, all fields, fields, all methods, methods.
pub fn write(writer: impl Write, set: &AccessTransformSet, config: &FormatConfig) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    for line in lines(set, config) {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_path(
    path: impl AsRef<Path>,
    set: &AccessTransformSet,
    config: &FormatConfig,
) -> Result<()> {
    let file = File::create(path)?;
    write(file, set, config)
}

fn lines<'a>(
    set: &'a AccessTransformSet,
    config: &'a FormatConfig,
) -> impl Iterator<Item = String> + 'a {
    set.classes()
        .iter()
        .filter(|(_, class)| !class.is_empty())
        .flat_map(move |(name, class)| {
            let class_name = config.class_names.render(name);
            let mut out = Vec::new();

            push_line(&mut out, class.get(), &class_name, None);
            push_line(&mut out, class.all_fields(), &class_name, Some("*"));
            for (field, transform) in class.fields() {
                push_line(&mut out, *transform, &class_name, Some(field.as_str()));
            }
            push_line(&mut out, class.all_methods(), &class_name, Some("*()"));
            for (signature, transform) in class.methods() {
                let member = signature.to_string();
                push_line(&mut out, *transform, &class_name, Some(member.as_str()));
            }
            out
        })
}

fn push_line(
    out: &mut Vec<String>,
    transform: AccessTransform,
    class_name: &str,
    member: Option<&str>,
) {
    if transform.is_empty() {
        return;
    }

    let mut line = String::new();
    line.push_str(access_keyword(transform.access()));
    line.push_str(match transform.final_change() {
        ModifierChange::None => "",
        ModifierChange::Add => "+f",
        ModifierChange::Remove => "-f",
    });
    line.push(' ');
    line.push_str(class_name);
    if let Some(member) = member {
        line.push(' ');
        line.push_str(member);
    }
    out.push(line);
}

fn access_keyword(access: AccessChange) -> &'static str {
    match access {
        AccessChange::None => "",
        AccessChange::Private => "private",
        AccessChange::PackagePrivate => "default",
        AccessChange::Protected => "protected",
        AccessChange::Public => "public",
    }
}
