//! Structured (TOML-style) encoder for [`Record`] values.
//!
//! Every field is rendered in declaration order with its comment line above
//! it and a blank line after it. Collections of records become `[[key]]` or
//! `[key.entry]` sections indented one tab deeper. Empty collections and absent
//! optional values are not omitted: they are written as commented-out
//! placeholders so that a hand editor can see the expected shape.
//!
//! Output is a pure function of the field values; map entries are sorted by key.

use std::{
    fmt,
    io::{self, Write},
};

use crate::{
    data::format_rfc3339,
    error::{EncodeError, Result},
    keys,
    record::{EmptyRecord, FieldValue, Record, Scalar, ScalarKind, reflect},
};

/// Added to the prefix for each level of nesting.
pub const INDENT: &str = "\t";
/// Added to the prefix of placeholder stanzas for empty collections.
pub const PLACEHOLDER: &str = "#\t";

const BLOCK_INDENT: &str = "    ";

/// Writes `record` to `writer`, each line starting with `prefix`.
pub fn encode<W: Write>(record: &dyn Record, writer: &mut W, prefix: &str) -> Result<()> {
    encode_record(writer, record, prefix)
}

pub fn encode_string(record: &dyn Record) -> Result<String> {
    encode_string_prefix(record, "")
}

pub fn encode_string_prefix(record: &dyn Record, prefix: &str) -> Result<String> {
    let mut buffer = Vec::new();
    encode(record, &mut buffer, prefix)?;
    String::from_utf8(buffer)
        .map_err(|err| EncodeError::Io(io::Error::new(io::ErrorKind::InvalidData, err)).into())
}

fn encode_record(writer: &mut dyn Write, record: &dyn Record, prefix: &str) -> Result<()> {
    let nested = format!("{prefix}{INDENT}");
    for field in reflect(record)? {
        let key = field.key;
        if let Some(comment) = field.comment {
            line(writer, format_args!("{prefix}# {comment}"))?;
        }
        match field.value {
            FieldValue::Scalar(value) => write_pair(writer, prefix, &key, &value)?,
            FieldValue::Optional { kind, value: None } => {
                line(writer, format_args!("{prefix}#{key} = {}", kind.type_hint()))?;
            }
            FieldValue::Optional {
                value: Some(value), ..
            } => write_pair(writer, prefix, &key, &value)?,
            FieldValue::List { items, .. } => {
                let rendered = render_list(&key, &items)?;
                let prefix = if items.is_empty() {
                    format!("{prefix}#")
                } else {
                    prefix.to_string()
                };
                write_lines(writer, &prefix, &format!("{key} = {rendered}"))?;
            }
            FieldValue::Table(value) => {
                line(writer, format_args!("{prefix}[{key}]"))?;
                encode_record(writer, value, &nested)?;
            }
            FieldValue::Array { items, empty } => {
                if items.is_empty() {
                    line(writer, format_args!("{prefix}#[[{key}]]"))?;
                    encode_placeholder(writer, empty, prefix)?;
                }
                for item in items {
                    line(writer, format_args!("{prefix}[[{key}]]"))?;
                    encode_record(writer, item, &nested)?;
                }
            }
            FieldValue::Map { entries, empty } => {
                if entries.is_empty() {
                    line(writer, format_args!("{prefix}#[{key}.value]"))?;
                    encode_placeholder(writer, empty, prefix)?;
                }
                for (entry, value) in keys::sorted_entries(entries) {
                    let entry = keys::section_key(&entry);
                    line(writer, format_args!("{prefix}[{key}.{entry}]"))?;
                    encode_record(writer, value, &nested)?;
                }
            }
        }
        line(writer, format_args!("{prefix}"))?;
    }
    Ok(())
}

fn encode_placeholder(writer: &mut dyn Write, empty: EmptyRecord, prefix: &str) -> Result<()> {
    let template = empty();
    encode_record(writer, template.as_ref(), &format!("{prefix}{PLACEHOLDER}"))
}

fn write_pair(writer: &mut dyn Write, prefix: &str, key: &str, value: &Scalar) -> Result<()> {
    let rendered = render_scalar(key, value)?;
    write_lines(writer, prefix, &format!("{key} = {rendered}"))
}

fn write_lines(writer: &mut dyn Write, prefix: &str, text: &str) -> Result<()> {
    for text_line in text.lines() {
        line(writer, format_args!("{prefix}{text_line}"))?;
    }
    Ok(())
}

fn line(writer: &mut dyn Write, args: fmt::Arguments<'_>) -> std::result::Result<(), EncodeError> {
    writer.write_fmt(args)?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn render_list(key: &str, items: &[Scalar]) -> std::result::Result<String, EncodeError> {
    let rendered = items
        .iter()
        .map(|item| render_scalar(key, item))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(format!("[{}]", rendered.join(", ")))
}

/// Literal form of a scalar in structured text.
pub fn render_scalar(key: &str, value: &Scalar) -> std::result::Result<String, EncodeError> {
    let rendered = match value {
        Scalar::String(text) if text.contains('\n') => render_block(text),
        Scalar::String(text) => keys::quote(text),
        Scalar::Integer(number) => toml::Value::Integer(*number).to_string(),
        Scalar::Unsigned(number) => {
            let signed = i64::try_from(*number).map_err(|_| EncodeError::Unsupported {
                key: key.to_string(),
                kind: ScalarKind::Unsigned,
                reason: "value exceeds the signed 64-bit integer range",
            })?;
            toml::Value::Integer(signed).to_string()
        }
        Scalar::Float(number) => toml::Value::Float(*number).to_string(),
        Scalar::Boolean(flag) => toml::Value::Boolean(*flag).to_string(),
        Scalar::Timestamp(stamp) => format_rfc3339(stamp),
        Scalar::Complex(_) => {
            return Err(EncodeError::Unsupported {
                key: key.to_string(),
                kind: ScalarKind::Complex,
                reason: "complex numbers have no structured text form",
            });
        }
    };
    Ok(rendered)
}

// Every body line ends in a line-ending backslash, so indentation added by the
// prefix is trimmed on decode and the block reads back as the original text.
fn render_block(text: &str) -> String {
    let lines = text.split('\n').collect::<Vec<_>>();
    let mut block = String::from("\"\"\"\\\n");
    for (idx, text_line) in lines.iter().enumerate() {
        block.push_str(BLOCK_INDENT);
        block.push_str(&escape_block_line(text_line));
        if idx + 1 < lines.len() {
            block.push_str("\\n");
        }
        block.push_str("\\\n");
    }
    block.push_str(BLOCK_INDENT);
    block.push_str("\"\"\"");
    block
}

fn escape_block_line(text: &str) -> String {
    let trimmed = text.trim_start_matches(' ');
    let leading = text.len() - trimmed.len();
    format!("{}{}", "\\u0020".repeat(leading), keys::escape(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Complex, Field};

    #[derive(Default)]
    struct Sample {
        flag: Option<bool>,
        label: Option<String>,
        count: Option<i32>,
        size: Option<u16>,
        ratio: Option<f64>,
        phase: Option<Complex>,
        stamp: Option<chrono::DateTime<chrono::Utc>>,
    }

    impl Record for Sample {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::optional("Flag", &self.flag),
                Field::optional("Label", &self.label),
                Field::optional("Count", &self.count),
                Field::optional("Size", &self.size),
                Field::optional("Ratio", &self.ratio),
                Field::optional("Phase", &self.phase),
                Field::optional("Stamp", &self.stamp),
            ]
        }
    }

    #[test]
    fn absent_optionals_render_type_hints() {
        let text = encode_string(&Sample::default()).expect("encode sample");
        assert_eq!(
            text,
            "#flag = true|false\n\n\
             #label = \"text\"\n\n\
             #count = integer\n\n\
             #size = unsigned integer\n\n\
             #ratio = number\n\n\
             #phase = complex number\n\n\
             #stamp = value\n\n"
        );
    }

    #[test]
    fn present_complex_value_is_unsupported() {
        let sample = Sample {
            phase: Some(Complex { re: 1.0, im: -1.0 }),
            ..Sample::default()
        };
        let err = encode_string(&sample).expect_err("complex cannot be encoded");
        assert!(err.to_string().contains("phase"));
    }

    #[test]
    fn unsigned_values_beyond_i64_are_unsupported() {
        let err = render_scalar("big", &Scalar::Unsigned(u64::MAX)).expect_err("out of range");
        assert!(matches!(
            err,
            EncodeError::Unsupported {
                kind: ScalarKind::Unsigned,
                ..
            }
        ));
        assert_eq!(render_scalar("small", &Scalar::Unsigned(7)).unwrap(), "7");
    }

    #[test]
    fn scalars_render_as_toml_literals() {
        assert_eq!(render_scalar("k", &Scalar::Boolean(true)).unwrap(), "true");
        assert_eq!(render_scalar("k", &Scalar::Integer(-3)).unwrap(), "-3");
        assert_eq!(render_scalar("k", &Scalar::Float(-41.5)).unwrap(), "-41.5");
        assert_eq!(
            render_scalar("k", &Scalar::String("A \"quoted\" name".into())).unwrap(),
            "\"A \\\"quoted\\\" name\""
        );
    }

    #[test]
    fn multiline_strings_render_as_trimmed_blocks() {
        let rendered =
            render_scalar("notes", &Scalar::String("Some Notes\n  indented".into())).unwrap();
        assert_eq!(
            rendered,
            "\"\"\"\\\n    Some Notes\\n\\\n    \\u0020\\u0020indented\\\n    \"\"\""
        );

        let decoded: toml::Table =
            toml::from_str(&format!("notes = {rendered}")).expect("block parses");
        assert_eq!(
            decoded.get("notes").and_then(toml::Value::as_str),
            Some("Some Notes\n  indented")
        );
    }

    struct Failing;

    impl Write for Failing {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_failures_surface_as_encode_errors() {
        let err = encode(&Sample::default(), &mut Failing, "").expect_err("write fails");
        assert!(matches!(err, crate::Error::Encode(EncodeError::Io(_))));
    }
}
