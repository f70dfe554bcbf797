use crate::errors::EncodeError;
use crate::tmsh::decode::{
    classify,
    LineKind,
};
use crate::tmsh::node::{
    Mapping,
    Node,
};
use crate::util::strings::string_contains_any_char;

const INDENT: &str = "    ";

const NEEDS_QUOTES: [char; 3] = ['{', '}', '"'];

const LINE_BREAKS: [char; 2] = ['\n', '\r'];

/// Serializes `mapping` back into tmsh `list` style text. Decoding the result yields a structure
/// equal to `mapping`.
///
/// Block keys are written verbatim in front of their brace, values and list members are wrapped
/// in double quotes when they are empty or hold whitespace, braces or quotes. Every written line
/// is checked against the decoder's reading of it.
///
/// # Errors
///
/// Returns an `EncodeError` if part of the structure has no tmsh text form -- lists holding
/// anything but scalars, line breaks anywhere, key/value keys that are not a single token, or
/// keys and values whose quotes would not read back the same.
pub fn encode(mapping: &Mapping) -> Result<String, EncodeError> {
    let mut out = String::new();
    let mut path = vec![];

    write_entries(&mut out, mapping, 0, &mut path)?;

    Ok(out)
}

fn fail(
    path: &[&str],
    details: &str,
) -> EncodeError {
    EncodeError {
        path: path.join(" "),
        details: details.to_owned(),
    }
}

/// Wraps `s` in double quotes if it would not read back as a single bare token.
fn quoted(s: &str) -> String {
    if s.is_empty()
        || s.contains(char::is_whitespace)
        || string_contains_any_char(s, &NEEDS_QUOTES)
    {
        return format!("\"{s}\"");
    }

    s.to_owned()
}

/// Appends `line` at `depth` if the decoder reads it back as `expected`.
fn write_line(
    out: &mut String,
    depth: usize,
    line: &str,
    expected: &LineKind,
    path: &[&str],
) -> Result<(), EncodeError> {
    if string_contains_any_char(line, &LINE_BREAKS) {
        return Err(fail(path, "keys and values can not hold line breaks"));
    }

    match classify(line) {
        Ok(kind) if kind == *expected => {}
        Ok(_) => {
            return Err(fail(
                path,
                "key or value would not read back the same, check its quotes and whitespace",
            ));
        }
        Err(details) => {
            return Err(fail(path, &format!("written line is not valid tmsh, {details}")));
        }
    }

    out.push_str(&INDENT.repeat(depth));
    out.push_str(line);
    out.push('\n');

    Ok(())
}

fn write_entries<'a>(
    out: &mut String,
    mapping: &'a Mapping,
    depth: usize,
    path: &mut Vec<&'a str>,
) -> Result<(), EncodeError> {
    for (key, node) in mapping {
        path.push(key);

        match node {
            Node::Scalar(value) => {
                write_line(
                    out,
                    depth,
                    &format!("{key} {}", quoted(value)),
                    &LineKind::Pair(key.clone(), value.clone()),
                    path,
                )?;
            }
            Node::List(items) if items.is_empty() => {
                write_line(
                    out,
                    depth,
                    &format!("{key} {{ }}"),
                    &LineKind::EmptyList(key.clone()),
                    path,
                )?;
            }
            Node::List(items) => {
                write_line(
                    out,
                    depth,
                    &format!("{key} {{"),
                    &LineKind::Open(key.clone()),
                    path,
                )?;

                for item in items {
                    let Some(item) = item.as_str() else {
                        return Err(fail(path, "list items must be scalars"));
                    };

                    write_line(
                        out,
                        depth + 1,
                        &quoted(item),
                        &LineKind::Item(item.to_owned()),
                        path,
                    )?;
                }

                write_line(out, depth, "}", &LineKind::Close, path)?;
            }
            Node::Mapping(inner) => {
                write_line(
                    out,
                    depth,
                    &format!("{key} {{"),
                    &LineKind::Open(key.clone()),
                    path,
                )?;
                write_entries(out, inner, depth + 1, path)?;
                write_line(out, depth, "}", &LineKind::Close, path)?;
            }
        }

        path.pop();
    }

    Ok(())
}
