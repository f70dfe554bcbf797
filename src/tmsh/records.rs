use crate::errors::DecodeError;
use crate::mapping::table::{
    Row,
    Table,
};
use crate::tmsh::decode::decode;
use crate::tmsh::node::Node;
use log::debug;

/// Splits a full tmsh `list` dump into the top level blocks whose first line starts with `prefix`
/// (for example `net self` or `net vlan`). Each block runs up to and including the first line that
/// starts with a closing brace in the first column.
#[must_use]
pub fn split_blocks(
    text: &str,
    prefix: &str,
) -> Vec<String> {
    let mut blocks = vec![];
    let mut current: Option<Vec<&str>> = None;

    for line in text.lines() {
        if let Some(block) = current.as_mut() {
            block.push(line);

            if line.starts_with('}') {
                blocks.push(block.join("\n"));
                current = None;
            }

            continue;
        }

        if line.starts_with(prefix) {
            current = Some(vec![line]);
        }
    }

    if let Some(block) = current {
        blocks.push(block.join("\n"));
    }

    blocks
}

/// Decodes every `prefix` block of a tmsh dump and flattens each into a row. The row holds the
/// block's fields, a `name` column (the last token of the block key, e.g. `mgmt` for
/// `net self mgmt`) and a `device` column set to `device`, which is moved to the front of the
/// resulting table. Nested lists and mappings are rendered inline (`{ a b }`).
///
/// # Errors
///
/// Returns a `DecodeError` if any of the blocks fails to decode.
pub fn collect_blocks(
    device: &str,
    text: &str,
    prefix: &str,
) -> Result<Table, DecodeError> {
    let mut rows = vec![];

    for block in split_blocks(text, prefix) {
        for (key, value) in decode(&block)? {
            let mut row = Row::new();

            if let Some(fields) = value.as_mapping() {
                for (field, node) in fields {
                    let cell = match node {
                        Node::Scalar(s) => s.clone(),
                        _ => node.to_inline(),
                    };

                    row.insert(field.clone(), Some(cell));
                }
            }

            let name = key.split_whitespace().last().unwrap_or_default();

            row.insert("name".to_owned(), Some(name.to_owned()));
            row.insert("device".to_owned(), Some(device.to_owned()));

            rows.push(row);
        }
    }

    debug!("collected {} '{prefix}' blocks for device {device}", rows.len());

    let mut table = Table::from_rows(rows);

    table.move_to_front("device");

    Ok(table)
}
