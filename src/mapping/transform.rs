use crate::errors::MappingError;
use crate::mapping::functions::{
    split_domain,
    split_ip_port,
};
use crate::mapping::schema::{
    FieldRule,
    Schema,
};
use crate::mapping::table::{
    Row,
    Table,
};
use log::{
    debug,
    trace,
};

/// Transforms a single row using the rules `schema` holds for `table_name`.
///
/// Rules are applied in schema order and only for fields present in `row`; fields of `row` the
/// schema does not mention are dropped. Per rule:
/// - rename: the value is copied under the new name. When the new name is an address field
///   (`remote_address`/`local_address`) and the value holds a `:`, it is split on the last `:`
///   into the address and a `<field>_port` column (the latter only when a numeric port is found).
/// - function: the registered function's result is stored under the *input* field name. Rules
///   naming an unregistered function produce nothing.
/// - split: the value is split on its first `.` into the two named fields.
///
/// Empty (`None`) cells stay empty: renames copy them, functions and splits yield empty cells.
///
/// # Errors
///
/// Returns `MappingError::UnknownTable` if `table_name` is not in the schema, or
/// `MappingError::Format` if a function rejects a value.
pub fn transform_row(
    table_name: &str,
    row: &Row,
    schema: &Schema,
) -> Result<Row, MappingError> {
    let rules = schema.table(table_name)?;

    let mut transformed = Row::new();

    for (key, rule) in rules {
        let Some(value) = row.get(key) else {
            continue;
        };

        match rule {
            FieldRule::Rename(target) => {
                let address = value
                    .as_deref()
                    .filter(|v| rule.targets_address() && v.contains(':'));

                if let Some(address) = address {
                    let (ip, port) = split_ip_port(address);

                    transformed.insert(target.clone(), Some(ip));

                    if let Some(port) = port {
                        transformed.insert(format!("{target}_port"), Some(port));
                    }
                } else {
                    transformed.insert(target.clone(), value.clone());
                }
            }
            FieldRule::Function { function } => {
                let Some(f) = function.resolve() else {
                    trace!(
                        "skipping field '{key}', function '{}' is not registered",
                        function.name
                    );

                    continue;
                };

                trace!("applying function '{}' to field '{key}'", f.name());

                let result = match value {
                    Some(v) => f.apply(v)?,
                    None => None,
                };

                transformed.insert(key.clone(), result);
            }
            FieldRule::Split {
                split: (first, rest),
            } => {
                let (head, tail) = value.as_deref().map_or((None, None), |v| {
                    let (head, tail) = split_domain(v);

                    (Some(head), Some(tail))
                });

                transformed.insert(first.clone(), head);
                transformed.insert(rest.clone(), tail);
            }
        }
    }

    Ok(transformed)
}

/// Transforms every row of a table with `transform_row` and assembles the results into a
/// `Table`, keeping row order. The table's columns are the union of the transformed rows' fields;
/// if the schema has a column order policy for `table_name`, the policy's columns that exist come
/// first in policy order with all other columns after them in their original order.
///
/// # Errors
///
/// Returns `MappingError::UnknownTable` if `table_name` is not in the schema (even when `rows` is
/// empty), or `MappingError::Format` if a function rejects a value in any row.
pub fn transform_table(
    table_name: &str,
    rows: &[Row],
    schema: &Schema,
) -> Result<Table, MappingError> {
    schema.table(table_name)?;

    debug!("transforming {} rows for table {table_name}", rows.len());

    let transformed = rows
        .iter()
        .map(|row| transform_row(table_name, row, schema))
        .collect::<Result<Vec<Row>, MappingError>>()?;

    let mut table = Table::from_rows(transformed);

    table.reorder(schema.column_order(table_name));

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = "
tables:
  T:
    timestamp:
      function:
        name: standardize_timestamp
    fqdn:
      split: [host, domain]
    peer: remote_address
    ignored:
      function:
        name: no_such_function
    vrf: vrf
column-order:
  T: [vrf, host]
";

    fn row(cells: &[(&str, Option<&str>)]) -> Row {
        cells
            .iter()
            .map(|(k, v)| ((*k).to_owned(), v.map(str::to_owned)))
            .collect()
    }

    #[test]
    fn null_cells_stay_null() {
        let schema = Schema::from_yaml(SCHEMA).expect("valid schema");

        let out = transform_row(
            "T",
            &row(&[("timestamp", None), ("fqdn", None), ("peer", None)]),
            &schema,
        )
        .expect("should transform");

        assert_eq!(
            out,
            row(&[
                ("timestamp", None),
                ("host", None),
                ("domain", None),
                ("remote_address", None)
            ])
        );
    }

    #[test]
    fn unknown_function_is_skipped_and_format_errors_propagate() {
        let schema = Schema::from_yaml(SCHEMA).expect("valid schema");

        let out = transform_row("T", &row(&[("ignored", Some("x"))]), &schema)
            .expect("should transform");
        assert!(out.is_empty());

        assert!(matches!(
            transform_row("T", &row(&[("timestamp", Some("yesterday"))]), &schema),
            Err(MappingError::Format(_))
        ));
    }

    #[test]
    fn table_applies_policy() {
        let schema = Schema::from_yaml(SCHEMA).expect("valid schema");

        let table = transform_table(
            "T",
            &[row(&[
                ("fqdn", Some("rtr1.example.com")),
                ("vrf", Some("blue")),
                ("peer", Some("10.0.0.2:179")),
            ])],
            &schema,
        )
        .expect("should transform");

        assert_eq!(
            table.columns(),
            ["vrf", "host", "domain", "remote_address", "remote_address_port"]
        );
    }
}
