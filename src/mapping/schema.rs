use crate::errors::MappingError;
use crate::mapping::functions::TransformFunction;
use indexmap::IndexMap;
use log::{
    debug,
    warn,
};
use once_cell::sync::OnceCell;
use serde::{
    Deserialize,
    Serialize,
};
use std::fs;
use std::path::Path;

const BUILTIN_SCHEMA_YAML: &str = include_str!("../assets/schema.yaml");

/// Names of output fields that hold addresses which may carry a `:port` suffix. Values renamed
/// into one of these are split into `<field>` and `<field>_port`.
pub const ADDRESS_FIELDS: [&str; 2] = ["remote_address", "local_address"];

/// `FunctionCall` names a transform function and the extra arguments a schema passes to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// The registered function name, for example `standardize_timestamp`.
    pub name: String,
    /// Extra arguments; none of the built in functions take any.
    #[serde(default)]
    pub args: Vec<String>,
}

impl FunctionCall {
    /// Resolves the function name, `None` if the name is not a registered function.
    #[must_use]
    pub fn resolve(&self) -> Option<TransformFunction> {
        TransformFunction::from_name(&self.name)
    }
}

/// `FieldRule` describes how a single input field maps to the output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRule {
    /// Copy the value verbatim under a new name (`Address: ip_address`).
    Rename(String),
    /// Run the value through a registered function. The result is stored under the *input* field
    /// name, not a renamed one.
    Function {
        /// The function to call.
        function: FunctionCall,
    },
    /// Split the value on its first `.` into two output fields (`device: {split: [device,
    /// domain]}`).
    Split {
        /// The output fields for the part before and the part after the first `.`.
        split: (String, String),
    },
}

impl FieldRule {
    /// Returns true if this rule renames into one of the `ADDRESS_FIELDS`.
    #[must_use]
    pub fn targets_address(&self) -> bool {
        match self {
            Self::Rename(target) => ADDRESS_FIELDS.contains(&target.as_str()),
            _ => false,
        }
    }
}

/// The rules for a single table, input field name to rule, in output order.
pub type TableSchema = IndexMap<String, FieldRule>;

/// `Schema` holds the field rules of every known table along with the column order policy that
/// is applied to transformed tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Schema {
    /// Table name to the rules of that table.
    pub tables: IndexMap<String, TableSchema>,
    /// Table name to the desired output column order. Tables with no entry keep their order.
    #[serde(default)]
    pub column_order: IndexMap<String, Vec<String>>,
}

impl Schema {
    /// Returns (once), the built in schema that ships with netmanage.
    ///
    /// # Errors
    ///
    /// Can error if the embedded schema data can not be deserialized, which would be a bug.
    pub fn builtin() -> Result<&'static Self, MappingError> {
        static SCHEMA: OnceCell<Schema> = OnceCell::new();

        SCHEMA.get_or_try_init(|| Self::from_yaml(BUILTIN_SCHEMA_YAML))
    }

    /// Deserializes a schema from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::InvalidSchema` if the document is not a valid schema.
    pub fn from_yaml(yaml: &str) -> Result<Self, MappingError> {
        let schema: Self = serde_yaml::from_str(yaml).map_err(|err| {
            MappingError::InvalidSchema(format!("failed deserializing schema, error: {err}"))
        })?;

        for (table_name, rules) in &schema.tables {
            for (field, rule) in rules {
                if let FieldRule::Function { function } = rule {
                    if function.resolve().is_none() {
                        warn!(
                            "table '{table_name}' field '{field}' names unknown function '{}', \
                             the field will be skipped",
                            function.name
                        );
                    }
                }
            }
        }

        debug!("loaded schema with {} tables", schema.tables.len());

        Ok(schema)
    }

    /// Reads and deserializes a schema from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::InvalidSchema` if the file can not be read or is not a valid schema.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let path = path.as_ref();

        let yaml = fs::read_to_string(path).map_err(|err| {
            MappingError::InvalidSchema(format!(
                "failed reading schema file '{}', error: {err}",
                path.display()
            ))
        })?;

        Self::from_yaml(&yaml)
    }

    /// Returns the rules for `table_name`.
    ///
    /// # Errors
    ///
    /// Returns `MappingError::UnknownTable` if the schema has no such table.
    pub fn table(
        &self,
        table_name: &str,
    ) -> Result<&TableSchema, MappingError> {
        self.tables
            .get(table_name)
            .ok_or_else(|| MappingError::UnknownTable(table_name.to_owned()))
    }

    /// Returns the desired column order for `table_name`, empty if the table has no policy.
    #[must_use]
    pub fn column_order(
        &self,
        table_name: &str,
    ) -> &[String] {
        self.column_order
            .get(table_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the names of all tables in the schema.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_schema_loads() {
        let schema = Schema::builtin().expect("embedded schema should deserialize");

        assert_eq!(schema.table_names().count(), 11);

        let ios = schema.table("IOS_BGP_NEIGHBORS").expect("known table");
        assert_eq!(
            ios.get("device"),
            Some(&FieldRule::Split {
                split: ("device".to_owned(), "domain".to_owned())
            })
        );
        assert_eq!(ios.get("local_host"), Some(&FieldRule::Rename("local_address".to_owned())));

        let panos = schema.table("PANOS_BGP_NEIGHBORS").expect("known table");
        assert_eq!(panos.get_index(0).map(|(k, _)| k.as_str()), Some("timestamp"));
        assert!(matches!(
            panos.get("status-duration"),
            Some(FieldRule::Function { function }) if function.name == "bgp_state_timer"
        ));
        assert!(panos.get("@peer").is_some());

        assert_eq!(
            schema
                .column_order("PANOS_BGP_NEIGHBORS")
                .first()
                .map(String::as_str),
            Some("device")
        );
        assert!(schema.column_order("IOS_ARP_TABLE").is_empty());
    }

    #[test]
    fn every_builtin_function_resolves() {
        let schema = Schema::builtin().expect("embedded schema should deserialize");

        for rules in schema.tables.values() {
            for rule in rules.values() {
                if let FieldRule::Function { function } = rule {
                    assert!(function.resolve().is_some(), "{} is not registered", function.name);
                }
            }
        }
    }

    #[test]
    fn unknown_table_and_bad_yaml() {
        let schema = Schema::from_yaml("tables:\n  T:\n    a: b\n").expect("valid schema");

        assert!(matches!(
            schema.table("UNKNOWN_TABLE"),
            Err(MappingError::UnknownTable(name)) if name == "UNKNOWN_TABLE"
        ));
        assert!(matches!(
            Schema::from_yaml("tables: [1, 2]"),
            Err(MappingError::InvalidSchema(_))
        ));
    }

    #[test]
    fn schema_from_file() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("schema.yaml");

        fs::write(
            &path,
            "tables:\n  T:\n    Address: ip_address\ncolumn-order:\n  T: [ip_address]\n",
        )
        .expect("write schema");

        let schema = Schema::from_file(&path).expect("valid schema file");
        assert_eq!(
            schema.table("T").expect("known table").get("Address"),
            Some(&FieldRule::Rename("ip_address".to_owned()))
        );
        assert_eq!(schema.column_order("T"), ["ip_address"]);

        assert!(matches!(
            Schema::from_file(dir.path().join("missing.yaml")),
            Err(MappingError::InvalidSchema(details)) if details.contains("missing.yaml")
        ));
    }

    #[test]
    fn address_targets() {
        assert!(FieldRule::Rename("local_address".to_owned()).targets_address());
        assert!(!FieldRule::Rename("ip_address".to_owned()).targets_address());
    }
}
