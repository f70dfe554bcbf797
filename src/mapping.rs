/// The registered transform functions and the small value helpers they are built on.
pub mod functions;

/// The schema (field rules and column order policy) and its loading.
pub mod schema;

/// The flat `Row` and `Table` types rows are transformed into.
pub mod table;

/// Row and table transformation.
pub mod transform;

pub use functions::{
    seconds_to_ios_format,
    split_domain,
    split_ip_port,
    standardize_timestamp,
    TransformFunction,
};
pub use schema::{
    FieldRule,
    FunctionCall,
    Schema,
    TableSchema,
};
pub use table::{
    Row,
    Table,
};
pub use transform::{
    transform_row,
    transform_table,
};
