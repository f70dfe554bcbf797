/// The decoder turning tmsh `list` text into a nested `Mapping`.
pub mod decode;

/// The encoder turning a `Mapping` back into tmsh `list` text.
pub mod encode;

mod literal;

/// The decoded node types.
pub mod node;

/// Helpers for splitting full tmsh dumps into blocks and flattening those into tables.
pub mod records;

/// Conversion of tmsh time expressions (`now-2d`, `2023-09-05`, ...) to ISO 8601.
pub mod time;

pub use decode::decode;
pub use encode::encode;
pub use node::{
    Mapping,
    Node,
};
pub use records::{
    collect_blocks,
    split_blocks,
};
pub use time::{
    convert_tmsh_time,
    convert_tmsh_time_at,
    TmshTime,
};
