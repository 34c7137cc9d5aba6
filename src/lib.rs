#![cfg_attr(feature = "no-std", no_std)]

extern crate alloc;

pub mod location;
pub mod error;
pub mod io;
pub mod format;
pub mod cursor;
pub mod extract;
pub mod contract;
pub mod dispatch;
pub mod serialize;
pub mod parse;
pub mod value_cursor;
pub mod lines;
pub mod array_iter;
pub mod path;
pub mod schema;

#[cfg(feature = "blocking")]
pub mod blocking;

pub use array_iter::json_array_iterator;
pub use contract::JsonContract;
pub use cursor::{Checked, Policy, Unchecked};
pub use error::{ParseError, ParseErrorKind, ParseResult, SerializeError, SerializeResult};
pub use lines::json_lines_iterator;
pub use parse::{from_json, from_json_array, from_json_checked};
pub use path::from_json_path;
pub use schema::{to_json_schema, JsonSchemaDescribe};
pub use serialize::{to_json, to_json_checked, to_json_pretty};
pub use value_cursor::ValueCursor;
