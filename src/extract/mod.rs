//! Leaf value extraction (spec section 4.3): turns a scanned token into a typed Rust value,
//!  governed by the numeric/string policies a contract attaches to each member.

mod numbers;
mod strings;

pub use numbers::{parse_bool, parse_f32, parse_f64, LiteralAsString, Precision, RangeCheck};
pub use numbers::{
    parse_i128, parse_i16, parse_i32, parse_i64, parse_i8, parse_isize,
    parse_u128, parse_u16, parse_u32, parse_u64, parse_u8, parse_usize,
};
pub use strings::{decode_string, JsonString};
