mod float_format;
mod json_formatter;

pub use float_format::*;
pub use json_formatter::*;
