//! The error taxonomy from spec section 7, carried as a `ParseErrorKind` plus, under checked
//!  policy, the `Location` at which the error was detected - in the same shape as the teacher's
//!  `shared::read::JsonParseError`, generalized from a single "parse" variant into the full
//!  taxonomy a contract-driven parser needs.

use core::fmt::{Display, Formatter};
use crate::location::Location;

/// The kind of failure, independent of where it occurred.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedEndOfInput,
    UnexpectedToken,
    ExpectedMemberName,
    MissingMember,
    /// informational; not fatal by default - see `ParseOptions::report_unknown_members`
    UnknownMember,
    UnexpectedNull,
    InvalidNumber,
    NumberOutOfRange,
    InvalidEscape,
    InvalidUtf8,
    VariantDiscriminatorNotMatched,
    /// reserved for a dynamic, type-keyed contract registry; the trait-based contract resolution
    ///  this crate uses rejects an unmapped type at compile time instead, so nothing raises this
    ///  today.
    ContractMissing,
    Unknown,
}
impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            ParseErrorKind::UnexpectedEndOfInput => "unexpected end of input",
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::ExpectedMemberName => "expected a member name",
            ParseErrorKind::MissingMember => "missing member",
            ParseErrorKind::UnknownMember => "unknown member",
            ParseErrorKind::UnexpectedNull => "unexpected null",
            ParseErrorKind::InvalidNumber => "invalid number",
            ParseErrorKind::NumberOutOfRange => "number out of range",
            ParseErrorKind::InvalidEscape => "invalid escape sequence",
            ParseErrorKind::InvalidUtf8 => "invalid UTF-8",
            ParseErrorKind::VariantDiscriminatorNotMatched => "variant discriminator not matched",
            ParseErrorKind::ContractMissing => "no contract registered for this type",
            ParseErrorKind::Unknown => "unknown error",
        };
        f.write_str(s)
    }
}

/// A parse failure. Under `Checked` policy every error carries the byte offset at which it was
///  detected; under `Unchecked` policy most of these are never raised (malformed input is
///  undefined behavior instead), so `location` is `None`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub reason: &'static str,
    pub location: Option<Location>,
}
impl ParseError {
    pub fn new(kind: ParseErrorKind, reason: &'static str, location: Location) -> Self {
        ParseError { kind, reason, location: Some(location) }
    }

    pub fn without_location(kind: ParseErrorKind, reason: &'static str) -> Self {
        ParseError { kind, reason, location: None }
    }
}
impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self.location {
            Some(loc) => write!(f, "{}: {} @ {}", self.kind, self.reason, loc),
            None => write!(f, "{}: {}", self.kind, self.reason),
        }
    }
}
impl core::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// A serialization failure - the sink's own I/O error, propagated unchanged (spec section 7's
///  propagation policy: "errors propagate out of the current... call unchanged").
#[derive(Debug)]
pub enum SerializeError<E> {
    Sink(E),
}
impl<E: Display> Display for SerializeError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SerializeError::Sink(e) => write!(f, "I/O error while serializing: {}", e),
        }
    }
}
impl<E: core::fmt::Debug + Display> core::error::Error for SerializeError<E> {}
impl<E> From<E> for SerializeError<E> {
    fn from(value: E) -> Self {
        SerializeError::Sink(value)
    }
}

pub type SerializeResult<T, E> = Result<T, SerializeError<E>>;
