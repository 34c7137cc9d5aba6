//! The line-delimited JSON iterator (spec section 4.5, second half / section 6's
//!  `json_lines_iterator`): yields one parsed `T` per newline-separated JSON document in an
//!  input byte range. Empty lines are skipped; a malformed line fails the iterator under checked
//!  policy, at which point the iterator is exhausted (no attempt is made to resynchronize on the
//!  next line - a caller that wants best-effort recovery must inspect the yielded error itself
//!  and restart on a fresh sub-slice).

use crate::contract::{JsonContract, ParseOptions};
use crate::cursor::{Checked, Cursor, Policy, Unchecked};
use crate::error::{ParseError, ParseErrorKind, ParseResult};

/// A forward iterator over newline-delimited JSON documents (`.jsonl` / `.ndjson`), each parsed
/// into `T` via its [`JsonContract`].
pub struct JsonLines<'a, T, P: Policy = Checked> {
    remaining: &'a [u8],
    options: ParseOptions,
    done: bool,
    _marker: core::marker::PhantomData<(T, P)>,
}

impl<'a, T: JsonContract> JsonLines<'a, T, Checked> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_options(bytes, ParseOptions::default())
    }
}

impl<'a, T: JsonContract, P: Policy> JsonLines<'a, T, P> {
    pub fn with_options(bytes: &'a [u8], options: ParseOptions) -> Self {
        JsonLines { remaining: bytes, options, done: false, _marker: core::marker::PhantomData }
    }

    fn next_line(&mut self) -> Option<&'a [u8]> {
        loop {
            if self.remaining.is_empty() {
                return None;
            }
            let newline_at = self.remaining.iter().position(|&b| b == b'\n');
            let (line, rest) = match newline_at {
                Some(i) => (&self.remaining[..i], &self.remaining[i + 1..]),
                None => (self.remaining, &self.remaining[self.remaining.len()..]),
            };
            self.remaining = rest;
            let trimmed = trim_ascii_whitespace(line);
            if trimmed.is_empty() {
                continue;
            }
            return Some(trimmed);
        }
    }
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace()).map(|i| i + 1).unwrap_or(start);
    &bytes[start..end]
}

impl<'a, T: JsonContract, P: Policy> Iterator for JsonLines<'a, T, P> {
    type Item = ParseResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let line = self.next_line()?;
        let mut cursor = Cursor::<P>::with_comments(line, self.options.comments);
        let result = T::parse_json(&mut cursor, &self.options).and_then(|value| {
            cursor.trim_left()?;
            if cursor.is_exhausted() {
                Ok(value)
            }
            else {
                Err(trailing_data_err::<P>(&cursor))
            }
        });
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

fn trailing_data_err<P: Policy>(cursor: &Cursor<P>) -> ParseError {
    if P::CHECKED {
        ParseError::new(ParseErrorKind::UnexpectedToken, "trailing data after JSON line", cursor.location())
    }
    else {
        ParseError::without_location(ParseErrorKind::UnexpectedToken, "trailing data after JSON line")
    }
}

/// [`json_lines_iterator`] under [`Checked`] policy - the common case.
pub fn json_lines_iterator<T: JsonContract>(bytes: &[u8]) -> JsonLines<'_, T, Checked> {
    JsonLines::new(bytes)
}

/// [`json_lines_iterator`] under [`Unchecked`] policy - the caller vouches every line is
/// well-formed JSON matching `T`'s contract.
///
/// # Safety
/// Every non-empty line in `bytes` must be well-formed JSON satisfying `T`'s contract.
pub unsafe fn json_lines_iterator_unchecked<T: JsonContract>(bytes: &[u8]) -> JsonLines<'_, T, Unchecked> {
    JsonLines::with_options(bytes, ParseOptions::default())
}
