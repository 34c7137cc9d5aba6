//! Dotted-path addressed parsing (spec section 6: `from_json<T>(bytes, path)`), e.g. `"a.b"` to
//!  reach a nested member or `"member1[2]"` to reach an array element. The path is resolved by
//!  structural skipping alone - sibling members and array elements the path does not traverse are
//!  never decoded, only skipped.

use alloc::string::String;
use alloc::vec::Vec;

use crate::contract::{JsonContract, ParseOptions};
use crate::cursor::{Checked, Cursor, Policy};
use crate::error::{ParseError, ParseErrorKind, ParseResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    Member(String),
    Index(usize),
}

fn parse_path(path: &str) -> ParseResult<Vec<PathSegment>> {
    let mut segments = Vec::new();
    for dotted in path.split('.') {
        if dotted.is_empty() {
            return Err(ParseError::without_location(ParseErrorKind::UnexpectedToken, "empty path segment"));
        }
        let name_end = dotted.find('[').unwrap_or(dotted.len());
        let (name, mut bracketed) = dotted.split_at(name_end);
        if !name.is_empty() {
            segments.push(PathSegment::Member(String::from(name)));
        }
        while !bracketed.is_empty() {
            if !bracketed.starts_with('[') {
                return Err(ParseError::without_location(ParseErrorKind::UnexpectedToken, "malformed array index in path"));
            }
            let close = bracketed.find(']')
                .ok_or_else(|| ParseError::without_location(ParseErrorKind::UnexpectedToken, "unterminated '[' in path"))?;
            let digits = &bracketed[1..close];
            let index: usize = digits.parse()
                .map_err(|_| ParseError::without_location(ParseErrorKind::UnexpectedToken, "array index in path is not a number"))?;
            segments.push(PathSegment::Index(index));
            bracketed = &bracketed[close + 1..];
        }
    }
    Ok(segments)
}

fn err<P: Policy>(cursor: &Cursor<P>, kind: ParseErrorKind, reason: &'static str) -> ParseError {
    if P::CHECKED {
        ParseError::new(kind, reason, cursor.location())
    }
    else {
        ParseError::without_location(kind, reason)
    }
}

/// Positions `cursor` at the start of the member named `name` within the object it currently
/// points at (cursor must be at `{`). Sibling members are skipped, not decoded.
fn descend_member<'a, P: Policy>(cursor: &mut Cursor<'a, P>, name: &str) -> ParseResult<()> {
    cursor.trim_left()?;
    if cursor.peek()? != b'{' {
        return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected '{' while resolving path"));
    }
    cursor.advance(1)?;
    cursor.trim_left()?;
    if cursor.peek()? == b'}' {
        return Err(err(cursor, ParseErrorKind::MissingMember, "member not found while resolving path"));
    }
    loop {
        cursor.trim_left()?;
        let member_name = crate::extract::decode_string(cursor)?;
        let is_target = member_name.as_str() == name;
        cursor.trim_left()?;
        if cursor.peek()? != b':' {
            return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected ':' while resolving path"));
        }
        cursor.advance(1)?;
        cursor.trim_left()?;
        if is_target {
            return Ok(());
        }
        cursor.skip_value()?;
        cursor.trim_left()?;
        match cursor.peek()? {
            b',' => {
                cursor.advance(1)?;
            }
            b'}' => return Err(err(cursor, ParseErrorKind::MissingMember, "member not found while resolving path")),
            _ => return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected ',' or '}' while resolving path")),
        }
    }
}

/// Positions `cursor` at the start of element `index` within the array it currently points at
/// (cursor must be at `[`). Preceding elements are skipped, not decoded.
fn descend_index<'a, P: Policy>(cursor: &mut Cursor<'a, P>, index: usize) -> ParseResult<()> {
    cursor.trim_left()?;
    if cursor.peek()? != b'[' {
        return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected '[' while resolving path"));
    }
    cursor.advance(1)?;
    cursor.trim_left()?;
    if cursor.peek()? == b']' {
        return Err(err(cursor, ParseErrorKind::UnexpectedEndOfInput, "array index out of range while resolving path"));
    }
    let mut i = 0usize;
    loop {
        cursor.trim_left()?;
        if i == index {
            return Ok(());
        }
        cursor.skip_value()?;
        cursor.trim_left()?;
        match cursor.peek()? {
            b',' => {
                cursor.advance(1)?;
                i += 1;
            }
            b']' => return Err(err(cursor, ParseErrorKind::UnexpectedEndOfInput, "array index out of range while resolving path")),
            _ => return Err(err(cursor, ParseErrorKind::UnexpectedToken, "expected ',' or ']' while resolving path")),
        }
    }
}

/// Positions `cursor` at the sub-value addressed by `path` (e.g. `"a.b"`, `"member1[2]"`, or
/// `"member1[2].b"`), following only the members and elements the path names.
pub fn resolve_path<'a, P: Policy>(cursor: &mut Cursor<'a, P>, path: &str) -> ParseResult<()> {
    for segment in parse_path(path)? {
        match segment {
            PathSegment::Member(name) => descend_member(cursor, &name)?,
            PathSegment::Index(index) => descend_index(cursor, index)?,
        }
    }
    Ok(())
}

/// Parses into `T` the sub-value of `bytes` addressed by `path` (spec section 6's
/// `from_json<T>(bytes, path)`), under [`Checked`] policy.
pub fn from_json_path<T: JsonContract>(bytes: &[u8], path: &str) -> ParseResult<T> {
    let options = ParseOptions::default();
    let mut cursor = Cursor::<Checked>::with_comments(bytes, options.comments);
    resolve_path(&mut cursor, path)?;
    T::parse_json(&mut cursor, &options)
}
