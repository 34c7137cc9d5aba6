//! Resolves JSON string escapes on top of `Cursor::scan_string`'s raw `StringSpan` (spec section
//!  4.3 / 9): the zero-copy fast path is used whenever a span has no escapes, and the owned,
//!  allocating path is only taken for spans that need it.

use crate::cursor::{Cursor, Policy, StringSpan};
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use alloc::string::String;

/// A decoded JSON string: either a borrow straight into the input buffer (no escapes were
///  present) or an owned, escape-resolved `String`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum JsonString<'a> {
    Borrowed(&'a str),
    Owned(String),
}
impl<'a> JsonString<'a> {
    pub fn as_str(&self) -> &str {
        match self {
            JsonString::Borrowed(s) => s,
            JsonString::Owned(s) => s,
        }
    }
}

fn string_err<P: Policy>(cursor: &Cursor<P>, kind: ParseErrorKind, reason: &'static str) -> ParseError {
    if P::CHECKED {
        ParseError::new(kind, reason, cursor.location())
    }
    else {
        ParseError::without_location(kind, reason)
    }
}

fn hex_nibble(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some((b - b'0') as u32),
        b'a'..=b'f' => Some((b - b'a' + 10) as u32),
        b'A'..=b'F' => Some((b - b'A' + 10) as u32),
        _ => None,
    }
}

fn parse_hex4(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 4 {
        return None;
    }
    let mut acc = 0u32;
    for &b in bytes {
        acc = acc * 16 + hex_nibble(b)?;
    }
    Some(acc)
}

/// Resolves the escapes in `span.raw` into an owned `String`. Only called when
///  `span.has_escapes` - callers should prefer `decode_string`, which takes the zero-copy path
///  when possible.
fn resolve_escapes<P: Policy>(cursor: &Cursor<P>, span: &StringSpan) -> ParseResult<String> {
    let raw = span.raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let b = raw[i];
        if b != b'\\' {
            // copy the run of plain bytes up to the next backslash in one shot.
            let start = i;
            while i < raw.len() && raw[i] != b'\\' {
                i += 1;
            }
            out.push_str(core::str::from_utf8(&raw[start..i])
                .map_err(|_| string_err(cursor, ParseErrorKind::InvalidUtf8, "string literal is not valid UTF-8"))?);
            continue;
        }
        i += 1;
        let escape = *raw.get(i).ok_or_else(|| string_err(cursor, ParseErrorKind::InvalidEscape, "truncated escape sequence"))?;
        match escape {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{8}'),
            b'f' => out.push('\u{c}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let hi = parse_hex4(raw.get(i + 1..i + 5).ok_or_else(|| string_err(cursor, ParseErrorKind::InvalidEscape, "truncated \\u escape"))?)
                    .ok_or_else(|| string_err(cursor, ParseErrorKind::InvalidEscape, "invalid \\u escape"))?;
                i += 4;
                let code_point = if (0xD800..=0xDBFF).contains(&hi) {
                    if raw.get(i + 1) != Some(&b'\\') || raw.get(i + 2) != Some(&b'u') {
                        return Err(string_err(cursor, ParseErrorKind::InvalidUtf8, "unpaired high surrogate"));
                    }
                    let lo = parse_hex4(raw.get(i + 3..i + 7).ok_or_else(|| string_err(cursor, ParseErrorKind::InvalidUtf8, "truncated low surrogate"))?)
                        .ok_or_else(|| string_err(cursor, ParseErrorKind::InvalidUtf8, "invalid low surrogate"))?;
                    if !(0xDC00..=0xDFFF).contains(&lo) {
                        return Err(string_err(cursor, ParseErrorKind::InvalidUtf8, "invalid low surrogate"));
                    }
                    i += 6;
                    0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00)
                }
                else {
                    hi
                };
                let c = char::from_u32(code_point)
                    .ok_or_else(|| string_err(cursor, ParseErrorKind::InvalidEscape, "escape does not encode a valid code point"))?;
                out.push(c);
            }
            _ => return Err(string_err(cursor, ParseErrorKind::InvalidEscape, "unrecognized escape sequence")),
        }
        i += 1;
    }
    Ok(out)
}

/// Decodes a JSON string value under the cursor, taking the zero-copy path when no escapes are
///  present.
pub fn decode_string<'a, P: Policy>(cursor: &mut Cursor<'a, P>) -> ParseResult<JsonString<'a>> {
    if matches!(cursor.peek(), Ok(b'n')) {
        cursor.skip_null()?;
        return Err(string_err(cursor, ParseErrorKind::UnexpectedNull, "string member must not be null"));
    }
    let span = cursor.scan_string()?;
    if span.has_escapes {
        Ok(JsonString::Owned(resolve_escapes(cursor, &span)?))
    }
    else {
        Ok(JsonString::Borrowed(span.raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Checked;
    use rstest::*;

    #[rstest]
    #[case::plain(r#""plain""#, "plain")]
    #[case::escapes(r#""a\n\tb""#, "a\n\tb")]
    #[case::quote(r#""a\"b""#, "a\"b")]
    #[case::solidus(r#""a\/b""#, "a/b")]
    #[case::unicode_bmp(r#""A""#, "A")]
    #[case::unicode_surrogate_pair(r#""🙉""#, "\u{1F649}")]
    fn test_decode_string(#[case] input: &str, #[case] expected: &str) {
        let mut c: Cursor<Checked> = Cursor::new(input.as_bytes());
        let decoded = decode_string(&mut c).unwrap();
        assert_eq!(decoded.as_str(), expected);
    }

    #[test]
    fn test_decode_string_zero_copy_when_no_escapes() {
        let mut c: Cursor<Checked> = Cursor::new(br#""plain""#);
        let decoded = decode_string(&mut c).unwrap();
        assert!(matches!(decoded, JsonString::Borrowed(_)));
    }

    #[test]
    fn test_decode_string_unpaired_surrogate() {
        let mut c: Cursor<Checked> = Cursor::new(br#""\uD83D""#);
        let err = decode_string(&mut c).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InvalidUtf8);
    }

    #[test]
    fn test_decode_string_rejects_null() {
        let mut c: Cursor<Checked> = Cursor::new(b"null");
        let err = decode_string(&mut c).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedNull);
    }
}
