//! The zero-allocation cursor over an in-memory JSON byte range (spec section 4.1): an immutable
//!  view with a mutable position, primitive literal scanners, and a structural skipper. This plays
//!  the role the teacher's `blocking::read::JsonReader` plays for a byte-at-a-time stream, but
//!  over a borrowed `&[u8]` instead, so extracted strings and number literals can be zero-copy
//!  slices into the caller's buffer rather than owned, reassembled tokens.

mod policy;

pub use policy::{Checked, Comments, Policy, Unchecked};

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::location::Location;
use core::marker::PhantomData;

/// The result of scanning a JSON string literal: the raw (still-escaped) slice between the
///  quotes, and whether any `\` was seen. Leaf extraction decides, based on `has_escapes`, whether
///  it can hand the caller a zero-copy `&str` or must allocate to resolve escapes - the two-phase
///  approach spec section 9 calls for.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StringSpan<'a> {
    pub raw: &'a str,
    pub has_escapes: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a, P: Policy = Checked> {
    bytes: &'a [u8],
    pos: usize,
    comments: Comments,
    _policy: PhantomData<P>,
}

impl<'a, P: Policy> Cursor<'a, P> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_comments(bytes, Comments::None)
    }

    pub fn with_comments(bytes: &'a [u8], comments: Comments) -> Self {
        Cursor { bytes, pos: 0, comments, _policy: PhantomData }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    pub fn location(&self) -> Location {
        let mut loc = Location::start();
        loc.after_bytes(&self.bytes[..self.pos]);
        loc
    }

    fn err(&self, kind: ParseErrorKind, reason: &'static str) -> ParseError {
        if P::CHECKED {
            ParseError::new(kind, reason, self.location())
        }
        else {
            ParseError::without_location(kind, reason)
        }
    }

    /// The byte at `self.pos + offset`, without advancing. `None` past the end, always - this is
    ///  used for lookahead that must not fail even under `Unchecked` (whitespace/comment
    ///  detection, literal disambiguation).
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// The current byte. Fails with `UnexpectedEndOfInput` under `Checked` policy if the cursor is
    ///  exhausted; under `Unchecked`, reads past the end are undefined behavior - the caller must
    ///  guarantee the input is well-formed.
    pub fn peek(&self) -> ParseResult<u8> {
        if P::CHECKED {
            self.bytes.get(self.pos).copied()
                .ok_or_else(|| self.err(ParseErrorKind::UnexpectedEndOfInput, "unexpected end of input"))
        }
        else {
            // SAFETY: the `Unchecked` contract requires the caller to guarantee `pos < len` for
            //  every read this policy performs; this is exactly the bounds check being elided.
            Ok(unsafe { *self.bytes.get_unchecked(self.pos) })
        }
    }

    fn advance_one(&mut self) -> ParseResult<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Ok(b)
    }

    pub fn advance(&mut self, n: usize) -> ParseResult<()> {
        for _ in 0..n {
            self.advance_one()?;
        }
        Ok(())
    }

    fn expect_byte(&mut self, expected: u8, kind: ParseErrorKind, reason: &'static str) -> ParseResult<()> {
        let b = self.advance_one()?;
        if b == expected {
            Ok(())
        }
        else {
            Err(self.err(kind, reason))
        }
    }

    /// Skip the four JSON whitespace bytes (space, tab, CR, LF), and - if enabled - comments.
    pub fn trim_left(&mut self) -> ParseResult<()> {
        loop {
            match self.peek_at(0) {
                Some(b' ' | b'\t' | b'\r' | b'\n') => {
                    self.pos += 1;
                }
                Some(b'/') if self.comments == Comments::CppStyle => {
                    match self.peek_at(1) {
                        Some(b'/') => {
                            self.pos += 2;
                            while !matches!(self.peek_at(0), None | Some(b'\n')) {
                                self.pos += 1;
                            }
                        }
                        Some(b'*') => {
                            self.pos += 2;
                            loop {
                                match (self.peek_at(0), self.peek_at(1)) {
                                    (Some(b'*'), Some(b'/')) => {
                                        self.pos += 2;
                                        break;
                                    }
                                    (Some(_), _) => self.pos += 1,
                                    (None, _) => break,
                                }
                            }
                        }
                        _ => break,
                    }
                }
                Some(b'#') if self.comments == Comments::HashStyle => {
                    self.pos += 1;
                    while !matches!(self.peek_at(0), None | Some(b'\n')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Advance past a JSON string literal, including the closing quote. The cursor must be
    ///  positioned at the opening `"`. No decoding takes place; escapes are resolved by the
    ///  leaf extractor.
    pub fn scan_string(&mut self) -> ParseResult<StringSpan<'a>> {
        self.expect_byte(b'"', ParseErrorKind::UnexpectedToken, "expected a string literal")?;
        let start = self.pos;
        let mut has_escapes = false;
        loop {
            let b = self.advance_one()?;
            match b {
                b'"' => break,
                b'\\' => {
                    self.advance_one()?;
                    has_escapes = true;
                }
                _ => {}
            }
        }
        let end = self.pos - 1;
        let raw = core::str::from_utf8(&self.bytes[start..end])
            .map_err(|_| self.err(ParseErrorKind::InvalidUtf8, "string literal is not valid UTF-8"))?;
        Ok(StringSpan { raw, has_escapes })
    }

    pub fn skip_string(&mut self) -> ParseResult<()> {
        self.scan_string().map(|_| ())
    }

    /// Advance while the current character is part of a JSON number literal (`-+.0-9eE`),
    ///  returning the raw slice. Purely character-class driven - grammar validation (leading
    ///  zeros, digit-after-sign, etc.) is the leaf extractor's job.
    pub fn scan_number(&mut self) -> ParseResult<&'a str> {
        let start = self.pos;
        if matches!(self.peek_at(0), Some(b'-')) {
            self.pos += 1;
        }
        loop {
            match self.peek_at(0) {
                Some(b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-') => self.pos += 1,
                _ => break,
            }
        }
        if self.pos == start {
            return Err(self.err(ParseErrorKind::InvalidNumber, "empty number literal"));
        }
        // ASCII-only character class above guarantees valid UTF-8.
        Ok(unsafe { core::str::from_utf8_unchecked(&self.bytes[start..self.pos]) })
    }

    pub fn skip_number(&mut self) -> ParseResult<()> {
        self.scan_number().map(|_| ())
    }

    fn skip_literal(&mut self, literal: &'static [u8]) -> ParseResult<()> {
        for &expected in literal {
            self.expect_byte(expected, ParseErrorKind::UnexpectedToken, "incomplete literal")?;
        }
        Ok(())
    }

    pub fn skip_true(&mut self) -> ParseResult<()> {
        self.skip_literal(b"true")
    }

    pub fn skip_false(&mut self) -> ParseResult<()> {
        self.skip_literal(b"false")
    }

    pub fn skip_null(&mut self) -> ParseResult<()> {
        self.skip_literal(b"null")
    }

    /// Advance past one complete JSON value of whatever kind follows (after whitespace), without
    ///  interpreting its content - used to skip unwanted array elements and out-of-order object
    ///  members.
    pub fn skip_value(&mut self) -> ParseResult<()> {
        self.trim_left()?;
        match self.peek()? {
            b'{' | b'[' => self.skip_container(),
            b'"' => self.skip_string(),
            b'-' | b'0'..=b'9' => self.skip_number(),
            b't' => self.skip_true(),
            b'f' => self.skip_false(),
            b'n' => self.skip_null(),
            _ => Err(self.err(ParseErrorKind::UnexpectedToken, "expected a JSON value")),
        }
    }

    fn skip_container(&mut self) -> ParseResult<()> {
        self.advance_one()?; // the opening '{' or '['
        let mut depth: usize = 1;
        loop {
            self.trim_left()?;
            if matches!(self.peek()?, b'"') {
                self.skip_string()?;
                continue;
            }
            match self.advance_one()? {
                b'{' | b'[' => depth += 1,
                b'}' | b']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }
}
