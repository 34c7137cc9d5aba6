//! The stateful value cursor (spec section 4.5, first half): a reusable wrapper around a JSON
//!  object value that remembers, per lookup, where a member's value starts, so a second lookup of
//!  the same name does not re-scan from the top. The underlying byte range must outlive the
//!  cursor; mutating those bytes after construction invalidates any offsets already recorded.

use alloc::string::String;
use alloc::vec::Vec;

use crate::cursor::{Checked, Cursor, Policy};
use crate::dispatch::dispatch_class_members;
use crate::error::{ParseError, ParseErrorKind, ParseResult};

struct ResolvedMember {
    name: String,
    /// byte offset, relative to the object's opening `{`, of the member's value
    value_offset: usize,
}

/// A value cursor over a single JSON object, memoizing member offsets as they are resolved.
/// The first lookup scans the whole object once, recording every member's value offset along
/// the way; every subsequent `get`/`get_as` call, for any member name, is then a direct slice
/// index with no further scanning.
pub struct ValueCursor<'a, P: Policy = Checked> {
    bytes: &'a [u8],
    resolved: Vec<ResolvedMember>,
    /// offset, relative to `bytes`, of the first JSON member name scanned so far; `None` until
    /// the first lookup, after which it never moves backward
    scanned_from: Option<usize>,
    fully_scanned: bool,
    _policy: core::marker::PhantomData<P>,
}

impl<'a, P: Policy> ValueCursor<'a, P> {
    /// `bytes` must hold exactly one JSON object value (optionally with leading/trailing
    /// whitespace); it is not re-validated until the first member lookup.
    pub fn new(bytes: &'a [u8]) -> Self {
        ValueCursor { bytes, resolved: Vec::new(), scanned_from: None, fully_scanned: false, _policy: core::marker::PhantomData }
    }

    fn err(&self, kind: ParseErrorKind, reason: &'static str) -> ParseError {
        ParseError::without_location(kind, reason)
    }

    /// A cursor positioned at the start of `name`'s value, if the member has already been
    /// resolved or is found by scanning forward from wherever the last scan left off.
    pub fn get(&mut self, name: &str) -> ParseResult<Option<Cursor<'a, P>>> {
        if let Some(member) = self.resolved.iter().find(|m| m.name == name) {
            return Ok(Some(Cursor::new(&self.bytes[member.value_offset..])));
        }
        if self.fully_scanned {
            return Ok(None);
        }
        self.scan_for(name)
    }

    /// [`Self::get`] followed by parsing the member's value with `f`; `MissingMember` if absent.
    pub fn get_as<T>(&mut self, name: &str, f: impl FnOnce(&mut Cursor<'a, P>) -> ParseResult<T>) -> ParseResult<T> {
        let mut cursor = self
            .get(name)?
            .ok_or_else(|| self.err(ParseErrorKind::MissingMember, "member not present in value"))?;
        f(&mut cursor)
    }

    fn scan_for(&mut self, name: &str) -> ParseResult<Option<Cursor<'a, P>>> {
        let start = self.scanned_from.unwrap_or(0);
        let mut cursor = Cursor::<P>::new(&self.bytes[start..]);
        cursor.trim_left()?;
        if start == 0 {
            if cursor.peek()? != b'{' {
                return Err(self.err(ParseErrorKind::UnexpectedToken, "expected '{'"));
            }
            cursor.advance(1)?;
            cursor.trim_left()?;
        }

        let mut found_offset: Option<usize> = None;
        if cursor.peek().ok() != Some(b'}') {
            loop {
                cursor.trim_left()?;
                let member_name = crate::extract::decode_string(&mut cursor)?;
                cursor.trim_left()?;
                if cursor.peek()? != b':' {
                    return Err(self.err(ParseErrorKind::UnexpectedToken, "expected ':'"));
                }
                cursor.advance(1)?;
                cursor.trim_left()?;

                let value_offset = start + cursor.pos();
                let member_name = alloc::string::ToString::to_string(member_name.as_str());
                let is_target = member_name == name;
                self.resolved.push(ResolvedMember { name: member_name, value_offset });
                if is_target {
                    found_offset = Some(value_offset);
                }

                cursor.skip_value()?;
                cursor.trim_left()?;
                match cursor.peek()? {
                    b',' => {
                        cursor.advance(1)?;
                    }
                    b'}' => break,
                    _ => return Err(self.err(ParseErrorKind::UnexpectedToken, "expected ',' or '}'")),
                }
            }
        }
        self.fully_scanned = true;
        self.scanned_from = Some(start + cursor.pos());

        Ok(found_offset.map(|off| Cursor::new(&self.bytes[off..])))
    }

    /// Parses the whole object through a class contract's member-dispatch machinery, ignoring
    /// any memoized state - an escape hatch for callers that want ordinary eager parsing after
    /// having done a few targeted `get` lookups on the same bytes.
    pub fn parse_full<T>(&self, parse: impl FnOnce(&mut Cursor<'a, P>) -> ParseResult<T>) -> ParseResult<T> {
        let mut cursor = Cursor::<P>::new(self.bytes);
        parse(&mut cursor)
    }
}

/// Re-exported for contracts that want to drive [`dispatch_class_members`] directly against a
/// [`ValueCursor`]'s backing bytes rather than through `get`/`get_as`.
pub fn reparse_object<'a, P: Policy>(
    bytes: &'a [u8],
    slots: &mut [crate::dispatch::MemberSlot<'_, 'a, P>],
    options: &crate::contract::ParseOptions,
) -> ParseResult<()> {
    let mut cursor = Cursor::<P>::new(bytes);
    dispatch_class_members(&mut cursor, slots, options, |_| {})
}
