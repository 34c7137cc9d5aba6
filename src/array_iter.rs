//! The non-materializing array iterator (spec section 6's `json_array_iterator<T>`): yields one
//!  `T` per top-level array element without building a `Vec` first - the streaming counterpart to
//!  [`crate::parse::from_json_array`]'s eager materialization.

use crate::contract::{JsonContract, ParseOptions};
use crate::cursor::{Checked, Cursor, Policy, Unchecked};
use crate::error::{ParseError, ParseErrorKind, ParseResult};

/// A forward iterator over a JSON array's elements, each parsed into `T` via its
/// [`JsonContract`]. Must be constructed with the cursor positioned (after whitespace) at the
/// array's opening `[`; on success the cursor ends up past the closing `]`.
pub struct JsonArrayIter<'a, T, P: Policy = Checked> {
    cursor: Cursor<'a, P>,
    options: ParseOptions,
    state: IterState,
    _marker: core::marker::PhantomData<T>,
}

#[derive(Clone, Copy, Eq, PartialEq)]
enum IterState {
    /// before the first element or a `,`, about to read either a value or the closing `]`
    AtElementOrEnd,
    /// the array has been fully consumed, or an error already ended the iteration
    Done,
}

impl<'a, T: JsonContract> JsonArrayIter<'a, T, Checked> {
    /// `bytes` must hold a single top-level JSON array value (plus, under checked policy, only
    /// leading whitespace before it - trailing bytes after the array are left unexamined).
    pub fn new(bytes: &'a [u8]) -> ParseResult<Self> {
        Self::with_options(bytes, ParseOptions::default())
    }
}

impl<'a, T: JsonContract, P: Policy> JsonArrayIter<'a, T, P> {
    pub fn with_options(bytes: &'a [u8], options: ParseOptions) -> ParseResult<Self> {
        let mut cursor = Cursor::<P>::with_comments(bytes, options.comments);
        cursor.trim_left()?;
        if cursor.peek()? != b'[' {
            return Err(err::<P>(&cursor, "expected '['"));
        }
        cursor.advance(1)?;
        cursor.trim_left()?;
        let state = if cursor.peek()? == b']' {
            cursor.advance(1)?;
            IterState::Done
        }
        else {
            IterState::AtElementOrEnd
        };
        Ok(JsonArrayIter { cursor, options, state, _marker: core::marker::PhantomData })
    }

    /// The cursor's position, valid once the iterator is exhausted (`Iterator::next` returned
    /// `None`) - the byte offset just past the closing `]`, for callers that want to continue
    /// parsing trailing bytes.
    pub fn into_cursor(self) -> Cursor<'a, P> {
        self.cursor
    }
}

fn err<P: Policy>(cursor: &Cursor<P>, reason: &'static str) -> ParseError {
    if P::CHECKED {
        ParseError::new(ParseErrorKind::UnexpectedToken, reason, cursor.location())
    }
    else {
        ParseError::without_location(ParseErrorKind::UnexpectedToken, reason)
    }
}

impl<'a, T: JsonContract, P: Policy> Iterator for JsonArrayIter<'a, T, P> {
    type Item = ParseResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == IterState::Done {
            return None;
        }
        let result = (|| {
            self.cursor.trim_left()?;
            let value = T::parse_json(&mut self.cursor, &self.options)?;
            self.cursor.trim_left()?;
            match self.cursor.peek()? {
                b',' => {
                    self.cursor.advance(1)?;
                    self.state = IterState::AtElementOrEnd;
                }
                b']' => {
                    self.cursor.advance(1)?;
                    self.state = IterState::Done;
                }
                _ => return Err(err::<P>(&self.cursor, "expected ',' or ']'")),
            }
            Ok(value)
        })();
        if result.is_err() {
            self.state = IterState::Done;
        }
        Some(result)
    }
}

/// [`json_array_iterator`] under [`Checked`] policy - the common case.
pub fn json_array_iterator<T: JsonContract>(bytes: &[u8]) -> ParseResult<JsonArrayIter<'_, T, Checked>> {
    JsonArrayIter::new(bytes)
}

/// [`json_array_iterator`] under [`Unchecked`] policy - the caller vouches `bytes` is a
/// well-formed JSON array whose elements all satisfy `T`'s contract.
///
/// # Safety
/// `bytes` must be a well-formed JSON array of values matching `T`'s contract.
pub unsafe fn json_array_iterator_unchecked<T: JsonContract>(bytes: &[u8]) -> ParseResult<JsonArrayIter<'_, T, Unchecked>> {
    JsonArrayIter::with_options(bytes, ParseOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{dispatch_class_members, MemberSlot};
    use crate::extract::{parse_i32, LiteralAsString, RangeCheck};
    use crate::format::{FloatFormat, JsonFormatter};
    use crate::io::BlockingWrite;
    use crate::serialize::Serializer;

    #[derive(Debug, PartialEq)]
    struct Row {
        n: i32,
    }
    impl JsonContract for Row {
        fn parse_json<P: Policy>(cursor: &mut Cursor<P>, options: &ParseOptions) -> ParseResult<Self> {
            let mut n = None;
            let mut on_n = |c: Option<&mut Cursor<'_, P>>| -> ParseResult<()> {
                match c {
                    Some(c) => {
                        n = Some(parse_i32(c, RangeCheck::CheckForNarrowing, LiteralAsString::Never)?);
                        Ok(())
                    }
                    None => Err(ParseError::without_location(ParseErrorKind::MissingMember, "missing `n`")),
                }
            };
            let mut slots = [MemberSlot::new("n", &mut on_n)];
            dispatch_class_members(cursor, &mut slots, options, |_| {})?;
            Ok(Row { n: n.unwrap() })
        }

        fn write_json<W: BlockingWrite, F: JsonFormatter, Float: FloatFormat>(
            &self,
            ser: &mut Serializer<W, F, Float>,
        ) -> Result<(), W::Error> {
            crate::serialize::serialize_object(ser, |o| o.member("n", |s| s.write_i32(self.n)))
        }
    }

    #[test]
    fn iterates_elements_without_materializing() {
        let items: ParseResult<alloc::vec::Vec<Row>> = json_array_iterator::<Row>(br#"[{"n":1},{"n":2},{"n":3}]"#).unwrap().collect();
        assert_eq!(items.unwrap(), alloc::vec![Row { n: 1 }, Row { n: 2 }, Row { n: 3 }]);
    }

    #[test]
    fn empty_array_yields_nothing() {
        let mut it = json_array_iterator::<Row>(br#"[]"#).unwrap();
        assert!(it.next().is_none());
    }

    #[test]
    fn rejects_missing_comma() {
        let mut it = json_array_iterator::<Row>(br#"[{"n":1} {"n":2}]"#).unwrap();
        assert_eq!(it.next().unwrap().unwrap(), Row { n: 1 });
        assert!(it.next().unwrap().is_err());
    }

    #[test]
    fn rejects_non_array() {
        assert!(json_array_iterator::<Row>(br#"{"n":1}"#).is_err());
    }
}
