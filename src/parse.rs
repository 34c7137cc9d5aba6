//! External parse entry points (spec section 6): the functions application code actually calls,
//!  wiring a byte slice, a cursor policy, and a [`crate::contract::JsonContract`] impl together.
//!  Mirrors how the teacher's `blocking::read::JsonReader` is itself just a thin constructor over
//!  `ReaderInner` - here the cursor plays that role, with the contract supplying the grammar.

use alloc::vec::Vec;

use crate::contract::{JsonContract, ParseOptions};
use crate::cursor::{Checked, Cursor, Policy, Unchecked};
use crate::error::{ParseError, ParseErrorKind, ParseResult};

/// Parse a complete JSON text into `T`, under `Checked` policy (the default - every malformed or
///  truncated input fails with a located [`ParseError`] instead of invoking undefined behavior).
pub fn from_json<T: JsonContract>(bytes: &[u8]) -> ParseResult<T> {
    from_json_with_options::<T, Checked>(bytes, &ParseOptions::default())
}

/// Parse a complete JSON text into `T` under `Unchecked` policy - the caller vouches for the input
///  being well-formed JSON matching `T`'s contract; malformed input is undefined behavior.
///
/// # Safety
/// The caller must guarantee `bytes` is well-formed JSON that satisfies `T`'s contract. Passing
///  malformed input may cause the parser to read past the end of `bytes`.
pub unsafe fn from_json_unchecked<T: JsonContract>(bytes: &[u8]) -> ParseResult<T> {
    from_json_with_options::<T, Unchecked>(bytes, &ParseOptions::default())
}

/// [`from_json`] under explicit [`Checked`] policy, for call sites that want the policy spelled
///  out rather than relying on the default.
pub fn from_json_checked<T: JsonContract>(bytes: &[u8]) -> ParseResult<T> {
    from_json_with_options::<T, Checked>(bytes, &ParseOptions::default())
}

/// [`from_json`] with explicit [`ParseOptions`] (comment dialect, strict member order, unknown
///  member reporting) and an explicit cursor policy.
pub fn from_json_with_options<T: JsonContract, P: Policy>(
    bytes: &[u8],
    options: &ParseOptions,
) -> ParseResult<T> {
    let mut cursor = Cursor::<P>::with_comments(bytes, options.comments);
    let value = T::parse_json(&mut cursor, options)?;
    cursor.trim_left()?;
    if !cursor.is_exhausted() {
        return Err(trailing_data_err::<P>(&cursor));
    }
    Ok(value)
}

fn trailing_data_err<P: Policy>(cursor: &Cursor<P>) -> ParseError {
    if P::CHECKED {
        ParseError::new(ParseErrorKind::UnexpectedToken, "trailing data after JSON value", cursor.location())
    }
    else {
        ParseError::without_location(ParseErrorKind::UnexpectedToken, "trailing data after JSON value")
    }
}

/// Parse a JSON array of `T` into a `Vec<T>`, materializing every element - the eager counterpart
///  to [`crate::array_iter`]'s non-materializing iterator.
pub fn from_json_array<T: JsonContract>(bytes: &[u8]) -> ParseResult<Vec<T>> {
    let options = ParseOptions::default();
    let mut cursor = Cursor::<Checked>::with_comments(bytes, options.comments);
    let mut out = Vec::new();
    crate::dispatch::dispatch_array(&mut cursor, |c| {
        out.push(T::parse_json(c, &options)?);
        Ok(())
    })?;
    cursor.trim_left()?;
    if !cursor.is_exhausted() {
        return Err(trailing_data_err::<Checked>(&cursor));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor as RawCursor;
    use crate::dispatch::{dispatch_class_members, MemberSlot};

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }
    impl JsonContract for Point {
        fn parse_json<P: Policy>(cursor: &mut RawCursor<P>, options: &ParseOptions) -> ParseResult<Self> {
            let mut x = None;
            let mut y = None;
            {
                let mut slots = Vec::new();
                let mut on_x = |c: Option<&mut RawCursor<'_, P>>| -> ParseResult<()> {
                    match c {
                        Some(c) => {
                            x = Some(crate::extract::parse_i32(c, crate::extract::RangeCheck::CheckForNarrowing, crate::extract::LiteralAsString::Never)?);
                            Ok(())
                        }
                        None => Err(ParseError::without_location(ParseErrorKind::MissingMember, "missing `x`")),
                    }
                };
                slots.push(MemberSlot::new("x", &mut on_x));

                let mut on_y = |c: Option<&mut RawCursor<'_, P>>| -> ParseResult<()> {
                    match c {
                        Some(c) => {
                            y = Some(crate::extract::parse_i32(c, crate::extract::RangeCheck::CheckForNarrowing, crate::extract::LiteralAsString::Never)?);
                            Ok(())
                        }
                        None => Err(ParseError::without_location(ParseErrorKind::MissingMember, "missing `y`")),
                    }
                };
                slots.push(MemberSlot::new("y", &mut on_y));

                dispatch_class_members(cursor, &mut slots, options, |_| {})?;
            }
            Ok(Point { x: x.unwrap(), y: y.unwrap() })
        }

        fn write_json<W: crate::io::BlockingWrite, F: crate::format::JsonFormatter, Float: crate::format::FloatFormat>(
            &self,
            ser: &mut crate::serialize::Serializer<W, F, Float>,
        ) -> Result<(), W::Error> {
            crate::serialize::serialize_object(ser, |o| {
                o.member("x", |s| s.write_i32(self.x))?;
                o.member("y", |s| s.write_i32(self.y))
            })
        }
    }

    #[test]
    fn parses_simple_object() {
        let p: Point = from_json(br#"{"x": 1, "y": 2}"#).unwrap();
        assert_eq!(p, Point { x: 1, y: 2 });
    }

    #[test]
    fn order_tolerant_by_default() {
        let p: Point = from_json(br#"{"y": 2, "x": 1}"#).unwrap();
        assert_eq!(p, Point { x: 1, y: 2 });
    }

    #[test]
    fn rejects_trailing_data() {
        let err = from_json::<Point>(br#"{"x": 1, "y": 2} garbage"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn rejects_missing_member() {
        let err = from_json::<Point>(br#"{"x": 1}"#).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingMember);
    }

    #[test]
    fn parses_array_of_contracts() {
        let points: Vec<Point> = from_json_array(br#"[{"x":1,"y":2},{"x":3,"y":4}]"#).unwrap();
        assert_eq!(points, vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }]);
    }
}
