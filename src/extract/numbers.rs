//! Typed leaf extraction for numbers and bools (spec section 4.3).

use crate::cursor::{Cursor, Policy};
use crate::error::{ParseError, ParseErrorKind, ParseResult};

/// Whether an integer member enforces that the parsed value actually fits the target width.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum RangeCheck {
    /// no check; values that don't fit the target width are truncated modulo that width
    Off,
    #[default]
    /// fail with `NumberOutOfRange` if the parsed value doesn't fit the target width
    CheckForNarrowing,
}

/// The two precision tiers for parsing a floating point literal to its nearest binary value.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Precision {
    /// accumulate the mantissa as an integer and apply a power-of-ten table; falls back to
    ///  `Precise` outside its envelope (more than 19 mantissa digits, or an exponent magnitude
    ///  greater than the table covers)
    #[default]
    Fast,
    /// always perform a full, correctly-rounded decimal-to-binary conversion
    Precise,
}

/// Whether a number member's JSON representation is allowed/required to be wrapped in quotes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum LiteralAsString {
    #[default]
    Never,
    Maybe,
    Always,
}

fn number_err<P: Policy>(cursor: &Cursor<P>, kind: ParseErrorKind, reason: &'static str) -> ParseError {
    if P::CHECKED {
        ParseError::new(kind, reason, cursor.location())
    }
    else {
        ParseError::without_location(kind, reason)
    }
}

/// Scans a number literal, honoring `LiteralAsString` by optionally consuming surrounding quotes.
fn scan_number_text<'a, P: Policy>(cursor: &mut Cursor<'a, P>, as_string: LiteralAsString) -> ParseResult<&'a str> {
    if matches!(cursor.peek(), Ok(b'n')) {
        cursor.skip_null()?;
        return Err(number_err(cursor, ParseErrorKind::UnexpectedNull, "number member must not be null"));
    }
    let quoted = matches!(cursor.peek(), Ok(b'"'));
    match (as_string, quoted) {
        (LiteralAsString::Never, true) => {
            return Err(number_err(cursor, ParseErrorKind::UnexpectedToken, "number must not be quoted"));
        }
        (LiteralAsString::Always, false) => {
            return Err(number_err(cursor, ParseErrorKind::UnexpectedToken, "number must be quoted"));
        }
        _ => {}
    }
    if quoted {
        let span = cursor.scan_string()?;
        Ok(span.raw)
    }
    else {
        cursor.scan_number()
    }
}

macro_rules! impl_signed_extract {
    ($t:ty, $fn_name:ident) => {
        pub fn $fn_name<P: Policy>(
            cursor: &mut Cursor<P>,
            range_check: RangeCheck,
            as_string: LiteralAsString,
        ) -> ParseResult<$t> {
            let text = scan_number_text(cursor, as_string)?;
            if text.contains('.') || text.contains('e') || text.contains('E') {
                return Err(number_err(cursor, ParseErrorKind::InvalidNumber, "expected an integer literal"));
            }
            match range_check {
                RangeCheck::CheckForNarrowing => text.parse::<$t>()
                    .map_err(|_| number_err(cursor, ParseErrorKind::NumberOutOfRange, "integer literal out of range")),
                RangeCheck::Off => {
                    let (negative, digits) = match text.strip_prefix('-') {
                        Some(d) => (true, d),
                        None => (false, text),
                    };
                    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(number_err(cursor, ParseErrorKind::InvalidNumber, "invalid integer literal"));
                    }
                    let mut acc: i128 = 0;
                    for b in digits.bytes() {
                        acc = acc.wrapping_mul(10).wrapping_add((b - b'0') as i128);
                    }
                    if negative {
                        acc = acc.wrapping_neg();
                    }
                    Ok(acc as $t)
                }
            }
        }
    };
}

macro_rules! impl_unsigned_extract {
    ($t:ty, $fn_name:ident) => {
        pub fn $fn_name<P: Policy>(
            cursor: &mut Cursor<P>,
            range_check: RangeCheck,
            as_string: LiteralAsString,
        ) -> ParseResult<$t> {
            let text = scan_number_text(cursor, as_string)?;
            if text.contains('.') || text.contains('e') || text.contains('E') {
                return Err(number_err(cursor, ParseErrorKind::InvalidNumber, "expected an integer literal"));
            }
            if text.starts_with('-') {
                return Err(number_err(cursor, ParseErrorKind::NumberOutOfRange, "unsigned member cannot be negative"));
            }
            match range_check {
                RangeCheck::CheckForNarrowing => text.parse::<$t>()
                    .map_err(|_| number_err(cursor, ParseErrorKind::NumberOutOfRange, "integer literal out of range")),
                RangeCheck::Off => {
                    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(number_err(cursor, ParseErrorKind::InvalidNumber, "invalid integer literal"));
                    }
                    let mut acc: u128 = 0;
                    for b in text.bytes() {
                        acc = acc.wrapping_mul(10).wrapping_add((b - b'0') as u128);
                    }
                    Ok(acc as $t)
                }
            }
        }
    };
}

impl_signed_extract!(i8, parse_i8);
impl_signed_extract!(i16, parse_i16);
impl_signed_extract!(i32, parse_i32);
impl_signed_extract!(i64, parse_i64);
impl_signed_extract!(i128, parse_i128);
impl_signed_extract!(isize, parse_isize);

impl_unsigned_extract!(u8, parse_u8);
impl_unsigned_extract!(u16, parse_u16);
impl_unsigned_extract!(u32, parse_u32);
impl_unsigned_extract!(u64, parse_u64);
impl_unsigned_extract!(u128, parse_u128);
impl_unsigned_extract!(usize, parse_usize);

/// Powers of ten exactly representable as `f64`, used by the fast floating-point path.
const POW10_F64: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

struct DecimalShape<'a> {
    negative: bool,
    int_part: &'a str,
    frac_part: &'a str,
    exponent: i32,
}

/// Splits `-123.456e7` into (sign, "123" / "456", exponent adjusted for the decimal point),
///  without validating digit-ness beyond what `Cursor::scan_number` already guarantees for its
///  character class.
fn split_decimal(text: &str) -> Option<DecimalShape<'_>> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, text),
    };
    let (mantissa_part, exp_part) = match rest.find(['e', 'E']) {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };
    let (int_part, frac_part) = match mantissa_part.find('.') {
        Some(i) => (&mantissa_part[..i], &mantissa_part[i + 1..]),
        None => (mantissa_part, ""),
    };
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut exponent: i32 = match exp_part {
        Some(e) => e.parse().ok()?,
        None => 0,
    };
    exponent -= frac_part.len() as i32;
    Some(DecimalShape { negative, int_part, frac_part, exponent })
}

/// Multiplies or divides a combined integer+fractional mantissa by a power of ten: negative
///  exponents (more fractional digits than the table of positive powers covers on its own) divide
///  rather than bailing to the precise path, so e.g. `"0.5"` and `"1.23e-3"` stay on the fast path.
fn parse_float_fast(text: &str) -> Option<f64> {
    let shape = split_decimal(text)?;
    let total_digits = shape.int_part.len() + shape.frac_part.len();
    if total_digits > 19 {
        return None;
    }
    let mut mantissa: u64 = 0;
    for b in shape.int_part.bytes().chain(shape.frac_part.bytes()) {
        mantissa = mantissa * 10 + (b - b'0') as u64;
    }
    let value = if shape.exponent >= 0 {
        if shape.exponent as usize >= POW10_F64.len() {
            return None;
        }
        mantissa as f64 * POW10_F64[shape.exponent as usize]
    }
    else {
        let abs_exponent = (-shape.exponent) as usize;
        if abs_exponent >= POW10_F64.len() {
            return None;
        }
        mantissa as f64 / POW10_F64[abs_exponent]
    };
    Some(if shape.negative { -value } else { value })
}

pub fn parse_f64<P: Policy>(cursor: &mut Cursor<P>, precision: Precision, as_string: LiteralAsString) -> ParseResult<f64> {
    let text = scan_number_text(cursor, as_string)?;
    let fast = match precision {
        Precision::Fast => parse_float_fast(text),
        Precision::Precise => None,
    };
    match fast {
        Some(v) => Ok(v),
        None => text.parse::<f64>().map_err(|_| number_err(cursor, ParseErrorKind::InvalidNumber, "invalid floating point literal")),
    }
}

pub fn parse_f32<P: Policy>(cursor: &mut Cursor<P>, precision: Precision, as_string: LiteralAsString) -> ParseResult<f32> {
    let text = scan_number_text(cursor, as_string)?;
    let fast = match precision {
        Precision::Fast => parse_float_fast(text).map(|v| v as f32),
        Precision::Precise => None,
    };
    match fast {
        Some(v) => Ok(v),
        None => text.parse::<f32>().map_err(|_| number_err(cursor, ParseErrorKind::InvalidNumber, "invalid floating point literal")),
    }
}

pub fn parse_bool<P: Policy>(cursor: &mut Cursor<P>) -> ParseResult<bool> {
    match cursor.peek()? {
        b't' => {
            cursor.skip_true()?;
            Ok(true)
        }
        b'f' => {
            cursor.skip_false()?;
            Ok(false)
        }
        b'n' => {
            cursor.skip_null()?;
            Err(number_err(cursor, ParseErrorKind::UnexpectedNull, "boolean member must not be null"))
        }
        _ => Err(number_err(cursor, ParseErrorKind::UnexpectedToken, "expected a boolean literal")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Checked;
    use rstest::*;

    #[rstest]
    #[case::simple("1", RangeCheck::CheckForNarrowing, Some(1u8))]
    #[case::max("255", RangeCheck::CheckForNarrowing, Some(255u8))]
    #[case::overflow("256", RangeCheck::CheckForNarrowing, None)]
    #[case::overflow_truncates("256", RangeCheck::Off, Some(0u8))]
    fn test_parse_u8(#[case] input: &str, #[case] range_check: RangeCheck, #[case] expected: Option<u8>) {
        let mut c: Cursor<Checked> = Cursor::new(input.as_bytes());
        let result = parse_u8(&mut c, range_check, LiteralAsString::Never);
        match expected {
            Some(v) => assert_eq!(result.unwrap(), v),
            None => assert_eq!(result.unwrap_err().kind, ParseErrorKind::NumberOutOfRange),
        }
    }

    #[test]
    fn test_negative_into_unsigned_always_fails() {
        let mut c: Cursor<Checked> = Cursor::new(b"-1");
        let err = parse_u32(&mut c, RangeCheck::Off, LiteralAsString::Never).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NumberOutOfRange);
    }

    #[rstest]
    #[case::simple("1", 1.0)]
    #[case::big("1345678345", 1345678345.0)]
    #[case::fract("1.0", 1.0)]
    #[case::exp("1e3", 1e3)]
    #[case::neg_exp("1e-3", 1e-3)]
    #[case::pos_exp("1e+3", 1e3)]
    #[case::fract_exp("1.23e3", 1230.0)]
    #[case::fract_neg_exp("1.23e-3", 1.23e-3)]
    fn test_parse_f64(#[case] input: &str, #[case] expected: f64) {
        let mut c: Cursor<Checked> = Cursor::new(input.as_bytes());
        let v = parse_f64(&mut c, Precision::Fast, LiteralAsString::Never).unwrap();
        assert_eq!(v, expected);

        let mut c: Cursor<Checked> = Cursor::new(input.as_bytes());
        let v = parse_f64(&mut c, Precision::Precise, LiteralAsString::Never).unwrap();
        assert_eq!(v, expected);
    }

    #[test]
    fn test_number_as_string() {
        let mut c: Cursor<Checked> = Cursor::new(br#""42""#);
        assert_eq!(parse_i32(&mut c, RangeCheck::CheckForNarrowing, LiteralAsString::Always).unwrap(), 42);

        let mut c: Cursor<Checked> = Cursor::new(b"42");
        let err = parse_i32(&mut c, RangeCheck::CheckForNarrowing, LiteralAsString::Always).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);

        let mut c: Cursor<Checked> = Cursor::new(br#""42""#);
        let err = parse_i32(&mut c, RangeCheck::CheckForNarrowing, LiteralAsString::Never).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn test_parse_bool() {
        let mut c: Cursor<Checked> = Cursor::new(b"true");
        assert_eq!(parse_bool(&mut c).unwrap(), true);
        let mut c: Cursor<Checked> = Cursor::new(b"false");
        assert_eq!(parse_bool(&mut c).unwrap(), false);
    }

    #[test]
    fn test_parse_bool_rejects_null() {
        let mut c: Cursor<Checked> = Cursor::new(b"null");
        let err = parse_bool(&mut c).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedNull);
    }

    #[rstest]
    #[case::fract("0.5", 0.5)]
    #[case::fract_exp("1.23e3", 1230.0)]
    #[case::fract_neg_exp("1.23e-3", 1.23e-3)]
    fn test_parse_float_fast_handles_fractional_mantissa(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(parse_float_fast(input).unwrap(), expected);
        let negated = format!("-{input}");
        assert_eq!(parse_float_fast(&negated).unwrap(), -expected);
    }

    #[test]
    fn test_parse_float_fast_bails_on_too_many_mantissa_digits() {
        assert!(parse_float_fast("1.2345678901234567890").is_none());
    }

    #[test]
    fn test_parse_float_fast_bails_on_exponent_out_of_table_range() {
        assert!(parse_float_fast("1e23").is_none());
        assert!(parse_float_fast("1e-23").is_none());
    }

    #[test]
    fn test_parse_number_rejects_null() {
        let mut c: Cursor<Checked> = Cursor::new(b"null");
        let err = parse_i32(&mut c, RangeCheck::CheckForNarrowing, LiteralAsString::Never).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedNull);

        let mut c: Cursor<Checked> = Cursor::new(b"null");
        let err = parse_f64(&mut c, Precision::Fast, LiteralAsString::Never).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedNull);
    }
}
