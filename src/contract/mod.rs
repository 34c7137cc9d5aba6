//! The contract model (spec section 4.6 / 9): a trait implemented once per target type, paired
//!  with a `macro_rules!`-based helper that reduces the boilerplate of registering a class
//!  member's parse/serialize behavior, in the spirit of the teacher's own `write_obj_int!` macro.
//!  A full derive (`#[derive(JsonContract)]`) would need a proc-macro, which is outside this
//!  crate's dependency stack; contracts are written by hand, the same way a `serde::Deserialize`
//!  impl can be written by hand without `serde_derive`.

mod options;

pub use options::{NullBehavior, NullEmission, ParseOptions, SerializationFormat, SerializeOptions};

use crate::cursor::{Cursor, Policy};
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::format::{FloatFormat, JsonFormatter};
use crate::io::BlockingWrite;
use crate::serialize::Serializer;

/// Implemented once per target type `T`: the declarative mapping between `T` and its JSON shape
///  (spec section 3's "class contract"). `parse_json` is generic over the checked/unchecked
///  cursor policy so the dispatch loop it drives monomorphizes per policy; `write_json` is
///  generic over the output formatter and float-formatting strategy for the same reason.
pub trait JsonContract: Sized {
    fn parse_json<P: Policy>(cursor: &mut Cursor<P>, options: &ParseOptions) -> ParseResult<Self>;

    fn write_json<W: BlockingWrite, F: JsonFormatter, Float: FloatFormat>(
        &self,
        ser: &mut Serializer<W, F, Float>,
    ) -> Result<(), W::Error>;
}

/// Registers one optional class member inside a hand-written `JsonContract::parse_json` body:
///  declares the `Option<$ty>` local `$field` that accumulates the parsed value, and pushes a
///  [`crate::dispatch::MemberSlot`] into `$slots` that fills it in. Assumes the enclosing
///  `parse_json` is generic over a cursor policy type parameter named `P`, as
///  `JsonContract::parse_json` itself is.
///
///  The trailing `$null_behavior` (spec section 6) controls what an *absent* member does, not an
///  explicit JSON `null` - a nullable member's own `$parse` closure is responsible for telling
///  those apart, the way `nickname` does in the worked contract example:
///  * `NullBehavior::NullVisible` (the default if `$null_behavior` is omitted) leaves `$field` as
///    `None`, same as an explicit `null`.
///  * `NullBehavior::MustExist` fails the whole dispatch with `MissingMember` before `$field` is
///    ever read - enforced by `dispatch_class_members` itself.
///  * `NullBehavior::DefaultOnMissing` fills `$field` with `Default::default()` of the type
///    `$parse` produces.
///
/// ```ignore
/// let mut slots = alloc::vec::Vec::new();
/// json_member!(slots, nickname, "nickname", |c| Ok(crate::extract::decode_string(c)?.as_str().to_string()));
/// $crate::dispatch::dispatch_class_members(cursor, &mut slots, options, |_| {})?;
/// ```
#[macro_export]
macro_rules! json_member {
    ($slots:ident, $field:ident, $json_name:literal, $parse:expr) => {
        $crate::json_member!($slots, $field, $json_name, $parse, $crate::contract::NullBehavior::NullVisible);
    };
    ($slots:ident, $field:ident, $json_name:literal, $parse:expr, $null_behavior:expr) => {
        let mut $field = None;
        let __null_behavior = $null_behavior;
        let mut __handler = |c: Option<&mut $crate::cursor::Cursor<'_, P>>| -> $crate::error::ParseResult<()> {
            match c {
                Some(c) => {
                    $field = Some(($parse)(c)?);
                    Ok(())
                }
                None => {
                    if __null_behavior == $crate::contract::NullBehavior::DefaultOnMissing {
                        $field = Some(core::default::Default::default());
                    }
                    Ok(())
                }
            }
        };
        $slots.push($crate::dispatch::MemberSlot::new($json_name, &mut __handler).with_null_behavior(__null_behavior));
    };
}

/// Same as [`json_member!`], but `$on_missing` is evaluated if the member was never matched,
///  instead of silently leaving `$field` as `None` - use for members that are not `Option<_>`
///  on the target type, so the caller can fail with `MissingMember` or substitute a default. The
///  trailing `$null_behavior` is as in [`json_member!`]; when it is `NullBehavior::MustExist`,
///  `$on_missing` is never evaluated since `dispatch_class_members` fails before calling the slot.
///
/// ```ignore
/// json_required_member!(slots, age, "age", |c| crate::extract::parse_u32(c, RangeCheck::CheckForNarrowing, LiteralAsString::Never),
///     Err(crate::error::ParseError::without_location(crate::error::ParseErrorKind::MissingMember, "missing `age`")));
/// ```
#[macro_export]
macro_rules! json_required_member {
    ($slots:ident, $field:ident, $json_name:literal, $parse:expr, $on_missing:expr) => {
        $crate::json_required_member!($slots, $field, $json_name, $parse, $on_missing, $crate::contract::NullBehavior::NullVisible);
    };
    ($slots:ident, $field:ident, $json_name:literal, $parse:expr, $on_missing:expr, $null_behavior:expr) => {
        let mut $field = None;
        let __null_behavior = $null_behavior;
        let mut __handler = |c: Option<&mut $crate::cursor::Cursor<'_, P>>| -> $crate::error::ParseResult<()> {
            match c {
                Some(c) => {
                    $field = Some(($parse)(c)?);
                    Ok(())
                }
                None => {
                    $field = Some($on_missing?);
                    Ok(())
                }
            }
        };
        $slots.push($crate::dispatch::MemberSlot::new($json_name, &mut __handler).with_null_behavior(__null_behavior));
    };
}

/// A contract that is nothing but another type's contract under a different Rust name
///  (`Descriptor::Alias` in the descriptor tag list): for newtype wrappers that want their inner
///  type's JSON shape verbatim, with no member of their own.
pub struct Alias<Inner>(pub Inner);
impl<Inner: JsonContract> JsonContract for Alias<Inner> {
    fn parse_json<P: Policy>(cursor: &mut Cursor<P>, options: &ParseOptions) -> ParseResult<Self> {
        Ok(Alias(Inner::parse_json(cursor, options)?))
    }

    fn write_json<W: BlockingWrite, F: JsonFormatter, Float: FloatFormat>(
        &self,
        ser: &mut Serializer<W, F, Float>,
    ) -> Result<(), W::Error> {
        self.0.write_json(ser)
    }
}

/// The un-interpreted JSON text of a value (`Descriptor::Raw` in the descriptor tag list): a
///  member mapped `Raw` defers interpretation instead of being parsed into a typed value,
///  typically because the member's actual shape depends on a discriminator read elsewhere in the
///  same object. Parsing captures a borrowed slice of the source text; serialization re-emits it
///  byte-for-byte, unvalidated.
///
/// `Raw` is a leaf extraction helper, not a `JsonContract` impl in its own right - like
///  [`crate::extract::JsonString`], its borrow is tied to the cursor's input lifetime, which
///  `JsonContract::parse_json`'s signature (a fresh elided lifetime per call) can't express for
///  `Self`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Raw<'a>(pub &'a str);

impl<'a> Raw<'a> {
    /// Captures the source text of the value at the cursor without interpreting it, advancing
    ///  the cursor past it exactly as [`Cursor::skip_value`](crate::cursor::Cursor::skip_value)
    ///  does.
    pub fn parse_from<P: Policy>(cursor: &mut Cursor<'a, P>) -> ParseResult<Self> {
        let before = cursor.remaining();
        cursor.skip_value()?;
        let consumed = before.len() - cursor.remaining().len();
        let text = core::str::from_utf8(&before[..consumed])
            .map_err(|_| raw_err::<P>(cursor, "raw value is not valid UTF-8"))?;
        Ok(Raw(text))
    }

    /// Writes the captured text verbatim - no re-validation, no re-escaping.
    pub fn write_verbatim<W: BlockingWrite, F: JsonFormatter, Float: FloatFormat>(
        &self,
        ser: &mut Serializer<W, F, Float>,
    ) -> Result<(), W::Error> {
        ser.write_raw_fragment(self.0)
    }
}

fn raw_err<P: Policy>(cursor: &Cursor<P>, reason: &'static str) -> ParseError {
    if P::CHECKED {
        ParseError::new(ParseErrorKind::InvalidUtf8, reason, cursor.location())
    }
    else {
        ParseError::without_location(ParseErrorKind::InvalidUtf8, reason)
    }
}

/// The generic realization of `Descriptor::Null<inner>`: a member whose JSON value may be
///  `null`, mapped to Rust's own `Option`. Explicit `null` and a present value both parse;
///  serialization always emits the member (as `null` or as `Some`'s inner value) - callers
///  wanting the `NullBehavior::DefaultOnMissing`/omit-on-`None` shapes instead compose
///  [`json_member!`] directly, the way `nickname` does in the worked contract example, rather
///  than going through this blanket impl.
impl<Inner: JsonContract> JsonContract for Option<Inner> {
    fn parse_json<P: Policy>(cursor: &mut Cursor<P>, options: &ParseOptions) -> ParseResult<Self> {
        if cursor.peek()? == b'n' {
            cursor.skip_null()?;
            Ok(None)
        }
        else {
            Ok(Some(Inner::parse_json(cursor, options)?))
        }
    }

    fn write_json<W: BlockingWrite, F: JsonFormatter, Float: FloatFormat>(
        &self,
        ser: &mut Serializer<W, F, Float>,
    ) -> Result<(), W::Error> {
        match self {
            Some(inner) => inner.write_json(ser),
            None => ser.write_null(),
        }
    }
}
