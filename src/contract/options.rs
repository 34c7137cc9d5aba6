//! Runtime-selectable options that sit alongside the compile-time `Policy` generic (spec
//!  section 6): things that can differ between calls to the same contract rather than being
//!  baked into the monomorphized parse path.

use crate::cursor::Comments;

/// Per-member behavior when a class member is absent from the JSON object (spec section 6).
///  Explicit JSON `null` for a nullable member always yields its null-case value regardless of
///  this setting - `NullBehavior` only governs *omission*.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum NullBehavior {
    /// omission produces the null-case value, same as an explicit `null`
    #[default]
    NullVisible,
    /// the member must be present in the JSON object, even though its value may be `null`
    MustExist,
    /// omission constructs `Default::default()` for the member's Rust type
    DefaultOnMissing,
}

/// Runtime options passed into every `from_json`-family entry point.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub comments: Comments,
    /// opt into the single-pass, declaration-order-only member dispatch (spec section 9's
    ///  `StrictOrder` escape hatch) instead of the default order-tolerant two-pass-equivalent scan
    pub strict_order: bool,
    /// when true, an unmapped JSON object member is reported via `on_unknown_member` instead of
    ///  being silently skipped; it is never fatal (spec section 7)
    pub report_unknown_members: bool,
}
impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { comments: Comments::None, strict_order: false, report_unknown_members: false }
    }
}

/// Output shape (spec section 4.4 / 6).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum SerializationFormat {
    #[default]
    Compact,
    Pretty,
}

/// Per-member policy for how a nullable value is represented on the way out (spec section 4.4).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum NullEmission {
    /// absent value: member is left out of the object entirely
    #[default]
    Omit,
    /// absent value: member is emitted with a JSON `null`
    EmitNull,
}

/// Options shared across an entire `to_json` call (spec section 6: "optional flags for escape
///  policy, key-quoting, and always-as-string numerics").
#[derive(Debug, Clone, Copy)]
pub struct SerializeOptions {
    pub format: SerializationFormat,
    /// escape every byte `>= 0x80` as `\uXXXX` instead of passing UTF-8 through verbatim
    pub escape_non_ascii: bool,
    /// `false` emits a member name as a bare identifier when it looks like one (starts with an
    ///  ASCII letter or `_`, followed only by letters/digits/`_`) instead of always quoting it.
    pub quote_keys: bool,
    /// emit every numeric member as a quoted JSON string instead of a bare JSON number, for
    ///  consumers (JavaScript foremost) that lose precision on integers wider than 53 bits
    pub numbers_as_strings: bool,
}
impl Default for SerializeOptions {
    fn default() -> Self {
        SerializeOptions {
            format: SerializationFormat::Compact,
            escape_non_ascii: false,
            quote_keys: true,
            numbers_as_strings: false,
        }
    }
}
