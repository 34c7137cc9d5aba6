//! The contract-driven serializer (spec section 4.4): the inverse of `dispatch` - instead of
//!  reading JSON structure off a cursor, it writes JSON structure to a sink, using the same
//!  per-member descriptors. Grounded in the teacher's `blocking::json_writer`/`blocking::object`
//!  pair, generalized so structure is driven by a contract's recursive `serialize` calls instead
//!  of an RAII builder applications call directly.

use crate::contract::SerializeOptions;
use crate::format::{FloatFormat, JsonFormatter};
use crate::io::BlockingWrite;

/// The serializer's low-level sink: escaping, number formatting, and the formatter hooks
///  (newline/indent placement) that `ObjectWriter`/`ArrayWriter` build structure on top of.
pub struct Serializer<'w, W: BlockingWrite, F: JsonFormatter, Float: FloatFormat = crate::format::DefaultFloatFormat> {
    sink: &'w mut W,
    formatter: F,
    options: SerializeOptions,
    _float: core::marker::PhantomData<Float>,
}

impl<'w, W: BlockingWrite, F: JsonFormatter, Float: FloatFormat> Serializer<'w, W, F, Float> {
    pub fn new(sink: &'w mut W, formatter: F, options: SerializeOptions) -> Self {
        Serializer { sink, formatter, options, _float: core::marker::PhantomData }
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), W::Error> {
        self.sink.write_all(data)
    }

    pub fn write_escaped_string(&mut self, s: &str) -> Result<(), W::Error> {
        self.write_bytes(b"\"")?;
        if self.options.escape_non_ascii {
            for c in s.chars() {
                self.write_escaped_char(c)?;
            }
        }
        else {
            for b in s.bytes() {
                self.write_escaped_byte(b)?;
            }
        }
        self.write_bytes(b"\"")
    }

    fn write_escaped_byte(&mut self, b: u8) -> Result<(), W::Error> {
        match b {
            b'"' => self.write_bytes(b"\\\""),
            b'\\' => self.write_bytes(b"\\\\"),
            0x08 => self.write_bytes(b"\\b"),
            0x0c => self.write_bytes(b"\\f"),
            b'\n' => self.write_bytes(b"\\n"),
            b'\r' => self.write_bytes(b"\\r"),
            b'\t' => self.write_bytes(b"\\t"),
            b if b < 0x20 => self.write_u_escape(b as u32),
            b => self.write_bytes(&[b]),
        }
    }

    fn write_escaped_char(&mut self, c: char) -> Result<(), W::Error> {
        if c.is_ascii() {
            self.write_escaped_byte(c as u8)
        }
        else {
            let mut buf = [0u16; 2];
            for unit in c.encode_utf16(&mut buf) {
                self.write_u_escape(*unit as u32)?;
            }
            Ok(())
        }
    }

    fn write_u_escape(&mut self, code_unit: u32) -> Result<(), W::Error> {
        static HEX_DIGITS: [u8; 16] = *b"0123456789abcdef";
        let bytes = [
            b'\\',
            b'u',
            HEX_DIGITS[((code_unit >> 12) & 0xF) as usize],
            HEX_DIGITS[((code_unit >> 8) & 0xF) as usize],
            HEX_DIGITS[((code_unit >> 4) & 0xF) as usize],
            HEX_DIGITS[(code_unit & 0xF) as usize],
        ];
        self.write_bytes(&bytes)
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), W::Error> {
        self.write_bytes(if value { b"true" } else { b"false" })
    }

    pub fn write_null(&mut self) -> Result<(), W::Error> {
        self.write_bytes(b"null")
    }

    pub fn write_raw_number(&mut self, value: impl core::fmt::Display) -> Result<(), W::Error> {
        let as_string = self.options.numbers_as_strings;
        if as_string {
            self.write_bytes(b"\"")?;
        }
        {
            let mut wrapper = DisplayWrapper { ser: &mut *self, cached_error: None };
            use core::fmt::Write;
            let _ = write!(wrapper, "{}", value);
            if let Some(e) = wrapper.cached_error.take() {
                return Err(e);
            }
        }
        if as_string {
            self.write_bytes(b"\"")?;
        }
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<(), W::Error> {
        let as_string = self.options.numbers_as_strings;
        if as_string {
            self.write_bytes(b"\"")?;
        }
        {
            let mut wrapper = DisplayWrapper { ser: &mut *self, cached_error: None };
            use core::fmt::Write;
            let _ = Float::write_f64(&mut wrapper, value);
            if let Some(e) = wrapper.cached_error.take() {
                return Err(e);
            }
        }
        if as_string {
            self.write_bytes(b"\"")?;
        }
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<(), W::Error> {
        let as_string = self.options.numbers_as_strings;
        if as_string {
            self.write_bytes(b"\"")?;
        }
        {
            let mut wrapper = DisplayWrapper { ser: &mut *self, cached_error: None };
            use core::fmt::Write;
            let _ = Float::write_f32(&mut wrapper, value);
            if let Some(e) = wrapper.cached_error.take() {
                return Err(e);
            }
        }
        if as_string {
            self.write_bytes(b"\"")?;
        }
        Ok(())
    }

    pub fn options(&self) -> SerializeOptions {
        self.options
    }

    /// Writes a JSON object member name, honoring `SerializeOptions::quote_keys`: bare
    ///  identifier-shaped names are emitted unquoted when the caller opted out of quoting, the way
    ///  a hand-written JSON-ish config format often does; anything else is always quoted.
    fn write_key(&mut self, name: &str) -> Result<(), W::Error> {
        if !self.options.quote_keys && is_bare_identifier(name) {
            self.write_bytes(name.as_bytes())
        }
        else {
            self.write_escaped_string(name)
        }
    }

    /// Writes `text` to the sink with no escaping, quoting, or validation - for re-emitting a
    ///  [`crate::contract::Raw`] value's captured source text byte-for-byte.
    pub fn write_raw_fragment(&mut self, text: &str) -> Result<(), W::Error> {
        self.write_bytes(text.as_bytes())
    }
}

/// A name that reads back as a single JSON5-style bare identifier: an ASCII letter or `_`,
///  followed by ASCII letters, digits, or `_`. Anything else (including the empty string) must
///  stay quoted to round-trip as valid JSON.
fn is_bare_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

macro_rules! write_int {
    ($t:ty, $fn_name:ident) => {
        impl<'w, W: BlockingWrite, F: JsonFormatter, Float: FloatFormat> Serializer<'w, W, F, Float> {
            pub fn $fn_name(&mut self, value: $t) -> Result<(), W::Error> {
                self.write_raw_number(value)
            }
        }
    };
}
write_int!(i8, write_i8);
write_int!(u8, write_u8);
write_int!(i16, write_i16);
write_int!(u16, write_u16);
write_int!(i32, write_i32);
write_int!(u32, write_u32);
write_int!(i64, write_i64);
write_int!(u64, write_u64);
write_int!(i128, write_i128);
write_int!(u128, write_u128);
write_int!(isize, write_isize);
write_int!(usize, write_usize);

struct DisplayWrapper<'a, 'w, W: BlockingWrite, F: JsonFormatter, Float: FloatFormat> {
    ser: &'a mut Serializer<'w, W, F, Float>,
    cached_error: Option<W::Error>,
}
impl<'a, 'w, W: BlockingWrite, F: JsonFormatter, Float: FloatFormat> core::fmt::Write for DisplayWrapper<'a, 'w, W, F, Float> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        match self.ser.write_bytes(s.as_bytes()) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.cached_error = Some(e);
                Err(core::fmt::Error)
            }
        }
    }
}

/// Writes a JSON object, handling member separators and formatter hooks; the closure receives
///  one `&mut ObjectWriter` and calls `member` once per emitted key/value pair.
pub fn serialize_object<'w, W: BlockingWrite, F: JsonFormatter, Float: FloatFormat>(
    ser: &mut Serializer<'w, W, F, Float>,
    body: impl FnOnce(&mut ObjectWriter<'_, 'w, W, F, Float>) -> Result<(), W::Error>,
) -> Result<(), W::Error> {
    ser.write_bytes(b"{")?;
    ser.sink.write_all(ser.formatter.after_start_nested().as_bytes())?;
    let is_initial = {
        let mut ow = ObjectWriter { ser: &mut *ser, is_initial: true };
        body(&mut ow)?;
        ow.is_initial
    };
    ser.sink.write_all(ser.formatter.before_end_nested(is_initial).as_bytes())?;
    ser.write_bytes(b"}")
}

pub struct ObjectWriter<'s, 'w, W: BlockingWrite, F: JsonFormatter, Float: FloatFormat> {
    ser: &'s mut Serializer<'w, W, F, Float>,
    is_initial: bool,
}
impl<'s, 'w, W: BlockingWrite, F: JsonFormatter, Float: FloatFormat> ObjectWriter<'s, 'w, W, F, Float> {
    pub fn member(&mut self, name: &str, value: impl FnOnce(&mut Serializer<'w, W, F, Float>) -> Result<(), W::Error>) -> Result<(), W::Error> {
        if !self.is_initial {
            self.ser.write_bytes(b",")?;
            self.ser.sink.write_all(self.ser.formatter.after_element().as_bytes())?;
        }
        self.is_initial = false;
        self.ser.sink.write_all(self.ser.formatter.indent().as_bytes())?;
        self.ser.write_key(name)?;
        self.ser.write_bytes(b":")?;
        self.ser.sink.write_all(self.ser.formatter.after_key().as_bytes())?;
        value(self.ser)
    }

    pub fn ser(&mut self) -> &mut Serializer<'w, W, F, Float> {
        self.ser
    }
}

/// Writes a JSON array, handling element separators and formatter hooks.
pub fn serialize_array<'w, W: BlockingWrite, F: JsonFormatter, Float: FloatFormat>(
    ser: &mut Serializer<'w, W, F, Float>,
    body: impl FnOnce(&mut ArrayWriter<'_, 'w, W, F, Float>) -> Result<(), W::Error>,
) -> Result<(), W::Error> {
    ser.write_bytes(b"[")?;
    ser.sink.write_all(ser.formatter.after_start_nested().as_bytes())?;
    let is_initial = {
        let mut aw = ArrayWriter { ser: &mut *ser, is_initial: true };
        body(&mut aw)?;
        aw.is_initial
    };
    ser.sink.write_all(ser.formatter.before_end_nested(is_initial).as_bytes())?;
    ser.write_bytes(b"]")
}

pub struct ArrayWriter<'s, 'w, W: BlockingWrite, F: JsonFormatter, Float: FloatFormat> {
    ser: &'s mut Serializer<'w, W, F, Float>,
    is_initial: bool,
}
impl<'s, 'w, W: BlockingWrite, F: JsonFormatter, Float: FloatFormat> ArrayWriter<'s, 'w, W, F, Float> {
    pub fn element(&mut self, value: impl FnOnce(&mut Serializer<'w, W, F, Float>) -> Result<(), W::Error>) -> Result<(), W::Error> {
        if !self.is_initial {
            self.ser.write_bytes(b",")?;
            self.ser.sink.write_all(self.ser.formatter.after_element().as_bytes())?;
        }
        self.is_initial = false;
        self.ser.sink.write_all(self.ser.formatter.indent().as_bytes())?;
        value(self.ser)
    }

    pub fn ser(&mut self) -> &mut Serializer<'w, W, F, Float> {
        self.ser
    }
}

/// Serialize `value` to an in-memory `String` in compact form - the common case, and the reason
///  this entry point (unlike [`crate::parse::from_json`]) is infallible: [`crate::io::StringSink`]
///  never fails.
pub fn to_json<T: crate::contract::JsonContract>(value: &T) -> alloc::string::String {
    to_json_with_options(value, SerializeOptions::default())
}

/// [`to_json`] with [`SerializationFormat::Pretty`](crate::contract::SerializationFormat::Pretty).
pub fn to_json_pretty<T: crate::contract::JsonContract>(value: &T) -> alloc::string::String {
    to_json_with_options(value, SerializeOptions { format: crate::contract::SerializationFormat::Pretty, ..SerializeOptions::default() })
}

/// Same as [`to_json`], spelled out for call sites that pair it with
///  [`crate::parse::from_json_checked`] for symmetry.
pub fn to_json_checked<T: crate::contract::JsonContract>(value: &T) -> alloc::string::String {
    to_json(value)
}

/// [`to_json`] with explicit [`SerializeOptions`], dispatching to [`CompactFormatter`] or
///  [`PrettyFormatter`] based on `options.format`.
pub fn to_json_with_options<T: crate::contract::JsonContract>(value: &T, options: SerializeOptions) -> alloc::string::String {
    use crate::format::{CompactFormatter, PrettyFormatter};
    let mut sink = crate::io::StringSink::new();
    match options.format {
        crate::contract::SerializationFormat::Compact => {
            let mut ser = Serializer::new(&mut sink, CompactFormatter, options);
            value.write_json(&mut ser).expect("StringSink::write_all is infallible");
        }
        crate::contract::SerializationFormat::Pretty => {
            let mut ser = Serializer::new(&mut sink, PrettyFormatter::new(), options);
            value.write_json(&mut ser).expect("StringSink::write_all is infallible");
        }
    }
    sink.into_string()
}

/// Serialize `value` into an arbitrary [`crate::io::BlockingWrite`] sink, propagating the sink's
///  own I/O error unchanged (spec section 7's propagation policy).
pub fn to_json_writer<T, W, F>(value: &T, sink: &mut W, formatter: F, options: SerializeOptions) -> Result<(), W::Error>
where
    T: crate::contract::JsonContract,
    W: BlockingWrite,
    F: JsonFormatter,
{
    let mut ser = Serializer::new(sink, formatter, options);
    value.write_json(&mut ser)
}
