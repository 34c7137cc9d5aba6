use crate::blocking::array::JsonArray;
use crate::io::BlockingWrite;
use crate::blocking::json_writer::JsonWriter;
use crate::blocking::JsonFormatter;

/// An [JsonObject] is the API for writing a JSON object, i.e. a sequence of key/value pairs. The
///  closing `}` is written when the [JsonObject] instance goes out of scope, or when its `end()`
///  function is called.
///
/// For nested objects or arrays, the function calls return new [JsonObject] or [JsonArray] instances,
///  respectively. Rust's type system ensures that applications can only interact with the innermost
///  such instance, and call outer instances only when all nested instances have gone out of scope.
///
/// A typical use of the library is to create a [JsonWriter] and then wrap it in a top-level
///  [JsonObject] instance.
pub struct JsonObject<'a, W: BlockingWrite, F: JsonFormatter> {
    writer: &'a mut JsonWriter<W, F>,
    is_initial: bool,
    is_ended: bool,
}
impl<'a, W: BlockingWrite, F: JsonFormatter> JsonObject<'a, W, F> {
    /// Create a new [JsonObject] instance. Application code can do this explicitly only initially
    ///  as a starting point for writing JSON. Nested objects are created by the library.
    pub fn new(writer: &'a mut JsonWriter<W, F>) -> Result<Self, W::Error> {
        writer.write_bytes(b"{")?;
        writer.write_format_after_start_nested()?;
        Ok(JsonObject {
            writer,
            is_initial: true,
            is_ended: false,
        })
    }

    fn write_key(&mut self, key: &str) -> Result<(), W::Error> {
        if !self.is_initial {
            self.writer.write_bytes(b",")?;
            self.writer.write_format_after_element()?;
        }
        self.is_initial = false;
        self.writer.write_format_indent()?;
        self.writer.write_escaped_string(key)?;
        self.writer.write_bytes(b":")?;
        self.writer.write_format_after_key()
    }

    /// Write a key/value pair with element type 'string', escaping the provided string value.
    pub fn write_string_value(&mut self, key: &str, value: &str) -> Result<(), W::Error> {
        self.write_key(key)?;
        self.writer.write_escaped_string(value)
    }

    /// Write a key/value pair with element type 'bool'
    pub fn write_bool_value(&mut self, key: &str, value: bool) -> Result<(), W::Error> {
        self.write_key(key)?;
        self.writer.write_bool(value)
    }

    /// Write a key with a null literal as its value
    pub fn write_null_value(&mut self, key: &str) -> Result<(), W::Error> {
        self.write_key(key)?;
        self.writer.write_bytes(b"null")
    }

    /// Write a key/value pair with an f64 value. If the value is not finite (i.e. infinite or NaN),
    ///  a null literal is written instead. Different behavior (e.g. leaving out the whole key/value
    ///  pair for non-finite numbers, representing them in some other way etc.) is the responsibility
    ///  of application code.
    pub fn write_f64_value(&mut self, key: &str, value: f64) -> Result<(), W::Error> {
        self.write_key(key)?;
        self.writer.write_f64(value)
    }

    /// Write a key/value pair with an f32 value. If the value is not finite (i.e. infinite or NaN),
    ///  a null literal is written instead. Different behavior (e.g. leaving out the whole key/value
    ///  pair for non-finite numbers, representing them in some other way etc.) is the responsibility
    ///  of application code.
    pub fn write_f32_value(&mut self, key: &str, value: f32) -> Result<(), W::Error> {
        self.write_key(key)?;
        self.writer.write_f32(value)
    }

    /// Start a nested object under a given key. This function returns a new [JsonObject] instance
    ///  for writing elements to the nested object. When the returned [JsonObject] goes out of scope
    ///  (per syntactic scope or an explicit call to `end()`), the nested object is closed, and
    ///  application code can continue adding elements to the owning `self` object.
    pub fn start_object(&mut self, key: &str) -> Result<JsonObject<W, F>, W::Error> {
        self.write_key(key)?;
        JsonObject::new(&mut self.writer)
    }

    /// Start a nested array under a given key. This function returns a new [JsonArray] instance
    ///  for writing elements to the nested object. When the returned [JsonArray] goes out of scope
    ///  (per syntactic scope or an explicit call to `end()`), the nested array is closed, and
    ///  application code can continue adding elements to the owning `self` object.
    pub fn start_array(&mut self, key: &str) -> Result<JsonArray<W, F>, W::Error> {
        self.write_key(key)?;
        JsonArray::new(self.writer)
    }

    /// Explicitly end this object's lifetime and write the closing bracket.
    pub fn end(self) -> Result<(), W::Error> {
        let mut mut_self = self;
        mut_self._end()
    }

    fn _end(&mut self) -> Result<(), W::Error> {
        self.writer.write_format_before_end_nested(self.is_initial)?;
        self.writer.write_bytes(b"}")?;
        self.is_ended = true;
        Ok(())
    }
}

macro_rules! write_obj_int {
    ($t:ty ; $f:ident) => {
impl<'a, W: BlockingWrite, F: JsonFormatter> JsonObject<'a, W, F> {
    /// Write a key/value pair with an int value of type $t.
    pub fn $f(&mut self, key: &str, value: $t) -> Result<(), W::Error> {
        self.write_key(key)?;
        self.writer.write_raw_num(value)
    }
}
    };
}
write_obj_int!(i8; write_i8_value);
write_obj_int!(u8; write_u8_value);
write_obj_int!(i16; write_i16_value);
write_obj_int!(u16; write_u16_value);
write_obj_int!(i32; write_i32_value);
write_obj_int!(u32; write_u32_value);
write_obj_int!(i64; write_i64_value);
write_obj_int!(u64; write_u64_value);
write_obj_int!(i128; write_i128_value);
write_obj_int!(u128; write_u128_value);
write_obj_int!(isize; write_isize_value);
write_obj_int!(usize; write_usize_value);

impl <'a, W: BlockingWrite, F: JsonFormatter> Drop for JsonObject<'a, W, F> {
    fn drop(&mut self) {
        if !self.is_ended {
            if let Err(e) = self._end() {
                self.writer.set_unreported_error(e);
            }
        }
    }
}
