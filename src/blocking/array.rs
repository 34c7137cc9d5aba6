use crate::io::BlockingWrite;
use crate::blocking::json_writer::JsonWriter;
use crate::blocking::object::JsonObject;
use crate::blocking::JsonFormatter;


/// An [JsonArray] is the API for writing a JSON array, i.e. a sequence of elements. The 
///  closing `]` is written when the [JsonArray] instance goes out of scope, or when its `end()`
///  function is called.
///
/// For nested objects or arrays, the function calls return new [JsonObject] or [JsonArray] instances,
///  respectively. Rust's type system ensures that applications can only interact with the innermost
///  such instance, and call outer instances only when all nested instances have gone out of scope.   
///
/// A typical use of the library is to create a [JsonWriter] and then wrap it in a top-level 
///  [JsonArray] instance.
pub struct JsonArray<'a, W: BlockingWrite, F: JsonFormatter> {
    writer: &'a mut JsonWriter<W, F>,
    is_initial: bool,
    is_ended: bool,
}

impl<'a, W: BlockingWrite, F: JsonFormatter> JsonArray<'a, W, F> {
    /// Create a new [JsonArray] instance. Application code can do this explicitly only initially
    ///  as a starting point for writing JSON. Nested arrays are created by the library.
    pub fn new(writer: &'a mut JsonWriter<W, F>) -> Result<Self, W::Error> {
        writer.write_bytes(b"[")?;
        writer.write_format_after_start_nested()?;

        Ok(JsonArray {
            writer,
            is_initial: true,
            is_ended: false,
        })
    }

    fn handle_initial(&mut self) -> Result<(), W::Error> {
        if self.is_initial {
            self.is_initial = false;
        }
        else {
            self.writer.write_bytes(b",")?;
            self.writer.write_format_after_element()?;
        }
        self.writer.write_format_indent()?;
        Ok(())
    }

    /// Write an element of type 'string', escaping the provided string value.
    pub fn write_string_value(&mut self, value: &str) -> Result<(), W::Error> {
        self.handle_initial()?;
        self.writer.write_escaped_string(value)
    }

    /// Write an element of type 'bool'.
    pub fn write_bool_value(&mut self, value: bool) -> Result<(), W::Error> {
        self.handle_initial()?;
        self.writer.write_bool(value)
    }

    /// Write a null literal as an element.
    pub fn write_null_value(&mut self) -> Result<(), W::Error> {
        self.handle_initial()?;
        self.writer.write_bytes(b"null")
    }

    /// Write an element with a generic int value. This function fits most Rust integral
    ///  types; for the exceptions, there are separate functions.
    pub fn write_int_value(&mut self, value: impl Into<i128>) -> Result<(), W::Error> {
        self.handle_initial()?;
        self.writer.write_bytes(format!("{}", value.into()).as_bytes())
    }

    /// Write a u128 as an element.
    pub fn write_u128_value(&mut self, value: u128) -> Result<(), W::Error> {
        self.handle_initial()?;
        self.writer.write_bytes(format!("{}", value).as_bytes())
    }

    /// Write a usize as an element.
    pub fn write_usize_value(&mut self, value: usize) -> Result<(), W::Error> {
        self.handle_initial()?;
        self.writer.write_bytes(format!("{}", value).as_bytes())
    }

    /// Write an isize as an element.
    pub fn write_isize_value(&mut self, value: isize) -> Result<(), W::Error> {
        self.handle_initial()?;
        self.writer.write_bytes(format!("{}", value).as_bytes())
    }

    /// Write an f64 value as an element. If the value is not finite (i.e. infinite or NaN),
    ///  a null literal is written instead. Different behavior (e.g. leaving out the element
    ///  for non-finite numbers, representing them in some other way etc.) is the responsibility
    ///  of application code.
    pub fn write_f64_value(&mut self, value: f64) -> Result<(), W::Error> {
        self.handle_initial()?;
        self.writer.write_f64(value)
    }

    /// Write an f32 value as an element. If the value is not finite (i.e. infinite or NaN),
    ///  a null literal is written instead. Different behavior (e.g. leaving out the element
    ///  for non-finite numbers, representing them in some other way etc.) is the responsibility
    ///  of application code.
    pub fn write_f32_value(&mut self, value: f32) -> Result<(), W::Error> {
        self.handle_initial()?;
        self.writer.write_f32(value)
    }

    /// Start a nested object as an element. This function returns a new [JsonObject] instance
    ///  for writing elements to the nested object. When the returned [JsonObject] goes out of scope
    ///  (per syntactic scope or an explicit call to `end()`), the nested object is closed, and
    ///  application code can continue adding elements to the owning `self` object.
    pub fn start_object(&mut self) -> Result<JsonObject<W, F>, W::Error> {
        self.handle_initial()?;
        JsonObject::new(self.writer)
    }

    /// Start a nested array as an element. This function returns a new [JsonArray] instance
    ///  for writing elements to the nested object. When the returned [JsonArray] goes out of scope
    ///  (per syntactic scope or an explicit call to `end()`), the nested object is closed, and
    ///  application code can continue adding elements to the owning `self` object.
    pub fn start_array(&mut self) -> Result<JsonArray<W, F>, W::Error> {
        self.handle_initial()?;
        JsonArray::new(self.writer)
    }

    /// Explicitly end this array's lifetime and write the closing bracket.
    pub fn end(self) -> Result<(), W::Error> {
        let mut mut_self = self;
        mut_self._end()
    }

    fn _end(&mut self) -> Result<(), W::Error> {
        self.writer.write_format_before_end_nested(self.is_initial)?;
        self.writer.write_bytes(b"]")?;
        self.is_ended = true;
        Ok(())
    }
}

impl <'a, W: BlockingWrite, F: JsonFormatter> Drop for JsonArray<'a, W, F> {
    fn drop(&mut self) {
        if !self.is_ended {
            let _ = self._end();
        }
    }
}
