//! A given floating point number can be formatted in a wide range of ways, all of them loss-free
//!  and valid in terms of both JSON semantics and parseability. The number `0.1f64` for example
//!  has (among others) the following valid string representations:
//!  * 0.1
//!  * 1e-1
//!  * 1.0e-1
//!
//! The same holds for `1000f64` - it can be formatted as `1000`, `1000.0`, `1e3`, `1e+3` or
//!  `1.0e3` (and many other ways).
//!
//! There is no technical reason to prefer one over another; it is entirely about human
//!  readability. For this reason the serializer's floating point formatting is pluggable through
//!  the [FloatFormat] trait, with [DefaultFloatFormat] formatting numbers from `0.001` to
//!  `1000000.0` in regular decimal representation and numbers outside that range in exponential
//!  representation.
//!
//! This example shows how to plug in a custom [FloatFormat].

use json_contract::format::{CompactFormatter, FloatFormat};
use json_contract::io::StringSink;
use json_contract::serialize::{serialize_array, Serializer};

/// [ExponentialFloatFormat] formats all numbers in exponential representation.
struct ExponentialFloatFormat;
impl FloatFormat for ExponentialFloatFormat {
    fn write_f64(f: &mut impl core::fmt::Write, value: f64) -> core::fmt::Result {
        // JSON can not represent INFINITY, NEG_INFINITY or NAN as numbers, so they need special
        //  handling. We represent them as null literals; representing them as a default number
        //  like 0.0 would also work, if that fits the domain.
        if value.is_finite() {
            write!(f, "{:e}", value)
        }
        else {
            write!(f, "null")
        }
    }

    fn write_f32(f: &mut impl core::fmt::Write, value: f32) -> core::fmt::Result {
        if value.is_finite() {
            write!(f, "{:e}", value)
        }
        else {
            write!(f, "null")
        }
    }
}

fn main() {
    let mut sink = StringSink::new();

    // The 'Float' type parameter on Serializer is how this library makes float formatting
    //  pluggable. We pick the 'compact' JsonFormatter (we don't care about pretty printing here)
    //  and our own ExponentialFloatFormat.
    let mut ser: Serializer<StringSink, CompactFormatter, ExponentialFloatFormat> =
        Serializer::new(&mut sink, CompactFormatter, Default::default());

    serialize_array(&mut ser, |arr| {
        // we write floating point numbers using the regular API; the formatter is applied
        //  internally by the Serializer's Float type parameter.
        arr.element(|s| s.write_f64(1.0))?;
        arr.element(|s| s.write_f64(10.0))?;
        arr.element(|s| s.write_f64(0.1))
    })
    .expect("StringSink::write_all is infallible");
    drop(ser);

    // All three floating point numbers are now formatted in exponential representation. This does
    //  not make for good human readability, but it illustrates how to control floating point
    //  formatting.
    println!("formatted exponentially: {:?}", sink.into_string());
}
