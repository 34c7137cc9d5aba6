//! Illustrates the contract-driven core: instead of pulling tokens off a `JsonReader` by hand
//!  (see `skipping.rs`, `number_parsing.rs`), a type describes its own JSON shape once, through a
//!  `JsonContract` impl, and the library drives parsing and serialization from that description.
//!
//! `json_member!`/`json_required_member!` are narrow helpers that cut down the boilerplate of
//!  registering one member's parse behavior - they are not a full derive, so the loop that drives
//!  them (`dispatch_class_members`) and the `write_json` side are still written out by hand.
//!
//! This walks through:
//!  * a struct with required and optional (nullable) members
//!  * a struct member that is itself a nested contract
//!  * an array member
//!  * a variant type, dispatched both by base JSON type and by an explicit tag member
//!  * the `jsonlines` iterator, reading one contract value per line

use json_contract::contract::{NullBehavior, ParseOptions};
use json_contract::cursor::{Cursor, Policy};
use json_contract::dispatch::{dispatch_array, dispatch_class_members, dispatch_variant_by_base_type, dispatch_variant_tagged};
use json_contract::error::{ParseError, ParseErrorKind, ParseResult};
use json_contract::extract::{decode_string, parse_bool, parse_u32, LiteralAsString, RangeCheck};
use json_contract::format::{FloatFormat, JsonFormatter};
use json_contract::io::BlockingWrite;
use json_contract::{json_member, json_required_member};
use json_contract::parse::from_json;
use json_contract::serialize::{serialize_array, serialize_object, Serializer};
use json_contract::{json_lines_iterator, to_json, to_json_pretty, JsonContract};

/// A postal address, nested inside `Person` below.
struct Address {
    city: String,
    zip: u32,
}
impl JsonContract for Address {
    fn parse_json<P: Policy>(cursor: &mut Cursor<P>, options: &ParseOptions) -> ParseResult<Self> {
        let mut slots = Vec::new();
        json_required_member!(slots, city, "city", |c| Ok(decode_string(c)?.as_str().to_string()),
            Err(ParseError::without_location(ParseErrorKind::MissingMember, "missing `city`")));
        json_required_member!(slots, zip, "zip", |c| parse_u32(c, RangeCheck::CheckForNarrowing, LiteralAsString::Never),
            Err(ParseError::without_location(ParseErrorKind::MissingMember, "missing `zip`")));
        dispatch_class_members(cursor, &mut slots, options, |_| {})?;
        Ok(Address { city: city.expect("on_missing would have failed otherwise"), zip: zip.expect("on_missing would have failed otherwise") })
    }

    fn write_json<W: BlockingWrite, F: JsonFormatter, Float: FloatFormat>(&self, ser: &mut Serializer<W, F, Float>) -> Result<(), W::Error> {
        serialize_object(ser, |ow| {
            ow.member("city", |s| s.write_escaped_string(&self.city))?;
            ow.member("zip", |s| s.write_u32(self.zip))
        })
    }
}

/// A person, combining a required member, a nullable member (`NullBehavior::NullVisible`: absent
///  and explicit `null` are equivalent), an array member, and a nested contract.
struct Person {
    name: String,
    nickname: Option<String>,
    address: Address,
    pets: Vec<String>,
    /// absent from the JSON object entirely -> `NullBehavior::DefaultOnMissing` fills this with
    ///  `Vec::default()` rather than requiring every producer to write `"tags": []`.
    tags: Vec<String>,
}
impl JsonContract for Person {
    fn parse_json<P: Policy>(cursor: &mut Cursor<P>, options: &ParseOptions) -> ParseResult<Self> {
        let mut slots = Vec::new();
        json_required_member!(slots, name, "name", |c| Ok(decode_string(c)?.as_str().to_string()),
            Err(ParseError::without_location(ParseErrorKind::MissingMember, "missing `name`")));

        // `nickname` is nullable (`Option<String>`): its closure must itself tell an explicit
        //  JSON `null` apart from an actual string, since `json_member!` only leaves the field
        //  `None` for an *absent* member (see `NullBehavior::NullVisible`, the default).
        json_member!(slots, nickname, "nickname", |c: &mut Cursor<P>| -> ParseResult<Option<String>> {
            if c.peek()? == b'n' {
                c.skip_null()?;
                Ok(None)
            }
            else {
                Ok(Some(decode_string(c)?.as_str().to_string()))
            }
        });

        json_required_member!(slots, address, "address", |c| Address::parse_json(c, options),
            Err(ParseError::without_location(ParseErrorKind::MissingMember, "missing `address`")));

        json_required_member!(slots, pets, "pets", |c: &mut Cursor<P>| -> ParseResult<Vec<String>> {
            let mut names = Vec::new();
            dispatch_array(c, |c| {
                names.push(decode_string(c)?.as_str().to_string());
                Ok(())
            })?;
            Ok(names)
        }, Err(ParseError::without_location(ParseErrorKind::MissingMember, "missing `pets`")));

        json_member!(slots, tags, "tags", |c: &mut Cursor<P>| -> ParseResult<Vec<String>> {
            let mut names = Vec::new();
            dispatch_array(c, |c| {
                names.push(decode_string(c)?.as_str().to_string());
                Ok(())
            })?;
            Ok(names)
        }, NullBehavior::DefaultOnMissing);

        dispatch_class_members(cursor, &mut slots, options, |_| {})?;
        Ok(Person {
            name: name.expect("on_missing would have failed otherwise"),
            nickname: nickname.unwrap_or(None),
            address: address.expect("on_missing would have failed otherwise"),
            pets: pets.expect("on_missing would have failed otherwise"),
            tags: tags.unwrap_or_default(),
        })
    }

    fn write_json<W: BlockingWrite, F: JsonFormatter, Float: FloatFormat>(&self, ser: &mut Serializer<W, F, Float>) -> Result<(), W::Error> {
        serialize_object(ser, |ow| {
            ow.member("name", |s| s.write_escaped_string(&self.name))?;
            ow.member("nickname", |s| match &self.nickname {
                Some(n) => s.write_escaped_string(n),
                None => s.write_null(),
            })?;
            ow.member("address", |s| self.address.write_json(s))?;
            ow.member("pets", |s| {
                serialize_array(s, |aw| {
                    for pet in &self.pets {
                        aw.element(|s| s.write_escaped_string(pet))?;
                    }
                    Ok(())
                })
            })?;
            ow.member("tags", |s| {
                serialize_array(s, |aw| {
                    for tag in &self.tags {
                        aw.element(|s| s.write_escaped_string(tag))?;
                    }
                    Ok(())
                })
            })
        })
    }
}

/// A variant type whose shape alone (a bare number vs. a string vs. an object) tells its case
///  apart - no tag member needed. Dispatched with [dispatch_variant_by_base_type].
#[derive(Debug, PartialEq)]
enum Measurement {
    Exact(u32),
    Approximate(String),
}
impl JsonContract for Measurement {
    fn parse_json<P: Policy>(cursor: &mut Cursor<P>, _options: &ParseOptions) -> ParseResult<Self> {
        dispatch_variant_by_base_type(
            cursor,
            |c| Ok(Measurement::Exact(parse_u32(c, RangeCheck::CheckForNarrowing, LiteralAsString::Never)?)),
            |c| Ok(Measurement::Approximate(decode_string(c)?.as_str().to_string())),
            |c| Err(err_at::<P>(c, "a measurement is never a bare bool")),
            |c| Err(err_at::<P>(c, "a measurement is never a bare object")),
            |c| Err(err_at::<P>(c, "a measurement is never a bare array")),
        )
    }

    fn write_json<W: BlockingWrite, F: JsonFormatter, Float: FloatFormat>(&self, ser: &mut Serializer<W, F, Float>) -> Result<(), W::Error> {
        match self {
            Measurement::Exact(n) => ser.write_u32(*n),
            Measurement::Approximate(s) => ser.write_escaped_string(s),
        }
    }
}

fn err_at<P: Policy>(cursor: &Cursor<P>, reason: &'static str) -> ParseError {
    if P::CHECKED {
        ParseError::new(ParseErrorKind::VariantDiscriminatorNotMatched, reason, cursor.location())
    }
    else {
        ParseError::without_location(ParseErrorKind::VariantDiscriminatorNotMatched, reason)
    }
}

/// A tagged variant: the case is carried in an explicit `"kind"` member, and the payload's shape
///  depends on it. Dispatched with [dispatch_variant_tagged], which is a genuine two-pass scan
///  since the payload's mapping is only known once the tag has been read.
#[derive(Debug, PartialEq)]
enum Shape {
    Circle { radius: u32 },
    Square { side: u32 },
}

#[derive(Clone, Copy)]
enum ShapeKind {
    Circle,
    Square,
}

impl JsonContract for Shape {
    fn parse_json<P: Policy>(cursor: &mut Cursor<P>, options: &ParseOptions) -> ParseResult<Self> {
        let mut result = None;
        dispatch_variant_tagged(
            cursor,
            "kind",
            "payload",
            |c| {
                let kind = decode_string(c)?;
                match kind.as_str() {
                    "circle" => Ok(ShapeKind::Circle),
                    "square" => Ok(ShapeKind::Square),
                    _ => Err(err_at::<P>(c, "unrecognized shape `kind`")),
                }
            },
            |kind, c| {
                result = Some(match kind {
                    ShapeKind::Circle => {
                        let mut slots = Vec::new();
                        json_required_member!(slots, radius, "radius", |c| parse_u32(c, RangeCheck::CheckForNarrowing, LiteralAsString::Never),
                            Err(ParseError::without_location(ParseErrorKind::MissingMember, "missing `radius`")));
                        dispatch_class_members(c, &mut slots, options, |_| {})?;
                        Shape::Circle { radius: radius.expect("on_missing would have failed otherwise") }
                    }
                    ShapeKind::Square => {
                        let mut slots = Vec::new();
                        json_required_member!(slots, side, "side", |c| parse_u32(c, RangeCheck::CheckForNarrowing, LiteralAsString::Never),
                            Err(ParseError::without_location(ParseErrorKind::MissingMember, "missing `side`")));
                        dispatch_class_members(c, &mut slots, options, |_| {})?;
                        Shape::Square { side: side.expect("on_missing would have failed otherwise") }
                    }
                });
                Ok(())
            },
        )?;
        Ok(result.expect("dispatch_variant_tagged always calls parse_payload_for_tag on success"))
    }

    fn write_json<W: BlockingWrite, F: JsonFormatter, Float: FloatFormat>(&self, ser: &mut Serializer<W, F, Float>) -> Result<(), W::Error> {
        serialize_object(ser, |ow| match self {
            Shape::Circle { radius } => {
                ow.member("kind", |s| s.write_escaped_string("circle"))?;
                ow.member("payload", |s| serialize_object(s, |ow| ow.member("radius", |s| s.write_u32(*radius))))
            }
            Shape::Square { side } => {
                ow.member("kind", |s| s.write_escaped_string("square"))?;
                ow.member("payload", |s| serialize_object(s, |ow| ow.member("side", |s| s.write_u32(*side))))
            }
        })
    }
}

/// A row parsed one-per-line from a `jsonlines`-formatted byte range (see `jsonlines.rs` for the
///  same format at the low-level byte-stream layer).
struct LogLine {
    level: String,
    ok: bool,
}
impl JsonContract for LogLine {
    fn parse_json<P: Policy>(cursor: &mut Cursor<P>, options: &ParseOptions) -> ParseResult<Self> {
        let mut slots = Vec::new();
        json_required_member!(slots, level, "level", |c| Ok(decode_string(c)?.as_str().to_string()),
            Err(ParseError::without_location(ParseErrorKind::MissingMember, "missing `level`")));
        json_required_member!(slots, ok, "ok", |c| parse_bool(c),
            Err(ParseError::without_location(ParseErrorKind::MissingMember, "missing `ok`")));
        dispatch_class_members(cursor, &mut slots, options, |_| {})?;
        Ok(LogLine {
            level: level.expect("on_missing would have failed otherwise"),
            ok: ok.expect("on_missing would have failed otherwise"),
        })
    }

    fn write_json<W: BlockingWrite, F: JsonFormatter, Float: FloatFormat>(&self, ser: &mut Serializer<W, F, Float>) -> Result<(), W::Error> {
        serialize_object(ser, |ow| {
            ow.member("level", |s| s.write_escaped_string(&self.level))?;
            ow.member("ok", |s| s.write_bool(self.ok))
        })
    }
}

fn main() -> ParseResult<()> {
    let person = Person {
        name: "Ada Lovelace".to_string(),
        nickname: None,
        address: Address { city: "London".to_string(), zip: 10_000 },
        pets: vec!["cat".to_string(), "parrot".to_string()],
        tags: vec!["mathematician".to_string()],
    };
    let compact = to_json(&person);
    println!("compact: {}", compact);
    println!("pretty:\n{}", to_json_pretty(&person));

    // a member omitted entirely is equivalent to an explicit `null`, since `NullBehavior` defaults
    //  to `NullVisible` and nothing in this example opts a member out of that
    let round_tripped: Person = from_json(compact.as_bytes())?;
    assert_eq!(round_tripped.nickname, None);
    assert_eq!(round_tripped.address.city, "London");
    assert_eq!(round_tripped.pets, vec!["cat".to_string(), "parrot".to_string()]);
    assert_eq!(round_tripped.tags, vec!["mathematician".to_string()]);

    // `tags` uses `NullBehavior::DefaultOnMissing`: an object that never mentions it at all still
    //  parses, filling it with `Vec::default()` instead of failing like `name`/`pets` would.
    let untagged: Person = from_json(
        br#"{"name":"Grace Hopper","nickname":null,"address":{"city":"Arlington","zip":22201},"pets":[]}"#,
    )?;
    assert_eq!(untagged.tags, Vec::<String>::new());

    println!("--");
    let exact: Measurement = from_json(b"42")?;
    let approx: Measurement = from_json(br#""about 40""#)?;
    println!("{:?} / {:?}", exact, approx);
    assert_eq!(exact, Measurement::Exact(42));
    assert_eq!(approx, Measurement::Approximate("about 40".to_string()));

    println!("--");
    let circle: Shape = from_json(br#"{"kind": "circle", "payload": {"radius": 3}}"#)?;
    // the tag can legally appear after the payload in JSON text order; the two-pass dispatch
    //  handles this the same way
    let square: Shape = from_json(br#"{"payload": {"side": 5}, "kind": "square"}"#)?;
    println!("{}", to_json(&circle));
    println!("{}", to_json(&square));
    assert_eq!(circle, Shape::Circle { radius: 3 });
    assert_eq!(square, Shape::Square { side: 5 });

    println!("--");
    let log = "{\"level\":\"info\",\"ok\":true}\n{\"level\":\"warn\",\"ok\":false}\n";
    for line in json_lines_iterator::<LogLine>(log.as_bytes()) {
        let line = line?;
        println!("{}: {}", line.level, line.ok);
    }

    Ok(())
}
