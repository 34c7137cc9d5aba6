//! JSON Schema Draft-7 emission (spec section 6's `to_json_schema<T>(id, title)`): a pure
//!  function of a type's declared shape, not of any particular value - so it is driven by a
//!  small schema-describing trait rather than by [`crate::contract::JsonContract`] itself (a
//!  `JsonContract` impl knows how to parse/serialize one instance; it does not, on its own, know
//!  its own shape in the abstract). Types that want schema output implement
//!  [`JsonSchemaDescribe`] alongside their `JsonContract` impl.
//!
//!  This does not validate JSON against the emitted schema (spec's stated non-goal); it only
//!  produces the document.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::format::PrettyFormatter;
use crate::io::StringSink;
use crate::serialize::{serialize_array, serialize_object, ObjectWriter, Serializer};

/// One property of a `SchemaNode::Object` node.
pub struct SchemaProperty {
    pub name: &'static str,
    pub required: bool,
    pub node: SchemaNode,
}

impl SchemaProperty {
    pub fn new(name: &'static str, required: bool, node: SchemaNode) -> Self {
        SchemaProperty { name, required, node }
    }
}

/// The shape of one piece of a type's JSON representation, recursively - just enough of JSON
/// Schema Draft-7's vocabulary to describe the mappings spec section 3 enumerates.
pub enum SchemaNode {
    String,
    Integer,
    Number,
    Boolean,
    Null,
    Object(Vec<SchemaProperty>),
    Array(Box<SchemaNode>),
    /// a member whose JSON value may additionally be `null`
    Nullable(Box<SchemaNode>),
    /// a variant mapping: the value must match exactly one of the alternatives
    OneOf(Vec<SchemaNode>),
}

/// Implemented by types that can describe their own JSON shape for [`to_json_schema`], separate
/// from [`crate::contract::JsonContract`]'s parse/serialize behavior.
pub trait JsonSchemaDescribe {
    fn schema_node() -> SchemaNode;
}

/// Emits a JSON Schema Draft-7 document for `T`, with the given `$id` and `title`.
pub fn to_json_schema<T: JsonSchemaDescribe>(id: &str, title: &str) -> String {
    let mut sink = StringSink::new();
    let mut ser: Serializer<StringSink, PrettyFormatter> = Serializer::new(&mut sink, PrettyFormatter::new(), Default::default());
    serialize_object(&mut ser, |o| {
        o.member("$schema", |s| s.write_escaped_string("http://json-schema.org/draft-07/schema#"))?;
        o.member("$id", |s| s.write_escaped_string(id))?;
        o.member("title", |s| s.write_escaped_string(title))?;
        write_node_members(o, &T::schema_node())
    })
    .expect("StringSink::write_all is infallible");
    drop(ser);
    sink.into_string()
}

fn write_node<W: crate::io::BlockingWrite, F: crate::format::JsonFormatter, Float: crate::format::FloatFormat>(
    ser: &mut Serializer<W, F, Float>,
    node: &SchemaNode,
) -> Result<(), W::Error> {
    serialize_object(ser, |o| write_node_members(o, node))
}

fn write_node_members<W: crate::io::BlockingWrite, F: crate::format::JsonFormatter, Float: crate::format::FloatFormat>(
    o: &mut ObjectWriter<W, F, Float>,
    node: &SchemaNode,
) -> Result<(), W::Error> {
    match node {
        SchemaNode::String => o.member("type", |s| s.write_escaped_string("string")),
        SchemaNode::Integer => o.member("type", |s| s.write_escaped_string("integer")),
        SchemaNode::Number => o.member("type", |s| s.write_escaped_string("number")),
        SchemaNode::Boolean => o.member("type", |s| s.write_escaped_string("boolean")),
        SchemaNode::Null => o.member("type", |s| s.write_escaped_string("null")),
        SchemaNode::Object(properties) => write_object_members(o, properties),
        SchemaNode::Array(element) => {
            o.member("type", |s| s.write_escaped_string("array"))?;
            o.member("items", |s| write_node(s, element))
        }
        SchemaNode::Nullable(inner) => {
            o.member("oneOf", |s| write_one_of(s, core::iter::once(&**inner).chain(core::iter::once(&SchemaNode::Null))))
        }
        SchemaNode::OneOf(alternatives) => o.member("oneOf", |s| write_one_of(s, alternatives.iter())),
    }
}

fn write_object_members<W: crate::io::BlockingWrite, F: crate::format::JsonFormatter, Float: crate::format::FloatFormat>(
    o: &mut ObjectWriter<W, F, Float>,
    properties: &[SchemaProperty],
) -> Result<(), W::Error> {
    o.member("type", |s| s.write_escaped_string("object"))?;
    o.member("properties", |s| {
        serialize_object(s, |po| {
            for property in properties {
                po.member(property.name, |s2| write_node(s2, &property.node))?;
            }
            Ok(())
        })
    })?;
    let required: Vec<&str> = properties.iter().filter(|p| p.required).map(|p| p.name).collect();
    if !required.is_empty() {
        o.member("required", |s| {
            serialize_array(s, |a| {
                for name in &required {
                    a.element(|s2| s2.write_escaped_string(name))?;
                }
                Ok(())
            })
        })?;
    }
    Ok(())
}

fn write_one_of<'n, W: crate::io::BlockingWrite, F: crate::format::JsonFormatter, Float: crate::format::FloatFormat>(
    ser: &mut Serializer<W, F, Float>,
    alternatives: impl Iterator<Item = &'n SchemaNode>,
) -> Result<(), W::Error> {
    serialize_array(ser, |a| {
        for alt in alternatives {
            a.element(|s| write_node(s, alt))?;
        }
        Ok(())
    })
}
