//-
// Copyright 2017 Jason Lingle
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Type tags and the textual encoding of scalar values in tree leaves.

use std::cmp::Ordering;
use std::str::FromStr;

use prost_reflect::{EnumDescriptor, Kind, MapKey, MessageDescriptor, Value};

use context::{Context, Error, Result};

/// The closed set of field types which have a tree representation.
///
/// Several protobuf wire types share one tag, since they are
/// indistinguishable once decoded (e.g., `sint32` and `sfixed32` are both
/// `Int32`). `bytes` has no tag at all; fields of that type are treated as
/// unsupported.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// `int32`, `sint32`, `sfixed32`.
    Int32,
    /// `int64`, `sint64`, `sfixed64`.
    Int64,
    /// `uint32`, `fixed32`.
    UInt32,
    /// `uint64`, `fixed64`.
    UInt64,
    #[allow(missing_docs)]
    Double,
    #[allow(missing_docs)]
    Float,
    #[allow(missing_docs)]
    Bool,
    #[allow(missing_docs)]
    String,
    /// An enum, represented by its number.
    Enum(EnumDescriptor),
    /// A nested message, represented by a child node.
    Message(MessageDescriptor),
}

impl FieldType {
    /// Returns the tag for the given field kind, or `None` if the kind is
    /// unsupported.
    pub fn of(kind: Kind) -> Option<Self> {
        Some(match kind {
            Kind::Int32 | Kind::Sint32 | Kind::Sfixed32 => FieldType::Int32,
            Kind::Int64 | Kind::Sint64 | Kind::Sfixed64 => FieldType::Int64,
            Kind::Uint32 | Kind::Fixed32 => FieldType::UInt32,
            Kind::Uint64 | Kind::Fixed64 => FieldType::UInt64,
            Kind::Double => FieldType::Double,
            Kind::Float => FieldType::Float,
            Kind::Bool => FieldType::Bool,
            Kind::String => FieldType::String,
            Kind::Enum(desc) => FieldType::Enum(desc),
            Kind::Message(desc) => FieldType::Message(desc),
            Kind::Bytes => return None,
        })
    }

    /// A short name for the type, for use in messages.
    pub fn name(&self) -> &'static str {
        match *self {
            FieldType::Int32 => "int32",
            FieldType::Int64 => "int64",
            FieldType::UInt32 => "uint32",
            FieldType::UInt64 => "uint64",
            FieldType::Double => "double",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::String => "string",
            FieldType::Enum(_) => "enum",
            FieldType::Message(_) => "message",
        }
    }
}

/// Formats `value` as the leaf text for a field of type `ty`.
///
/// Returns `None` for messages, which are not leaves, and if `value` does
/// not actually hold a value of type `ty`.
pub fn encode(ty: &FieldType, value: &Value) -> Option<String> {
    match *ty {
        FieldType::Int32 => value.as_i32().map(|v| v.to_string()),
        FieldType::Int64 => value.as_i64().map(|v| v.to_string()),
        FieldType::UInt32 => value.as_u32().map(|v| v.to_string()),
        FieldType::UInt64 => value.as_u64().map(|v| v.to_string()),
        FieldType::Double => value.as_f64().map(|v| v.to_string()),
        FieldType::Float => value.as_f32().map(|v| v.to_string()),
        FieldType::Bool => value.as_bool().map(
            |v| (if v { "true" } else { "false" }).to_owned()),
        FieldType::Enum(_) => value.as_enum_number().map(|v| v.to_string()),
        FieldType::String => value.as_str().map(str::to_owned),
        FieldType::Message(_) => None,
    }
}

/// Parses the leaf text `text` as a value of type `ty`.
///
/// Returns `Ok(None)` if no value should be assigned at all, which is the
/// case for messages and for enum numbers that do not exist in the enum.
///
/// Numbers may be surrounded by whitespace. Unparsable numbers decode as
/// zero. Booleans decode as `true` if the text is exactly `"true"` and
/// `false` otherwise. The irregular cases are first passed through
/// `Context::absorb()`.
pub fn decode(ty: &FieldType, text: &str, context: &Context)
              -> Result<Option<Value>> {
    Ok(Some(match *ty {
        FieldType::Int32 => Value::I32(parse_number(ty, text, context)?),
        FieldType::Int64 => Value::I64(parse_number(ty, text, context)?),
        FieldType::UInt32 => Value::U32(parse_number(ty, text, context)?),
        FieldType::UInt64 => Value::U64(parse_number(ty, text, context)?),
        FieldType::Double => Value::F64(parse_number(ty, text, context)?),
        FieldType::Float => Value::F32(parse_number(ty, text, context)?),
        FieldType::Bool => {
            if "true" != text && "false" != text {
                context.absorb(Error::InvalidValue(
                    context.to_string(), text.to_owned(), ty.name()))?;
            }
            Value::Bool("true" == text)
        },
        FieldType::Enum(ref desc) => {
            let number: i32 = parse_number(ty, text, context)?;
            if desc.get_value(number).is_none() {
                context.absorb(Error::UnknownEnumValue(
                    context.to_string(), number))?;
                return Ok(None);
            }
            Value::EnumNumber(number)
        },
        FieldType::String => Value::String(text.to_owned()),
        FieldType::Message(_) => return Ok(None),
    }))
}

fn parse_number<T : FromStr + Default>(ty: &FieldType, text: &str,
                                       context: &Context) -> Result<T> {
    match text.trim().parse() {
        Ok(n) => Ok(n),
        Err(_) => {
            context.absorb(Error::InvalidValue(
                context.to_string(), text.to_owned(), ty.name()))?;
            Ok(T::default())
        },
    }
}

/// Formats a map key the same way as a scalar value of its type.
pub fn encode_key(key: &MapKey) -> String {
    match *key {
        MapKey::Bool(v) => (if v { "true" } else { "false" }).to_owned(),
        MapKey::I32(v) => v.to_string(),
        MapKey::I64(v) => v.to_string(),
        MapKey::U32(v) => v.to_string(),
        MapKey::U64(v) => v.to_string(),
        MapKey::String(ref v) => v.clone(),
    }
}

/// Converts a decoded map entry key to a `MapKey`.
///
/// Returns `None` if `value` is of a type which cannot be a map key.
pub fn to_key(value: Value) -> Option<MapKey> {
    match value {
        Value::Bool(v) => Some(MapKey::Bool(v)),
        Value::I32(v) => Some(MapKey::I32(v)),
        Value::I64(v) => Some(MapKey::I64(v)),
        Value::U32(v) => Some(MapKey::U32(v)),
        Value::U64(v) => Some(MapKey::U64(v)),
        Value::String(v) => Some(MapKey::String(v)),
        _ => None,
    }
}

/// Orders map keys by value. Keys of differing types (which cannot occur
/// within one map) compare equal.
pub fn compare_keys(a: &MapKey, b: &MapKey) -> Ordering {
    match (a, b) {
        (&MapKey::Bool(a), &MapKey::Bool(b)) => a.cmp(&b),
        (&MapKey::I32(a), &MapKey::I32(b)) => a.cmp(&b),
        (&MapKey::I64(a), &MapKey::I64(b)) => a.cmp(&b),
        (&MapKey::U32(a), &MapKey::U32(b)) => a.cmp(&b),
        (&MapKey::U64(a), &MapKey::U64(b)) => a.cmp(&b),
        (&MapKey::String(ref a), &MapKey::String(ref b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}
