//-
// Copyright 2017 Jason Lingle
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Schemas and message builders shared by the tests.
//!
//! The schema is equivalent to the following:
//!
//! ```text
//! syntax = "proto2";
//! package test;
//!
//! enum Color { RED = 0; GREEN = 1; BLUE = 2; }
//!
//! message Leaf { optional int32 depth = 1; optional string label = 2; }
//!
//! message Middle {
//!   optional Leaf leaf = 1;
//!   repeated Leaf leaves = 2;
//!   optional string note = 3;
//! }
//!
//! message Simple {
//!   optional int32 id = 1;
//!   optional string name = 2;
//!   repeated string tags = 3;
//! }
//!
//! message Everything {
//!   optional int32 i32 = 1;       optional int64 i64 = 2;
//!   optional uint32 u32 = 3;      optional uint64 u64 = 4;
//!   optional double f64 = 5;      optional float f32 = 6;
//!   optional bool flag = 7;       optional string text = 8;
//!   optional Color color = 9;     optional Middle middle = 10;
//!   optional bytes blob = 11;     repeated int32 numbers = 12;
//!   repeated bool flags = 13;     repeated Color palette = 14;
//!   repeated Middle middles = 15; repeated double samples = 16;
//!   repeated bytes blobs = 17;    map<string, int32> counts = 18;
//!   map<int32, Leaf> leaves = 19; optional sint32 zigzag = 20;
//!   optional fixed64 fixed = 21;  optional Everything child = 22;
//! }
//! ```

use prost_reflect::{DescriptorPool, DynamicMessage, EnumDescriptor,
                    MapKey, MessageDescriptor, Value};
use prost_types::{DescriptorProto, EnumDescriptorProto,
                  EnumValueDescriptorProto, FieldDescriptorProto,
                  FileDescriptorProto, FileDescriptorSet, MessageOptions};
use prost_types::field_descriptor_proto::{Label, Type};

fn field(name: &str, number: i32, label: Label, ty: Type)
         -> FieldDescriptorProto {
    let mut field = FieldDescriptorProto {
        name: Some(name.to_owned()),
        number: Some(number),
        .. FieldDescriptorProto::default()
    };
    field.set_label(label);
    field.set_type(ty);
    field
}

fn optional(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    field(name, number, Label::Optional, ty)
}

fn repeated(name: &str, number: i32, ty: Type) -> FieldDescriptorProto {
    field(name, number, Label::Repeated, ty)
}

fn named(mut field: FieldDescriptorProto, type_name: &str)
         -> FieldDescriptorProto {
    field.type_name = Some(type_name.to_owned());
    field
}

fn message_type(name: &str, fields: Vec<FieldDescriptorProto>)
                -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_owned()),
        field: fields,
        .. DescriptorProto::default()
    }
}

fn map_entry(name: &str, key: Type, value: FieldDescriptorProto)
             -> DescriptorProto {
    DescriptorProto {
        options: Some(MessageOptions {
            map_entry: Some(true),
            .. MessageOptions::default()
        }),
        .. message_type(name, vec![optional("key", 1, key), value])
    }
}

fn color_type() -> EnumDescriptorProto {
    let value = |name: &str, number: i32| EnumValueDescriptorProto {
        name: Some(name.to_owned()),
        number: Some(number),
        .. EnumValueDescriptorProto::default()
    };

    EnumDescriptorProto {
        name: Some("Color".to_owned()),
        value: vec![value("RED", 0), value("GREEN", 1), value("BLUE", 2)],
        .. EnumDescriptorProto::default()
    }
}

fn everything_type() -> DescriptorProto {
    DescriptorProto {
        nested_type: vec![
            map_entry("CountsEntry", Type::String,
                      optional("value", 2, Type::Int32)),
            map_entry("LeavesEntry", Type::Int32,
                      named(optional("value", 2, Type::Message),
                            ".test.Leaf")),
        ],
        .. message_type("Everything", vec![
            optional("i32", 1, Type::Int32),
            optional("i64", 2, Type::Int64),
            optional("u32", 3, Type::Uint32),
            optional("u64", 4, Type::Uint64),
            optional("f64", 5, Type::Double),
            optional("f32", 6, Type::Float),
            optional("flag", 7, Type::Bool),
            optional("text", 8, Type::String),
            named(optional("color", 9, Type::Enum), ".test.Color"),
            named(optional("middle", 10, Type::Message), ".test.Middle"),
            optional("blob", 11, Type::Bytes),
            repeated("numbers", 12, Type::Int32),
            repeated("flags", 13, Type::Bool),
            named(repeated("palette", 14, Type::Enum), ".test.Color"),
            named(repeated("middles", 15, Type::Message), ".test.Middle"),
            repeated("samples", 16, Type::Double),
            repeated("blobs", 17, Type::Bytes),
            named(repeated("counts", 18, Type::Message),
                  ".test.Everything.CountsEntry"),
            named(repeated("leaves", 19, Type::Message),
                  ".test.Everything.LeavesEntry"),
            optional("zigzag", 20, Type::Sint32),
            optional("fixed", 21, Type::Fixed64),
            named(optional("child", 22, Type::Message), ".test.Everything"),
        ])
    }
}

fn build_pool() -> DescriptorPool {
    let file = FileDescriptorProto {
        name: Some("test.proto".to_owned()),
        package: Some("test".to_owned()),
        syntax: Some("proto2".to_owned()),
        enum_type: vec![color_type()],
        message_type: vec![
            message_type("Leaf", vec![
                optional("depth", 1, Type::Int32),
                optional("label", 2, Type::String),
            ]),
            message_type("Middle", vec![
                named(optional("leaf", 1, Type::Message), ".test.Leaf"),
                named(repeated("leaves", 2, Type::Message), ".test.Leaf"),
                optional("note", 3, Type::String),
            ]),
            message_type("Simple", vec![
                optional("id", 1, Type::Int32),
                optional("name", 2, Type::String),
                repeated("tags", 3, Type::String),
            ]),
            everything_type(),
        ],
        .. FileDescriptorProto::default()
    };

    DescriptorPool::from_file_descriptor_set(FileDescriptorSet {
        file: vec![file],
    }).unwrap()
}

thread_local! {
    static POOL: DescriptorPool = build_pool();
}

/// Returns the descriptor pool containing the test schema.
///
/// Every call on a thread returns the same pool, so messages built from it
/// compare equal when their fields do.
pub fn pool() -> DescriptorPool {
    POOL.with(|pool| pool.clone())
}

/// Returns the descriptor of the message `test.<name>`.
pub fn descriptor(name: &str) -> MessageDescriptor {
    pool().get_message_by_name(&format!("test.{}", name)).unwrap()
}

/// Returns the descriptor of `test.Color`.
pub fn color() -> EnumDescriptor {
    pool().get_enum_by_name("test.Color").unwrap()
}

/// Returns an empty message of type `test.<name>`.
pub fn new_message(name: &str) -> DynamicMessage {
    DynamicMessage::new(descriptor(name))
}

/// Builds a `test.Simple`. `tags` is left unset if empty.
pub fn simple(id: i32, name: &str, tags: &[&str]) -> DynamicMessage {
    let mut message = new_message("Simple");
    message.set_field_by_name("id", Value::I32(id));
    message.set_field_by_name("name", Value::String(name.to_owned()));
    if !tags.is_empty() {
        message.set_field_by_name("tags", Value::List(
            tags.iter().map(|&t| Value::String(t.to_owned())).collect()));
    }
    message
}

/// Builds a `test.Leaf` with only `depth` set.
pub fn leaf_depth(depth: i32) -> DynamicMessage {
    let mut message = new_message("Leaf");
    message.set_field_by_name("depth", Value::I32(depth));
    message
}

/// Builds a `test.Leaf` with both fields set.
pub fn leaf(depth: i32, label: &str) -> DynamicMessage {
    let mut message = leaf_depth(depth);
    message.set_field_by_name("label", Value::String(label.to_owned()));
    message
}

/// Builds a `test.Middle` holding `leaf(depth, label)` and the note
/// `"note"`.
pub fn nested_middle(depth: i32, label: &str) -> DynamicMessage {
    let mut message = new_message("Middle");
    message.set_field_by_name("leaf", Value::Message(leaf(depth, label)));
    message.set_field_by_name("note", Value::String("note".to_owned()));
    message
}

/// Builds a `test.Everything` whose only field is
/// `middle = nested_middle(depth, label)`.
pub fn nested(depth: i32, label: &str) -> DynamicMessage {
    let mut message = new_message("Everything");
    message.set_field_by_name(
        "middle", Value::Message(nested_middle(depth, label)));
    message
}

/// Sets the `counts` map of a `test.Everything`.
pub fn set_counts(message: &mut DynamicMessage, counts: &[(&str, i32)]) {
    message.set_field_by_name("counts", Value::Map(
        counts.iter()
            .map(|&(k, v)| (MapKey::String(k.to_owned()), Value::I32(v)))
            .collect()));
}

#[test]
fn messages_share_one_schema() {
    assert_eq!(new_message("Simple"), new_message("Simple"));
    assert_eq!(simple(7, "x", &["a"]), simple(7, "x", &["a"]));
    assert_eq!(descriptor("Leaf"), descriptor("Middle")
               .get_field_by_name("leaf").unwrap()
               .kind().as_message().unwrap().clone());
}
