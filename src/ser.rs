//-
// Copyright 2017 Jason Lingle
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reading messages into trees.

use prost_reflect::{DynamicMessage, MapKey, ReflectMessage, Value};

use context::{Config, Context, Error, Result};
use scalar::{self, FieldType};
use tree::Tree;

/// Reads every field present on `message` into a new tree.
///
/// This never fails. Fields which have no tree representation (i.e.,
/// `bytes` fields) are silently dropped. No recursion limit is applied, so
/// every other present field is read however deeply it is nested.
pub fn read_protobuf(message: &DynamicMessage) -> Tree {
    let mut tree = Tree::new();
    if let Err(err) = read_protobuf_with(
        message, &mut tree, &Config::unlimited())
    {
        warn!("failed to read {}: {}",
              message.descriptor().full_name(), err);
    }
    tree
}

/// Clears `tree`, then reads every field present on `message` into it.
///
/// Only fields that are set are visited; a repeated field is set if it has
/// at least one element. Each field becomes one child of `tree` keyed by
/// the field name. Repeated fields and map fields become containers whose
/// children all have the empty key, one per element, in order. Map entries
/// are ordered by key and each become a node with a `key` and a `value`
/// child.
///
/// With a non-strict `config`, this never fails.
pub fn read_protobuf_with(message: &DynamicMessage, tree: &mut Tree,
                          config: &Config) -> Result<()> {
    tree.clear();
    read_internal(message, tree, &Context::top(config))
}

/// Reads any reflectable message into a new tree.
///
/// This is a convenience for generated message types; it is equivalent to
/// calling `read_protobuf()` on the message's dynamic equivalent.
pub fn to_tree<M : ReflectMessage>(message: &M) -> Tree {
    read_protobuf(&message.transcode_to_dynamic())
}

fn read_internal(message: &DynamicMessage, node: &mut Tree,
                 context: &Context) -> Result<()> {
    trace!("reading {} at {}", message.descriptor().full_name(), context);

    for (field, value) in message.fields() {
        let subcontext = match context.push(field.name()) {
            Ok(subcontext) => subcontext,
            Err(err) => {
                context.absorb(err)?;
                continue;
            },
        };

        let ty = match FieldType::of(field.kind()) {
            Some(ty) => ty,
            None => {
                subcontext.absorb(Error::UnsupportedType(
                    subcontext.to_string(), format!("{:?}", field.kind())))?;
                continue;
            },
        };

        if field.is_map() {
            read_map(&ty, value, field.name(), node, &subcontext)?;
        } else if field.is_list() {
            read_repeated(&ty, value, field.name(), node, &subcontext)?;
        } else {
            read_field(&ty, value, field.name(), node, &subcontext)?;
        }
    }

    Ok(())
}

fn read_field(ty: &FieldType, value: &Value, key: &str, node: &mut Tree,
              context: &Context) -> Result<()> {
    match *ty {
        FieldType::Message(_) => if let Some(message) = value.as_message() {
            let child = node.push_back(key, Tree::new());
            read_internal(message, child, context)?;
        },
        _ => if let Some(text) = scalar::encode(ty, value) {
            node.push_back(key, Tree::leaf(text));
        },
    }
    Ok(())
}

fn read_repeated(ty: &FieldType, value: &Value, key: &str, node: &mut Tree,
                 context: &Context) -> Result<()> {
    let container = node.push_back(key, Tree::new());
    if let Some(elements) = value.as_list() {
        for (index, element) in elements.iter().enumerate() {
            read_field(ty, element, "", container, &context.element(index))?;
        }
    }
    Ok(())
}

fn read_map(ty: &FieldType, value: &Value, key: &str, node: &mut Tree,
            context: &Context) -> Result<()> {
    let entry = match *ty {
        FieldType::Message(ref entry) => entry,
        _ => return Ok(()),
    };
    let key_field = entry.map_entry_key_field();
    let value_field = entry.map_entry_value_field();
    let value_ty = match FieldType::of(value_field.kind()) {
        Some(ty) => ty,
        None => return context.absorb(Error::UnsupportedType(
            context.to_string(), format!("{:?}", value_field.kind()))),
    };

    let container = node.push_back(key, Tree::new());
    let map = match value.as_map() {
        Some(map) => map,
        None => return Ok(()),
    };

    let mut entries: Vec<(&MapKey, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| scalar::compare_keys(a.0, b.0));

    for (index, (k, v)) in entries.into_iter().enumerate() {
        let element = context.element(index);
        let subcontext = match element.push(value_field.name()) {
            Ok(subcontext) => subcontext,
            Err(err) => {
                element.absorb(err)?;
                continue;
            },
        };

        let child = container.push_back("", Tree::new());
        child.push_back(key_field.name(), Tree::leaf(scalar::encode_key(k)));
        read_field(&value_ty, v, value_field.name(), child, &subcontext)?;
    }

    Ok(())
}
