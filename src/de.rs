//-
// Copyright 2017 Jason Lingle
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Writing trees into messages.

use std::collections::HashMap;

use prost::Message;
use prost_reflect::{DynamicMessage, FieldDescriptor, ReflectMessage, Value};

use context::{Config, Context, Error, Result};
use scalar::{self, FieldType};
use tree::Tree;

/// Clears `message`, then populates it from `tree`.
///
/// This never fails. Anything in `tree` which cannot be mapped onto the
/// message is ignored; see `Config::strict` for details. No recursion limit
/// is applied.
pub fn write_protobuf(tree: &Tree, message: &mut DynamicMessage) {
    if let Err(err) = write_protobuf_with(tree, message, &Config::unlimited())
    {
        warn!("failed to write {}: {}",
              message.descriptor().full_name(), err);
    }
}

/// Clears `message`, then populates it from `tree`.
///
/// Every field in the message's schema is looked up by name among the
/// direct children of `tree`, taking the first match. Fields without a
/// matching child are left unset. Children which do not name a field are
/// ignored.
///
/// A repeated or map field is only populated if its node is a container
/// whose children all have the empty key; elements are appended in the
/// order of the children. Each map entry is a node with `key` and `value`
/// children; a map is only populated if every entry has a `key` child.
///
/// With a non-strict `config`, this never fails.
pub fn write_protobuf_with(tree: &Tree, message: &mut DynamicMessage,
                           config: &Config) -> Result<()> {
    message.clear();
    write_internal(message, tree, &Context::top(config))
}

/// Builds a message of the generated type `M` from `tree`.
///
/// This is equivalent to calling `write_protobuf()` on a dynamic message of
/// `M`'s type and then converting the result to `M`. Like
/// `write_protobuf()`, it applies no recursion limit.
pub fn from_tree<M : ReflectMessage + Default>(tree: &Tree) -> Result<M> {
    from_tree_with(tree, &Config::unlimited())
}

/// Like `from_tree()`, but with an explicit configuration.
pub fn from_tree_with<M : ReflectMessage + Default>
    (tree: &Tree, config: &Config) -> Result<M>
{
    let mut message = DynamicMessage::new(M::default().descriptor());
    write_protobuf_with(tree, &mut message, config)?;
    Ok(message.transcode_to()?)
}

fn write_internal(message: &mut DynamicMessage, node: &Tree,
                  context: &Context) -> Result<()> {
    let desc = message.descriptor();
    trace!("writing {} at {}", desc.full_name(), context);

    for &(ref key, _) in node {
        if desc.get_field_by_name(key).is_none() {
            context.absorb(Error::UnknownField(
                context.to_string(), key.clone()))?;
        }
    }

    for field in desc.fields() {
        let child = match node.find(field.name()) {
            Some(child) => child,
            None => continue,
        };

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
            write_map(message, &field, &ty, child, &subcontext)?;
        } else if field.is_list() {
            write_repeated(message, &field, &ty, child, &subcontext)?;
        } else {
            write_field(message, &field, &ty, child, &subcontext)?;
        }
    }

    Ok(())
}

fn write_field(message: &mut DynamicMessage, field: &FieldDescriptor,
               ty: &FieldType, node: &Tree, context: &Context)
               -> Result<()> {
    match *ty {
        FieldType::Message(_) =>
            match message.get_field_mut(field).as_message_mut() {
                Some(nested) => write_internal(nested, node, context),
                None => Ok(()),
            },
        _ => match scalar::decode(ty, node.value(), context)? {
            Some(value) => set_field(message, field, value, context),
            None => Ok(()),
        },
    }
}

fn write_repeated(message: &mut DynamicMessage, field: &FieldDescriptor,
                  ty: &FieldType, node: &Tree, context: &Context)
                  -> Result<()> {
    if !is_sequence(node) {
        return context.absorb(Error::MalformedRepeated(context.to_string()));
    }

    let mut elements = Vec::with_capacity(node.len());
    for (index, &(_, ref child)) in node.iter().enumerate() {
        let subcontext = context.element(index);
        match *ty {
            FieldType::Message(ref desc) => {
                let mut nested = DynamicMessage::new(desc.clone());
                write_internal(&mut nested, child, &subcontext)?;
                elements.push(Value::Message(nested));
            },
            _ => if let Some(value) = scalar::decode(
                ty, child.value(), &subcontext)?
            {
                elements.push(value);
            },
        }
    }

    if !elements.is_empty() {
        if let Some(list) = message.get_field_mut(field).as_list_mut() {
            list.extend(elements);
        }
    }
    Ok(())
}

fn write_map(message: &mut DynamicMessage, field: &FieldDescriptor,
             ty: &FieldType, node: &Tree, context: &Context) -> Result<()> {
    let entry = match *ty {
        FieldType::Message(ref entry) => entry,
        _ => return Ok(()),
    };
    let key_field = entry.map_entry_key_field();
    let value_field = entry.map_entry_value_field();
    if FieldType::of(value_field.kind()).is_none() {
        return context.absorb(Error::UnsupportedType(
            context.to_string(), format!("{:?}", value_field.kind())));
    }

    if !is_sequence(node) || node.iter().any(
        |&(_, ref child)| child.find(key_field.name()).is_none())
    {
        return context.absorb(Error::MalformedRepeated(context.to_string()));
    }

    let mut entries = HashMap::new();
    for (index, &(_, ref child)) in node.iter().enumerate() {
        let mut decoded = DynamicMessage::new(entry.clone());
        write_internal(&mut decoded, child, &context.element(index))?;

        if let Some(key) = scalar::to_key(
            decoded.get_field(&key_field).into_owned())
        {
            entries.insert(key, decoded.get_field(&value_field).into_owned());
        }
    }

    if !entries.is_empty() {
        if let Some(map) = message.get_field_mut(field).as_map_mut() {
            map.extend(entries);
        }
    }
    Ok(())
}

fn set_field(message: &mut DynamicMessage, field: &FieldDescriptor,
             value: Value, context: &Context) -> Result<()> {
    match message.try_set_field(field, value) {
        Ok(()) => Ok(()),
        Err(err) => context.absorb(Error::SetField(
            context.to_string(), err.to_string())),
    }
}

/// Returns whether `node` has the shape of a repeated field: every child
/// has the empty key, and there is no scalar payload in lieu of children.
fn is_sequence(node: &Tree) -> bool {
    node.count("") == node.len() &&
        (node.len() > 0 || node.value().is_empty())
}
