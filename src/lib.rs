//-
// Copyright 2017 Jason Lingle
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Converts protobuf messages to and from generic, ordered key/value trees
//! by way of reflection.
//!
//! `read_protobuf()` walks the fields present on a message and produces a
//! `Tree`; `write_protobuf()` walks the fields of a message's schema and
//! fills them in from a `Tree`. The tree is schema-agnostic, so it can be
//! handed to any tree-based encoder (JSON, XML, INI, ...) or inspected and
//! diffed generically.
//!
//! ## Tree layout
//!
//! Each field of a message becomes one child keyed by the field name:
//!
//! - Scalars become leaves holding canonical text: decimal integers, the
//!   shortest round-tripping decimal for floating-point values, `true` or
//!   `false`, the raw string, or the *number* of an enum value.
//!
//! - Messages become nodes whose children are the nested fields.
//!
//! - Repeated fields become nodes whose children all have the empty key,
//!   one per element, in order.
//!
//! - Maps are like repeated fields of entries, each entry having a `key`
//!   and a `value` child.
//!
//! `bytes` fields have no representation and are skipped.
//!
//! ## Error handling
//!
//! By default, conversion is best-effort and never fails; irregular input
//! is logged at debug level and skipped or decoded as zero. `Config::strict`
//! turns all such cases into `Error`s instead.
//!
//! ## Example
//!
//! ```
//! # extern crate prost_types;
//! # extern crate prototree;
//! # fn main() {
//! use prost_types::Timestamp;
//!
//! let timestamp = Timestamp { seconds: 7, nanos: 250 };
//! let tree = prototree::to_tree(&timestamp);
//! assert_eq!(Some("7"), tree.get("seconds"));
//! assert_eq!(Some("250"), tree.get("nanos"));
//!
//! let copy: Timestamp = prototree::from_tree(&tree).unwrap();
//! assert_eq!(timestamp, copy);
//! # }
//! ```

#![deny(missing_docs)]

#[macro_use] extern crate log;
extern crate prost;
extern crate prost_reflect;
#[macro_use] extern crate quick_error;

#[cfg(test)] extern crate prost_types;

#[macro_use] mod sugar;
pub mod tree;
pub mod context;
pub mod scalar;
pub mod ser;
pub mod de;

#[cfg(test)] mod test_helpers;

pub use context::{Config, Error, Result};
pub use de::{from_tree, from_tree_with, write_protobuf, write_protobuf_with};
pub use ser::{read_protobuf, read_protobuf_with, to_tree};
pub use tree::Tree;
