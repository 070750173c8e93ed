//-
// Copyright 2017 Jason Lingle
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration, error reporting, and path tracking shared by both
//! conversion directions.

use std::fmt;

use prost::DecodeError;

quick_error! {
    /// Errors that can be produced during conversion.
    ///
    /// Every variant begins with a string indicating the path of fields
    /// that led to the error, including the problematic field itself.
    ///
    /// With the default `Config`, none of these are ever returned; they are
    /// logged and the offending field is handled on a best-effort basis
    /// instead.
    #[derive(Debug)]
    pub enum Error {
        /// Messages were nested more deeply than permitted.
        ///
        /// See `Config::recursion_limit` to control the cut-off point.
        RecursionLimitExceeded(wo: String) {
            description("recursion limit exceeded")
            display("recursion limit exceeded at {}", wo)
        }
        /// The tree contained a key which does not name any field of the
        /// message being written.
        UnknownField(wo: String, key: String) {
            description("unknown field encountered")
            display("unknown field \"{}\" encountered at {}", key, wo)
        }
        /// The field has a type which has no tree representation.
        UnsupportedType(wo: String, kind: String) {
            description("unsupported field type")
            display("unsupported field type {} at {}", kind, wo)
        }
        /// A node for a repeated or map field was not a container whose
        /// children all have the empty key.
        MalformedRepeated(wo: String) {
            description("malformed repeated field")
            display("malformed repeated field at {}", wo)
        }
        /// A leaf's text could not be parsed as the field's type.
        InvalidValue(wo: String, text: String, ty: &'static str) {
            description("invalid scalar value")
            display("invalid {} value \"{}\" at {}", ty, text, wo)
        }
        /// An enum number has no corresponding entry in the enum.
        UnknownEnumValue(wo: String, number: i32) {
            description("unknown enum value")
            display("unknown enum value {} at {}", number, wo)
        }
        /// The reflection layer refused to assign a decoded value.
        SetField(wo: String, err: String) {
            description("failed to set field")
            display("failed to set field at {}: {}", wo, err)
        }
        /// A dynamic message could not be converted to its generated type.
        Transcode(err: DecodeError) {
            description("failed to transcode message")
            display("failed to transcode message: {}", err)
            cause(err)
            from()
        }
    }
}

/// The general result type returned by conversion functions.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Run-time configuration for conversion.
#[derive(Debug, Clone)]
pub struct Config {
    /// The maximum field nesting depth to allow.
    ///
    /// The default is 100. The non-failing entry points `read_protobuf()`
    /// and `write_protobuf()` do not apply a limit at all.
    pub recursion_limit: usize,
    /// If true, any irregularity encountered during conversion results in
    /// an error. If false, irregularities are logged and conversion
    /// proceeds on a best-effort basis:
    ///
    /// - Fields of unsupported type are dropped.
    ///
    /// - Tree keys not naming a field are ignored.
    ///
    /// - Malformed repeated and map nodes are ignored.
    ///
    /// - Unparsable numbers decode as zero.
    ///
    /// - Enum numbers not present in the enum are dropped.
    ///
    /// - Nesting beyond `recursion_limit` is dropped.
    ///
    /// Note that in either mode a boolean leaf decodes as `true` only if
    /// its text is exactly `"true"`; strict mode additionally rejects text
    /// other than `"true"` and `"false"`.
    ///
    /// The default is false.
    pub strict: bool,
    _non_public: (),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            recursion_limit: 100,
            strict: false,
            _non_public: (),
        }
    }
}

impl Config {
    /// Returns the default configuration with `strict` enabled.
    pub fn strict() -> Self {
        Config {
            strict: true,
            .. Config::default()
        }
    }

    /// Returns the default configuration without a recursion limit.
    pub fn unlimited() -> Self {
        Config {
            recursion_limit: usize::max_value(),
            .. Config::default()
        }
    }
}

/// Tracks contextual information during conversion.
///
/// This is used for constructing helpful error messages, deciding how to
/// handle irregular input, and controlling recursion depth.
///
/// `Context` objects are constructed on the stack and passed to the
/// conversion of each nested field by reference.
///
/// A `Context` can be formatted with `Display` to show the path to the
/// current location, e.g., `outer.items[2].name`.
#[derive(Debug, Clone)]
pub struct Context<'a> {
    /// The context for the container of this level, if any.
    pub next: Option<&'a Context<'a>>,
    /// The name of the field being converted at this level, or the empty
    /// string for an element of a repeated field.
    pub field: &'a str,
    /// The index of the element being converted, if this level is an
    /// element of a repeated field.
    pub index: Option<usize>,
    /// The recursion depth.
    pub depth: usize,
    /// The configuration in effect.
    pub config: &'a Config,
    _non_public: (),
}

impl<'a> Context<'a> {
    /// Returns a top-level context referencing the given config.
    pub fn top(config: &'a Config) -> Self {
        Context {
            next: None,
            field: "",
            index: None,
            depth: 0,
            config: config,
            _non_public: (),
        }
    }

    /// Creates a context subordinate to this one for the given field,
    /// provided it does not exceed the recursion limit.
    pub fn push(&'a self, field: &'a str) -> Result<Self> {
        if self.depth >= self.config.recursion_limit {
            Err(Error::RecursionLimitExceeded(
                format!("{}", PathTo(self, field))))
        } else {
            Ok(Context {
                next: Some(self),
                field: field,
                index: None,
                depth: self.depth + 1,
                config: self.config,
                _non_public: (),
            })
        }
    }

    /// Creates a context for the element at `index` of the repeated field
    /// this context refers to.
    ///
    /// Elements do not count towards the recursion depth; only the fields
    /// nested within them do.
    pub fn element(&'a self, index: usize) -> Self {
        Context {
            next: Some(self),
            field: "",
            index: Some(index),
            depth: self.depth,
            config: self.config,
            _non_public: (),
        }
    }

    /// Applies the configured failure policy to `err`.
    ///
    /// In strict mode, `err` is returned. Otherwise it is logged and
    /// `Ok(())` is returned so that the caller can continue with its
    /// best-effort fallback.
    pub fn absorb(&self, err: Error) -> Result<()> {
        if self.config.strict {
            Err(err)
        } else {
            debug!("ignoring: {}", err);
            Ok(())
        }
    }
}

struct PathTo<'a>(&'a Context<'a>, &'a str);

impl<'a> fmt::Display for PathTo<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.next.is_some() {
            write!(f, "{}.{}", self.0, self.1)
        } else {
            f.write_str(self.1)
        }
    }
}

impl<'a> fmt::Display for Context<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.next, self.index) {
            (None, _) => f.write_str("<root>"),
            (Some(next), Some(index)) => write!(f, "{}[{}]", next, index),
            (Some(next), None) if next.next.is_none() =>
                f.write_str(self.field),
            (Some(next), None) => write!(f, "{}.{}", next, self.field),
        }
    }
}
