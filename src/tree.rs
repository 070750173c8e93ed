//-
// Copyright 2017 Jason Lingle
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The generic, schema-agnostic tree that messages are converted to and
//! from.

use std::fmt;
use std::slice;

/// An ordered, recursive key/value tree.
///
/// Every node carries a string payload and an ordered sequence of
/// `(key, child)` pairs. Keys may repeat and may be empty; the order of
/// children is always the order in which they were appended.
///
/// Messages map onto trees as follows:
///
/// - A singular scalar field is a `(name, leaf)` pair, where the leaf's
///   payload is the canonical text of the value.
///
/// - A singular message field is a `(name, node)` pair whose children are
///   the fields of the nested message.
///
/// - A repeated field is a `(name, container)` pair whose children all have
///   the empty key, one per element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tree {
    value: String,
    children: Vec<(String, Tree)>,
}

impl Tree {
    /// Returns a new tree with an empty payload and no children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a childless tree holding `value` as its payload.
    pub fn leaf<S : Into<String>>(value: S) -> Self {
        Tree {
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// Returns the scalar payload of this node.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the scalar payload of this node.
    pub fn set_value<S : Into<String>>(&mut self, value: S) {
        self.value = value.into();
    }

    /// Returns the number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns whether this node has neither a payload nor children.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.children.is_empty()
    }

    /// Removes the payload and all children.
    pub fn clear(&mut self) {
        self.value.clear();
        self.children.clear();
    }

    /// Appends `child` under `key` and returns a reference to the newly
    /// inserted child.
    pub fn push_back<K : Into<String>>(&mut self, key: K, child: Tree)
                                       -> &mut Tree {
        self.children.push((key.into(), child));
        let last = self.children.len() - 1;
        &mut self.children[last].1
    }

    /// Returns the first direct child with the given key, if any.
    pub fn find(&self, key: &str) -> Option<&Tree> {
        self.children.iter()
            .find(|&&(ref k, _)| k == key)
            .map(|&(_, ref child)| child)
    }

    /// Returns the number of direct children with the given key.
    pub fn count(&self, key: &str) -> usize {
        self.children.iter().filter(|&&(ref k, _)| k == key).count()
    }

    /// Iterates the `(key, child)` pairs in order.
    pub fn iter<'a>(&'a self) -> slice::Iter<'a, (String, Tree)> {
        self.children.iter()
    }

    /// Follows a dot-separated path of keys, taking the first match at each
    /// level.
    ///
    /// The empty path refers to `self`.
    pub fn get_child(&self, path: &str) -> Option<&Tree> {
        if path.is_empty() {
            return Some(self);
        }

        let mut node = self;
        for key in path.split('.') {
            node = node.find(key)?;
        }
        Some(node)
    }

    /// Like `get_child()`, but returns the payload of the node found.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.get_child(path).map(Tree::value)
    }

    fn write_info(&self, f: &mut fmt::Formatter, indent: usize)
                  -> fmt::Result {
        for &(ref key, ref child) in &self.children {
            write!(f, "{:1$}", "", indent * 4)?;
            write_token(f, key)?;
            if !child.value.is_empty() || child.children.is_empty() {
                f.write_str(" ")?;
                write_token(f, &child.value)?;
            }
            f.write_str("\n")?;

            if !child.children.is_empty() {
                writeln!(f, "{:1$}{{", "", indent * 4)?;
                child.write_info(f, indent + 1)?;
                writeln!(f, "{:1$}}}", "", indent * 4)?;
            }
        }
        Ok(())
    }
}

fn write_token(f: &mut fmt::Formatter, s: &str) -> fmt::Result {
    let bare = !s.is_empty() && !s.chars().any(
        |c| c.is_whitespace() || '"' == c || '\\' == c ||
            '{' == c || '}' == c || ';' == c);
    if bare {
        return f.write_str(s);
    }

    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}

/// Renders the children of the tree in an indented, brace-delimited form,
/// one pair per line. Empty or otherwise ambiguous tokens are quoted.
///
/// The payload of the node being displayed itself is not shown.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_info(f, 0)
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a (String, Tree);
    type IntoIter = slice::Iter<'a, (String, Tree)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> From<&'a str> for Tree {
    fn from(value: &'a str) -> Self {
        Tree::leaf(value)
    }
}

impl From<String> for Tree {
    fn from(value: String) -> Self {
        Tree::leaf(value)
    }
}
