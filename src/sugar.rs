//-
// Copyright 2017 Jason Lingle
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Builds a `Tree` literally.
///
/// - `ptree!("text")` (or any other expression convertible to `Tree`)
///   produces a leaf.
///
/// - `ptree!({ "key" => value, ... })` produces a node with the given keyed
///   children, in order.
///
/// - `ptree!([value, ...])` produces a container whose children all have
///   the empty key, as used for repeated fields.
///
/// Within the braces and brackets, each `value` is itself one of the three
/// forms above; non-literal leaf expressions must be parenthesised.
///
/// ```
/// # #[macro_use] extern crate prototree;
/// # fn main() {
/// let tree = ptree!({
///     "id" => "7",
///     "tags" => ["a", "b"],
///     "inner" => { "depth" => "2" },
/// });
/// assert_eq!(Some("2"), tree.get("inner.depth"));
/// assert_eq!(2, tree.find("tags").unwrap().count(""));
/// # }
/// ```
#[macro_export]
macro_rules! ptree {
    ({ $($key:expr => $value:tt,)+ }) => {
        ptree!({ $($key => $value),+ })
    };

    ({ $($key:expr => $value:tt),* }) => { {
        #[allow(unused_mut)]
        let mut node = $crate::tree::Tree::new();
        $(node.push_back($key, ptree!($value));)*
        node
    } };

    ([ $($value:tt,)+ ]) => {
        ptree!([ $($value),+ ])
    };

    ([ $($value:tt),* ]) => { {
        #[allow(unused_mut)]
        let mut node = $crate::tree::Tree::new();
        $(node.push_back("", ptree!($value));)*
        node
    } };

    ($leaf:expr) => {
        $crate::tree::Tree::from($leaf)
    };
}
