//! The kinds of annotation sites an extended attribute may be written at.

use std::fmt;

use bitflags::bitflags;
use itertools::Itertools;

bitflags! {
    /// [AttrTarget] tags every syntactic position where an attribute list may
    /// precede a type reference. The registry stores, per attribute, the mask
    /// of targets it is allowed at, which is what turns the (site, attribute)
    /// legality matrix into configuration data rather than per-site code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AttrTarget: u32 {
        /// The inner type of a `typedef` declaration.
        const TYPEDEF = 1 << 1;

        /// A dictionary member type, required or optional.
        const DICT_MEMBER = 1 << 2;

        /// A plain (writable) interface attribute type.
        const ATTRIBUTE = 1 << 3;

        /// A `readonly` interface attribute type.
        const READONLY_ATTRIBUTE = 1 << 4;

        /// A method argument type, required or optional.
        const ARGUMENT = 1 << 5;

        /// A member type inside a union.
        const UNION_MEMBER = 1 << 6;

        /// A parameterized element type: `setlike<T>`, `maplike<K, V>`,
        /// `iterable<K, V>`.
        const ELEMENT = 1 << 7;
    }
}

impl fmt::Display for AttrTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds = self
            .iter()
            .map(|target| match target {
                AttrTarget::TYPEDEF => "typedef declaration",
                AttrTarget::DICT_MEMBER => "dictionary member",
                AttrTarget::ATTRIBUTE => "interface attribute",
                AttrTarget::READONLY_ATTRIBUTE => "readonly interface attribute",
                AttrTarget::ARGUMENT => "method argument",
                AttrTarget::UNION_MEMBER => "union member type",
                AttrTarget::ELEMENT => "parameterized element type",
                _ => unreachable!(),
            })
            .collect_vec();

        write!(f, "{}", kinds.join(" or "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_targets_render_cleanly() {
        assert_eq!(AttrTarget::TYPEDEF.to_string(), "typedef declaration");
        assert_eq!(
            (AttrTarget::ATTRIBUTE | AttrTarget::ARGUMENT).to_string(),
            "interface attribute or method argument"
        );
    }
}
