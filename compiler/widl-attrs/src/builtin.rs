//! Defines all of the builtin extended attributes that the front end
//! supports.

use std::sync::LazyLock;

use widl_ast::ident::Identifier;
use widl_types::primitives::PrimitiveClass;

use crate::{
    target::AttrTarget,
    ty::{AttrTy, AttrTyMap, AttrValueSpec, ExclusionGroup},
};

/// Builtin attribute names, for identity checks without re-spelling the
/// strings at every use site.
pub mod attrs {
    pub const ENFORCE_RANGE: &str = "EnforceRange";
    pub const CLAMP: &str = "Clamp";
    pub const TREAT_NULL_AS: &str = "TreatNullAs";
}

// @@Future: support for a richer value grammar (string literals, lists) once
// an attribute needs one; `AttrValueSpec` is the place it slots into.
macro_rules! define_attr {
    ($table:expr, $name:ident, value: $expected:literal, $applicable:expr, $sites:expr, $exclusion:expr) => {
        define_attr!(
            @push $table, $name, AttrValueSpec::RequiredIdent, Some($expected), $applicable, $sites, $exclusion
        );
    };
    ($table:expr, $name:ident, $applicable:expr, $sites:expr, $exclusion:expr) => {
        define_attr!(@push $table, $name, AttrValueSpec::None, None, $applicable, $sites, $exclusion);
    };
    (@push $table:expr, $name:ident, $value:expr, $expected:expr, $applicable:expr, $sites:expr, $exclusion:expr) => {
        let name: Identifier = stringify!($name).into();
        let index = $table.map.push(AttrTy {
            name,
            value: $value,
            expected: $expected,
            applicable: $applicable,
            sites: $sites,
            exclusion: $exclusion,
        });

        if $table.name_map.insert(name, index).is_some() {
            panic!("duplicate attribute name: `{}`", name);
        }
    };
}

pub static ATTR_MAP: LazyLock<AttrTyMap> = LazyLock::new(|| {
    let mut table = AttrTyMap::new();

    // ------------------------------------------
    // Numeric range coercion policies.
    // ------------------------------------------
    define_attr!(
        table,
        EnforceRange,
        PrimitiveClass::NUMERIC,
        AttrTarget::all(),
        Some(ExclusionGroup::RangeCoercion)
    );
    define_attr!(
        table,
        Clamp,
        PrimitiveClass::NUMERIC,
        AttrTarget::all(),
        Some(ExclusionGroup::RangeCoercion)
    );

    // ------------------------------------------
    // String coercion policies.
    // ------------------------------------------
    // `TreatNullAs` modifies setter coercion, so readonly attributes cannot
    // carry it, and neither can individual union member types.
    define_attr!(
        table,
        TreatNullAs,
        value: "EmptyString",
        PrimitiveClass::STRING,
        AttrTarget::all()
            .difference(AttrTarget::READONLY_ATTRIBUTE | AttrTarget::UNION_MEMBER),
        None
    );

    table
});
