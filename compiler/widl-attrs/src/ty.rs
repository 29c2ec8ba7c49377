//! The "type" of each recognized attribute: its value grammar, its
//! target-type predicate, the sites it may appear at, and its
//! mutual-exclusion group. The registry is the single source of truth for
//! all of these, so legality checks stay data lookups.

use fxhash::FxHashMap;
use index_vec::{define_index_type, IndexVec};
use widl_ast::ident::Identifier;
use widl_types::primitives::PrimitiveClass;

use crate::target::AttrTarget;

define_index_type! {
    /// The unique identifier of a registered attribute.
    pub struct AttrId = u32;
    MAX_INDEX = i32::max_value() as usize;
    DISABLE_MAX_INDEX_CHECK = cfg!(not(debug_assertions));
}

/// The value grammar of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValueSpec {
    /// The attribute takes no value, e.g. `[Clamp]`.
    None,

    /// The attribute requires an `=identifier` value, e.g.
    /// `[TreatNullAs=EmptyString]`.
    RequiredIdent,
}

/// Groups of attributes of which at most one may reach any single type,
/// directly or through its typedef alias chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionGroup {
    /// The numeric range coercion policies: a value is either rejected or
    /// clamped, never both.
    RangeCoercion,
}

/// An [AttrTy] stores everything the checker needs to know about one
/// recognized attribute.
#[derive(Debug)]
pub struct AttrTy {
    /// The name of the attribute.
    pub name: Identifier,

    /// The value grammar.
    pub value: AttrValueSpec,

    /// For value-bearing attributes, the exact literal the value must be.
    pub expected: Option<&'static str>,

    /// The classes of resolved primitive the attribute may attach to.
    pub applicable: PrimitiveClass,

    /// The annotation sites the attribute is allowed at. An attribute that
    /// passes the type predicate may still be denied at a given site kind.
    pub sites: AttrTarget,

    /// The mutual-exclusion group, if the attribute belongs to one.
    pub exclusion: Option<ExclusionGroup>,
}

impl AttrTy {
    /// Whether this attribute excludes the other one (or a second copy of
    /// itself) on the same type.
    pub fn excludes(&self, other: &AttrTy) -> bool {
        if self.name == other.name {
            return true;
        }

        match (self.exclusion, other.exclusion) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

/// A table that stores the definitions for all of the recognized extended
/// attributes. The table stores the value grammar of each attribute, the
/// target-type predicate, and the site kinds the attribute may be applied
/// at.
#[derive(Debug, Default)]
pub struct AttrTyMap {
    /// A storage of all of the attributes that the front end knows and
    /// supports.
    pub(crate) map: IndexVec<AttrId, AttrTy>,

    /// A mapping between the name of an attribute and its [AttrId].
    pub(crate) name_map: FxHashMap<Identifier, AttrId>,
}

impl AttrTyMap {
    /// Create a new [AttrTyMap].
    pub fn new() -> Self {
        Self { map: IndexVec::new(), name_map: FxHashMap::default() }
    }

    /// Get the [AttrTy] for the given [AttrId].
    pub fn get(&self, id: AttrId) -> &AttrTy {
        &self.map[id]
    }

    /// Get the [AttrId] by the name of the attribute.
    pub fn get_id_by_name(&self, name: Identifier) -> Option<AttrId> {
        self.name_map.get(&name).copied()
    }

    /// Get the [AttrTy] by the name of the attribute.
    pub fn get_by_name(&self, name: Identifier) -> Option<&AttrTy> {
        self.name_map.get(&name).map(|id| &self.map[*id])
    }

    /// Look an attribute up by name, returning both its id and entry.
    pub fn lookup(&self, name: Identifier) -> Option<(AttrId, &AttrTy)> {
        self.name_map.get(&name).map(|id| (*id, &self.map[*id]))
    }
}
