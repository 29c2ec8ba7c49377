//! Parsed attribute values and the per-parse-unit attribute store.

use fxhash::FxHashMap;
use widl_ast::ident::Identifier;
use widl_types::store::TypeId;

use crate::ty::AttrId;

/// A single parsed and registry-checked attribute application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attr {
    /// The registry id of the attribute.
    pub id: AttrId,

    /// The name of the attribute.
    pub name: Identifier,

    /// The literal value, for value-bearing attributes.
    pub value: Option<Identifier>,
}

impl Attr {
    /// Create a new attribute without a value.
    pub fn new(id: AttrId, name: Identifier) -> Self {
        Self { id, name, value: None }
    }

    /// Create a new attribute with a value.
    pub fn with_value(id: AttrId, name: Identifier, value: Identifier) -> Self {
        Self { id, name, value: Some(value) }
    }
}

/// The set of attributes attached at one annotation site. Never more than a
/// couple of entries, and write-once: the set is built by the applier and
/// never mutated afterwards. Backed by a vector so that iteration (and with
/// it, which attribute a conflict diagnostic names first) follows insertion
/// order.
#[derive(Default, Debug, Clone)]
pub struct Attrs {
    attrs: Vec<Attr>,
}

impl Attrs {
    /// Create a new empty set of attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute to the set of attributes, replacing any previous
    /// entry with the same registry id.
    pub fn add_attr(&mut self, attr: Attr) {
        match self.attrs.iter_mut().find(|existing| existing.id == attr.id) {
            Some(existing) => *existing = attr,
            None => self.attrs.push(attr),
        }
    }

    /// Check whether an attribute exists in this set.
    pub fn has_attr(&self, id: AttrId) -> bool {
        self.attrs.iter().any(|attr| attr.id == id)
    }

    /// Get an [Attr] by its registry id.
    pub fn get_attr(&self, id: AttrId) -> Option<&Attr> {
        self.attrs.iter().find(|attr| attr.id == id)
    }

    /// Look an attribute up by name.
    pub fn by_name(&self, name: Identifier) -> Option<&Attr> {
        self.attrs.iter().find(|attr| attr.name == name)
    }

    /// Iterate the attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attrs.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }
}

impl FromIterator<Attr> for Attrs {
    fn from_iter<T: IntoIterator<Item = Attr>>(iter: T) -> Self {
        let mut attrs = Attrs::new();
        for attr in iter {
            attrs.add_attr(attr);
        }
        attrs
    }
}

/// The attributes attached directly to typedef alias nodes of one parse
/// unit, keyed by the alias [TypeId]. Write-once per node; the applier
/// enforces that before inserting.
#[derive(Default, Debug)]
pub struct AttrStore {
    map: FxHashMap<TypeId, Attrs>,
}

impl AttrStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the attribute set for a node. The node must not have a set yet.
    pub fn insert(&mut self, id: TypeId, attrs: Attrs) {
        let previous = self.map.insert(id, attrs);
        debug_assert!(previous.is_none(), "attribute set attached twice to one type node");
    }

    /// The attribute set attached to the node, if any.
    pub fn get(&self, id: TypeId) -> Option<&Attrs> {
        self.map.get(&id)
    }

    /// Check whether a particular node has a specific attribute.
    pub fn node_has_attr(&self, id: TypeId, attr: AttrId) -> bool {
        self.map.get(&id).is_some_and(|attrs| attrs.has_attr(attr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attrs_iterate_in_insertion_order() {
        let mut attrs = Attrs::new();
        attrs.add_attr(Attr::new(AttrId::from_usize(1), "Clamp".into()));
        attrs.add_attr(Attr::new(AttrId::from_usize(0), "EnforceRange".into()));

        let names = attrs.iter().map(|attr| attr.name).collect::<Vec<Identifier>>();
        assert_eq!(names, vec![Identifier::from("Clamp"), Identifier::from("EnforceRange")]);

        // Re-adding an id replaces the entry in place.
        attrs.add_attr(Attr::with_value(AttrId::from_usize(1), "Clamp".into(), "x".into()));
        assert_eq!(attrs.len(), 2);
        assert!(attrs.get_attr(AttrId::from_usize(1)).is_some_and(|attr| attr.value.is_some()));
    }
}
