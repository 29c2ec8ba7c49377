//! The per-parse-unit store of interned type nodes.
//!
//! Types are canonicalized by identity: structural interning for primitives
//! and wrappers, and exactly one `Alias` node per typedef name, so that every
//! reference to the same typedef shares one node. Alias targets are recorded
//! separately from the alias nodes, which is what lets a typedef be
//! referenced before it is declared.

use fxhash::{FxHashMap, FxHashSet};
use index_vec::{define_index_type, IndexVec};
use log::trace;
use widl_ast::{ast, ident::Identifier};

use crate::{
    diagnostics::{TyError, TyResult},
    primitives::PrimitiveTy,
};

define_index_type! {
    /// The unique identifier of an interned type node within one parse unit.
    pub struct TypeId = u32;
    MAX_INDEX = i32::max_value() as usize;
    DISABLE_MAX_INDEX_CHECK = cfg!(not(debug_assertions));
}

/// An interned type node. Immutable once created; annotation state lives
/// outside the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    Primitive(PrimitiveTy),
    Sequence(TypeId),
    Nullable(TypeId),
    Union(Vec<TypeId>),
    /// A typedef name standing for another type. The target is looked up via
    /// the store's typedef table, not stored in the node, so forward
    /// references intern cleanly.
    Alias(Identifier),
}

#[derive(Debug, Default)]
pub struct TypeStore {
    /// All interned nodes of this parse unit.
    types: IndexVec<TypeId, Ty>,

    /// Structural interning table; guarantees node identity.
    interned: FxHashMap<Ty, TypeId>,

    /// Declared typedef targets, `name -> target node`.
    typedefs: FxHashMap<Identifier, TypeId>,

    /// Cache of canonical resolutions, filled on the first walk of each
    /// alias chain.
    resolved: FxHashMap<TypeId, TypeId>,
}

impl TypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the interned node for the given [TypeId].
    pub fn get(&self, id: TypeId) -> &Ty {
        &self.types[id]
    }

    /// Intern a node, returning the existing id if an identical node exists.
    pub fn intern(&mut self, ty: Ty) -> TypeId {
        if let Some(id) = self.interned.get(&ty) {
            return *id;
        }

        let id = self.types.push(ty.clone());
        self.interned.insert(ty, id);
        trace!("interned type node {:?} as {:?}", self.types[id], id);
        id
    }

    /// The per-name `Alias` node for a typedef name, interning it on first
    /// use. This is the node annotation sites share.
    pub fn intern_alias(&mut self, name: Identifier) -> TypeId {
        self.intern(Ty::Alias(name))
    }

    /// Intern the type graph for a raw type expression. Names that are not
    /// primitives become alias nodes; whether they resolve is only decided
    /// once the whole unit has been seen.
    pub fn intern_expr(&mut self, expr: &ast::TypeExpr) -> TypeId {
        match expr {
            ast::TypeExpr::Name(name) => match PrimitiveTy::from_name((*name).into()) {
                Some(primitive) => self.intern(Ty::Primitive(primitive)),
                None => self.intern_alias(*name),
            },
            ast::TypeExpr::Sequence(inner) => {
                let inner = self.intern_expr(inner);
                self.intern(Ty::Sequence(inner))
            }
            ast::TypeExpr::Nullable(inner) => {
                let inner = self.intern_expr(inner);
                self.intern(Ty::Nullable(inner))
            }
            ast::TypeExpr::Union(members) => {
                let members =
                    members.iter().map(|member| self.intern_expr(&member.ty)).collect::<Vec<_>>();
                self.intern(Ty::Union(members))
            }
        }
    }

    /// Record the target of a typedef declaration.
    pub fn register_typedef(&mut self, name: Identifier, target: TypeId) -> TyResult {
        if self.typedefs.insert(name, target).is_some() {
            return Err(TyError::DuplicateTypedef { name });
        }

        Ok(())
    }

    /// Whether the node is a typedef alias, and for which name.
    pub fn as_alias(&self, id: TypeId) -> Option<Identifier> {
        match self.types[id] {
            Ty::Alias(name) => Some(name),
            _ => None,
        }
    }

    /// Walk the alias chain starting at `id`, guarded by an explicit visited
    /// set. Returns the alias nodes crossed (including `id` itself when it is
    /// an alias) and the canonical node the chain ends at.
    fn walk_chain(&self, id: TypeId) -> TyResult<(Vec<TypeId>, TypeId)> {
        let mut visited = FxHashSet::default();
        let mut chain = Vec::new();
        let mut current = id;

        loop {
            let name = match &self.types[current] {
                Ty::Alias(name) => *name,
                _ => return Ok((chain, current)),
            };

            if !visited.insert(name) {
                return Err(TyError::CyclicTypedef { name });
            }

            chain.push(current);
            current = *self.typedefs.get(&name).ok_or(TyError::UnresolvedName { name })?;
        }
    }

    /// Resolve a node through the full alias chain to its canonical node,
    /// caching the resolution of every alias crossed. Names nested inside
    /// wrapper components resolve too, so an undeclared name cannot hide
    /// behind a `sequence<...>` or `...?`.
    pub fn canonical(&mut self, id: TypeId) -> TyResult<TypeId> {
        self.canonical_in(id, &mut FxHashSet::default())
    }

    fn canonical_in(&mut self, id: TypeId, active: &mut FxHashSet<TypeId>) -> TyResult<TypeId> {
        if let Some(canonical) = self.resolved.get(&id) {
            return Ok(*canonical);
        }

        let (chain, canonical) = self.walk_chain(id)?;

        if !active.insert(canonical) {
            // A wrapper can only reach itself back through an alias link,
            // so the chain names one.
            if let Some(name) = chain.iter().rev().find_map(|link| self.as_alias(*link)) {
                return Err(TyError::CyclicTypedef { name });
            }

            return Ok(canonical);
        }

        let components = match &self.types[canonical] {
            Ty::Sequence(inner) | Ty::Nullable(inner) => vec![*inner],
            Ty::Union(members) => members.clone(),
            _ => Vec::new(),
        };
        for component in components {
            self.canonical_in(component, active)?;
        }
        active.remove(&canonical);

        for alias in chain {
            self.resolved.insert(alias, canonical);
        }
        self.resolved.insert(canonical, canonical);

        trace!("resolved {id:?} to canonical {canonical:?}");
        Ok(canonical)
    }

    /// Every alias node crossed on the way from `id` to its canonical node.
    /// Needed by the transitive attribute-conflict check, which must see the
    /// attributes of every link, not just the canonical endpoint.
    pub fn alias_chain(&self, id: TypeId) -> TyResult<Vec<TypeId>> {
        self.walk_chain(id).map(|(chain, _)| chain)
    }

    /// The resolved primitive kind of a node, if its canonical node is a
    /// primitive at all.
    pub fn primitive_kind(&mut self, id: TypeId) -> TyResult<Option<PrimitiveTy>> {
        let canonical = self.canonical(id)?;
        match self.types[canonical] {
            Ty::Primitive(primitive) => Ok(Some(primitive)),
            _ => Ok(None),
        }
    }

    /// A short human description of the node's kind, for diagnostics about
    /// attributes that do not apply to it. Expects a canonical node.
    pub fn describe_kind(&self, id: TypeId) -> String {
        match &self.types[id] {
            Ty::Primitive(primitive) => format!("`{primitive}`"),
            Ty::Sequence(_) => "a sequence type".to_owned(),
            Ty::Nullable(_) => "a nullable type".to_owned(),
            Ty::Union(_) => "a union type".to_owned(),
            Ty::Alias(name) => format!("typedef `{name}`"),
        }
    }

    /// Render the node the way it was written, for diagnostics.
    pub fn ty_name(&self, id: TypeId) -> String {
        match &self.types[id] {
            Ty::Primitive(primitive) => primitive.to_string(),
            Ty::Sequence(inner) => format!("sequence<{}>", self.ty_name(*inner)),
            Ty::Nullable(inner) => format!("{}?", self.ty_name(*inner)),
            Ty::Union(members) => {
                let members =
                    members.iter().map(|member| self.ty_name(*member)).collect::<Vec<_>>();
                format!("({})", members.join(" or "))
            }
            Ty::Alias(name) => name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long() -> ast::TypeExpr {
        ast::TypeExpr::name("long")
    }

    #[test]
    fn interning_is_by_identity() {
        let mut store = TypeStore::new();
        let first = store.intern_expr(&long());
        let second = store.intern_expr(&long());
        assert_eq!(first, second);

        let foo = store.intern_expr(&ast::TypeExpr::name("Foo"));
        let foo_again = store.intern_alias("Foo".into());
        assert_eq!(foo, foo_again);
        assert_ne!(first, foo);
    }

    #[test]
    fn canonical_follows_alias_chains() {
        let mut store = TypeStore::new();
        let long = store.intern_expr(&long());
        let foo = store.intern_alias("Foo".into());
        let bar = store.intern_alias("Bar".into());

        store.register_typedef("Foo".into(), long).unwrap();
        store.register_typedef("Bar".into(), foo).unwrap();

        assert_eq!(store.canonical(bar).unwrap(), long);
        // The second resolution is served from the cache.
        assert_eq!(store.canonical(bar).unwrap(), long);
        assert_eq!(store.alias_chain(bar).unwrap(), vec![bar, foo]);
        assert_eq!(store.primitive_kind(bar).unwrap(), Some(PrimitiveTy::Long));
    }

    #[test]
    fn forward_references_resolve_once_declared() {
        let mut store = TypeStore::new();
        let bar = store.intern_alias("Bar".into());
        assert_eq!(
            store.canonical(bar),
            Err(TyError::UnresolvedName { name: "Bar".into() })
        );

        let long = store.intern_expr(&long());
        store.register_typedef("Bar".into(), long).unwrap();
        assert_eq!(store.canonical(bar).unwrap(), long);
    }

    #[test]
    fn cyclic_typedefs_are_detected() {
        let mut store = TypeStore::new();
        let foo = store.intern_alias("Foo".into());
        let bar = store.intern_alias("Bar".into());
        store.register_typedef("Foo".into(), bar).unwrap();
        store.register_typedef("Bar".into(), foo).unwrap();

        assert!(matches!(store.canonical(foo), Err(TyError::CyclicTypedef { .. })));
    }

    #[test]
    fn duplicate_typedefs_are_rejected() {
        let mut store = TypeStore::new();
        let long = store.intern_expr(&long());
        store.register_typedef("Foo".into(), long).unwrap();
        assert_eq!(
            store.register_typedef("Foo".into(), long),
            Err(TyError::DuplicateTypedef { name: "Foo".into() })
        );
    }

    #[test]
    fn names_nested_in_wrappers_must_resolve() {
        let mut store = TypeStore::new();
        let seq = store.intern_expr(&ast::TypeExpr::sequence(ast::TypeExpr::name("Unknown")));
        assert_eq!(
            store.canonical(seq),
            Err(TyError::UnresolvedName { name: "Unknown".into() })
        );

        let nullable = store.intern_expr(&ast::TypeExpr::nullable(ast::TypeExpr::name("Unknown")));
        assert_eq!(
            store.canonical(nullable),
            Err(TyError::UnresolvedName { name: "Unknown".into() })
        );

        // Declaring the name settles both wrappers.
        let long = store.intern_expr(&long());
        store.register_typedef("Unknown".into(), long).unwrap();
        assert_eq!(store.canonical(seq).unwrap(), seq);
        assert_eq!(store.canonical(nullable).unwrap(), nullable);
    }

    #[test]
    fn typedefs_cannot_contain_themselves_through_a_wrapper() {
        // typedef sequence<Foo> Foo;
        let mut store = TypeStore::new();
        let seq = store.intern_expr(&ast::TypeExpr::sequence(ast::TypeExpr::name("Foo")));
        store.register_typedef("Foo".into(), seq).unwrap();

        let foo = store.intern_alias("Foo".into());
        assert_eq!(store.canonical(foo), Err(TyError::CyclicTypedef { name: "Foo".into() }));
    }

    #[test]
    fn wrappers_are_not_primitives() {
        let mut store = TypeStore::new();
        let nullable = store.intern_expr(&ast::TypeExpr::nullable(long()));
        assert_eq!(store.primitive_kind(nullable).unwrap(), None);
        assert_eq!(store.describe_kind(nullable), "a nullable type");
        assert_eq!(store.ty_name(nullable), "long?");
    }
}
