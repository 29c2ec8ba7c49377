//! The validated declaration tree handed to the code-generation
//! collaborator, and the [`AnnotatedType`] wrapper that carries attachment
//! results from the applier through the validator into that tree.

use widl_ast::ident::Identifier;
use widl_attrs::{attr::Attrs, builtin::attrs};
use widl_types::store::{TypeId, TypeStore};

use crate::site::Site;

/// The validation state of an annotated type node. `Rejected` is terminal
/// and aborts the whole parse unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationState {
    Unannotated,
    Annotated,
    Validated,
    Rejected,
}

/// A type reference plus the attributes attached directly at one annotation
/// site. The effective set (direct plus everything inherited through the
/// typedef alias chain) is baked in by the finalization pass; the named
/// queries read from it, so they are only meaningful on the declarations
/// returned by `finish()`.
#[derive(Debug, Clone)]
pub struct AnnotatedType {
    site: Site,
    ty: TypeId,
    direct: Attrs,
    effective: Attrs,
    state: AnnotationState,
    union_members: Vec<AnnotatedType>,
}

impl AnnotatedType {
    pub(crate) fn new(site: Site, ty: TypeId, direct: Attrs) -> Self {
        let state = if direct.is_empty() {
            AnnotationState::Unannotated
        } else {
            AnnotationState::Annotated
        };

        Self { site, ty, direct, effective: Attrs::new(), state, union_members: Vec::new() }
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn ty(&self) -> TypeId {
        self.ty
    }

    pub fn state(&self) -> AnnotationState {
        self.state
    }

    /// The attributes written directly at this site.
    pub fn direct_attrs(&self) -> &Attrs {
        &self.direct
    }

    /// The effective attribute set: direct attributes plus everything
    /// reachable through the typedef alias chain.
    pub fn effective_attrs(&self) -> &Attrs {
        &self.effective
    }

    /// The annotated member types of a union site, in member order. Empty
    /// for non-union types.
    pub fn union_members(&self) -> &[AnnotatedType] {
        &self.union_members
    }

    pub(crate) fn union_members_mut(&mut self) -> &mut [AnnotatedType] {
        &mut self.union_members
    }

    pub(crate) fn push_union_member(&mut self, member: AnnotatedType) {
        self.union_members.push(member);
    }

    pub(crate) fn set_state(&mut self, state: AnnotationState) {
        self.state = state;
    }

    pub(crate) fn set_effective(&mut self, effective: Attrs) {
        self.effective = effective;
    }

    fn carries(&self, name: &str) -> bool {
        self.effective.by_name(name.into()).is_some()
    }

    /// Whether out-of-range numeric input is rejected.
    pub fn enforce_range(&self) -> bool {
        self.carries(attrs::ENFORCE_RANGE)
    }

    /// Whether out-of-range numeric input saturates to the nearest bound.
    pub fn clamp(&self) -> bool {
        self.carries(attrs::CLAMP)
    }

    /// The `TreatNullAs` coercion literal, if the type carries one.
    pub fn treat_null_as(&self) -> Option<Identifier> {
        self.effective.by_name(attrs::TREAT_NULL_AS.into()).and_then(|attr| attr.value)
    }
}

/// A validated top-level declaration, in source order.
#[derive(Debug, Clone)]
pub enum Declaration {
    Typedef(TypedefDecl),
    Dictionary(DictionaryDecl),
    Interface(InterfaceDecl),
}

#[derive(Debug, Clone)]
pub struct TypedefDecl {
    pub name: Identifier,
    /// The annotated alias node; queries on it see the typedef's own
    /// attributes and everything inherited from the aliased type.
    pub inner: AnnotatedType,
}

#[derive(Debug, Clone)]
pub struct DictionaryDecl {
    pub name: Identifier,
    pub members: Vec<DictionaryMemberDecl>,
}

#[derive(Debug, Clone)]
pub struct DictionaryMemberDecl {
    pub name: Identifier,
    pub required: bool,
    pub ty: AnnotatedType,
}

#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub name: Identifier,
    pub members: Vec<InterfaceMemberDecl>,
}

#[derive(Debug, Clone)]
pub enum InterfaceMemberDecl {
    Attribute(AttributeDecl),
    Method(MethodDecl),
    Setlike(SetlikeDecl),
    Maplike(MaplikeDecl),
    Iterable(IterableDecl),
}

#[derive(Debug, Clone)]
pub struct AttributeDecl {
    pub name: Identifier,
    pub readonly: bool,
    pub ty: AnnotatedType,
}

#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: Identifier,
    pub args: Vec<ArgumentDecl>,
}

#[derive(Debug, Clone)]
pub struct ArgumentDecl {
    pub name: Identifier,
    pub optional: bool,
    pub ty: AnnotatedType,
}

#[derive(Debug, Clone)]
pub struct SetlikeDecl {
    pub element: AnnotatedType,
}

#[derive(Debug, Clone)]
pub struct MaplikeDecl {
    pub key: AnnotatedType,
    pub value: AnnotatedType,
}

#[derive(Debug, Clone)]
pub struct IterableDecl {
    pub key: AnnotatedType,
    pub value: AnnotatedType,
}

/// The completed, validated result set of one parse unit. The type store is
/// part of the result so the code generator can still inspect type
/// structure; both are destroyed together.
#[derive(Debug)]
pub struct ValidatedModule {
    pub declarations: Vec<Declaration>,
    pub types: TypeStore,
}
