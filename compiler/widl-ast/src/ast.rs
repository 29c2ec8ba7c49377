//! The raw syntax tree that the grammar collaborator produces for a parse
//! unit. The tree carries, for every annotation site, the ordered extended
//! attribute tokens, the referenced type expression (possibly an unresolved
//! typedef name), and the site-specific flags.
//!
//! Nothing in here is validated: attribute names may be unknown, values may
//! be malformed, and type names may be undeclared. The semantic stage owns
//! all of those checks.

use crate::ident::Identifier;

/// A whole parse unit worth of definitions, in source order.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub definitions: Vec<Definition>,
}

impl Module {
    pub fn new(definitions: Vec<Definition>) -> Self {
        Self { definitions }
    }
}

/// A top-level definition.
#[derive(Debug, Clone)]
pub enum Definition {
    Typedef(TypedefDef),
    Dictionary(DictionaryDef),
    Interface(InterfaceDef),
}

/// A raw extended attribute token: a name and an optional `=value` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrToken {
    pub name: Identifier,
    pub value: Option<Identifier>,
}

impl AttrToken {
    /// A bare attribute token, e.g. `[Clamp]`.
    pub fn new(name: impl Into<Identifier>) -> Self {
        Self { name: name.into(), value: None }
    }

    /// An attribute token with a value, e.g. `[TreatNullAs=EmptyString]`.
    pub fn with_value(name: impl Into<Identifier>, value: impl Into<Identifier>) -> Self {
        Self { name: name.into(), value: Some(value.into()) }
    }
}

/// An unresolved type reference. A [`TypeExpr::Name`] may be a primitive
/// name (`long`, `DOMString`, ...) or a typedef name; only the type graph
/// builder can tell the two apart.
#[derive(Debug, Clone)]
pub enum TypeExpr {
    Name(Identifier),
    Sequence(Box<TypeExpr>),
    Nullable(Box<TypeExpr>),
    /// A union type. Each member carries its own attribute list, since
    /// attributes may attach directly to a union member type.
    Union(Vec<AnnotatedTypeExpr>),
}

impl TypeExpr {
    pub fn name(name: impl Into<Identifier>) -> Self {
        Self::Name(name.into())
    }

    pub fn sequence(inner: TypeExpr) -> Self {
        Self::Sequence(Box::new(inner))
    }

    pub fn nullable(inner: TypeExpr) -> Self {
        Self::Nullable(Box::new(inner))
    }
}

/// A type expression together with the attribute tokens written directly in
/// front of it at this site.
#[derive(Debug, Clone)]
pub struct AnnotatedTypeExpr {
    pub attrs: Vec<AttrToken>,
    pub ty: TypeExpr,
}

impl AnnotatedTypeExpr {
    pub fn new(attrs: Vec<AttrToken>, ty: TypeExpr) -> Self {
        Self { attrs, ty }
    }

    /// A type expression with no attributes in front of it.
    pub fn bare(ty: TypeExpr) -> Self {
        Self { attrs: Vec::new(), ty }
    }
}

/// `typedef [attrs] Type Name;`
#[derive(Debug, Clone)]
pub struct TypedefDef {
    pub name: Identifier,
    pub ty: AnnotatedTypeExpr,
}

/// `dictionary Name { ...members... };`
#[derive(Debug, Clone)]
pub struct DictionaryDef {
    pub name: Identifier,
    pub members: Vec<DictionaryMember>,
}

/// A dictionary member, `required` or optional.
#[derive(Debug, Clone)]
pub struct DictionaryMember {
    pub name: Identifier,
    pub required: bool,
    pub ty: AnnotatedTypeExpr,
}

/// `interface Name { ...members... };`
#[derive(Debug, Clone)]
pub struct InterfaceDef {
    pub name: Identifier,
    pub members: Vec<InterfaceMember>,
}

#[derive(Debug, Clone)]
pub enum InterfaceMember {
    Attribute(AttributeMember),
    Method(MethodMember),
    Setlike(SetlikeMember),
    Maplike(MaplikeMember),
    Iterable(IterableMember),
}

/// `[readonly] attribute [attrs] Type name;`
#[derive(Debug, Clone)]
pub struct AttributeMember {
    pub name: Identifier,
    pub readonly: bool,
    pub ty: AnnotatedTypeExpr,
}

/// `void name(args...);`, of which only the arguments matter to this stage.
#[derive(Debug, Clone)]
pub struct MethodMember {
    pub name: Identifier,
    pub args: Vec<Argument>,
}

#[derive(Debug, Clone)]
pub struct Argument {
    pub name: Identifier,
    pub optional: bool,
    pub ty: AnnotatedTypeExpr,
}

/// `setlike<Element>;`
#[derive(Debug, Clone)]
pub struct SetlikeMember {
    pub element: AnnotatedTypeExpr,
}

/// `maplike<Key, Value>;`
#[derive(Debug, Clone)]
pub struct MaplikeMember {
    pub key: AnnotatedTypeExpr,
    pub value: AnnotatedTypeExpr,
}

/// `iterable<Key, Value>;`
#[derive(Debug, Clone)]
pub struct IterableMember {
    pub key: AnnotatedTypeExpr,
    pub value: AnnotatedTypeExpr,
}
