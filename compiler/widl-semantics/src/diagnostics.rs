//! Errors that can occur from attribute application and validation. Every
//! variant is terminal for the current parse unit: the first violation
//! aborts the unit, and the driver is responsible for presentation.

use std::fmt;

use widl_ast::ident::Identifier;
use widl_types::diagnostics::TyError;

use crate::site::Site;

/// Utility type which wraps a [Result] with a [SemanticError].
pub type SemanticResult<T = ()> = Result<T, SemanticError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    /// An attribute name with no registry entry.
    UnknownAttribute { name: Identifier, site: Site },

    /// A required value was missing, or a value was supplied to a valueless
    /// attribute. `value` carries what was actually written.
    AttributeSyntaxError { name: Identifier, site: Site, value: Option<Identifier> },

    /// The attribute's target-type predicate does not hold for the resolved
    /// type. `kind` describes what the type resolved to.
    InapplicableAttribute { name: Identifier, site: Site, kind: String },

    /// Two attributes of one mutual-exclusion group reached the same type,
    /// either directly in one attribute list or through typedef aliases.
    ConflictingAttributes { first: Identifier, second: Identifier, site: Site },

    /// An attribute attached at a typedef declaration conflicts with one
    /// already borne by the type the typedef aliases.
    TypedefAttributeConflict {
        name: Identifier,
        prior: Identifier,
        typedef: Identifier,
        site: Site,
    },

    /// A value-bearing attribute with the wrong literal.
    InvalidAttributeValue {
        name: Identifier,
        value: Identifier,
        expected: &'static str,
        site: Site,
    },

    /// A typedef alias chain loops back on itself.
    CyclicTypedef { name: Identifier },

    /// An otherwise type-legal attribute is disallowed at this site kind.
    SiteRestrictionViolation { name: Identifier, site: Site },

    /// A name was used as a type but never declared.
    UnresolvedName { name: Identifier },

    /// A typedef name was declared twice in one parse unit.
    DuplicateTypedef { name: Identifier },
}

impl From<TyError> for SemanticError {
    fn from(err: TyError) -> Self {
        match err {
            TyError::CyclicTypedef { name } => SemanticError::CyclicTypedef { name },
            TyError::UnresolvedName { name } => SemanticError::UnresolvedName { name },
            TyError::DuplicateTypedef { name } => SemanticError::DuplicateTypedef { name },
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticError::UnknownAttribute { name, site } => {
                write!(f, "unknown extended attribute `{name}` on {site}")
            }
            SemanticError::AttributeSyntaxError { name, site, value: Some(_) } => {
                write!(f, "extended attribute `{name}` on {site} does not take a value")
            }
            SemanticError::AttributeSyntaxError { name, site, value: None } => {
                write!(f, "extended attribute `{name}` on {site} requires a value")
            }
            SemanticError::InapplicableAttribute { name, site, kind } => {
                write!(f, "`[{name}]` cannot be applied to {kind} on {site}")
            }
            SemanticError::ConflictingAttributes { first, second, site } => {
                write!(f, "conflicting extended attributes `[{first}]` and `[{second}]` on {site}")
            }
            SemanticError::TypedefAttributeConflict { name, prior, typedef, site } => {
                write!(
                    f,
                    "`[{name}]` on {site} conflicts with `[{prior}]` already carried by typedef `{typedef}`"
                )
            }
            SemanticError::InvalidAttributeValue { name, value, expected, site } => {
                write!(
                    f,
                    "invalid value `{value}` for extended attribute `{name}` on {site}: expected `{expected}`"
                )
            }
            SemanticError::CyclicTypedef { name } => {
                write!(f, "cyclic typedef chain involving `{name}`")
            }
            SemanticError::SiteRestrictionViolation { name, site } => {
                write!(f, "extended attribute `[{name}]` is not allowed on {site}")
            }
            SemanticError::UnresolvedName { name } => {
                write!(f, "unresolved type name `{name}`")
            }
            SemanticError::DuplicateTypedef { name } => {
                write!(f, "duplicate typedef `{name}`")
            }
        }
    }
}

impl std::error::Error for SemanticError {}
