//! Errors that can occur while building or resolving the type graph.

use std::fmt;

use widl_ast::ident::Identifier;

/// Utility type which wraps a [Result] with a [TyError].
pub type TyResult<T = ()> = Result<T, TyError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TyError {
    /// A typedef name was revisited before its own resolution completed,
    /// i.e. the alias chain loops back on itself.
    CyclicTypedef {
        /// The typedef name at which the cycle was detected.
        name: Identifier,
    },

    /// A name was used as a type but never declared as a typedef (and is not
    /// a primitive).
    UnresolvedName {
        /// The undeclared name.
        name: Identifier,
    },

    /// A typedef name was declared twice in one parse unit.
    DuplicateTypedef {
        /// The redeclared name.
        name: Identifier,
    },
}

impl fmt::Display for TyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TyError::CyclicTypedef { name } => {
                write!(f, "cyclic typedef chain involving `{name}`")
            }
            TyError::UnresolvedName { name } => {
                write!(f, "unresolved type name `{name}`")
            }
            TyError::DuplicateTypedef { name } => {
                write!(f, "duplicate typedef `{name}`")
            }
        }
    }
}

impl std::error::Error for TyError {}
