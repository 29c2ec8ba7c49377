//! Identifier storage utilities and wrappers. Identifiers are interned
//! process-wide so that attribute and type names can be compared and hashed
//! as plain `u32`s throughout the front end.

use std::{
    borrow::Cow,
    fmt::{Debug, Display},
    sync::atomic::{AtomicU32, Ordering},
};

use dashmap::DashMap;
use fnv::FnvBuildHasher;
use lazy_static::lazy_static;

/// An interned identifier. Only ever created through [`IdentifierMap`], so a
/// live [`Identifier`] always has a backing string.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Identifier(u32);

static IDENTIFIER_COUNTER: AtomicU32 = AtomicU32::new(0);

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", IDENTIFIER_MAP.get_ident(*self))
    }
}

impl Debug for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Identifier").field(&IDENTIFIER_MAP.get_ident(*self)).field(&self.0).finish()
    }
}

// Utility methods for converting from a String to an Identifier and vice versa.

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        IDENTIFIER_MAP.create_ident(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        IDENTIFIER_MAP.create_ident(name.as_str())
    }
}

impl From<Identifier> for &str {
    fn from(ident: Identifier) -> Self {
        IDENTIFIER_MAP.get_ident(ident)
    }
}

impl From<Identifier> for String {
    fn from(ident: Identifier) -> Self {
        String::from(IDENTIFIER_MAP.get_ident(ident))
    }
}

impl From<Identifier> for Cow<'static, str> {
    fn from(ident: Identifier) -> Self {
        Cow::from(IDENTIFIER_MAP.get_ident(ident))
    }
}

lazy_static! {
    pub static ref IDENTIFIER_MAP: IdentifierMap = IdentifierMap::new();
}

/// Struct representing a globally accessible identifier map. The struct
/// contains an identifier map and another map for reverse lookups.
#[derive(Debug, Default)]
pub struct IdentifierMap {
    reverse_identifiers: DashMap<&'static str, Identifier, FnvBuildHasher>,
    identifiers: DashMap<Identifier, &'static str, FnvBuildHasher>,
}

impl IdentifierMap {
    /// Create a new [IdentifierMap].
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern the given string, returning the existing [Identifier] if it has
    /// been seen before.
    pub fn create_ident(&self, name: &str) -> Identifier {
        if let Some(ident) = self.reverse_identifiers.get(name) {
            return *ident;
        }

        // The interner lives for the whole process, so the backing string is
        // leaked rather than reference counted.
        let name: &'static str = Box::leak(name.to_owned().into_boxed_str());

        let ident = *self.reverse_identifiers.entry(name).or_insert_with(|| {
            Identifier(IDENTIFIER_COUNTER.fetch_add(1, Ordering::SeqCst))
        });
        self.identifiers.insert(ident, name);

        ident
    }

    /// Get the string that backs the given [Identifier].
    pub fn get_ident(&self, ident: Identifier) -> &'static str {
        self.identifiers
            .get(&ident)
            .map(|entry| *entry)
            .expect("identifier was not created through the interner")
    }
}
