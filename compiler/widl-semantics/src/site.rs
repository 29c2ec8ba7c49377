//! Runtime descriptors of annotation sites, carried through the applier and
//! validator so diagnostics can name where an attribute was written.

use std::fmt;

use widl_ast::ident::Identifier;
use widl_attrs::target::AttrTarget;

/// One concrete annotation site: its kind (always a single [AttrTarget]
/// bit), the declaration or member it belongs to, and the site-specific
/// qualifier flags the grammar hands over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    /// The site kind.
    pub target: AttrTarget,

    /// The name of the declaration or member the site belongs to.
    pub subject: Identifier,

    /// Qualifier for display purposes only; legality is decided by `target`.
    qualifier: Option<&'static str>,
}

impl Site {
    /// The inner type of a `typedef` declaration.
    pub fn typedef(name: Identifier) -> Self {
        Self { target: AttrTarget::TYPEDEF, subject: name, qualifier: None }
    }

    /// A dictionary member type.
    pub fn dictionary_member(name: Identifier, required: bool) -> Self {
        Self {
            target: AttrTarget::DICT_MEMBER,
            subject: name,
            qualifier: required.then_some("required"),
        }
    }

    /// An interface attribute type; readonly attributes are their own site
    /// kind because some attributes are only meaningful with a setter.
    pub fn attribute(name: Identifier, readonly: bool) -> Self {
        let target =
            if readonly { AttrTarget::READONLY_ATTRIBUTE } else { AttrTarget::ATTRIBUTE };
        Self { target, subject: name, qualifier: None }
    }

    /// A method argument type.
    pub fn argument(name: Identifier, optional: bool) -> Self {
        Self {
            target: AttrTarget::ARGUMENT,
            subject: name,
            qualifier: optional.then_some("optional"),
        }
    }

    /// A member type inside a union written at the given subject.
    pub fn union_member(subject: Identifier) -> Self {
        Self { target: AttrTarget::UNION_MEMBER, subject, qualifier: None }
    }

    /// A setlike/maplike/iterable element type on the given interface.
    pub fn element(interface: Identifier) -> Self {
        Self { target: AttrTarget::ELEMENT, subject: interface, qualifier: None }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.qualifier {
            Some(qualifier) => write!(f, "{qualifier} {} `{}`", self.target, self.subject),
            None => write!(f, "{} `{}`", self.target, self.subject),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sites_display_their_context() {
        assert_eq!(
            Site::dictionary_member("a".into(), true).to_string(),
            "required dictionary member `a`"
        );
        assert_eq!(
            Site::attribute("foo".into(), true).to_string(),
            "readonly interface attribute `foo`"
        );
        assert_eq!(Site::typedef("Foo".into()).to_string(), "typedef declaration `Foo`");
    }
}
