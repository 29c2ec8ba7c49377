//! Full legality checking for annotated types: the target-type predicate,
//! the transitive exclusion rule over typedef alias chains, value literals,
//! and site restrictions, executed in that order.

use widl_attrs::{attr::Attr, attr::Attrs, builtin::ATTR_MAP, target::AttrTarget};
use widl_types::{diagnostics::TyError, store::Ty};

use crate::{
    decl::{AnnotatedType, AnnotationState},
    diagnostics::{SemanticError, SemanticResult},
    site::Site,
    Frontend,
};

/// Validation runs twice per site: eagerly at `apply()` time, where a
/// not-yet-declared typedef defers the checks entirely, and strictly over
/// the whole graph at finalization, where everything must resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationMode {
    Eager,
    Final,
}

impl Frontend {
    /// Validate one annotated type and advance its state machine:
    /// `Validated` when every check ran and passed, unchanged when checks
    /// were deferred, `Rejected` (terminal, aborts the unit) on failure.
    pub(crate) fn validate_annotated(
        &mut self,
        annotated: &mut AnnotatedType,
        mode: ValidationMode,
    ) -> SemanticResult {
        match self.run_checks(annotated, mode) {
            Ok(Some(effective)) => {
                annotated.set_effective(effective);
                annotated.set_state(AnnotationState::Validated);
                Ok(())
            }
            // Deferred: the chain was not resolvable yet. Settled at
            // finalization.
            Ok(None) => Ok(()),
            Err(err) => {
                annotated.set_state(AnnotationState::Rejected);
                Err(err)
            }
        }
    }

    /// Execute the four checks in specification order. Returns the effective
    /// attribute set when the alias chain resolved, `None` when resolution
    /// was deferred in eager mode.
    fn run_checks(
        &mut self,
        annotated: &AnnotatedType,
        mode: ValidationMode,
    ) -> SemanticResult<Option<Attrs>> {
        let site = annotated.site();

        // All four checks are deferred together when the chain is not yet
        // resolvable, so that forward references keep the check order.
        let canonical = match self.types.canonical(annotated.ty()) {
            Ok(canonical) => canonical,
            Err(TyError::UnresolvedName { .. }) if mode == ValidationMode::Eager => {
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        // 1. Target-type check: the resolved primitive kind must satisfy
        // each attribute's class mask. Wrappers (sequence, nullable, union)
        // never qualify themselves.
        let kind = match self.types.get(canonical) {
            Ty::Primitive(primitive) => Some(*primitive),
            _ => None,
        };

        for attr in annotated.direct_attrs().iter() {
            let spec = ATTR_MAP.get(attr.id);
            let applies = kind.is_some_and(|kind| spec.applicable.intersects(kind.class()));
            if !applies {
                return Err(SemanticError::InapplicableAttribute {
                    name: attr.name,
                    site,
                    kind: self.types.describe_kind(canonical),
                });
            }
        }

        // 2. Transitive exclusion check over every alias link, not just the
        // directly attached attributes.
        let effective = self.collect_effective(annotated, site)?;

        // 3. Value check: value-bearing attributes must carry exactly the
        // registered literal.
        for attr in annotated.direct_attrs().iter() {
            let spec = ATTR_MAP.get(attr.id);
            if let (Some(expected), Some(value)) = (spec.expected, attr.value) {
                if value != expected.into() {
                    return Err(SemanticError::InvalidAttributeValue {
                        name: attr.name,
                        value,
                        expected,
                        site,
                    });
                }
            }
        }

        // 4. Site-restriction check: an otherwise type-legal attribute may
        // still be disallowed at this site kind.
        for attr in annotated.direct_attrs().iter() {
            let spec = ATTR_MAP.get(attr.id);
            if !spec.sites.contains(site.target) {
                return Err(SemanticError::SiteRestrictionViolation { name: attr.name, site });
            }
        }

        Ok(Some(effective))
    }

    /// Collect the attributes reachable on this type: the direct set plus
    /// the set of every alias link on the way to the canonical type,
    /// rejecting any pair that shares an exclusion group.
    fn collect_effective(
        &mut self,
        annotated: &AnnotatedType,
        site: Site,
    ) -> SemanticResult<Attrs> {
        let mut pool: Vec<Attr> = annotated.direct_attrs().iter().copied().collect();

        for link in self.types.alias_chain(annotated.ty())? {
            // At a typedef declaration the direct set and the alias node's
            // stored set are the same attributes; do not double-count them.
            if link == annotated.ty() && site.target == AttrTarget::TYPEDEF {
                continue;
            }

            let Some(link_attrs) = self.attrs.get(link) else { continue };
            for inherited in link_attrs.iter() {
                if let Some(existing) =
                    pool.iter().find(|attr| ATTR_MAP.get(attr.id).excludes(ATTR_MAP.get(inherited.id)))
                {
                    return Err(SemanticError::ConflictingAttributes {
                        first: existing.name,
                        second: inherited.name,
                        site,
                    });
                }

                pool.push(*inherited);
            }
        }

        Ok(pool.into_iter().collect())
    }
}
