//! The attribute applier: turns the grammar's raw attribute tokens into
//! checked [`Attr`]s, attaches them at the annotation site, and runs the
//! fail-fast validation pass over the result.

use widl_ast::ast;
use widl_attrs::{
    attr::{Attr, Attrs},
    builtin::ATTR_MAP,
    target::AttrTarget,
    ty::AttrValueSpec,
};
use widl_types::{diagnostics::TyError, store::TypeId};

use crate::{
    decl::AnnotatedType,
    diagnostics::{SemanticError, SemanticResult},
    site::Site,
    validate::ValidationMode,
    Frontend,
};

impl Frontend {
    /// Apply the raw attribute list of one annotation site to the given type
    /// node. First-order checks (registry lookup, value grammar, direct
    /// conflicts) run per token; the full validator runs on the result
    /// before it is handed back.
    pub(crate) fn apply(
        &mut self,
        site: Site,
        tokens: &[ast::AttrToken],
        ty: TypeId,
    ) -> SemanticResult<AnnotatedType> {
        let mut parsed: Vec<Attr> = Vec::with_capacity(tokens.len());

        for token in tokens {
            let (id, spec) = ATTR_MAP
                .lookup(token.name)
                .ok_or(SemanticError::UnknownAttribute { name: token.name, site })?;

            // Value grammar: a required value must be present, a valueless
            // attribute must not carry one.
            match (spec.value, token.value) {
                (AttrValueSpec::None, Some(_)) | (AttrValueSpec::RequiredIdent, None) => {
                    return Err(SemanticError::AttributeSyntaxError {
                        name: token.name,
                        site,
                        value: token.value,
                    });
                }
                _ => {}
            }

            // Direct conflicts within this attribute list, checked before
            // any type resolution happens.
            if let Some(prev) = parsed.iter().find(|prev| ATTR_MAP.get(prev.id).excludes(spec)) {
                return Err(SemanticError::ConflictingAttributes {
                    first: prev.name,
                    second: token.name,
                    site,
                });
            }

            parsed.push(Attr { id, name: token.name, value: token.value });
        }

        if site.target == AttrTarget::TYPEDEF && !parsed.is_empty() {
            self.attach_to_typedef(site, &parsed, ty)?;
        }

        let direct: Attrs = parsed.into_iter().collect();
        let mut annotated = AnnotatedType::new(site, ty, direct);
        self.validate_annotated(&mut annotated, ValidationMode::Eager)?;

        Ok(annotated)
    }

    /// Attach a typedef declaration's attributes to its alias node. The node
    /// is write-once (a redeclared typedef name is rejected before this
    /// runs), and the new attributes must not conflict with any attribute
    /// already borne along the chain of types the typedef wraps.
    fn attach_to_typedef(
        &mut self,
        site: Site,
        parsed: &[Attr],
        alias: TypeId,
    ) -> SemanticResult {
        match self.types.alias_chain(alias) {
            Ok(chain) => {
                for link in chain.into_iter().filter(|link| *link != alias) {
                    let Some(link_attrs) = self.attrs.get(link) else { continue };
                    let Some(typedef) = self.types.as_alias(link) else { continue };

                    for existing in link_attrs.iter() {
                        for attr in parsed {
                            if ATTR_MAP.get(existing.id).excludes(ATTR_MAP.get(attr.id)) {
                                return Err(SemanticError::TypedefAttributeConflict {
                                    name: attr.name,
                                    prior: existing.name,
                                    typedef,
                                    site,
                                });
                            }
                        }
                    }
                }
            }
            // A forward reference; the finalization pass re-walks the chain.
            Err(TyError::UnresolvedName { .. }) => {}
            Err(err) => return Err(err.into()),
        }

        self.attrs.insert(alias, parsed.iter().copied().collect());
        Ok(())
    }
}
