//! The semantic stage of the WIDL front end: builds the type graph from the
//! grammar-produced syntax tree, applies extended attributes at every
//! annotation site with fail-fast checking, and re-validates the whole
//! graph at finalization before handing the declaration tree to the code
//! generator.
//!
//! A [`Frontend`] covers one parse unit. [`Frontend::parse`] may be called
//! any number of times to accumulate definitions; [`Frontend::finish`]
//! consumes the frontend and either returns the completed
//! [`ValidatedModule`] or the first validation failure encountered.

pub mod apply;
pub mod decl;
pub mod diagnostics;
pub mod site;
pub mod validate;

use log::debug;
use widl_ast::ast;
use widl_attrs::attr::AttrStore;
use widl_types::store::TypeStore;

pub use crate::{
    decl::{
        AnnotatedType, AnnotationState, ArgumentDecl, AttributeDecl, Declaration, DictionaryDecl,
        DictionaryMemberDecl, InterfaceDecl, InterfaceMemberDecl, IterableDecl, MaplikeDecl,
        MethodDecl, SetlikeDecl, TypedefDecl, ValidatedModule,
    },
    diagnostics::{SemanticError, SemanticResult},
    site::Site,
};

use crate::validate::ValidationMode;

/// The entry point of the semantic stage, covering one parse unit.
#[derive(Debug, Default)]
pub struct Frontend {
    /// The interned type graph of this unit.
    pub(crate) types: TypeStore,

    /// Attributes attached to typedef alias nodes.
    pub(crate) attrs: AttrStore,

    /// Accumulated declarations, in source order.
    declarations: Vec<Declaration>,
}

impl Frontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one grammar-produced module, running the per-site fail-fast
    /// checks as attributes are applied.
    pub fn parse(&mut self, module: ast::Module) -> SemanticResult {
        for definition in &module.definitions {
            match definition {
                ast::Definition::Typedef(def) => self.lower_typedef(def)?,
                ast::Definition::Dictionary(def) => self.lower_dictionary(def)?,
                ast::Definition::Interface(def) => self.lower_interface(def)?,
            }
        }

        Ok(())
    }

    /// Run the whole-graph finalization pass and return the validated
    /// declaration set. Required on top of the eager checks because a
    /// typedef may reference another typedef that was not yet declared at
    /// its own apply time.
    pub fn finish(mut self) -> SemanticResult<ValidatedModule> {
        debug!("finalizing parse unit with {} declaration(s)", self.declarations.len());

        let mut declarations = std::mem::take(&mut self.declarations);
        for declaration in &mut declarations {
            match declaration {
                Declaration::Typedef(decl) => self.finalize_annotated(&mut decl.inner)?,
                Declaration::Dictionary(decl) => {
                    for member in &mut decl.members {
                        self.finalize_annotated(&mut member.ty)?;
                    }
                }
                Declaration::Interface(decl) => {
                    for member in &mut decl.members {
                        match member {
                            InterfaceMemberDecl::Attribute(attr) => {
                                self.finalize_annotated(&mut attr.ty)?;
                            }
                            InterfaceMemberDecl::Method(method) => {
                                for arg in &mut method.args {
                                    self.finalize_annotated(&mut arg.ty)?;
                                }
                            }
                            InterfaceMemberDecl::Setlike(setlike) => {
                                self.finalize_annotated(&mut setlike.element)?;
                            }
                            InterfaceMemberDecl::Maplike(maplike) => {
                                self.finalize_annotated(&mut maplike.key)?;
                                self.finalize_annotated(&mut maplike.value)?;
                            }
                            InterfaceMemberDecl::Iterable(iterable) => {
                                self.finalize_annotated(&mut iterable.key)?;
                                self.finalize_annotated(&mut iterable.value)?;
                            }
                        }
                    }
                }
            }
        }

        Ok(ValidatedModule { declarations, types: self.types })
    }

    /// Re-validate one annotated type (and, for unions, every member type)
    /// strictly, baking in the effective attribute set.
    fn finalize_annotated(&mut self, annotated: &mut AnnotatedType) -> SemanticResult {
        self.validate_annotated(annotated, ValidationMode::Final)?;
        for member in annotated.union_members_mut() {
            self.finalize_annotated(member)?;
        }

        Ok(())
    }

    /// Lower one annotated type expression at a site: intern the type,
    /// apply the attribute list, and recurse into union members.
    fn lower_annotated(
        &mut self,
        site: Site,
        expr: &ast::AnnotatedTypeExpr,
    ) -> SemanticResult<AnnotatedType> {
        let ty = self.types.intern_expr(&expr.ty);
        let mut annotated = self.apply(site, &expr.attrs, ty)?;
        self.lower_union_members(site, &expr.ty, &mut annotated)?;

        Ok(annotated)
    }

    fn lower_union_members(
        &mut self,
        site: Site,
        expr: &ast::TypeExpr,
        annotated: &mut AnnotatedType,
    ) -> SemanticResult {
        if let ast::TypeExpr::Union(members) = expr {
            for member in members {
                let member = self.lower_annotated(Site::union_member(site.subject), member)?;
                annotated.push_union_member(member);
            }
        }

        Ok(())
    }

    fn lower_typedef(&mut self, def: &ast::TypedefDef) -> SemanticResult {
        debug!("lowering typedef `{}`", def.name);

        let target = self.types.intern_expr(&def.ty.ty);
        self.types.register_typedef(def.name, target)?;

        // The typedef's attributes attach to its alias node, which is what
        // every later reference by name shares.
        let alias = self.types.intern_alias(def.name);
        let site = Site::typedef(def.name);
        let mut inner = self.apply(site, &def.ty.attrs, alias)?;
        self.lower_union_members(site, &def.ty.ty, &mut inner)?;

        self.declarations.push(Declaration::Typedef(TypedefDecl { name: def.name, inner }));
        Ok(())
    }

    fn lower_dictionary(&mut self, def: &ast::DictionaryDef) -> SemanticResult {
        debug!("lowering dictionary `{}`", def.name);

        let mut members = Vec::with_capacity(def.members.len());
        for member in &def.members {
            let site = Site::dictionary_member(member.name, member.required);
            let ty = self.lower_annotated(site, &member.ty)?;
            members.push(DictionaryMemberDecl {
                name: member.name,
                required: member.required,
                ty,
            });
        }

        self.declarations.push(Declaration::Dictionary(DictionaryDecl { name: def.name, members }));
        Ok(())
    }

    fn lower_interface(&mut self, def: &ast::InterfaceDef) -> SemanticResult {
        debug!("lowering interface `{}`", def.name);

        let mut members = Vec::with_capacity(def.members.len());
        for member in &def.members {
            let member = match member {
                ast::InterfaceMember::Attribute(attr) => {
                    let site = Site::attribute(attr.name, attr.readonly);
                    InterfaceMemberDecl::Attribute(AttributeDecl {
                        name: attr.name,
                        readonly: attr.readonly,
                        ty: self.lower_annotated(site, &attr.ty)?,
                    })
                }
                ast::InterfaceMember::Method(method) => {
                    let mut args = Vec::with_capacity(method.args.len());
                    for arg in &method.args {
                        let site = Site::argument(arg.name, arg.optional);
                        args.push(ArgumentDecl {
                            name: arg.name,
                            optional: arg.optional,
                            ty: self.lower_annotated(site, &arg.ty)?,
                        });
                    }
                    InterfaceMemberDecl::Method(MethodDecl { name: method.name, args })
                }
                ast::InterfaceMember::Setlike(setlike) => {
                    let site = Site::element(def.name);
                    InterfaceMemberDecl::Setlike(SetlikeDecl {
                        element: self.lower_annotated(site, &setlike.element)?,
                    })
                }
                ast::InterfaceMember::Maplike(maplike) => {
                    let site = Site::element(def.name);
                    InterfaceMemberDecl::Maplike(MaplikeDecl {
                        key: self.lower_annotated(site, &maplike.key)?,
                        value: self.lower_annotated(site, &maplike.value)?,
                    })
                }
                ast::InterfaceMember::Iterable(iterable) => {
                    let site = Site::element(def.name);
                    InterfaceMemberDecl::Iterable(IterableDecl {
                        key: self.lower_annotated(site, &iterable.key)?,
                        value: self.lower_annotated(site, &iterable.value)?,
                    })
                }
            };

            members.push(member);
        }

        self.declarations.push(Declaration::Interface(InterfaceDecl { name: def.name, members }));
        Ok(())
    }
}
