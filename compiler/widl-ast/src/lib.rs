//! Syntax tree definitions for the WIDL front end, as handed over by the
//! grammar collaborator, together with the global identifier interner that
//! every later stage shares.

pub mod ast;
pub mod ident;
