//! All of the defined logic and data structures for extended attribute
//! management in the WIDL front end: parsed attribute values, the
//! per-parse-unit attribute store, and the read-only registry describing
//! every recognized attribute.

pub mod attr;
pub mod builtin;
pub mod target;
pub mod ty;
