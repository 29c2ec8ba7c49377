//! The type graph of the WIDL front end: interned type nodes, typedef alias
//! registration, and alias-chain resolution with cycle detection. One
//! [`store::TypeStore`] lives for exactly one parse unit and is destroyed
//! with that unit's result set.

pub mod diagnostics;
pub mod primitives;
pub mod store;
