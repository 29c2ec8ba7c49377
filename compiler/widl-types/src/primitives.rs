//! The WebIDL scalar vocabulary and its classification into the coarse
//! classes that attribute legality predicates are written over.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// The coarse class of a primitive type. Attribute target predicates are
    /// expressed as masks over these classes rather than over individual
    /// primitives, so adding a new scalar only touches [`PrimitiveTy::class`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PrimitiveClass: u8 {
        /// Integer and floating point types.
        const NUMERIC = 1 << 1;

        /// The string types.
        const STRING = 1 << 2;

        /// Everything else: `boolean`, `object`, `any`.
        const OTHER = 1 << 3;
    }
}

/// A WebIDL primitive (scalar) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTy {
    Byte,
    Octet,
    Short,
    UnsignedShort,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Float,
    UnrestrictedFloat,
    Double,
    UnrestrictedDouble,
    DomString,
    ByteString,
    UsvString,
    Boolean,
    Object,
    Any,
}

/// Spellings of every primitive as they appear in source, including the
/// multi-word integer names the grammar hands over verbatim.
static PRIMITIVES: phf::Map<&'static str, PrimitiveTy> = phf::phf_map! {
    "byte" => PrimitiveTy::Byte,
    "octet" => PrimitiveTy::Octet,
    "short" => PrimitiveTy::Short,
    "unsigned short" => PrimitiveTy::UnsignedShort,
    "long" => PrimitiveTy::Long,
    "unsigned long" => PrimitiveTy::UnsignedLong,
    "long long" => PrimitiveTy::LongLong,
    "unsigned long long" => PrimitiveTy::UnsignedLongLong,
    "float" => PrimitiveTy::Float,
    "unrestricted float" => PrimitiveTy::UnrestrictedFloat,
    "double" => PrimitiveTy::Double,
    "unrestricted double" => PrimitiveTy::UnrestrictedDouble,
    "DOMString" => PrimitiveTy::DomString,
    "ByteString" => PrimitiveTy::ByteString,
    "USVString" => PrimitiveTy::UsvString,
    "boolean" => PrimitiveTy::Boolean,
    "object" => PrimitiveTy::Object,
    "any" => PrimitiveTy::Any,
};

impl PrimitiveTy {
    /// Look a primitive up by its source spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        PRIMITIVES.get(name).copied()
    }

    /// The [PrimitiveClass] this primitive belongs to. Always a single bit.
    pub fn class(&self) -> PrimitiveClass {
        match self {
            PrimitiveTy::Byte
            | PrimitiveTy::Octet
            | PrimitiveTy::Short
            | PrimitiveTy::UnsignedShort
            | PrimitiveTy::Long
            | PrimitiveTy::UnsignedLong
            | PrimitiveTy::LongLong
            | PrimitiveTy::UnsignedLongLong
            | PrimitiveTy::Float
            | PrimitiveTy::UnrestrictedFloat
            | PrimitiveTy::Double
            | PrimitiveTy::UnrestrictedDouble => PrimitiveClass::NUMERIC,
            PrimitiveTy::DomString | PrimitiveTy::ByteString | PrimitiveTy::UsvString => {
                PrimitiveClass::STRING
            }
            PrimitiveTy::Boolean | PrimitiveTy::Object | PrimitiveTy::Any => PrimitiveClass::OTHER,
        }
    }
}

impl fmt::Display for PrimitiveTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveTy::Byte => "byte",
            PrimitiveTy::Octet => "octet",
            PrimitiveTy::Short => "short",
            PrimitiveTy::UnsignedShort => "unsigned short",
            PrimitiveTy::Long => "long",
            PrimitiveTy::UnsignedLong => "unsigned long",
            PrimitiveTy::LongLong => "long long",
            PrimitiveTy::UnsignedLongLong => "unsigned long long",
            PrimitiveTy::Float => "float",
            PrimitiveTy::UnrestrictedFloat => "unrestricted float",
            PrimitiveTy::Double => "double",
            PrimitiveTy::UnrestrictedDouble => "unrestricted double",
            PrimitiveTy::DomString => "DOMString",
            PrimitiveTy::ByteString => "ByteString",
            PrimitiveTy::UsvString => "USVString",
            PrimitiveTy::Boolean => "boolean",
            PrimitiveTy::Object => "object",
            PrimitiveTy::Any => "any",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_are_single_bits() {
        for primitive in PRIMITIVES.values() {
            assert_eq!(primitive.class().iter().count(), 1);
        }
    }

    #[test]
    fn multi_word_integer_names_resolve() {
        assert_eq!(PrimitiveTy::from_name("unsigned long long"), Some(PrimitiveTy::UnsignedLongLong));
        assert_eq!(PrimitiveTy::from_name("DOMString"), Some(PrimitiveTy::DomString));
        assert_eq!(PrimitiveTy::from_name("Foo"), None);
    }
}
