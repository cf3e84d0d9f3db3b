use std::fmt;

/// The declarable types of the language.
///
/// Every [`Value`](crate::interpreter::value::core::Value) carries exactly one
/// of these as its tag, and declarations, parameters and return types name
/// one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// `void`
    Void,
    /// `char`, 8-bit signed.
    Char,
    /// `short`, 16-bit signed.
    Short,
    /// `int`, 32-bit signed.
    Int,
    /// `long`, 64-bit signed.
    Long,
    /// `uchar`, 8-bit unsigned.
    UChar,
    /// `ushort`, 16-bit unsigned.
    UShort,
    /// `uint`, 32-bit unsigned.
    UInt,
    /// `ulong`, 64-bit unsigned.
    ULong,
    /// `float`, single precision.
    Float,
    /// `double`, double precision.
    Double,
    /// `string`, an interned run of characters.
    String,
    /// `entity`, a reference to an object with appendable members.
    Entity,
}

impl PrimitiveType {
    /// The keyword that declares this type.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::UChar => "uchar",
            Self::UShort => "ushort",
            Self::UInt => "uint",
            Self::ULong => "ulong",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Entity => "entity",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
