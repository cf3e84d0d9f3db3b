use crate::{
    error::RuntimeError,
    interpreter::{
        symbol::Symbol,
        value::{entity::EntityRef, primitive::PrimitiveType},
    },
};

/// Result type of value-level operations.
pub type ValueResult<T> = Result<T, RuntimeError>;

/// Represents a runtime value in the interpreter.
///
/// Exactly one variant is active at a time, and its [`PrimitiveType`] tag
/// decides which operations accept it. Values are plain data: strings are
/// interned symbols and entities are handles into the entity heap, so copying
/// a value never copies an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// The value of `void` functions and bare `return;`.
    Void,
    /// `char`
    Char(i8),
    /// `short`
    Short(i16),
    /// `int`, the type of integer and character literals.
    Int(i32),
    /// `long`
    Long(i64),
    /// `uchar`
    UChar(u8),
    /// `ushort`
    UShort(u16),
    /// `uint`
    UInt(u32),
    /// `ulong`
    ULong(u64),
    /// `float`, the type of floating literals.
    Float(f32),
    /// `double`
    Double(f64),
    /// `string`
    String(Symbol),
    /// `entity`
    Entity(EntityRef),
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Int(i32::from(v))
    }
}

impl From<EntityRef> for Value {
    fn from(v: EntityRef) -> Self {
        Self::Entity(v)
    }
}

impl Value {
    /// Returns the type tag of this value.
    #[must_use]
    pub const fn ty(&self) -> PrimitiveType {
        match self {
            Self::Void => PrimitiveType::Void,
            Self::Char(_) => PrimitiveType::Char,
            Self::Short(_) => PrimitiveType::Short,
            Self::Int(_) => PrimitiveType::Int,
            Self::Long(_) => PrimitiveType::Long,
            Self::UChar(_) => PrimitiveType::UChar,
            Self::UShort(_) => PrimitiveType::UShort,
            Self::UInt(_) => PrimitiveType::UInt,
            Self::ULong(_) => PrimitiveType::ULong,
            Self::Float(_) => PrimitiveType::Float,
            Self::Double(_) => PrimitiveType::Double,
            Self::String(_) => PrimitiveType::String,
            Self::Entity(_) => PrimitiveType::Entity,
        }
    }

    /// The value a declaration without initializer starts with.
    ///
    /// Numbers are zero, strings are empty and entities hold the null
    /// handle, which refers to no live entity.
    ///
    /// # Example
    /// ```
    /// use entity::interpreter::value::{core::Value, primitive::PrimitiveType};
    ///
    /// assert_eq!(Value::zero(PrimitiveType::Int), Value::Int(0));
    /// assert_eq!(Value::zero(PrimitiveType::Double).ty(), PrimitiveType::Double);
    /// ```
    #[must_use]
    pub fn zero(ty: PrimitiveType) -> Self {
        match ty {
            PrimitiveType::Void => Self::Void,
            PrimitiveType::Char => Self::Char(0),
            PrimitiveType::Short => Self::Short(0),
            PrimitiveType::Int => Self::Int(0),
            PrimitiveType::Long => Self::Long(0),
            PrimitiveType::UChar => Self::UChar(0),
            PrimitiveType::UShort => Self::UShort(0),
            PrimitiveType::UInt => Self::UInt(0),
            PrimitiveType::ULong => Self::ULong(0),
            PrimitiveType::Float => Self::Float(0.0),
            PrimitiveType::Double => Self::Double(0.0),
            PrimitiveType::String => Self::String(Symbol::EMPTY),
            PrimitiveType::Entity => Self::Entity(EntityRef::default()),
        }
    }

    /// Converts the value to `target`.
    ///
    /// The language defines no numeric coercions: the conversion succeeds,
    /// unchanged, only when the value already has the target type.
    ///
    /// # Parameters
    /// - `target`: The declared type the value must have.
    /// - `line`: Source line for error reporting.
    ///
    /// # Returns
    /// - `Ok(Value)`: The same value.
    /// - `Err(RuntimeError::ConversionError)`: On any tag mismatch.
    pub fn convert(self, target: PrimitiveType, line: usize) -> ValueResult<Self> {
        if self.ty() == target {
            Ok(self)
        } else {
            Err(RuntimeError::ConversionError { from: self.ty(),
                                                to: target,
                                                line })
        }
    }

    /// Interprets the value as a branch or loop condition.
    ///
    /// Only `int` values are conditions; any non-zero integer is true.
    pub fn truth(self, line: usize) -> ValueResult<bool> {
        match self {
            Self::Int(n) => Ok(n != 0),
            other => Err(RuntimeError::NonIntegerCondition { found: other.ty(),
                                                             line }),
        }
    }

    /// Returns the entity handle held by this value.
    pub fn as_entity(self, line: usize) -> ValueResult<EntityRef> {
        match self {
            Self::Entity(entity) => Ok(entity),
            other => Err(RuntimeError::NotAnEntity { found: other.ty(),
                                                     line }),
        }
    }

    /// Returns the integer held by an `int` value.
    pub fn as_int(self, line: usize) -> ValueResult<i32> {
        match self {
            Self::Int(n) => Ok(n),
            other => Err(RuntimeError::ConversionError { from: other.ty(),
                                                         to: PrimitiveType::Int,
                                                         line }),
        }
    }
}
