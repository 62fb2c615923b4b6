use crate::error::{Error, Result};
use crate::stack::StackSize;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// The eight primitive types of the JVM.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub fn from_name(name: &str) -> Result<Self> {
        let kind = match name {
            "boolean" => PrimitiveKind::Boolean,
            "byte" => PrimitiveKind::Byte,
            "short" => PrimitiveKind::Short,
            "char" => PrimitiveKind::Char,
            "int" => PrimitiveKind::Int,
            "long" => PrimitiveKind::Long,
            "float" => PrimitiveKind::Float,
            "double" => PrimitiveKind::Double,
            _ => {
                return Err(Error::UnknownPrimitive {
                    name: name.to_string(),
                })
            }
        };
        Ok(kind)
    }

    pub fn from_descriptor_char(c: char) -> Option<Self> {
        match c {
            'Z' => Some(PrimitiveKind::Boolean),
            'B' => Some(PrimitiveKind::Byte),
            'S' => Some(PrimitiveKind::Short),
            'C' => Some(PrimitiveKind::Char),
            'I' => Some(PrimitiveKind::Int),
            'J' => Some(PrimitiveKind::Long),
            'F' => Some(PrimitiveKind::Float),
            'D' => Some(PrimitiveKind::Double),
            _ => None,
        }
    }

    /// Finds the primitive whose wrapper class carries the given binary name.
    pub fn from_wrapper_name(name: &str) -> Option<Self> {
        match name {
            "java.lang.Boolean" => Some(PrimitiveKind::Boolean),
            "java.lang.Byte" => Some(PrimitiveKind::Byte),
            "java.lang.Short" => Some(PrimitiveKind::Short),
            "java.lang.Character" => Some(PrimitiveKind::Char),
            "java.lang.Integer" => Some(PrimitiveKind::Int),
            "java.lang.Long" => Some(PrimitiveKind::Long),
            "java.lang.Float" => Some(PrimitiveKind::Float),
            "java.lang.Double" => Some(PrimitiveKind::Double),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    pub fn descriptor_char(self) -> char {
        match self {
            PrimitiveKind::Boolean => 'Z',
            PrimitiveKind::Byte => 'B',
            PrimitiveKind::Short => 'S',
            PrimitiveKind::Char => 'C',
            PrimitiveKind::Int => 'I',
            PrimitiveKind::Long => 'J',
            PrimitiveKind::Float => 'F',
            PrimitiveKind::Double => 'D',
        }
    }

    pub fn stack_size(self) -> StackSize {
        match self {
            PrimitiveKind::Long | PrimitiveKind::Double => StackSize::Double,
            _ => StackSize::Single,
        }
    }

    pub fn wrapper_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "java.lang.Boolean",
            PrimitiveKind::Byte => "java.lang.Byte",
            PrimitiveKind::Short => "java.lang.Short",
            PrimitiveKind::Char => "java.lang.Character",
            PrimitiveKind::Int => "java.lang.Integer",
            PrimitiveKind::Long => "java.lang.Long",
            PrimitiveKind::Float => "java.lang.Float",
            PrimitiveKind::Double => "java.lang.Double",
        }
    }

    /// Name of the wrapper's accessor returning the primitive, e.g. `intValue`.
    pub fn unboxing_method(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "booleanValue",
            PrimitiveKind::Byte => "byteValue",
            PrimitiveKind::Short => "shortValue",
            PrimitiveKind::Char => "charValue",
            PrimitiveKind::Int => "intValue",
            PrimitiveKind::Long => "longValue",
            PrimitiveKind::Float => "floatValue",
            PrimitiveKind::Double => "doubleValue",
        }
    }
}

impl std::fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
