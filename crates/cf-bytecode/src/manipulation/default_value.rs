use super::StackManipulation;
use crate::context::ImplementationContext;
use crate::opcode::Opcode;
use crate::visitor::MethodVisitor;
use cf_core::types::{PrimitiveKind, TypeDescription};
use cf_core::{Result, Size, StackSize};

/// Pushes the zero value of a type: `0`, `0L`, `0.0f`, `0.0d`, `false` or `null`.
/// For `void` nothing is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Integer,
    Long,
    Float,
    Double,
    Void,
    Reference,
}

impl DefaultValue {
    pub fn of(description: &TypeDescription) -> Self {
        if description.is_void() {
            return DefaultValue::Void;
        }
        match description.as_primitive() {
            Some(PrimitiveKind::Long) => DefaultValue::Long,
            Some(PrimitiveKind::Float) => DefaultValue::Float,
            Some(PrimitiveKind::Double) => DefaultValue::Double,
            Some(_) => DefaultValue::Integer,
            None => DefaultValue::Reference,
        }
    }
}

impl StackManipulation for DefaultValue {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        let (opcode, size) = match self {
            DefaultValue::Integer => (Opcode::Iconst0, StackSize::Single),
            DefaultValue::Long => (Opcode::Lconst0, StackSize::Double),
            DefaultValue::Float => (Opcode::Fconst0, StackSize::Single),
            DefaultValue::Double => (Opcode::Dconst0, StackSize::Double),
            DefaultValue::Reference => (Opcode::AconstNull, StackSize::Single),
            DefaultValue::Void => return Ok(Size::ZERO),
        };
        visitor.visit_insn(opcode);
        Ok(size.to_increasing_size())
    }
}
