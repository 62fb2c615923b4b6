use super::StackManipulation;
use crate::context::ImplementationContext;
use crate::opcode::Opcode;
use crate::visitor::MethodVisitor;
use cf_core::types::{PrimitiveKind, TypeDescription};
use cf_core::{Error, Result, Size, StackSize};

fn opcode_for(
    description: &TypeDescription,
    int: Opcode,
    long: Opcode,
    float: Opcode,
    double: Opcode,
    reference: Opcode,
) -> Opcode {
    match description.as_primitive() {
        Some(PrimitiveKind::Long) => long,
        Some(PrimitiveKind::Float) => float,
        Some(PrimitiveKind::Double) => double,
        Some(_) => int,
        None => reference,
    }
}

/// Loads a local variable onto the operand stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodVariableAccess {
    opcode: Opcode,
    offset: u16,
    size: StackSize,
}

impl MethodVariableAccess {
    pub fn load(description: &TypeDescription, offset: u16) -> Result<Self> {
        if description.is_void() {
            return Err(Error::IllegalArgument(
                "cannot load a variable of type void".to_string(),
            ));
        }
        Ok(Self {
            opcode: opcode_for(
                description,
                Opcode::Iload,
                Opcode::Lload,
                Opcode::Fload,
                Opcode::Dload,
                Opcode::Aload,
            ),
            offset,
            size: description.stack_size(),
        })
    }

    /// Loads `this` from slot zero.
    pub fn load_this() -> Self {
        Self {
            opcode: Opcode::Aload,
            offset: 0,
            size: StackSize::Single,
        }
    }
}

impl StackManipulation for MethodVariableAccess {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        visitor.visit_var_insn(self.opcode, self.offset);
        Ok(self.size.to_increasing_size())
    }
}

/// Returns the value on top of the stack, or nothing for `void`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodReturn {
    opcode: Opcode,
    size: StackSize,
}

impl MethodReturn {
    pub const VOID: MethodReturn = MethodReturn {
        opcode: Opcode::Return,
        size: StackSize::Zero,
    };

    pub fn of(description: &TypeDescription) -> Self {
        if description.is_void() {
            return Self::VOID;
        }
        Self {
            opcode: opcode_for(
                description,
                Opcode::Ireturn,
                Opcode::Lreturn,
                Opcode::Freturn,
                Opcode::Dreturn,
                Opcode::Areturn,
            ),
            size: description.stack_size(),
        }
    }
}

impl StackManipulation for MethodReturn {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        visitor.visit_insn(self.opcode);
        Ok(self.size.to_decreasing_size())
    }
}
