use super::StackManipulation;
use crate::context::ImplementationContext;
use crate::opcode::Opcode;
use crate::visitor::MethodVisitor;
use cf_core::types::TypeDescription;
use cf_core::{Result, Size, StackSize};

/// Drops the value on top of the operand stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal(StackSize);

impl Removal {
    pub const ZERO: Removal = Removal(StackSize::Zero);
    pub const SINGLE: Removal = Removal(StackSize::Single);
    pub const DOUBLE: Removal = Removal(StackSize::Double);

    pub fn of(description: &TypeDescription) -> Self {
        Removal(description.stack_size())
    }
}

impl StackManipulation for Removal {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        match self.0 {
            StackSize::Zero => {}
            StackSize::Single => visitor.visit_insn(Opcode::Pop),
            StackSize::Double => visitor.visit_insn(Opcode::Pop2),
        }
        Ok(self.0.to_decreasing_size())
    }
}

/// Duplicates the value on top of the operand stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duplication(StackSize);

impl Duplication {
    pub const ZERO: Duplication = Duplication(StackSize::Zero);
    pub const SINGLE: Duplication = Duplication(StackSize::Single);
    pub const DOUBLE: Duplication = Duplication(StackSize::Double);

    pub fn of(description: &TypeDescription) -> Self {
        Duplication(description.stack_size())
    }
}

impl StackManipulation for Duplication {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        match self.0 {
            StackSize::Zero => {}
            StackSize::Single => visitor.visit_insn(Opcode::Dup),
            StackSize::Double => visitor.visit_insn(Opcode::Dup2),
        }
        Ok(self.0.to_increasing_size())
    }
}
