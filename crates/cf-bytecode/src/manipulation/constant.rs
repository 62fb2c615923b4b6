use super::StackManipulation;
use crate::context::ImplementationContext;
use crate::opcode::Opcode;
use crate::visitor::{Constant, MethodVisitor};
use cf_core::types::TypeDescription;
use cf_core::{Error, Result, Size, StackSize};

/// Pushes an `int`, picking the shortest encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerConstant(pub i32);

impl IntegerConstant {
    pub fn for_bool(value: bool) -> Self {
        IntegerConstant(i32::from(value))
    }
}

impl StackManipulation for IntegerConstant {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        match self.0 {
            -1 => visitor.visit_insn(Opcode::IconstM1),
            0 => visitor.visit_insn(Opcode::Iconst0),
            1 => visitor.visit_insn(Opcode::Iconst1),
            2 => visitor.visit_insn(Opcode::Iconst2),
            3 => visitor.visit_insn(Opcode::Iconst3),
            4 => visitor.visit_insn(Opcode::Iconst4),
            5 => visitor.visit_insn(Opcode::Iconst5),
            value if i8::try_from(value).is_ok() => visitor.visit_int_insn(Opcode::Bipush, value),
            value if i16::try_from(value).is_ok() => visitor.visit_int_insn(Opcode::Sipush, value),
            value => visitor.visit_ldc_insn(Constant::Int(value)),
        }
        Ok(StackSize::Single.to_increasing_size())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongConstant(pub i64);

impl StackManipulation for LongConstant {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        match self.0 {
            0 => visitor.visit_insn(Opcode::Lconst0),
            1 => visitor.visit_insn(Opcode::Lconst1),
            value => visitor.visit_ldc_insn(Constant::Long(value)),
        }
        Ok(StackSize::Double.to_increasing_size())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatConstant(pub f32);

impl StackManipulation for FloatConstant {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        // -0.0 must not collapse into fconst_0.
        match self.0.to_bits() {
            bits if bits == 0f32.to_bits() => visitor.visit_insn(Opcode::Fconst0),
            bits if bits == 1f32.to_bits() => visitor.visit_insn(Opcode::Fconst1),
            bits if bits == 2f32.to_bits() => visitor.visit_insn(Opcode::Fconst2),
            _ => visitor.visit_ldc_insn(Constant::Float(self.0)),
        }
        Ok(StackSize::Single.to_increasing_size())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleConstant(pub f64);

impl StackManipulation for DoubleConstant {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        match self.0.to_bits() {
            bits if bits == 0f64.to_bits() => visitor.visit_insn(Opcode::Dconst0),
            bits if bits == 1f64.to_bits() => visitor.visit_insn(Opcode::Dconst1),
            _ => visitor.visit_ldc_insn(Constant::Double(self.0)),
        }
        Ok(StackSize::Double.to_increasing_size())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullConstant;

impl StackManipulation for NullConstant {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        visitor.visit_insn(Opcode::AconstNull);
        Ok(StackSize::Single.to_increasing_size())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextConstant(pub String);

impl StackManipulation for TextConstant {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        visitor.visit_ldc_insn(Constant::String(self.0.clone()));
        Ok(StackSize::Single.to_increasing_size())
    }
}

/// Pushes a `java.lang.Class` literal. Primitive classes are read from their
/// wrapper's `TYPE` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassConstant(TypeDescription);

impl ClassConstant {
    pub fn of(description: &TypeDescription) -> Result<Self> {
        if description.is_void() {
            return Err(Error::IllegalArgument(
                "void.class is not supported as a class constant".to_string(),
            ));
        }
        Ok(ClassConstant(description.clone()))
    }
}

impl StackManipulation for ClassConstant {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        match self.0.as_primitive() {
            Some(kind) => {
                let owner = TypeDescription::class(kind.wrapper_name());
                visitor.visit_field_insn(
                    Opcode::Getstatic,
                    &owner.internal_name(),
                    "TYPE",
                    "Ljava/lang/Class;",
                );
            }
            None => visitor.visit_ldc_insn(Constant::Class(self.0.internal_name())),
        }
        Ok(StackSize::Single.to_increasing_size())
    }
}
