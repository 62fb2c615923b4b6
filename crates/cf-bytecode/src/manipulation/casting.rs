use super::StackManipulation;
use crate::context::ImplementationContext;
use crate::opcode::Opcode;
use crate::visitor::MethodVisitor;
use cf_core::types::TypeDescription;
use cf_core::{Error, Result, Size};

/// A runtime-checked reference cast (`checkcast`). Does not change stack depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCasting {
    target: TypeDescription,
}

impl TypeCasting {
    pub fn to(target: &TypeDescription) -> Result<Self> {
        if !target.is_reference() {
            return Err(Error::IllegalArgument(format!(
                "cannot cast to non-reference type {}",
                target
            )));
        }
        Ok(Self {
            target: target.clone(),
        })
    }

    pub fn target(&self) -> &TypeDescription {
        &self.target
    }
}

impl StackManipulation for TypeCasting {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        visitor.visit_type_insn(Opcode::Checkcast, &self.target.internal_name());
        Ok(Size::ZERO)
    }
}
