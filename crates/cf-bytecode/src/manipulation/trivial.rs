use super::StackManipulation;
use crate::context::ImplementationContext;
use crate::visitor::MethodVisitor;
use cf_core::{Error, Result, Size};

/// A valid manipulation that emits nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trivial;

impl StackManipulation for Trivial {
    fn apply(
        &self,
        _visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        Ok(Size::ZERO)
    }
}

/// Marks a conversion that does not exist. Applying it is an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Illegal;

impl StackManipulation for Illegal {
    fn is_valid(&self) -> bool {
        false
    }

    fn apply(
        &self,
        _visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        cf_core::warn!("attempted to apply an illegal stack manipulation");
        Err(Error::illegal_manipulation(
            "an illegal stack manipulation must not be applied",
        ))
    }
}
