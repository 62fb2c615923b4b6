//! Shared fixtures for cf-bytecode tests.

use cf_bytecode::{EmissionContext, InstructionList, StackManipulation};
use cf_core::types::TypeDescription;
use cf_core::{Result, Size};

pub fn context() -> EmissionContext {
    EmissionContext::new(TypeDescription::class("demo.Generated"))
}

/// Applies `manipulation` against a fresh sink.
pub fn emit(manipulation: &dyn StackManipulation) -> (InstructionList, Result<Size>) {
    let mut list = InstructionList::new();
    let mut context = context();
    let size = manipulation.apply(&mut list, &mut context);
    (list, size)
}
