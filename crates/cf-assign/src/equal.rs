use crate::{trivial_if, Assigner, Typing};
use cf_bytecode::manipulation::Illegal;
use cf_bytecode::BoxedManipulation;
use cf_core::types::{Generic, TypePool};
use cf_core::Result;
use std::sync::Arc;

/// Accepts only assignments between equal types.
pub enum EqualTypesOnly {
    /// Generic shapes must match exactly.
    Semantic,
    /// Erasures must match.
    Erasure(Arc<TypePool>),
}

impl Assigner for EqualTypesOnly {
    fn assign(
        &self,
        source: &Generic,
        target: &Generic,
        _typing: Typing,
    ) -> Result<BoxedManipulation> {
        let equal = match self {
            EqualTypesOnly::Semantic => source == target,
            EqualTypesOnly::Erasure(pool) => pool.erasure(source)? == pool.erasure(target)?,
        };
        Ok(trivial_if(equal))
    }
}

/// Refuses every assignment.
pub struct Refusing;

impl Assigner for Refusing {
    fn assign(
        &self,
        _source: &Generic,
        _target: &Generic,
        _typing: Typing,
    ) -> Result<BoxedManipulation> {
        Ok(Box::new(Illegal))
    }
}
