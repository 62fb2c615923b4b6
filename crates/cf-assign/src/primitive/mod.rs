//! Conversions involving at least one primitive type.

mod boxing;
mod unboxing;
mod widening;

pub use boxing::PrimitiveBoxingDelegate;
pub use unboxing::PrimitiveUnboxingDelegate;
pub use widening::{PrimitiveWideningDelegate, Widening};

use crate::{Assigner, Typing};
use cf_bytecode::BoxedManipulation;
use cf_core::types::{Generic, PrimitiveKind};
use cf_core::Result;

fn primitive_of(generic: &Generic) -> Option<PrimitiveKind> {
    generic.as_non_generic().and_then(|d| d.as_primitive())
}

/// Widens, boxes or unboxes primitives; hands reference pairs to `reference`.
///
/// Boxing and unboxing also consult `reference` for the reference half of the
/// conversion, so the wrapper type still has to be assignable to the target
/// (or the source to the wrapper).
pub struct PrimitiveTypeAwareAssigner<A> {
    reference: A,
}

impl<A: Assigner> PrimitiveTypeAwareAssigner<A> {
    pub fn new(reference: A) -> Self {
        Self { reference }
    }
}

impl<A: Assigner> Assigner for PrimitiveTypeAwareAssigner<A> {
    fn assign(
        &self,
        source: &Generic,
        target: &Generic,
        typing: Typing,
    ) -> Result<BoxedManipulation> {
        match (primitive_of(source), primitive_of(target)) {
            (Some(source), Some(target)) => {
                Ok(PrimitiveWideningDelegate::for_primitive(source).widen_to(target))
            }
            (Some(source), None) => PrimitiveBoxingDelegate::for_primitive(source)
                .assign_boxed_to(target, &self.reference, typing),
            (None, Some(target)) => PrimitiveUnboxingDelegate::for_reference(source)
                .assign_unboxed_to(target, &self.reference, typing),
            (None, None) => self.reference.assign(source, target, typing),
        }
    }
}
