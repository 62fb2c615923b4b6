use crate::config::GenericsMode;
use crate::generic::GenericAssignabilityResolver;
use crate::{trivial_if, Assigner, Typing};
use cf_bytecode::manipulation::{Illegal, Trivial, TypeCasting};
use cf_bytecode::BoxedManipulation;
use cf_core::types::{Generic, TypePool};
use cf_core::Result;
use std::sync::Arc;

/// Assigns reference types, either by their generic shape or by erasure.
///
/// Primitive and `void` operands only pass when both sides are identical;
/// those conversions belong to the outer layers of the chain.
pub struct ReferenceTypeAwareAssigner {
    resolver: GenericAssignabilityResolver,
    generics: GenericsMode,
}

impl ReferenceTypeAwareAssigner {
    pub fn new(pool: Arc<TypePool>, generics: GenericsMode) -> Self {
        Self {
            resolver: GenericAssignabilityResolver::new(pool),
            generics,
        }
    }

    fn assign_erased(
        &self,
        source: &Generic,
        target: &Generic,
        typing: Typing,
    ) -> Result<BoxedManipulation> {
        let pool = self.resolver.pool();
        let source_erasure = pool.erasure(source)?;
        let target_erasure = pool.erasure(target)?;
        if pool.is_subtype(&source_erasure, &target_erasure)? {
            Ok(Box::new(Trivial))
        } else if typing.is_dynamic() {
            Ok(Box::new(TypeCasting::to(&target_erasure)?))
        } else {
            cf_core::debug!("{} is not assignable to {}", source_erasure, target_erasure);
            Ok(Box::new(Illegal))
        }
    }
}

impl Assigner for ReferenceTypeAwareAssigner {
    fn assign(
        &self,
        source: &Generic,
        target: &Generic,
        typing: Typing,
    ) -> Result<BoxedManipulation> {
        let non_reference = |generic: &Generic| generic.is_primitive() || generic.is_void();
        if non_reference(source) || non_reference(target) {
            return Ok(trivial_if(source == target));
        }
        match self.generics {
            GenericsMode::Aware => self.resolver.assign(source, target, typing),
            GenericsMode::Erased => self.assign_erased(source, target, typing),
        }
    }
}
