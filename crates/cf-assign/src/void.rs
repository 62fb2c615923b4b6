use crate::config::VoidHandling;
use crate::{stack_size_of, Assigner, Typing};
use cf_bytecode::manipulation::{DefaultValue, Illegal, Removal, Trivial};
use cf_bytecode::BoxedManipulation;
use cf_core::types::Generic;
use cf_core::{Result, StackSize};

/// Handles `void` on either side before anything else sees the types.
pub struct VoidAwareAssigner<A> {
    delegate: A,
    void_handling: VoidHandling,
}

impl<A: Assigner> VoidAwareAssigner<A> {
    pub fn new(delegate: A, void_handling: VoidHandling) -> Self {
        Self {
            delegate,
            void_handling,
        }
    }
}

impl<A: Assigner> Assigner for VoidAwareAssigner<A> {
    fn assign(
        &self,
        source: &Generic,
        target: &Generic,
        typing: Typing,
    ) -> Result<BoxedManipulation> {
        match (source.is_void(), target.is_void()) {
            (true, true) => Ok(Box::new(Trivial)),
            (true, false) => match self.void_handling {
                VoidHandling::Strict => {
                    cf_core::debug!("cannot assign void to {}", target);
                    Ok(Box::new(Illegal))
                }
                VoidHandling::DefaultValue => Ok(Box::new(match target.as_non_generic() {
                    Some(description) => DefaultValue::of(description),
                    None => DefaultValue::Reference,
                })),
            },
            (false, true) => Ok(Box::new(match stack_size_of(source) {
                StackSize::Zero => Removal::ZERO,
                StackSize::Single => Removal::SINGLE,
                StackSize::Double => Removal::DOUBLE,
            })),
            (false, false) => self.delegate.assign(source, target, typing),
        }
    }
}
