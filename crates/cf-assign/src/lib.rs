//! Conversions between types when splicing values into generated code.
//!
//! An [`Assigner`] answers, for a source and a target type, which stack
//! manipulation turns a value of the source type on top of the operand stack
//! into a value of the target type. A conversion that does not exist is an
//! invalid manipulation rather than an error; errors are reserved for
//! ill-formed input such as unknown types.

pub mod config;
pub mod equal;
pub mod generic;
pub mod primitive;
pub mod reference;
pub mod void;

pub use config::{AssignerConfig, GenericsMode, VoidHandling};
pub use equal::{EqualTypesOnly, Refusing};
pub use generic::GenericAssignabilityResolver;
pub use primitive::{
    PrimitiveBoxingDelegate, PrimitiveTypeAwareAssigner, PrimitiveUnboxingDelegate,
    PrimitiveWideningDelegate,
};
pub use reference::ReferenceTypeAwareAssigner;
pub use void::VoidAwareAssigner;

use cf_bytecode::manipulation::{Illegal, Trivial};
use cf_bytecode::BoxedManipulation;
use cf_core::types::{Generic, TypePool};
use cf_core::{Result, StackSize};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Whether an assignment may fall back to a runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Typing {
    /// Only conversions that are provable from the declared types.
    #[default]
    Static,
    /// Reference conversions that cannot be proven are cast at runtime.
    Dynamic,
}

impl Typing {
    pub fn of(dynamic: bool) -> Self {
        if dynamic {
            Typing::Dynamic
        } else {
            Typing::Static
        }
    }

    pub fn is_dynamic(self) -> bool {
        matches!(self, Typing::Dynamic)
    }
}

pub trait Assigner: Send + Sync {
    /// The manipulation converting a `source` value on the operand stack into a
    /// `target` value. Check [`cf_bytecode::StackManipulation::is_valid`] on the
    /// result before applying it.
    fn assign(&self, source: &Generic, target: &Generic, typing: Typing)
        -> Result<BoxedManipulation>;
}

impl<A: Assigner + ?Sized> Assigner for Arc<A> {
    fn assign(
        &self,
        source: &Generic,
        target: &Generic,
        typing: Typing,
    ) -> Result<BoxedManipulation> {
        (**self).assign(source, target, typing)
    }
}

/// Void handling around primitive handling around reference handling.
pub struct DefaultAssigner {
    chain: VoidAwareAssigner<PrimitiveTypeAwareAssigner<ReferenceTypeAwareAssigner>>,
}

impl DefaultAssigner {
    pub fn new(pool: Arc<TypePool>) -> Self {
        Self::with_config(pool, AssignerConfig::default())
    }

    pub fn with_config(pool: Arc<TypePool>, config: AssignerConfig) -> Self {
        let reference = ReferenceTypeAwareAssigner::new(pool, config.generics);
        let primitive = PrimitiveTypeAwareAssigner::new(reference);
        Self {
            chain: VoidAwareAssigner::new(primitive, config.void_handling),
        }
    }
}

impl Assigner for DefaultAssigner {
    fn assign(
        &self,
        source: &Generic,
        target: &Generic,
        typing: Typing,
    ) -> Result<BoxedManipulation> {
        self.chain.assign(source, target, typing)
    }
}

/// A no-op when `valid`, an invalid manipulation otherwise.
pub(crate) fn trivial_if(valid: bool) -> BoxedManipulation {
    if valid {
        return Box::new(Trivial);
    }
    Box::new(Illegal)
}

/// Operand stack width of a value of type `generic`.
pub(crate) fn stack_size_of(generic: &Generic) -> StackSize {
    match generic.as_non_generic() {
        Some(description) => description.stack_size(),
        None => StackSize::Single,
    }
}
