//! Instruction-emitting building blocks.
//!
//! A [`StackManipulation`] knows whether it can be emitted at all and, when
//! applied, writes its instructions and reports the resulting [`Size`].
//! Manipulations are composed with [`Compound`].

mod casting;
mod constant;
mod default_value;
mod invocation;
mod member;
mod stack;
mod trivial;

pub use casting::TypeCasting;
pub use constant::{
    ClassConstant, DoubleConstant, FloatConstant, IntegerConstant, LongConstant, NullConstant,
    TextConstant,
};
pub use default_value::DefaultValue;
pub use invocation::{InvocationKind, MethodInvocation};
pub use member::{MethodReturn, MethodVariableAccess};
pub use stack::{Duplication, Removal};
pub use trivial::{Illegal, Trivial};

use crate::context::ImplementationContext;
use crate::visitor::MethodVisitor;
use cf_core::{Error, Result, Size};
use std::fmt;

pub trait StackManipulation: fmt::Debug + Send + Sync {
    /// Whether this manipulation can be applied. Invalid manipulations return an
    /// error from [`StackManipulation::apply`] without emitting anything.
    fn is_valid(&self) -> bool {
        true
    }

    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        context: &mut dyn ImplementationContext,
    ) -> Result<Size>;

    fn as_compound(&self) -> Option<&Compound> {
        None
    }
}

pub type BoxedManipulation = Box<dyn StackManipulation>;

impl<T: StackManipulation + ?Sized> StackManipulation for Box<T> {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        (**self).apply(visitor, context)
    }

    fn as_compound(&self) -> Option<&Compound> {
        (**self).as_compound()
    }
}

/// Applies its members in order, aggregating their sizes.
#[derive(Debug, Default)]
pub struct Compound {
    steps: Vec<BoxedManipulation>,
}

impl Compound {
    pub fn new(steps: Vec<BoxedManipulation>) -> Self {
        Self { steps }
    }

    pub fn of<I, M>(manipulations: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: StackManipulation + 'static,
    {
        Self::new(
            manipulations
                .into_iter()
                .map(|manipulation| Box::new(manipulation) as BoxedManipulation)
                .collect(),
        )
    }

    pub fn push(mut self, manipulation: BoxedManipulation) -> Self {
        self.steps.push(manipulation);
        self
    }

    pub fn steps(&self) -> &[BoxedManipulation] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl StackManipulation for Compound {
    fn is_valid(&self) -> bool {
        self.steps.iter().all(|step| step.is_valid())
    }

    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        if let Some(position) = self.steps.iter().position(|step| !step.is_valid()) {
            cf_core::warn!(
                "refusing to apply compound with invalid step {} of {}: {:?}",
                position,
                self.steps.len(),
                self.steps[position]
            );
            return Err(Error::illegal_manipulation(format!(
                "step {} of compound is invalid",
                position
            )));
        }
        let mut size = Size::ZERO;
        for step in &self.steps {
            size = size.aggregate(step.apply(visitor, context)?);
        }
        cf_core::trace!("applied compound of {} steps: {}", self.steps.len(), size);
        Ok(size)
    }

    fn as_compound(&self) -> Option<&Compound> {
        Some(self)
    }
}

impl FromIterator<BoxedManipulation> for Compound {
    fn from_iter<I: IntoIterator<Item = BoxedManipulation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
