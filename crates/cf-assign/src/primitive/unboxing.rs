use super::PrimitiveWideningDelegate;
use crate::{Assigner, Typing};
use cf_bytecode::manipulation::MethodInvocation;
use cf_bytecode::{BoxedManipulation, Compound};
use cf_core::types::{Generic, MethodDescriptor, PrimitiveKind, TypeDescription};
use cf_core::Result;

/// Unboxes a reference into a primitive.
///
/// A source that is statically a wrapper unboxes to its own primitive and then
/// widens. Any other source is first assigned to the target's wrapper, which is
/// only possible with a runtime cast unless the source already is that wrapper.
#[derive(Debug, Clone, Copy)]
pub enum PrimitiveUnboxingDelegate<'a> {
    Wrapper(PrimitiveKind),
    Reference(&'a Generic),
}

impl<'a> PrimitiveUnboxingDelegate<'a> {
    pub fn for_reference(source: &'a Generic) -> Self {
        match source.as_non_generic().and_then(|d| d.wrapped_primitive()) {
            Some(kind) => PrimitiveUnboxingDelegate::Wrapper(kind),
            None => PrimitiveUnboxingDelegate::Reference(source),
        }
    }

    /// `invokevirtual Wrapper.pValue()p`
    pub fn unboxing(kind: PrimitiveKind) -> MethodInvocation {
        MethodInvocation::invoke_virtual(
            TypeDescription::class(kind.wrapper_name()),
            kind.unboxing_method(),
            MethodDescriptor::new(Vec::new(), TypeDescription::primitive(kind)),
        )
    }

    pub fn assign_unboxed_to(
        &self,
        target: PrimitiveKind,
        assigner: &dyn Assigner,
        typing: Typing,
    ) -> Result<BoxedManipulation> {
        let steps: Vec<BoxedManipulation> = match *self {
            PrimitiveUnboxingDelegate::Wrapper(kind) => vec![
                Box::new(Self::unboxing(kind)),
                PrimitiveWideningDelegate::for_primitive(kind).widen_to(target),
            ],
            PrimitiveUnboxingDelegate::Reference(source) => {
                let wrapper = Generic::class(target.wrapper_name());
                vec![
                    assigner.assign(source, &wrapper, typing)?,
                    Box::new(Self::unboxing(target)),
                ]
            }
        };
        Ok(Box::new(Compound::new(steps)))
    }
}
