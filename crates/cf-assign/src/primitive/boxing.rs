use crate::{Assigner, Typing};
use cf_bytecode::manipulation::MethodInvocation;
use cf_bytecode::{BoxedManipulation, Compound};
use cf_core::types::{Generic, MethodDescriptor, PrimitiveKind, TypeDescription};
use cf_core::Result;

/// Boxes one primitive kind through its wrapper's `valueOf`.
#[derive(Debug)]
pub struct PrimitiveBoxingDelegate {
    kind: PrimitiveKind,
}

static DELEGATES: [PrimitiveBoxingDelegate; 8] = [
    PrimitiveBoxingDelegate {
        kind: PrimitiveKind::Boolean,
    },
    PrimitiveBoxingDelegate {
        kind: PrimitiveKind::Byte,
    },
    PrimitiveBoxingDelegate {
        kind: PrimitiveKind::Short,
    },
    PrimitiveBoxingDelegate {
        kind: PrimitiveKind::Char,
    },
    PrimitiveBoxingDelegate {
        kind: PrimitiveKind::Int,
    },
    PrimitiveBoxingDelegate {
        kind: PrimitiveKind::Long,
    },
    PrimitiveBoxingDelegate {
        kind: PrimitiveKind::Float,
    },
    PrimitiveBoxingDelegate {
        kind: PrimitiveKind::Double,
    },
];

impl PrimitiveBoxingDelegate {
    pub fn for_primitive(kind: PrimitiveKind) -> &'static Self {
        &DELEGATES[kind as usize]
    }

    pub fn wrapper(&self) -> TypeDescription {
        TypeDescription::class(self.kind.wrapper_name())
    }

    /// `invokestatic Wrapper.valueOf(p)Wrapper`
    pub fn boxing(&self) -> MethodInvocation {
        let wrapper = self.wrapper();
        MethodInvocation::invoke_static(
            wrapper.clone(),
            "valueOf",
            MethodDescriptor::new(vec![TypeDescription::primitive(self.kind)], wrapper),
        )
    }

    /// Boxes, then assigns the wrapper to `target` through `assigner`.
    pub fn assign_boxed_to(
        &self,
        target: &Generic,
        assigner: &dyn Assigner,
        typing: Typing,
    ) -> Result<BoxedManipulation> {
        let widening = assigner.assign(&Generic::NonGeneric(self.wrapper()), target, typing)?;
        Ok(Box::new(Compound::new(vec![
            Box::new(self.boxing()),
            widening,
        ])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::Size;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn boxing_keeps_one_slot_at_peak() {
        for kind in PrimitiveKind::iter() {
            let boxing = PrimitiveBoxingDelegate::for_primitive(kind).boxing();
            let width = kind.stack_size().slots();
            assert_eq!(boxing.size(), Size::new(1 - width, 1), "{kind}");
            assert_eq!(boxing.owner().name(), kind.wrapper_name());
        }
    }
}
