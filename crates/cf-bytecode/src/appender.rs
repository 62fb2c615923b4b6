use crate::context::ImplementationContext;
use crate::manipulation::{BoxedManipulation, Compound, StackManipulation};
use crate::opcode::Opcode;
use crate::visitor::{Constant, MethodVisitor};
use cf_core::{Error, Result};

/// Frame requirements a generated method declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppenderSize {
    pub operand_stack_size: i32,
    pub local_variable_size: i32,
}

impl AppenderSize {
    pub fn merge(self, other: AppenderSize) -> AppenderSize {
        AppenderSize {
            operand_stack_size: self.operand_stack_size.max(other.operand_stack_size),
            local_variable_size: self.local_variable_size.max(other.local_variable_size),
        }
    }
}

/// Shape of the method a body is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodFrame {
    /// Slots taken by the parameters, excluding `this`.
    pub parameter_slots: i32,
    pub is_static: bool,
}

impl MethodFrame {
    pub fn local_variable_size(&self) -> i32 {
        self.parameter_slots + i32::from(!self.is_static)
    }
}

pub trait ByteCodeAppender {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        context: &mut dyn ImplementationContext,
        frame: MethodFrame,
    ) -> Result<AppenderSize>;
}

/// Appends a complete method body made of stack manipulations. The body must
/// end in a return and leave the operand stack balanced.
#[derive(Debug, Default)]
pub struct StackManipulationAppender {
    body: Compound,
}

impl StackManipulationAppender {
    pub fn new(manipulations: Vec<BoxedManipulation>) -> Self {
        Self {
            body: Compound::new(manipulations),
        }
    }

    pub fn body(&self) -> &Compound {
        &self.body
    }
}

impl ByteCodeAppender for StackManipulationAppender {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        context: &mut dyn ImplementationContext,
        frame: MethodFrame,
    ) -> Result<AppenderSize> {
        let mut tracked = LastOpcode {
            inner: visitor,
            last: None,
        };
        let size = self.body.apply(&mut tracked, context)?;
        if !tracked.last.is_some_and(Opcode::is_return) {
            return Err(Error::illegal_manipulation(
                "method body does not end in a return",
            ));
        }
        if size.size_impact() != 0 {
            return Err(Error::illegal_manipulation(format!(
                "method body leaves the operand stack unbalanced by {}",
                size.size_impact()
            )));
        }
        Ok(AppenderSize {
            operand_stack_size: size.maximal_size(),
            local_variable_size: frame.local_variable_size(),
        })
    }
}

/// Forwards to `inner`, remembering the most recent opcode.
struct LastOpcode<'a> {
    inner: &'a mut dyn MethodVisitor,
    last: Option<Opcode>,
}

impl MethodVisitor for LastOpcode<'_> {
    fn visit_insn(&mut self, opcode: Opcode) {
        self.last = Some(opcode);
        self.inner.visit_insn(opcode);
    }

    fn visit_int_insn(&mut self, opcode: Opcode, operand: i32) {
        self.last = Some(opcode);
        self.inner.visit_int_insn(opcode, operand);
    }

    fn visit_var_insn(&mut self, opcode: Opcode, index: u16) {
        self.last = Some(opcode);
        self.inner.visit_var_insn(opcode, index);
    }

    fn visit_type_insn(&mut self, opcode: Opcode, internal_name: &str) {
        self.last = Some(opcode);
        self.inner.visit_type_insn(opcode, internal_name);
    }

    fn visit_field_insn(&mut self, opcode: Opcode, owner: &str, name: &str, descriptor: &str) {
        self.last = Some(opcode);
        self.inner.visit_field_insn(opcode, owner, name, descriptor);
    }

    fn visit_method_insn(
        &mut self,
        opcode: Opcode,
        owner: &str,
        name: &str,
        descriptor: &str,
        is_interface: bool,
    ) {
        self.last = Some(opcode);
        self.inner
            .visit_method_insn(opcode, owner, name, descriptor, is_interface);
    }

    fn visit_ldc_insn(&mut self, constant: Constant) {
        self.last = Some(Opcode::Ldc);
        self.inner.visit_ldc_insn(constant);
    }
}
