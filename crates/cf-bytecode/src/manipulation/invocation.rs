use super::StackManipulation;
use crate::context::ImplementationContext;
use crate::opcode::Opcode;
use crate::visitor::MethodVisitor;
use cf_core::types::{MethodDescriptor, TypeDescription};
use cf_core::{Result, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvocationKind {
    Static,
    Virtual,
    Interface,
    Special,
}

impl InvocationKind {
    fn opcode(self) -> Opcode {
        match self {
            InvocationKind::Static => Opcode::Invokestatic,
            InvocationKind::Virtual => Opcode::Invokevirtual,
            InvocationKind::Interface => Opcode::Invokeinterface,
            InvocationKind::Special => Opcode::Invokespecial,
        }
    }

    fn has_receiver(self) -> bool {
        !matches!(self, InvocationKind::Static)
    }
}

/// Invokes a method whose arguments (and receiver) are already on the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInvocation {
    kind: InvocationKind,
    owner: TypeDescription,
    name: String,
    descriptor: MethodDescriptor,
    interface_owner: bool,
}

impl MethodInvocation {
    pub fn new(
        kind: InvocationKind,
        owner: TypeDescription,
        name: impl Into<String>,
        descriptor: MethodDescriptor,
    ) -> Self {
        Self {
            interface_owner: matches!(kind, InvocationKind::Interface),
            kind,
            owner,
            name: name.into(),
            descriptor,
        }
    }

    pub fn invoke_static(
        owner: TypeDescription,
        name: impl Into<String>,
        descriptor: MethodDescriptor,
    ) -> Self {
        Self::new(InvocationKind::Static, owner, name, descriptor)
    }

    pub fn invoke_virtual(
        owner: TypeDescription,
        name: impl Into<String>,
        descriptor: MethodDescriptor,
    ) -> Self {
        Self::new(InvocationKind::Virtual, owner, name, descriptor)
    }

    pub fn invoke_interface(
        owner: TypeDescription,
        name: impl Into<String>,
        descriptor: MethodDescriptor,
    ) -> Self {
        Self::new(InvocationKind::Interface, owner, name, descriptor)
    }

    pub fn invoke_special(
        owner: TypeDescription,
        name: impl Into<String>,
        descriptor: MethodDescriptor,
    ) -> Self {
        Self::new(InvocationKind::Special, owner, name, descriptor)
    }

    /// Marks a static or special invocation as targeting an interface method.
    pub fn on_interface(mut self) -> Self {
        self.interface_owner = true;
        self
    }

    pub fn kind(&self) -> InvocationKind {
        self.kind
    }

    pub fn owner(&self) -> &TypeDescription {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &MethodDescriptor {
        &self.descriptor
    }

    pub fn size(&self) -> Size {
        let receiver = i32::from(self.kind.has_receiver());
        let consumed = self.descriptor.parameter_slots() + receiver;
        let produced = self.descriptor.return_size().slots();
        // The peak counts the full result width.
        Size::new(produced - consumed, produced)
    }
}

impl StackManipulation for MethodInvocation {
    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        visitor.visit_method_insn(
            self.kind.opcode(),
            &self.owner.internal_name(),
            &self.name,
            &self.descriptor.to_string(),
            self.interface_owner,
        );
        Ok(self.size())
    }
}
