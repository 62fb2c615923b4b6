//! Instruction emission for generated method bodies.
//!
//! Stack manipulations are the unit of emission: each one knows whether it is
//! valid, writes its instructions into a [`MethodVisitor`] and reports its
//! effect on the operand stack so the method can declare its frame size.

pub mod appender;
pub mod context;
pub mod manipulation;
pub mod opcode;
pub mod visitor;

pub use appender::{AppenderSize, ByteCodeAppender, MethodFrame, StackManipulationAppender};
pub use context::{EmissionContext, ImplementationContext};
pub use manipulation::{BoxedManipulation, Compound, StackManipulation};
pub use opcode::Opcode;
pub use visitor::{format_listing, Constant, Instruction, InstructionList, MethodVisitor};
