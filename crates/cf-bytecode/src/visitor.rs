//! The output sink stack manipulations write into.

use crate::opcode::Opcode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A loadable constant pool entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// A class literal, by internal name.
    Class(String),
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Int(value) => write!(f, "{}", value),
            Constant::Long(value) => write!(f, "{}L", value),
            Constant::Float(value) => write!(f, "{:?}F", value),
            Constant::Double(value) => write!(f, "{:?}D", value),
            Constant::String(value) => write!(f, "{:?}", value),
            Constant::Class(value) => write!(f, "{}.class", value),
        }
    }
}

/// Append-only instruction stream, single writer.
pub trait MethodVisitor {
    fn visit_insn(&mut self, opcode: Opcode);

    /// `bipush` and `sipush`.
    fn visit_int_insn(&mut self, opcode: Opcode, operand: i32);

    fn visit_var_insn(&mut self, opcode: Opcode, index: u16);

    fn visit_type_insn(&mut self, opcode: Opcode, internal_name: &str);

    fn visit_field_insn(&mut self, opcode: Opcode, owner: &str, name: &str, descriptor: &str);

    fn visit_method_insn(
        &mut self,
        opcode: Opcode,
        owner: &str,
        name: &str,
        descriptor: &str,
        is_interface: bool,
    );

    fn visit_ldc_insn(&mut self, constant: Constant);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    Insn(Opcode),
    Int {
        opcode: Opcode,
        operand: i32,
    },
    Var {
        opcode: Opcode,
        index: u16,
    },
    Type {
        opcode: Opcode,
        internal_name: String,
    },
    Field {
        opcode: Opcode,
        owner: String,
        name: String,
        descriptor: String,
    },
    Method {
        opcode: Opcode,
        owner: String,
        name: String,
        descriptor: String,
        is_interface: bool,
    },
    Ldc(Constant),
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Insn(opcode)
            | Instruction::Int { opcode, .. }
            | Instruction::Var { opcode, .. }
            | Instruction::Type { opcode, .. }
            | Instruction::Field { opcode, .. }
            | Instruction::Method { opcode, .. } => *opcode,
            Instruction::Ldc(Constant::Long(_) | Constant::Double(_)) => Opcode::Ldc2W,
            Instruction::Ldc(_) => Opcode::Ldc,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Insn(opcode) => write!(f, "{}", opcode),
            Instruction::Int { opcode, operand } => write!(f, "{} {}", opcode, operand),
            Instruction::Var { opcode, index } => write!(f, "{} {}", opcode, index),
            Instruction::Type {
                opcode,
                internal_name,
            } => write!(f, "{} {}", opcode, internal_name),
            Instruction::Field {
                opcode,
                owner,
                name,
                descriptor,
            } => write!(f, "{} {}.{} : {}", opcode, owner, name, descriptor),
            Instruction::Method {
                opcode,
                owner,
                name,
                descriptor,
                ..
            } => write!(f, "{} {}.{}{}", opcode, owner, name, descriptor),
            Instruction::Ldc(constant) => write!(f, "{} {}", self.opcode(), constant),
        }
    }
}

/// A [`MethodVisitor`] recording every instruction in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstructionList {
    instructions: Vec<Instruction>,
}

impl InstructionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    pub fn opcodes(&self) -> Vec<Opcode> {
        self.instructions.iter().map(Instruction::opcode).collect()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl MethodVisitor for InstructionList {
    fn visit_insn(&mut self, opcode: Opcode) {
        self.instructions.push(Instruction::Insn(opcode));
    }

    fn visit_int_insn(&mut self, opcode: Opcode, operand: i32) {
        self.instructions.push(Instruction::Int { opcode, operand });
    }

    fn visit_var_insn(&mut self, opcode: Opcode, index: u16) {
        self.instructions.push(Instruction::Var { opcode, index });
    }

    fn visit_type_insn(&mut self, opcode: Opcode, internal_name: &str) {
        self.instructions.push(Instruction::Type {
            opcode,
            internal_name: internal_name.to_string(),
        });
    }

    fn visit_field_insn(&mut self, opcode: Opcode, owner: &str, name: &str, descriptor: &str) {
        self.instructions.push(Instruction::Field {
            opcode,
            owner: owner.to_string(),
            name: name.to_string(),
            descriptor: descriptor.to_string(),
        });
    }

    fn visit_method_insn(
        &mut self,
        opcode: Opcode,
        owner: &str,
        name: &str,
        descriptor: &str,
        is_interface: bool,
    ) {
        self.instructions.push(Instruction::Method {
            opcode,
            owner: owner.to_string(),
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            is_interface,
        });
    }

    fn visit_ldc_insn(&mut self, constant: Constant) {
        self.instructions.push(Instruction::Ldc(constant));
    }
}

/// Renders a listing, one instruction per line.
pub fn format_listing(instructions: &[Instruction]) -> String {
    let mut output = String::new();
    for (index, instruction) in instructions.iter().enumerate() {
        output.push_str(&format!("{:>4}: {}\n", index, instruction));
    }
    output
}
