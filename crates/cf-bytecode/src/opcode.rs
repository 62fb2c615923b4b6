use serde::{Deserialize, Serialize};
use std::fmt;

/// The subset of JVM opcodes emitted by stack manipulations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    Nop,
    AconstNull,
    IconstM1,
    Iconst0,
    Iconst1,
    Iconst2,
    Iconst3,
    Iconst4,
    Iconst5,
    Lconst0,
    Lconst1,
    Fconst0,
    Fconst1,
    Fconst2,
    Dconst0,
    Dconst1,
    Bipush,
    Sipush,
    Ldc,
    Ldc2W,
    Iload,
    Lload,
    Fload,
    Dload,
    Aload,
    Pop,
    Pop2,
    Dup,
    Dup2,
    I2L,
    I2F,
    I2D,
    L2F,
    L2D,
    F2D,
    Ireturn,
    Lreturn,
    Freturn,
    Dreturn,
    Areturn,
    Return,
    Getstatic,
    Invokevirtual,
    Invokespecial,
    Invokestatic,
    Invokeinterface,
    Checkcast,
}

impl Opcode {
    pub fn is_return(self) -> bool {
        matches!(
            self,
            Opcode::Ireturn
                | Opcode::Lreturn
                | Opcode::Freturn
                | Opcode::Dreturn
                | Opcode::Areturn
                | Opcode::Return
        )
    }

    /// The opcode's byte in the class-file format.
    pub fn code(self) -> u8 {
        match self {
            Opcode::Nop => 0x00,
            Opcode::AconstNull => 0x01,
            Opcode::IconstM1 => 0x02,
            Opcode::Iconst0 => 0x03,
            Opcode::Iconst1 => 0x04,
            Opcode::Iconst2 => 0x05,
            Opcode::Iconst3 => 0x06,
            Opcode::Iconst4 => 0x07,
            Opcode::Iconst5 => 0x08,
            Opcode::Lconst0 => 0x09,
            Opcode::Lconst1 => 0x0a,
            Opcode::Fconst0 => 0x0b,
            Opcode::Fconst1 => 0x0c,
            Opcode::Fconst2 => 0x0d,
            Opcode::Dconst0 => 0x0e,
            Opcode::Dconst1 => 0x0f,
            Opcode::Bipush => 0x10,
            Opcode::Sipush => 0x11,
            Opcode::Ldc => 0x12,
            Opcode::Ldc2W => 0x14,
            Opcode::Iload => 0x15,
            Opcode::Lload => 0x16,
            Opcode::Fload => 0x17,
            Opcode::Dload => 0x18,
            Opcode::Aload => 0x19,
            Opcode::Pop => 0x57,
            Opcode::Pop2 => 0x58,
            Opcode::Dup => 0x59,
            Opcode::Dup2 => 0x5c,
            Opcode::I2L => 0x85,
            Opcode::I2F => 0x86,
            Opcode::I2D => 0x87,
            Opcode::L2F => 0x89,
            Opcode::L2D => 0x8a,
            Opcode::F2D => 0x8d,
            Opcode::Ireturn => 0xac,
            Opcode::Lreturn => 0xad,
            Opcode::Freturn => 0xae,
            Opcode::Dreturn => 0xaf,
            Opcode::Areturn => 0xb0,
            Opcode::Return => 0xb1,
            Opcode::Getstatic => 0xb2,
            Opcode::Invokevirtual => 0xb6,
            Opcode::Invokespecial => 0xb7,
            Opcode::Invokestatic => 0xb8,
            Opcode::Invokeinterface => 0xb9,
            Opcode::Checkcast => 0xc0,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::AconstNull => "aconst_null",
            Opcode::IconstM1 => "iconst_m1",
            Opcode::Iconst0 => "iconst_0",
            Opcode::Iconst1 => "iconst_1",
            Opcode::Iconst2 => "iconst_2",
            Opcode::Iconst3 => "iconst_3",
            Opcode::Iconst4 => "iconst_4",
            Opcode::Iconst5 => "iconst_5",
            Opcode::Lconst0 => "lconst_0",
            Opcode::Lconst1 => "lconst_1",
            Opcode::Fconst0 => "fconst_0",
            Opcode::Fconst1 => "fconst_1",
            Opcode::Fconst2 => "fconst_2",
            Opcode::Dconst0 => "dconst_0",
            Opcode::Dconst1 => "dconst_1",
            Opcode::Bipush => "bipush",
            Opcode::Sipush => "sipush",
            Opcode::Ldc => "ldc",
            Opcode::Ldc2W => "ldc2_w",
            Opcode::Iload => "iload",
            Opcode::Lload => "lload",
            Opcode::Fload => "fload",
            Opcode::Dload => "dload",
            Opcode::Aload => "aload",
            Opcode::Pop => "pop",
            Opcode::Pop2 => "pop2",
            Opcode::Dup => "dup",
            Opcode::Dup2 => "dup2",
            Opcode::I2L => "i2l",
            Opcode::I2F => "i2f",
            Opcode::I2D => "i2d",
            Opcode::L2F => "l2f",
            Opcode::L2D => "l2d",
            Opcode::F2D => "f2d",
            Opcode::Ireturn => "ireturn",
            Opcode::Lreturn => "lreturn",
            Opcode::Freturn => "freturn",
            Opcode::Dreturn => "dreturn",
            Opcode::Areturn => "areturn",
            Opcode::Return => "return",
            Opcode::Getstatic => "getstatic",
            Opcode::Invokevirtual => "invokevirtual",
            Opcode::Invokespecial => "invokespecial",
            Opcode::Invokestatic => "invokestatic",
            Opcode::Invokeinterface => "invokeinterface",
            Opcode::Checkcast => "checkcast",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
