use cf_bytecode::manipulation::StackManipulation;
use cf_bytecode::{BoxedManipulation, ImplementationContext, MethodVisitor, Opcode};
use cf_core::types::PrimitiveKind;
use cf_core::{Error, Result, Size};

/// One cell of the widening table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widening {
    Trivial,
    Instruction { opcode: Opcode, size: Size },
    Illegal,
}

impl StackManipulation for Widening {
    fn is_valid(&self) -> bool {
        !matches!(self, Widening::Illegal)
    }

    fn apply(
        &self,
        visitor: &mut dyn MethodVisitor,
        _context: &mut dyn ImplementationContext,
    ) -> Result<Size> {
        match *self {
            Widening::Trivial => Ok(Size::ZERO),
            Widening::Instruction { opcode, size } => {
                visitor.visit_insn(opcode);
                Ok(size)
            }
            Widening::Illegal => {
                cf_core::warn!("applying an illegal primitive widening");
                Err(Error::illegal_manipulation("narrowing primitive conversion"))
            }
        }
    }
}

const T: Widening = Widening::Trivial;
const X: Widening = Widening::Illegal;
const I2L: Widening = Widening::Instruction {
    opcode: Opcode::I2L,
    size: Size::new(1, 1),
};
const I2F: Widening = Widening::Instruction {
    opcode: Opcode::I2F,
    size: Size::ZERO,
};
const I2D: Widening = Widening::Instruction {
    opcode: Opcode::I2D,
    size: Size::new(1, 1),
};
const L2F: Widening = Widening::Instruction {
    opcode: Opcode::L2F,
    size: Size::new(-1, 0),
};
const L2D: Widening = Widening::Instruction {
    opcode: Opcode::L2D,
    size: Size::ZERO,
};
const F2D: Widening = Widening::Instruction {
    opcode: Opcode::F2D,
    size: Size::new(1, 1),
};

/// Widening conversions from one primitive, indexed by target kind in
/// declaration order: boolean, byte, short, char, int, long, float, double.
#[derive(Debug)]
pub struct PrimitiveWideningDelegate {
    source: PrimitiveKind,
    targets: [Widening; 8],
}

static DELEGATES: [PrimitiveWideningDelegate; 8] = [
    PrimitiveWideningDelegate {
        source: PrimitiveKind::Boolean,
        targets: [T, X, X, X, X, X, X, X],
    },
    PrimitiveWideningDelegate {
        source: PrimitiveKind::Byte,
        targets: [X, T, T, X, T, I2L, I2F, I2D],
    },
    PrimitiveWideningDelegate {
        source: PrimitiveKind::Short,
        targets: [X, X, T, X, T, I2L, I2F, I2D],
    },
    PrimitiveWideningDelegate {
        source: PrimitiveKind::Char,
        targets: [X, X, X, T, T, I2L, I2F, I2D],
    },
    PrimitiveWideningDelegate {
        source: PrimitiveKind::Int,
        targets: [X, X, X, X, T, I2L, I2F, I2D],
    },
    PrimitiveWideningDelegate {
        source: PrimitiveKind::Long,
        targets: [X, X, X, X, X, T, L2F, L2D],
    },
    PrimitiveWideningDelegate {
        source: PrimitiveKind::Float,
        targets: [X, X, X, X, X, X, T, F2D],
    },
    PrimitiveWideningDelegate {
        source: PrimitiveKind::Double,
        targets: [X, X, X, X, X, X, X, T],
    },
];

impl PrimitiveWideningDelegate {
    pub fn for_primitive(kind: PrimitiveKind) -> &'static Self {
        &DELEGATES[kind as usize]
    }

    pub fn source(&self) -> PrimitiveKind {
        self.source
    }

    pub fn widening_to(&self, target: PrimitiveKind) -> Widening {
        self.targets[target as usize]
    }

    pub fn widen_to(&self, target: PrimitiveKind) -> BoxedManipulation {
        let widening = self.widening_to(target);
        cf_core::trace!("widening {} to {}: {:?}", self.source, target, widening);
        Box::new(widening)
    }
}
