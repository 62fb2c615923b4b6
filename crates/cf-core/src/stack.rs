//! Operand stack bookkeeping.
//!
//! Every instruction sequence reports a [`Size`]: the net change it applies to the
//! operand stack and the highest point the stack reaches (relative to the depth it
//! started at) while the sequence runs.

use serde::{Deserialize, Serialize};
use std::cmp::max;

/// Number of operand stack slots a single value occupies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    strum_macros::Display,
)]
pub enum StackSize {
    /// `void` does not occupy the stack.
    Zero,
    /// References and all primitives except `long` and `double`.
    Single,
    /// `long` and `double`.
    Double,
}

impl StackSize {
    pub fn of(slots: u8) -> Self {
        match slots {
            0 => StackSize::Zero,
            1 => StackSize::Single,
            _ => StackSize::Double,
        }
    }

    pub fn slots(self) -> i32 {
        match self {
            StackSize::Zero => 0,
            StackSize::Single => 1,
            StackSize::Double => 2,
        }
    }

    /// The size of pushing a value of this width.
    pub fn to_increasing_size(self) -> Size {
        Size::new(self.slots(), self.slots())
    }

    /// The size of popping a value of this width.
    pub fn to_decreasing_size(self) -> Size {
        Size::new(-self.slots(), 0)
    }

    pub fn maximum(self, other: StackSize) -> StackSize {
        max(self, other)
    }
}

/// Stack effect of an instruction sequence.
///
/// `maximal_size` is measured from the depth at which the sequence starts, so a
/// sequence that only pops reports `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    size_impact: i32,
    maximal_size: i32,
}

impl Size {
    pub const ZERO: Size = Size {
        size_impact: 0,
        maximal_size: 0,
    };

    pub const fn new(size_impact: i32, maximal_size: i32) -> Self {
        Self {
            size_impact,
            maximal_size,
        }
    }

    /// Net change to the operand stack depth.
    pub fn size_impact(&self) -> i32 {
        self.size_impact
    }

    /// Peak stack depth reached, relative to the starting depth.
    pub fn maximal_size(&self) -> i32 {
        self.maximal_size
    }

    /// Sequences `other` after `self`. The peak of `other` is measured on top of
    /// the depth `self` leaves behind.
    pub fn aggregate(self, other: Size) -> Size {
        Size {
            size_impact: self.size_impact + other.size_impact,
            maximal_size: max(self.maximal_size, self.size_impact + other.maximal_size),
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Size({}, {})", self.size_impact, self.maximal_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_measures_peak_on_top_of_prior_impact() {
        let push_long = StackSize::Double.to_increasing_size();
        let push_int = StackSize::Single.to_increasing_size();
        assert_eq!(push_long.aggregate(push_int), Size::new(3, 3));

        let pop = StackSize::Single.to_decreasing_size();
        assert_eq!(pop.aggregate(push_long), Size::new(1, 1));
    }

    #[test]
    fn aggregate_is_associative() {
        let samples = [
            Size::ZERO,
            Size::new(1, 1),
            Size::new(-1, 0),
            Size::new(2, 3),
            Size::new(-2, 1),
            Size::new(0, 4),
            Size::new(1, 2),
        ];
        for a in samples {
            for b in samples {
                for c in samples {
                    assert_eq!(
                        a.aggregate(b).aggregate(c),
                        a.aggregate(b.aggregate(c)),
                        "{} {} {}",
                        a,
                        b,
                        c
                    );
                }
            }
        }
    }

    #[test]
    fn zero_is_identity() {
        let size = Size::new(2, 5);
        assert_eq!(Size::ZERO.aggregate(size), size);
        assert_eq!(size.aggregate(Size::ZERO), size);
    }
}
