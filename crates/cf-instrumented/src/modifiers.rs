use derive_more::{BitAnd, BitOr, BitOrAssign};
use serde::{Deserialize, Serialize};
use std::fmt;

/// JVM access flags of a member.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    BitOr,
    BitOrAssign,
    BitAnd,
)]
pub struct ModifierSet(u16);

const NAMES: [(ModifierSet, &str); 11] = [
    (ModifierSet::PUBLIC, "public"),
    (ModifierSet::PRIVATE, "private"),
    (ModifierSet::PROTECTED, "protected"),
    (ModifierSet::STATIC, "static"),
    (ModifierSet::FINAL, "final"),
    (ModifierSet::SYNCHRONIZED, "synchronized"),
    (ModifierSet::VOLATILE, "volatile"),
    (ModifierSet::TRANSIENT, "transient"),
    (ModifierSet::NATIVE, "native"),
    (ModifierSet::ABSTRACT, "abstract"),
    (ModifierSet::SYNTHETIC, "synthetic"),
];

impl ModifierSet {
    pub const EMPTY: ModifierSet = ModifierSet(0);
    pub const PUBLIC: ModifierSet = ModifierSet(0x0001);
    pub const PRIVATE: ModifierSet = ModifierSet(0x0002);
    pub const PROTECTED: ModifierSet = ModifierSet(0x0004);
    pub const STATIC: ModifierSet = ModifierSet(0x0008);
    pub const FINAL: ModifierSet = ModifierSet(0x0010);
    pub const SYNCHRONIZED: ModifierSet = ModifierSet(0x0020);
    pub const VOLATILE: ModifierSet = ModifierSet(0x0040);
    pub const TRANSIENT: ModifierSet = ModifierSet(0x0080);
    pub const NATIVE: ModifierSet = ModifierSet(0x0100);
    pub const ABSTRACT: ModifierSet = ModifierSet(0x0400);
    pub const SYNTHETIC: ModifierSet = ModifierSet(0x1000);

    pub const fn from_bits(bits: u16) -> Self {
        ModifierSet(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: ModifierSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_static(self) -> bool {
        self.contains(ModifierSet::STATIC)
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
