//! Types under construction.
//!
//! An [`InstrumentedType`] accumulates field and method tokens. Every `with_*`
//! call returns a new value and leaves the receiver untouched, so one partially
//! built type can seed several independent builders. Members may refer to the
//! type being built through [`TargetType`] before its name is known; the
//! placeholder is replaced in [`InstrumentedType::resolve`].

pub mod instrumented;
pub mod modifiers;
pub mod target;
pub mod token;

pub use instrumented::{InstrumentedType, ResolvedField, ResolvedMethod, ResolvedType};
pub use modifiers::ModifierSet;
pub use target::TargetType;
pub use token::{FieldToken, MethodToken, TokenList};
