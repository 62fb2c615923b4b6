#[macro_use]
pub mod macros;

pub mod collections;
pub mod error;
pub mod stack;
pub mod types;

// Re-export commonly used items for convenience
pub use tracing;

pub use stack::{Size, StackSize};
pub use types::{
    ClassDefinition, Generic, GenericSort, MethodDescriptor, PrimitiveKind, TypeDescription,
    TypePool, TypeSort, TypeVariable, TypeVariableDeclaration, WildcardBound,
};

// Alias for error types
pub type Error = crate::error::Error;
pub type Result<T> = crate::error::Result<T>;
