pub mod description;
pub mod descriptor;
pub mod generic;
pub mod pool;
pub mod primitive;

pub use description::{TypeDescription, TypeSort};
pub use descriptor::MethodDescriptor;
pub use generic::{Generic, GenericSort, ParameterizedType, TypeVariable, WildcardBound};
pub use pool::{ClassDefinition, TypePool, TypeVariableDeclaration};
pub use primitive::PrimitiveKind;
