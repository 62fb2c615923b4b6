use crate::error::Result;
use crate::stack::StackSize;
use crate::types::descriptor;
use crate::types::primitive::PrimitiveKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const CLONEABLE: &str = "java.lang.Cloneable";
pub const SERIALIZABLE: &str = "java.io.Serializable";

/// What an erased type is, independent of its name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TypeSort {
    Void,
    Primitive(PrimitiveKind),
    Array(Box<TypeDescription>),
    Class,
}

/// An erased type: a class, interface, array, primitive or `void`.
///
/// Two descriptions are equal when their binary names are equal. Generic shape
/// lives in [`crate::types::Generic`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDescription {
    name: Arc<str>,
    sort: TypeSort,
}

impl TypeDescription {
    pub fn void() -> Self {
        Self {
            name: Arc::from("void"),
            sort: TypeSort::Void,
        }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self {
            name: Arc::from(kind.name()),
            sort: TypeSort::Primitive(kind),
        }
    }

    /// A class or interface given by its binary name, e.g. `java.util.Map$Entry`.
    pub fn class(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            sort: TypeSort::Class,
        }
    }

    pub fn object() -> Self {
        Self::class(OBJECT)
    }

    pub fn string() -> Self {
        Self::class(STRING)
    }

    pub fn array(component: TypeDescription) -> Self {
        let name = format!("[{}", component.descriptor().replace('/', "."));
        Self {
            name: Arc::from(name),
            sort: TypeSort::Array(Box::new(component)),
        }
    }

    pub fn array_of(component: TypeDescription, dimensions: usize) -> Self {
        (0..dimensions).fold(component, |acc, _| Self::array(acc))
    }

    /// Resolves a name as returned by [`TypeDescription::name`]: a primitive name,
    /// `void`, an array name such as `[Ljava.lang.String;`, or a class name.
    pub fn for_name(name: &str) -> Result<Self> {
        if name == "void" {
            return Ok(Self::void());
        }
        if let Ok(kind) = PrimitiveKind::from_name(name) {
            return Ok(Self::primitive(kind));
        }
        if name.starts_with('[') {
            return Self::from_descriptor(&name.replace('.', "/"));
        }
        Ok(Self::class(name))
    }

    /// Parses a field descriptor such as `I`, `Ljava/lang/String;` or `[[J`.
    pub fn from_descriptor(descriptor: &str) -> Result<Self> {
        descriptor::parse_field_descriptor(descriptor)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sort(&self) -> &TypeSort {
        &self.sort
    }

    /// The internal form used by the class-file format: `java/lang/String`.
    /// Arrays use their descriptor.
    pub fn internal_name(&self) -> String {
        match &self.sort {
            TypeSort::Array(_) => self.descriptor(),
            _ => self.name.replace('.', "/"),
        }
    }

    pub fn descriptor(&self) -> String {
        match &self.sort {
            TypeSort::Void => "V".to_string(),
            TypeSort::Primitive(kind) => kind.descriptor_char().to_string(),
            TypeSort::Array(component) => format!("[{}", component.descriptor()),
            TypeSort::Class => format!("L{};", self.name.replace('.', "/")),
        }
    }

    /// Source-level spelling, e.g. `java.lang.String[]`.
    pub fn type_name(&self) -> String {
        match &self.sort {
            TypeSort::Array(component) => format!("{}[]", component.type_name()),
            _ => self.name.to_string(),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self.sort, TypeSort::Void)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self.sort, TypeSort::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.sort, TypeSort::Array(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self.sort, TypeSort::Array(_) | TypeSort::Class)
    }

    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self.sort {
            TypeSort::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn component_type(&self) -> Option<&TypeDescription> {
        match &self.sort {
            TypeSort::Array(component) => Some(component),
            _ => None,
        }
    }

    /// The primitive this type wraps, if it is one of the eight wrapper classes.
    pub fn wrapped_primitive(&self) -> Option<PrimitiveKind> {
        match self.sort {
            TypeSort::Class => PrimitiveKind::from_wrapper_name(&self.name),
            _ => None,
        }
    }

    pub fn represents(&self, name: &str) -> bool {
        &*self.name == name
    }

    pub fn is_object(&self) -> bool {
        self.represents(OBJECT)
    }

    pub fn stack_size(&self) -> StackSize {
        match &self.sort {
            TypeSort::Void => StackSize::Zero,
            TypeSort::Primitive(kind) => kind.stack_size(),
            TypeSort::Array(_) | TypeSort::Class => StackSize::Single,
        }
    }
}

impl PartialEq for TypeDescription {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeDescription {}

impl Hash for TypeDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for TypeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

impl From<PrimitiveKind> for TypeDescription {
    fn from(kind: PrimitiveKind) -> Self {
        TypeDescription::primitive(kind)
    }
}
