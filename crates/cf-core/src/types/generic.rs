//! Generic type shapes layered over erased [`TypeDescription`]s.

use crate::types::description::TypeDescription;
use crate::types::primitive::PrimitiveKind;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Shape tag of a [`Generic`] type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenericSort {
    NonGeneric,
    Parameterized,
    Wildcard,
    Variable,
    GenericArray,
}

/// A type variable, identified by its symbol and the type declaring it.
///
/// Bounds are not carried inline since they may refer back to the variable
/// (`T extends Comparable<T>`); they are looked up through the type pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeVariable {
    pub symbol: String,
    pub declared_by: TypeDescription,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterizedType {
    pub raw: TypeDescription,
    pub arguments: Vec<Generic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WildcardBound {
    /// `?`, equivalent to `? extends java.lang.Object`.
    Unbounded,
    /// `? extends T`
    Upper(Box<Generic>),
    /// `? super T`
    Lower(Box<Generic>),
}

/// A type as it appears in a signature, including its generic shape.
///
/// Equality is structural: `List<String>` and `List<Object>` differ even though
/// both erase to `java.util.List`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Generic {
    NonGeneric(TypeDescription),
    Parameterized(ParameterizedType),
    Wildcard(WildcardBound),
    Variable(TypeVariable),
    GenericArray(Box<Generic>),
}

impl Generic {
    pub fn void() -> Self {
        Generic::NonGeneric(TypeDescription::void())
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Generic::NonGeneric(TypeDescription::primitive(kind))
    }

    pub fn class(name: impl AsRef<str>) -> Self {
        Generic::NonGeneric(TypeDescription::class(name))
    }

    pub fn object() -> Self {
        Generic::NonGeneric(TypeDescription::object())
    }

    pub fn string() -> Self {
        Generic::NonGeneric(TypeDescription::string())
    }

    pub fn parameterized(raw: TypeDescription, arguments: Vec<Generic>) -> Self {
        Generic::Parameterized(ParameterizedType { raw, arguments })
    }

    pub fn unbounded_wildcard() -> Self {
        Generic::Wildcard(WildcardBound::Unbounded)
    }

    pub fn upper_bounded(bound: Generic) -> Self {
        Generic::Wildcard(WildcardBound::Upper(Box::new(bound)))
    }

    pub fn lower_bounded(bound: Generic) -> Self {
        Generic::Wildcard(WildcardBound::Lower(Box::new(bound)))
    }

    pub fn variable(symbol: impl Into<String>, declared_by: TypeDescription) -> Self {
        Generic::Variable(TypeVariable {
            symbol: symbol.into(),
            declared_by,
        })
    }

    /// An array of `component`; stays non-generic when the component is.
    pub fn array(component: Generic) -> Self {
        match component {
            Generic::NonGeneric(description) => {
                Generic::NonGeneric(TypeDescription::array(description))
            }
            other => Generic::GenericArray(Box::new(other)),
        }
    }

    pub fn sort(&self) -> GenericSort {
        match self {
            Generic::NonGeneric(_) => GenericSort::NonGeneric,
            Generic::Parameterized(_) => GenericSort::Parameterized,
            Generic::Wildcard(_) => GenericSort::Wildcard,
            Generic::Variable(_) => GenericSort::Variable,
            Generic::GenericArray(_) => GenericSort::GenericArray,
        }
    }

    pub fn as_non_generic(&self) -> Option<&TypeDescription> {
        match self {
            Generic::NonGeneric(description) => Some(description),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.as_non_generic().is_some_and(TypeDescription::is_primitive)
    }

    pub fn is_void(&self) -> bool {
        self.as_non_generic().is_some_and(TypeDescription::is_void)
    }

    /// Replaces every bound variable by its binding. Unbound variables are kept.
    pub fn substitute(&self, bindings: &HashMap<TypeVariable, Generic>) -> Generic {
        match self {
            Generic::NonGeneric(_) => self.clone(),
            Generic::Parameterized(parameterized) => Generic::Parameterized(ParameterizedType {
                raw: parameterized.raw.clone(),
                arguments: parameterized
                    .arguments
                    .iter()
                    .map(|argument| argument.substitute(bindings))
                    .collect(),
            }),
            Generic::Wildcard(bound) => Generic::Wildcard(match bound {
                WildcardBound::Unbounded => WildcardBound::Unbounded,
                WildcardBound::Upper(upper) => {
                    WildcardBound::Upper(Box::new(upper.substitute(bindings)))
                }
                WildcardBound::Lower(lower) => {
                    WildcardBound::Lower(Box::new(lower.substitute(bindings)))
                }
            }),
            Generic::Variable(variable) => bindings
                .get(variable)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            Generic::GenericArray(component) => Generic::array(component.substitute(bindings)),
        }
    }

    /// Rewrites every erased leaf, including array components and the
    /// declaring type of variables.
    pub fn map_erasures<F>(&self, f: &F) -> Generic
    where
        F: Fn(&TypeDescription) -> TypeDescription,
    {
        match self {
            Generic::NonGeneric(description) => Generic::NonGeneric(map_description(description, f)),
            Generic::Parameterized(parameterized) => Generic::Parameterized(ParameterizedType {
                raw: map_description(&parameterized.raw, f),
                arguments: parameterized
                    .arguments
                    .iter()
                    .map(|argument| argument.map_erasures(f))
                    .collect(),
            }),
            Generic::Wildcard(bound) => Generic::Wildcard(match bound {
                WildcardBound::Unbounded => WildcardBound::Unbounded,
                WildcardBound::Upper(upper) => WildcardBound::Upper(Box::new(upper.map_erasures(f))),
                WildcardBound::Lower(lower) => WildcardBound::Lower(Box::new(lower.map_erasures(f))),
            }),
            Generic::Variable(variable) => Generic::Variable(TypeVariable {
                symbol: variable.symbol.clone(),
                declared_by: map_description(&variable.declared_by, f),
            }),
            Generic::GenericArray(component) => {
                Generic::GenericArray(Box::new(component.map_erasures(f)))
            }
        }
    }

    /// Whether any erased leaf satisfies `predicate`.
    pub fn mentions<P>(&self, predicate: &P) -> bool
    where
        P: Fn(&TypeDescription) -> bool,
    {
        match self {
            Generic::NonGeneric(description) => mentions_description(description, predicate),
            Generic::Parameterized(parameterized) => {
                mentions_description(&parameterized.raw, predicate)
                    || parameterized
                        .arguments
                        .iter()
                        .any(|argument| argument.mentions(predicate))
            }
            Generic::Wildcard(WildcardBound::Unbounded) => false,
            Generic::Wildcard(WildcardBound::Upper(bound) | WildcardBound::Lower(bound)) => {
                bound.mentions(predicate)
            }
            Generic::Variable(variable) => predicate(&variable.declared_by),
            Generic::GenericArray(component) => component.mentions(predicate),
        }
    }

    /// The class-file generic signature, e.g. `Ljava/util/List<+TT;>;`.
    pub fn signature(&self) -> String {
        match self {
            Generic::NonGeneric(description) => description.descriptor(),
            Generic::Parameterized(parameterized) => format!(
                "L{}<{}>;",
                parameterized.raw.internal_name(),
                parameterized.arguments.iter().map(Generic::signature).join("")
            ),
            Generic::Wildcard(WildcardBound::Unbounded) => "*".to_string(),
            Generic::Wildcard(WildcardBound::Upper(bound)) => format!("+{}", bound.signature()),
            Generic::Wildcard(WildcardBound::Lower(bound)) => format!("-{}", bound.signature()),
            Generic::Variable(variable) => format!("T{};", variable.symbol),
            Generic::GenericArray(component) => format!("[{}", component.signature()),
        }
    }
}

fn map_description<F>(description: &TypeDescription, f: &F) -> TypeDescription
where
    F: Fn(&TypeDescription) -> TypeDescription,
{
    match description.component_type() {
        Some(component) => TypeDescription::array(map_description(component, f)),
        None => f(description),
    }
}

fn mentions_description<P>(description: &TypeDescription, predicate: &P) -> bool
where
    P: Fn(&TypeDescription) -> bool,
{
    match description.component_type() {
        Some(component) => mentions_description(component, predicate),
        None => predicate(description),
    }
}

impl From<TypeDescription> for Generic {
    fn from(description: TypeDescription) -> Self {
        Generic::NonGeneric(description)
    }
}

impl From<PrimitiveKind> for Generic {
    fn from(kind: PrimitiveKind) -> Self {
        Generic::primitive(kind)
    }
}

impl fmt::Display for Generic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generic::NonGeneric(description) => write!(f, "{}", description),
            Generic::Parameterized(parameterized) => write!(
                f,
                "{}<{}>",
                parameterized.raw.name(),
                parameterized.arguments.iter().join(", ")
            ),
            Generic::Wildcard(WildcardBound::Unbounded) => f.write_str("?"),
            Generic::Wildcard(WildcardBound::Upper(bound)) => write!(f, "? extends {}", bound),
            Generic::Wildcard(WildcardBound::Lower(bound)) => write!(f, "? super {}", bound),
            Generic::Variable(variable) => f.write_str(&variable.symbol),
            Generic::GenericArray(component) => write!(f, "{}[]", component),
        }
    }
}

impl fmt::Display for TypeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (declared by {})", self.symbol, self.declared_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(argument: Generic) -> Generic {
        Generic::parameterized(TypeDescription::class("java.util.List"), vec![argument])
    }

    #[test]
    fn renders_source_and_signature_forms() {
        let declaring = TypeDescription::class("demo.Holder");
        let t = Generic::variable("T", declaring);
        let ty = list_of(Generic::upper_bounded(t.clone()));
        assert_eq!(ty.to_string(), "java.util.List<? extends T>");
        assert_eq!(ty.signature(), "Ljava/util/List<+TT;>;");

        let array = Generic::array(list_of(Generic::unbounded_wildcard()));
        assert_eq!(array.sort(), GenericSort::GenericArray);
        assert_eq!(array.signature(), "[Ljava/util/List<*>;");
        assert_eq!(array.to_string(), "java.util.List<?>[]");
    }

    #[test]
    fn array_of_non_generic_component_stays_non_generic() {
        let array = Generic::array(Generic::string());
        assert_eq!(array.sort(), GenericSort::NonGeneric);
        assert_eq!(array.signature(), "[Ljava/lang/String;");
    }

    #[test]
    fn substitute_replaces_bound_variables_only() {
        let declaring = TypeDescription::class("demo.Pair");
        let a = TypeVariable {
            symbol: "A".into(),
            declared_by: declaring.clone(),
        };
        let ty = Generic::parameterized(
            TypeDescription::class("java.util.Map"),
            vec![
                Generic::Variable(a.clone()),
                Generic::lower_bounded(Generic::variable("B", declaring)),
            ],
        );
        let bindings = HashMap::from([(a, Generic::string())]);
        assert_eq!(
            ty.substitute(&bindings).to_string(),
            "java.util.Map<java.lang.String, ? super B>"
        );
    }
}
