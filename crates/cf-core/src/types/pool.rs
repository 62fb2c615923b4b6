//! The type pool resolves erased types to their declarations: superclass,
//! interfaces and type variables.
//!
//! Descriptions themselves only carry identity. Everything structural is looked
//! up here, which keeps self-referential declarations such as
//! `String implements Comparable<String>` free of reference cycles.

use crate::collections::ConcurrentMap;
use crate::error::{Error, Result};
use crate::types::description::{TypeDescription, TypeSort, CLONEABLE, OBJECT, SERIALIZABLE};
use crate::types::generic::{Generic, ParameterizedType, TypeVariable, WildcardBound};
use crate::types::primitive::PrimitiveKind;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeVariableDeclaration {
    pub symbol: String,
    /// Upper bounds; empty means `java.lang.Object`.
    pub bounds: Vec<Generic>,
}

/// Declaration of a class or interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub description: TypeDescription,
    pub interface: bool,
    pub type_variables: Vec<TypeVariableDeclaration>,
    pub super_class: Option<Generic>,
    pub interfaces: Vec<Generic>,
}

impl ClassDefinition {
    /// A class extending `java.lang.Object`.
    pub fn class(name: impl AsRef<str>) -> Self {
        let description = TypeDescription::class(name);
        let super_class = if description.is_object() {
            None
        } else {
            Some(Generic::object())
        };
        Self {
            description,
            interface: false,
            type_variables: Vec::new(),
            super_class,
            interfaces: Vec::new(),
        }
    }

    pub fn interface(name: impl AsRef<str>) -> Self {
        Self {
            description: TypeDescription::class(name),
            interface: true,
            type_variables: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
        }
    }

    pub fn extends(mut self, super_class: Generic) -> Self {
        self.super_class = Some(super_class);
        self
    }

    pub fn implements(mut self, interface: Generic) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_type_variable(mut self, symbol: impl Into<String>, bounds: Vec<Generic>) -> Self {
        self.type_variables.push(TypeVariableDeclaration {
            symbol: symbol.into(),
            bounds,
        });
        self
    }

    /// The variable named `symbol` as declared by this type.
    pub fn variable(&self, symbol: &str) -> Generic {
        Generic::variable(symbol, self.description.clone())
    }

    fn declared_supertypes(&self) -> impl Iterator<Item = &Generic> {
        self.super_class.iter().chain(self.interfaces.iter())
    }
}

#[derive(Default)]
pub struct TypePool {
    definitions: ConcurrentMap<TypeDescription, Arc<ClassDefinition>>,
}

impl TypePool {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A pool knowing the core `java.lang`, `java.io` and `java.util` types the
    /// assigners reason about.
    pub fn system() -> Self {
        let pool = Self::empty();
        for definition in system_definitions() {
            pool.insert(definition);
        }
        pool
    }

    /// Registers a class or interface. Redefining a known type replaces it.
    pub fn define(&self, definition: ClassDefinition) -> Result<()> {
        if !matches!(definition.description.sort(), TypeSort::Class) {
            return Err(Error::IllegalArgument(format!(
                "cannot define {}: only classes and interfaces have declarations",
                definition.description
            )));
        }
        for supertype in definition.declared_supertypes() {
            if !matches!(supertype, Generic::NonGeneric(_) | Generic::Parameterized(_)) {
                return Err(Error::IllegalArgument(format!(
                    "{} cannot have supertype {}",
                    definition.description, supertype
                )));
            }
        }
        self.insert(definition);
        Ok(())
    }

    fn insert(&self, definition: ClassDefinition) {
        trace!("defining {}", definition.description);
        let key = definition.description.clone();
        if self.definitions.insert(key, Arc::new(definition)).is_some() {
            trace!("replaced an existing definition");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(&TypeDescription::class(name))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn describe(&self, name: &str) -> Result<Arc<ClassDefinition>> {
        self.definition(&TypeDescription::class(name))
    }

    pub fn definition(&self, description: &TypeDescription) -> Result<Arc<ClassDefinition>> {
        self.definitions
            .get_cloned(description)
            .ok_or_else(|| Error::UnknownType {
                name: description.name().to_string(),
            })
    }

    /// Erasure-level subtyping: reflexive, transitive over superclasses and
    /// interfaces, covariant for arrays of references.
    pub fn is_subtype(&self, source: &TypeDescription, target: &TypeDescription) -> Result<bool> {
        if source == target {
            return Ok(true);
        }
        match (source.sort(), target.sort()) {
            (TypeSort::Void | TypeSort::Primitive(_), _)
            | (_, TypeSort::Void | TypeSort::Primitive(_)) => Ok(false),
            (_, TypeSort::Class) if target.is_object() => Ok(true),
            (TypeSort::Array(source_component), TypeSort::Array(target_component)) => {
                if source_component.is_primitive() || target_component.is_primitive() {
                    Ok(false)
                } else {
                    self.is_subtype(source_component, target_component)
                }
            }
            (TypeSort::Array(_), TypeSort::Class) => {
                Ok(target.represents(CLONEABLE) || target.represents(SERIALIZABLE))
            }
            (TypeSort::Class, TypeSort::Array(_)) => Ok(false),
            (TypeSort::Class, TypeSort::Class) => self.is_class_subtype(source, target),
        }
    }

    fn is_class_subtype(&self, source: &TypeDescription, target: &TypeDescription) -> Result<bool> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([source.clone()]);
        while let Some(current) = queue.pop_front() {
            if &current == target {
                return Ok(true);
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            let definition = self.definition(&current)?;
            for supertype in definition.declared_supertypes() {
                queue.push_back(self.erasure(supertype)?);
            }
        }
        Ok(false)
    }

    /// Upper bounds of a type variable, `java.lang.Object` when none are declared.
    pub fn bounds_of(&self, variable: &TypeVariable) -> Result<Vec<Generic>> {
        let unbound = || Error::UnboundTypeVariable {
            symbol: variable.symbol.clone(),
            declared_by: variable.declared_by.name().to_string(),
        };
        let definition = self.definition(&variable.declared_by).map_err(|_| unbound())?;
        let declaration = definition
            .type_variables
            .iter()
            .find(|declaration| declaration.symbol == variable.symbol)
            .ok_or_else(unbound)?;
        if declaration.bounds.is_empty() {
            Ok(vec![Generic::object()])
        } else {
            Ok(declaration.bounds.clone())
        }
    }

    pub fn erasure(&self, generic: &Generic) -> Result<TypeDescription> {
        match generic {
            Generic::NonGeneric(description) => Ok(description.clone()),
            Generic::Parameterized(parameterized) => Ok(parameterized.raw.clone()),
            Generic::GenericArray(component) => Ok(TypeDescription::array(self.erasure(component)?)),
            Generic::Variable(variable) => {
                let bounds = self.bounds_of(variable)?;
                match bounds.first() {
                    Some(bound) => self.erasure(bound),
                    None => Ok(TypeDescription::object()),
                }
            }
            Generic::Wildcard(WildcardBound::Upper(bound)) => self.erasure(bound),
            Generic::Wildcard(_) => Ok(TypeDescription::object()),
        }
    }

    /// Direct supertypes of a class type with the type's own arguments
    /// substituted into the declared supertypes.
    ///
    /// A raw use of a generic class has raw supertypes.
    pub fn generic_supertypes(&self, generic: &Generic) -> Result<Vec<Generic>> {
        match generic {
            Generic::NonGeneric(description) if matches!(description.sort(), TypeSort::Class) => {
                let definition = self.definition(description)?;
                let raw_use = !definition.type_variables.is_empty();
                definition
                    .declared_supertypes()
                    .map(|supertype| {
                        if raw_use {
                            self.erasure(supertype).map(Generic::NonGeneric)
                        } else {
                            Ok(supertype.clone())
                        }
                    })
                    .collect()
            }
            Generic::Parameterized(parameterized) => {
                let definition = self.definition(&parameterized.raw)?;
                let bindings = self.bindings(&definition, parameterized)?;
                Ok(definition
                    .declared_supertypes()
                    .map(|supertype| supertype.substitute(&bindings))
                    .collect())
            }
            _ => Ok(Vec::new()),
        }
    }

    fn bindings(
        &self,
        definition: &ClassDefinition,
        parameterized: &ParameterizedType,
    ) -> Result<HashMap<TypeVariable, Generic>> {
        if definition.type_variables.len() != parameterized.arguments.len() {
            return Err(Error::IllegalArgument(format!(
                "{} declares {} type variables but was given {} arguments",
                definition.description,
                definition.type_variables.len(),
                parameterized.arguments.len()
            )));
        }
        Ok(definition
            .type_variables
            .iter()
            .zip(&parameterized.arguments)
            .map(|(declaration, argument)| {
                (
                    TypeVariable {
                        symbol: declaration.symbol.clone(),
                        declared_by: definition.description.clone(),
                    },
                    argument.clone(),
                )
            })
            .collect())
    }

    /// Checks that a parameterized type supplies one argument per declared variable.
    pub fn check_arity(&self, parameterized: &ParameterizedType) -> Result<()> {
        let definition = self.definition(&parameterized.raw)?;
        self.bindings(&definition, parameterized).map(|_| ())
    }
}

fn comparable_of(name: &str) -> Generic {
    Generic::parameterized(
        TypeDescription::class("java.lang.Comparable"),
        vec![Generic::class(name)],
    )
}

fn system_definitions() -> Vec<ClassDefinition> {
    let serializable = Generic::class(SERIALIZABLE);
    let mut definitions = vec![
        ClassDefinition::class(OBJECT),
        ClassDefinition::interface(SERIALIZABLE),
        ClassDefinition::interface(CLONEABLE),
        ClassDefinition::interface("java.lang.CharSequence"),
        ClassDefinition::interface("java.lang.Comparable").with_type_variable("T", vec![]),
        ClassDefinition::class("java.lang.String")
            .implements(serializable.clone())
            .implements(comparable_of("java.lang.String"))
            .implements(Generic::class("java.lang.CharSequence")),
        ClassDefinition::class("java.lang.Number").implements(serializable.clone()),
        ClassDefinition::class("java.lang.Void"),
        ClassDefinition::interface("java.lang.Iterable").with_type_variable("T", vec![]),
    ];
    for kind in PrimitiveKind::iter() {
        let wrapper = kind.wrapper_name();
        let definition = match kind {
            PrimitiveKind::Boolean | PrimitiveKind::Char => {
                ClassDefinition::class(wrapper).implements(serializable.clone())
            }
            _ => ClassDefinition::class(wrapper).extends(Generic::class("java.lang.Number")),
        };
        definitions.push(definition.implements(comparable_of(wrapper)));
    }

    let collection = ClassDefinition::interface("java.util.Collection");
    let e = collection.variable("E");
    let collection = collection
        .with_type_variable("E", vec![])
        .implements(Generic::parameterized(
            TypeDescription::class("java.lang.Iterable"),
            vec![e],
        ));

    let list = ClassDefinition::interface("java.util.List");
    let e = list.variable("E");
    let list = list
        .with_type_variable("E", vec![])
        .implements(Generic::parameterized(
            TypeDescription::class("java.util.Collection"),
            vec![e],
        ));

    let array_list = ClassDefinition::class("java.util.ArrayList");
    let e = array_list.variable("E");
    let array_list = array_list
        .with_type_variable("E", vec![])
        .implements(Generic::parameterized(
            TypeDescription::class("java.util.List"),
            vec![e],
        ))
        .implements(Generic::class(CLONEABLE))
        .implements(serializable);

    let map = ClassDefinition::interface("java.util.Map")
        .with_type_variable("K", vec![])
        .with_type_variable("V", vec![]);

    definitions.extend([collection, list, array_list, map]);
    definitions
}
