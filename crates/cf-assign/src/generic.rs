//! Assignability between generic shapes.
//!
//! The resolver answers whether a value whose declared type is `source` can be
//! stored where `target` is declared, following the language rules for
//! parameterized types, wildcards, type variables and generic arrays. Unknown
//! classes and malformed parameterizations are errors; a conversion that
//! simply does not hold is an invalid manipulation.

use crate::{trivial_if, Assigner, Typing};
use cf_bytecode::manipulation::{Illegal, Trivial, TypeCasting};
use cf_bytecode::BoxedManipulation;
use cf_core::types::{
    Generic, ParameterizedType, TypeDescription, TypePool, TypeVariable, WildcardBound,
};
use cf_core::{Error, Result};
use std::sync::Arc;

pub struct GenericAssignabilityResolver {
    pool: Arc<TypePool>,
}

impl GenericAssignabilityResolver {
    pub fn new(pool: Arc<TypePool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<TypePool> {
        &self.pool
    }

    /// Whether `source` is statically assignable to `target`.
    pub fn is_assignable(&self, source: &Generic, target: &Generic) -> Result<bool> {
        if let Generic::Wildcard(_) = source {
            return Err(not_first_level(source));
        }
        if let Generic::Wildcard(_) = target {
            return Err(not_first_level(target));
        }
        if source == target {
            return Ok(true);
        }
        if source.as_non_generic().is_some_and(|d| !d.is_reference())
            || target.as_non_generic().is_some_and(|d| !d.is_reference())
        {
            return Ok(false);
        }
        match source {
            Generic::NonGeneric(description) => self.non_generic_to(description, source, target),
            Generic::Parameterized(parameterized) => {
                self.parameterized_to(parameterized, source, target)
            }
            Generic::Variable(variable) => self.variable_to(variable, target),
            Generic::GenericArray(component) => self.generic_array_to(component, target),
            Generic::Wildcard(_) => Err(not_first_level(source)),
        }
    }

    fn non_generic_to(
        &self,
        description: &TypeDescription,
        source: &Generic,
        target: &Generic,
    ) -> Result<bool> {
        match target {
            Generic::NonGeneric(target) => self.pool.is_subtype(description, target),
            Generic::Parameterized(parameterized) => {
                self.pool.check_arity(parameterized)?;
                if description.is_array() || description == &parameterized.raw {
                    // A raw type reaches a parameterization of itself only unchecked.
                    return Ok(false);
                }
                self.any_supertype_to(source, target)
            }
            Generic::GenericArray(target_component) => match description.component_type() {
                Some(component) => self.is_assignable(
                    &Generic::NonGeneric(component.clone()),
                    target_component,
                ),
                None => Ok(false),
            },
            Generic::Variable(_) | Generic::Wildcard(_) => Ok(false),
        }
    }

    fn parameterized_to(
        &self,
        parameterized: &ParameterizedType,
        source: &Generic,
        target: &Generic,
    ) -> Result<bool> {
        self.pool.check_arity(parameterized)?;
        match target {
            Generic::NonGeneric(target) => self.pool.is_subtype(&parameterized.raw, target),
            Generic::Parameterized(target_parameterized) => {
                self.pool.check_arity(target_parameterized)?;
                if parameterized.raw == target_parameterized.raw {
                    for (argument, target_argument) in parameterized
                        .arguments
                        .iter()
                        .zip(&target_parameterized.arguments)
                    {
                        if !self.is_contained_by(argument, target_argument)? {
                            return Ok(false);
                        }
                    }
                    Ok(true)
                } else {
                    self.any_supertype_to(source, target)
                }
            }
            Generic::Variable(_) | Generic::GenericArray(_) | Generic::Wildcard(_) => Ok(false),
        }
    }

    fn any_supertype_to(&self, source: &Generic, target: &Generic) -> Result<bool> {
        for supertype in self.pool.generic_supertypes(source)? {
            if self.is_assignable(&supertype, target)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Type argument containment: whether `argument` fits where
    /// `target_argument` is expected.
    fn is_contained_by(&self, argument: &Generic, target_argument: &Generic) -> Result<bool> {
        match target_argument {
            Generic::Wildcard(WildcardBound::Unbounded) => Ok(true),
            Generic::Wildcard(WildcardBound::Upper(bound)) if is_object(bound) => Ok(true),
            Generic::Wildcard(WildcardBound::Upper(bound)) => match argument {
                Generic::Wildcard(WildcardBound::Upper(argument_bound)) => {
                    self.is_assignable(argument_bound, bound)
                }
                Generic::Wildcard(WildcardBound::Unbounded) => {
                    self.is_assignable(&Generic::object(), bound)
                }
                Generic::Wildcard(WildcardBound::Lower(_)) => Ok(false),
                exact => self.is_assignable(exact, bound),
            },
            Generic::Wildcard(WildcardBound::Lower(bound)) => match argument {
                Generic::Wildcard(WildcardBound::Lower(argument_bound)) => {
                    self.is_assignable(bound, argument_bound)
                }
                Generic::Wildcard(_) => Ok(false),
                exact => self.is_assignable(bound, exact),
            },
            exact => Ok(argument == exact),
        }
    }

    fn variable_to(&self, variable: &TypeVariable, target: &Generic) -> Result<bool> {
        if let Generic::Variable(_) = target {
            // Identical variables were accepted before dispatch.
            return Ok(false);
        }
        for bound in self.pool.bounds_of(variable)? {
            if self.is_assignable(&bound, target)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn generic_array_to(&self, component: &Generic, target: &Generic) -> Result<bool> {
        match target {
            Generic::GenericArray(target_component) => {
                self.is_assignable(component, target_component)
            }
            Generic::NonGeneric(description) => match description.component_type() {
                Some(target_component) => Ok(&self.pool.erasure(component)? == target_component),
                None => {
                    let erasure = TypeDescription::array(self.pool.erasure(component)?);
                    self.pool.is_subtype(&erasure, description)
                }
            },
            Generic::Parameterized(_) | Generic::Variable(_) | Generic::Wildcard(_) => Ok(false),
        }
    }
}

fn is_object(generic: &Generic) -> bool {
    generic.as_non_generic().is_some_and(|d| d.is_object())
}

fn not_first_level(generic: &Generic) -> Error {
    Error::IllegalArgument(format!("wildcard {generic} is only valid as a type argument"))
}

impl Assigner for GenericAssignabilityResolver {
    fn assign(
        &self,
        source: &Generic,
        target: &Generic,
        typing: Typing,
    ) -> Result<BoxedManipulation> {
        let non_reference = |generic: &Generic| generic.is_primitive() || generic.is_void();
        if non_reference(source) || non_reference(target) {
            return Ok(trivial_if(source == target));
        }
        if self.is_assignable(source, target)? {
            cf_core::trace!("{} is assignable to {}", source, target);
            return Ok(Box::new(Trivial));
        }
        let target_erasure = self.pool.erasure(target)?;
        if typing.is_dynamic() && target_erasure.is_reference() {
            cf_core::trace!("casting {} to {} at runtime", source, target_erasure);
            return Ok(Box::new(TypeCasting::to(&target_erasure)?));
        }
        cf_core::debug!("{} is not assignable to {}", source, target);
        Ok(Box::new(Illegal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolver() -> GenericAssignabilityResolver {
        GenericAssignabilityResolver::new(Arc::new(TypePool::system()))
    }

    #[test]
    fn wildcards_are_rejected_at_the_top_level() {
        let err = resolver()
            .is_assignable(&Generic::unbounded_wildcard(), &Generic::object())
            .unwrap_err();
        assert!(matches!(err, Error::IllegalArgument(_)));
    }

    #[test]
    fn unbounded_argument_fits_upper_bounded_object() {
        let resolver = resolver();
        let list = TypeDescription::class("java.util.List");
        let source = Generic::parameterized(list.clone(), vec![Generic::unbounded_wildcard()]);
        let target = Generic::parameterized(list, vec![Generic::upper_bounded(Generic::object())]);
        assert_eq!(resolver.is_assignable(&source, &target), Ok(true));
    }
}
