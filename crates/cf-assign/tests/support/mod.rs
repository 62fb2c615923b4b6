//! Shared fixtures for cf-assign tests.
#![allow(dead_code)]

use cf_bytecode::{EmissionContext, InstructionList, StackManipulation};
use cf_core::types::{ClassDefinition, Generic, TypeDescription, TypePool};
use cf_core::{Result, Size};
use std::sync::Arc;

pub const CONTAINER: &str = "demo.Container";
pub const HOLDER: &str = "demo.Holder";

/// The system pool plus `demo.Container<T>` and `demo.Holder<T extends String>`.
pub fn pool() -> Arc<TypePool> {
    let pool = TypePool::system();
    pool.define(ClassDefinition::class(CONTAINER).with_type_variable("T", Vec::new()))
        .unwrap();
    pool.define(ClassDefinition::class(HOLDER).with_type_variable("T", vec![Generic::string()]))
        .unwrap();
    Arc::new(pool)
}

pub fn container(argument: Generic) -> Generic {
    Generic::parameterized(TypeDescription::class(CONTAINER), vec![argument])
}

pub fn list(argument: Generic) -> Generic {
    Generic::parameterized(TypeDescription::class("java.util.List"), vec![argument])
}

/// `T extends String`, declared by `demo.Holder`.
pub fn string_variable() -> Generic {
    Generic::variable("T", TypeDescription::class(HOLDER))
}

pub fn emit(manipulation: &dyn StackManipulation) -> (InstructionList, Result<Size>) {
    let mut list = InstructionList::new();
    let mut context = EmissionContext::new(TypeDescription::class("demo.Generated"));
    let size = manipulation.apply(&mut list, &mut context);
    (list, size)
}
