mod support;

use cf_assign::{Assigner, GenericAssignabilityResolver, Typing};
use cf_bytecode::{Instruction, Opcode, StackManipulation};
use cf_core::types::{Generic, PrimitiveKind, TypeDescription};
use cf_core::Error;
use pretty_assertions::assert_eq;
use support::{container, emit, list, pool, string_variable};

fn resolver() -> GenericAssignabilityResolver {
    GenericAssignabilityResolver::new(pool())
}

fn assignable(source: &Generic, target: &Generic) -> bool {
    resolver().is_assignable(source, target).unwrap()
}

fn class(name: &str) -> Generic {
    Generic::class(name)
}

#[test]
fn parameterized_to_raw_and_unbounded_wildcard() {
    let source = container(Generic::string());
    assert!(assignable(&source, &class(support::CONTAINER)));
    assert!(assignable(&source, &container(Generic::unbounded_wildcard())));
    assert!(!assignable(&source, &container(Generic::object())));
}

#[test]
fn upper_bounded_wildcards_are_covariant() {
    let narrow = container(Generic::upper_bounded(Generic::string()));
    let wide = container(Generic::upper_bounded(class("java.io.Serializable")));
    assert!(assignable(&narrow, &wide));
    assert!(!assignable(&wide, &narrow));
    assert!(assignable(&container(Generic::string()), &wide));
}

#[test]
fn lower_bounded_wildcards_are_contravariant() {
    let wide = container(Generic::lower_bounded(Generic::object()));
    let narrow = container(Generic::lower_bounded(Generic::string()));
    assert!(assignable(&wide, &narrow));
    assert!(!assignable(&narrow, &wide));
    assert!(assignable(&container(Generic::object()), &narrow));
}

#[test]
fn mixed_wildcard_bounds_never_match() {
    let upper = container(Generic::upper_bounded(Generic::string()));
    let lower = container(Generic::lower_bounded(Generic::string()));
    assert!(!assignable(&upper, &lower));
    assert!(!assignable(&lower, &upper));
    assert!(assignable(&lower, &container(Generic::unbounded_wildcard())));
}

#[test]
fn generic_arrays_against_raw_arrays() {
    let variable_array = Generic::array(string_variable());
    let string_array = Generic::NonGeneric(TypeDescription::array(TypeDescription::string()));
    assert!(assignable(&variable_array, &string_array));
    assert!(!assignable(&variable_array, &Generic::array(variable_array.clone())));
    assert!(assignable(&variable_array, &Generic::object()));
    assert!(assignable(&variable_array, &class("java.lang.Cloneable")));
    assert!(!assignable(&variable_array, &Generic::string()));
}

#[test]
fn raw_arrays_against_generic_arrays() {
    let string_array = Generic::NonGeneric(TypeDescription::array(TypeDescription::string()));
    assert!(!assignable(&string_array, &Generic::array(list(Generic::string()))));
    assert!(!assignable(&string_array, &Generic::array(string_variable())));
    assert!(assignable(
        &string_array,
        &Generic::array(class("java.lang.CharSequence"))
    ));
}

#[test]
fn supertypes_carry_type_arguments() {
    let array_list = Generic::parameterized(
        TypeDescription::class("java.util.ArrayList"),
        vec![Generic::string()],
    );
    assert!(assignable(&array_list, &list(Generic::string())));
    assert!(!assignable(&array_list, &list(Generic::object())));
    assert!(assignable(
        &array_list,
        &Generic::parameterized(
            TypeDescription::class("java.util.Collection"),
            vec![Generic::upper_bounded(class("java.lang.CharSequence"))],
        )
    ));
    assert!(assignable(
        &array_list,
        &Generic::parameterized(
            TypeDescription::class("java.lang.Iterable"),
            vec![Generic::string()],
        )
    ));
}

#[test]
fn non_generic_classes_reach_parameterized_interfaces() {
    let comparable = |argument: Generic| {
        Generic::parameterized(TypeDescription::class("java.lang.Comparable"), vec![argument])
    };
    assert!(assignable(&Generic::string(), &comparable(Generic::string())));
    assert!(assignable(&class("java.lang.Integer"), &comparable(class("java.lang.Integer"))));
    assert!(!assignable(&class("java.lang.Integer"), &comparable(class("java.lang.Number"))));
}

#[test]
fn raw_types_do_not_reach_their_parameterizations() {
    let raw = class("java.util.List");
    assert!(!assignable(&raw, &list(Generic::string())));
    let resolver = resolver();
    let dynamic = resolver
        .assign(&raw, &list(Generic::string()), Typing::Dynamic)
        .unwrap();
    assert!(dynamic.is_valid());
}

#[test]
fn type_variables_resolve_through_bounds() {
    let variable = string_variable();
    assert!(assignable(&variable, &variable));
    assert!(assignable(&variable, &class("java.lang.CharSequence")));
    assert!(!assignable(&variable, &class("java.lang.Integer")));
    let other = Generic::variable("T", TypeDescription::class(support::CONTAINER));
    assert!(!assignable(&variable, &other));
    assert!(!assignable(&Generic::string(), &variable));
}

#[test]
fn primitives_only_match_themselves() {
    let int = Generic::primitive(cf_core::PrimitiveKind::Int);
    assert!(assignable(&int, &int));
    assert!(!assignable(&int, &Generic::object()));
    let int_array = Generic::NonGeneric(TypeDescription::array(TypeDescription::primitive(
        cf_core::PrimitiveKind::Int,
    )));
    assert!(!assignable(
        &int_array,
        &Generic::NonGeneric(TypeDescription::array(TypeDescription::object()))
    ));
}

#[test]
fn arity_mismatch_is_an_error() {
    let malformed = Generic::parameterized(
        TypeDescription::class("java.util.List"),
        vec![Generic::string(), Generic::string()],
    );
    let err = resolver()
        .is_assignable(&malformed, &class("java.util.Collection"))
        .unwrap_err();
    assert!(matches!(err, Error::IllegalArgument(_)), "{err:?}");
}

#[test]
fn unknown_types_are_errors() {
    let err = resolver()
        .is_assignable(&class("demo.Missing"), &class("java.io.Serializable"))
        .unwrap_err();
    assert_eq!(
        err,
        Error::UnknownType {
            name: "demo.Missing".to_string()
        }
    );
}

#[test]
fn dynamic_typing_casts_to_the_target_erasure() {
    let resolver = resolver();
    let manipulation = resolver
        .assign(&Generic::object(), &list(Generic::string()), Typing::Dynamic)
        .unwrap();
    let (instructions, size) = emit(&manipulation);
    assert_eq!(
        instructions.instructions(),
        &[Instruction::Type {
            opcode: Opcode::Checkcast,
            internal_name: "java/util/List".to_string(),
        }]
    );
    assert_eq!(size, Ok(cf_core::Size::ZERO));

    let refused = resolver
        .assign(&Generic::object(), &list(Generic::string()), Typing::Static)
        .unwrap();
    assert!(!refused.is_valid());
}

#[test]
fn primitives_are_never_cast_at_runtime() {
    let resolver = resolver();
    let int = Generic::primitive(PrimitiveKind::Int);
    for target in [class("java.lang.Integer"), Generic::object()] {
        for typing in [Typing::Static, Typing::Dynamic] {
            let manipulation = resolver.assign(&int, &target, typing).unwrap();
            assert!(!manipulation.is_valid(), "int -> {target} ({typing:?})");
            assert!(!resolver.assign(&target, &int, typing).unwrap().is_valid());
        }
    }
    let same = resolver.assign(&int, &int, Typing::Dynamic).unwrap();
    assert!(same.is_valid());
    let (instructions, size) = emit(&same);
    assert!(instructions.is_empty());
    assert_eq!(size, Ok(cf_core::Size::ZERO));
    let void = Generic::void();
    assert!(!resolver
        .assign(&void, &Generic::object(), Typing::Dynamic)
        .unwrap()
        .is_valid());
}
