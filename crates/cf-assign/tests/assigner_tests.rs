mod support;

use cf_assign::{
    Assigner, AssignerConfig, DefaultAssigner, EqualTypesOnly, GenericsMode, Refusing, Typing,
    VoidHandling,
};
use cf_bytecode::{Instruction, Opcode, StackManipulation};
use cf_core::types::{Generic, PrimitiveKind};
use cf_core::{Error, Size};
use pretty_assertions::assert_eq;
use support::{emit, list, pool};

fn assigner() -> DefaultAssigner {
    DefaultAssigner::new(pool())
}

fn primitive(kind: PrimitiveKind) -> Generic {
    Generic::primitive(kind)
}

fn method(opcode: Opcode, owner: &str, name: &str, descriptor: &str) -> Instruction {
    Instruction::Method {
        opcode,
        owner: owner.to_string(),
        name: name.to_string(),
        descriptor: descriptor.to_string(),
        is_interface: false,
    }
}

#[test]
fn boxing_a_boolean_into_object() {
    let manipulation = assigner()
        .assign(
            &primitive(PrimitiveKind::Boolean),
            &Generic::object(),
            Typing::Dynamic,
        )
        .unwrap();
    assert!(manipulation.is_valid());
    assert_eq!(manipulation.as_compound().map(|c| c.len()), Some(2));
    let (instructions, size) = emit(&manipulation);
    assert_eq!(
        instructions.instructions(),
        &[method(
            Opcode::Invokestatic,
            "java/lang/Boolean",
            "valueOf",
            "(Z)Ljava/lang/Boolean;"
        )]
    );
    assert_eq!(size, Ok(Size::new(0, 1)));
}

#[test]
fn boxing_requires_the_wrapper_to_fit_the_target() {
    let assigner = assigner();
    let int = primitive(PrimitiveKind::Int);
    for target in ["java.lang.Integer", "java.lang.Number", "java.io.Serializable"] {
        let manipulation = assigner
            .assign(&int, &Generic::class(target), Typing::Static)
            .unwrap();
        assert!(manipulation.is_valid(), "int -> {target}");
    }
    let manipulation = assigner
        .assign(&int, &Generic::string(), Typing::Static)
        .unwrap();
    assert!(!manipulation.is_valid());
}

#[test]
fn unboxing_an_object_needs_dynamic_typing() {
    let assigner = assigner();
    let int = primitive(PrimitiveKind::Int);
    let refused = assigner
        .assign(&Generic::object(), &int, Typing::Static)
        .unwrap();
    assert!(!refused.is_valid());

    let manipulation = assigner
        .assign(&Generic::object(), &int, Typing::Dynamic)
        .unwrap();
    assert!(manipulation.is_valid());
    let (instructions, size) = emit(&manipulation);
    assert_eq!(
        instructions.instructions(),
        &[
            Instruction::Type {
                opcode: Opcode::Checkcast,
                internal_name: "java/lang/Integer".to_string(),
            },
            method(Opcode::Invokevirtual, "java/lang/Integer", "intValue", "()I"),
        ]
    );
    assert_eq!(size, Ok(Size::new(0, 1)));
}

#[test]
fn unboxing_a_wrapper_widens_afterwards() {
    let manipulation = assigner()
        .assign(
            &Generic::class("java.lang.Integer"),
            &primitive(PrimitiveKind::Long),
            Typing::Static,
        )
        .unwrap();
    let (instructions, size) = emit(&manipulation);
    assert_eq!(
        instructions.opcodes(),
        vec![Opcode::Invokevirtual, Opcode::I2L]
    );
    assert_eq!(size, Ok(Size::new(1, 1)));

    let narrowing = assigner()
        .assign(
            &Generic::class("java.lang.Long"),
            &primitive(PrimitiveKind::Int),
            Typing::Dynamic,
        )
        .unwrap();
    assert!(!narrowing.is_valid());
}

#[test]
fn narrowing_is_invalid_in_both_modes() {
    let assigner = assigner();
    for typing in [Typing::Static, Typing::Dynamic] {
        let manipulation = assigner
            .assign(
                &primitive(PrimitiveKind::Long),
                &primitive(PrimitiveKind::Int),
                typing,
            )
            .unwrap();
        assert!(!manipulation.is_valid());
        let (instructions, size) = emit(&manipulation);
        assert!(instructions.is_empty());
        assert!(matches!(size, Err(Error::IllegalManipulation { .. })));
    }
}

#[test]
fn widening_emits_conversion_instructions() {
    let assigner = assigner();
    let cases = [
        (PrimitiveKind::Int, PrimitiveKind::Long, vec![Opcode::I2L], Size::new(1, 1)),
        (PrimitiveKind::Long, PrimitiveKind::Float, vec![Opcode::L2F], Size::new(-1, 0)),
        (PrimitiveKind::Float, PrimitiveKind::Double, vec![Opcode::F2D], Size::new(1, 1)),
        (PrimitiveKind::Byte, PrimitiveKind::Short, vec![], Size::ZERO),
        (PrimitiveKind::Char, PrimitiveKind::Int, vec![], Size::ZERO),
    ];
    for (source, target, opcodes, expected) in cases {
        let manipulation = assigner
            .assign(&primitive(source), &primitive(target), Typing::Static)
            .unwrap();
        let (instructions, size) = emit(&manipulation);
        assert_eq!(instructions.opcodes(), opcodes, "{source} -> {target}");
        assert_eq!(size, Ok(expected), "{source} -> {target}");
    }
    for (source, target) in [
        (PrimitiveKind::Byte, PrimitiveKind::Char),
        (PrimitiveKind::Char, PrimitiveKind::Short),
        (PrimitiveKind::Boolean, PrimitiveKind::Int),
    ] {
        let manipulation = assigner
            .assign(&primitive(source), &primitive(target), Typing::Dynamic)
            .unwrap();
        assert!(!manipulation.is_valid(), "{source} -> {target}");
    }
}

#[test]
fn void_results_are_dropped_or_refused() {
    let assigner = assigner();
    let void = Generic::void();
    assert!(assigner.assign(&void, &void, Typing::Static).unwrap().is_valid());
    assert!(!assigner
        .assign(&void, &primitive(PrimitiveKind::Int), Typing::Dynamic)
        .unwrap()
        .is_valid());

    let (instructions, size) = emit(
        &assigner
            .assign(&primitive(PrimitiveKind::Long), &void, Typing::Static)
            .unwrap(),
    );
    assert_eq!(instructions.opcodes(), vec![Opcode::Pop2]);
    assert_eq!(size, Ok(Size::new(-2, 0)));

    let (instructions, _) = emit(
        &assigner
            .assign(&list(Generic::string()), &void, Typing::Static)
            .unwrap(),
    );
    assert_eq!(instructions.opcodes(), vec![Opcode::Pop]);
}

#[test]
fn void_can_synthesize_default_values() {
    let config = AssignerConfig::default().with_void_handling(VoidHandling::DefaultValue);
    let assigner = DefaultAssigner::with_config(pool(), config);
    let (instructions, size) = emit(
        &assigner
            .assign(&Generic::void(), &primitive(PrimitiveKind::Int), Typing::Static)
            .unwrap(),
    );
    assert_eq!(instructions.opcodes(), vec![Opcode::Iconst0]);
    assert_eq!(size, Ok(Size::new(1, 1)));

    let (instructions, _) = emit(
        &assigner
            .assign(&Generic::void(), &list(Generic::string()), Typing::Static)
            .unwrap(),
    );
    assert_eq!(instructions.opcodes(), vec![Opcode::AconstNull]);
}

#[test]
fn erased_mode_ignores_type_arguments() {
    let config = AssignerConfig::default().with_generics(GenericsMode::Erased);
    let erased = DefaultAssigner::with_config(pool(), config);
    let source = list(Generic::string());
    let target = list(Generic::object());
    assert!(erased.assign(&source, &target, Typing::Static).unwrap().is_valid());
    assert!(!assigner()
        .assign(&source, &target, Typing::Static)
        .unwrap()
        .is_valid());
}

#[test]
fn config_deserializes_with_defaults() {
    let config: AssignerConfig =
        serde_json::from_str(r#"{"void_handling":"default_value"}"#).unwrap();
    assert_eq!(
        config,
        AssignerConfig {
            void_handling: VoidHandling::DefaultValue,
            generics: GenericsMode::Aware,
        }
    );
    assert_eq!(
        serde_json::to_string(&AssignerConfig::default()).unwrap(),
        r#"{"void_handling":"strict","generics":"aware"}"#
    );
}

#[test]
fn typing_from_flag() {
    assert_eq!(Typing::of(true), Typing::Dynamic);
    assert!(!Typing::of(false).is_dynamic());
}

#[test]
fn equal_types_only_and_refusing() {
    let string = Generic::string();
    let semantic = EqualTypesOnly::Semantic;
    assert!(semantic.assign(&string, &string, Typing::Static).unwrap().is_valid());
    assert!(!semantic
        .assign(&string, &Generic::object(), Typing::Dynamic)
        .unwrap()
        .is_valid());

    let erasure = EqualTypesOnly::Erasure(pool());
    assert!(erasure
        .assign(&list(Generic::string()), &list(Generic::object()), Typing::Static)
        .unwrap()
        .is_valid());
    assert!(!semantic
        .assign(&list(Generic::string()), &list(Generic::object()), Typing::Static)
        .unwrap()
        .is_valid());

    assert!(!Refusing.assign(&string, &string, Typing::Dynamic).unwrap().is_valid());
}

#[test]
fn every_primitive_round_trips_through_its_wrapper() {
    use strum::IntoEnumIterator;

    let assigner = assigner();
    for kind in PrimitiveKind::iter() {
        let primitive = primitive(kind);
        let wrapper = Generic::class(kind.wrapper_name());
        for typing in [Typing::Static, Typing::Dynamic] {
            let identity = assigner.assign(&primitive, &primitive, typing).unwrap();
            let (instructions, size) = emit(&identity);
            assert!(instructions.is_empty(), "{kind}");
            assert_eq!(size, Ok(Size::ZERO), "{kind}");
        }

        let boxing = assigner.assign(&primitive, &wrapper, Typing::Static).unwrap();
        assert!(boxing.is_valid(), "{kind}");
        assert_eq!(boxing.as_compound().map(|c| c.len()), Some(2), "{kind}");

        let unboxing = assigner.assign(&wrapper, &primitive, Typing::Static).unwrap();
        assert!(unboxing.is_valid(), "{kind}");
        let (instructions, _) = emit(&unboxing);
        assert_eq!(
            instructions.instructions(),
            &[method(
                Opcode::Invokevirtual,
                &kind.wrapper_name().replace('.', "/"),
                kind.unboxing_method(),
                &format!("(){}", kind.descriptor_char()),
            )]
        );
    }
}
