use cf_assign::{Assigner, DefaultAssigner, Typing};
use cf_bytecode::StackManipulation;
use cf_core::types::{Generic, PrimitiveKind, TypeDescription, TypePool};
use cf_core::Error;
use cf_instrumented::{FieldToken, InstrumentedType, MethodToken, ModifierSet, TargetType};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn base() -> InstrumentedType {
    InstrumentedType::new(Generic::object())
}

fn field(name: &str, field_type: Generic) -> FieldToken {
    FieldToken::new(name, field_type, ModifierSet::PRIVATE)
}

fn names(ty: &InstrumentedType) -> Vec<&str> {
    ty.fields().map(|field| field.name.as_str()).collect()
}

#[test]
fn duplicate_field_names_fail() {
    let ty = base().with_field(field("value", Generic::string())).unwrap();
    let err = ty
        .with_field(field("value", Generic::primitive(PrimitiveKind::Int)))
        .unwrap_err();
    assert_eq!(
        err,
        Error::DuplicateMember {
            kind: "field",
            name: "value".to_string()
        }
    );
}

#[test]
fn distinct_fields_keep_insertion_order() {
    let ty = base()
        .with_field(field("first", Generic::string()))
        .and_then(|ty| ty.with_field(field("second", Generic::object())))
        .and_then(|ty| ty.with_field(field("third", Generic::primitive(PrimitiveKind::Long))))
        .unwrap();
    assert_eq!(names(&ty), vec!["first", "second", "third"]);
}

#[test]
fn branching_builders_do_not_alias() {
    let shared = base().with_field(field("shared", Generic::string())).unwrap();
    let left = shared.with_field(field("left", Generic::string())).unwrap();
    let right = shared.with_field(field("right", Generic::string())).unwrap();
    assert_eq!(names(&shared), vec!["shared"]);
    assert_eq!(names(&left), vec!["shared", "left"]);
    assert_eq!(names(&right), vec!["shared", "right"]);
    // The same name is free again on the other branch.
    assert!(right.with_field(field("left", Generic::object())).is_ok());
}

#[test]
fn overloads_are_allowed_but_not_duplicate_signatures() {
    let int = Generic::primitive(PrimitiveKind::Int);
    let run = |parameters: Vec<Generic>| {
        MethodToken::new("run", Generic::void(), parameters, ModifierSet::PUBLIC)
    };
    let ty = base()
        .with_method(run(Vec::new()))
        .and_then(|ty| ty.with_method(run(vec![int.clone()])))
        .unwrap();
    assert_eq!(ty.methods().count(), 2);
    let err = ty
        .with_method(MethodToken::new(
            "run",
            Generic::string(),
            vec![int],
            ModifierSet::PUBLIC,
        ))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateMember { kind: "method", .. }));
}

#[test]
fn resolving_requires_a_name() {
    let err = base().resolve(&TypePool::system()).unwrap_err();
    assert!(matches!(err, Error::Unresolved { .. }));
}

#[test]
fn placeholder_is_replaced_everywhere() {
    let target = TargetType::generic();
    let list_of_self = Generic::parameterized(
        TypeDescription::class("java.util.List"),
        vec![Generic::upper_bounded(target.clone())],
    );
    let ty = base()
        .with_interface(Generic::parameterized(
            TypeDescription::class("java.lang.Comparable"),
            vec![target.clone()],
        ))
        .with_field(field("next", target.clone()))
        .and_then(|ty| ty.with_field(field("peers", list_of_self)))
        .and_then(|ty| ty.with_field(field("grid", Generic::array(Generic::array(target.clone())))))
        .and_then(|ty| {
            ty.with_method(MethodToken::new(
                "compareTo",
                Generic::primitive(PrimitiveKind::Int),
                vec![target.clone()],
                ModifierSet::PUBLIC,
            ))
        })
        .unwrap()
        .with_name("demo.Node");
    assert!(TargetType::occurs_in(&ty.fields().next().unwrap().field_type));

    let resolved = ty.resolve(&TypePool::system()).unwrap();
    assert_eq!(resolved.description().name(), "demo.Node");
    assert_eq!(resolved.field("next").unwrap().descriptor, "Ldemo/Node;");
    assert_eq!(resolved.field("next").unwrap().signature, None);
    let peers = resolved.field("peers").unwrap();
    assert_eq!(peers.descriptor, "Ljava/util/List;");
    assert_eq!(
        peers.signature.as_deref(),
        Some("Ljava/util/List<+Ldemo/Node;>;")
    );
    assert_eq!(resolved.field("grid").unwrap().descriptor, "[[Ldemo/Node;");
    assert!(resolved
        .fields
        .iter()
        .all(|field| !TargetType::occurs_in(&field.field_type)));
    assert_eq!(resolved.methods[0].descriptor.to_string(), "(Ldemo/Node;)I");
    assert_eq!(
        resolved.signature.as_deref(),
        Some("Ljava/lang/Object;Ljava/lang/Comparable<Ldemo/Node;>;")
    );
}

#[test]
fn type_variables_erase_to_their_bounds() {
    let variable = InstrumentedType::variable("T");
    let comparable = Generic::parameterized(
        TypeDescription::class("java.lang.Comparable"),
        vec![variable.clone()],
    );
    let ty = base()
        .with_type_variable("T", vec![comparable])
        .and_then(|ty| ty.with_field(field("value", variable.clone())))
        .and_then(|ty| ty.with_field(field("values", Generic::array(variable.clone()))))
        .unwrap()
        .with_name("demo.Box");
    assert!(matches!(
        ty.with_type_variable("T", Vec::new()),
        Err(Error::DuplicateMember { .. })
    ));

    let resolved = ty.resolve(&TypePool::system()).unwrap();
    let value = resolved.field("value").unwrap();
    assert_eq!(value.descriptor, "Ljava/lang/Comparable;");
    assert_eq!(value.signature.as_deref(), Some("TT;"));
    assert_eq!(
        resolved.field("values").unwrap().descriptor,
        "[Ljava/lang/Comparable;"
    );
    assert_eq!(
        resolved.signature.as_deref(),
        Some("<T::Ljava/lang/Comparable<TT;>;>Ljava/lang/Object;")
    );
}

#[test]
fn resolved_types_can_be_registered_for_assignment() {
    let pool = Arc::new(TypePool::system());
    let resolved = base()
        .with_interface(Generic::class("java.io.Serializable"))
        .with_name("demo.Generated")
        .resolve(&pool)
        .unwrap();
    pool.define(resolved.definition().clone()).unwrap();

    let assigner = DefaultAssigner::new(pool);
    let generated = Generic::NonGeneric(resolved.description().clone());
    let manipulation = assigner
        .assign(&generated, &Generic::class("java.io.Serializable"), Typing::Static)
        .unwrap();
    assert!(manipulation.is_valid());
    let manipulation = assigner
        .assign(&generated, &Generic::string(), Typing::Static)
        .unwrap();
    assert!(!manipulation.is_valid());
}
