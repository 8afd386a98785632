use crate::types::{
    BasicKind, InterfaceLit, MethodDecl, NamedRef, Signature, StructLit, TypeShape, Var,
};
use crate::universe::{Package, TypeDecl, Universe};

const APP: &str = "example.com/app";

fn close_method() -> MethodDecl {
    MethodDecl::new(
        "Close",
        Signature {
            results: vec![Var::unnamed(TypeShape::error())],
            ..Signature::default()
        },
    )
}

fn sample() -> Universe {
    let closer = TypeDecl::new(
        "Closer",
        TypeShape::Interface(InterfaceLit {
            methods: vec![close_method()],
            embeds: Vec::new(),
        }),
    );
    let store = TypeDecl::new("Store", TypeShape::Struct(StructLit::default()))
        .with_methods(vec![close_method()]);
    let alias = TypeDecl {
        alias: true,
        ..TypeDecl::new("Alias", TypeShape::named(APP, "Store"))
    };
    let defined = TypeDecl::new("Handle", TypeShape::named(APP, "Closer"));
    let seed = TypeDecl::new("Seed", TypeShape::Basic(BasicKind::String));

    let mut universe = Universe::new();
    universe.insert(
        Package::new(APP, "app")
            .with_type(closer)
            .with_type(store)
            .with_type(alias)
            .with_type(defined)
            .with_type(seed),
    );
    universe
}

#[test]
fn lookup_predeclared() {
    let universe = Universe::new();
    let error = universe.lookup(&NamedRef::predeclared("error")).unwrap();
    let TypeShape::Interface(iface) = &error.ty else {
        panic!("error is not an interface");
    };
    assert_eq!(iface.methods[0].name, "Error");
    assert!(universe.lookup(&NamedRef::predeclared("int")).is_none());
}

#[test]
fn underlying_follows_defined_types() {
    let universe = sample();
    let handle = TypeShape::named(APP, "Handle");
    assert!(matches!(
        universe.underlying(&handle),
        Some(TypeShape::Interface(_))
    ));
    assert!(universe.is_interface(&handle));
    assert!(!universe.is_interface(&TypeShape::named(APP, "Seed")));
}

#[test]
fn underlying_unknown_is_none() {
    let universe = sample();
    assert!(universe.underlying(&TypeShape::named(APP, "Missing")).is_none());
    assert!(universe.underlying(&TypeShape::named("other/pkg", "T")).is_none());
}

#[test]
fn underlying_cycle_is_none() {
    let mut universe = Universe::new();
    universe.insert(
        Package::new(APP, "app")
            .with_type(TypeDecl::new("A", TypeShape::named(APP, "B")))
            .with_type(TypeDecl::new("B", TypeShape::named(APP, "A"))),
    );
    assert!(universe.underlying(&TypeShape::named(APP, "A")).is_none());
}

#[test]
fn standard_library_interfaces_of_opaque_packages() {
    let mut universe = Universe::new();
    universe.insert_opaque("context");
    assert!(universe.is_interface(&TypeShape::named("context", "Context")));
    assert!(universe.is_interface(&TypeShape::named("io", "Reader")));
    assert!(!universe.is_interface(&TypeShape::named("sync", "Mutex")));
    assert!(!universe.is_interface(&TypeShape::named("time", "Duration")));
    assert!(universe.underlying(&TypeShape::named("time", "Duration")).is_none());
}

#[test]
fn standard_library_declarations_carry_methods() {
    let universe = Universe::new();

    let io_closer = TypeShape::named("io", "Closer");
    let Some(TypeShape::Interface(closer)) = universe.underlying(&io_closer) else {
        panic!("io.Closer is not an interface");
    };
    assert_eq!(closer.methods, vec![close_method()]);

    let mutex: Vec<&str> = universe
        .declared_methods(&NamedRef::new("sync", "Mutex"))
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(mutex, vec!["Lock", "TryLock", "Unlock"]);
}

#[test]
fn loaded_package_shadows_standard_library() {
    let mut universe = Universe::new();
    universe.insert(Package::new("io", "io"));
    assert!(universe.lookup(&NamedRef::new("io", "Closer")).is_none());
}

#[test]
fn alias_shares_methods() {
    let universe = sample();
    let alias = NamedRef::new(APP, "Alias");
    let methods = universe.declared_methods(&alias);
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].name, "Close");
    assert!(universe.declared_methods(&NamedRef::new(APP, "Handle")).is_empty());
}

#[test]
fn opaque_does_not_replace_loaded() {
    let mut universe = sample();
    universe.insert_opaque(APP);
    assert!(!universe.package(APP).unwrap().opaque);
    assert_eq!(universe.package_name(APP), "app");
}

#[test]
fn package_name_falls_back_to_path() {
    let universe = Universe::new();
    assert_eq!(universe.package_name("github.com/cep21/circuit/v3"), "circuit");
}
