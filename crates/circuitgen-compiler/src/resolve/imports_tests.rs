use circuitgen_core::types::{BasicKind, ChanDir, Signature, TypeShape, Var};

use crate::Error;
use crate::model::Import;
use crate::resolve::{MethodSelection, resolve_imports};

const OUT: &str = "example.com/app/gen";
const SVC: &str = "example.com/app/svc";
const MODEL: &str = "example.com/app/model";

fn selection(name: &str, params: Vec<TypeShape>, results: Vec<TypeShape>) -> MethodSelection {
    MethodSelection {
        name: name.to_owned(),
        ty: TypeShape::Signature(Signature {
            params: params.into_iter().map(Var::unnamed).collect(),
            results: results.into_iter().map(Var::unnamed).collect(),
            variadic: false,
        }),
        depth: 0,
    }
}

fn context() -> TypeShape {
    TypeShape::named("context", "Context")
}

fn paths(imports: &[Import]) -> Vec<&str> {
    imports.iter().map(|i| i.path.as_str()).collect()
}

fn getter() -> MethodSelection {
    selection(
        "Get",
        vec![context(), TypeShape::Basic(BasicKind::String)],
        vec![
            TypeShape::pointer(TypeShape::named(MODEL, "Result")),
            TypeShape::error(),
        ],
    )
}

#[test]
fn result_package_appears_once() {
    let ty = TypeShape::named(SVC, "Store");
    let methods = vec![getter(), getter()];

    let imports = resolve_imports(&ty, &methods, OUT).unwrap();
    assert_eq!(paths(&imports), vec!["context", MODEL, SVC]);
}

#[test]
fn output_package_is_never_imported() {
    let ty = TypeShape::named(SVC, "Store");
    let methods = vec![
        getter(),
        selection("Put", vec![TypeShape::named(SVC, "Item")], vec![TypeShape::error()]),
    ];

    let imports = resolve_imports(&ty, &methods, SVC).unwrap();
    assert_eq!(paths(&imports), vec!["context", MODEL]);

    let imports = resolve_imports(&ty, &methods, MODEL).unwrap();
    assert_eq!(paths(&imports), vec!["context", SVC]);
}

#[test]
fn resolution_is_idempotent() {
    let ty = TypeShape::named(SVC, "Store");
    let methods = vec![getter()];
    let first = resolve_imports(&ty, &methods, OUT).unwrap();
    let second = resolve_imports(&ty, &methods, OUT).unwrap();
    assert_eq!(first, second);
}

#[test]
fn composite_shapes_are_walked_in_order() {
    let ty = TypeShape::named(SVC, "Store");
    let map = TypeShape::map(
        TypeShape::named("example.com/app/keys", "Key"),
        TypeShape::slice(TypeShape::named("example.com/app/values", "Value")),
    );
    let array = TypeShape::Array {
        len: "4".to_owned(),
        elem: Box::new(TypeShape::named("example.com/app/arr", "Elem")),
    };
    let callback = TypeShape::Signature(Signature {
        params: vec![Var::unnamed(TypeShape::named("example.com/app/cb", "Event"))],
        results: Vec::new(),
        variadic: false,
    });
    let methods = vec![selection("Scan", vec![map, array, callback], Vec::new())];

    let imports = resolve_imports(&ty, &methods, OUT).unwrap();
    assert_eq!(
        paths(&imports),
        vec![
            "example.com/app/keys",
            "example.com/app/values",
            "example.com/app/arr",
            "example.com/app/cb",
            SVC,
        ]
    );
}

#[test]
fn literals_and_predeclared_add_nothing() {
    let ty = TypeShape::named(SVC, "Store");
    let methods = vec![selection(
        "Any",
        vec![
            TypeShape::Interface(Default::default()),
            TypeShape::Struct(Default::default()),
            TypeShape::error(),
        ],
        Vec::new(),
    )];

    let imports = resolve_imports(&ty, &methods, SVC).unwrap();
    assert!(imports.is_empty());
}

#[test]
fn vendored_paths_are_stripped() {
    let ty = TypeShape::named(SVC, "Store");
    let methods = vec![selection(
        "Dial",
        vec![TypeShape::named("example.com/app/vendor/github.com/acme/net", "Conn")],
        Vec::new(),
    )];

    let imports = resolve_imports(&ty, &methods, SVC).unwrap();
    assert_eq!(paths(&imports), vec!["github.com/acme/net"]);
}

#[test]
fn channels_are_unsupported() {
    let ty = TypeShape::named(SVC, "Store");
    let chan = TypeShape::Chan {
        dir: ChanDir::Recv,
        elem: Box::new(TypeShape::Basic(BasicKind::Int)),
    };
    let methods = vec![getter(), selection("Watch", Vec::new(), vec![chan])];

    let err = resolve_imports(&ty, &methods, OUT).unwrap_err();
    assert!(matches!(err, Error::UnsupportedTypeShape { .. }));
    assert_eq!(
        err.to_string(),
        "resolving imports of Store.Watch: unsupported type <-chan int"
    );
}

#[test]
fn type_parameters_are_unsupported() {
    let ty = TypeShape::named(SVC, "Store");
    let methods = vec![selection("Put", vec![TypeShape::TypeParam("T".to_owned())], Vec::new())];

    let err = resolve_imports(&ty, &methods, OUT).unwrap_err();
    assert_eq!(err.to_string(), "resolving imports of Store.Put: unsupported type T");
}
