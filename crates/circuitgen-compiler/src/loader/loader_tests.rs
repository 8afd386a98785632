use indoc::indoc;

use crate::Error;
use crate::diagnostics::DiagnosticKind;
use crate::loader::{first_package_error, load_packages};
use crate::test_utils::{GoModuleFixture, MODULE, pkg};

#[test]
fn loads_in_module_dependencies_first() {
    let fixture = GoModuleFixture::sample();
    let result = fixture.load(&["svc"]);

    let order: Vec<&str> = result.packages.keys().map(String::as_str).collect();
    assert_eq!(
        order,
        vec!["example.com/app/model", "example.com/app/rep", "example.com/app/svc"]
    );
    assert_eq!(result.roots, vec![pkg("svc")]);

    let svc = result.package(&pkg("svc")).unwrap();
    assert_eq!(svc.name, "svc");
    assert_eq!(svc.files.len(), 2);
    assert_eq!(
        svc.imports,
        vec![
            "context".to_owned(),
            "example.com/app/model".to_owned(),
            "example.com/app/rep".to_owned(),
        ]
    );
    assert!(svc.diagnostics.is_empty());
    assert!(first_package_error(&result).is_none());
}

#[test]
fn external_imports_are_opaque() {
    let result = GoModuleFixture::sample().load(&["svc"]);
    let context = result.universe.package("context").unwrap();
    assert!(context.opaque);
    assert_eq!(context.name, "context");
    assert!(result.package("context").is_none());
}

#[test]
fn vendored_packages_are_loaded() {
    let fixture = GoModuleFixture::new(MODULE)
        .file(
            "vendor/github.com/acme/lib/lib.go",
            "package lib\n\ntype Client struct{}\n",
        )
        .file(
            "svc/svc.go",
            indoc! {r#"
                package svc

                import "github.com/acme/lib"

                type Service struct {
                	*lib.Client
                }
            "#},
        );
    let result = fixture.load(&["svc"]);

    let lib = result.universe.package("github.com/acme/lib").unwrap();
    assert!(!lib.opaque);
    assert!(lib.get("Client").is_some());
}

#[test]
fn package_name_comes_from_clause() {
    let fixture = GoModuleFixture::new(MODULE)
        .file("api/v2/api.go", "package api\n\ntype T struct{}\n")
        .file(
            "svc/svc.go",
            "package svc\n\nimport \"example.com/app/api/v2\"\n\ntype S struct {\n\tT api.T\n}\n",
        );
    let result = fixture.load(&["svc"]);

    assert_eq!(result.universe.package_name(&pkg("api/v2")), "api");
    assert!(result.package(&pkg("svc")).unwrap().diagnostics.is_empty());
}

#[test]
fn test_files_and_ignored_files_are_skipped() {
    let fixture = GoModuleFixture::new(MODULE)
        .file("p/p.go", "package p\n\ntype T struct{}\n")
        .file("p/p_test.go", "package p_test\n\ntype X struct{}\n")
        .file("p/gen.go", "//go:build ignore\n\npackage main\n");
    let result = fixture.load(&["p"]);

    let p = result.package(&pkg("p")).unwrap();
    assert_eq!(p.files.len(), 1);
    assert!(p.diagnostics.is_empty());
}

#[test]
fn unresolved_in_module_import() {
    let fixture = GoModuleFixture::new(MODULE).file(
        "p/p.go",
        "package p\n\nimport \"example.com/app/missing\"\n\ntype T struct{}\n",
    );
    let result = fixture.load(&["p"]);

    let diagnostics = &result.package(&pkg("p")).unwrap().diagnostics;
    let first = diagnostics.first_error().unwrap();
    assert_eq!(first.kind(), DiagnosticKind::UnresolvedImport);
    assert_eq!(first.message(), "could not import \"example.com/app/missing\"");
}

#[test]
fn mismatched_package_names() {
    let fixture = GoModuleFixture::new(MODULE)
        .file("p/a.go", "package p\n")
        .file("p/b.go", "package q\n");
    let result = fixture.load(&["p"]);

    let p = result.package(&pkg("p")).unwrap();
    assert_eq!(p.name, "p");
    let first = p.diagnostics.first_error().unwrap();
    assert_eq!(first.kind(), DiagnosticKind::PackageNameMismatch);
    assert_eq!(
        first.message(),
        "mismatched package names: p (a.go) and q (b.go)"
    );
}

#[test]
fn duplicate_declarations() {
    let fixture = GoModuleFixture::new(MODULE)
        .file("p/a.go", "package p\n\ntype T struct{}\n\nfunc (T) M() {}\n")
        .file("p/b.go", "package p\n\ntype T int\n\nfunc (T) M() {}\n");
    let result = fixture.load(&["p"]);

    let p = result.package(&pkg("p")).unwrap();
    let messages: Vec<_> = p.diagnostics.iter().map(|d| d.message().to_owned()).collect();
    assert_eq!(
        messages,
        vec![
            "T redeclared in this package".to_owned(),
            "method T.M redeclared in this package".to_owned(),
        ]
    );

    let decl = result.universe.package(&pkg("p")).unwrap().get("T").unwrap();
    assert!(matches!(decl.ty, circuitgen_core::TypeShape::Struct(_)));
    assert_eq!(decl.methods.len(), 1);
}

#[test]
fn first_error_visits_dependencies_first() {
    let fixture = GoModuleFixture::new(MODULE)
        .file("dep/dep.go", "package dep\n\ntype D Missing\n")
        .file(
            "p/p.go",
            "package p\n\nimport \"example.com/app/dep\"\n\ntype T struct {\n\tD dep.D\n\tX Unknown\n}\n",
        );
    let result = fixture.load(&["p"]);

    let err = first_package_error(&result).unwrap();
    let Error::PackageSemantic { package, message } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(package, &pkg("dep"));
    assert!(message.ends_with("dep.go:3:8: undefined: Missing"), "{message}");
    assert!(err.to_string().starts_with("loading package example.com/app/dep: "));
}

#[test]
fn missing_directory() {
    let fixture = GoModuleFixture::new(MODULE);
    let err = load_packages(&[fixture.path("nope")]).unwrap_err();
    assert!(matches!(err, Error::PackageLoad { .. }));
    assert!(err.to_string().contains("no such directory"));
}

#[test]
fn directory_without_go_files() {
    let fixture = GoModuleFixture::new(MODULE).file("p/README.md", "hello\n");
    let err = load_packages(&[fixture.path("p")]).unwrap_err();
    assert!(err.to_string().ends_with("no Go files"), "{err}");
}

#[test]
fn same_root_twice_loads_once() {
    let fixture = GoModuleFixture::sample();
    let result = fixture.load(&["svc", "svc"]);
    assert_eq!(result.roots.len(), 2);
    assert_eq!(result.roots().count(), 2);
    assert_eq!(result.packages.len(), 3);
}
