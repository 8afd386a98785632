use std::fs;

use super::gomod::{find_module, parse_module_directive, resolve_module_path};
use crate::Error;
use crate::test_utils::{GoModuleFixture, MODULE};

#[test]
fn module_directive_forms() {
    assert_eq!(
        parse_module_directive("module example.com/app\n\ngo 1.21\n").as_deref(),
        Some("example.com/app")
    );
    assert_eq!(
        parse_module_directive("// comment\nmodule \"example.com/quoted\" // trailing\n").as_deref(),
        Some("example.com/quoted")
    );
    assert_eq!(
        parse_module_directive("go 1.21\nmodule\tgithub.com/acme/tool/v3\n").as_deref(),
        Some("github.com/acme/tool/v3")
    );
}

#[test]
fn module_directive_missing() {
    assert_eq!(parse_module_directive("go 1.21\n"), None);
    assert_eq!(parse_module_directive("modules example.com/x\n"), None);
    assert_eq!(parse_module_directive("// module example.com/x\n"), None);
}

#[test]
fn find_module_walks_up() {
    let fixture = GoModuleFixture::new(MODULE).file("a/b/c.go", "package b\n");
    let module = find_module(&fixture.path("a/b")).unwrap();
    assert_eq!(module.path, MODULE);
    assert_eq!(module.root, fixture.root());
    assert_eq!(
        module.import_path(&fixture.path("a/b")).as_deref(),
        Some("example.com/app/a/b")
    );
    assert_eq!(module.import_path(fixture.root()).as_deref(), Some(MODULE));
}

#[test]
fn nested_module_wins() {
    let fixture = GoModuleFixture::new(MODULE).file("tools/go.mod", "module example.com/tools\n");
    let module = find_module(&fixture.path("tools/gen")).unwrap();
    assert_eq!(module.path, "example.com/tools");
}

#[test]
fn dir_of_module_and_vendor() {
    let fixture = GoModuleFixture::new(MODULE)
        .file("vendor/github.com/cep21/circuit/circuit.go", "package circuit\n");
    let module = find_module(fixture.root()).unwrap();

    assert_eq!(module.dir_of(MODULE), Some(fixture.root().to_path_buf()));
    assert_eq!(
        module.dir_of("example.com/app/svc"),
        Some(fixture.path("svc"))
    );
    assert_eq!(
        module.dir_of("github.com/cep21/circuit"),
        Some(fixture.path("vendor/github.com/cep21/circuit"))
    );
    assert_eq!(module.dir_of("context"), None);
    assert_eq!(module.dir_of("example.com/application"), None);
    assert!(module.contains("example.com/app/svc"));
    assert!(!module.contains("example.com/application"));
}

#[test]
fn resolve_module_path_of_future_file() {
    let fixture = GoModuleFixture::new(MODULE);
    fs::create_dir_all(fixture.path("svc")).unwrap();

    let path = resolve_module_path(&fixture.path("svc/circuit/publisher.gen.go")).unwrap();
    assert_eq!(path, "example.com/app/svc/circuit");

    let path = resolve_module_path(&fixture.path("svc/../model")).unwrap();
    assert_eq!(path, "example.com/app/model");
}

#[test]
fn resolve_module_path_strips_vendor() {
    let fixture = GoModuleFixture::new(MODULE);
    let path = resolve_module_path(&fixture.path("vendor/github.com/acme/lib")).unwrap();
    assert_eq!(path, "github.com/acme/lib");
}

#[test]
fn missing_go_mod_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = find_module(&dir.path().join("pkg")).unwrap_err();
    assert!(matches!(err, Error::PackageLoad { .. }));
    assert!(err.to_string().contains("no go.mod found"));
}
