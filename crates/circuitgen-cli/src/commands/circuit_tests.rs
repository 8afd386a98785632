use std::fs;
use std::path::{Path, PathBuf};

use indoc::indoc;
use tempfile::TempDir;

use super::CliError;
use super::circuit::{CircuitArgs, OutputTarget, run};
use super::inspect::Inspection;
use super::workspace::{Workspace, output_package_name};

const AGGREGATOR_GO: &str = indoc! {r#"
    package svc

    import "context"

    type Aggregator struct {
    	sum int
    }

    func (a *Aggregator) IncSum(ctx context.Context, v int) error {
    	a.sum += v
    	return nil
    }

    func (a Aggregator) Sum() int {
    	return a.sum
    }
"#};

fn module() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("go.mod"), "module example.com/app\n").unwrap();
    fs::create_dir_all(dir.path().join("svc")).unwrap();
    fs::write(dir.path().join("svc/aggregator.go"), AGGREGATOR_GO).unwrap();
    dir
}

fn args(root: &Path, names: &[&str], out: PathBuf) -> CircuitArgs {
    CircuitArgs {
        pkg: root.join("svc"),
        names: names.iter().map(|n| (*n).to_owned()).collect(),
        out,
        alias: None,
        circuit_major_version: 2,
        keep_going: false,
        color: false,
    }
}

#[test]
fn output_target_file_or_dir() {
    assert_eq!(
        OutputTarget::new(Path::new("w/agg.go"), 1).unwrap(),
        OutputTarget::File(PathBuf::from("w/agg.go"))
    );
    assert_eq!(
        OutputTarget::new(Path::new("w"), 1).unwrap(),
        OutputTarget::Dir(PathBuf::from("w"))
    );

    let dir = OutputTarget::new(Path::new("w"), 2).unwrap();
    assert_eq!(dir.file_for("DynamoDB"), PathBuf::from("w/dynamodb.gen.go"));
    assert_eq!(OutputTarget::new(Path::new("agg.go"), 1).unwrap().dir(), Path::new("."));
}

#[test]
fn go_file_output_needs_single_type() {
    let root = module();
    let out = root.path().join("wrapper.go");
    let err = run(args(root.path(), &["Aggregator", "Publisher"], out.clone())).unwrap_err();
    assert!(matches!(err, CliError::FileWithSeveralTypes { count: 2, .. }));
    assert!(err.to_string().ends_with("names a single file but 2 types were given"));
    assert!(!out.exists());
}

#[test]
fn writes_wrapper_into_new_directory() {
    let root = module();
    run(args(root.path(), &["Aggregator"], root.path().join("wrappers"))).unwrap();

    let source = fs::read_to_string(root.path().join("wrappers/aggregator.gen.go")).unwrap();
    assert!(source.starts_with("// Code generated by circuitgen tool. DO NOT EDIT\n\npackage wrappers\n"));
    assert!(source.contains("\t\"example.com/app/svc\"\n"));
    assert!(source.contains("func NewCircuitWrapperAggregator(\n"));
}

#[test]
fn writes_wrapper_next_to_type() {
    let root = module();
    let out = root.path().join("svc/aggregator.gen.go");
    let mut args = args(root.path(), &["Aggregator"], out.clone());
    args.alias = Some("Agg".to_owned());
    args.circuit_major_version = 3;
    run(args).unwrap();

    let source = fs::read_to_string(out).unwrap();
    assert!(source.contains("\npackage svc\n"));
    assert!(!source.contains("example.com/app/svc"));
    assert!(source.contains("\t*Aggregator\n"));
    assert!(source.contains("type CircuitWrapperAgg struct"));
    assert!(source.contains("\t\"github.com/cep21/circuit/v3\"\n"));
}

#[test]
fn first_failure_aborts() {
    let root = module();
    let out = root.path().join("wrappers");
    let err = run(args(root.path(), &["Missing", "Aggregator"], out.clone())).unwrap_err();

    assert!(matches!(err, CliError::Generate(_)));
    assert_eq!(
        err.to_string(),
        "type Missing not found in package example.com/app/svc"
    );
    assert!(!out.join("aggregator.gen.go").exists());
}

#[test]
fn keep_going_skips_failures() {
    let root = module();
    let out = root.path().join("wrappers");
    let mut args = args(root.path(), &["Missing", "Aggregator"], out.clone());
    args.keep_going = true;

    let err = run(args).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"1 of 2 types failed");
    assert!(out.join("aggregator.gen.go").exists());
}

#[test]
fn alias_needs_single_type() {
    let root = module();
    let mut args = args(root.path(), &["A", "B"], root.path().join("w"));
    args.alias = Some("X".to_owned());
    let err = run(args).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"--alias names a single wrapper but 2 types were given");
}

#[test]
fn package_name_of_existing_files() {
    let root = module();
    let dir = root.path().join("gen");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("doc.go"), "// Package wrap has wrappers.\npackage wrap\n").unwrap();
    fs::write(dir.join("x_test.go"), "package wrap_test\n").unwrap();

    assert_eq!(output_package_name(&dir, "example.com/app/gen").unwrap(), "wrap");
    assert_eq!(
        output_package_name(&root.path().join("none"), "example.com/app/go-none.v2").unwrap(),
        "none"
    );
}

#[test]
fn inspection_json() {
    let root = module();
    let workspace = Workspace::load(&root.path().join("svc"), false).unwrap();
    let meta = workspace.resolve("Aggregator", "example.com/app/gen").unwrap();
    let json = serde_json::to_value(Inspection::new(meta)).unwrap();

    assert_eq!(json["package_name"], "svc");
    assert_eq!(json["type_info"]["name"], "svc.Aggregator");
    assert_eq!(json["imports"][1]["path"], "example.com/app/svc");
    assert_eq!(json["fragments"][0]["method"], "IncSum");
    assert_eq!(
        json["fragments"][0]["params_signature"],
        "p0 context.Context, p1 int"
    );
    assert_eq!(json["fragments"][0]["is_wrapping_supported"], true);
    assert_eq!(json["fragments"][1]["results_signature"], "int");
}
