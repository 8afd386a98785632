use super::{Method, TypeInfo};

fn ty(name: &str) -> TypeInfo {
    let bare = name.rsplit('.').next().unwrap_or(name);
    TypeInfo::new(name, bare)
}

fn method(params: &[&str], results: &[&str], variadic: bool) -> Method {
    Method {
        name: "M".to_owned(),
        params: params.iter().map(|p| ty(p)).collect(),
        results: results.iter().map(|r| ty(r)).collect(),
        variadic,
    }
}

#[test]
fn params_signature_positional() {
    let m = method(&["context.Context", "*dynamodb.Input"], &["error"], false);
    assert_eq!(m.params_signature(&[]), "p0 context.Context, p1 *dynamodb.Input");
    assert_eq!(m.params_signature(&["ctx"]), "ctx context.Context, p1 *dynamodb.Input");
}

#[test]
fn params_signature_empty() {
    let m = method(&[], &["int"], false);
    assert_eq!(m.params_signature(&[]), "");
    assert_eq!(m.call_signature(), "");
    assert_eq!(m.call_signature_with_closure(), "");
}

#[test]
fn params_signature_variadic() {
    let m = method(&["[]rep.PublishOption"], &["error"], true);
    assert_eq!(m.params_signature(&[]), "p0 ...rep.PublishOption");

    let m = method(&["context.Context", "[][]byte"], &["error"], true);
    assert_eq!(m.params_signature(&["ctx"]), "ctx context.Context, p1 ...[]byte");
}

#[test]
fn call_signatures() {
    let m = method(&["context.Context", "int", "[]string"], &["error"], true);
    assert_eq!(m.call_signature_with_closure(), "ctx, p1, p2...");
    assert_eq!(m.call_signature(), "p0, p1, p2...");

    let m = method(&["context.Context", "int"], &["error"], false);
    assert_eq!(m.call_signature_with_closure(), "ctx, p1");
}

#[test]
fn single_variadic_spread_wins_over_context() {
    let m = method(&["[]context.Context"], &["error"], true);
    assert_eq!(m.call_signature_with_closure(), "p0...");
}

#[test]
fn results_signature_shapes() {
    assert_eq!(method(&[], &[], false).results_signature(), "");
    assert_eq!(method(&[], &["error"], false).results_signature(), "error");
    assert_eq!(
        method(&[], &["*model.Result", "error"], false).results_signature(),
        "(*model.Result, error)"
    );
}

#[test]
fn closure_variables_for_one_result() {
    let m = method(&["context.Context"], &["error"], false);
    assert!(m.has_one_method_result_variable());
    assert_eq!(m.results_closure_variable_declarations(), "");
    assert_eq!(m.results_circuit_variable_assignments(), "err");
    assert_eq!(m.results_closure_variable_returns(), "");
}

#[test]
fn closure_variables_for_several_results() {
    let m = method(&["context.Context"], &["*model.Result", "[]string", "error"], false);
    assert!(!m.has_one_method_result_variable());
    assert_eq!(
        m.results_closure_variable_declarations(),
        "var r0 *model.Result\nvar r1 []string\n"
    );
    assert_eq!(m.results_circuit_variable_assignments(), "r0, r1, err");
    assert_eq!(m.results_closure_variable_returns(), "r0, r1, ");
}

#[test]
fn closure_variables_without_results() {
    let m = method(&["context.Context"], &[], false);
    assert_eq!(m.results_closure_variable_declarations(), "");
    assert_eq!(m.results_closure_variable_returns(), "");
}

#[test]
fn wrapping_support() {
    assert!(method(&["context.Context", "int"], &["error"], false).is_wrapping_supported());
    assert!(method(&["aws.Context"], &["*Out", "error"], false).is_wrapping_supported());
    assert!(method(&["Context"], &["error"], false).is_wrapping_supported());

    assert!(!method(&[], &["error"], false).is_wrapping_supported());
    assert!(!method(&["context.Context"], &[], false).is_wrapping_supported());
    assert!(!method(&["int", "context.Context"], &["error"], false).is_wrapping_supported());
    assert!(!method(&["context.Context"], &["error", "int"], false).is_wrapping_supported());
    assert!(!method(&["context.Context"], &["*errors.error"], false).is_wrapping_supported());
}

#[test]
fn fragments_collects_everything() {
    let m = method(&["context.Context", "int"], &["int", "error"], false);
    let fragments = m.fragments();
    assert_eq!(fragments.params_signature, "p0 context.Context, p1 int");
    assert_eq!(fragments.results_signature, "(int, error)");
    assert!(fragments.is_wrapping_supported);
    assert!(!fragments.has_one_method_result_variable);
}
