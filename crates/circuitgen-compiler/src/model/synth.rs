//! Signature fragments: the pieces of Go source the wrapper template splices
//! around each method.
//!
//! Parameters are named positionally (`p0`, `p1`, ...) unless overridden;
//! results are bound to `r0`, `r1`, ... with the trailing `error` bound to `err`.

use std::fmt::Write;

use serde::Serialize;

use super::Method;

/// Name the wrapping closure gives its context argument.
pub const CONTEXT_VAR: &str = "ctx";

/// All fragments of one method, as shown by `inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragments {
    pub params_signature: String,
    pub call_signature_with_closure: String,
    pub call_signature: String,
    pub results_signature: String,
    pub results_closure_variable_declarations: String,
    pub has_one_method_result_variable: bool,
    pub results_circuit_variable_assignments: String,
    pub results_closure_variable_returns: String,
    pub is_wrapping_supported: bool,
}

impl Method {
    fn is_variadic_slot(&self, i: usize) -> bool {
        self.variadic && i + 1 == self.params.len()
    }

    /// Results bound to `rI` variables: all but the last.
    fn bound_results(&self) -> usize {
        self.results.len().saturating_sub(1)
    }

    /// `p0 context.Context, p1 int, p2 ...string`, with `overrides` replacing
    /// the leading positional names.
    pub fn params_signature(&self, overrides: &[&str]) -> String {
        let mut out = String::new();
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            match overrides.get(i) {
                Some(name) => out.push_str(name),
                None => {
                    write!(out, "p{i}").expect("String write never fails");
                }
            }
            out.push(' ');
            if self.is_variadic_slot(i) {
                let elem = param.name.strip_prefix("[]").unwrap_or(&param.name);
                write!(out, "...{elem}").expect("String write never fails");
            } else {
                out.push_str(&param.name);
            }
        }
        out
    }

    /// Arguments passed to the wrapped method from inside the circuit closure.
    ///
    /// The first argument is the closure's own context unless it is also the
    /// variadic one, in which case the spread wins.
    pub fn call_signature_with_closure(&self) -> String {
        self.call_arguments(Some(CONTEXT_VAR))
    }

    /// Positional arguments for a plain delegating call.
    pub fn call_signature(&self) -> String {
        self.call_arguments(None)
    }

    fn call_arguments(&self, first: Option<&str>) -> String {
        let mut out = String::new();
        for i in 0..self.params.len() {
            if i > 0 {
                out.push_str(", ");
            }
            if self.is_variadic_slot(i) {
                write!(out, "p{i}...").expect("String write never fails");
            } else if let (0, Some(name)) = (i, first) {
                out.push_str(name);
            } else {
                write!(out, "p{i}").expect("String write never fails");
            }
        }
        out
    }

    /// `error`, `(*model.Result, error)` or the empty string.
    pub fn results_signature(&self) -> String {
        match self.results.as_slice() {
            [] => String::new(),
            [only] => only.name.clone(),
            results => {
                let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
                format!("({})", names.join(", "))
            }
        }
    }

    /// `var r0 T` lines for the results the closure assigns.
    pub fn results_closure_variable_declarations(&self) -> String {
        let mut out = String::new();
        for (i, result) in self.results[..self.bound_results()].iter().enumerate() {
            writeln!(out, "var r{i} {}", result.name).expect("String write never fails");
        }
        out
    }

    pub fn has_one_method_result_variable(&self) -> bool {
        self.results.len() == 1
    }

    /// Left-hand side of the wrapped call inside the closure: `r0, r1, err`.
    pub fn results_circuit_variable_assignments(&self) -> String {
        let mut out = self.results_closure_variable_returns();
        out.push_str("err");
        out
    }

    /// Result variables returned by the wrapper ahead of `err`: `r0, r1, `.
    pub fn results_closure_variable_returns(&self) -> String {
        let mut out = String::new();
        for i in 0..self.bound_results() {
            write!(out, "r{i}, ").expect("String write never fails");
        }
        out
    }

    /// A method can run inside a circuit when it takes a context first and
    /// returns an error last.
    pub fn is_wrapping_supported(&self) -> bool {
        let (Some(first), Some(last)) = (self.params.first(), self.results.last()) else {
            return false;
        };
        first.name.ends_with("Context") && last.name == "error"
    }

    pub fn fragments(&self) -> Fragments {
        Fragments {
            params_signature: self.params_signature(&[]),
            call_signature_with_closure: self.call_signature_with_closure(),
            call_signature: self.call_signature(),
            results_signature: self.results_signature(),
            results_closure_variable_declarations: self.results_closure_variable_declarations(),
            has_one_method_result_variable: self.has_one_method_result_variable(),
            results_circuit_variable_assignments: self.results_circuit_variable_assignments(),
            results_closure_variable_returns: self.results_closure_variable_returns(),
            is_wrapping_supported: self.is_wrapping_supported(),
        }
    }
}
