//! Output rendering methods.

use std::collections::BTreeSet;

use crate::model::{CONTEXT_VAR, Method};

use super::Emitter;

const HEADER: &str = "// Code generated by circuitgen tool. DO NOT EDIT";

const SHOULD_SKIP_ERROR_DOC: &str = "\t// ShouldSkipError determines whether an error should be skipped and have the circuit\n\
    \t// track the call as successful. This takes precedence over IsBadRequest\n";

impl Emitter<'_> {
    pub(super) fn emit_header(&mut self) {
        let package = if self.config.package_name.is_empty() {
            &self.meta.package_name
        } else {
            &self.config.package_name
        };
        self.output
            .push_str(&format!("{HEADER}\n\npackage {package}\n\n"));
    }

    /// Grouped import block: standard library first, then everything else.
    pub(super) fn emit_imports(&mut self) {
        let mut std = BTreeSet::new();
        let mut other = BTreeSet::new();

        let mut paths: Vec<String> = self.meta.imports.iter().map(|i| i.path.clone()).collect();
        paths.push(self.config.circuit_import_path());
        if !self.wrapped().is_empty() {
            paths.push("context".to_owned());
        }
        for path in paths {
            if is_standard_library(&path) {
                std.insert(path);
            } else {
                other.insert(path);
            }
        }

        self.output.push_str("import (\n");
        for path in &std {
            self.output.push_str(&format!("\t\"{path}\"\n"));
        }
        if !std.is_empty() && !other.is_empty() {
            self.output.push('\n');
        }
        for path in &other {
            self.output.push_str(&format!("\t\"{path}\"\n"));
        }
        self.output.push_str(")\n\n");
    }

    pub(super) fn emit_config_struct(&mut self) {
        let wrapper = self.wrapper.clone();
        self.output.push_str(&format!(
            "// {wrapper}Config contains configuration for {wrapper}. All fields are optional\n"
        ));
        self.output
            .push_str(&format!("type {wrapper}Config struct {{\n"));
        self.output.push_str(SHOULD_SKIP_ERROR_DOC);
        self.output.push_str("\tShouldSkipError func(error) bool\n\n");
        self.output.push_str(
            "\t// IsBadRequest is an optional bad request checker. It is useful to not count user errors as faults\n",
        );
        self.output.push_str("\tIsBadRequest func(error) bool\n\n");
        self.output
            .push_str("\t// Prefix is prepended to all circuit names\n");
        self.output.push_str("\tPrefix string\n\n");
        self.output.push_str(
            "\t// Defaults are used for all created circuits. Per-circuit configs override this\n",
        );
        self.output.push_str("\tDefaults circuit.Config\n");

        for method in self.wrapped() {
            let name = &method.name;
            self.output.push_str(&format!(
                "\n\t// Circuit{name} is the configuration used for the {name} circuit. This overrides values set by Defaults\n"
            ));
            self.output
                .push_str(&format!("\tCircuit{name} circuit.Config\n"));
        }
        self.output.push_str("}\n\n");
    }

    pub(super) fn emit_wrapper_struct(&mut self) {
        let wrapper = self.wrapper.clone();
        let embedded = self.embedded_type.clone();
        self.output.push_str(&format!(
            "// {wrapper} is a circuit wrapper for {embedded}\n"
        ));
        self.output.push_str(&format!("type {wrapper} struct {{\n"));
        self.output.push_str(&format!("\t{embedded}\n\n"));
        self.output.push_str(SHOULD_SKIP_ERROR_DOC);
        self.output.push_str("\tShouldSkipError func(error) bool\n\n");
        self.output.push_str(
            "\t// IsBadRequest checks whether to count a user error against the circuit. It is recommended to set this\n",
        );
        self.output.push_str("\tIsBadRequest func(error) bool\n");

        for method in self.wrapped() {
            let name = &method.name;
            self.output.push_str(&format!(
                "\n\t// Circuit{name} is the circuit for method {name}\n"
            ));
            self.output
                .push_str(&format!("\tCircuit{name} *circuit.Circuit\n"));
        }
        self.output.push_str("}\n\n");
    }

    pub(super) fn emit_constructor(&mut self) {
        let wrapper = self.wrapper.clone();
        self.output.push_str(&format!(
            "// New{wrapper} creates a new circuit wrapper and initializes circuits\n"
        ));
        self.output.push_str(&format!("func New{wrapper}(\n"));
        self.output.push_str("\tmanager *circuit.Manager,\n");
        self.output
            .push_str(&format!("\tembedded {},\n", self.embedded_type));
        self.output.push_str(&format!("\tconf {wrapper}Config,\n"));
        self.output
            .push_str(&format!(") (*{wrapper}, error) {{\n"));

        for hook in ["ShouldSkipError", "IsBadRequest"] {
            self.output
                .push_str(&format!("\tif conf.{hook} == nil {{\n"));
            self.output
                .push_str(&format!("\t\tconf.{hook} = func(err error) bool {{\n"));
            self.output.push_str("\t\t\treturn false\n");
            self.output.push_str("\t\t}\n");
            self.output.push_str("\t}\n\n");
        }

        let fields = [
            (self.embedded_field.clone(), "embedded"),
            ("ShouldSkipError".to_owned(), "conf.ShouldSkipError"),
            ("IsBadRequest".to_owned(), "conf.IsBadRequest"),
        ];
        self.output.push_str(&format!("\tw := &{wrapper}{{\n"));
        self.emit_aligned_fields(&fields);
        self.output.push_str("\t}\n\n");

        let wrapped = self.wrapped();
        if !wrapped.is_empty() {
            self.output.push_str("\tvar err error\n");
            for (i, method) in wrapped.iter().enumerate() {
                if i > 0 {
                    self.output.push('\n');
                }
                let name = &method.name;
                self.output.push_str(&format!(
                    "\tw.Circuit{name}, err = manager.CreateCircuit(conf.Prefix+\"{}.{name}\", conf.Circuit{name}, conf.Defaults)\n",
                    self.circuit_base
                ));
                self.output.push_str("\tif err != nil {\n");
                self.output.push_str("\t\treturn nil, err\n");
                self.output.push_str("\t}\n");
            }
            self.output.push('\n');
        }

        self.output.push_str("\treturn w, nil\n");
        self.output.push_str("}\n\n");
    }

    /// Composite literal fields with values aligned the way gofmt does.
    fn emit_aligned_fields(&mut self, fields: &[(String, &str)]) {
        let width = fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0) + 2;
        for (key, value) in fields {
            let key = format!("{key}:");
            self.output
                .push_str(&format!("\t\t{key:<width$}{value},\n"));
        }
    }

    pub(super) fn emit_wrapped_method(&mut self, method: &Method) {
        let name = &method.name;
        let field = self.embedded_field.clone();
        self.output.push_str(&format!(
            "// {name} calls the embedded {}'s method {name} with Circuit{name}\n",
            self.embedded_type
        ));
        self.output.push_str(&format!(
            "func (w *{}) {name}({}) {} {{\n",
            self.wrapper,
            method.params_signature(&[CONTEXT_VAR]),
            method.results_signature()
        ));

        for line in method.results_closure_variable_declarations().lines() {
            self.output.push_str(&format!("\t{line}\n"));
        }
        self.output.push_str("\tvar skippedErr error\n\n");

        self.output.push_str(&format!(
            "\terr := w.Circuit{name}.Run({CONTEXT_VAR}, func({CONTEXT_VAR} context.Context) error {{\n"
        ));
        let call = format!("w.{field}.{name}({})", method.call_signature_with_closure());
        if method.has_one_method_result_variable() {
            self.output.push_str(&format!("\t\terr := {call}\n\n"));
        } else {
            self.output.push_str("\t\tvar err error\n");
            self.output.push_str(&format!(
                "\t\t{} = {call}\n\n",
                method.results_circuit_variable_assignments()
            ));
        }
        self.output.push_str("\t\tif w.ShouldSkipError(err) {\n");
        self.output.push_str("\t\t\tskippedErr = err\n");
        self.output.push_str("\t\t\treturn nil\n");
        self.output.push_str("\t\t}\n\n");
        self.output.push_str("\t\tif w.IsBadRequest(err) {\n");
        self.output
            .push_str("\t\t\treturn &circuit.SimpleBadRequest{Err: err}\n");
        self.output.push_str("\t\t}\n");
        self.output.push_str("\t\treturn err\n");
        self.output.push_str("\t})\n\n");

        self.output.push_str("\tif skippedErr != nil {\n");
        self.output.push_str("\t\terr = skippedErr\n");
        self.output.push_str("\t}\n\n");
        self.output
            .push_str("\tif berr, ok := err.(*circuit.SimpleBadRequest); ok {\n");
        self.output.push_str("\t\terr = berr.Err\n");
        self.output.push_str("\t}\n\n");
        self.output.push_str(&format!(
            "\treturn {}err\n",
            method.results_closure_variable_returns()
        ));
        self.output.push_str("}\n\n");
    }

    /// Methods that cannot run in a circuit call straight through.
    pub(super) fn emit_delegating_method(&mut self, method: &Method) {
        let name = &method.name;
        let results = method.results_signature();
        let results = if results.is_empty() {
            String::new()
        } else {
            format!(" {results}")
        };
        self.output.push_str(&format!(
            "// {name} calls the embedded {}'s method {name}\n",
            self.embedded_type
        ));
        self.output.push_str(&format!(
            "func (w *{}) {name}({}){results} {{\n",
            self.wrapper,
            method.params_signature(&[])
        ));

        let call = format!(
            "w.{}.{name}({})",
            self.embedded_field,
            method.call_signature()
        );
        if method.results.is_empty() {
            self.output.push_str(&format!("\t{call}\n"));
        } else {
            self.output.push_str(&format!("\treturn {call}\n"));
        }
        self.output.push_str("}\n\n");
    }

    pub(super) fn emit_interface_assertion(&mut self) {
        self.output.push_str(&format!(
            "var _ {} = (*{})(nil)\n",
            self.meta.type_info.name, self.wrapper
        ));
    }
}

/// Standard library paths have no dot in their first element.
fn is_standard_library(path: &str) -> bool {
    path.split('/').next().is_some_and(|first| !first.contains('.'))
}
