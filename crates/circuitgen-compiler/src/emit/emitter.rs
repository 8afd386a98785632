//! Core emitter struct and main emit logic.

use crate::model::{Method, TypeMetadata};

use super::Config;

/// Wrapper emitter for one resolved type.
pub struct Emitter<'a> {
    pub(super) meta: &'a TypeMetadata,
    pub(super) config: Config,

    /// `CircuitWrapper<Name>`
    pub(super) wrapper: String,
    /// Name circuits are registered under, before the method name
    pub(super) circuit_base: String,
    /// Field name of the embedded wrapped value
    pub(super) embedded_field: String,
    /// `*pkg.Struct` or `pkg.Interface`
    pub(super) embedded_type: String,
    /// Output buffer
    pub(super) output: String,
}

impl<'a> Emitter<'a> {
    pub fn new(meta: &'a TypeMetadata, config: Config) -> Self {
        let type_info = &meta.type_info;
        let circuit_base = config
            .alias
            .clone()
            .unwrap_or_else(|| type_info.name_without_qualifier.clone());
        let embedded_type = if type_info.is_interface {
            type_info.name.clone()
        } else {
            format!("*{}", type_info.name)
        };

        Self {
            meta,
            wrapper: format!("CircuitWrapper{circuit_base}"),
            circuit_base,
            embedded_field: type_info.name_without_qualifier.clone(),
            embedded_type,
            config,
            output: String::new(),
        }
    }

    /// Methods that run inside a circuit, in method order.
    pub(super) fn wrapped(&self) -> Vec<&'a Method> {
        let meta = self.meta;
        meta.methods.iter().filter(|m| runs_in_circuit(m)).collect()
    }

    /// Emit the complete Go source file.
    pub fn emit(mut self) -> String {
        self.emit_header();
        self.emit_imports();
        self.emit_config_struct();
        self.emit_wrapper_struct();
        self.emit_constructor();

        let meta = self.meta;
        for method in &meta.methods {
            if runs_in_circuit(method) {
                self.emit_wrapped_method(method);
            } else {
                self.emit_delegating_method(method);
            }
        }

        if self.config.interface_assertion && meta.type_info.is_interface {
            self.emit_interface_assertion();
        }

        // Ensure exactly one trailing newline
        self.output.truncate(self.output.trim_end().len());
        self.output.push('\n');
        self.output
    }
}

/// A lone variadic context parameter cannot be both `ctx` and spread, so
/// such methods are delegated.
fn runs_in_circuit(method: &Method) -> bool {
    method.is_wrapping_supported() && !(method.variadic && method.params.len() == 1)
}
