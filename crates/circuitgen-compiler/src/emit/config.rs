//! Configuration for wrapper emission.

/// Module path of the circuit breaker library, without major version suffix.
pub const CIRCUIT_MODULE: &str = "github.com/cep21/circuit";

/// Configuration for wrapper emission.
#[derive(Clone, Debug)]
pub struct Config {
    /// Package clause of the generated file. Empty means the package of the
    /// wrapped type.
    pub(crate) package_name: String,
    /// Major version of the circuit library to import
    pub(crate) circuit_major_version: u32,
    /// Replaces the type name in the wrapper and circuit names
    pub(crate) alias: Option<String>,
    /// Emit `var _ T = (*Wrapper)(nil)` for interfaces
    pub(crate) interface_assertion: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_name: String::new(),
            circuit_major_version: 2,
            alias: None,
            interface_assertion: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the package clause of the generated file.
    pub fn package_name(mut self, value: impl Into<String>) -> Self {
        self.package_name = value.into();
        self
    }

    /// Set the major version of `github.com/cep21/circuit` to target.
    pub fn circuit_major_version(mut self, value: u32) -> Self {
        self.circuit_major_version = value;
        self
    }

    /// Name the wrapper `CircuitWrapper<alias>` instead of after the type.
    pub fn alias(mut self, value: Option<String>) -> Self {
        self.alias = value.filter(|a| !a.is_empty());
        self
    }

    pub fn interface_assertion(mut self, value: bool) -> Self {
        self.interface_assertion = value;
        self
    }

    /// Import path of the circuit library: versions below 3 have no suffix.
    pub fn circuit_import_path(&self) -> String {
        match self.circuit_major_version {
            0..=2 => CIRCUIT_MODULE.to_owned(),
            n => format!("{CIRCUIT_MODULE}/v{n}"),
        }
    }
}
