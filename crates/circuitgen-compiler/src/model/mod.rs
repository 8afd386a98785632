//! The metadata record handed from the resolver to the emitter.
//!
//! Everything here is built fresh for one target type and never mutated
//! afterwards. Descriptor names are already rendered for the output package.

mod synth;

pub use synth::{CONTEXT_VAR, Fragments};

#[cfg(test)]
mod synth_tests;

use serde::Serialize;

/// Everything the emitter needs to know about one target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeMetadata {
    /// Name of the package declaring the type.
    pub package_name: String,
    /// Import path of the package declaring the type, vendor prefix stripped.
    pub package_path: String,
    pub type_info: TypeInfo,
    /// Packages the wrapper must import, first-seen order, never the output package.
    pub imports: Vec<Import>,
    /// Exported methods, ordered by name. Never empty.
    pub methods: Vec<Method>,
}

/// A method of the target type's method set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub params: Vec<TypeInfo>,
    pub results: Vec<TypeInfo>,
    /// The last parameter is a `...T` parameter; its descriptor renders `[]T`.
    pub variadic: bool,
}

/// A rendered type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    /// Qualified for the output package: `aws.Context`, or `Context` when
    /// the type lives in the output package itself.
    pub name: String,
    pub name_without_qualifier: String,
    pub is_interface: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Import {
    pub path: String,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>, name_without_qualifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_without_qualifier: name_without_qualifier.into(),
            is_interface: false,
        }
    }

    pub fn interface(mut self, value: bool) -> Self {
        self.is_interface = value;
        self
    }
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}
