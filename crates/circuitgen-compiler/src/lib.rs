//! circuitgen compiler: from Go sources to circuit breaker wrappers.
//!
//! - `loader` - `go.mod` discovery, tree-sitter parsing, type universe construction
//! - `resolve` - method sets, import sets and the [`TypeMetadata`] record
//! - `model` - the metadata model and per-method signature fragments
//! - `emit` - Go source emission of the wrapper
//! - `diagnostics` - source-level problems found while loading

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod emit;
pub mod loader;
pub mod model;
pub mod resolve;

#[cfg(test)]
pub mod test_utils;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity, SourceFile};
pub use emit::{Config, emit_wrapper};
pub use loader::{LoadResult, LoadedPackage, first_package_error, load_packages, resolve_module_path};
pub use model::{Import, Method, TypeInfo, TypeMetadata};
pub use resolve::{lookup_type, resolve_imports, resolve_type};

/// Errors that abort generation for a target type.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The package could not be read from disk.
    #[error("loading packages: {path}: {message}")]
    PackageLoad { path: String, message: String },

    /// The package was read but its sources have problems.
    #[error("loading package {package}: {message}")]
    PackageSemantic { package: String, message: String },

    #[error("type {name} not found in package {package}")]
    TypeNotFound { name: String, package: String },

    #[error("empty methodset. {type_name} has no exported methods")]
    EmptyMethodSet { type_name: String },

    #[error("{type_name}: not a named type")]
    NotANamedType { type_name: String },

    #[error("method {type_name}.{method} is not a signature")]
    NotASignature { type_name: String, method: String },

    #[error("resolving imports of {}: unsupported type {shape}", member(.type_name, .method))]
    UnsupportedTypeShape {
        type_name: String,
        /// Empty when the type itself is unsupported.
        method: String,
        shape: String,
    },
}

fn member(type_name: &str, method: &str) -> String {
    if method.is_empty() {
        type_name.to_owned()
    } else {
        format!("{type_name}.{method}")
    }
}

pub type Result<T> = std::result::Result<T, Error>;
