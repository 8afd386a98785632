#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Language-level model of Go types used by circuitgen.
//!
//! - [`types`]: structural type shapes (`TypeShape`) and signatures
//! - [`universe`]: loaded packages, type declarations and their methods
//! - [`stdlib`]: declarations of standard library types never loaded from source
//! - [`render`]: printing shapes back as Go type expressions
//! - [`utils`]: import path and identifier helpers

pub mod render;
pub mod stdlib;
pub mod types;
pub mod universe;
pub mod utils;

#[cfg(test)]
mod universe_tests;

pub use render::{Qualifier, signature_string, type_string, unqualified_type_string};
pub use types::{
    BasicKind, ChanDir, Field, InterfaceLit, MethodDecl, NamedRef, Signature, StructLit,
    TypeShape, Var,
};
pub use universe::{Package, TypeDecl, Universe};
