//! From a named type to its [`TypeMetadata`].
//!
//! Resolution runs the method set, the import set and the rendering of every
//! parameter and result for the output package. Any failure aborts the whole
//! type: no partial metadata is produced.

mod imports;
mod method_set;

#[cfg(test)]
mod imports_tests;

use tracing::debug;

use circuitgen_core::types::{Signature, TypeShape, Var};
use circuitgen_core::universe::Universe;
use circuitgen_core::utils::{is_exported, strip_vendor};
use circuitgen_core::{type_string, unqualified_type_string};

use crate::model::{Method, TypeInfo, TypeMetadata};
use crate::{Error, Result};

pub use imports::resolve_imports;
pub use method_set::{MethodSelection, interface_methods, method_set};

/// The named type `name` declared in the package at `package_path`.
pub fn lookup_type(universe: &Universe, package_path: &str, name: &str) -> Result<TypeShape> {
    let declared = universe
        .package(package_path)
        .is_some_and(|pkg| pkg.get(name).is_some());
    if !declared {
        return Err(Error::TypeNotFound {
            name: name.to_owned(),
            package: package_path.to_owned(),
        });
    }
    Ok(TypeShape::named(package_path, name))
}

/// Resolve the exported methods and imports of `ty` for a wrapper generated
/// into the package at `out_path`.
pub fn resolve_type(universe: &Universe, ty: &TypeShape, out_path: &str) -> Result<TypeMetadata> {
    let Some(named) = ty.as_named().filter(|n| !n.is_predeclared()) else {
        return Err(Error::NotANamedType {
            type_name: unqualified_type_string(ty),
        });
    };
    let display_name = qualified_name(universe, ty);

    let Some(decl) = universe.lookup(named) else {
        return Err(Error::TypeNotFound {
            name: named.name.clone(),
            package: named.package.clone().unwrap_or_default(),
        });
    };
    if decl.is_generic() || named.is_instantiated() {
        return Err(Error::UnsupportedTypeShape {
            type_name: display_name,
            method: String::new(),
            shape: format!("{}[{}]", decl.name, decl.type_params.join(", ")),
        });
    }

    let mut selections: Vec<MethodSelection> = method_set(universe, ty)
        .into_iter()
        .filter(|m| is_exported(&m.name))
        .collect();
    selections.sort_by(|a, b| a.name.cmp(&b.name));
    if selections.is_empty() {
        return Err(Error::EmptyMethodSet {
            type_name: display_name,
        });
    }

    let imports = resolve_imports(ty, &selections, out_path)?;

    let mut methods = Vec::with_capacity(selections.len());
    for selection in &selections {
        let TypeShape::Signature(sig) = &selection.ty else {
            return Err(Error::NotASignature {
                type_name: display_name,
                method: selection.name.clone(),
            });
        };
        methods.push(method(universe, &selection.name, sig, out_path));
    }

    let package_path = named.package.as_deref().unwrap_or_default();
    debug!(
        type_name = %display_name,
        methods = methods.len(),
        imports = imports.len(),
        "resolved type"
    );

    Ok(TypeMetadata {
        package_name: universe.package_name(package_path),
        package_path: strip_vendor(package_path).to_owned(),
        type_info: type_info(universe, ty, out_path),
        imports,
        methods,
    })
}

fn method(universe: &Universe, name: &str, sig: &Signature, out_path: &str) -> Method {
    let tuple = |vars: &[Var]| {
        vars.iter()
            .map(|v| type_info(universe, &v.ty, out_path))
            .collect()
    };
    Method {
        name: name.to_owned(),
        params: tuple(&sig.params),
        results: tuple(&sig.results),
        variadic: sig.variadic,
    }
}

/// Descriptor of `ty` as written from inside the package at `out_path`.
pub fn type_info(universe: &Universe, ty: &TypeShape, out_path: &str) -> TypeInfo {
    let qualifier = |path: &str| {
        if strip_vendor(path) == out_path {
            String::new()
        } else {
            universe.package_name(path)
        }
    };
    TypeInfo {
        name: type_string(ty, &qualifier),
        name_without_qualifier: unqualified_type_string(ty),
        is_interface: universe.is_interface(ty),
    }
}

/// `pkg.Name`, for messages.
fn qualified_name(universe: &Universe, ty: &TypeShape) -> String {
    type_string(ty, &|path| universe.package_name(path))
}
