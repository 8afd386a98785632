//! Packages referenced by a method set.

use indexmap::IndexSet;

use circuitgen_core::types::TypeShape;
use circuitgen_core::unqualified_type_string;
use circuitgen_core::utils::strip_vendor;

use super::MethodSelection;
use crate::model::Import;
use crate::{Error, Result};

/// Import paths the wrapper of `ty` needs for the signatures of `methods`.
///
/// Paths are collected method by method (parameters, then results), then the
/// package declaring `ty` is added. Order is first-seen, duplicates are
/// dropped, and `out_path` itself never appears.
pub fn resolve_imports(
    ty: &TypeShape,
    methods: &[MethodSelection],
    out_path: &str,
) -> Result<Vec<Import>> {
    let type_name = unqualified_type_string(ty);
    let mut paths = IndexSet::new();

    for method in methods {
        let mut walker = Walker {
            type_name: &type_name,
            method: &method.name,
            paths: &mut paths,
        };
        walker.walk(&method.ty)?;
    }

    if let Some(own) = ty.as_named().and_then(|n| n.package.as_deref()) {
        paths.insert(strip_vendor(own).to_owned());
    }

    Ok(paths
        .into_iter()
        .filter(|path| path != out_path)
        .map(Import::new)
        .collect())
}

struct Walker<'a> {
    type_name: &'a str,
    method: &'a str,
    paths: &'a mut IndexSet<String>,
}

impl Walker<'_> {
    fn walk(&mut self, ty: &TypeShape) -> Result<()> {
        match ty {
            TypeShape::Signature(sig) => {
                for var in sig.params.iter().chain(&sig.results) {
                    self.walk(&var.ty)?;
                }
            }
            TypeShape::Pointer(elem) | TypeShape::Slice(elem) => self.walk(elem)?,
            TypeShape::Array { elem, .. } => self.walk(elem)?,
            TypeShape::Map { key, value } => {
                self.walk(key)?;
                self.walk(value)?;
            }
            TypeShape::Named(named) if named.is_instantiated() => return Err(self.unsupported(ty)),
            TypeShape::Named(named) => {
                if let Some(path) = &named.package {
                    self.paths.insert(strip_vendor(path).to_owned());
                }
            }
            TypeShape::Basic(_) | TypeShape::Interface(_) | TypeShape::Struct(_) => {}
            TypeShape::Chan { .. } | TypeShape::TypeParam(_) => return Err(self.unsupported(ty)),
        }
        Ok(())
    }

    fn unsupported(&self, ty: &TypeShape) -> Error {
        Error::UnsupportedTypeShape {
            type_name: self.type_name.to_owned(),
            method: self.method.to_owned(),
            shape: unqualified_type_string(ty),
        }
    }
}
