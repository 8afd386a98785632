//! Loading the package the types live in.

use std::fs;
use std::path::Path;

use circuitgen_compiler::{
    LoadResult, TypeMetadata, first_package_error, load_packages, lookup_type, resolve_module_path,
    resolve_type,
};
use circuitgen_core::utils::package_name_from_path;
use tracing::debug;

use super::CliError;

/// The loaded source package.
pub struct Workspace {
    pub result: LoadResult,
    /// Import path of the package given with `--pkg`.
    pub package_path: String,
}

impl Workspace {
    /// Load `pkg` and its dependencies, printing diagnostics to stderr.
    /// Fails on the first error diagnostic.
    pub fn load(pkg: &Path, color: bool) -> Result<Self, CliError> {
        let package_path = resolve_module_path(pkg)?;
        let result = load_packages(&[pkg])?;

        for package in result.packages.values() {
            if package.diagnostics.is_empty() {
                continue;
            }
            let rendered = package
                .diagnostics
                .printer()
                .sources(&package.files)
                .colored(color)
                .render();
            eprintln!("{rendered}");
        }

        if let Some(err) = first_package_error(&result) {
            return Err(err.into());
        }
        Ok(Self {
            result,
            package_path,
        })
    }

    /// Resolve the type `name` of the loaded package for output into `out_path`.
    pub fn resolve(&self, name: &str, out_path: &str) -> Result<TypeMetadata, CliError> {
        let universe = &self.result.universe;
        let ty = lookup_type(universe, &self.package_path, name)?;
        let meta = resolve_type(universe, &ty, out_path)?;
        debug!(type_name = name, out = out_path, "resolved");
        Ok(meta)
    }
}

/// Package clause used by the Go files already in `dir`, or a name derived
/// from `out_path` when there are none.
pub fn output_package_name(dir: &Path, out_path: &str) -> Result<String, CliError> {
    if dir.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).map_err(CliError::io("reading", dir))? {
            let path = entry.map_err(CliError::io("reading", dir))?.path();
            let is_source = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".go") && !n.ends_with("_test.go"));
            if is_source {
                files.push(path);
            }
        }
        files.sort();

        for file in files {
            let text = fs::read_to_string(&file).map_err(CliError::io("reading", &file))?;
            if let Some(name) = package_clause(&text) {
                return Ok(name.to_owned());
            }
        }
    }
    Ok(package_name_from_path(out_path))
}

fn package_clause(text: &str) -> Option<&str> {
    text.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("package "))
        .map(|rest| rest.split_whitespace().next().unwrap_or_default())
        .filter(|name| !name.is_empty())
}
