//! Loading Go packages from disk into a [`Universe`].
//!
//! Requested package directories are parsed along with every package they
//! import from the same module (or from its `vendor/` tree), dependencies
//! first. Imports from elsewhere become opaque packages known only by path.

mod gomod;
mod parse;

#[cfg(test)]
mod gomod_tests;
#[cfg(test)]
mod loader_tests;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, warn};

use circuitgen_core::universe::{Package, Universe};

use crate::diagnostics::{DiagnosticKind, Diagnostics, FileId, SourceFile};
use crate::{Error, Result};

pub use gomod::{GoModule, find_module, parse_module_directive, resolve_module_path};

use parse::{FileScope, ImportName, ParsedFile};

/// A package loaded from source.
#[derive(Debug, Clone)]
pub struct LoadedPackage {
    pub path: String,
    pub name: String,
    pub dir: PathBuf,
    pub files: Vec<SourceFile>,
    /// Distinct import paths, in source order.
    pub imports: Vec<String>,
    pub diagnostics: Diagnostics,
}

/// Everything one `load_packages` call produced.
#[derive(Debug, Clone, Default)]
pub struct LoadResult {
    pub universe: Universe,
    /// Source packages in load order (dependencies before dependents).
    pub packages: IndexMap<String, LoadedPackage>,
    /// Import paths of the requested directories, in request order.
    pub roots: Vec<String>,
}

impl LoadResult {
    pub fn package(&self, path: &str) -> Option<&LoadedPackage> {
        self.packages.get(path)
    }

    pub fn roots(&self) -> impl Iterator<Item = &LoadedPackage> {
        self.roots.iter().filter_map(|path| self.packages.get(path))
    }
}

/// Load the Go packages in `dirs` and everything they import from their module.
pub fn load_packages<P: AsRef<Path>>(dirs: &[P]) -> Result<LoadResult> {
    let mut loader = Loader::default();

    for dir in dirs {
        let dir = dir.as_ref();
        let abs = std::path::absolute(dir).map_err(|e| Error::PackageLoad {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let abs = gomod::normalize(&abs);
        if !abs.is_dir() {
            return Err(Error::PackageLoad {
                path: dir.display().to_string(),
                message: "no such directory".to_owned(),
            });
        }

        let module = find_module(&abs)?;
        let path = module.import_path(&abs).ok_or_else(|| Error::PackageLoad {
            path: abs.display().to_string(),
            message: format!("outside of module {}", module.path),
        })?;

        if !loader.packages.contains_key(&path) {
            let files = read_sources(&abs)?;
            loader.load(&module, &abs, &path, files)?;
        }
        loader.roots.push(path);
    }

    info!(
        roots = loader.roots.len(),
        packages = loader.packages.len(),
        "loaded packages"
    );

    Ok(LoadResult {
        universe: loader.universe,
        packages: loader.packages,
        roots: loader.roots,
    })
}

/// The first error diagnostic of the loaded packages, visiting each
/// package's dependencies before the package itself.
pub fn first_package_error(result: &LoadResult) -> Option<Error> {
    let mut seen = HashSet::new();
    result
        .roots
        .iter()
        .find_map(|root| visit_first_error(result, root, &mut seen))
}

fn visit_first_error<'a>(
    result: &'a LoadResult,
    path: &'a str,
    seen: &mut HashSet<&'a str>,
) -> Option<Error> {
    if !seen.insert(path) {
        return None;
    }
    let pkg = result.packages.get(path)?;

    for dep in &pkg.imports {
        if let Some(err) = visit_first_error(result, dep, seen) {
            return Some(err);
        }
    }

    let diag = pkg.diagnostics.first_error()?;
    let location = match pkg.files.get(diag.file().index()) {
        Some(file) => {
            let (line, col) = file.line_col(diag.range().start);
            format!("{}:{}:{}", file.path.display(), line, col)
        }
        None => pkg.dir.display().to_string(),
    };
    Some(Error::PackageSemantic {
        package: pkg.path.clone(),
        message: format!("{}: {}", location, diag.message()),
    })
}

#[derive(Default)]
struct Loader {
    universe: Universe,
    packages: IndexMap<String, LoadedPackage>,
    roots: Vec<String>,
    in_progress: HashSet<String>,
}

impl Loader {
    fn load(
        &mut self,
        module: &GoModule,
        dir: &Path,
        path: &str,
        files: Vec<SourceFile>,
    ) -> Result<()> {
        self.in_progress.insert(path.to_owned());
        debug!(package = path, dir = %dir.display(), files = files.len(), "parsing package");

        let mut diagnostics = Diagnostics::new();
        let parsed = files
            .iter()
            .enumerate()
            .map(|(i, file)| parse::parse_file(FileId::new(i), file, &mut diagnostics))
            .collect::<Result<Vec<_>>>()?;

        let name = package_name(&parsed, &files, &mut diagnostics)
            .unwrap_or_else(|| circuitgen_core::utils::package_name_from_path(path));

        let mut imports = IndexSet::new();
        for file in &parsed {
            for spec in &file.imports {
                imports.insert(spec.path.clone());
                self.load_dependency(
                    module,
                    &spec.path,
                    file.file,
                    spec.range.clone(),
                    &mut diagnostics,
                )?;
            }
        }

        let mut package = Package::new(path, name.clone());
        self.declare(&mut package, &parsed, &files, &mut diagnostics);

        if diagnostics.has_errors() {
            warn!(
                package = path,
                errors = diagnostics.error_count(),
                "package has errors"
            );
        }

        self.universe.insert(package);
        self.packages.insert(
            path.to_owned(),
            LoadedPackage {
                path: path.to_owned(),
                name,
                dir: dir.to_path_buf(),
                files,
                imports: imports.into_iter().collect(),
                diagnostics,
            },
        );
        self.in_progress.remove(path);
        Ok(())
    }

    fn load_dependency(
        &mut self,
        module: &GoModule,
        import_path: &str,
        file: FileId,
        range: Range<usize>,
        diagnostics: &mut Diagnostics,
    ) -> Result<()> {
        if self.packages.contains_key(import_path) || self.in_progress.contains(import_path) {
            return Ok(());
        }

        let Some(dir) = module.dir_of(import_path) else {
            self.universe.insert_opaque(import_path);
            return Ok(());
        };

        if !has_go_files(&dir) {
            if module.contains(import_path) {
                diagnostics
                    .report(DiagnosticKind::UnresolvedImport, file, range)
                    .message(format!("\"{}\"", import_path))
                    .emit();
            }
            self.universe.insert_opaque(import_path);
            return Ok(());
        }

        let files = read_sources(&dir)?;
        self.load(module, &dir, import_path, files)
    }

    /// Build the package's type declarations and attach methods.
    fn declare(
        &self,
        package: &mut Package,
        parsed: &[ParsedFile],
        files: &[SourceFile],
        diagnostics: &mut Diagnostics,
    ) {
        let mut local_types = HashSet::new();
        let mut first_seen: HashMap<String, (FileId, Range<usize>)> = HashMap::new();
        for (file, source) in parsed.iter().zip(files) {
            for (name, range) in parse::declared_type_names(file, &source.text) {
                if let Some((first_file, first_range)) = first_seen.get(&name) {
                    diagnostics
                        .report(DiagnosticKind::DuplicateDeclaration, file.file, range)
                        .message(&name)
                        .related_to("other declaration", *first_file, first_range.clone())
                        .emit();
                    continue;
                }
                first_seen.insert(name.clone(), (file.file, range));
                local_types.insert(name);
            }
        }

        let mut methods = Vec::new();
        for (file, source) in parsed.iter().zip(files) {
            let scope = self.file_scope(&package.path, &local_types, file, diagnostics);
            let decls = parse::lower_file(file, &source.text, &scope, diagnostics);

            for declared in decls.types {
                let is_first = first_seen
                    .get(&declared.decl.name)
                    .is_some_and(|(f, r)| *f == file.file && *r == declared.range);
                if is_first {
                    package.types.insert(declared.decl.name.clone(), declared.decl);
                }
            }
            methods.extend(decls.methods.into_iter().map(|m| (file.file, m)));
        }

        for (file, declared) in methods {
            let Some(decl) = package.types.get_mut(&declared.receiver) else {
                diagnostics
                    .report(DiagnosticKind::UndeclaredName, file, declared.range)
                    .message(&declared.receiver)
                    .emit();
                continue;
            };
            if decl.methods.iter().any(|m| m.name == declared.method.name) {
                diagnostics
                    .report(DiagnosticKind::DuplicateDeclaration, file, declared.range)
                    .message(format!("method {}.{}", declared.receiver, declared.method.name))
                    .emit();
                continue;
            }
            decl.methods.push(declared.method);
        }
    }

    fn file_scope<'a>(
        &self,
        package_path: &'a str,
        local_types: &'a HashSet<String>,
        file: &ParsedFile,
        diagnostics: &mut Diagnostics,
    ) -> FileScope<'a> {
        let mut scope = FileScope {
            package_path,
            local_types,
            qualifiers: HashMap::new(),
            dot_imports: Vec::new(),
        };

        for spec in &file.imports {
            match &spec.name {
                ImportName::Implicit => {
                    let name = self.universe.package_name(&spec.path);
                    scope.qualifiers.insert(name, spec.path.clone());
                }
                ImportName::Named(alias) => {
                    scope.qualifiers.insert(alias.clone(), spec.path.clone());
                }
                ImportName::Dot => {
                    diagnostics
                        .report(DiagnosticKind::DotImport, file.file, spec.range.clone())
                        .emit();
                    scope.dot_imports.push(spec.path.clone());
                }
                ImportName::Blank => {}
            }
        }
        scope
    }
}

/// Package name shared by every file, reporting files that disagree.
fn package_name(
    parsed: &[ParsedFile],
    files: &[SourceFile],
    diagnostics: &mut Diagnostics,
) -> Option<String> {
    let mut expected: Option<(&str, &SourceFile)> = None;
    for (file, source) in parsed.iter().zip(files) {
        let Some((name, range)) = &file.package else {
            continue;
        };
        match expected {
            None => expected = Some((name.as_str(), source)),
            Some((first, first_source)) if first != name.as_str() => {
                diagnostics
                    .report(DiagnosticKind::PackageNameMismatch, file.file, range.clone())
                    .message(format!(
                        "{} ({}) and {} ({})",
                        first,
                        file_name(first_source),
                        name,
                        file_name(source)
                    ))
                    .emit();
            }
            Some(_) => {}
        }
    }
    expected.map(|(name, _)| name.to_owned())
}

fn file_name(source: &SourceFile) -> String {
    source
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".go") && !name.ends_with("_test.go") && path.is_file()
}

fn has_go_files(dir: &Path) -> bool {
    fs::read_dir(dir).is_ok_and(|entries| {
        entries
            .filter_map(|entry| entry.ok())
            .any(|entry| is_source_file(&entry.path()))
    })
}

/// Files excluded from every build by an `ignore` constraint.
fn is_ignored(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with("package "))
        .any(|line| line == "//go:build ignore" || line == "// +build ignore")
}

fn read_sources(dir: &Path) -> Result<Vec<SourceFile>> {
    let io_error = |e: std::io::Error| Error::PackageLoad {
        path: dir.display().to_string(),
        message: e.to_string(),
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if is_source_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path).map_err(|e| Error::PackageLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if is_ignored(&text) {
            debug!(file = %path.display(), "skipping ignored file");
            continue;
        }
        files.push(SourceFile::new(path, text));
    }

    if files.is_empty() {
        return Err(Error::PackageLoad {
            path: dir.display().to_string(),
            message: "no Go files".to_owned(),
        });
    }
    Ok(files)
}
