//! `go.mod` discovery and module-relative import paths.

use std::fs;
use std::path::{Component, Path, PathBuf};

use circuitgen_core::utils::strip_vendor;

use crate::{Error, Result};

/// A Go module: the directory holding `go.mod` and its module path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoModule {
    pub root: PathBuf,
    pub path: String,
}

impl GoModule {
    /// Import path of a directory inside this module.
    pub fn import_path(&self, dir: &Path) -> Option<String> {
        let rel = dir.strip_prefix(&self.root).ok()?;
        let mut path = self.path.clone();
        for component in rel.components() {
            let Component::Normal(elem) = component else {
                continue;
            };
            path.push('/');
            path.push_str(&elem.to_string_lossy());
        }
        Some(strip_vendor(&path).to_owned())
    }

    /// Directory of an import path, if the path belongs to this module or
    /// is vendored inside it.
    pub fn dir_of(&self, import_path: &str) -> Option<PathBuf> {
        if import_path == self.path {
            return Some(self.root.clone());
        }
        if let Some(rest) = import_path
            .strip_prefix(self.path.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
        {
            return Some(join_slashed(&self.root, rest));
        }

        let vendored = join_slashed(&self.root.join("vendor"), import_path);
        vendored.is_dir().then_some(vendored)
    }

    pub fn contains(&self, import_path: &str) -> bool {
        import_path == self.path
            || import_path
                .strip_prefix(self.path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

fn join_slashed(base: &Path, rel: &str) -> PathBuf {
    rel.split('/')
        .filter(|elem| !elem.is_empty())
        .fold(base.to_path_buf(), |dir, elem| dir.join(elem))
}

/// Find the module enclosing `start` by walking up to the nearest `go.mod`.
///
/// `start` itself does not need to exist.
pub fn find_module(start: &Path) -> Result<GoModule> {
    for dir in start.ancestors() {
        let gomod = dir.join("go.mod");
        if !gomod.is_file() {
            continue;
        }

        let contents = fs::read_to_string(&gomod).map_err(|e| Error::PackageLoad {
            path: gomod.display().to_string(),
            message: e.to_string(),
        })?;
        let path = parse_module_directive(&contents).ok_or_else(|| Error::PackageLoad {
            path: gomod.display().to_string(),
            message: "no module directive".to_owned(),
        })?;

        return Ok(GoModule {
            root: dir.to_path_buf(),
            path,
        });
    }

    Err(Error::PackageLoad {
        path: start.display().to_string(),
        message: "no go.mod found in any parent directory".to_owned(),
    })
}

/// Extract the module path from `go.mod` contents.
pub fn parse_module_directive(contents: &str) -> Option<String> {
    for line in contents.lines() {
        let line = match line.find("//") {
            Some(i) => &line[..i],
            None => line,
        };
        let Some(rest) = line.trim().strip_prefix("module") else {
            continue;
        };
        if !rest.starts_with([' ', '\t', '"', '`']) {
            continue;
        }

        let rest = rest.trim();
        let path = rest
            .strip_prefix('"')
            .and_then(|r| r.strip_suffix('"'))
            .or_else(|| rest.strip_prefix('`').and_then(|r| r.strip_suffix('`')))
            .unwrap_or(rest);
        if !path.is_empty() {
            return Some(path.to_owned());
        }
    }
    None
}

/// Module path of an on-disk location: a package directory or a `.go` file.
///
/// Neither needs to exist yet, which lets callers name the package an output
/// file will belong to.
pub fn resolve_module_path(path: &Path) -> Result<String> {
    let abs = std::path::absolute(path).map_err(|e| Error::PackageLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let dir = if abs.extension().is_some_and(|ext| ext == "go") {
        abs.parent().map(Path::to_path_buf).unwrap_or(abs)
    } else {
        abs
    };
    let dir = normalize(&dir);

    let module = find_module(&dir)?;
    module.import_path(&dir).ok_or_else(|| Error::PackageLoad {
        path: dir.display().to_string(),
        message: format!("outside of module {}", module.path),
    })
}

/// Lexically resolve `.` and `..` components.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
