use std::fs;
use std::path::{Path, PathBuf};

use circuitgen_compiler::{Config, emit_wrapper, resolve_module_path};
use tracing::{info, warn};

use super::CliError;
use super::workspace::{Workspace, output_package_name};

pub struct CircuitArgs {
    pub pkg: PathBuf,
    pub names: Vec<String>,
    pub out: PathBuf,
    pub alias: Option<String>,
    pub circuit_major_version: u32,
    pub keep_going: bool,
    pub color: bool,
}

/// Where the generated files go.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum OutputTarget {
    /// `--out` names the file to write.
    File(PathBuf),
    /// One `<type>.gen.go` per type in this directory.
    Dir(PathBuf),
}

impl OutputTarget {
    /// A `.go` path that is not an existing directory names a file, which
    /// only holds the wrapper of a single type.
    pub(crate) fn new(out: &Path, type_count: usize) -> Result<Self, CliError> {
        let is_file = out.extension().is_some_and(|ext| ext == "go") && !out.is_dir();
        match (is_file, type_count) {
            (true, 1) => Ok(Self::File(out.to_path_buf())),
            (true, count) => Err(CliError::FileWithSeveralTypes {
                path: out.to_path_buf(),
                count,
            }),
            (false, _) => Ok(Self::Dir(out.to_path_buf())),
        }
    }

    pub(crate) fn dir(&self) -> &Path {
        match self {
            Self::File(file) => match file.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            },
            Self::Dir(dir) => dir,
        }
    }

    pub(crate) fn file_for(&self, type_name: &str) -> PathBuf {
        match self {
            Self::File(file) => file.clone(),
            Self::Dir(dir) => dir.join(format!("{}.gen.go", type_name.to_lowercase())),
        }
    }
}

pub fn run(args: CircuitArgs) -> Result<(), CliError> {
    if args.alias.is_some() && args.names.len() > 1 {
        return Err(CliError::AliasWithSeveralTypes(args.names.len()));
    }

    let target = OutputTarget::new(&args.out, args.names.len())?;
    let workspace = Workspace::load(&args.pkg, args.color)?;

    let out_dir = target.dir();
    let out_path = resolve_module_path(out_dir)?;
    let package_name = output_package_name(out_dir, &out_path)?;
    info!(out = %out_path, package = %package_name, "generating wrappers");

    let config = Config::new()
        .package_name(package_name)
        .circuit_major_version(args.circuit_major_version)
        .alias(args.alias.clone());

    let mut failed = 0;
    for name in &args.names {
        let generated = workspace
            .resolve(name, &out_path)
            .and_then(|meta| write_wrapper(&target, name, &emit_wrapper(&meta, config.clone())));
        match generated {
            Ok(path) => info!(type_name = %name, path = %path.display(), "wrote wrapper"),
            Err(err) if args.keep_going => {
                warn!(type_name = %name, "skipping type");
                eprintln!("error: {err}");
                failed += 1;
            }
            Err(err) => return Err(err),
        }
    }

    if failed > 0 {
        return Err(CliError::Failed {
            failed,
            total: args.names.len(),
        });
    }
    Ok(())
}

fn write_wrapper(target: &OutputTarget, name: &str, source: &str) -> Result<PathBuf, CliError> {
    let path = target.file_for(name);
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).map_err(CliError::io("creating", dir))?;
    }
    fs::write(&path, source).map_err(CliError::io("writing", &path))?;
    Ok(path)
}
