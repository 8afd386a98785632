use std::path::PathBuf;

use circuitgen_compiler::model::Fragments;
use circuitgen_compiler::{TypeMetadata, resolve_module_path};
use serde::Serialize;

use super::CliError;
use super::workspace::Workspace;

pub struct InspectArgs {
    pub pkg: PathBuf,
    pub names: Vec<String>,
    pub out_pkg: Option<PathBuf>,
    pub compact: bool,
    pub color: bool,
}

/// One resolved type with the fragments of each method.
#[derive(Debug, Serialize)]
pub(crate) struct Inspection {
    #[serde(flatten)]
    pub metadata: TypeMetadata,
    pub fragments: Vec<MethodFragments>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MethodFragments {
    pub method: String,
    #[serde(flatten)]
    pub fragments: Fragments,
}

impl Inspection {
    pub(crate) fn new(metadata: TypeMetadata) -> Self {
        let fragments = metadata
            .methods
            .iter()
            .map(|m| MethodFragments {
                method: m.name.clone(),
                fragments: m.fragments(),
            })
            .collect();
        Self {
            metadata,
            fragments,
        }
    }
}

pub fn run(args: InspectArgs) -> Result<(), CliError> {
    let workspace = Workspace::load(&args.pkg, args.color)?;
    let out_path = match &args.out_pkg {
        Some(dir) => resolve_module_path(dir)?,
        None => workspace.package_path.clone(),
    };

    let inspections = args
        .names
        .iter()
        .map(|name| workspace.resolve(name, &out_path).map(Inspection::new))
        .collect::<Result<Vec<_>, _>>()?;

    let json = if args.compact {
        serde_json::to_string(&inspections)?
    } else {
        serde_json::to_string_pretty(&inspections)?
    };
    println!("{json}");
    Ok(())
}
