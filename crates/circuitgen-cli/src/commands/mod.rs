pub mod circuit;
pub mod inspect;
mod workspace;

#[cfg(test)]
mod circuit_tests;

use std::path::PathBuf;

/// Errors reported by the CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Generate(#[from] circuitgen_compiler::Error),

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("encoding metadata: {0}")]
    Json(#[from] serde_json::Error),

    #[error("--alias names a single wrapper but {0} types were given")]
    AliasWithSeveralTypes(usize),

    #[error("--out {} names a single file but {count} types were given", path.display())]
    FileWithSeveralTypes { path: PathBuf, count: usize },

    #[error("{failed} of {total} types failed")]
    Failed { failed: usize, total: usize },
}

impl CliError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| CliError::Io {
            action,
            path,
            source,
        }
    }
}
