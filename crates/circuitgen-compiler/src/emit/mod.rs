//! Go source emission of circuit breaker wrappers.

mod config;
mod emitter;
mod render;


pub use config::{CIRCUIT_MODULE, Config};
pub use emitter::Emitter;

use crate::model::TypeMetadata;

/// Render the wrapper source file for `meta`.
pub fn emit_wrapper(meta: &TypeMetadata, config: Config) -> String {
    Emitter::new(meta, config).emit()
}
