//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Directory of the package declaring the types (-p/--pkg).
pub fn pkg_arg() -> Arg {
    Arg::new("pkg")
        .short('p')
        .long("pkg")
        .value_name("DIR")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Directory of the Go package declaring the types")
}

/// Types to wrap (-n/--name), repeatable.
pub fn name_arg() -> Arg {
    Arg::new("name")
        .short('n')
        .long("name")
        .value_name("TYPE")
        .required(true)
        .action(ArgAction::Append)
        .help("Interface or struct to wrap (repeatable)")
}

/// Output file or directory (-o/--out).
pub fn out_arg() -> Arg {
    Arg::new("out")
        .short('o')
        .long("out")
        .value_name("PATH")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Output file, or directory for <type>.gen.go files")
}

/// Wrapper name override (--alias).
pub fn alias_arg() -> Arg {
    Arg::new("alias")
        .long("alias")
        .value_name("NAME")
        .help("Name the wrapper CircuitWrapper<NAME> (single type only)")
}

/// Circuit library major version (--circuit-major-version).
pub fn circuit_major_version_arg() -> Arg {
    Arg::new("circuit_major_version")
        .long("circuit-major-version")
        .value_name("N")
        .default_value("2")
        .value_parser(value_parser!(u32))
        .help("Major version of github.com/cep21/circuit to import")
}

/// Keep generating after a failed type (--keep-going).
pub fn keep_going_arg() -> Arg {
    Arg::new("keep_going")
        .long("keep-going")
        .action(ArgAction::SetTrue)
        .help("Continue with the remaining types when one fails")
}

/// Output package directory for descriptor qualification (--out-pkg).
pub fn out_pkg_arg() -> Arg {
    Arg::new("out_pkg")
        .long("out-pkg")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Package the wrapper would be generated into (default: --pkg)")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON")
}

/// Debug logging (--debug).
pub fn debug_arg() -> Arg {
    Arg::new("debug")
        .long("debug")
        .action(ArgAction::SetTrue)
        .help("Log debug information to stderr")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}
