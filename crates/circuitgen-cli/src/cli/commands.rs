//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("circuitgen")
        .about("Generate circuit breaker wrappers for Go interfaces and structs")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(circuit_command())
        .subcommand(inspect_command())
}

/// Generate wrapper source files.
pub fn circuit_command() -> Command {
    Command::new("circuit")
        .about("Generate circuit wrappers")
        .override_usage(
            "\
  circuitgen circuit --pkg <DIR> --name <TYPE> --out <FILE>
  circuitgen circuit --pkg <DIR> --name <TYPE>... --out <DIR>",
        )
        .after_help(
            r#"EXAMPLES:
  circuitgen circuit --pkg . --name Publisher --out ./wrappers/publisher.gen.go
  circuitgen circuit --pkg ./svc --name Publisher --name Store --out ./wrappers
  circuitgen circuit --pkg . --name Client --alias Dynamo --out . --circuit-major-version 3"#,
        )
        .arg(pkg_arg())
        .arg(name_arg())
        .arg(out_arg())
        .arg(alias_arg())
        .arg(circuit_major_version_arg())
        .arg(keep_going_arg())
        .arg(debug_arg())
        .arg(color_arg())
}

/// Show resolved metadata as JSON.
pub fn inspect_command() -> Command {
    Command::new("inspect")
        .about("Print the resolved metadata and signature fragments as JSON")
        .override_usage("  circuitgen inspect --pkg <DIR> --name <TYPE>... [--out-pkg <DIR>]")
        .after_help(
            r#"EXAMPLES:
  circuitgen inspect --pkg ./svc --name Publisher
  circuitgen inspect --pkg ./svc --name Publisher --out-pkg ./wrappers --compact"#,
        )
        .arg(pkg_arg())
        .arg(name_arg())
        .arg(out_pkg_arg())
        .arg(compact_arg())
        .arg(debug_arg())
        .arg(color_arg())
}
