//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::circuit::CircuitArgs;
use crate::commands::inspect::InspectArgs;

pub struct CircuitParams {
    pub pkg: PathBuf,
    pub names: Vec<String>,
    pub out: PathBuf,
    pub alias: Option<String>,
    pub circuit_major_version: u32,
    pub keep_going: bool,
    pub debug: bool,
    pub color: ColorChoice,
}

impl CircuitParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            pkg: m.get_one::<PathBuf>("pkg").cloned().unwrap_or_default(),
            names: names(m),
            out: m.get_one::<PathBuf>("out").cloned().unwrap_or_default(),
            alias: m.get_one::<String>("alias").cloned(),
            circuit_major_version: m
                .get_one::<u32>("circuit_major_version")
                .copied()
                .unwrap_or(2),
            keep_going: m.get_flag("keep_going"),
            debug: m.get_flag("debug"),
            color: parse_color(m),
        }
    }
}

impl From<CircuitParams> for CircuitArgs {
    fn from(p: CircuitParams) -> Self {
        Self {
            pkg: p.pkg,
            names: p.names,
            out: p.out,
            alias: p.alias,
            circuit_major_version: p.circuit_major_version,
            keep_going: p.keep_going,
            color: p.color.should_colorize(),
        }
    }
}

pub struct InspectParams {
    pub pkg: PathBuf,
    pub names: Vec<String>,
    pub out_pkg: Option<PathBuf>,
    pub compact: bool,
    pub debug: bool,
    pub color: ColorChoice,
}

impl InspectParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            pkg: m.get_one::<PathBuf>("pkg").cloned().unwrap_or_default(),
            names: names(m),
            out_pkg: m.get_one::<PathBuf>("out_pkg").cloned(),
            compact: m.get_flag("compact"),
            debug: m.get_flag("debug"),
            color: parse_color(m),
        }
    }
}

impl From<InspectParams> for InspectArgs {
    fn from(p: InspectParams) -> Self {
        Self {
            pkg: p.pkg,
            names: p.names,
            out_pkg: p.out_pkg,
            compact: p.compact,
            color: p.color.should_colorize(),
        }
    }
}

fn names(m: &ArgMatches) -> Vec<String> {
    m.get_many::<String>("name")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
