mod cli;
mod commands;

use std::process::ExitCode;

use cli::{CircuitParams, InspectParams, build_cli};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    let matches = build_cli().get_matches();

    let result = match matches.subcommand() {
        Some(("circuit", m)) => {
            let params = CircuitParams::from_matches(m);
            init_tracing(params.debug);
            commands::circuit::run(params.into())
        }
        Some(("inspect", m)) => {
            let params = InspectParams::from_matches(m);
            init_tracing(params.debug);
            commands::inspect::run(params.into())
        }
        _ => unreachable!("clap should have caught this"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr. `RUST_LOG` wins over the default level; `--debug` wins over both.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
