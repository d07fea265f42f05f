//! Command-line interface of the `gtogrid` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::io::format::gtogrid_output;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a nicely formatted `GtoGrid` heading to the `gtogrid-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    gtogrid_output!("╭─────────────────────────────────────────────────────────────────────────────────────────────────────╮");
    gtogrid_output!("│                                                                                                     │");
    gtogrid_output!("│     ██████  ████████  ██████   ██████  ██████  ██ ██████                                            │");
    gtogrid_output!("│    ██          ██    ██    ██ ██       ██   ██ ██ ██   ██                                           │");
    gtogrid_output!("│    ██   ███    ██    ██    ██ ██   ███ ██████  ██ ██   ██                                           │");
    gtogrid_output!("│    ██    ██    ██    ██    ██ ██    ██ ██   ██ ██ ██   ██                                           │");
    gtogrid_output!("│     ██████     ██     ██████   ██████  ██   ██ ██ ██████                                            │");
    gtogrid_output!("│                                                                                                     │");
    gtogrid_output!("│    Contracted Gaussian-type orbitals and their derivatives on grids                                 │");
    gtogrid_output!("│                                                                                       {version:>13} │");
    gtogrid_output!("╰─────────────────────────────────────────────────────────────────────────────────────────────────────╯");
    gtogrid_output!("");
}

/// Command-line arguments of the `gtogrid` binary.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// The YAML configuration file specifying the shells, the grid points, the operator, and
    /// the evaluation parameters.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// The name of the file (without extension) to which the main output is written. If absent,
    /// the main output is written to the standard output only.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also shows debug messages on the standard error.
    #[arg(short, long)]
    pub debug: bool,
}
