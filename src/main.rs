//! # Drills Entry Point
//!
//! Each subcommand runs one drill and exits:
//!
//! ```text
//! main()
//!   │
//!   ├─> Initialize logging (stderr + rolling file)
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Load settings (config.json, defaults if missing)
//!   └─> Run the command on a Tokio runtime
//! ```
//!
//! ```bash
//! drills square -4
//! drills read-int --policy terminate
//! drills name Alice
//! drills songs weezer --raw
//! drills analyze child-mortality.xlsx --out charts
//! ```
//!
//! ## Exit status
//!
//! `0` on success. Drill diagnostics such as `x is not a number` or
//! `Too few arguments` are printed on stdout and exit with `1`. Other errors
//! are reported by `anyhow` on stderr, also with `1`.

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use anyhow::Result;
use clap::Parser as _;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    if let Err(e) = drills::logging::init() {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let cli = cli::Cli::parse();
    let settings = drills::config::load_app_config();

    // The song search is async; everything else finishes without awaiting.
    let code = tokio::runtime::Runtime::new()?
        .block_on(cli::run_command(cli.command, &settings))?;
    Ok(code)
}
