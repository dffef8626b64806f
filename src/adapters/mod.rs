#[cfg(feature = "cli")]
pub mod cli;
pub mod form;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
pub fn run() -> Result<(), crate::error::AppError> {
    use crate::adapters::cli::{Args, execute, init_logging, parse_settings};

    let args = Args::parse();
    init_logging(&args);
    let settings = parse_settings(&args)?;

    let out = execute(&args.command, &settings)?;

    crate::adapters::cli::print_output(&out, &args)?;

    Ok(())
}
