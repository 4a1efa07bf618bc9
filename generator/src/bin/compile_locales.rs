//! `compile-locales`: compiles `locales/*.json` into generated Rust tables.

use std::io::{self, Write};

use calendar_locales::config::{CONFIG_FILE, GeneratorConfig};
use calendar_locales::pipeline::{GenerateError, run as generate};
use calendar_locales_common::{LoggingError, init_logging};
use calendar_locales_generator::{CompileCli, exit_code_for_run_result};
use camino::Utf8Path;
use clap::Parser;
use thiserror::Error;

/// Errors returned by the compiler CLI.
#[derive(Debug, Error)]
enum CompileCliError {
    /// The logger could not be configured.
    #[error(transparent)]
    Logging(#[from] LoggingError),

    /// Generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// The completion message could not be written.
    #[error("failed to write the completion message")]
    Report(#[source] io::Error),
}

fn main() {
    let _cli = CompileCli::parse();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let exit_code = exit_code_for_run_result(run(&mut stdout), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(stdout: &mut dyn Write) -> Result<(), CompileCliError> {
    init_logging()?;
    let config = GeneratorConfig::load(Utf8Path::new(CONFIG_FILE)).map_err(GenerateError::from)?;
    let summary = generate(&config)?;
    writeln!(stdout, "Done, check file {}", summary.module_path)
        .map_err(CompileCliError::Report)
}
