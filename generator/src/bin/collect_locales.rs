//! `collect-locales`: flattens a CLDR tree into `<target>/<locale>.json`.

use calendar_locales::collector::{CollectError, Collector};
use calendar_locales_common::{LoggingError, init_logging};
use calendar_locales_generator::{CollectCli, exit_code_for_run_result};
use clap::Parser;
use thiserror::Error;

/// Errors returned by the collector CLI.
#[derive(Debug, Error)]
enum CollectCliError {
    /// The logger could not be configured.
    #[error(transparent)]
    Logging(#[from] LoggingError),

    /// Collection failed.
    #[error(transparent)]
    Collect(#[from] CollectError),
}

fn main() {
    let cli = CollectCli::parse();
    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run(&cli), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &CollectCli) -> Result<(), CollectCliError> {
    init_logging()?;
    let collector = Collector::new(cli.source_or_empty(), cli.target.clone())?;
    let report = collector.collect()?;
    log::debug!(
        target: "collector",
        "{} copied, {} stale",
        report.copied.len(),
        report.stale.len(),
    );
    Ok(())
}
