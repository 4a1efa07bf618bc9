//! Command-line definitions for the generator binaries.

use calendar_locales::collector::DEFAULT_TARGET_DIR;
use camino::Utf8PathBuf;
use clap::Parser;

/// Copy CLDR gregorian calendar files into a flat locale directory.
#[derive(Parser, Debug)]
#[command(name = "collect-locales")]
#[command(version, about)]
#[command(long_about = concat!(
    "Copy CLDR gregorian calendar files into a flat locale directory.\n\n",
    "Every `ca-gregorian.json` found under the source folder is copied to ",
    "`<target>/<locale>.json`, where the locale is the name of the directory ",
    "holding the file. Existing copies are overwritten; files from earlier runs ",
    "are reported but never deleted.",
))]
pub struct CollectCli {
    /// Root of the CLDR JSON tree, e.g. `cldr-json/cldr-dates-full/main`.
    #[arg(long, value_name = "PATH")]
    pub source: Option<Utf8PathBuf>,

    /// Directory receiving `<locale>.json` copies.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_TARGET_DIR)]
    pub target: Utf8PathBuf,
}

impl CollectCli {
    /// The source folder, empty when `--source` was not given.
    #[must_use]
    pub fn source_or_empty(&self) -> Utf8PathBuf {
        self.source.clone().unwrap_or_default()
    }
}

/// Compile `locales/*.json` into a generated Rust module and its tests.
#[derive(Parser, Debug)]
#[command(name = "compile-locales")]
#[command(version, about)]
#[command(after_help = concat!(
    "CONFIGURATION:\n",
    "  Paths are read from calendar-locales.toml in the working directory when\n",
    "  present (locales_dir, module_path, test_path, taxonomy).\n\n",
    "ENVIRONMENT:\n",
    "  CALENDAR_LOCALES_LOG   Log level: off, error, warn, info, debug, or trace.",
))]
pub struct CompileCli {}
