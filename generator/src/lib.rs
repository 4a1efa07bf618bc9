//! Argument parsing and exit handling shared by the `collect-locales` and
//! `compile-locales` binaries.

pub mod cli;
pub mod exit;

pub use cli::{CollectCli, CompileCli};
pub use exit::{exit_code_for_run_result, write_stderr_line};
