//! Shared helpers for the integration suites.
//!
//! `step` parses quoted values out of behaviour steps. `cldr` writes CLDR
//! shaped documents and trees into temporary directories.
pub mod cldr;
pub mod step;
