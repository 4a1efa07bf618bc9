//! Compiles flat CLDR locale files into per-locale dictionaries.
//!
//! The compiler reads every `*.json` file in the locale directory in sorted
//! order. Problems confined to one locale (an invalid code, unparseable JSON,
//! a missing `main.<locale>` entry) are logged and the locale is skipped.
//! Structural problems (an unreadable file, a locale entry without a
//! gregorian calendar) abort the whole compilation.

use camino::{Utf8Path, Utf8PathBuf};
use calendar_locales_common::{LocaleCode, LocaleError};
use log::{info, warn};
use serde_json::Value;
use std::fmt;
use std::fs;
use thiserror::Error;

use crate::dictionary::{BlobTooLarge, CompiledDictionary};
use crate::taxonomy::PositionMap;

mod extract;

/// Path from `main.<locale>` to the gregorian calendar subtree.
pub const GREGORIAN_PATH: &str = "dates.calendars.gregorian";

/// Fatal compilation errors.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The locale directory could not be turned into a glob pattern.
    #[error("invalid locale pattern {pattern}: {reason}")]
    Pattern {
        /// The rejected pattern.
        pattern: String,
        /// Description from `glob`.
        reason: String,
    },

    /// An entry in the locale directory could not be listed.
    #[error("failed to list locale files")]
    Listing(#[from] glob::GlobError),

    /// A locale file path is not valid UTF-8.
    #[error("locale file path {path} is not valid UTF-8")]
    NonUtf8Path {
        /// The offending path.
        path: std::path::PathBuf,
    },

    /// A locale file could not be read.
    #[error("failed to read locale file {path}")]
    Read {
        /// Path to the locale file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A locale entry has no gregorian calendar.
    #[error("locale `{locale}` in {path} is not a gregorian calendar: missing `dates.calendars.gregorian`")]
    MissingGregorian {
        /// Locale being compiled.
        locale: String,
        /// File the locale came from.
        path: Utf8PathBuf,
    },

    /// A locale's data outgrew the index offsets.
    #[error(transparent)]
    BlobTooLarge(#[from] BlobTooLarge),
}

/// Why a locale file was left out of the output.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SkipReason {
    /// The file stem is not a valid language identifier.
    InvalidLocale(LocaleError),
    /// The file is not valid JSON.
    MalformedJson(String),
    /// The document has no `main.<locale>` entry.
    MissingLocaleEntry,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocale(error) => write!(formatter, "{error}"),
            Self::MalformedJson(reason) => write!(formatter, "malformed JSON: {reason}"),
            Self::MissingLocaleEntry => formatter.write_str("no `main.<locale>` entry"),
        }
    }
}

/// A locale file that was skipped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SkippedLocale {
    /// File that was skipped.
    pub path: Utf8PathBuf,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Result of compiling a locale directory.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Compilation {
    /// Dictionaries in file listing order.
    pub dictionaries: Vec<CompiledDictionary>,
    /// Files left out of the output.
    pub skipped: Vec<SkippedLocale>,
}

/// Outcome of compiling a single file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FileOutcome {
    /// The locale compiled.
    Compiled(CompiledDictionary),
    /// The locale was skipped.
    Skipped(SkipReason),
}

/// Compiles locale documents against a shared [`PositionMap`].
#[derive(Clone, Copy, Debug)]
pub struct Compiler<'a> {
    positions: &'a PositionMap,
}

impl<'a> Compiler<'a> {
    /// Create a compiler for `positions`.
    #[must_use]
    pub const fn new(positions: &'a PositionMap) -> Self {
        Self { positions }
    }

    /// Compile every `*.json` file directly inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] on the first fatal problem; no partial
    /// [`Compilation`] is returned.
    pub fn compile_dir(&self, dir: &Utf8Path) -> Result<Compilation, CompileError> {
        let pattern = format!("{}/*.json", glob::Pattern::escape(dir.as_str()));
        let paths = glob::glob(&pattern).map_err(|error| CompileError::Pattern {
            pattern: pattern.clone(),
            reason: error.to_string(),
        })?;

        let mut compilation = Compilation::default();
        for entry in paths {
            let path = Utf8PathBuf::from_path_buf(entry?)
                .map_err(|path| CompileError::NonUtf8Path { path })?;

            match self.compile_file(&path)? {
                FileOutcome::Compiled(dictionary) => compilation.dictionaries.push(dictionary),
                FileOutcome::Skipped(reason) => {
                    compilation.skipped.push(SkippedLocale { path, reason });
                }
            }
        }

        info!(
            target: "compiler",
            "compiled {} locale(s), skipped {}",
            compilation.dictionaries.len(),
            compilation.skipped.len(),
        );
        Ok(compilation)
    }

    /// Compile one locale file, deriving the locale from its file name.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Read`] when the file cannot be read and the
    /// errors of [`Self::compile_document`] otherwise.
    pub fn compile_file(&self, path: &Utf8Path) -> Result<FileOutcome, CompileError> {
        let locale = match LocaleCode::from_file_name(path) {
            Ok(locale) => locale,
            Err(error) => {
                warn!(target: "compiler", "skipping {path}: {error}");
                return Ok(FileOutcome::Skipped(SkipReason::InvalidLocale(error)));
            }
        };

        let contents = fs::read(path).map_err(|source| CompileError::Read {
            path: path.to_owned(),
            source,
        })?;

        let document: Value = match serde_json::from_slice(&contents) {
            Ok(document) => document,
            Err(error) => {
                warn!(target: "compiler", "skipping locale `{locale}`: malformed JSON: {error}");
                return Ok(FileOutcome::Skipped(SkipReason::MalformedJson(
                    error.to_string(),
                )));
            }
        };

        self.compile_document(locale, &document, path)
    }

    /// Compile a parsed document for `locale`. `origin` is only used in
    /// diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::MissingGregorian`] when `main.<locale>` has no
    /// gregorian calendar and [`CompileError::BlobTooLarge`] when the data
    /// overflows the index.
    pub fn compile_document(
        &self,
        locale: LocaleCode,
        document: &Value,
        origin: &Utf8Path,
    ) -> Result<FileOutcome, CompileError> {
        let Some(entry) = document
            .get("main")
            .and_then(|main| main.get(locale.as_str()))
            .filter(|entry| !entry.is_null())
        else {
            warn!(target: "compiler", "skipping locale `{locale}`: no `main.{locale}` entry");
            return Ok(FileOutcome::Skipped(SkipReason::MissingLocaleEntry));
        };

        let Some(gregorian) = extract::navigate(entry, GREGORIAN_PATH) else {
            return Err(CompileError::MissingGregorian {
                locale: locale.to_string(),
                path: origin.to_owned(),
            });
        };

        let mut dictionary = CompiledDictionary::with_capacity(locale, self.positions.len());
        for key_index in self.positions.entries() {
            dictionary.push(&extract::leaf_text(gregorian, &key_index.xpath))?;
        }

        Ok(FileOutcome::Compiled(dictionary))
    }
}
