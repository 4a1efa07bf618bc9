//! Copies per-locale gregorian calendar fragments out of a CLDR tree.
//!
//! CLDR ships one `ca-gregorian.json` per locale directory, e.g.
//! `cldr-dates-full/main/en-GB/ca-gregorian.json`. The collector walks the
//! source tree in file-name order and copies every such file to
//! `<target>/<locale>.json`, overwriting earlier copies.
//!
//! The target directory is never pruned. Locale files left behind by earlier
//! runs are reported as stale in the [`CollectReport`] and logged, but kept.

use std::collections::BTreeSet;
use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use thiserror::Error;
use walkdir::WalkDir;

/// File name of the gregorian calendar fragment inside each locale directory.
pub const MARKER_FILE: &str = "ca-gregorian.json";

/// Directory the collector writes to when no target is given.
pub const DEFAULT_TARGET_DIR: &str = "locales";

/// Errors that abort a collection run.
#[derive(Debug, Error)]
pub enum CollectError {
    /// No source directory was supplied.
    #[error("source folder must be provided")]
    MissingSource,

    /// The source path is not a directory.
    #[error("source folder {path} is not a directory")]
    SourceNotDirectory {
        /// The supplied source path.
        path: Utf8PathBuf,
    },

    /// The target directory could not be created.
    #[error("failed to create target folder {path}")]
    CreateTarget {
        /// The target directory.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A fragment could not be copied.
    #[error("failed to copy {from} to {to}")]
    Copy {
        /// Source fragment.
        from: Utf8PathBuf,
        /// Destination file.
        to: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The target directory could not be listed for stale files.
    #[error("failed to scan target folder {path}")]
    ScanTarget {
        /// The target directory.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A fragment copied into the target directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollectedLocale {
    /// Locale code taken from the parent directory name.
    pub locale: String,
    /// Original fragment path.
    pub source: Utf8PathBuf,
    /// Destination path.
    pub target: Utf8PathBuf,
}

/// Outcome of a collection run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CollectReport {
    /// Fragments copied, in walk order.
    pub copied: Vec<CollectedLocale>,
    /// Locale files in the target that this run did not produce.
    pub stale: Vec<Utf8PathBuf>,
}

/// Walks a CLDR tree and copies gregorian fragments into a flat directory.
#[derive(Clone, Debug)]
pub struct Collector {
    source: Utf8PathBuf,
    target: Utf8PathBuf,
}

impl Collector {
    /// Create a collector reading from `source` and writing to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::MissingSource`] when `source` is empty.
    pub fn new(source: Utf8PathBuf, target: Utf8PathBuf) -> Result<Self, CollectError> {
        if source.as_str().trim().is_empty() {
            return Err(CollectError::MissingSource);
        }
        Ok(Self { source, target })
    }

    /// Source root.
    #[must_use]
    pub fn source(&self) -> &Utf8Path {
        &self.source
    }

    /// Target directory.
    #[must_use]
    pub fn target(&self) -> &Utf8Path {
        &self.target
    }

    /// Copy every gregorian fragment under the source root into the target.
    ///
    /// Unreadable directory entries are logged and skipped; a failed copy
    /// aborts the run.
    ///
    /// # Errors
    ///
    /// Returns a [`CollectError`] when the source is not a directory, the
    /// target cannot be created or listed, or a copy fails.
    pub fn collect(&self) -> Result<CollectReport, CollectError> {
        if !self.source.is_dir() {
            return Err(CollectError::SourceNotDirectory {
                path: self.source.clone(),
            });
        }

        fs::create_dir_all(&self.target).map_err(|source| CollectError::CreateTarget {
            path: self.target.clone(),
            source,
        })?;

        let mut report = CollectReport::default();
        for fragment in self.fragments() {
            let Some(locale) = locale_for(&fragment) else {
                warn!(target: "collector", "skipping {fragment}: no parent directory name");
                continue;
            };
            report.copied.push(self.copy(locale, &fragment)?);
        }

        report.stale = self.stale_files(&report.copied)?;
        for stale in &report.stale {
            warn!(target: "collector", "stale locale file {stale} was not refreshed");
        }

        info!(
            target: "collector",
            "copied {} locale file(s) into {}",
            report.copied.len(),
            self.target,
        );
        Ok(report)
    }

    fn fragments(&self) -> impl Iterator<Item = Utf8PathBuf> + '_ {
        WalkDir::new(&self.source)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(walked) => Some(walked),
                Err(error) => {
                    warn!(target: "collector", "skipping unreadable entry: {error}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && entry.file_name() == MARKER_FILE)
            .filter_map(|entry| match Utf8PathBuf::from_path_buf(entry.into_path()) {
                Ok(path) => Some(path),
                Err(raw) => {
                    warn!(target: "collector", "skipping non UTF-8 path {}", raw.display());
                    None
                }
            })
    }

    fn copy(&self, locale: &str, fragment: &Utf8Path) -> Result<CollectedLocale, CollectError> {
        let target = self.target.join(format!("{locale}.json"));
        debug!(target: "collector", "copying {fragment} to {target}");
        fs::copy(fragment, &target).map_err(|source| CollectError::Copy {
            from: fragment.to_owned(),
            to: target.clone(),
            source,
        })?;

        Ok(CollectedLocale {
            locale: locale.to_owned(),
            source: fragment.to_owned(),
            target,
        })
    }

    fn stale_files(&self, copied: &[CollectedLocale]) -> Result<Vec<Utf8PathBuf>, CollectError> {
        let scan_error = |source| CollectError::ScanTarget {
            path: self.target.clone(),
            source,
        };
        let fresh: BTreeSet<&str> = copied.iter().map(|entry| entry.locale.as_str()).collect();

        let mut stale = Vec::new();
        for listed in self.target.read_dir_utf8().map_err(scan_error)? {
            let entry = listed.map_err(scan_error)?;
            let path = entry.path();
            if path.extension() != Some("json") || !path.is_file() {
                continue;
            }
            if path.file_stem().is_some_and(|stem| !fresh.contains(stem)) {
                stale.push(path.to_owned());
            }
        }
        stale.sort();
        Ok(stale)
    }
}

/// Locale code for a fragment: the name of its immediate parent directory.
fn locale_for(fragment: &Utf8Path) -> Option<&str> {
    fragment
        .parent()
        .and_then(Utf8Path::file_name)
        .filter(|name| !name.is_empty())
}
