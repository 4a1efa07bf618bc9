//! Turns compiled dictionaries into a generated artifact.
//!
//! Extraction and emission meet at a single seam: an [`Emitter`] receives the
//! shared [`PositionMap`] and every [`CompiledDictionary`] and produces an
//! artifact. [`RustSourceEmitter`] renders a Rust module of static tables and
//! a companion test module.

use thiserror::Error;

use crate::dictionary::CompiledDictionary;
use crate::taxonomy::PositionMap;

mod rust_source;
mod template;

pub use rust_source::{DEFAULT_GENERATOR, GeneratedSources, RustSourceEmitter};

/// Errors raised while rendering an artifact.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum EmitError {
    /// Two locales map to the same generated identifier.
    #[error("locales `{first}` and `{second}` both map to identifier prefix `{prefix}`")]
    DuplicateIdentifier {
        /// The shared identifier prefix.
        prefix: String,
        /// First locale using the prefix.
        first: String,
        /// Second locale using the prefix.
        second: String,
    },

    /// A dictionary was compiled against a different position map.
    #[error("locale `{locale}` has {actual} index entries, expected {expected}")]
    IndexMismatch {
        /// Offending locale.
        locale: String,
        /// Index length implied by the position map.
        expected: usize,
        /// Index length found.
        actual: usize,
    },

    /// The module name cannot be used as a Rust identifier.
    #[error("`{name}` is not a valid module name")]
    InvalidModuleName {
        /// The rejected name.
        name: String,
    },
}

/// Renders the shared position map and per-locale dictionaries.
pub trait Emitter {
    /// What the emitter produces.
    type Artifact;

    /// Render `dictionaries`, all compiled against `positions`.
    ///
    /// # Errors
    ///
    /// Returns an [`EmitError`] when the inputs cannot be rendered.
    fn emit(
        &self,
        positions: &PositionMap,
        dictionaries: &[CompiledDictionary],
    ) -> Result<Self::Artifact, EmitError>;
}
