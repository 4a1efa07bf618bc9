//! Build-time tooling that turns CLDR gregorian calendar data into compact
//! per-locale lookup tables.
//!
//! The [`collector`] flattens a CLDR tree into `<locale>.json` files. The
//! [`compiler`] extracts every [`taxonomy`] entry from those files into a
//! [`dictionary::CompiledDictionary`] per locale, and an [`emit::Emitter`]
//! renders the result. [`pipeline::run`] ties the compile side together.

pub mod collector;
pub mod compiler;
pub mod config;
pub mod dictionary;
pub mod emit;
pub mod pipeline;
pub mod taxonomy;

pub use collector::{CollectError, CollectReport, Collector};
pub use compiler::{Compilation, CompileError, Compiler};
pub use config::{CONFIG_FILE, ConfigError, GeneratorConfig};
pub use dictionary::CompiledDictionary;
pub use emit::{EmitError, Emitter, GeneratedSources, RustSourceEmitter};
pub use pipeline::{GenerateError, GenerationSummary, generate, run};
pub use taxonomy::{PositionMap, Taxonomy, TaxonomyError, walk};
