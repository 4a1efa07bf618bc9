//! End-to-end compile step: taxonomy, compiler, emitter, output files.
//!
//! Output files are written only after every locale has compiled and the
//! emitter has rendered both sources, so a fatal error leaves any previous
//! output untouched.

use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use thiserror::Error;

use crate::compiler::{CompileError, Compiler, SkippedLocale};
use crate::config::{ConfigError, GeneratorConfig};
use crate::emit::{EmitError, Emitter, GeneratedSources, RustSourceEmitter};
use crate::taxonomy::{Taxonomy, TaxonomyError, walk};

/// Errors that abort generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The taxonomy is malformed or could not be loaded.
    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    /// A locale file could not be compiled.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The compiled tables could not be rendered.
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// A generated file could not be written.
    #[error("failed to write {path}")]
    Write {
        /// Destination path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// What a successful run produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenerationSummary {
    /// Path of the written table module.
    pub module_path: Utf8PathBuf,
    /// Path of the written test module.
    pub test_path: Utf8PathBuf,
    /// Number of locales in the output.
    pub compiled: usize,
    /// Locale files left out of the output.
    pub skipped: Vec<SkippedLocale>,
}

/// Compile `config.locales_dir` against `taxonomy` and write the sources
/// rendered by `emitter`.
///
/// # Errors
///
/// Returns a [`GenerateError`] for any fatal problem. Nothing is written
/// unless compilation and emission both succeed.
pub fn generate<E>(
    config: &GeneratorConfig,
    taxonomy: &Taxonomy,
    emitter: &E,
) -> Result<GenerationSummary, GenerateError>
where
    E: Emitter<Artifact = GeneratedSources>,
{
    let positions = walk(taxonomy)?;
    let compilation = Compiler::new(&positions).compile_dir(&config.locales_dir)?;
    let sources = emitter.emit(&positions, &compilation.dictionaries)?;

    write_output(&config.module_path, sources.module())?;
    write_output(&config.test_path, sources.tests())?;

    info!(
        target: "pipeline",
        "wrote {} locale(s) to {} and {}",
        compilation.dictionaries.len(),
        config.module_path,
        config.test_path,
    );

    Ok(GenerationSummary {
        module_path: config.module_path.clone(),
        test_path: config.test_path.clone(),
        compiled: compilation.dictionaries.len(),
        skipped: compilation.skipped,
    })
}

/// Run generation with the configured taxonomy and the Rust source emitter.
///
/// # Errors
///
/// Returns a [`GenerateError`] when the taxonomy cannot be loaded or
/// [`generate`] fails.
pub fn run(config: &GeneratorConfig) -> Result<GenerationSummary, GenerateError> {
    let taxonomy = config.load_taxonomy()?;
    let emitter = RustSourceEmitter::new(config.module_name());
    generate(config, &taxonomy, &emitter)
}

fn write_output(path: &Utf8Path, contents: &str) -> Result<(), GenerateError> {
    let write_error = |source| GenerateError::Write {
        path: path.to_owned(),
        source,
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, contents).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use tempfile::TempDir;

    struct Workspace {
        _dir: TempDir,
        config: GeneratorConfig,
    }

    impl Workspace {
        fn write_locale(&self, name: &str, contents: &str) {
            fs::create_dir_all(&self.config.locales_dir).expect("create locales dir");
            fs::write(self.config.locales_dir.join(name), contents).expect("write locale file");
        }
    }

    #[fixture]
    fn workspace() -> Workspace {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 temp dir");
        let config = GeneratorConfig {
            locales_dir: root.join("locales"),
            module_path: root.join("out/locales_gen.rs"),
            test_path: root.join("out/locales_gen_test.rs"),
            taxonomy: None,
        };
        Workspace { _dir: dir, config }
    }

    fn era_taxonomy() -> Taxonomy {
        Taxonomy::from_toml_str(concat!(
            "[[fields]]\n",
            "name = \"era\"\n",
            "cldr_node = \"eras\"\n",
            "keys = [\"0\", \"1\"]\n",
            "widths = [{ width = \"wide\", path = \"eraNames\" }]\n",
        ))
        .expect("taxonomy should parse")
    }

    fn era_document(locale: &str, before: &str, after: &str) -> String {
        json!({ "main": { locale: { "dates": { "calendars": { "gregorian": {
            "eras": { "eraNames": { "0": before, "1": after } }
        } } } } } })
        .to_string()
    }

    #[rstest]
    fn writes_module_and_tests(workspace: Workspace) {
        workspace.write_locale("fr.json", &era_document("fr", "av. J.-C.", "ap. J.-C."));
        workspace.write_locale("root.json", &era_document("root", "BCE", "CE"));
        workspace.write_locale("not_a-locale!.json", "{}");

        let summary = generate(
            &workspace.config,
            &era_taxonomy(),
            &RustSourceEmitter::default(),
        )
        .expect("generation should succeed");

        assert_eq!(summary.compiled, 2);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(
            summary.skipped.first().and_then(|skip| skip.path.file_name()),
            Some("not_a-locale!.json")
        );
        let module = fs::read_to_string(&summary.module_path).expect("module written");
        let tests = fs::read_to_string(&summary.test_path).expect("tests written");
        assert!(module.contains("const FR_DATA: &str = \"av. J.-C.ap. J.-C.\";"));
        assert!(module.contains("const ROOT_DATA: &str = \"BCECE\";"));
        assert!(tests.contains("fn localize_fr()"));
        assert!(tests.contains("fn localize_root()"));
    }

    #[rstest]
    fn missing_gregorian_writes_nothing(workspace: Workspace) {
        workspace.write_locale("en.json", &era_document("en", "BC", "AD"));
        workspace.write_locale(
            "fr.json",
            &json!({ "main": { "fr": { "dates": {} } } }).to_string(),
        );

        let error = generate(
            &workspace.config,
            &era_taxonomy(),
            &RustSourceEmitter::default(),
        )
        .expect_err("missing gregorian should abort");

        assert!(matches!(
            error,
            GenerateError::Compile(CompileError::MissingGregorian { .. })
        ));
        assert!(!workspace.config.module_path.exists());
        assert!(!workspace.config.test_path.exists());
    }

    #[rstest]
    fn emit_failure_writes_nothing(workspace: Workspace) {
        workspace.write_locale("fr.json", &era_document("fr", "a", "b"));

        let error = generate(
            &workspace.config,
            &era_taxonomy(),
            &RustSourceEmitter::new("not-an-identifier"),
        )
        .expect_err("invalid module name should abort");

        assert!(matches!(error, GenerateError::Emit(_)));
        assert!(!workspace.config.module_path.exists());
    }

    #[rstest]
    fn run_reports_unreadable_taxonomy(mut workspace: Workspace) {
        workspace.config.taxonomy = Some(workspace.config.locales_dir.join("missing.toml"));

        let error = run(&workspace.config).expect_err("missing taxonomy should abort");

        assert!(matches!(
            error,
            GenerateError::Taxonomy(TaxonomyError::Read { .. })
        ));
    }

    #[rstest]
    fn run_uses_the_module_file_stem(workspace: Workspace) {
        workspace.write_locale("en.json", &era_document("en", "BC", "AD"));

        let summary = run(&workspace.config).expect("generation should succeed");

        let tests = fs::read_to_string(&summary.test_path).expect("tests written");
        assert!(tests.contains("use super::locales_gen::{MESSAGE_KEY_TO_INDEX, dictionary};"));
    }
}
