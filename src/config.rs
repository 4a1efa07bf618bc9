//! Generator configuration loaded from `calendar-locales.toml`.
//!
//! Every key is optional. A missing file yields [`GeneratorConfig::default`],
//! which reads `locales/*.json` and writes `locales/locales_gen.rs` and
//! `locales/locales_gen_test.rs` using the built-in gregorian taxonomy.

use std::borrow::Cow;
use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

use crate::taxonomy::{Taxonomy, TaxonomyError};

/// Configuration file read from the working directory.
pub const CONFIG_FILE: &str = "calendar-locales.toml";

const DEFAULT_LOCALES_DIR: &str = "locales";
const DEFAULT_MODULE_PATH: &str = "locales/locales_gen.rs";
const DEFAULT_TEST_PATH: &str = "locales/locales_gen_test.rs";
const FALLBACK_MODULE_NAME: &str = "locales_gen";

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read configuration {path}")]
    Read {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid configuration TOML.
    #[error("failed to parse configuration {path}: {reason}")]
    Parse {
        /// Path to the configuration file.
        path: Utf8PathBuf,
        /// Parser message.
        reason: String,
    },
}

/// Paths used by the compile step.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory holding the flat `<locale>.json` files.
    pub locales_dir: Utf8PathBuf,
    /// Destination of the generated table module.
    pub module_path: Utf8PathBuf,
    /// Destination of the generated test module.
    pub test_path: Utf8PathBuf,
    /// Taxonomy file replacing the built-in gregorian taxonomy.
    pub taxonomy: Option<Utf8PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            locales_dir: Utf8PathBuf::from(DEFAULT_LOCALES_DIR),
            module_path: Utf8PathBuf::from(DEFAULT_MODULE_PATH),
            test_path: Utf8PathBuf::from(DEFAULT_TEST_PATH),
            taxonomy: None,
        }
    }
}

impl GeneratorConfig {
    /// Parse configuration from TOML text. `origin` only appears in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(input: &str, origin: &Utf8Path) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|error| ConfigError::Parse {
            path: origin.to_owned(),
            reason: error.to_string(),
        })
    }

    /// Load configuration from `path`, falling back to defaults when the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        Self::load_with(path, |path| fs::read_to_string(path))
    }

    /// Load configuration through `reader`. A [`io::ErrorKind::NotFound`]
    /// error from the reader selects the defaults.
    ///
    /// This exists so tests can supply file contents without touching the
    /// file system.
    ///
    /// # Examples
    ///
    /// ```
    /// use calendar_locales::config::GeneratorConfig;
    /// use camino::Utf8Path;
    ///
    /// let config = GeneratorConfig::load_with(Utf8Path::new("stub.toml"), |_| {
    ///     Ok(String::from("locales_dir = \"data\"\n"))
    /// })
    /// .expect("stub configuration should parse");
    /// assert_eq!(config.locales_dir, "data");
    /// assert_eq!(config.module_path, "locales/locales_gen.rs");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the reader fails for any other reason
    /// or the contents cannot be parsed.
    pub fn load_with<F>(path: &Utf8Path, reader: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&Utf8Path) -> io::Result<String>,
    {
        match reader(path) {
            Ok(contents) => Self::from_toml_str(&contents, path),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_owned(),
                source,
            }),
        }
    }

    /// The configured taxonomy, or the built-in gregorian one.
    ///
    /// # Errors
    ///
    /// Returns a [`TaxonomyError`] when the configured file cannot be loaded.
    pub fn load_taxonomy(&self) -> Result<Cow<'static, Taxonomy>, TaxonomyError> {
        self.taxonomy.as_ref().map_or_else(
            || Ok(Cow::Borrowed(Taxonomy::gregorian())),
            |path| Taxonomy::load(path).map(Cow::Owned),
        )
    }

    /// Name of the generated module, taken from the module file stem.
    #[must_use]
    pub fn module_name(&self) -> &str {
        self.module_path
            .file_stem()
            .filter(|stem| !stem.is_empty())
            .unwrap_or(FALLBACK_MODULE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn stub(contents: &'static str) -> impl FnOnce(&Utf8Path) -> io::Result<String> {
        move |_| Ok(contents.to_owned())
    }

    #[rstest]
    fn defaults_match_the_documented_layout() {
        let config = GeneratorConfig::default();

        assert_eq!(config.locales_dir, "locales");
        assert_eq!(config.module_path, "locales/locales_gen.rs");
        assert_eq!(config.test_path, "locales/locales_gen_test.rs");
        assert!(config.taxonomy.is_none());
        assert_eq!(config.module_name(), "locales_gen");
    }

    #[rstest]
    fn missing_file_selects_defaults() {
        let config = GeneratorConfig::load_with(Utf8Path::new(CONFIG_FILE), |_| {
            Err(io::Error::from(io::ErrorKind::NotFound))
        })
        .expect("a missing file is not an error");

        assert_eq!(config, GeneratorConfig::default());
    }

    #[rstest]
    fn unreadable_file_is_an_error() {
        let error = GeneratorConfig::load_with(Utf8Path::new(CONFIG_FILE), |_| {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        })
        .expect_err("permission errors should surface");

        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[rstest]
    fn deserialises_overrides() {
        let source = concat!(
            "locales_dir = \"cldr/flat\"\n",
            "module_path = \"src/tables/calendar.rs\"\n",
            "taxonomy = \"taxonomy.toml\"\n",
        );
        let config = GeneratorConfig::load_with(Utf8Path::new(CONFIG_FILE), stub(source))
            .expect("expected configuration to parse successfully");

        assert_eq!(config.locales_dir, "cldr/flat");
        assert_eq!(config.module_path, "src/tables/calendar.rs");
        assert_eq!(config.test_path, "locales/locales_gen_test.rs");
        assert_eq!(config.taxonomy.as_deref(), Some(Utf8Path::new("taxonomy.toml")));
        assert_eq!(config.module_name(), "calendar");
    }

    #[rstest]
    #[case::unknown_key("unexpected = true\n")]
    #[case::wrong_type("locales_dir = 3\n")]
    #[case::not_toml("locales_dir = \n")]
    fn rejects_invalid_configuration(#[case] source: &'static str) {
        let error = GeneratorConfig::load_with(Utf8Path::new(CONFIG_FILE), stub(source))
            .expect_err("invalid configuration should be rejected");

        assert!(matches!(error, ConfigError::Parse { ref path, .. } if path == CONFIG_FILE));
    }

    #[rstest]
    fn uses_built_in_taxonomy_by_default() {
        let taxonomy = GeneratorConfig::default()
            .load_taxonomy()
            .expect("built-in taxonomy should load");

        assert!(matches!(taxonomy, Cow::Borrowed(_)));
        assert_eq!(taxonomy.fields().len(), Taxonomy::gregorian().fields().len());
    }

    #[rstest]
    fn loads_configured_taxonomy_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("UTF-8 temp dir");
        let path = root.join("taxonomy.toml");
        fs::write(
            &path,
            concat!(
                "[[fields]]\n",
                "name = \"era\"\n",
                "cldr_node = \"eras\"\n",
                "keys = [\"0\", \"1\"]\n",
                "widths = [{ width = \"wide\", path = \"eraNames\" }]\n",
            ),
        )
        .expect("write taxonomy");

        let config = GeneratorConfig {
            taxonomy: Some(path),
            ..GeneratorConfig::default()
        };
        let taxonomy = config.load_taxonomy().expect("taxonomy should load");

        assert_eq!(taxonomy.fields().len(), 1);
    }
}
