//! Locale codes derived from CLDR file and directory names.
//!
//! A [`LocaleCode`] keeps the spelling found on disk (for example `en-GB`)
//! because that spelling names both the flat JSON file and the `main.<code>`
//! entry inside it. Construction validates the code as a Unicode language
//! identifier so malformed names are rejected before any JSON is parsed.
//! CLDR's base locale, `root`, is accepted as the undetermined language.

use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use unic_langid::LanguageIdentifier;

/// CLDR's base locale. It is not a language subtag, so it maps to `und`.
pub const ROOT_LOCALE: &str = "root";

/// Errors raised when a locale code cannot be derived or validated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    /// The locale code was blank.
    #[error("locale code is empty")]
    Empty,

    /// The locale code is not a well-formed language identifier.
    #[error("invalid locale `{code}`: {reason}")]
    Invalid {
        /// The rejected locale code.
        code: String,
        /// Parser diagnostic from `unic-langid`.
        reason: String,
    },

    /// The path has no file stem to derive a locale code from.
    #[error("cannot derive a locale code from {path}")]
    MissingStem {
        /// The offending path.
        path: Utf8PathBuf,
    },
}

/// A validated locale code such as `fr` or `en-GB`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleCode {
    raw: String,
    identifier: LanguageIdentifier,
}

impl LocaleCode {
    /// Validate `raw` as a language identifier.
    ///
    /// ```
    /// use calendar_locales_common::LocaleCode;
    ///
    /// let code = LocaleCode::parse("en-GB").expect("valid locale");
    /// assert_eq!(code.as_str(), "en-GB");
    /// assert!(LocaleCode::parse("not a locale").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::Empty`] for blank input and
    /// [`LocaleError::Invalid`] when `unic-langid` rejects the code.
    pub fn parse(raw: &str) -> Result<Self, LocaleError> {
        if raw.trim().is_empty() {
            return Err(LocaleError::Empty);
        }

        let identifier = if raw == ROOT_LOCALE {
            LanguageIdentifier::default()
        } else {
            LanguageIdentifier::from_str(raw).map_err(|error| LocaleError::Invalid {
                code: raw.to_owned(),
                reason: error.to_string(),
            })?
        };

        Ok(Self {
            raw: raw.to_owned(),
            identifier,
        })
    }

    /// Derive the locale code from a file name, dropping directory and
    /// extension (`locales/en-GB.json` becomes `en-GB`).
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::MissingStem`] when the path has no file stem,
    /// otherwise the errors of [`Self::parse`].
    pub fn from_file_name(path: &Utf8Path) -> Result<Self, LocaleError> {
        let stem = path.file_stem().ok_or_else(|| LocaleError::MissingStem {
            path: path.to_owned(),
        })?;
        Self::parse(stem)
    }

    /// The locale code as spelled on disk.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed language identifier.
    #[must_use]
    pub const fn identifier(&self) -> &LanguageIdentifier {
        &self.identifier
    }

    /// Upper-case identifier stem for generated statics (`en-GB` becomes
    /// `EN_GB`).
    #[must_use]
    pub fn constant_prefix(&self) -> String {
        self.raw
            .chars()
            .map(|character| match character {
                '-' | '_' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect()
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.raw)
    }
}

impl FromStr for LocaleCode {
    type Err = LocaleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("fr")]
    #[case("en-GB")]
    #[case("zh-Hant-HK")]
    #[case("sr-Latn")]
    #[case("es-419")]
    fn accepts_cldr_locale_codes(#[case] raw: &str) {
        let code = LocaleCode::parse(raw).expect("locale should parse");
        assert_eq!(code.as_str(), raw);
        assert_eq!(code.to_string(), raw);
    }

    #[test]
    fn accepts_the_cldr_root_locale() {
        let code = LocaleCode::parse("root").expect("root should parse");
        assert_eq!(code.as_str(), "root");
        assert_eq!(code.identifier(), &LanguageIdentifier::default());
        assert_eq!(code.constant_prefix(), "ROOT");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_codes(#[case] raw: &str) {
        assert_eq!(LocaleCode::parse(raw), Err(LocaleError::Empty));
    }

    #[rstest]
    #[case("not_a-locale!")]
    #[case("en_GB!")]
    #[case("toolonglanguagecode")]
    fn rejects_malformed_codes(#[case] raw: &str) {
        let error = LocaleCode::parse(raw).expect_err("locale should be rejected");
        assert!(matches!(error, LocaleError::Invalid { ref code, .. } if code == raw));
    }

    #[rstest]
    #[case("locales/en-GB.json", "en-GB")]
    #[case("fr.json", "fr")]
    #[case("/tmp/data/pt-PT.json", "pt-PT")]
    fn derives_code_from_file_name(#[case] path: &str, #[case] expected: &str) {
        let code = LocaleCode::from_file_name(Utf8Path::new(path)).expect("code from path");
        assert_eq!(code.as_str(), expected);
    }

    #[test]
    fn rejects_paths_without_stem() {
        let error = LocaleCode::from_file_name(Utf8Path::new("/")).expect_err("no stem");
        assert!(matches!(error, LocaleError::MissingStem { .. }));
    }

    #[rstest]
    #[case("en-GB", "EN_GB")]
    #[case("fr", "FR")]
    #[case("zh-Hant-HK", "ZH_HANT_HK")]
    #[case("es-419", "ES_419")]
    fn builds_constant_prefix(#[case] raw: &str, #[case] expected: &str) {
        let code = LocaleCode::parse(raw).expect("locale should parse");
        assert_eq!(code.constant_prefix(), expected);
    }
}
