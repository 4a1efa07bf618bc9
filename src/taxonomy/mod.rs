//! Field taxonomy describing which gregorian calendar strings are extracted.
//!
//! A [`Taxonomy`] is an ordered list of [`Field`]s. Each field names the CLDR
//! node it reads from (`months`, `days`, ...), the widths it is available in
//! together with the path fragment for each width, and the ordered keys under
//! that fragment. The order of fields, widths, and keys is the coordinate
//! system of every compiled index, so all collections here are ordered
//! vectors rather than maps.
//!
//! Taxonomies are immutable values. They are validated on construction,
//! whether built in code, loaded from TOML, or taken from the built-in
//! [`Taxonomy::gregorian`] definition.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;

mod gregorian;
mod walker;

pub use walker::{KeyIndex, PositionMap, walk};

/// Presentation width of a calendar string.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    /// Abbreviated form, e.g. `Jan`.
    Abbreviated,
    /// Narrow form, e.g. `J`.
    Narrow,
    /// Short form, e.g. `Su`.
    Short,
    /// Wide form, e.g. `January`.
    Wide,
}

impl Width {
    /// Lower-case name used in canonical keys.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abbreviated => "abbreviated",
            Self::Narrow => "narrow",
            Self::Short => "short",
            Self::Wide => "wide",
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A width and the CLDR path fragment under the field's node.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WidthPath {
    /// The width this path serves.
    pub width: Width,
    /// Dot-separated fragment, e.g. `format.abbreviated`.
    pub path: String,
}

/// A `(width, key)` combination a field does not provide.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WidthKey {
    /// Width of the excluded combination.
    pub width: Width,
    /// Key of the excluded combination.
    pub key: String,
}

/// One calendar field such as months or day periods.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Field {
    name: String,
    cldr_node: String,
    widths: Vec<WidthPath>,
    keys: Vec<String>,
    #[serde(default)]
    unsupported: Vec<WidthKey>,
}

impl Field {
    /// Start a field reading from `cldr_node`, with no widths or keys yet.
    #[must_use]
    pub fn new(name: impl Into<String>, cldr_node: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cldr_node: cldr_node.into(),
            widths: Vec::new(),
            keys: Vec::new(),
            unsupported: Vec::new(),
        }
    }

    /// Append a width and its path fragment.
    #[must_use]
    pub fn with_width(mut self, width: Width, path: impl Into<String>) -> Self {
        self.widths.push(WidthPath {
            width,
            path: path.into(),
        });
        self
    }

    /// Append keys in order.
    #[must_use]
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Mark `(width, key)` as not provided by this field.
    #[must_use]
    pub fn without(mut self, width: Width, key: impl Into<String>) -> Self {
        self.unsupported.push(WidthKey {
            width,
            key: key.into(),
        });
        self
    }

    /// Field name used as the first segment of canonical keys.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// CLDR node under the gregorian calendar, e.g. `months`.
    #[must_use]
    pub fn cldr_node(&self) -> &str {
        &self.cldr_node
    }

    /// Widths in enumeration order.
    #[must_use]
    pub fn widths(&self) -> &[WidthPath] {
        &self.widths
    }

    /// Keys in enumeration order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Canonical key for `(width, index)`, or `None` when the combination is
    /// not valid for this field.
    ///
    /// ```
    /// use calendar_locales::taxonomy::{Field, Width};
    ///
    /// let field = Field::new("era", "eras")
    ///     .with_width(Width::Wide, "eraNames")
    ///     .with_keys(["0", "1"]);
    /// assert_eq!(field.key(Width::Wide, 1).as_deref(), Some("era.wide.1"));
    /// assert_eq!(field.key(Width::Narrow, 0), None);
    /// assert_eq!(field.key(Width::Wide, 2), None);
    /// ```
    #[must_use]
    pub fn key(&self, width: Width, index: usize) -> Option<String> {
        if !self.widths.iter().any(|candidate| candidate.width == width) {
            return None;
        }
        let key = self.keys.get(index)?;
        if self.is_unsupported(width, key) {
            return None;
        }
        Some(format!("{}.{}.{}", self.name, width, key))
    }

    fn is_unsupported(&self, width: Width, key: &str) -> bool {
        self.unsupported
            .iter()
            .any(|excluded| excluded.width == width && excluded.key == key)
    }

    fn validate(&self) -> Result<(), TaxonomyError> {
        check_segment(&self.name, &self.name, "name")?;
        check_path(&self.name, &self.cldr_node, "CLDR node")?;

        let mut widths = BTreeSet::new();
        for width_path in &self.widths {
            check_path(&self.name, &width_path.path, "width path")?;
            if !widths.insert(width_path.width) {
                return Err(TaxonomyError::DuplicateWidth {
                    field: self.name.clone(),
                    width: width_path.width,
                });
            }
        }

        let mut keys = BTreeSet::new();
        for key in &self.keys {
            check_segment(&self.name, key, "key")?;
            if !keys.insert(key.as_str()) {
                return Err(TaxonomyError::DuplicateKey {
                    field: self.name.clone(),
                    key: key.clone(),
                });
            }
        }

        for excluded in &self.unsupported {
            if !widths.contains(&excluded.width) {
                return Err(TaxonomyError::UnknownWidth {
                    field: self.name.clone(),
                    width: excluded.width,
                });
            }
            if !keys.contains(excluded.key.as_str()) {
                return Err(TaxonomyError::UnknownKey {
                    field: self.name.clone(),
                    key: excluded.key.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Errors raised by malformed taxonomies. All of them abort generation.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    /// The taxonomy file could not be read.
    #[error("failed to read taxonomy {path}")]
    Read {
        /// Path to the taxonomy file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The taxonomy document is not valid TOML or does not match the schema.
    #[error("invalid taxonomy document: {reason}")]
    Parse {
        /// Parser diagnostic.
        reason: String,
    },

    /// A taxonomy with no fields produces no entries.
    #[error("taxonomy declares no fields")]
    Empty,

    /// A name, node, path, or key is blank or contains an empty path segment.
    #[error("field `{field}` has a malformed {what}: `{value}`")]
    Malformed {
        /// Field the value belongs to.
        field: String,
        /// Which attribute is malformed.
        what: &'static str,
        /// The offending value.
        value: String,
    },

    /// Two fields share a name.
    #[error("field `{name}` is declared more than once")]
    DuplicateField {
        /// The repeated field name.
        name: String,
    },

    /// A field lists the same width twice.
    #[error("field `{field}` declares width `{width}` more than once")]
    DuplicateWidth {
        /// Field name.
        field: String,
        /// The repeated width.
        width: Width,
    },

    /// A field lists the same key twice.
    #[error("field `{field}` declares key `{key}` more than once")]
    DuplicateKey {
        /// Field name.
        field: String,
        /// The repeated key.
        key: String,
    },

    /// An exclusion refers to a width the field does not declare.
    #[error("field `{field}` excludes undeclared width `{width}`")]
    UnknownWidth {
        /// Field name.
        field: String,
        /// The undeclared width.
        width: Width,
    },

    /// An exclusion refers to a key the field does not declare.
    #[error("field `{field}` excludes undeclared key `{key}`")]
    UnknownKey {
        /// Field name.
        field: String,
        /// The undeclared key.
        key: String,
    },

    /// Two taxonomy entries resolve to the same canonical key.
    #[error("canonical key `{key}` is produced more than once")]
    DuplicateEntry {
        /// The colliding canonical key.
        key: String,
    },
}

/// Ordered set of calendar fields.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "TaxonomyDocument")]
pub struct Taxonomy {
    fields: Vec<Field>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TaxonomyDocument {
    fields: Vec<Field>,
}

impl TryFrom<TaxonomyDocument> for Taxonomy {
    type Error = TaxonomyError;

    fn try_from(document: TaxonomyDocument) -> Result<Self, Self::Error> {
        Self::new(document.fields)
    }
}

impl Taxonomy {
    /// Build a taxonomy from fields in enumeration order.
    ///
    /// # Errors
    ///
    /// Returns a [`TaxonomyError`] describing the first malformed field.
    pub fn new(fields: Vec<Field>) -> Result<Self, TaxonomyError> {
        if fields.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        let mut names = BTreeSet::new();
        for field in &fields {
            field.validate()?;
            if !names.insert(field.name()) {
                return Err(TaxonomyError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }

        Ok(Self { fields })
    }

    /// Parse a taxonomy from TOML with one `[[fields]]` table per field.
    ///
    /// ```
    /// use calendar_locales::taxonomy::Taxonomy;
    ///
    /// let taxonomy = Taxonomy::from_toml_str(r#"
    ///     [[fields]]
    ///     name = "quarter"
    ///     cldr_node = "quarters"
    ///     keys = ["1", "2", "3", "4"]
    ///     widths = [{ width = "wide", path = "format.wide" }]
    /// "#).expect("taxonomy should parse");
    /// assert_eq!(taxonomy.fields().len(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Parse`] for syntax and schema errors, which
    /// include validation failures.
    pub fn from_toml_str(input: &str) -> Result<Self, TaxonomyError> {
        toml::from_str(input).map_err(|error| TaxonomyError::Parse {
            reason: error.to_string(),
        })
    }

    /// Read and parse a taxonomy file.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Read`] when the file cannot be read and the
    /// errors of [`Self::from_toml_str`] otherwise.
    pub fn load(path: &Utf8Path) -> Result<Self, TaxonomyError> {
        let contents = fs::read_to_string(path).map_err(|source| TaxonomyError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// The built-in gregorian taxonomy: months, days, quarters, day periods,
    /// and eras.
    #[must_use]
    pub fn gregorian() -> &'static Self {
        &gregorian::GREGORIAN
    }

    /// Fields in enumeration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

fn check_segment(field: &str, value: &str, what: &'static str) -> Result<(), TaxonomyError> {
    if value.trim().is_empty() || value.contains('.') {
        return Err(malformed(field, value, what));
    }
    Ok(())
}

fn check_path(field: &str, value: &str, what: &'static str) -> Result<(), TaxonomyError> {
    if value.split('.').any(|segment| segment.trim().is_empty()) {
        return Err(malformed(field, value, what));
    }
    Ok(())
}

fn malformed(field: &str, value: &str, what: &'static str) -> TaxonomyError {
    TaxonomyError::Malformed {
        field: field.to_owned(),
        what,
        value: value.to_owned(),
    }
}
