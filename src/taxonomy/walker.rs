//! Assigns positions to taxonomy entries.
//!
//! [`walk`] enumerates fields outer, widths middle, and key index inner. Every
//! valid combination receives the next position; combinations the field
//! rejects are skipped without consuming one. The resulting [`PositionMap`]
//! is shared by every locale so that a position means the same string
//! everywhere.

use std::collections::BTreeMap;

use log::debug;

use super::{Taxonomy, TaxonomyError};

/// One enumerated taxonomy entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyIndex {
    /// Position of the entry in every compiled index.
    pub position: usize,
    /// Canonical key, e.g. `month.wide.1`.
    pub key: String,
    /// Dot-joined path under the gregorian calendar, e.g.
    /// `months.format.wide.1`.
    pub xpath: String,
}

/// Canonical key to position mapping, identical for all locales.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PositionMap {
    entries: Vec<KeyIndex>,
    by_key: BTreeMap<String, usize>,
}

impl PositionMap {
    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in position order.
    #[must_use]
    pub fn entries(&self) -> &[KeyIndex] {
        &self.entries
    }

    /// Position of `key`, if the taxonomy produced it.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    /// `(key, position)` pairs sorted by key.
    pub fn sorted_keys(&self) -> impl Iterator<Item = (&str, usize)> {
        self.by_key
            .iter()
            .map(|(key, position)| (key.as_str(), *position))
    }

    fn push(&mut self, key: String, xpath: String) -> Result<(), TaxonomyError> {
        let position = self.entries.len();
        if self.by_key.contains_key(&key) {
            return Err(TaxonomyError::DuplicateEntry { key });
        }
        self.by_key.insert(key.clone(), position);
        self.entries.push(KeyIndex {
            position,
            key,
            xpath,
        });
        Ok(())
    }
}

/// Enumerate `taxonomy` into a [`PositionMap`].
///
/// ```
/// use calendar_locales::taxonomy::{Field, Taxonomy, Width, walk};
///
/// let taxonomy = Taxonomy::new(vec![
///     Field::new("period", "dayPeriods")
///         .with_width(Width::Wide, "format.wide")
///         .with_keys(["am", "pm"]),
/// ])
/// .expect("valid taxonomy");
/// let positions = walk(&taxonomy).expect("walk succeeds");
/// assert_eq!(positions.position("period.wide.pm"), Some(1));
/// assert_eq!(positions.entries()[1].xpath, "dayPeriods.format.wide.pm");
/// ```
///
/// # Errors
///
/// Returns [`TaxonomyError::DuplicateEntry`] if two combinations produce the
/// same canonical key.
pub fn walk(taxonomy: &Taxonomy) -> Result<PositionMap, TaxonomyError> {
    let mut positions = PositionMap::default();

    for field in taxonomy.fields() {
        for width_path in field.widths() {
            for (index, raw_key) in field.keys().iter().enumerate() {
                let Some(key) = field.key(width_path.width, index) else {
                    debug!(
                        target: "taxonomy",
                        "skipping unsupported {}.{}.{raw_key}",
                        field.name(),
                        width_path.width,
                    );
                    continue;
                };
                let xpath = [field.cldr_node(), width_path.path.as_str(), raw_key.as_str()]
                    .join(".");
                positions.push(key, xpath)?;
            }
        }
    }

    Ok(positions)
}
