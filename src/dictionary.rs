//! Compiled per-locale dictionaries.
//!
//! A [`CompiledDictionary`] stores every extracted string for one locale in a
//! single blob together with cumulative byte offsets. Entry `p` spans
//! `index[p]..index[p + 1]`; equal offsets mean the locale had no value.

use calendar_locales_common::LocaleCode;
use thiserror::Error;

use crate::taxonomy::PositionMap;

/// Raised when a locale's blob outgrows the 32-bit offsets of the index.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("data for locale `{locale}` exceeds {max} bytes", max = u32::MAX)]
pub struct BlobTooLarge {
    /// Locale whose data overflowed.
    pub locale: String,
}

/// Index and data blob for one locale.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompiledDictionary {
    locale: LocaleCode,
    index: Vec<u32>,
    data: String,
}

impl CompiledDictionary {
    /// Start an empty dictionary sized for `entries` values.
    #[must_use]
    pub fn with_capacity(locale: LocaleCode, entries: usize) -> Self {
        let mut index = Vec::with_capacity(entries + 1);
        index.push(0);
        Self {
            locale,
            index,
            data: String::new(),
        }
    }

    /// Append the next value and record the new cumulative offset.
    ///
    /// # Errors
    ///
    /// Returns [`BlobTooLarge`] when the value would not fit `u32` offsets.
    /// The dictionary is left unchanged in that case.
    pub fn push(&mut self, value: &str) -> Result<(), BlobTooLarge> {
        let end = next_offset(self.data.len(), value.len()).ok_or_else(|| BlobTooLarge {
            locale: self.locale.to_string(),
        })?;
        self.data.push_str(value);
        self.index.push(end);
        Ok(())
    }

    /// Locale the dictionary was compiled for.
    #[must_use]
    pub const fn locale(&self) -> &LocaleCode {
        &self.locale
    }

    /// Cumulative offsets, starting with `0`.
    #[must_use]
    pub fn index(&self) -> &[u32] {
        &self.index
    }

    /// Concatenated values.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Number of values recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len().saturating_sub(1)
    }

    /// Whether no values have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw value at `position`, including empty values.
    #[must_use]
    pub fn value_at(&self, position: usize) -> Option<&str> {
        let start = usize::try_from(*self.index.get(position)?).ok()?;
        let end = usize::try_from(*self.index.get(position + 1)?).ok()?;
        self.data.get(start..end)
    }

    /// Look up `key`, returning `None` when the key is unknown or the locale
    /// has no value for it.
    ///
    /// ```
    /// use calendar_locales::dictionary::CompiledDictionary;
    /// use calendar_locales::taxonomy::{Field, Taxonomy, Width, walk};
    /// use calendar_locales_common::LocaleCode;
    ///
    /// let taxonomy = Taxonomy::new(vec![
    ///     Field::new("era", "eras")
    ///         .with_width(Width::Wide, "eraNames")
    ///         .with_keys(["0", "1"]),
    /// ])
    /// .expect("valid taxonomy");
    /// let positions = walk(&taxonomy).expect("walk succeeds");
    ///
    /// let mut dictionary =
    ///     CompiledDictionary::with_capacity(LocaleCode::parse("fr").expect("locale"), 2);
    /// dictionary.push("A").expect("fits");
    /// dictionary.push("").expect("fits");
    ///
    /// assert_eq!(dictionary.index(), [0, 1, 1]);
    /// assert_eq!(dictionary.lookup(&positions, "era.wide.0"), Some("A"));
    /// assert_eq!(dictionary.lookup(&positions, "era.wide.1"), None);
    /// assert_eq!(dictionary.lookup(&positions, "era.wide.2"), None);
    /// ```
    #[must_use]
    pub fn lookup(&self, positions: &PositionMap, key: &str) -> Option<&str> {
        let position = positions.position(key)?;
        self.value_at(position).filter(|value| !value.is_empty())
    }
}

fn next_offset(current: usize, added: usize) -> Option<u32> {
    current
        .checked_add(added)
        .and_then(|end| u32::try_from(end).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn widen(offset: u32) -> usize {
        usize::try_from(offset).expect("usize holds u32")
    }

    #[rstest]
    #[case(0, 0, Some(0))]
    #[case(3, 4, Some(7))]
    #[case(u32::MAX - 1, 1, Some(u32::MAX))]
    #[case(u32::MAX, 0, Some(u32::MAX))]
    #[case(u32::MAX, 1, None)]
    #[case(u32::MAX - 2, 5, None)]
    fn next_offset_stays_within_u32(
        #[case] current: u32,
        #[case] added: u32,
        #[case] expected: Option<u32>,
    ) {
        assert_eq!(next_offset(widen(current), widen(added)), expected);
    }

    #[test]
    fn next_offset_rejects_usize_overflow() {
        assert_eq!(next_offset(usize::MAX, 1), None);
    }

    #[test]
    fn push_records_cumulative_offsets() {
        let locale = LocaleCode::parse("fr").expect("locale");
        let mut dictionary = CompiledDictionary::with_capacity(locale, 3);

        dictionary.push("av. J.-C.").expect("fits");
        dictionary.push("").expect("fits");
        dictionary.push("ap. J.-C.").expect("fits");

        assert_eq!(dictionary.index(), [0, 9, 9, 18]);
        assert_eq!(dictionary.len(), 3);
        assert_eq!(dictionary.value_at(1), Some(""));
        assert_eq!(dictionary.value_at(2), Some("ap. J.-C."));
        assert_eq!(dictionary.value_at(3), None);
    }
}
