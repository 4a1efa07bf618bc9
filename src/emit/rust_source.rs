//! Rust source emitter for compiled locale tables.
//!
//! The generated module holds one `[u32; N]` index static and one `&str`
//! data constant per locale, a key table sorted for binary search, and a
//! locale table sorted the same way. The companion test module asserts that
//! every key resolves for every generated locale.

use std::collections::BTreeMap;

use log::debug;

use super::template::{fill_placeholders, quote_str_literal};
use super::{EmitError, Emitter};
use crate::dictionary::CompiledDictionary;
use crate::taxonomy::PositionMap;

/// Generator name written into the "do not edit" header.
pub const DEFAULT_GENERATOR: &str = "compile-locales";

const DEFAULT_MODULE_NAME: &str = "locales_gen";
const INDEX_VALUES_PER_LINE: usize = 12;

const MODULE_TEMPLATE: &str = r#"// Code generated by {generator}. DO NOT EDIT.
//
// Gregorian calendar strings for {locale_count} locale(s), {entry_count} entries each.

/// Compiled calendar strings for one locale.
///
/// Entry `p` spans `index[p]..index[p + 1]` of `data`.
#[derive(Debug)]
pub struct Dictionary {
    index: &'static [u32],
    data: &'static str,
}

impl Dictionary {
    /// Look up `key`, returning `None` for unknown keys and for entries the
    /// locale leaves empty.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        let found = MESSAGE_KEY_TO_INDEX
            .binary_search_by(|(candidate, _)| (*candidate).cmp(key))
            .ok()?;
        let (_, position) = MESSAGE_KEY_TO_INDEX.get(found)?;
        let start = usize::try_from(*self.index.get(*position)?).ok()?;
        let end = usize::try_from(*self.index.get(position + 1)?).ok()?;
        if start == end {
            return None;
        }
        self.data.get(start..end)
    }
}

/// Dictionary compiled for `locale`, if any.
#[must_use]
pub fn dictionary(locale: &str) -> Option<&'static Dictionary> {
    let found = LOCALES
        .binary_search_by(|(candidate, _)| (*candidate).cmp(locale))
        .ok()?;
    LOCALES.get(found).map(|(_, dictionary)| dictionary)
}
"#;

const TESTS_TEMPLATE: &str = r#"// Code generated by {generator}. DO NOT EDIT.

use super::{module_name}::{MESSAGE_KEY_TO_INDEX, dictionary};

fn assert_covers_every_key(locale: &str) {
    let Some(compiled) = dictionary(locale) else {
        panic!("no dictionary generated for {locale}");
    };
    for (key, _) in MESSAGE_KEY_TO_INDEX {
        let value = compiled.lookup(key);
        assert!(
            value.is_some_and(|text| !text.is_empty()),
            "{locale} has no value for {key}"
        );
    }
}
"#;

/// The generated table module and its companion test module.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedSources {
    module: String,
    tests: String,
}

impl GeneratedSources {
    /// Source of the table module.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Source of the test module.
    #[must_use]
    pub fn tests(&self) -> &str {
        &self.tests
    }
}

/// Emits [`GeneratedSources`] for a module named `module_name`.
///
/// The test module refers to the tables as `super::<module_name>`, so it is
/// meant to sit next to the table module under a `#[cfg(test)]` declaration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RustSourceEmitter {
    generator: String,
    module_name: String,
}

impl Default for RustSourceEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_MODULE_NAME)
    }
}

impl RustSourceEmitter {
    /// Emitter for a table module named `module_name`.
    #[must_use]
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            generator: DEFAULT_GENERATOR.to_owned(),
            module_name: module_name.into(),
        }
    }

    /// Override the generator named in the header.
    #[must_use]
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Module name the test module imports from.
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    fn render_module(&self, positions: &PositionMap, locales: &[LocaleTable<'_>]) -> String {
        let locale_count = locales.len().to_string();
        let entry_count = positions.len().to_string();
        let mut out = fill_placeholders(
            MODULE_TEMPLATE,
            &[
                ("generator", self.generator.as_str()),
                ("locale_count", locale_count.as_str()),
                ("entry_count", entry_count.as_str()),
            ],
        );

        out.push('\n');
        out.push_str("/// Canonical keys and their positions, sorted by key.\n");
        out.push_str("pub static MESSAGE_KEY_TO_INDEX: &[(&str, usize)] = &[\n");
        for (key, position) in positions.sorted_keys() {
            let quoted = quote_str_literal(key);
            out.push_str(&format!("    (\"{quoted}\", {position}),\n"));
        }
        out.push_str("];\n");

        for table in locales {
            out.push('\n');
            write_index(&mut out, &table.prefix, table.dictionary.index());
            out.push('\n');
            out.push_str(&format!(
                "const {}_DATA: &str = \"{}\";\n",
                table.prefix,
                quote_str_literal(table.dictionary.data())
            ));
        }

        out.push('\n');
        out.push_str("/// Compiled dictionaries keyed by locale, sorted by locale.\n");
        out.push_str("pub static LOCALES: &[(&str, Dictionary)] = &[\n");
        for table in locales {
            out.push_str(&format!(
                "    (\n        \"{locale}\",\n        Dictionary {{\n            index: &{prefix}_INDEX,\n            data: {prefix}_DATA,\n        }},\n    ),\n",
                locale = quote_str_literal(table.locale),
                prefix = table.prefix,
            ));
        }
        out.push_str("];\n");
        out
    }

    fn render_tests(&self, locales: &[LocaleTable<'_>]) -> String {
        let mut out = fill_placeholders(
            TESTS_TEMPLATE,
            &[
                ("generator", self.generator.as_str()),
                ("module_name", self.module_name.as_str()),
            ],
        );

        for table in locales {
            out.push('\n');
            out.push_str(&format!(
                "#[test]\nfn localize_{}() {{\n    assert_covers_every_key(\"{}\");\n}}\n",
                table.prefix.to_ascii_lowercase(),
                quote_str_literal(table.locale),
            ));
        }
        out
    }

    fn validate_module_name(&self) -> Result<(), EmitError> {
        let mut characters = self.module_name.chars();
        let valid = characters
            .next()
            .is_some_and(|first| first.is_ascii_lowercase() || first == '_')
            && characters.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if valid {
            Ok(())
        } else {
            Err(EmitError::InvalidModuleName {
                name: self.module_name.clone(),
            })
        }
    }
}

impl Emitter for RustSourceEmitter {
    type Artifact = GeneratedSources;

    fn emit(
        &self,
        positions: &PositionMap,
        dictionaries: &[CompiledDictionary],
    ) -> Result<GeneratedSources, EmitError> {
        self.validate_module_name()?;
        let locales = locale_tables(positions, dictionaries)?;
        debug!(
            target: "emit",
            "rendering {} locale table(s) into module `{}`",
            locales.len(),
            self.module_name,
        );

        Ok(GeneratedSources {
            module: self.render_module(positions, &locales),
            tests: self.render_tests(&locales),
        })
    }
}

struct LocaleTable<'a> {
    locale: &'a str,
    prefix: String,
    dictionary: &'a CompiledDictionary,
}

/// Check every dictionary against `positions` and order them by locale,
/// rejecting locales whose identifier prefixes collide.
fn locale_tables<'a>(
    positions: &PositionMap,
    dictionaries: &'a [CompiledDictionary],
) -> Result<Vec<LocaleTable<'a>>, EmitError> {
    let expected = positions.len() + 1;
    let mut by_prefix: BTreeMap<String, &'a str> = BTreeMap::new();
    let mut tables = Vec::with_capacity(dictionaries.len());

    for dictionary in dictionaries {
        let locale = dictionary.locale().as_str();
        let actual = dictionary.index().len();
        if actual != expected {
            return Err(EmitError::IndexMismatch {
                locale: locale.to_owned(),
                expected,
                actual,
            });
        }

        let prefix = dictionary.locale().constant_prefix();
        if let Some(first) = by_prefix.insert(prefix.clone(), locale) {
            return Err(EmitError::DuplicateIdentifier {
                prefix,
                first: first.to_owned(),
                second: locale.to_owned(),
            });
        }

        tables.push(LocaleTable {
            locale,
            prefix,
            dictionary,
        });
    }

    tables.sort_by(|left, right| left.locale.cmp(right.locale));
    Ok(tables)
}

fn write_index(out: &mut String, prefix: &str, index: &[u32]) {
    out.push_str(&format!(
        "static {prefix}_INDEX: [u32; {}] = [\n",
        index.len()
    ));
    for chunk in index.chunks(INDEX_VALUES_PER_LINE) {
        let values: Vec<String> = chunk.iter().map(u32::to_string).collect();
        out.push_str(&format!("    {},\n", values.join(", ")));
    }
    out.push_str("];\n");
}
