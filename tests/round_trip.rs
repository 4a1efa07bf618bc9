//! Collecting a CLDR tree and compiling the copies matches compiling the
//! source fragments directly.

mod support;

use std::fs;

use calendar_locales::collector::Collector;
use calendar_locales::compiler::{Compiler, FileOutcome};
use calendar_locales::taxonomy::{Taxonomy, walk};
use calendar_locales_common::LocaleCode;
use rstest::rstest;
use serde_json::{Value, json};
use support::cldr::{locale_document, utf8_root, write_file};

fn en_gb_gregorian() -> Value {
    json!({
        "months": {
            "format": {
                "abbreviated": { "1": "Jan", "2": "Feb", "9": "Sept" },
                "narrow": { "1": "J", "2": "F" },
                "wide": { "1": "January", "2": "February" }
            }
        },
        "days": {
            "format": {
                "short": { "sun": "Su", "mon": "Mo" },
                "wide": { "sun": "Sunday", "sat": "Saturday" }
            }
        },
        "quarters": { "format": { "wide": { "1": "1st quarter", "4": "4th quarter" } } },
        "dayPeriods": { "format": { "abbreviated": { "am": "am", "pm": "pm" } } },
        "eras": {
            "eraNames": { "0": "Before Christ", "1": "Anno Domini" },
            "eraAbbr": { "0": "BC", "1": "AD" }
        }
    })
}

fn raw_value<'a>(gregorian: &'a Value, xpath: &str) -> &'a str {
    gregorian
        .pointer(&format!("/{}", xpath.replace('.', "/")))
        .and_then(Value::as_str)
        .unwrap_or_default()
}

#[rstest]
fn collect_then_compile_matches_direct_compilation() {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = utf8_root(&dir);
    let gregorian = en_gb_gregorian();
    let document = locale_document("en-GB", gregorian.clone());
    let fragment = root.join("cldr/main/en-GB/ca-gregorian.json");
    write_file(&fragment, &serde_json::to_string_pretty(&document).expect("serialise"));

    let report = Collector::new(root.join("cldr"), root.join("locales"))
        .expect("collector")
        .collect()
        .expect("collection should succeed");
    assert_eq!(report.copied.len(), 1);
    assert_eq!(
        fs::read(&fragment).expect("read fragment"),
        fs::read(root.join("locales/en-GB.json")).expect("read copy"),
        "copies should be byte-identical"
    );

    let positions = walk(Taxonomy::gregorian()).expect("walk");
    let compiler = Compiler::new(&positions);
    let compilation = compiler
        .compile_dir(&root.join("locales"))
        .expect("compilation should succeed");
    let direct = compiler
        .compile_document(
            LocaleCode::parse("en-GB").expect("locale"),
            &document,
            &fragment,
        )
        .expect("direct compilation should succeed");

    let FileOutcome::Compiled(expected) = direct else {
        panic!("the source fragment should compile");
    };
    assert_eq!(compilation.dictionaries, [expected.clone()]);

    for entry in positions.entries() {
        assert_eq!(
            expected.value_at(entry.position),
            Some(raw_value(&gregorian, &entry.xpath)),
            "{}",
            entry.key
        );
    }
}
