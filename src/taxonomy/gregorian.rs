//! Built-in gregorian calendar taxonomy.

use once_cell::sync::Lazy;

use super::{Field, Taxonomy, Width};

const MONTHS: [&str; 12] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12",
];
const DAYS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];
const QUARTERS: [&str; 4] = ["1", "2", "3", "4"];
const PERIODS: [&str; 2] = ["am", "pm"];
const ERAS: [&str; 2] = ["0", "1"];

pub(super) static GREGORIAN: Lazy<Taxonomy> = Lazy::new(|| Taxonomy {
    fields: gregorian_fields(),
});

pub(super) fn gregorian_fields() -> Vec<Field> {
    vec![
        Field::new("month", "months")
            .with_width(Width::Abbreviated, "format.abbreviated")
            .with_width(Width::Narrow, "format.narrow")
            .with_width(Width::Wide, "format.wide")
            .with_keys(MONTHS),
        Field::new("day", "days")
            .with_width(Width::Abbreviated, "format.abbreviated")
            .with_width(Width::Narrow, "format.narrow")
            .with_width(Width::Short, "format.short")
            .with_width(Width::Wide, "format.wide")
            .with_keys(DAYS),
        Field::new("quarter", "quarters")
            .with_width(Width::Abbreviated, "format.abbreviated")
            .with_width(Width::Narrow, "format.narrow")
            .with_width(Width::Wide, "format.wide")
            .with_keys(QUARTERS),
        Field::new("period", "dayPeriods")
            .with_width(Width::Abbreviated, "format.abbreviated")
            .with_width(Width::Narrow, "format.narrow")
            .with_width(Width::Wide, "format.wide")
            .with_keys(PERIODS),
        Field::new("era", "eras")
            .with_width(Width::Abbreviated, "eraAbbr")
            .with_width(Width::Narrow, "eraNarrow")
            .with_width(Width::Wide, "eraNames")
            .with_keys(ERAS),
    ]
}
