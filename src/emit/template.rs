//! Placeholder substitution and literal quoting for generated sources.

/// Substitute each `{name}` in `template` with its value.
///
/// Only the listed names are touched, so Rust braces in the template such as
/// `Dictionary { index, data }` pass through as written.
pub(crate) fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_owned(), |filled, (name, value)| {
            filled.replace(&format!("{{{name}}}"), value)
        })
}

/// Quote `value` as the body of a Rust string literal.
///
/// Quotes, backslashes, and control characters are escaped. Other text,
/// including non-ASCII letters, is kept readable.
pub(crate) fn quote_str_literal(value: &str) -> String {
    value.escape_debug().to_string()
}
