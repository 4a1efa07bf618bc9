//! Dot-path navigation over CLDR JSON documents.

use std::borrow::Cow;

use log::debug;
use serde_json::Value;

/// Follow a dot-separated object path from `root`. `null` counts as absent.
pub(crate) fn navigate<'a>(root: &'a Value, xpath: &str) -> Option<&'a Value> {
    xpath
        .split('.')
        .try_fold(root, |node, segment| node.as_object()?.get(segment))
        .filter(|value| !value.is_null())
}

/// Text at `xpath` under `root`, or an empty string when absent.
///
/// Numbers and booleans contribute their JSON text; objects and arrays are
/// not leaves and count as absent.
pub(crate) fn leaf_text<'a>(root: &'a Value, xpath: &str) -> Cow<'a, str> {
    match navigate(root, xpath) {
        Some(Value::String(text)) => Cow::Borrowed(text.as_str()),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => Cow::Owned(scalar.to_string()),
        Some(_) => {
            debug!(target: "compiler", "`{xpath}` is not a leaf value; treating as absent");
            Cow::Borrowed("")
        }
        None => Cow::Borrowed(""),
    }
}
