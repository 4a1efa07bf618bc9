use std::convert::Infallible;
use std::str::FromStr;

/// Wrapper for quoted values supplied via behaviour-driven test steps.
#[derive(Clone, Debug)]
pub struct StepText {
    raw: String,
}

impl FromStr for StepText {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let raw = input
            .trim()
            .trim_matches(|candidate| matches!(candidate, '"' | '\''))
            .to_owned();

        Ok(Self { raw })
    }
}

impl StepText {
    /// Consumes the step value, yielding the unquoted string.
    pub fn into_inner(self) -> String {
        self.raw
    }

    /// Splits a comma-separated step value into trimmed, non-empty items.
    pub fn items(&self) -> Vec<String> {
        self.raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
