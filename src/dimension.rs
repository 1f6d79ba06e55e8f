//! Density-independent pixel dimensions

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

static DP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)dp\s*$").expect("valid dimension pattern"));

/// Extract the magnitude of a `dp` dimension such as `24dp`. `field` names
/// the attribute in the error.
pub fn parse_dimension(text: &str, field: &str) -> Result<f64, Error> {
    let invalid = || Error::InvalidDimension {
        field: field.to_owned(),
        text: text.to_owned(),
    };

    let magnitude = DP
        .captures(text)
        .and_then(|c| c.get(1))
        .ok_or_else(invalid)?;

    magnitude.as_str().parse().map_err(|_| invalid())
}
