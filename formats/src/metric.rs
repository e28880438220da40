//! The closed set of metrics an adapter can report.
//!

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, VariantNames};

/// Every count we know about.  Order is the column order used on output.
///
/// ```rust
/// use std::str::FromStr;
/// use casecount_formats::Metric;
///
/// assert_eq!(Metric::Tested, Metric::from_str("TESTED").unwrap());
/// assert_eq!("positives", Metric::Positives.to_string());
/// ```
///
#[derive(
    Copy,
    Clone,
    Debug,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    strum::Display,
    EnumIter,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Metric {
    /// Confirmed cases
    Cases,
    /// Deaths
    Deaths,
    /// Number of people tested
    Tested,
    /// Number of positive tests
    Positives,
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_metric_order() {
        let all: Vec<_> = Metric::iter().collect();
        assert_eq!(
            vec![Metric::Cases, Metric::Deaths, Metric::Tested, Metric::Positives],
            all
        );
        assert_eq!(["cases", "deaths", "tested", "positives"], Metric::VARIANTS);
    }

    #[test]
    fn test_metric_serialize() {
        let s = serde_json::to_string(&Metric::Deaths).unwrap();
        assert_eq!("\"deaths\"", s);
    }
}
