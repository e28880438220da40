//! ArcGIS REST API data model.
//!
//! Only the small subset we use: resolving a dashboard item into its CSV export and running
//! grouped statistics queries against a hosted `FeatureServer` layer.
//!

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default page size asked of the statistics endpoint.
pub const RECORD_COUNT: u32 = 32000;

/// One `outStatistics` entry.
///
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutStatistic {
    pub statistic_type: String,
    pub on_statistic_field: String,
    pub out_statistic_field_name: String,
}

impl OutStatistic {
    /// `count(*)` named `name`
    ///
    pub fn count(name: &str) -> Self {
        OutStatistic {
            statistic_type: "count".to_string(),
            on_statistic_field: "*".to_string(),
            out_statistic_field_name: name.to_string(),
        }
    }
}

/// Grouped aggregate query.
///
/// ```rust
/// use casecount_sources::{OutStatistic, StatsQuery};
///
/// let q = StatsQuery::new("test_date <= DATE '2020-04-01'")
///     .group_by(&["county", "result"])
///     .statistic(OutStatistic::count("Count"));
/// let form = q.to_form().unwrap();
/// assert!(form.contains(&("groupByFieldsForStatistics".to_string(), "county,result".to_string())));
/// ```
///
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StatsQuery {
    pub filter: String,
    pub group_by: Vec<String>,
    pub statistics: Vec<OutStatistic>,
    pub record_count: u32,
}

impl StatsQuery {
    pub fn new(filter: &str) -> Self {
        StatsQuery {
            filter: filter.to_string(),
            group_by: vec![],
            statistics: vec![],
            record_count: RECORD_COUNT,
        }
    }

    pub fn group_by(mut self, fields: &[&str]) -> Self {
        self.group_by = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn statistic(mut self, stat: OutStatistic) -> Self {
        self.statistics.push(stat);
        self
    }

    /// Form-encoded body of the POST request.
    ///
    pub fn to_form(&self) -> serde_json::Result<Vec<(String, String)>> {
        let stats = serde_json::to_string(&self.statistics)?;
        let form = [
            ("where", self.filter.clone()),
            ("groupByFieldsForStatistics", self.group_by.join(",")),
            ("outStatistics", stats),
            ("resultRecordCount", self.record_count.to_string()),
            ("resultType", "standard".to_string()),
            ("returnGeometry", "false".to_string()),
            ("f", "pjson".to_string()),
        ];
        Ok(form
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect())
    }
}

/// API-level error, returned with an HTTP 200.
///
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl Feature {
    /// String attribute
    ///
    pub fn str(&self, field: &str) -> Option<&str> {
        self.attributes.get(field).and_then(Value::as_str)
    }

    /// Attribute missing or `null`
    ///
    pub fn is_null(&self, field: &str) -> bool {
        self.attributes.get(field).map_or(true, Value::is_null)
    }

    /// Non-negative integral attribute; integral floats are accepted.
    ///
    pub fn count(&self, field: &str) -> Option<u64> {
        let v = self.attributes.get(field)?;
        match v.as_u64() {
            Some(n) => Some(n),
            None => v
                .as_f64()
                .filter(|f| *f >= 0. && f.fract() == 0.)
                .map(|f| f as u64),
        }
    }
}

/// Result of a query, either `features` or `error`.
///
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FeatureSet {
    #[serde(default)]
    pub features: Vec<Feature>,
    pub error: Option<ApiError>,
}

/// Dashboard item metadata
///
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemInfo {
    pub org_id: String,
}

/// Feature layer metadata
///
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LayerInfo {
    pub service_item_id: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_stats_query_form() {
        let q = StatsQuery::new("test_date <= DATE '2020-04-01'")
            .group_by(&["county", "result"])
            .statistic(OutStatistic::count("Count"));
        let form: BTreeMap<String, String> = q.to_form().unwrap().into_iter().collect();

        assert_eq!("test_date <= DATE '2020-04-01'", form["where"]);
        assert_eq!("county,result", form["groupByFieldsForStatistics"]);
        assert_eq!(
            r#"[{"statisticType":"count","onStatisticField":"*","outStatisticFieldName":"Count"}]"#,
            form["outStatistics"]
        );
        assert_eq!("32000", form["resultRecordCount"]);
        assert_eq!("pjson", form["f"]);
    }

    #[test]
    fn test_feature_set_decode() {
        let fs: FeatureSet = serde_json::from_value(json!({
            "features": [
                { "attributes": { "county": "BOONE", "result": "Positive", "Count": 100 } },
                { "attributes": { "county": "GREENE", "result": "Negative", "Count": 2.0 } },
                { "attributes": { "county": null, "Count": -1 } }
            ]
        }))
        .unwrap();

        assert!(fs.error.is_none());
        assert_eq!(3, fs.features.len());
        assert_eq!(Some("BOONE"), fs.features[0].str("county"));
        assert_eq!(Some(100), fs.features[0].count("Count"));
        assert_eq!(Some(2), fs.features[1].count("Count"));
        assert_eq!(None, fs.features[2].str("county"));
        assert!(fs.features[2].is_null("county"));
        assert!(fs.features[2].is_null("result"));
        assert!(!fs.features[0].is_null("county"));
        assert_eq!(None, fs.features[2].count("Count"));
    }

    #[test]
    fn test_feature_set_error() {
        let fs: FeatureSet = serde_json::from_value(json!({
            "error": { "code": 400, "message": "Invalid query", "details": [] }
        }))
        .unwrap();
        assert!(fs.features.is_empty());
        assert_eq!("Invalid query", fs.error.unwrap().message);
    }
}
