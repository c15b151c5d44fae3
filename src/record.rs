use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A single curb regulation as delivered by the open-data feed.
///
/// Only the attributes the rule engine reads are kept; everything else in the
/// feed's property bag is ignored on decode. Fields of the wrong JSON type
/// decode as absent rather than failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegulationRecord {
    #[serde(default, alias = "DAYS", deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,

    #[serde(default, alias = "HOURS", deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,

    #[serde(default, alias = "HRLIMIT", deserialize_with = "lenient_limit")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hrlimit: Option<HourLimit>,

    #[serde(default, alias = "REGULATION", deserialize_with = "lenient_text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulation: Option<String>,
}

/// The feed publishes hour limits either as text ("2", "2 HR") or as a bare
/// number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HourLimit {
    Number(f64),
    Text(String),
}

impl HourLimit {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            HourLimit::Number(n) => Cow::Owned(n.to_string()),
            HourLimit::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl RegulationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_days(mut self, days: impl Into<String>) -> Self {
        self.days = Some(days.into());
        self
    }

    pub fn with_hours(mut self, hours: impl Into<String>) -> Self {
        self.hours = Some(hours.into());
        self
    }

    pub fn with_hrlimit(mut self, limit: HourLimit) -> Self {
        self.hrlimit = Some(limit);
        self
    }

    pub fn with_regulation(mut self, regulation: impl Into<String>) -> Self {
        self.regulation = Some(regulation.into());
        self
    }

    /// Decode a single property bag.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<RegulationRecord>,
}

/// Decode the `properties` of every feature in a GeoJSON feature collection.
///
/// The output has one record per input feature, in order, so results can be
/// zipped back onto the geometry by the caller. Features without properties
/// become empty records, which evaluate as unrestricted.
pub fn records_from_geojson(json: &str) -> Result<Vec<RegulationRecord>> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    Ok(collection
        .features
        .into_iter()
        .map(|f| f.properties.unwrap_or_default())
        .collect())
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_limit<'de, D>(deserializer: D) -> std::result::Result<Option<HourLimit>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(HourLimit::Text(s))),
        Value::Number(n) => Ok(n.as_f64().map(HourLimit::Number)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_fields() {
        let rec = RegulationRecord::from_json(
            r#"{"days":"M-F","hours":"0900-1800","hrlimit":"2","regulation":"Time limited"}"#,
        )
        .unwrap();

        assert_eq!(rec.days.as_deref(), Some("M-F"));
        assert_eq!(rec.hours.as_deref(), Some("0900-1800"));
        assert_eq!(rec.hrlimit, Some(HourLimit::Text("2".into())));
        assert_eq!(rec.regulation.as_deref(), Some("Time limited"));
    }

    #[test]
    fn numeric_hrlimit_is_kept() {
        let rec = RegulationRecord::from_json(r#"{"hrlimit":4}"#).unwrap();
        let limit = rec.hrlimit.unwrap();
        assert_eq!(limit, HourLimit::Number(4.0));
        assert_eq!(limit.as_text(), "4");
    }

    #[test]
    fn non_string_days_decode_as_absent() {
        let rec = RegulationRecord::from_json(r#"{"days":12,"hours":null}"#).unwrap();
        assert!(rec.days.is_none());
        assert!(rec.hours.is_none());
    }

    #[test]
    fn unknown_attributes_are_ignored() {
        let rec =
            RegulationRecord::from_json(r#"{"objectid":7,"DAYS":"SA,SU","rpp_area1":"A"}"#).unwrap();
        assert_eq!(rec.days.as_deref(), Some("SA,SU"));
    }

    #[test]
    fn geojson_keeps_feature_order() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type":"Feature","geometry":null,"properties":{"days":"M-F"}},
                {"type":"Feature","geometry":null,"properties":null},
                {"type":"Feature","geometry":null,"properties":{"hours":"ANYTIME"}}
            ]
        }"#;

        let records = records_from_geojson(json).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].days.as_deref(), Some("M-F"));
        assert_eq!(records[1], RegulationRecord::default());
        assert_eq!(records[2].hours.as_deref(), Some("ANYTIME"));
    }

    #[test]
    fn geojson_rejects_non_collection() {
        assert!(records_from_geojson(r#"{"type":"Feature"}"#).is_err());
        assert!(records_from_geojson("not json").is_err());
    }
}
