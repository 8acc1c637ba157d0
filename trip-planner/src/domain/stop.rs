//! Bus stops kept as favorites.

use serde::{Deserialize, Deserializer, Serialize};

/// Region assumed for stops persisted before the region code existed.
pub const DEFAULT_REGION_CODE: i32 = 38030;

/// A transit stop, identified by its `id`.
///
/// Older persisted copies used different field names and had no region
/// code; both are accepted when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    #[serde(alias = "nodeId")]
    pub id: String,

    #[serde(default, alias = "nodeName")]
    pub name: Option<String>,

    /// Code printed on the stop sign.
    #[serde(default, alias = "nodeNumber")]
    pub stop_code: Option<String>,

    #[serde(default, alias = "nodeLati")]
    pub latitude: Option<f64>,

    #[serde(default, alias = "nodeLong")]
    pub longitude: Option<f64>,

    /// Region the stop's arrival lookups are made against.
    #[serde(
        default = "default_region_code",
        alias = "cityCode",
        deserialize_with = "region_or_default"
    )]
    pub region_code: i32,
}

impl Stop {
    /// A stop with only an id, in the default region.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            stop_code: None,
            latitude: None,
            longitude: None,
            region_code: DEFAULT_REGION_CODE,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stop_code(mut self, code: impl Into<String>) -> Self {
        self.stop_code = Some(code.into());
        self
    }

    pub fn with_position(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_region_code(mut self, region_code: i32) -> Self {
        self.region_code = region_code;
        self
    }

    /// Identity key for favorite membership.
    pub fn key(&self) -> String {
        self.id.clone()
    }
}

fn default_region_code() -> i32 {
    DEFAULT_REGION_CODE
}

/// Zero was written by builds that never set the field.
fn region_or_default<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let code = Option::<i32>::deserialize(deserializer)?;
    Ok(match code {
        None | Some(0) => DEFAULT_REGION_CODE,
        Some(code) => code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_camel_case() {
        let stop = Stop::new("GNB38030001")
            .with_name("City Hall")
            .with_stop_code("1001")
            .with_position(35.18, 128.1)
            .with_region_code(25);
        let json = serde_json::to_value(&stop).unwrap();
        assert_eq!(json["id"], "GNB38030001");
        assert_eq!(json["stopCode"], "1001");
        assert_eq!(json["regionCode"], 25);
    }

    #[test]
    fn missing_region_uses_default() {
        let stop: Stop = serde_json::from_str(r#"{"id": "S1", "name": "Market"}"#).unwrap();
        assert_eq!(stop.region_code, DEFAULT_REGION_CODE);
        assert_eq!(stop.name.as_deref(), Some("Market"));
        assert!(stop.latitude.is_none());
    }

    #[test]
    fn zero_or_null_region_uses_default() {
        let stop: Stop = serde_json::from_str(r#"{"id": "S1", "regionCode": 0}"#).unwrap();
        assert_eq!(stop.region_code, DEFAULT_REGION_CODE);

        let stop: Stop = serde_json::from_str(r#"{"id": "S1", "regionCode": null}"#).unwrap();
        assert_eq!(stop.region_code, DEFAULT_REGION_CODE);
    }

    #[test]
    fn explicit_region_is_kept() {
        let stop: Stop = serde_json::from_str(r#"{"id": "S1", "regionCode": 21}"#).unwrap();
        assert_eq!(stop.region_code, 21);
    }

    #[test]
    fn legacy_field_names() {
        let json = r#"{
            "nodeId": "GNB38030001",
            "nodeName": "City Hall",
            "nodeNumber": "1001",
            "nodeLati": 35.18,
            "nodeLong": 128.1,
            "cityCode": 38010
        }"#;
        let stop: Stop = serde_json::from_str(json).unwrap();
        assert_eq!(
            stop,
            Stop::new("GNB38030001")
                .with_name("City Hall")
                .with_stop_code("1001")
                .with_position(35.18, 128.1)
                .with_region_code(38010)
        );
    }

    #[test]
    fn missing_id_is_rejected() {
        assert!(serde_json::from_str::<Stop>(r#"{"name": "No id"}"#).is_err());
    }
}
