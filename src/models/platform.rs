// Fleet platform and sensor reading shapes returned by the dashboard API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: String,
    pub ts: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: String,
    pub name: String,
    pub fleet: String,
    pub img: String,
    pub last_report: DateTime<Utc>,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
}

impl Platform {
    /// Most recent sensor reading, if the platform reported any
    pub fn latest_sensor(&self) -> Option<&Sensor> {
        self.sensors.iter().max_by_key(|s| s.ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_platform_from_api_json() {
        let platform: Platform = serde_json::from_value(json!({
            "id": "p-1",
            "name": "Hauler 7",
            "fleet": "north",
            "img": "/img/hauler.png",
            "lastReport": "2024-05-01T10:00:00Z",
            "sensors": [
                { "id": "s-1", "ts": "2024-05-01T09:00:00Z", "value": 12.5 },
                { "id": "s-2", "ts": "2024-05-01T09:30:00Z", "value": 13.0 }
            ]
        }))
        .unwrap();

        assert_eq!(platform.fleet, "north");
        assert_eq!(platform.sensors.len(), 2);
        assert_eq!(platform.latest_sensor().map(|s| s.id.as_str()), Some("s-2"));
    }

    #[test]
    fn test_platform_without_sensors() {
        let platform: Platform = serde_json::from_value(json!({
            "id": "p-2",
            "name": "Idle",
            "fleet": "south",
            "img": "",
            "lastReport": "2024-05-01T10:00:00Z"
        }))
        .unwrap();

        assert!(platform.sensors.is_empty());
        assert!(platform.latest_sensor().is_none());
    }

    #[test]
    fn test_non_rfc3339_timestamp_rejects_platform() {
        let result = serde_json::from_value::<Vec<Platform>>(json!([{
            "id": "p-3",
            "name": "Odd clock",
            "fleet": "east",
            "img": "",
            "lastReport": "yesterday"
        }]));

        assert!(result.is_err());
    }
}
