//! JSON shapes exchanged with the API layer.
//!
//! Domain types keep coordinates as [`geo::Coord`]; the wire format spells
//! them out as `lat`/`lng` pairs.

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::{Category, PlaceInput};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(value: Coord<f64>) -> Self {
        Self {
            lat: value.y,
            lng: value.x,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PlaceRecord {
    id: String,
    name: String,
    category: Category,
    lat: f64,
    lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    estimated_visit_minutes: Option<u32>,
}

impl From<PlaceRecord> for PlaceInput {
    fn from(record: PlaceRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            category: record.category,
            location: Coord {
                x: record.lng,
                y: record.lat,
            },
            estimated_visit_minutes: record.estimated_visit_minutes,
        }
    }
}

impl From<PlaceInput> for PlaceRecord {
    fn from(place: PlaceInput) -> Self {
        Self {
            id: place.id,
            name: place.name,
            category: place.category,
            lat: place.location.y,
            lng: place.location.x,
            estimated_visit_minutes: place.estimated_visit_minutes,
        }
    }
}

/// `serde(with = ...)` adapter for an optional coordinate written as [`LatLng`].
pub(crate) mod optional_lat_lng {
    use geo::Coord;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::LatLng;

    pub(crate) fn serialize<S>(value: &Option<Coord<f64>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.map(LatLng::from).serialize(serializer)
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Coord<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<LatLng>::deserialize(deserializer)?.map(Coord::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn place_json_uses_lat_lng_fields() {
        let json = r#"{"id":"p1","name":"Cafe","category":"cafe","lat":37.5,"lng":127.0}"#;
        let place: PlaceInput = serde_json::from_str(json).expect("valid place json");
        assert_eq!(place.location, Coord { x: 127.0, y: 37.5 });
        assert_eq!(place.estimated_visit_minutes, None);

        let encoded = serde_json::to_value(&place).expect("serialise place");
        assert_eq!(encoded["lat"], 37.5);
        assert_eq!(encoded["lng"], 127.0);
        assert!(encoded.get("estimated_visit_minutes").is_none());
    }

    #[rstest]
    fn unknown_category_is_rejected() {
        let json = r#"{"id":"p1","name":"X","category":"spaceport","lat":0.0,"lng":0.0}"#;
        assert!(serde_json::from_str::<PlaceInput>(json).is_err());
    }
}
