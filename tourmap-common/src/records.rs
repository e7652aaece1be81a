//! Entity records for the three persisted collections
//!
//! Wire field names are camelCase (`cityId`, `soldOut`, ...) to match the
//! persisted JSON layout. Collections are stored as plain JSON arrays with no
//! embedded schema version marker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default currency code applied when a price range omits one
pub const DEFAULT_CURRENCY: &str = "RUB";

/// A city that can host concerts
///
/// Invariant: `id` is unique within the City collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: String,
    pub name: String,
    /// Latitude, longitude
    pub coordinates: [f64; 2],
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Closed set of venue kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
    Stadium,
    Arena,
    Club,
    Hall,
    Outdoor,
}

/// A concert venue
///
/// `city_id` is not checked against the City collection by the store;
/// consumers must tolerate dangling references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub city_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u64>,
    #[serde(rename = "type")]
    pub venue_type: VenueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Closed set of concert statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcertStatus {
    Upcoming,
    Past,
    Cancelled,
}

/// Ticket price range; currency defaults to [`DEFAULT_CURRENCY`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// A scheduled (or past) concert
///
/// The Concert collection carries an ordering invariant: after every
/// mutation it is resorted ascending by `date`, so read order is always
/// chronological regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concert {
    pub id: String,
    /// Calendar date, no time zone
    pub date: NaiveDate,
    pub city_id: String,
    pub venue_id: String,
    /// Free-text label ("Club Show", "Arena Show", ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub concert_type: Option<String>,
    pub status: ConcertStatus,
    #[serde(default)]
    pub sold_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceRange>,
}

/// Concert joined to its referenced City and Venue at read time
///
/// Never persisted. The strict read path omits concerts whose references
/// dangle; the admin read path keeps them with the joined fields absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcertWithDetails {
    #[serde(flatten)]
    pub concert: Concert,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_concert_json() -> serde_json::Value {
        serde_json::json!({
            "id": "concert-1",
            "date": "2025-09-30",
            "cityId": "city-4",
            "venueId": "venue-4",
            "type": "Concert Hall",
            "status": "upcoming",
            "price": { "min": 1500.0, "max": 3500.0, "currency": "RUB" }
        })
    }

    #[test]
    fn concert_deserializes_camel_case_wire_names() {
        let concert: Concert = serde_json::from_value(sample_concert_json()).unwrap();
        assert_eq!(concert.city_id, "city-4");
        assert_eq!(concert.venue_id, "venue-4");
        assert_eq!(concert.date, NaiveDate::from_ymd_opt(2025, 9, 30).unwrap());
        assert_eq!(concert.status, ConcertStatus::Upcoming);
        // soldOut omitted on the wire defaults to false
        assert!(!concert.sold_out);
    }

    #[test]
    fn price_currency_defaults_when_omitted() {
        let price: PriceRange = serde_json::from_value(serde_json::json!({
            "min": 1000.0
        }))
        .unwrap();
        assert_eq!(price.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn venue_type_rejects_unknown_wire_value() {
        let result: Result<VenueType, _> =
            serde_json::from_value(serde_json::json!("theater"));
        assert!(result.is_err());
    }

    #[test]
    fn concert_round_trips_through_wire_format() {
        let concert: Concert = serde_json::from_value(sample_concert_json()).unwrap();
        let value = serde_json::to_value(&concert).unwrap();
        assert_eq!(value["cityId"], "city-4");
        assert_eq!(value["date"], "2025-09-30");
        assert_eq!(value["soldOut"], false);
        // omitted optionals stay off the wire
        assert!(value.get("ticketUrl").is_none());
    }
}
