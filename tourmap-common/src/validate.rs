//! Schema validation for candidate records
//!
//! Turns untyped JSON into typed records, or fails with a [`ValidationError`]
//! enumerating every offending field and the rule it violated. No partial
//! typed result is ever produced on failure.
//!
//! Optional-field defaulting (`soldOut` → false, `price.currency` → "RUB")
//! lives here rather than at call sites, so every record entering the store
//! has already been normalized.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::records::{
    City, Concert, ConcertStatus, PriceRange, Venue, VenueType, DEFAULT_CURRENCY,
};

/// A single field-level rule violation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    /// Dotted path to the offending field ("coordinates", "price.min", ...)
    pub path: String,
    /// Human-readable rule description
    pub message: String,
}

/// Structured validation failure carrying every violation found
#[derive(Debug, Clone, serde::Serialize)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", violation.path, violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Partial update to a Concert; only supplied fields are validated and applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConcertPatch {
    pub id: Option<String>,
    pub date: Option<NaiveDate>,
    pub city_id: Option<String>,
    pub venue_id: Option<String>,
    pub concert_type: Option<String>,
    pub status: Option<ConcertStatus>,
    pub sold_out: Option<bool>,
    pub ticket_url: Option<String>,
    pub price: Option<PriceRange>,
}

impl ConcertPatch {
    /// True when the patch carries no fields (applying it is an identity)
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Field extractor that accumulates violations instead of failing fast
struct Fields<'a> {
    obj: &'a Map<String, Value>,
    violations: Vec<Violation>,
}

impl<'a> Fields<'a> {
    fn new(obj: &'a Map<String, Value>) -> Self {
        Self {
            obj,
            violations: Vec::new(),
        }
    }

    fn fail(&mut self, path: &str, message: impl Into<String>) {
        self.violations.push(Violation {
            path: path.to_string(),
            message: message.into(),
        });
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }

    /// Required non-empty string
    fn string(&mut self, key: &str) -> Option<String> {
        match self.obj.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::String(_)) => {
                self.fail(key, "must be a non-empty string");
                None
            }
            Some(_) => {
                self.fail(key, "must be a string");
                None
            }
            None => {
                self.fail(key, "is required");
                None
            }
        }
    }

    /// Optional non-empty string
    fn optional_string(&mut self, key: &str) -> Option<String> {
        match self.obj.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(_) => {
                self.fail(key, "must be a non-empty string");
                None
            }
        }
    }

    /// Optional non-negative integer (population, capacity)
    fn optional_count(&mut self, key: &str) -> Option<u64> {
        match self.obj.get(key) {
            Some(Value::Number(n)) => match n.as_u64() {
                Some(v) => Some(v),
                None => {
                    self.fail(key, "must be a non-negative integer");
                    None
                }
            },
            Some(Value::Null) | None => None,
            Some(_) => {
                self.fail(key, "must be a non-negative integer");
                None
            }
        }
    }

    /// Optional boolean; absent or null is None
    fn optional_bool(&mut self, key: &str) -> Option<bool> {
        match self.obj.get(key) {
            Some(Value::Bool(b)) => Some(*b),
            Some(Value::Null) | None => None,
            Some(_) => {
                self.fail(key, "must be a boolean");
                None
            }
        }
    }

    /// Required coordinate pair: exactly two finite numbers
    fn coordinates(&mut self, key: &str) -> Option<[f64; 2]> {
        let value = match self.obj.get(key) {
            Some(v) => v,
            None => {
                self.fail(key, "is required");
                return None;
            }
        };
        let pair = match value.as_array() {
            Some(arr) if arr.len() == 2 => arr,
            _ => {
                self.fail(key, "must be a pair of numbers [latitude, longitude]");
                return None;
            }
        };
        let mut out = [0.0; 2];
        for (i, element) in pair.iter().enumerate() {
            match element.as_f64() {
                Some(n) if n.is_finite() => out[i] = n,
                _ => {
                    self.fail(&format!("{key}[{i}]"), "must be a finite number");
                    return None;
                }
            }
        }
        Some(out)
    }

    /// Required ISO calendar date (YYYY-MM-DD)
    fn date(&mut self, key: &str) -> Option<NaiveDate> {
        let raw = self.string(key)?;
        match raw.parse::<NaiveDate>() {
            Ok(date) => Some(date),
            Err(_) => {
                self.fail(key, "must be an ISO date (YYYY-MM-DD)");
                None
            }
        }
    }

    /// Required member of a closed string enumeration
    fn enum_member<T: Copy>(&mut self, key: &str, members: &[(&str, T)]) -> Option<T> {
        let raw = self.string(key)?;
        match members.iter().find(|(name, _)| *name == raw) {
            Some((_, value)) => Some(*value),
            None => {
                let allowed = members
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
                    .join(", ");
                self.fail(key, format!("must be one of: {allowed}"));
                None
            }
        }
    }

    /// Optional absolute http(s) URL
    fn optional_url(&mut self, key: &str) -> Option<String> {
        let raw = self.optional_string(key)?;
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Some(raw)
        } else {
            self.fail(key, "must be an absolute http(s) URL");
            None
        }
    }

    /// Optional price range sub-object; currency defaults when omitted
    fn optional_price(&mut self, key: &str) -> Option<PriceRange> {
        let value = match self.obj.get(key) {
            Some(Value::Object(obj)) => obj.clone(),
            Some(Value::Null) | None => return None,
            Some(_) => {
                self.fail(key, "must be an object");
                return None;
            }
        };
        let mut price = PriceRange {
            min: None,
            max: None,
            currency: DEFAULT_CURRENCY.to_string(),
        };
        for bound in ["min", "max"] {
            match value.get(bound) {
                Some(Value::Number(n)) => match n.as_f64() {
                    Some(v) if v >= 0.0 => {
                        if bound == "min" {
                            price.min = Some(v);
                        } else {
                            price.max = Some(v);
                        }
                    }
                    _ => self.fail(&format!("{key}.{bound}"), "must be a non-negative number"),
                },
                Some(Value::Null) | None => {}
                Some(_) => self.fail(&format!("{key}.{bound}"), "must be a non-negative number"),
            }
        }
        match value.get("currency") {
            Some(Value::String(code)) if !code.is_empty() => price.currency = code.clone(),
            Some(Value::Null) | None => {}
            Some(_) => self.fail(&format!("{key}.currency"), "must be a non-empty string"),
        }
        Some(price)
    }
}

fn as_object(input: &Value) -> Result<&Map<String, Value>, ValidationError> {
    input.as_object().ok_or_else(|| ValidationError {
        violations: vec![Violation {
            path: String::new(),
            message: "must be a JSON object".to_string(),
        }],
    })
}

const VENUE_TYPES: [(&str, VenueType); 5] = [
    ("stadium", VenueType::Stadium),
    ("arena", VenueType::Arena),
    ("club", VenueType::Club),
    ("hall", VenueType::Hall),
    ("outdoor", VenueType::Outdoor),
];

const CONCERT_STATUSES: [(&str, ConcertStatus); 3] = [
    ("upcoming", ConcertStatus::Upcoming),
    ("past", ConcertStatus::Past),
    ("cancelled", ConcertStatus::Cancelled),
];

/// Validate a full City record
pub fn validate_city(input: &Value) -> Result<City, ValidationError> {
    let obj = as_object(input)?;
    let mut fields = Fields::new(obj);

    let id = fields.string("id");
    let name = fields.string("name");
    let coordinates = fields.coordinates("coordinates");
    let region = fields.string("region");
    let population = fields.optional_count("population");
    let timezone = fields.optional_string("timezone");

    fields.finish()?;
    Ok(City {
        // finish() returned Ok, so every required extraction succeeded
        id: id.unwrap(),
        name: name.unwrap(),
        coordinates: coordinates.unwrap(),
        region: region.unwrap(),
        population,
        timezone,
    })
}

/// Validate a full Venue record
pub fn validate_venue(input: &Value) -> Result<Venue, ValidationError> {
    let obj = as_object(input)?;
    let mut fields = Fields::new(obj);

    let id = fields.string("id");
    let name = fields.string("name");
    let city_id = fields.string("cityId");
    let capacity = fields.optional_count("capacity");
    let venue_type = fields.enum_member("type", &VENUE_TYPES);
    let address = fields.optional_string("address");

    fields.finish()?;
    Ok(Venue {
        id: id.unwrap(),
        name: name.unwrap(),
        city_id: city_id.unwrap(),
        capacity,
        venue_type: venue_type.unwrap(),
        address,
    })
}

/// Validate a full Concert record, applying defaults for omitted optionals
pub fn validate_concert(input: &Value) -> Result<Concert, ValidationError> {
    let obj = as_object(input)?;
    let mut fields = Fields::new(obj);

    let id = fields.string("id");
    let date = fields.date("date");
    let city_id = fields.string("cityId");
    let venue_id = fields.string("venueId");
    let concert_type = fields.optional_string("type");
    let status = fields.enum_member("status", &CONCERT_STATUSES);
    let sold_out = fields.optional_bool("soldOut").unwrap_or(false);
    let ticket_url = fields.optional_url("ticketUrl");
    let price = fields.optional_price("price");

    fields.finish()?;
    Ok(Concert {
        id: id.unwrap(),
        date: date.unwrap(),
        city_id: city_id.unwrap(),
        venue_id: venue_id.unwrap(),
        concert_type,
        status: status.unwrap(),
        sold_out,
        ticket_url,
        price,
    })
}

/// Validate a partial Concert update: only supplied fields are checked
pub fn validate_concert_patch(input: &Value) -> Result<ConcertPatch, ValidationError> {
    let obj = as_object(input)?;
    let mut fields = Fields::new(obj);
    let mut patch = ConcertPatch::default();

    if obj.contains_key("id") {
        patch.id = fields.string("id");
    }
    if obj.contains_key("date") {
        patch.date = fields.date("date");
    }
    if obj.contains_key("cityId") {
        patch.city_id = fields.string("cityId");
    }
    if obj.contains_key("venueId") {
        patch.venue_id = fields.string("venueId");
    }
    if obj.contains_key("type") {
        patch.concert_type = fields.optional_string("type");
    }
    if obj.contains_key("status") {
        patch.status = fields.enum_member("status", &CONCERT_STATUSES);
    }
    if obj.contains_key("soldOut") {
        patch.sold_out = fields.optional_bool("soldOut");
    }
    if obj.contains_key("ticketUrl") {
        patch.ticket_url = fields.optional_url("ticketUrl");
    }
    if obj.contains_key("price") {
        patch.price = fields.optional_price("price");
    }

    fields.finish()?;
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(err: &ValidationError) -> Vec<&str> {
        err.violations.iter().map(|v| v.path.as_str()).collect()
    }

    #[test]
    fn city_with_all_fields_validates() {
        let city = validate_city(&json!({
            "id": "city-1",
            "name": "Москва",
            "coordinates": [55.7558, 37.6173],
            "region": "Центральный",
            "population": 12_500_000u64,
            "timezone": "Europe/Moscow"
        }))
        .unwrap();
        assert_eq!(city.id, "city-1");
        assert_eq!(city.coordinates, [55.7558, 37.6173]);
        assert_eq!(city.population, Some(12_500_000));
    }

    #[test]
    fn city_errors_enumerate_every_offending_field() {
        let err = validate_city(&json!({
            "id": "",
            "coordinates": [55.7558],
            "region": "Центральный"
        }))
        .unwrap_err();
        let paths = paths(&err);
        assert!(paths.contains(&"id"));
        assert!(paths.contains(&"name"));
        assert!(paths.contains(&"coordinates"));
        assert_eq!(err.violations.len(), 3);
    }

    #[test]
    fn venue_type_outside_closed_set_is_rejected_on_type_path() {
        let err = validate_venue(&json!({
            "id": "venue-9",
            "name": "Драмтеатр",
            "cityId": "city-1",
            "type": "theater"
        }))
        .unwrap_err();
        assert_eq!(paths(&err), vec!["type"]);
        assert!(err.violations[0].message.contains("stadium"));
    }

    #[test]
    fn venue_type_hall_is_accepted() {
        let venue = validate_venue(&json!({
            "id": "venue-2",
            "name": "БКЗ «Октябрьский»",
            "cityId": "city-2",
            "capacity": 4000,
            "type": "hall",
            "address": "Лиговский пр., 6"
        }))
        .unwrap();
        assert_eq!(venue.venue_type, VenueType::Hall);
        assert_eq!(venue.capacity, Some(4000));
    }

    #[test]
    fn venue_negative_capacity_is_rejected() {
        let err = validate_venue(&json!({
            "id": "venue-3",
            "name": "Телеклуб",
            "cityId": "city-3",
            "capacity": -10,
            "type": "club"
        }))
        .unwrap_err();
        assert_eq!(paths(&err), vec!["capacity"]);
    }

    #[test]
    fn concert_defaults_sold_out_and_currency() {
        let concert = validate_concert(&json!({
            "id": "concert-1",
            "date": "2025-09-30",
            "cityId": "city-4",
            "venueId": "venue-4",
            "status": "upcoming",
            "price": { "min": 1500.0, "max": 3500.0 }
        }))
        .unwrap();
        assert!(!concert.sold_out);
        assert_eq!(concert.price.unwrap().currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn concert_bad_date_and_status_collect_both_violations() {
        let err = validate_concert(&json!({
            "id": "concert-1",
            "date": "30.09.2025",
            "cityId": "city-4",
            "venueId": "venue-4",
            "status": "postponed"
        }))
        .unwrap_err();
        let paths = paths(&err);
        assert_eq!(paths, vec!["date", "status"]);
    }

    #[test]
    fn concert_price_bounds_must_be_non_negative() {
        let err = validate_concert(&json!({
            "id": "concert-1",
            "date": "2025-09-30",
            "cityId": "city-4",
            "venueId": "venue-4",
            "status": "upcoming",
            "price": { "min": -5.0 }
        }))
        .unwrap_err();
        assert_eq!(paths(&err), vec!["price.min"]);
    }

    #[test]
    fn non_object_input_fails_at_root_path() {
        let err = validate_concert(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(paths(&err), vec![""]);
    }

    #[test]
    fn patch_checks_only_supplied_fields() {
        let patch = validate_concert_patch(&json!({ "soldOut": true })).unwrap();
        assert_eq!(patch.sold_out, Some(true));
        assert!(patch.date.is_none());
        assert!(patch.status.is_none());
    }

    #[test]
    fn empty_patch_is_empty() {
        let patch = validate_concert_patch(&json!({})).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_rejects_invalid_supplied_field() {
        let err = validate_concert_patch(&json!({ "status": "maybe" })).unwrap_err();
        assert_eq!(paths(&err), vec!["status"]);
    }
}
