//! Built-in seed collections for bootstrapping an empty deployment
//!
//! Loaded through `POST /api/admin/seed`, which overwrites all three
//! collections with this data.

use chrono::NaiveDate;

use crate::records::{City, Concert, ConcertStatus, PriceRange, Venue, VenueType};

fn date(s: &str) -> NaiveDate {
    s.parse().expect("seed dates are valid ISO dates")
}

fn price(min: f64, max: f64) -> Option<PriceRange> {
    Some(PriceRange {
        min: Some(min),
        max: Some(max),
        currency: "RUB".to_string(),
    })
}

pub fn seed_cities() -> Vec<City> {
    vec![
        City {
            id: "city-1".to_string(),
            name: "Москва".to_string(),
            coordinates: [55.7558, 37.6173],
            region: "Центральный".to_string(),
            population: Some(12_500_000),
            timezone: Some("Europe/Moscow".to_string()),
        },
        City {
            id: "city-2".to_string(),
            name: "Санкт-Петербург".to_string(),
            coordinates: [59.9311, 30.3609],
            region: "Северо-Западный".to_string(),
            population: Some(5_380_000),
            timezone: Some("Europe/Moscow".to_string()),
        },
        City {
            id: "city-3".to_string(),
            name: "Екатеринбург".to_string(),
            coordinates: [56.8389, 60.6057],
            region: "Уральский".to_string(),
            population: Some(1_500_000),
            timezone: Some("Asia/Yekaterinburg".to_string()),
        },
        City {
            id: "city-4".to_string(),
            name: "Новосибирск".to_string(),
            coordinates: [54.9833, 82.8964],
            region: "Сибирский".to_string(),
            population: Some(1_630_000),
            timezone: Some("Asia/Novosibirsk".to_string()),
        },
        City {
            id: "city-5".to_string(),
            name: "Казань".to_string(),
            coordinates: [55.7887, 49.1221],
            region: "Приволжский".to_string(),
            population: Some(1_260_000),
            timezone: Some("Europe/Moscow".to_string()),
        },
    ]
}

pub fn seed_venues() -> Vec<Venue> {
    vec![
        Venue {
            id: "venue-1".to_string(),
            name: "Adrenaline Stadium".to_string(),
            city_id: "city-1".to_string(),
            capacity: Some(15_000),
            venue_type: VenueType::Stadium,
            address: Some("ул. Лубянская, 30".to_string()),
        },
        Venue {
            id: "venue-2".to_string(),
            name: "БКЗ «Октябрьский»".to_string(),
            city_id: "city-2".to_string(),
            capacity: Some(4_000),
            venue_type: VenueType::Hall,
            address: Some("Лиговский пр., 6".to_string()),
        },
        Venue {
            id: "venue-3".to_string(),
            name: "Телеклуб".to_string(),
            city_id: "city-3".to_string(),
            capacity: Some(800),
            venue_type: VenueType::Club,
            address: Some("ул. 8 Марта, 8а".to_string()),
        },
        Venue {
            id: "venue-4".to_string(),
            name: "ДК железнодорожников".to_string(),
            city_id: "city-4".to_string(),
            capacity: Some(1_200),
            venue_type: VenueType::Hall,
            address: Some("ул. Ленина, 3".to_string()),
        },
        Venue {
            id: "venue-5".to_string(),
            name: "KZ-Bar".to_string(),
            city_id: "city-5".to_string(),
            capacity: Some(500),
            venue_type: VenueType::Club,
            address: Some("ул. Баумана, 7".to_string()),
        },
    ]
}

pub fn seed_concerts() -> Vec<Concert> {
    vec![
        Concert {
            id: "concert-1".to_string(),
            date: date("2025-09-30"),
            city_id: "city-4".to_string(),
            venue_id: "venue-4".to_string(),
            concert_type: Some("Concert Hall".to_string()),
            status: ConcertStatus::Upcoming,
            sold_out: false,
            ticket_url: None,
            price: price(1500.0, 3500.0),
        },
        Concert {
            id: "concert-2".to_string(),
            date: date("2025-10-02"),
            city_id: "city-2".to_string(),
            venue_id: "venue-2".to_string(),
            concert_type: Some("Lumen & Orchestra".to_string()),
            status: ConcertStatus::Upcoming,
            sold_out: false,
            ticket_url: None,
            price: price(2000.0, 5000.0),
        },
        Concert {
            id: "concert-3".to_string(),
            date: date("2024-09-15"),
            city_id: "city-1".to_string(),
            venue_id: "venue-1".to_string(),
            concert_type: Some("Stadium Tour".to_string()),
            status: ConcertStatus::Past,
            sold_out: true,
            ticket_url: None,
            price: price(2500.0, 8000.0),
        },
        Concert {
            id: "concert-4".to_string(),
            date: date("2024-10-20"),
            city_id: "city-3".to_string(),
            venue_id: "venue-3".to_string(),
            concert_type: Some("Club Show".to_string()),
            status: ConcertStatus::Past,
            sold_out: true,
            ticket_url: None,
            price: price(1000.0, 2000.0),
        },
        Concert {
            id: "concert-5".to_string(),
            date: date("2024-11-10"),
            city_id: "city-5".to_string(),
            venue_id: "venue-5".to_string(),
            concert_type: Some("Club Show".to_string()),
            status: ConcertStatus::Past,
            sold_out: false,
            ticket_url: None,
            price: price(800.0, 1500.0),
        },
    ]
}
