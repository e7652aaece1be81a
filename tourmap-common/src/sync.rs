//! Sync Pipeline: fetch → validate → merge → persist orchestration
//!
//! The only component that reads or writes the Record Store, so the store
//! never observes a partially-validated or unsorted collection. Every write
//! is a whole-collection read-modify-write with no concurrency token or
//! locking: two concurrent writers to the same collection can race, and the
//! second writer's overwrite silently discards the first writer's change (a
//! lost update). That is the documented, deliberately-kept semantics of this
//! store, not an oversight; see DESIGN.md.
//!
//! Failure semantics:
//! - store *not found* is a legitimately empty collection for both reads and
//!   writes (first-ever writes start from empty);
//! - store *failure* (unreachable, malformed stored JSON) degrades public
//!   reads to an empty result set but aborts writes and admin reads, so a
//!   write never proceeds against an assumed-empty collection;
//! - validation failure aborts before the store is ever touched.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::merge;
use crate::records::{City, Concert, ConcertWithDetails, Venue};
use crate::store::{BlobStore, Collection};
use crate::validate;

/// A typed collection read result: items, count, retrieval timestamp
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub count: usize,
    pub last_updated: DateTime<Utc>,
    /// True when the store fetch failed and the read degraded to empty
    pub degraded: bool,
}

impl<T> Listing<T> {
    fn of(items: Vec<T>) -> Self {
        Self {
            count: items.len(),
            items,
            last_updated: Utc::now(),
            degraded: false,
        }
    }

    fn degraded_empty() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
            last_updated: Utc::now(),
            degraded: true,
        }
    }
}

/// Per-collection record counts for the admin storage view
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StorageInfo {
    pub cities: usize,
    pub venues: usize,
    pub concerts: usize,
}

/// Orchestrates validation and merge operations around store accesses
#[derive(Debug, Clone)]
pub struct SyncPipeline<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> SyncPipeline<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch and decode a collection; not-found is empty, failure propagates
    async fn fetch<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        match self.store.get(collection).await? {
            Some(body) => serde_json::from_str(&body).map_err(|e| {
                Error::StoreUnavailable(format!(
                    "malformed document under {}: {}",
                    collection.key(),
                    e
                ))
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Fetch for public reads: any failure degrades to an empty collection
    async fn fetch_degraded<T: DeserializeOwned>(&self, collection: Collection) -> (Vec<T>, bool) {
        match self.fetch(collection).await {
            Ok(items) => (items, false),
            Err(e) => {
                warn!("Degrading read of {} to empty: {}", collection.key(), e);
                (Vec::new(), true)
            }
        }
    }

    /// Persist a whole collection, overwriting the prior document in full
    async fn persist<T: Serialize>(&self, collection: Collection, items: &[T]) -> Result<()> {
        let body = serde_json::to_string_pretty(items)
            .map_err(|e| Error::Internal(format!("failed to encode {}: {}", collection.key(), e)))?;
        self.store.put(collection, body).await
    }

    // ------------------------------------------------------------------
    // Write paths
    // ------------------------------------------------------------------

    /// Create (or replace) a City from untyped input
    pub async fn add_city(&self, input: &Value) -> Result<City> {
        let city = validate::validate_city(input)?;
        let cities: Vec<City> = self.fetch(Collection::Cities).await?;
        let next = merge::upsert(cities, city.clone());
        self.persist(Collection::Cities, &next).await?;
        info!("Upserted city {} ({} total)", city.id, next.len());
        Ok(city)
    }

    /// Create (or replace) a Venue from untyped input
    pub async fn add_venue(&self, input: &Value) -> Result<Venue> {
        let venue = validate::validate_venue(input)?;
        let venues: Vec<Venue> = self.fetch(Collection::Venues).await?;
        let next = merge::upsert(venues, venue.clone());
        self.persist(Collection::Venues, &next).await?;
        info!("Upserted venue {} ({} total)", venue.id, next.len());
        Ok(venue)
    }

    /// Create (or replace) a Concert; the collection is re-sorted by date
    /// before persisting so read order stays chronological
    pub async fn add_concert(&self, input: &Value) -> Result<Concert> {
        let concert = validate::validate_concert(input)?;
        let concerts: Vec<Concert> = self.fetch(Collection::Concerts).await?;
        let next = merge::reorder_by_date(merge::upsert(concerts, concert.clone()));
        self.persist(Collection::Concerts, &next).await?;
        info!("Upserted concert {} ({} total)", concert.id, next.len());
        Ok(concert)
    }

    /// Partially update a Concert by id; an absent id is a no-op success
    pub async fn update_concert(&self, id: &str, input: &Value) -> Result<()> {
        let patch = validate::validate_concert_patch(input)?;
        let concerts: Vec<Concert> = self.fetch(Collection::Concerts).await?;
        let next = merge::reorder_by_date(merge::apply_partial(concerts, id, &patch));
        self.persist(Collection::Concerts, &next).await?;
        info!("Applied partial update to concert {}", id);
        Ok(())
    }

    /// Delete a Concert by id; deleting an absent id is a no-op success.
    /// Removal preserves existing order, so no reorder is needed.
    pub async fn delete_concert(&self, id: &str) -> Result<()> {
        let concerts: Vec<Concert> = self.fetch(Collection::Concerts).await?;
        let next = merge::remove(concerts, id);
        self.persist(Collection::Concerts, &next).await?;
        info!("Deleted concert {} ({} remain)", id, next.len());
        Ok(())
    }

    /// Replace all three collections with the supplied seed data
    pub async fn seed(
        &self,
        cities: Vec<City>,
        venues: Vec<Venue>,
        concerts: Vec<Concert>,
    ) -> Result<StorageInfo> {
        let concerts = merge::reorder_by_date(concerts);
        self.persist(Collection::Cities, &cities).await?;
        self.persist(Collection::Venues, &venues).await?;
        self.persist(Collection::Concerts, &concerts).await?;
        info!(
            "Seeded storage: {} cities, {} venues, {} concerts",
            cities.len(),
            venues.len(),
            concerts.len()
        );
        Ok(StorageInfo {
            cities: cities.len(),
            venues: venues.len(),
            concerts: concerts.len(),
        })
    }

    // ------------------------------------------------------------------
    // Read paths
    // ------------------------------------------------------------------

    /// Public city listing; degrades to empty on store failure
    pub async fn list_cities(&self) -> Listing<City> {
        let (cities, degraded) = self.fetch_degraded(Collection::Cities).await;
        if degraded {
            return Listing::degraded_empty();
        }
        Listing::of(cities)
    }

    /// Public venue listing with optional city filter; degrades to empty
    pub async fn list_venues(&self, city_id: Option<&str>) -> Listing<Venue> {
        let (venues, degraded) = self.fetch_degraded::<Venue>(Collection::Venues).await;
        if degraded {
            return Listing::degraded_empty();
        }
        let venues = match city_id {
            Some(city_id) => venues.into_iter().filter(|v| v.city_id == city_id).collect(),
            None => venues,
        };
        Listing::of(venues)
    }

    /// Raw, unjoined concert listing; degrades to empty on store failure.
    /// Concerts with dangling city/venue references are included here.
    pub async fn list_concerts(&self) -> Listing<Concert> {
        let (concerts, degraded) = self.fetch_degraded(Collection::Concerts).await;
        if degraded {
            return Listing::degraded_empty();
        }
        Listing::of(concerts)
    }

    /// Public joined listing: concerts whose City or Venue reference dangles
    /// are omitted (the external read API requires complete joins).
    /// Degrades to empty on store failure.
    pub async fn list_concerts_with_details(&self) -> Listing<ConcertWithDetails> {
        let (concerts, c1) = self.fetch_degraded::<Concert>(Collection::Concerts).await;
        let (cities, c2) = self.fetch_degraded::<City>(Collection::Cities).await;
        let (venues, c3) = self.fetch_degraded::<Venue>(Collection::Venues).await;
        if c1 || c2 || c3 {
            return Listing::degraded_empty();
        }
        let items = join_concerts(concerts, &cities, &venues)
            .into_iter()
            .filter(|entry| entry.city.is_some() && entry.venue.is_some())
            .collect();
        Listing::of(items)
    }

    /// Admin joined listing: dangling references are tolerated and the joined
    /// field left absent. Store failure is a hard error here.
    pub async fn admin_concerts_with_details(&self) -> Result<Listing<ConcertWithDetails>> {
        let concerts: Vec<Concert> = self.fetch(Collection::Concerts).await?;
        let cities: Vec<City> = self.fetch(Collection::Cities).await?;
        let venues: Vec<Venue> = self.fetch(Collection::Venues).await?;
        Ok(Listing::of(join_concerts(concerts, &cities, &venues)))
    }

    /// Per-collection record counts; store failure is a hard error
    pub async fn storage_info(&self) -> Result<StorageInfo> {
        let cities: Vec<City> = self.fetch(Collection::Cities).await?;
        let venues: Vec<Venue> = self.fetch(Collection::Venues).await?;
        let concerts: Vec<Concert> = self.fetch(Collection::Concerts).await?;
        Ok(StorageInfo {
            cities: cities.len(),
            venues: venues.len(),
            concerts: concerts.len(),
        })
    }
}

/// Join each Concert to its referenced City and Venue by id; missing
/// references produce `None` joined fields (callers apply their policy)
fn join_concerts(
    concerts: Vec<Concert>,
    cities: &[City],
    venues: &[Venue],
) -> Vec<ConcertWithDetails> {
    let cities_by_id: HashMap<&str, &City> =
        cities.iter().map(|c| (c.id.as_str(), c)).collect();
    let venues_by_id: HashMap<&str, &Venue> =
        venues.iter().map(|v| (v.id.as_str(), v)).collect();

    concerts
        .into_iter()
        .map(|concert| {
            let city = cities_by_id.get(concert.city_id.as_str()).map(|c| (*c).clone());
            let venue = venues_by_id.get(concert.venue_id.as_str()).map(|v| (*v).clone());
            ConcertWithDetails {
                concert,
                city,
                venue,
            }
        })
        .collect()
}
