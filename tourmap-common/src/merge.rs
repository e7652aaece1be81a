//! Pure in-memory collection transforms
//!
//! Every operation here is a total function over a well-formed collection and
//! consults no external state; the sync pipeline sequences them around store
//! accesses.

use crate::records::Concert;
use crate::validate::ConcertPatch;

/// Records addressable by their stable string identifier
pub trait HasId {
    fn id(&self) -> &str;
}

impl HasId for crate::records::City {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for crate::records::Venue {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for Concert {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Shallow field-level patch application
pub trait ApplyPatch<P> {
    fn apply(&mut self, patch: &P);
}

impl ApplyPatch<ConcertPatch> for Concert {
    fn apply(&mut self, patch: &ConcertPatch) {
        if let Some(id) = &patch.id {
            self.id = id.clone();
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(city_id) = &patch.city_id {
            self.city_id = city_id.clone();
        }
        if let Some(venue_id) = &patch.venue_id {
            self.venue_id = venue_id.clone();
        }
        if let Some(concert_type) = &patch.concert_type {
            self.concert_type = Some(concert_type.clone());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(sold_out) = patch.sold_out {
            self.sold_out = sold_out;
        }
        if let Some(ticket_url) = &patch.ticket_url {
            self.ticket_url = Some(ticket_url.clone());
        }
        if let Some(price) = &patch.price {
            // shallow merge: a supplied price replaces the whole sub-object
            self.price = Some(price.clone());
        }
    }
}

/// Insert-or-replace by id: any existing element with the same id is removed
/// and the new record appended. Replacement is whole-record, never a
/// field-level merge.
pub fn upsert<R: HasId>(collection: Vec<R>, record: R) -> Vec<R> {
    let mut next: Vec<R> = collection
        .into_iter()
        .filter(|existing| existing.id() != record.id())
        .collect();
    next.push(record);
    next
}

/// Shallow-merge `patch` over the element with `id`; a missing id is a
/// no-op, not an error. Callers that require existence must check first.
pub fn apply_partial<R, P>(mut collection: Vec<R>, id: &str, patch: &P) -> Vec<R>
where
    R: HasId + ApplyPatch<P>,
{
    if let Some(record) = collection.iter_mut().find(|r| r.id() == id) {
        record.apply(patch);
    }
    collection
}

/// Filter out the element with `id`; removing a non-existent id is a no-op
pub fn remove<R: HasId>(collection: Vec<R>, id: &str) -> Vec<R> {
    collection
        .into_iter()
        .filter(|record| record.id() != id)
        .collect()
}

/// Stable ascending sort by date; ties retain relative input order.
/// Applicable only to the Concert collection.
pub fn reorder_by_date(mut concerts: Vec<Concert>) -> Vec<Concert> {
    concerts.sort_by_key(|concert| concert.date);
    concerts
}
