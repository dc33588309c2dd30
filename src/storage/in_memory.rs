//! In-memory implementation of VenueStore for testing and development

use crate::core::filter::VenueFilter;
use crate::core::mutation::Append;
use crate::core::service::VenueStore;
use crate::core::venue::Venue;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory venue store
///
/// Keeps venues in insertion order behind a `RwLock`. Every write, appends
/// included, runs inside one write-lock critical section, so concurrent
/// appends to the same venue never lose an element.
#[derive(Clone)]
pub struct InMemoryVenueStore {
    venues: Arc<RwLock<IndexMap<Uuid, Venue>>>,
}

impl InMemoryVenueStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self {
            venues: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Number of stored venues
    pub fn len(&self) -> Result<usize> {
        let venues = self
            .venues
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(venues.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryVenueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueStore for InMemoryVenueStore {
    async fn find(&self, filter: &VenueFilter) -> Result<Vec<Venue>> {
        let matcher = filter
            .matcher()
            .map_err(|e| anyhow!("Failed to compile filter: {}", e))?;

        let venues = self
            .venues
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut found: Vec<Venue> = venues
            .values()
            .filter(|venue| matcher.matches(venue))
            .cloned()
            .collect();

        // Nearest first, like a store-side proximity query
        if filter.proximity().is_some() {
            found.sort_by(|a, b| {
                let da = matcher.distance(a).unwrap_or(f64::INFINITY);
                let db = matcher.distance(b).unwrap_or(f64::INFINITY);
                da.total_cmp(&db)
            });
        }

        Ok(found)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Venue>> {
        let venues = self
            .venues
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(venues.get(id).cloned())
    }

    async fn insert(&self, venue: Venue) -> Result<Venue> {
        let mut venues = self
            .venues
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if venues.contains_key(&venue.id) {
            return Err(anyhow!("Duplicate venue id: {}", venue.id));
        }
        venues.insert(venue.id, venue.clone());

        Ok(venue)
    }

    async fn replace(&self, venue: Venue) -> Result<Option<Venue>> {
        let mut venues = self
            .venues
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(slot) = venues.get_mut(&venue.id) else {
            return Ok(None);
        };
        *slot = venue.clone();

        Ok(Some(venue))
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<Venue>> {
        let mut venues = self
            .venues
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(venues.shift_remove(id))
    }

    async fn append(&self, id: &Uuid, element: Append) -> Result<Option<Venue>> {
        let mut venues = self
            .venues
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(venue) = venues.get_mut(id) else {
            return Ok(None);
        };
        element.apply(venue);

        Ok(Some(venue.clone()))
    }
}
