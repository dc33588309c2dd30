//! Store trait and venue operations
//!
//! [`VenueStore`] is the seam to the document store: the handful of
//! persistence primitives the service needs. [`VenueService`] holds an
//! injected store handle and implements the venue operations on top of it,
//! translating absent documents and store failures into [`VenueError`].

use crate::core::error::VenueError;
use crate::core::filter::{VenueFilter, VenueQuery};
use crate::core::mutation::{self, Append};
use crate::core::venue::{CommentPayload, RatePayload, Venue, VenuePayload};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Persistence primitives for venue documents
///
/// Every method is a single-document operation and must be atomic with
/// respect to other writes on the same document. Methods that target an
/// existing document return `Ok(None)` when it does not exist.
#[async_trait]
pub trait VenueStore: Send + Sync {
    /// Find all venues matching the filter
    ///
    /// With a proximity condition, results are ordered nearest first.
    async fn find(&self, filter: &VenueFilter) -> Result<Vec<Venue>>;

    /// Get a venue by id
    async fn get(&self, id: &Uuid) -> Result<Option<Venue>>;

    /// Insert a new venue and return the stored document
    async fn insert(&self, venue: Venue) -> Result<Venue>;

    /// Replace the whole document, returning the new state
    async fn replace(&self, venue: Venue) -> Result<Option<Venue>>;

    /// Remove a venue, returning its state just before removal
    async fn delete(&self, id: &Uuid) -> Result<Option<Venue>>;

    /// Append one element to an embedded sequence, returning the new state
    ///
    /// Must be a single atomic push on the store side: two concurrent
    /// appends to the same venue both end up in the document. A
    /// fetch-modify-save implementation loses updates under concurrent
    /// writers and is not acceptable here.
    async fn append(&self, id: &Uuid, element: Append) -> Result<Option<Venue>>;
}

/// Venue operations over an injected store
#[derive(Clone)]
pub struct VenueService {
    store: Arc<dyn VenueStore>,
}

impl VenueService {
    pub fn new(store: impl VenueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_arc(store: Arc<dyn VenueStore>) -> Self {
        Self { store }
    }

    /// List venues matching the query parameters
    pub async fn list(&self, query: &VenueQuery) -> Result<Vec<Venue>, VenueError> {
        let filter = query.to_filter()?;
        tracing::debug!(filter = ?filter, "listing venues");
        Ok(self.store.find(&filter).await?)
    }

    /// Fetch one venue
    pub async fn get(&self, id: Uuid) -> Result<Venue, VenueError> {
        self.store
            .get(&id)
            .await?
            .ok_or(VenueError::NotFound { id })
    }

    /// Create a venue from a (possibly partial) payload
    pub async fn create(&self, payload: VenuePayload) -> Result<Venue, VenueError> {
        let venue = mutation::new_venue(payload, Utc::now());
        let created = self.store.insert(venue).await?;
        tracing::info!(id = %created.id, "venue created");
        Ok(created)
    }

    /// Replace a venue as a whole
    pub async fn replace(&self, id: Uuid, payload: VenuePayload) -> Result<Venue, VenueError> {
        let venue = mutation::replacement(id, payload, Utc::now());
        self.store
            .replace(venue)
            .await?
            .ok_or(VenueError::NotFound { id })
    }

    /// Delete a venue, returning its last state
    pub async fn delete(&self, id: Uuid) -> Result<Venue, VenueError> {
        let deleted = self
            .store
            .delete(&id)
            .await?
            .ok_or(VenueError::NotFound { id })?;
        tracing::info!(id = %id, "venue deleted");
        Ok(deleted)
    }

    /// Append a comment stamped with the current time
    pub async fn add_comment(
        &self,
        id: Uuid,
        payload: CommentPayload,
    ) -> Result<Venue, VenueError> {
        self.append(id, Append::comment(payload, Utc::now())).await
    }

    /// Append a rating stamped with the current time
    pub async fn add_rate(&self, id: Uuid, payload: RatePayload) -> Result<Venue, VenueError> {
        self.append(id, Append::rate(payload, Utc::now())).await
    }

    async fn append(&self, id: Uuid, element: Append) -> Result<Venue, VenueError> {
        let field = element.field();
        let updated = self
            .store
            .append(&id, element)
            .await?
            .ok_or(VenueError::NotFound { id })?;
        tracing::debug!(id = %id, field, "element appended");
        Ok(updated)
    }
}
