//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoVenueStore`, a [`VenueStore`] backed by a single MongoDB
//! collection of venue documents.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! restaurants = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Serialization strategy
//!
//! Venues are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. UUIDs and timestamps are stored as
//! strings. The `id` field is mapped to MongoDB's `_id` convention, and
//! `contact.location` is stored as a `[longitude, latitude]` pair so the
//! `2dsphere` index can serve proximity queries.
//!
//! # Writes
//!
//! Replace, delete and append each run as one `findOneAnd*` command, so the
//! document returned is exactly the one the write produced (or removed).
//! Appends use `$push`, which the server applies atomically: concurrent
//! appends to the same venue never overwrite each other.

use crate::core::filter::{Condition, VenueFilter};
use crate::core::mutation::Append;
use crate::core::service::VenueStore;
use crate::core::venue::Venue;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database, IndexModel};
use serde::Serialize;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` for the domain convention.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert any serializable value to BSON through its JSON form.
fn to_bson_via_json<T: Serialize>(value: &T) -> Result<Bson> {
    let json =
        serde_json::to_value(value).map_err(|e| anyhow!("Failed to serialize value: {}", e))?;
    mongodb::bson::to_bson(&json).map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

fn venue_to_document(venue: &Venue) -> Result<Document> {
    let json =
        serde_json::to_value(venue).map_err(|e| anyhow!("Failed to serialize venue: {}", e))?;
    json_to_document(json)
}

fn document_to_venue(doc: Document) -> Result<Venue> {
    let json = document_to_json(doc);
    serde_json::from_value(json)
        .map_err(|e| anyhow!("Failed to deserialize venue from document: {}", e))
}

/// Translate a venue filter into a MongoDB query document.
///
/// Each condition targets a distinct field, so the conjunction is a flat
/// document with one key per condition. An empty filter yields `{}`.
pub fn filter_to_document(filter: &VenueFilter) -> Document {
    let mut query = Document::new();

    for condition in filter.conditions() {
        let path = condition.field().path();
        let predicate = match condition {
            Condition::Contains { .. } => doc! {
                "$regex": condition.pattern().unwrap_or_default(),
                "$options": "i",
            },
            Condition::AtLeast { threshold, .. } => doc! { "$gte": *threshold },
            Condition::Near {
                point,
                max_distance,
                ..
            } => doc! {
                "$near": {
                    "$geometry": {
                        "type": "Point",
                        "coordinates": [point.longitude, point.latitude],
                    },
                    "$maxDistance": *max_distance,
                }
            },
        };
        query.insert(path, predicate);
    }

    query
}

/// Index set supporting the venue query patterns.
///
/// Array fields get their own indexes: MongoDB cannot build a compound
/// index over more than one array field of the same document.
pub fn venue_indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "name": 1, "contact.phone": 1, "contact.email": 1 })
            .build(),
        IndexModel::builder()
            .keys(doc! { "contact.location": "2dsphere" })
            .build(),
        IndexModel::builder().keys(doc! { "stars": -1 }).build(),
        IndexModel::builder().keys(doc! { "categories": 1 }).build(),
        IndexModel::builder().keys(doc! { "comments.date": -1 }).build(),
        IndexModel::builder().keys(doc! { "rates.date": -1 }).build(),
        IndexModel::builder().keys(doc! { "rates.stars": -1 }).build(),
    ]
}

// ---------------------------------------------------------------------------
// MongoVenueStore
// ---------------------------------------------------------------------------

/// Venue store backed by a MongoDB collection.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use restaurants::storage::MongoVenueStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let store = MongoVenueStore::new(client.database("tutorial"), "restaurants");
/// store.ensure_indexes().await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoVenueStore {
    database: Database,
    collection_name: String,
}

impl MongoVenueStore {
    /// Create a new `MongoVenueStore` over the given database and collection.
    pub fn new(database: Database, collection_name: impl Into<String>) -> Self {
        Self {
            database,
            collection_name: collection_name.into(),
        }
    }

    /// Connect to `uri`, select the collection and ensure its indexes.
    pub async fn connect(uri: &str, database: &str, collection_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| anyhow!("Failed to connect to MongoDB at {}: {}", uri, e))?;
        let store = Self::new(client.database(database), collection_name);
        store.ensure_indexes().await?;

        tracing::info!(database, collection = collection_name, "connected to MongoDB");
        Ok(store)
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(&self.collection_name)
    }

    /// Create the indexes from [`venue_indexes`].
    ///
    /// Idempotent, called on every startup.
    pub async fn ensure_indexes(&self) -> Result<()> {
        self.collection()
            .create_indexes(venue_indexes())
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to create indexes on {} collection: {}",
                    self.collection_name,
                    e
                )
            })?;

        Ok(())
    }
}

#[async_trait]
impl VenueStore for MongoVenueStore {
    /// Run the filter as a single `find`.
    ///
    /// `$near` makes the server return results nearest first.
    async fn find(&self, filter: &VenueFilter) -> Result<Vec<Venue>> {
        let cursor = self
            .collection()
            .find(filter_to_document(filter))
            .await
            .map_err(|e| anyhow!("Failed to find venues: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect venues: {}", e))?;

        docs.into_iter().map(document_to_venue).collect()
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Venue>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get venue: {}", e))?;

        doc.map(document_to_venue).transpose()
    }

    /// Insert the venue and read it back to return the stored version.
    async fn insert(&self, venue: Venue) -> Result<Venue> {
        let doc = venue_to_document(&venue)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create venue: {}", e))?;

        let stored = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(&venue.id) })
            .await
            .map_err(|e| anyhow!("Failed to read back created venue: {}", e))?
            .ok_or_else(|| anyhow!("Venue not found after insert"))?;

        document_to_venue(stored)
    }

    async fn replace(&self, venue: Venue) -> Result<Option<Venue>> {
        let doc = venue_to_document(&venue)?;

        let replaced = self
            .collection()
            .find_one_and_replace(doc! { "_id": uuid_bson(&venue.id) }, doc)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to replace venue: {}", e))?;

        replaced.map(document_to_venue).transpose()
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<Venue>> {
        let deleted = self
            .collection()
            .find_one_and_delete(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to delete venue: {}", e))?;

        deleted.map(document_to_venue).transpose()
    }

    async fn append(&self, id: &Uuid, element: Append) -> Result<Option<Venue>> {
        let field = element.field();
        let value = to_bson_via_json(&element)?;

        let updated = self
            .collection()
            .find_one_and_update(doc! { "_id": uuid_bson(id) }, doc! { "$push": { field: value } })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to append to {}: {}", field, e))?;

        updated.map(document_to_venue).transpose()
    }
}
