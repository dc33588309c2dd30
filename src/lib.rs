//! # Restaurants
//!
//! A REST service for venue records: name, contact details with a geographic
//! location, a star rating, category tags, comments and a rating history.
//!
//! ## Features
//!
//! - **Sparse search**: any subset of `name`, `phone`, `email`, `minStars`,
//!   `category` and a `longitude`/`latitude` pair, combined with AND
//! - **Literal substring matching**: client input is never interpreted as a pattern
//! - **Proximity search**: venues within 10 km of a point, nearest first
//! - **Append-only history**: comments and ratings are stamped with the server
//!   time and pushed atomically
//! - **Pluggable storage**: in-memory store, or MongoDB behind the
//!   `mongodb_backend` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restaurants::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_store(InMemoryVenueStore::new())
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Append, Comment, CommentEntry, CommentPayload, Condition, Contact, GeoPoint, Rate,
        RateEntry, RatePayload, Venue, VenueError, VenueField, VenueFilter, VenuePayload,
        VenueQuery, VenueService, VenueStore,
    };

    // === Storage ===
    pub use crate::storage::InMemoryVenueStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoVenueStore;

    // === Config ===
    pub use crate::config::{ServiceConfig, StoreBackend};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
