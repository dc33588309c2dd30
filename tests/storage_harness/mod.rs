//! Shared test harness for venue store testing
//!
//! Provides payload builders, a router factory and the `venue_store_tests!`
//! and `rest_integration_tests!` macros, so every store backend runs the
//! same contract and HTTP suites.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//!
//! venue_store_tests!(InMemoryVenueStore::new());
//! rest_integration_tests!(InMemoryVenueStore::new());
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod rest_tests;

use axum::Router;
use restaurants::core::service::VenueStore;
use restaurants::core::venue::{
    CommentPayload, Contact, GeoPoint, RatePayload, Venue, VenuePayload,
};
use restaurants::server::ServerBuilder;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

/// A payload with a name, rating and categories, without contact details.
pub fn venue_payload(name: &str, stars: f64, categories: &[&str]) -> VenuePayload {
    VenuePayload {
        name: Some(name.to_string()),
        stars: Some(stars),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        ..Default::default()
    }
}

/// A payload located at the given point.
pub fn located_payload(name: &str, longitude: f64, latitude: f64) -> VenuePayload {
    VenuePayload {
        name: Some(name.to_string()),
        contact: Contact {
            location: Some(GeoPoint::new(longitude, latitude)),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A payload with phone and email contact details.
pub fn contact_payload(name: &str, phone: &str, email: &str) -> VenuePayload {
    VenuePayload {
        name: Some(name.to_string()),
        contact: Contact {
            phone: Some(phone.to_string()),
            email: Some(email.to_string()),
            location: None,
        },
        ..Default::default()
    }
}

pub fn comment(user: &str, text: &str) -> CommentPayload {
    CommentPayload {
        user: user.to_string(),
        text: text.to_string(),
        date: None,
    }
}

pub fn rate(stars: f64) -> RatePayload {
    RatePayload { stars, date: None }
}

// ---------------------------------------------------------------------------
// Router factory
// ---------------------------------------------------------------------------

/// Build the full application router over the given store.
pub fn build_test_router(store: impl VenueStore + 'static) -> Router {
    ServerBuilder::new()
        .with_store(store)
        .build()
        .expect("router should build with a store")
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Ids of a list of venues, sorted for order-insensitive comparison.
pub fn sorted_ids(venues: &[Venue]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = venues.iter().map(|v| v.id).collect();
    ids.sort();
    ids
}

/// Names of a list of venues, in result order.
pub fn names(venues: &[Venue]) -> Vec<String> {
    venues.iter().filter_map(|v| v.name.clone()).collect()
}

/// Assert that a list contains exactly `n` items.
pub fn assert_count<T>(list: &[T], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        list.len()
    );
}
