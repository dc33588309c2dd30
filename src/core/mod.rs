//! Core module containing the venue model, filter construction and write rules

pub mod error;
pub mod filter;
pub mod mutation;
pub mod service;
pub mod venue;

pub use error::VenueError;
pub use filter::{Condition, VenueField, VenueFilter, VenueQuery};
pub use mutation::Append;
pub use service::{VenueService, VenueStore};
pub use venue::{
    Comment, CommentEntry, CommentPayload, Contact, GeoPoint, Rate, RateEntry, RatePayload, Venue,
    VenuePayload,
};
