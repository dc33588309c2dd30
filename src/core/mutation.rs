//! Document preparation for venue writes
//!
//! Creates and replaces always write a whole document built from a
//! [`VenuePayload`]; nothing from a previous version is merged in. Appends
//! add exactly one element to `comments` or `rates`, stamped with the time of
//! the request regardless of any date the client sent.

use crate::core::venue::{Comment, CommentPayload, Rate, RatePayload, Venue, VenuePayload};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Build a new venue document with a freshly assigned id
pub fn new_venue(payload: VenuePayload, now: DateTime<Utc>) -> Venue {
    replacement(Uuid::new_v4(), payload, now)
}

/// Build the full replacement document for `id`
///
/// Fields absent from the payload end up absent (or empty, for sequences)
/// in the stored document. Embedded comments and rates without a date get
/// `now`.
pub fn replacement(id: Uuid, payload: VenuePayload, now: DateTime<Utc>) -> Venue {
    Venue {
        id,
        name: payload.name,
        contact: payload.contact,
        stars: payload.stars,
        categories: payload.categories,
        comments: payload
            .comments
            .into_iter()
            .map(|c| Comment {
                user: c.user,
                text: c.text,
                date: c.date.unwrap_or(now),
            })
            .collect(),
        rates: payload
            .rates
            .into_iter()
            .map(|r| Rate {
                date: r.date.unwrap_or(now),
                stars: r.stars,
            })
            .collect(),
    }
}

/// A single element appended to one of a venue's embedded sequences
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Append {
    Comment(Comment),
    Rate(Rate),
}

impl Append {
    /// A comment stamped with `now`, ignoring any client-supplied date
    pub fn comment(payload: CommentPayload, now: DateTime<Utc>) -> Self {
        Append::Comment(Comment {
            user: payload.user,
            text: payload.text,
            date: now,
        })
    }

    /// A rate stamped with `now`, ignoring any client-supplied date
    pub fn rate(payload: RatePayload, now: DateTime<Utc>) -> Self {
        Append::Rate(Rate {
            date: now,
            stars: Some(payload.stars),
        })
    }

    /// Name of the embedded sequence this element goes into
    pub fn field(&self) -> &'static str {
        match self {
            Append::Comment(_) => "comments",
            Append::Rate(_) => "rates",
        }
    }

    /// Push the element onto the end of its sequence
    pub fn apply(self, venue: &mut Venue) {
        match self {
            Append::Comment(comment) => venue.comments.push(comment),
            Append::Rate(rate) => venue.rates.push(rate),
        }
    }
}
