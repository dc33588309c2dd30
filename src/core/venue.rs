//! Venue data model and request payloads
//!
//! A [`Venue`] is the only persisted record. Its embedded `comments` and
//! `rates` sequences only ever grow through the dedicated append operations,
//! and all three sequences (`categories`, `comments`, `rates`) are always
//! present, defaulting to empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stored venue document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Store-assigned identifier, immutable once created
    pub id: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub contact: Contact,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<f64>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<Comment>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub rates: Vec<Rate>,
}

/// Contact details of a venue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub location: Option<GeoPoint>,
}

/// A geographic point
///
/// Serialized as a `[longitude, latitude]` coordinate pair, the layout the
/// geospatial index expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.longitude, point.latitude]
    }
}

/// A comment left on a venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub text: String,
    pub date: DateTime<Utc>,
}

/// A single rating event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rate {
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<f64>,
}

/// Body of a create or replace request
///
/// Every field is optional. An `id` in the body is ignored: ids are assigned
/// by the service on create and taken from the path on replace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct VenuePayload {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(nested)]
    pub contact: Contact,

    #[serde(default)]
    pub stars: Option<f64>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<CommentEntry>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub rates: Vec<RateEntry>,
}

/// A comment embedded in a create or replace body
///
/// Nothing is required here; a missing `date` becomes the server time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentEntry {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// A rating embedded in a create or replace body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    #[serde(default)]
    pub stars: Option<f64>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// A comment posted to the append endpoint
///
/// `user` and `text` are required. Any `date` is overwritten with the
/// server time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CommentPayload {
    pub user: String,
    pub text: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// A rating posted to the append endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RatePayload {
    pub stars: f64,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
