//! Filter construction for venue searches
//!
//! [`VenueQuery`] carries the raw, optional search parameters of a list
//! request. [`VenueQuery::to_filter`] turns them into an immutable
//! [`VenueFilter`]: the conjunction of one [`Condition`] per present
//! parameter. No parameters means a filter that matches everything.
//!
//! | parameter               | field              | condition                              |
//! |-------------------------|--------------------|----------------------------------------|
//! | `name`                  | `name`             | case-insensitive substring             |
//! | `phone`                 | `contact.phone`    | case-insensitive substring             |
//! | `email`                 | `contact.email`    | case-insensitive substring             |
//! | `minStars`              | `stars`            | `>=` integer threshold                 |
//! | `category`              | `categories`       | case-insensitive substring, any element |
//! | `longitude`+`latitude`  | `contact.location` | within 10 km, nearest first            |
//!
//! Substring needles are matched literally: regex metacharacters supplied by
//! the client are escaped before any pattern is built.
//!
//! A filter is either built whole or not at all. An unparseable `minStars`
//! fails with a validation error. A coordinate pair only applies when both
//! halves are present and parse as finite numbers; otherwise it is ignored.

use crate::core::error::VenueError;
use crate::core::venue::{GeoPoint, Venue};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

/// Radius of the proximity search, in meters
pub const PROXIMITY_RADIUS_METERS: f64 = 10_000.0;

/// Mean earth radius used for spherical distances, in meters
pub const EARTH_RADIUS_METERS: f64 = 6_378_100.0;

/// Raw query parameters of a list request
///
/// Every parameter is optional. An empty value is treated as absent.
///
/// # Example
/// ```text
/// GET /restaurants?name=sol&minStars=3
/// GET /restaurants?category=cafe&longitude=2.17&latitude=41.38
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VenueQuery {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "minStars")]
    pub min_stars: Option<String>,
    pub category: Option<String>,
    pub longitude: Option<String>,
    pub latitude: Option<String>,
}

/// A filterable field of the venue document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueField {
    Name,
    Phone,
    Email,
    Stars,
    Categories,
    Location,
}

impl VenueField {
    /// Dotted document path of the field
    pub fn path(self) -> &'static str {
        match self {
            VenueField::Name => "name",
            VenueField::Phone => "contact.phone",
            VenueField::Email => "contact.email",
            VenueField::Stars => "stars",
            VenueField::Categories => "categories",
            VenueField::Location => "contact.location",
        }
    }
}

/// A single condition of a venue filter
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Case-insensitive literal substring match
    Contains { field: VenueField, needle: String },

    /// Numeric value greater than or equal to the threshold
    AtLeast { field: VenueField, threshold: i64 },

    /// Location within `max_distance` meters of `point`
    Near {
        field: VenueField,
        point: GeoPoint,
        max_distance: f64,
    },
}

impl Condition {
    pub fn field(&self) -> VenueField {
        match self {
            Condition::Contains { field, .. }
            | Condition::AtLeast { field, .. }
            | Condition::Near { field, .. } => *field,
        }
    }

    /// Regex source matching the needle literally, for `Contains` conditions
    pub fn pattern(&self) -> Option<String> {
        match self {
            Condition::Contains { needle, .. } => Some(regex::escape(needle)),
            _ => None,
        }
    }
}

/// An immutable conjunction of conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueFilter {
    conditions: Vec<Condition>,
}

impl VenueFilter {
    /// The filter that matches every venue
    pub fn all() -> Self {
        Self::default()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// The proximity center and radius, if the filter has one
    pub fn proximity(&self) -> Option<(GeoPoint, f64)> {
        self.conditions.iter().find_map(|c| match c {
            Condition::Near {
                point,
                max_distance,
                ..
            } => Some((*point, *max_distance)),
            _ => None,
        })
    }

    /// Compile the filter for in-process evaluation
    pub fn matcher(&self) -> Result<VenueMatcher, regex::Error> {
        let compiled = self
            .conditions
            .iter()
            .map(|condition| {
                let regex = match condition.pattern() {
                    Some(pattern) => Some(RegexBuilder::new(&pattern).case_insensitive(true).build()?),
                    None => None,
                };
                Ok((condition.clone(), regex))
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(VenueMatcher { compiled })
    }
}

impl VenueQuery {
    /// Build the filter for this query
    ///
    /// Conditions are always emitted in the same field order, so equal
    /// queries produce equal filters.
    pub fn to_filter(&self) -> Result<VenueFilter, VenueError> {
        let mut conditions = Vec::new();

        let substrings = [
            (VenueField::Name, &self.name),
            (VenueField::Phone, &self.phone),
            (VenueField::Email, &self.email),
        ];
        for (field, value) in substrings {
            if let Some(needle) = present(value) {
                conditions.push(Condition::Contains {
                    field,
                    needle: needle.to_string(),
                });
            }
        }

        if let Some(raw) = present(&self.min_stars) {
            let threshold = raw
                .trim()
                .parse::<i64>()
                .map_err(|e| VenueError::invalid_parameter("minStars", e.to_string()))?;
            conditions.push(Condition::AtLeast {
                field: VenueField::Stars,
                threshold,
            });
        }

        if let Some(needle) = present(&self.category) {
            conditions.push(Condition::Contains {
                field: VenueField::Categories,
                needle: needle.to_string(),
            });
        }

        if let Some(point) = self.coordinates()? {
            conditions.push(Condition::Near {
                field: VenueField::Location,
                point,
                max_distance: PROXIMITY_RADIUS_METERS,
            });
        }

        Ok(VenueFilter { conditions })
    }

    /// The search center, when both coordinates are present and numeric
    fn coordinates(&self) -> Result<Option<GeoPoint>, VenueError> {
        let (Some(longitude), Some(latitude)) =
            (parse_coordinate(&self.longitude), parse_coordinate(&self.latitude))
        else {
            return Ok(None);
        };

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(VenueError::invalid_parameter(
                "longitude",
                format!("{} is outside [-180, 180]", longitude),
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(VenueError::invalid_parameter(
                "latitude",
                format!("{} is outside [-90, 90]", latitude),
            ));
        }

        Ok(Some(GeoPoint::new(longitude, latitude)))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_coordinate(value: &Option<String>) -> Option<f64> {
    present(value)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// A compiled [`VenueFilter`] evaluated against venues in process
#[derive(Debug, Clone)]
pub struct VenueMatcher {
    compiled: Vec<(Condition, Option<Regex>)>,
}

impl VenueMatcher {
    /// Whether the venue satisfies every condition
    pub fn matches(&self, venue: &Venue) -> bool {
        self.compiled
            .iter()
            .all(|(condition, regex)| condition_matches(condition, regex.as_ref(), venue))
    }

    /// Distance from the proximity center, when the filter has one
    pub fn distance(&self, venue: &Venue) -> Option<f64> {
        self.compiled.iter().find_map(|(condition, _)| match condition {
            Condition::Near { point, .. } => venue
                .contact
                .location
                .map(|location| haversine_distance(point, &location)),
            _ => None,
        })
    }
}

fn condition_matches(condition: &Condition, regex: Option<&Regex>, venue: &Venue) -> bool {
    match condition {
        Condition::Contains { field, .. } => {
            let Some(regex) = regex else {
                return false;
            };
            match field {
                VenueField::Name => venue.name.as_deref().is_some_and(|v| regex.is_match(v)),
                VenueField::Phone => venue
                    .contact
                    .phone
                    .as_deref()
                    .is_some_and(|v| regex.is_match(v)),
                VenueField::Email => venue
                    .contact
                    .email
                    .as_deref()
                    .is_some_and(|v| regex.is_match(v)),
                VenueField::Categories => venue.categories.iter().any(|c| regex.is_match(c)),
                VenueField::Stars | VenueField::Location => false,
            }
        }
        Condition::AtLeast { field, threshold } => match field {
            VenueField::Stars => venue.stars.is_some_and(|s| s >= *threshold as f64),
            _ => false,
        },
        Condition::Near {
            point,
            max_distance,
            ..
        } => venue
            .contact
            .location
            .is_some_and(|location| haversine_distance(point, &location) <= *max_distance),
    }
}

/// Great-circle distance between two points, in meters
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}
