//! Types for the point-of-interest service API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Search radius used when the caller gives none (meters).
pub const DEFAULT_SEARCH_RADIUS_M: f64 = 1000.0;

/// Resolve the effective search radius for a proximity query.
///
/// Missing and non-positive radii fall back to [`DEFAULT_SEARCH_RADIUS_M`].
pub fn effective_radius(radius: Option<f64>) -> f64 {
	match radius {
		Some(r) if r > 0.0 => r,
		_ => DEFAULT_SEARCH_RADIUS_M,
	}
}

/// A named, categorized geolocation record as returned by the service.
///
/// `distance_meters` is only present on proximity search results, where it
/// carries the distance from the query coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
	/// Stable identifier assigned by the service.
	pub id: i64,
	pub name: String,
	/// Open set of category names; the service does not enumerate them.
	pub category: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	pub lat: f64,
	pub lng: f64,
	/// Distance from the query coordinate, proximity results only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub distance_meters: Option<f64>,
}

/// A point submission accepted by the add-point operation.
///
/// Callers validate name presence and coordinate bounds before the request
/// is issued; the service assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPoint {
	pub name: String,
	pub category: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	pub lat: f64,
	pub lng: f64,
}

/// Per-category point count, recomputed by the service on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
	pub category: String,
	pub count: u64,
}

/// Bounding box over all stored points.
///
/// All fields are optional: the service reports nulls while the point table
/// is empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
	pub min_lat: Option<f64>,
	pub max_lat: Option<f64>,
	pub min_lng: Option<f64>,
	pub max_lng: Option<f64>,
}

/// Aggregate statistics over all stored points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
	pub total_points: u64,
	/// Names of all categories with at least one point.
	pub categories: Vec<String>,
	pub bounds: Bounds,
}

/// Database block of a health response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseHealth {
	pub timestamp: DateTime<Utc>,
}

/// Response of the service health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
	pub status: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub database: Option<DatabaseHealth>,
}

/// Error types for service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
	#[error("HTTP error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("JSON parse error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("service error: {0}")]
	Service(String),
}
