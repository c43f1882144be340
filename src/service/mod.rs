//! Remote point-of-interest service integration.
//!
//! This module provides the client and types for talking to the remote POI
//! service. The service stores geolocated points, exposes per-category
//! summaries and aggregate statistics, and answers proximity queries.

/// HTTP client and the `PoiService` trait
mod client;
/// Type definitions for service data structures
mod types;

pub use client::{PoiService, PoiServiceClient};
pub use types::*;
