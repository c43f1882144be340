//! Headless view-state synchronization core for a point-of-interest map
//! client.
//!
//! Talks to a remote geospatial HTTP service, owns the authoritative view
//! state (points, categories, stats, filter), and emits logical render
//! instructions to an injected render surface.

pub mod config;
pub mod service;
pub mod view;
