//! View-state synchronization for the point viewer.
//!
//! The view layer keeps the displayed point set, the category filter, and the
//! map markers mutually consistent as data loads, filters change, and points
//! are added. It is split into the authoritative store, the controller that
//! drives it, and the render-surface seam the presentation layer plugs into.

pub mod controller;
pub mod render;
pub mod store;
pub mod types;

pub use controller::{ViewActions, ViewController};
pub use render::{LogRenderSurface, MessageLevel, RenderInstruction, RenderSurface};
pub use store::{DisplayMode, ViewStateStore};
pub use types::{NewPointForm, ViewError};
