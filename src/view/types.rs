use crate::service::ServiceError;

/// Error types for view-state synchronization.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
	#[error("service error: {0}")]
	Service(#[from] ServiceError),

	#[error("render error: {0}")]
	Render(String),
}

/// Raw user submission from the add-point form.
///
/// Coordinates are optional so empty form fields survive until validation;
/// the controller rejects incomplete submissions before any network call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewPointForm {
	pub name: String,
	pub category: String,
	pub description: Option<String>,
	pub lat: Option<f64>,
	pub lng: Option<f64>,
}
