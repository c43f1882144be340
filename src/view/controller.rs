//! View-state synchronization controller.
//!
//! This module defines the `ViewController`, which coordinates everything
//! between the remote service, the view state store, and the render surface.
//! It reacts to user actions, fetches data through the injected service,
//! mutates the store through its named mutation methods, and ends every
//! transition with a consistent set of render instructions.
//!
//! The controller is responsible for:
//! - The display-mode state machine (`All`, `Filtered`, `Proximity`)
//! - Validating user submissions before any network call is made
//! - Keeping the point list, category list, and markers mutually consistent
//! - Surfacing failures as user-visible messages instead of crashing
//!
//! Actions take `&mut self`, so transitions are serialized by the borrow
//! checker and an older response can never overwrite a newer one.

use super::render::{MessageLevel, RenderInstruction, RenderSurface};
use super::store::{DisplayMode, ViewStateStore};
use super::types::{NewPointForm, ViewError};
use crate::service::{NewPoint, PoiService, effective_radius};
use futures::try_join;
use std::sync::Arc;
use tracing::{error, info, warn};

const MSG_REQUIRED_FIELDS: &str = "Please fill in all required fields";
const MSG_INVALID_COORDINATES: &str = "Invalid coordinates";
const MSG_MISSING_COORDINATES: &str = "Please enter latitude and longitude";
const MSG_INIT_FAILED: &str = "Failed to initialize application. Please check API connection.";
const MSG_FILTER_FAILED: &str = "Failed to filter points";
const MSG_LOAD_FAILED: &str = "Failed to load points";
const MSG_ADD_FAILED: &str = "Failed to add point. Please try again.";
const MSG_ADD_SUCCEEDED: &str = "Point added successfully!";
const MSG_SEARCH_FAILED: &str = "Search failed. Please try again.";

/// User intents accepted by the view layer.
///
/// The render/UI side holds this capability and nothing else, mirroring how
/// the controller only holds a [`RenderSurface`].
#[async_trait::async_trait]
pub trait ViewActions {
	/// Load points, categories, and stats, and render all three.
	async fn load_initial(&mut self) -> Result<(), ViewError>;

	/// Toggle the category filter and refresh the displayed set.
	async fn filter_by_category(&mut self, category: &str) -> Result<(), ViewError>;

	/// Display the points within `radius` meters of a coordinate.
	async fn search_nearby(
		&mut self,
		lat: Option<f64>,
		lng: Option<f64>,
		radius: Option<f64>,
	) -> Result<(), ViewError>;

	/// Validate and submit a new point, then refresh the summaries.
	async fn add_point(&mut self, form: NewPointForm) -> Result<(), ViewError>;

	/// Return to displaying every stored point.
	async fn show_all_points(&mut self) -> Result<(), ViewError>;

	/// Empty the display without touching the authoritative point list.
	async fn clear(&mut self) -> Result<(), ViewError>;

	/// Bring one point to the user's attention.
	async fn highlight_point(&mut self, id: i64) -> Result<(), ViewError>;
}

/// Controller that keeps the store and the render surface in sync.
///
/// The service and the surface are injected once at construction; the
/// controller owns the store outright and is its only mutator.
pub struct ViewController {
	service: Arc<dyn PoiService>,
	store: ViewStateStore,
	surface: Box<dyn RenderSurface>,
}

impl ViewController {
	pub fn new(service: Arc<dyn PoiService>, surface: Box<dyn RenderSurface>) -> Self {
		Self {
			service,
			store: ViewStateStore::new(),
			surface,
		}
	}

	/// Read access to the current view state.
	pub fn store(&self) -> &ViewStateStore {
		&self.store
	}

	/// Query service health and render the connectivity status.
	///
	/// A failed health check is returned to the caller so startup can bail
	/// out early; the disconnected status is rendered first.
	pub async fn check_health(&mut self) -> Result<(), ViewError> {
		match self.service.health().await {
			Ok(health) => {
				let detail = match &health.database {
					Some(db) => db.timestamp.to_rfc3339(),
					None => health.status.clone(),
				};
				info!("service reported healthy: {}", detail);
				self.render(RenderInstruction::RenderServiceStatus {
					connected: true,
					detail,
				})
				.await
			}
			Err(err) => {
				error!("health check failed: {}", err);
				self.render(RenderInstruction::RenderServiceStatus {
					connected: false,
					detail: err.to_string(),
				})
				.await?;
				Err(ViewError::Service(err))
			}
		}
	}

	async fn render(&mut self, instruction: RenderInstruction) -> Result<(), ViewError> {
		self.surface.render(&instruction).await
	}

	async fn show_message(&mut self, text: &str, level: MessageLevel) -> Result<(), ViewError> {
		self.render(RenderInstruction::ShowMessage {
			text: text.to_string(),
			level,
		})
		.await
	}

	/// Re-render the category list with the current active selection.
	async fn render_category_list(&mut self) -> Result<(), ViewError> {
		let instruction = RenderInstruction::RenderCategories {
			categories: self.store.categories().to_vec(),
			active: self.store.active_category().map(str::to_string),
		};
		self.render(instruction).await
	}

	/// Refresh the derived categories and stats after a successful add.
	///
	/// Both requests are issued together and joined; a failure here is logged
	/// only, because the point itself has already been appended and its
	/// success stands.
	async fn refresh_summaries(&mut self) -> Result<(), ViewError> {
		match try_join!(self.service.categories(), self.service.stats()) {
			Ok((categories, stats)) => {
				self.store.replace_summaries(categories, stats.clone());
				self.render_category_list().await?;
				self.render(RenderInstruction::RenderStats(stats)).await
			}
			Err(err) => {
				warn!("summary refresh after add failed: {}", err);
				Ok(())
			}
		}
	}
}

/// Validate a form submission into a service-ready point.
///
/// Presence of name and both coordinates is checked first, then coordinate
/// bounds. The error is the exact message to surface; no state is touched
/// and no network call happens for a rejected submission.
fn validate_submission(form: &NewPointForm) -> Result<NewPoint, &'static str> {
	let name = form.name.trim();
	if name.is_empty() {
		return Err(MSG_REQUIRED_FIELDS);
	}
	let (Some(lat), Some(lng)) = (form.lat, form.lng) else {
		return Err(MSG_REQUIRED_FIELDS);
	};
	if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
		return Err(MSG_INVALID_COORDINATES);
	}

	Ok(NewPoint {
		name: name.to_string(),
		category: form.category.clone(),
		description: form.description.clone(),
		lat,
		lng,
	})
}

#[async_trait::async_trait]
impl ViewActions for ViewController {
	async fn load_initial(&mut self) -> Result<(), ViewError> {
		let loaded = try_join!(
			self.service.all_points(),
			self.service.categories(),
			self.service.stats()
		);
		match loaded {
			Ok((points, categories, stats)) => {
				info!("initial load: {} points, {} categories", points.len(), categories.len());
				self.store.replace_all(points.clone(), categories, stats.clone());
				self.render(RenderInstruction::RenderPoints(points)).await?;
				self.render_category_list().await?;
				self.render(RenderInstruction::RenderStats(stats)).await
			}
			Err(err) => {
				error!("initial load failed: {}", err);
				self.show_message(MSG_INIT_FAILED, MessageLevel::Error).await
			}
		}
	}

	async fn filter_by_category(&mut self, category: &str) -> Result<(), ViewError> {
		// Selecting the active category toggles the filter off again.
		let toggling_off = self.store.active_category() == Some(category);
		let fetched = if toggling_off {
			self.service.all_points().await
		} else {
			self.service.points_by_category(category).await
		};

		let points = match fetched {
			Ok(points) => points,
			Err(err) => {
				warn!("category filter failed: {}", err);
				return self.show_message(MSG_FILTER_FAILED, MessageLevel::Error).await;
			}
		};

		self.store.set_filter(Some(category.to_string()));
		let mode = self.store.mode().clone();
		self.store.set_displayed(points.clone(), mode);

		self.render(RenderInstruction::RenderPoints(points)).await?;
		self.render_category_list().await
	}

	async fn search_nearby(
		&mut self,
		lat: Option<f64>,
		lng: Option<f64>,
		radius: Option<f64>,
	) -> Result<(), ViewError> {
		// Zero is treated like a missing coordinate, so a search exactly on
		// the equator or prime meridian is refused.
		let (Some(lat), Some(lng)) = (lat, lng) else {
			return self
				.show_message(MSG_MISSING_COORDINATES, MessageLevel::Error)
				.await;
		};
		if lat == 0.0 || lng == 0.0 {
			return self
				.show_message(MSG_MISSING_COORDINATES, MessageLevel::Error)
				.await;
		}

		let radius = effective_radius(radius);
		match self.service.find_nearby(lat, lng, Some(radius)).await {
			Ok(points) => {
				self.store
					.set_displayed(points.clone(), DisplayMode::Proximity { lat, lng, radius });
				self.render(RenderInstruction::DrawRadiusIndicator { lat, lng, radius })
					.await?;
				self.render(RenderInstruction::RenderPoints(points.clone()))
					.await?;
				let summary = format!("Found {} points within {}m", points.len(), radius);
				self.show_message(&summary, MessageLevel::Success).await
			}
			Err(err) => {
				warn!("proximity search failed: {}", err);
				self.show_message(MSG_SEARCH_FAILED, MessageLevel::Error).await
			}
		}
	}

	async fn add_point(&mut self, form: NewPointForm) -> Result<(), ViewError> {
		let submission = match validate_submission(&form) {
			Ok(submission) => submission,
			Err(message) => return self.show_message(message, MessageLevel::Error).await,
		};

		let created = match self.service.add_point(&submission).await {
			Ok(point) => point,
			Err(err) => {
				warn!("add point failed: {}", err);
				return self.show_message(MSG_ADD_FAILED, MessageLevel::Error).await;
			}
		};

		info!("added point #{} ({})", created.id, created.name);
		self.store.append_point(created.clone());
		self.render(RenderInstruction::AddMarker(created)).await?;
		self.render(RenderInstruction::RenderPoints(self.store.displayed().to_vec()))
			.await?;
		self.show_message(MSG_ADD_SUCCEEDED, MessageLevel::Success)
			.await?;

		self.refresh_summaries().await
	}

	async fn show_all_points(&mut self) -> Result<(), ViewError> {
		match self.service.all_points().await {
			Ok(points) => {
				self.store.set_filter(None);
				self.store.set_displayed(points.clone(), DisplayMode::All);
				self.render(RenderInstruction::RenderPoints(points)).await?;
				self.render_category_list().await
			}
			Err(err) => {
				warn!("show all points failed: {}", err);
				self.show_message(MSG_LOAD_FAILED, MessageLevel::Error).await
			}
		}
	}

	async fn clear(&mut self) -> Result<(), ViewError> {
		self.store.set_filter(None);
		self.store.set_displayed(Vec::new(), DisplayMode::All);
		self.render(RenderInstruction::ClearMarkers).await?;
		self.render(RenderInstruction::ClearRadiusIndicator).await?;
		self.render(RenderInstruction::RenderPoints(Vec::new())).await?;
		self.render_category_list().await
	}

	async fn highlight_point(&mut self, id: i64) -> Result<(), ViewError> {
		self.render(RenderInstruction::HighlightPoint(id)).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn form(name: &str, lat: Option<f64>, lng: Option<f64>) -> NewPointForm {
		NewPointForm {
			name: name.to_string(),
			category: "Historic".to_string(),
			description: None,
			lat,
			lng,
		}
	}

	#[test]
	fn submission_without_name_is_rejected() {
		let err = validate_submission(&form("  ", Some(41.0), Some(29.0))).unwrap_err();
		assert_eq!(err, MSG_REQUIRED_FIELDS);
	}

	#[test]
	fn submission_without_coordinates_is_rejected() {
		let err = validate_submission(&form("Hagia Sophia", None, Some(29.0))).unwrap_err();
		assert_eq!(err, MSG_REQUIRED_FIELDS);
		let err = validate_submission(&form("Hagia Sophia", Some(41.0), None)).unwrap_err();
		assert_eq!(err, MSG_REQUIRED_FIELDS);
	}

	#[test]
	fn submission_outside_coordinate_bounds_is_rejected() {
		let err = validate_submission(&form("North of north", Some(90.5), Some(29.0))).unwrap_err();
		assert_eq!(err, MSG_INVALID_COORDINATES);
		let err = validate_submission(&form("Off the map", Some(41.0), Some(-180.5))).unwrap_err();
		assert_eq!(err, MSG_INVALID_COORDINATES);
	}

	#[test]
	fn valid_submission_is_trimmed_and_accepted() {
		let submission =
			validate_submission(&form(" Hagia Sophia ", Some(41.0086), Some(28.9802)))
				.expect("valid form should pass");
		assert_eq!(submission.name, "Hagia Sophia");
		assert_eq!(submission.lat, 41.0086);
	}
}
