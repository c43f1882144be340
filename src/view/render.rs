//! Render instructions and the render surface seam.
//!
//! The controller never talks to a concrete UI. It emits logical render
//! instructions — "render these points", "draw a radius indicator" — and an
//! injected [`RenderSurface`] turns them into whatever the presentation layer
//! does (map markers, sidebar lists, log lines). Instructions flow one way;
//! user intents come back through the [`ViewActions`](crate::view::ViewActions)
//! trait instead, so neither side references the other's concrete type.

use super::types::ViewError;
use crate::service::{CategorySummary, Point, Stats};
use tracing::{error, info, warn};

/// Severity of a user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
	Info,
	Success,
	Error,
}

/// Logical render instructions emitted by the controller.
///
/// These are presentation-agnostic: nothing here mandates pixels, markup, or
/// a mapping library.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
	/// Replace the displayed point list.
	RenderPoints(Vec<Point>),
	/// Replace the category list, marking the active selection.
	RenderCategories {
		categories: Vec<CategorySummary>,
		active: Option<String>,
	},
	/// Replace the displayed statistics.
	RenderStats(Stats),
	/// Add a marker for a single point.
	AddMarker(Point),
	/// Remove every marker.
	ClearMarkers,
	/// Draw a proximity search indicator.
	DrawRadiusIndicator { lat: f64, lng: f64, radius: f64 },
	/// Remove the proximity search indicator.
	ClearRadiusIndicator,
	/// Bring the point with this id to the user's attention.
	HighlightPoint(i64),
	/// Show a transient user-visible message.
	ShowMessage { text: String, level: MessageLevel },
	/// Report remote service connectivity.
	RenderServiceStatus { connected: bool, detail: String },
}

/// Trait for presentation layers consuming render instructions.
#[async_trait::async_trait]
pub trait RenderSurface: Send {
	/// Apply a single render instruction.
	async fn render(&mut self, instruction: &RenderInstruction) -> Result<(), ViewError>;

	/// Get the name of this surface for logging and diagnostics.
	fn name(&self) -> &'static str;
}

/// Render surface that writes every instruction to the tracing log.
///
/// Serves as the reference implementation and as the surface for the
/// headless binary.
#[derive(Debug, Default)]
pub struct LogRenderSurface;

#[async_trait::async_trait]
impl RenderSurface for LogRenderSurface {
	async fn render(&mut self, instruction: &RenderInstruction) -> Result<(), ViewError> {
		match instruction {
			RenderInstruction::RenderPoints(points) => {
				info!("displaying {} points", points.len());
				for point in points {
					info!(
						"  #{} {} [{}] at {:.4}, {:.4}",
						point.id, point.name, point.category, point.lat, point.lng
					);
				}
			}
			RenderInstruction::RenderCategories { categories, active } => {
				for summary in categories {
					let marker = if active.as_deref() == Some(summary.category.as_str()) {
						" (active)"
					} else {
						""
					};
					info!("category {} ({}){}", summary.category, summary.count, marker);
				}
			}
			RenderInstruction::RenderStats(stats) => {
				info!(
					"{} points across {} categories",
					stats.total_points,
					stats.categories.len()
				);
			}
			RenderInstruction::AddMarker(point) => {
				info!("marker added for point #{} ({})", point.id, point.name);
			}
			RenderInstruction::ClearMarkers => info!("markers cleared"),
			RenderInstruction::DrawRadiusIndicator { lat, lng, radius } => {
				info!("search radius {}m around {:.4}, {:.4}", radius, lat, lng);
			}
			RenderInstruction::ClearRadiusIndicator => info!("search radius cleared"),
			RenderInstruction::HighlightPoint(id) => info!("highlighting point #{}", id),
			RenderInstruction::ShowMessage { text, level } => match level {
				MessageLevel::Error => error!("{}", text),
				MessageLevel::Success | MessageLevel::Info => info!("{}", text),
			},
			RenderInstruction::RenderServiceStatus { connected, detail } => {
				if *connected {
					info!("service connected: {}", detail);
				} else {
					warn!("service disconnected: {}", detail);
				}
			}
		}
		Ok(())
	}

	fn name(&self) -> &'static str {
		"LogRenderSurface"
	}
}
