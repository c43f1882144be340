//! Authoritative view state for the point viewer.
//!
//! The store owns the four authoritative values: the full point list, the
//! derived category summaries and statistics, the filter state (folded into
//! the display mode), and the displayed point set. Every mutation goes
//! through one of the named methods below; the controller is the only
//! caller, and the render surface only ever reads snapshots.

use crate::service::{CategorySummary, Point, Stats};

/// Which subset-selection rule currently governs the displayed point set.
///
/// The three modes are mutually exclusive; the most recent action decides
/// which one is active.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayMode {
	/// Every stored point is displayed.
	All,
	/// Only points of one category are displayed.
	Filtered(String),
	/// Only the results of the last proximity search are displayed.
	Proximity { lat: f64, lng: f64, radius: f64 },
}

/// Holder of the authoritative view state.
#[derive(Debug, Default)]
pub struct ViewStateStore {
	/// Full point list as last loaded from the service.
	points: Vec<Point>,
	/// Derived per-category counts, recomputed by the service on refresh.
	categories: Vec<CategorySummary>,
	/// Derived aggregate statistics, recomputed by the service on refresh.
	stats: Option<Stats>,
	/// The subset of points currently shown.
	displayed: Vec<Point>,
	/// Mode governing `displayed`, including the active filter.
	mode: DisplayMode,
}

impl Default for DisplayMode {
	fn default() -> Self {
		DisplayMode::All
	}
}

impl ViewStateStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace everything after an initial load or full refresh.
	///
	/// The displayed set becomes the full list and the mode returns to
	/// [`DisplayMode::All`].
	pub fn replace_all(
		&mut self,
		points: Vec<Point>,
		categories: Vec<CategorySummary>,
		stats: Stats,
	) {
		self.displayed = points.clone();
		self.points = points;
		self.categories = categories;
		self.stats = Some(stats);
		self.mode = DisplayMode::All;
	}

	/// Replace the displayed set and its governing mode.
	///
	/// The authoritative point list is untouched.
	pub fn set_displayed(&mut self, points: Vec<Point>, mode: DisplayMode) {
		self.displayed = points;
		self.mode = mode;
	}

	/// Update the filter state and return the resulting active category.
	///
	/// Selecting the already-active category clears the filter, so calling
	/// this twice with the same category is a no-op pair. The mode follows
	/// the filter: `Some` yields [`DisplayMode::Filtered`], `None` yields
	/// [`DisplayMode::All`].
	pub fn set_filter(&mut self, category: Option<String>) -> Option<String> {
		let next = match category {
			Some(c) if self.active_category() == Some(c.as_str()) => None,
			other => other,
		};
		self.mode = match &next {
			Some(c) => DisplayMode::Filtered(c.clone()),
			None => DisplayMode::All,
		};
		next
	}

	/// Append a freshly added point.
	///
	/// The point always joins the authoritative list. It joins the displayed
	/// set only when the current mode would include it: mode `All`, or
	/// `Filtered(c)` with a matching category. Proximity results are a
	/// snapshot of a past query and never gain new members.
	pub fn append_point(&mut self, point: Point) {
		let displayed = match &self.mode {
			DisplayMode::All => true,
			DisplayMode::Filtered(category) => point.category == *category,
			DisplayMode::Proximity { .. } => false,
		};
		if displayed {
			self.displayed.push(point.clone());
		}
		self.points.push(point);
	}

	/// Replace the derived summaries after a secondary refresh.
	///
	/// Used by the post-add refresh, which must not disturb the point list
	/// or the displayed set.
	pub fn replace_summaries(&mut self, categories: Vec<CategorySummary>, stats: Stats) {
		self.categories = categories;
		self.stats = Some(stats);
	}

	pub fn points(&self) -> &[Point] {
		&self.points
	}

	pub fn displayed(&self) -> &[Point] {
		&self.displayed
	}

	pub fn categories(&self) -> &[CategorySummary] {
		&self.categories
	}

	pub fn stats(&self) -> Option<&Stats> {
		self.stats.as_ref()
	}

	pub fn mode(&self) -> &DisplayMode {
		&self.mode
	}

	/// The active category filter, if the mode is `Filtered`.
	pub fn active_category(&self) -> Option<&str> {
		match &self.mode {
			DisplayMode::Filtered(category) => Some(category.as_str()),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::service::Bounds;

	fn point(id: i64, name: &str, category: &str) -> Point {
		Point {
			id,
			name: name.to_string(),
			category: category.to_string(),
			description: None,
			lat: 41.0,
			lng: 29.0,
			distance_meters: None,
		}
	}

	fn stats(total: u64) -> Stats {
		Stats {
			total_points: total,
			categories: vec!["Historic".to_string()],
			bounds: Bounds::default(),
		}
	}

	fn loaded_store() -> ViewStateStore {
		let mut store = ViewStateStore::new();
		store.replace_all(
			vec![point(1, "Hagia Sophia", "Historic"), point(2, "Grand Bazaar", "Shopping")],
			vec![
				CategorySummary { category: "Historic".to_string(), count: 1 },
				CategorySummary { category: "Shopping".to_string(), count: 1 },
			],
			stats(2),
		);
		store
	}

	#[test]
	fn replace_all_resets_mode_and_displays_everything() {
		let store = loaded_store();
		assert_eq!(*store.mode(), DisplayMode::All);
		assert_eq!(store.displayed().len(), 2);
		assert_eq!(store.points().len(), 2);
	}

	#[test]
	fn filter_toggle_returns_to_all() {
		let mut store = loaded_store();

		let active = store.set_filter(Some("Historic".to_string()));
		assert_eq!(active.as_deref(), Some("Historic"));
		assert_eq!(*store.mode(), DisplayMode::Filtered("Historic".to_string()));

		// Selecting the active category again clears the filter.
		let active = store.set_filter(Some("Historic".to_string()));
		assert_eq!(active, None);
		assert_eq!(*store.mode(), DisplayMode::All);
	}

	#[test]
	fn switching_categories_replaces_the_filter() {
		let mut store = loaded_store();
		store.set_filter(Some("Historic".to_string()));
		let active = store.set_filter(Some("Shopping".to_string()));
		assert_eq!(active.as_deref(), Some("Shopping"));
		assert_eq!(*store.mode(), DisplayMode::Filtered("Shopping".to_string()));
	}

	#[test]
	fn set_displayed_leaves_the_authoritative_list_alone() {
		let mut store = loaded_store();
		store.set_displayed(
			Vec::new(),
			DisplayMode::Proximity { lat: 41.0, lng: 29.0, radius: 500.0 },
		);
		assert!(store.displayed().is_empty());
		assert_eq!(store.points().len(), 2);
	}

	#[test]
	fn append_under_all_mode_displays_the_point() {
		let mut store = loaded_store();
		store.append_point(point(3, "Topkapi Palace", "Historic"));
		assert_eq!(store.points().len(), 3);
		assert_eq!(store.displayed().len(), 3);
	}

	#[test]
	fn append_under_matching_filter_displays_the_point() {
		let mut store = loaded_store();
		store.set_filter(Some("Historic".to_string()));
		store.set_displayed(
			vec![point(1, "Hagia Sophia", "Historic")],
			DisplayMode::Filtered("Historic".to_string()),
		);

		store.append_point(point(3, "Topkapi Palace", "Historic"));
		assert_eq!(store.points().len(), 3);
		assert_eq!(store.displayed().len(), 2);
		assert!(store.displayed().iter().any(|p| p.id == 3));
	}

	#[test]
	fn append_under_other_filter_hides_the_point() {
		let mut store = loaded_store();
		store.set_filter(Some("Shopping".to_string()));
		store.set_displayed(
			vec![point(2, "Grand Bazaar", "Shopping")],
			DisplayMode::Filtered("Shopping".to_string()),
		);

		store.append_point(point(3, "Topkapi Palace", "Historic"));
		assert_eq!(store.points().len(), 3);
		assert_eq!(store.displayed().len(), 1);
	}

	#[test]
	fn append_under_proximity_mode_hides_the_point() {
		let mut store = loaded_store();
		store.set_displayed(
			Vec::new(),
			DisplayMode::Proximity { lat: 41.0, lng: 29.0, radius: 500.0 },
		);

		store.append_point(point(3, "Topkapi Palace", "Historic"));
		assert_eq!(store.points().len(), 3);
		assert!(store.displayed().is_empty());
	}

	#[test]
	fn append_stores_the_point_exactly_once() {
		let mut store = loaded_store();
		store.append_point(point(3, "Topkapi Palace", "Historic"));
		let occurrences = store.points().iter().filter(|p| p.id == 3).count();
		assert_eq!(occurrences, 1);
	}

	#[test]
	fn replace_summaries_keeps_points_and_display() {
		let mut store = loaded_store();
		store.replace_summaries(
			vec![CategorySummary { category: "Historic".to_string(), count: 5 }],
			stats(5),
		);
		assert_eq!(store.points().len(), 2);
		assert_eq!(store.displayed().len(), 2);
		assert_eq!(store.categories().len(), 1);
		assert_eq!(store.stats().map(|s| s.total_points), Some(5));
	}
}
