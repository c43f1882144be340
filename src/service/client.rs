//!
//! HTTP client for the point-of-interest service.
//!
//! This module provides an async client for the remote POI service together
//! with the [`PoiService`] trait that the view layer consumes. Every request
//! goes through a linear retry loop with a fixed delay between attempts; the
//! final error propagates unchanged once the attempts are exhausted. All
//! methods are async and designed for use with Tokio.

use super::types::*;
use crate::config::ServiceConfig;
use reqwest::Client;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Remote operations offered by the point-of-interest service.
///
/// The view layer only depends on this trait, so tests can substitute an
/// in-memory fake for the HTTP client.
#[async_trait::async_trait]
pub trait PoiService: Send + Sync {
	/// Check service and database health.
	async fn health(&self) -> Result<HealthStatus, ServiceError>;

	/// Fetch every stored point.
	async fn all_points(&self) -> Result<Vec<Point>, ServiceError>;

	/// Fetch the points belonging to one category.
	async fn points_by_category(&self, category: &str) -> Result<Vec<Point>, ServiceError>;

	/// Submit a new point and return it as stored by the service.
	async fn add_point(&self, point: &NewPoint) -> Result<Point, ServiceError>;

	/// Fetch the points within `radius` meters of a coordinate.
	///
	/// A missing or non-positive radius falls back to
	/// [`DEFAULT_SEARCH_RADIUS_M`].
	async fn find_nearby(
		&self,
		lat: f64,
		lng: f64,
		radius: Option<f64>,
	) -> Result<Vec<Point>, ServiceError>;

	/// Fetch the per-category point counts.
	async fn categories(&self) -> Result<Vec<CategorySummary>, ServiceError>;

	/// Fetch aggregate statistics over all points.
	async fn stats(&self) -> Result<Stats, ServiceError>;
}

#[derive(Serialize)]
struct NearbyQuery {
	lat: f64,
	lng: f64,
	radius: f64,
}

/// HTTP implementation of [`PoiService`].
///
/// Stateless aside from its configuration; cloning shares the underlying
/// connection pool.
#[derive(Clone)]
pub struct PoiServiceClient {
	http_client: Client,
	base_url: String,
	retry_attempts: u32,
	retry_delay: Duration,
}

impl PoiServiceClient {
	/// Create a new client from the service configuration.
	pub fn new(config: &ServiceConfig) -> Self {
		let http_client = Client::builder()
			.timeout(config.timeout)
			.build()
			.expect("Failed to create HTTP client");

		Self {
			http_client,
			base_url: config.base_url.trim_end_matches('/').to_string(),
			// A zero attempt count would never issue the request at all.
			retry_attempts: config.retry_attempts.max(1),
			retry_delay: config.retry_delay,
		}
	}

	fn endpoint(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	/// Run `call` up to the configured attempt count, sleeping for the fixed
	/// retry delay between attempts.
	///
	/// Retries on any failure, including non-2xx statuses the transport turned
	/// into errors. The policy deliberately does not classify errors as
	/// retryable or not; the last error is returned unchanged.
	async fn with_retry<T, F, Fut>(&self, operation: &str, call: F) -> Result<T, ServiceError>
	where
		F: Fn() -> Fut,
		Fut: Future<Output = Result<T, ServiceError>>,
	{
		let mut attempt = 1u32;
		loop {
			match call().await {
				Ok(value) => {
					debug!("{} succeeded on attempt {}", operation, attempt);
					return Ok(value);
				}
				Err(err) if attempt < self.retry_attempts => {
					warn!(
						"{} failed on attempt {}/{}: {}",
						operation, attempt, self.retry_attempts, err
					);
					tokio::time::sleep(self.retry_delay).await;
					attempt += 1;
				}
				Err(err) => {
					warn!(
						"{} failed on final attempt {}/{}: {}",
						operation, attempt, self.retry_attempts, err
					);
					return Err(err);
				}
			}
		}
	}

	async fn get_json<T: serde::de::DeserializeOwned>(
		&self,
		operation: &str,
		url: &str,
	) -> Result<T, ServiceError> {
		self.with_retry(operation, || async {
			let response = self
				.http_client
				.get(url)
				.send()
				.await?
				.error_for_status()?;
			Ok(response.json().await?)
		})
		.await
	}
}

#[async_trait::async_trait]
impl PoiService for PoiServiceClient {
	async fn health(&self) -> Result<HealthStatus, ServiceError> {
		self.get_json("health check", &self.endpoint("/health")).await
	}

	async fn all_points(&self) -> Result<Vec<Point>, ServiceError> {
		self.get_json("list all points", &self.endpoint("/points"))
			.await
	}

	async fn points_by_category(&self, category: &str) -> Result<Vec<Point>, ServiceError> {
		let url = self.endpoint(&format!("/points/category/{}", category));
		self.get_json("list points by category", &url).await
	}

	async fn add_point(&self, point: &NewPoint) -> Result<Point, ServiceError> {
		let url = self.endpoint("/points");
		self.with_retry("add point", || async {
			let response = self
				.http_client
				.post(&url)
				.json(point)
				.send()
				.await?
				.error_for_status()?;
			Ok(response.json().await?)
		})
		.await
	}

	async fn find_nearby(
		&self,
		lat: f64,
		lng: f64,
		radius: Option<f64>,
	) -> Result<Vec<Point>, ServiceError> {
		let url = self.endpoint("/nearby");
		let query = NearbyQuery {
			lat,
			lng,
			radius: effective_radius(radius),
		};
		self.with_retry("find nearby points", || async {
			let response = self
				.http_client
				.get(&url)
				.query(&query)
				.send()
				.await?
				.error_for_status()?;
			Ok(response.json().await?)
		})
		.await
	}

	async fn categories(&self) -> Result<Vec<CategorySummary>, ServiceError> {
		self.get_json("list categories", &self.endpoint("/categories"))
			.await
	}

	async fn stats(&self) -> Result<Stats, ServiceError> {
		self.get_json("get stats", &self.endpoint("/stats")).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicU32, Ordering};

	fn test_client(attempts: u32) -> PoiServiceClient {
		PoiServiceClient::new(&ServiceConfig {
			base_url: "http://localhost:0/api".to_string(),
			timeout: Duration::from_secs(1),
			retry_attempts: attempts,
			retry_delay: Duration::from_millis(1000),
		})
	}

	#[tokio::test(start_paused = true)]
	async fn perpetual_failure_is_attempted_exactly_n_times() {
		let client = test_client(3);
		let calls = AtomicU32::new(0);

		let result: Result<(), ServiceError> = client
			.with_retry("always failing", || async {
				calls.fetch_add(1, Ordering::SeqCst);
				Err(ServiceError::Service("service down".to_string()))
			})
			.await;

		assert!(matches!(result, Err(ServiceError::Service(_))));
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test(start_paused = true)]
	async fn transient_failure_recovers_before_attempts_run_out() {
		let client = test_client(3);
		let calls = AtomicU32::new(0);

		let result = client
			.with_retry("flaky", || async {
				let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
				if n < 3 {
					Err(ServiceError::Service("not yet".to_string()))
				} else {
					Ok(n)
				}
			})
			.await;

		assert_eq!(result.expect("third attempt should succeed"), 3);
		assert_eq!(calls.load(Ordering::SeqCst), 3);
	}

	#[tokio::test(start_paused = true)]
	async fn attempt_count_is_never_below_one() {
		let client = test_client(0);
		let calls = AtomicU32::new(0);

		let result: Result<(), ServiceError> = client
			.with_retry("clamped", || async {
				calls.fetch_add(1, Ordering::SeqCst);
				Err(ServiceError::Service("down".to_string()))
			})
			.await;

		assert!(result.is_err());
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}
}
