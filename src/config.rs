//! Runtime configuration for the service client.
//!
//! Defaults are a 10 second request timeout, three attempts per operation,
//! and one second between attempts; all knobs can be overridden through
//! environment variables.

use std::time::Duration;

/// Configuration for the remote POI service client.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
	/// Base URL of the service API, without a trailing slash.
	pub base_url: String,
	/// Per-request timeout enforced by the HTTP client.
	pub timeout: Duration,
	/// Total attempts per operation, including the first.
	pub retry_attempts: u32,
	/// Fixed delay between attempts.
	pub retry_delay: Duration,
}

impl Default for ServiceConfig {
	fn default() -> Self {
		Self {
			base_url: "http://localhost:3000/api".to_string(),
			timeout: Duration::from_secs(10),
			retry_attempts: 3,
			retry_delay: Duration::from_millis(1000),
		}
	}
}

impl ServiceConfig {
	/// Build a configuration from defaults with environment overrides.
	///
	/// Recognized variables: `POI_API_URL`, `POI_API_TIMEOUT_MS`,
	/// `POI_API_RETRY_ATTEMPTS`, `POI_API_RETRY_DELAY_MS`. Unparsable values
	/// keep the default.
	pub fn from_env() -> Self {
		let mut config = Self::default();

		if let Ok(v) = std::env::var("POI_API_URL") {
			config.base_url = v;
		}
		if let Ok(v) = std::env::var("POI_API_TIMEOUT_MS") {
			if let Ok(ms) = v.parse::<u64>() {
				config.timeout = Duration::from_millis(ms);
			}
		}
		if let Ok(v) = std::env::var("POI_API_RETRY_ATTEMPTS") {
			if let Ok(n) = v.parse::<u32>() {
				config.retry_attempts = n;
			}
		}
		if let Ok(v) = std::env::var("POI_API_RETRY_DELAY_MS") {
			if let Ok(ms) = v.parse::<u64>() {
				config.retry_delay = Duration::from_millis(ms);
			}
		}

		config
	}
}
