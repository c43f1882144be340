use std::sync::Arc;
use tracing::{error, info};

use poi_view_sync::config::ServiceConfig;
use poi_view_sync::service::PoiServiceClient;
use poi_view_sync::view::{LogRenderSurface, ViewActions, ViewController};

#[tokio::main(flavor = "current_thread")]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive(tracing::Level::INFO.into()),
		)
		.with_target(false)
		.init();

	info!("Starting point viewer");

	let config = ServiceConfig::from_env();
	info!("Using service at {}", config.base_url);

	let client = Arc::new(PoiServiceClient::new(&config));
	let mut controller = ViewController::new(client, Box::new(LogRenderSurface));

	if let Err(e) = controller.check_health().await {
		error!("Service unreachable, giving up: {:?}", e);
		return;
	}

	if let Err(e) = controller.load_initial().await {
		error!("Initial load failed: {:?}", e);
		return;
	}

	// Optional proximity search driven by the environment, handy for
	// smoke-testing a deployment.
	let search = (
		std::env::var("POI_SEARCH_LAT").ok().and_then(|v| v.parse().ok()),
		std::env::var("POI_SEARCH_LNG").ok().and_then(|v| v.parse().ok()),
		std::env::var("POI_SEARCH_RADIUS").ok().and_then(|v| v.parse().ok()),
	);
	if let (Some(lat), Some(lng), radius) = search {
		if let Err(e) = controller.search_nearby(Some(lat), Some(lng), radius).await {
			error!("Proximity search failed: {:?}", e);
		}
	}

	info!(
		"View ready: {} points displayed in mode {:?}",
		controller.store().displayed().len(),
		controller.store().mode()
	);
}
