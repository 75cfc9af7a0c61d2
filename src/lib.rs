// Orbital Impact - orbital mechanics and asteroid impact physics
// Library root: computation modules, data providers and the route dispatcher

pub mod api_client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod impact_physics;
pub mod physics_engine;

pub use endpoints::{dispatch, AppState, ROUTES};
pub use error::{ApiError, PhysicsError, ProviderError};

use tracing::info;

/// Serve a single request with configuration taken from the environment.
/// An explicit `api_key` takes precedence over `NASA_API_KEY`.
pub async fn run(
    route: &str,
    params: serde_json::Value,
    api_key: Option<String>,
) -> Result<serde_json::Value, ApiError> {
    let app_state = AppState::from_env();
    if let Some(key) = api_key {
        app_state.set_api_key(key);
    }

    let config = app_state.config();
    info!(
        demo_key = config.uses_demo_key(),
        timeout_secs = config.request_timeout.as_secs(),
        "service configured"
    );

    dispatch(&app_state, route, params).await
}
