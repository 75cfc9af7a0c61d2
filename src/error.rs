// Error types shared by the physics modules, the data providers and the
// endpoint layer

use thiserror::Error;

/// Input that the physics cannot be evaluated on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("impact angle must lie in (0, 90] degrees, got {0}")]
    AngleOutOfRange(f64),
    #[error("eccentricity must be non-negative, got {0}")]
    NegativeEccentricity(f64),
    #[error("eccentricity {0} describes an open trajectory, not a closed orbit")]
    OpenOrbit(f64),
    /// Laser ablation would remove at least the whole asteroid; the rocket
    /// equation has no real solution there.
    #[error("ablated mass {ablated_kg:.3e} kg exceeds asteroid mass {asteroid_kg:.3e} kg")]
    AblationExceedsMass { ablated_kg: f64, asteroid_kg: f64 },
}

/// Failure talking to an external data feed.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{provider} returned status {status}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("invalid {provider} URL: {reason}")]
    InvalidUrl {
        provider: &'static str,
        reason: String,
    },
    #[error("unexpected {provider} payload: {reason}")]
    Payload {
        provider: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} is required")]
    MissingParameter(&'static str),
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    #[error("unknown route: {0}")]
    UnknownRoute(String),
    #[error(transparent)]
    Physics(#[from] PhysicsError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ApiError {
    /// HTTP status a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingParameter(_)
            | ApiError::InvalidParams(_)
            | ApiError::Physics(_) => 400,
            ApiError::UnknownRoute(_) => 404,
            ApiError::Provider(ProviderError::Status { status, .. }) => status.as_u16(),
            ApiError::Provider(_) => 502,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidParams(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingParameter("eccentricity").status_code(), 400);
        assert_eq!(ApiError::UnknownRoute("nope".into()).status_code(), 404);
        let physics: ApiError = PhysicsError::AngleOutOfRange(120.0).into();
        assert_eq!(physics.status_code(), 400);
        let provider: ApiError = ProviderError::Status {
            provider: "NeoWs",
            status: reqwest::StatusCode::NOT_FOUND,
        }
        .into();
        assert_eq!(provider.status_code(), 404);
    }

    #[test]
    fn test_messages() {
        let err = ApiError::MissingParameter("semi_major_axis");
        assert_eq!(err.to_string(), "semi_major_axis is required");

        let err = PhysicsError::AblationExceedsMass {
            ablated_kg: 2.0e6,
            asteroid_kg: 1.0e3,
        };
        assert!(err.to_string().contains("exceeds asteroid mass"));
    }
}
