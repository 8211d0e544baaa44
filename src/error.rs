use actix_web::http::StatusCode;
use thiserror::Error;

/// Classification of a failed text-generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    RateLimited,
    BadRequest,
    AuthError,
    Unknown,
}

impl ProviderErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => ProviderErrorKind::RateLimited,
            400 => ProviderErrorKind::BadRequest,
            401 | 403 => ProviderErrorKind::AuthError,
            _ => ProviderErrorKind::Unknown,
        }
    }
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Config(String),

    #[error("{message}")]
    Provider {
        kind: ProviderErrorKind,
        message: String,
    },

    #[error("Invalid response from generation provider: {0}")]
    MalformedResponse(String),

    #[error("Outbound request failed: {0}")]
    Http(String),
}

impl PlanError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PlanError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Errors that stop the remaining section calls of a plan: a missing
    /// credential fails every call, and a rejected prompt means the request
    /// itself is unusable
    pub fn is_fatal_for_plan(&self) -> bool {
        matches!(self, PlanError::Validation(_) | PlanError::Config(_))
    }

    pub fn provider_kind(&self) -> Option<ProviderErrorKind> {
        match self {
            PlanError::Provider { kind, .. } => Some(*kind),
            PlanError::MalformedResponse(_) | PlanError::Http(_) => Some(ProviderErrorKind::Unknown),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PlanError {
    fn from(err: reqwest::Error) -> Self {
        // The URL can carry provider keys in its query string
        PlanError::Http(err.without_url().to_string())
    }
}

/// Failure inside geocoding or map composition. Never surfaces to clients.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("no results")]
    NoResults,

    #[error("unexpected payload: {0}")]
    Payload(String),
}

impl From<reqwest::Error> for GeoError {
    fn from(err: reqwest::Error) -> Self {
        GeoError::Http(err.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ProviderErrorKind::from_status(429), ProviderErrorKind::RateLimited);
        assert_eq!(ProviderErrorKind::from_status(400), ProviderErrorKind::BadRequest);
        assert_eq!(ProviderErrorKind::from_status(403), ProviderErrorKind::AuthError);
        assert_eq!(ProviderErrorKind::from_status(401), ProviderErrorKind::AuthError);
        assert_eq!(ProviderErrorKind::from_status(503), ProviderErrorKind::Unknown);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PlanError::Validation("missing".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlanError::Config("no key".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let err = PlanError::Provider {
            kind: ProviderErrorKind::RateLimited,
            message: "slow down".into(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "slow down");
    }

    #[test]
    fn test_malformed_counts_as_provider_failure() {
        let err = PlanError::MalformedResponse("no candidates".into());
        assert_eq!(err.provider_kind(), Some(ProviderErrorKind::Unknown));
        assert!(!err.is_fatal_for_plan());
        assert!(PlanError::Config("x".into()).is_fatal_for_plan());
    }
}
