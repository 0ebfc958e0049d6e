use thiserror::Error;

/// Failures a dashboard pipeline can end with.
///
/// The `Display` text of each variant is what the user sees in the error
/// fragment, so keep it short and free of transport details. Those go into
/// `detail`/`source` and end up in the logs.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The query matched no place.
    #[error("City not found")]
    NotFound { query: String },

    /// Transport failure or non-success status from either endpoint.
    #[error("{message}")]
    Network {
        message: &'static str,
        detail: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The host has no geolocation capability.
    #[error("Geolocation is not supported on this host")]
    GeolocationUnsupported,

    /// Permission denied or the position could not be determined.
    #[error("Unable to retrieve your location")]
    GeolocationDenied,

    /// The payload lacks sections or fields the dashboard needs.
    #[error("Invalid weather data: {0}")]
    MalformedResponse(String),
}

impl DashboardError {
    pub(crate) fn network(message: &'static str, source: reqwest::Error) -> Self {
        Self::Network {
            message,
            detail: source.to_string(),
            source: Some(source),
        }
    }

    pub(crate) fn status(message: &'static str, status: reqwest::StatusCode, body: &str) -> Self {
        Self::Network {
            message,
            detail: format!("status {status}: {}", truncate_body(body)),
            source: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages() {
        let err = DashboardError::NotFound { query: "Atlantis".into() };
        assert_eq!(err.to_string(), "City not found");
        assert!(err.is_not_found());

        assert_eq!(
            DashboardError::GeolocationDenied.to_string(),
            "Unable to retrieve your location"
        );
        assert_eq!(
            DashboardError::MalformedResponse("missing current".into()).to_string(),
            "Invalid weather data: missing current"
        );
    }

    #[test]
    fn status_error_keeps_detail_out_of_message() {
        let err = DashboardError::status(
            "Failed to fetch weather data",
            reqwest::StatusCode::BAD_GATEWAY,
            "upstream down",
        );
        assert_eq!(err.to_string(), "Failed to fetch weather data");
        match err {
            DashboardError::Network { detail, .. } => {
                assert!(detail.contains("502"));
                assert!(detail.contains("upstream down"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(150);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }
}
