use thiserror::Error;

use crate::WeatherSnapshot;

/// Advisory shown to the user whenever the fallback snapshot is on screen
pub const DEGRADED_ADVISORY: &str = "weather data unavailable";

/// Reasons a snapshot fetch can fail. All of them lead to degraded mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Endpoint unreachable or the request timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-2xx status
    #[error("Protocol error: HTTP {status}")]
    Protocol { status: u16 },

    /// Body did not describe a complete, valid snapshot
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl FetchError {
    /// Short identifier for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Protocol { .. } => "protocol",
            FetchError::MalformedPayload(_) => "malformed_payload",
        }
    }

    /// Get the user-facing message; identical for every failure kind
    pub fn user_message(&self) -> &'static str {
        DEGRADED_ADVISORY
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Anything that can produce a fresh weather snapshot
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Source name/identifier
    fn name(&self) -> &str;

    /// Fetch one complete snapshot
    async fn fetch_snapshot(&self) -> FetchResult<WeatherSnapshot>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_shares_one_advisory() {
        let errors = [
            FetchError::Network("connection refused".into()),
            FetchError::Protocol { status: 503 },
            FetchError::MalformedPayload("missing field `pressure`".into()),
        ];
        for err in &errors {
            assert_eq!(err.user_message(), "weather data unavailable");
        }
        assert_eq!(errors[1].kind(), "protocol");
        assert_eq!(errors[1].to_string(), "Protocol error: HTTP 503");
    }
}
