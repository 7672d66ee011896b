use std::fmt;

/// Which of the two upstream calls failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Geocoding,
    Forecast,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Worded the way the user sees it.
        f.write_str(match self {
            Endpoint::Geocoding => "location",
            Endpoint::Forecast => "weather",
        })
    }
}

/// Coarse failure classes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    NotFound,
    InvalidData,
}

/// Everything that can abort a resolution. The `Display` text is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Failed to fetch {endpoint} (status {status})")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("Failed to fetch {endpoint}: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read {endpoint} response: {detail}")]
    Decode { endpoint: Endpoint, detail: String },

    #[error("City not found")]
    NotFound,

    #[error("Invalid coordinates")]
    InvalidCoordinates,
}

impl ResolveError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ResolveError::Status { .. }
            | ResolveError::Transport { .. }
            | ResolveError::Decode { .. } => FailureKind::Network,
            ResolveError::NotFound => FailureKind::NotFound,
            ResolveError::InvalidCoordinates => FailureKind::InvalidData,
        }
    }

    /// HTTP status of the failed call, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResolveError::Status { status, .. } => Some(*status),
            ResolveError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            ResolveError::Status { endpoint, .. }
            | ResolveError::Transport { endpoint, .. }
            | ResolveError::Decode { endpoint, .. } => Some(*endpoint),
            ResolveError::NotFound | ResolveError::InvalidCoordinates => None,
        }
    }
}
