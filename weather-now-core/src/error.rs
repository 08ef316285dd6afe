use reqwest::StatusCode;

/// Which of the two remote services a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Geocode,
    Forecast,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Geocode => "location",
            Stage::Forecast => "weather",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to reach the {stage} service: {source}")]
    Transport {
        stage: Stage,
        #[source]
        source: reqwest::Error,
    },

    #[error("The {stage} service responded with status {status}")]
    Status { stage: Stage, status: StatusCode },

    #[error("Failed to parse {stage} service response: {source}")]
    Decode {
        stage: Stage,
        #[source]
        source: serde_json::Error,
    },
}

impl ServiceError {
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ServiceError::Client(_) => None,
            ServiceError::Transport { stage, .. }
            | ServiceError::Status { stage, .. }
            | ServiceError::Decode { stage, .. } => Some(*stage),
        }
    }

    /// The service could not be reached or refused the request.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ServiceError::Transport { .. } | ServiceError::Status { .. })
    }
}
