/// Error types for Missionsync
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    /// A global dependency (processed set, root mission listing) could not be
    /// retrieved. Fatal to the whole reconciliation.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// A single mission's video or transcript listing could not be retrieved.
    #[error("Partial fetch error for mission '{mission}': {reason}")]
    PartialFetch { mission: String, reason: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Graph API error: {0}")]
    Graph(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Lambda runtime error: {0}")]
    Lambda(String),
}

impl SyncError {
    /// Determines if an error is retriable
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Fetch(_) => true,
            Self::PartialFetch { .. } => true,
            Self::Graph(_) => true,
            Self::Storage(_) => true,
            Self::Search(_) => true,
            Self::Llm(_) => true,
            Self::Auth(_) => false,
            Self::Document(_) => false,
            Self::Config(_) => false,
            Self::Validation(_) => false,
            Self::Lambda(_) => false,
        }
    }

    /// Client-side errors: bad input rather than a failing dependency
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Document(_))
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(format!("Invalid JSON: {}", err))
    }
}

impl From<std::env::VarError> for SyncError {
    fn from(err: std::env::VarError) -> Self {
        Self::Config(err.to_string())
    }
}
