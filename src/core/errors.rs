use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    /// A private operation had neither an explicit key pair nor a default one.
    /// Raised before any request is built or sent.
    #[error("Missing credentials: private operation '{operation}' needs an API key pair")]
    MissingCredentials { operation: String },

    #[error("Transport error: {0}")]
    TransportError(String),

    /// HTTP 429, or an exchange payload that reports its own rate limit.
    #[error(
        "Rate limit exceeded{}",
        .retry_after.map(|s| format!(", retry after {}s", s)).unwrap_or_default()
    )]
    RateLimitExceeded { retry_after: Option<u64> },

    /// The exchange rejected the request. `message` is the exchange's own text.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl ExchangeError {
    /// True for HTTP 429 and exchange-reported throttling
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    /// True when the exchange was never reached or the connection broke
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::TransportError(_))
    }
}
