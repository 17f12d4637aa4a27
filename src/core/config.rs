use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;
use std::fmt;

/// An exchange API key pair.
///
/// Both halves are non-empty and never change after construction. The private
/// key is kept in a [`Secret`] and never shows up in `Debug` output or logs.
#[derive(Clone)]
pub struct CredentialPair {
    public_key: String,
    private_key: Secret<String>,
}

impl CredentialPair {
    /// Create a key pair, rejecting empty keys
    pub fn new(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let public_key = public_key.into();
        let private_key = private_key.into();

        if public_key.is_empty() {
            return Err(ConfigError::InvalidConfiguration(
                "public key must not be empty".to_string(),
            ));
        }
        if private_key.is_empty() {
            return Err(ConfigError::InvalidConfiguration(
                "private key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            public_key,
            private_key: Secret::new(private_key),
        })
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Get the private key (use carefully - exposes secret)
    pub fn private_key(&self) -> &str {
        self.private_key.expose_secret()
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Per-connector settings: optional default key pair and base URL override.
///
/// The base URL is read once when the connector is built and stays fixed
/// for the connector's lifetime.
#[derive(Debug, Clone, Default)]
pub struct ExchangeConfig {
    pub credentials: Option<CredentialPair>,
    pub base_url: Option<String>,
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for ExchangeConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ExchangeConfig", 3)?;
        state.serialize_field(
            "api_key",
            &self.credentials.as_ref().map(CredentialPair::public_key),
        )?;
        state.serialize_field(
            "secret_key",
            &self.credentials.as_ref().map(|_| "[REDACTED]"),
        )?;
        state.serialize_field("base_url", &self.base_url)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ExchangeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ExchangeConfigHelper {
            api_key: Option<String>,
            secret_key: Option<String>,
            base_url: Option<String>,
        }

        let helper = ExchangeConfigHelper::deserialize(deserializer)?;
        let credentials = match (helper.api_key, helper.secret_key) {
            (Some(api_key), Some(secret_key)) => Some(
                CredentialPair::new(api_key, secret_key).map_err(serde::de::Error::custom)?,
            ),
            (None, None) => None,
            _ => {
                return Err(serde::de::Error::custom(
                    "api_key and secret_key must be given together",
                ))
            }
        };

        Ok(Self {
            credentials,
            base_url: helper.base_url,
        })
    }
}

impl ExchangeConfig {
    /// Create a new configuration with default API credentials
    pub fn new(api_key: String, secret_key: String) -> Result<Self, ConfigError> {
        Ok(Self {
            credentials: Some(CredentialPair::new(api_key, secret_key)?),
            base_url: None,
        })
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{EXCHANGE}_API_KEY` (e.g., `KRAKEN_API_KEY`)
    /// - `{EXCHANGE}_SECRET_KEY` (e.g., `KRAKEN_SECRET_KEY`)
    /// - `{EXCHANGE}_BASE_URL` (optional)
    pub fn from_env(exchange_prefix: &str) -> Result<Self, ConfigError> {
        let prefix = exchange_prefix.to_uppercase();
        let api_key_var = format!("{}_API_KEY", prefix);
        let secret_key_var = format!("{}_SECRET_KEY", prefix);
        let base_url_var = format!("{}_BASE_URL", prefix);

        let api_key = env::var(&api_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(api_key_var))?;

        let secret_key = env::var(&secret_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(secret_key_var))?;

        Ok(Self {
            credentials: Some(CredentialPair::new(api_key, secret_key)?),
            base_url: env::var(&base_url_var).ok(),
        })
    }

    /// Load a `.env` file (if present) before reading the environment.
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(exchange_prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(exchange_prefix, ".env")
    }

    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(
        exchange_prefix: &str,
        env_file_path: &str,
    ) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(exchange_prefix)
    }

    /// Configuration without default credentials.
    ///
    /// Public operations work; private ones need a per-call key pair.
    #[must_use]
    pub fn read_only() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Set custom base URL
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: CredentialPair) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
