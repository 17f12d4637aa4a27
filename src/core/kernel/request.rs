use crate::core::config::CredentialPair;
use crate::core::errors::ExchangeError;
use crate::core::kernel::nonce::NonceGenerator;
use crate::core::params::Params;
use tracing::{instrument, trace};

/// Key pair and nonce attached to a private request
#[derive(Debug, Clone)]
pub struct Authorization {
    pub credentials: CredentialPair,
    pub nonce: u64,
}

/// One operation call, resolved and ready to be signed.
///
/// Built per call, consumed by a signer, then dropped. `authorization` is
/// present exactly when the operation is private.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    operation: String,
    params: Params,
    authorization: Option<Authorization>,
}

impl RequestDescriptor {
    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn is_private(&self) -> bool {
        self.authorization.is_some()
    }

    pub fn authorization(&self) -> Option<&Authorization> {
        self.authorization.as_ref()
    }

    pub fn nonce(&self) -> Option<u64> {
        self.authorization.as_ref().map(|auth| auth.nonce)
    }

    /// Authorization of a private request, or `MissingCredentials`
    pub fn require_authorization(&self) -> Result<&Authorization, ExchangeError> {
        self.authorization
            .as_ref()
            .ok_or_else(|| ExchangeError::MissingCredentials {
                operation: self.operation.clone(),
            })
    }
}

/// Turns an operation call into a [`RequestDescriptor`]. No I/O.
///
/// Credentials resolve to the per-call override, else the connector default.
/// Private descriptors draw exactly one nonce.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    default_credentials: Option<&'a CredentialPair>,
    nonce: &'a NonceGenerator,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(default_credentials: Option<&'a CredentialPair>, nonce: &'a NonceGenerator) -> Self {
        Self {
            default_credentials,
            nonce,
        }
    }

    #[instrument(skip(self, params, credentials), fields(param_count = params.len()))]
    pub fn build(
        &self,
        operation: &str,
        is_private: bool,
        params: Params,
        credentials: Option<&CredentialPair>,
    ) -> Result<RequestDescriptor, ExchangeError> {
        let authorization = if is_private {
            let credentials = credentials.or(self.default_credentials).ok_or_else(|| {
                ExchangeError::MissingCredentials {
                    operation: operation.to_string(),
                }
            })?;

            let nonce = self.nonce.next();
            trace!(nonce, "Issued nonce");

            Some(Authorization {
                credentials: credentials.clone(),
                nonce,
            })
        } else {
            None
        };

        Ok(RequestDescriptor {
            operation: operation.to_string(),
            params,
            authorization,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::nonce::Clock;
    use std::sync::Arc;

    struct FrozenClock;

    impl Clock for FrozenClock {
        fn ticks(&self) -> u64 {
            1000
        }
    }

    fn creds(public: &str) -> CredentialPair {
        CredentialPair::new(public, "secret").unwrap()
    }

    #[test]
    fn test_public_descriptor_has_no_nonce() {
        let nonce = NonceGenerator::with_clock(Arc::new(FrozenClock));
        let builder = RequestBuilder::new(None, &nonce);

        let descriptor = builder
            .build("getmarkets", false, Params::new(), None)
            .unwrap();
        assert!(!descriptor.is_private());
        assert_eq!(descriptor.nonce(), None);
        assert_eq!(nonce.last_issued(), 0);
    }

    #[test]
    fn test_private_without_credentials_fails() {
        let nonce = NonceGenerator::with_clock(Arc::new(FrozenClock));
        let builder = RequestBuilder::new(None, &nonce);

        let result = builder.build("Balance", true, Params::new(), None);
        assert!(matches!(
            result,
            Err(ExchangeError::MissingCredentials { operation }) if operation == "Balance"
        ));
        // No nonce is burned by a failed build
        assert_eq!(nonce.last_issued(), 0);
    }

    #[test]
    fn test_override_beats_default() {
        let nonce = NonceGenerator::with_clock(Arc::new(FrozenClock));
        let default = creds("default_key");
        let builder = RequestBuilder::new(Some(&default), &nonce);

        let explicit = creds("override_key");
        let descriptor = builder
            .build("Balance", true, Params::new(), Some(&explicit))
            .unwrap();
        let auth = descriptor.require_authorization().unwrap();
        assert_eq!(auth.credentials.public_key(), "override_key");

        let descriptor = builder
            .build("Balance", true, Params::new(), None)
            .unwrap();
        let auth = descriptor.require_authorization().unwrap();
        assert_eq!(auth.credentials.public_key(), "default_key");
    }

    #[test]
    fn test_one_nonce_per_private_descriptor() {
        let nonce = NonceGenerator::with_clock(Arc::new(FrozenClock));
        let default = creds("key");
        let builder = RequestBuilder::new(Some(&default), &nonce);

        let first = builder.build("Balance", true, Params::new(), None).unwrap();
        let second = builder.build("Balance", true, Params::new(), None).unwrap();
        assert_eq!(first.nonce(), Some(1000));
        assert_eq!(second.nonce(), Some(1001));
        assert_eq!(nonce.last_issued(), 1001);
    }

    #[test]
    fn test_optional_params_never_reach_descriptor() {
        let nonce = NonceGenerator::with_clock(Arc::new(FrozenClock));
        let default = creds("key");
        let builder = RequestBuilder::new(Some(&default), &nonce);

        let market: Option<&str> = None;
        let params = Params::new().with("market", &market);
        let descriptor = builder
            .build("market/getopenorders", true, params, None)
            .unwrap();
        assert!(!descriptor.params().contains_key("market"));
        assert!(descriptor.params().is_empty());
    }
}
