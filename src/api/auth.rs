//! Bearer token authentication.

use std::fmt;

use clap::Args;
use zeroize::Zeroize;

use crate::api::errors::ApiError;

/// Authentication settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Bearer token attached to authenticated service calls
    #[arg(long, env = "AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,
}

impl AuthConfig {
    /// Builds the [`AuthContext`] for this configuration.
    #[must_use]
    pub fn context(&self) -> AuthContext {
        AuthContext::new(self.auth_token.clone())
    }
}

/// Bearer token value. Wiped from memory on drop.
#[derive(Clone)]
pub struct BearerToken {
    value: String,
}

impl BearerToken {
    /// Raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(**redacted**)")
    }
}

impl Drop for BearerToken {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

/// Credentials for calls made on behalf of the signed-in operator.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    token: Option<BearerToken>,
}

impl AuthContext {
    /// Creates a context from an optional token; blank tokens count as absent.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        let token = token
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(|value| BearerToken { value });

        Self { token }
    }

    /// A context with no credentials.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Whether a token is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The bearer token.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingToken`]: no token is present.
    pub fn token(&self) -> Result<&BearerToken, ApiError> {
        self.token.as_ref().ok_or(ApiError::MissingToken)
    }

    /// `Authorization` header value, e.g. `Bearer abc123`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingToken`]: no token is present.
    pub fn authorization_header(&self) -> Result<String, ApiError> {
        Ok(format!("Bearer {}", self.token()?.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn header_carries_the_token() -> TestResult {
        let auth = AuthContext::new(Some(" abc123 ".to_string()));

        assert!(auth.is_authenticated());
        assert_eq!(auth.authorization_header()?, "Bearer abc123");

        Ok(())
    }

    #[test]
    fn missing_or_blank_token_fails_before_any_call() {
        for auth in [AuthContext::anonymous(), AuthContext::new(Some("   ".to_string()))] {
            assert!(!auth.is_authenticated());
            assert!(matches!(
                auth.authorization_header(),
                Err(ApiError::MissingToken)
            ));
        }
    }

    #[test]
    fn debug_output_redacts_token() {
        let auth = AuthContext::new(Some("super-secret".to_string()));
        let debug = format!("{auth:?}");

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn config_builds_context() -> TestResult {
        let config = AuthConfig {
            auth_token: Some("t0k3n".to_string()),
        };

        assert_eq!(config.context().token()?.as_str(), "t0k3n");

        Ok(())
    }
}
