//! API token resolution.

use std::fmt;

use crate::error::PublishError;

/// Bearer token for the forge API.
///
/// Held in memory only; `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Reads the token from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self, PublishError> {
        Self::from_lookup(var, |name| std::env::var(name).ok())
    }

    /// Resolves the token through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// A missing or empty value is [`PublishError::MissingCredential`]. The
    /// token format is not checked; a bad token surfaces as an
    /// authentication failure on the first request.
    pub fn from_lookup<F>(var: &str, lookup: F) -> Result<Self, PublishError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match lookup(var) {
            Some(token) if !token.is_empty() => Ok(Self(token)),
            _ => Err(PublishError::MissingCredential {
                var: var.to_string(),
            }),
        }
    }

    /// Returns the raw token.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
