//! Session guard module
//!
//! - `Session`: the credential of the current user
//! - `require_auth`: gate protected navigation behind a present credential
//! - `request_options`: decorate outgoing API calls with the credential

mod guard;
mod request;
mod store;

use serde::{Deserialize, Serialize};

pub use guard::{check_session, require_auth, require_auth_at, AuthOutcome, LOGIN_PATH};
pub use request::{request_options, DecoratedRequest};
pub use store::Session;

/// Errors raised while decorating a request
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("payload is not serializable as JSON: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("credential cannot be sent in an Authorization header")]
    InvalidCredential,
    #[error("failed to build request: {0}")]
    Request(#[from] hyper::http::Error),
}

/// Prefix written before the token in the `Authorization` header.
///
/// Defaults to the literal `Beare`, which is what the existing books backend
/// receives; `bearer()` gives the standard spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthScheme(String);

impl AuthScheme {
    pub const LEGACY: &'static str = "Beare";
    pub const STANDARD: &'static str = "Bearer";

    pub fn new(scheme: impl Into<String>) -> Self {
        Self(scheme.into())
    }

    pub fn bearer() -> Self {
        Self::new(Self::STANDARD)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `"<scheme> <token>"`
    pub fn header_value(&self, token: &str) -> String {
        format!("{} {token}", self.0)
    }
}

impl Default for AuthScheme {
    fn default() -> Self {
        Self::new(Self::LEGACY)
    }
}
