//! Session state
//!
//! Holds the credential of the current user. The value is owned by the
//! application and passed explicitly to every call site that needs it.

use super::AuthScheme;

/// Credential holder; an empty token means unauthenticated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Start unauthenticated
    pub const fn new() -> Self {
        Self {
            token: String::new(),
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Store the token handed back by a successful login
    pub fn login(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    pub fn logout(&mut self) {
        self.token.clear();
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Rebuild a session from an `Authorization` header value.
    ///
    /// The header must be `<scheme> <token>` with the configured scheme;
    /// anything else yields an unauthenticated session.
    pub fn from_authorization(header: Option<&str>, scheme: &AuthScheme) -> Self {
        let token = header
            .and_then(|value| value.strip_prefix(scheme.as_str()))
            .and_then(|rest| rest.strip_prefix(' '))
            .map(str::trim)
            .unwrap_or_default();
        Self::with_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), "");

        session.login("abc123");
        assert!(session.is_authenticated());
        assert_eq!(session.token(), "abc123");

        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_empty_login_stays_unauthenticated() {
        let mut session = Session::new();
        session.login("");
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_from_authorization() {
        let scheme = AuthScheme::default();
        let session = Session::from_authorization(Some("Beare abc123"), &scheme);
        assert_eq!(session.token(), "abc123");

        let session = Session::from_authorization(Some("Bearer abc123"), &scheme);
        assert!(!session.is_authenticated());

        let session = Session::from_authorization(None, &scheme);
        assert!(!session.is_authenticated());

        let session = Session::from_authorization(Some("Beare "), &scheme);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_from_authorization_standard_scheme() {
        let scheme = AuthScheme::bearer();
        let session = Session::from_authorization(Some("Bearer xyz"), &scheme);
        assert_eq!(session.token(), "xyz");
    }
}
