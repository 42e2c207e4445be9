//! Session gate for protected navigation and calls

use super::Session;
use crate::navigation::Navigate;

/// Default location of the login view
pub const LOGIN_PATH: &str = "/login";

/// Result of checking the session before a protected action
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A credential is present; continue
    Authorized,
    /// No credential; the caller must stop and go to the given path
    RedirectRequired(String),
}

impl AuthOutcome {
    pub const fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// Decide without side effects
pub fn check_session(session: &Session, login_path: &str) -> AuthOutcome {
    if session.is_authenticated() {
        AuthOutcome::Authorized
    } else {
        AuthOutcome::RedirectRequired(login_path.to_string())
    }
}

/// Gate a protected action, pushing the login view when unauthenticated
pub fn require_auth<N>(session: &Session, navigator: &mut N) -> AuthOutcome
where
    N: Navigate + ?Sized,
{
    require_auth_at(session, navigator, LOGIN_PATH)
}

/// Same as [`require_auth`] with a custom login location
pub fn require_auth_at<N>(session: &Session, navigator: &mut N, login_path: &str) -> AuthOutcome
where
    N: Navigate + ?Sized,
{
    let outcome = check_session(session, login_path);
    if let AuthOutcome::RedirectRequired(path) = &outcome {
        navigator.push(path);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingNavigator {
        pushed: Vec<String>,
    }

    impl Navigate for RecordingNavigator {
        fn push(&mut self, path: &str) {
            self.pushed.push(path.to_string());
        }
    }

    #[test]
    fn test_empty_token_redirects_to_login() {
        let mut nav = RecordingNavigator::default();
        let outcome = require_auth(&Session::new(), &mut nav);
        assert_eq!(outcome, AuthOutcome::RedirectRequired("/login".to_string()));
        assert!(!outcome.is_authorized());
        assert_eq!(nav.pushed, vec!["/login"]);
    }

    #[test]
    fn test_token_present_does_not_navigate() {
        let mut nav = RecordingNavigator::default();
        let outcome = require_auth(&Session::with_token("abc123"), &mut nav);
        assert_eq!(outcome, AuthOutcome::Authorized);
        assert!(nav.pushed.is_empty());
    }

    #[test]
    fn test_custom_login_path() {
        let mut nav = RecordingNavigator::default();
        let outcome = require_auth_at(&Session::new(), &mut nav, "/signin");
        assert_eq!(outcome, AuthOutcome::RedirectRequired("/signin".to_string()));
        assert_eq!(nav.pushed, vec!["/signin"]);
    }

    #[test]
    fn test_check_session_is_pure() {
        assert!(check_session(&Session::with_token("t"), LOGIN_PATH).is_authorized());
        assert_eq!(
            check_session(&Session::new(), LOGIN_PATH),
            AuthOutcome::RedirectRequired(LOGIN_PATH.to_string())
        );
    }
}
