//! Books application runtime
//!
//! Owns the router and the session and applies the session guard to views
//! that need a credential.

use serde::Serialize;

use crate::navigation::Router;
use crate::routing::{Resolved, RouteTable};
use crate::session::{
    request_options, require_auth_at, AuthOutcome, AuthScheme, DecoratedRequest, Session,
    SessionError, LOGIN_PATH,
};

pub struct BooksApp {
    router: Router,
    session: Session,
    scheme: AuthScheme,
    login_path: String,
}

impl BooksApp {
    /// Start at no location with an empty session
    pub fn new(table: RouteTable, scheme: AuthScheme) -> Self {
        Self {
            router: Router::new(table),
            session: Session::new(),
            scheme,
            login_path: LOGIN_PATH.to_string(),
        }
    }

    #[must_use]
    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    /// Navigate to `path`.
    ///
    /// Views that need a credential go through the guard first; on
    /// `RedirectRequired` the router is already on the login view.
    pub fn visit(&mut self, path: &str) -> AuthOutcome {
        let target = self.router.table().resolve_or_not_found(path);
        if target.view.requires_auth() {
            let outcome = require_auth_at(&self.session, &mut self.router, &self.login_path);
            if !outcome.is_authorized() {
                return outcome;
            }
        }
        self.router.navigate(path);
        AuthOutcome::Authorized
    }

    pub fn login(&mut self, token: impl Into<String>) {
        self.session.login(token);
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Decorate an API payload with the current session
    pub fn api_request<T>(&self, payload: &T) -> Result<DecoratedRequest, SessionError>
    where
        T: Serialize + ?Sized,
    {
        request_options(payload, &self.session, &self.scheme)
    }

    pub fn current(&self) -> Option<&Resolved> {
        self.router.current()
    }

    pub const fn router(&self) -> &Router {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }
}
