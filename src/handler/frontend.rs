//! Frontend host
//!
//! Serves every GET path of the single-page application by resolving it
//! through the route table and rendering the selected view. Views that need a
//! credential are gated by the session guard using the `Authorization` header.

use std::fmt::Write;

use hyper::header::AUTHORIZATION;
use hyper::{Method, Request, StatusCode};

use crate::config::AppState;
use crate::http::{self, HttpResponse};
use crate::logger;
use crate::routing::Resolved;
use crate::session::{check_session, AuthOutcome, Session};

const ALLOW: &str = "GET, HEAD, OPTIONS";

/// Entry point for frontend host requests
pub fn handle<B>(req: &Request<B>, state: &AppState) -> HttpResponse {
    let method = req.method();
    let path = req.uri().path();
    let is_head = method == Method::HEAD;

    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return resp;
    }

    let health = &state.config.health;
    if health.enabled && (path == health.liveness_path || path == health.readiness_path) {
        return http::build_health_response("ok");
    }

    let resolved = state.routes.resolve_or_not_found(path);

    if resolved.view.requires_auth() {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        let session = Session::from_authorization(header, &state.config.session.auth_scheme);
        if let AuthOutcome::RedirectRequired(target) =
            check_session(&session, &state.config.session.login_path)
        {
            logger::log_debug(&format!(
                "[Frontend] {path} requires a session, redirecting to {target}"
            ));
            return http::build_redirect_response(&target);
        }
    }

    let status = if resolved.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    http::build_html_response(status, render_view(&resolved), is_head)
}

/// GET/HEAD continue; OPTIONS and anything else answer immediately
fn check_http_method(method: &Method, enable_cors: bool) -> Option<HttpResponse> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(ALLOW, enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response(ALLOW))
        }
    }
}

/// Render the application shell for a resolved view
pub fn render_view(resolved: &Resolved) -> String {
    let mut params = String::new();
    for (name, value) in resolved.params.iter() {
        let name = escape_html(name);
        let _ = writeln!(
            params,
            "      <dt>{name}</dt><dd data-param=\"{name}\">{}</dd>",
            escape_html(value),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
  </head>
  <body>
    <main id="app" data-view="{view}" data-route="{route}">
      <h1>{title}</h1>
      <dl>
{params}      </dl>
    </main>
  </body>
</html>
"#,
        title = resolved.view.title(),
        view = resolved.view.name(),
        route = escape_html(resolved.route.as_deref().unwrap_or("")),
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
