//! Request handler module
//!
//! Dispatches each request to the frontend host or the demo server and wraps
//! it with the shared concerns: header logging, the `Server` header and the
//! access log line.

pub mod demo;
pub mod frontend;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, REFERER, SERVER, USER_AGENT};
use hyper::Request;

use crate::config::AppState;
use crate::http::HttpResponse;
use crate::logger::{self, AccessLogEntry};

/// Which listener a connection arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Frontend,
    Demo,
}

impl Service {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Demo => "demo",
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    service: Service,
    peer: Option<SocketAddr>,
) -> Result<HttpResponse, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_log = state.access_log();

    let mut entry = access_log.then(|| {
        let mut entry =
            AccessLogEntry::from_request(peer, req.method(), req.uri(), req.version());
        entry.referer = header_string(&req, REFERER);
        entry.user_agent = header_string(&req, USER_AGENT);
        entry
    });

    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let mut response = match service {
        Service::Frontend => frontend::handle(&req, &state),
        Service::Demo => demo::handle(req, &state).await,
    };

    if let Ok(value) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, value);
    }

    if let Some(entry) = entry.as_mut() {
        let body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.finish(response.status().as_u16(), body_bytes, started);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn header_string<B>(req: &Request<B>, name: hyper::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
